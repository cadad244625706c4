//! # Payment Initiation Request
//!
//! The pay-page payload and the builder that assembles it from caller
//! input plus static merchant configuration. Every build mints a fresh
//! merchant transaction id.

use crate::amount::Subunits;
use crate::error::PaymentResult;
use crate::merchant::{validate_mobile_number, validate_user_id, MerchantProfile};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How the gateway hands the payer back to `redirectUrl`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RedirectMode {
    /// Browser GET redirect
    #[default]
    Redirect,
    /// Auto-submitted form POST
    Post,
}

/// Payment instrument type. Only the hosted pay page is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentType {
    #[default]
    PayPage,
}

/// Payment instrument descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaymentInstrument {
    #[serde(rename = "type")]
    pub instrument_type: InstrumentType,
}

/// Payload sent (base64-encoded) to the gateway's pay endpoint.
///
/// Field order is the wire order of the canonical JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInitiationRequest {
    pub merchant_id: String,
    pub merchant_transaction_id: String,
    pub merchant_user_id: String,
    /// Amount in paise
    pub amount: Subunits,
    pub redirect_url: String,
    pub redirect_mode: RedirectMode,
    pub callback_url: String,
    pub mobile_number: String,
    pub payment_instrument: PaymentInstrument,
}

impl PaymentInitiationRequest {
    /// Serialize to the canonical JSON bytes that get signed
    pub fn to_canonical_json(&self) -> PaymentResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Optional payer details supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayerDetails {
    pub user_id: Option<String>,
    pub mobile_number: Option<String>,
}

/// Assembles `PaymentInitiationRequest`s for one merchant
#[derive(Debug, Clone)]
pub struct PaymentRequestBuilder {
    merchant_id: String,
    base_url: String,
    profile: MerchantProfile,
}

impl PaymentRequestBuilder {
    /// Create a builder for a merchant whose public URLs live under `base_url`
    pub fn new(
        merchant_id: impl Into<String>,
        base_url: impl Into<String>,
        profile: MerchantProfile,
    ) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            base_url: base_url.into(),
            profile,
        }
    }

    /// Merchant profile in use
    pub fn profile(&self) -> &MerchantProfile {
        &self.profile
    }

    /// Build a request from a raw major-unit amount and optional payer details
    pub fn build_from_major(
        &self,
        raw_amount: &str,
        payer: &PayerDetails,
    ) -> PaymentResult<PaymentInitiationRequest> {
        let amount = Subunits::parse_major(raw_amount)?;
        self.build_for(amount, payer)
    }

    /// Build a request, validating any caller-supplied payer details
    pub fn build_for(
        &self,
        amount: Subunits,
        payer: &PayerDetails,
    ) -> PaymentResult<PaymentInitiationRequest> {
        let user_id = match &payer.user_id {
            Some(id) => {
                validate_user_id(id)?;
                id.clone()
            }
            None => self.profile.merchant_user_id.clone(),
        };

        let mobile_number = match &payer.mobile_number {
            Some(number) => {
                validate_mobile_number(number)?;
                number.clone()
            }
            None => self.profile.mobile_number.clone(),
        };

        let mut request = self.build(amount);
        request.merchant_user_id = user_id;
        request.mobile_number = mobile_number;
        Ok(request)
    }

    /// Build a request using the profile's payer defaults
    pub fn build(&self, amount: Subunits) -> PaymentInitiationRequest {
        let merchant_transaction_id = Uuid::new_v4().to_string();

        PaymentInitiationRequest {
            merchant_id: self.merchant_id.clone(),
            redirect_url: self
                .profile
                .redirect_url(&self.base_url, &merchant_transaction_id),
            merchant_transaction_id,
            merchant_user_id: self.profile.merchant_user_id.clone(),
            amount,
            redirect_mode: self.profile.redirect_mode,
            callback_url: self.profile.callback_url(&self.base_url),
            mobile_number: self.profile.mobile_number.clone(),
            payment_instrument: PaymentInstrument::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PaymentError;

    fn builder() -> PaymentRequestBuilder {
        PaymentRequestBuilder::new("MERCHANTUAT", "http://localhost:8080", MerchantProfile::default())
    }

    #[test]
    fn test_build_converts_to_paise() {
        let request = builder()
            .build_from_major("30", &PayerDetails::default())
            .unwrap();

        assert_eq!(request.amount.value(), 3000);
        assert_eq!(request.merchant_id, "MERCHANTUAT");
        assert_eq!(request.merchant_user_id, "123242");
        assert_eq!(request.mobile_number, "9999999999");
        assert_eq!(request.redirect_mode, RedirectMode::Redirect);
        assert_eq!(request.callback_url, "http://localhost:8080/callback-url");
        assert_eq!(
            request.redirect_url,
            format!(
                "http://localhost:8080/redirect-url/{}",
                request.merchant_transaction_id
            )
        );
    }

    #[test]
    fn test_zero_amount_is_built() {
        let request = builder().build_from_major("0", &PayerDetails::default()).unwrap();
        assert_eq!(request.amount.value(), 0);
    }

    #[test]
    fn test_invalid_amount() {
        let err = builder()
            .build_from_major("thirty", &PayerDetails::default())
            .unwrap_err();
        assert!(matches!(err, PaymentError::InvalidAmount(_)));
    }

    #[test]
    fn test_transaction_ids_are_fresh() {
        let b = builder();
        let first = b.build(Subunits::from_major(1).unwrap());
        let second = b.build(Subunits::from_major(1).unwrap());

        assert_ne!(first.merchant_transaction_id, second.merchant_transaction_id);
        assert!(Uuid::parse_str(&first.merchant_transaction_id).is_ok());
    }

    #[test]
    fn test_payer_overrides() {
        let payer = PayerDetails {
            user_id: Some("cust-7".to_string()),
            mobile_number: Some("9876543210".to_string()),
        };
        let request = builder()
            .build_for(Subunits::from_major(5).unwrap(), &payer)
            .unwrap();

        assert_eq!(request.merchant_user_id, "cust-7");
        assert_eq!(request.mobile_number, "9876543210");
    }

    #[test]
    fn test_bad_mobile_override_rejected() {
        let payer = PayerDetails {
            user_id: None,
            mobile_number: Some("12ab".to_string()),
        };
        let err = builder()
            .build_for(Subunits::from_major(5).unwrap(), &payer)
            .unwrap_err();
        assert!(matches!(err, PaymentError::InvalidRequest(_)));
    }

    #[test]
    fn test_canonical_json_shape() {
        let mut request = builder().build(Subunits::from_major(30).unwrap());
        request.merchant_transaction_id = "T1".to_string();
        request.redirect_url = "http://localhost:8080/redirect-url/T1".to_string();

        let json = String::from_utf8(request.to_canonical_json().unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"merchantId":"MERCHANTUAT","merchantTransactionId":"T1","merchantUserId":"123242","amount":3000,"redirectUrl":"http://localhost:8080/redirect-url/T1","redirectMode":"REDIRECT","callbackUrl":"http://localhost:8080/callback-url","mobileNumber":"9999999999","paymentInstrument":{"type":"PAY_PAGE"}}"#
        );
    }
}
