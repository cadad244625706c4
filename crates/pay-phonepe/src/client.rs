//! # PhonePe Pay Page Client
//!
//! Encodes, signs and sends pay-page initiation requests.
//!
//! ```text
//! request ─▶ canonical JSON ─▶ base64 ─▶ X-VERIFY
//!                                  │          │
//!                                  ▼          ▼
//!                     POST {"request": "<b64>"}  ─▶ envelope
//! ```

use crate::checksum::{encode_payload, sign};
use crate::config::{PhonePeConfig, PAY_ENDPOINT};
use crate::transport::{HttpTransport, ReqwestTransport, SignedRequest};
use async_trait::async_trait;
use pay_core::{
    PaymentGateway, PaymentInitiationRequest, PaymentInitiationResponse,
    PaymentResult,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Outer body of every pay call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayEnvelope {
    pub request: String,
}

/// PhonePe hosted pay-page gateway
pub struct PhonePeClient {
    config: PhonePeConfig,
    transport: Arc<dyn HttpTransport>,
}

impl PhonePeClient {
    /// Create a client backed by reqwest, honouring `config.timeout`
    pub fn new(config: PhonePeConfig) -> PaymentResult<Self> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client over an explicit transport
    pub fn with_transport(config: PhonePeConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        Self::new(PhonePeConfig::from_env()?)
    }

    pub fn config(&self) -> &PhonePeConfig {
        &self.config
    }

    /// Encode and sign a request without sending it
    pub fn sign_request(&self, request: &PaymentInitiationRequest) -> PaymentResult<SignedRequest> {
        let payload = request.to_canonical_json()?;
        let encoded = encode_payload(&payload);
        let x_verify = sign(
            &encoded,
            PAY_ENDPOINT,
            &self.config.salt_key,
            &self.config.salt_index,
        );
        let body = serde_json::to_string(&PayEnvelope { request: encoded })?;

        Ok(SignedRequest {
            url: self.config.pay_url(),
            x_verify,
            body,
        })
    }
}

#[async_trait]
impl PaymentGateway for PhonePeClient {
    #[instrument(
        skip(self, request),
        fields(
            merchant_transaction_id = %request.merchant_transaction_id,
            amount = %request.amount
        )
    )]
    async fn initiate(
        &self,
        request: &PaymentInitiationRequest,
    ) -> PaymentResult<PaymentInitiationResponse> {
        let signed = self.sign_request(request)?;

        let reply = self.transport.send(signed).await.map_err(|e| {
            error!("PhonePe call failed: {}", e);
            e
        })?;

        let response = PaymentInitiationResponse::from_slice(&reply.body).map_err(|e| {
            error!(
                "Unreadable PhonePe response: status={}, body={}",
                reply.status,
                String::from_utf8_lossy(&reply.body)
            );
            e
        })?;

        if response.success {
            info!(
                "PhonePe accepted initiation: status={}, code={}",
                reply.status, response.code
            );
        } else {
            warn!(
                "PhonePe declined initiation: status={}, code={}, message={}",
                reply.status, response.code, response.message
            );
        }

        Ok(response)
    }

    fn provider_name(&self) -> &'static str {
        "phonepe"
    }
}

impl std::fmt::Debug for PhonePeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhonePeClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::decode_payload;
    use crate::transport::RawResponse;
    use pay_core::{MerchantProfile, PaymentError, PaymentRequestBuilder, Subunits};
    use std::sync::Mutex;

    const SUCCESS_BODY: &str = r#"{"success":true,"code":"PAYMENT_INITIATED","message":"Payment initiated","data":{"merchantId":"MERCHANTUAT","merchantTransactionId":"T1","instrumentResponse":{"type":"PAY_PAGE","redirectInfo":{"url":"http://example.com/redirect","method":"GET"}}}}"#;

    struct StubTransport {
        status: u16,
        body: &'static str,
        seen: Mutex<Vec<SignedRequest>>,
    }

    impl StubTransport {
        fn new(status: u16, body: &'static str) -> Arc<Self> {
            Arc::new(Self {
                status,
                body,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl HttpTransport for StubTransport {
        async fn send(&self, request: SignedRequest) -> PaymentResult<RawResponse> {
            self.seen.lock().unwrap().push(request);
            Ok(RawResponse {
                status: self.status,
                body: self.body.as_bytes().to_vec(),
            })
        }
    }

    struct DownTransport;

    #[async_trait]
    impl HttpTransport for DownTransport {
        async fn send(&self, _request: SignedRequest) -> PaymentResult<RawResponse> {
            Err(PaymentError::GatewayUnreachable {
                message: "connection refused".to_string(),
                timed_out: false,
            })
        }
    }

    fn config() -> PhonePeConfig {
        PhonePeConfig::new(
            "https://api-preprod.phonepe.com/apis/pg-sandbox",
            "MERCHANTUAT",
            "099eb0cd-02cf-4e2a-8aca-3e6c6aff0399",
            "1",
        )
    }

    fn request() -> PaymentInitiationRequest {
        PaymentRequestBuilder::new("MERCHANTUAT", "http://localhost:8080", MerchantProfile::default())
            .build(Subunits::from_major(30).unwrap())
    }

    #[test]
    fn test_sign_request_envelope() {
        let client = PhonePeClient::with_transport(config(), StubTransport::new(200, SUCCESS_BODY));
        let request = request();
        let signed = client.sign_request(&request).unwrap();

        assert_eq!(
            signed.url,
            "https://api-preprod.phonepe.com/apis/pg-sandbox/pg/v1/pay"
        );

        let envelope: PayEnvelope = serde_json::from_str(&signed.body).unwrap();
        assert_eq!(signed.body, format!(r#"{{"request":"{}"}}"#, envelope.request));
        assert_eq!(
            decode_payload(&envelope.request).unwrap(),
            request.to_canonical_json().unwrap()
        );
        assert_eq!(
            signed.x_verify,
            sign(
                &envelope.request,
                "/pg/v1/pay",
                "099eb0cd-02cf-4e2a-8aca-3e6c6aff0399",
                "1"
            )
        );
    }

    #[test]
    fn test_signature_changes_per_transaction() {
        let client = PhonePeClient::with_transport(config(), StubTransport::new(200, SUCCESS_BODY));
        let first = client.sign_request(&request()).unwrap();
        let second = client.sign_request(&request()).unwrap();
        assert_ne!(first.x_verify, second.x_verify);
    }

    #[tokio::test]
    async fn test_initiate_then_resolve() {
        let transport = StubTransport::new(200, SUCCESS_BODY);
        let client = PhonePeClient::with_transport(config(), transport.clone());

        let redirect = client.checkout(&request()).await.unwrap();

        assert_eq!(redirect.url, "http://example.com/redirect");
        assert_eq!(transport.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_declined_envelope_on_4xx_is_parsed() {
        let transport = StubTransport::new(
            400,
            r#"{"success":false,"code":"BAD_REQUEST","message":"Please check the inputs you have provided."}"#,
        );
        let client = PhonePeClient::with_transport(config(), transport);

        let response = client.initiate(&request()).await.unwrap();
        assert!(!response.success);
        assert_eq!(response.code, "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let client = PhonePeClient::with_transport(
            config(),
            StubTransport::new(502, "<html>Bad Gateway</html>"),
        );
        let err = client.initiate(&request()).await.unwrap_err();
        assert!(matches!(err, PaymentError::MalformedGatewayResponse(_)));
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_retried() {
        let client = PhonePeClient::with_transport(config(), Arc::new(DownTransport));
        let err = client.initiate(&request()).await.unwrap_err();
        assert_eq!(err.status_code(), 502);
    }

    #[test]
    fn test_debug_hides_salt() {
        let client = PhonePeClient::with_transport(config(), Arc::new(DownTransport));
        assert!(!format!("{:?}", client).contains("099eb0cd"));
    }
}
