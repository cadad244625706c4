//! # HTTP Transport
//!
//! The single outbound capability the gateway client needs: POST a JSON
//! body with an X-VERIFY header and hand back status plus raw body.
//! Swapped for a stub in tests.

use async_trait::async_trait;
use pay_core::{PaymentError, PaymentResult};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

pub const X_VERIFY: &str = "X-VERIFY";
pub const APPLICATION_JSON: &str = "application/json";

/// A signed outbound call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub url: String,
    pub x_verify: String,
    pub body: String,
}

/// Raw gateway reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: SignedRequest) -> PaymentResult<RawResponse>;
}

/// reqwest-backed transport with a hard request timeout
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PaymentError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

fn unreachable(err: reqwest::Error) -> PaymentError {
    PaymentError::GatewayUnreachable {
        timed_out: err.is_timeout(),
        message: err.to_string(),
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn send(&self, request: SignedRequest) -> PaymentResult<RawResponse> {
        let response = self
            .client
            .post(&request.url)
            .header(reqwest::header::CONTENT_TYPE, APPLICATION_JSON)
            .header(X_VERIFY, &request.x_verify)
            .body(request.body)
            .send()
            .await
            .map_err(unreachable)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(unreachable)?;

        debug!("PhonePe responded: status={}, {} bytes", status, body.len());

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn signed(url: String) -> SignedRequest {
        SignedRequest {
            url,
            x_verify: "abc###1".to_string(),
            body: r#"{"request":"e30="}"#.to_string(),
        }
    }

    #[tokio::test]
    async fn test_posts_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pg/v1/pay"))
            .and(header("content-type", "application/json"))
            .and(header("x-verify", "abc###1"))
            .and(body_string(r#"{"request":"e30="}"#))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":true}"#))
            .expect(1)
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();
        let reply = transport
            .send(signed(format!("{}/pg/v1/pay", server.uri())))
            .await
            .unwrap();

        assert_eq!(reply.status, 200);
        assert_eq!(reply.body, br#"{"success":true}"#.to_vec());
    }

    #[tokio::test]
    async fn test_non_2xx_is_returned_not_raised() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"success":false}"#))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();
        let reply = transport.send(signed(server.uri())).await.unwrap();
        assert_eq!(reply.status, 400);
    }

    #[tokio::test]
    async fn test_timeout_is_unreachable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(Duration::from_millis(100)).unwrap();
        let err = transport.send(signed(server.uri())).await.unwrap_err();

        assert!(matches!(
            err,
            PaymentError::GatewayUnreachable { timed_out: true, .. }
        ));
        assert_eq!(err.status_code(), 504);
    }

    #[tokio::test]
    async fn test_connection_refused_is_unreachable() {
        let transport = ReqwestTransport::new(Duration::from_secs(2)).unwrap();
        let err = transport
            .send(signed("http://127.0.0.1:1/pg/v1/pay".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PaymentError::GatewayUnreachable { timed_out: false, .. }
        ));
    }
}
