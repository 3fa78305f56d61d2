//! HTTP client for the Quidax deposit address endpoint.

use depot_common::config::AppConfig;
use depot_common::error::AppError;
use depot_common::types::{DepositAddress, UpstreamEnvelope};

/// Authenticated Quidax API client.
///
/// Cheap to clone; the underlying `reqwest::Client` shares its connection pool.
#[derive(Clone)]
pub struct QuidaxClient {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
}

impl QuidaxClient {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            base_url: config.quidax_base_url.clone(),
            secret_key: config.quidax_secret_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Target URL for a user/currency pair. Segments are inserted verbatim.
    pub fn address_url(&self, user_id: &str, currency: &str) -> String {
        format!(
            "{}/users/{}/wallets/{}/addresses",
            self.base_url, user_id, currency
        )
    }

    /// Ask the exchange to generate a deposit address.
    ///
    /// Returns `Ok(None)` when the exchange answers without a success envelope,
    /// including an empty 2xx body. Transport failures, empty non-2xx replies and
    /// bodies that are not an envelope at all are returned as errors.
    pub async fn generate_deposit_address(
        &self,
        user_id: &str,
        currency: &str,
    ) -> Result<Option<DepositAddress>, AppError> {
        if user_id.is_empty() {
            return Err(AppError::Validation("user id must not be empty".to_string()));
        }

        let url = self.address_url(user_id, currency);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.secret_key)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        tracing::debug!(
            user_id,
            currency,
            status = status.as_u16(),
            body_len = body.len(),
            "Quidax address response received"
        );

        if body.iter().all(u8::is_ascii_whitespace) {
            if !status.is_success() {
                return Err(AppError::UpstreamStatus(status.as_u16()));
            }
            tracing::warn!(
                user_id,
                currency,
                status = status.as_u16(),
                "Quidax returned an empty body"
            );
            return Ok(None);
        }

        let envelope: UpstreamEnvelope = serde_json::from_slice(&body).map_err(|e| {
            AppError::Decode(format!(
                "Quidax responded {} with an unreadable body: {}",
                status, e
            ))
        })?;

        let envelope_status = envelope.status.clone();
        let address = envelope.into_success();

        if address.is_none() {
            tracing::warn!(
                user_id,
                currency,
                status = status.as_u16(),
                envelope_status = %envelope_status,
                "Quidax did not report success"
            );
        }

        Ok(address)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const SECRET: &str = "sk_test_123";

    fn client_for(base_url: String) -> QuidaxClient {
        let config = AppConfig {
            quidax_secret_key: SECRET.to_string(),
            quidax_base_url: base_url,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
        };
        QuidaxClient::new(&config).unwrap()
    }

    async fn mock_upstream(template: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/users/u1/wallets/btc/addresses"))
            .respond_with(template)
            .mount(&server)
            .await;
        server
    }

    #[test]
    fn test_address_url_literal_substitution() {
        let client = client_for("https://app.quidax.io/api/v1".to_string());
        assert_eq!(
            client.address_url("me", "usdt"),
            "https://app.quidax.io/api/v1/users/me/wallets/usdt/addresses"
        );
    }

    #[tokio::test]
    async fn test_success_envelope_is_unwrapped() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/users/u1/wallets/btc/addresses"))
            .and(header("authorization", "Bearer sk_test_123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": {"id": "a1", "address": "1ABC", "created_at": "2024-01-01T00:00:00Z"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(format!("{}/api/v1", server.uri()));
        let address = client
            .generate_deposit_address("u1", "btc")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            address,
            DepositAddress {
                id: "a1".to_string(),
                address: "1ABC".to_string(),
                created_at: "2024-01-01T00:00:00Z".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_authorization_header_sent_once_with_empty_body() {
        let server = mock_upstream(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"id": "a1", "address": "1ABC", "created_at": "2024-01-01T00:00:00Z"}
        })))
        .await;

        let client = client_for(format!("{}/api/v1", server.uri()));
        client.generate_deposit_address("u1", "btc").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let auth: Vec<_> = requests[0].headers.get_all("authorization").iter().collect();
        assert_eq!(auth.len(), 1);
        assert_eq!(auth[0], "Bearer sk_test_123");
        assert!(requests[0].body.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_yields_none() {
        let server = mock_upstream(
            ResponseTemplate::new(200).set_body_json(json!({"status": "error"})),
        )
        .await;

        let client = client_for(format!("{}/api/v1", server.uri()));
        let result = client.generate_deposit_address("u1", "btc").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_non_2xx_with_envelope_yields_none() {
        let server = mock_upstream(ResponseTemplate::new(422).set_body_json(json!({
            "status": "error",
            "message": "currency not supported",
            "data": null
        })))
        .await;

        let client = client_for(format!("{}/api/v1", server.uri()));
        let result = client.generate_deposit_address("u1", "btc").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_empty_body_yields_none() {
        let server = mock_upstream(ResponseTemplate::new(200)).await;

        let client = client_for(format!("{}/api/v1", server.uri()));
        let result = client.generate_deposit_address("u1", "btc").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_empty_unauthorized_reply_is_error() {
        let server = mock_upstream(ResponseTemplate::new(401)).await;

        let client = client_for(format!("{}/api/v1", server.uri()));
        let err = client.generate_deposit_address("u1", "btc").await.unwrap_err();
        assert!(matches!(err, AppError::UpstreamStatus(401)));
    }

    #[tokio::test]
    async fn test_empty_server_error_reply_is_error() {
        let server = mock_upstream(ResponseTemplate::new(500)).await;

        let client = client_for(format!("{}/api/v1", server.uri()));
        let err = client.generate_deposit_address("u1", "btc").await.unwrap_err();
        assert!(matches!(err, AppError::UpstreamStatus(500)));
    }

    #[tokio::test]
    async fn test_unparseable_body_is_decode_error() {
        let server =
            mock_upstream(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
                .await;

        let client = client_for(format!("{}/api/v1", server.uri()));
        let err = client.generate_deposit_address("u1", "btc").await.unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[tokio::test]
    async fn test_connection_failure_is_upstream_error() {
        // Nothing listens on port 1.
        let client = client_for("http://127.0.0.1:1/api/v1".to_string());
        let err = client.generate_deposit_address("u1", "btc").await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_empty_user_id_rejected() {
        let client = client_for("http://127.0.0.1:1/api/v1".to_string());
        let err = client.generate_deposit_address("", "btc").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
