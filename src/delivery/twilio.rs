use async_trait::async_trait;
use serde::Deserialize;

use super::{DeliveryError, SmsTransport};
use crate::appsettings::TwilioSettings;

const UNVERIFIED_DESTINATION: i64 = 21608;
const UNSUPPORTED_REGION: i64 = 21408;

/// SMS delivery over Twilio's REST API.
pub struct TwilioSmsTransport {
    http: reqwest::Client,
    account_sid: String,
    auth_token: String,
    from_number: String,
    api_base: String,
}

/// The subset of Twilio's error body we act on.
#[derive(Debug, Default, Deserialize)]
struct TwilioErrorBody {
    code: Option<i64>,
    message: Option<String>,
}

impl TwilioSmsTransport {
    pub fn new(settings: &TwilioSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            account_sid: settings.account_sid.clone(),
            auth_token: settings.auth_token.clone(),
            from_number: settings.from_number.clone(),
            api_base: settings.api_base.trim_end_matches('/').to_owned(),
        }
    }
}

#[async_trait]
impl SmsTransport for TwilioSmsTransport {
    async fn send_sms(&self, to: &str, body: &str) -> Result<(), DeliveryError> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base, self.account_sid
        );
        let params = [("To", to), ("From", self.from_number.as_str()), ("Body", body)];

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await?;

        if response.status().is_success() {
            log::debug!("SMS accepted for {to}");
            return Ok(());
        }

        let error: TwilioErrorBody = response.json().await.unwrap_or_default();
        Err(match error.code {
            Some(UNVERIFIED_DESTINATION) => DeliveryError::UnverifiedDestination(to.to_owned()),
            Some(UNSUPPORTED_REGION) => DeliveryError::UnsupportedRegion(to.to_owned()),
            _ => DeliveryError::Rejected(
                error.message.unwrap_or_else(|| "Failed to send SMS".to_owned()),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport(server: &MockServer) -> TwilioSmsTransport {
        TwilioSmsTransport::new(&TwilioSettings {
            account_sid: "AC123".into(),
            auth_token: "token".into(),
            from_number: "+15075127184".into(),
            api_base: server.uri(),
        })
    }

    #[tokio::test]
    async fn posts_form_encoded_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/AC123/Messages.json"))
            .and(body_string_contains("To=%2B15551234567"))
            .and(body_string_contains("From=%2B15075127184"))
            .and(body_string_contains("Body=take+pills"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "sid": "SM1", "status": "queued"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = transport(&server).send_sms("+15551234567", "take pills").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn maps_unverified_destination_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "code": 21608, "message": "The number is unverified"
            })))
            .mount(&server)
            .await;

        let err = transport(&server)
            .send_sms("+15551234567", "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, DeliveryError::UnverifiedDestination(_)));
        assert!(err.to_string().contains("+15551234567"));
    }

    #[tokio::test]
    async fn maps_unsupported_region_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "code": 21408, "message": "Permission to send to region not enabled"
            })))
            .mount(&server)
            .await;

        let err = transport(&server)
            .send_sms("+15551234567", "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, DeliveryError::UnsupportedRegion(_)));
    }

    #[tokio::test]
    async fn other_failures_carry_the_upstream_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "code": 20003, "message": "Authentication Error"
            })))
            .mount(&server)
            .await;

        let err = transport(&server)
            .send_sms("+15551234567", "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, DeliveryError::Rejected(ref m) if m == "Authentication Error"));
    }

    #[tokio::test]
    async fn unparseable_error_body_falls_back_to_generic_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("gateway exploded"))
            .mount(&server)
            .await;

        let err = transport(&server)
            .send_sms("+15551234567", "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, DeliveryError::Rejected(ref m) if m == "Failed to send SMS"));
    }
}
