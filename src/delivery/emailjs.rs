use async_trait::async_trait;

use super::{DeliveryError, EmailTransport};
use crate::appsettings::EmailSettings;

/// Email delivery through the EmailJS HTTP API. Success is binary; the
/// provider reports no structured failure codes worth distinguishing.
pub struct EmailJsTransport {
    http: reqwest::Client,
    service_id: String,
    template_id: String,
    user_id: String,
    from_name: String,
    from_address: String,
    api_base: String,
}

impl EmailJsTransport {
    pub fn new(settings: &EmailSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            service_id: settings.service_id.clone(),
            template_id: settings.template_id.clone(),
            user_id: settings.user_id.clone(),
            from_name: settings.from_name.clone(),
            from_address: settings.from_address.clone(),
            api_base: settings.api_base.trim_end_matches('/').to_owned(),
        }
    }
}

#[async_trait]
impl EmailTransport for EmailJsTransport {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), DeliveryError> {
        let url = format!("{}/api/v1.0/email/send", self.api_base);
        let payload = serde_json::json!({
            "service_id": self.service_id,
            "template_id": self.template_id,
            "user_id": self.user_id,
            "template_params": {
                "to_email": to,
                "from_name": self.from_name,
                "from_email": self.from_address,
                "subject": subject,
                "message": body,
            },
        });

        let response = self.http.post(&url).json(&payload).send().await?;

        if response.status().is_success() {
            log::debug!("email accepted for {to}");
            Ok(())
        } else {
            Err(DeliveryError::Rejected("Failed to send email".to_owned()))
        }
    }
}
