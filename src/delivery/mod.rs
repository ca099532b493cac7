mod dispatcher;
mod emailjs;
pub mod phone;
mod twilio;

pub use dispatcher::DeliveryDispatcher;
pub use emailjs::EmailJsTransport;
pub use twilio::TwilioSmsTransport;

use async_trait::async_trait;
use thiserror::Error;

/// Why a dispatch attempt failed. The named variants carry the upstream
/// rejection codes the SMS provider distinguishes; everything else folds
/// into `Rejected` with whatever message the provider gave.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error(
        "this is a trial account which can only send SMS to US and Canada phone numbers \
         (starting with +1); the number {0} is not supported"
    )]
    RegionRestricted(String),

    #[error(
        "{0} is not verified; trial accounts can only send to verified numbers"
    )]
    UnverifiedDestination(String),

    #[error(
        "region not supported: {0}; trial accounts can only send to verified numbers \
         or to numbers in the US and Canada"
    )]
    UnsupportedRegion(String),

    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[async_trait]
pub trait SmsTransport: Send + Sync {
    async fn send_sms(&self, to: &str, body: &str) -> Result<(), DeliveryError>;
}

#[async_trait]
pub trait EmailTransport: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), DeliveryError>;
}
