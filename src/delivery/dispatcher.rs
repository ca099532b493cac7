use std::sync::Arc;

use super::{DeliveryError, EmailTransport, SmsTransport, phone};
use crate::notify::{Notice, Notifier};
use crate::reminder::{DeliveryMethod, Reminder};

const EMAIL_SUBJECT: &str = "Reminder";

/// Picks the transport matching the reminder's method and invokes it once.
/// Every failure is caught here and turned into `false`; outcomes are
/// reported through the notifier either way.
pub struct DeliveryDispatcher {
    sms: Arc<dyn SmsTransport>,
    email: Arc<dyn EmailTransport>,
    notifier: Arc<dyn Notifier>,
}

impl DeliveryDispatcher {
    pub fn new(
        sms: Arc<dyn SmsTransport>,
        email: Arc<dyn EmailTransport>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            sms,
            email,
            notifier,
        }
    }

    pub async fn deliver(&self, reminder: &Reminder) -> bool {
        match reminder.method {
            DeliveryMethod::Sms => {
                let Some(number) = reminder.phone_number.as_deref() else {
                    log::warn!("reminder {} has no phone number, not sending", reminder.id);
                    return false;
                };
                self.deliver_sms(number, reminder.country_code.as_deref(), &reminder.message)
                    .await
            }
            DeliveryMethod::Email => {
                let Some(address) = reminder.email.as_deref() else {
                    log::warn!("reminder {} has no email address, not sending", reminder.id);
                    return false;
                };
                self.deliver_email(address, &reminder.message).await
            }
        }
    }

    async fn deliver_sms(&self, number: &str, country_code: Option<&str>, message: &str) -> bool {
        let to = phone::format_destination(number, country_code);
        log::debug!("attempting to send SMS to {to}");

        // Transport policy, checked before ever hitting the network.
        if !phone::is_supported_destination(&to) {
            let reason = DeliveryError::RegionRestricted(to);
            log::warn!("refusing SMS: {reason}");
            self.notifier
                .notify(Notice::error("SMS Sending Failed", reason.to_string()))
                .await;
            return false;
        }

        match self.sms.send_sms(&to, message).await {
            Ok(()) => {
                self.notifier
                    .notify(Notice::info(
                        "SMS Sent Successfully",
                        format!("Your message has been sent to {to}"),
                    ))
                    .await;
                true
            }
            Err(e) => {
                log::error!("error sending SMS to {to}: {e}");
                self.notifier
                    .notify(Notice::error("SMS Sending Failed", e.to_string()))
                    .await;
                false
            }
        }
    }

    async fn deliver_email(&self, address: &str, message: &str) -> bool {
        match self.email.send_email(address, EMAIL_SUBJECT, message).await {
            Ok(()) => {
                self.notifier
                    .notify(Notice::info(
                        "Email Sent Successfully",
                        format!("Your message has been sent to {address}"),
                    ))
                    .await;
                true
            }
            Err(e) => {
                log::error!("error sending email to {address}: {e}");
                self.notifier
                    .notify(Notice::error(
                        "Email Sending Failed",
                        format!("Failed to send email: {e}"),
                    ))
                    .await;
                false
            }
        }
    }
}
