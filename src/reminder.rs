use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

pub type ReminderId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    Sms,
    Email,
}

/// A reminder as it lives in the stored collection. Field names stay
/// camelCase on the wire so existing blobs keep parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: ReminderId,
    pub date: String,
    pub time: String,
    pub message: String,
    pub method: DeliveryMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    // Carried over from the legacy data model; nothing sets it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Everything the user supplies; the id is assigned by the service.
#[derive(Debug, Clone)]
pub struct ReminderDraft {
    pub date: String,
    pub time: String,
    pub message: String,
    pub method: DeliveryMethod,
    pub phone_number: Option<String>,
    pub country_code: Option<String>,
    pub email: Option<String>,
}

impl ReminderDraft {
    pub fn into_reminder(self, id: ReminderId) -> Reminder {
        Reminder {
            id,
            date: self.date,
            time: self.time,
            message: self.message,
            method: self.method,
            phone_number: self.phone_number,
            country_code: self.country_code,
            email: self.email,
            completed: None,
        }
    }

    /// The contact field the selected method needs, if present.
    pub fn contact(&self) -> Option<&str> {
        match self.method {
            DeliveryMethod::Sms => self.phone_number.as_deref(),
            DeliveryMethod::Email => self.email.as_deref(),
        }
    }

    pub fn due_at(&self) -> Option<NaiveDateTime> {
        parse_due_at(&self.date, &self.time)
    }
}

impl Reminder {
    /// The contact field the selected method needs, if present.
    pub fn contact(&self) -> Option<&str> {
        match self.method {
            DeliveryMethod::Sms => self.phone_number.as_deref(),
            DeliveryMethod::Email => self.email.as_deref(),
        }
    }

    /// Combined due instant, in local time. `None` if the stored date or
    /// time does not parse.
    pub fn due_at(&self) -> Option<NaiveDateTime> {
        parse_due_at(&self.date, &self.time)
    }

    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        self.due_at().is_some_and(|due| due <= now)
    }
}

fn parse_due_at(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .ok()?;
    Some(date.and_time(time))
}
