use std::sync::OnceLock;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct TwilioSettings {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
    #[serde(default = "default_twilio_api_base")]
    pub api_base: String,
}

#[derive(Deserialize, Debug)]
pub struct EmailSettings {
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
    pub from_name: String,
    pub from_address: String,
    #[serde(default = "default_email_api_base")]
    pub api_base: String,
}

#[derive(Deserialize, Debug)]
pub struct StorageSettings {
    #[serde(default = "default_storage_path")]
    pub path: String,
}

#[derive(Deserialize, Debug)]
pub struct AppSettings {
    pub twilio: TwilioSettings,
    pub email: EmailSettings,
    #[serde(default)]
    pub storage: StorageSettings,
}

fn default_twilio_api_base() -> String {
    "https://api.twilio.com".to_owned()
}

fn default_email_api_base() -> String {
    "https://api.emailjs.com".to_owned()
}

fn default_storage_path() -> String {
    "reminders.json".to_owned()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            path: default_storage_path(),
        }
    }
}

impl AppSettings {
    fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("appsettings").required(true))
            .add_source(File::with_name("appsettings.local").required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}

pub fn get() -> &'static AppSettings {
    static APPSETTINGS: OnceLock<AppSettings> = OnceLock::new();
    APPSETTINGS.get_or_init(|| AppSettings::new().unwrap())
}
