use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;

use super::ReminderStorage;
use crate::reminder::Reminder;

/// Persists the collection as a single JSON array in one file.
pub struct JsonFileReminderStorage {
    path: PathBuf,
}

impl JsonFileReminderStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ReminderStorage for JsonFileReminderStorage {
    async fn load(&self) -> anyhow::Result<Vec<Reminder>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", self.path.display()));
            }
        };

        serde_json::from_str(&raw).with_context(|| format!("parsing {}", self.path.display()))
    }

    async fn save(&self, reminders: &[Reminder]) -> anyhow::Result<()> {
        let raw = serde_json::to_string(reminders)?;
        tokio::fs::write(&self.path, raw)
            .await
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}
