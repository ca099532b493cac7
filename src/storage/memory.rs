use async_trait::async_trait;
use tokio::sync::RwLock;

use super::ReminderStorage;
use crate::reminder::Reminder;

/// Keeps the blob in memory. Used by tests and useful as a stand-in
/// wherever persistence does not matter.
#[derive(Default)]
pub struct InMemoryReminderStorage {
    store: RwLock<Vec<Reminder>>,
}

impl InMemoryReminderStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReminderStorage for InMemoryReminderStorage {
    async fn load(&self) -> anyhow::Result<Vec<Reminder>> {
        Ok(self.store.read().await.clone())
    }

    async fn save(&self, reminders: &[Reminder]) -> anyhow::Result<()> {
        *self.store.write().await = reminders.to_vec();
        Ok(())
    }
}
