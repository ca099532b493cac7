mod json_file;
mod memory;

pub use json_file::JsonFileReminderStorage;
pub use memory::InMemoryReminderStorage;

use async_trait::async_trait;

use crate::reminder::Reminder;

/// Whole-collection storage: one key, one serialized blob. There is no
/// per-entry access and no partial-write protection; every mutation is a
/// full rewrite by the caller.
#[async_trait]
pub trait ReminderStorage: Send + Sync {
    /// The full ordered collection. A missing backing key is an empty
    /// collection, not an error; unreadable or corrupt content is an error
    /// the caller is expected to degrade to empty.
    async fn load(&self) -> anyhow::Result<Vec<Reminder>>;

    /// Overwrites the single stored key with the full collection.
    async fn save(&self, reminders: &[Reminder]) -> anyhow::Result<()>;
}
