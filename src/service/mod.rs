
use std::sync::Arc;

use chrono::Local;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::delivery::DeliveryDispatcher;
use crate::notify::{Notice, Notifier};
use crate::reminder::{DeliveryMethod, Reminder, ReminderDraft};
use crate::storage::ReminderStorage;

/// The API facade the presentation layer talks to. Combines storage and
/// dispatch and performs the one-shot "due now?" check at creation time.
///
/// There is no timer: a reminder whose due time arrives later is only ever
/// delivered through an explicit [`ReminderService::send_now`].
pub struct ReminderService {
    storage: Arc<dyn ReminderStorage>,
    dispatcher: DeliveryDispatcher,
    notifier: Arc<dyn Notifier>,
    // Serializes the load-modify-save cycles so a delete racing a create
    // cannot drop the other's write.
    write_lock: Mutex<()>,
}

impl ReminderService {
    pub fn new(
        storage: Arc<dyn ReminderStorage>,
        dispatcher: DeliveryDispatcher,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            storage,
            dispatcher,
            notifier,
            write_lock: Mutex::new(()),
        }
    }

    /// The full stored collection, in insertion order. Storage failures
    /// degrade to an empty list.
    pub async fn list(&self) -> Vec<Reminder> {
        self.load_or_empty().await
    }

    /// Validates the draft, assigns an id, persists, and dispatches
    /// immediately if the due instant is already in the past.
    pub async fn create(&self, draft: ReminderDraft) -> anyhow::Result<Reminder> {
        if let Err(reason) = validate(&draft) {
            self.notifier
                .notify(Notice::error("Error", reason.clone()))
                .await;
            anyhow::bail!("invalid reminder: {reason}");
        }

        let reminder = draft.into_reminder(Uuid::new_v4().to_string());

        {
            let _guard = self.write_lock.lock().await;
            let mut reminders = self.load_or_empty().await;
            reminders.push(reminder.clone());
            if let Err(e) = self.storage.save(&reminders).await {
                log::error!("failed to persist new reminder: {e:#}");
                self.notifier
                    .notify(Notice::error(
                        "Error",
                        "Failed to create your reminder. Please try again.",
                    ))
                    .await;
                return Err(e);
            }
        }

        if reminder.is_due(Local::now().naive_local()) {
            // Due-or-past reminders go out right away. A failed send is
            // reported by the dispatcher and the reminder stays stored.
            if self.dispatcher.deliver(&reminder).await {
                self.notifier
                    .notify(Notice::info(
                        "Reminder sent",
                        "Your reminder has been sent successfully.",
                    ))
                    .await;
            }
        } else {
            let destination = reminder.contact().unwrap_or_default().to_owned();
            self.notifier
                .notify(Notice::info(
                    "Reminder scheduled",
                    format!("Your reminder will be sent to {destination} at the scheduled time."),
                ))
                .await;
        }

        Ok(reminder)
    }

    /// Removes the entry with the given id. Succeeds whether or not the id
    /// existed.
    pub async fn delete(&self, id: &str) -> anyhow::Result<()> {
        {
            let _guard = self.write_lock.lock().await;
            let mut reminders = self.load_or_empty().await;
            reminders.retain(|r| r.id != id);
            if let Err(e) = self.storage.save(&reminders).await {
                log::error!("failed to persist deletion of {id}: {e:#}");
                self.notifier
                    .notify(Notice::error(
                        "Error",
                        "Failed to delete your reminder. Please try again.",
                    ))
                    .await;
                return Err(e);
            }
        }

        self.notifier
            .notify(Notice::info(
                "Reminder deleted",
                "The reminder has been successfully deleted and will not be sent.",
            ))
            .await;
        Ok(())
    }

    /// Dispatches the reminder with the given id right now. The reminder is
    /// neither removed nor marked sent, so this can be repeated freely.
    pub async fn send_now(&self, id: &str) -> bool {
        let reminders = self.load_or_empty().await;
        let Some(reminder) = reminders.iter().find(|r| r.id == id) else {
            self.notifier
                .notify(Notice::error("Error", "Reminder not found."))
                .await;
            return false;
        };

        if self.dispatcher.deliver(reminder).await {
            self.notifier
                .notify(Notice::info(
                    "Reminder sent",
                    "Your reminder has been sent successfully.",
                ))
                .await;
            true
        } else {
            self.notifier
                .notify(Notice::error(
                    "Error",
                    "Failed to send reminder. Please try again.",
                ))
                .await;
            false
        }
    }

    async fn load_or_empty(&self) -> Vec<Reminder> {
        match self.storage.load().await {
            Ok(reminders) => reminders,
            Err(e) => {
                log::error!("failed to load reminders: {e:#}");
                self.notifier
                    .notify(Notice::error(
                        "Error",
                        "Failed to load your reminders. Please try again.",
                    ))
                    .await;
                Vec::new()
            }
        }
    }
}

fn validate(draft: &ReminderDraft) -> Result<(), String> {
    if draft.date.trim().is_empty() {
        return Err("A date is required.".to_owned());
    }
    if draft.time.trim().is_empty() {
        return Err("A time is required.".to_owned());
    }
    if draft.message.trim().is_empty() {
        return Err("A message is required.".to_owned());
    }
    if draft.due_at().is_none() {
        return Err("The date and time could not be understood.".to_owned());
    }

    let missing_contact = draft.contact().is_none_or(|c| c.trim().is_empty());
    if missing_contact {
        return Err(match draft.method {
            DeliveryMethod::Sms => "A phone number is required for SMS reminders.".to_owned(),
            DeliveryMethod::Email => "An email address is required for email reminders.".to_owned(),
        });
    }

    Ok(())
}
