mod appsettings;
mod delivery;
mod notify;
mod reminder;
mod service;
mod storage;

use std::io::{BufRead, Write};
use std::sync::Arc;

use async_trait::async_trait;

use crate::delivery::{DeliveryDispatcher, EmailJsTransport, TwilioSmsTransport};
use crate::notify::{Notice, NoticeKind, Notifier};
use crate::reminder::{DeliveryMethod, ReminderDraft};
use crate::service::ReminderService;
use crate::storage::JsonFileReminderStorage;

/// Prints notices to the terminal, the CLI's stand-in for toasts.
struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Info => println!("{}: {}", notice.title, notice.detail),
            NoticeKind::Error => eprintln!("{}: {}", notice.title, notice.detail),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let settings = appsettings::get();
    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
    let dispatcher = DeliveryDispatcher::new(
        Arc::new(TwilioSmsTransport::new(&settings.twilio)),
        Arc::new(EmailJsTransport::new(&settings.email)),
        notifier.clone(),
    );
    let storage = Arc::new(JsonFileReminderStorage::new(settings.storage.path.clone()));
    let service = ReminderService::new(storage, dispatcher, notifier);

    println!("commands: list | add sms <phone> <country> <date> <time> <message>");
    println!("          add email <address> <date> <time> <message> | rm <id> | send <id> | quit");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let args: Vec<&str> = line.split_whitespace().collect();
        match args.as_slice() {
            [] => {}
            ["quit"] | ["exit"] => break,
            ["list"] => {
                for r in service.list().await {
                    let destination = r.contact().unwrap_or("-");
                    println!("{}  {} {}  {:?} {}  {}", r.id, r.date, r.time, r.method, destination, r.message);
                }
            }
            ["add", "sms", phone, country, date, time, message @ ..] if !message.is_empty() => {
                let draft = ReminderDraft {
                    date: (*date).to_owned(),
                    time: (*time).to_owned(),
                    message: message.join(" "),
                    method: DeliveryMethod::Sms,
                    phone_number: Some((*phone).to_owned()),
                    country_code: Some((*country).to_owned()),
                    email: None,
                };
                if let Ok(created) = service.create(draft).await {
                    println!("created {}", created.id);
                }
            }
            ["add", "email", address, date, time, message @ ..] if !message.is_empty() => {
                let draft = ReminderDraft {
                    date: (*date).to_owned(),
                    time: (*time).to_owned(),
                    message: message.join(" "),
                    method: DeliveryMethod::Email,
                    phone_number: None,
                    country_code: None,
                    email: Some((*address).to_owned()),
                };
                if let Ok(created) = service.create(draft).await {
                    println!("created {}", created.id);
                }
            }
            ["rm", id] => {
                let _ = service.delete(id).await;
            }
            ["send", id] => {
                service.send_now(id).await;
            }
            _ => println!("unrecognized command"),
        }
    }

    Ok(())
}
