//! Demo binary for the nudge reminder scheduler.
//!
//! Wires the in-memory store and a logging mail transport, seeds a handful
//! of tasks around the reminder window, and runs the scheduler until Ctrl-C.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use nudge_core::ReminderConfig;
use nudge_core::app::Scheduler;
use nudge_core::domain::TaskRecord;
use nudge_core::impls::InMemoryTaskStore;
use nudge_core::ports::{
    Address, Clock, IdGenerator, MailError, Mailer, ReminderMail, SystemClock, UlidGenerator,
};

/// Nudge: due-task reminder scheduler (in-memory demo).
#[derive(Parser)]
#[command(name = "nudge", version, about)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Transport that "delivers" by logging. The real deployment plugs an SMTP
/// client in behind the same port.
struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: &ReminderMail) -> Result<(), MailError> {
        info!(to = %mail.to, subject = %mail.subject, body = %mail.body, "reminder sent");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => toml::from_str(&std::fs::read_to_string(path)?)?,
        None => ReminderConfig::default(),
    };

    let clock = Arc::new(SystemClock);
    let store = Arc::new(InMemoryTaskStore::with_clock(clock.clone()));
    seed_demo_tasks(&store, &config, clock.as_ref()).await;

    let scheduler = Arc::new(Scheduler::new(
        store,
        Arc::new(LogMailer),
        clock,
        config,
    )?);
    let handle = scheduler.spawn();
    info!("scheduler running; press Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    handle.shutdown_and_join().await;
    Ok(())
}

/// A few tasks spread around the window: one that fires on the first scan,
/// one that fires a couple of scans later, one far out, one already done.
async fn seed_demo_tasks(store: &InMemoryTaskStore, config: &ReminderConfig, clock: &dyn Clock) {
    let now = clock.now();
    let lead = config.lead_time();
    let ids = UlidGenerator::new(SystemClock);

    let owner = ids.user_id();
    store
        .upsert_address(owner, Address::new("demo@example.com"))
        .await;

    let due_now = TaskRecord::new(ids.task_id(), owner, "submit expense report", Some(now + lead), now);
    let due_soon = TaskRecord::new(
        ids.task_id(),
        owner,
        "review pull request",
        Some(now + lead + Duration::minutes(3)),
        now,
    );
    let due_later = TaskRecord::new(
        ids.task_id(),
        owner,
        "renew domain",
        Some(now + lead + Duration::hours(4)),
        now,
    );
    let mut done = TaskRecord::new(ids.task_id(), owner, "book flights", Some(now + lead), now);
    done.set_completed(true, now);

    for task in [due_now, due_soon, due_later, done] {
        info!(task_id = %task.id, title = %task.title, due_at = ?task.due_at, "seeded task");
        store.insert(task).await;
    }
}
