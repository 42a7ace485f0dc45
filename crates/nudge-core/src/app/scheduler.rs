//! Scheduler loop: fixed-cadence scans driving select -> dispatch -> guard.
//!
//! One long-lived timer initiates cycles; each cycle runs as its own task so
//! a slow batch never delays the next tick, and each candidate within a cycle
//! is dispatched as an independent unit. Overlap between cycles is safe: the
//! conditional guard in the store is the per-task mutual-exclusion point.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, error, info, warn};

use crate::app::dispatcher::Dispatcher;
use crate::app::selector::{Candidate, CandidateSelector};
use crate::config::{ConfigError, ReminderConfig};
use crate::domain::{CycleReport, DeliveryResult, ReminderWindow};
use crate::ports::{Clock, GuardUpdate, Mailer, StoreError, TaskStore};

pub struct Scheduler {
    store: Arc<dyn TaskStore>,
    selector: CandidateSelector,
    dispatcher: Arc<Dispatcher>,
    clock: Arc<dyn Clock>,
    config: ReminderConfig,
}

impl Scheduler {
    /// Fail-fast: a config that can skip tasks is rejected here, not
    /// discovered in production.
    pub fn new(
        store: Arc<dyn TaskStore>,
        mailer: Arc<dyn Mailer>,
        clock: Arc<dyn Clock>,
        config: ReminderConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            selector: CandidateSelector::new(Arc::clone(&store)),
            dispatcher: Arc::new(Dispatcher::new(mailer, config.dispatch_timeout())),
            store,
            clock,
            config,
        })
    }

    /// Run one scan cycle to completion and report what it did.
    ///
    /// A store failure during selection aborts the cycle (`Err`); delivery
    /// failures never do, they are per-task and land in the report.
    pub async fn run_cycle(&self) -> Result<CycleReport, StoreError> {
        let now = self.clock.now();
        let window =
            ReminderWindow::around(now, self.config.lead_time(), self.config.window_margin());
        debug!(start = %window.start, end = %window.end, "scanning for tasks due soon");

        let selection = self.selector.select(window).await?;

        let mut report = CycleReport {
            candidates: selection.candidates.len(),
            skipped: selection.skipped,
            ..CycleReport::default()
        };

        let mut dispatches = JoinSet::new();
        for candidate in selection.candidates {
            let dispatcher = Arc::clone(&self.dispatcher);
            let store = Arc::clone(&self.store);
            dispatches.spawn(async move { dispatch_and_guard(dispatcher, store, candidate).await });
        }

        while let Some(joined) = dispatches.join_next().await {
            match joined {
                Ok(true) => report.delivered += 1,
                Ok(false) => report.failed += 1,
                Err(err) => {
                    report.failed += 1;
                    error!(error = %err, "dispatch unit did not finish");
                }
            }
        }

        info!(
            candidates = report.candidates,
            delivered = report.delivered,
            failed = report.failed,
            skipped = report.skipped,
            "reminder cycle complete"
        );
        Ok(report)
    }

    /// Start the tick loop. Ticks are never skipped or coalesced; a cycle
    /// whose dispatches outlive the tick simply overlaps the next one.
    pub fn spawn(self: Arc<Self>) -> SchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let scheduler = Arc::clone(&self);

        let join = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(scheduler.config.scan_interval());
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let cycle = Arc::clone(&scheduler);
                        tokio::spawn(async move {
                            if let Err(err) = cycle.run_cycle().await {
                                error!(error = %err,
                                    "reminder cycle aborted; next tick will retry");
                            }
                        });
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            // In-flight dispatches drain best-effort after this point. Any
            // delivery that never confirmed left its guard unset, so the
            // task is still a candidate on the next start.
        });

        SchedulerHandle { shutdown_tx, join }
    }
}

/// One independent dispatch unit. Returns whether delivery was confirmed.
///
/// The guard write is sequenced strictly after the transport confirms; a
/// timed-out or failed attempt leaves the guard untouched.
async fn dispatch_and_guard(
    dispatcher: Arc<Dispatcher>,
    store: Arc<dyn TaskStore>,
    candidate: Candidate,
) -> bool {
    let task_id = candidate.task.id;
    match dispatcher.dispatch(&candidate).await {
        DeliveryResult::Delivered => {
            match store.mark_notified(task_id).await {
                Ok(GuardUpdate::Set) => {
                    debug!(task_id = %task_id, "reminder delivered and guarded");
                }
                Ok(GuardUpdate::AlreadySet) => {
                    warn!(task_id = %task_id,
                        "guard already set by a concurrent scan; one duplicate may have gone out");
                }
                Err(err) => {
                    error!(task_id = %task_id, error = %err,
                        "delivered but could not set the notified flag; task will be re-notified");
                }
            }
            true
        }
        DeliveryResult::Failed(reason) => {
            warn!(task_id = %task_id, %reason,
                "reminder delivery failed; task remains a candidate");
            false
        }
    }
}

/// Handle to a running scheduler.
/// - `request_shutdown` stops initiating new cycles.
/// - `shutdown_and_join` additionally waits for the tick loop to exit.
pub struct SchedulerHandle {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl SchedulerHandle {
    pub fn request_shutdown(&self) {
        // ignore send error: the loop may already be gone
        let _ = self.shutdown_tx.send(true);
    }

    pub async fn shutdown_and_join(self) {
        self.request_shutdown();
        let _ = self.join.await;
    }
}
