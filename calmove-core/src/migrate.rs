//! The copy-then-delete migration engine.
//!
//! Events are processed strictly in order, one at a time: copy to the
//! destination, then delete from the source, each with its own flat retry
//! budget. An event is only ever deleted once its copy is confirmed, so
//! retry exhaustion can leave a duplicate but never lose an event.

use std::future::Future;
use std::time::Duration;

use crate::error::CalMoveResult;
use crate::event::Event;

pub const DEFAULT_ATTEMPTS: u32 = 12;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Create/delete operations on one account's calendar.
#[allow(async_fn_in_trait)]
pub trait EventSink {
    /// Create a brand new event from a sanitized payload.
    async fn create_event(&self, payload: &Event) -> CalMoveResult<()>;

    /// Remove the event with the given provider id.
    async fn delete_event(&self, event_id: &str) -> CalMoveResult<()>;
}

/// Flat retry: a fixed number of attempts with a fixed delay between
/// them. No backoff growth, no jitter, and no distinction between error
/// causes.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self { attempts, delay }
    }

    /// Run `op` until it succeeds or the attempt budget is spent,
    /// sleeping between attempts but not after the last one.
    async fn run<T, F, Fut>(&self, what: &str, mut op: F) -> CalMoveResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = CalMoveResult<T>>,
    {
        let attempts = self.attempts.max(1);
        let mut last_err = None;

        for attempt in 1..=attempts {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    eprintln!("Error {what}: {e}");
                    last_err = Some(e);
                    if attempt < attempts {
                        tokio::time::sleep(self.delay).await;
                    }
                }
            }
        }

        Err(last_err.expect("at least one attempt was made"))
    }
}

/// Outcome of a migration run. The failure lists carry the original
/// source events and are the audit trail for manual follow-up; successes
/// are only counted.
#[derive(Debug, Default)]
pub struct MigrationReport {
    pub migrated: usize,
    pub copy_failed: Vec<Event>,
    pub delete_failed: Vec<Event>,
}

impl MigrationReport {
    pub fn is_clean(&self) -> bool {
        self.copy_failed.is_empty() && self.delete_failed.is_empty()
    }
}

/// Move `events` from `source` to `dest`, in order, one event fully
/// resolved before the next begins. `progress` is invoked with
/// (done, total) after each event, whatever its outcome.
pub async fn migrate<S, D>(
    events: &[Event],
    source: &S,
    dest: &D,
    policy: RetryPolicy,
    mut progress: impl FnMut(usize, usize),
) -> MigrationReport
where
    S: EventSink,
    D: EventSink,
{
    let mut report = MigrationReport::default();
    let total = events.len();

    for (i, event) in events.iter().enumerate() {
        let payload = event.creation_payload();

        match policy.run("copying event", || dest.create_event(&payload)).await {
            Ok(()) => {
                match policy
                    .run("deleting event", || source.delete_event(&event.id))
                    .await
                {
                    Ok(()) => report.migrated += 1,
                    Err(_) => report.delete_failed.push(event.clone()),
                }
            }
            Err(_) => {
                // Without a confirmed copy the source entry must stay put;
                // the event lands in both buckets so the skipped delete is
                // reconciled too.
                report.copy_failed.push(event.clone());
                report.delete_failed.push(event.clone());
            }
        }

        progress(i + 1, total);
    }

    report
}
