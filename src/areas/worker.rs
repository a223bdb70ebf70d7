//! Background diff worker
//!
//! Requests go out over a channel tagged with a `Ticket`; the reply comes back
//! through a oneshot parked in the pending map under that ticket. The caller
//! owns the clock: when its budget runs out the ticket is withdrawn, the job
//! is told to stop, and a late reply is dropped.

use crate::areas::engine::{DiffEngine, MyersEngine, panic_message, try_compute};
use crate::artifacts::core::error::DiffError;
use crate::artifacts::diff::diff_algorithm::Cancellation;
use crate::artifacts::diff::diff_result::DiffResult;
use crate::artifacts::diff::normalizer::DiffOptions;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc, oneshot};
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(Uuid);

impl Ticket {
    fn issue() -> Self {
        Ticket(Uuid::new_v4())
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

type Reply = Result<DiffResult, DiffError>;
type Pending = Arc<Mutex<HashMap<Ticket, oneshot::Sender<Reply>>>>;

struct Job {
    ticket: Ticket,
    original: Vec<String>,
    changed: Vec<String>,
    options: DiffOptions,
    cancel: Cancellation,
}

pub struct DiffWorker {
    jobs: mpsc::UnboundedSender<Job>,
    pending: Pending,
    budget: Duration,
}

impl DiffWorker {
    /// Starts the worker loop with the exact engine. Needs a running tokio
    /// runtime.
    pub fn spawn(budget: Duration) -> Self {
        Self::spawn_with(Arc::new(MyersEngine), budget)
    }

    pub fn spawn_with(engine: Arc<dyn DiffEngine + Send + Sync>, budget: Duration) -> Self {
        let (jobs, receiver) = mpsc::unbounded_channel();
        let pending: Pending = Arc::new(Mutex::new(HashMap::new()));

        tokio::spawn(serve(engine, receiver, pending.clone()));

        Self {
            jobs,
            pending,
            budget,
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub async fn run(
        &self,
        original: Vec<String>,
        changed: Vec<String>,
        options: DiffOptions,
    ) -> Result<DiffResult, DiffError> {
        let ticket = Ticket::issue();
        let cancel = Cancellation::default();
        let (reply_tx, reply_rx) = oneshot::channel();
        self.pending.lock().await.insert(ticket, reply_tx);

        let job = Job {
            ticket,
            original,
            changed,
            options,
            cancel: cancel.clone(),
        };
        if self.jobs.send(job).is_err() {
            self.pending.lock().await.remove(&ticket);
            return Err(DiffError::WorkerUnavailable);
        }
        debug!(%ticket, "diff request queued");

        match tokio::time::timeout(self.budget, reply_rx).await {
            Ok(Ok(reply)) => reply,
            Ok(Err(_)) => Err(DiffError::WorkerUnavailable),
            Err(_) => {
                cancel.cancel();
                self.pending.lock().await.remove(&ticket);
                warn!(%ticket, budget = ?self.budget, "diff request timed out");
                Err(DiffError::Timeout(self.budget))
            }
        }
    }
}

async fn serve(
    engine: Arc<dyn DiffEngine + Send + Sync>,
    mut jobs: mpsc::UnboundedReceiver<Job>,
    pending: Pending,
) {
    while let Some(job) = jobs.recv().await {
        let engine = engine.clone();
        let pending = pending.clone();

        // each request is independent, so none waits on another
        tokio::spawn(async move {
            let ticket = job.ticket;
            let reply = tokio::task::spawn_blocking(move || {
                try_compute(
                    engine.as_ref(),
                    &job.original,
                    &job.changed,
                    &job.options,
                    &job.cancel,
                )
            })
            .await
            .unwrap_or_else(|join_error| {
                let message = if join_error.is_panic() {
                    panic_message(join_error.into_panic().as_ref())
                } else {
                    join_error.to_string()
                };
                Err(DiffError::Computation(message))
            });

            match pending.lock().await.remove(&ticket) {
                Some(reply_tx) => {
                    if reply_tx.send(reply).is_err() {
                        debug!(%ticket, "requester went away before the reply");
                    }
                }
                None => debug!(%ticket, "dropping reply for a withdrawn request"),
            }
        });
    }

    debug!("diff worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::diff::diff_result::{EntryType, Stats};
    use futures::future::join_all;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    struct SlowEngine(Duration);

    impl DiffEngine for SlowEngine {
        fn name(&self) -> &'static str {
            "slow"
        }

        fn compute(
            &self,
            original: &[String],
            changed: &[String],
            options: &DiffOptions,
            cancel: &Cancellation,
        ) -> Reply {
            std::thread::sleep(self.0);
            MyersEngine.compute(original, changed, options, cancel)
        }
    }

    struct FailingEngine;

    impl DiffEngine for FailingEngine {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn compute(&self, _: &[String], _: &[String], _: &DiffOptions, _: &Cancellation) -> Reply {
            Err(DiffError::Computation("no luck".to_string()))
        }
    }

    /// Spins until told to stop, then records that it did.
    struct StoppableEngine {
        stopped: Arc<AtomicBool>,
    }

    impl DiffEngine for StoppableEngine {
        fn name(&self) -> &'static str {
            "stoppable"
        }

        fn compute(&self, _: &[String], _: &[String], _: &DiffOptions, cancel: &Cancellation) -> Reply {
            for _ in 0..1000 {
                if cancel.is_cancelled() {
                    self.stopped.store(true, Ordering::SeqCst);
                    return Err(DiffError::Cancelled);
                }
                std::thread::sleep(Duration::from_millis(5));
            }
            Err(DiffError::Computation("never cancelled".to_string()))
        }
    }

    #[tokio::test]
    async fn returns_the_exact_result() {
        let worker = DiffWorker::spawn(Duration::from_secs(5));

        let result = worker
            .run(lines(&["a", "b"]), lines(&["a", "c"]), DiffOptions::default())
            .await
            .unwrap();

        assert_eq!(result.changed[1].kind, EntryType::Modified);
        assert_eq!(
            result.stats,
            Stats {
                modified: 1,
                unchanged: 1,
                ..Stats::default()
            }
        );
    }

    #[tokio::test]
    async fn concurrent_tickets_get_their_own_replies() {
        let worker = DiffWorker::spawn(Duration::from_secs(5));

        let requests = (0..8).map(|i| {
            let original = lines(&["same"]);
            let changed = (0..=i).map(|n| format!("line {n}")).collect::<Vec<_>>();
            worker.run(original, changed, DiffOptions::default())
        });
        let results = join_all(requests).await;

        for (i, result) in results.into_iter().enumerate() {
            let result = result.unwrap();
            assert_eq!(result.changed.last().unwrap().content, format!("line {i}"));
        }
        assert!(worker.pending.lock().await.is_empty());
    }

    #[tokio::test]
    async fn slow_requests_time_out_and_are_withdrawn() {
        let worker = DiffWorker::spawn_with(
            Arc::new(SlowEngine(Duration::from_millis(300))),
            Duration::from_millis(20),
        );

        let result = worker
            .run(lines(&["a"]), lines(&["b"]), DiffOptions::default())
            .await;

        assert!(matches!(result, Err(DiffError::Timeout(_))));
        assert!(worker.pending.lock().await.is_empty());
    }

    #[tokio::test]
    async fn engine_errors_are_handed_back() {
        let worker = DiffWorker::spawn_with(Arc::new(FailingEngine), Duration::from_secs(1));

        let result = worker.run(vec![], vec![], DiffOptions::default()).await;

        assert!(matches!(result, Err(DiffError::Computation(message)) if message == "no luck"));
    }

    #[tokio::test]
    async fn timed_out_jobs_are_told_to_stop() {
        let stopped = Arc::new(AtomicBool::new(false));
        let worker = DiffWorker::spawn_with(
            Arc::new(StoppableEngine {
                stopped: stopped.clone(),
            }),
            Duration::from_millis(20),
        );

        let result = worker
            .run(lines(&["a"]), lines(&["b"]), DiffOptions::default())
            .await;
        assert!(matches!(result, Err(DiffError::Timeout(_))));

        for _ in 0..200 {
            if stopped.load(Ordering::SeqCst) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(stopped.load(Ordering::SeqCst));
    }
}
