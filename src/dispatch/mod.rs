/*
 * The background task dispatcher: a bounded worker pool that executes
 * `ApiCall` objects and reports back through two process-wide signals.
 * Before a call runs, `TaskSignal::Starting` is broadcast to every
 * subscriber; after it finishes, the completed `ApiResponse` (if the call
 * produced one) is pushed onto the shared delivery queue and
 * `TaskSignal::Ending` is broadcast. Signals carry no payload: consumers
 * drain the queue themselves, one response per observed `Ending`, and must
 * inspect the response kind before acting on it, because the queue is
 * shared by every screen in the process.
 *
 * Pool shape mirrors the upstream service contract: one core worker that
 * never retires, growth up to ten concurrent workers, an unbounded backlog,
 * and surplus workers recycled after an hour idle. There is no cancellation
 * and no dispatcher-enforced timeout; `DEFAULT_CALL_TIMEOUT` is advisory
 * for call implementations.
 */
pub mod progress;

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};
use crossbeam::queue::SegQueue;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread;
use std::time::Duration;

use crate::api::{ApiCall, ApiResponse};

pub use progress::{IndicatorState, ProgressController, SPINNER_SHOW_DELAY};

pub const CORE_WORKERS: usize = 1;
pub const MAX_WORKERS: usize = 10;
pub const WORKER_KEEP_ALIVE: Duration = Duration::from_secs(3600);

/// Process-wide task lifecycle signals. Name-only by design; the payload
/// travels through the response queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSignal {
    Starting,
    Ending,
}

/// The submission seam between flows and the pool. Flows depend on this
/// trait so tests can record submissions without running any threads.
pub trait TaskSubmitter: Send + Sync {
    fn submit(&self, call: ApiCall);
}

#[derive(Debug, Default)]
struct PoolCounts {
    workers: usize,
    idle: usize,
    active: usize,
}

struct DispatcherInner {
    jobs_tx: Sender<ApiCall>,
    jobs_rx: Receiver<ApiCall>,
    responses: SegQueue<ApiResponse>,
    subscribers: Mutex<Vec<Sender<TaskSignal>>>,
    counts: Mutex<PoolCounts>,
}

impl DispatcherInner {
    fn broadcast(&self, signal: TaskSignal) {
        let mut subscribers = self.subscribers.lock().unwrap();
        subscribers.retain(|tx| tx.send(signal).is_ok());
    }
}

#[derive(Clone)]
pub struct TaskDispatcher {
    inner: Arc<DispatcherInner>,
}

impl TaskDispatcher {
    pub fn new() -> Self {
        let (jobs_tx, jobs_rx) = channel::unbounded();
        TaskDispatcher {
            inner: Arc::new(DispatcherInner {
                jobs_tx,
                jobs_rx,
                responses: SegQueue::new(),
                subscribers: Mutex::new(Vec::new()),
                counts: Mutex::new(PoolCounts::default()),
            }),
        }
    }

    /*
     * Returns the one dispatcher shared by the whole process. First call
     * wins; every later call observes the same pool, so all screens share
     * one backlog and one response queue.
     */
    pub fn global() -> &'static TaskDispatcher {
        static DISPATCHER: OnceLock<TaskDispatcher> = OnceLock::new();
        DISPATCHER.get_or_init(TaskDispatcher::new)
    }

    /// Registers a new signal subscriber. Every subscriber sees every
    /// signal, regardless of which screen submitted the work.
    pub fn subscribe(&self) -> Receiver<TaskSignal> {
        let (tx, rx) = channel::unbounded();
        self.inner.subscribers.lock().unwrap().push(tx);
        rx
    }

    /// Removes and returns one completed response, if any. Called by the
    /// UI thread after observing an `Ending` signal.
    pub fn try_take_response(&self) -> Option<ApiResponse> {
        self.inner.responses.pop()
    }

    /// True while any call is executing or queued. Used by restored screens
    /// to decide whether to re-show the wait indicator.
    pub fn is_busy(&self) -> bool {
        let active = self.inner.counts.lock().unwrap().active;
        active > 0 || !self.inner.jobs_rx.is_empty()
    }

    fn submit_call(&self, call: ApiCall) {
        log::debug!("TaskDispatcher: Submitting {:?}.", call.request());
        if self.inner.jobs_tx.send(call).is_err() {
            // Cannot happen while `inner` holds the receiver, but a lost
            // job must not pass silently.
            log::error!("TaskDispatcher: Job channel closed; call dropped.");
            return;
        }

        let mut counts = self.inner.counts.lock().unwrap();
        if counts.idle == 0 && counts.workers < MAX_WORKERS {
            counts.workers += 1;
            counts.idle += 1;
            let worker_no = counts.workers;
            let inner = Arc::clone(&self.inner);
            let spawned = thread::Builder::new()
                .name(format!("cloudpick-worker-{worker_no}"))
                .spawn(move || worker_loop(inner));
            if let Err(e) = spawned {
                log::error!("TaskDispatcher: Failed to spawn worker: {e}");
                counts.workers -= 1;
                counts.idle -= 1;
            }
        }
    }
}

impl Default for TaskDispatcher {
    fn default() -> Self {
        TaskDispatcher::new()
    }
}

impl TaskSubmitter for TaskDispatcher {
    fn submit(&self, call: ApiCall) {
        self.submit_call(call);
    }
}

fn worker_loop(inner: Arc<DispatcherInner>) {
    loop {
        match inner.jobs_rx.recv_timeout(WORKER_KEEP_ALIVE) {
            Ok(call) => {
                {
                    let mut counts = inner.counts.lock().unwrap();
                    counts.idle -= 1;
                    counts.active += 1;
                }
                inner.broadcast(TaskSignal::Starting);

                let request = call.request().clone();
                match catch_unwind(AssertUnwindSafe(|| call.run())) {
                    Ok(response) => inner.responses.push(response),
                    Err(_) => {
                        log::error!(
                            "TaskDispatcher: Call {request:?} panicked; no response delivered."
                        );
                    }
                }

                {
                    let mut counts = inner.counts.lock().unwrap();
                    counts.active -= 1;
                    counts.idle += 1;
                }
                inner.broadcast(TaskSignal::Ending);
            }
            Err(RecvTimeoutError::Timeout) => {
                let mut counts = inner.counts.lock().unwrap();
                if counts.workers > CORE_WORKERS {
                    counts.workers -= 1;
                    counts.idle -= 1;
                    log::trace!("TaskDispatcher: Idle surplus worker retiring.");
                    return;
                }
                // The core worker waits out further keep-alive windows.
            }
            Err(RecvTimeoutError::Disconnected) => {
                let mut counts = inner.counts.lock().unwrap();
                counts.workers -= 1;
                counts.idle -= 1;
                return;
            }
        }
    }
}
