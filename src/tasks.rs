//! Simulated latency.
//!
//! Code verification, permission granting and health-data loading resolve after
//! a fixed delay. Screens ask for a [`TaskKind`], the app hands it to a
//! [`Scheduler`], and completions come back on the next tick.
//!
//! Two schedulers exist:
//! - [`TokioScheduler`] sleeps on a tokio runtime and reports over a channel.
//! - [`InstantScheduler`] resolves everything on the next poll, for tests and
//!   the headless walkthrough.

use crate::config::DelayConfig;
use crate::flow::Screen;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Work that completes after an artificial delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Bridge entry: check the typed code.
    VerifyCode,
    /// Permissions: pretend to ask the health platform.
    GrantPermissions,
    /// Fit data: first load of the dashboard.
    LoadHealthData,
    /// Fit data: manual refresh.
    RefreshHealthData,
    /// Connection: hide the "copied" indicator again.
    ResetCopyFeedback,
}

impl TaskKind {
    /// Screen whose state the completion belongs to.
    pub fn owner(&self) -> Screen {
        match self {
            TaskKind::VerifyCode => Screen::BridgeEntry,
            TaskKind::GrantPermissions => Screen::Permissions,
            TaskKind::LoadHealthData | TaskKind::RefreshHealthData => Screen::FitData,
            TaskKind::ResetCopyFeedback => Screen::Connection,
        }
    }

    /// Configured delay for this kind.
    pub fn delay(&self, delays: &DelayConfig) -> Duration {
        let ms = match self {
            TaskKind::VerifyCode => delays.verify_code_ms,
            TaskKind::GrantPermissions => delays.grant_permissions_ms,
            TaskKind::LoadHealthData => delays.load_health_data_ms,
            TaskKind::RefreshHealthData => delays.refresh_health_data_ms,
            TaskKind::ResetCopyFeedback => delays.copy_feedback_ms,
        };
        Duration::from_millis(ms)
    }
}

/// Identifier returned by [`Scheduler::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A task whose delay has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub id: TaskId,
    pub kind: TaskKind,
}

/// Fire-and-forget timers with cancellation.
pub trait Scheduler {
    /// Start a timer for `kind` that completes after `delay`.
    fn schedule(&mut self, kind: TaskKind, delay: Duration) -> TaskId;

    /// Cancel one timer. Returns false if it already completed or was unknown.
    fn cancel(&mut self, id: TaskId) -> bool;

    /// Cancel every outstanding timer.
    fn cancel_all(&mut self);

    /// Take every completion that is ready, oldest first.
    fn poll_completed(&mut self) -> Vec<Completion>;

    /// Number of timers not yet reported through `poll_completed`.
    fn pending(&self) -> usize;
}

/// Timers backed by `tokio::time::sleep` on a runtime handle.
pub struct TokioScheduler {
    handle: Handle,
    tx: UnboundedSender<Completion>,
    rx: UnboundedReceiver<Completion>,
    running: HashMap<TaskId, JoinHandle<()>>,
    next_id: u64,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            handle,
            tx,
            rx,
            running: HashMap::new(),
            next_id: 0,
        }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, kind: TaskKind, delay: Duration) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;

        let tx = self.tx.clone();
        let join = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver only disappears when the scheduler is dropped.
            let _ = tx.send(Completion { id, kind });
        });
        debug!("Scheduled {:?} {} in {:?}", kind, id, delay);
        self.running.insert(id, join);
        id
    }

    fn cancel(&mut self, id: TaskId) -> bool {
        match self.running.remove(&id) {
            Some(join) => {
                join.abort();
                debug!("Cancelled task {}", id);
                true
            }
            None => false,
        }
    }

    fn cancel_all(&mut self) {
        for (id, join) in self.running.drain() {
            join.abort();
            trace!("Cancelled task {}", id);
        }
    }

    fn poll_completed(&mut self) -> Vec<Completion> {
        let mut ready = Vec::new();
        while let Ok(completion) = self.rx.try_recv() {
            // A timer may fire between abort() and the removal above; drop it.
            if self.running.remove(&completion.id).is_some() {
                ready.push(completion);
            }
        }
        ready
    }

    fn pending(&self) -> usize {
        self.running.len()
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// Resolves every scheduled task on the next poll, ignoring its delay.
#[derive(Debug, Default)]
pub struct InstantScheduler {
    queue: VecDeque<Completion>,
    next_id: u64,
    history: Vec<(TaskKind, Duration)>,
}

impl InstantScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(kind, requested delay)` scheduled so far.
    pub fn history(&self) -> &[(TaskKind, Duration)] {
        &self.history
    }
}

impl Scheduler for InstantScheduler {
    fn schedule(&mut self, kind: TaskKind, delay: Duration) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.queue.push_back(Completion { id, kind });
        self.history.push((kind, delay));
        id
    }

    fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|c| c.id != id);
        self.queue.len() < before
    }

    fn cancel_all(&mut self) {
        self.queue.clear();
    }

    fn poll_completed(&mut self) -> Vec<Completion> {
        self.queue.drain(..).collect()
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}
