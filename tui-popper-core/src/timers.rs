//! Timers for delayed show/hide and debounced input
//!
//! Each popper owns at most one pending show timer and one pending hide
//! timer. Scheduling a timer into an occupied slot cancels the previous one
//! first (clear-then-set).
//!
//! Two schedulers are provided:
//! - [`TimerManager`]: tokio tasks that send an action back to the host loop
//!   when they elapse. Also does keyed spawning and trailing debounce.
//! - [`ManualScheduler`]: a virtual clock the host advances itself. Handy
//!   for tick-driven loops and deterministic tests.
//!
//! # Example
//!
//! ```ignore
//! use tui_popper_core::timers::{TaskKey, TimerManager};
//! use std::time::Duration;
//!
//! let (action_tx, mut action_rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut timers = TimerManager::new(action_tx);
//!
//! // Only the last call within 300ms reaches the host loop
//! timers.debounce_action(TaskKey::new("search"), Duration::from_millis(300), Action::Search(query));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};

use crate::popper::PopperId;
use crate::Action;

/// Which of the two timer slots a timer occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerSlot {
    /// Delayed show (`show_after`)
    Show,
    /// Delayed or automatic hide (`close_delay`, `hide_after`)
    Hide,
}

impl TimerSlot {
    pub fn as_str(self) -> &'static str {
        match self {
            TimerSlot::Show => "show",
            TimerSlot::Hide => "hide",
        }
    }
}

/// Identifies one scheduled timer so a late delivery can be recognised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Delivered when a timer elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerFired {
    /// Popper that scheduled the timer
    pub popper: PopperId,
    pub slot: TimerSlot,
    pub id: TimerId,
}

/// The `setTimeout`/`clearTimeout` primitive a popper runs on.
pub trait Scheduler {
    /// Schedule `timer` after `delay`, replacing whatever occupies its slot
    fn schedule(&mut self, timer: TimerFired, delay: Duration);

    /// Cancel the timer in `slot`, if any
    fn cancel(&mut self, slot: TimerSlot);

    /// Cancel every pending timer
    fn cancel_all(&mut self);

    /// Whether a timer is waiting in `slot`
    fn is_pending(&self, slot: TimerSlot) -> bool;
}

/// Identifies a task for cancellation and replacement.
///
/// Tasks with the same key are mutually exclusive - spawning a new task
/// with a key that's already running will cancel the existing task.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TaskKey(String);

impl TaskKey {
    /// Create a new task key.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the key name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TaskKey {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TaskKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<TimerSlot> for TaskKey {
    fn from(slot: TimerSlot) -> Self {
        Self::new(format!("popper:{}", slot.as_str()))
    }
}

/// Manages tokio timer tasks with automatic cancellation.
///
/// The manager keeps a registry of running tasks by key. Spawning with a key
/// that already exists aborts the existing task first. Elapsed timers and
/// finished tasks send their action through `action_tx`.
///
/// # Type Parameters
///
/// - `A`: The action type tasks produce
pub struct TimerManager<A> {
    tasks: HashMap<TaskKey, AbortHandle>,
    action_tx: mpsc::UnboundedSender<A>,
}

impl<A> TimerManager<A>
where
    A: Action,
{
    /// Create a new timer manager.
    pub fn new(action_tx: mpsc::UnboundedSender<A>) -> Self {
        Self {
            tasks: HashMap::new(),
            action_tx,
        }
    }

    /// Spawn a task, cancelling any existing task with the same key.
    ///
    /// The future's action is sent when it completes. A cancelled task
    /// sends nothing.
    pub fn spawn<F>(&mut self, key: impl Into<TaskKey>, future: F) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        let key = key.into();
        self.cancel(&key);

        let tx = self.action_tx.clone();
        let handle: JoinHandle<()> = tokio::spawn(async move {
            let action = future.await;
            let _ = tx.send(action);
        });

        self.tasks.insert(key, handle.abort_handle());
        self
    }

    /// Send `action` after `delay`, cancelling any task with the same key.
    ///
    /// A zero delay sends synchronously.
    pub fn schedule_after(
        &mut self,
        key: impl Into<TaskKey>,
        delay: Duration,
        action: A,
    ) -> &mut Self {
        let key = key.into();
        self.cancel(&key);

        if delay.is_zero() {
            let _ = self.action_tx.send(action);
            return self;
        }

        let tx = self.action_tx.clone();
        let handle: JoinHandle<()> = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(action);
        });

        self.tasks.insert(key, handle.abort_handle());
        self
    }

    /// Spawn a task with a trailing debounce.
    ///
    /// If called again with the same key before `duration` expires, the
    /// previous task is cancelled and the timer restarts. A zero duration
    /// runs the future right away.
    pub fn debounce<F>(
        &mut self,
        key: impl Into<TaskKey>,
        duration: Duration,
        future: F,
    ) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        let key = key.into();
        self.cancel(&key);

        let tx = self.action_tx.clone();
        let handle: JoinHandle<()> = tokio::spawn(async move {
            if !duration.is_zero() {
                tokio::time::sleep(duration).await;
            }
            let action = future.await;
            let _ = tx.send(action);
        });

        self.tasks.insert(key, handle.abort_handle());
        self
    }

    /// Trailing debounce of a ready action; zero passes it through synchronously.
    pub fn debounce_action(
        &mut self,
        key: impl Into<TaskKey>,
        duration: Duration,
        action: A,
    ) -> &mut Self {
        self.schedule_after(key, duration, action)
    }

    /// Cancel a task by key. No-op when absent.
    pub fn cancel(&mut self, key: &TaskKey) {
        if let Some(handle) = self.tasks.remove(key) {
            handle.abort();
        }
    }

    /// Cancel all running tasks.
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }

    /// Check if a task with the given key is still running.
    pub fn is_running(&self, key: &TaskKey) -> bool {
        self.tasks
            .get(key)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Number of tracked tasks (finished ones are pruned on the next cancel).
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Get the keys of all tracked tasks.
    pub fn running_keys(&self) -> impl Iterator<Item = &TaskKey> {
        self.tasks.keys()
    }
}

impl<A> Scheduler for TimerManager<A>
where
    A: Action + From<TimerFired>,
{
    fn schedule(&mut self, timer: TimerFired, delay: Duration) {
        self.schedule_after(timer.slot, delay, A::from(timer));
    }

    fn cancel(&mut self, slot: TimerSlot) {
        TimerManager::cancel(self, &TaskKey::from(slot));
    }

    fn cancel_all(&mut self) {
        TimerManager::cancel_all(self);
    }

    fn is_pending(&self, slot: TimerSlot) -> bool {
        self.is_running(&TaskKey::from(slot))
    }
}

impl<A> fmt::Debug for TimerManager<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerManager")
            .field("tasks", &self.tasks.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<A> Drop for TimerManager<A> {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    deadline: Duration,
    seq: u64,
    timer: TimerFired,
}

/// Virtual-clock scheduler driven by the host.
///
/// Nothing fires on its own: the host calls [`advance`](Self::advance) (or
/// [`Popper::advance`](crate::Popper::advance)) and gets back the timers
/// that came due, in deadline order.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    now: Duration,
    seq: u64,
    pending: Vec<Pending>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|p| p.deadline).min()
    }

    /// Remove and return the earliest timer due at or before `until`,
    /// moving the clock to its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerFired> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.deadline <= until)
            .min_by_key(|(_, p)| (p.deadline, p.seq))
            .map(|(i, _)| i)?;
        let due = self.pending.remove(index);
        self.now = self.now.max(due.deadline);
        Some(due.timer)
    }

    /// Fire everything due up to `when` and move the clock there.
    pub fn advance_to(&mut self, when: Duration) -> Vec<TimerFired> {
        let mut fired = Vec::new();
        while let Some(timer) = self.pop_due(when) {
            fired.push(timer);
        }
        self.now = self.now.max(when);
        fired
    }

    /// Fire everything due within `by` from now.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerFired> {
        self.advance_to(self.now + by)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, timer: TimerFired, delay: Duration) {
        self.cancel(timer.slot);
        self.seq += 1;
        self.pending.push(Pending {
            deadline: self.now + delay,
            seq: self.seq,
            timer,
        });
    }

    fn cancel(&mut self, slot: TimerSlot) {
        self.pending.retain(|p| p.timer.slot != slot);
    }

    fn cancel_all(&mut self) {
        self.pending.clear();
    }

    fn is_pending(&self, slot: TimerSlot) -> bool {
        self.pending.iter().any(|p| p.timer.slot == slot)
    }
}
