//! Trailing-edge call coalescing with cancellation.
//!
//! [`Debounce`] is the synchronous state machine: it is told when calls come
//! in and when its deadline passes, and answers with the arguments to invoke
//! the action with, if any. [`coalesce`] drives one on a tokio task so that
//! callers only hold cheap [`Trigger`] and [`Cancel`] handles.
//!
//! ```rust
//! use std::time::Duration;
//! use switchmode::coalesce;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let (save_bookmark, cancel) = coalesce(
//!     |offset: usize| println!("caret at {offset}"),
//!     Duration::from_millis(500),
//!     false,
//! );
//!
//! save_bookmark.call(3).unwrap();
//! save_bookmark.call(4).unwrap();
//! cancel.cancel().unwrap();
//! # }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

use crate::{Result, SwitchmodeError};

/// Where a [`Debounce`] stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    /// No check scheduled
    Idle,
    /// A check is scheduled for `deadline`
    Pending { deadline: Instant },
}

/// Debounce state machine.
///
/// Every cancellation bumps a generation counter, which lets a driver tell
/// whether a check it already scheduled still belongs to the current burst.
#[derive(Debug)]
pub struct Debounce<A> {
    wait: Duration,
    fire_immediately: bool,
    state: DebounceState,
    args: Option<A>,
    last_trigger: Option<Instant>,
    generation: u64,
}

impl<A> Debounce<A> {
    pub fn new(wait: Duration, fire_immediately: bool) -> Self {
        Self {
            wait,
            fire_immediately,
            state: DebounceState::Idle,
            args: None,
            last_trigger: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> DebounceState {
        self.state
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            DebounceState::Idle => None,
            DebounceState::Pending { deadline } => Some(deadline),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Record a call made at `now`.
    ///
    /// Returns the arguments to invoke the action with right away. That only
    /// happens with `fire_immediately`, for the first call of a burst.
    pub fn trigger(&mut self, args: A, now: Instant) -> Option<A> {
        self.last_trigger = Some(now);

        let starts_burst = self.state == DebounceState::Idle;
        if starts_burst {
            self.state = DebounceState::Pending {
                deadline: now + self.wait,
            };
            tracing::debug!(wait = ?self.wait, "coalescer armed");
        }

        if self.fire_immediately {
            // trailing calls of an immediate burst are swallowed
            return starts_burst.then_some(args);
        }

        self.args = Some(args);
        None
    }

    /// The scheduled check has come due at `now`.
    ///
    /// If a call came in less than `wait` ago the check is pushed back to
    /// `wait` after that call. Otherwise the machine goes idle and, in
    /// trailing mode, hands out the most recent arguments.
    pub fn expire(&mut self, now: Instant) -> Option<A> {
        if self.state == DebounceState::Idle {
            return None;
        }

        if let Some(last) = self.last_trigger {
            if now.saturating_duration_since(last) < self.wait {
                let deadline = last + self.wait;
                self.state = DebounceState::Pending { deadline };
                tracing::debug!("coalescer rescheduled");
                return None;
            }
        }

        self.state = DebounceState::Idle;
        let args = self.args.take();
        if args.is_some() {
            tracing::debug!("coalescer fired");
        }
        args
    }

    /// Drop the scheduled check and the recorded arguments.
    pub fn cancel(&mut self) {
        self.discard();
        self.generation += 1;
        tracing::debug!(generation = self.generation, "coalescer cancelled");
    }

    /// Go idle without counting a cancellation
    fn discard(&mut self) {
        self.state = DebounceState::Idle;
        self.args = None;
    }
}

enum Command<A> {
    Trigger(A),
    Cancel,
}

/// Handle recording calls to a coalesced action
pub struct Trigger<A> {
    tx: mpsc::UnboundedSender<Command<A>>,
}

impl<A> Clone for Trigger<A> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<A> Trigger<A> {
    /// Record a call. Never blocks; the action runs on the driver task.
    pub fn call(&self, args: A) -> Result<()> {
        self.tx
            .send(Command::Trigger(args))
            .map_err(|_| SwitchmodeError::CoalescerClosed)
    }
}

/// Handle cancelling a coalesced action
pub struct Cancel<A> {
    tx: mpsc::UnboundedSender<Command<A>>,
    generation: Arc<AtomicU64>,
}

impl<A> Clone for Cancel<A> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            generation: Arc::clone(&self.generation),
        }
    }
}

impl<A> Cancel<A> {
    /// Cancel the pending call, if any.
    ///
    /// Once this returns the pending call will not run, even if its check
    /// is already due on the driver. Cancelling with nothing pending is a
    /// no-op.
    pub fn cancel(&self) -> Result<()> {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.tx
            .send(Command::Cancel)
            .map_err(|_| SwitchmodeError::CoalescerClosed)
    }
}

/// Owns the state machine and the action on the driver task
struct Driver<A, F> {
    machine: Debounce<A>,
    action: F,
    generation: Arc<AtomicU64>,
}

impl<A, F: FnMut(A)> Driver<A, F> {
    fn handle(&mut self, command: Command<A>, now: Instant) {
        match command {
            Command::Trigger(args) => {
                if let Some(args) = self.machine.trigger(args, now) {
                    (self.action)(args);
                }
            }
            Command::Cancel => self.machine.cancel(),
        }
    }

    fn on_deadline(&mut self, now: Instant) {
        // a cancel() whose command has not arrived yet
        if self.machine.generation() != self.generation.load(Ordering::Acquire) {
            self.machine.discard();
            return;
        }
        if let Some(args) = self.machine.expire(now) {
            (self.action)(args);
        }
    }

    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<Command<A>>) {
        loop {
            let deadline = self.machine.deadline();
            tokio::select! {
                biased;

                command = rx.recv() => match command {
                    Some(command) => self.handle(command, Instant::now()),
                    None => break,
                },

                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.on_deadline(Instant::now());
                }
            }
        }
        tracing::debug!("coalescer driver stopped");
    }
}

/// Coalesce calls to `action`.
///
/// The action runs at most once per idle period of length `wait`, with the
/// arguments of the most recent call. With `fire_immediately` the first call
/// of a burst runs right away and the rest of the burst is swallowed.
///
/// Must be called within a tokio runtime; the driver task stops once every
/// handle is dropped, discarding any pending call.
pub fn coalesce<A, F>(action: F, wait: Duration, fire_immediately: bool) -> (Trigger<A>, Cancel<A>)
where
    A: Send + 'static,
    F: FnMut(A) + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let generation = Arc::new(AtomicU64::new(0));

    let driver = Driver {
        machine: Debounce::new(wait, fire_immediately),
        action,
        generation: Arc::clone(&generation),
    };
    tokio::spawn(driver.run(rx));

    (Trigger { tx: tx.clone() }, Cancel { tx, generation })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::time::sleep;

    const WAIT: Duration = Duration::from_millis(500);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_trailing_burst() {
        let t0 = Instant::now();
        let mut debounce = Debounce::new(WAIT, false);

        assert_eq!(debounce.trigger(1, t0), None);
        assert_eq!(debounce.state(), DebounceState::Pending { deadline: t0 + WAIT });
        assert_eq!(debounce.trigger(2, t0 + ms(50)), None);
        assert_eq!(debounce.trigger(3, t0 + ms(100)), None);

        // first check comes too early and is pushed back
        assert_eq!(debounce.expire(t0 + WAIT), None);
        assert_eq!(debounce.deadline(), Some(t0 + ms(600)));

        assert_eq!(debounce.expire(t0 + ms(600)), Some(3));
        assert_eq!(debounce.state(), DebounceState::Idle);
        assert_eq!(debounce.expire(t0 + ms(700)), None);
    }

    #[test]
    fn test_immediate_burst() {
        let t0 = Instant::now();
        let mut debounce = Debounce::new(WAIT, true);

        assert_eq!(debounce.trigger(1, t0), Some(1));
        assert_eq!(debounce.trigger(2, t0 + ms(10)), None);
        assert_eq!(debounce.expire(t0 + ms(510)), None);
        assert_eq!(debounce.state(), DebounceState::Idle);

        // next burst fires immediately again
        assert_eq!(debounce.trigger(3, t0 + ms(2000)), Some(3));
    }

    #[test]
    fn test_cancel() {
        let t0 = Instant::now();
        let mut debounce = Debounce::new(WAIT, false);

        debounce.trigger("a", t0);
        debounce.cancel();
        assert_eq!(debounce.state(), DebounceState::Idle);
        assert_eq!(debounce.generation(), 1);
        assert_eq!(debounce.expire(t0 + WAIT), None);

        // cancelling an idle machine changes nothing but the generation
        debounce.cancel();
        assert_eq!(debounce.state(), DebounceState::Idle);
        assert_eq!(debounce.generation(), 2);

        debounce.trigger("b", t0 + ms(1000));
        assert_eq!(debounce.expire(t0 + ms(1500)), Some("b"));
    }

    #[test]
    fn test_queued_check_after_cancel_does_not_fire() {
        let t0 = Instant::now();
        let generation = Arc::new(AtomicU64::new(0));
        let mut fired = Vec::new();
        let mut driver = Driver {
            machine: Debounce::new(WAIT, false),
            action: |v: u32| fired.push(v),
            generation: Arc::clone(&generation),
        };

        driver.handle(Command::Trigger(1), t0);
        // cancel() ran on another handle, its command is still in flight
        generation.fetch_add(1, Ordering::AcqRel);
        driver.on_deadline(t0 + WAIT);
        assert_eq!(driver.machine.state(), DebounceState::Idle);

        driver.handle(Command::Cancel, t0 + WAIT);
        driver.handle(Command::Trigger(2), t0 + ms(600));
        driver.on_deadline(t0 + ms(1100));
        drop(driver);

        assert_eq!(fired, vec![2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_coalesce_fires_once_after_last_call() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (trigger, _cancel) = coalesce(
            move |v: u32| {
                let _ = tx.send((v, Instant::now()));
            },
            WAIT,
            false,
        );

        let start = Instant::now();
        trigger.call(1).unwrap();
        sleep(ms(50)).await;
        trigger.call(2).unwrap();
        sleep(ms(50)).await;
        trigger.call(3).unwrap();

        let (value, at) = rx.recv().await.unwrap();
        assert_eq!(value, 3);
        let elapsed = at - start;
        assert!(elapsed >= ms(600) && elapsed < ms(650), "fired after {elapsed:?}");

        sleep(ms(2000)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_coalesce_long_burst() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (trigger, _cancel) = coalesce(
            move |v: u32| {
                let _ = tx.send(v);
            },
            WAIT,
            false,
        );

        for i in 0..5 {
            trigger.call(i).unwrap();
            sleep(ms(300)).await;
        }

        assert_eq!(rx.recv().await, Some(4));
        sleep(ms(2000)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_coalesce_cancel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (trigger, cancel) = coalesce(
            move |v: u32| {
                let _ = tx.send(v);
            },
            WAIT,
            false,
        );

        trigger.call(1).unwrap();
        sleep(ms(100)).await;
        cancel.cancel().unwrap();
        sleep(ms(2000)).await;
        assert!(rx.try_recv().is_err());

        // still usable after a cancel
        trigger.call(2).unwrap();
        assert_eq!(rx.recv().await, Some(2));

        // cancel after firing is a no-op
        cancel.cancel().unwrap();
        sleep(ms(2000)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_coalesce_fire_immediately() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (trigger, _cancel) = coalesce(
            move |v: u32| {
                let _ = tx.send(v);
            },
            WAIT,
            true,
        );

        trigger.call(1).unwrap();
        assert_eq!(rx.recv().await, Some(1));
        trigger.call(2).unwrap();
        trigger.call(3).unwrap();
        sleep(ms(2000)).await;
        assert!(rx.try_recv().is_err());

        trigger.call(4).unwrap();
        assert_eq!(rx.recv().await, Some(4));
    }

    #[test]
    fn test_closed_driver() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let (trigger, cancel) = runtime.block_on(async { coalesce(|_: u32| {}, WAIT, false) });
        drop(runtime);

        assert!(matches!(trigger.call(1), Err(SwitchmodeError::CoalescerClosed)));
        assert!(matches!(cancel.cancel(), Err(SwitchmodeError::CoalescerClosed)));
    }
}
