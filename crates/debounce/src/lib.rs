//! Debounced action coalescing for UI triggers
//!
//! This crate provides:
//! - [`Debounced`]: wraps an action so a burst of calls runs it once,
//!   a quiescence window after the last call, with the last call's arguments
//! - Optional outcome forwarding so the caller observes the action's result
//!
//! The coalescer is a timing policy only. It never retries, catches or logs
//! failures of the action it wraps.

use parking_lot::Mutex;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::trace;

/// Misuse detected when constructing a debounced action
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DebounceError {
    /// The quiescence window was negative
    #[error("Quiescence window must be non-negative, got {0}ms")]
    NegativeWindow(i64),
}

type BoxFuture<R> = Pin<Box<dyn Future<Output = R> + Send>>;
type Action<A, R> = Box<dyn Fn(A) -> BoxFuture<R> + Send + Sync>;

/// The timer currently armed, if any
struct Armed {
    generation: u64,
    /// When the call that armed it arrived
    armed_at: Instant,
    handle: JoinHandle<()>,
}

/// The single scheduled-but-not-fired invocation, if any
struct Pending {
    /// Bumped on every call
    generation: u64,
    armed: Option<Armed>,
}

struct Inner<A, R> {
    window: Duration,
    action: Action<A, R>,
    outcomes: Option<mpsc::UnboundedSender<R>>,
    pending: Mutex<Pending>,
}

/// An action wrapped with a quiescence window
///
/// Cloning yields another handle to the same pending slot. Calls must be
/// made from within a tokio runtime since timers are spawned as tasks.
pub struct Debounced<A, R = ()> {
    inner: Arc<Inner<A, R>>,
}

impl<A, R> Clone for Debounced<A, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, R> Debounced<A, R>
where
    A: Send + 'static,
    R: Send + 'static,
{
    /// Wrap `action` so it runs only after `window` passes without a new call
    pub fn wrap<F, Fut>(action: F, window: Duration) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        Self::build(action, window, None)
    }

    /// Like [`wrap`](Self::wrap), taking the window as signed milliseconds
    ///
    /// A negative window is rejected immediately and no timer is ever created.
    pub fn from_millis<F, Fut>(action: F, window_ms: i64) -> Result<Self, DebounceError>
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        if window_ms < 0 {
            return Err(DebounceError::NegativeWindow(window_ms));
        }
        Ok(Self::wrap(action, Duration::from_millis(window_ms as u64)))
    }

    /// Wrap `action` and forward every execution's output, unmodified,
    /// to the returned receiver
    ///
    /// This is the fault channel for fallible actions: an `Err` returned by
    /// the action arrives on the receiver exactly as produced.
    pub fn wrap_with_outcomes<F, Fut>(action: F, window: Duration) -> (Self, mpsc::UnboundedReceiver<R>)
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::build(action, window, Some(tx)), rx)
    }

    fn build<F, Fut>(action: F, window: Duration, outcomes: Option<mpsc::UnboundedSender<R>>) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        let action: Action<A, R> = Box::new(move |args| Box::pin(action(args)));
        Self {
            inner: Arc::new(Inner {
                window,
                action,
                outcomes,
                pending: Mutex::new(Pending {
                    generation: 0,
                    armed: None,
                }),
            }),
        }
    }

    /// Schedule the action with `args`, replacing any pending invocation
    ///
    /// An invocation whose window has fully elapsed keeps its own arguments
    /// and runs, even if its timer has not been polled yet; only one still
    /// inside its window (or armed in this same instant) is superseded.
    pub fn call(&self, args: A) {
        let mut pending = self.inner.pending.lock();
        let now = Instant::now();

        if let Some(armed) = pending.armed.take() {
            if self.inner.supersedes(&armed, now) {
                armed.handle.abort();
                trace!("Superseded pending invocation (generation {})", armed.generation);
            }
        }

        pending.generation = pending.generation.wrapping_add(1);
        let generation = pending.generation;
        let inner = Arc::clone(&self.inner);

        pending.armed = Some(Armed {
            generation,
            armed_at: now,
            handle: tokio::spawn(inner.fire(generation, now + self.inner.window, args)),
        });
    }

    /// Drop the pending invocation without running it
    ///
    /// An invocation whose window has elapsed is already due and is left
    /// to run.
    pub fn cancel(&self) {
        let mut pending = self.inner.pending.lock();
        if let Some(armed) = pending.armed.take() {
            if self.inner.supersedes(&armed, Instant::now()) {
                armed.handle.abort();
            }
        }
        pending.generation = pending.generation.wrapping_add(1);
    }

    /// Whether an invocation is scheduled and not yet fired
    pub fn is_pending(&self) -> bool {
        self.inner.pending.lock().armed.is_some()
    }

    pub fn window(&self) -> Duration {
        self.inner.window
    }
}

impl<A, R> Inner<A, R>
where
    A: Send + 'static,
    R: Send + 'static,
{
    /// A call at `now` replaces `armed` only while its window is still open
    fn supersedes(&self, armed: &Armed, now: Instant) -> bool {
        let gap = now.saturating_duration_since(armed.armed_at);
        gap < self.window || gap.is_zero()
    }

    async fn fire(self: Arc<Self>, generation: u64, deadline: Instant, args: A) {
        tokio::time::sleep_until(deadline).await;

        {
            let mut pending = self.pending.lock();
            if pending.armed.as_ref().is_some_and(|armed| armed.generation == generation) {
                pending.armed = None;
            }
        }

        let outcome = (self.action)(args).await;
        if let Some(outcomes) = &self.outcomes {
            // Receiver dropped means nobody observes outcomes any more
            let _ = outcomes.send(outcome);
        }
    }
}
