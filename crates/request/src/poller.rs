//! Interval polling with stale-completion suppression
//!
//! A [`Poller`] is one consumer's view of a request target. Each
//! attachment owns:
//! - a staleness token, cancelled exactly once on detach or retarget
//! - an optional repeating timer, whose token is a child of the staleness
//!   token so that detaching always stops it
//!
//! Completions whose attachment went stale still notify `on_success` but
//! never touch [`PollingState`]. Within one attachment, completions carry a
//! send sequence number and only a completion newer than the last committed
//! one may commit.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::config::{PollingConfig, SuccessCallback, normalize_interval};
use crate::descriptor::RequestDescriptor;
use crate::result::RequestResult;
use crate::service::RequestService;
use crate::state::PollingState;
use crate::transport::Transport;

/// Stateful polling controller over a [`RequestService`]
///
/// Created by [`RequestService::use_request`]. Dropping the poller detaches
/// it.
pub struct Poller<T: ?Sized> {
    shared: Arc<Shared<T>>,
    attachment: Mutex<Option<Attachment>>,
}

struct Shared<T: ?Sized> {
    service: RequestService<T>,
    target: RwLock<Target>,
    state: watch::Sender<PollingState>,
    /// Last sequence number handed to a live send
    issued: AtomicU64,
    /// Sequence number of the last committed completion
    committed: AtomicU64,
}

#[derive(Clone)]
struct Target {
    descriptor: RequestDescriptor,
    on_success: Option<SuccessCallback>,
}

impl From<&PollingConfig> for Target {
    fn from(config: &PollingConfig) -> Self {
        Self {
            descriptor: config.descriptor.clone(),
            on_success: config.on_success.clone(),
        }
    }
}

struct Attachment {
    stale: CancellationToken,
    timer: Option<Timer>,
}

struct Timer {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl Timer {
    fn stop(self) {
        self.cancel.cancel();
        self.handle.abort();
    }
}

impl<T: Transport + ?Sized + 'static> Shared<T> {
    async fn send(&self, stale: &CancellationToken) -> RequestResult {
        // Stale sends never commit, so they take no sequence number. The
        // staleness check runs under the state lock, as does cancellation.
        let mut seq = 0;
        self.state.send_if_modified(|s| {
            if stale.is_cancelled() {
                return false;
            }
            seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
            s.loading = true;
            true
        });

        let Target {
            descriptor,
            on_success,
        } = self.target.read().clone();

        let result = self.service.send(&descriptor).await;

        if let Some(callback) = on_success {
            callback(&result);
        }

        let committed = self.state.send_if_modified(|s| {
            if seq == 0 || stale.is_cancelled() {
                trace!(path = %descriptor.path, "discarding completion from stale attachment");
                return false;
            }

            let previous = self.committed.fetch_max(seq, Ordering::SeqCst);
            if previous > seq {
                trace!(
                    path = %descriptor.path,
                    seq,
                    committed = previous,
                    "discarding out-of-order completion"
                );
                return false;
            }

            let latest = self.issued.load(Ordering::SeqCst) == seq;
            s.error.clone_from(&result.error);
            s.data.clone_from(&result.data);
            s.loading = !latest;
            s.is_initial_request = false;
            true
        });
        if committed {
            trace!(path = %descriptor.path, seq, "committed completion");
        }

        result
    }

    fn spawn_send(self: &Arc<Self>, stale: &CancellationToken) {
        let shared = Arc::clone(self);
        let stale = stale.clone();
        tokio::spawn(async move {
            shared.send(&stale).await;
        });
    }

    fn spawn_timer(self: &Arc<Self>, stale: &CancellationToken, period: Duration) -> Timer {
        let cancel = stale.child_token();
        let handle = tokio::spawn(Self::run_timer(
            Arc::clone(self),
            stale.clone(),
            cancel.clone(),
            period,
        ));
        Timer { cancel, handle }
    }

    /// Fires a send every period without waiting for earlier sends.
    async fn run_timer(
        shared: Arc<Self>,
        stale: CancellationToken,
        cancel: CancellationToken,
        period: Duration,
    ) {
        let mut next = Instant::now() + period;
        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                () = tokio::time::sleep_until(next) => {}
            }

            shared.spawn_send(&stale);

            next += period;
            let now = Instant::now();
            if next <= now {
                // Missed ticks are skipped rather than fired in a burst.
                next = now + period;
            }
        }
    }
}

impl<T: Transport + ?Sized + 'static> Poller<T> {
    pub(crate) fn attach(service: RequestService<T>, config: PollingConfig) -> Self {
        let (state, _) = watch::channel(PollingState::initial(&config));
        let poller = Self {
            shared: Arc::new(Shared {
                service,
                target: RwLock::new(Target::from(&config)),
                state,
                issued: AtomicU64::new(0),
                committed: AtomicU64::new(0),
            }),
            attachment: Mutex::new(None),
        };
        poller.start(config.interval);
        poller
    }

    fn start(&self, interval: Option<Duration>) {
        let interval = normalize_interval(interval);
        let stale = CancellationToken::new();
        {
            let target = self.shared.target.read();
            debug!(
                path = %target.descriptor.path,
                method = %target.descriptor.method,
                interval = ?interval,
                "attaching poller"
            );
        }

        self.shared.spawn_send(&stale);
        let timer = interval.map(|period| self.shared.spawn_timer(&stale, period));

        *self.attachment.lock() = Some(Attachment { stale, timer });
    }

    /// Send the current target now
    ///
    /// Behaves like a timer-driven send. On a detached poller the request
    /// still runs and notifies `on_success`, but state is left untouched.
    pub async fn send_request(&self) -> RequestResult {
        let stale = match self.attachment.lock().as_ref() {
            Some(attachment) => attachment.stale.clone(),
            None => {
                let token = CancellationToken::new();
                token.cancel();
                token
            }
        };
        self.shared.send(&stale).await
    }

    /// Start or stop polling
    ///
    /// `None` or a zero period stops polling and clears the timer. Going
    /// from stopped to a period schedules a new timer right away; its first
    /// send fires one period later. While a timer is running only
    /// `current_interval` changes: the running cadence continues until the
    /// timer is cleared. A detached poller is left untouched.
    pub fn change_interval(&self, interval: Option<Duration>) {
        let interval = normalize_interval(interval);

        let mut guard = self.attachment.lock();
        let Some(attachment) = guard.as_mut() else {
            return;
        };
        self.shared
            .state
            .send_if_modified(|s| std::mem::replace(&mut s.current_interval, interval) != interval);

        match (interval, attachment.timer.take()) {
            (None, Some(timer)) => {
                debug!("stopping poller timer");
                timer.stop();
            }
            (None, None) => {}
            (Some(period), None) => {
                debug!(?period, "starting poller timer");
                attachment.timer = Some(self.shared.spawn_timer(&attachment.stale, period));
            }
            (Some(period), Some(timer)) => {
                debug!(?period, "interval changed, keeping running cadence");
                attachment.timer = Some(timer);
            }
        }
    }

    /// Point the poller at a new configuration
    ///
    /// Re-attaches only when `(path, method)` changed: the previous
    /// attachment goes stale, state is reset and a fresh send is issued.
    /// Otherwise the new body and callback are used by subsequent sends
    /// and an interval change goes through [`change_interval`](Self::change_interval).
    ///
    /// Returns whether the poller re-attached.
    pub fn retarget(&self, config: PollingConfig) -> bool {
        let same_target = self
            .shared
            .target
            .read()
            .descriptor
            .same_target(&config.descriptor);

        if same_target {
            *self.shared.target.write() = Target::from(&config);
            if self.shared.state.borrow().current_interval != normalize_interval(config.interval) {
                self.change_interval(config.interval);
            }
            return false;
        }

        debug!(
            path = %config.descriptor.path,
            method = %config.descriptor.method,
            "retargeting poller"
        );
        self.detach();
        *self.shared.target.write() = Target::from(&config);
        self.shared.state.send_replace(PollingState::initial(&config));
        self.start(config.interval);
        true
    }
}

impl<T: ?Sized> Poller<T> {
    /// Current state snapshot
    pub fn state(&self) -> PollingState {
        self.shared.state.borrow().clone()
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<PollingState> {
        self.shared.state.subscribe()
    }

    /// Current request target
    pub fn descriptor(&self) -> RequestDescriptor {
        self.shared.target.read().descriptor.clone()
    }

    /// Whether an attachment is active
    pub fn is_attached(&self) -> bool {
        self.attachment.lock().is_some()
    }

    /// Whether a repeating timer is active
    pub fn is_polling(&self) -> bool {
        self.attachment
            .lock()
            .as_ref()
            .is_some_and(|a| a.timer.is_some())
    }

    /// Stop polling and suppress every in-flight completion
    ///
    /// Idempotent. In-flight requests still run to completion.
    pub fn detach(&self) {
        let Some(attachment) = self.attachment.lock().take() else {
            return;
        };
        // Cancel under the state lock so no completion can commit after
        // detach returns.
        self.shared.state.send_if_modified(|_| {
            attachment.stale.cancel();
            false
        });
        if let Some(timer) = attachment.timer {
            timer.stop();
        }
        debug!(path = %self.shared.target.read().descriptor.path, "detached poller");
    }
}

impl<T: ?Sized> Drop for Poller<T> {
    fn drop(&mut self) {
        self.detach();
    }
}

impl<T: ?Sized> fmt::Debug for Poller<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poller")
            .field("descriptor", &self.shared.target.read().descriptor)
            .field("attached", &self.is_attached())
            .field("polling", &self.is_polling())
            .finish()
    }
}
