//! # Bounded Wait
//!
//! Observes a "join all members" operation with a deadline. The join itself runs in
//! the background and signals completion through a one-shot channel; the caller
//! races that signal against a timer.
//!
//! A timeout ends only the caller's observation. The background join keeps running
//! until the members really finish, and its late completion signal is discarded.

use crate::config::WaitConfig;
use futures::FutureExt;
use std::future::Future;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;

/// Something that can block until every one of its concurrent members has finished
///
/// `join` must be safe to call from several observers at once.
pub trait JoinTarget: Send + Sync + 'static {
    /// Block the calling thread until all members are done
    fn join(&self);

    /// Non-blocking check for an already completed join
    ///
    /// Consulted before any background join is started, so a zero timeout reports
    /// `true` exactly when this does.
    fn is_joined(&self) -> bool;
}

impl<T: JoinTarget + ?Sized> JoinTarget for Arc<T> {
    fn join(&self) {
        (**self).join();
    }

    fn is_joined(&self) -> bool {
        (**self).is_joined()
    }
}

/// Deadline-bounded joins with a fixed timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedWait {
    timeout: Duration,
}

impl BoundedWait {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn from_config(config: &WaitConfig) -> Self {
        Self::new(config.default_timeout())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// See [`await_wait_group`]
    ///
    /// # Panics
    ///
    /// Panics when polled outside a tokio runtime; use [`Self::wait_blocking`] there.
    pub async fn wait<T: JoinTarget + Clone>(&self, target: &T) -> bool {
        await_wait_group(target, self.timeout).await
    }

    /// See [`await_wait_group_blocking`]
    pub fn wait_blocking<T: JoinTarget + Clone>(&self, target: &T) -> bool {
        await_wait_group_blocking(target, self.timeout)
    }

    /// See [`await_join`]
    ///
    /// # Panics
    ///
    /// Panics when polled outside a tokio runtime.
    pub async fn wait_for<F>(&self, join: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        await_join(join, self.timeout).await
    }
}

impl Default for BoundedWait {
    fn default() -> Self {
        Self::from_config(&WaitConfig::default())
    }
}

/// Wait for `target` to join, giving up after `timeout`
///
/// Returns `true` if the join completed in time and `false` otherwise. An already
/// joined target returns `true` at once; a zero timeout returns `false` at once for
/// any other target.
///
/// # Panics
///
/// Panics when polled outside a tokio runtime with the time driver enabled, since the
/// deadline is a `tokio::time` timer. Synchronous callers should use
/// [`await_wait_group_blocking`] instead.
pub async fn await_wait_group<T: JoinTarget + Clone>(target: &T, timeout: Duration) -> bool {
    if let Some(outcome) = immediate_outcome(target, timeout) {
        return outcome;
    }

    let (done_tx, done_rx) = oneshot::channel::<()>();
    let observer = target.clone();
    let spawned = spawn_join_thread(move || {
        observer.join();
        // Receiver is gone if the caller already timed out
        let _ = done_tx.send(());
    });
    if !spawned {
        return false;
    }

    race_completion(done_rx, timeout).await
}

/// Synchronous counterpart of [`await_wait_group`] for callers outside an async runtime
pub fn await_wait_group_blocking<T: JoinTarget + Clone>(target: &T, timeout: Duration) -> bool {
    if let Some(outcome) = immediate_outcome(target, timeout) {
        return outcome;
    }

    let (done_tx, done_rx) = crossbeam::channel::bounded::<()>(1);
    let observer = target.clone();
    let spawned = spawn_join_thread(move || {
        observer.join();
        let _ = done_tx.send(());
    });
    if !spawned {
        return false;
    }

    let started = Instant::now();
    match done_rx.recv_timeout(timeout) {
        Ok(()) => {
            log_joined(started);
            true
        }
        Err(crossbeam::channel::RecvTimeoutError::Timeout) => {
            log_timed_out(timeout);
            false
        }
        Err(crossbeam::channel::RecvTimeoutError::Disconnected) => {
            log_abandoned();
            false
        }
    }
}

/// Wait for a join expressed as a future, giving up after `timeout`
///
/// The future is polled once up front so an already finished join reports `true`
/// even with a zero timeout. Otherwise it is spawned onto the tokio runtime and keeps
/// running after a timeout.
///
/// # Panics
///
/// Panics when polled outside a tokio runtime, since the join is handed to
/// `tokio::spawn` and the deadline is a `tokio::time` timer.
pub async fn await_join<F>(join: F, timeout: Duration) -> bool
where
    F: Future<Output = ()> + Send + 'static,
{
    let mut join = Box::pin(join);
    if (&mut join).now_or_never().is_some() {
        crate::log_wait!(debug, "ALREADY_JOINED");
        return true;
    }
    if timeout.is_zero() {
        log_timed_out(timeout);
        return false;
    }

    let (done_tx, done_rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        join.await;
        let _ = done_tx.send(());
    });

    race_completion(done_rx, timeout).await
}

fn immediate_outcome<T: JoinTarget>(target: &T, timeout: Duration) -> Option<bool> {
    if target.is_joined() {
        crate::log_wait!(debug, "ALREADY_JOINED");
        return Some(true);
    }
    if timeout.is_zero() {
        log_timed_out(timeout);
        return Some(false);
    }
    None
}

async fn race_completion(done_rx: oneshot::Receiver<()>, timeout: Duration) -> bool {
    let started = Instant::now();
    match tokio::time::timeout(timeout, done_rx).await {
        Ok(Ok(())) => {
            log_joined(started);
            true
        }
        Ok(Err(_)) => {
            log_abandoned();
            false
        }
        Err(_) => {
            log_timed_out(timeout);
            false
        }
    }
}

/// Run the blocking join on a detached thread so a timed-out join never holds up
/// runtime shutdown
fn spawn_join_thread<F>(join: F) -> bool
where
    F: FnOnce() + Send + 'static,
{
    match thread::Builder::new()
        .name("bounded-wait-join".to_string())
        .spawn(join)
    {
        Ok(_) => true,
        Err(e) => {
            crate::log_wait!(error, "JOIN_THREAD_SPAWN_FAILED", error: e.to_string());
            false
        }
    }
}

fn log_joined(started: Instant) {
    crate::log_wait!(debug, "JOINED", elapsed_ms: started.elapsed().as_millis());
}

fn log_timed_out(timeout: Duration) {
    crate::log_wait!(debug, "TIMED_OUT", timeout_ms: timeout.as_millis());
}

// Join panicked or was dropped before signalling
fn log_abandoned() {
    crate::log_wait!(warn, "JOIN_ABANDONED");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::WaitGroup;

    /// Join target that never finishes
    #[derive(Clone)]
    struct Stuck;

    impl JoinTarget for Stuck {
        fn join(&self) {
            loop {
                thread::park();
            }
        }

        fn is_joined(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_zero_timeout_on_pending_target() {
        assert!(!await_wait_group_blocking(&Stuck, Duration::ZERO));
    }

    #[test]
    fn test_zero_timeout_on_joined_target() {
        let wg = WaitGroup::new();
        assert!(await_wait_group_blocking(&wg, Duration::ZERO));
    }

    #[test]
    fn test_blocking_timeout_on_stuck_target() {
        assert!(!await_wait_group_blocking(&Stuck, Duration::from_millis(10)));
    }

    #[test]
    fn test_async_wait_from_sync_context() {
        let wg = WaitGroup::new();
        let member = wg.member();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            drop(member);
        });

        let joined = tokio_test::block_on(await_wait_group(&wg, Duration::from_secs(5)));
        assert!(joined);
    }

    #[tokio::test]
    async fn test_await_join_ready_future_with_zero_timeout() {
        assert!(await_join(async {}, Duration::ZERO).await);
    }

    #[tokio::test]
    async fn test_await_join_pending_future_with_zero_timeout() {
        assert!(!await_join(futures::future::pending::<()>(), Duration::ZERO).await);
    }

    #[test]
    fn test_bounded_wait_from_config() {
        let config = WaitConfig {
            default_timeout_ms: 250,
        };
        let wait = BoundedWait::from_config(&config);
        assert_eq!(wait.timeout(), Duration::from_millis(250));
        assert_eq!(BoundedWait::default().timeout(), Duration::from_secs(30));
    }
}
