//! Counting join primitive.

use super::bounded_wait::JoinTarget;
use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Tracks a set of concurrently running members and lets observers block until
/// all of them have finished
///
/// Cloning yields another handle to the same group.
#[derive(Clone, Default)]
pub struct WaitGroup {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    pending: Mutex<usize>,
    all_done: Condvar,
}

impl WaitGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `delta` additional members
    pub fn add(&self, delta: usize) {
        *self.inner.pending.lock() += delta;
    }

    /// Mark one member as finished
    ///
    /// Calling this more times than members were added is ignored with a warning.
    pub fn done(&self) {
        let mut pending = self.inner.pending.lock();
        if *pending == 0 {
            warn!("WaitGroup::done called with no pending members");
            return;
        }
        *pending -= 1;
        if *pending == 0 {
            self.inner.all_done.notify_all();
        }
    }

    /// Register one member whose guard calls [`done`](Self::done) when dropped
    pub fn member(&self) -> WaitGroupMember {
        self.add(1);
        WaitGroupMember {
            group: self.clone(),
        }
    }

    pub fn pending(&self) -> usize {
        *self.inner.pending.lock()
    }

    /// Block the current thread until no members are pending
    pub fn wait(&self) {
        let mut pending = self.inner.pending.lock();
        while *pending > 0 {
            self.inner.all_done.wait(&mut pending);
        }
    }
}

impl fmt::Debug for WaitGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitGroup")
            .field("pending", &self.pending())
            .finish()
    }
}

impl JoinTarget for WaitGroup {
    fn join(&self) {
        self.wait();
    }

    fn is_joined(&self) -> bool {
        self.pending() == 0
    }
}

/// Membership guard returned by [`WaitGroup::member`]
#[derive(Debug)]
pub struct WaitGroupMember {
    group: WaitGroup,
}

impl Drop for WaitGroupMember {
    fn drop(&mut self) {
        self.group.done();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_empty_group_is_joined() {
        let wg = WaitGroup::new();
        assert!(wg.is_joined());
        wg.wait();
    }

    #[test]
    fn test_add_and_done() {
        let wg = WaitGroup::new();
        wg.add(2);
        assert_eq!(wg.pending(), 2);
        wg.done();
        assert!(!wg.is_joined());
        wg.done();
        assert!(wg.is_joined());
    }

    #[test]
    fn test_extra_done_is_ignored() {
        let wg = WaitGroup::new();
        wg.done();
        assert_eq!(wg.pending(), 0);
    }

    #[test]
    fn test_wait_blocks_until_members_drop() {
        let wg = WaitGroup::new();
        let handles: Vec<_> = (0..3)
            .map(|i| {
                let member = wg.member();
                thread::spawn(move || {
                    thread::sleep(Duration::from_millis(5 * (i + 1)));
                    drop(member);
                })
            })
            .collect();

        wg.wait();
        assert_eq!(wg.pending(), 0);

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
