use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Condvar, Mutex};

/// Text of a file whose asynchronous read finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedRead {
    pub path: PathBuf,
    pub text: String,
}

/// Collects the results of in-flight file reads.
///
/// Clones share the same queue. Readers push results as they finish; the
/// analysis host drains them before a request.
#[derive(Debug, Clone, Default)]
pub struct ReadQueue {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    state: Mutex<QueueState>,
    idle: Condvar,
}

#[derive(Debug, Default)]
struct QueueState {
    completed: Vec<CompletedRead>,
    pending: usize,
    failed: usize,
}

impl ReadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Announce `count` reads that will later be finished.
    pub(crate) fn begin(&self, count: usize) {
        self.inner.state.lock().pending += count;
    }

    /// Finish one announced read; `None` records a failure.
    pub(crate) fn finish(&self, read: Option<CompletedRead>) {
        let mut state = self.inner.state.lock();
        match read {
            Some(read) => state.completed.push(read),
            None => state.failed += 1,
        }
        state.pending = state.pending.saturating_sub(1);
        if state.pending == 0 {
            self.inner.idle.notify_all();
        }
    }

    /// Take every read completed so far.
    pub fn drain(&self) -> Vec<CompletedRead> {
        std::mem::take(&mut self.inner.state.lock().completed)
    }

    /// Reads announced but not finished.
    pub fn pending(&self) -> usize {
        self.inner.state.lock().pending
    }

    /// Reads that failed so far.
    pub fn failed(&self) -> usize {
        self.inner.state.lock().failed
    }

    /// Block until no read is pending.
    pub fn wait_until_idle(&self) {
        let mut state = self.inner.state.lock();
        while state.pending > 0 {
            self.inner.idle.wait(&mut state);
        }
    }

    /// Like [`wait_until_idle`](Self::wait_until_idle) with a timeout.
    /// Returns `false` if reads were still pending when it expired.
    pub fn wait_until_idle_for(&self, timeout: Duration) -> bool {
        let mut state = self.inner.state.lock();
        while state.pending > 0 {
            if self.inner.idle.wait_for(&mut state, timeout).timed_out() {
                return state.pending == 0;
            }
        }
        true
    }
}
