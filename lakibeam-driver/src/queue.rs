use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Hand-off buffer of raw datagrams between the socket thread and the drain
/// cycle.
///
/// Clones share the same buffer. `drain_all` swaps the whole buffer out under
/// the lock, so a concurrent `push` lands either in the drained batch or in
/// the next one, never in both.
#[derive(Clone, Debug, Default)]
pub struct IngestQueue {
    datagrams: Arc<Mutex<VecDeque<Vec<u8>>>>,
}

impl IngestQueue {
    pub fn new() -> IngestQueue {
        IngestQueue::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Vec<u8>>> {
        // A panic while holding this lock cannot leave the deque half-updated.
        self.datagrams.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, datagram: Vec<u8>) {
        self.lock().push_back(datagram);
    }

    /// Takes every queued datagram, oldest first.
    pub fn drain_all(&self) -> Vec<Vec<u8>> {
        let drained = std::mem::take(&mut *self.lock());
        drained.into()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
