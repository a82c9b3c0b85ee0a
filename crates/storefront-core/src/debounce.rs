// Debounced commits for fast-changing input
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Delivers only the last value pushed within a quiet period
///
/// Each push replaces the pending delayed task; when a task survives `delay`
/// without being replaced it queues its value for [`Debouncer::try_recv`].
/// Values are tagged with the generation they were pushed in, and
/// [`Debouncer::cancel`] starts a new generation, so a value that fired but
/// was not read yet is dropped too. Must be used inside a tokio runtime.
pub struct Debouncer<T> {
    delay: Duration,
    generation: u64,
    tx: mpsc::UnboundedSender<(u64, T)>,
    rx: mpsc::UnboundedReceiver<(u64, T)>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            delay,
            generation: 0,
            tx,
            rx,
            pending: None,
        }
    }

    /// Buffer a new value, restarting the quiet period
    pub fn push(&mut self, value: T) {
        self.abort_pending();

        let tx = self.tx.clone();
        let delay = self.delay;
        let generation = self.generation;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send((generation, value));
        }));
    }

    /// Send a value right away, dropping anything still waiting
    pub fn flush(&mut self, value: T) {
        self.cancel();
        let _ = self.tx.send((self.generation, value));
    }

    /// Drop the pending value without sending it, along with anything
    /// already queued and not yet received
    pub fn cancel(&mut self) {
        self.abort_pending();
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Next committed value, if one is ready
    pub fn try_recv(&mut self) -> Option<T> {
        while let Ok((generation, value)) = self.rx.try_recv() {
            if generation == self.generation {
                return Some(value);
            }
            debug!("Debounce: dropping value from a cancelled generation");
        }
        None
    }

    /// Wait for the next committed value
    pub async fn recv(&mut self) -> Option<T> {
        loop {
            let (generation, value) = self.rx.recv().await?;
            if generation == self.generation {
                return Some(value);
            }
            debug!("Debounce: dropping value from a cancelled generation");
        }
    }

    fn abort_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                debug!("Debounce: superseding pending value");
            }
            handle.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
