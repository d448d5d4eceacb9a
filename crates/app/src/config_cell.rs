//! Shared configuration cell with atomic whole-value replacement.

use std::sync::Arc;

use tokio::sync::watch;

/// Holds the current value of a configuration and hands out immutable
/// snapshots of it.
///
/// Readers never observe a half-updated value: [`ConfigCell::replace`] swaps
/// the whole `Arc`, and a snapshot taken before the swap keeps pointing at the
/// old value.
pub struct ConfigCell<T> {
    tx: watch::Sender<Arc<T>>,
}

impl<T: Send + Sync + 'static> ConfigCell<T> {
    pub fn new(value: T) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(value));
        Self { tx }
    }

    /// The current value.
    #[must_use]
    pub fn snapshot(&self) -> Arc<T> {
        Arc::clone(&self.tx.borrow())
    }

    /// Install `value` and return the previous one.
    pub fn replace(&self, value: T) -> Arc<T> {
        self.tx.send_replace(Arc::new(value))
    }
}

impl<T: Default + Send + Sync + 'static> Default for ConfigCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
