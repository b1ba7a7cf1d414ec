use std::fmt::Debug;

use futures::stream::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// A reactive value that can be watched for changes.
///
/// Clones share the same underlying value. Only the crate can write; hosts
/// read the current value or watch a stream of updates.
#[derive(Clone)]
pub struct Property<T: Clone + Send + Sync + 'static> {
    tx: watch::Sender<T>,
}

impl<T: Clone + Send + Sync + 'static> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Set a new value, notifying watchers only if it differs.
    pub(crate) fn set(&self, new_value: T)
    where
        T: PartialEq,
    {
        self.tx.send_if_modified(|current| {
            if *current != new_value {
                *current = new_value;
                true
            } else {
                false
            }
        });
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Stream that yields the current value, then every change.
    ///
    /// Intermediate values may be skipped if the watcher falls behind.
    pub fn watch(&self) -> impl Stream<Item = T> + Send + use<T> {
        WatchStream::new(self.tx.subscribe())
    }

    /// Waits until the value satisfies `predicate` and returns it.
    ///
    /// Resolves immediately if the current value already matches.
    pub async fn wait_for(&self, mut predicate: impl FnMut(&T) -> bool) -> T {
        let mut rx = self.tx.subscribe();
        match rx.wait_for(|value| predicate(value)).await {
            Ok(value) => value.clone(),
            // The sender lives in `self`, so the channel cannot close here.
            Err(_) => self.get(),
        }
    }
}

impl<T: Clone + Send + Sync + Debug + 'static> Debug for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}
