//! Helpers for tests of components built on this crate.
//!
//! Enabled with the `testing` feature.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::prop::CallbackWith;

/// Records every value passed to its callback.
///
/// # Examples
///
/// ```
/// use trellis_ui::testing::Recorder;
///
/// let recorder = Recorder::new();
/// let callback = recorder.callback();
/// callback.call(3);
/// callback.call(5);
/// assert_eq!(recorder.calls(), vec![3, 5]);
/// assert_eq!(recorder.last(), Some(5));
/// ```
pub struct Recorder<T> {
    calls: Arc<Mutex<Vec<T>>>,
    callback: CallbackWith<T>,
}

impl<T> Recorder<T>
where
    T: Send + 'static,
{
    /// Creates an empty recorder.
    pub fn new() -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        Self {
            calls,
            callback: CallbackWith::new(move |value| sink.lock().push(value)),
        }
    }

    /// The recording callback. Always the same instance.
    pub fn callback(&self) -> CallbackWith<T> {
        self.callback.clone()
    }

    /// Number of recorded calls.
    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }

    /// Recorded values in call order.
    pub fn calls(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.calls.lock().clone()
    }

    /// Most recent value.
    pub fn last(&self) -> Option<T>
    where
        T: Clone,
    {
        self.calls.lock().last().cloned()
    }
}

impl<T> Default for Recorder<T>
where
    T: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
            callback: self.callback.clone(),
        }
    }
}
