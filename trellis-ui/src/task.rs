//! Local task queue for work started from event handlers.
//!
//! Handlers run synchronously and must not block. Anything asynchronous, such
//! as talking to an authentication service, is handed to a [`TaskSpawner`]
//! and polled by [`Runtime::run_pending`](crate::Runtime::run_pending) on the
//! runtime's own thread.

use std::{
    future::Future,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use futures::{
    FutureExt,
    executor::LocalPool,
    future::BoxFuture,
    task::LocalSpawnExt,
};
use parking_lot::Mutex;
use tracing::{trace, warn};

/// Cloneable handle that queues futures on the owning runtime.
#[derive(Clone, Default)]
pub struct TaskSpawner {
    queue: Arc<Mutex<Vec<BoxFuture<'static, ()>>>>,
}

impl TaskSpawner {
    /// Queues a future. It starts on the next
    /// [`Runtime::run_pending`](crate::Runtime::run_pending).
    pub fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.queue.lock().push(future.boxed());
    }

    fn drain(&self) -> Vec<BoxFuture<'static, ()>> {
        std::mem::take(&mut *self.queue.lock())
    }

    fn queued(&self) -> usize {
        self.queue.lock().len()
    }
}

impl std::fmt::Debug for TaskSpawner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskSpawner")
            .field("queued", &self.queued())
            .finish()
    }
}

#[derive(Default)]
pub(crate) struct TaskQueue {
    spawner: TaskSpawner,
    pool: LocalPool,
    in_flight: Arc<AtomicUsize>,
}

impl TaskQueue {
    pub(crate) fn spawner(&self) -> TaskSpawner {
        self.spawner.clone()
    }

    pub(crate) fn pending(&self) -> usize {
        self.spawner.queued() + self.in_flight.load(Ordering::Acquire)
    }

    pub(crate) fn run_until_stalled(&mut self) -> usize {
        let mut started = 0;
        loop {
            let batch = self.spawner.drain();
            if batch.is_empty() {
                break;
            }
            for future in batch {
                let in_flight = Arc::clone(&self.in_flight);
                in_flight.fetch_add(1, Ordering::AcqRel);
                let tracked = async move {
                    future.await;
                    in_flight.fetch_sub(1, Ordering::AcqRel);
                };
                match self.pool.spawner().spawn_local(tracked) {
                    Ok(()) => started += 1,
                    Err(err) => {
                        self.in_flight.fetch_sub(1, Ordering::AcqRel);
                        warn!(%err, "failed to start task");
                    }
                }
            }
            self.pool.run_until_stalled();
        }
        trace!(started, in_flight = self.in_flight.load(Ordering::Acquire), "tasks stalled");
        started
    }
}
