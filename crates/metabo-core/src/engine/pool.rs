use super::error::EngineError;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A bounded pool that runs one task per item and hands every task's return value back to
/// the caller. Tasks never touch shared state; the caller applies the results.
pub struct WorkerPool {
    threads: usize,
    #[cfg(feature = "parallel")]
    pool: rayon::ThreadPool,
}

impl WorkerPool {
    pub fn new(threads: usize, label: &str) -> Result<Self, EngineError> {
        #[cfg(feature = "parallel")]
        let pool = {
            let label = label.to_string();
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(move |i| format!("{}-{}", label, i))
                .build()
                .map_err(|e| EngineError::ThreadPool(e.to_string()))?
        };
        #[cfg(not(feature = "parallel"))]
        let _ = label;

        Ok(Self {
            threads,
            #[cfg(feature = "parallel")]
            pool,
        })
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Runs `task` over every item and blocks until all of them have finished. The output
    /// keeps the order of `items`.
    pub fn map<T, R, F>(&self, items: &[T], task: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Send + Sync,
    {
        #[cfg(feature = "parallel")]
        {
            self.pool.install(|| items.par_iter().map(task).collect())
        }

        #[cfg(not(feature = "parallel"))]
        {
            items.iter().map(task).collect()
        }
    }

    /// Like [`map`](Self::map), but a task that panics yields `Err` with the panic message
    /// for its item and leaves the other items unaffected.
    pub fn try_map<T, R, F>(&self, items: &[T], task: F) -> Vec<Result<R, String>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Send + Sync,
    {
        self.map(items, |item| {
            panic::catch_unwind(AssertUnwindSafe(|| task(item))).map_err(panic_message)
        })
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "task panicked".to_string()
    }
}
