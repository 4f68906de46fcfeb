//! Last-write-wins request de-duplication

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use tokio::task::AbortHandle;

/// Runs at most one request per key; a newer request aborts the older one.
#[derive(Default)]
pub struct RequestDeduper {
    inflight: Mutex<HashMap<String, (u64, AbortHandle)>>,
    generation: AtomicU64,
}

impl RequestDeduper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `request` under `key`.
    ///
    /// Returns `None` when a later call with the same key superseded this one
    /// before it finished.
    pub async fn run<F, T>(&self, key: &str, request: F) -> Option<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        // Generation and registration happen under one lock so the newest
        // call is always the one left in the map.
        let (generation, task) = {
            let mut inflight = self.inflight.lock().unwrap_or_else(|e| e.into_inner());
            let generation = self.generation.fetch_add(1, Ordering::Relaxed);
            let task = tokio::spawn(request);
            if let Some((_, previous)) =
                inflight.insert(key.to_string(), (generation, task.abort_handle()))
            {
                previous.abort();
            }
            (generation, task)
        };

        let result = task.await;

        {
            let mut inflight = self.inflight.lock().unwrap_or_else(|e| e.into_inner());
            if matches!(inflight.get(key), Some((current, _)) if *current == generation) {
                inflight.remove(key);
            }
        }

        match result {
            Ok(value) => Some(value),
            Err(e) if e.is_cancelled() => {
                tracing::debug!(key, "Request superseded");
                None
            }
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }

    /// Number of requests currently in flight
    pub fn in_flight(&self) -> usize {
        self.inflight.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}
