//! Application state for the web server.

use std::sync::Arc;

use scholar::{CancelToken, Scholar};

use super::error::ApiError;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The resolution engine shared by every request.
    pub scholar: Arc<Scholar>,
}

/// Cancels its token when dropped.
struct CancelOnDrop(CancelToken);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

impl AppState {
    pub fn new(scholar: Arc<Scholar>) -> Self {
        Self { scholar }
    }

    /// Run a blocking library call on tokio's blocking pool.
    pub async fn run_blocking<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&Scholar) -> scholar::Result<T> + Send + 'static,
    {
        let scholar = Arc::clone(&self.scholar);
        tokio::task::spawn_blocking(move || f(&scholar))
            .await
            .map_err(|e| ApiError::Internal(format!("Request task failed: {}", e)))?
            .map_err(ApiError::from)
    }

    /// Like [`run_blocking`](Self::run_blocking), but the call gets a token
    /// that is cancelled once the request future is dropped, e.g. when the
    /// client disconnects.
    pub async fn run_cancellable<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&Scholar, &CancelToken) -> scholar::Result<T> + Send + 'static,
    {
        let cancel = CancelToken::new();
        let _guard = CancelOnDrop(cancel.clone());
        self.run_blocking(move |scholar| f(scholar, &cancel)).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::{Duration, Instant};

    use scholar::resolve::{MemoryIndex, MockCatalog};
    use scholar::store::MemoryStore;
    use scholar::{ScholarConfig, ScholarError};

    use super::*;

    fn state() -> AppState {
        let scholar = Scholar::with_backends(
            ScholarConfig::default(),
            Arc::new(MemoryIndex::new()),
            Arc::new(MockCatalog::new()),
            Arc::new(MemoryStore::new()),
        );
        AppState::new(Arc::new(scholar))
    }

    #[tokio::test]
    async fn test_dropped_request_cancels_blocking_call() {
        let observed = Arc::new(AtomicBool::new(false));
        let flag = observed.clone();

        let state = state();
        let call = state.run_cancellable(move |_, cancel| {
            let deadline = Instant::now() + Duration::from_secs(5);
            while Instant::now() < deadline {
                if cancel.is_cancelled() {
                    flag.store(true, Ordering::SeqCst);
                    return Err(ScholarError::Cancelled);
                }
                std::thread::sleep(Duration::from_millis(5));
            }
            Ok(())
        });
        // the timeout drops the request future
        assert!(tokio::time::timeout(Duration::from_millis(50), call).await.is_err());

        let deadline = Instant::now() + Duration::from_secs(2);
        while !observed.load(Ordering::SeqCst) && Instant::now() < deadline {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(observed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_completed_call_returns_value() {
        let value = state().run_cancellable(|_, cancel| Ok(cancel.is_cancelled())).await;
        assert!(matches!(value, Ok(false)));
    }
}
