use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;
use super::{CatalogError, CatalogSnapshot, CatalogSource};

/// A catalog load running in the background, tied to the lifetime of the
/// view that started it. Dropping the handle aborts an unfinished fetch.
#[derive(Debug)]
pub struct CatalogTask {
    handle: Option<JoinHandle<Result<CatalogSnapshot, CatalogError>>>,
}

impl CatalogTask {
    /// Must be called from within a tokio runtime.
    pub fn spawn(source: Arc<dyn CatalogSource>) -> Self {
        let handle = tokio::spawn(async move { CatalogSnapshot::load(source.as_ref()).await });
        Self { handle: Some(handle) }
    }

    pub fn is_finished(&self) -> bool { self.handle.as_ref().map_or(true, JoinHandle::is_finished) }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            debug!("cancelling catalog fetch");
            handle.abort();
        }
    }

    pub async fn join(mut self) -> Result<CatalogSnapshot, CatalogError> {
        let handle = self.handle.take().ok_or(CatalogError::Cancelled)?;
        handle.await.map_err(|_| CatalogError::Cancelled)?
    }
}

impl Drop for CatalogTask {
    fn drop(&mut self) { self.cancel(); }
}
