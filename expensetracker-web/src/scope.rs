//! Per-view ownership of in-flight requests.
//!
//! A view creates one [`RequestScope`] when it mounts and cancels it when it
//! unmounts. Futures started through the scope are aborted at that point, so
//! a response arriving after navigation never touches a dead view.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use futures::future::{AbortHandle, Abortable, Aborted};
use tracing::debug;

use crate::api::ApiError;

/// Cancellation scope tied to a view instance.
#[derive(Debug, Default)]
pub struct RequestScope {
    handles: RefCell<HashMap<u64, AbortHandle>>,
    next_key: Cell<u64>,
    cancelled: Cell<bool>,
}

impl RequestScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Awaits `future` unless the scope is cancelled first, in which case
    /// the caller gets [`ApiError::Cancelled`] and must not touch view
    /// state.
    pub async fn run<T, F>(&self, future: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        if self.is_cancelled() {
            return Err(ApiError::Cancelled);
        }

        let (handle, registration) = AbortHandle::new_pair();
        let key = self.next_key.get();
        self.next_key.set(key.wrapping_add(1));
        self.handles.borrow_mut().insert(key, handle);

        let outcome = Abortable::new(future, registration).await;
        self.handles.borrow_mut().remove(&key);
        outcome?
    }

    /// Starts `task` on the browser event loop. The task receives its own
    /// handle on the scope so it can [`RequestScope::run`] its requests.
    pub fn spawn<F>(self: &Rc<Self>, task: impl FnOnce(Rc<Self>) -> F)
    where
        F: Future<Output = ()> + 'static,
    {
        wasm_bindgen_futures::spawn_local(task(Rc::clone(self)));
    }

    /// Aborts everything started through this scope.
    pub fn cancel(&self) {
        self.cancelled.set(true);
        let handles = self.handles.take();
        if !handles.is_empty() {
            debug!(count = handles.len(), "cancelling in-flight requests");
        }
        for handle in handles.into_values() {
            handle.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    #[cfg(test)]
    fn in_flight(&self) -> usize {
        self.handles.borrow().len()
    }
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl From<Aborted> for ApiError {
    fn from(_: Aborted) -> Self {
        Self::Cancelled
    }
}
