use yewdux::Store;

/// In-memory copy of the persisted session.
///
/// Views subscribe to this store to re-render on login and logout. Writes
/// go through [`crate::session::SessionStore`], which keeps durable storage
/// in step.
#[derive(Debug, Default, Clone, PartialEq, Eq, Store)]
pub struct SessionState {
    pub token: Option<String>,
    pub username: Option<String>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
