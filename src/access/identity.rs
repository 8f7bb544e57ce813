//! Requester identity supplied by the calling layer.

use crate::domain::Username;

/// The authenticated identity behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    User(Username),
    Anonymous,
}

impl Identity {
    /// Returns the username, or `None` for anonymous requests.
    pub fn user(&self) -> Option<&Username> {
        match self {
            Identity::User(name) => Some(name),
            Identity::Anonymous => None,
        }
    }
}

impl From<Option<Username>> for Identity {
    fn from(user: Option<Username>) -> Self {
        user.map_or(Identity::Anonymous, Identity::User)
    }
}

/// Source of the current requester, such as a session layer.
///
/// Authentication happens behind this trait; the core only ever sees the
/// resulting identity, passed explicitly into every operation.
pub trait IdentitySource {
    fn current_user(&self) -> Identity;
}
