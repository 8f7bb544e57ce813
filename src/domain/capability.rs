//! Effective capability of a user on a note.

use crate::domain::Privilege;
use serde::Serialize;

/// What a user may do with a particular note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "privilege", rename_all = "snake_case")]
pub enum Capability {
    /// The user created the note.
    Owner,
    /// The user holds a share grant with this privilege label.
    Shared(Privilege),
    /// The user has no relation to the note.
    None,
}

impl Capability {
    pub fn is_owner(&self) -> bool {
        matches!(self, Capability::Owner)
    }

    /// Owners and grantees may read the note.
    pub fn can_read(&self) -> bool {
        !matches!(self, Capability::None)
    }

    /// Returns the privilege label for shared access.
    pub fn privilege(&self) -> Option<&Privilege> {
        match self {
            Capability::Shared(privilege) => Some(privilege),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_can_read() {
        assert!(Capability::Owner.is_owner());
        assert!(Capability::Owner.can_read());
        assert_eq!(Capability::Owner.privilege(), None);
    }

    #[test]
    fn shared_can_read_but_is_not_owner() {
        let cap = Capability::Shared(Privilege::new("edit").unwrap());
        assert!(!cap.is_owner());
        assert!(cap.can_read());
        assert_eq!(cap.privilege().map(|p| p.as_str()), Some("edit"));
    }

    #[test]
    fn none_cannot_read() {
        assert!(!Capability::None.can_read());
        assert!(!Capability::None.is_owner());
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(Capability::Shared(Privilege::new("read").unwrap())).unwrap();
        assert_eq!(json["kind"], "shared");
        assert_eq!(json["privilege"], "read");
    }
}
