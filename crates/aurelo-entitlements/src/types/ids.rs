//! Strongly-typed identifiers (avoid mixing strings/UUIDs arbitrarily).

use uuid::Uuid;

/// Workspace identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WorkspaceId(pub Uuid);

impl std::fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_id_debug() {
        let uuid = Uuid::new_v4();
        let workspace_id = WorkspaceId(uuid);
        assert!(format!("{:?}", workspace_id).contains(&uuid.to_string()));
    }

    #[test]
    fn test_workspace_id_equality() {
        let uuid = Uuid::new_v4();
        assert_eq!(WorkspaceId(uuid), WorkspaceId(uuid));
        assert_ne!(WorkspaceId(uuid), WorkspaceId(Uuid::new_v4()));
    }

    #[test]
    fn test_workspace_id_display() {
        let uuid = Uuid::new_v4();
        assert_eq!(WorkspaceId(uuid).to_string(), uuid.to_string());
    }
}
