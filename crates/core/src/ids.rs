//! Identifier generation for every persisted entity.

use uuid::Uuid;

/// Returns a fresh 128-bit identifier.
///
/// UUID v7 keeps 74 random bits and a millisecond timestamp prefix, so ids are
/// unguessable for practical purposes and sort by creation time.
pub fn new_id() -> String {
    Uuid::now_v7().to_string()
}

/// Returns the caller-supplied id, or a fresh one when absent or blank.
pub fn id_or_new(id: Option<String>) -> String {
    match id {
        Some(id) if !id.trim().is_empty() => id,
        _ => new_id(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_id_is_uuid() {
        let id = new_id();
        assert_eq!(id.len(), 36);
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_new_ids_are_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| new_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_id_or_new_keeps_supplied_id() {
        assert_eq!(id_or_new(Some("doc-1".to_string())), "doc-1");
        assert_ne!(id_or_new(Some("  ".to_string())), "  ");
        assert_eq!(id_or_new(None).len(), 36);
    }
}
