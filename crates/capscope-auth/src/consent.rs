//! Consent narrowing at the authorization grant step.
//!
//! The consent form presents the application's available scopes as
//! checkboxes. The issued scope set is the intersection of what the
//! application may use and what the user actually checked, so no capability
//! beyond explicit consent ever reaches the issued token.

use crate::scopes::ScopeSet;

/// Intersects the application's available scopes with the user's selection.
///
/// An empty selection means "none selected", not "all": explicit unchecking
/// must never silently fall back to a full grant.
#[must_use]
pub fn narrow_scopes(available: &ScopeSet, selected: &ScopeSet) -> ScopeSet {
    available.intersection(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_never_exceeds_selection() {
        let available = ScopeSet::parse("read-scope write-scope");
        let selected = ScopeSet::parse("read-scope");
        let issued = narrow_scopes(&available, &selected);
        assert_eq!(issued.to_scope_string(), "read-scope");
        assert!(issued.is_subset(&selected));
    }

    #[test]
    fn test_empty_selection_grants_nothing() {
        let available = ScopeSet::parse("read-scope write-scope");
        let issued = narrow_scopes(&available, &ScopeSet::new());
        assert!(issued.is_empty());
    }

    #[test]
    fn test_selection_outside_available_is_dropped() {
        let available = ScopeSet::parse("read-scope");
        let selected = ScopeSet::parse("read-scope admin-scope");
        let issued = narrow_scopes(&available, &selected);
        assert_eq!(issued.to_scope_string(), "read-scope");
    }
}
