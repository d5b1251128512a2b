//! Tab registry for the authenticated shell.
//!
//! Open screens are tracked as an ordered list of tabs plus the id of the
//! active one. Tab identity is the route path, so opening the same route
//! twice never duplicates a tab. The registry is created empty when the
//! shell starts and thrown away on logout; nothing here is persisted.

use crate::routes::Icon;

/// One open page within the authenticated shell, tracked independently of
/// any navigation history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    /// Identity of the tab. Always equal to `url`.
    pub id: String,
    /// Human-readable label shown in the tab strip.
    pub title: String,
    /// Route path the tab renders.
    pub url: String,
    /// Presentational icon; never inspected by registry logic.
    pub icon: Icon,
}

impl Tab {
    pub fn new(url: impl Into<String>, title: impl Into<String>, icon: Icon) -> Self {
        let url = url.into();
        Self {
            id: url.clone(),
            title: title.into(),
            url,
            icon,
        }
    }
}

/// Ordered collection of open tabs plus the currently active tab id.
///
/// Invariants:
/// - At most one tab with a given `id` exists at any time.
/// - Order reflects the sequence in which tabs were opened.
/// - An empty registry has an empty `active_tab` (meaning "no selection").
///
/// The active id MAY transiently reference no tab (see [`set_active_tab`]);
/// the rendering layer treats that as the not-found view.
///
/// [`set_active_tab`]: TabRegistry::set_active_tab
#[derive(Debug, Clone, Default)]
pub struct TabRegistry {
    tabs: Vec<Tab>,
    active_tab: String,
}

impl TabRegistry {
    /// Create an empty registry with no selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open tabs, in the order the user opened them.
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Id of the active tab, or `""` when nothing is selected.
    pub fn active_tab(&self) -> &str {
        &self.active_tab
    }

    /// Look up an open tab by id.
    pub fn find(&self, id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    /// Position of the active tab within the ordered sequence, if any.
    pub fn active_index(&self) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == self.active_tab)
    }

    /// Add a tab, or re-activate it if a tab with the same id is already
    /// open. Idempotent on id: the sequence length and order never change
    /// when the id is already present. In both cases the tab becomes active.
    pub fn add_tab(&mut self, tab: Tab) {
        if self.tabs.iter().any(|t| t.id == tab.id) {
            self.active_tab = tab.id;
            return;
        }
        self.active_tab = tab.id.clone();
        self.tabs.push(tab);
    }

    /// Close the tab with the given id. Closing an unknown id is a no-op.
    ///
    /// When the active tab is closed, selection moves to the last tab of
    /// the remaining sequence (not the neighbor of the removed one), or to
    /// `""` when no tabs remain.
    pub fn remove_tab(&mut self, id: &str) {
        self.tabs.retain(|t| t.id != id);
        if self.active_tab == id {
            self.active_tab = match self.tabs.last() {
                Some(last) => last.id.clone(),
                None => String::new(),
            };
        }
    }

    /// Unconditionally select a tab by id.
    ///
    /// Membership is not verified; passing an unknown id leaves the
    /// registry with a dangling active id, which the renderer resolves to
    /// the not-found view.
    pub fn set_active_tab(&mut self, id: impl Into<String>) {
        self.active_tab = id.into();
    }

    /// Close every tab and clear the selection. Used on logout.
    pub fn clear_tabs(&mut self) {
        self.tabs.clear();
        self.active_tab.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(url: &str) -> Tab {
        Tab::new(url, url.trim_start_matches('/'), Icon::Placeholder)
    }

    #[test]
    fn test_new_registry_is_empty_with_no_selection() {
        let registry = TabRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.active_tab(), "");
    }

    #[test]
    fn test_add_tab_appends_and_activates() {
        let mut registry = TabRegistry::new();
        registry.add_tab(tab("/dashboards"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.active_tab(), "/dashboards");
    }

    #[test]
    fn test_add_tab_is_idempotent_on_id() {
        let mut registry = TabRegistry::new();
        registry.add_tab(tab("/masters/units"));
        registry.add_tab(tab("/masters/commands"));
        registry.add_tab(tab("/masters/units"));

        // Length and order unchanged, selection moved to the existing tab.
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.tabs()[0].id, "/masters/units");
        assert_eq!(registry.tabs()[1].id, "/masters/commands");
        assert_eq!(registry.active_tab(), "/masters/units");
    }

    #[test]
    fn test_add_order_equals_call_order() {
        let mut registry = TabRegistry::new();
        let paths = ["/dashboards", "/masters/vessels", "/reports", "/surveys"];
        for p in paths {
            registry.add_tab(tab(p));
        }
        let got: Vec<&str> = registry.tabs().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(got, paths);
    }

    #[test]
    fn test_remove_active_tab_selects_last_remaining() {
        let mut registry = TabRegistry::new();
        registry.add_tab(tab("/a"));
        registry.add_tab(tab("/b"));
        registry.add_tab(tab("/c"));

        // Remove the middle tab while it is active: the new active tab is
        // the last element of what remains, not a neighbor of the removed.
        registry.set_active_tab("/b");
        registry.remove_tab("/b");
        assert_eq!(registry.active_tab(), "/c");

        registry.remove_tab("/c");
        assert_eq!(registry.active_tab(), "/a");
    }

    #[test]
    fn test_remove_inactive_tab_keeps_selection() {
        let mut registry = TabRegistry::new();
        registry.add_tab(tab("/a"));
        registry.add_tab(tab("/b"));
        registry.set_active_tab("/a");
        registry.remove_tab("/b");
        assert_eq!(registry.active_tab(), "/a");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_only_tab_resets_selection() {
        let mut registry = TabRegistry::new();
        registry.add_tab(tab("/a"));
        registry.remove_tab("/a");
        assert!(registry.is_empty());
        assert_eq!(registry.active_tab(), "");
    }

    #[test]
    fn test_remove_unknown_id_is_a_noop() {
        let mut registry = TabRegistry::new();
        registry.add_tab(tab("/a"));
        registry.remove_tab("/nope");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.active_tab(), "/a");
    }

    #[test]
    fn test_clear_tabs_resets_everything() {
        let mut registry = TabRegistry::new();
        registry.add_tab(tab("/a"));
        registry.add_tab(tab("/b"));
        registry.clear_tabs();
        assert!(registry.is_empty());
        assert_eq!(registry.active_tab(), "");

        // Clearing an already-empty registry is also fine.
        registry.clear_tabs();
        assert!(registry.is_empty());
        assert_eq!(registry.active_tab(), "");
    }

    #[test]
    fn test_set_active_tab_tolerates_unknown_id() {
        let mut registry = TabRegistry::new();
        registry.add_tab(tab("/a"));
        registry.set_active_tab("/ghost");
        assert_eq!(registry.active_tab(), "/ghost");
        assert!(registry.active_index().is_none());
    }
}
