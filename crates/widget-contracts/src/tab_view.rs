//! State for the simple tab view: a tab list driving a panel group.

use crate::error::{WidgetError, WidgetResult};
use crate::tabs::{collect_icons, navigate, NavKey, TabDescriptor};

/// Tab list state shared between a `TabList` and the `TabPanelGroup` it
/// governs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabListState {
    tabs: Vec<String>,
    icons: Vec<String>,
    current: usize,
    tab_list_attached: bool,
    panel_group_attached: bool,
}

impl TabListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that a tab list is mounted. Must happen before the panel
    /// group attaches.
    pub fn attach_tab_list(&mut self) {
        self.tab_list_attached = true;
    }

    pub fn has_tab_list(&self) -> bool {
        self.tab_list_attached
    }

    /// Binds the panel group to the registered tab list. A tab list governs
    /// exactly one group.
    pub fn attach_panel_group(&mut self) -> WidgetResult<()> {
        if !self.tab_list_attached {
            return Err(WidgetError::TabListNotFound);
        }
        if self.panel_group_attached {
            return Err(WidgetError::PanelGroupAlreadySet);
        }
        self.panel_group_attached = true;
        Ok(())
    }

    pub fn has_panel_group(&self) -> bool {
        self.panel_group_attached
    }

    /// Takes labels and icons from the group's panels. The first panel
    /// becomes current whenever the label set changes.
    pub fn set_panels(&mut self, panels: &[TabDescriptor]) -> WidgetResult<()> {
        let icons = collect_icons(panels)?;
        let tabs: Vec<String> = panels.iter().map(|p| p.label.clone()).collect();
        if tabs != self.tabs {
            self.current = 0;
        }
        self.tabs = tabs;
        self.icons = icons;
        Ok(())
    }

    pub fn tabs(&self) -> &[String] {
        &self.tabs
    }

    pub fn icon(&self, index: usize) -> Option<&str> {
        self.icons.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.current == index
    }

    /// Makes `index` the current tab and panel. Out of range indexes are
    /// ignored.
    pub fn activate(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() {
            return false;
        }
        self.current = index;
        true
    }

    /// Moves selection from the tab at `from` in response to an arrow key.
    pub fn navigate_from(&mut self, from: usize, key: NavKey) -> Option<usize> {
        let next = navigate(from, self.tabs.len(), key)?;
        self.current = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<TabDescriptor> {
        names.iter().map(|n| TabDescriptor::new(*n)).collect()
    }

    #[test]
    fn test_panel_group_needs_tab_list() {
        let mut state = TabListState::new();
        assert_eq!(
            state.attach_panel_group(),
            Err(WidgetError::TabListNotFound)
        );
        assert!(!state.has_panel_group());

        state.attach_tab_list();
        assert!(state.has_tab_list());
        assert!(state.attach_panel_group().is_ok());
        assert!(state.has_panel_group());
    }

    #[test]
    fn test_single_panel_group() {
        let mut state = TabListState::new();
        state.attach_tab_list();
        assert!(state.attach_panel_group().is_ok());
        assert_eq!(
            state.attach_panel_group(),
            Err(WidgetError::PanelGroupAlreadySet)
        );
    }

    #[test]
    fn test_label_change_resets_current() {
        let mut state = TabListState::new();
        state.set_panels(&labels(&["One", "Two", "Three"])).unwrap();
        assert!(state.activate(2));
        state.set_panels(&labels(&["One", "Two", "Three"])).unwrap();
        assert_eq!(state.current(), 2);
        state.set_panels(&labels(&["One", "Two"])).unwrap();
        assert_eq!(state.current(), 0);
    }

    #[test]
    fn test_activate_and_navigate() {
        let mut state = TabListState::new();
        state.set_panels(&labels(&["One", "Two", "Three"])).unwrap();
        assert!(!state.activate(3));
        assert_eq!(state.navigate_from(0, NavKey::Previous), Some(2));
        assert!(state.is_selected(2));
        assert_eq!(state.navigate_from(2, NavKey::Next), Some(0));
    }

    #[test]
    fn test_missing_icon_rejected() {
        let mut state = TabListState::new();
        let panels = vec![
            TabDescriptor::new("One").with_icon("one.svg"),
            TabDescriptor::new("Two"),
        ];
        assert_eq!(
            state.set_panels(&panels),
            Err(WidgetError::MissingIcon {
                label: "Two".to_string()
            })
        );
        assert!(state.is_empty());
    }
}
