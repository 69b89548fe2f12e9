//! State of the hybrid tab-details control: a disclosure whose summary is a
//! tab strip and whose body holds the absorbed tab panels.

use crate::error::{WidgetError, WidgetResult};
use crate::tabs::{collect_icons, navigate, NavKey, TabDescriptor, TabLabelMode};

/// Outcome of a slot notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotChange {
    /// Labels, icons and hidden flags were taken from the panels; their
    /// content should now be absorbed.
    Captured,
    /// Labels were already captured. Absorbing the panels itself triggers a
    /// second notification, which lands here.
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabDetailsState {
    open: bool,
    selected: usize,
    mode: TabLabelMode,
    tab_labels: Vec<String>,
    tab_icons: Vec<String>,
    hidden_tabs: Vec<String>,
    absorbed: bool,
    ready_emitted: bool,
    first_update_emitted: bool,
}

impl TabDetailsState {
    pub fn new(default_tab: usize, open: bool, mode: TabLabelMode) -> Self {
        Self {
            open,
            selected: default_tab,
            mode,
            tab_labels: Vec::new(),
            tab_icons: Vec::new(),
            hidden_tabs: Vec::new(),
            absorbed: false,
            ready_emitted: false,
            first_update_emitted: false,
        }
    }

    pub fn receive_panels(&mut self, panels: &[TabDescriptor]) -> WidgetResult<SlotChange> {
        if !self.tab_labels.is_empty() {
            return Ok(SlotChange::Ignored);
        }
        let icons = collect_icons(panels)?;
        self.tab_labels = panels.iter().map(|p| p.label.clone()).collect();
        self.tab_icons = icons;
        for panel in panels.iter().filter(|p| p.hidden) {
            self.hide(&panel.label)?;
        }
        Ok(SlotChange::Captured)
    }

    /// Records that panel content now lives under local ids.
    pub fn mark_absorbed(&mut self) {
        self.absorbed = true;
    }

    pub fn is_absorbed(&self) -> bool {
        self.absorbed
    }

    /// True exactly once: on the first render after absorption.
    pub fn take_ready(&mut self) -> bool {
        if self.absorbed && !self.ready_emitted {
            self.ready_emitted = true;
            return true;
        }
        false
    }

    /// True exactly once: on the first render.
    pub fn take_first_update(&mut self) -> bool {
        !std::mem::replace(&mut self.first_update_emitted, true)
    }

    pub fn hide(&mut self, label: &str) -> WidgetResult<()> {
        self.require_label(label)?;
        if !self.is_hidden(label) {
            self.hidden_tabs.push(label.to_string());
        }
        Ok(())
    }

    pub fn show(&mut self, label: &str) -> WidgetResult<()> {
        self.require_label(label)?;
        self.hidden_tabs.retain(|hidden| hidden != label);
        Ok(())
    }

    fn require_label(&self, label: &str) -> WidgetResult<()> {
        if self.tab_labels.iter().any(|l| l == label) {
            Ok(())
        } else {
            Err(WidgetError::UnknownTab {
                label: label.to_string(),
            })
        }
    }

    pub fn is_hidden(&self, label: &str) -> bool {
        self.hidden_tabs.iter().any(|h| h == label)
    }

    pub fn is_tab_hidden(&self, index: usize) -> bool {
        self.tab_labels
            .get(index)
            .is_some_and(|label| self.is_hidden(label))
    }

    pub fn tab_labels(&self) -> &[String] {
        &self.tab_labels
    }

    pub fn hidden_tabs(&self) -> &[String] {
        &self.hidden_tabs
    }

    pub fn icon(&self, index: usize) -> Option<&str> {
        self.tab_icons.get(index).map(String::as_str)
    }

    pub fn mode(&self) -> TabLabelMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: TabLabelMode) {
        self.mode = mode;
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == index
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.tab_labels.len() {
            return false;
        }
        self.selected = index;
        true
    }

    /// Moves selection from tab `from`, wrapping at both ends and stepping
    /// over hidden tabs.
    pub fn navigate_from(&mut self, from: usize, key: NavKey) -> Option<usize> {
        let len = self.tab_labels.len();
        let mut cursor = from;
        for _ in 0..len {
            cursor = navigate(cursor, len, key)?;
            if !self.is_tab_hidden(cursor) {
                self.selected = cursor;
                return Some(cursor);
            }
        }
        None
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Flips the disclosure; returns the new open state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Indexes and labels of the tabs currently in the tablist.
    pub fn visible_tabs(&self) -> Vec<(usize, &str)> {
        self.tab_labels
            .iter()
            .enumerate()
            .filter(|(_, label)| !self.is_hidden(label))
            .map(|(i, label)| (i, label.as_str()))
            .collect()
    }
}

impl Default for TabDetailsState {
    fn default() -> Self {
        Self::new(0, false, TabLabelMode::Labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_panels() -> Vec<TabDescriptor> {
        vec![
            TabDescriptor::new("Tab A"),
            TabDescriptor::new("Tab B"),
            TabDescriptor::new("Tab C"),
            TabDescriptor::new("Tab D").hidden(),
        ]
    }

    #[test]
    fn test_end_to_end_hidden_tab() {
        let mut state = TabDetailsState::default();
        assert_eq!(
            state.receive_panels(&sample_panels()),
            Ok(SlotChange::Captured)
        );
        state.mark_absorbed();
        assert!(state.take_ready());

        assert_eq!(state.tab_labels(), ["Tab A", "Tab B", "Tab C", "Tab D"]);
        assert_eq!(state.hidden_tabs(), ["Tab D"]);
        assert_eq!(
            state.visible_tabs(),
            vec![(0, "Tab A"), (1, "Tab B"), (2, "Tab C")]
        );
        assert!(state.is_tab_hidden(3));

        state.show("Tab D").unwrap();
        assert!(state.hidden_tabs().is_empty());
    }

    #[test]
    fn test_second_slot_change_ignored() {
        let mut state = TabDetailsState::default();
        state.receive_panels(&sample_panels()).unwrap();
        assert_eq!(
            state.receive_panels(&[TabDescriptor::new("Other")]),
            Ok(SlotChange::Ignored)
        );
        assert_eq!(state.tab_labels().len(), 4);
    }

    #[test]
    fn test_hide_show_idempotent() {
        let mut state = TabDetailsState::default();
        state.receive_panels(&sample_panels()).unwrap();

        state.hide("Tab B").unwrap();
        let once = state.clone();
        state.hide("Tab B").unwrap();
        assert_eq!(state, once);

        state.show("Tab B").unwrap();
        assert_eq!(state.hidden_tabs(), ["Tab D"]);
        state.show("Tab A").unwrap();
        assert_eq!(state.hidden_tabs(), ["Tab D"]);
    }

    #[test]
    fn test_unknown_label_rejected() {
        let mut state = TabDetailsState::default();
        state.receive_panels(&sample_panels()).unwrap();
        let err = WidgetError::UnknownTab {
            label: "Tab Z".to_string(),
        };
        assert_eq!(state.hide("Tab Z"), Err(err.clone()));
        assert_eq!(state.show("Tab Z"), Err(err));
    }

    #[test]
    fn test_missing_icon_names_panel() {
        let mut state = TabDetailsState::default();
        let panels = vec![
            TabDescriptor::new("Tab A").with_icon("a.svg"),
            TabDescriptor::new("Tab B"),
        ];
        assert_eq!(
            state.receive_panels(&panels),
            Err(WidgetError::MissingIcon {
                label: "Tab B".to_string()
            })
        );
    }

    #[test]
    fn test_one_time_events() {
        let mut state = TabDetailsState::default();
        assert!(state.take_first_update());
        assert!(!state.take_first_update());

        state.receive_panels(&sample_panels()).unwrap();
        assert!(!state.take_ready());
        state.mark_absorbed();
        assert!(state.take_ready());
        assert!(!state.take_ready());
    }

    #[test]
    fn test_navigation_skips_hidden_tabs() {
        let mut state = TabDetailsState::default();
        state.receive_panels(&sample_panels()).unwrap();

        assert_eq!(state.navigate_from(2, NavKey::Next), Some(0));
        assert_eq!(state.navigate_from(0, NavKey::Previous), Some(2));

        state.show("Tab D").unwrap();
        assert_eq!(state.navigate_from(3, NavKey::Next), Some(0));
        assert_eq!(state.navigate_from(0, NavKey::Previous), Some(3));
        assert_eq!(state.selected(), 3);
    }

    #[test]
    fn test_toggle() {
        let mut state = TabDetailsState::default();
        assert!(state.toggle());
        assert!(state.is_open());
        assert!(!state.toggle());
    }
}
