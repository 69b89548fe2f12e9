//! Tab registry pieces shared by the simple tab view and the tab-details
//! control: label display modes, tab descriptors and keyboard navigation.

use crate::error::{WidgetError, WidgetResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How a tab renders its icon and label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TabLabelMode {
    #[default]
    Labels,
    Icons,
    IconsLabels,
    IconsCurrentLabel,
}

impl TabLabelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TabLabelMode::Labels => "labels",
            TabLabelMode::Icons => "icons",
            TabLabelMode::IconsLabels => "icons-labels",
            TabLabelMode::IconsCurrentLabel => "icons-current-label",
        }
    }

    /// Per-tab presentation, recomputed on every render.
    pub fn presentation(&self, selected: bool) -> TabPresentation {
        TabPresentation {
            icon_styled: *self != TabLabelMode::Labels,
            label_hidden: match self {
                TabLabelMode::Icons => true,
                TabLabelMode::IconsCurrentLabel => !selected,
                _ => false,
            },
        }
    }
}

impl FromStr for TabLabelMode {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "labels" => Ok(TabLabelMode::Labels),
            "icons" => Ok(TabLabelMode::Icons),
            "icons-labels" => Ok(TabLabelMode::IconsLabels),
            "icons-current-label" => Ok(TabLabelMode::IconsCurrentLabel),
            other => Err(WidgetError::InvalidDescriptor(format!(
                "unknown tab label mode '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabPresentation {
    /// Whether the icon span gets the `icon` class.
    pub icon_styled: bool,
    /// Whether the label span gets the `hidden` class.
    pub label_hidden: bool,
}

/// Label, icon and initial visibility of one tab, as declared by its panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabDescriptor {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub hidden: bool,
}

impl TabDescriptor {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: None,
            hidden: false,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// Icons for a panel set.
///
/// Icons are all-or-nothing: if any panel declares one, every panel must.
/// The error names the first panel without an icon.
pub fn collect_icons(panels: &[TabDescriptor]) -> WidgetResult<Vec<String>> {
    if panels.iter().all(|p| p.icon.is_none()) {
        return Ok(Vec::new());
    }
    panels
        .iter()
        .map(|p| {
            p.icon.clone().ok_or_else(|| WidgetError::MissingIcon {
                label: p.label.clone(),
            })
        })
        .collect()
}

/// Arrow keys that move tab selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Previous,
    Next,
}

impl NavKey {
    /// Maps a `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "ArrowUp" => Some(NavKey::Previous),
            "ArrowRight" | "ArrowDown" => Some(NavKey::Next),
            _ => None,
        }
    }
}

/// Index reached from `current` in a list of `len` tabs, wrapping at both ends.
pub fn navigate(current: usize, len: usize, key: NavKey) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match key {
        NavKey::Previous if current == 0 => len - 1,
        NavKey::Previous => (current - 1).min(len - 1),
        NavKey::Next => (current + 1) % len,
    })
}

pub fn tab_id(index: usize) -> String {
    format!("tab{index}")
}

pub fn panel_id(index: usize) -> String {
    format!("panel{index}")
}
