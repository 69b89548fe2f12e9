//! Radio group descriptors and selection.

use crate::error::{WidgetError, WidgetResult};
use crate::ordered::OrderedMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonDescriptor {
    pub label: String,
    /// Secondary label displayed below the first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_label: Option<String>,
    /// Label `title` attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl ButtonDescriptor {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            sub_label: None,
            title: None,
            icon: None,
        }
    }

    pub fn with_sub_label(mut self, sub_label: impl Into<String>) -> Self {
        self.sub_label = Some(sub_label.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Visual variant of a radio group, fixed by the shape of its descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioVariant {
    /// Native radio input followed by label and sub-label.
    Plain,
    /// Tile with an icon; the input covers the tile invisibly.
    Icon,
}

impl RadioVariant {
    pub fn of(descriptor: &ButtonDescriptor) -> Self {
        if descriptor.icon.is_some() {
            RadioVariant::Icon
        } else {
            RadioVariant::Plain
        }
    }

    pub fn label_class(&self, layout: RadioLayout) -> String {
        match self {
            RadioVariant::Plain => format!("plain layout-{}", layout.as_str()),
            RadioVariant::Icon => "icon".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadioLayout {
    #[default]
    Horiz,
    Compress,
    Vert,
}

impl RadioLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            RadioLayout::Horiz => "horiz",
            RadioLayout::Compress => "compress",
            RadioLayout::Vert => "vert",
        }
    }

    pub fn wrapper_class(&self, wrap: bool) -> String {
        let mut class = format!("wrapper {}", self.as_str());
        if wrap {
            class.push_str(" wrap");
        }
        class
    }
}

impl FromStr for RadioLayout {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horiz" => Ok(RadioLayout::Horiz),
            "compress" => Ok(RadioLayout::Compress),
            "vert" => Ok(RadioLayout::Vert),
            other => Err(WidgetError::InvalidDescriptor(format!(
                "unknown radio layout '{other}'"
            ))),
        }
    }
}

pub type RadioButtons = OrderedMap<ButtonDescriptor>;

#[derive(Debug, Clone, PartialEq)]
pub struct RadioGroupState {
    buttons: RadioButtons,
    variant: RadioVariant,
    selected: Option<String>,
}

impl RadioGroupState {
    /// The first descriptor fixes the variant; every other descriptor must
    /// match it. `selected` defaults to the first key and must name a button.
    pub fn new(buttons: RadioButtons, selected: Option<String>) -> WidgetResult<Self> {
        let variant = buttons
            .first()
            .map(|(_, d)| RadioVariant::of(d))
            .unwrap_or(RadioVariant::Plain);
        if let Some((key, _)) = buttons.iter().find(|(_, d)| RadioVariant::of(d) != variant) {
            return Err(WidgetError::InconsistentRadioButtons {
                key: key.to_string(),
            });
        }
        if let Some(key) = selected.as_deref() {
            if !buttons.contains_key(key) {
                return Err(WidgetError::UnknownButton {
                    tag: key.to_string(),
                });
            }
        }
        let selected = selected.or_else(|| buttons.first().map(|(k, _)| k.to_string()));
        Ok(Self {
            buttons,
            variant,
            selected,
        })
    }

    pub fn from_json(json: &str, selected: Option<String>) -> WidgetResult<Self> {
        Self::new(serde_json::from_str(json)?, selected)
    }

    pub fn buttons(&self) -> &RadioButtons {
        &self.buttons
    }

    pub fn variant(&self) -> RadioVariant {
        self.variant
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_checked(&self, key: &str) -> bool {
        self.selected.as_deref() == Some(key)
    }

    pub fn select(&mut self, key: &str) -> WidgetResult<()> {
        if !self.buttons.contains_key(key) {
            return Err(WidgetError::UnknownButton {
                tag: key.to_string(),
            });
        }
        self.selected = Some(key.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> RadioButtons {
        OrderedMap::from_entries([
            ("small", ButtonDescriptor::new("Small")),
            ("large", ButtonDescriptor::new("Large").with_sub_label("XL")),
        ])
        .unwrap()
    }

    #[test]
    fn test_defaults_to_first_key() {
        let state = RadioGroupState::new(plain(), None).unwrap();
        assert_eq!(state.selected(), Some("small"));
        assert_eq!(state.variant(), RadioVariant::Plain);
        assert!(state.is_checked("small"));
        assert!(!state.is_checked("large"));
    }

    #[test]
    fn test_icon_variant() {
        let buttons = OrderedMap::from_entries([
            ("map", ButtonDescriptor::new("Map").with_icon("map.svg")),
            ("list", ButtonDescriptor::new("List").with_icon("list.svg")),
        ])
        .unwrap();
        let state = RadioGroupState::new(buttons, Some("list".to_string())).unwrap();
        assert_eq!(state.variant(), RadioVariant::Icon);
        assert_eq!(state.selected(), Some("list"));
    }

    #[test]
    fn test_mixed_shapes_rejected() {
        let buttons = OrderedMap::from_entries([
            ("map", ButtonDescriptor::new("Map").with_icon("map.svg")),
            ("list", ButtonDescriptor::new("List")),
        ])
        .unwrap();
        assert_eq!(
            RadioGroupState::new(buttons, None),
            Err(WidgetError::InconsistentRadioButtons {
                key: "list".to_string()
            })
        );
    }

    #[test]
    fn test_initial_selection_must_exist() {
        assert_eq!(
            RadioGroupState::new(plain(), Some("medium".to_string())),
            Err(WidgetError::UnknownButton {
                tag: "medium".to_string()
            })
        );
        let state = RadioGroupState::new(plain(), Some("large".to_string())).unwrap();
        assert!(state.is_checked("large"));
    }

    #[test]
    fn test_select_known_keys_only() {
        let mut state = RadioGroupState::new(plain(), None).unwrap();
        state.select("large").unwrap();
        assert!(state.is_checked("large"));
        assert!(state.select("medium").is_err());
        assert_eq!(state.selected(), Some("large"));
    }

    #[test]
    fn test_from_json_keeps_order() {
        let state = RadioGroupState::from_json(
            r#"{"z":{"label":"Zed","subLabel":"last"},"a":{"label":"Ay","title":"first"}}"#,
            None,
        )
        .unwrap();
        assert_eq!(state.selected(), Some("z"));
        assert_eq!(
            state.buttons().get("z").and_then(|d| d.sub_label.as_deref()),
            Some("last")
        );
    }

    #[test]
    fn test_classes() {
        assert_eq!(
            RadioVariant::Plain.label_class(RadioLayout::Compress),
            "plain layout-compress"
        );
        assert_eq!(RadioVariant::Icon.label_class(RadioLayout::Vert), "icon");
        assert_eq!(RadioLayout::Vert.wrapper_class(true), "wrapper vert wrap");
        assert_eq!("horiz".parse::<RadioLayout>(), Ok(RadioLayout::Horiz));
    }
}
