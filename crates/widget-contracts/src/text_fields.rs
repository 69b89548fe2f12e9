//! A set of labelled text inputs keyed by string.

use crate::error::{WidgetError, WidgetResult};
use crate::ordered::OrderedMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Text,
    Number,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Number => "number",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDescriptor {
    pub label: String,
    #[serde(default, rename = "type")]
    pub kind: InputKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl InputDescriptor {
    pub fn text(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: InputKind::Text,
            value: None,
            placeholder: None,
            size: None,
            min: None,
            max: None,
        }
    }

    pub fn number(label: impl Into<String>) -> Self {
        Self {
            kind: InputKind::Number,
            ..Self::text(label)
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Input id for a field key.
pub fn input_id(key: &str) -> String {
    key.to_lowercase()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextFieldSetState {
    descriptors: OrderedMap<InputDescriptor>,
    values: OrderedMap<String>,
}

impl TextFieldSetState {
    pub fn new(descriptors: OrderedMap<InputDescriptor>) -> Self {
        let mut values = OrderedMap::new();
        for (key, desc) in descriptors.iter() {
            // Keys are already unique in `descriptors`.
            let _ = values.insert(key, desc.value.clone().unwrap_or_default());
        }
        Self {
            descriptors,
            values,
        }
    }

    pub fn from_json(json: &str) -> WidgetResult<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn descriptors(&self) -> &OrderedMap<InputDescriptor> {
        &self.descriptors
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Records what the user typed.
    pub fn edit(&mut self, key: &str, value: impl Into<String>) -> WidgetResult<()> {
        let slot = self
            .values
            .get_mut(key)
            .ok_or_else(|| WidgetError::UnknownField {
                key: key.to_string(),
            })?;
        *slot = value.into();
        Ok(())
    }

    pub fn is_all_fields_set(&self) -> bool {
        self.values.values().all(|v| !v.is_empty())
    }

    pub fn field_values(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    /// Sets several fields at once. Nothing changes if any key is unknown.
    pub fn set_field_values(&mut self, values: &[(String, String)]) -> WidgetResult<()> {
        if let Some((key, _)) = values.iter().find(|(k, _)| !self.values.contains_key(k)) {
            return Err(WidgetError::UnknownField { key: key.clone() });
        }
        for (key, value) in values {
            self.edit(key, value.clone())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> TextFieldSetState {
        TextFieldSetState::from_json(
            r#"{
                "Street": {"label": "Street", "value": "Main"},
                "Zip": {"label": "Zip", "type": "number", "min": 0, "max": 99999}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_all_fields_set() {
        let mut fields = address();
        assert!(!fields.is_all_fields_set());
        fields.edit("Zip", "12345").unwrap();
        assert!(fields.is_all_fields_set());
        fields.edit("Street", "").unwrap();
        assert!(!fields.is_all_fields_set());
    }

    #[test]
    fn test_field_values_in_declared_order() {
        let fields = address();
        assert_eq!(
            fields.field_values(),
            vec![
                ("Street".to_string(), "Main".to_string()),
                ("Zip".to_string(), String::new())
            ]
        );
        assert_eq!(
            fields.descriptors().get("Zip").map(|d| d.kind),
            Some(InputKind::Number)
        );
    }

    #[test]
    fn test_set_field_values_is_all_or_nothing() {
        let mut fields = address();
        let err = fields
            .set_field_values(&[
                ("Zip".to_string(), "1".to_string()),
                ("City".to_string(), "X".to_string()),
            ])
            .unwrap_err();
        assert_eq!(
            err,
            WidgetError::UnknownField {
                key: "City".to_string()
            }
        );
        assert_eq!(fields.value("Zip"), Some(""));

        fields
            .set_field_values(&[("Zip".to_string(), "1".to_string())])
            .unwrap();
        assert_eq!(fields.value("Zip"), Some("1"));
    }

    #[test]
    fn test_input_ids_are_lowercase() {
        assert_eq!(input_id("Street"), "street");
    }
}
