use thiserror::Error;

pub type WidgetResult<T> = Result<T, WidgetError>;

/// Configuration errors raised by widget operations.
///
/// All of these are fatal to the operation that raised them and are
/// propagated to the host unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    #[error("invalid selection index '{index}'")]
    InvalidSelection { index: i32 },

    #[error("no tab with label '{label}'")]
    UnknownTab { label: String },

    #[error("panel '{label}' icon missing")]
    MissingIcon { label: String },

    #[error("unable to locate tab list")]
    TabListNotFound,

    #[error("panel group element is already set")]
    PanelGroupAlreadySet,

    #[error("radio button '{key}' does not match the icon/plain shape of the group")]
    InconsistentRadioButtons { key: String },

    #[error("duplicate key '{key}'")]
    DuplicateKey { key: String },

    #[error("no button with tag '{tag}'")]
    UnknownButton { tag: String },

    #[error("no field with key '{key}'")]
    UnknownField { key: String },

    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(String),
}

impl From<serde_json::Error> for WidgetError {
    fn from(err: serde_json::Error) -> Self {
        WidgetError::InvalidDescriptor(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = WidgetError::UnknownTab {
            label: "Tab Z".to_string(),
        };
        assert_eq!(err.to_string(), "no tab with label 'Tab Z'");

        let err = WidgetError::MissingIcon {
            label: "Tab B".to_string(),
        };
        assert_eq!(err.to_string(), "panel 'Tab B' icon missing");

        assert_eq!(
            WidgetError::InvalidSelection { index: 7 }.to_string(),
            "invalid selection index '7'"
        );
    }

    #[test]
    fn test_json_errors_become_invalid_descriptor() {
        let err: WidgetError = serde_json::from_str::<Vec<String>>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, WidgetError::InvalidDescriptor(_)));
    }
}
