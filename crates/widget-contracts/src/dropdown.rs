use crate::error::{WidgetError, WidgetResult};

/// Selection state of a dropdown.
///
/// With a placeholder the valid range is `[-1, len)`, where `-1` selects the
/// placeholder; without one it is `[0, len)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownState {
    placeholder: Option<String>,
    options: Vec<String>,
    selected: i32,
}

impl DropdownState {
    /// `selected` defaults to the placeholder if there is one, else the
    /// first option.
    pub fn new(options: Vec<String>, placeholder: Option<String>, selected: Option<i32>) -> Self {
        let selected = selected.unwrap_or(if placeholder.is_some() { -1 } else { 0 });
        Self {
            placeholder,
            options,
            selected,
        }
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn min_index(&self) -> i32 {
        if self.placeholder.is_some() {
            -1
        } else {
            0
        }
    }

    pub fn selected_index(&self) -> i32 {
        self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        i32::try_from(index).is_ok_and(|i| i == self.selected)
    }

    pub fn select(&mut self, index: i32) -> WidgetResult<i32> {
        let len = i32::try_from(self.options.len()).unwrap_or(i32::MAX);
        if index < self.min_index() || index >= len {
            return Err(WidgetError::InvalidSelection { index });
        }
        self.selected = index;
        Ok(index)
    }

    /// Option `value` attribute for the option at `index`.
    pub fn option_value(index: usize) -> String {
        format!("opt{index}")
    }

    /// Index for a `<select>` value: `""` is the placeholder (-1), `optN`
    /// is option N.
    pub fn index_for_value(value: &str) -> Option<i32> {
        if value.is_empty() {
            return Some(-1);
        }
        value.strip_prefix("opt")?.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec!["Red".to_string(), "Green".to_string(), "Blue".to_string()]
    }

    #[test]
    fn test_default_selection() {
        assert_eq!(DropdownState::new(options(), None, None).selected_index(), 0);
        let with_placeholder = DropdownState::new(options(), Some("Pick".to_string()), None);
        assert_eq!(with_placeholder.selected_index(), -1);
        assert_eq!(DropdownState::new(options(), None, Some(2)).selected_index(), 2);
    }

    #[test]
    fn test_select_range_without_placeholder() {
        let mut state = DropdownState::new(options(), None, None);
        assert_eq!(
            state.select(-1),
            Err(WidgetError::InvalidSelection { index: -1 })
        );
        assert_eq!(
            state.select(3),
            Err(WidgetError::InvalidSelection { index: 3 })
        );
        for i in 0..3 {
            assert_eq!(state.select(i), Ok(i));
            assert_eq!(state.selected_index(), i);
        }
    }

    #[test]
    fn test_select_placeholder() {
        let mut state = DropdownState::new(options(), Some("Pick".to_string()), Some(1));
        assert_eq!(state.select(-1), Ok(-1));
        assert_eq!(state.selected_index(), -1);
        assert!(state.select(-2).is_err());
    }

    #[test]
    fn test_failed_select_keeps_selection() {
        let mut state = DropdownState::new(options(), None, Some(1));
        assert!(state.select(10).is_err());
        assert_eq!(state.selected_index(), 1);
        assert!(state.is_selected(1));
    }

    #[test]
    fn test_option_values() {
        assert_eq!(DropdownState::option_value(4), "opt4");
        assert_eq!(DropdownState::index_for_value("opt4"), Some(4));
        assert_eq!(DropdownState::index_for_value(""), Some(-1));
        assert_eq!(DropdownState::index_for_value("x"), None);
    }
}
