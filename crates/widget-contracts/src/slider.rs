//! Range input whose committed value is restricted to a sub-range of its
//! track.

/// Slider value and bounds. `min`/`max` define the track; committed values
/// must also lie in `[low_bound, high_bound]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderState {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub low_bound: f64,
    pub high_bound: f64,
    value: f64,
}

impl SliderState {
    /// Missing bounds default to the track ends.
    pub fn new(
        min: f64,
        max: f64,
        step: f64,
        low_bound: Option<f64>,
        high_bound: Option<f64>,
        value: f64,
    ) -> Self {
        Self {
            min,
            max,
            step,
            low_bound: low_bound.unwrap_or(min),
            high_bound: high_bound.unwrap_or(max),
            value,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// Accepts `candidate` if it is inside the bounds; otherwise leaves the
    /// value alone. Returns the accepted value.
    pub fn commit(&mut self, candidate: f64) -> Option<f64> {
        if candidate.is_nan() || candidate < self.low_bound || candidate > self.high_bound {
            return None;
        }
        self.value = candidate;
        Some(candidate)
    }

    pub fn format_label(&self, percent: bool) -> String {
        if percent {
            format!("{}%", (self.value * 100.0).round())
        } else {
            format!("{}", self.value)
        }
    }
}

impl Default for SliderState {
    fn default() -> Self {
        Self::new(0.0, 100.0, 1.0, None, None, 50.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_default_to_track() {
        let state = SliderState::default();
        assert_eq!(state.low_bound, 0.0);
        assert_eq!(state.high_bound, 100.0);
        assert_eq!(state.value(), 50.0);
    }

    #[test]
    fn test_out_of_bounds_commit_is_reverted() {
        let mut state = SliderState::new(0.0, 100.0, 1.0, Some(20.0), Some(80.0), 50.0);
        assert_eq!(state.commit(10.0), None);
        assert_eq!(state.value(), 50.0);
        assert_eq!(state.commit(90.0), None);
        assert_eq!(state.value(), 50.0);
        assert_eq!(state.commit(f64::NAN), None);
        assert_eq!(state.value(), 50.0);
    }

    #[test]
    fn test_in_bounds_commit() {
        let mut state = SliderState::new(0.0, 100.0, 1.0, Some(20.0), Some(80.0), 50.0);
        assert_eq!(state.commit(20.0), Some(20.0));
        assert_eq!(state.commit(80.0), Some(80.0));
        assert_eq!(state.value(), 80.0);
    }

    #[test]
    fn test_labels() {
        let mut state = SliderState::new(0.0, 1.0, 0.01, None, None, 0.255);
        assert_eq!(state.format_label(true), "26%");
        state.set_value(0.5);
        assert_eq!(state.format_label(false), "0.5");
    }
}
