//! Slider values: step snapping, thumb ordering, and keyboard/pointer mapping.

use crate::UiError;

/// Steps moved by PageUp/PageDown and Shift+Arrow.
pub const PAGE_STEPS: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
/// One or more ordered thumb values within `[min, max]`.
pub struct SliderState {
    values: Vec<f64>,
    min: f64,
    max: f64,
    step: f64,
    min_steps_between: f64,
}

impl Default for SliderState {
    fn default() -> Self {
        Self {
            values: vec![0.0],
            min: 0.0,
            max: 100.0,
            step: 1.0,
            min_steps_between: 0.0,
        }
    }
}

impl SliderState {
    /// Slider with the given thumbs.
    ///
    /// A non-positive or non-finite `step` falls back to 1. Values are snapped, clamped, and
    /// sorted; an empty list gets a single thumb at `min`.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidParameter`] when `min >= max` or either bound is not finite.
    pub fn new(values: Vec<f64>, min: f64, max: f64, step: f64) -> Result<Self, UiError> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(UiError::invalid(
                "Slider",
                format!("min ({min}) must be less than max ({max})"),
            ));
        }
        let step = if step.is_finite() && step > 0.0 {
            step
        } else {
            1.0
        };
        let mut state = Self {
            values: Vec::new(),
            min,
            max,
            step,
            min_steps_between: 0.0,
        };
        let mut values: Vec<f64> = values
            .into_iter()
            .filter(|value| value.is_finite())
            .map(|value| state.snap(value))
            .collect();
        if values.is_empty() {
            values.push(min);
        }
        values.sort_by(f64::total_cmp);
        state.values = values;
        Ok(state)
    }

    /// Minimum gap between neighbouring thumbs, in steps.
    ///
    /// Thumbs already closer than the gap are pushed apart, toward `max` first and then back
    /// from it when they run out of room.
    pub fn with_min_steps_between(mut self, steps: u32) -> Self {
        self.min_steps_between = f64::from(steps);
        self.spread();
        self
    }

    fn spread(&mut self) {
        let gap = self.min_steps_between * self.step;
        for index in 1..self.values.len() {
            let floor = self.values[index - 1] + gap;
            if self.values[index] < floor {
                self.values[index] = self.snap(floor);
            }
        }
        for index in (0..self.values.len().saturating_sub(1)).rev() {
            let ceiling = self.values[index + 1] - gap;
            if self.values[index] > ceiling {
                self.values[index] = self.snap(ceiling);
            }
        }
    }

    /// Thumb values in ascending order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value of `thumb`.
    pub fn value(&self, thumb: usize) -> Option<f64> {
        self.values.get(thumb).copied()
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Step size.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Rounds `raw` to the nearest step counted from `min`, then clamps.
    pub fn snap(&self, raw: f64) -> f64 {
        let steps = ((raw - self.min) / self.step).round();
        let snapped = self.min + steps * self.step;
        // Trim float noise such as 0.30000000000000004.
        let decimals = step_decimals(self.step);
        let factor = 10f64.powi(decimals);
        ((snapped * factor).round() / factor).clamp(self.min, self.max)
    }

    /// Sets `thumb` to `raw`, snapped and kept between its neighbours.
    ///
    /// Returns whether the stored value changed.
    pub fn set_value(&mut self, thumb: usize, raw: f64) -> bool {
        if thumb >= self.values.len() || !raw.is_finite() {
            return false;
        }
        let gap = self.min_steps_between * self.step;
        let mut value = self.snap(raw);
        if thumb > 0 {
            value = value.max(self.values[thumb - 1] + gap);
        }
        if let Some(next) = self.values.get(thumb + 1) {
            value = value.min(next - gap);
        }
        let value = value.clamp(self.min, self.max);
        if value == self.values[thumb] {
            return false;
        }
        self.values[thumb] = value;
        true
    }

    /// Moves `thumb` by a whole number of steps.
    pub fn step_by(&mut self, thumb: usize, steps: f64) -> bool {
        match self.value(thumb) {
            Some(current) => self.set_value(thumb, current + steps * self.step),
            None => false,
        }
    }

    /// Routes a `KeyboardEvent.key` value. Returns whether the key was consumed.
    pub fn handle_key(&mut self, thumb: usize, key: &str, shift: bool) -> bool {
        let arrow = if shift { PAGE_STEPS } else { 1.0 };
        match key {
            "ArrowRight" | "ArrowUp" => self.step_by(thumb, arrow),
            "ArrowLeft" | "ArrowDown" => self.step_by(thumb, -arrow),
            "PageUp" => self.step_by(thumb, PAGE_STEPS),
            "PageDown" => self.step_by(thumb, -PAGE_STEPS),
            "Home" => self.set_value(thumb, self.min),
            "End" => self.set_value(thumb, self.max),
            _ => return false,
        };
        true
    }

    /// Position of `thumb` as a percentage of the track.
    pub fn percent(&self, thumb: usize) -> f64 {
        self.value(thumb)
            .map_or(0.0, |value| (value - self.min) / (self.max - self.min) * 100.0)
    }

    /// Start and end of the filled range, in percent.
    pub fn range_percent(&self) -> (f64, f64) {
        if self.values.len() == 1 {
            return (0.0, self.percent(0));
        }
        (self.percent(0), self.percent(self.values.len() - 1))
    }

    /// Thumb nearest to `value`.
    ///
    /// When thumbs are stacked on one position, a value above them picks the last one so the
    /// range can be pulled apart.
    pub fn closest_thumb(&self, value: f64) -> usize {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (index, thumb) in self.values.iter().enumerate() {
            let distance = (thumb - value).abs();
            if distance < best_distance || (distance == best_distance && value > *thumb) {
                best = index;
                best_distance = distance;
            }
        }
        best
    }

    /// Unsnapped value at `ratio` (0 to 1) along the track.
    pub fn value_from_ratio(&self, ratio: f64) -> f64 {
        let ratio = if ratio.is_finite() {
            ratio.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.min + ratio * (self.max - self.min)
    }
}

fn step_decimals(step: f64) -> i32 {
    let text = step.to_string();
    text.split_once('.')
        .map_or(0, |(_, fraction)| fraction.len().min(10) as i32)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn inverted_bounds_are_rejected() {
        assert!(matches!(
            SliderState::new(vec![5.0], 10.0, 10.0, 1.0),
            Err(UiError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn construction_snaps_sorts_and_defaults_step() {
        let state = SliderState::new(vec![80.4, 20.6], 0.0, 100.0, 0.0).expect("slider");
        assert_eq!(state.step(), 1.0);
        assert_eq!(state.values(), &[21.0, 80.0]);
        let empty = SliderState::new(Vec::new(), 10.0, 20.0, 1.0).expect("slider");
        assert_eq!(empty.values(), &[10.0]);
    }

    #[test]
    fn snapping_counts_from_min() {
        let state = SliderState::new(vec![0.0], 3.0, 30.0, 5.0).expect("slider");
        assert_eq!(state.snap(9.0), 8.0);
        assert_eq!(state.snap(11.0), 13.0);
        assert_eq!(state.snap(100.0), 30.0);
        let fine = SliderState::new(vec![0.0], 0.0, 1.0, 0.1).expect("slider");
        assert_eq!(fine.snap(0.3), 0.3);
    }

    #[test]
    fn thumbs_cannot_cross() {
        let mut state = SliderState::new(vec![20.0, 60.0], 0.0, 100.0, 1.0)
            .expect("slider")
            .with_min_steps_between(5);
        assert!(state.set_value(0, 90.0));
        assert_eq!(state.values(), &[55.0, 60.0]);
        assert!(!state.set_value(1, 10.0));
        assert_eq!(state.values(), &[55.0, 60.0]);
    }

    #[test]
    fn keyboard_moves_by_step_and_page() {
        let mut state = SliderState::default();
        assert!(state.handle_key(0, "ArrowRight", false));
        assert_eq!(state.value(0), Some(1.0));
        state.handle_key(0, "PageUp", false);
        assert_eq!(state.value(0), Some(11.0));
        state.handle_key(0, "ArrowLeft", true);
        assert_eq!(state.value(0), Some(1.0));
        state.handle_key(0, "End", false);
        assert_eq!(state.value(0), Some(100.0));
        assert!(!state.handle_key(0, "Enter", false));
    }

    #[test]
    fn pointer_mapping_picks_closest_thumb() {
        let state = SliderState::new(vec![20.0, 60.0], 0.0, 200.0, 1.0).expect("slider");
        assert_eq!(state.value_from_ratio(0.25), 50.0);
        assert_eq!(state.value_from_ratio(2.0), 200.0);
        assert_eq!(state.closest_thumb(30.0), 0);
        assert_eq!(state.closest_thumb(50.0), 1);
        assert_eq!(state.closest_thumb(40.0), 0);
        let stacked = SliderState::new(vec![50.0, 50.0], 0.0, 100.0, 1.0).expect("slider");
        assert_eq!(stacked.closest_thumb(70.0), 1);
        assert_eq!(stacked.closest_thumb(30.0), 0);
        assert_eq!(state.percent(1), 30.0);
        assert_eq!(state.range_percent(), (10.0, 30.0));
    }

    #[test]
    fn min_gap_spreads_initial_values() {
        let state = SliderState::new(vec![20.0, 21.0], 0.0, 100.0, 1.0)
            .expect("slider")
            .with_min_steps_between(5);
        assert_eq!(state.values(), &[20.0, 25.0]);

        let crowded = SliderState::new(vec![98.0, 99.0, 100.0], 0.0, 100.0, 1.0)
            .expect("slider")
            .with_min_steps_between(5);
        assert_eq!(crowded.values(), &[90.0, 95.0, 100.0]);
    }
}
