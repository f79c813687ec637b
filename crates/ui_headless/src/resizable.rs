//! Percent-based panel sizes for resizable groups.

use serde::{Deserialize, Serialize};

use crate::roving::Orientation;
use crate::UiError;

/// Percent moved per arrow key press on a handle.
pub const KEYBOARD_STEP: f64 = 10.0;

const EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Size limits for one panel, all in percent of the group.
pub struct PanelConstraints {
    /// Smallest expanded size.
    pub min_size: f64,
    /// Largest size.
    pub max_size: f64,
    /// Initial size; unsized panels share what is left.
    pub default_size: Option<f64>,
    /// Whether dragging far enough below `min_size` collapses the panel.
    pub collapsible: bool,
    /// Size while collapsed.
    pub collapsed_size: f64,
}

impl Default for PanelConstraints {
    fn default() -> Self {
        Self {
            min_size: 0.0,
            max_size: 100.0,
            default_size: None,
            collapsible: false,
            collapsed_size: 0.0,
        }
    }
}

impl PanelConstraints {
    /// Constraints with an initial size.
    pub fn sized(default_size: f64) -> Self {
        Self {
            default_size: Some(default_size),
            ..Self::default()
        }
    }

    /// Sets the minimum size.
    pub fn with_min(mut self, min_size: f64) -> Self {
        self.min_size = min_size;
        self
    }

    /// Sets the maximum size.
    pub fn with_max(mut self, max_size: f64) -> Self {
        self.max_size = max_size;
        self
    }

    /// Makes the panel collapsible down to `collapsed_size`.
    pub fn collapsible(mut self, collapsed_size: f64) -> Self {
        self.collapsible = true;
        self.collapsed_size = collapsed_size;
        self
    }

    fn validate(&self, index: usize) -> Result<(), UiError> {
        let values = [self.min_size, self.max_size, self.collapsed_size];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0 || *v > 100.0) {
            return Err(UiError::invalid(
                "ResizablePanel",
                format!("panel {index} sizes must be within 0..=100"),
            ));
        }
        if self.min_size > self.max_size {
            return Err(UiError::invalid(
                "ResizablePanel",
                format!("panel {index} min size exceeds max size"),
            ));
        }
        if self.collapsible && self.collapsed_size > self.min_size {
            return Err(UiError::invalid(
                "ResizablePanel",
                format!("panel {index} collapsed size exceeds min size"),
            ));
        }
        Ok(())
    }

    /// Size a shrinking panel ends up at for a proposed size.
    fn shrunk(&self, proposed: f64) -> f64 {
        if self.collapsible && proposed < self.min_size / 2.0 {
            self.collapsed_size
        } else {
            proposed.clamp(self.min_size, self.max_size)
        }
    }

    /// Size a growing panel ends up at for a proposed size.
    fn grown(&self, current: f64, proposed: f64) -> f64 {
        let collapsed = self.collapsible && (current - self.collapsed_size).abs() < EPSILON;
        if collapsed && proposed < self.min_size / 2.0 {
            self.collapsed_size
        } else {
            proposed.clamp(self.min_size, self.max_size)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Sizes of the panels in a group, always summing to 100.
pub struct PanelLayout {
    sizes: Vec<f64>,
    constraints: Vec<PanelConstraints>,
    expanded_sizes: Vec<Option<f64>>,
}

impl PanelLayout {
    /// Lays out panels from their constraints.
    ///
    /// Panels without a default size share the remaining space equally. When every panel has
    /// a default size the defaults are scaled to sum to 100.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidParameter`] for an empty group, inconsistent constraints,
    /// minimum sizes that cannot fit, or maximum sizes that cannot fill the group.
    pub fn new(constraints: Vec<PanelConstraints>) -> Result<Self, UiError> {
        if constraints.is_empty() {
            return Err(UiError::invalid(
                "ResizablePanelGroup",
                "at least one panel is required",
            ));
        }
        for (index, constraint) in constraints.iter().enumerate() {
            constraint.validate(index)?;
        }
        let min_total: f64 = constraints.iter().map(|c| c.min_size).sum();
        if min_total > 100.0 + EPSILON {
            return Err(UiError::invalid(
                "ResizablePanelGroup",
                format!("minimum sizes add up to {min_total}%"),
            ));
        }
        let max_total: f64 = constraints.iter().map(|c| c.max_size).sum();
        if max_total < 100.0 - EPSILON {
            return Err(UiError::invalid(
                "ResizablePanelGroup",
                format!("maximum sizes only add up to {max_total}%"),
            ));
        }

        let sized_total: f64 = constraints.iter().filter_map(|c| c.default_size).sum();
        let unsized_count = constraints.iter().filter(|c| c.default_size.is_none()).count();
        let sizes: Vec<f64> = if unsized_count == 0 {
            let scale = if sized_total > EPSILON {
                100.0 / sized_total
            } else {
                0.0
            };
            constraints
                .iter()
                .map(|c| c.default_size.unwrap_or_default() * scale)
                .collect()
        } else {
            let share = (100.0 - sized_total).max(0.0) / unsized_count as f64;
            constraints
                .iter()
                .map(|c| c.default_size.unwrap_or(share))
                .collect()
        };

        let expanded_sizes = vec![None; constraints.len()];
        let mut layout = Self {
            sizes,
            constraints,
            expanded_sizes,
        };
        layout.settle();
        Ok(layout)
    }

    /// Panel sizes in percent.
    pub fn sizes(&self) -> &[f64] {
        &self.sizes
    }

    /// Size of `panel`.
    pub fn size(&self, panel: usize) -> Option<f64> {
        self.sizes.get(panel).copied()
    }

    /// Number of panels.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Whether the layout has no panels. Never true for a constructed layout.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Constraints of `panel`.
    pub fn constraints(&self, panel: usize) -> Option<&PanelConstraints> {
        self.constraints.get(panel)
    }

    /// Whether `panel` is collapsible and at its collapsed size.
    pub fn is_collapsed(&self, panel: usize) -> bool {
        match (self.constraints.get(panel), self.sizes.get(panel)) {
            (Some(c), Some(size)) => {
                c.collapsible && (size - c.collapsed_size).abs() < EPSILON
            }
            _ => false,
        }
    }

    /// Moves `delta` percent across the handle between `handle` and `handle + 1`.
    ///
    /// Positive deltas grow the panel before the handle. Returns whether any size changed.
    pub fn resize_handle(&mut self, handle: usize, delta: f64) -> bool {
        if handle + 1 >= self.sizes.len() || !delta.is_finite() || delta.abs() < EPSILON {
            return false;
        }
        let (grow, shrink) = if delta > 0.0 {
            (handle, handle + 1)
        } else {
            (handle + 1, handle)
        };
        let shrink_limits = self.constraints[shrink];
        let grow_limits = self.constraints[grow];
        let shrink_before = self.sizes[shrink];
        let grow_before = self.sizes[grow];

        let shrink_after = shrink_limits.shrunk(shrink_before - delta.abs());
        let given = shrink_before - shrink_after;
        let grow_after = grow_limits.grown(grow_before, grow_before + given);
        let taken = grow_after - grow_before;
        if taken < EPSILON {
            return false;
        }

        let shrink_after = if (taken - given).abs() < EPSILON {
            shrink_after
        } else {
            let adjusted = shrink_before - taken;
            if (shrink_limits.shrunk(adjusted) - adjusted).abs() >= EPSILON {
                return false;
            }
            adjusted
        };

        if grow_limits.collapsible && self.is_collapsed(grow) {
            self.expanded_sizes[grow] = None;
        }
        if shrink_limits.collapsible
            && (shrink_after - shrink_limits.collapsed_size).abs() < EPSILON
        {
            self.expanded_sizes[shrink] = Some(shrink_before);
        }
        self.sizes[shrink] = shrink_after;
        self.sizes[grow] = grow_after;
        true
    }

    /// Collapses `panel`, handing its space to the next panel (or the previous one for the
    /// last panel).
    pub fn collapse(&mut self, panel: usize) -> bool {
        let Some(limits) = self.constraints.get(panel).copied() else {
            return false;
        };
        if !limits.collapsible || self.is_collapsed(panel) {
            return false;
        }
        let Some(neighbor) = self.neighbor(panel) else {
            return false;
        };
        let freed = self.sizes[panel] - limits.collapsed_size;
        let room = self.constraints[neighbor].max_size - self.sizes[neighbor];
        if room + EPSILON < freed {
            return false;
        }
        self.expanded_sizes[panel] = Some(self.sizes[panel]);
        self.sizes[panel] = limits.collapsed_size;
        self.sizes[neighbor] += freed;
        true
    }

    /// Restores a collapsed panel to its size before collapsing, taking space from its
    /// neighbour.
    pub fn expand(&mut self, panel: usize) -> bool {
        if !self.is_collapsed(panel) {
            return false;
        }
        let Some(neighbor) = self.neighbor(panel) else {
            return false;
        };
        let limits = self.constraints[panel];
        let target = self.expanded_sizes[panel]
            .or(limits.default_size)
            .unwrap_or(limits.min_size)
            .clamp(limits.min_size, limits.max_size);
        let wanted = target - self.sizes[panel];
        let available = self.sizes[neighbor] - self.constraints[neighbor].min_size;
        let taken = wanted.min(available).max(0.0);
        if self.sizes[panel] + taken + EPSILON < limits.min_size || taken < EPSILON {
            return false;
        }
        self.sizes[panel] += taken;
        self.sizes[neighbor] -= taken;
        self.expanded_sizes[panel] = None;
        true
    }

    /// Routes a `KeyboardEvent.key` on a handle. Returns whether the key was consumed.
    ///
    /// Arrow keys along `orientation` move [`KEYBOARD_STEP`] percent, Home/End push the
    /// handle to its extremes, and Enter toggles the panel before the handle.
    pub fn handle_key(&mut self, handle: usize, key: &str, orientation: Orientation) -> bool {
        if handle + 1 >= self.sizes.len() {
            return false;
        }
        let horizontal = orientation != Orientation::Vertical;
        match key {
            "ArrowLeft" if horizontal => {
                self.resize_handle(handle, -KEYBOARD_STEP);
            }
            "ArrowRight" if horizontal => {
                self.resize_handle(handle, KEYBOARD_STEP);
            }
            "ArrowUp" if !horizontal => {
                self.resize_handle(handle, -KEYBOARD_STEP);
            }
            "ArrowDown" if !horizontal => {
                self.resize_handle(handle, KEYBOARD_STEP);
            }
            "Home" => {
                self.resize_handle(handle, -self.sizes[handle]);
            }
            "End" => {
                self.resize_handle(handle, self.sizes[handle + 1]);
            }
            "Enter" => {
                if self.is_collapsed(handle) {
                    self.expand(handle);
                } else {
                    self.collapse(handle);
                }
            }
            _ => return false,
        }
        true
    }

    fn neighbor(&self, panel: usize) -> Option<usize> {
        if panel + 1 < self.sizes.len() {
            Some(panel + 1)
        } else {
            panel.checked_sub(1)
        }
    }

    /// Clamps every panel and pushes the rounding remainder into the last panel that has room.
    fn settle(&mut self) {
        for (size, limits) in self.sizes.iter_mut().zip(&self.constraints) {
            *size = size.clamp(limits.min_size, limits.max_size);
        }
        let mut remainder = 100.0 - self.sizes.iter().sum::<f64>();
        for index in (0..self.sizes.len()).rev() {
            if remainder.abs() < EPSILON {
                break;
            }
            let limits = self.constraints[index];
            let adjusted = (self.sizes[index] + remainder).clamp(limits.min_size, limits.max_size);
            remainder -= adjusted - self.sizes[index];
            self.sizes[index] = adjusted;
        }
    }
}

/// Converts a pointer movement in pixels to a percent delta of the group size.
pub fn delta_from_pointer(delta_px: f64, group_px: f64) -> f64 {
    if group_px <= 0.0 || !group_px.is_finite() || !delta_px.is_finite() {
        return 0.0;
    }
    delta_px / group_px * 100.0
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn approx(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn unsized_panels_share_the_remainder() {
        let layout = PanelLayout::new(vec![
            PanelConstraints::sized(20.0),
            PanelConstraints::default(),
            PanelConstraints::default(),
        ])
        .expect("layout");
        approx(layout.sizes(), &[20.0, 40.0, 40.0]);
    }

    #[test]
    fn fully_sized_defaults_are_scaled() {
        let layout = PanelLayout::new(vec![
            PanelConstraints::sized(30.0),
            PanelConstraints::sized(30.0),
        ])
        .expect("layout");
        approx(layout.sizes(), &[50.0, 50.0]);
    }

    #[test]
    fn impossible_constraints_are_rejected() {
        assert!(PanelLayout::new(Vec::new()).is_err());
        assert!(PanelLayout::new(vec![
            PanelConstraints::default().with_min(60.0),
            PanelConstraints::default().with_min(60.0),
        ])
        .is_err());
        assert!(PanelLayout::new(vec![PanelConstraints::default()
            .with_min(50.0)
            .with_max(40.0)])
        .is_err());
    }

    #[test]
    fn maximums_short_of_the_group_are_rejected() {
        let err = PanelLayout::new(vec![PanelConstraints::default().with_max(30.0); 2])
            .expect_err("maximums cannot fill the group");
        assert!(matches!(err, UiError::InvalidParameter { .. }), "{err:?}");
        assert!(PanelLayout::new(vec![
            PanelConstraints::default().with_max(30.0),
            PanelConstraints::default().with_max(70.0).collapsible(0.0),
        ])
        .is_ok());
    }

    #[test]
    fn resize_honours_min_and_max() {
        let mut layout = PanelLayout::new(vec![
            PanelConstraints::sized(50.0).with_max(60.0),
            PanelConstraints::sized(50.0).with_min(10.0),
        ])
        .expect("layout");
        assert!(layout.resize_handle(0, 25.0));
        approx(layout.sizes(), &[60.0, 40.0]);
        assert!(!layout.resize_handle(0, 5.0));
        assert!(layout.resize_handle(0, -100.0));
        approx(layout.sizes(), &[0.0, 100.0]);
    }

    #[test]
    fn dragging_past_half_min_collapses() {
        let mut layout = PanelLayout::new(vec![
            PanelConstraints::sized(30.0).with_min(20.0).collapsible(0.0),
            PanelConstraints::sized(70.0),
        ])
        .expect("layout");
        assert!(layout.resize_handle(0, -15.0));
        approx(layout.sizes(), &[20.0, 80.0]);
        assert!(layout.resize_handle(0, -12.0));
        approx(layout.sizes(), &[0.0, 100.0]);
        assert!(layout.is_collapsed(0));
        assert!(!layout.resize_handle(0, 5.0));
        assert!(layout.resize_handle(0, 12.0));
        approx(layout.sizes(), &[20.0, 80.0]);
    }

    #[test]
    fn collapse_and_expand_restore_size() {
        let mut layout = PanelLayout::new(vec![
            PanelConstraints::sized(25.0).with_min(10.0).collapsible(0.0),
            PanelConstraints::sized(75.0),
        ])
        .expect("layout");
        assert!(layout.collapse(0));
        approx(layout.sizes(), &[0.0, 100.0]);
        assert!(!layout.collapse(0));
        assert!(layout.expand(0));
        approx(layout.sizes(), &[25.0, 75.0]);
        assert!(!layout.collapse(1));
    }

    #[test]
    fn keyboard_follows_orientation() {
        let mut layout = PanelLayout::new(vec![
            PanelConstraints::default(),
            PanelConstraints::default(),
        ])
        .expect("layout");
        assert!(layout.handle_key(0, "ArrowRight", Orientation::Horizontal));
        approx(layout.sizes(), &[60.0, 40.0]);
        assert!(!layout.handle_key(0, "ArrowDown", Orientation::Horizontal));
        assert!(layout.handle_key(0, "ArrowUp", Orientation::Vertical));
        approx(layout.sizes(), &[50.0, 50.0]);
        assert!(layout.handle_key(0, "End", Orientation::Horizontal));
        approx(layout.sizes(), &[100.0, 0.0]);
    }

    #[test]
    fn pointer_delta_is_relative_to_group() {
        assert_eq!(delta_from_pointer(50.0, 200.0), 25.0);
        assert_eq!(delta_from_pointer(50.0, 0.0), 0.0);
    }
}
