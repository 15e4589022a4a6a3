use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::constants::{FULL_ROTATIONS, SPIN_DURATION_MS};

/// Where the win pointer sits, relative to the wheel's own rotation:
/// straight up on the canvas.
pub const POINTER_ANGLE: f64 = -PI / 2.0;

/// Response from the spin endpoint. `index` is the winning slice, chosen
/// server-side; the client only animates toward it.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WheelSpinResponse {
    pub offers: Vec<String>,
    pub index: usize,
    pub module: String,
    pub base_price: i64,
    #[serde(default)]
    pub email: Option<String>,
}

/// Current wheel rotation plus the single-flight spin guard.
#[derive(Debug, Clone, Default)]
pub struct WheelState {
    pub angle: f64,
    pub spinning: bool,
}

/// The frozen trajectory of one spin: where it starts, how far it travels
/// and how long it takes. Pure function of elapsed time from there on.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinPlan {
    pub start_angle: f64,
    pub delta: f64,
    pub duration_ms: f64,
}

pub fn slice_width(offer_count: usize) -> f64 {
    2.0 * PI / offer_count as f64
}

/// Slice fill hue in degrees; evenly spaced around the color wheel.
pub fn slice_hue(index: usize, offer_count: usize) -> f64 {
    index as f64 * 360.0 / offer_count as f64
}

/// Ease-out quartic: fast launch, long deceleration.
pub fn ease_out_quart(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(4)
}

impl WheelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plans a spin that lands slice `index` centered under the pointer.
    /// Returns `None` (leaving the state untouched) when a spin is already
    /// running, no offers are loaded, or the index is out of range.
    ///
    /// The current angle is normalized into [0, 2π) first, and the target
    /// gets `FULL_ROTATIONS` extra turns, so the delta is always positive
    /// and the wheel visibly spins no matter where it stopped last time.
    pub fn start_spin(&mut self, offer_count: usize, index: usize) -> Option<SpinPlan> {
        if self.spinning || offer_count == 0 || index >= offer_count {
            return None;
        }
        self.spinning = true;
        self.angle = self.angle.rem_euclid(2.0 * PI);
        let slice = slice_width(offer_count);
        let target =
            FULL_ROTATIONS * 2.0 * PI + POINTER_ANGLE - (index as f64 * slice + slice / 2.0);
        Some(SpinPlan {
            start_angle: self.angle,
            delta: target - self.angle,
            duration_ms: SPIN_DURATION_MS,
        })
    }

    /// Ends the spin: folds the accumulated turns back into [0, 2π) so the
    /// angle stays bounded for any later redraws.
    pub fn finish_spin(&mut self, plan: &SpinPlan) {
        self.angle = plan.final_angle().rem_euclid(2.0 * PI);
        self.spinning = false;
    }
}

impl SpinPlan {
    /// Wheel angle after `elapsed_ms` of animation; clamps at the end so a
    /// late frame cannot overshoot the target.
    pub fn angle_at(&self, elapsed_ms: f64) -> f64 {
        let progress = (elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
        self.start_angle + self.delta * ease_out_quart(progress)
    }

    pub fn is_complete(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.duration_ms
    }

    pub fn final_angle(&self) -> f64 {
        self.start_angle + self.delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_PI: f64 = 2.0 * PI;

    /// Angular distance from slice `index`'s center to the pointer, given a
    /// wheel rotation. Zero (mod 2π) means the slice is centered under it.
    fn pointer_offset(angle: f64, offer_count: usize, index: usize) -> f64 {
        let slice = slice_width(offer_count);
        let center = angle + index as f64 * slice + slice / 2.0;
        let diff = (center - POINTER_ANGLE).rem_euclid(TWO_PI);
        diff.min(TWO_PI - diff)
    }

    #[test]
    fn spin_lands_selected_slice_under_pointer() {
        for offer_count in 1..=12 {
            for index in 0..offer_count {
                let mut wheel = WheelState {
                    angle: 1.37,
                    spinning: false,
                };
                let plan = wheel.start_spin(offer_count, index).unwrap();
                assert!(pointer_offset(plan.final_angle(), offer_count, index) < 1e-9);
            }
        }
    }

    #[test]
    fn landing_is_independent_of_starting_angle() {
        for &start in &[0.0, 0.5, PI, 5.9, 123.456, -7.25] {
            let mut wheel = WheelState {
                angle: start,
                spinning: false,
            };
            let plan = wheel.start_spin(7, 3).unwrap();
            assert!(plan.delta > 0.0);
            assert!(pointer_offset(plan.final_angle(), 7, 3) < 1e-9);
        }
    }

    #[test]
    fn spin_covers_several_full_turns() {
        for &start in &[0.0, 1.0, 6.0] {
            let mut wheel = WheelState {
                angle: start,
                spinning: false,
            };
            let plan = wheel.start_spin(9, 8).unwrap();
            assert!(plan.delta >= 4.0 * TWO_PI);
        }
    }

    #[test]
    fn start_spin_is_a_noop_while_spinning() {
        let mut wheel = WheelState::new();
        let plan = wheel.start_spin(4, 2).unwrap();
        let angle_before = wheel.angle;
        assert!(wheel.start_spin(4, 1).is_none());
        assert!(wheel.spinning);
        assert_eq!(wheel.angle, angle_before);
        wheel.finish_spin(&plan);
        assert!(!wheel.spinning);
    }

    #[test]
    fn start_spin_requires_offers_and_a_valid_index() {
        let mut wheel = WheelState::new();
        assert!(wheel.start_spin(0, 0).is_none());
        assert!(wheel.start_spin(5, 5).is_none());
        assert!(!wheel.spinning);
        assert_eq!(wheel.angle, 0.0);
    }

    #[test]
    fn finish_spin_normalizes_without_moving_the_slice() {
        let mut wheel = WheelState::new();
        let plan = wheel.start_spin(6, 4).unwrap();
        wheel.finish_spin(&plan);
        assert!((0.0..TWO_PI).contains(&wheel.angle));
        assert!(pointer_offset(wheel.angle, 6, 4) < 1e-9);
    }

    #[test]
    fn ease_out_quart_hits_both_endpoints() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        assert!(ease_out_quart(0.5) > 0.5);
    }

    #[test]
    fn angle_advances_monotonically_and_clamps() {
        let mut wheel = WheelState::new();
        let plan = wheel.start_spin(8, 0).unwrap();
        assert_eq!(plan.angle_at(0.0), plan.start_angle);
        let mut previous = plan.start_angle;
        for step in 1..=45 {
            let angle = plan.angle_at(step as f64 * 100.0);
            assert!(angle >= previous);
            previous = angle;
        }
        assert_eq!(plan.angle_at(plan.duration_ms), plan.final_angle());
        assert_eq!(plan.angle_at(plan.duration_ms * 3.0), plan.final_angle());
        assert!(plan.is_complete(plan.duration_ms));
        assert!(!plan.is_complete(plan.duration_ms - 1.0));
    }
}
