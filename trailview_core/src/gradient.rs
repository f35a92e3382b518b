//! Velocity-to-color band gradient.
//!
//! Maps a signed longitudinal velocity onto a red -> yellow -> green ramp
//! keyed by a configured maximum: stopped is red, half of `vel_max` is
//! yellow, `vel_max` and above is green. The sign is discarded so reversing
//! segments grade the same as forward ones.

use crate::scene::Color;

/// Solid red: magnitude at or below zero.
pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);

/// Solid yellow: the mid-band anchor at `vel_max / 2`.
pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0, 1.0);

/// Solid green: magnitude at or above `vel_max`.
pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);

/// Map a velocity onto the three-band gradient.
///
/// Total over all finite inputs: non-positive magnitudes map to red,
/// magnitudes above `vel_max` map to green. `vel_max` must be positive;
/// [`crate::ribbon::RibbonConfig::validate`] enforces this before any
/// conversion runs.
pub fn color_for_velocity(vel_max: f64, velocity: f64) -> Color {
    let v = velocity.abs();
    let half = vel_max / 2.0;

    if v > 0.0 && v <= half {
        blend(RED, YELLOW, v / half)
    } else if v > half && v <= vel_max {
        blend(YELLOW, GREEN, (v - half) / (vel_max - half))
    } else if v > vel_max {
        GREEN
    } else {
        RED
    }
}

/// Per-channel affine blend between two colors. Alpha is forced to 1.
fn blend(lo: Color, hi: Color, ratio: f64) -> Color {
    Color {
        r: hi.r * ratio + lo.r * (1.0 - ratio),
        g: hi.g * ratio + lo.g * (1.0 - ratio),
        b: hi.b * ratio + lo.b * (1.0 - ratio),
        a: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_zero_velocity_is_red() {
        assert_eq!(color_for_velocity(8.33, 0.0), RED);
        assert_eq!(color_for_velocity(3.0, 0.0), RED);
    }

    #[test]
    fn test_half_velocity_is_yellow() {
        let c = color_for_velocity(3.0, 1.5);
        assert_relative_eq!(c.r, 1.0, epsilon = 1e-12);
        assert_relative_eq!(c.g, 1.0, epsilon = 1e-12);
        assert_relative_eq!(c.b, 0.0, epsilon = 1e-12);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_max_velocity_is_green() {
        assert_eq!(color_for_velocity(3.0, 3.0), GREEN);
        assert_eq!(color_for_velocity(8.33, 8.33), GREEN);
    }

    #[test]
    fn test_above_max_saturates_to_green() {
        assert_eq!(color_for_velocity(3.0, 6.0), GREEN);
        assert_eq!(color_for_velocity(8.33, 100.0), GREEN);
    }

    #[test]
    fn test_negative_sign_discarded() {
        // -4.165 is exactly half of 8.33: exact yellow.
        assert_eq!(color_for_velocity(8.33, -4.165), YELLOW);
    }

    #[test]
    fn test_quarter_velocity_blends_red_toward_yellow() {
        let c = color_for_velocity(8.0, 2.0);
        assert_relative_eq!(c.r, 1.0, epsilon = 1e-12);
        assert_relative_eq!(c.g, 0.5, epsilon = 1e-12);
        assert_relative_eq!(c.b, 0.0, epsilon = 1e-12);
    }

    proptest! {
        #[test]
        fn prop_red_nonincreasing_green_nondecreasing(
            v1 in 0.0f64..=8.33,
            v2 in 0.0f64..=8.33,
        ) {
            let (lo, hi) = if v1 <= v2 { (v1, v2) } else { (v2, v1) };
            let c_lo = color_for_velocity(8.33, lo);
            let c_hi = color_for_velocity(8.33, hi);
            prop_assert!(c_hi.r <= c_lo.r + 1e-9);
            prop_assert!(c_hi.g + 1e-9 >= c_lo.g);
        }

        #[test]
        fn prop_alpha_always_opaque(v in -50.0f64..50.0) {
            prop_assert_eq!(color_for_velocity(3.0, v).a, 1.0);
        }

        #[test]
        fn prop_channels_stay_in_unit_range(v in -50.0f64..50.0) {
            let c = color_for_velocity(8.33, v);
            for ch in [c.r, c.g, c.b] {
                prop_assert!((0.0..=1.0).contains(&ch));
            }
        }
    }
}
