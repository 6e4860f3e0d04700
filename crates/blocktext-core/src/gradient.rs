//! Gradient generation
//!
//! Hue travels around the color wheel in radians while saturation and
//! value move linearly. The hue direction follows these rules, and the
//! exact color sequences produced downstream depend on them:
//!
//! - `from > to`: a gap under π goes forward through `2π - gap`,
//!   otherwise straight back to `to`.
//! - `from < to`: a gap under π goes backward through `gap - 2π`,
//!   otherwise straight forward to `to`.
//! - identical hues do not move.

use std::f64::consts::{PI, TAU};

use crate::color_space::{hex_to_hsv, hsv_rad_to_hsv, hsv_to_hex, hsv_to_hsv_rad, normalize_hex};

fn linear(from: f64, to: f64, n: usize, steps: usize) -> f64 {
    if steps == 0 {
        return to;
    }
    from + n as f64 * ((to - from) / steps as f64)
}

/// Signed distance the hue travels from `from` to `to`
fn hue_delta(from: f64, to: f64) -> f64 {
    if from == to {
        0.0
    } else if from > to {
        if from - to < PI {
            TAU - (from - to)
        } else {
            to - from
        }
    } else if to - from < PI {
        to - from - TAU
    } else {
        to - from
    }
}

fn theta(from: f64, to: f64, n: usize, steps: usize) -> f64 {
    if steps == 0 {
        return to;
    }
    let mut result = from + n as f64 * (hue_delta(from, to) / steps as f64);
    if result < 0.0 {
        result += TAU;
    }
    if result >= TAU {
        result -= TAU;
    }
    result
}

/// Build `steps` colors blending from `from` to `to`.
///
/// The first entry is always `from` and, for two or more steps, the last
/// is `to` (both normalized to `#rrggbb`).
pub fn gradient(from: &str, to: &str, steps: usize) -> Vec<String> {
    match steps {
        0 => return Vec::new(),
        1 => return vec![normalize_hex(from)],
        _ => {}
    }

    let start = hsv_to_hsv_rad(hex_to_hsv(from));
    let end = hsv_to_hsv_rad(hex_to_hsv(to));
    let last = steps - 1;

    (0..steps)
        .map(|n| {
            let mut step = start;
            step.theta = theta(start.theta, end.theta, n, last);
            step.s = linear(start.s, end.s, n, last);
            step.v = linear(start.v, end.v, n, last);
            hsv_to_hex(hsv_rad_to_hsv(step))
        })
        .collect()
}

/// Build `steps` colors that hold `from` for the first half and switch
/// hard to `to` for the second half
pub fn transition(from: &str, to: &str, steps: usize) -> Vec<String> {
    let from = normalize_hex(from);
    let to = normalize_hex(to);
    let switch_at = steps.div_ceil(2);

    (0..steps)
        .map(|n| if n < switch_at { from.clone() } else { to.clone() })
        .collect()
}
