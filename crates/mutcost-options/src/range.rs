//! Selectable cost ranges
//!
//! Every adjustable cost is offered as a short, fixed-length list of
//! display strings. The list always contains the baseline value formatted
//! exactly as [`format_cost`] formats it, so a host lookup of the default
//! among the choices never misses.

use std::fmt::Display;

/// Width every cost string is left-padded to
pub const COST_WIDTH: usize = 2;

/// Format a cost the way choices and defaults are displayed (`" 3"`, `"-2"`)
#[inline]
#[must_use]
pub fn format_cost(cost: i32) -> String {
    pad(cost)
}

fn pad(value: impl Display) -> String {
    format!("{value:>width$}", width = COST_WIDTH)
}

/// Derive the selectable values for a baseline cost
///
/// Small costs get hand-picked bands; everything else gets the six values
/// `base-3 ..= base+2`, clamped so a benefit never goes negative and a
/// drawback never goes positive. Clamped duplicates are kept.
///
/// Cost 0 yields six zeros; callers never build a setting from it.
#[must_use]
pub fn derive_range(base_cost: i32) -> Vec<String> {
    match base_cost {
        0 => vec![format_cost(0); 6],
        1 => (0..=3).map(format_cost).collect(),
        2 => (0..=4).map(format_cost).collect(),
        -1 => (-4..=0).map(format_cost).collect(),
        _ => {
            let base = i64::from(base_cost);
            (base - 3..=base + 2)
                .map(|value| if base > 0 { value.max(0) } else { value.min(0) })
                .map(pad)
                .collect()
        }
    }
}
