//! Page split editor
//!
//! A split divides the page box into regions. Ratios are percentages; a
//! two-way split stores `[first, 100 - first]` and a quadrant split is always
//! `[50, 50, 50, 50]` (horizontal pair then vertical pair).

use crate::constants::PERCENT_MAX;
use crate::types::clamp_finite;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SplitType {
    #[default]
    None,
    /// Regions stacked top and bottom
    Horizontal,
    /// Regions side by side
    Vertical,
    /// Two by two grid
    Quadrant,
}

impl SplitType {
    /// Number of ratio values the split carries
    pub fn arity(self) -> usize {
        match self {
            SplitType::None => 1,
            SplitType::Horizontal | SplitType::Vertical => 2,
            SplitType::Quadrant => 4,
        }
    }

    pub fn is_two_way(self) -> bool {
        matches!(self, SplitType::Horizontal | SplitType::Vertical)
    }
}

/// Ratio used when a split type is chosen with no prior state
pub fn default_ratio(split_type: SplitType) -> Vec<f32> {
    match split_type {
        SplitType::None => vec![PERCENT_MAX],
        SplitType::Horizontal | SplitType::Vertical => two_way_ratio(50.0).to_vec(),
        SplitType::Quadrant => vec![50.0; 4],
    }
}

/// Derive a two-way ratio from its first value
pub fn two_way_ratio(first: f32) -> [f32; 2] {
    let first = clamp_finite(first, 0.0, PERCENT_MAX);
    [first, PERCENT_MAX - first]
}

/// Ratio to use after switching to `split_type`.
///
/// Moving between the two-way kinds keeps the first value, so flipping a
/// 30/70 split from horizontal to vertical stays 30/70.
pub fn ratio_for(split_type: SplitType, previous: &[f32]) -> Vec<f32> {
    match split_type {
        SplitType::Horizontal | SplitType::Vertical if previous.len() == 2 => {
            two_way_ratio(previous[0]).to_vec()
        }
        _ => default_ratio(split_type),
    }
}

/// Bring an arbitrary ratio back in line with the split's arity and sums
pub fn normalize_ratio(split_type: SplitType, ratio: &[f32]) -> Vec<f32> {
    match split_type {
        SplitType::Horizontal | SplitType::Vertical => match ratio.first() {
            Some(&first) => two_way_ratio(first).to_vec(),
            None => default_ratio(split_type),
        },
        SplitType::None | SplitType::Quadrant => default_ratio(split_type),
    }
}

pub(crate) fn validate_ratio(split_type: SplitType, ratio: &[f32]) -> Result<(), String> {
    if ratio.len() != split_type.arity() {
        return Err(format!(
            "{:?} split needs {} ratio values, got {}",
            split_type,
            split_type.arity(),
            ratio.len()
        ));
    }
    if ratio.iter().any(|v| !(0.0..=PERCENT_MAX).contains(v)) {
        return Err("split ratio values must lie in [0, 100]".to_string());
    }
    // Quadrant ratios are two axis pairs; the single-region case is one "pair"
    let sums_ok = ratio
        .chunks(2)
        .all(|axis| (axis.iter().sum::<f32>() - PERCENT_MAX).abs() < 0.01);
    if !sums_ok {
        return Err("split ratio values must sum to 100 per axis".to_string());
    }
    Ok(())
}

/// A region of the page in percentage space (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Regions described by a split, in reading order (row-major)
pub fn split_regions(split_type: SplitType, ratio: &[f32]) -> Vec<Region> {
    let ratio = normalize_ratio(split_type, ratio);
    match split_type {
        SplitType::None => vec![Region {
            x: 0.0,
            y: 0.0,
            width: PERCENT_MAX,
            height: PERCENT_MAX,
        }],
        SplitType::Horizontal => vec![
            Region {
                x: 0.0,
                y: 0.0,
                width: PERCENT_MAX,
                height: ratio[0],
            },
            Region {
                x: 0.0,
                y: ratio[0],
                width: PERCENT_MAX,
                height: ratio[1],
            },
        ],
        SplitType::Vertical => vec![
            Region {
                x: 0.0,
                y: 0.0,
                width: ratio[0],
                height: PERCENT_MAX,
            },
            Region {
                x: ratio[0],
                y: 0.0,
                width: ratio[1],
                height: PERCENT_MAX,
            },
        ],
        SplitType::Quadrant => {
            let (w0, w1, h0, h1) = (ratio[0], ratio[1], ratio[2], ratio[3]);
            vec![
                Region {
                    x: 0.0,
                    y: 0.0,
                    width: w0,
                    height: h0,
                },
                Region {
                    x: w0,
                    y: 0.0,
                    width: w1,
                    height: h0,
                },
                Region {
                    x: 0.0,
                    y: h0,
                    width: w0,
                    height: h1,
                },
                Region {
                    x: w0,
                    y: h0,
                    width: w1,
                    height: h1,
                },
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_way_ratio_clamps_first_value() {
        assert_eq!(two_way_ratio(130.0), [100.0, 0.0]);
        assert_eq!(two_way_ratio(-4.0), [0.0, 100.0]);
        assert_eq!(two_way_ratio(f32::NAN), [0.0, 100.0]);
    }

    #[test]
    fn switching_between_two_way_kinds_keeps_ratio() {
        assert_eq!(ratio_for(SplitType::Vertical, &[30.0, 70.0]), vec![30.0, 70.0]);
        assert_eq!(ratio_for(SplitType::Horizontal, &[50.0; 4]), vec![50.0, 50.0]);
        assert_eq!(ratio_for(SplitType::Quadrant, &[30.0, 70.0]), vec![50.0; 4]);
    }

    #[test]
    fn regions_cover_the_page() {
        for split in [
            SplitType::None,
            SplitType::Horizontal,
            SplitType::Vertical,
            SplitType::Quadrant,
        ] {
            let regions = split_regions(split, &[25.0, 75.0]);
            let area: f32 = regions.iter().map(|r| r.width * r.height).sum();
            assert!((area - 10_000.0).abs() < 0.1, "{:?} area {}", split, area);
        }
    }
}
