// ABOUTME: Karvonen heart-rate zone classification and zone-to-heart-rate range conversion
// ABOUTME: Shared by compliance inference and workout prescriptions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use morphy_core::models::{HeartRateReference, TrainingZone};
use serde::{Deserialize, Serialize};

use crate::physiological_constants::karvonen;

/// Classify an average heart rate into a Karvonen zone
///
/// Efforts below 50% of reserve are still reported as Z1. Returns
/// [`TrainingZone::None`] when the heart rate is not positive.
#[must_use]
pub fn classify_karvonen(avg_hr: f64, reference: &HeartRateReference) -> TrainingZone {
    if avg_hr <= 0.0 || reference.reserve() == 0 {
        return TrainingZone::None;
    }
    let fraction = reference.reserve_fraction(avg_hr);
    if fraction < karvonen::ZONE2_MIN {
        TrainingZone::Z1
    } else if fraction < karvonen::ZONE3_MIN {
        TrainingZone::Z2
    } else if fraction < karvonen::ZONE4_MIN {
        TrainingZone::Z3
    } else if fraction < karvonen::ZONE5_MIN {
        TrainingZone::Z4
    } else {
        TrainingZone::Z5
    }
}

/// Reserve fraction bounds of a zone, `None` for [`TrainingZone::None`]
#[must_use]
pub const fn zone_bounds(zone: TrainingZone) -> Option<(f64, f64)> {
    match zone {
        TrainingZone::None => None,
        TrainingZone::Z1 => Some((karvonen::ZONE1_MIN, karvonen::ZONE2_MIN)),
        TrainingZone::Z2 => Some((karvonen::ZONE2_MIN, karvonen::ZONE3_MIN)),
        TrainingZone::Z3 => Some((karvonen::ZONE3_MIN, karvonen::ZONE4_MIN)),
        TrainingZone::Z4 => Some((karvonen::ZONE4_MIN, karvonen::ZONE5_MIN)),
        TrainingZone::Z5 => Some((karvonen::ZONE5_MIN, karvonen::ZONE5_MAX)),
    }
}

/// Contiguous range of zones a prescription targets, e.g. `Z1-Z2`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSpan {
    /// Lowest zone in the span
    pub from: TrainingZone,
    /// Highest zone in the span
    pub to: TrainingZone,
}

impl ZoneSpan {
    /// Span covering a single zone
    #[must_use]
    pub const fn single(zone: TrainingZone) -> Self {
        Self {
            from: zone,
            to: zone,
        }
    }

    /// Span covering `from` through `to`
    #[must_use]
    pub const fn range(from: TrainingZone, to: TrainingZone) -> Self {
        Self { from, to }
    }

    /// Label such as `"Z2"` or `"Z1-Z2"`
    #[must_use]
    pub fn label(&self) -> String {
        if self.from == self.to {
            self.from.label().to_owned()
        } else {
            format!("{}-{}", self.from.label(), self.to.label())
        }
    }

    /// Heart-rate range covering the span, via `rest + reserve × pct`
    #[must_use]
    pub fn heart_rate_range(&self, reference: &HeartRateReference) -> Option<HeartRateRange> {
        let (low, _) = zone_bounds(self.from)?;
        let (_, high) = zone_bounds(self.to)?;
        Some(HeartRateRange {
            min_bpm: reference.heart_rate_at(low),
            max_bpm: reference.heart_rate_at(high),
        })
    }
}

impl fmt::Display for ZoneSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Heart-rate window in beats per minute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRateRange {
    /// Lower bound (bpm)
    pub min_bpm: u32,
    /// Upper bound (bpm)
    pub max_bpm: u32,
}

impl fmt::Display for HeartRateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} bpm", self.min_bpm, self.max_bpm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morphy_core::models::AthleteProfile;

    #[test]
    fn test_karvonen_boundaries() {
        let reference = AthleteProfile::new(190, 60).resolve();
        // reserve 130: 60% = 138, 70% = 151, 80% = 164, 90% = 177
        assert_eq!(classify_karvonen(100.0, &reference), TrainingZone::Z1);
        assert_eq!(classify_karvonen(135.0, &reference), TrainingZone::Z1);
        assert_eq!(classify_karvonen(138.0, &reference), TrainingZone::Z2);
        assert_eq!(classify_karvonen(151.0, &reference), TrainingZone::Z3);
        assert_eq!(classify_karvonen(164.0, &reference), TrainingZone::Z4);
        assert_eq!(classify_karvonen(177.0, &reference), TrainingZone::Z5);
        assert_eq!(classify_karvonen(0.0, &reference), TrainingZone::None);
    }

    #[test]
    fn test_span_heart_rate_range() {
        let reference = AthleteProfile::new(190, 60).resolve();
        let span = ZoneSpan::range(TrainingZone::Z1, TrainingZone::Z2);
        let range = span.heart_rate_range(&reference);
        assert_eq!(
            range,
            Some(HeartRateRange {
                min_bpm: 125,
                max_bpm: 151
            })
        );
        assert_eq!(span.label(), "Z1-Z2");
    }
}
