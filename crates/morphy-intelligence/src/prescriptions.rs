// ABOUTME: Primary and alternative workout prescriptions for every training action
// ABOUTME: Sessions carry duration, zone label, optional heart-rate range and example sets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Workout prescriptions
//!
//! Each action maps to two sessions that hit the same physiological target
//! with a different modality, so an athlete who cannot run today still gets a
//! usable option.

use morphy_core::models::{HeartRateReference, TrainingAction, TrainingZone};
use serde::{Deserialize, Serialize};

use crate::algorithms::zones::{HeartRateRange, ZoneSpan};

/// A concrete session the athlete can do today
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutPrescription {
    /// Short title
    pub title: String,
    /// What the session is for and how it should feel
    pub description: String,
    /// Planned duration in minutes
    pub duration_minutes: u32,
    /// Target zone span label, e.g. `"Z1-Z2"`
    pub intensity: String,
    /// Target heart-rate window, present when the athlete records heart rate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate_range: Option<HeartRateRange>,
    /// Example session structure
    pub sessions: Vec<String>,
}

/// Primary and alternative prescription for one decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrescriptionPair {
    /// Preferred session
    pub primary: WorkoutPrescription,
    /// Same target, different modality
    pub alternative: WorkoutPrescription,
}

struct Template {
    title: &'static str,
    description: &'static str,
    duration_minutes: u32,
    zones: ZoneSpan,
    sessions: &'static [&'static str],
}

impl Template {
    fn render(
        &self,
        reference: Option<&HeartRateReference>,
        duration_scale: f64,
    ) -> WorkoutPrescription {
        let scaled = (f64::from(self.duration_minutes) * duration_scale).round();
        WorkoutPrescription {
            title: self.title.to_owned(),
            description: self.description.to_owned(),
            duration_minutes: scaled.max(10.0) as u32,
            intensity: self.zones.label(),
            heart_rate_range: reference.and_then(|r| self.zones.heart_rate_range(r)),
            sessions: self.sessions.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

const Z1: ZoneSpan = ZoneSpan::single(TrainingZone::Z1);
const Z1_Z2: ZoneSpan = ZoneSpan::range(TrainingZone::Z1, TrainingZone::Z2);
const Z2: ZoneSpan = ZoneSpan::single(TrainingZone::Z2);
const Z2_Z3: ZoneSpan = ZoneSpan::range(TrainingZone::Z2, TrainingZone::Z3);
const Z3: ZoneSpan = ZoneSpan::single(TrainingZone::Z3);
const Z3_Z4: ZoneSpan = ZoneSpan::range(TrainingZone::Z3, TrainingZone::Z4);

const ACTIVE_RECOVERY: [Template; 2] = [
    Template {
        title: "Recovery walk",
        description: "Light movement to keep blood flowing while the load settles.",
        duration_minutes: 25,
        zones: Z1,
        sessions: &["20-30 min relaxed walk", "10 min gentle mobility for hips and calves"],
    },
    Template {
        title: "Mobility and stretching",
        description: "No impact, just range of motion and breathing.",
        duration_minutes: 20,
        zones: Z1,
        sessions: &["10 min foam rolling", "10 min yoga flow or static stretching"],
    },
];

const EASY: [Template; 2] = [
    Template {
        title: "Easy run",
        description: "Conversational pace, keep it comfortably below the usual effort.",
        duration_minutes: 35,
        zones: Z1_Z2,
        sessions: &["30-40 min at conversational pace", "Walk breaks whenever breathing gets heavy"],
    },
    Template {
        title: "Easy spin",
        description: "Low-impact aerobic work on the bike at light resistance.",
        duration_minutes: 45,
        zones: Z1_Z2,
        sessions: &["40-50 min easy spin, cadence 85-95 rpm", "No climbs or surges"],
    },
];

const RECOVERY: [Template; 2] = [
    Template {
        title: "Technique session",
        description: "Short and easy, with the focus on form rather than load.",
        duration_minutes: 30,
        zones: Z1_Z2,
        sessions: &[
            "10 min easy warm-up",
            "4 x 30 s running drills with full recovery",
            "10 min easy jog",
        ],
    },
    Template {
        title: "Easy swim",
        description: "Unloaded aerobic work that lets tired legs recover.",
        duration_minutes: 30,
        zones: Z1,
        sessions: &["400 m easy warm-up", "6 x 50 m technique drills", "200 m easy cool-down"],
    },
];

const QUALITY: [Template; 2] = [
    Template {
        title: "Interval session",
        description: "Fresh legs and solid fitness: a good day for hard efforts.",
        duration_minutes: 55,
        zones: Z3_Z4,
        sessions: &[
            "15 min easy warm-up with strides",
            "5 x 4 min hard with 3 min easy jog",
            "10 min easy cool-down",
        ],
    },
    Template {
        title: "Tempo ride",
        description: "Sustained threshold work on the bike.",
        duration_minutes: 60,
        zones: Z3,
        sessions: &[
            "15 min progressive warm-up",
            "2 x 15 min tempo with 5 min easy",
            "10 min easy cool-down",
        ],
    },
];

const COMEBACK: [Template; 2] = [
    Template {
        title: "Comeback run",
        description: "A moderate session after a few days off; do not chase the missed sessions.",
        duration_minutes: 40,
        zones: Z2_Z3,
        sessions: &["10 min easy start", "25 min steady moderate effort", "5 min easy finish"],
    },
    Template {
        title: "Comeback ride",
        description: "Reintroduce moderate work with low impact.",
        duration_minutes: 50,
        zones: Z2_Z3,
        sessions: &["10 min easy spin", "35 min steady moderate effort", "5 min easy spin"],
    },
];

const MODERATE: [Template; 2] = [
    Template {
        title: "Aerobic run",
        description: "Regular aerobic training, steady and controlled.",
        duration_minutes: 45,
        zones: Z2,
        sessions: &["10 min easy warm-up", "30 min steady aerobic", "5 min cool-down"],
    },
    Template {
        title: "Aerobic ride",
        description: "Same aerobic target on the bike.",
        duration_minutes: 60,
        zones: Z2,
        sessions: &["60 min endurance ride at steady effort"],
    },
];

const STARTER: [Template; 2] = [
    Template {
        title: "Usual training",
        description: "Keep training as you normally do while history builds up.",
        duration_minutes: 40,
        zones: Z2,
        sessions: &["30-45 min at your usual easy effort", "Sync every activity you record"],
    },
    Template {
        title: "Easy cross-training",
        description: "Any low-impact aerobic activity at comfortable effort.",
        duration_minutes: 40,
        zones: Z1_Z2,
        sessions: &["30-45 min bike, swim or brisk walk"],
    },
];

const fn templates_for(action: TrainingAction) -> &'static [Template; 2] {
    match action {
        TrainingAction::ActiveRecovery => &ACTIVE_RECOVERY,
        TrainingAction::Easy => &EASY,
        TrainingAction::Recovery => &RECOVERY,
        TrainingAction::Quality => &QUALITY,
        TrainingAction::Comeback => &COMEBACK,
        TrainingAction::Moderate => &MODERATE,
    }
}

/// Prescriptions for an action
///
/// `reference` is passed only when heart-rate ranges are meaningful for the
/// athlete. `duration_scale` shortens or lengthens both sessions.
#[must_use]
pub fn prescribe(
    action: TrainingAction,
    reference: Option<&HeartRateReference>,
    duration_scale: f64,
) -> PrescriptionPair {
    render_pair(templates_for(action), reference, duration_scale)
}

/// Generic prescriptions for athletes without enough history
#[must_use]
pub fn prescribe_starter(reference: Option<&HeartRateReference>) -> PrescriptionPair {
    render_pair(&STARTER, reference, 1.0)
}

fn render_pair(
    templates: &[Template; 2],
    reference: Option<&HeartRateReference>,
    duration_scale: f64,
) -> PrescriptionPair {
    let [primary, alternative] = templates;
    PrescriptionPair {
        primary: primary.render(reference, duration_scale),
        alternative: alternative.render(reference, duration_scale),
    }
}

/// Optional nutrition tip for an action
#[must_use]
pub const fn nutrition_tip(action: TrainingAction) -> Option<&'static str> {
    match action {
        TrainingAction::ActiveRecovery | TrainingAction::Recovery => {
            Some("Prioritise protein at every meal and keep hydration steady through the day.")
        }
        TrainingAction::Quality => {
            Some("Eat a carbohydrate-rich meal 2-3 hours before the session and refuel within an hour after.")
        }
        TrainingAction::Easy | TrainingAction::Comeback | TrainingAction::Moderate => None,
    }
}

/// Optional recovery tip for an action
#[must_use]
pub const fn recovery_tip(action: TrainingAction) -> Option<&'static str> {
    match action {
        TrainingAction::ActiveRecovery => {
            Some("Aim for 8+ hours of sleep and note any pain that persists beyond a day.")
        }
        TrainingAction::Easy | TrainingAction::Recovery => {
            Some("Add 10 minutes of mobility tonight and keep tomorrow flexible.")
        }
        TrainingAction::Quality => Some("Plan an easy day tomorrow to absorb the session."),
        TrainingAction::Comeback => {
            Some("Expect some stiffness; progress volume gradually over the next week.")
        }
        TrainingAction::Moderate => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morphy_core::models::AthleteProfile;

    #[test]
    fn test_every_action_has_two_sessions() {
        let reference = AthleteProfile::new(190, 60).resolve();
        for action in TrainingAction::ALL {
            let pair = prescribe(action, Some(&reference), 1.0);
            assert!(!pair.primary.sessions.is_empty());
            assert!(!pair.alternative.sessions.is_empty());
            assert_ne!(pair.primary.title, pair.alternative.title);
            assert!(pair.primary.heart_rate_range.is_some());
        }
    }

    #[test]
    fn test_scaling_and_missing_reference() {
        let pair = prescribe(TrainingAction::Moderate, None, 0.75);
        assert_eq!(pair.primary.duration_minutes, 34);
        assert_eq!(pair.primary.heart_rate_range, None);
        assert_eq!(pair.primary.intensity, "Z2");
    }
}
