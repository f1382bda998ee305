use std::fmt;

use serde::{Deserialize, Serialize};

use super::clock::ClockValue;
use crate::error::Result;

pub type SceneId = i64;
pub type OccasionId = i64;

/// A point in time a reminder can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Moment {
    Scene(SceneId),
    ClockTime(ClockValue),
    OccasionStart(OccasionId),
    OccasionEnd(OccasionId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentKind {
    Scene,
    ClockTime,
    OccasionStart,
    OccasionEnd,
    /// A moment slot that was never filled in.
    Unset,
}

impl MomentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MomentKind::Scene => "scene",
            MomentKind::ClockTime => "clock time",
            MomentKind::OccasionStart => "occasion start",
            MomentKind::OccasionEnd => "occasion end",
            MomentKind::Unset => "unset",
        }
    }
}

impl fmt::Display for MomentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Moment {
    pub fn scene_moment(scene_id: SceneId) -> Self {
        Moment::Scene(scene_id)
    }

    pub fn clock_moment(value: ClockValue) -> Self {
        Moment::ClockTime(value)
    }

    pub fn clock_moment_at(hour: i32, minute: i32) -> Result<Self> {
        Ok(Moment::ClockTime(ClockValue::new(hour, minute)?))
    }

    pub fn occasion_start_moment(occasion_id: OccasionId) -> Self {
        Moment::OccasionStart(occasion_id)
    }

    pub fn occasion_end_moment(occasion_id: OccasionId) -> Self {
        Moment::OccasionEnd(occasion_id)
    }

    pub fn classification(&self) -> MomentKind {
        match self {
            Moment::Scene(_) => MomentKind::Scene,
            Moment::ClockTime(_) => MomentKind::ClockTime,
            Moment::OccasionStart(_) => MomentKind::OccasionStart,
            Moment::OccasionEnd(_) => MomentKind::OccasionEnd,
        }
    }

    pub fn clock_value(&self) -> Option<ClockValue> {
        match self {
            Moment::ClockTime(value) => Some(*value),
            _ => None,
        }
    }
}

/// Classification of a moment slot that may still be at its default.
pub fn classify_slot(slot: Option<&Moment>) -> MomentKind {
    slot.map(Moment::classification).unwrap_or(MomentKind::Unset)
}

/// Renders a moment slot, `"none"` when it was never filled in.
pub fn display_slot(slot: Option<&Moment>) -> String {
    slot.map(|m| m.to_string()).unwrap_or_else(|| "none".to_string())
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Moment::Scene(id) => write!(f, "scene {}", id),
            Moment::ClockTime(value) => write!(f, "{}", value),
            Moment::OccasionStart(id) => write!(f, "occasion {} start", id),
            Moment::OccasionEnd(id) => write!(f, "occasion {} end", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_each_variant() {
        assert_eq!(Moment::scene_moment(5).classification(), MomentKind::Scene);
        assert_eq!(Moment::scene_moment(5).classification().as_str(), "scene");
        assert_eq!(
            Moment::clock_moment_at(8, 30).unwrap().classification(),
            MomentKind::ClockTime
        );
        assert_eq!(Moment::occasion_start_moment(2).classification(), MomentKind::OccasionStart);
        assert_eq!(Moment::occasion_end_moment(2).classification(), MomentKind::OccasionEnd);
        assert_eq!(classify_slot(None), MomentKind::Unset);
    }

    #[test]
    fn zero_ids_are_not_unset() {
        let moment = Moment::scene_moment(0);
        assert_eq!(classify_slot(Some(&moment)), MomentKind::Scene);
        assert_eq!(moment.to_string(), "scene 0");
        assert_eq!(Moment::occasion_end_moment(0).classification(), MomentKind::OccasionEnd);
    }

    #[test]
    fn equality_is_variant_and_payload() {
        assert_eq!(Moment::scene_moment(5), Moment::scene_moment(5));
        assert_ne!(Moment::scene_moment(5), Moment::scene_moment(6));
        assert_ne!(Moment::occasion_start_moment(3), Moment::occasion_end_moment(3));
        assert_ne!(Moment::scene_moment(3), Moment::occasion_start_moment(3));
    }

    #[test]
    fn renders_display_strings() {
        assert_eq!(Moment::scene_moment(4).to_string(), "scene 4");
        assert_eq!(Moment::clock_moment_at(26, 5).unwrap().to_string(), "26:05");
        assert_eq!(Moment::occasion_start_moment(9).to_string(), "occasion 9 start");
        assert_eq!(Moment::occasion_end_moment(9).to_string(), "occasion 9 end");
        assert_eq!(display_slot(None), "none");
    }

    #[test]
    fn clock_moment_at_validates() {
        assert!(Moment::clock_moment_at(48, 0).is_err());
        assert!(Moment::clock_moment_at(47, 59).is_ok());
    }

    #[test]
    fn encodes_tag_and_payload() {
        let json = serde_json::to_value(Moment::occasion_end_moment(7)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "occasion_end", "value": 7}));
        let back: Moment = serde_json::from_value(json).unwrap();
        assert_eq!(back, Moment::occasion_end_moment(7));
    }
}
