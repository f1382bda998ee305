use std::fmt;

use serde::{Deserialize, Serialize};

use super::clock::{ClockValue, MINUTES_IN_RANGE};
use super::moment::{Moment, OccasionId, SceneId};
use crate::error::{Result, ScheduleError};

/// A time span anchored at a moment.
///
/// Only the five shapes listed in [`PeriodKind`] can be built; the anchor and
/// span are private so a period never changes shape after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod")]
pub struct Period {
    anchor: Moment,
    span: Option<ClockValue>,
}

#[derive(Deserialize)]
struct RawPeriod {
    anchor: Moment,
    span: Option<ClockValue>,
}

impl TryFrom<RawPeriod> for Period {
    type Error = ScheduleError;

    fn try_from(raw: RawPeriod) -> Result<Self> {
        if let (Moment::ClockTime(start), Some(span)) = (raw.anchor, raw.span) {
            return Period::interval(start, None, Some(span));
        }
        let period = Period {
            anchor: raw.anchor,
            span: raw.span,
        };
        period.classification()?;
        Ok(period)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    TimeInterval,
    SceneExtended,
    BareOccasion,
    OccasionStartExtended,
    OccasionEndExtended,
}

impl PeriodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodKind::TimeInterval => "time interval",
            PeriodKind::SceneExtended => "scene-extended",
            PeriodKind::BareOccasion => "bare occasion",
            PeriodKind::OccasionStartExtended => "occasion-start-extended",
            PeriodKind::OccasionEndExtended => "occasion-end-extended",
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Period {
    /// A clock interval starting at `start`, bounded by exactly one of `end`
    /// or `span`. It may run past midnight but not past 47:59.
    pub fn interval(
        start: ClockValue,
        end: Option<ClockValue>,
        span: Option<ClockValue>,
    ) -> Result<Self> {
        let span = match (end, span) {
            (Some(end), None) => {
                if start >= end {
                    return Err(ScheduleError::Order(format!("{} is not before {}", start, end)));
                }
                ClockValue::from_total_minutes(end - start)?
            }
            (None, Some(span)) => {
                if start + span >= MINUTES_IN_RANGE {
                    return Err(ScheduleError::Range(format!(
                        "{} plus {} runs past the end of the clock range",
                        start, span
                    )));
                }
                span
            }
            (Some(_), Some(_)) => {
                return Err(ScheduleError::Argument(
                    "only one of `end` and `span` can be given".to_string(),
                ))
            }
            (None, None) => {
                return Err(ScheduleError::Argument(
                    "either `end` or `span` must be given".to_string(),
                ))
            }
        };

        Ok(Self {
            anchor: Moment::clock_moment(start),
            span: Some(span),
        })
    }

    pub fn occasion(occasion_id: OccasionId) -> Self {
        Self {
            anchor: Moment::occasion_start_moment(occasion_id),
            span: None,
        }
    }

    pub fn scene_extended(scene_id: SceneId, span: ClockValue) -> Self {
        Self {
            anchor: Moment::scene_moment(scene_id),
            span: Some(span),
        }
    }

    pub fn occasion_start_extended(occasion_id: OccasionId, span: ClockValue) -> Self {
        Self {
            anchor: Moment::occasion_start_moment(occasion_id),
            span: Some(span),
        }
    }

    pub fn occasion_end_extended(occasion_id: OccasionId, span: ClockValue) -> Self {
        Self {
            anchor: Moment::occasion_end_moment(occasion_id),
            span: Some(span),
        }
    }

    pub fn anchor(&self) -> &Moment {
        &self.anchor
    }

    pub fn span(&self) -> Option<ClockValue> {
        self.span
    }

    pub fn classification(&self) -> Result<PeriodKind> {
        match (&self.anchor, self.span.is_some()) {
            (Moment::ClockTime(_), true) => Ok(PeriodKind::TimeInterval),
            (Moment::Scene(_), true) => Ok(PeriodKind::SceneExtended),
            (Moment::OccasionStart(_), false) => Ok(PeriodKind::BareOccasion),
            (Moment::OccasionStart(_), true) => Ok(PeriodKind::OccasionStartExtended),
            (Moment::OccasionEnd(_), true) => Ok(PeriodKind::OccasionEndExtended),
            (anchor, false) => Err(ScheduleError::InvalidState(format!(
                "a period anchored at {} needs a span",
                anchor.classification()
            ))),
        }
    }

    /// Start and end (in raw minutes) of a time interval. Periods anchored at
    /// scenes or occasions are resolved at evaluation time and return `None`.
    pub fn clock_bounds(&self) -> Option<(ClockValue, i32)> {
        match (self.anchor, self.span) {
            (Moment::ClockTime(start), Some(span)) => Some((start, start + span)),
            _ => None,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.anchor, &self.span) {
            (Moment::OccasionStart(id), None) => write!(f, "occasion {}", id),
            (anchor, Some(span)) => write!(f, "since {} for {}", anchor, span),
            (anchor, None) => write!(f, "since {}", anchor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(hour: i32, minute: i32) -> ClockValue {
        ClockValue::new(hour, minute).unwrap()
    }

    #[test]
    fn interval_from_end_derives_span() {
        for a in 0..MINUTES_IN_RANGE {
            let start = ClockValue::from_total_minutes(a).unwrap();
            for b in (a + 1)..MINUTES_IN_RANGE {
                let end = ClockValue::from_total_minutes(b).unwrap();
                let period = Period::interval(start, Some(end), None).unwrap();
                assert_eq!(period.span().unwrap().to_total_minutes(), b - a);
                assert_eq!(period.clock_bounds(), Some((start, b)));
            }
        }
        let whole = Period::interval(hm(0, 0), Some(hm(47, 59)), None).unwrap();
        assert_eq!(whole.span(), Some(hm(47, 59)));
        assert_eq!(whole.classification().unwrap(), PeriodKind::TimeInterval);
    }

    #[test]
    fn interval_requires_start_strictly_before_end() {
        let a = hm(10, 0);
        assert!(matches!(Period::interval(a, Some(a), None), Err(ScheduleError::Order(_))));
        assert!(matches!(
            Period::interval(a, Some(hm(9, 59)), None),
            Err(ScheduleError::Order(_))
        ));
    }

    #[test]
    fn interval_needs_exactly_one_bound() {
        let a = hm(10, 0);
        assert!(matches!(Period::interval(a, None, None), Err(ScheduleError::Argument(_))));
        assert!(matches!(
            Period::interval(a, Some(hm(11, 0)), Some(hm(1, 0))),
            Err(ScheduleError::Argument(_))
        ));
    }

    #[test]
    fn interval_span_may_wrap_past_midnight() {
        let period = Period::interval(hm(23, 0), None, Some(hm(2, 0))).unwrap();
        assert_eq!(period.clock_bounds(), Some((hm(23, 0), 1500)));
        assert!(matches!(
            Period::interval(hm(47, 0), None, Some(hm(1, 0))),
            Err(ScheduleError::Range(_))
        ));
        assert!(Period::interval(hm(47, 0), None, Some(hm(0, 59))).is_ok());
    }

    #[test]
    fn classifies_each_shape() {
        assert_eq!(Period::occasion(7).classification().unwrap(), PeriodKind::BareOccasion);
        assert_eq!(Period::occasion(7).classification().unwrap().as_str(), "bare occasion");
        assert_eq!(
            Period::occasion_start_extended(7, hm(1, 0)).classification().unwrap().as_str(),
            "occasion-start-extended"
        );
        assert_eq!(
            Period::occasion_end_extended(7, hm(1, 0)).classification().unwrap(),
            PeriodKind::OccasionEndExtended
        );
        assert_eq!(
            Period::scene_extended(3, hm(0, 30)).classification().unwrap(),
            PeriodKind::SceneExtended
        );
        assert_eq!(Period::occasion(7).clock_bounds(), None);
    }

    #[test]
    fn renders_display_strings() {
        let period = Period::interval(hm(22, 30), None, Some(hm(0, 45))).unwrap();
        assert_eq!(period.to_string(), "since 22:30 for 00:45");
        assert_eq!(Period::occasion(4).to_string(), "occasion 4");
        assert_eq!(
            Period::occasion_end_extended(4, hm(2, 0)).to_string(),
            "since occasion 4 end for 02:00"
        );
        assert_eq!(Period::scene_extended(1, hm(0, 10)).to_string(), "since scene 1 for 00:10");
    }

    #[test]
    fn decoding_rejects_invalid_shapes() {
        let bad = serde_json::json!({"anchor": {"type": "occasion_end", "value": 2}, "span": null});
        let err = serde_json::from_value::<Period>(bad).unwrap_err();
        assert!(err.to_string().contains("needs a span"));

        let past_range = serde_json::json!({
            "anchor": {"type": "clock_time", "value": {"hour": 47, "minute": 0}},
            "span": {"hour": 5, "minute": 0}
        });
        let err = serde_json::from_value::<Period>(past_range).unwrap_err();
        assert!(err.to_string().contains("past the end of the clock range"));

        let last_minute = serde_json::json!({
            "anchor": {"type": "clock_time", "value": {"hour": 47, "minute": 0}},
            "span": {"hour": 0, "minute": 59}
        });
        assert_eq!(
            serde_json::from_value::<Period>(last_minute).unwrap(),
            Period::interval(hm(47, 0), None, Some(hm(0, 59))).unwrap()
        );

        let good = serde_json::to_value(Period::occasion(2)).unwrap();
        assert_eq!(serde_json::from_value::<Period>(good).unwrap(), Period::occasion(2));
    }
}
