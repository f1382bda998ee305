use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::clock::{ClockValue, MINUTES_IN_RANGE};
use super::moment::Moment;
use super::period::Period;
use crate::error::{Result, ScheduleError};

/// Repeat every `step` minutes starting at minute `start` of the clock range.
///
/// Stands in for an explicit moment list; instants are generated on demand
/// within a bounding period and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCadence")]
pub struct Cadence {
    start: i32,
    step: i32,
}

#[derive(Deserialize)]
struct RawCadence {
    start: i32,
    step: i32,
}

impl TryFrom<RawCadence> for Cadence {
    type Error = ScheduleError;

    fn try_from(raw: RawCadence) -> Result<Self> {
        Cadence::new(raw.start, raw.step)
    }
}

impl Cadence {
    pub fn new(start: i32, step: i32) -> Result<Self> {
        if !(0..MINUTES_IN_RANGE).contains(&start) {
            return Err(ScheduleError::Range(format!(
                "cadence start {} not in 0..={}",
                start,
                MINUTES_IN_RANGE - 1
            )));
        }
        if step < 1 {
            return Err(ScheduleError::Range(format!("cadence step {} must be positive", step)));
        }
        Ok(Self { start, step })
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn step(&self) -> i32 {
        self.step
    }

    /// Instants of this cadence inside `[from, until)`, capped at 47:59.
    pub fn instants_between(&self, from: ClockValue, until: i32) -> CadenceInstants {
        let (start, step) = (i64::from(self.start), i64::from(self.step));
        let from = i64::from(from.to_total_minutes());
        let first = if start >= from {
            start
        } else {
            start + (from - start + step - 1) / step * step
        };
        CadenceInstants {
            next: first,
            step,
            end: i64::from(until.min(MINUTES_IN_RANGE)),
        }
    }

    /// Instants inside a time-interval period. Periods anchored at scenes or
    /// occasions have no fixed bounds here and yield `None`.
    pub fn instants_within(&self, period: &Period) -> Option<CadenceInstants> {
        period
            .clock_bounds()
            .map(|(start, end)| self.instants_between(start, end))
    }
}

/// Lazily generated cadence instants.
#[derive(Debug, Clone)]
pub struct CadenceInstants {
    next: i64,
    step: i64,
    end: i64,
}

impl Iterator for CadenceInstants {
    type Item = ClockValue;

    fn next(&mut self) -> Option<ClockValue> {
        if self.next >= self.end {
            return None;
        }
        let current = ClockValue::from_total_minutes(i32::try_from(self.next).ok()?).ok()?;
        // Both operands stay far below i64::MAX.
        self.next += self.step;
        Some(current)
    }
}

/// Where the moments inside a period come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MomentSource {
    Moments(Vec<Moment>),
    Cadence(Cadence),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMomentsDuringPeriod")]
pub struct MomentsDuringPeriod {
    source: MomentSource,
    period: Period,
}

#[derive(Deserialize)]
struct RawMomentsDuringPeriod {
    source: MomentSource,
    period: Period,
}

impl TryFrom<RawMomentsDuringPeriod> for MomentsDuringPeriod {
    type Error = ScheduleError;

    fn try_from(raw: RawMomentsDuringPeriod) -> Result<Self> {
        MomentsDuringPeriod::new(raw.source, raw.period)
    }
}

impl MomentsDuringPeriod {
    pub fn new(source: MomentSource, period: Period) -> Result<Self> {
        if let MomentSource::Moments(moments) = &source {
            if moments.is_empty() {
                return Err(ScheduleError::TypeArgument(format!(
                    "moment list for period '{}' is empty",
                    period
                )));
            }
        }
        Ok(Self { source, period })
    }

    pub fn source(&self) -> &MomentSource {
        &self.source
    }

    pub fn period(&self) -> &Period {
        &self.period
    }

    /// Generated instants when the source is a cadence over a clock interval.
    pub fn cadence_instants(&self) -> Option<CadenceInstants> {
        match &self.source {
            MomentSource::Cadence(cadence) => cadence.instants_within(&self.period),
            MomentSource::Moments(_) => None,
        }
    }

    fn render(&self) -> Value {
        let period = self.period.to_string();
        match &self.source {
            MomentSource::Moments(moments) => json!({
                "moments": render_all(moments),
                "period": period
            }),
            MomentSource::Cadence(cadence) => json!({
                "cadence": { "start": cadence.start(), "step": cadence.step() },
                "period": period
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleKind {
    Moments,
    Periods,
    MomentsDuringPeriods,
    Unset,
}

impl ScheduleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleKind::Moments => "moments",
            ScheduleKind::Periods => "periods",
            ScheduleKind::MomentsDuringPeriods => "moments_during_periods",
            ScheduleKind::Unset => "unset",
        }
    }
}

impl fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When a reminder becomes active:
/// - `Moments`: shows up at each moment, closed by the user.
/// - `Periods`: shown while any period lasts.
/// - `MomentsDuringPeriods`: shows up at moments inside periods, closed by the user.
///
/// An empty payload list is stored as `Unset`, so every unset schedule
/// compares equal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
#[serde(from = "RawSchedule")]
pub enum ActivationSchedule {
    #[default]
    Unset,
    Moments(Vec<Moment>),
    Periods(Vec<Period>),
    MomentsDuringPeriods(Vec<MomentsDuringPeriod>),
}

#[derive(Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
enum RawSchedule {
    Unset,
    Moments(Vec<Moment>),
    Periods(Vec<Period>),
    MomentsDuringPeriods(Vec<MomentsDuringPeriod>),
}

impl From<RawSchedule> for ActivationSchedule {
    fn from(raw: RawSchedule) -> Self {
        match raw {
            RawSchedule::Unset => ActivationSchedule::Unset,
            RawSchedule::Moments(moments) => ActivationSchedule::from_moments(moments),
            RawSchedule::Periods(periods) => ActivationSchedule::from_periods(periods),
            RawSchedule::MomentsDuringPeriods(pairs) => ActivationSchedule::from_pairs(pairs),
        }
    }
}

impl ActivationSchedule {
    pub fn from_moments(moments: Vec<Moment>) -> Self {
        if moments.is_empty() {
            return ActivationSchedule::Unset;
        }
        ActivationSchedule::Moments(moments)
    }

    pub fn from_periods(periods: Vec<Period>) -> Self {
        if periods.is_empty() {
            return ActivationSchedule::Unset;
        }
        ActivationSchedule::Periods(periods)
    }

    fn from_pairs(pairs: Vec<MomentsDuringPeriod>) -> Self {
        if pairs.is_empty() {
            return ActivationSchedule::Unset;
        }
        ActivationSchedule::MomentsDuringPeriods(pairs)
    }

    pub fn from_moments_during_periods(pairs: Vec<(MomentSource, Period)>) -> Result<Self> {
        let pairs = pairs
            .into_iter()
            .map(|(source, period)| MomentsDuringPeriod::new(source, period))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_pairs(pairs))
    }

    pub fn classification(&self) -> ScheduleKind {
        match self {
            ActivationSchedule::Moments(moments) if !moments.is_empty() => ScheduleKind::Moments,
            ActivationSchedule::Periods(periods) if !periods.is_empty() => ScheduleKind::Periods,
            ActivationSchedule::MomentsDuringPeriods(pairs) if !pairs.is_empty() => {
                ScheduleKind::MomentsDuringPeriods
            }
            _ => ScheduleKind::Unset,
        }
    }

    pub fn moments(&self) -> &[Moment] {
        match self {
            ActivationSchedule::Moments(moments) => moments,
            _ => &[],
        }
    }

    pub fn periods(&self) -> &[Period] {
        match self {
            ActivationSchedule::Periods(periods) => periods,
            _ => &[],
        }
    }

    pub fn moments_during_periods(&self) -> &[MomentsDuringPeriod] {
        match self {
            ActivationSchedule::MomentsDuringPeriods(pairs) => pairs,
            _ => &[],
        }
    }

    /// Display document keyed by the classification tag, with every value
    /// rendered to its display string. Not meant to be read back; see
    /// [`ActivationSchedule::encode`] for storage.
    pub fn render_document(&self) -> Value {
        let payload = match self {
            ActivationSchedule::Moments(moments) if !moments.is_empty() => {
                Value::from(render_all(moments))
            }
            ActivationSchedule::Periods(periods) if !periods.is_empty() => {
                Value::from(render_all(periods))
            }
            ActivationSchedule::MomentsDuringPeriods(pairs) if !pairs.is_empty() => {
                Value::Array(pairs.iter().map(MomentsDuringPeriod::render).collect())
            }
            _ => return Value::Null,
        };
        let mut document = Map::new();
        document.insert(self.classification().as_str().to_string(), payload);
        Value::Object(document)
    }

    /// Structured encoding for durable storage.
    pub fn encode(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Reads back an [`ActivationSchedule::encode`] payload, re-validating every value.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| ScheduleError::TypeArgument(e.to_string()))
    }
}

impl fmt::Display for ActivationSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_document())
    }
}

fn render_all<T: ToString>(items: &[T]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}
