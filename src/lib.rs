//! Activation-time model for a personal reminder app.
//!
//! A reminder's [`ActivationSchedule`] is built from [`Moment`]s and
//! [`Period`]s over a 48-hour [`ClockValue`], so a schedule can stay active
//! past midnight. The `database` module stores reminders with a structured
//! encoding of their schedule.

pub mod database;
pub mod error;
pub mod models;
pub mod utils;

pub use error::{Result, ScheduleError};
pub use models::{
    ActivationSchedule, Cadence, CadenceInstants, Category, ClockValue, Moment, MomentKind,
    MomentSource, MomentsDuringPeriod, NewReminder, Period, PeriodKind, Reminder, ScheduleKind,
    Settings, StorageSettings,
};
