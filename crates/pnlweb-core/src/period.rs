//! Period presets and date-range resolution
//!
//! Ranges are computed in the zone of the `now` passed in. Request handlers
//! go through [`resolve_now`] / [`resolve_custom_now`], which use the
//! process-local zone; a caller never supplies a zone.

use chrono::{DateTime, Datelike, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};
use pnlweb_config::labels::PeriodLabels;
use serde::{Deserialize, Serialize};

/// Named shorthand for a computed date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PeriodPreset {
    ThisMonth,
    LastMonth,
    ThisQuarter,
    LastQuarter,
    ThisYear,
    LastYear,
    Custom,
}

impl Default for PeriodPreset {
    fn default() -> Self {
        PeriodPreset::ThisMonth
    }
}

impl PeriodPreset {
    /// Display order of the preset picker
    pub const ALL: [PeriodPreset; 7] = [
        PeriodPreset::ThisMonth,
        PeriodPreset::LastMonth,
        PeriodPreset::ThisQuarter,
        PeriodPreset::LastQuarter,
        PeriodPreset::ThisYear,
        PeriodPreset::LastYear,
        PeriodPreset::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodPreset::ThisMonth => "thisMonth",
            PeriodPreset::LastMonth => "lastMonth",
            PeriodPreset::ThisQuarter => "thisQuarter",
            PeriodPreset::LastQuarter => "lastQuarter",
            PeriodPreset::ThisYear => "thisYear",
            PeriodPreset::LastYear => "lastYear",
            PeriodPreset::Custom => "custom",
        }
    }

    /// Parse a query token, treating anything unrecognised as `thisMonth`
    pub fn from_token(token: &str) -> Self {
        token.parse().unwrap_or_default()
    }

    /// Translated label for this preset
    pub fn label<'a>(&self, labels: &'a PeriodLabels) -> &'a str {
        match self {
            PeriodPreset::ThisMonth => &labels.this_month,
            PeriodPreset::LastMonth => &labels.last_month,
            PeriodPreset::ThisQuarter => &labels.this_quarter,
            PeriodPreset::LastQuarter => &labels.last_quarter,
            PeriodPreset::ThisYear => &labels.this_year,
            PeriodPreset::LastYear => &labels.last_year,
            PeriodPreset::Custom => &labels.custom,
        }
    }
}

impl std::str::FromStr for PeriodPreset {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PeriodPreset::ALL
            .into_iter()
            .find(|preset| preset.as_str() == s)
            .ok_or_else(|| format!("Invalid period preset: {}", s))
    }
}

impl std::fmt::Display for PeriodPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved `[start, end]` range, both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRange {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl PeriodRange {
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self { start, end }
    }

    /// Start as unix seconds
    pub fn start_timestamp(&self) -> i64 {
        self.start.timestamp()
    }

    /// End as unix seconds
    pub fn end_timestamp(&self) -> i64 {
        self.end.timestamp()
    }

    pub fn contains(&self, instant: &DateTime<FixedOffset>) -> bool {
        *instant >= self.start && *instant <= self.end
    }

    /// Whether a calendar date overlaps the range, judged in the range's own zone
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start.date_naive() && date <= self.end.date_naive()
    }
}

/// Resolve a preset against `now`.
///
/// `Custom` has no range of its own and resolves as `ThisMonth`; callers
/// overlay the literal dates with [`resolve_custom`].
pub fn resolve<Tz: TimeZone>(preset: PeriodPreset, now: &DateTime<Tz>) -> PeriodRange {
    let tz = now.timezone();
    let this_month = now.year() * 12 + now.month0() as i32;
    let this_quarter = this_month - (now.month0() % 3) as i32;
    let this_year = now.year() * 12;
    let one_second = Duration::seconds(1);

    let start_of = |month_index: i32| month_start(&tz, month_index).unwrap_or_else(|| now.clone());

    let (start, end) = match preset {
        PeriodPreset::LastMonth => (start_of(this_month - 1), start_of(this_month) - one_second),
        PeriodPreset::ThisQuarter => (start_of(this_quarter), now.clone()),
        PeriodPreset::LastQuarter => (start_of(this_quarter - 3), start_of(this_quarter) - one_second),
        PeriodPreset::ThisYear => (start_of(this_year), now.clone()),
        PeriodPreset::LastYear => (start_of(this_year - 12), start_of(this_year) - one_second),
        PeriodPreset::ThisMonth | PeriodPreset::Custom => (start_of(this_month), now.clone()),
    };

    PeriodRange::new(start.fixed_offset(), end.fixed_offset())
}

/// [`resolve`] in the process-local zone
pub fn resolve_now(preset: PeriodPreset) -> PeriodRange {
    resolve(preset, &Local::now())
}

/// Resolve a preset, then overlay literal dates when the preset is `Custom`.
///
/// Each bound is replaced only if it parses; a missing or malformed bound
/// keeps the preset value.
pub fn resolve_custom<Tz: TimeZone>(
    preset: PeriodPreset,
    start: &str,
    end: &str,
    now: &DateTime<Tz>,
) -> PeriodRange {
    let mut range = resolve(preset, now);
    if preset != PeriodPreset::Custom {
        return range;
    }

    let tz = now.timezone();
    if let Some(start) = parse_date_param(start, &tz, DateBound::Start) {
        range.start = start;
    }
    if let Some(end) = parse_date_param(end, &tz, DateBound::End) {
        range.end = end;
    }
    range
}

/// [`resolve_custom`] in the process-local zone
pub fn resolve_custom_now(preset: PeriodPreset, start: &str, end: &str) -> PeriodRange {
    resolve_custom(preset, start, end, &Local::now())
}

/// Which end of a range a date parameter fills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    /// Midnight at the start of the day
    Start,
    /// Last second of the day
    End,
}

/// Parse a `start`/`end` query value.
///
/// Accepts unix seconds (taken literally) or `YYYY-MM-DD` (expanded to the
/// start or end of that day in `tz`).
pub fn parse_date_param<Tz: TimeZone>(
    value: &str,
    tz: &Tz,
    bound: DateBound,
) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(seconds) = value.parse::<i64>() {
        return tz.timestamp_opt(seconds, 0).single().map(|dt| dt.fixed_offset());
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    let naive = match bound {
        DateBound::Start => date.and_hms_opt(0, 0, 0)?,
        DateBound::End => date.and_hms_opt(23, 59, 59)?,
    };
    localize(tz, naive).map(|dt| dt.fixed_offset())
}

/// Local midnight on the first day of `year * 12 + month0`
fn month_start<Tz: TimeZone>(tz: &Tz, month_index: i32) -> Option<DateTime<Tz>> {
    let year = month_index.div_euclid(12);
    let month = month_index.rem_euclid(12) as u32 + 1;
    let midnight = NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)?;
    localize(tz, midnight)
}

/// Map a wall-clock time into `tz`.
///
/// Ambiguous times take the earlier instant; times inside a DST gap move
/// forward to the first wall-clock time that exists.
fn localize<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    (0..=16).find_map(|step| {
        let candidate = naive + Duration::minutes(15 * step);
        tz.from_local_datetime(&candidate).earliest()
    })
}
