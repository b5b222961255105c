//! age.rs
//!
//! Elapsed-time conversions between two local instants.
//!
//! Two different units are in play and both are kept on purpose:
//!   • age in years uses the Julian year (365.25 days), no leap-year counting
//!   • days alive uses plain 24h days
//!
//! The eligibility gate mixes the two, so lifetime totals depend on this exact
//! pairing.

use chrono::NaiveDateTime;

const MS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;
pub const DAYS_PER_YEAR: f64 = 365.25;

fn elapsed_ms(birth: NaiveDateTime, now: NaiveDateTime) -> f64 {
    (now - birth).num_milliseconds() as f64
}

/// Fractional age in years. Negative if `now` is before `birth`.
pub fn compute_age(birth: NaiveDateTime, now: NaiveDateTime) -> f64 {
    elapsed_ms(birth, now) / (MS_PER_DAY * DAYS_PER_YEAR)
}

/// Days between `birth` and `now`, counted in 24h days.
pub fn total_days_alive(birth: NaiveDateTime, now: NaiveDateTime) -> f64 {
    elapsed_ms(birth, now) / MS_PER_DAY
}
