//! aggregate.rs
//!
//! Turns a daily activity profile into lifetime totals.
//!
//! `aggregate` is pure: it never logs, never retries, and the only way it
//! fails is a profile whose eligible daily hours don't fit in one day.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::activity::{ActivityProfile, LifetimeResult};
use crate::age::compute_age;
use crate::eligibility::{eligible_categories, eligible_days};

pub const HOURS_PER_DAY: f64 = 24.0;
const TIGHT_THRESHOLD: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("daily activities add up to {total:.1} hours, more than the 24 hours in a day")]
pub struct OverCapacityError {
    pub total: f64,
}

/// How full the day is for a given profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityLevel {
    Comfortable,
    Tight,
    Exceeded,
}

impl CapacityLevel {
    pub fn of(total: f64) -> Self {
        if total > HOURS_PER_DAY {
            CapacityLevel::Exceeded
        } else if total > TIGHT_THRESHOLD {
            CapacityLevel::Tight
        } else {
            CapacityLevel::Comfortable
        }
    }
}

/// Sum of daily rates for the categories that count at `age`.
pub fn daily_total(profile: &ActivityProfile, age: f64) -> f64 {
    eligible_categories(age).map(|c| profile.rate(c)).sum()
}

pub fn aggregate(
    profile: &ActivityProfile,
    birth: NaiveDateTime,
    now: NaiveDateTime,
) -> Result<LifetimeResult, OverCapacityError> {
    let age = compute_age(birth, now);

    let total = daily_total(profile, age);
    if total > HOURS_PER_DAY {
        return Err(OverCapacityError { total });
    }

    Ok(LifetimeResult::from_fn(|category| {
        profile.rate(category) * eligible_days(category, birth, now, age)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::ActivityCategory::{self, *};
    use chrono::{Duration, NaiveDate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    /// Defaults with learning and screen time trimmed so an adult day fits.
    fn fitting_profile() -> ActivityProfile {
        let mut profile = ActivityProfile::default();
        profile.set_rate(Learning, 0.0);
        profile.set_rate(ScreenTime, 2.0);
        profile
    }

    #[test]
    fn twenty_year_old() {
        let profile = fitting_profile();
        let result = aggregate(&profile, date(2000, 1, 1), date(2020, 1, 1)).unwrap();

        assert_eq!(result.hours(Work), 5844.0);
        assert_eq!(result.hours(Sleep), 58440.0);
        assert_eq!(result.hours(Eating), 1.5 * 7305.0);
        assert_eq!(result.hours(Miscellaneous), 2.0 * 7305.0);
        assert_eq!(result.hours(Learning), 0.0);
        assert_eq!(result.hours(ScreenTime), 2.0 * (17.0 * 365.25));
        assert_eq!(result.hours(Sports), 15.0 * 365.25);
    }

    #[test]
    fn default_profile_overflows_an_adult_day() {
        let profile = ActivityProfile::default();
        let err = aggregate(&profile, date(2000, 1, 1), date(2020, 1, 1)).unwrap_err();
        assert_eq!(err.total, 30.5);
    }

    #[test]
    fn two_year_old_only_accrues_ungated() {
        let profile = ActivityProfile::default();
        let result = aggregate(&profile, date(2018, 1, 1), date(2020, 1, 1)).unwrap();

        for category in [Learning, Sports, Travel, ScreenTime, Work] {
            assert_eq!(result.hours(category), 0.0, "{category:?}");
        }
        for category in [Sleep, Eating, Miscellaneous] {
            assert!(result.hours(category) > 0.0, "{category:?}");
        }
    }

    #[test]
    fn refuses_more_than_a_day() {
        let mut profile = ActivityProfile::default();
        profile.set_rate(Sleep, 12.0);
        profile.set_rate(Eating, 4.0);
        profile.set_rate(Miscellaneous, 6.0);
        profile.set_rate(Learning, 12.0);
        profile.set_rate(Sports, 0.0);
        profile.set_rate(Travel, 0.0);
        profile.set_rate(ScreenTime, 0.0);

        // Eight years old: work isn't counted, the rest are.
        let err = aggregate(&profile, date(2012, 1, 1), date(2020, 1, 1)).unwrap_err();
        assert_eq!(err.total, 34.0);
    }

    #[test]
    fn ineligible_rates_do_not_count_toward_capacity() {
        let mut profile = ActivityProfile::default();
        profile.set_rate(Work, 16.0);
        profile.set_rate(Learning, 12.0);

        // A toddler's profile can hold anything in the gated categories.
        assert!(aggregate(&profile, date(2018, 6, 1), date(2020, 1, 1)).is_ok());
        assert!(aggregate(&profile, date(1980, 1, 1), date(2020, 1, 1)).is_err());
    }

    #[test]
    fn exactly_twenty_four_is_allowed() {
        let mut profile = ActivityProfile::default();
        profile.set_rate(Sleep, 8.0);
        profile.set_rate(Eating, 2.0);
        profile.set_rate(Miscellaneous, 2.0);
        profile.set_rate(Learning, 0.0);
        profile.set_rate(Sports, 1.0);
        profile.set_rate(ScreenTime, 2.0);
        profile.set_rate(Work, 8.0);
        profile.set_rate(Travel, 1.0);

        assert_eq!(daily_total(&profile, 30.0), 24.0);
        assert!(aggregate(&profile, date(1990, 1, 1), date(2020, 1, 1)).is_ok());
    }

    #[test]
    fn identical_inputs_identical_output() {
        let profile = fitting_profile();
        let (birth, now) = (date(1987, 3, 14), date(2024, 11, 2));
        let first = aggregate(&profile, birth, now).unwrap();
        let second = aggregate(&profile, birth, now).unwrap();
        for category in ActivityCategory::ALL {
            assert_eq!(
                first.hours(category).to_bits(),
                second.hours(category).to_bits()
            );
        }
    }

    #[test]
    fn later_now_never_decreases_totals() {
        let mut profile = fitting_profile();
        profile.set_rate(Learning, 0.5);
        let birth = date(2001, 7, 9);

        let mut previous = aggregate(&profile, birth, birth).unwrap();
        let mut now = birth;
        for _ in 0..60 {
            now += Duration::days(137);
            let current = aggregate(&profile, birth, now).unwrap();
            for category in ActivityCategory::ALL {
                assert!(current.hours(category) >= previous.hours(category));
            }
            previous = current;
        }
    }

    #[test]
    fn capacity_levels() {
        assert_eq!(CapacityLevel::of(18.0), CapacityLevel::Comfortable);
        assert_eq!(CapacityLevel::of(20.0), CapacityLevel::Comfortable);
        assert_eq!(CapacityLevel::of(20.5), CapacityLevel::Tight);
        assert_eq!(CapacityLevel::of(24.0), CapacityLevel::Tight);
        assert_eq!(CapacityLevel::of(24.5), CapacityLevel::Exceeded);
    }

    #[test]
    fn error_message_names_total() {
        let err = OverCapacityError { total: 34.0 };
        assert_eq!(
            err.to_string(),
            "daily activities add up to 34.0 hours, more than the 24 hours in a day"
        );
    }
}
