use chrono::NaiveDateTime;

use crate::activity::ActivityCategory;
use crate::age::{DAYS_PER_YEAR, total_days_alive};

/// Number of days during which `category` has been accruing hours.
///
/// Categories open from birth get the full lifetime. Gated ones get the time
/// since their start age, capped at the lifetime so the year-based age can't
/// yield more days than were actually lived.
pub fn eligible_days(
    category: ActivityCategory,
    birth: NaiveDateTime,
    now: NaiveDateTime,
    age: f64,
) -> f64 {
    let start_age = category.min_eligible_age();
    let days_alive = total_days_alive(birth, now);

    if start_age == 0.0 {
        return days_alive;
    }
    if age < start_age {
        return 0.0;
    }

    let days_since_eligible = (age - start_age) * DAYS_PER_YEAR;
    days_alive.min(days_since_eligible)
}

/// Categories whose daily rate counts at `age`.
pub fn eligible_categories(age: f64) -> impl Iterator<Item = ActivityCategory> {
    ActivityCategory::ALL
        .into_iter()
        .filter(move |c| c.visible_at(age))
}
