//! activity.rs
//!
//! The fixed set of life activities and the per-day / per-lifetime values
//! attached to them.
//!
//! Everything category-specific lives in one declarative table
//! (`CategorySpec`): the age at which a category starts accruing, the range an
//! input may take, the default daily rate, and the display label and color.
//! The eligibility gate and the input layer both read from it.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityCategory {
    Sleep,
    Eating,
    Miscellaneous,
    Learning,
    Sports,
    ScreenTime,
    Work,
    Travel,
}

/// Allowed input range for a daily rate, in hours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl RateRange {
    const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Snaps `value` onto the step grid anchored at `min`, then clamps it into
    /// `[min, max]`. This is what a slider does to whatever the user drags to.
    pub fn snap(&self, value: f64) -> f64 {
        let steps = ((value - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub struct CategorySpec {
    pub key: &'static str,
    pub label: &'static str,
    /// Age in years at which hours start to accrue.
    pub min_eligible_age: f64,
    pub range: RateRange,
    pub default_rate: f64,
    pub color: &'static str,
}

// Indexed by `ActivityCategory as usize`.
const TABLE: [CategorySpec; ActivityCategory::COUNT] = [
    CategorySpec {
        key: "sleep",
        label: "Sleep",
        min_eligible_age: 0.0,
        range: RateRange::new(4.0, 12.0, 0.5),
        default_rate: 8.0,
        color: "#4F46E5",
    },
    CategorySpec {
        key: "eating",
        label: "Eating",
        min_eligible_age: 0.0,
        range: RateRange::new(0.5, 4.0, 0.5),
        default_rate: 1.5,
        color: "#EC4899",
    },
    CategorySpec {
        key: "miscellaneous",
        label: "Miscellaneous",
        min_eligible_age: 0.0,
        range: RateRange::new(0.5, 6.0, 0.5),
        default_rate: 2.0,
        color: "#8B5CF6",
    },
    CategorySpec {
        key: "learning",
        label: "Learning",
        min_eligible_age: 5.0,
        range: RateRange::new(0.0, 12.0, 0.5),
        default_rate: 6.0,
        color: "#10B981",
    },
    CategorySpec {
        key: "sports",
        label: "Sports",
        min_eligible_age: 5.0,
        range: RateRange::new(0.0, 6.0, 0.5),
        default_rate: 1.0,
        color: "#F59E0B",
    },
    CategorySpec {
        key: "screenTime",
        label: "Screen Time",
        min_eligible_age: 3.0,
        range: RateRange::new(0.0, 16.0, 0.5),
        default_rate: 3.0,
        color: "#3B82F6",
    },
    CategorySpec {
        key: "work",
        label: "Work",
        min_eligible_age: 18.0,
        range: RateRange::new(0.0, 16.0, 0.5),
        default_rate: 8.0,
        color: "#6366F1",
    },
    CategorySpec {
        key: "travel",
        label: "Travel",
        min_eligible_age: 5.0,
        range: RateRange::new(0.0, 6.0, 0.5),
        default_rate: 1.0,
        color: "#EF4444",
    },
];

impl ActivityCategory {
    pub const COUNT: usize = 8;

    pub const ALL: [ActivityCategory; Self::COUNT] = [
        ActivityCategory::Sleep,
        ActivityCategory::Eating,
        ActivityCategory::Miscellaneous,
        ActivityCategory::Learning,
        ActivityCategory::Sports,
        ActivityCategory::ScreenTime,
        ActivityCategory::Work,
        ActivityCategory::Travel,
    ];

    pub fn spec(self) -> &'static CategorySpec {
        &TABLE[self as usize]
    }

    pub fn key(self) -> &'static str {
        self.spec().key
    }

    pub fn label(self) -> &'static str {
        self.spec().label
    }

    pub fn min_eligible_age(self) -> f64 {
        self.spec().min_eligible_age
    }

    pub fn color(self) -> &'static str {
        self.spec().color
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Whether someone of `age` years has started doing this activity, i.e.
    /// whether its input is offered and its rate counts toward the day.
    pub fn visible_at(self, age: f64) -> bool {
        age >= self.min_eligible_age()
    }
}

/// Hours per day allocated to each category.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityProfile {
    rates: [f64; ActivityCategory::COUNT],
}

impl Default for ActivityProfile {
    fn default() -> Self {
        Self {
            rates: ActivityCategory::ALL.map(|c| c.spec().default_rate),
        }
    }
}

impl ActivityProfile {
    pub fn rate(&self, category: ActivityCategory) -> f64 {
        self.rates[category as usize]
    }

    pub fn set_rate(&mut self, category: ActivityCategory, rate: f64) {
        self.rates[category as usize] = rate;
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActivityCategory, f64)> + '_ {
        ActivityCategory::ALL.into_iter().map(|c| (c, self.rate(c)))
    }
}

/// Total hours accumulated per category over a lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct LifetimeResult {
    hours: [f64; ActivityCategory::COUNT],
}

impl LifetimeResult {
    pub(crate) fn from_fn(mut f: impl FnMut(ActivityCategory) -> f64) -> Self {
        Self {
            hours: ActivityCategory::ALL.map(&mut f),
        }
    }

    pub fn hours(&self, category: ActivityCategory) -> f64 {
        self.hours[category as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActivityCategory, f64)> + '_ {
        ActivityCategory::ALL.into_iter().map(|c| (c, self.hours(c)))
    }
}

impl Serialize for ActivityProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ActivityCategory::COUNT))?;
        for (category, rate) in self.iter() {
            map.serialize_entry(category.key(), &rate)?;
        }
        map.end()
    }
}

impl Serialize for LifetimeResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ActivityCategory::COUNT))?;
        for (category, hours) in self.iter() {
            map.serialize_entry(category.key(), &hours)?;
        }
        map.end()
    }
}
