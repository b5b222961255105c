//! report.rs
//!
//! Plain-text views of a calculation: the summary with its "interesting
//! facts", the percentage breakdown, the daily budget and the CSV export.
//!
//! All of these read a finished `LifetimeResult` (through `Stats`); none of
//! them look at eligibility again.

use crate::activity::{ActivityCategory, ActivityProfile, LifetimeResult};
use crate::aggregate::{CapacityLevel, HOURS_PER_DAY, daily_total};
use crate::stats::Stats;
use crate::svg::build_stat_row;

const AVERAGE_LIFESPAN_YEARS: f64 = 79.0;
const BAR_CHARS: usize = 40;
const ROW_WIDTH: usize = 48;

pub const CSV_FILE_NAME: &str = "life_activity_data.csv";

/// Human-readable duration: hours, then days, then years.
///
/// Years here are 365 days, matching how the totals are presented elsewhere.
pub fn format_hours(hours: f64) -> String {
    if hours < 24.0 {
        return format!("{hours:.1} hours");
    }

    let days = (hours / 24.0).floor() as u64;
    let remaining_hours = hours % 24.0;

    if days < 365 {
        return format!("{days} days, {remaining_hours:.1} hours");
    }

    format!("{} years, {} days", days / 365, days % 365)
}

pub fn interesting_facts(result: &LifetimeResult, stats: &Stats, age: f64) -> Vec<String> {
    let mut facts = Vec::new();

    let sleep = result.hours(ActivityCategory::Sleep);
    if sleep > 0.0 {
        facts.push(format!(
            "You've spent approximately {:.1} years sleeping in your life.",
            sleep / 24.0 / 365.0
        ));
    }

    let screen = result.hours(ActivityCategory::ScreenTime);
    if screen > 0.0 && age > 3.0 {
        facts.push(format!(
            "You've spent about {} days looking at screens.",
            (screen / 24.0).floor()
        ));
    }

    let work = result.hours(ActivityCategory::Work);
    let sports = result.hours(ActivityCategory::Sports);
    if work > 0.0 && sports > 0.0 {
        facts.push(format!(
            "For every hour of sports/exercise, you've spent {:.1} hours working.",
            work / sports
        ));
    }

    if let Some((top, pct)) = stats.top() {
        facts.push(format!(
            "Your most time-consuming activity is {}, taking up {pct:.1}% of your tracked time.",
            top.label()
        ));
    }

    facts.push(format!(
        "The {:.1} years you've tracked represents approximately {:.1}% of an average human lifespan.",
        stats.tracked_years,
        stats.tracked_years / AVERAGE_LIFESPAN_YEARS * 100.0
    ));

    facts
}

fn text_row(key: &str, value: &str) -> String {
    let (k, d, v) = build_stat_row(key, value, ROW_WIDTH);
    format!("  {k}{d}{v}\n")
}

fn text_bar(fraction: f64) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * BAR_CHARS as f64).round()) as usize;
    format!("{}{}", "#".repeat(filled), "-".repeat(BAR_CHARS - filled))
}

pub fn summary_view(result: &LifetimeResult, stats: &Stats, age: f64) -> String {
    let mut out = String::from("Your Life in Hours\n\n");

    for &(category, hours) in stats.ranked() {
        out.push_str(&text_row(category.label(), &format_hours(hours)));
    }

    out.push_str("\nInteresting Facts\n");
    for fact in interesting_facts(result, stats, age) {
        out.push_str(&format!("  \u{2022} {fact}\n"));
    }

    out
}

pub fn percentage_view(stats: &Stats, age: f64) -> String {
    let mut out = String::from(
        "Here's how your time is distributed as a percentage of your total tracked time:\n\n",
    );

    for &(category, _) in stats.ranked() {
        let pct = stats.percentage(category);
        out.push_str(&text_row(category.label(), &format!("{pct:.1}%")));
        out.push_str(&format!("  [{}]\n", text_bar(pct / 100.0)));
    }

    out.push_str(&format!(
        "\n{:.0} total hours tracked, which is approximately {:.1} years of your {age:.1} years of life.\n",
        stats.total_hours, stats.tracked_years
    ));
    out
}

/// The inputs offered at `age` and how much of the day they fill.
pub fn budget_view(profile: &ActivityProfile, age: f64) -> String {
    let mut out = format!("Daily activities at age {age:.2}\n\n");

    for category in ActivityCategory::ALL {
        if !category.visible_at(age) {
            continue;
        }
        let range = category.spec().range;
        let value = format!(
            "{}h  ({}-{}, step {})",
            profile.rate(category),
            range.min,
            range.max,
            range.step
        );
        out.push_str(&text_row(category.label(), &value));
    }

    let total = daily_total(profile, age);
    let level = CapacityLevel::of(total);
    let marker = match level {
        CapacityLevel::Comfortable => "ok",
        CapacityLevel::Tight => "tight",
        CapacityLevel::Exceeded => "over",
    };

    out.push_str(&format!(
        "\nTotal daily hours: {total:.1} / 24  [{}] {marker}\n",
        text_bar(total / HOURS_PER_DAY)
    ));
    if level == CapacityLevel::Exceeded {
        out.push_str(
            "Your total daily activities exceed 24 hours. Please adjust your activities to continue.\n",
        );
    }
    out
}

pub fn categories_view() -> String {
    let mut out = String::from("key            label          from age  range        default\n");
    for category in ActivityCategory::ALL {
        let spec = category.spec();
        out.push_str(&format!(
            "{:<14} {:<14} {:<9} {:<12} {}\n",
            spec.key,
            spec.label,
            spec.min_eligible_age,
            format!("{}-{}", spec.range.min, spec.range.max),
            spec.default_rate
        ));
    }
    out
}

pub fn to_csv(result: &LifetimeResult, stats: &Stats) -> String {
    let mut csv = String::from("Activity,Hours,Percentage\n");
    for (category, hours) in result.iter() {
        csv.push_str(&format!(
            "{},{hours:.2},{:.2}%\n",
            category.label(),
            stats.percentage(category)
        ));
    }
    csv
}
