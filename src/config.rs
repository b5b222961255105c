//! config.rs
//!
//! Turns command-line and file input into the values the calculator trusts:
//! two instants and a profile whose rates sit on their input grid.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, warn};

use crate::activity::{ActivityCategory, ActivityProfile};

pub const PROFILE_ENV: &str = "LIFEHOURS_PROFILE";

const INSTANT_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Birth instant from a `YYYY-MM-DD` date and an `HH:MM` time of day.
pub fn parse_birth(date: &str, time: &str) -> Result<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("invalid birth date `{date}`, expected YYYY-MM-DD"))?;
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .with_context(|| format!("invalid birth time `{time}`, expected HH:MM"))?;
    Ok(date.and_time(time))
}

/// Evaluation instant as `YYYY-MM-DDTHH:MM[:SS]`.
pub fn parse_instant(value: &str) -> Result<NaiveDateTime> {
    INSTANT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .with_context(|| format!("invalid instant `{value}`, expected YYYY-MM-DDTHH:MM"))
}

/// Parses a JSON object of category → hours. Missing categories keep their
/// default rate; unknown keys are an error.
pub fn profile_from_json(json: &str) -> Result<ActivityProfile> {
    let rates: BTreeMap<ActivityCategory, f64> =
        serde_json::from_str(json).context("Failed to parse activity profile")?;

    let mut profile = ActivityProfile::default();
    for (category, rate) in rates {
        profile.set_rate(category, rate);
    }
    Ok(profile)
}

/// `key=hours`, e.g. `screenTime=2.5`.
fn parse_override(arg: &str) -> Result<(ActivityCategory, f64)> {
    let (key, value) = arg
        .split_once('=')
        .with_context(|| format!("invalid override `{arg}`, expected key=hours"))?;
    let category = ActivityCategory::from_key(key.trim())
        .with_context(|| format!("unknown activity `{}`", key.trim()))?;
    let rate: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("invalid hours `{}` for {key}", value.trim()))?;
    Ok((category, rate))
}

/// Puts every rate on its input grid, the way the sliders would.
fn snap_to_ranges(mut profile: ActivityProfile) -> Result<ActivityProfile> {
    for category in ActivityCategory::ALL {
        let rate = profile.rate(category);
        if !rate.is_finite() {
            bail!("{} rate must be a finite number of hours", category.key());
        }

        let range = category.spec().range;
        let snapped = range.snap(rate);
        if snapped == rate {
            continue;
        }
        if range.contains(rate) {
            warn!(
                activity = category.key(),
                requested = rate,
                used = snapped,
                "daily rate rounded to a step of {}",
                range.step
            );
        } else {
            warn!(
                activity = category.key(),
                requested = rate,
                used = snapped,
                "daily rate outside {}-{}",
                range.min,
                range.max
            );
        }
        profile.set_rate(category, snapped);
    }
    Ok(profile)
}

/// Builds the profile: defaults, then the profile file, then `--set` overrides.
pub fn load_profile(path: Option<&Path>, overrides: &[String]) -> Result<ActivityProfile> {
    let mut profile = match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read profile {}", path.display()))?;
            debug!(path = %path.display(), "loaded activity profile");
            profile_from_json(&json).with_context(|| format!("in {}", path.display()))?
        }
        None => ActivityProfile::default(),
    };

    for arg in overrides {
        let (category, rate) = parse_override(arg)?;
        profile.set_rate(category, rate);
    }

    snap_to_ranges(profile)
}
