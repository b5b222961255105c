use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, warn};

use crate::activity::{ActivityProfile, LifetimeResult};
use crate::aggregate::{aggregate, daily_total};
use crate::age::compute_age;
use crate::cmd::{PersonArgs, View};
use crate::report;
use crate::stats::Stats;
use crate::svg::{self, Theme};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    birth: String,
    evaluated_at: String,
    age_years: f64,
    daily_rates: &'a ActivityProfile,
    daily_hours: f64,
    total_hours: f64,
    hours: &'a LifetimeResult,
}

pub struct Outputs<'a> {
    pub view: View,
    pub json: bool,
    pub csv: Option<&'a Path>,
    pub svg_dir: Option<&'a Path>,
}

pub fn calculate(person: &PersonArgs, outputs: Outputs<'_>) -> Result<()> {
    let (birth, now, profile) = person.resolve()?;
    let age = compute_age(birth, now);
    info!(%birth, %now, age, "computed age");

    if age <= 0.0 {
        bail!("birth ({birth}) must be before the evaluation time ({now})");
    }

    let result = match aggregate(&profile, birth, now) {
        Ok(result) => result,
        Err(err) => {
            warn!(total = err.total, "calculation refused");
            eprint!("{}", report::budget_view(&profile, age));
            return Err(err).context("Please adjust your activities to continue");
        }
    };
    let stats = Stats::new(&result);
    info!(total_hours = stats.total_hours, "lifetime hours computed");

    if outputs.json {
        let json = JsonReport {
            birth: birth.to_string(),
            evaluated_at: now.to_string(),
            age_years: age,
            daily_rates: &profile,
            daily_hours: daily_total(&profile, age),
            total_hours: stats.total_hours,
            hours: &result,
        };
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        match outputs.view {
            View::Summary => print!("{}", report::summary_view(&result, &stats, age)),
            View::Percentage => print!("{}", report::percentage_view(&stats, age)),
            View::All => {
                print!("{}", report::summary_view(&result, &stats, age));
                println!();
                print!("{}", report::percentage_view(&stats, age));
            }
        }
    }

    if let Some(path) = outputs.csv {
        fs::write(path, report::to_csv(&result, &stats))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("Generated {} successfully.", path.display());
    }

    if let Some(dir) = outputs.svg_dir {
        write_svgs(dir, &result, &stats, age)?;
    }

    Ok(())
}

fn write_svgs(dir: &Path, result: &LifetimeResult, stats: &Stats, age: f64) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    for theme in Theme::ALL {
        let files = [
            ("time_distribution", svg::pie_chart(result, theme)),
            ("activity_comparison", svg::bar_chart(result, theme)),
            ("life_card", svg::life_card(result, stats, age, theme)),
        ];
        for (name, content) in files {
            let path = dir.join(format!("{name}_{}.svg", theme.name()));
            fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote chart");
        }
    }

    eprintln!("Generated charts in {} successfully.", dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::OverCapacityError;
    use crate::report::CSV_FILE_NAME;

    fn person(birth_date: &str, at: &str, overrides: &[&str]) -> PersonArgs {
        PersonArgs {
            birth_date: birth_date.to_string(),
            birth_time: "00:00".to_string(),
            at: Some(at.to_string()),
            profile: None,
            overrides: overrides.iter().map(|o| o.to_string()).collect(),
        }
    }

    fn text_only() -> Outputs<'static> {
        Outputs {
            view: View::Summary,
            json: false,
            csv: None,
            svg_dir: None,
        }
    }

    // Learning and screen time trimmed so an adult day fits in 24 hours.
    const FITTING: [&str; 2] = ["learning=0", "screenTime=2"];

    #[test]
    fn evaluation_before_birth_is_refused() {
        let person = person("2021-01-01", "2020-01-01T00:00", &FITTING);
        let err = calculate(&person, text_only()).unwrap_err();
        assert!(err.to_string().contains("must be before the evaluation time"));
    }

    #[test]
    fn zero_age_is_refused() {
        let person = person("2020-01-01", "2020-01-01T00:00", &[]);
        assert!(calculate(&person, text_only()).is_err());
    }

    #[test]
    fn overfull_day_surfaces_capacity_error() {
        let person = person("2000-01-01", "2020-01-01T00:00", &[]);
        let err = calculate(&person, text_only()).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Please adjust your activities to continue"
        );
        let cause = err.downcast_ref::<OverCapacityError>().unwrap();
        assert_eq!(*cause, OverCapacityError { total: 30.5 });
    }

    #[test]
    fn json_output_succeeds() {
        let person = person("2000-01-01", "2020-01-01T00:00", &FITTING);
        let outputs = Outputs {
            view: View::All,
            json: true,
            csv: None,
            svg_dir: None,
        };
        assert!(calculate(&person, outputs).is_ok());
    }

    #[test]
    fn json_report_keeps_category_order() {
        let profile = ActivityProfile::default();
        let result = LifetimeResult::from_fn(|c| profile.rate(c));
        let report = JsonReport {
            birth: "2000-01-01 00:00:00".to_string(),
            evaluated_at: "2020-01-01 00:00:00".to_string(),
            age_years: 20.0,
            daily_rates: &profile,
            daily_hours: 23.5,
            total_hours: 30.5,
            hours: &result,
        };
        let json = serde_json::to_string(&report).unwrap();

        assert!(json.starts_with(r#"{"birth":"2000-01-01 00:00:00","evaluatedAt":"2020-01-01 00:00:00","ageYears":20.0,"dailyRates":{"sleep":8.0,"eating":1.5,"#));
        assert!(json.contains(r#""hours":{"sleep":8.0,"eating":1.5,"miscellaneous":2.0,"#));
        assert!(json.contains(r#""dailyHours":23.5,"totalHours":30.5"#));
    }

    #[test]
    fn writes_csv_and_both_themes_of_charts() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join(CSV_FILE_NAME);
        let charts = dir.path().join("charts");

        let person = person("2000-01-01", "2020-01-01T00:00", &FITTING);
        let outputs = Outputs {
            view: View::Percentage,
            json: false,
            csv: Some(csv.as_path()),
            svg_dir: Some(charts.as_path()),
        };
        calculate(&person, outputs).unwrap();

        let written = fs::read_to_string(&csv).unwrap();
        assert!(written.starts_with("Activity,Hours,Percentage\nSleep,58440.00,"));
        assert!(written.contains("\nWork,5844.00,"));

        for name in ["time_distribution", "activity_comparison", "life_card"] {
            for theme in ["dark", "light"] {
                let path = charts.join(format!("{name}_{theme}.svg"));
                assert!(path.is_file(), "{}", path.display());
            }
        }
        assert_eq!(fs::read_dir(&charts).unwrap().count(), 6);
    }

    #[test]
    fn refused_calculation_writes_no_files() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join(CSV_FILE_NAME);

        let person = person("2000-01-01", "2020-01-01T00:00", &[]);
        let outputs = Outputs {
            view: View::Summary,
            json: false,
            csv: Some(csv.as_path()),
            svg_dir: None,
        };
        assert!(calculate(&person, outputs).is_err());
        assert!(!csv.exists());
    }
}
