use crate::activity::{ActivityCategory, LifetimeResult};

const HOURS_PER_YEAR: f64 = 24.0 * 365.0;

/// Read-only figures derived from a `LifetimeResult` for the views.
pub struct Stats {
    pub total_hours: f64,
    pub tracked_years: f64,
    percentages: [f64; ActivityCategory::COUNT],
    ranked: Vec<(ActivityCategory, f64)>,
}

impl Stats {
    pub fn new(result: &LifetimeResult) -> Self {
        let total_hours: f64 = result.iter().map(|(_, hours)| hours).sum();

        let percentages = ActivityCategory::ALL.map(|c| {
            if total_hours > 0.0 {
                result.hours(c) / total_hours * 100.0
            } else {
                0.0
            }
        });

        // Stable sort, so equal totals keep category order.
        let mut ranked: Vec<_> = result.iter().filter(|(_, hours)| *hours > 0.0).collect();
        ranked.sort_by(|(_, a), (_, b)| b.total_cmp(a));

        Self {
            total_hours,
            tracked_years: total_hours / HOURS_PER_YEAR,
            percentages,
            ranked,
        }
    }

    pub fn percentage(&self, category: ActivityCategory) -> f64 {
        self.percentages[category as usize]
    }

    /// Non-zero categories, largest first.
    pub fn ranked(&self) -> &[(ActivityCategory, f64)] {
        &self.ranked
    }

    pub fn top(&self) -> Option<(ActivityCategory, f64)> {
        self.ranked.first().map(|&(c, _)| (c, self.percentage(c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::ActivityCategory::*;

    fn result(values: [f64; ActivityCategory::COUNT]) -> LifetimeResult {
        LifetimeResult::from_fn(|c| values[c as usize])
    }

    #[test]
    fn percentages_sum_to_hundred() {
        let stats = Stats::new(&result([80.0, 10.0, 10.0, 0.0, 0.0, 0.0, 0.0, 0.0]));
        assert_eq!(stats.total_hours, 100.0);
        assert_eq!(stats.percentage(Sleep), 80.0);
        assert_eq!(stats.percentage(Eating), 10.0);
        assert_eq!(stats.percentage(Work), 0.0);
    }

    #[test]
    fn empty_result_has_no_percentages() {
        let stats = Stats::new(&result([0.0; ActivityCategory::COUNT]));
        assert_eq!(stats.total_hours, 0.0);
        assert!(ActivityCategory::ALL.iter().all(|&c| stats.percentage(c) == 0.0));
        assert!(stats.ranked().is_empty());
        assert!(stats.top().is_none());
    }

    #[test]
    fn ranking_drops_zeroes_and_keeps_ties_in_order() {
        let stats = Stats::new(&result([5.0, 9.0, 5.0, 0.0, 1.0, 0.0, 9.0, 0.0]));
        let order: Vec<_> = stats.ranked().iter().map(|&(c, _)| c).collect();
        assert_eq!(order, vec![Eating, Work, Sleep, Miscellaneous, Sports]);
        assert_eq!(stats.top().map(|(c, _)| c), Some(Eating));
    }

    #[test]
    fn tracked_years_use_365_day_years() {
        let stats = Stats::new(&result([8760.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]));
        assert_eq!(stats.tracked_years, 1.0);
    }
}
