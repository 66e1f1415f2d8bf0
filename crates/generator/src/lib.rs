//! # Synthetic Revenue Generator
//!
//! Produces one calendar year of daily revenue with injected defects: whole
//! days removed, a handful of spikes and a handful of drops. Everything is
//! driven by a seeded `ChaCha8Rng`, so a given `GeneratorSettings` always
//! yields the same series.

use chrono::{Datelike, NaiveDate};
use configuration::GeneratorSettings;
use core_types::{RevenueRecord, RevenueSeries};
use rand::SeedableRng;
use rand::seq::index;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

pub mod error;

pub use error::GeneratorError;

/// The generated series plus a record of which defects were injected where.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSeries {
    /// Sorted ascending by date, removed days absent.
    pub series: RevenueSeries,
    /// Length of the calendar before any day was removed.
    pub calendar_days: usize,
    pub removed: Vec<NaiveDate>,
    pub spikes: Vec<NaiveDate>,
    pub drops: Vec<NaiveDate>,
}

/// The seeded generator.
pub struct SyntheticGenerator {
    settings: GeneratorSettings,
}

impl SyntheticGenerator {
    pub fn new(settings: GeneratorSettings) -> Self {
        Self { settings }
    }

    /// Runs the generation process.
    ///
    /// The random stream is consumed in a fixed order: one normal draw per
    /// day, then the removed days, then the spike days, then the drop days.
    /// Spikes and drops are each sampled from the days that survived removal,
    /// independently of each other, so a day can receive both.
    pub fn generate(&self) -> Result<GeneratedSeries, GeneratorError> {
        let s = &self.settings;
        let dates = calendar_year(s.year)?;
        let n = dates.len();
        self.check_counts(n)?;

        let normal = Normal::new(s.mean, s.std_dev)
            .map_err(|e| GeneratorError::InvalidSettings(e.to_string()))?;
        let mut rng = ChaCha8Rng::seed_from_u64(s.seed);

        // 1. Base revenue, clipped from below only.
        let mut revenue: Vec<f64> = (0..n)
            .map(|_| normal.sample(&mut rng).max(s.min_revenue))
            .collect();

        // 2. Remove whole days.
        let mut removed_idx = index::sample(&mut rng, n, s.missing_days).into_vec();
        let mut is_removed = vec![false; n];
        for &i in &removed_idx {
            is_removed[i] = true;
        }
        let remaining: Vec<usize> = (0..n).filter(|&i| !is_removed[i]).collect();

        // 3. Spikes, then drops, both drawn from the surviving days.
        let mut spike_idx: Vec<usize> = index::sample(&mut rng, remaining.len(), s.spike_days)
            .into_iter()
            .map(|i| remaining[i])
            .collect();
        for &i in &spike_idx {
            revenue[i] *= s.spike_factor;
        }

        let mut drop_idx: Vec<usize> = index::sample(&mut rng, remaining.len(), s.drop_days)
            .into_iter()
            .map(|i| remaining[i])
            .collect();
        for &i in &drop_idx {
            revenue[i] *= s.drop_factor;
        }

        let overlap = spike_idx.iter().filter(|i| drop_idx.contains(i)).count();
        if overlap > 0 {
            tracing::debug!("{} day(s) received both a spike and a drop", overlap);
        }

        // 4. Assemble in calendar order.
        let series: RevenueSeries = remaining
            .iter()
            .map(|&i| RevenueRecord::new(dates[i], revenue[i]))
            .collect();

        removed_idx.sort_unstable();
        spike_idx.sort_unstable();
        drop_idx.sort_unstable();
        let to_dates = |idx: &[usize]| idx.iter().map(|&i| dates[i]).collect::<Vec<_>>();

        tracing::info!(
            seed = s.seed,
            year = s.year,
            rows = series.len(),
            "Generated synthetic revenue series"
        );

        Ok(GeneratedSeries {
            series,
            calendar_days: n,
            removed: to_dates(&removed_idx),
            spikes: to_dates(&spike_idx),
            drops: to_dates(&drop_idx),
        })
    }

    /// Sampling without replacement cannot ask for more days than exist.
    fn check_counts(&self, days: usize) -> Result<(), GeneratorError> {
        let s = &self.settings;
        if s.missing_days > days {
            return Err(GeneratorError::InvalidSettings(format!(
                "cannot remove {} days from a {}-day year",
                s.missing_days, days
            )));
        }
        let remaining = days - s.missing_days;
        for (name, count) in [("spike_days", s.spike_days), ("drop_days", s.drop_days)] {
            if count > remaining {
                return Err(GeneratorError::InvalidSettings(format!(
                    "{name} = {count} exceeds the {remaining} days left after removal"
                )));
            }
        }
        Ok(())
    }
}

/// Every day of `year`, Jan 1 through Dec 31.
pub fn calendar_year(year: i32) -> Result<Vec<NaiveDate>, GeneratorError> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(GeneratorError::InvalidYear(year))?;
    Ok(first.iter_days().take_while(|d| d.year() == year).collect())
}
