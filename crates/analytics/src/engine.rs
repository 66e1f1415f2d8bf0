use crate::error::AnalyticsError;
use crate::report::{CentralTendency, DescriptiveStats, IqrBounds};

/// A stateless calculator for descriptive statistics over a revenue column.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the `describe()` summary of the observed values.
    ///
    /// # Returns
    ///
    /// `AnalyticsError::NotEnoughData` if no value is present.
    pub fn describe(&self, values: &[Option<f64>]) -> Result<DescriptiveStats, AnalyticsError> {
        let sorted = sorted_observed(values);
        if sorted.is_empty() {
            return Err(AnalyticsError::NotEnoughData(
                "describe requires at least one value".to_string(),
            ));
        }

        let mean = mean_of(&sorted);
        Ok(DescriptiveStats {
            count: sorted.len(),
            mean,
            std_dev: sample_std_dev(&sorted, mean),
            min: sorted[0],
            q25: quantile_sorted(&sorted, 0.25),
            median: quantile_sorted(&sorted, 0.5),
            q75: quantile_sorted(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }

    /// The `p`-quantile using linear interpolation between the two nearest
    /// order statistics (position `(n - 1) * p`).
    pub fn quantile(&self, values: &[Option<f64>], p: f64) -> Result<f64, AnalyticsError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(AnalyticsError::InvalidParameter(
                "p".to_string(),
                format!("{p} is outside [0, 1]"),
            ));
        }
        let sorted = sorted_observed(values);
        if sorted.is_empty() {
            return Err(AnalyticsError::NotEnoughData(
                "quantile requires at least one value".to_string(),
            ));
        }
        Ok(quantile_sorted(&sorted, p))
    }

    /// Computes `[Q1 - k*IQR, Q3 + k*IQR]` over the observed values.
    pub fn iqr_bounds(
        &self,
        values: &[Option<f64>],
        multiplier: f64,
    ) -> Result<IqrBounds, AnalyticsError> {
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(AnalyticsError::InvalidParameter(
                "multiplier".to_string(),
                format!("{multiplier} must be a non-negative number"),
            ));
        }
        let sorted = sorted_observed(values);
        if sorted.is_empty() {
            return Err(AnalyticsError::NotEnoughData(
                "IQR bounds require at least one value".to_string(),
            ));
        }

        let q1 = quantile_sorted(&sorted, 0.25);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let bounds = IqrBounds {
            q1,
            q3,
            iqr,
            multiplier,
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
        };
        tracing::debug!(?bounds, "IQR bounds computed over {} values", sorted.len());
        Ok(bounds)
    }

    /// Arithmetic mean of the observed values. `None` if there are none.
    pub fn mean(&self, values: &[Option<f64>]) -> Option<f64> {
        let observed: Vec<f64> = values.iter().copied().filter_map(observed_value).collect();
        (!observed.is_empty()).then(|| mean_of(&observed))
    }

    pub fn median(&self, values: &[Option<f64>]) -> Option<f64> {
        let sorted = sorted_observed(values);
        (!sorted.is_empty()).then(|| quantile_sorted(&sorted, 0.5))
    }

    /// Sample standard deviation (n - 1). `None` below two observed values.
    pub fn std_dev(&self, values: &[Option<f64>]) -> Option<f64> {
        let observed: Vec<f64> = values.iter().copied().filter_map(observed_value).collect();
        if observed.is_empty() {
            return None;
        }
        sample_std_dev(&observed, mean_of(&observed))
    }

    /// Mean and median, skipping missing values.
    pub fn central_tendency(&self, values: &[Option<f64>]) -> CentralTendency {
        CentralTendency {
            count: values.iter().filter(|v| observed_value(**v).is_some()).count(),
            mean: self.mean(values),
            median: self.median(values),
        }
    }

    /// Trailing mean over the current row and up to `window - 1` rows before it.
    ///
    /// Missing values inside a window are skipped. A position yields `None`
    /// when its window holds fewer than `min_periods` observed values, so with
    /// `min_periods = 1` the window simply grows over the first rows.
    pub fn rolling_mean(
        &self,
        values: &[Option<f64>],
        window: usize,
        min_periods: usize,
    ) -> Result<Vec<Option<f64>>, AnalyticsError> {
        if window == 0 {
            return Err(AnalyticsError::InvalidParameter(
                "window".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        if min_periods == 0 || min_periods > window {
            return Err(AnalyticsError::InvalidParameter(
                "min_periods".to_string(),
                format!("must be within 1..={window}"),
            ));
        }

        let mut out = Vec::with_capacity(values.len());
        let mut sum = 0.0;
        let mut observed = 0usize;

        for (i, &value) in values.iter().enumerate() {
            if let Some(v) = observed_value(value) {
                sum += v;
                observed += 1;
            }
            if let Some(v) = i
                .checked_sub(window)
                .and_then(|leaving| observed_value(values[leaving]))
            {
                sum -= v;
                observed -= 1;
            }

            if observed >= min_periods {
                out.push(Some(sum / observed as f64));
            } else {
                out.push(None);
            }
        }

        Ok(out)
    }
}

fn observed_value(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

fn sorted_observed(values: &[Option<f64>]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter_map(observed_value).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

fn mean_of(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_std_dev(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>()
        / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// `sorted` must be non-empty and ascending.
fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_quantile_uses_linear_interpolation() {
        let engine = AnalyticsEngine::new();
        let values = some(&[4.0, 1.0, 3.0, 2.0]);
        assert!(approx(engine.quantile(&values, 0.25).unwrap(), 1.75));
        assert!(approx(engine.quantile(&values, 0.5).unwrap(), 2.5));
        assert!(approx(engine.quantile(&values, 0.75).unwrap(), 3.25));
        assert!(approx(engine.quantile(&values, 1.0).unwrap(), 4.0));
    }

    #[test]
    fn test_quantile_rejects_bad_input() {
        let engine = AnalyticsEngine::new();
        assert!(matches!(
            engine.quantile(&[None, None], 0.5),
            Err(AnalyticsError::NotEnoughData(_))
        ));
        assert!(matches!(
            engine.quantile(&some(&[1.0]), 1.5),
            Err(AnalyticsError::InvalidParameter(..))
        ));
    }

    #[test]
    fn test_describe_skips_missing_values() {
        let engine = AnalyticsEngine::new();
        let values = vec![Some(1.0), None, Some(2.0), Some(3.0), Some(f64::NAN), Some(4.0)];
        let stats = engine.describe(&values).unwrap();

        assert_eq!(stats.count, 4);
        assert!(approx(stats.mean, 2.5));
        // Sample variance of 1..=4 is 5/3.
        assert!(approx(stats.std_dev.unwrap(), (5.0f64 / 3.0).sqrt()));
        assert!(approx(stats.min, 1.0));
        assert!(approx(stats.q25, 1.75));
        assert!(approx(stats.median, 2.5));
        assert!(approx(stats.q75, 3.25));
        assert!(approx(stats.max, 4.0));
    }

    #[test]
    fn test_describe_single_value_has_no_std() {
        let stats = AnalyticsEngine::new().describe(&some(&[7.0])).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.std_dev, None);
        assert!(approx(stats.q25, 7.0) && approx(stats.q75, 7.0));
    }

    #[test]
    fn test_iqr_bounds_order_and_outliers() {
        let engine = AnalyticsEngine::new();
        let values = some(&[10.0, 11.0, 12.0, 13.0, 14.0, 100.0, -50.0]);
        let bounds = engine.iqr_bounds(&values, 1.5).unwrap();

        assert!(bounds.lower <= bounds.q1 && bounds.q1 <= bounds.q3 && bounds.q3 <= bounds.upper);
        assert!(approx(bounds.iqr, bounds.q3 - bounds.q1));
        assert!(bounds.is_outlier(100.0));
        assert!(bounds.is_outlier(-50.0));
        assert!(!bounds.is_outlier(12.0));
    }

    #[test]
    fn test_iqr_zero_flags_any_deviation() {
        let engine = AnalyticsEngine::new();
        let bounds = engine.iqr_bounds(&some(&[5.0, 5.0, 5.0, 5.0]), 1.5).unwrap();
        assert_eq!(bounds.iqr, 0.0);
        assert!(!bounds.is_outlier(5.0));
        assert!(bounds.is_outlier(5.000001));
    }

    #[test]
    fn test_central_tendency() {
        let engine = AnalyticsEngine::new();
        let ct = engine.central_tendency(&[Some(1.0), None, Some(3.0), Some(8.0)]);
        assert_eq!(ct.count, 3);
        assert!(approx(ct.mean.unwrap(), 4.0));
        assert!(approx(ct.median.unwrap(), 3.0));

        let empty = engine.central_tendency(&[None]);
        assert_eq!(empty.mean, None);
        assert_eq!(empty.median, None);
    }

    #[test]
    fn test_std_dev_is_sample() {
        let engine = AnalyticsEngine::new();
        let values = some(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!(approx(engine.std_dev(&values).unwrap(), (32.0f64 / 7.0).sqrt()));
        assert_eq!(engine.std_dev(&[Some(1.0), None]), None);
        assert!(approx(engine.median(&[Some(1.0), Some(f64::NAN), Some(2.0)]).unwrap(), 1.5));
    }

    #[test]
    fn test_rolling_mean_grows_then_slides() {
        let engine = AnalyticsEngine::new();
        let values = some(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        let trend = engine.rolling_mean(&values, 7, 1).unwrap();

        assert_eq!(trend.len(), values.len());
        assert!(approx(trend[0].unwrap(), 1.0));
        assert!(approx(trend[1].unwrap(), 1.5));
        assert!(approx(trend[6].unwrap(), 4.0));
        assert!(approx(trend[7].unwrap(), 5.0));
        assert!(approx(trend[8].unwrap(), 6.0));
    }

    #[test]
    fn test_rolling_mean_skips_gaps() {
        let engine = AnalyticsEngine::new();
        let values = vec![None, Some(2.0), None, Some(4.0)];
        let trend = engine.rolling_mean(&values, 2, 1).unwrap();
        assert_eq!(trend, vec![None, Some(2.0), Some(2.0), Some(4.0)]);

        let strict = engine.rolling_mean(&values, 2, 2).unwrap();
        assert_eq!(strict, vec![None, None, None, None]);
    }

    #[test]
    fn test_rolling_mean_validates_parameters() {
        let engine = AnalyticsEngine::new();
        assert!(engine.rolling_mean(&[], 0, 1).is_err());
        assert!(engine.rolling_mean(&[], 3, 4).is_err());
        assert_eq!(engine.rolling_mean(&[], 3, 1).unwrap(), Vec::<Option<f64>>::new());
    }
}
