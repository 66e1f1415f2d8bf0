use chrono::NaiveDate;
use std::ops::Range;

/// The plotting frame shared by every chart: x is the day offset from
/// `start`, y is the padded revenue range.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub start: NaiveDate,
    pub last_offset: i32,
    pub y: Range<f64>,
}

impl Frame {
    /// Builds the frame around dated points. `None` values still widen the
    /// x axis but not the y axis. Returns `None` if there is nothing to plot.
    pub fn fit<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a (NaiveDate, Option<f64>)>,
    {
        let points: Vec<&(NaiveDate, Option<f64>)> = points.into_iter().collect();
        let start = points.iter().map(|(d, _)| *d).min()?;
        let end = points.iter().map(|(d, _)| *d).max()?;
        let y = value_range(points.iter().filter_map(|(_, v)| *v))?;

        Some(Self {
            start,
            last_offset: offset(start, end),
            y,
        })
    }

    pub fn x(&self, date: NaiveDate) -> i32 {
        offset(self.start, date)
    }
}

fn offset(start: NaiveDate, date: NaiveDate) -> i32 {
    (date - start).num_days() as i32
}

/// `[min, max]` of `values`, padded by 5% on each side so lines do not sit on
/// the frame. A flat series gets a unit pad.
pub fn value_range<I: IntoIterator<Item = f64>>(values: I) -> Option<Range<f64>> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;

    let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
    Some((min - pad)..(max + pad))
}

/// Splits a line into the unbroken stretches between missing values, so a gap
/// shows up as a gap instead of being bridged.
pub fn contiguous_runs(points: &[(i32, Option<f64>)]) -> Vec<Vec<(i32, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for &(x, value) in points {
        match value {
            Some(y) => current.push((x, y)),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}
