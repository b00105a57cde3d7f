//! In-memory IAMC scenario data.
//!
//! An [`IamFrame`] holds one [`TimeSeries`] per
//! `(model, scenario, region, variable, unit)` key. Only reported values are
//! stored; missing years are simply absent from a series.

mod load;

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::Serialize;

pub use load::{DEFAULT_NA_VALUE, FrameError, LoadOptions};

/// Identity of one time series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SeriesKey {
    pub model: String,
    pub scenario: String,
    pub region: String,
    pub variable: String,
    pub unit: String,
}

impl SeriesKey {
    pub fn new(
        model: impl Into<String>,
        scenario: impl Into<String>,
        region: impl Into<String>,
        variable: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            scenario: scenario.into(),
            region: region.into(),
            variable: variable.into(),
            unit: unit.into(),
        }
    }

    /// Whether both keys belong to the same model/scenario/region.
    pub fn same_location(&self, other: &Self) -> bool {
        self.model == other.model && self.scenario == other.scenario && self.region == other.region
    }
}

/// Reported values of one variable, keyed by year.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub key: SeriesKey,
    pub values: BTreeMap<i32, f64>,
}

impl TimeSeries {
    pub fn new(key: SeriesKey, values: impl IntoIterator<Item = (i32, f64)>) -> Self {
        Self {
            key,
            values: values.into_iter().collect(),
        }
    }

    pub fn value(&self, year: i32) -> Option<f64> {
        self.values.get(&year).copied()
    }

    /// Linearly interpolated annual values over `start..=end`.
    ///
    /// Returns `None` unless the series reports values at or around both
    /// endpoints, i.e. the first reported year is `<= start` and the last is
    /// `>= end`.
    pub fn annual_values(&self, start: i32, end: i32) -> Option<Vec<(i32, f64)>> {
        if start > end {
            return None;
        }
        let (&first, _) = self.values.first_key_value()?;
        let (&last, _) = self.values.last_key_value()?;
        if first > start || last < end {
            return None;
        }

        (start..=end)
            .map(|year| {
                if let Some(v) = self.value(year) {
                    return Some((year, v));
                }
                let (&y0, &v0) = self.values.range(..year).next_back()?;
                let (&y1, &v1) = self.values.range(year..).next()?;
                let t = f64::from(year - y0) / f64::from(y1 - y0);
                Some((year, v0 + t * (v1 - v0)))
            })
            .collect()
    }
}

/// A collection of IAMC time series with unique keys.
#[derive(Debug, Clone, Default)]
pub struct IamFrame {
    series: Vec<TimeSeries>,
    keys: HashSet<SeriesKey>,
}

impl IamFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a series; a second series with the same key is rejected.
    pub fn push(&mut self, series: TimeSeries) -> Result<(), FrameError> {
        if !self.keys.insert(series.key.clone()) {
            let key = series.key;
            return Err(FrameError::DuplicateSeries {
                model: key.model,
                scenario: key.scenario,
                region: key.region,
                variable: key.variable,
            });
        }
        self.series.push(series);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimeSeries> {
        self.series.iter()
    }

    /// All series reporting `variable`.
    pub fn variable<'a>(&'a self, variable: &'a str) -> impl Iterator<Item = &'a TimeSeries> + 'a {
        self.series.iter().filter(move |s| s.key.variable == variable)
    }

    /// The series for `variable` at the same model/scenario/region as `at`.
    pub fn find_at(&self, at: &SeriesKey, variable: &str) -> Option<&TimeSeries> {
        self.series
            .iter()
            .find(|s| s.key.variable == variable && s.key.same_location(at))
    }

    /// Distinct `(model, scenario)` pairs in first-seen order.
    pub fn model_scenarios(&self) -> Vec<(String, String)> {
        let mut seen = BTreeSet::new();
        self.series
            .iter()
            .filter(|s| seen.insert((s.key.model.as_str(), s.key.scenario.as_str())))
            .map(|s| (s.key.model.clone(), s.key.scenario.clone()))
            .collect()
    }

    /// Distinct variable names, sorted.
    pub fn variables(&self) -> BTreeSet<&str> {
        self.series.iter().map(|s| s.key.variable.as_str()).collect()
    }
}

impl IntoIterator for IamFrame {
    type Item = TimeSeries;
    type IntoIter = std::vec::IntoIter<TimeSeries>;

    fn into_iter(self) -> Self::IntoIter {
        self.series.into_iter()
    }
}
