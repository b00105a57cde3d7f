//! Evaluation of criteria against an [`IamFrame`].
//!
//! Region and unit are kept on every value: change and share results are
//! labelled `%`, cumulative results carry the cumulative unit.

use serde::Serialize;

use super::{
    AggregateCriterion, ChangeOverTimeCriterion, Criterion, CriterionError, ShareCriterion,
};
use crate::frame::{IamFrame, SeriesKey};
use crate::units::conversion_factor;

pub const PERCENT_UNIT: &str = "%";

/// One evaluated value for a model/scenario/region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionValue {
    pub model: String,
    pub scenario: String,
    pub region: String,
    pub unit: String,
    pub value: f64,
}

impl CriterionValue {
    fn at(key: &SeriesKey, unit: impl Into<String>, value: f64) -> Self {
        Self {
            model: key.model.clone(),
            scenario: key.scenario.clone(),
            region: key.region.clone(),
            unit: unit.into(),
            value,
        }
    }
}

/// All values of one registry entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionValues {
    pub key: String,
    pub name: String,
    pub values: Vec<CriterionValue>,
}

impl ChangeOverTimeCriterion {
    /// `(v[target] - v[reference]) / v[reference]` in percent.
    pub fn evaluate(&self, frame: &IamFrame) -> Vec<CriterionValue> {
        frame
            .variable(&self.variable)
            .filter(|s| self.region.matches(&s.key.region))
            .filter_map(|s| {
                let reference = s.value(self.reference_year)?;
                let target = s.value(self.target_year)?;
                if reference == 0.0 {
                    tracing::debug!(
                        model = %s.key.model,
                        scenario = %s.key.scenario,
                        region = %s.key.region,
                        "zero reference value, no relative change"
                    );
                    return None;
                }
                let change = (target - reference) / reference * 100.0;
                Some(CriterionValue::at(&s.key, PERCENT_UNIT, change))
            })
            .collect()
    }
}

impl ShareCriterion {
    /// `component[year] / total[year]` in percent, matched per model/scenario/region.
    pub fn evaluate(&self, frame: &IamFrame) -> Vec<CriterionValue> {
        frame
            .variable(&self.variable_component)
            .filter(|s| self.region.matches(&s.key.region))
            .filter_map(|component| {
                let total = frame.find_at(&component.key, &self.variable_total)?;
                let part = component.value(self.year)?;
                let whole = total.value(self.year)?;
                if whole == 0.0 {
                    return None;
                }
                Some(CriterionValue::at(
                    &component.key,
                    PERCENT_UNIT,
                    part / whole * 100.0,
                ))
            })
            .collect()
    }
}

impl AggregateCriterion {
    /// Sum of linearly interpolated annual values over `start_year..=end_year`.
    pub fn evaluate(&self, frame: &IamFrame) -> Result<Vec<CriterionValue>, CriterionError> {
        let mut out = Vec::new();
        for series in frame
            .variable(&self.variable)
            .filter(|s| self.region.matches(&s.key.region))
        {
            let factor = match &self.unit {
                Some(unit) => conversion_factor(&series.key.unit, unit).map_err(|source| {
                    CriterionError::Unit {
                        name: self.name.clone(),
                        source,
                    }
                })?,
                None => 1.0,
            };
            let Some(annual) = series.annual_values(self.start_year, self.end_year) else {
                tracing::debug!(
                    model = %series.key.model,
                    scenario = %series.key.scenario,
                    region = %series.key.region,
                    "series does not cover {}-{}",
                    self.start_year,
                    self.end_year
                );
                continue;
            };
            let total: f64 = annual.iter().map(|(_, v)| v * factor).sum();
            let unit = self
                .cumulative_unit
                .as_deref()
                .or(self.unit.as_deref())
                .unwrap_or(&series.key.unit);
            out.push(CriterionValue::at(&series.key, unit, total));
        }
        Ok(out)
    }
}

impl Criterion {
    pub fn evaluate(&self, frame: &IamFrame) -> Result<Vec<CriterionValue>, CriterionError> {
        match self {
            Self::Change(c) => Ok(c.evaluate(frame)),
            Self::Share(c) => Ok(c.evaluate(frame)),
            Self::Cumulative(c) => c.evaluate(frame),
        }
    }
}
