//! Pre-processing that fills in aggregate variables some models omit.
//!
//! Several models report `Final Energy|Industry|Electricity` and friends but
//! not every parent total. Where a model/scenario lacks the aggregate
//! entirely, it is constructed by summing the components per region and
//! year. Model/scenarios that already report it are left untouched.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use thiserror::Error;

use crate::frame::{FrameError, IamFrame, SeriesKey, TimeSeries};

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error(
        "Components of '{variable}' for {model} / {scenario} / {region} have mixed units: {units:?}"
    )]
    InconsistentUnits {
        model: String,
        scenario: String,
        region: String,
        variable: String,
        units: Vec<String>,
    },

    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// Direct children of `agg_var` in the variable hierarchy (`agg_var|X`).
pub fn direct_components(frame: &IamFrame, agg_var: &str) -> Vec<String> {
    let prefix = format!("{agg_var}|");
    frame
        .variables()
        .into_iter()
        .filter(|v| v.strip_prefix(&prefix).is_some_and(|rest| !rest.contains('|')))
        .map(str::to_string)
        .collect()
}

/// Construct `agg_var` where it is missing by summing its components.
///
/// With `components == None` the components are the direct children of
/// `agg_var` found anywhere in the frame.
pub fn add_missing_aggregates(
    frame: IamFrame,
    agg_var: &str,
    components: Option<&[String]>,
) -> Result<IamFrame, AggregateError> {
    let components: Vec<String> = match components {
        Some(list) => list.to_vec(),
        None => direct_components(&frame, agg_var),
    };
    if components.is_empty() {
        tracing::debug!(variable = agg_var, "no components to aggregate");
        return Ok(frame);
    }

    let reporting: HashSet<(&str, &str)> = frame
        .variable(agg_var)
        .map(|s| (s.key.model.as_str(), s.key.scenario.as_str()))
        .collect();

    // (model, scenario, region) -> (units, year -> sum)
    let mut sums: BTreeMap<(String, String, String), (BTreeSet<String>, BTreeMap<i32, f64>)> =
        BTreeMap::new();
    for series in frame.iter() {
        let key = &series.key;
        if reporting.contains(&(key.model.as_str(), key.scenario.as_str()))
            || !components.iter().any(|c| *c == key.variable)
        {
            continue;
        }
        let (units, totals) = sums
            .entry((key.model.clone(), key.scenario.clone(), key.region.clone()))
            .or_default();
        units.insert(key.unit.clone());
        for (&year, &value) in &series.values {
            *totals.entry(year).or_insert(0.0) += value;
        }
    }

    let mut constructed = Vec::with_capacity(sums.len());
    for ((model, scenario, region), (units, totals)) in sums {
        if units.len() > 1 {
            return Err(AggregateError::InconsistentUnits {
                model,
                scenario,
                region,
                variable: agg_var.to_string(),
                units: units.into_iter().collect(),
            });
        }
        let unit = units.into_iter().next().unwrap_or_default();
        constructed.push(TimeSeries {
            key: SeriesKey::new(model, scenario, region, agg_var, unit),
            values: totals,
        });
    }

    tracing::info!(
        variable = agg_var,
        added = constructed.len(),
        "filled missing aggregate series"
    );

    let mut frame = frame;
    for series in constructed {
        frame.push(series)?;
    }
    Ok(frame)
}
