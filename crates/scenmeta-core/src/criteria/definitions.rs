//! The metadata criteria computed for the scenario ensemble.
//!
//! *NB!* No check is made that every scenario reports [`REFERENCE_YEAR`].
//! Scenarios missing it simply get no change value.

use super::{
    AggregateCriterion, ChangeOverTimeCriterion, CriteriaSet, Criterion, RegionFilter,
    ShareCriterion,
};

/// Base year for changes and the start of cumulative sums.
pub const REFERENCE_YEAR: i32 = 2020;

/// Years the change and share measures are reported for.
pub const OBS_YEARS: [i32; 2] = [2030, 2050];

/// End years of the cumulative measures.
pub const CUMULATIVE_END_YEARS: [i32; 1] = [2100];

/// (key, description, variable)
const CHANGE_VARIABLES: [(&str, &str, &str); 1] = [("co2", "CO2 emissions", "Emissions|CO2")];

/// (key, component description, component, total description, total)
const SHARE_VARIABLES: [(&str, &str, &str, &str, &str); 2] = [
    (
        "fe_ind",
        "Electricity",
        "Final Energy|Industry|Electricity",
        "Final Energy, Industrial sector",
        "Final Energy|Industry",
    ),
    (
        "fe_bldng",
        "Electricity",
        "Final Energy|Residential and Commercial|Electricity",
        "Final Energy, Buildings sector",
        "Final Energy|Residential and Commercial",
    ),
];

/// (key, description, variable, unit, cumulative unit)
const CUMULATIVE_VARIABLES: [(&str, &str, &str, &str, &str); 1] = [(
    "co2",
    "CO2 emissions",
    "Emissions|CO2",
    "Gt CO2 / yr",
    "Gt CO2",
)];

pub fn make_pct_change_criterion(
    reference_year: i32,
    target_year: i32,
    variable: &str,
    name: impl Into<String>,
    region: RegionFilter,
) -> ChangeOverTimeCriterion {
    ChangeOverTimeCriterion {
        name: name.into(),
        variable: variable.to_string(),
        reference_year,
        target_year,
        region,
    }
}

pub fn make_share_criterion(
    year: i32,
    variable_component: &str,
    variable_total: &str,
    name: impl Into<String>,
    region: RegionFilter,
) -> ShareCriterion {
    ShareCriterion {
        name: name.into(),
        variable_component: variable_component.to_string(),
        variable_total: variable_total.to_string(),
        year,
        region,
    }
}

/// Cumulative criterion over every year in `start_year..=end_year`.
pub fn make_cumulative_criterion(
    start_year: i32,
    end_year: i32,
    variable: &str,
    name: impl Into<String>,
    unit: Option<&str>,
    cumulative_unit: Option<&str>,
    region: RegionFilter,
) -> AggregateCriterion {
    AggregateCriterion {
        name: name.into(),
        variable: variable.to_string(),
        start_year,
        end_year,
        unit: unit.map(str::to_string),
        cumulative_unit: cumulative_unit.map(str::to_string),
        region,
    }
}

/// The full registry: change criteria, then share, then cumulative.
pub fn default_criteria() -> CriteriaSet {
    let mut set = CriteriaSet::new();
    let mut add = |key: String, criterion: Criterion| {
        // Keys are generated from distinct constants above.
        debug_assert!(set.get(&key).is_none(), "duplicate criterion key {key}");
        if let Err(e) = set.insert(key, criterion) {
            tracing::warn!(error = %e, "criterion not registered");
        }
    };

    for target_year in OBS_YEARS {
        for (var_key, description, variable) in CHANGE_VARIABLES {
            add(
                format!("pct_change_{var_key}_{REFERENCE_YEAR}_{target_year}"),
                Criterion::Change(make_pct_change_criterion(
                    REFERENCE_YEAR,
                    target_year,
                    variable,
                    format!(
                        "Change in {description} in {target_year} (% change rel to {REFERENCE_YEAR})"
                    ),
                    RegionFilter::All,
                )),
            );
        }
    }

    for year in OBS_YEARS {
        for (var_key, comp_description, component, total_description, total) in SHARE_VARIABLES {
            add(
                format!("share_{var_key}_{year}"),
                Criterion::Share(make_share_criterion(
                    year,
                    component,
                    total,
                    format!("{comp_description} share in {total_description} in {year} (%)"),
                    RegionFilter::All,
                )),
            );
        }
    }

    for end_year in CUMULATIVE_END_YEARS {
        for (var_key, description, variable, unit, cumulative_unit) in CUMULATIVE_VARIABLES {
            add(
                format!("cumulative_{var_key}_{REFERENCE_YEAR}_{end_year}"),
                Criterion::Cumulative(make_cumulative_criterion(
                    REFERENCE_YEAR,
                    end_year,
                    variable,
                    format!(
                        "Cumulative {description} from {REFERENCE_YEAR} until {end_year} ({cumulative_unit})"
                    ),
                    Some(unit),
                    Some(cumulative_unit),
                    RegionFilter::All,
                )),
            );
        }
    }

    set
}
