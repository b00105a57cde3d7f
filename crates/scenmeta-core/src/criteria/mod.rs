//! Scenario metadata criteria.
//!
//! A criterion reduces the time series of one model/scenario/region to a
//! single number. Three kinds exist:
//!
//! - [`ChangeOverTimeCriterion`]: relative change between two years, in %
//! - [`ShareCriterion`]: one variable as a share of another in a year, in %
//! - [`AggregateCriterion`]: cumulative sum of annual values over a period
//!
//! [`CriteriaSet`] is an ordered, keyed registry of criteria; the default
//! registry lives in [`definitions`].

pub mod definitions;
mod eval;

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use crate::units::UnitError;

pub use eval::{CriterionValue, CriterionValues, PERCENT_UNIT};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CriterionError {
    #[error("Criterion '{name}': {source}")]
    Unit {
        name: String,
        #[source]
        source: UnitError,
    },

    #[error("Criterion key '{0}' is already registered")]
    DuplicateKey(String),
}

/// Which regions a criterion is evaluated for.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(untagged)]
pub enum RegionFilter {
    /// Every region in the data (`*`).
    #[default]
    All,
    /// Only the listed regions.
    Only(Vec<String>),
}

impl RegionFilter {
    pub fn only(regions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::Only(regions.into_iter().map(Into::into).collect())
    }

    pub fn matches(&self, region: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(regions) => regions.iter().any(|r| r == region),
        }
    }
}

impl std::fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "*"),
            Self::Only(regions) => write!(f, "{}", regions.join(", ")),
        }
    }
}

/// Relative change of `variable` from `reference_year` to `target_year`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeOverTimeCriterion {
    pub name: String,
    pub variable: String,
    pub reference_year: i32,
    pub target_year: i32,
    pub region: RegionFilter,
}

/// Share of `variable_component` in `variable_total` in `year`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareCriterion {
    pub name: String,
    pub variable_component: String,
    pub variable_total: String,
    pub year: i32,
    pub region: RegionFilter,
}

/// Cumulative sum of annual `variable` values over `start_year..=end_year`.
///
/// `unit` is converted to before summing. `cumulative_unit` is only a label
/// for the result (e.g. `Gt CO2` for a sum of `Gt CO2 / yr`); no conversion
/// is triggered by it, so the two must be kept consistent by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateCriterion {
    pub name: String,
    pub variable: String,
    pub start_year: i32,
    pub end_year: i32,
    pub unit: Option<String>,
    pub cumulative_unit: Option<String>,
    pub region: RegionFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionKind {
    Change,
    Share,
    Cumulative,
}

impl std::fmt::Display for CriterionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Change => "change",
            Self::Share => "share",
            Self::Cumulative => "cumulative",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Criterion {
    Change(ChangeOverTimeCriterion),
    Share(ShareCriterion),
    Cumulative(AggregateCriterion),
}

impl Criterion {
    pub fn name(&self) -> &str {
        match self {
            Self::Change(c) => &c.name,
            Self::Share(c) => &c.name,
            Self::Cumulative(c) => &c.name,
        }
    }

    pub const fn kind(&self) -> CriterionKind {
        match self {
            Self::Change(_) => CriterionKind::Change,
            Self::Share(_) => CriterionKind::Share,
            Self::Cumulative(_) => CriterionKind::Cumulative,
        }
    }

    /// Variables the criterion reads.
    pub fn variables(&self) -> Vec<&str> {
        match self {
            Self::Change(c) => vec![c.variable.as_str()],
            Self::Share(c) => vec![c.variable_component.as_str(), c.variable_total.as_str()],
            Self::Cumulative(c) => vec![c.variable.as_str()],
        }
    }
}

/// Ordered registry of criteria keyed by short code (e.g. `share_fe_ind_2030`).
#[derive(Debug, Clone, Default)]
pub struct CriteriaSet {
    entries: IndexMap<String, Criterion>,
}

impl CriteriaSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a criterion under `key`; keys must be unique.
    pub fn insert(&mut self, key: impl Into<String>, criterion: Criterion) -> Result<(), CriterionError> {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return Err(CriterionError::DuplicateKey(key));
        }
        self.entries.insert(key, criterion);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Criterion> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Criterion)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), c))
    }

    pub fn of_kind(&self, kind: CriterionKind) -> impl Iterator<Item = (&str, &Criterion)> {
        self.iter().filter(move |(_, c)| c.kind() == kind)
    }

    /// Keep only the criteria whose key is in `keys`, preserving registry order.
    pub fn retain_keys(&mut self, keys: &[String]) {
        self.entries.retain(|k, _| keys.iter().any(|wanted| wanted == k));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_filter_matching() {
        assert!(RegionFilter::All.matches("anything"));
        let only = RegionFilter::only(["World", "EU"]);
        assert!(only.matches("EU"));
        assert!(!only.matches("China"));
        assert_eq!(only.to_string(), "World, EU");
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let mut set = CriteriaSet::new();
        let criterion = Criterion::Share(ShareCriterion {
            name: "s".into(),
            variable_component: "a".into(),
            variable_total: "b".into(),
            year: 2030,
            region: RegionFilter::All,
        });
        set.insert("k", criterion.clone()).unwrap();
        assert_eq!(
            set.insert("k", criterion),
            Err(CriterionError::DuplicateKey("k".into()))
        );
    }
}
