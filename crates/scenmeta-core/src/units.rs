//! Emission mass unit conversion.
//!
//! Only the units the criteria need are understood: a mass of some species,
//! optionally per year, e.g. `Mt CO2/yr` or `Gt CO2 / yr`.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UnitError {
    #[error("Unrecognised unit '{0}'")]
    Unrecognised(String),

    #[error("Cannot convert '{from}' to '{to}'")]
    Incompatible { from: String, to: String },
}

#[derive(Debug, Clone, PartialEq)]
struct MassUnit {
    tonnes: f64,
    species: String,
    per_time: Option<String>,
}

fn parse(unit: &str) -> Result<MassUnit, UnitError> {
    let unrecognised = || UnitError::Unrecognised(unit.to_string());

    let (amount, per_time) = match unit.split_once('/') {
        Some((amount, per)) => (amount.trim(), Some(per.trim().to_ascii_lowercase())),
        None => (unit.trim(), None),
    };
    let per_time = match per_time.as_deref() {
        None => None,
        Some("yr" | "year" | "a") => Some("yr".to_string()),
        Some(_) => return Err(unrecognised()),
    };

    let (mass, species) = amount.split_once(char::is_whitespace).ok_or_else(unrecognised)?;
    let tonnes = match mass {
        "t" => 1.0,
        "kt" => 1e3,
        "Mt" => 1e6,
        "Gt" => 1e9,
        _ => return Err(unrecognised()),
    };
    let species: String = species.split_whitespace().collect();
    if species.is_empty() {
        return Err(unrecognised());
    }

    Ok(MassUnit {
        tonnes,
        species,
        per_time,
    })
}

/// Multiplicative factor converting a value in `from` into `to`.
///
/// Identical unit strings always convert with factor 1.
pub fn conversion_factor(from: &str, to: &str) -> Result<f64, UnitError> {
    if from.trim() == to.trim() {
        return Ok(1.0);
    }
    let source = parse(from)?;
    let target = parse(to)?;
    if source.species != target.species || source.per_time != target.per_time {
        return Err(UnitError::Incompatible {
            from: from.to_string(),
            to: to.to_string(),
        });
    }
    Ok(source.tonnes / target.tonnes)
}
