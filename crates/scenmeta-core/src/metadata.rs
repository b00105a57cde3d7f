//! Flat metadata table built from evaluated criteria.

use std::io::Write;

use serde::Serialize;
use thiserror::Error;

use crate::criteria::{CriteriaSet, CriterionError, CriterionValues};
use crate::frame::IamFrame;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// One output row: a criterion value for one model/scenario/region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataRow {
    pub criterion: String,
    pub name: String,
    pub model: String,
    pub scenario: String,
    pub region: String,
    pub unit: String,
    pub value: f64,
}

/// Evaluate every criterion in registry order.
pub fn evaluate_all(
    frame: &IamFrame,
    criteria: &CriteriaSet,
) -> Result<Vec<CriterionValues>, CriterionError> {
    criteria
        .iter()
        .map(|(key, criterion)| {
            let values = criterion.evaluate(frame)?;
            tracing::debug!(criterion = key, values = values.len(), "evaluated criterion");
            if values.is_empty() {
                tracing::warn!(criterion = key, "criterion produced no values");
            }
            Ok(CriterionValues {
                key: key.to_string(),
                name: criterion.name().to_string(),
                values,
            })
        })
        .collect()
}

/// Flatten evaluated criteria into table rows.
pub fn to_rows(results: &[CriterionValues]) -> Vec<MetadataRow> {
    results
        .iter()
        .flat_map(|result| {
            result.values.iter().map(move |v| MetadataRow {
                criterion: result.key.clone(),
                name: result.name.clone(),
                model: v.model.clone(),
                scenario: v.scenario.clone(),
                region: v.region.clone(),
                unit: v.unit.clone(),
                value: v.value,
            })
        })
        .collect()
}

pub fn write_csv<W: Write>(rows: &[MetadataRow], writer: W) -> Result<(), MetadataError> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(rows: &[MetadataRow], mut writer: W) -> Result<(), MetadataError> {
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::definitions::default_criteria;
    use crate::frame::LoadOptions;

    const SCENARIOS: &str = "\
Model,Scenario,Region,Variable,Unit,2020,2030,2050,2100
M,S,World,Emissions|CO2,Mt CO2/yr,40000,30000,10000,0
M,S,World,Final Energy|Industry,EJ/yr,150,160,170,
M,S,World,Final Energy|Industry|Electricity,EJ/yr,30,40,85,
";

    #[test]
    fn evaluates_default_registry_on_sample() {
        let frame = IamFrame::from_reader(SCENARIOS.as_bytes(), &LoadOptions::default()).unwrap();
        let results = evaluate_all(&frame, &default_criteria()).unwrap();
        assert_eq!(results.len(), 7);

        let rows = to_rows(&results);
        let find = |key: &str| rows.iter().find(|r| r.criterion == key).unwrap();

        assert!((find("pct_change_co2_2020_2030").value + 25.0).abs() < 1e-9);
        assert!((find("share_fe_ind_2030").value - 25.0).abs() < 1e-9);
        assert!((find("share_fe_ind_2050").value - 50.0).abs() < 1e-9);
        assert_eq!(find("cumulative_co2_2020_2100").unit, "Gt CO2");
        // Buildings data is absent.
        assert!(rows.iter().all(|r| !r.criterion.starts_with("share_fe_bldng")));
    }

    #[test]
    fn csv_output_has_header_and_rows() {
        let rows = vec![MetadataRow {
            criterion: "k".into(),
            name: "n".into(),
            model: "M".into(),
            scenario: "S".into(),
            region: "World".into(),
            unit: "%".into(),
            value: 12.5,
        }];
        let mut buf = Vec::new();
        write_csv(&rows, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(
            text,
            "criterion,name,model,scenario,region,unit,value\nk,n,M,S,World,%,12.5\n"
        );
    }
}
