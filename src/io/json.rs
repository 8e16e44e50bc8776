use crate::config::SpeedUnit;
use crate::curve::{CurveData, SpeedCurve};
use crate::error::{ExportError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

fn required<T>(value: Option<T>, field: &'static str) -> Result<T> {
    value.ok_or(ExportError::MissingField { field })
}

// Flat record as produced by the plotting data source
#[derive(Debug, Deserialize)]
struct FlatSource {
    #[serde(alias = "flow_v")]
    flow: Option<Vec<f64>>,
    head: Option<Vec<f64>>,
    #[serde(alias = "eff")]
    efficiency: Option<Vec<f64>>,
    speed: Option<Vec<f64>>,
}

// One entry of a grouped source; presence is checked after parsing
#[derive(Debug, Deserialize)]
struct GroupedCurve {
    speed: Option<f64>,
    #[serde(alias = "flow_v")]
    flow: Option<Vec<f64>>,
    head: Option<Vec<f64>>,
    #[serde(alias = "eff")]
    efficiency: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct GroupedSource {
    curves: Vec<GroupedCurve>,
}

impl FlatSource {
    fn into_curve_data(self) -> Result<CurveData> {
        CurveData::new(
            required(self.flow, "flow")?,
            required(self.head, "head")?,
            required(self.efficiency, "efficiency")?,
            required(self.speed, "speed")?,
        )
    }
}

impl GroupedCurve {
    fn into_speed_curve(self) -> Result<SpeedCurve> {
        Ok(SpeedCurve {
            speed: required(self.speed, "speed")?,
            flow: required(self.flow, "flow")?,
            head: required(self.head, "head")?,
            efficiency: required(self.efficiency, "efficiency")?,
        })
    }
}

/// Parses curve data from a JSON document, converting speeds to RPM.
///
/// A top-level `curves` key selects the grouped shape; anything else is read
/// as a flat record. The chosen shape is parsed from the text itself so
/// errors keep their line and column.
pub fn parse_curve_data(text: &str, speed_unit: SpeedUnit) -> Result<CurveData> {
    let value: serde_json::Value = serde_json::from_str(text)?;

    let data = if value.get("curves").is_some() {
        let source: GroupedSource = serde_json::from_str(text)?;
        tracing::debug!(curves = source.curves.len(), "loading grouped speed curves");
        let curves = source
            .curves
            .into_iter()
            .map(GroupedCurve::into_speed_curve)
            .collect::<Result<Vec<_>>>()?;
        CurveData::from_speed_curves(&curves)?
    } else {
        serde_json::from_str::<FlatSource>(text)?.into_curve_data()?
    };
    Ok(data.with_speed_unit(speed_unit))
}

pub fn load_curve_data(path: &Path, speed_unit: SpeedUnit) -> Result<CurveData> {
    let text = fs::read_to_string(path)
        .map_err(|e| ExportError::io(format!("read {}", path.display()), e))?;
    let data = parse_curve_data(&text, speed_unit)?;
    tracing::info!(path = %path.display(), points = data.len(), "loaded curve data");
    Ok(data)
}
