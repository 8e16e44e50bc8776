use crate::config::SpeedUnit;
use crate::error::{ExportError, Result};
use serde::Serialize;

// Parallel sequences of performance samples, index i across all four is one point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveData {
    flow: Vec<f64>,
    head: Vec<f64>,
    efficiency: Vec<f64>,
    speed: Vec<f64>,
}

/// One sample of a performance curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub flow: f64,
    pub head: f64,
    pub efficiency: f64,
    pub speed: f64,
}

// Curve measured at a single rotational speed
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedCurve {
    pub speed: f64,
    pub flow: Vec<f64>,
    pub head: Vec<f64>,
    pub efficiency: Vec<f64>,
}

impl CurveData {
    /// Builds curve data, rejecting sequences whose length differs from `flow`.
    pub fn new(
        flow: Vec<f64>,
        head: Vec<f64>,
        efficiency: Vec<f64>,
        speed: Vec<f64>,
    ) -> Result<Self> {
        let expected = flow.len();
        for (field, found) in [
            ("head", head.len()),
            ("efficiency", efficiency.len()),
            ("speed", speed.len()),
        ] {
            if found != expected {
                return Err(ExportError::Validation {
                    field,
                    expected,
                    found,
                });
            }
        }

        Ok(CurveData {
            flow,
            head,
            efficiency,
            speed,
        })
    }

    pub fn empty() -> Self {
        CurveData {
            flow: Vec::new(),
            head: Vec::new(),
            efficiency: Vec::new(),
            speed: Vec::new(),
        }
    }

    /// Flattens per-speed curves into one set of samples, in the given order.
    pub fn from_speed_curves(curves: &[SpeedCurve]) -> Result<Self> {
        let mut data = CurveData::empty();
        for curve in curves {
            let n = curve.flow.len();
            for (field, found) in [
                ("head", curve.head.len()),
                ("efficiency", curve.efficiency.len()),
            ] {
                if found != n {
                    return Err(ExportError::Validation {
                        field,
                        expected: n,
                        found,
                    });
                }
            }
            data.flow.extend_from_slice(&curve.flow);
            data.head.extend_from_slice(&curve.head);
            data.efficiency.extend_from_slice(&curve.efficiency);
            data.speed.extend(std::iter::repeat_n(curve.speed, n));
        }
        Ok(data)
    }

    /// Converts speeds given in `unit` to RPM.
    pub fn with_speed_unit(mut self, unit: SpeedUnit) -> Self {
        if unit != SpeedUnit::Rpm {
            for speed in &mut self.speed {
                *speed = unit.to_rpm(*speed);
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.flow.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flow.is_empty()
    }

    pub fn flow(&self) -> &[f64] {
        &self.flow
    }

    pub fn head(&self) -> &[f64] {
        &self.head
    }

    pub fn efficiency(&self) -> &[f64] {
        &self.efficiency
    }

    pub fn speed(&self) -> &[f64] {
        &self.speed
    }

    pub fn points(&self) -> impl Iterator<Item = CurvePoint> + '_ {
        (0..self.len()).map(|i| CurvePoint {
            flow: self.flow[i],
            head: self.head[i],
            efficiency: self.efficiency[i],
            speed: self.speed[i],
        })
    }
}

impl Default for CurveData {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_lengths() {
        let err = CurveData::new(
            vec![1.0, 2.0],
            vec![10.0, 20.0],
            vec![0.5],
            vec![100.0, 200.0],
        )
        .unwrap_err();
        match err {
            ExportError::Validation {
                field,
                expected,
                found,
            } => {
                assert_eq!(field, "efficiency");
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn points_walk_all_four_sequences_together() {
        let data = CurveData::new(
            vec![1.0, 2.0],
            vec![10.0, 20.0],
            vec![0.5, 0.6],
            vec![100.0, 200.0],
        )
        .unwrap();
        let points: Vec<_> = data.points().collect();
        assert_eq!(points.len(), 2);
        assert_eq!(
            points[1],
            CurvePoint {
                flow: 2.0,
                head: 20.0,
                efficiency: 0.6,
                speed: 200.0
            }
        );
    }

    #[test]
    fn speed_curves_flatten_in_order() {
        let curves = vec![
            SpeedCurve {
                speed: 9000.0,
                flow: vec![1.0, 2.0],
                head: vec![50.0, 40.0],
                efficiency: vec![0.7, 0.8],
            },
            SpeedCurve {
                speed: 11000.0,
                flow: vec![1.5],
                head: vec![70.0],
                efficiency: vec![0.75],
            },
        ];
        let data = CurveData::from_speed_curves(&curves).unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data.flow(), &[1.0, 2.0, 1.5]);
        assert_eq!(data.speed(), &[9000.0, 9000.0, 11000.0]);
    }

    #[test]
    fn speed_curve_with_short_head_is_rejected() {
        let curves = vec![SpeedCurve {
            speed: 9000.0,
            flow: vec![1.0, 2.0],
            head: vec![50.0],
            efficiency: vec![0.7, 0.8],
        }];
        assert!(matches!(
            CurveData::from_speed_curves(&curves),
            Err(ExportError::Validation { field: "head", .. })
        ));
    }

    #[test]
    fn speed_unit_conversion_only_touches_speed() {
        let data = CurveData::new(
            vec![1.0],
            vec![10.0],
            vec![0.5],
            vec![2.0 * std::f64::consts::PI * 25.0],
        )
        .unwrap()
        .with_speed_unit(SpeedUnit::RadPerSec);
        assert!((data.speed()[0] - 1500.0).abs() < 1e-9);
        assert_eq!(data.flow(), &[1.0]);
    }

    #[test]
    fn empty_data_has_no_points() {
        let data = CurveData::empty();
        assert!(data.is_empty());
        assert_eq!(data.points().count(), 0);
    }
}
