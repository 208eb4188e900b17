//! Axis layout and radius scaling for radar charts.
//!
//! Angles are measured in degrees clockwise from the top of the chart, so
//! axis `i` of `n` sits at `i * 360 / n`. Screen coordinates have y growing
//! downwards.

use crate::error::{PokedexError, Result};

/// Labels are anchored this much further out than the outer edge.
pub const LABEL_RADIUS_FACTOR: f32 = 1.05;

pub const MIN_AXES: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub label: String,
    pub angle_deg: f64,
    pub value: f64,
    /// Distance from the center as a share of the outer radius, in `[0, 1]`.
    pub fraction: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarGeometry {
    pub axes: Vec<Axis>,
    /// Value mapped to the outer edge.
    pub max_value: f64,
}

pub fn axis_angles(count: usize) -> Vec<f64> {
    let step = 360.0 / count as f64;
    (0..count).map(|i| i as f64 * step).collect()
}

pub fn polar_to_screen(center: (f32, f32), radius: f32, angle_deg: f64) -> (f32, f32) {
    let theta = angle_deg.to_radians();
    (
        center.0 + radius * theta.sin() as f32,
        center.1 - radius * theta.cos() as f32,
    )
}

impl RadarGeometry {
    pub fn new<S: AsRef<str>>(labels: &[S], values: &[f64], cap: Option<f64>) -> Result<Self> {
        if labels.len() != values.len() {
            return Err(PokedexError::InvalidChartInput(format!(
                "{} labels for {} values",
                labels.len(),
                values.len()
            )));
        }
        if labels.len() < MIN_AXES {
            return Err(PokedexError::InvalidChartInput(format!(
                "at least {} axes required, got {}",
                MIN_AXES,
                labels.len()
            )));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(PokedexError::InvalidChartInput(format!(
                "values must be finite and non-negative, got {}",
                bad
            )));
        }
        if let Some(cap) = cap {
            if !cap.is_finite() || cap <= 0.0 {
                return Err(PokedexError::InvalidChartInput(format!(
                    "cap must be positive, got {}",
                    cap
                )));
            }
        }

        let max_value = cap.unwrap_or_else(|| values.iter().copied().fold(0.0, f64::max));
        let axes = labels
            .iter()
            .zip(values)
            .zip(axis_angles(labels.len()))
            .map(|((label, &value), angle_deg)| Axis {
                label: label.as_ref().to_string(),
                angle_deg,
                value,
                fraction: if max_value > 0.0 {
                    (value / max_value).min(1.0)
                } else {
                    0.0
                },
            })
            .collect();

        Ok(Self { axes, max_value })
    }

    /// All values are zero: the polygon collapses onto the center.
    pub fn is_degenerate(&self) -> bool {
        self.axes.iter().all(|axis| axis.fraction == 0.0)
    }

    pub fn vertex(&self, index: usize, center: (f32, f32), radius: f32) -> (f32, f32) {
        let axis = &self.axes[index];
        polar_to_screen(center, radius * axis.fraction as f32, axis.angle_deg)
    }

    /// Polygon vertices with the first one repeated at the end.
    pub fn outline(&self, center: (f32, f32), radius: f32) -> Vec<(f32, f32)> {
        (0..self.axes.len())
            .chain(std::iter::once(0))
            .map(|i| self.vertex(i, center, radius))
            .collect()
    }

    pub fn label_anchor(&self, index: usize, center: (f32, f32), radius: f32) -> (f32, f32) {
        polar_to_screen(
            center,
            radius * LABEL_RADIUS_FACTOR,
            self.axes[index].angle_deg,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset_store::attributes::Stat;

    const BULBASAUR: [f64; 6] = [45.0, 49.0, 49.0, 65.0, 65.0, 45.0];

    fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
        ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
    }

    #[test]
    fn six_axes_are_sixty_degrees_apart_from_the_top() {
        assert_eq!(
            axis_angles(6),
            vec![0.0, 60.0, 120.0, 180.0, 240.0, 300.0]
        );
    }

    #[test]
    fn first_axis_points_up_and_second_goes_clockwise() {
        let top = polar_to_screen((100.0, 100.0), 50.0, 0.0);
        let right = polar_to_screen((100.0, 100.0), 50.0, 90.0);

        assert!((top.0 - 100.0).abs() < 1e-4 && (top.1 - 50.0).abs() < 1e-4);
        assert!((right.0 - 150.0).abs() < 1e-4 && (right.1 - 100.0).abs() < 1e-4);
    }

    #[test]
    fn radius_scales_linearly_to_the_largest_value() {
        let geometry = RadarGeometry::new(&Stat::labels(), &BULBASAUR, None).unwrap();
        let center = (150.0, 150.0);
        let hp = distance(geometry.vertex(0, center, 100.0), center);
        let sp_atk = distance(geometry.vertex(3, center, 100.0), center);

        assert_eq!(geometry.max_value, 65.0);
        assert!((sp_atk - 100.0).abs() < 1e-3);
        assert!((hp / sp_atk - 45.0 / 65.0).abs() < 0.01);
    }

    #[test]
    fn outline_is_closed() {
        let geometry = RadarGeometry::new(&Stat::labels(), &BULBASAUR, None).unwrap();
        let outline = geometry.outline((0.0, 0.0), 10.0);

        assert_eq!(outline.len(), 7);
        assert_eq!(outline.first(), outline.last());
    }

    #[test]
    fn explicit_cap_clamps_large_values() {
        let geometry =
            RadarGeometry::new(&["a", "b", "c"], &[50.0, 100.0, 150.0], Some(100.0)).unwrap();
        let fractions: Vec<f64> = geometry.axes.iter().map(|a| a.fraction).collect();

        assert_eq!(fractions, vec![0.5, 1.0, 1.0]);
    }

    #[test]
    fn all_zero_values_collapse_without_dividing_by_zero() {
        let geometry = RadarGeometry::new(&["a", "b", "c"], &[0.0, 0.0, 0.0], None).unwrap();

        assert!(geometry.is_degenerate());
        assert!(geometry
            .outline((10.0, 10.0), 5.0)
            .iter()
            .all(|p| (p.0 - 10.0).abs() < 1e-6 && (p.1 - 10.0).abs() < 1e-6));
    }

    #[test]
    fn rejects_mismatched_and_short_inputs() {
        assert!(matches!(
            RadarGeometry::new(&["a", "b", "c"], &[1.0, 2.0], None),
            Err(PokedexError::InvalidChartInput(_))
        ));
        assert!(matches!(
            RadarGeometry::new(&["a", "b"], &[1.0, 2.0], None),
            Err(PokedexError::InvalidChartInput(_))
        ));
        assert!(matches!(
            RadarGeometry::new(&["a", "b", "c"], &[1.0, -2.0, 3.0], None),
            Err(PokedexError::InvalidChartInput(_))
        ));
        assert!(matches!(
            RadarGeometry::new(&["a", "b", "c"], &[1.0, 2.0, 3.0], Some(0.0)),
            Err(PokedexError::InvalidChartInput(_))
        ));
    }
}
