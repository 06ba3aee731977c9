//! The `colorplot` variant: a scalar field over a 2D grid.

use serde::{Deserialize, Serialize};

use super::style::StyleHint;
use crate::error::{Error, Result};

/// A 2D scalar-field chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Colorplot {
    /// Format version, reserved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Field values, one inner vector per row.
    pub z: Vec<Vec<f64>>,
    /// Column coordinates (centers, or edges with one extra value).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<Vec<f64>>,
    /// Row coordinates (centers, or edges with one extra value).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<Vec<f64>>,
    /// Draw contour lines instead of a mesh.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub contour: bool,
    /// With `contour`, fill the regions between levels.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fillcontour: bool,
    /// Logarithmic color scale.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub zlog: bool,
    /// Color scale bounds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zrange: Option<[f64; 2]>,
    /// Explicit contour levels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels: Option<Vec<f64>>,
    /// x display range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xrange: Option<[f64; 2]>,
    /// y display range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yrange: Option<[f64; 2]>,
    /// Logarithmic x axis.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub xlog: bool,
    /// Logarithmic y axis.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ylog: bool,
    /// x-axis label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xlabel: Option<String>,
    /// y-axis label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ylabel: Option<String>,
    /// Plot title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Style suggestions (unused by the field renderer).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleHint>,
}

impl Colorplot {
    /// Creates a colorplot from its field values.
    pub fn new(z: Vec<Vec<f64>>) -> Self {
        Self {
            z,
            ..Self::default()
        }
    }

    /// `(rows, cols)` of `z`, checking it is a non-empty rectangle.
    pub fn shape(&self) -> Result<(usize, usize)> {
        let rows = self.z.len();
        let cols = self.z.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(Error::schema("z", "must be a non-empty matrix"));
        }
        if let Some(i) = self.z.iter().position(|row| row.len() != cols) {
            return Err(Error::schema(
                format!("z[{i}]"),
                format!("has {} values, expected {cols}", self.z[i].len()),
            ));
        }
        Ok((rows, cols))
    }

    pub(crate) fn validate(&self, path: &str) -> Result<()> {
        let (rows, cols) = self
            .shape()
            .map_err(|err| prefix_path(err, path))?;
        for (name, coords, n) in [("x", &self.x, cols), ("y", &self.y, rows)] {
            if let Some(coords) = coords {
                if coords.len() != n && coords.len() != n + 1 {
                    return Err(Error::schema(
                        format!("{path}{name}"),
                        format!(
                            "length {} matches neither {n} centers nor {} edges",
                            coords.len(),
                            n + 1
                        ),
                    ));
                }
            }
        }
        Ok(())
    }
}

fn prefix_path(err: Error, prefix: &str) -> Error {
    match err {
        Error::Schema { path, message } => Error::Schema {
            path: format!("{prefix}{path}"),
            message,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape() {
        let plot = Colorplot::new(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        assert_eq!(plot.shape().unwrap(), (2, 3));
    }

    #[test]
    fn test_ragged_matrix_rejected() {
        let plot = Colorplot::new(vec![vec![1.0, 2.0], vec![4.0]]);
        let err = plot.validate("plots[0][0].").unwrap_err();
        assert!(err.to_string().contains("plots[0][0].z[1]"));
    }

    #[test]
    fn test_edge_and_center_lengths_accepted() {
        let mut plot = Colorplot::new(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        plot.x = Some(vec![5.0, 6.0, 7.0, 8.0]);
        plot.y = Some(vec![10.0, 11.0]);
        assert!(plot.validate("").is_ok());
    }

    #[test]
    fn test_bad_coordinate_length_rejected() {
        let mut plot = Colorplot::new(vec![vec![1.0, 2.0, 3.0]]);
        plot.x = Some(vec![1.0, 2.0]);
        let err = plot.validate("").unwrap_err();
        assert!(err.to_string().contains("'x'"));
    }
}
