//! The `multiplot` variant: a rectangular grid of plots.

use serde::{Deserialize, Serialize};

use super::colorplot::Colorplot;
use super::plot::Plot;
use super::style::StyleHint;
use crate::error::{Error, Result};

/// Axis sharing policy across grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shared {
    /// Every cell shares the axis.
    All,
    /// No sharing.
    None,
    /// Cells in a row share the axis.
    Row,
    /// Cells in a column share the axis.
    Col,
}

impl Shared {
    /// Keyword understood by the plotting library.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::None => "none",
            Self::Row => "row",
            Self::Col => "col",
        }
    }
}

/// A grid cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Cell {
    /// A series chart.
    Plot(Plot),
    /// A scalar-field chart.
    Colorplot(Colorplot),
}

impl Cell {
    /// The `type` tag of the cell.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Plot(_) => "plot",
            Self::Colorplot(_) => "colorplot",
        }
    }

    pub(crate) fn validate(&self, path: &str) -> Result<()> {
        match self {
            Self::Plot(plot) => plot.validate(path),
            Self::Colorplot(colorplot) => colorplot.validate(path),
        }
    }
}

/// A grid of plots sharing one figure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Multiplot {
    /// Format version, reserved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Rows of cells; every row has the same length.
    pub plots: Vec<Vec<Cell>>,
    /// Figure title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// x-axis sharing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xshared: Option<Shared>,
    /// y-axis sharing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yshared: Option<Shared>,
    /// `(horizontal, vertical)`: collapse the gap between adjacent cells.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined: Option<[bool; 2]>,
    /// Style suggestions for the whole figure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleHint>,
}

impl Multiplot {
    /// `(rows, cols)` of the grid, checking it is a non-empty rectangle.
    pub fn shape(&self) -> Result<(usize, usize)> {
        let rows = self.plots.len();
        let cols = self.plots.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(Error::schema("plots", "must contain at least one cell"));
        }
        if let Some(i) = self.plots.iter().position(|row| row.len() != cols) {
            return Err(Error::schema(
                format!("plots[{i}]"),
                format!(
                    "row has {} cells, expected {cols} (grid must be rectangular)",
                    self.plots[i].len()
                ),
            ));
        }
        Ok((rows, cols))
    }

    /// The only cell of a 1×1 grid.
    pub fn single_cell(&self) -> Option<&Cell> {
        match self.plots.as_slice() {
            [row] => match row.as_slice() {
                [cell] => Some(cell),
                _ => None,
            },
            _ => None,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        self.shape()?;
        for (i, row) in self.plots.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                cell.validate(&format!("plots[{i}][{j}]."))?;
            }
        }
        Ok(())
    }
}
