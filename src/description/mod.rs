//! Figure descriptions: the `plot`, `colorplot` and `multiplot` variants.
//!
//! A description is parsed once, validated at this boundary, and then handed
//! to the compiler as immutable input. Presence or absence of optional fields
//! is decided here through `Option` fields, so the compiler never probes raw
//! maps.
//!
//! # Example
//!
//! ```rust
//! use vfd::description::Description;
//!
//! let description = Description::from_json(r#"{"type": "plot", "series": [{"y": [1, 2, 3]}]}"#)
//!     .unwrap();
//! assert_eq!(description.type_name(), "plot");
//! ```

mod colorplot;
mod json;
mod multiplot;
mod plot;
mod style;

pub use colorplot::Colorplot;
pub use multiplot::{Cell, Multiplot, Shared};
pub use plot::{AddedAxis, EpilogDirective, Plot, Series, Values};
pub use style::StyleHint;

pub(crate) use plot::index_coordinates;

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Root of a figure description, tagged by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Description {
    /// A single chart of series.
    Plot(Plot),
    /// A single scalar-field chart.
    Colorplot(Colorplot),
    /// A grid of charts.
    Multiplot(Multiplot),
}

impl Description {
    /// The `type` tag of the description.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Plot(_) => "plot",
            Self::Colorplot(_) => "colorplot",
            Self::Multiplot(_) => "multiplot",
        }
    }

    /// Parses and validates a description from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Reads, parses and validates a description file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&text)
    }

    /// Converts an already-parsed JSON value, checking the `type` tag first.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::schema("description", "expected a JSON object"));
        }
        let kind = match value.get("type") {
            Some(Value::String(kind)) => kind.clone(),
            Some(other) => return Err(Error::UnknownVariant(other.to_string())),
            None => return Err(Error::UnknownVariant("missing `type` field".into())),
        };
        let description = match kind.as_str() {
            "plot" => Self::Plot(typed(value, &kind)?),
            "colorplot" => Self::Colorplot(typed(value, &kind)?),
            "multiplot" => Self::Multiplot(typed(value, &kind)?),
            _ => return Err(Error::UnknownVariant(kind)),
        };
        description.validate()?;
        Ok(description)
    }

    /// Checks the invariants serde cannot express: matching lengths,
    /// rectangular grids and matrices, 1-based style indices.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Plot(plot) => plot.validate(""),
            Self::Colorplot(colorplot) => colorplot.validate(""),
            Self::Multiplot(multiplot) => multiplot.validate(),
        }
    }

    /// Top-level style hint, if any.
    pub fn style(&self) -> Option<&StyleHint> {
        match self {
            Self::Plot(plot) => plot.style.as_ref(),
            Self::Colorplot(colorplot) => colorplot.style.as_ref(),
            Self::Multiplot(multiplot) => multiplot.style.as_ref(),
        }
    }

    /// Serializes the description with sorted keys.
    ///
    /// The readable form (`compact == false`) indents nested objects but
    /// keeps arrays of numbers on a single line.
    pub fn to_json(&self, compact: bool) -> Result<String> {
        let value = serde_json::to_value(self)?;
        if compact {
            Ok(value.to_string())
        } else {
            Ok(json::to_pretty(&value))
        }
    }
}

impl From<Cell> for Description {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Plot(plot) => Self::Plot(plot),
            Cell::Colorplot(colorplot) => Self::Colorplot(colorplot),
        }
    }
}

fn typed<T: DeserializeOwned>(value: Value, kind: &str) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::schema(kind, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plot() {
        let description =
            Description::from_json(r#"{"type": "plot", "series": [{"y": [1, 2, 3]}]}"#).unwrap();
        match description {
            Description::Plot(plot) => assert_eq!(plot.series[0].y, vec![1.0, 2.0, 3.0]),
            other => panic!("expected plot, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_type() {
        let err = Description::from_json(r#"{"series": [{"y": [1]}]}"#).unwrap_err();
        assert!(matches!(err, Error::UnknownVariant(_)));
    }

    #[test]
    fn test_unknown_type() {
        let err = Description::from_json(r#"{"type": "pie"}"#).unwrap_err();
        assert!(matches!(err, Error::UnknownVariant(ref kind) if kind == "pie"));
    }

    #[test]
    fn test_non_string_type() {
        let err = Description::from_json(r#"{"type": 3}"#).unwrap_err();
        assert!(matches!(err, Error::UnknownVariant(_)));
    }

    #[test]
    fn test_missing_required_field_is_schema_error() {
        let err = Description::from_json(r#"{"type": "colorplot"}"#).unwrap_err();
        assert!(matches!(err, Error::Schema { ref path, .. } if path == "colorplot"));
    }

    #[test]
    fn test_wrong_field_type_is_schema_error() {
        let err = Description::from_json(r#"{"type": "plot", "series": [{"y": "abc"}]}"#)
            .unwrap_err();
        assert!(matches!(err, Error::Schema { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = Description::from_json("{\"type\": ").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_ragged_multiplot_rejected_at_parse() {
        let text = r#"{"type": "multiplot", "plots": [
            [{"type": "plot", "series": [{"y": [1]}]}, {"type": "plot", "series": [{"y": [1]}]}],
            [{"type": "plot", "series": [{"y": [1]}]}]
        ]}"#;
        let err = Description::from_json(text).unwrap_err();
        assert!(matches!(err, Error::Schema { ref path, .. } if path == "plots[1]"));
    }

    #[test]
    fn test_nested_cell_errors_carry_grid_path() {
        let text = r#"{"type": "multiplot", "plots": [
            [{"type": "plot", "series": [{"x": [1, 2], "y": [1]}]}]
        ]}"#;
        let err = Description::from_json(text).unwrap_err();
        assert!(err.to_string().contains("plots[0][0].series[0].x"));
    }

    #[test]
    fn test_version_field_tolerated() {
        let text = r#"{"type": "plot", "version": "1.0", "series": [{"y": [1]}]}"#;
        assert!(Description::from_json(text).is_ok());
    }

    #[test]
    fn test_json_roundtrip_preserves_description() {
        let text = r#"{"type": "plot", "xlabel": "t", "ylog": true,
            "series": [{"y": [1, 2], "label": "a", "yerr": 0.5, "joined": false}]}"#;
        let description = Description::from_json(text).unwrap();
        let again = Description::from_json(&description.to_json(false).unwrap()).unwrap();
        assert_eq!(description, again);
        let again = Description::from_json(&description.to_json(true).unwrap()).unwrap();
        assert_eq!(description, again);
    }

    #[test]
    fn test_from_cell() {
        let cell = Cell::Colorplot(Colorplot::new(vec![vec![1.0]]));
        assert_eq!(Description::from(cell).type_name(), "colorplot");
    }
}
