//! The `plot` variant: one 2D chart made of series.

use serde::{Deserialize, Deserializer, Serialize};

use super::style::StyleHint;
use crate::error::{Error, Result};

/// A number broadcast to every point, or one number per point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Values {
    /// Same value for all points.
    Scalar(f64),
    /// One value per point.
    Points(Vec<f64>),
}

impl Values {
    fn check_len(&self, expected: usize, path: &str) -> Result<()> {
        match self {
            Self::Points(points) if points.len() != expected => Err(Error::schema(
                path,
                format!("has {} values, expected {expected}", points.len()),
            )),
            _ => Ok(()),
        }
    }
}

impl From<f64> for Values {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<f64>> for Values {
    fn from(points: Vec<f64>) -> Self {
        Self::Points(points)
    }
}

/// One data trace of a plot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// x-coordinates. Defaults to `1..=y.len()`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<Vec<f64>>,
    /// y-coordinates.
    pub y: Vec<f64>,
    /// Legend entry.
    #[serde(
        default,
        deserialize_with = "label_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub label: Option<String>,
    /// 1-based index into the color cycle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<i64>,
    /// 1-based index into the line-style cycle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<i64>,
    /// `false` draws unconnected markers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined: Option<bool>,
    /// Symmetric uncertainty in x.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xerr: Option<Values>,
    /// Symmetric uncertainty in y.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yerr: Option<Values>,
    /// Lower end of the x error bar. Takes precedence over `xerr`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xmin: Option<Values>,
    /// Upper end of the x error bar. Takes precedence over `xerr`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xmax: Option<Values>,
    /// Lower end of the y error bar. Takes precedence over `yerr`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ymin: Option<Values>,
    /// Upper end of the y error bar. Takes precedence over `yerr`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ymax: Option<Values>,
    /// 1 to draw against the secondary x axis, 0 or absent for the primary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xadded: Option<u32>,
    /// 1 to draw against the secondary y axis, 0 or absent for the primary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yadded: Option<u32>,
}

impl Series {
    /// Creates a series from y values only.
    pub fn new(y: Vec<f64>) -> Self {
        Self {
            y,
            ..Self::default()
        }
    }

    /// Creates a series from paired coordinates.
    pub fn with_xy(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            x: Some(x),
            y,
            ..Self::default()
        }
    }

    /// x-coordinates, synthesizing the 1-based index when absent.
    pub fn x_values(&self) -> Vec<f64> {
        match &self.x {
            Some(x) => x.clone(),
            None => index_coordinates(self.y.len()),
        }
    }

    /// Non-empty legend label, if any.
    pub fn label_text(&self) -> Option<&str> {
        self.label.as_deref().filter(|label| !label.is_empty())
    }

    /// True if any y error field is present.
    pub fn has_y_error(&self) -> bool {
        self.yerr.is_some() || self.ymin.is_some() || self.ymax.is_some()
    }

    /// True if any x error field is present.
    pub fn has_x_error(&self) -> bool {
        self.xerr.is_some() || self.xmin.is_some() || self.xmax.is_some()
    }

    /// True if the series asked for unconnected markers.
    pub fn is_unjoined(&self) -> bool {
        self.joined == Some(false)
    }

    pub(crate) fn validate(&self, path: &str) -> Result<()> {
        if self.y.is_empty() {
            return Err(Error::schema(format!("{path}.y"), "must not be empty"));
        }
        let n = self.y.len();
        if let Some(x) = &self.x {
            if x.len() != n {
                return Err(Error::schema(
                    format!("{path}.x"),
                    format!("length {} does not match y length {n}", x.len()),
                ));
            }
        }
        let error_fields = [
            ("xerr", &self.xerr),
            ("yerr", &self.yerr),
            ("xmin", &self.xmin),
            ("xmax", &self.xmax),
            ("ymin", &self.ymin),
            ("ymax", &self.ymax),
        ];
        for (name, field) in error_fields {
            if let Some(values) = field {
                values.check_len(n, &format!("{path}.{name}"))?;
            }
        }
        for (name, index) in [("color", self.color), ("line", self.line)] {
            if matches!(index, Some(i) if i < 1) {
                return Err(Error::schema(
                    format!("{path}.{name}"),
                    "style indices start at 1",
                ));
            }
        }
        Ok(())
    }
}

/// `1.0, 2.0, ..., n` as used when coordinates are omitted.
pub(crate) fn index_coordinates(n: usize) -> Vec<f64> {
    (1..=n).map(|i| i as f64).collect()
}

/// Labels may be written as numbers; keep their JSON spelling.
fn label_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Label {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Label>::deserialize(deserializer)?.map(|label| match label {
        Label::Text(text) => text,
        Label::Number(number) => number.to_string(),
    }))
}

/// A secondary axis sharing the orthogonal coordinate with the primary one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddedAxis {
    /// Display range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    /// Logarithmic scale.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub log: bool,
    /// Axis label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Title of the legend gathering this axis' series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legendlabel: Option<String>,
}

/// Annotations drawn after everything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EpilogDirective {
    /// Free text at data coordinates.
    Text {
        /// Horizontal position.
        x: f64,
        /// Vertical position.
        y: f64,
        /// Text to place.
        text: String,
    },
}

/// A single 2D chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    /// Format version, reserved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Data traces, drawn in order.
    pub series: Vec<Series>,
    /// x-axis label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xlabel: Option<String>,
    /// y-axis label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ylabel: Option<String>,
    /// Plot title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Title of the legend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legendtitle: Option<String>,
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
    /// Secondary x axes (at most one is supported).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub xadded: Vec<AddedAxis>,
    /// Secondary y axes (at most one is supported).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub yadded: Vec<AddedAxis>,
    /// Style suggestions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleHint>,
    /// Trailing annotations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub epilog: Vec<EpilogDirective>,
}

impl Plot {
    /// Creates a plot from its series.
    pub fn new(series: Vec<Series>) -> Self {
        Self {
            series,
            ..Self::default()
        }
    }

    pub(crate) fn validate(&self, path: &str) -> Result<()> {
        if self.series.is_empty() {
            return Err(Error::schema(
                format!("{path}series"),
                "at least one series is required",
            ));
        }
        for (i, series) in self.series.iter().enumerate() {
            series.validate(&format!("{path}series[{i}]"))?;
        }
        Ok(())
    }
}
