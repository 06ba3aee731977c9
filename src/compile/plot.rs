//! `plot` descriptions to statements.

use super::errorbar::{x_bounds, y_bounds};
use super::style::StyleCycle;
use crate::description::{AddedAxis, EpilogDirective, Plot};
use crate::error::{Error, Result};
use crate::script::{
    Axes, Axis, LegendLoc, SecondaryAxis, SeriesStyle, Statement, TitlePlacement,
};

/// Name bound to the primary axes when the current axes must be addressed
/// explicitly.
const PRIMARY: &str = "ax";

/// Where a plot is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotTarget {
    /// Axes container of the primary axes.
    pub axes: Axes,
    /// Title placement.
    pub title: TitlePlacement,
}

impl PlotTarget {
    /// The implicit current axes with a regular title.
    pub fn current() -> Self {
        Self {
            axes: Axes::Current,
            title: TitlePlacement::Above,
        }
    }

    /// A grid cell with the title drawn inside the chart.
    pub fn cell(row: usize, col: usize, rows: usize, cols: usize) -> Self {
        Self {
            axes: Axes::Cell {
                row,
                col,
                rows,
                cols,
            },
            title: TitlePlacement::Inside,
        }
    }
}

/// The secondary axis used by a plot.
#[derive(Debug, Clone, Copy)]
struct Secondary<'a> {
    kind: SecondaryAxis,
    settings: Option<&'a AddedAxis>,
}

/// Finds which secondary axis, if any, the series of `plot` draw against.
fn secondary_axis(plot: &Plot) -> Result<Option<Secondary<'_>>> {
    for (name, added) in [("xadded", &plot.xadded), ("yadded", &plot.yadded)] {
        if added.len() > 1 {
            return Err(Error::Unsupported(format!(
                "{name} declares {} secondary axes; only one per direction is supported",
                added.len()
            )));
        }
    }
    let mut uses_x = false;
    let mut uses_y = false;
    for (i, series) in plot.series.iter().enumerate() {
        for (name, index, used) in [
            ("xadded", series.xadded, &mut uses_x),
            ("yadded", series.yadded, &mut uses_y),
        ] {
            match index {
                None | Some(0) => {}
                Some(1) => *used = true,
                Some(k) => {
                    return Err(Error::Unsupported(format!(
                        "series[{i}].{name} = {k}; only one secondary axis per direction is supported"
                    )))
                }
            }
        }
    }
    Ok(match (uses_x, uses_y) {
        (true, true) => {
            return Err(Error::Unsupported(
                "secondary x and y axes in the same plot".into(),
            ))
        }
        (true, false) => Some(Secondary {
            kind: SecondaryAxis::X,
            settings: plot.xadded.first(),
        }),
        (false, true) => Some(Secondary {
            kind: SecondaryAxis::Y,
            settings: plot.yadded.first(),
        }),
        (false, false) => None,
    })
}

/// Compiles one chart of series into statements drawing into `target`.
///
/// Statements come out in dependency order: axes handles, series, ranges and
/// scales, legends, labels, secondary axis decorations, title, epilog.
pub fn compile_plot(plot: &Plot, target: &PlotTarget, style: &StyleCycle) -> Result<Vec<Statement>> {
    let secondary = secondary_axis(plot)?;
    let mut out = Vec::with_capacity(plot.series.len() + 8);

    let primary = match (&secondary, &target.axes) {
        (Some(_), Axes::Current) => {
            out.push(Statement::MaterializeAxes {
                name: PRIMARY.into(),
            });
            Axes::Named(PRIMARY.into())
        }
        _ => target.axes.clone(),
    };
    let twin = secondary.map(|secondary| {
        out.push(Statement::CreateSecondaryAxes {
            parent: primary.clone(),
            secondary: secondary.kind,
        });
        primary.twin(secondary.kind)
    });

    let mut cycler = style.cycler();
    let mut primary_labeled = false;
    let mut secondary_labeled = false;
    for (i, series) in plot.series.iter().enumerate() {
        series.validate(&format!("series[{i}]"))?;
        let on_secondary = series.xadded == Some(1) || series.yadded == Some(1);
        let axes = match (&twin, on_secondary) {
            (Some(twin), true) => twin.clone(),
            _ => primary.clone(),
        };
        let label = series.label_text().map(str::to_owned);
        if label.is_some() {
            if on_secondary {
                secondary_labeled = true;
            } else {
                primary_labeled = true;
            }
        }
        let mut color = cycler.color(series.color);
        if color.is_none() && on_secondary {
            // A twin axes restarts the library cycle; keep the overall position.
            color = Some(format!("C{i}"));
        }
        let series_style = SeriesStyle {
            label,
            color,
            linestyle: cycler.line(series.line),
        };
        let marker = if series.is_unjoined() {
            cycler.next_marker()
        } else {
            None
        };
        let x = series.x_values();
        if series.has_x_error() || series.has_y_error() {
            out.push(Statement::DrawErrorBar {
                axes,
                xerr: x_bounds(series, &x),
                yerr: y_bounds(series),
                x,
                y: series.y.clone(),
                marker,
                style: series_style,
            });
        } else {
            out.push(Statement::DrawLine {
                axes,
                x,
                y: series.y.clone(),
                marker,
                style: series_style,
            });
        }
    }

    for (axis, range) in [(Axis::X, plot.xrange), (Axis::Y, plot.yrange)] {
        if let Some(range) = range {
            out.push(Statement::SetLimits {
                axes: primary.clone(),
                axis,
                range,
            });
        }
    }
    for (axis, log) in [(Axis::X, plot.xlog), (Axis::Y, plot.ylog)] {
        if log {
            out.push(Statement::SetLogScale {
                axes: primary.clone(),
                axis,
            });
        }
    }

    let secondary_legend = match (&twin, &secondary) {
        (Some(twin), Some(secondary)) if secondary_labeled => {
            out.push(Statement::SetLegend {
                axes: twin.clone(),
                loc: Some(LegendLoc::UpperRight),
                title: secondary.settings.and_then(|s| s.legendlabel.clone()),
            });
            Some(secondary.kind)
        }
        _ => None,
    };
    if primary_labeled {
        let loc = secondary_legend.map(|kind| match kind {
            SecondaryAxis::X => LegendLoc::LowerRight,
            SecondaryAxis::Y => LegendLoc::LowerLeft,
        });
        out.push(Statement::SetLegend {
            axes: primary.clone(),
            loc,
            title: plot.legendtitle.clone(),
        });
    }

    for (axis, label) in [(Axis::X, &plot.xlabel), (Axis::Y, &plot.ylabel)] {
        if let Some(text) = label {
            out.push(Statement::SetLabel {
                axes: primary.clone(),
                axis,
                text: text.clone(),
            });
        }
    }
    if let (Some(twin), Some(Secondary { kind, settings: Some(settings) })) = (&twin, &secondary) {
        let axis = kind.axis();
        if let Some(text) = &settings.label {
            out.push(Statement::SetLabel {
                axes: twin.clone(),
                axis,
                text: text.clone(),
            });
        }
        if let Some(range) = settings.range {
            out.push(Statement::SetLimits {
                axes: twin.clone(),
                axis,
                range,
            });
        }
        if settings.log {
            out.push(Statement::SetLogScale {
                axes: twin.clone(),
                axis,
            });
        }
    }

    if let Some(text) = plot.title.as_ref().filter(|t| !t.is_empty()) {
        out.push(Statement::SetTitle {
            axes: primary.clone(),
            text: text.clone(),
            placement: target.title,
        });
    }

    for directive in &plot.epilog {
        match directive {
            EpilogDirective::Text { x, y, text } => out.push(Statement::Annotate {
                axes: primary.clone(),
                x: *x,
                y: *y,
                text: text.clone(),
            }),
        }
    }
    Ok(out)
}
