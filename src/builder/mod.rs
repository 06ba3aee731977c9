//! Recording façade with a pyplot-like surface.
//!
//! [`FigureBuilder`] and [`AxesBuilder`] record drawing calls and turn them
//! into a [`Description`] that can be saved as a `.vfd` file and compiled
//! later. Both expose the same operations through [`PlotSurface`]: a figure
//! forwards them to its current axes, the way `pyplot` does.
//!
//! # Example
//!
//! ```rust
//! use vfd::builder::{FigureBuilder, PlotSurface};
//!
//! let mut fig = FigureBuilder::new();
//! fig.plot(None, &[1.0, 4.0, 9.0], Some("squares")).unwrap();
//! fig.set_xlabel("n");
//! fig.legend(None);
//! let json = fig.to_json(true).unwrap();
//! assert!(json.contains(r#""label":"squares""#));
//! ```

use std::path::{Path, PathBuf};

use crate::batch::{self, BatchOptions, Outputs};
use crate::compile::edges_to_centers;
use crate::description::{
    index_coordinates, AddedAxis, Cell, Colorplot, Description, EpilogDirective, Multiplot, Plot,
    Series, Shared, Values,
};
use crate::error::{Error, Result};
use crate::script::SecondaryAxis;

/// Uncertainty passed to [`PlotSurface::errorbar`].
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSpec {
    /// Same symmetric error for every point.
    Symmetric(f64),
    /// One symmetric error per point.
    PerPoint(Vec<f64>),
    /// Distances below and above each point.
    Asymmetric {
        /// Distance down to the lower bound.
        lower: Vec<f64>,
        /// Distance up to the upper bound.
        upper: Vec<f64>,
    },
}

/// Error columns recorded for one direction.
enum ErrorColumns {
    Symmetric(Vec<f64>),
    Bounds(Vec<f64>, Vec<f64>),
}

impl ErrorSpec {
    fn columns(&self, values: &[f64], path: &str) -> Result<ErrorColumns> {
        let n = values.len();
        let check = |name: &str, column: &[f64]| {
            if column.len() == n {
                Ok(())
            } else {
                Err(Error::schema(
                    format!("{path}.{name}"),
                    format!("has {} values, expected {n}", column.len()),
                ))
            }
        };
        Ok(match self {
            Self::Symmetric(error) => ErrorColumns::Symmetric(vec![*error; n]),
            Self::PerPoint(errors) => {
                check("err", errors)?;
                ErrorColumns::Symmetric(errors.clone())
            }
            Self::Asymmetric { lower, upper } => {
                check("min", lower)?;
                check("max", upper)?;
                ErrorColumns::Bounds(
                    values.iter().zip(lower).map(|(v, d)| v - d).collect(),
                    values.iter().zip(upper).map(|(v, d)| v + d).collect(),
                )
            }
        })
    }
}

impl ErrorColumns {
    fn width(&self) -> usize {
        match self {
            Self::Symmetric(_) => 1,
            Self::Bounds(..) => 2,
        }
    }
}

/// Keeps the rows where every column is finite. Returns the kept columns and
/// the number of dropped rows.
fn retain_finite(columns: Vec<Vec<f64>>) -> (Vec<Vec<f64>>, usize) {
    let n = columns.first().map_or(0, Vec::len);
    let keep: Vec<bool> = (0..n)
        .map(|i| columns.iter().all(|c| c.get(i).is_some_and(|v| v.is_finite())))
        .collect();
    let dropped = keep.iter().filter(|k| !**k).count();
    let columns = columns
        .into_iter()
        .map(|column| {
            column
                .into_iter()
                .zip(&keep)
                .filter_map(|(v, k)| k.then_some(v))
                .collect()
        })
        .collect();
    (columns, dropped)
}

fn check_same_len(path: &str, x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() == y.len() {
        Ok(())
    } else {
        Err(Error::schema(
            format!("{path}.x"),
            format!("length {} does not match y length {}", x.len(), y.len()),
        ))
    }
}

/// Recorded state of one axes container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxesBuilder {
    plot: Plot,
    field: Option<Colorplot>,
    twins: Vec<(SecondaryAxis, AxesBuilder)>,
}

impl AxesBuilder {
    /// Creates an empty axes recorder.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_path(&self) -> String {
        format!("series[{}]", self.plot.series.len())
    }

    fn push_series(&mut self, x: Option<&[f64]>, y: &[f64], label: Option<&str>) -> Result<()> {
        let path = self.next_path();
        let x = match x {
            Some(x) => {
                check_same_len(&path, x, y)?;
                x.to_vec()
            }
            None => index_coordinates(y.len()),
        };
        let (columns, dropped) = retain_finite(vec![x, y.to_vec()]);
        let mut columns = columns.into_iter();
        let x = columns.next().unwrap_or_default();
        let y = columns.next().unwrap_or_default();
        if dropped > 0 {
            log::warn!("{path}: dropped {dropped} non-finite point(s)");
        }
        if y.is_empty() {
            log::warn!("{path}: no finite point left, series not recorded");
            return Ok(());
        }
        let mut series = Series::with_xy(x, y);
        series.label = label.map(str::to_owned);
        self.plot.series.push(series);
        Ok(())
    }

    fn push_errorbar(
        &mut self,
        x: &[f64],
        y: &[f64],
        yerr: Option<&ErrorSpec>,
        xerr: Option<&ErrorSpec>,
        label: Option<&str>,
    ) -> Result<()> {
        let path = self.next_path();
        check_same_len(&path, x, y)?;
        let ycols = yerr
            .map(|err| err.columns(y, &format!("{path}.y")))
            .transpose()?;
        let xcols = xerr
            .map(|err| err.columns(x, &format!("{path}.x")))
            .transpose()?;

        let mut columns = vec![x.to_vec(), y.to_vec()];
        for extra in [&ycols, &xcols].into_iter().flatten() {
            match extra {
                ErrorColumns::Symmetric(c) => columns.push(c.clone()),
                ErrorColumns::Bounds(lo, hi) => {
                    columns.push(lo.clone());
                    columns.push(hi.clone());
                }
            }
        }
        let (columns, dropped) = retain_finite(columns);
        if dropped > 0 {
            log::warn!("{path}: dropped {dropped} non-finite point(s)");
        }
        if columns.first().map_or(0, Vec::len) == 0 {
            log::warn!("{path}: no finite point left, series not recorded");
            return Ok(());
        }
        let mut columns = columns.into_iter();
        let mut series = Series::with_xy(
            columns.next().unwrap_or_default(),
            columns.next().unwrap_or_default(),
        );
        if let Some(cols) = &ycols {
            let taken: Vec<Vec<f64>> = columns.by_ref().take(cols.width()).collect();
            match taken.as_slice() {
                [err] => series.yerr = Some(Values::Points(err.clone())),
                [lo, hi] => {
                    series.ymin = Some(Values::Points(lo.clone()));
                    series.ymax = Some(Values::Points(hi.clone()));
                }
                _ => {}
            }
        }
        if let Some(cols) = &xcols {
            let taken: Vec<Vec<f64>> = columns.by_ref().take(cols.width()).collect();
            match taken.as_slice() {
                [err] => series.xerr = Some(Values::Points(err.clone())),
                [lo, hi] => {
                    series.xmin = Some(Values::Points(lo.clone()));
                    series.xmax = Some(Values::Points(hi.clone()));
                }
                _ => {}
            }
        }
        series.label = label.map(str::to_owned);
        self.plot.series.push(series);
        Ok(())
    }

    fn set_field(
        &mut self,
        x: Option<&[f64]>,
        y: Option<&[f64]>,
        z: &[Vec<f64>],
        contour: bool,
        fillcontour: bool,
        zlog: bool,
    ) -> Result<()> {
        let mut colorplot = Colorplot::new(z.to_vec());
        let (rows, cols) = colorplot.shape()?;
        for (i, row) in z.iter().enumerate() {
            if let Some(j) = row.iter().position(|v| !v.is_finite()) {
                return Err(Error::schema(format!("z[{i}][{j}]"), "value is not finite"));
            }
        }
        let coordinates = |name: &str, coords: Option<&[f64]>, n: usize| -> Result<Option<Vec<f64>>> {
            let Some(coords) = coords else {
                return Ok(None);
            };
            if coords.iter().any(|v| !v.is_finite()) {
                return Err(Error::schema(name, "coordinates must be finite"));
            }
            if coords.len() == n + 1 {
                Ok(Some(edges_to_centers(coords)))
            } else if coords.len() == n {
                Ok(Some(coords.to_vec()))
            } else {
                Err(Error::schema(
                    name,
                    format!("length {} matches neither {n} centers nor {} edges", coords.len(), n + 1),
                ))
            }
        };
        colorplot.x = coordinates("x", x, cols)?;
        colorplot.y = coordinates("y", y, rows)?;
        colorplot.contour = contour;
        colorplot.fillcontour = fillcontour;
        colorplot.zlog = zlog;
        if !self.plot.series.is_empty() {
            log::warn!(
                "scalar field replaces {} recorded series on the same axes",
                self.plot.series.len()
            );
        }
        self.field = Some(colorplot);
        Ok(())
    }

    fn twin(&mut self, secondary: SecondaryAxis) -> &mut AxesBuilder {
        let index = match self.twins.iter().position(|(kind, _)| *kind == secondary) {
            Some(index) => index,
            None => {
                self.twins.push((secondary, AxesBuilder::new()));
                self.twins.len() - 1
            }
        };
        &mut self.twins[index].1
    }

    /// Secondary axes sharing x (drawn against a second y axis).
    ///
    /// Calling it again returns the same secondary axes.
    pub fn twinx(&mut self) -> &mut AxesBuilder {
        self.twin(SecondaryAxis::Y)
    }

    /// Secondary axes sharing y (drawn against a second x axis).
    ///
    /// Calling it again returns the same secondary axes.
    pub fn twiny(&mut self) -> &mut AxesBuilder {
        self.twin(SecondaryAxis::X)
    }

    /// The recorded chart.
    pub fn description(&self) -> Description {
        self.cell().into()
    }

    /// The recorded chart as a grid cell.
    ///
    /// A scalar field makes this a `colorplot` carrying the recorded labels,
    /// ranges and title. Otherwise secondary axes are folded into the `plot`:
    /// their series are appended with `yadded`/`xadded` set and their
    /// decorations become the added axis.
    pub fn cell(&self) -> Cell {
        if let Some(field) = &self.field {
            if !self.twins.is_empty() {
                log::warn!("secondary axes are not recorded for scalar fields");
            }
            let mut colorplot = field.clone();
            colorplot.xlabel.clone_from(&self.plot.xlabel);
            colorplot.ylabel.clone_from(&self.plot.ylabel);
            colorplot.title.clone_from(&self.plot.title);
            colorplot.xrange = self.plot.xrange;
            colorplot.yrange = self.plot.yrange;
            colorplot.xlog = self.plot.xlog;
            colorplot.ylog = self.plot.ylog;
            return Cell::Colorplot(colorplot);
        }

        let mut plot = self.plot.clone();
        for (secondary, twin) in &self.twins {
            let recorded = &twin.plot;
            let added = match secondary {
                SecondaryAxis::Y => AddedAxis {
                    range: recorded.yrange,
                    log: recorded.ylog,
                    label: recorded.ylabel.clone(),
                    legendlabel: recorded.legendtitle.clone(),
                },
                SecondaryAxis::X => AddedAxis {
                    range: recorded.xrange,
                    log: recorded.xlog,
                    label: recorded.xlabel.clone(),
                    legendlabel: recorded.legendtitle.clone(),
                },
            };
            for series in &recorded.series {
                let mut series = series.clone();
                match secondary {
                    SecondaryAxis::Y => series.yadded = Some(1),
                    SecondaryAxis::X => series.xadded = Some(1),
                }
                plot.series.push(series);
            }
            match secondary {
                SecondaryAxis::Y => plot.yadded = vec![added],
                SecondaryAxis::X => plot.xadded = vec![added],
            }
        }
        Cell::Plot(plot)
    }
}

/// Recording operations shared by figures and axes.
pub trait PlotSurface {
    /// Axes receiving the calls.
    fn target(&mut self) -> &mut AxesBuilder;

    /// Records a series. Without `x`, points are numbered from 1.
    fn plot(&mut self, x: Option<&[f64]>, y: &[f64], label: Option<&str>) -> Result<()> {
        self.target().push_series(x, y, label)
    }

    /// Records a series and sets a logarithmic x axis.
    fn semilogx(&mut self, x: Option<&[f64]>, y: &[f64], label: Option<&str>) -> Result<()> {
        let axes = self.target();
        axes.plot.xlog = true;
        axes.push_series(x, y, label)
    }

    /// Records a series and sets a logarithmic y axis.
    fn semilogy(&mut self, x: Option<&[f64]>, y: &[f64], label: Option<&str>) -> Result<()> {
        let axes = self.target();
        axes.plot.ylog = true;
        axes.push_series(x, y, label)
    }

    /// Records a series and sets both axes logarithmic.
    fn loglog(&mut self, x: Option<&[f64]>, y: &[f64], label: Option<&str>) -> Result<()> {
        let axes = self.target();
        axes.plot.xlog = true;
        axes.plot.ylog = true;
        axes.push_series(x, y, label)
    }

    /// Records a series with error bars.
    fn errorbar(
        &mut self,
        x: &[f64],
        y: &[f64],
        yerr: Option<&ErrorSpec>,
        xerr: Option<&ErrorSpec>,
        label: Option<&str>,
    ) -> Result<()> {
        self.target().push_errorbar(x, y, yerr, xerr, label)
    }

    /// Sets the x-axis label.
    fn set_xlabel(&mut self, text: &str) {
        self.target().plot.xlabel = Some(text.to_string());
    }

    /// Sets the y-axis label.
    fn set_ylabel(&mut self, text: &str) {
        self.target().plot.ylabel = Some(text.to_string());
    }

    /// Sets the chart title.
    fn set_title(&mut self, text: &str) {
        self.target().plot.title = Some(text.to_string());
    }

    /// Requests a legend, optionally titled.
    fn legend(&mut self, title: Option<&str>) {
        if let Some(title) = title {
            self.target().plot.legendtitle = Some(title.to_string());
        }
    }

    /// Sets the x display range.
    fn set_xlim(&mut self, min: f64, max: f64) {
        self.target().plot.xrange = Some([min, max]);
    }

    /// Sets the y display range.
    fn set_ylim(&mut self, min: f64, max: f64) {
        self.target().plot.yrange = Some([min, max]);
    }

    /// Places text at data coordinates.
    fn text(&mut self, x: f64, y: f64, text: &str) {
        self.target().plot.epilog.push(EpilogDirective::Text {
            x,
            y,
            text: text.to_string(),
        });
    }

    /// Records a scalar field drawn as a colored mesh.
    ///
    /// Coordinates may be cell centers or cell edges (one more value than
    /// cells); edges are averaged to centers.
    fn pcolormesh(
        &mut self,
        x: Option<&[f64]>,
        y: Option<&[f64]>,
        z: &[Vec<f64>],
        zlog: bool,
    ) -> Result<()> {
        self.target().set_field(x, y, z, false, false, zlog)
    }

    /// Records a scalar field drawn as contour lines.
    fn contour(
        &mut self,
        x: Option<&[f64]>,
        y: Option<&[f64]>,
        z: &[Vec<f64>],
        zlog: bool,
    ) -> Result<()> {
        self.target().set_field(x, y, z, true, false, zlog)
    }

    /// Records a scalar field drawn as filled contours.
    fn contourf(
        &mut self,
        x: Option<&[f64]>,
        y: Option<&[f64]>,
        z: &[Vec<f64>],
        zlog: bool,
    ) -> Result<()> {
        self.target().set_field(x, y, z, true, true, zlog)
    }
}

impl PlotSurface for AxesBuilder {
    fn target(&mut self) -> &mut AxesBuilder {
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Grid {
    cells: Vec<Vec<AxesBuilder>>,
    xshared: Option<Shared>,
    yshared: Option<Shared>,
}

/// Recorder for a whole figure.
///
/// Drawing calls go to the current axes until [`FigureBuilder::subplots`]
/// creates a grid; the grid cells are then reached with
/// [`FigureBuilder::axes_mut`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FigureBuilder {
    current: AxesBuilder,
    grid: Option<Grid>,
    title: Option<String>,
}

impl FigureBuilder {
    /// Creates an empty figure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the figure content with a `rows` × `cols` grid of axes.
    pub fn subplots(
        &mut self,
        rows: usize,
        cols: usize,
        sharex: Option<Shared>,
        sharey: Option<Shared>,
    ) -> Result<()> {
        if rows == 0 || cols == 0 {
            return Err(Error::schema(
                "plots",
                format!("grid of {rows}x{cols} has no cell"),
            ));
        }
        self.grid = Some(Grid {
            cells: vec![vec![AxesBuilder::new(); cols]; rows],
            xshared: sharex,
            yshared: sharey,
        });
        Ok(())
    }

    /// Grid cell at `(row, col)`, if a grid exists and the cell is inside it.
    pub fn axes_mut(&mut self, row: usize, col: usize) -> Option<&mut AxesBuilder> {
        self.grid
            .as_mut()
            .and_then(|grid| grid.cells.get_mut(row))
            .and_then(|cells| cells.get_mut(col))
    }

    /// Current axes, used outside of a grid.
    pub fn gca(&mut self) -> &mut AxesBuilder {
        &mut self.current
    }

    /// Secondary axes of the current axes sharing x.
    pub fn twinx(&mut self) -> &mut AxesBuilder {
        self.current.twinx()
    }

    /// Secondary axes of the current axes sharing y.
    pub fn twiny(&mut self) -> &mut AxesBuilder {
        self.current.twiny()
    }

    /// Sets the figure title of a grid.
    pub fn suptitle(&mut self, text: &str) {
        self.title = Some(text.to_string());
    }

    /// The recorded figure.
    pub fn description(&self) -> Description {
        match &self.grid {
            None => self.current.description(),
            Some(grid) => Description::Multiplot(Multiplot {
                plots: grid
                    .cells
                    .iter()
                    .map(|row| row.iter().map(AxesBuilder::cell).collect())
                    .collect(),
                title: self.title.clone(),
                xshared: grid.xshared,
                yshared: grid.yshared,
                ..Multiplot::default()
            }),
        }
    }

    /// JSON text of the recorded figure.
    pub fn to_json(&self, compact: bool) -> Result<String> {
        self.description().to_json(compact)
    }

    /// Writes the recorded figure as a `.vfd` file, replacing any extension
    /// of `path`. Returns the path written.
    ///
    /// Nothing is written when the recorded figure would not load back, for
    /// instance a grid cell with no series.
    pub fn save_vfd(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref().with_extension("vfd");
        let description = self.description();
        description.validate()?;
        std::fs::write(&path, description.to_json(false)?).map_err(|e| Error::io(&path, e))?;
        log::info!("wrote {}", path.display());
        Ok(path)
    }

    /// Saves the figure next to `path` and writes a script exporting it
    /// there, in the format named by the extension of `path`.
    ///
    /// Without an extension (or with `.vfd`) the formats of `options` are
    /// kept. The script is run when `options` carries a runner.
    pub fn save_figure(&self, path: impl AsRef<Path>, options: &BatchOptions) -> Result<Outputs> {
        let path = path.as_ref();
        let input = self.save_vfd(path)?;
        let mut options = options.clone();
        if let Some(format) = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .filter(|ext| ext != "vfd")
        {
            options.compile = options.compile.formats([format]);
        }
        if let Some(runner) = &options.runner {
            runner.probe()?;
        }
        batch::create_script_file(&input, &options)
    }

    /// Displays the figure by running its script from a temporary directory.
    ///
    /// The script shows the figure instead of saving it, and the call waits
    /// for the interpreter to exit. The runner of `options` is used, or the
    /// default one.
    pub fn show(&self, options: &BatchOptions) -> Result<()> {
        let dir = tempfile::tempdir().map_err(|e| Error::io(std::env::temp_dir(), e))?;
        let input = self.save_vfd(dir.path().join("figure"))?;
        let runner = options.runner.clone().unwrap_or_default();
        runner.probe()?;
        let options = BatchOptions {
            compile: options.compile.clone().formats(Vec::<String>::new()),
            expand_glob: false,
            xlsx: false,
            runner: Some(runner),
            blocking: true,
        };
        batch::create_script_file(&input, &options)?;
        Ok(())
    }
}

impl PlotSurface for FigureBuilder {
    fn target(&mut self) -> &mut AxesBuilder {
        &mut self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plot_of(description: Description) -> Plot {
        match description {
            Description::Plot(plot) => plot,
            other => panic!("expected plot, got {other:?}"),
        }
    }

    #[test]
    fn test_plot_records_series() {
        let mut fig = FigureBuilder::new();
        fig.plot(Some(&[0.0, 1.0]), &[2.0, 3.0], Some("a")).unwrap();
        fig.semilogy(None, &[1.0, 10.0], None).unwrap();
        fig.set_title("T");
        fig.set_xlim(0.0, 1.0);
        let plot = plot_of(fig.description());
        assert_eq!(plot.series.len(), 2);
        assert_eq!(plot.series[0].label.as_deref(), Some("a"));
        assert_eq!(plot.series[1].x, Some(vec![1.0, 2.0]));
        assert!(plot.ylog);
        assert!(!plot.xlog);
        assert_eq!(plot.title.as_deref(), Some("T"));
        assert_eq!(plot.xrange, Some([0.0, 1.0]));
    }

    #[test]
    fn test_non_finite_points_dropped_pairwise() {
        let mut axes = AxesBuilder::new();
        axes.plot(None, &[1.0, f64::NAN, 3.0, f64::INFINITY], None)
            .unwrap();
        let plot = plot_of(axes.description());
        assert_eq!(plot.series[0].x, Some(vec![1.0, 3.0]));
        assert_eq!(plot.series[0].y, vec![1.0, 3.0]);
    }

    #[test]
    fn test_length_mismatch() {
        let mut axes = AxesBuilder::new();
        let err = axes.plot(Some(&[1.0]), &[1.0, 2.0], None).unwrap_err();
        assert!(matches!(err, Error::Schema { ref path, .. } if path == "series[0].x"));
    }

    #[test]
    fn test_errorbar_specs() {
        let mut axes = AxesBuilder::new();
        axes.errorbar(&[1.0, 2.0], &[5.0, 6.0], Some(&ErrorSpec::Symmetric(0.5)), None, None)
            .unwrap();
        let asymmetric = ErrorSpec::Asymmetric {
            lower: vec![1.0, 2.0],
            upper: vec![0.5, 0.5],
        };
        axes.errorbar(&[1.0, 2.0], &[5.0, 6.0], None, Some(&asymmetric), None)
            .unwrap();
        let plot = plot_of(axes.description());
        assert_eq!(plot.series[0].yerr, Some(Values::Points(vec![0.5, 0.5])));
        assert_eq!(plot.series[1].xmin, Some(Values::Points(vec![0.0, 0.0])));
        assert_eq!(plot.series[1].xmax, Some(Values::Points(vec![1.5, 2.5])));
        assert!(plot.series[1].yerr.is_none());
    }

    #[test]
    fn test_errorbar_drops_rows_with_non_finite_error() {
        let mut axes = AxesBuilder::new();
        let errors = ErrorSpec::PerPoint(vec![0.1, f64::NAN, 0.3]);
        axes.errorbar(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], Some(&errors), None, None)
            .unwrap();
        let plot = plot_of(axes.description());
        assert_eq!(plot.series[0].x, Some(vec![1.0, 3.0]));
        assert_eq!(plot.series[0].yerr, Some(Values::Points(vec![0.1, 0.3])));
    }

    #[test]
    fn test_twinx_folds_into_parent() {
        let mut fig = FigureBuilder::new();
        fig.plot(None, &[1.0, 2.0], Some("left")).unwrap();
        let twin = fig.twinx();
        twin.plot(None, &[10.0, 20.0], Some("right")).unwrap();
        twin.set_ylabel("power");
        twin.semilogy(None, &[1.0, 100.0], None).unwrap();
        twin.legend(Some("W"));
        let plot = plot_of(fig.description());
        assert_eq!(plot.series.len(), 3);
        assert_eq!(plot.series[0].yadded, None);
        assert_eq!(plot.series[1].yadded, Some(1));
        assert_eq!(plot.series[2].yadded, Some(1));
        assert_eq!(
            plot.yadded,
            vec![AddedAxis {
                range: None,
                log: true,
                label: Some("power".into()),
                legendlabel: Some("W".into()),
            }]
        );
        assert!(plot.xadded.is_empty());
    }

    #[test]
    fn test_twiny_is_reused() {
        let mut axes = AxesBuilder::new();
        axes.twiny().plot(None, &[1.0], None).unwrap();
        axes.twiny().set_xlabel("top");
        let plot = plot_of(axes.description());
        assert_eq!(plot.series[0].xadded, Some(1));
        assert_eq!(plot.xadded[0].label.as_deref(), Some("top"));
    }

    #[test]
    fn test_colorplot_edges_averaged() {
        let mut axes = AxesBuilder::new();
        let z = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
        axes.pcolormesh(Some(&[5.0, 6.0, 7.0, 8.0]), Some(&[10.0, 11.0, 12.0]), &z, true)
            .unwrap();
        axes.set_xlabel("x");
        match axes.description() {
            Description::Colorplot(colorplot) => {
                assert_eq!(colorplot.x, Some(vec![5.5, 6.5, 7.5]));
                assert_eq!(colorplot.y, Some(vec![10.5, 11.5]));
                assert!(colorplot.zlog);
                assert!(!colorplot.contour);
                assert_eq!(colorplot.xlabel.as_deref(), Some("x"));
            }
            other => panic!("expected colorplot, got {other:?}"),
        }
    }

    #[test]
    fn test_colorplot_rejects_bad_input() {
        let mut axes = AxesBuilder::new();
        let z = vec![vec![1.0, f64::NAN]];
        assert!(axes.contour(None, None, &z, false).is_err());
        let z = vec![vec![1.0, 2.0]];
        assert!(axes.contourf(Some(&[1.0]), None, &z, false).is_err());
    }

    #[test]
    fn test_subplots_record_multiplot() {
        let mut fig = FigureBuilder::new();
        fig.subplots(1, 2, Some(Shared::All), None).unwrap();
        fig.suptitle("pair");
        fig.axes_mut(0, 0)
            .unwrap()
            .plot(None, &[1.0, 2.0], None)
            .unwrap();
        fig.axes_mut(0, 1)
            .unwrap()
            .contourf(None, None, &[vec![1.0, 2.0]], false)
            .unwrap();
        assert!(fig.axes_mut(1, 0).is_none());
        match fig.description() {
            Description::Multiplot(multiplot) => {
                assert_eq!(multiplot.shape().unwrap(), (1, 2));
                assert_eq!(multiplot.xshared, Some(Shared::All));
                assert_eq!(multiplot.title.as_deref(), Some("pair"));
                assert_eq!(multiplot.plots[0][1].type_name(), "colorplot");
            }
            other => panic!("expected multiplot, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_grid_rejected() {
        let mut fig = FigureBuilder::new();
        assert!(fig.subplots(0, 3, None, None).is_err());
    }

    #[test]
    fn test_save_vfd_replaces_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut fig = FigureBuilder::new();
        fig.plot(None, &[1.0, 2.0, 3.0], None).unwrap();
        let written = fig.save_vfd(dir.path().join("figure.png")).unwrap();
        assert_eq!(written, dir.path().join("figure.vfd"));
        let description = Description::from_path(&written).unwrap();
        assert_eq!(description, fig.description());
    }

    #[test]
    fn test_all_non_finite_series_not_recorded() {
        let mut fig = FigureBuilder::new();
        fig.plot(None, &[f64::NAN, f64::INFINITY], Some("bad")).unwrap();
        fig.errorbar(&[1.0], &[f64::NAN], Some(&ErrorSpec::Symmetric(0.1)), None, None)
            .unwrap();
        fig.plot(None, &[1.0, 2.0], Some("good")).unwrap();
        let plot = plot_of(fig.description());
        assert_eq!(plot.series.len(), 1);
        assert_eq!(plot.series[0].label.as_deref(), Some("good"));
    }

    #[test]
    fn test_save_vfd_rejects_unloadable_figure() {
        let dir = tempfile::tempdir().unwrap();
        let mut fig = FigureBuilder::new();
        fig.plot(None, &[f64::NAN], None).unwrap();
        let err = fig.save_vfd(dir.path().join("empty")).unwrap_err();
        assert!(matches!(err, Error::Schema { ref path, .. } if path == "series"));
        assert!(!dir.path().join("empty.vfd").exists());

        fig.subplots(1, 2, None, None).unwrap();
        fig.axes_mut(0, 0).unwrap().plot(None, &[1.0], None).unwrap();
        let err = fig.save_vfd(dir.path().join("grid")).unwrap_err();
        assert!(matches!(err, Error::Schema { ref path, .. } if path.starts_with("plots[0][1]")));
        assert!(!dir.path().join("grid.vfd").exists());
    }

    #[test]
    fn test_text_goes_to_epilog() {
        let mut fig = FigureBuilder::new();
        fig.text(1.0, 2.0, "peak");
        let plot = plot_of(fig.description());
        assert_eq!(
            plot.epilog,
            vec![EpilogDirective::Text {
                x: 1.0,
                y: 2.0,
                text: "peak".into()
            }]
        );
    }
}
