//! Statement AST for generated plotting scripts.
//!
//! Compilers produce an ordered [`Script`] of [`Statement`]s; a [`Renderer`]
//! turns it into source text for one scripting dialect. Statement order is
//! significant: axes handles are declared before use and decorations follow
//! the data they decorate.

mod matplotlib;

pub use matplotlib::Matplotlib;

use crate::description::Shared;

/// Coordinate axis of a 2D chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl Axis {
    /// Lowercase name (`x` or `y`).
    pub fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }
}

/// Which axis a secondary ("twin") axes container adds.
///
/// A secondary x axis shares y with its parent and is drawn on top; a
/// secondary y axis shares x and is drawn on the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryAxis {
    /// Additional x axis (shares y).
    X,
    /// Additional y axis (shares x).
    Y,
}

impl SecondaryAxis {
    /// The axis the secondary container adds.
    pub fn axis(self) -> Axis {
        match self {
            Self::X => Axis::X,
            Self::Y => Axis::Y,
        }
    }
}

/// An axes container statements draw into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Axes {
    /// The implicit current axes of the figure.
    Current,
    /// A handle bound to a variable.
    Named(String),
    /// A cell of the subplot grid.
    Cell {
        /// Row index, 0-based.
        row: usize,
        /// Column index, 0-based.
        col: usize,
        /// Grid height.
        rows: usize,
        /// Grid width.
        cols: usize,
    },
    /// A secondary axes derived from `parent`.
    Twin {
        /// The axes it shares a coordinate with.
        parent: Box<Axes>,
        /// The axis it adds.
        secondary: SecondaryAxis,
    },
}

impl Axes {
    /// Secondary axes container derived from this one.
    #[must_use]
    pub fn twin(&self, secondary: SecondaryAxis) -> Self {
        Self::Twin {
            parent: Box::new(self.clone()),
            secondary,
        }
    }

    /// True for the implicit current axes.
    pub fn is_current(&self) -> bool {
        matches!(self, Self::Current)
    }
}

/// Explicit style attributes of a drawn series.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesStyle {
    /// Legend label.
    pub label: Option<String>,
    /// Color token.
    pub color: Option<String>,
    /// Line style token.
    pub linestyle: Option<String>,
}

/// Resolved error bar extents, as distances below and above each point.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBounds {
    /// Distance from each value down to its lower bound.
    pub lower: Vec<f64>,
    /// Distance from each value up to its upper bound.
    pub upper: Vec<f64>,
}

impl ErrorBounds {
    /// Absolute `(lower, upper)` bound arrays around `values`.
    pub fn absolute(&self, values: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let lower = values.iter().zip(&self.lower).map(|(v, d)| v - d).collect();
        let upper = values.iter().zip(&self.upper).map(|(v, d)| v + d).collect();
        (lower, upper)
    }
}

/// How a scalar field is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Colored quadrilateral mesh.
    Mesh,
    /// Contour lines.
    Contour,
    /// Filled contours.
    FilledContour,
}

impl FieldKind {
    /// True for both contour kinds.
    pub fn is_contour(self) -> bool {
        matches!(self, Self::Contour | Self::FilledContour)
    }
}

/// Mapping of field values to colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorNorm {
    /// Library default (linear, data bounds).
    Auto,
    /// Logarithmic, optionally bounded.
    Log(Option<[f64; 2]>),
    /// Linear with explicit bounds.
    Linear([f64; 2]),
}

/// Legend anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendLoc {
    /// Top right corner.
    UpperRight,
    /// Top left corner.
    UpperLeft,
    /// Bottom right corner.
    LowerRight,
    /// Bottom left corner.
    LowerLeft,
}

impl LegendLoc {
    /// Location keyword understood by the plotting library.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UpperRight => "upper right",
            Self::UpperLeft => "upper left",
            Self::LowerRight => "lower right",
            Self::LowerLeft => "lower left",
        }
    }
}

/// Where a chart title goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitlePlacement {
    /// Regular axes title above the chart.
    Above,
    /// Centered text near the top, inside the chart.
    Inside,
}

/// Gap between grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacing {
    /// Between columns.
    Horizontal,
    /// Between rows.
    Vertical,
}

/// One drawing, decoration or output directive.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum Statement {
    /// `from module import name`.
    Import { module: String, name: String },
    /// Runs `body` with the named style presets applied.
    StyleScope {
        presets: Vec<String>,
        body: Vec<Statement>,
    },
    /// Creates the figure and its grid of axes.
    CreateAxes {
        rows: usize,
        cols: usize,
        xshared: Option<Shared>,
        yshared: Option<Shared>,
        /// Enlarge the figure proportionally to the grid.
        scaled: bool,
    },
    /// Binds the current axes to a variable.
    MaterializeAxes { name: String },
    /// Creates a secondary axes container from `parent`.
    CreateSecondaryAxes {
        parent: Axes,
        secondary: SecondaryAxis,
    },
    /// Line or marker series.
    DrawLine {
        axes: Axes,
        x: Vec<f64>,
        y: Vec<f64>,
        marker: Option<String>,
        style: SeriesStyle,
    },
    /// Series with error bars.
    DrawErrorBar {
        axes: Axes,
        x: Vec<f64>,
        y: Vec<f64>,
        xerr: Option<ErrorBounds>,
        yerr: Option<ErrorBounds>,
        marker: Option<String>,
        style: SeriesStyle,
    },
    /// Scalar field over a grid.
    DrawField {
        axes: Axes,
        kind: FieldKind,
        x: Option<Vec<f64>>,
        y: Option<Vec<f64>>,
        z: Vec<Vec<f64>>,
        norm: ColorNorm,
        levels: Option<Vec<f64>>,
        /// Store as a bitmap layer when exporting to vector formats.
        rasterized: bool,
    },
    /// Display range of one axis.
    SetLimits {
        axes: Axes,
        axis: Axis,
        range: [f64; 2],
    },
    /// Logarithmic scale on one axis.
    SetLogScale { axes: Axes, axis: Axis },
    /// Legend of the labeled series of `axes`.
    SetLegend {
        axes: Axes,
        loc: Option<LegendLoc>,
        title: Option<String>,
    },
    /// Axis label.
    SetLabel {
        axes: Axes,
        axis: Axis,
        text: String,
    },
    /// Chart title.
    SetTitle {
        axes: Axes,
        text: String,
        placement: TitlePlacement,
    },
    /// Free text at data coordinates.
    Annotate {
        axes: Axes,
        x: f64,
        y: f64,
        text: String,
    },
    /// Color scale legend of the last field.
    Colorbar,
    /// Inline labels on the last contour set.
    ContourLabels,
    /// Figure-level title.
    SupTitle { text: String },
    /// Fit the layout to the figure.
    TightLayout,
    /// Collapse the gap between grid cells.
    CollapseSpacing { spacing: Spacing },
    /// Names the interactive window.
    SetWindowTitle { text: String },
    /// Displays the figure interactively.
    Show,
    /// Writes the figure to a file.
    Save { path: String },
}

/// An ordered sequence of statements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    statements: Vec<Statement>,
}

impl Script {
    /// Creates an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Statements in execution order.
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Number of top-level statements.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// True if there is nothing to run.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Appends a statement.
    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    /// Renders the script with the given dialect.
    pub fn render(&self, renderer: &dyn Renderer) -> String {
        renderer.render(self)
    }

    /// Renders the script as a matplotlib program.
    pub fn to_matplotlib(&self) -> String {
        Matplotlib::default().render(self)
    }
}

impl From<Vec<Statement>> for Script {
    fn from(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

/// Turns a [`Script`] into source text for one scripting dialect.
pub trait Renderer {
    /// Renders the whole script, including any dialect preamble.
    fn render(&self, script: &Script) -> String;
}
