//! Description-to-script compiler.
//!
//! Each description variant has its own compiler producing an ordered list of
//! [`Statement`]s; [`assemble`] wraps the result with the output directives
//! and the optional style scope. Compilation is pure: the same description
//! and options always give the same script.
//!
//! # Example
//!
//! ```rust
//! use vfd::compile::{create_script, CompileOptions};
//! use vfd::description::Description;
//!
//! let description = Description::from_json(r#"{"type": "plot", "series": [{"y": [1, 2, 3]}]}"#)
//!     .unwrap();
//! let options = CompileOptions::default().formats(["png"]);
//! let script = create_script(&description, "figure", &options).unwrap();
//! assert!(script.contains("plt.plot([1.0, 2.0, 3.0], [1.0, 2.0, 3.0])"));
//! assert!(script.ends_with("plt.savefig(\"figure.png\")\n"));
//! ```

mod colorplot;
mod errorbar;
mod multiplot;
mod plot;
mod style;

pub use colorplot::{compile_colorplot, edges_to_centers};
pub use errorbar::full_errorbar;
pub use multiplot::compile_multiplot;
pub use plot::{compile_plot, PlotTarget};
pub use style::{
    Cycler, StyleCycle, StyleOverrides, DEFAULT_COLORS, DEFAULT_LINES, DEFAULT_MARKERS,
};

use crate::description::{Cell, Colorplot, Description, Multiplot, Plot, StyleHint};
use crate::error::{Error, Result};
use crate::script::{Axes, Script, Statement};

/// Caller-level settings of a compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Style presets wrapped around the whole figure.
    pub style_context: Vec<String>,
    /// Output file extensions; empty means interactive display.
    pub export_formats: Vec<String>,
    /// Fit the layout to the figure before output.
    pub tight_layout: bool,
    /// Enlarge multiplot figures proportionally to the grid.
    pub scale_multiplot: bool,
    /// Style lists overriding description hints.
    pub style: StyleOverrides,
}

impl CompileOptions {
    /// Sets the style presets.
    #[must_use]
    pub fn context<I, S>(mut self, presets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.style_context = presets.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the output formats.
    #[must_use]
    pub fn formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.export_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    /// Enables or disables tight layout.
    #[must_use]
    pub fn tight_layout(mut self, enabled: bool) -> Self {
        self.tight_layout = enabled;
        self
    }

    /// Enables or disables multiplot figure scaling.
    #[must_use]
    pub fn scale_multiplot(mut self, enabled: bool) -> Self {
        self.scale_multiplot = enabled;
        self
    }

    /// Sets the style overrides.
    #[must_use]
    pub fn style(mut self, style: StyleOverrides) -> Self {
        self.style = style;
        self
    }
}

/// Prefixes the location of `err` with a grid cell path.
pub(crate) fn locate(err: Error, cell: &str) -> Error {
    match err {
        Error::Schema { path, message } => Error::Schema {
            path: format!("{cell}.{path}"),
            message,
        },
        Error::Unsupported(message) => Error::Unsupported(format!("{cell}: {message}")),
        other => other,
    }
}

/// The figure that is actually compiled, after collapsing 1×1 grids.
#[derive(Clone, Copy)]
enum Figure<'a> {
    Plot(&'a Plot),
    Colorplot(&'a Colorplot),
    Multiplot(&'a Multiplot),
}

impl<'a> Figure<'a> {
    fn of(description: &'a Description) -> Self {
        match description {
            Description::Plot(plot) => Self::Plot(plot),
            Description::Colorplot(colorplot) => Self::Colorplot(colorplot),
            Description::Multiplot(multiplot) => match multiplot.single_cell() {
                Some(Cell::Plot(plot)) => Self::Plot(plot),
                Some(Cell::Colorplot(colorplot)) => Self::Colorplot(colorplot),
                None => Self::Multiplot(multiplot),
            },
        }
    }

    fn style(&self) -> Option<&'a StyleHint> {
        match self {
            Self::Plot(plot) => plot.style.as_ref(),
            Self::Colorplot(colorplot) => colorplot.style.as_ref(),
            Self::Multiplot(multiplot) => multiplot.style.as_ref(),
        }
    }
}

/// Compiles a description into a complete script.
///
/// `export_name` names the saved files (`<export_name>.<format>`) or, without
/// formats, the interactive window.
pub fn assemble(
    description: &Description,
    export_name: &str,
    options: &CompileOptions,
) -> Result<Script> {
    let figure = Figure::of(description);
    let style = StyleCycle::resolve(figure.style(), &options.style);
    let mut body = match figure {
        Figure::Plot(plot) => compile_plot(plot, &PlotTarget::current(), &style)?,
        Figure::Colorplot(colorplot) => compile_colorplot(colorplot, &Axes::Current)?,
        Figure::Multiplot(multiplot) => compile_multiplot(multiplot, &style, options)?,
    };
    if options.tight_layout && !matches!(figure, Figure::Multiplot(_)) {
        body.push(Statement::TightLayout);
    }
    if options.export_formats.is_empty() {
        body.push(Statement::SetWindowTitle {
            text: export_name.to_string(),
        });
        body.push(Statement::Show);
    } else {
        body.extend(options.export_formats.iter().map(|format| Statement::Save {
            path: format!("{export_name}.{format}"),
        }));
    }
    log::debug!(
        "compiled {} '{export_name}' into {} statements",
        description.type_name(),
        body.len()
    );

    let statements = if options.style_context.is_empty() {
        body
    } else {
        vec![Statement::StyleScope {
            presets: options.style_context.clone(),
            body,
        }]
    };
    Ok(Script::from(statements))
}

/// Compiles a description and renders it as a matplotlib program.
pub fn create_script(
    description: &Description,
    export_name: &str,
    options: &CompileOptions,
) -> Result<String> {
    Ok(assemble(description, export_name, options)?.to_matplotlib())
}
