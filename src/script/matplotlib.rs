//! Python/matplotlib dialect.
//!
//! Renders statements as pyplot calls. Statements aimed at the implicit
//! current axes use the pyplot state-machine names (`plt.xlabel`), handles use
//! the object-oriented setters (`ax.set_xlabel`).

use std::fmt::Write as FmtWrite;

use super::{
    Axes, ColorNorm, ErrorBounds, FieldKind, Renderer, Script, SecondaryAxis, SeriesStyle,
    Spacing, Statement, TitlePlacement,
};

const HEADER: &str = "#!/usr/bin/env python\nimport matplotlib.pyplot as plt\n";
const INDENT: &str = "    ";
const FIGURE: &str = "fig";
const GRID: &str = "axarr";
const CONTOURS: &str = "cs";

/// Renders scripts for the matplotlib pyplot interface.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matplotlib;

impl Renderer for Matplotlib {
    fn render(&self, script: &Script) -> String {
        let mut out = String::with_capacity(4096);
        out.push_str(HEADER);
        write_block(&mut out, script.statements(), 0);
        out
    }
}

fn write_block(out: &mut String, statements: &[Statement], depth: usize) {
    let pad = INDENT.repeat(depth);
    for statement in statements {
        if let Statement::StyleScope { presets, body } = statement {
            let _ = writeln!(out, "{pad}with plt.style.context({}):", presets_literal(presets));
            if body.is_empty() {
                let _ = writeln!(out, "{pad}{INDENT}pass");
            }
            write_block(out, body, depth + 1);
        } else {
            for line in statement_to_lines(statement) {
                let _ = writeln!(out, "{pad}{line}");
            }
        }
    }
}

/// Source lines of one statement (without indentation).
fn statement_to_lines(statement: &Statement) -> Vec<String> {
    match statement {
        Statement::Import { module, name } => vec![format!("from {module} import {name}")],
        Statement::StyleScope { .. } => Vec::new(),
        Statement::CreateAxes {
            rows,
            cols,
            xshared,
            yshared,
            scaled,
        } => {
            let mut lines = Vec::with_capacity(2);
            let mut args = vec![rows.to_string(), cols.to_string()];
            if let Some(shared) = xshared {
                args.push(format!("sharex={}", py_str(shared.as_str())));
            }
            if let Some(shared) = yshared {
                args.push(format!("sharey={}", py_str(shared.as_str())));
            }
            if *scaled {
                lines.push("size_x, size_y = plt.rcParams.get('figure.figsize')".to_string());
                args.push(format!("figsize=({cols} * size_x, {rows} * size_y)"));
            }
            lines.push(format!("{FIGURE}, {GRID} = {}", call("plt.subplots", &args)));
            lines
        }
        Statement::MaterializeAxes { name } => vec![format!("{name} = plt.gca()")],
        Statement::CreateSecondaryAxes { parent, secondary } => {
            let twin = axes_expr(&parent.twin(*secondary));
            vec![format!(
                "{twin} = {}.{}()",
                axes_expr(parent),
                twin_method(*secondary)
            )]
        }
        Statement::DrawLine {
            axes,
            x,
            y,
            marker,
            style,
        } => {
            let mut args = vec![py_list(x), py_list(y)];
            if let Some(marker) = marker {
                args.push(py_str(marker));
            }
            push_style(&mut args, style);
            vec![call(&method(axes, "plot"), &args)]
        }
        Statement::DrawErrorBar {
            axes,
            x,
            y,
            xerr,
            yerr,
            marker,
            style,
        } => {
            let mut args = vec![py_list(x), py_list(y)];
            if let Some(bounds) = yerr {
                args.push(format!("yerr={}", bounds_literal(bounds)));
            }
            if let Some(bounds) = xerr {
                args.push(format!("xerr={}", bounds_literal(bounds)));
            }
            if let Some(marker) = marker {
                args.push(format!("fmt={}", py_str(marker)));
            }
            push_style(&mut args, style);
            vec![call(&method(axes, "errorbar"), &args)]
        }
        Statement::DrawField {
            axes,
            kind,
            x,
            y,
            z,
            norm,
            levels,
            rasterized,
        } => field_lines(axes, *kind, x.as_deref(), y.as_deref(), z, *norm, levels.as_deref(), *rasterized),
        Statement::SetLimits { axes, axis, range } => vec![format!(
            "{}({}, {})",
            setter(axes, &format!("{}lim", axis.name())),
            py_fixed(range[0]),
            py_fixed(range[1])
        )],
        Statement::SetLogScale { axes, axis } => vec![format!(
            "{}({})",
            setter(axes, &format!("{}scale", axis.name())),
            py_str("log")
        )],
        Statement::SetLegend { axes, loc, title } => {
            let mut args = Vec::new();
            if let Some(loc) = loc {
                args.push(format!("loc={}", py_str(loc.as_str())));
            }
            if let Some(title) = title {
                args.push(format!("title={}", py_str(title)));
            }
            vec![call(&method(axes, "legend"), &args)]
        }
        Statement::SetLabel { axes, axis, text } => vec![format!(
            "{}({})",
            setter(axes, &format!("{}label", axis.name())),
            py_str(text)
        )],
        Statement::SetTitle {
            axes,
            text,
            placement: TitlePlacement::Above,
        } => vec![format!("{}({})", setter(axes, "title"), py_str(text))],
        Statement::SetTitle {
            axes,
            text,
            placement: TitlePlacement::Inside,
        } => {
            let transform = match axes {
                Axes::Current => "plt.gca()".to_string(),
                other => axes_expr(other),
            };
            vec![format!(
                "{}(.5, .95, {}, horizontalalignment=\"center\", transform={transform}.transAxes)",
                method(axes, "text"),
                py_str(text)
            )]
        }
        Statement::Annotate { axes, x, y, text } => vec![format!(
            "{}({}, {}, {})",
            method(axes, "text"),
            py_fixed(*x),
            py_fixed(*y),
            py_str(text)
        )],
        Statement::Colorbar => vec!["plt.colorbar()".to_string()],
        Statement::ContourLabels => vec![format!("plt.clabel({CONTOURS})")],
        Statement::SupTitle { text } => vec![format!("{FIGURE}.suptitle({})", py_str(text))],
        Statement::TightLayout => vec!["plt.tight_layout()".to_string()],
        Statement::CollapseSpacing { spacing } => {
            let key = match spacing {
                Spacing::Vertical => "hspace",
                Spacing::Horizontal => "wspace",
            };
            vec![format!("{FIGURE}.subplots_adjust({key}=0)")]
        }
        Statement::SetWindowTitle { text } => vec![format!(
            "plt.gcf().canvas.manager.set_window_title({})",
            py_str(text)
        )],
        Statement::Show => vec!["plt.show()".to_string()],
        Statement::Save { path } => vec![format!("plt.savefig({})", py_str(path))],
    }
}

#[allow(clippy::too_many_arguments)]
fn field_lines(
    axes: &Axes,
    kind: FieldKind,
    x: Option<&[f64]>,
    y: Option<&[f64]>,
    z: &[Vec<f64>],
    norm: ColorNorm,
    levels: Option<&[f64]>,
    rasterized: bool,
) -> Vec<String> {
    let mut args = Vec::with_capacity(6);
    if let (Some(x), Some(y)) = (x, y) {
        args.push(py_list(x));
        args.push(py_list(y));
    }
    args.push(py_matrix(z));
    if let Some(levels) = levels {
        args.push(format!("levels={}", py_list(levels)));
    }
    match norm {
        ColorNorm::Auto => {}
        ColorNorm::Log(None) => args.push("norm=LogNorm()".to_string()),
        ColorNorm::Log(Some([vmin, vmax])) => args.push(format!(
            "norm=LogNorm(vmin={}, vmax={})",
            py_float(vmin),
            py_float(vmax)
        )),
        ColorNorm::Linear([vmin, vmax]) => {
            args.push(format!("vmin={}", py_float(vmin)));
            args.push(format!("vmax={}", py_float(vmax)));
        }
    }
    let function = match kind {
        FieldKind::Mesh => "pcolormesh",
        FieldKind::Contour => "contour",
        FieldKind::FilledContour => "contourf",
    };
    if kind.is_contour() {
        let mut lines = vec![format!("{CONTOURS} = {}", call(&method(axes, function), &args))];
        if rasterized {
            lines.push(format!("{CONTOURS}.set_rasterized(True)"));
        }
        lines
    } else {
        if rasterized {
            args.push("rasterized=True".to_string());
        }
        vec![call(&method(axes, function), &args)]
    }
}

fn push_style(args: &mut Vec<String>, style: &SeriesStyle) {
    if let Some(label) = &style.label {
        args.push(format!("label={}", py_str(label)));
    }
    if let Some(color) = &style.color {
        args.push(format!("color={}", py_str(color)));
    }
    if let Some(linestyle) = &style.linestyle {
        args.push(format!("linestyle={}", py_str(linestyle)));
    }
}

fn call(function: &str, args: &[String]) -> String {
    format!("{function}({})", args.join(", "))
}

/// Expression naming an axes container.
fn axes_expr(axes: &Axes) -> String {
    match axes {
        Axes::Current => "plt".to_string(),
        Axes::Named(name) => name.clone(),
        Axes::Cell {
            row,
            col,
            rows,
            cols,
        } => match (rows, cols) {
            (1, 1) => GRID.to_string(),
            (1, _) => format!("{GRID}[{col}]"),
            (_, 1) => format!("{GRID}[{row}]"),
            _ => format!("{GRID}[{row}][{col}]"),
        },
        Axes::Twin { parent, secondary } => {
            let base: String = axes_expr(parent)
                .chars()
                .filter_map(|c| match c {
                    '[' => Some('_'),
                    ']' => None,
                    c => Some(c),
                })
                .collect();
            format!("{base}_{}", twin_method(*secondary))
        }
    }
}

fn twin_method(secondary: SecondaryAxis) -> &'static str {
    match secondary {
        SecondaryAxis::X => "twiny",
        SecondaryAxis::Y => "twinx",
    }
}

/// Method with the same name in both interfaces (`plt.plot`, `ax.plot`).
fn method(axes: &Axes, name: &str) -> String {
    format!("{}.{name}", axes_expr(axes))
}

/// Property setter: `plt.xlabel` versus `ax.set_xlabel`.
fn setter(axes: &Axes, property: &str) -> String {
    match axes {
        Axes::Current => format!("plt.{property}"),
        other => format!("{}.set_{property}", axes_expr(other)),
    }
}

fn presets_literal(presets: &[String]) -> String {
    match presets {
        [single] => py_str(single),
        many => format!(
            "[{}]",
            many.iter().map(|p| py_str(p)).collect::<Vec<_>>().join(", ")
        ),
    }
}

fn bounds_literal(bounds: &ErrorBounds) -> String {
    format!("[{}, {}]", py_list(&bounds.lower), py_list(&bounds.upper))
}

fn py_list(values: &[f64]) -> String {
    let mut out = String::with_capacity(values.len() * 8 + 2);
    out.push('[');
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&py_float(*value));
    }
    out.push(']');
    out
}

fn py_matrix(rows: &[Vec<f64>]) -> String {
    format!(
        "[{}]",
        rows.iter().map(|row| py_list(row)).collect::<Vec<_>>().join(", ")
    )
}

/// Shortest repr that reads back to the same value.
fn py_float(value: f64) -> String {
    if value.is_nan() {
        "float(\"nan\")".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "float(\"inf\")".to_string()
        } else {
            "-float(\"inf\")".to_string()
        }
    } else if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else if value.abs() >= 1e16 || (value != 0.0 && value.abs() < 1e-4) {
        format!("{value:e}")
    } else {
        format!("{value}")
    }
}

/// `%f` formatting: six decimals, never exponent notation.
fn py_fixed(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.6}")
    } else {
        py_float(value)
    }
}

/// Double-quoted Python string literal.
fn py_str(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
