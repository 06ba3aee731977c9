//! `colorplot` descriptions to statements.

use crate::description::{index_coordinates, Colorplot};
use crate::error::Result;
use crate::script::{Axes, Axis, ColorNorm, FieldKind, Statement, TitlePlacement};

/// Midpoints of consecutive edges.
pub fn edges_to_centers(edges: &[f64]) -> Vec<f64> {
    edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
}

/// Cell-center coordinates for a dimension of `n` cells.
fn centers(coords: Option<&[f64]>, n: usize) -> Vec<f64> {
    match coords {
        None => index_coordinates(n),
        Some(edges) if edges.len() == n + 1 => edges_to_centers(edges),
        Some(coords) => coords.to_vec(),
    }
}

fn field_kind(colorplot: &Colorplot) -> FieldKind {
    match (colorplot.contour, colorplot.fillcontour) {
        (false, _) => FieldKind::Mesh,
        (true, false) => FieldKind::Contour,
        (true, true) => FieldKind::FilledContour,
    }
}

/// Compiles a scalar-field chart drawing into `axes`.
pub fn compile_colorplot(colorplot: &Colorplot, axes: &Axes) -> Result<Vec<Statement>> {
    colorplot.validate("")?;
    let (rows, cols) = colorplot.shape()?;
    let kind = field_kind(colorplot);
    let mut out = Vec::with_capacity(10);

    if colorplot.zlog {
        out.push(Statement::Import {
            module: "matplotlib.colors".into(),
            name: "LogNorm".into(),
        });
    }

    let (x, y) = match (&colorplot.x, &colorplot.y) {
        (None, None) => (None, None),
        (x, y) => (
            Some(centers(x.as_deref(), cols)),
            Some(centers(y.as_deref(), rows)),
        ),
    };
    let norm = match (colorplot.zlog, colorplot.zrange) {
        (true, range) => ColorNorm::Log(range),
        (false, Some(range)) if kind.is_contour() => ColorNorm::Linear(range),
        (false, _) => ColorNorm::Auto,
    };
    out.push(Statement::DrawField {
        axes: axes.clone(),
        kind,
        x,
        y,
        z: colorplot.z.clone(),
        norm,
        levels: colorplot.levels.clone().filter(|_| kind.is_contour()),
        rasterized: true,
    });

    for (axis, range) in [(Axis::X, colorplot.xrange), (Axis::Y, colorplot.yrange)] {
        if let Some(range) = range {
            out.push(Statement::SetLimits {
                axes: axes.clone(),
                axis,
                range,
            });
        }
    }
    for (axis, log) in [(Axis::X, colorplot.xlog), (Axis::Y, colorplot.ylog)] {
        if log {
            out.push(Statement::SetLogScale {
                axes: axes.clone(),
                axis,
            });
        }
    }
    for (axis, label) in [(Axis::X, &colorplot.xlabel), (Axis::Y, &colorplot.ylabel)] {
        if let Some(text) = label {
            out.push(Statement::SetLabel {
                axes: axes.clone(),
                axis,
                text: text.clone(),
            });
        }
    }
    if let Some(text) = colorplot.title.as_ref().filter(|t| !t.is_empty()) {
        out.push(Statement::SetTitle {
            axes: axes.clone(),
            text: text.clone(),
            placement: TitlePlacement::Above,
        });
    }

    out.push(match kind {
        FieldKind::Contour => Statement::ContourLabels,
        FieldKind::Mesh | FieldKind::FilledContour => Statement::Colorbar,
    });
    Ok(out)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_centers_lie_between_edges(mut edges in prop::collection::vec(-1e3f64..1e3, 2..30)) {
            edges.sort_by(f64::total_cmp);
            let centers = edges_to_centers(&edges);
            prop_assert_eq!(centers.len(), edges.len() - 1);
            for (c, w) in centers.iter().zip(edges.windows(2)) {
                prop_assert!(w[0] <= *c && *c <= w[1]);
            }
        }
    }
}
