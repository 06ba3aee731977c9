//! `multiplot` descriptions to statements.

use super::plot::{compile_plot, PlotTarget};
use super::style::StyleCycle;
use super::{locate, CompileOptions};
use crate::description::{Cell, Multiplot};
use crate::error::{Error, Result};
use crate::script::{Spacing, Statement};

/// Compiles a grid of plots sharing one figure.
///
/// The whole grid is checked before any statement is produced: a ragged grid
/// is a schema violation, a colorplot cell is unsupported.
pub fn compile_multiplot(
    multiplot: &Multiplot,
    style: &StyleCycle,
    options: &CompileOptions,
) -> Result<Vec<Statement>> {
    let (rows, cols) = multiplot.shape()?;
    for (i, row) in multiplot.plots.iter().enumerate() {
        for (j, cell) in row.iter().enumerate() {
            match cell {
                Cell::Colorplot(_) => {
                    return Err(Error::Unsupported(format!(
                        "colorplot cell at plots[{i}][{j}] of a multiplot"
                    )))
                }
                Cell::Plot(plot) if plot.style.is_some() => {
                    log::warn!("style of plots[{i}][{j}] ignored; only the multiplot style applies");
                }
                Cell::Plot(_) => {}
            }
        }
    }

    let mut out = vec![Statement::CreateAxes {
        rows,
        cols,
        xshared: multiplot.xshared,
        yshared: multiplot.yshared,
        scaled: options.scale_multiplot,
    }];
    for (i, row) in multiplot.plots.iter().enumerate() {
        for (j, cell) in row.iter().enumerate() {
            if let Cell::Plot(plot) = cell {
                let target = PlotTarget::cell(i, j, rows, cols);
                let statements = compile_plot(plot, &target, style)
                    .map_err(|err| locate(err, &format!("plots[{i}][{j}]")))?;
                out.extend(statements);
            }
        }
    }

    if let Some(text) = &multiplot.title {
        out.push(Statement::SupTitle { text: text.clone() });
    }
    if options.tight_layout {
        out.push(Statement::TightLayout);
    }
    if let Some([horizontal, vertical]) = multiplot.joined {
        if vertical {
            out.push(Statement::CollapseSpacing {
                spacing: Spacing::Vertical,
            });
        }
        if horizontal {
            out.push(Statement::CollapseSpacing {
                spacing: Spacing::Horizontal,
            });
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::{Colorplot, Plot, Series, Shared};
    use crate::script::{Axes, TitlePlacement};

    fn plot(title: &str) -> Cell {
        let mut plot = Plot::new(vec![Series::new(vec![1.0, 2.0])]);
        plot.title = Some(title.into());
        Cell::Plot(plot)
    }

    fn grid(plots: Vec<Vec<Cell>>) -> Multiplot {
        Multiplot {
            plots,
            ..Multiplot::default()
        }
    }

    fn compile(multiplot: &Multiplot, options: &CompileOptions) -> Result<Vec<Statement>> {
        compile_multiplot(multiplot, &StyleCycle::default(), options)
    }

    #[test]
    fn test_grid_layout() {
        let mut multiplot = grid(vec![vec![plot("a"), plot("b")]]);
        multiplot.xshared = Some(Shared::All);
        multiplot.title = Some("both".into());
        let statements = compile(&multiplot, &CompileOptions::default()).unwrap();
        assert_eq!(
            statements[0],
            Statement::CreateAxes {
                rows: 1,
                cols: 2,
                xshared: Some(Shared::All),
                yshared: None,
                scaled: false,
            }
        );
        assert_eq!(
            statements[2],
            Statement::SetTitle {
                axes: Axes::Cell {
                    row: 0,
                    col: 0,
                    rows: 1,
                    cols: 2
                },
                text: "a".into(),
                placement: TitlePlacement::Inside,
            }
        );
        assert_eq!(
            statements.last(),
            Some(&Statement::SupTitle {
                text: "both".into()
            })
        );
    }

    #[test]
    fn test_layout_tail_order() {
        let mut multiplot = grid(vec![vec![plot("a")], vec![plot("b")]]);
        multiplot.joined = Some([true, true]);
        let options = CompileOptions::default().tight_layout(true);
        let statements = compile(&multiplot, &options).unwrap();
        let n = statements.len();
        assert_eq!(
            &statements[n - 3..],
            &[
                Statement::TightLayout,
                Statement::CollapseSpacing {
                    spacing: Spacing::Vertical
                },
                Statement::CollapseSpacing {
                    spacing: Spacing::Horizontal
                },
            ]
        );
    }

    #[test]
    fn test_colorplot_cell_rejected_before_output() {
        let multiplot = grid(vec![vec![
            plot("a"),
            Cell::Colorplot(Colorplot::new(vec![vec![1.0]])),
        ]]);
        let err = compile(&multiplot, &CompileOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Unsupported(ref m) if m.contains("plots[0][1]")));
    }

    #[test]
    fn test_ragged_grid_rejected() {
        let multiplot = grid(vec![vec![plot("a"), plot("b")], vec![plot("c")]]);
        assert!(matches!(
            compile(&multiplot, &CompileOptions::default()),
            Err(Error::Schema { .. })
        ));
    }

    #[test]
    fn test_cell_errors_are_located() {
        let multiplot = grid(vec![vec![
            plot("a"),
            Cell::Plot(Plot::new(vec![Series::with_xy(vec![1.0], vec![])])),
        ]]);
        let err = compile(&multiplot, &CompileOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Schema { ref path, .. } if path.starts_with("plots[0][1].series[0]")));
    }

    #[test]
    fn test_scaled_figure() {
        let multiplot = grid(vec![vec![plot("a"), plot("b")]]);
        let options = CompileOptions::default().scale_multiplot(true);
        let statements = compile(&multiplot, &options).unwrap();
        assert!(matches!(
            statements[0],
            Statement::CreateAxes { scaled: true, .. }
        ));
    }
}
