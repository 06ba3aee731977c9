//! Error bar normalization.

use crate::description::{Series, Values};
use crate::script::ErrorBounds;

/// Distances from each value to one side of its error bar.
///
/// `limit` (an absolute bound) takes precedence over `error` (a symmetric
/// uncertainty). A sequence limit yields `limit - value` on the positive side
/// and `value - limit` on the negative side; a scalar limit yields
/// `value + limit` / `value - limit`. Without either, every distance is zero.
pub fn full_errorbar(
    values: &[f64],
    limit: Option<&Values>,
    error: Option<&Values>,
    positive: bool,
) -> Vec<f64> {
    match (limit, error) {
        (Some(Values::Points(bounds)), _) => values
            .iter()
            .zip(bounds)
            .map(|(v, b)| if positive { b - v } else { v - b })
            .collect(),
        (Some(Values::Scalar(bound)), _) => values
            .iter()
            .map(|v| if positive { v + bound } else { v - bound })
            .collect(),
        (None, Some(Values::Scalar(error))) => vec![*error; values.len()],
        (None, Some(Values::Points(errors))) => errors.clone(),
        (None, None) => vec![0.0; values.len()],
    }
}

/// y error bar of `series`, if it carries any y error field.
pub(crate) fn y_bounds(series: &Series) -> Option<ErrorBounds> {
    series.has_y_error().then(|| ErrorBounds {
        lower: full_errorbar(&series.y, series.ymin.as_ref(), series.yerr.as_ref(), false),
        upper: full_errorbar(&series.y, series.ymax.as_ref(), series.yerr.as_ref(), true),
    })
}

/// x error bar of `series` around `x`, if it carries any x error field.
pub(crate) fn x_bounds(series: &Series, x: &[f64]) -> Option<ErrorBounds> {
    series.has_x_error().then(|| ErrorBounds {
        lower: full_errorbar(x, series.xmin.as_ref(), series.xerr.as_ref(), false),
        upper: full_errorbar(x, series.xmax.as_ref(), series.xerr.as_ref(), true),
    })
}
