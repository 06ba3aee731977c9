//! Spreadsheet export of `plot` descriptions.

use std::path::Path;

use rust_xlsxwriter::{Chart, ChartType, Workbook};

use crate::description::{Description, Plot};
use crate::error::{Error, Result};

/// Worksheet holding the series data.
pub const SHEET: &str = "Data";

const LOG_BASE: u16 = 10;

fn column(index: usize) -> Result<u16> {
    u16::try_from(index)
        .map_err(|_| Error::Unsupported(format!("column {index} exceeds the worksheet width")))
}

fn row(index: usize) -> Result<u32> {
    u32::try_from(index)
        .map_err(|_| Error::Unsupported(format!("row {index} exceeds the worksheet height")))
}

/// Header of the y column of series `index`.
fn series_name(plot: &Plot, index: usize) -> String {
    plot.series[index]
        .label_text()
        .map_or_else(|| format!("Series {}", index + 1), str::to_owned)
}

/// Writes a workbook with one column pair per series and a scatter chart
/// drawing them.
///
/// Only `plot` descriptions can be exported.
pub fn export_xlsx(description: &Description, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let Description::Plot(plot) = description else {
        return Err(Error::NotImplemented(format!(
            "spreadsheet export of {} descriptions",
            description.type_name()
        )));
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET)?;

    let mut chart = Chart::new(ChartType::ScatterStraightWithMarkers);
    for (i, series) in plot.series.iter().enumerate() {
        let x_col = column(2 * i)?;
        let y_col = column(2 * i + 1)?;
        worksheet.write_string(0, x_col, "x")?;
        worksheet.write_string(0, y_col, series_name(plot, i))?;
        let x = series.x_values();
        for (j, (xv, yv)) in x.iter().zip(&series.y).enumerate() {
            let r = row(j + 1)?;
            worksheet.write_number(r, x_col, *xv)?;
            worksheet.write_number(r, y_col, *yv)?;
        }
        if series.y.is_empty() {
            continue;
        }
        let last = row(series.y.len())?;
        chart
            .add_series()
            .set_name((SHEET, 0, y_col))
            .set_categories((SHEET, 1, x_col, last, x_col))
            .set_values((SHEET, 1, y_col, last, y_col));
    }

    if let Some(title) = &plot.title {
        chart.title().set_name(title.as_str());
    }
    if let Some(label) = &plot.xlabel {
        chart.x_axis().set_name(label.as_str());
    }
    if let Some(label) = &plot.ylabel {
        chart.y_axis().set_name(label.as_str());
    }
    if plot.xlog {
        chart.x_axis().set_log_base(LOG_BASE);
    }
    if plot.ylog {
        chart.y_axis().set_log_base(LOG_BASE);
    }
    worksheet.insert_chart(1, column(2 * plot.series.len() + 1)?, &chart)?;

    workbook
        .save(path)
        .map_err(|e| match e {
            rust_xlsxwriter::XlsxError::IoError(source) => Error::io(path, source),
            other => Error::Spreadsheet(other),
        })?;
    log::info!("wrote {}", path.display());
    Ok(())
}
