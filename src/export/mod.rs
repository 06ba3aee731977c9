//! Data exports besides the plotting script.

#[cfg(feature = "xlsx")]
mod xlsx;

#[cfg(feature = "xlsx")]
pub use xlsx::{export_xlsx, SHEET};

/// Spreadsheet export is unavailable without the `xlsx` feature.
#[cfg(not(feature = "xlsx"))]
pub fn export_xlsx(
    _description: &crate::description::Description,
    _path: impl AsRef<std::path::Path>,
) -> crate::error::Result<()> {
    Err(crate::error::Error::NotImplemented(
        "spreadsheet export (built without the `xlsx` feature)".into(),
    ))
}
