//! # vfd
//!
//! Vernacular Figure Description: figures described as data, compiled into
//! plotting scripts.
//!
//! A `.vfd` file is a JSON document describing one figure (a `plot` of data
//! series, a `colorplot` of a scalar field, or a `multiplot` grid of plots).
//! This crate parses and validates descriptions, compiles them into a typed
//! statement list and renders that list as a standalone matplotlib program.
//!
//! ## Quick Start
//!
//! ```rust
//! use vfd::prelude::*;
//!
//! let description = Description::from_json(
//!     r#"{"type": "plot", "series": [{"y": [1, 4, 9], "label": "squares"}], "xlabel": "n"}"#,
//! )?;
//! let script = create_script(&description, "squares", &CompileOptions::default())?;
//! assert!(script.starts_with("#!/usr/bin/env python\n"));
//! # Ok::<(), vfd::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `xlsx` (default): spreadsheet export of `plot` descriptions

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Figure descriptions and their validation.
pub mod description;

/// Statement AST and the matplotlib renderer.
pub mod script;

/// Description-to-script compiler.
pub mod compile;

// ============================================================================
// Authoring and Export
// ============================================================================

/// Recording façade producing descriptions from drawing calls.
pub mod builder;

/// Spreadsheet export.
pub mod export;

// ============================================================================
// Command-line Support
// ============================================================================

/// Batch conversion of description files.
pub mod batch;

/// YAML configuration.
pub mod config;

/// Stderr logger for the binary.
pub mod debug;

/// Execution of generated scripts.
pub mod runner;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for vfd operations.
pub mod error;

pub use config::Config;
pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use vfd::prelude::*;
/// ```
pub mod prelude {
    pub use crate::builder::{AxesBuilder, ErrorSpec, FigureBuilder, PlotSurface};
    pub use crate::compile::{assemble, create_script, CompileOptions, StyleOverrides};
    pub use crate::description::{Cell, Colorplot, Description, Multiplot, Plot, Series, Values};
    pub use crate::error::{Error, Result};
    pub use crate::script::{Matplotlib, Renderer, Script, Statement};
}
