//! # carelabel - Clothing Care Label Generator
//!
//! Renders print-ready care labels for a clothing brand: garment size and
//! textile composition are drawn onto pre-made template images, flattened
//! to PNG, and embedded into 35mm square PDF pages. Printing a pixel-only
//! PDF keeps font and vector text layers out of the print shop's hands.
//!
//! ## Quick Start
//!
//! ```no_run
//! use carelabel::{
//!     batch::{LabelGenerator, LabelRequest},
//!     catalog::{CareType, LabelColor, Size, TemplateStore},
//!     config::LabelConfig,
//! };
//! use std::path::Path;
//!
//! let generator = LabelGenerator::new(LabelConfig::default(), TemplateStore::standard("assets"));
//! let request = LabelRequest::new(
//!     "95% cotton, 5% elastane",
//!     CareType::Washable,
//!     [Size::S36, Size::OneSize],
//!     [LabelColor::White],
//! );
//!
//! let report = generator.generate(&request, Path::new("output_labels"));
//! println!("{} PDFs in {}", report.generated, report.output_dir.display());
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! template.jpg ─→ compose_label ─→ PNG ─→ single-page PDF
//!                 (size text,
//!                  rotated composition block)
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`catalog`] | Sizes, colors, care variants, template store |
//! | [`config`] | Layout geometry and typography |
//! | [`composition`] | Composition string formatting |
//! | [`render`] | Fonts and label compositing |
//! | [`raster`] | PNG output |
//! | [`pdf`] | PDF page packaging |
//! | [`batch`] | Size × color batch driver |
//! | [`archive`] | ZIP packaging for downloads |
//! | [`interactive`] | Console session |
//! | [`server`] | Web form |
//! | [`logging`] | File + stdout logger |
//! | [`error`] | Error types |

pub mod archive;
pub mod batch;
pub mod catalog;
pub mod composition;
pub mod config;
pub mod error;
pub mod interactive;
pub mod logging;
pub mod pdf;
pub mod raster;
pub mod render;
pub mod server;

// Re-exports for convenience
pub use batch::{BatchReport, LabelGenerator, LabelRequest};
pub use config::LabelConfig;
pub use error::LabelError;
