//! # Batch Generation
//!
//! Renders every size × color combination of a [`LabelRequest`] into its
//! own PDF.
//!
//! ## Phases
//!
//! ```text
//! INIT ─→ RENDERING ─→ CONVERTING ─→ CLEANUP ─→ DONE
//!          template     PNG → PDF     remove
//!          composite                  _temp_png/
//!          PNG
//! ```
//!
//! Every item produces an [`ItemOutcome`]. Failures are logged and counted;
//! they never abort the rest of the batch and never reach the caller as
//! errors. The report's counts are informational: the output directory is
//! the source of truth.

use std::path::{Path, PathBuf};

use crate::catalog::{CareType, LabelColor, Size, TemplateStore};
use crate::composition::format_composition_capped;
use crate::config::{Coordinates, LabelConfig};
use crate::error::LabelError;
use crate::render::{self, font::FontResolver};
use crate::{pdf, raster};

/// Name of the intermediate raster directory inside the output directory.
pub const TEMP_PNG_DIR: &str = "_temp_png";

/// One generation run. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelRequest {
    pub composition: String,
    pub care_type: CareType,
    pub sizes: Vec<Size>,
    pub colors: Vec<LabelColor>,
}

impl LabelRequest {
    /// Build a request. Duplicate sizes and colors are dropped, keeping
    /// first-seen order.
    pub fn new(
        composition: impl Into<String>,
        care_type: CareType,
        sizes: impl IntoIterator<Item = Size>,
        colors: impl IntoIterator<Item = LabelColor>,
    ) -> Self {
        Self {
            composition: composition.into(),
            care_type,
            sizes: dedup(sizes),
            colors: dedup(colors),
        }
    }

    /// Every size in both colors.
    pub fn all(composition: impl Into<String>, care_type: CareType) -> Self {
        Self::new(composition, care_type, Size::ALL, LabelColor::ALL)
    }
}

fn dedup<T: PartialEq>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut out = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// Result of one size × color item.
#[derive(Debug)]
pub enum ItemOutcome {
    Produced(PathBuf),
    Failed { label: String, reason: LabelError },
}

/// Aggregate result of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    /// Number of PDFs written
    pub generated: usize,
    /// Number of items that failed at any stage
    pub errors: usize,
    /// Directory holding the PDFs
    pub output_dir: PathBuf,
    /// PDFs written, in generation order
    pub files: Vec<PathBuf>,
}

impl BatchReport {
    fn from_outcomes(output_dir: PathBuf, outcomes: Vec<ItemOutcome>) -> Self {
        let mut files = Vec::new();
        let mut errors = 0;
        for outcome in outcomes {
            match outcome {
                ItemOutcome::Produced(path) => files.push(path),
                ItemOutcome::Failed { .. } => errors += 1,
            }
        }
        Self {
            generated: files.len(),
            errors,
            output_dir,
            files,
        }
    }
}

/// Replace path separators so user text can name files and directories.
pub fn file_safe(text: &str) -> String {
    text.replace(['/', '\\'], "_")
}

/// Directory name for a composition. Never empty and never `.` or `..`,
/// so the result always stays a child of the directory it is joined to.
pub fn dir_safe(text: &str) -> String {
    let name = file_safe(text);
    if name.chars().all(|c| c == '.' || c.is_whitespace()) {
        "_".repeat(name.chars().count().max(1))
    } else {
        name
    }
}

/// File stem for one label: `<composition>_<size>_<color name>`.
pub fn label_stem(composition: &str, size: Size, color: LabelColor) -> String {
    format!("{}_{}_{}", file_safe(composition), size, color.display_name())
}

/// Renders label batches with one fixed configuration.
#[derive(Debug)]
pub struct LabelGenerator {
    config: LabelConfig,
    coords: Coordinates,
    templates: TemplateStore,
    fonts: FontResolver,
}

impl LabelGenerator {
    pub fn new(config: LabelConfig, templates: TemplateStore) -> Self {
        let fonts = FontResolver::new(config.font_candidates.clone());
        Self::with_fonts(config, templates, fonts)
    }

    pub fn with_fonts(config: LabelConfig, templates: TemplateStore, fonts: FontResolver) -> Self {
        let coords = config.coordinates();

        log::info!(
            "Label generator ready: working size {}x{}px, final {}mm @ {} DPI (effective {:.0} DPI)",
            config.working_size,
            config.working_size,
            config.final_size_mm,
            config.dpi,
            config.effective_dpi()
        );
        log::info!("Size anchor: ({}, {})", coords.size.x, coords.size.y);
        log::info!(
            "ONE SIZE anchor: ({}, {})",
            coords.size_one_size.x,
            coords.size_one_size.y
        );
        log::info!(
            "Composition anchor: ({}, {}), box {}x{}px",
            coords.composition.x,
            coords.composition.y,
            config.composition_box.0,
            config.composition_box.1
        );

        Self {
            config,
            coords,
            templates,
            fonts,
        }
    }

    pub fn config(&self) -> &LabelConfig {
        &self.config
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coords
    }

    /// Directory a request's PDFs land in.
    pub fn output_dir_for(&self, output_root: &Path, composition: &str) -> PathBuf {
        output_root.join(dir_safe(composition))
    }

    /// Composite one label in memory.
    pub fn render_label(
        &self,
        care_type: CareType,
        size: Size,
        color: LabelColor,
        composition_lines: &[String],
    ) -> Result<image::RgbImage, LabelError> {
        let template_path = self.templates.lookup(care_type, color).ok_or_else(|| {
            LabelError::Template(format!("No template for color '{}' ({})", color, care_type))
        })?;
        log::debug!("Loading template {}", template_path.display());
        let template = image::open(&template_path).map_err(|e| {
            LabelError::Template(format!("Cannot read {}: {}", template_path.display(), e))
        })?;

        let label = render::compose_label(
            &template,
            &self.config,
            &self.coords,
            &self.fonts,
            size,
            composition_lines,
            color,
        );
        log::info!("Label composed (size {}, color {})", size, color);
        Ok(label)
    }

    /// Run a whole batch under `output_root`.
    pub fn generate(&self, request: &LabelRequest, output_root: &Path) -> BatchReport {
        let output_dir = self.output_dir_for(output_root, &request.composition);

        log::info!("Starting label generation");
        log::info!("Composition: {}", request.composition);
        log::info!("Care: {}", request.care_type.display_name());
        log::info!(
            "Sizes: {}",
            request.sizes.iter().map(Size::as_str).collect::<Vec<_>>().join(", ")
        );
        log::info!(
            "Colors: {}",
            request
                .colors
                .iter()
                .map(LabelColor::display_name)
                .collect::<Vec<_>>()
                .join(", ")
        );

        let temp_dir = output_dir.join(TEMP_PNG_DIR);
        if let Err(e) = std::fs::create_dir_all(&temp_dir) {
            log::error!("Cannot create output directory {}: {}", temp_dir.display(), e);
            let failed = request.sizes.len() * request.colors.len();
            return BatchReport {
                generated: 0,
                errors: failed,
                output_dir,
                files: Vec::new(),
            };
        }

        let lines =
            format_composition_capped(&request.composition, self.config.max_composition_lines);

        log::info!("{}", "=".repeat(70));
        log::info!("Phase 1: compositing labels and writing PNG");
        log::info!("{}", "=".repeat(70));

        let mut outcomes = Vec::new();
        let mut rasters = Vec::new();
        for &size in &request.sizes {
            for &color in &request.colors {
                let stem = label_stem(&request.composition, size, color);
                let png_path = temp_dir.join(format!("{}.png", stem));

                let rendered = self
                    .render_label(request.care_type, size, color, &lines)
                    .and_then(|label| raster::write_png(&label, &png_path));
                match rendered {
                    Ok(()) => {
                        log::info!("PNG written: {}.png", stem);
                        rasters.push((png_path, stem));
                    }
                    Err(reason) => {
                        log::error!("Label {} failed: {}", stem, reason);
                        outcomes.push(ItemOutcome::Failed { label: stem, reason });
                    }
                }
            }
        }

        log::info!("{}", "=".repeat(70));
        log::info!("Phase 2: converting PNG to PDF");
        log::info!("{}", "=".repeat(70));

        let page_size = self.config.page_size_pt();
        for (png_path, stem) in rasters {
            let pdf_path = output_dir.join(format!("{}.pdf", stem));
            match pdf::package_png(&png_path, &pdf_path, page_size) {
                Ok(()) => {
                    log::info!("PDF written: {}.pdf", stem);
                    outcomes.push(ItemOutcome::Produced(pdf_path));
                }
                Err(reason) => {
                    log::error!("PDF conversion of {} failed: {}", stem, reason);
                    outcomes.push(ItemOutcome::Failed { label: stem, reason });
                }
            }
        }

        match std::fs::remove_dir_all(&temp_dir) {
            Ok(()) => log::debug!("Removed {}", temp_dir.display()),
            Err(e) => log::warn!("Could not remove {}: {}", temp_dir.display(), e),
        }

        let report = BatchReport::from_outcomes(output_dir, outcomes);
        log::info!("{}", "=".repeat(70));
        log::info!(
            "Generation finished: {} produced, {} failed",
            report.generated,
            report.errors
        );
        log::info!("{}", "=".repeat(70));
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_dedups_keeping_order() {
        let request = LabelRequest::new(
            "100% silk",
            CareType::Washable,
            [Size::S40, Size::S36, Size::S40],
            [LabelColor::Black, LabelColor::Black],
        );
        assert_eq!(request.sizes, vec![Size::S40, Size::S36]);
        assert_eq!(request.colors, vec![LabelColor::Black]);
    }

    #[test]
    fn test_label_stem() {
        assert_eq!(
            label_stem("95% cotton, 5% elastane", Size::S36, LabelColor::White),
            "95% cotton, 5% elastane_36_белый"
        );
        assert_eq!(
            label_stem("50/50 mix", Size::OneSize, LabelColor::Black),
            "50_50 mix_ONE SIZE_чёрный"
        );
    }

    #[test]
    fn test_dir_safe_never_leaves_parent() {
        assert_eq!(dir_safe(".."), "__");
        assert_eq!(dir_safe("."), "_");
        assert_eq!(dir_safe(""), "_");
        assert_eq!(dir_safe(" .. "), "____");
        assert_eq!(dir_safe("../etc"), ".._etc");
        assert_eq!(dir_safe("100% silk"), "100% silk");
    }

    #[test]
    fn test_dot_composition_output_stays_under_root() {
        let root = tempfile::tempdir().unwrap();
        let generator = LabelGenerator::with_fonts(
            LabelConfig::default(),
            TemplateStore::empty(root.path()),
            FontResolver::builtin(),
        );
        for composition in ["..", ".", ""] {
            let dir = generator.output_dir_for(root.path(), composition);
            assert_eq!(dir.parent(), Some(root.path()));
            assert!(matches!(
                dir.components().next_back(),
                Some(std::path::Component::Normal(_))
            ));
        }
    }

    #[test]
    fn test_report_counts_outcomes() {
        let outcomes = vec![
            ItemOutcome::Produced(PathBuf::from("a.pdf")),
            ItemOutcome::Failed {
                label: "b".to_string(),
                reason: LabelError::Template("missing".to_string()),
            },
            ItemOutcome::Produced(PathBuf::from("c.pdf")),
        ];
        let report = BatchReport::from_outcomes(PathBuf::from("out"), outcomes);
        assert_eq!(report.generated, 2);
        assert_eq!(report.errors, 1);
        assert_eq!(report.files, vec![PathBuf::from("a.pdf"), PathBuf::from("c.pdf")]);
    }

    #[test]
    fn test_missing_template_file_counts_as_error() {
        let root = tempfile::tempdir().unwrap();
        let generator = LabelGenerator::with_fonts(
            LabelConfig::default(),
            TemplateStore::standard(root.path().join("no-templates-here")),
            FontResolver::builtin(),
        );
        let request = LabelRequest::new("silk", CareType::Washable, [Size::S38], LabelColor::ALL);
        let report = generator.generate(&request, root.path());

        assert_eq!(report.generated, 0);
        assert_eq!(report.errors, 2);
        assert!(!report.output_dir.join(TEMP_PNG_DIR).exists());
    }
}
