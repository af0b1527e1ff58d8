//! Label generation handlers.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{
    archive,
    batch::{LabelGenerator, LabelRequest},
    catalog::{CareType, LabelColor, Size},
    error::LabelError,
};

use super::super::state::AppState;

/// Form data for a generation run.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelForm {
    pub composition: String,
    pub care_type: CareType,
    #[serde(default)]
    pub sizes: Vec<Size>,
    #[serde(default)]
    pub colors: Vec<LabelColor>,
}

/// A choice offered by the form.
#[derive(Debug, Serialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

/// Everything the form lets the user pick from.
#[derive(Debug, Serialize)]
pub struct Options {
    pub sizes: Vec<Choice>,
    pub colors: Vec<Choice>,
    pub care_types: Vec<Choice>,
}

impl Options {
    pub fn current() -> Self {
        Self {
            sizes: Size::ALL
                .iter()
                .map(|s| Choice {
                    value: s.as_str().to_string(),
                    label: s.as_str().to_string(),
                })
                .collect(),
            colors: LabelColor::ALL
                .iter()
                .map(|c| Choice {
                    value: c.key().to_string(),
                    label: c.display_name().to_string(),
                })
                .collect(),
            care_types: CareType::ALL
                .iter()
                .map(|c| Choice {
                    value: c.key().to_string(),
                    label: c.display_name().to_string(),
                })
                .collect(),
        }
    }
}

/// Handle GET /api/options - list sizes, colors and care variants.
pub async fn options() -> Json<Options> {
    Json(Options::current())
}

/// Handle POST /api/labels - generate labels and return them as a ZIP.
pub async fn generate(State(state): State<Arc<AppState>>, Json(form): Json<LabelForm>) -> Response {
    if form.composition.trim().is_empty() || form.sizes.is_empty() || form.colors.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Пожалуйста, заполните все параметры!");
    }

    let generator = state.generator.clone();
    let scratch = state.config.scratch_dir.clone();
    let result =
        tokio::task::spawn_blocking(move || build_archive(&generator, &form, scratch.as_deref()))
            .await;

    match result {
        Ok(Ok(Some(download))) => zip_response(download),
        Ok(Ok(None)) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Не удалось создать этикетки. Проверьте исходные файлы-шаблоны.",
        ),
        Ok(Err(e)) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("Generation failed: {}", e),
        ),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &format!("Task error: {}", e)),
    }
}

/// A finished archive ready to send.
pub struct Download {
    pub file_name: String,
    pub file_count: usize,
    pub bytes: Vec<u8>,
}

/// Run the batch in a scratch directory and zip whatever PDFs it left.
///
/// Returns `None` when no PDF was produced.
pub fn build_archive(
    generator: &LabelGenerator,
    form: &LabelForm,
    scratch: Option<&Path>,
) -> Result<Option<Download>, LabelError> {
    let temp = match scratch {
        Some(dir) => tempfile::tempdir_in(dir)?,
        None => tempfile::tempdir()?,
    };

    let request = LabelRequest::new(
        form.composition.clone(),
        form.care_type,
        form.sizes.iter().copied(),
        form.colors.iter().copied(),
    );
    let output_root = temp.path().join("output");
    let report = generator.generate(&request, &output_root);
    if report.output_dir.parent() != Some(output_root.as_path()) {
        return Err(LabelError::Input(format!(
            "Output directory {} escapes the request directory",
            report.output_dir.display()
        )));
    }

    let pdfs = list_pdfs(&report.output_dir)?;
    log::info!("Found {} PDF files in {}", pdfs.len(), report.output_dir.display());
    if pdfs.is_empty() || report.generated == 0 {
        return Ok(None);
    }

    let bytes = archive::zip_files(&pdfs)?;
    Ok(Some(Download {
        file_name: archive::archive_name(&form.composition),
        file_count: pdfs.len(),
        bytes,
    }))
}

/// PDFs in `dir`, sorted by name. A missing directory has none.
fn list_pdfs(dir: &Path) -> Result<Vec<PathBuf>, LabelError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut pdfs = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("pdf")) {
            pdfs.push(path);
        }
    }
    pdfs.sort();
    Ok(pdfs)
}

/// `Content-Disposition` value with an ASCII fallback and a UTF-8 name.
pub fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        percent_encode(file_name)
    )
}

/// RFC 5987 attribute value encoding.
fn percent_encode(text: &str) -> String {
    let mut out = String::new();
    for byte in text.bytes() {
        if byte.is_ascii_alphanumeric() || b"!#$&+-.^_`|~".contains(&byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

fn zip_response(download: Download) -> Response {
    log::info!(
        "Sending {} ({} PDF labels, {} bytes)",
        download.file_name,
        download.file_count,
        download.bytes.len()
    );
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&download.file_name)),
            (
                header::HeaderName::from_static("x-label-count"),
                download.file_count.to_string(),
            ),
        ],
        download.bytes,
    )
        .into_response()
}

/// Generate error response JSON.
fn error_response(status: StatusCode, error_msg: &str) -> Response {
    (
        status,
        Json(serde_json::json!({ "success": false, "error": error_msg })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_is_ascii() {
        let value = content_disposition("labels_95% хлопок.zip");
        assert!(value.is_ascii());
        assert!(value.starts_with("attachment; filename=\"labels_95__"));
        assert!(value.contains("filename*=UTF-8''labels_95%25%20%D1%85"));
    }

    #[test]
    fn test_options_cover_catalog() {
        let options = Options::current();
        assert_eq!(options.sizes.len(), 8);
        assert_eq!(options.sizes[7].value, "ONE SIZE");
        assert_eq!(options.colors[1].label, "чёрный");
        assert_eq!(options.care_types[0].value, "washable");
    }

    fn write_templates(dir: &Path) {
        let white = image::RgbImage::from_pixel(64, 64, image::Rgb([255, 255, 255]));
        for name in ["Group-305.jpg", "Group-307.jpg"] {
            white.save(dir.join(name)).unwrap();
        }
    }

    #[test]
    fn test_dot_dot_composition_zips_only_its_own_labels() {
        let templates = tempfile::tempdir().unwrap();
        write_templates(templates.path());
        let scratch = tempfile::tempdir().unwrap();
        std::fs::write(scratch.path().join("someone_elses.pdf"), b"%PDF-1.5").unwrap();

        let generator = LabelGenerator::with_fonts(
            crate::config::LabelConfig::default(),
            crate::catalog::TemplateStore::standard(templates.path()),
            crate::render::font::FontResolver::builtin(),
        );
        let form = LabelForm {
            composition: "..".to_string(),
            care_type: CareType::Washable,
            sizes: vec![Size::S36],
            colors: vec![LabelColor::White],
        };
        let download = build_archive(&generator, &form, Some(scratch.path()))
            .unwrap()
            .expect("one label produced");

        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(download.bytes)).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(names, vec![".._36_белый.pdf".to_string()]);

        // Scratch parent holds only what was there before
        let left: Vec<_> = std::fs::read_dir(scratch.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(left, vec![std::ffi::OsString::from("someone_elses.pdf")]);
    }

    #[test]
    fn test_form_deserializes() {
        let form: LabelForm = serde_json::from_str(
            r#"{"composition":"100% wool","care_type":"not_washable","sizes":["ONE SIZE","40"],"colors":["white"]}"#,
        )
        .unwrap();
        assert_eq!(form.care_type, CareType::NotWashable);
        assert_eq!(form.sizes, vec![Size::OneSize, Size::S40]);
        assert_eq!(form.colors, vec![LabelColor::White]);
    }
}
