//! In-memory ZIP packaging of generated PDFs for download.

use std::io::{Cursor, Write};
use std::path::PathBuf;

use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use crate::error::LabelError;

/// Download name for a composition's archive.
pub fn archive_name(composition: &str) -> String {
    format!("labels_{}.zip", composition.replace('/', "_"))
}

/// Zip `files` into memory. Entries are named after the file name only.
pub fn zip_files(files: &[PathBuf]) -> Result<Vec<u8>, LabelError> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| LabelError::Archive(format!("Not a file: {}", path.display())))?;
        let bytes = std::fs::read(path)?;
        writer.start_file(name, options)?;
        writer.write_all(&bytes)?;
    }

    Ok(writer.finish()?.into_inner())
}
