//! # Error Types
//!
//! This module defines error types used throughout the carelabel library.

use thiserror::Error;

/// Main error type for label generation
#[derive(Debug, Error)]
pub enum LabelError {
    /// Invalid user input (unknown size token, empty form, ...)
    #[error("Invalid input: {0}")]
    Input(String),

    /// No template asset mapped, or the template could not be read
    #[error("Template error: {0}")]
    Template(String),

    /// Image decoding, compositing, or PNG encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Font loading error
    #[error("Font error: {0}")]
    Font(String),

    /// PDF construction or serialization error
    #[error("PDF error: {0}")]
    Pdf(String),

    /// ZIP packaging error
    #[error("Archive error: {0}")]
    Archive(String),

    /// HTTP server error (bind, serve)
    #[error("Server error: {0}")]
    Server(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for LabelError {
    fn from(e: image::ImageError) -> Self {
        LabelError::Image(e.to_string())
    }
}

impl From<lopdf::Error> for LabelError {
    fn from(e: lopdf::Error) -> Self {
        LabelError::Pdf(e.to_string())
    }
}

impl From<zip::result::ZipError> for LabelError {
    fn from(e: zip::result::ZipError) -> Self {
        LabelError::Archive(e.to_string())
    }
}
