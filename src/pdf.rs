//! # Page Packaging
//!
//! Embeds a rasterized label into a single-page PDF of fixed physical size.
//!
//! ## Page Structure
//!
//! ```text
//! Catalog → Pages → Page (MediaBox 0 0 s s)
//!                     ├── Contents: q s 0 0 s 0 0 cm /Im0 Do Q
//!                     └── Resources/XObject/Im0: RGB image, FlateDecode
//! ```
//!
//! The image is stored as raw 8-bit RGB compressed with zlib, so decoding
//! the page yields the exact pixels of the source raster. It is stretched to
//! fill the page (no margin, no aspect correction; templates are square).

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use image::{Rgb, RgbImage};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::error::LabelError;

/// Resource name of the label image on the page.
const IMAGE_NAME: &str = "Im0";

/// Decoded contents of a single-image page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageImage {
    /// MediaBox side in points
    pub page_size_pt: f32,
    pub image: RgbImage,
}

/// Build a one-page document showing `rgb` scaled to a square page of
/// `page_size_pt` points.
pub fn image_page(rgb: &RgbImage, page_size_pt: f32) -> Result<Document, LabelError> {
    let (width, height) = rgb.dimensions();
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(rgb.as_raw())?;
    let compressed = encoder.finish()?;

    let mut image = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "FlateDecode",
        },
        compressed,
    );
    image.allows_compression = false;
    let image_id = doc.add_object(image);

    let s: Object = page_size_pt.into();
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![s.clone(), 0.into(), 0.into(), s.clone(), 0.into(), 0.into()],
            ),
            Operation::new("Do", vec![Object::Name(IMAGE_NAME.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let media_box: Vec<Object> = vec![0.into(), 0.into(), s.clone(), s];
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => media_box.clone(),
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! {
                IMAGE_NAME => image_id,
            },
        },
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "MediaBox" => media_box,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    Ok(doc)
}

/// Convert a PNG file into a single-page PDF.
pub fn package_png(png_path: &Path, pdf_path: &Path, page_size_pt: f32) -> Result<(), LabelError> {
    log::debug!("Packaging {} into {}", png_path.display(), pdf_path.display());

    let rgb = image::open(png_path)?.to_rgb8();
    let mut doc = image_page(&rgb, page_size_pt)?;

    let mut writer = BufWriter::new(File::create(pdf_path)?);
    doc.save_to(&mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Verify PDF output works at all. Called once at startup.
pub fn self_check() -> Result<(), LabelError> {
    let probe = RgbImage::from_pixel(1, 1, Rgb([255, 255, 255]));
    let mut doc = image_page(&probe, 10.0)?;
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;

    if !bytes.starts_with(b"%PDF-") {
        return Err(LabelError::Pdf("PDF writer produced no header".to_string()));
    }
    Ok(())
}

/// Decode the label image and page size back out of a PDF produced by
/// [`package_png`].
pub fn read_page_image(pdf_bytes: &[u8]) -> Result<PageImage, LabelError> {
    let doc = Document::load_mem(pdf_bytes)?;

    let page_id = *doc
        .get_pages()
        .values()
        .next()
        .ok_or_else(|| LabelError::Pdf("Document has no pages".to_string()))?;
    let page = doc.get_dictionary(page_id)?;
    let media_box = page.get(b"MediaBox")?.as_array()?;
    let page_size_pt = media_box
        .get(2)
        .ok_or_else(|| LabelError::Pdf("Malformed MediaBox".to_string()))?
        .as_float()?;

    let image_ref = page
        .get(b"Resources")?
        .as_dict()?
        .get(b"XObject")?
        .as_dict()?
        .get(IMAGE_NAME.as_bytes())?
        .as_reference()?;
    let stream = doc.get_object(image_ref)?.as_stream()?;

    let width = stream.dict.get(b"Width")?.as_i64()? as u32;
    let height = stream.dict.get(b"Height")?.as_i64()? as u32;

    let mut raw = Vec::new();
    ZlibDecoder::new(stream.content.as_slice()).read_to_end(&mut raw)?;

    let image = RgbImage::from_raw(width, height, raw)
        .ok_or_else(|| LabelError::Pdf("Image data does not match its dimensions".to_string()))?;

    Ok(PageImage {
        page_size_pt,
        image,
    })
}
