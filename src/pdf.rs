//! Single-page PDF assembly: one embedded raster at a computed placement.
//!
//! Writes the minimal object graph by hand with `pdf-writer`: catalog →
//! page tree → one page, one RGB image XObject and one content stream,
//! both zlib-compressed. The content stream maps the image's unit square
//! to the placement rectangle, converted from millimetres to points.

use flate2::{Compression, write::ZlibEncoder};
use image::RgbaImage;
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref};
use std::io::Write;

use crate::error::StampaError;
use crate::page::{PageGeometry, Placement, fit};

/// Millimetres → PDF points.
const MM_TO_PT: f32 = 72.0 / 25.4;

/// Resource name of the single image XObject on the page.
const IMAGE_NAME: &[u8] = b"Im1";

/// Encode `raster` into a single-page PDF, scaled and centered per
/// [`fit`]. Returns the placement (millimetres) alongside the bytes.
pub fn assemble(raster: &RgbaImage, page: PageGeometry) -> Result<(Placement, Vec<u8>), StampaError> {
    let (width, height) = raster.dimensions();
    if width == 0 || height == 0 {
        return Err(StampaError::ArtifactBuild(
            "Raster has a zero dimension".to_string(),
        ));
    }
    let placement = fit(width, height, page);

    let catalog_id = Ref::new(1);
    let pages_id = Ref::new(2);
    let page_id = Ref::new(3);
    let content_id = Ref::new(4);
    let image_id = Ref::new(5);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id).kids([page_id]).count(1);

    // RGB samples, flate-compressed. Alpha is dropped: the composed
    // canvas is an opaque scan with ink drawn over it.
    let rgb: Vec<u8> = raster
        .pixels()
        .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
        .collect();
    let samples = compress(&rgb)?;
    {
        let mut xobj = pdf.image_xobject(image_id, &samples);
        xobj.filter(Filter::FlateDecode);
        xobj.width(width as i32);
        xobj.height(height as i32);
        xobj.color_space().device_rgb();
        xobj.bits_per_component(8);
    }

    let mut content = Content::new();
    content.save_state();
    content.transform([
        placement.width * MM_TO_PT,
        0.0,
        0.0,
        placement.height * MM_TO_PT,
        placement.offset_x * MM_TO_PT,
        placement.offset_y * MM_TO_PT,
    ]);
    content.x_object(Name(IMAGE_NAME));
    content.restore_state();
    let stream = compress(&content.finish())?;
    pdf.stream(content_id, &stream).filter(Filter::FlateDecode);

    {
        let mut page_obj = pdf.page(page_id);
        page_obj
            .media_box(Rect::new(
                0.0,
                0.0,
                page.width * MM_TO_PT,
                page.height * MM_TO_PT,
            ))
            .parent(pages_id)
            .contents(content_id);
        page_obj
            .resources()
            .x_objects()
            .pair(Name(IMAGE_NAME), image_id);
    }

    Ok((placement, pdf.finish()))
}

fn compress(data: &[u8]) -> Result<Vec<u8>, StampaError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .and_then(|_| encoder.finish())
        .map_err(|e| StampaError::ArtifactBuild(format!("Stream compression failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_assemble_produces_a_pdf() {
        let raster = RgbaImage::from_pixel(100, 60, Rgba([255, 255, 255, 255]));
        let (placement, bytes) = assemble(&raster, PageGeometry::A4_LANDSCAPE).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, b"/XObject"));
        assert!(contains(&bytes, b"/Image"));
        assert!(placement.offset_x >= 0.0 && placement.offset_y >= 0.0);
    }

    #[test]
    fn test_assemble_has_exactly_one_page() {
        let raster = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
        let (_, bytes) = assemble(&raster, PageGeometry::A4_LANDSCAPE).unwrap();
        assert!(contains(&bytes, b"/Count 1"));
    }

    #[test]
    fn test_zero_dimension_raster_is_rejected() {
        let raster = RgbaImage::new(0, 10);
        let err = assemble(&raster, PageGeometry::A4_LANDSCAPE).unwrap_err();
        assert!(matches!(err, StampaError::ArtifactBuild(_)));
    }
}
