//! Output page geometry and aspect-preserving placement.
//!
//! All lengths here are millimetres. Conversion to PDF points happens in
//! the PDF writer, nowhere else.

/// Physical size of the single output page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
}

impl PageGeometry {
    /// Landscape A4, the format the petition sheets are printed on.
    pub const A4_LANDSCAPE: PageGeometry = PageGeometry {
        width: 297.0,
        height: 210.0,
    };
}

/// Where a raster lands on the page: a uniform scale plus centering
/// offsets, all in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Millimetres of page per raster pixel.
    pub scale: f32,
    pub width: f32,
    pub height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Fit a raster of the given pixel dimensions into `page`.
///
/// The scale is the smaller of the two per-axis ratios, so the raster is
/// always fully contained: it touches the page on one axis and is
/// centered on both. Offsets are never negative for positive raster
/// dimensions.
pub fn fit(raster_width: u32, raster_height: u32, page: PageGeometry) -> Placement {
    let scale = (page.width / raster_width as f32).min(page.height / raster_height as f32);
    let width = raster_width as f32 * scale;
    let height = raster_height as f32 * scale;
    Placement {
        scale,
        width,
        height,
        offset_x: (page.width - width) / 2.0,
        offset_y: (page.height - height) / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 0.001;

    #[test]
    fn test_wide_raster_touches_horizontal_axis() {
        let p = fit(1000, 600, PageGeometry::A4_LANDSCAPE);
        assert!((p.scale - 0.297).abs() < EPS);
        assert!((p.width - 297.0).abs() < EPS);
        assert!((p.height - 178.2).abs() < EPS);
        assert!(p.offset_x.abs() < EPS);
        assert!((p.offset_y - 15.9).abs() < EPS);
    }

    #[test]
    fn test_tall_raster_touches_vertical_axis() {
        let p = fit(600, 1000, PageGeometry::A4_LANDSCAPE);
        assert!((p.scale - 0.21).abs() < EPS);
        assert!((p.height - 210.0).abs() < EPS);
        assert!(p.offset_y.abs() < EPS);
        assert!(p.offset_x > 0.0);
    }

    #[test]
    fn test_placement_is_always_contained() {
        let page = PageGeometry::A4_LANDSCAPE;
        for (w, h) in [(1, 1), (1, 10_000), (10_000, 1), (297, 210), (4961, 3508)] {
            let p = fit(w, h, page);
            assert!(p.width <= page.width + EPS, "{w}x{h}");
            assert!(p.height <= page.height + EPS, "{w}x{h}");
            assert!(p.offset_x >= 0.0, "{w}x{h}");
            assert!(p.offset_y >= 0.0, "{w}x{h}");
        }
    }

    #[test]
    fn test_small_raster_is_scaled_up() {
        // A tiny raster grows to fill one axis; "fit" is not "shrink only".
        let p = fit(29, 21, PageGeometry::A4_LANDSCAPE);
        assert!(p.scale > 1.0);
        assert!((p.height - 210.0).abs() < EPS);
    }

    #[test]
    fn test_centering_is_symmetric() {
        let page = PageGeometry::A4_LANDSCAPE;
        let p = fit(800, 800, page);
        assert!((p.offset_x * 2.0 + p.width - page.width).abs() < EPS);
        assert!((p.offset_y * 2.0 + p.height - page.height).abs() < EPS);
    }
}
