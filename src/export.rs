//! Raster export of the replicated snowflake. Native only.

use std::path::{Path, PathBuf};

use eframe::egui::Color32;
use thiserror::Error;

use crate::{
    config::{BACKGROUND_COLOR, LINE_THICKNESS, SNOWFLAKE_COLOR},
    geom::Segment,
};

pub(crate) const EXPORT_SIZE: u32 = 600;
/// Fraction of the image half-width covered by the unit radius.
const EXPORT_FILL: f64 = 0.9;

#[derive(Debug, Error)]
pub(crate) enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PNG encoding failed: {0}")]
    Encoding(#[from] png::EncodingError),
}

pub(crate) type ExportResult<T> = Result<T, ExportError>;

/// Tightly packed RGBA8 image.
pub(crate) struct Raster {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}
impl Raster {
    pub fn new(width: u32, height: u32, background: Color32) -> Self {
        let pixels = background
            .to_array()
            .repeat(width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = 4 * (y as usize * self.width as usize + x as usize);
        self.pixels[i..i + 4].try_into().ok()
    }

    fn stamp(&mut self, cx: f64, cy: f64, radius: f64, color: [u8; 4]) {
        let x0 = (cx - radius).floor().max(0.) as u32;
        let y0 = (cy - radius).floor().max(0.) as u32;
        let x1 = ((cx + radius).ceil().max(0.) as u32).min(self.width);
        let y1 = ((cy + radius).ceil().max(0.) as u32).min(self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                let (dx, dy) = (x as f64 + 0.5 - cx, y as f64 + 0.5 - cy);
                if dx * dx + dy * dy <= radius * radius {
                    let i = 4 * (y as usize * self.width as usize + x as usize);
                    self.pixels[i..i + 4].copy_from_slice(&color);
                }
            }
        }
    }

    /// Draws a round-capped line as a chain of discs.
    pub fn draw_line(&mut self, a: (f64, f64), b: (f64, f64), thickness: f64, color: Color32) {
        let radius = thickness / 2.;
        let color = color.to_array();
        let length = (b.0 - a.0).hypot(b.1 - a.1);
        let steps = (length / (radius / 2.).max(0.5)).ceil().max(1.) as u32;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.stamp(a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t, radius, color);
        }
    }
}

/// Rasterises `segments`, rotated by `spin` radians, into a square image.
pub(crate) fn render_raster(segments: &[Segment], spin: f64, size: u32) -> Raster {
    let mut raster = Raster::new(size, size, BACKGROUND_COLOR);
    let half = size as f64 / 2.;
    let unit = half * EXPORT_FILL;
    let to_pixel = |x: f64, y: f64| (half + x * unit, half - y * unit);
    for segment in segments {
        let Segment { start, end } = segment.rotate(spin);
        raster.draw_line(
            to_pixel(start.x, start.y),
            to_pixel(end.x, end.y),
            LINE_THICKNESS as f64,
            SNOWFLAKE_COLOR,
        );
    }
    raster
}

pub(crate) fn encode_png(raster: &Raster) -> ExportResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, raster.width, raster.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&raster.pixels)?;
        writer.finish()?;
    }
    Ok(png_data)
}

/// Writes `snowflake-<unix seconds>.png` into `dir`.
pub(crate) fn save_png(segments: &[Segment], spin: f64, dir: &Path) -> ExportResult<PathBuf> {
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let path = dir.join(format!("snowflake-{stamp}.png"));
    let png_data = encode_png(&render_raster(segments, spin, EXPORT_SIZE))?;
    std::fs::write(&path, &png_data)?;
    log::info!("Exported {} ({} bytes)", path.display(), png_data.len());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn test_empty_raster_is_background() {
        let raster = render_raster(&[], 0., 32);
        assert_eq!(raster.pixels.len(), 32 * 32 * 4);
        assert_eq!(raster.pixel(0, 0), Some(BACKGROUND_COLOR.to_array()));
        assert_eq!(raster.pixel(16, 16), Some(BACKGROUND_COLOR.to_array()));
        assert_eq!(raster.pixel(32, 0), None);
    }

    #[test]
    fn test_segment_is_drawn() {
        let segment = Segment::new(Point::ORIGIN, Point::new(1., 0.));
        let raster = render_raster(&[segment], 0., 100);
        let stroke = SNOWFLAKE_COLOR.to_array();
        // Along the positive x axis
        assert_eq!(raster.pixel(50, 50), Some(stroke));
        assert_eq!(raster.pixel(80, 50), Some(stroke));
        // Nothing on the other side or far above
        assert_eq!(raster.pixel(20, 50), Some(BACKGROUND_COLOR.to_array()));
        assert_eq!(raster.pixel(80, 20), Some(BACKGROUND_COLOR.to_array()));
    }

    #[test]
    fn test_spin_rotates_output() {
        let segment = Segment::new(Point::ORIGIN, Point::new(1., 0.));
        let raster = render_raster(&[segment], std::f64::consts::FRAC_PI_2, 100);
        let stroke = SNOWFLAKE_COLOR.to_array();
        // Pointing up, so towards smaller y in image space
        assert_eq!(raster.pixel(50, 20), Some(stroke));
        assert_eq!(raster.pixel(80, 50), Some(BACKGROUND_COLOR.to_array()));
    }

    #[test]
    fn test_lines_near_edges_are_clipped() {
        let mut raster = Raster::new(10, 10, Color32::BLACK);
        raster.draw_line((-5., -5.), (15., 15.), 4., Color32::WHITE);
        assert_eq!(raster.pixel(5, 5), Some(Color32::WHITE.to_array()));
        assert_eq!(raster.pixel(9, 0), Some(Color32::BLACK.to_array()));
    }

    #[test]
    fn test_encode_png() {
        let raster = render_raster(&[Segment::new(Point::ORIGIN, Point::new(0.5, 0.5))], 0., 16);
        let data = encode_png(&raster).unwrap();
        assert_eq!(data[..8], PNG_SIGNATURE);
    }

    #[test]
    fn test_save_png() {
        let dir = std::env::temp_dir().join(format!("snowflake-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = save_png(&[Segment::new(Point::ORIGIN, Point::new(1., 0.))], 0., &dir).unwrap();
        let data = std::fs::read(&path).unwrap();
        assert_eq!(data[..8], PNG_SIGNATURE);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_into_missing_dir_fails() {
        let dir = std::env::temp_dir().join("snowflake-export-missing/nested");
        let result = save_png(&[], 0., &dir);
        assert!(matches!(result, Err(ExportError::Io(_))));
    }
}
