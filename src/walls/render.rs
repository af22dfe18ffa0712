//! Debug renders of vectorized walls.
//!
//! None of this is needed to obtain polylines; the images exist so an
//! operator can eyeball a run. Drawing goes through `imageproc::drawing`.
use super::polyline::Polyline;
use super::skeleton::Skeleton;
use crate::error::Result;
use crate::image::io::{save_mask, save_rgb, save_rgba};
use crate::image::{BinaryMask, ImageView, RasterImage};
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, Canvas};
use log::debug;
use std::path::{Path, PathBuf};

const LINE_COLOR: [u8; 3] = [0, 160, 255];
const VERTEX_COLOR: [u8; 3] = [255, 64, 0];
const LINE_HALF_WIDTH: i32 = 1;
const VERTEX_RADIUS: i32 = 3;

fn draw_polyline<C: Canvas>(canvas: &mut C, line: &Polyline, color: C::Pixel) {
    for w in line.windows(2) {
        for dy in -LINE_HALF_WIDTH..=LINE_HALF_WIDTH {
            for dx in -LINE_HALF_WIDTH..=LINE_HALF_WIDTH {
                let (ox, oy) = (dx as f32, dy as f32);
                draw_line_segment_mut(
                    canvas,
                    (w[0].x + ox, w[0].y + oy),
                    (w[1].x + ox, w[1].y + oy),
                    color,
                );
            }
        }
    }
}

fn draw_vertices<C: Canvas>(canvas: &mut C, line: &Polyline, color: C::Pixel) {
    for p in line {
        draw_filled_circle_mut(canvas, (p.x.round() as i32, p.y.round() as i32), VERTEX_RADIUS, color);
    }
}

/// Polylines drawn over the source image.
pub fn render_overlay(source: &RasterImage, polylines: &[Polyline]) -> RgbImage {
    let mut canvas = source.to_rgb_image();
    for line in polylines {
        draw_polyline(&mut canvas, line, Rgb(LINE_COLOR));
    }
    canvas
}

/// Solid lines on a fully transparent canvas.
pub fn render_lines_transparent(width: u32, height: u32, polylines: &[Polyline]) -> RgbaImage {
    let mut canvas = RgbaImage::new(width, height);
    let [r, g, b] = LINE_COLOR;
    for line in polylines {
        draw_polyline(&mut canvas, line, Rgba([r, g, b, 255]));
    }
    canvas
}

/// Solid lines on white.
pub fn render_lines_white(width: u32, height: u32, polylines: &[Polyline]) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
    for line in polylines {
        draw_polyline(&mut canvas, line, Rgb(LINE_COLOR));
    }
    canvas
}

/// Lines on white with every vertex marked.
pub fn render_lines_and_vertices(width: u32, height: u32, polylines: &[Polyline]) -> RgbImage {
    let mut canvas = render_lines_white(width, height, polylines);
    for line in polylines {
        draw_vertices(&mut canvas, line, Rgb(VERTEX_COLOR));
    }
    canvas
}

/// Write the four wall renders plus the intermediate mask and skeleton into
/// `dir`. Returns the written paths.
pub fn save_debug_artifacts(
    dir: &Path,
    source: &RasterImage,
    mask: &BinaryMask,
    skeleton: &Skeleton,
    polylines: &[Polyline],
) -> Result<Vec<PathBuf>> {
    let (w, h) = (source.width() as u32, source.height() as u32);
    let mut written = Vec::with_capacity(6);

    let path = dir.join("walls_overlay.png");
    save_rgb(&render_overlay(source, polylines), &path)?;
    written.push(path);

    let path = dir.join("walls_transparent.png");
    save_rgba(&render_lines_transparent(w, h, polylines), &path)?;
    written.push(path);

    let path = dir.join("walls_white.png");
    save_rgb(&render_lines_white(w, h, polylines), &path)?;
    written.push(path);

    let path = dir.join("walls_vertices.png");
    save_rgb(&render_lines_and_vertices(w, h, polylines), &path)?;
    written.push(path);

    let path = dir.join("trace_mask.png");
    save_mask(mask, &path)?;
    written.push(path);

    let path = dir.join("skeleton.png");
    save_mask(&skeleton.to_mask(), &path)?;
    written.push(path);

    debug!("wrote {} debug artifacts to {}", written.len(), dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    fn diagonal() -> Vec<Polyline> {
        vec![vec![Point2::new(2.0, 2.0), Point2::new(30.0, 2.0), Point2::new(30.0, 30.0)]]
    }

    #[test]
    fn transparent_render_only_touches_line_pixels() {
        let img = render_lines_transparent(40, 40, &diagonal());
        assert_eq!(img.get_pixel(15, 2)[3], 255);
        assert_eq!(img.get_pixel(15, 20)[3], 0);
    }

    #[test]
    fn overlay_keeps_the_background() {
        let src = RasterImage::filled(40, 40, [10, 20, 30]);
        let img = render_overlay(&src, &diagonal());
        assert_eq!(img.get_pixel(10, 30).0, [10, 20, 30]);
        assert_eq!(img.get_pixel(30, 15).0, LINE_COLOR);
    }

    #[test]
    fn vertices_are_marked() {
        let img = render_lines_and_vertices(40, 40, &diagonal());
        assert_eq!(img.get_pixel(30, 30).0, VERTEX_COLOR);
        assert_eq!(img.get_pixel(15, 2).0, LINE_COLOR);
        assert_eq!(img.get_pixel(15, 20).0, [255, 255, 255]);
    }

    #[test]
    fn artifacts_land_in_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let src = RasterImage::filled(40, 40, [0, 0, 0]);
        let mask = BinaryMask::new(40, 40);
        let skel = crate::walls::skeleton::thin(&mask);
        let paths = save_debug_artifacts(dir.path(), &src, &mask, &skel, &diagonal()).unwrap();
        assert_eq!(paths.len(), 6);
        assert!(paths.iter().all(|p| p.exists()));
    }
}
