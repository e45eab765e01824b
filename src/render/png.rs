// SPDX-FileCopyrightText: 2026 GSI Helmholtzzentrum f. Schwerionenforschung GmbH, Darmstadt, Germany
// SPDX-License-Identifier: LGPL-3.0-or-later

//! PNG output of a finished scene.
//!
//! The scene is rasterized with plotters into an RGB buffer filled with a key
//! color, which is then turned transparent when the RGBA image is written.

use std::path::Path;

use anyhow::{Context, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::warn;

use super::color::{Rgb, WHITE};
use super::scene::{Bounds, Scene};

/// Raster resolution (pixels per canvas unit, same on both axes)
pub const PIXELS_PER_UNIT: f64 = 24.0;
/// Empty border around the drawn content, in canvas units
const MARGIN: f64 = 1.0;
const LABEL_FONT_PX: u32 = 14;
/// Background color that becomes fully transparent
const KEY_COLOR: Rgb = WHITE;

impl From<Rgb> for RGBColor {
    fn from(c: Rgb) -> Self {
        RGBColor(c.0, c.1, c.2)
    }
}

/// Height of a label in canvas units at the given scale
fn label_height(scale: f64) -> f64 {
    f64::from(LABEL_FONT_PX) / scale
}

/// Maps canvas units to pixel coordinates
struct Viewport {
    bounds: Bounds,
    scale: f64,
}

impl Viewport {
    fn new(scene: &Scene, scale: f64) -> Self {
        let bounds = scene
            .bounds(label_height(scale))
            .unwrap_or(Bounds { min_x: 0.0, min_y: 0.0, max_x: 0.0, max_y: 0.0 })
            .padded(MARGIN);
        Self { bounds, scale }
    }

    fn size(&self) -> (u32, u32) {
        let w = (self.bounds.width() * self.scale).ceil().max(1.0) as u32;
        let h = (self.bounds.height() * self.scale).ceil().max(1.0) as u32;
        (w, h)
    }

    fn to_pixel(&self, x: f64, y: f64) -> (i32, i32) {
        (
            ((x - self.bounds.min_x) * self.scale).round() as i32,
            ((y - self.bounds.min_y) * self.scale).round() as i32,
        )
    }
}

/// Rasterize a scene into tightly packed RGBA pixels; returns (width, height, pixels)
pub fn rasterize(scene: &Scene, scale: f64) -> Result<(u32, u32, Vec<u8>)> {
    let view = Viewport::new(scene, scale);
    let (width, height) = view.size();
    let mut rgb = vec![0u8; width as usize * height as usize * 3];

    {
        let root = BitMapBackend::with_buffer(&mut rgb, (width, height)).into_drawing_area();
        root.fill(&RGBColor::from(KEY_COLOR))
            .context("Failed to clear canvas")?;

        for rect in &scene.rects {
            let top_left = view.to_pixel(rect.x, rect.y);
            let bottom_right = view.to_pixel(rect.x + rect.width, rect.y + rect.height);
            root.draw(&Rectangle::new([top_left, bottom_right], RGBColor::from(rect.fill).filled()))
                .context("Failed to draw node")?;
            root.draw(&Rectangle::new([top_left, bottom_right], RGBColor::from(rect.edge).stroke_width(1)))
                .context("Failed to draw node outline")?;
        }

        // Anchored at the baseline side so the text sits above its rack
        let font = ("sans-serif", LABEL_FONT_PX)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Bottom));
        for label in &scene.labels {
            let anchor = view.to_pixel(label.x, label.y);
            // Text needs a system font; a missing one costs the labels, not the map
            if let Err(e) = root.draw(&Text::new(label.text.clone(), anchor, font.clone())) {
                warn!(label = %label.text, error = %e, "Failed to draw label");
            }
        }

        root.present().context("Failed to finish canvas")?;
    }

    let rgba = rgb
        .chunks_exact(3)
        .flat_map(|px| {
            let alpha = if (px[0], px[1], px[2]) == (KEY_COLOR.0, KEY_COLOR.1, KEY_COLOR.2) { 0 } else { 255 };
            [px[0], px[1], px[2], alpha]
        })
        .collect();

    Ok((width, height, rgba))
}

/// Write the scene as a PNG with transparent background
pub fn write_png(scene: &Scene, path: &Path) -> Result<()> {
    let (width, height, pixels) = rasterize(scene, PIXELS_PER_UNIT)?;
    image::save_buffer(path, &pixels, width, height, image::ColorType::Rgba8)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SystemConfig;
    use crate::grid::{Cell, RackGrid};
    use crate::render::color::{Rgb, ABSENT_COLOR};
    use crate::render::draw_rack;
    use crate::render::scene::Rect;

    fn pixel(pixels: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * width + x) * 4) as usize;
        [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
    }

    #[test]
    fn test_rasterize_size_and_transparency() {
        let mut scene = Scene::new();
        scene.add_rect(Rect::node(0.0, 0.0, 2.0, 1.0, ABSENT_COLOR));
        let (w, h, px) = rasterize(&scene, 10.0).unwrap();

        // 2x1 units plus a 1-unit margin on every side
        assert_eq!((w, h), (40, 30));
        assert_eq!(px.len(), 40 * 30 * 4);
        // Background corner is transparent
        assert_eq!(pixel(&px, w, 0, 0)[3], 0);
        // Inside of the node is opaque grey
        assert_eq!(pixel(&px, w, 20, 15), [128, 128, 128, 255]);
        // Outline is black
        assert_eq!(pixel(&px, w, 10, 15), [0, 0, 0, 255]);
    }

    #[test]
    fn test_later_rects_cover_earlier_ones() {
        let mut scene = Scene::new();
        scene.add_rect(Rect::node(0.0, 0.0, 2.0, 2.0, ABSENT_COLOR));
        scene.add_rect(Rect::node(0.0, 0.0, 2.0, 2.0, Rgb(8, 81, 156)));
        let (w, _, px) = rasterize(&scene, 10.0).unwrap();
        assert_eq!(pixel(&px, w, 20, 20), [8, 81, 156, 255]);
    }

    #[test]
    fn test_write_png() {
        let mut scene = Scene::new();
        scene.add_rect(Rect::node(0.0, 0.0, 0.5, 1.0, ABSENT_COLOR));
        let path = std::env::temp_dir().join(format!("rackmap-test-{}.png", std::process::id()));
        write_png(&scene, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (60, 72));
        assert_eq!(img.get_pixel(0, 0)[3], 0);
        std::fs::remove_file(&path).ok();
    }

    /// Dark pixels in a horizontal band of canvas rows, x in [x0, x1)
    fn dark_pixels(pixels: &[u8], width: u32, scene: &Scene, y: (f64, f64), x: (f64, f64)) -> usize {
        let view = Viewport::new(scene, PIXELS_PER_UNIT);
        let (x0, y0) = view.to_pixel(x.0, y.0);
        let (x1, y1) = view.to_pixel(x.1, y.1);
        (y0..y1)
            .flat_map(|py| (x0..x1).map(move |px| (px as u32, py as u32)))
            .filter(|&(px, py)| {
                let [r, g, b, _] = pixel(pixels, width, px, py);
                r < 64 && g < 64 && b < 64
            })
            .count()
    }

    #[test]
    fn test_gordon_label_stays_above_rack() {
        let config = SystemConfig::gordon();
        let mut grid = RackGrid::new(0, &config);
        let cells: Vec<Cell> = grid.cells().collect();
        for cell in cells {
            grid.set(cell, 0.0, config.ppn).unwrap();
        }
        let mut scene = Scene::new();
        draw_rack(&mut scene, &grid, &config);

        let (w, h, px) = rasterize(&scene, PIXELS_PER_UNIT).unwrap();
        let view = Viewport::new(&scene, PIXELS_PER_UNIT);
        // Whole label fits on the canvas
        let label_top = view.to_pixel(0.0, -0.1 - label_height(PIXELS_PER_UNIT)).1;
        assert!(label_top >= 0 && label_top < h as i32);

        // Row 0 shows only node outlines, exactly like row 1
        let row0 = dark_pixels(&px, w, &scene, (0.1, 0.9), (0.0, 4.0));
        let row1 = dark_pixels(&px, w, &scene, (1.1, 1.9), (0.0, 4.0));
        assert_eq!(row0, row1);
    }
}
