use std::path::Path;

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};

use crate::keywords::KeywordRecord;
use crate::util::score;

use super::Scene;
use super::scene::{BubbleStyle, STROKE_DASH_LENGTH, STROKE_GAP_LENGTH};

pub const EXPORT_FILE_NAME: &str = "seo-keywords.png";
pub const EXPORT_SCALE: f32 = 2.0;

const BACKGROUND: Rgba<u8> = Rgba([0xe4, 0xeb, 0xf5, 0xff]);

pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

pub fn keyword_transcript(records: &[KeywordRecord]) -> String {
    let mut sorted = records.iter().collect::<Vec<_>>();
    sorted.sort_by(|a, b| b.size.total_cmp(&a.size));

    sorted
        .iter()
        .map(|record| format!("{} ({})", record.text, score(record.size)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn copy_transcript(records: &[KeywordRecord], clipboard: &mut dyn Clipboard) -> bool {
    match clipboard.set_text(&keyword_transcript(records)) {
        Ok(()) => true,
        Err(error) => {
            log::warn!("keyword transcript copy failed: {error:#}");
            false
        }
    }
}

pub fn render_bitmap(scene: &Scene) -> RgbaImage {
    let width = ((scene.viewport.width * EXPORT_SCALE).round() as u32).max(1);
    let height = ((scene.viewport.height * EXPORT_SCALE).round() as u32).max(1);
    let mut bitmap = RgbaImage::from_pixel(width, height, BACKGROUND);

    for (node, style) in scene.nodes.iter().zip(scene.styles.iter()) {
        draw_bubble(
            &mut bitmap,
            node.pos.x * EXPORT_SCALE,
            node.pos.y * EXPORT_SCALE,
            node.radius * EXPORT_SCALE,
            style,
        );
    }

    bitmap
}

pub fn save_png(scene: &Scene, path: &Path) -> Result<()> {
    render_bitmap(scene)
        .save(path)
        .with_context(|| format!("failed to write image {}", path.display()))
}

pub fn export_png(scene: &Scene, path: &Path) -> bool {
    match save_png(scene, path) {
        Ok(()) => true,
        Err(error) => {
            log::warn!("image export failed: {error:#}");
            false
        }
    }
}

fn blend_pixel(pixel: &mut Rgba<u8>, color: Rgba<u8>, alpha: f32) {
    let alpha = alpha.clamp(0.0, 1.0);
    let inverse = 1.0 - alpha;

    for channel in 0..3 {
        pixel.0[channel] = ((color.0[channel] as f32 * alpha)
            + (pixel.0[channel] as f32 * inverse))
            .round() as u8;
    }
    pixel.0[3] = 0xff;
}

fn draw_bubble(bitmap: &mut RgbaImage, cx: f32, cy: f32, radius: f32, style: &BubbleStyle) {
    let stroke_width = style.stroke.map(|stroke| stroke.width * EXPORT_SCALE);
    let reach = radius + stroke_width.unwrap_or(0.0) + 1.0;

    let x_min = ((cx - reach).floor().max(0.0)) as u32;
    let y_min = ((cy - reach).floor().max(0.0)) as u32;
    let x_max = ((cx + reach).ceil().max(0.0) as u32).min(bitmap.width().saturating_sub(1));
    let y_max = ((cy + reach).ceil().max(0.0) as u32).min(bitmap.height().saturating_sub(1));

    let fill = Rgba([style.fill.r(), style.fill.g(), style.fill.b(), 0xff]);
    let dash_period = (STROKE_DASH_LENGTH + STROKE_GAP_LENGTH) * EXPORT_SCALE;
    let dash_on = STROKE_DASH_LENGTH * EXPORT_SCALE;

    for y in y_min..=y_max {
        for x in x_min..=x_max {
            let dx = (x as f32 + 0.5) - cx;
            let dy = (y as f32 + 0.5) - cy;
            let distance = ((dx * dx) + (dy * dy)).sqrt();

            let coverage = (radius - distance + 0.5).clamp(0.0, 1.0);
            if coverage > 0.0 {
                blend_pixel(bitmap.get_pixel_mut(x, y), fill, style.opacity * coverage);
            }

            if let Some(stroke) = style.stroke
                && let Some(width) = stroke_width
            {
                let ring = ((width * 0.5) - (distance - radius).abs() + 0.5).clamp(0.0, 1.0);
                if ring <= 0.0 {
                    continue;
                }

                let arc = (dy.atan2(dx) + std::f32::consts::PI) * radius;
                if arc.rem_euclid(dash_period) < dash_on {
                    let color = Rgba([stroke.color.r(), stroke.color.g(), stroke.color.b(), 0xff]);
                    blend_pixel(bitmap.get_pixel_mut(x, y), color, ring);
                }
            }
        }
    }
}
