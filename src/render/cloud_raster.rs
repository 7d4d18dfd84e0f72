// Word cloud output: PNG through rusttype when a font is available, SVG otherwise
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use rusttype::{point, Font, Scale};
use std::io::Cursor;
use std::path::Path;

use super::word_cloud::{layout_cloud, ApproxMeasure, CloudLayout, TextMeasure};
use crate::config::{CloudConfig, SYSTEM_FONT_PATHS};
use crate::types::{RankedEntry, Result, VizError};

#[derive(Debug, Clone, PartialEq)]
pub enum CloudImage {
    Png(Vec<u8>),
    Svg(String),
}

impl CloudImage {
    pub fn mime(&self) -> &'static str {
        match self {
            CloudImage::Png(_) => "image/png",
            CloudImage::Svg(_) => "image/svg+xml",
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            CloudImage::Png(data) => data,
            CloudImage::Svg(svg) => svg.as_bytes(),
        }
    }

    /// For embedding in an `<img src=...>`
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime(), BASE64.encode(self.bytes()))
    }
}

pub struct GlyphMeasure<'a> {
    font: &'a Font<'static>,
}

impl TextMeasure for GlyphMeasure<'_> {
    fn measure(&self, word: &str, size: f32) -> (f32, f32) {
        let scale = Scale::uniform(size);
        let v_metrics = self.font.v_metrics(scale);
        let width = self
            .font
            .layout(word, scale, point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0);
        (width.ceil(), (v_metrics.ascent - v_metrics.descent).ceil())
    }
}

pub struct WordCloudRenderer {
    config: CloudConfig,
    font: Option<Font<'static>>,
}

impl WordCloudRenderer {
    /// Looks for the configured font, then the usual system locations.
    pub fn new(config: CloudConfig) -> Self {
        let font = load_font(config.font_path.as_deref());
        Self { config, font }
    }

    /// SVG-only renderer
    pub fn without_font(config: CloudConfig) -> Self {
        Self { config, font: None }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn layout(&self, ranked: &[RankedEntry]) -> CloudLayout {
        match &self.font {
            Some(font) => layout_cloud(ranked, &self.config, &GlyphMeasure { font }),
            None => layout_cloud(ranked, &self.config, &ApproxMeasure),
        }
    }

    pub fn render(&self, ranked: &[RankedEntry]) -> Result<CloudImage> {
        let layout = self.layout(ranked);
        log::debug!("Word cloud placed {} of {} words", layout.words.len(), ranked.len());
        match &self.font {
            Some(font) => render_png(&layout, font, &self.config.background).map(CloudImage::Png),
            None => Ok(CloudImage::Svg(render_svg(&layout, &self.config.background))),
        }
    }
}

pub fn load_font(configured: Option<&Path>) -> Option<Font<'static>> {
    let candidates = configured
        .into_iter()
        .map(Path::to_path_buf)
        .chain(SYSTEM_FONT_PATHS.iter().map(|p| Path::new(p).to_path_buf()));

    for path in candidates {
        if let Ok(font_data) = std::fs::read(&path) {
            if let Some(font) = Font::try_from_vec(font_data) {
                log::info!("Word cloud font: {}", path.display());
                return Some(font);
            }
            log::warn!("Not a usable TrueType font: {}", path.display());
        }
    }

    log::warn!("No TrueType font found, word cloud falls back to SVG");
    None
}

pub fn render_png(layout: &CloudLayout, font: &Font<'static>, background: &str) -> Result<Vec<u8>> {
    let bg = parse_color(background).unwrap_or_else(|| {
        log::warn!("Unknown background color '{}', using white", background);
        [255, 255, 255]
    });
    let mut canvas = RgbaImage::from_pixel(layout.width, layout.height, Rgba([bg[0], bg[1], bg[2], 255]));

    for placed in &layout.words {
        let scale = Scale::uniform(placed.font_size);
        let ascent = font.v_metrics(scale).ascent;
        for glyph in font.layout(&placed.word, scale, point(placed.x, placed.y + ascent)) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px < 0 || py < 0 || px >= layout.width as i32 || py >= layout.height as i32 {
                    return;
                }
                let pixel = canvas.get_pixel_mut(px as u32, py as u32);
                for ch in 0..3 {
                    let under = pixel.0[ch] as f32;
                    pixel.0[ch] = (under + (placed.color[ch] as f32 - under) * coverage).round() as u8;
                }
            });
        }
    }

    let mut png = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(canvas)
        .write_to(&mut png, ImageFormat::Png)
        .map_err(|e| VizError::Render(format!("PNG encoding failed: {}", e)))?;
    Ok(png.into_inner())
}

pub fn render_svg(layout: &CloudLayout, background: &str) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}" font-family="DejaVu Sans, Arial, sans-serif">"#,
        w = layout.width,
        h = layout.height
    );
    svg.push_str(&format!(
        r#"<rect width="100%" height="100%" fill="{}"/>"#,
        html_escape::encode_double_quoted_attribute(background)
    ));
    for placed in &layout.words {
        let [r, g, b] = placed.color;
        // Baseline sits at ~80% of the box for the approximate metrics
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="{:.1}" fill="rgb({},{},{})"><title>{}: {}</title>{}</text>"#,
            placed.x,
            placed.y + placed.height * 0.8,
            placed.font_size,
            r,
            g,
            b,
            html_escape::encode_text(&placed.word),
            placed.count,
            html_escape::encode_text(&placed.word),
        ));
    }
    svg.push_str("</svg>");
    svg
}

/// `#rrggbb`, `#rgb` or a few CSS names.
pub fn parse_color(value: &str) -> Option<[u8; 3]> {
    let value = value.trim().to_ascii_lowercase();
    match value.as_str() {
        "white" => return Some([255, 255, 255]),
        "black" => return Some([0, 0, 0]),
        "gray" | "grey" => return Some([128, 128, 128]),
        "lightgray" | "lightgrey" => return Some([211, 211, 211]),
        _ => {}
    }
    let hex = value.strip_prefix('#').filter(|h| h.is_ascii())?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some([channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?]),
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                rgb[i] = v * 16 + v;
            }
            Some(rgb)
        }
        _ => None,
    }
}
