use std::path::{Path, PathBuf};

use cosmic_text::{
    Attrs, Buffer, Color, Family, FontSystem, Metrics, Shaping, SwashCache, Weight, fontdb,
};
use log::debug;

use crate::glyph_data::{self, GLYPH_HEIGHT, GLYPH_WIDTH};

#[derive(Debug)]
pub enum FontError {
    NotFound(String),
    ReadError(std::io::Error),
    NoFaces(String),
}

impl std::fmt::Display for FontError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FontError::NotFound(path) => write!(f, "Font file not found: {path}"),
            FontError::ReadError(err) => write!(f, "Failed to read font file: {err}"),
            FontError::NoFaces(path) => write!(f, "No usable font face in: {path}"),
        }
    }
}

impl std::error::Error for FontError {}

/// 8-bit coverage of a rendered label, cropped to its ink bounding box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphMask {
    pub width: u32,
    pub height: u32,
    coverage: Vec<u8>,
}

impl GlyphMask {
    /// Returns `None` when `coverage` does not hold exactly `width * height` samples.
    pub fn new(width: u32, height: u32, coverage: Vec<u8>) -> Option<Self> {
        if coverage.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            coverage,
        })
    }

    /// Builds a mask from loose `(x, y, alpha)` samples in any coordinate space.
    /// Zero-alpha samples are dropped, overlapping samples keep the strongest alpha.
    pub fn from_samples(samples: &[(i32, i32, u8)]) -> Self {
        let inked = || samples.iter().filter(|(_, _, a)| *a > 0);

        let Some(min_x) = inked().map(|(x, _, _)| *x).min() else {
            return Self::default();
        };
        let min_y = inked().map(|(_, y, _)| *y).min().unwrap_or(0);
        let max_x = inked().map(|(x, _, _)| *x).max().unwrap_or(min_x);
        let max_y = inked().map(|(_, y, _)| *y).max().unwrap_or(min_y);

        let width = (max_x - min_x + 1) as u32;
        let height = (max_y - min_y + 1) as u32;
        let mut coverage = vec![0u8; (width * height) as usize];
        for &(x, y, a) in inked() {
            let idx = ((y - min_y) as u32 * width + (x - min_x) as u32) as usize;
            coverage[idx] = coverage[idx].max(a);
        }

        Self {
            width,
            height,
            coverage,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        self.coverage[(y * self.width + x) as usize]
    }
}

pub trait LabelFont {
    fn name(&self) -> &str;
    fn rasterize(&mut self, text: &str) -> GlyphMask;
}

/// A bold face read from a font file, rendered through cosmic-text.
pub struct SystemFont {
    font_system: FontSystem,
    cache: SwashCache,
    family: String,
    font_px: f32,
}

impl SystemFont {
    pub fn load(path: &Path, font_px: f32) -> Result<Self, FontError> {
        if !path.is_file() {
            return Err(FontError::NotFound(path.display().to_string()));
        }
        let font_data = read_font(path)?;

        // 只加载候选字体, 不扫描系统字体目录
        let mut db = fontdb::Database::new();
        db.load_font_data(font_data);
        let family = db
            .faces()
            .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
            .ok_or_else(|| FontError::NoFaces(path.display().to_string()))?;

        Ok(Self {
            font_system: FontSystem::new_with_locale_and_db("en-US".to_string(), db),
            cache: SwashCache::new(),
            family,
            font_px,
        })
    }
}

impl LabelFont for SystemFont {
    fn name(&self) -> &str {
        &self.family
    }

    fn rasterize(&mut self, text: &str) -> GlyphMask {
        let metrics = Metrics::new(self.font_px, self.font_px * 1.2);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        let attrs = Attrs::new()
            .family(Family::Name(&self.family))
            .weight(Weight::BOLD);
        buffer.set_text(&mut self.font_system, text, attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);

        let mut samples = Vec::new();
        buffer.draw(
            &mut self.font_system,
            &mut self.cache,
            Color::rgb(0xFF, 0xFF, 0xFF),
            |x, y, w, h, color| {
                for dy in 0..h as i32 {
                    for dx in 0..w as i32 {
                        samples.push((x + dx, y + dy, color.a()));
                    }
                }
            },
        );

        GlyphMask::from_samples(&samples)
    }
}

/// Fallback bitmap font. It scales in whole pixels, so the requested size is approximate.
pub struct BuiltinFont {
    scale: u32,
}

impl BuiltinFont {
    pub fn new(font_px: f32) -> Self {
        // 点阵高度约为字号的 70%, 接近常见字体的大写字母高度
        let scale = (font_px * 0.7 / GLYPH_HEIGHT as f32).round().max(1.0) as u32;
        Self { scale }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }
}

impl LabelFont for BuiltinFont {
    fn name(&self) -> &str {
        "builtin 5x7"
    }

    fn rasterize(&mut self, text: &str) -> GlyphMask {
        let scale = self.scale as i32;
        let advance = (GLYPH_WIDTH as i32 + 1) * scale;
        let mut samples = Vec::new();

        for (i, c) in text.chars().enumerate() {
            let pen_x = i as i32 * advance;
            let Some(glyph) = glyph_data::glyph(c) else {
                debug!("No built-in glyph for {c:?}");
                continue;
            };
            for row in 0..GLYPH_HEIGHT {
                for col in 0..GLYPH_WIDTH {
                    if !glyph_data::is_set(glyph, col, row) {
                        continue;
                    }
                    let x0 = pen_x + col as i32 * scale;
                    let y0 = row as i32 * scale;
                    for dy in 0..scale {
                        for dx in 0..scale {
                            samples.push((x0 + dx, y0 + dy, 0xFF));
                        }
                    }
                }
            }
        }

        GlyphMask::from_samples(&samples)
    }
}

/// Tries each candidate in order and falls back to the built-in font.
pub fn load_label_font(candidates: &[PathBuf], font_px: f32) -> Box<dyn LabelFont> {
    for font_path in candidates {
        match SystemFont::load(font_path, font_px) {
            Ok(font) => {
                debug!("Using font {} from {}", font.name(), font_path.display());
                return Box::new(font);
            }
            Err(e) => debug!("Skipping font candidate: {e}"),
        }
    }

    debug!("No font candidate loaded, using built-in bitmap font");
    Box::new(BuiltinFont::new(font_px))
}

#[inline]
fn read_font(font_path: &Path) -> Result<Vec<u8>, FontError> {
    use std::io::Read;

    let file = std::fs::File::open(font_path).map_err(FontError::ReadError)?;
    let mut reader = std::io::BufReader::new(file);
    let mut font_data = Vec::new();
    reader.read_to_end(&mut font_data).map_err(FontError::ReadError)?;
    Ok(font_data)
}
