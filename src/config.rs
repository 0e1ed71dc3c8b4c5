use std::{collections::HashSet, path::PathBuf};

use anyhow::{Result, bail};
use image::Rgba;

pub const DEFAULT_SIZES: [u32; 5] = [32, 128, 256, 512, 1024];
pub const LABEL: &str = "GG";
// #8be9fd
pub const BACKGROUND: Rgba<u8> = Rgba([139, 233, 253, 255]);
// #1e1e2e
pub const FOREGROUND: Rgba<u8> = Rgba([30, 30, 46, 255]);

pub const FONT_CANDIDATES: [&str; 2] = [
    "/System/Library/Fonts/Helvetica.ttc",                   // macOS
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf", // Debian/Ubuntu
];

pub const OUTPUT_DIR_VAR: &str = "ICONGEN_OUTPUT_DIR";

/// Extra file saved as an unmodified copy of one generated size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetinaCopy {
    pub source_size: u32,
    pub file_name: String,
}

impl Default for RetinaCopy {
    fn default() -> Self {
        Self {
            source_size: 256,
            file_name: "128x128@2x.png".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IconConfig {
    pub sizes: Vec<u32>,
    pub label: String,
    pub background: Rgba<u8>,
    pub foreground: Rgba<u8>,
    pub font_candidates: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub retina: Option<RetinaCopy>,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            label: LABEL.to_string(),
            background: BACKGROUND,
            foreground: FOREGROUND,
            font_candidates: FONT_CANDIDATES.iter().map(PathBuf::from).collect(),
            output_dir: PathBuf::from("."),
            retina: Some(RetinaCopy::default()),
        }
    }
}

impl IconConfig {
    /// Defaults, with the output directory taken from `ICONGEN_OUTPUT_DIR` when set.
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var(OUTPUT_DIR_VAR) {
            Ok(dir) if !dir.trim().is_empty() => config.with_output_dir(dir.trim()),
            _ => config,
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn largest_size(&self) -> Option<u32> {
        self.sizes.iter().copied().max()
    }

    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            bail!("no icon sizes requested");
        }
        if self.sizes.contains(&0) {
            bail!("icon size must be positive");
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.sizes.iter().find(|size| !seen.insert(**size)) {
            bail!("icon size {dup} requested more than once");
        }
        if self.label.trim().is_empty() {
            bail!("icon label is empty");
        }
        Ok(())
    }
}
