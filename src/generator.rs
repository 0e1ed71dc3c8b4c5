use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use image::RgbaImage;
use log::{debug, info};

use crate::{
    canvas,
    config::{IconConfig, RetinaCopy},
    font,
};

pub const LARGEST_ICON_NAME: &str = "icon.png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedIcon {
    pub size: u32,
    pub path: PathBuf,
}

impl GeneratedIcon {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// The largest requested size is saved as `icon.png`, every other as `{size}x{size}.png`.
pub fn output_file_name(size: u32, largest: u32) -> String {
    if size == largest {
        LARGEST_ICON_NAME.to_string()
    } else {
        format!("{size}x{size}.png")
    }
}

pub fn render_icon(size: u32, config: &IconConfig) -> RgbaImage {
    let mut icon = canvas::new_canvas(size, config.background);

    let font_px = canvas::font_size_for(size);
    let mut label_font = font::load_label_font(&config.font_candidates, font_px as f32);
    let mask = label_font.rasterize(&config.label);
    debug!(
        "{size}px: label {}x{} with {}",
        mask.width,
        mask.height,
        label_font.name()
    );

    let origin = canvas::label_origin(size, &mask, font_px);
    canvas::draw_mask(&mut icon, &mask, origin, config.foreground);
    icon
}

pub fn generate(config: &IconConfig) -> Result<Vec<GeneratedIcon>> {
    generate_with(config, |_| {})
}

/// Writes every requested size in order, then the retina copy. `on_created` runs after each file.
pub fn generate_with<F>(config: &IconConfig, mut on_created: F) -> Result<Vec<GeneratedIcon>>
where
    F: FnMut(&GeneratedIcon),
{
    config.validate()?;
    let Some(largest) = config.largest_size() else {
        bail!("no icon sizes requested");
    };

    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let mut created = Vec::with_capacity(config.sizes.len() + 1);
    for &size in &config.sizes {
        let icon = render_icon(size, config);
        let path = config.output_dir.join(output_file_name(size, largest));
        icon.save(&path)
            .with_context(|| format!("Failed to save {}", path.display()))?;
        info!("Wrote {}", path.display());

        let generated = GeneratedIcon { size, path };
        on_created(&generated);
        created.push(generated);
    }

    if let Some(retina) = &config.retina {
        let generated = write_retina_copy(retina, &created, &config.output_dir)?;
        on_created(&generated);
        created.push(generated);
    }

    Ok(created)
}

fn write_retina_copy(
    retina: &RetinaCopy,
    created: &[GeneratedIcon],
    output_dir: &Path,
) -> Result<GeneratedIcon> {
    // 只复制本次生成的文件, 避免拿到旧的残留文件
    let Some(source) = created.iter().find(|icon| icon.size == retina.source_size) else {
        bail!(
            "Missing {}x{} icon for {}: size was not generated in this run",
            retina.source_size,
            retina.source_size,
            retina.file_name
        );
    };

    let img = image::open(&source.path)
        .with_context(|| format!("Failed to reopen {}", source.path.display()))?;
    let path = output_dir.join(&retina.file_name);
    img.save(&path)
        .with_context(|| format!("Failed to save {}", path.display()))?;
    info!("Copied {} to {}", source.path.display(), path.display());

    Ok(GeneratedIcon {
        size: retina.source_size,
        path,
    })
}
