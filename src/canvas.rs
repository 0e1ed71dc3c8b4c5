use image::{Pixel, Rgba, RgbaImage};

use crate::font::GlyphMask;

pub fn new_canvas(size: u32, background: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(size, size, background)
}

/// Label font size for a canvas side.
#[inline]
pub fn font_size_for(size: u32) -> u32 {
    size / 3
}

/// Top-left position that centers the mask's ink box, lifted by a tenth of the font size.
pub fn label_origin(size: u32, mask: &GlyphMask, font_px: u32) -> (i64, i64) {
    let x = (size as i64 - mask.width as i64).div_euclid(2);
    let y = (size as i64 - mask.height as i64).div_euclid(2) - (font_px / 10) as i64;
    (x, y)
}

/// Source-over blends `color` through the mask. Pixels outside the mask are left as is.
pub fn draw_mask(canvas: &mut RgbaImage, mask: &GlyphMask, origin: (i64, i64), color: Rgba<u8>) {
    let (ox, oy) = origin;
    let (cw, ch) = (canvas.width() as i64, canvas.height() as i64);

    for my in 0..mask.height {
        let y = oy + my as i64;
        if y < 0 || y >= ch {
            continue;
        }
        for mx in 0..mask.width {
            let x = ox + mx as i64;
            if x < 0 || x >= cw {
                continue;
            }
            let coverage = mask.coverage(mx, my);
            if coverage == 0 {
                continue;
            }
            let alpha = (color[3] as u32 * coverage as u32 / 255) as u8;
            let src = Rgba([color[0], color[1], color[2], alpha]);
            canvas.get_pixel_mut(x as u32, y as u32).blend(&src);
        }
    }
}
