use std::path::Path;

use image::ImageFormat;
use image::RgbImage;
use thiserror::Error;
use tracing::info;

use crate::ColorId;
use crate::grid::Grid;
use crate::palette::Palette;

/// Side length, in pixels, of the square each cell is drawn as.
pub const DEFAULT_SCALE: u32 = 5;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Color {color} at ({row}, {col}) is not in the palette")]
    UnknownColor {
        color: ColorId,
        row: usize,
        col: usize,
    },

    #[error("Scale must be at least 1")]
    ZeroScale,

    #[error("A {size}x{size} grid at scale {scale} does not fit in an image")]
    TooLarge { size: usize, scale: u32 },

    #[error("Failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

/// Draw the grid, each cell as a `scale`x`scale` block. Columns run along `x` and rows along
/// `y`, so cell `(row, col)` starts at pixel `(col * scale, row * scale)`.
pub fn render(grid: &Grid, palette: &Palette, scale: u32) -> Result<RgbImage, RenderError> {
    if scale == 0 {
        return Err(RenderError::ZeroScale);
    }

    let size = grid.size();
    let Some(side) = u32::try_from(size).ok().and_then(|n| n.checked_mul(scale)) else {
        return Err(RenderError::TooLarge { size, scale });
    };

    let mut img = RgbImage::new(side, side);

    for (row, cells) in grid.rows().enumerate() {
        for (col, &color) in cells.iter().enumerate() {
            let Some(rgb) = palette.get(color) else {
                return Err(RenderError::UnknownColor { color, row, col });
            };

            // Both fit in u32 since `size * scale` does
            let (x, y) = (col as u32 * scale, row as u32 * scale);

            for dy in 0..scale {
                for dx in 0..scale {
                    img.put_pixel(x + dx, y + dy, rgb);
                }
            }
        }
    }

    Ok(img)
}

/// Render the grid and write it to `path` as a PNG.
pub fn save_png(
    grid: &Grid,
    palette: &Palette,
    scale: u32,
    path: impl AsRef<Path>,
) -> Result<(), RenderError> {
    let path = path.as_ref();
    let img = render(grid, palette, scale)?;

    img.save_with_format(path, ImageFormat::Png)?;

    info!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        "Wrote image"
    );

    Ok(())
}
