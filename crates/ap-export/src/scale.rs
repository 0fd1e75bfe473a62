use ap_core::error::CoreError;
use ap_core::frame::{CodelGrid, RasterImage};

/// Agrandit une grille de codels en image, sans interpolation.
///
/// Pixel (x, y) takes the color of cell (x / codel_size, y / codel_size), so
/// every codel becomes a solid `codel_size × codel_size` block.
///
/// # Errors
/// [`CoreError::InvalidCodelSize`] for a codel size of 0 and
/// [`CoreError::InvalidDimensions`] when the scaled size overflows `u32`.
///
/// # Example
/// ```
/// use ap_core::frame::CodelGrid;
/// use ap_export::scale::magnify;
/// let grid = CodelGrid::new(3, 2);
/// let img = magnify(&grid, 4).unwrap();
/// assert_eq!((img.width, img.height), (12, 8));
/// ```
pub fn magnify(grid: &CodelGrid, codel_size: u32) -> Result<RasterImage, CoreError> {
    if codel_size == 0 {
        return Err(CoreError::InvalidCodelSize { size: codel_size });
    }
    let overflow = || CoreError::InvalidDimensions {
        width: u64::from(grid.width) * u64::from(codel_size),
        height: u64::from(grid.height) * u64::from(codel_size),
    };
    let width = grid.width.checked_mul(codel_size).ok_or_else(overflow)?;
    let height = grid.height.checked_mul(codel_size).ok_or_else(overflow)?;

    let size = codel_size as usize;
    let row_bytes = width as usize * 3;
    let mut img = RasterImage::new(width, height);
    if row_bytes == 0 {
        return Ok(img);
    }

    // One scaled row per codel row, then copied down codel_size - 1 times.
    for (cy, cells) in grid.rows().enumerate() {
        let top = cy * size * row_bytes;
        let first = &mut img.data[top..top + row_bytes];
        for (block, &(r, g, b)) in first.chunks_exact_mut(size * 3).zip(cells) {
            for px in block.chunks_exact_mut(3) {
                px.copy_from_slice(&[r, g, b]);
            }
        }
        for dy in 1..size {
            let dst = top + dy * row_bytes;
            img.data.copy_within(top..top + row_bytes, dst);
        }
    }
    log::debug!(
        "Image {}×{} (codel {codel_size}px) depuis {}×{} codels",
        img.width,
        img.height,
        grid.width,
        grid.height
    );
    Ok(img)
}
