use crate::bits::split_lines;
use crate::color::codel_color;
use crate::error::CoreError;
use crate::frame::CodelGrid;

/// Byte used to pad short lines: black, normal.
pub const PAD_BYTE: u8 = b' ';

/// Construit la grille de codels d'un texte littéral.
///
/// Short lines are right-padded with [`PAD_BYTE`] up to the longest line.
///
/// # Errors
/// [`CoreError::EmptyProgram`] when there is no line, and
/// [`CoreError::InvalidDimensions`] when every line is empty or the
/// program does not fit `u32` dimensions.
///
/// # Example
/// ```
/// use ap_core::grid::build_grid;
/// let grid = build_grid(b"jj\nr").unwrap();
/// assert_eq!((grid.width, grid.height), (2, 2));
/// assert_eq!(grid.get(1, 1), (0, 0, 0));
/// ```
pub fn build_grid(literal: &[u8]) -> Result<CodelGrid, CoreError> {
    let lines = split_lines(literal);
    if lines.is_empty() {
        return Err(CoreError::EmptyProgram);
    }
    let width = lines.iter().map(|l| l.len()).max().unwrap_or(0);
    let height = lines.len();
    let too_big = || CoreError::InvalidDimensions {
        width: width as u64,
        height: height as u64,
    };
    if width == 0 {
        return Err(too_big());
    }
    let w = u32::try_from(width).map_err(|_| too_big())?;
    let h = u32::try_from(height).map_err(|_| too_big())?;

    let mut cells = Vec::with_capacity(width * height);
    for line in &lines {
        cells.extend(line.iter().map(|&b| codel_color(b)));
        cells.extend(std::iter::repeat_n(codel_color(PAD_BYTE), width - line.len()));
    }
    log::debug!("Grille de codels {w}×{h}");
    CodelGrid::from_cells(w, h, cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_short_lines_with_black() {
        let grid = build_grid(b"jjj\nlllll\njj").unwrap();
        assert_eq!((grid.width, grid.height), (5, 3));
        assert_eq!(grid.cells.len(), 15);
        for x in 3..5 {
            assert_eq!(grid.get(x, 0), (0, 0, 0));
        }
        for x in 2..5 {
            assert_eq!(grid.get(x, 2), (0, 0, 0));
        }
        assert_eq!(grid.get(0, 0), (0, 255, 0));
        assert_eq!(grid.get(4, 1), (255, 0, 0));
        assert_eq!(grid.get(1, 2), (0, 255, 0));
    }

    #[test]
    fn every_row_has_width_columns() {
        let grid = build_grid(b"a\nabcdefg\nabc\n").unwrap();
        assert!(grid.rows().all(|row| row.len() == grid.width as usize));
        assert_eq!(grid.rows().count(), 3);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(build_grid(b""), Err(CoreError::EmptyProgram));
        assert_eq!(
            CoreError::EmptyProgram.to_string(),
            "no program lines found"
        );
    }

    #[test]
    fn blank_lines_only_have_no_width() {
        assert!(matches!(
            build_grid(b"\n\n"),
            Err(CoreError::InvalidDimensions { width: 0, height: 2 })
        ));
    }
}
