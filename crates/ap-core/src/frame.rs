use crate::error::CoreError;

/// Couleur RGB 8 bits par canal.
pub type Rgb = (u8, u8, u8);

/// Grille rectangulaire de codels, row-major.
///
/// Every row has exactly `width` cells.
///
/// # Example
/// ```
/// use ap_core::frame::CodelGrid;
/// let grid = CodelGrid::new(4, 2);
/// assert_eq!(grid.cells.len(), 8);
/// assert_eq!(grid.get(3, 1), (0, 0, 0));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodelGrid {
    /// Flat array of cells, row-major.
    pub cells: Vec<Rgb>,
    /// Width in codels.
    pub width: u32,
    /// Height in codels.
    pub height: u32,
}

impl CodelGrid {
    /// Crée une grille remplie de codels noirs.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            cells: vec![(0, 0, 0); width as usize * height as usize],
            width,
            height,
        }
    }

    /// Build a grid from row-major cells.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if `cells` does not hold
    /// exactly `width * height` entries.
    pub fn from_cells(width: u32, height: u32, cells: Vec<Rgb>) -> Result<Self, CoreError> {
        if cells.len() as u64 != u64::from(width) * u64::from(height) {
            return Err(CoreError::InvalidDimensions {
                width: u64::from(width),
                height: u64::from(height),
            });
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Cell at (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Rgb {
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Nombre total de codels.
    #[must_use]
    pub fn codel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> {
        // chunks_exact(0) panics; an empty grid has no rows anyway
        self.cells.chunks_exact(self.width.max(1) as usize)
    }
}

/// Buffer de pixels RGB, row-major, 3 bytes par pixel.
///
/// # Example
/// ```
/// use ap_core::frame::RasterImage;
/// let img = RasterImage::new(10, 10);
/// assert_eq!(img.data.len(), 300);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    /// Pixels RGB, row-major.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl RasterImage {
    /// Crée un buffer noir aux dimensions données.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 3],
            width,
            height,
        }
    }

    /// Accès au pixel (x, y).
    ///
    /// # Example
    /// ```
    /// use ap_core::frame::RasterImage;
    /// let mut img = RasterImage::new(2, 2);
    /// img.data[9..12].copy_from_slice(&[1, 2, 3]);
    /// assert_eq!(img.pixel(1, 1), (1, 2, 3));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        (self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }
}
