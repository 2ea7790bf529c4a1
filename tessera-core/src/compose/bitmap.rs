//! Indexed bitmaps

use alloc::vec::Vec;

use super::ComposeError;

/// Grid of palette indices, row-major
///
/// Size and value count are fixed at creation; cells are mutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u16,
    height: u16,
    value_count: u16,
    cells: Vec<u8>,
}

impl Bitmap {
    /// Create a bitmap filled with index 0
    ///
    /// `value_count` bounds the values [`Bitmap::set`] accepts (1..=256).
    pub fn new(width: u16, height: u16, value_count: u16) -> Result<Self, ComposeError> {
        if value_count == 0 || value_count > 256 {
            return Err(ComposeError::InvalidSize);
        }
        Ok(Self {
            width,
            height,
            value_count,
            cells: alloc::vec![0; width as usize * height as usize],
        })
    }

    /// Width in cells
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in cells
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Number of distinct values this bitmap may hold
    pub fn value_count(&self) -> u16 {
        self.value_count
    }

    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    fn check_value(&self, value: u8) -> Result<(), ComposeError> {
        if u16::from(value) >= self.value_count {
            return Err(ComposeError::ValueOutOfRange {
                value,
                value_count: self.value_count,
            });
        }
        Ok(())
    }

    /// Value at a cell
    pub fn get(&self, x: u16, y: u16) -> Option<u8> {
        self.offset(x, y).map(|i| self.cells[i])
    }

    /// Set a cell
    pub fn set(&mut self, x: u16, y: u16, value: u8) -> Result<(), ComposeError> {
        self.check_value(value)?;
        let i = self.offset(x, y).ok_or(ComposeError::OutOfBounds)?;
        self.cells[i] = value;
        Ok(())
    }

    /// Set every cell
    pub fn fill(&mut self, value: u8) -> Result<(), ComposeError> {
        self.check_value(value)?;
        self.cells.fill(value);
        Ok(())
    }

    /// Set every cell of a rectangle, clipped to the bitmap
    pub fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        value: u8,
    ) -> Result<(), ComposeError> {
        self.check_value(value)?;
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        if x >= x_end {
            return Ok(());
        }
        for row in y..y_end {
            let start = row as usize * self.width as usize;
            self.cells[start + x as usize..start + x_end as usize].fill(value);
        }
        Ok(())
    }

    /// One row of cells
    pub fn row(&self, y: u16) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        Some(&self.cells[start..start + self.width as usize])
    }

    /// Raw cell storage, row-major
    ///
    /// Writes through this slice bypass the value-count check. The
    /// compositor still rejects indices its palette lacks.
    pub fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }
}
