use crate::foundation::error::{QrStreamError, QrStreamResult};

/// Read-only view of a square symbol grid.
///
/// `size()` is the side length in modules; `is_dark(x, y)` is only queried for
/// `0 <= x, y < size()`.
pub trait ModuleGrid {
    fn size(&self) -> u32;

    fn is_dark(&self, x: u32, y: u32) -> bool;
}

impl<G: ModuleGrid + ?Sized> ModuleGrid for &G {
    fn size(&self) -> u32 {
        (**self).size()
    }

    fn is_dark(&self, x: u32, y: u32) -> bool {
        (**self).is_dark(x, y)
    }
}

impl ModuleGrid for qrcode::QrCode {
    fn size(&self) -> u32 {
        // QR symbols top out at 177 modules per side.
        self.width() as u32
    }

    fn is_dark(&self, x: u32, y: u32) -> bool {
        self[(x as usize, y as usize)] == qrcode::Color::Dark
    }
}

/// Owned row-major boolean grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitGrid {
    size: u32,
    cells: Vec<bool>,
}

impl BitGrid {
    /// All-light grid of side `size`.
    pub fn new(size: u32) -> QrStreamResult<Self> {
        if size == 0 {
            return Err(QrStreamError::validation("module grid must be at least 1x1"));
        }
        let len = (size as usize)
            .checked_mul(size as usize)
            .ok_or_else(|| QrStreamError::validation("module grid too large"))?;
        Ok(Self {
            size,
            cells: vec![false; len],
        })
    }

    /// Build from rows of cells; every row must be as long as there are rows.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> QrStreamResult<Self> {
        let mut grid = Self::new(u32::try_from(rows.len()).map_err(|_| {
            QrStreamError::validation("module grid too large")
        })?)?;
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != rows.len() {
                return Err(QrStreamError::validation(format!(
                    "module grid must be square: row {y} has {} cells, expected {}",
                    row.len(),
                    rows.len()
                )));
            }
            let start = y * rows.len();
            grid.cells[start..start + row.len()].copy_from_slice(row);
        }
        Ok(grid)
    }

    pub fn set(&mut self, x: u32, y: u32, dark: bool) -> QrStreamResult<()> {
        let idx = self.index(x, y).ok_or_else(|| {
            QrStreamError::validation(format!(
                "module ({x}, {y}) is outside a {0}x{0} grid",
                self.size
            ))
        })?;
        self.cells[idx] = dark;
        Ok(())
    }

    pub fn dark_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.size && y < self.size).then(|| y as usize * self.size as usize + x as usize)
    }
}

impl ModuleGrid for BitGrid {
    fn size(&self) -> u32 {
        self.size
    }

    fn is_dark(&self, x: u32, y: u32) -> bool {
        self.index(x, y).is_some_and(|i| self.cells[i])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/symbol/grid.rs"]
mod tests;
