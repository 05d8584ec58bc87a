//! Module-to-pixel mapping.
//!
//! Everything here is a pure function of the grid and the [`RasterConfig`]; the only state is the
//! row index carried by [`RowCursor`].

use crate::{
    foundation::core::{CHANNELS, DARK, LIGHT, OutputGeometry, RasterConfig},
    foundation::error::{QrStreamError, QrStreamResult},
    symbol::grid::ModuleGrid,
};

/// Intensity of output pixel `(px, py)`: [`DARK`] for a dark module, [`LIGHT`] otherwise.
///
/// Pixels that map into the border are always light.
pub fn pixel_at<G: ModuleGrid + ?Sized>(px: u32, py: u32, grid: &G, config: &RasterConfig) -> u8 {
    match (
        module_coord(px, grid.size(), config),
        module_coord(py, grid.size(), config),
    ) {
        (Some(mx), Some(my)) if grid.is_dark(mx, my) => DARK,
        _ => LIGHT,
    }
}

/// Module index covering pixel coordinate `p`, or `None` inside the border.
fn module_coord(p: u32, size: u32, config: &RasterConfig) -> Option<u32> {
    (p / config.scale())
        .checked_sub(config.border())
        .filter(|&m| m < size)
}

/// Write row `py` as RGB triples into `row`, which must be exactly one row long.
pub fn fill_row<G: ModuleGrid + ?Sized>(
    py: u32,
    grid: &G,
    config: &RasterConfig,
    row: &mut [u8],
) -> QrStreamResult<()> {
    let geometry = OutputGeometry::new(grid.size(), config)?;
    if row.len() != geometry.row_bytes() {
        return Err(QrStreamError::validation(format!(
            "row buffer is {} bytes, expected {}",
            row.len(),
            geometry.row_bytes()
        )));
    }
    if py >= geometry.height() {
        return Err(QrStreamError::validation(format!(
            "row {py} is outside a {}-pixel image",
            geometry.height()
        )));
    }
    fill_row_unchecked(py, grid, config, row);
    Ok(())
}

fn fill_row_unchecked<G: ModuleGrid + ?Sized>(
    py: u32,
    grid: &G,
    config: &RasterConfig,
    row: &mut [u8],
) {
    let size = grid.size();
    let Some(my) = module_coord(py, size, config) else {
        row.fill(LIGHT);
        return;
    };

    for (px, rgb) in (0u32..).zip(row.chunks_exact_mut(CHANNELS)) {
        let v = match module_coord(px, size, config) {
            Some(mx) if grid.is_dark(mx, my) => DARK,
            _ => LIGHT,
        };
        rgb.fill(v);
    }
}

/// Lazily produces the rows of the output image, top to bottom, reusing one buffer.
///
/// `next_row` lends the buffer until the following call, so at most one row is ever resident.
pub struct RowCursor<'g, G: ModuleGrid + ?Sized> {
    grid: &'g G,
    config: RasterConfig,
    geometry: OutputGeometry,
    next: u32,
    row: Vec<u8>,
}

impl<'g, G: ModuleGrid + ?Sized> RowCursor<'g, G> {
    pub fn new(grid: &'g G, config: RasterConfig) -> QrStreamResult<Self> {
        let geometry = OutputGeometry::new(grid.size(), &config)?;
        Ok(Self {
            grid,
            config,
            geometry,
            next: 0,
            row: vec![LIGHT; geometry.row_bytes()],
        })
    }

    pub fn geometry(&self) -> OutputGeometry {
        self.geometry
    }

    pub fn remaining(&self) -> u32 {
        self.geometry.height() - self.next
    }

    /// Fill and lend the next row, or `None` once every row has been produced.
    pub fn next_row(&mut self) -> Option<(u32, &[u8])> {
        if self.next >= self.geometry.height() {
            return None;
        }
        let py = self.next;
        fill_row_unchecked(py, self.grid, &self.config, &mut self.row);
        self.next += 1;
        Some((py, &self.row))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/rasterizer.rs"]
mod tests;
