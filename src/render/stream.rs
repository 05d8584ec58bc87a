use std::{
    fs::File,
    path::{Path, PathBuf},
};

use crate::{
    encode::{png::PngRowSink, sink::RowSink},
    foundation::core::{OutputGeometry, RasterConfig},
    foundation::error::{QrStreamError, QrStreamResult},
    raster::rasterizer::RowCursor,
    symbol::grid::ModuleGrid,
};

/// Progress of a [`StreamRender`]. Rendering is single-shot: `Done` and `Failed` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderState {
    NotStarted,
    /// `row` is the last row handed to the sink.
    Rendering { row: u32 },
    Done,
    Failed,
}

/// Summary of a completed render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub width: u32,
    pub height: u32,
    pub rows_written: u32,
    pub dark_modules: u64,
}

/// Drives a [`RowCursor`] into a [`RowSink`], one row at a time.
pub struct StreamRender<'g, G: ModuleGrid + ?Sized> {
    grid: &'g G,
    config: RasterConfig,
    state: RenderState,
}

impl<'g, G: ModuleGrid + ?Sized> StreamRender<'g, G> {
    pub fn new(grid: &'g G, config: RasterConfig) -> Self {
        Self {
            grid,
            config,
            state: RenderState::NotStarted,
        }
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Stream every row into `sink` and finalize it.
    ///
    /// The first error from the cursor or the sink stops the render; no further rows are
    /// delivered and the render ends in [`RenderState::Failed`].
    pub fn run<S: RowSink + ?Sized>(&mut self, sink: &mut S) -> QrStreamResult<RenderStats> {
        if self.state != RenderState::NotStarted {
            return Err(QrStreamError::validation(format!(
                "render cannot be restarted (state: {:?})",
                self.state
            )));
        }

        let _span = tracing::debug_span!(
            "render",
            size = self.grid.size(),
            scale = self.config.scale(),
            border = self.config.border()
        )
        .entered();

        let result = self.stream_rows(sink);
        self.state = match &result {
            Ok(_) => RenderState::Done,
            Err(e) => {
                tracing::debug!(error = %e, "render failed");
                RenderState::Failed
            }
        };
        result
    }

    fn stream_rows<S: RowSink + ?Sized>(&mut self, sink: &mut S) -> QrStreamResult<RenderStats> {
        let mut cursor = RowCursor::new(self.grid, self.config)?;
        let geometry = cursor.geometry();
        tracing::debug!(pixels = geometry.pixels, "output geometry");

        sink.begin(geometry.width(), geometry.height())?;

        let mut rows_written = 0u32;
        while let Some((py, row)) = cursor.next_row() {
            self.state = RenderState::Rendering { row: py };
            tracing::trace!(row = py, "row");
            sink.write_row(py, row)?;
            rows_written += 1;
        }

        sink.finish()?;

        Ok(RenderStats {
            width: geometry.width(),
            height: geometry.height(),
            rows_written,
            dark_modules: count_dark(self.grid),
        })
    }
}

fn count_dark<G: ModuleGrid + ?Sized>(grid: &G) -> u64 {
    let size = grid.size();
    (0..size)
        .flat_map(|y| (0..size).map(move |x| (x, y)))
        .filter(|&(x, y)| grid.is_dark(x, y))
        .count() as u64
}

/// Render `grid` into `sink` in one shot.
pub fn render<G, S>(grid: &G, config: RasterConfig, sink: &mut S) -> QrStreamResult<RenderStats>
where
    G: ModuleGrid + ?Sized,
    S: RowSink + ?Sized,
{
    StreamRender::new(grid, config).run(sink)
}

/// Render `grid` as a PNG at `path`.
///
/// The destination's directory must already exist. Rows are streamed into a sibling temporary
/// file that replaces `path` only once the PNG is complete, so a failed render never touches an
/// existing file at `path` and leaves nothing behind.
pub fn render_to_path<G: ModuleGrid + ?Sized>(
    grid: &G,
    config: RasterConfig,
    path: impl AsRef<Path>,
) -> QrStreamResult<RenderStats> {
    let path = path.as_ref();
    OutputGeometry::new(grid.size(), &config)?;

    let tmp = partial_path(path)?;
    let file = File::create(&tmp).map_err(|e| QrStreamError::io(path, e))?;
    let mut guard = TempFileGuard(Some(tmp.clone()));

    // Declared after the guard so the file handle is closed before cleanup.
    let mut sink = PngRowSink::new(file).with_path(path);
    let stats = render(grid, config, &mut sink)?;
    drop(sink);

    std::fs::rename(&tmp, path).map_err(|e| QrStreamError::io(path, e))?;
    guard.0 = None;

    tracing::info!(
        path = %path.display(),
        width = stats.width,
        height = stats.height,
        rows = stats.rows_written,
        dark_modules = stats.dark_modules,
        "wrote png"
    );
    Ok(stats)
}

/// `dir/.name.partial-<pid>` next to `path`, so the final rename stays on one filesystem.
fn partial_path(path: &Path) -> QrStreamResult<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        QrStreamError::validation(format!(
            "output path '{}' has no file name",
            path.display()
        ))
    })?;
    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(name);
    tmp_name.push(format!(".partial-{}", std::process::id()));
    Ok(path.with_file_name(tmp_name))
}

struct TempFileGuard(Option<PathBuf>);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::warn!(path = %path.display(), error = %e, "failed to remove partial output");
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/stream.rs"]
mod tests;
