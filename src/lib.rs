//! qrstream renders QR symbols to PNG one pixel row at a time.
//!
//! # Pipeline overview
//!
//! 1. **Encode**: `text -> qrcode::QrCode` at a fixed, low error-correction level
//! 2. **Rasterize**: `ModuleGrid + RasterConfig -> rows` via [`RowCursor`], a lazy row producer
//!    that owns a single reusable row buffer
//! 3. **Stream**: [`render`] hands each row, in order and exactly once, to a [`RowSink`];
//!    [`PngRowSink`] compresses rows straight into a PNG
//!
//! Memory use is bounded by one output row regardless of the image size.
//!
//! Output geometry: every module becomes a `scale x scale` block of black (0) or white (255)
//! RGB pixels, surrounded by a light quiet zone of [`QUIET_ZONE_MODULES`] modules. The image is
//! `(size + 2 * border) * scale` pixels on each side.
#![forbid(unsafe_code)]

mod encode;
mod foundation;
mod raster;
mod render;
mod symbol;

pub use encode::png::PngRowSink;
pub use encode::sink::RowSink;
pub use foundation::core::{
    CHANNELS, DARK, DEFAULT_OUTPUT, DEFAULT_SCALE, LIGHT, OutputGeometry, QUIET_ZONE_MODULES,
    RasterConfig,
};
pub use foundation::error::{QrStreamError, QrStreamResult};
pub use raster::rasterizer::{RowCursor, fill_row, pixel_at};
pub use render::stream::{RenderState, RenderStats, StreamRender, render, render_to_path};
pub use symbol::encode::{ERROR_CORRECTION, encode_text};
pub use symbol::grid::{BitGrid, ModuleGrid};
