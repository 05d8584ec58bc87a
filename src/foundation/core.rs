use crate::foundation::error::{QrStreamError, QrStreamResult};

/// Pixels per module edge used when the caller supplies no usable scale.
pub const DEFAULT_SCALE: u32 = 10;

/// Width of the light border around the symbol, in modules.
pub const QUIET_ZONE_MODULES: u32 = 4;

/// Output path used by the CLI when `--output` is not given.
pub const DEFAULT_OUTPUT: &str = "qrcode.png";

/// Bytes per output pixel (8-bit RGB, no alpha).
pub const CHANNELS: usize = 3;

/// Intensity written for dark modules.
pub const DARK: u8 = 0;

/// Intensity written for light modules and the border.
pub const LIGHT: u8 = 255;

/// Scale and border applied when mapping modules to pixels.
///
/// Fixed for the lifetime of a render. `scale` is always at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RasterConfig {
    scale: u32,
    border: u32,
}

impl RasterConfig {
    /// Config with the given scale and the standard quiet zone.
    pub fn new(scale: u32) -> QrStreamResult<Self> {
        Self::with_border(scale, QUIET_ZONE_MODULES)
    }

    /// Config with an explicit border width in modules.
    pub fn with_border(scale: u32, border: u32) -> QrStreamResult<Self> {
        if scale == 0 {
            return Err(QrStreamError::validation("scale must be >= 1"));
        }
        Ok(Self { scale, border })
    }

    /// Interpret a user-supplied scale, falling back to [`DEFAULT_SCALE`] when it is not a
    /// positive `u32`.
    pub fn from_requested_scale(requested: i64) -> Self {
        Self::checked_scale(requested).unwrap_or_else(|| {
            tracing::warn!(
                requested,
                fallback = DEFAULT_SCALE,
                "invalid scale, using default"
            );
            Self::default()
        })
    }

    /// Interpret a raw command-line scale.
    ///
    /// Reads an optional sign and the leading decimal digits after any whitespace; anything
    /// after them is ignored, so `"5px"` is 5. Input without leading digits, or a value that is
    /// not a positive `u32`, falls back to [`DEFAULT_SCALE`].
    pub fn from_scale_arg(raw: &str) -> Self {
        Self::checked_scale(leading_integer(raw)).unwrap_or_else(|| {
            tracing::warn!(
                requested = raw,
                fallback = DEFAULT_SCALE,
                "invalid scale, using default"
            );
            Self::default()
        })
    }

    fn checked_scale(requested: i64) -> Option<Self> {
        u32::try_from(requested)
            .ok()
            .filter(|&s| s > 0)
            .map(|scale| Self {
                scale,
                border: QUIET_ZONE_MODULES,
            })
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn border(&self) -> u32 {
        self.border
    }
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            border: QUIET_ZONE_MODULES,
        }
    }
}

/// Signed decimal prefix of `raw`, saturating at the `i64` bounds; 0 when there is none.
fn leading_integer(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| {
            acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
        });

    if negative { -magnitude } else { magnitude }
}

/// Derived output dimensions for a grid of side `size` under a [`RasterConfig`].
///
/// The image is square: `pixels = (size + 2 * border) * scale` on each side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputGeometry {
    pub size: u32,
    pub pixels: u32,
}

impl OutputGeometry {
    pub fn new(size: u32, config: &RasterConfig) -> QrStreamResult<Self> {
        if size == 0 {
            return Err(QrStreamError::validation("module grid must be at least 1x1"));
        }

        let pixels = config
            .border()
            .checked_mul(2)
            .and_then(|b| b.checked_add(size))
            .and_then(|modules| modules.checked_mul(config.scale()))
            .ok_or_else(|| {
                QrStreamError::validation(format!(
                    "output size overflows u32 (size={size}, border={}, scale={})",
                    config.border(),
                    config.scale()
                ))
            })?;

        // Row buffer length must also fit in memory addressing.
        usize::try_from(pixels)
            .ok()
            .and_then(|p| p.checked_mul(CHANNELS))
            .ok_or_else(|| QrStreamError::validation("row buffer does not fit in usize"))?;

        Ok(Self { size, pixels })
    }

    pub fn width(&self) -> u32 {
        self.pixels
    }

    pub fn height(&self) -> u32 {
        self.pixels
    }

    /// Length in bytes of one RGB row.
    pub fn row_bytes(&self) -> usize {
        self.pixels as usize * CHANNELS
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
