use std::{
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    encode::sink::RowSink,
    foundation::core::CHANNELS,
    foundation::error::{QrStreamError, QrStreamResult},
};

enum State<W: Write + 'static> {
    Pending(W),
    Streaming {
        stream: png::StreamWriter<'static, W>,
        width: u32,
        height: u32,
        next_row: u32,
    },
    Finished,
    Poisoned,
}

/// [`RowSink`] that streams 8-bit RGB rows into a PNG written to `W`.
///
/// Only the compressor's window and the current row are held in memory.
pub struct PngRowSink<W: Write + 'static> {
    state: State<W>,
    path: Option<PathBuf>,
}

impl<W: Write + 'static> PngRowSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            state: State::Pending(writer),
            path: None,
        }
    }

    /// Attach the destination path so IO failures name it.
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }
}

fn destination(path: &Option<PathBuf>) -> PathBuf {
    path.clone().unwrap_or_else(|| PathBuf::from("<stream>"))
}

fn map_png_err(path: &Option<PathBuf>, e: png::EncodingError) -> QrStreamError {
    match e {
        png::EncodingError::IoError(source) => QrStreamError::io(destination(path), source),
        other => QrStreamError::encoding(format!("png: {other}")),
    }
}

impl<W: Write + 'static> RowSink for PngRowSink<W> {
    fn begin(&mut self, width: u32, height: u32) -> QrStreamResult<()> {
        let writer = match std::mem::replace(&mut self.state, State::Poisoned) {
            State::Pending(writer) => writer,
            other => {
                self.state = other;
                return Err(QrStreamError::validation("png sink was already started"));
            }
        };
        if width == 0 || height == 0 {
            return Err(QrStreamError::validation(
                "png width/height must be non-zero",
            ));
        }

        let mut encoder = png::Encoder::new(writer, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let header = encoder
            .write_header()
            .map_err(|e| map_png_err(&self.path, e))?;
        let stream = header
            .into_stream_writer()
            .map_err(|e| map_png_err(&self.path, e))?;

        tracing::debug!(width, height, "png header written");
        self.state = State::Streaming {
            stream,
            width,
            height,
            next_row: 0,
        };
        Ok(())
    }

    fn write_row(&mut self, y: u32, rgb: &[u8]) -> QrStreamResult<()> {
        let State::Streaming {
            stream,
            width,
            height,
            next_row,
        } = &mut self.state
        else {
            return Err(QrStreamError::validation(
                "png sink is not accepting rows",
            ));
        };

        if y != *next_row || y >= *height {
            return Err(QrStreamError::validation(format!(
                "png rows must arrive in order: got row {y}, expected {next_row} of {height}"
            )));
        }
        let expected = *width as usize * CHANNELS;
        if rgb.len() != expected {
            return Err(QrStreamError::validation(format!(
                "png row {y} is {} bytes, expected {expected}",
                rgb.len()
            )));
        }

        match stream.write_all(rgb) {
            Ok(()) => {
                *next_row += 1;
                Ok(())
            }
            Err(source) => {
                self.state = State::Poisoned;
                Err(QrStreamError::io(destination(&self.path), source))
            }
        }
    }

    fn finish(&mut self) -> QrStreamResult<()> {
        let (stream, height, next_row) = match std::mem::replace(&mut self.state, State::Poisoned)
        {
            State::Streaming {
                stream,
                height,
                next_row,
                ..
            } => (stream, height, next_row),
            other => {
                self.state = other;
                return Err(QrStreamError::validation(
                    "png sink is not streaming; nothing to finish",
                ));
            }
        };

        if next_row != height {
            return Err(QrStreamError::validation(format!(
                "png sink received {next_row} of {height} rows"
            )));
        }

        stream
            .finish()
            .map_err(|e| map_png_err(&self.path, e))?;
        self.state = State::Finished;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
