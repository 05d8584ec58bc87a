use crate::foundation::error::QrStreamResult;

/// Append-only destination for image rows.
///
/// Call discipline: [`RowSink::begin`] once with the image size, then exactly `height` calls to
/// [`RowSink::write_row`] with strictly increasing `y`, each supplying `width * 3` RGB bytes,
/// then [`RowSink::finish`]. A sink that returns an error must not be used again.
pub trait RowSink {
    fn begin(&mut self, width: u32, height: u32) -> QrStreamResult<()>;

    fn write_row(&mut self, y: u32, rgb: &[u8]) -> QrStreamResult<()>;

    fn finish(&mut self) -> QrStreamResult<()>;
}

impl<S: RowSink + ?Sized> RowSink for &mut S {
    fn begin(&mut self, width: u32, height: u32) -> QrStreamResult<()> {
        (**self).begin(width, height)
    }

    fn write_row(&mut self, y: u32, rgb: &[u8]) -> QrStreamResult<()> {
        (**self).write_row(y, rgb)
    }

    fn finish(&mut self) -> QrStreamResult<()> {
        (**self).finish()
    }
}
