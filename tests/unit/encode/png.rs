use std::{cell::RefCell, io, rc::Rc};

use super::*;

#[derive(Clone, Default)]
struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct FailingWriter;

impl io::Write for FailingWriter {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn decode(bytes: &[u8]) -> (png::OutputInfo, Vec<u8>) {
    let decoder = png::Decoder::new(bytes);
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    buf.truncate(info.buffer_size());
    (info, buf)
}

#[test]
fn streams_rgb_rows_into_valid_png() {
    let buf = SharedBuf::default();
    let mut sink = PngRowSink::new(buf.clone());
    sink.begin(2, 2).unwrap();
    sink.write_row(0, &[0, 0, 0, 255, 255, 255]).unwrap();
    sink.write_row(1, &[255, 255, 255, 0, 0, 0]).unwrap();
    sink.finish().unwrap();

    let bytes = buf.0.borrow().clone();
    assert_eq!(&bytes[0..8], b"\x89PNG\r\n\x1a\n");

    let (info, pixels) = decode(&bytes);
    assert_eq!((info.width, info.height), (2, 2));
    assert_eq!(info.color_type, png::ColorType::Rgb);
    assert_eq!(info.bit_depth, png::BitDepth::Eight);
    assert_eq!(pixels, vec![0, 0, 0, 255, 255, 255, 255, 255, 255, 0, 0, 0]);
}

#[test]
fn rejects_rows_before_begin_and_out_of_order() {
    let mut sink = PngRowSink::new(SharedBuf::default());
    assert!(sink.write_row(0, &[0; 3]).is_err());

    let mut sink = PngRowSink::new(SharedBuf::default());
    sink.begin(1, 2).unwrap();
    assert!(sink.write_row(1, &[0; 3]).is_err());
    sink.write_row(0, &[0; 3]).unwrap();
    assert!(sink.write_row(0, &[0; 3]).is_err());
}

#[test]
fn rejects_wrong_row_length() {
    let mut sink = PngRowSink::new(SharedBuf::default());
    sink.begin(2, 1).unwrap();
    let err = sink.write_row(0, &[0; 3]).unwrap_err();
    assert!(err.to_string().contains("expected 6"));
}

#[test]
fn finish_requires_every_row() {
    let mut sink = PngRowSink::new(SharedBuf::default());
    sink.begin(1, 3).unwrap();
    sink.write_row(0, &[0; 3]).unwrap();
    let err = sink.finish().unwrap_err();
    assert!(err.to_string().contains("1 of 3 rows"));
}

#[test]
fn cannot_begin_twice_or_with_zero_size() {
    let mut sink = PngRowSink::new(SharedBuf::default());
    sink.begin(1, 1).unwrap();
    assert!(sink.begin(1, 1).is_err());
    // The rejected call leaves the stream intact.
    sink.write_row(0, &[0; 3]).unwrap();
    sink.finish().unwrap();
    assert!(sink.finish().is_err());

    let mut sink = PngRowSink::new(SharedBuf::default());
    assert!(sink.begin(0, 1).is_err());
}

#[test]
fn writer_failure_surfaces_as_io_error() {
    let mut sink = PngRowSink::new(FailingWriter).with_path("out.png");
    let err = sink.begin(1, 1).unwrap_err();
    match err {
        QrStreamError::Io { path, source } => {
            assert_eq!(path, PathBuf::from("out.png"));
            assert!(source.to_string().contains("disk full"));
        }
        other => panic!("expected io error, got {other}"),
    }
}
