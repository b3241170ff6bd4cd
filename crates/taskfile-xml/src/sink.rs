//! Destinations for written documents.
//!
//! Writers render the whole document first and hand it to the sink in a single
//! call. Sinks are borrowed; opening, flushing and closing the underlying
//! stream stays with the caller.

use crate::encoding::Encoding;
use std::{fmt, io};

/// Receives a complete serialized document.
pub trait Sink {
    /// Write `document`, encoded in `encoding`.
    ///
    /// # Errors
    /// Returns the error of the underlying stream.
    fn write_document(&mut self, document: &[u8], encoding: Encoding) -> io::Result<()>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn write_document(&mut self, document: &[u8], encoding: Encoding) -> io::Result<()> {
        (**self).write_document(document, encoding)
    }
}

impl Sink for Vec<u8> {
    fn write_document(&mut self, document: &[u8], _encoding: Encoding) -> io::Result<()> {
        self.extend_from_slice(document);
        Ok(())
    }
}

/// Byte-oriented sink: the encoded document is written unchanged.
#[derive(Debug)]
pub struct ByteSink<W>(pub W);

impl<W: io::Write> Sink for ByteSink<W> {
    fn write_document(&mut self, document: &[u8], _encoding: Encoding) -> io::Result<()> {
        self.0.write_all(document)
    }
}

/// Text-oriented sink: the document is decoded back to text before writing.
#[derive(Debug)]
pub struct TextSink<W>(pub W);

impl<W: fmt::Write> Sink for TextSink<W> {
    fn write_document(&mut self, document: &[u8], encoding: Encoding) -> io::Result<()> {
        self.0
            .write_str(&encoding.decode(document))
            .map_err(|err| io::Error::other(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_sink_decodes_document() -> io::Result<()> {
        let mut sink = TextSink(String::new());
        sink.write_document(b"caf\xe9", Encoding::Latin1)?;
        assert_eq!(sink.0, "café");
        Ok(())
    }

    #[test]
    fn byte_sink_writes_raw_bytes() -> io::Result<()> {
        let mut sink = ByteSink(Vec::new());
        sink.write_document(b"caf\xe9", Encoding::Latin1)?;
        assert_eq!(sink.0, b"caf\xe9");
        Ok(())
    }

    #[test]
    fn sink_errors_are_reported() {
        struct Broken;
        impl io::Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        let Err(err) = ByteSink(Broken).write_document(b"<x/>", Encoding::Utf8) else {
            panic!("broken stream must fail");
        };
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
