#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::io;
use std::sync::{Arc, Mutex};
use taskfile_core::{Task, TaskGraph};
use taskfile_xml::{Encoding, WriterOptions, XmlWriter};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn encoding_fallback_is_logged_as_warning() {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .finish();

    let graph = TaskGraph {
        tasks: vec![Task::new("t1", "form\u{c}feed")],
        ..TaskGraph::default()
    };
    let options = WriterOptions {
        encoding: Encoding::Latin1,
        ..WriterOptions::default()
    };
    let mut out = Vec::new();
    tracing::subscriber::with_default(subscriber, || {
        XmlWriter::with_options(&mut out, options)
            .write(&graph)
            .expect("fallback write succeeds");
    });

    let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
    assert!(logs.contains("WARN"), "{logs}");
    assert!(logs.contains("writing UTF-8 instead"), "{logs}");
    assert!(logs.contains("iso-8859-1"), "{logs}");
    assert!(out.starts_with(b"<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
}
