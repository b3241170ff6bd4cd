//! Per-device changes document used to reconcile synchronization.

use crate::element::Element;
use crate::encoding::Encoding;
use crate::error::Result;
use crate::sink::Sink;
use crate::writer::render;
use taskfile_core::ChangeSets;
use tracing::debug;

/// Writes [`ChangeSets`] as a `<changes>` document.
///
/// The document has no header and no layout whitespace: devices appear in
/// ascending guid order, objects in ascending id order and changed field names
/// sorted and comma-joined.
#[derive(Debug)]
pub struct ChangesXmlWriter<S> {
    sink: S,
    encoding: Encoding,
}

impl<S: Sink> ChangesXmlWriter<S> {
    /// UTF-8 writer.
    pub const fn new(sink: S) -> Self {
        Self::with_encoding(sink, Encoding::Utf8)
    }

    /// Writer producing `encoding`.
    pub const fn with_encoding(sink: S, encoding: Encoding) -> Self {
        Self { sink, encoding }
    }

    /// Give back the sink.
    pub fn into_inner(self) -> S {
        self.sink
    }

    /// Write every device's change set.
    ///
    /// # Errors
    /// Returns [`crate::WriteError::Sink`] when the sink fails.
    pub fn write(&mut self, changes: &ChangeSets) -> Result<()> {
        let mut root = Element::new("changes");
        for device in changes.devices() {
            let node = root.sub_element("device");
            node.set("guid", device.guid.as_str());
            for (id, fields) in &device.objects {
                let object = node.sub_element("obj");
                object.set("id", id.as_str());
                if !fields.is_empty() {
                    let joined: Vec<&str> = fields.iter().map(String::as_str).collect();
                    object.set_text(joined.join(","));
                }
            }
        }
        let (document, encoding) = render(&root, None, self.encoding)?;
        self.sink.write_document(&document, encoding)?;
        debug!(devices = changes.len(), bytes = document.len(), "Wrote changes document");
        Ok(())
    }
}
