//! Task file writer and the serializer shared by every document writer.

use crate::element::Element;
use crate::encoding::{Encoding, EncodingError, Escaper, Policy};
use crate::error::{Result, WriteError};
use crate::node::{Entity, NodeBuilder};
use crate::sink::Sink;
use crate::walker::TreeWalker;
use quick_xml::Writer;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::io;
use taskfile_core::TaskGraph;
use tracing::{debug, warn};

/// Schema version written by this crate, consumed by readers to pick the
/// legacy fix-ups to apply.
pub const CURRENT_TSKVERSION: u32 = 37;

/// Header values and output encoding of task files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterOptions {
    /// Application release written in the `taskcoach` processing instruction.
    pub release: String,
    /// Schema version written in the `taskcoach` processing instruction.
    pub tskversion: u32,
    /// Requested output encoding.
    pub encoding: Encoding,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            release: env!("CARGO_PKG_VERSION").to_owned(),
            tskversion: CURRENT_TSKVERSION,
            encoding: Encoding::Utf8,
        }
    }
}

/// Writes a [`TaskGraph`] as a task file.
///
/// ```
/// use taskfile_core::{Task, TaskGraph};
/// use taskfile_xml::{WriterOptions, XmlWriter};
///
/// let graph = TaskGraph {
///     tasks: vec![Task::new("1", "Write report")],
///     ..TaskGraph::default()
/// };
/// let options = WriterOptions {
///     release: "1.4.6".to_owned(),
///     ..WriterOptions::default()
/// };
/// let mut out = Vec::new();
/// XmlWriter::with_options(&mut out, options).write(&graph)?;
/// assert_eq!(
///     String::from_utf8_lossy(&out),
///     "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
///      <?taskcoach release=\"1.4.6\" tskversion=\"37\"?>\n\
///      <tasks>\n  <task id=\"1\" status=\"1\" subject=\"Write report\"/>\n</tasks>\n"
/// );
/// # Ok::<(), taskfile_xml::WriteError>(())
/// ```
#[derive(Debug)]
pub struct XmlWriter<S> {
    sink: S,
    options: WriterOptions,
}

impl<S: Sink> XmlWriter<S> {
    /// Writer with default options.
    pub fn new(sink: S) -> Self {
        Self::with_options(sink, WriterOptions::default())
    }

    /// Writer with explicit options.
    pub const fn with_options(sink: S, options: WriterOptions) -> Self {
        Self { sink, options }
    }

    /// Options in use.
    pub const fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Give back the sink.
    pub fn into_inner(self) -> S {
        self.sink
    }

    /// Write the whole graph: tasks, categories, notes not owned by a task or
    /// category, synchronization settings and the file guid.
    ///
    /// # Errors
    /// Returns [`WriteError::Sink`] when the sink fails and
    /// [`WriteError::InvalidName`] for unusable synchronization setting names.
    pub fn write(&mut self, graph: &TaskGraph) -> Result<()> {
        let walker = TreeWalker::new(graph);
        let builder = NodeBuilder::new().with_categorizable_ids(walker.categorizable_ids());
        let tasks = walker.tasks();
        let categories = walker.categories();
        let notes = walker.free_notes();
        debug!(
            tasks = tasks.len(),
            categories = categories.len(),
            notes = notes.len(),
            "Writing task file"
        );

        let mut root = Element::new("tasks");
        for task in tasks {
            root.push(builder.build(Entity::Task(task))?);
        }
        for category in categories {
            root.push(builder.build(Entity::Category(category))?);
        }
        for note in notes {
            root.push(builder.build(Entity::Note(note))?);
        }
        if let Some(config) = &graph.syncml_config {
            root.push(builder.build(Entity::SyncMl(config))?);
        }
        if let Some(guid) = &graph.guid {
            root.sub_element("guid").set_text(guid.as_str());
        }
        self.write_root(root)
    }

    /// Flatten and serialize a `<tasks>` root with the task file header.
    pub(crate) fn write_root(&mut self, mut root: Element) -> Result<()> {
        root.flatten();
        let header = Header {
            release: &self.options.release,
            tskversion: self.options.tskversion,
        };
        let (document, encoding) = render(&root, Some(&header), self.options.encoding)?;
        self.sink.write_document(&document, encoding)?;
        debug!(bytes = document.len(), %encoding, "Wrote task file");
        Ok(())
    }
}

/// Task file processing instruction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Header<'a> {
    pub(crate) release: &'a str,
    pub(crate) tskversion: u32,
}

#[derive(Debug)]
enum RenderError {
    Encoding(EncodingError),
    Write(WriteError),
}

impl From<EncodingError> for RenderError {
    fn from(err: EncodingError) -> Self {
        Self::Encoding(err)
    }
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> Self {
        Self::Write(WriteError::Xml(err.into()))
    }
}

impl From<quick_xml::Error> for RenderError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Write(WriteError::Xml(err))
    }
}

/// Serialize `root` in `encoding`, or in UTF-8 when the document cannot be
/// represented in `encoding`. Returns the bytes and the encoding actually used.
pub(crate) fn render(
    root: &Element,
    header: Option<&Header<'_>>,
    encoding: Encoding,
) -> Result<(Vec<u8>, Encoding)> {
    match render_as(root, header, encoding, Policy::Strict) {
        Ok(document) => Ok((document, encoding)),
        Err(RenderError::Write(err)) => Err(err),
        Err(RenderError::Encoding(err)) => {
            warn!(%encoding, error = %err, "Document not encodable, writing UTF-8 instead");
            match render_as(root, header, Encoding::Utf8, Policy::Replace) {
                Ok(document) => Ok((document, Encoding::Utf8)),
                Err(RenderError::Write(err)) => Err(err),
                Err(RenderError::Encoding(err)) => Err(WriteError::Xml(
                    io::Error::new(io::ErrorKind::InvalidData, err).into(),
                )),
            }
        }
    }
}

fn render_as(
    root: &Element,
    header: Option<&Header<'_>>,
    encoding: Encoding,
    policy: Policy,
) -> std::result::Result<Vec<u8>, RenderError> {
    let escaper = Escaper::new(encoding, policy);
    let mut writer = Writer::new(Vec::new());
    if let Some(header) = header {
        if encoding.declares_xml() {
            writer.write_event(Event::Decl(BytesDecl::new(
                "1.0",
                Some(encoding.label()),
                None,
            )))?;
            writer.get_mut().push(b'\n');
        }
        let instruction = format!(
            "taskcoach release=\"{}\" tskversion=\"{}\"",
            escaper.instruction(header.release)?,
            header.tskversion
        );
        writer.write_event(Event::PI(BytesPI::new(instruction)))?;
        writer.get_mut().push(b'\n');
    }
    write_element(&mut writer, root, escaper)?;
    let text = String::from_utf8(writer.into_inner())
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    Ok(encoding.encode(&text)?)
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    element: &Element,
    escaper: Escaper,
) -> std::result::Result<(), RenderError> {
    let attributes = element
        .attributes()
        .map(|(key, value)| Ok((key, escaper.attribute(value)?)))
        .collect::<std::result::Result<Vec<_>, EncodingError>>()?;
    let mut start = BytesStart::new(element.name());
    for (key, value) in &attributes {
        start.push_attribute(Attribute {
            key: QName(key.as_bytes()),
            value: Cow::Borrowed(value.as_bytes()),
        });
    }

    if element.text().is_none() && element.children().is_empty() {
        writer.write_event(Event::Empty(start))?;
    } else {
        writer.write_event(Event::Start(start))?;
        if let Some(text) = element.text() {
            writer.write_event(Event::Text(BytesText::from_escaped(escaper.text(text)?)))?;
        }
        for child in element.children() {
            write_element(writer, child, escaper)?;
        }
        writer.write_event(Event::End(BytesEnd::new(element.name())))?;
    }

    if let Some(tail) = element.tail() {
        writer.write_event(Event::Text(BytesText::from_escaped(escaper.text(tail)?)))?;
    }
    Ok(())
}
