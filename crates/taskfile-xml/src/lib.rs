//! Deterministic XML serialization of task graphs.
//!
//! [`XmlWriter`] writes complete task files, [`ChangesXmlWriter`] the
//! per-device changes document and [`TemplateXmlWriter`] reusable task
//! templates. Output depends only on the graph and the [`WriterOptions`]:
//! siblings are sorted by id and attributes holding empty values are left out,
//! so writing the same graph twice yields identical bytes.

/// Attribute value formats.
pub mod attribute;
pub mod changes;
/// Element tree.
pub mod element;
pub mod encoding;
/// Error types.
pub mod error;
pub mod node;
pub mod sink;
pub mod template;
/// Graph traversal.
pub mod walker;
pub mod writer;

pub use changes::ChangesXmlWriter;
pub use element::Element;
pub use encoding::Encoding;
pub use error::{AttributeError, Result, UnknownEncoding, WriteError};
pub use node::{Entity, NodeBuilder};
pub use sink::{ByteSink, Sink, TextSink};
pub use template::{TemplateXmlWriter, relative_expression};
pub use walker::{TreeWalker, sorted_by_id};
pub use writer::{CURRENT_TSKVERSION, WriterOptions, XmlWriter};
