//! Boundary with the token-level document writer and reader.
//!
//! ## Menu
//!
//! - [`Scalar`]: a leaf value, one of null, boolean, number or string.
//! - [`Event`]: one pull event of a [`DocumentReader`].
//! - [`DocumentWriter`]: push interface used while encoding.
//! - [`DocumentReader`]: pull interface used while decoding.
//! - [`ValueWriter`] / [`ValueReader`]: collaborators over `serde_json::Value`.
//! - [`ReplayReader`]: replays the events of one captured value.
//! - [`JsonWriter`]: streaming JSON text writer over any `io::Write`.

// -----------------------------------------------------------------------------
// Modules

mod json_writer;
mod replay_reader;
mod value_reader;
mod value_writer;

// -----------------------------------------------------------------------------
// Exports

pub use json_writer::JsonWriter;
pub use replay_reader::ReplayReader;
pub use value_reader::ValueReader;
pub use value_writer::ValueWriter;

use alloc::string::String;
use core::fmt;

use crate::error::DocumentError;

// -----------------------------------------------------------------------------
// Scalar

/// A leaf document value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
}

impl Scalar {
    /// Short name of the scalar kind, used in mismatch messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) | Self::UInt(_) | Self::Float(_) => "number",
            Self::String(_) => "string",
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.pad("null"),
            Self::Bool(v) => fmt::Display::fmt(v, f),
            Self::Int(v) => fmt::Display::fmt(v, f),
            Self::UInt(v) => fmt::Display::fmt(v, f),
            Self::Float(v) => fmt::Display::fmt(v, f),
            Self::String(v) => write!(f, "{v:?}"),
        }
    }
}

// -----------------------------------------------------------------------------
// Event

/// A pull event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Key(String),
    Value(Scalar),
    StartObject,
    StartArray,
    End,
}

impl Event {
    /// Short description of the event, used in mismatch messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Key(_) => "key",
            Self::Value(scalar) => scalar.kind_name(),
            Self::StartObject => "object",
            Self::StartArray => "array",
            Self::End => "end of container",
        }
    }
}

// -----------------------------------------------------------------------------
// DocumentWriter

/// Push-style document writer.
///
/// Inside an object every value is preceded by [`write_key`](Self::write_key).
pub trait DocumentWriter {
    fn write_key(&mut self, name: &str) -> Result<(), DocumentError>;

    fn write_value(&mut self, value: Scalar) -> Result<(), DocumentError>;

    fn write_start_object(&mut self) -> Result<(), DocumentError>;

    fn write_start_array(&mut self) -> Result<(), DocumentError>;

    /// Closes the innermost open object or array.
    fn write_end(&mut self) -> Result<(), DocumentError>;
}

// -----------------------------------------------------------------------------
// DocumentReader

/// Pull-style document reader.
pub trait DocumentReader {
    /// Returns the next event, `None` once the root value is complete.
    fn next(&mut self) -> Result<Option<Event>, DocumentError>;

    /// Returns the next event, failing at the end of the document.
    fn next_event(&mut self) -> Result<Event, DocumentError> {
        self.next()?.ok_or(DocumentError::UnexpectedEnd)
    }

    /// Skips the value started by `first`, including every nested child.
    fn skip_value(&mut self, first: &Event) -> Result<(), DocumentError> {
        if !matches!(first, Event::StartObject | Event::StartArray) {
            return Ok(());
        }
        let mut depth = 1_usize;
        while depth > 0 {
            match self.next_event()? {
                Event::StartObject | Event::StartArray => depth += 1,
                Event::End => depth -= 1,
                Event::Key(_) | Event::Value(_) => {}
            }
        }
        Ok(())
    }
}

impl<W: DocumentWriter + ?Sized> DocumentWriter for &mut W {
    fn write_key(&mut self, name: &str) -> Result<(), DocumentError> {
        (**self).write_key(name)
    }

    fn write_value(&mut self, value: Scalar) -> Result<(), DocumentError> {
        (**self).write_value(value)
    }

    fn write_start_object(&mut self) -> Result<(), DocumentError> {
        (**self).write_start_object()
    }

    fn write_start_array(&mut self) -> Result<(), DocumentError> {
        (**self).write_start_array()
    }

    fn write_end(&mut self) -> Result<(), DocumentError> {
        (**self).write_end()
    }
}

impl<R: DocumentReader + ?Sized> DocumentReader for &mut R {
    fn next(&mut self) -> Result<Option<Event>, DocumentError> {
        (**self).next()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use serde_json::json;

    use super::{DocumentReader, Event, Scalar, ValueReader};

    #[test]
    fn skip_value_consumes_whole_subtree() {
        let mut reader = ValueReader::new(json!([{"a": [1, {"b": null}]}, "tail"]));
        assert_eq!(reader.next_event().unwrap(), Event::StartArray);

        let first = reader.next_event().unwrap();
        assert_eq!(first, Event::StartObject);
        reader.skip_value(&first).unwrap();

        assert_eq!(
            reader.next_event().unwrap(),
            Event::Value(Scalar::String("tail".into()))
        );
        assert_eq!(reader.next_event().unwrap(), Event::End);
        assert_eq!(reader.next().unwrap(), None);
    }

    #[test]
    fn scalar_display() {
        assert_eq!(Scalar::String("x".into()).to_string(), "\"x\"");
        assert_eq!(Scalar::Int(-3).to_string(), "-3");
        assert_eq!(Scalar::Null.kind_name(), "null");
    }
}
