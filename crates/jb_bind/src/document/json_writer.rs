use alloc::vec::Vec;
use std::io::Write;

use super::{DocumentWriter, Scalar};
use crate::error::DocumentError;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

struct Open {
    container: Container,
    len: usize,
}

/// A streaming JSON text writer.
///
/// Nothing is buffered beyond the open container stack, every token goes
/// straight to the underlying `io::Write`.
///
/// # Examples
///
/// ```
/// use jb_bind::document::{DocumentWriter, JsonWriter, Scalar};
///
/// let mut writer = JsonWriter::new(Vec::new());
/// writer.write_start_array().unwrap();
/// writer.write_value(Scalar::Int(1)).unwrap();
/// writer.write_value(Scalar::String("two".into())).unwrap();
/// writer.write_end().unwrap();
///
/// assert_eq!(writer.into_inner(), br#"[1,"two"]"#);
/// ```
pub struct JsonWriter<W> {
    out: W,
    stack: Vec<Open>,
    after_key: bool,
    finished: bool,
    pretty: bool,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            stack: Vec::new(),
            after_key: false,
            finished: false,
            pretty: false,
        }
    }

    /// Indents nested containers by four spaces.
    pub fn pretty(out: W) -> Self {
        Self {
            pretty: true,
            ..Self::new(out)
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn newline(&mut self) -> Result<(), DocumentError> {
        if self.pretty {
            self.out.write_all(b"\n")?;
            for _ in 0..self.stack.len() {
                self.out.write_all(b"    ")?;
            }
        }
        Ok(())
    }

    fn before_value(&mut self) -> Result<(), DocumentError> {
        if self.finished {
            return Err(DocumentError::Structure("more than one root value"));
        }
        let Some(top) = self.stack.last_mut() else {
            return Ok(());
        };
        match top.container {
            Container::Object => {
                if !self.after_key {
                    return Err(DocumentError::Structure("object value without key"));
                }
                self.after_key = false;
            }
            Container::Array => {
                let first = top.len == 0;
                top.len += 1;
                if !first {
                    self.out.write_all(b",")?;
                }
                self.newline()?;
            }
        }
        Ok(())
    }

    fn after_value(&mut self) {
        if self.stack.is_empty() {
            self.finished = true;
        }
    }

    fn start(&mut self, container: Container) -> Result<(), DocumentError> {
        self.before_value()?;
        self.out.write_all(match container {
            Container::Object => b"{",
            Container::Array => b"[",
        })?;
        self.stack.push(Open { container, len: 0 });
        Ok(())
    }
}

impl<W: Write> DocumentWriter for JsonWriter<W> {
    fn write_key(&mut self, name: &str) -> Result<(), DocumentError> {
        let Some(top) = self.stack.last_mut() else {
            return Err(DocumentError::Structure("key outside of an object"));
        };
        if top.container != Container::Object {
            return Err(DocumentError::Structure("key outside of an object"));
        }
        if self.after_key {
            return Err(DocumentError::Structure("two keys in a row"));
        }
        let first = top.len == 0;
        top.len += 1;
        if !first {
            self.out.write_all(b",")?;
        }
        self.newline()?;
        serde_json::to_writer(&mut self.out, name)?;
        self.out
            .write_all(if self.pretty { b": " } else { b":" })?;
        self.after_key = true;
        Ok(())
    }

    fn write_value(&mut self, value: Scalar) -> Result<(), DocumentError> {
        if let Scalar::Float(v) = value
            && !v.is_finite()
        {
            return Err(DocumentError::NonFinite(v));
        }
        self.before_value()?;
        match value {
            Scalar::Null => self.out.write_all(b"null")?,
            Scalar::Bool(v) => serde_json::to_writer(&mut self.out, &v)?,
            Scalar::Int(v) => serde_json::to_writer(&mut self.out, &v)?,
            Scalar::UInt(v) => serde_json::to_writer(&mut self.out, &v)?,
            Scalar::Float(v) => serde_json::to_writer(&mut self.out, &v)?,
            Scalar::String(v) => serde_json::to_writer(&mut self.out, &v)?,
        }
        self.after_value();
        Ok(())
    }

    fn write_start_object(&mut self) -> Result<(), DocumentError> {
        self.start(Container::Object)
    }

    fn write_start_array(&mut self) -> Result<(), DocumentError> {
        self.start(Container::Array)
    }

    fn write_end(&mut self) -> Result<(), DocumentError> {
        if self.after_key {
            return Err(DocumentError::Structure("key without value"));
        }
        let Some(open) = self.stack.pop() else {
            return Err(DocumentError::Structure("end without open container"));
        };
        if open.len > 0 {
            self.newline()?;
        }
        self.out.write_all(match open.container {
            Container::Object => b"}",
            Container::Array => b"]",
        })?;
        self.after_value();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::JsonWriter;
    use crate::document::{DocumentWriter, Scalar};

    fn object(writer: &mut impl DocumentWriter) {
        writer.write_start_object().unwrap();
        writer.write_key("name").unwrap();
        writer.write_value(Scalar::String("a\"b".into())).unwrap();
        writer.write_key("items").unwrap();
        writer.write_start_array().unwrap();
        writer.write_value(Scalar::Float(1.5)).unwrap();
        writer.write_value(Scalar::Null).unwrap();
        writer.write_end().unwrap();
        writer.write_key("empty").unwrap();
        writer.write_start_object().unwrap();
        writer.write_end().unwrap();
        writer.write_end().unwrap();
    }

    #[test]
    fn compact_output() {
        let mut writer = JsonWriter::new(Vec::new());
        object(&mut writer);
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(text, r#"{"name":"a\"b","items":[1.5,null],"empty":{}}"#);
    }

    #[test]
    fn pretty_output() {
        let mut writer = JsonWriter::pretty(Vec::new());
        object(&mut writer);
        let text = String::from_utf8(writer.into_inner()).unwrap();
        let expected = "{\n    \"name\": \"a\\\"b\",\n    \"items\": [\n        1.5,\n        null\n    ],\n    \"empty\": {}\n}";
        assert_eq!(text, expected);
    }

    #[test]
    fn rejects_second_root() {
        let mut writer = JsonWriter::new(Vec::new());
        writer.write_value(Scalar::Int(1)).unwrap();
        assert!(writer.write_value(Scalar::Int(2)).is_err());
    }
}
