use alloc::string::String;
use alloc::vec::Vec;

use serde_json::{Map, Number, Value};

use super::{DocumentWriter, Scalar};
use crate::error::DocumentError;

enum Frame {
    Object {
        map: Map<String, Value>,
        key: Option<String>,
    },
    Array {
        items: Vec<Value>,
        key: Option<String>,
    },
}

/// A [`DocumentWriter`] building a `serde_json::Value` tree.
///
/// # Examples
///
/// ```
/// use jb_bind::document::{DocumentWriter, Scalar, ValueWriter};
///
/// let mut writer = ValueWriter::new();
/// writer.write_start_object().unwrap();
/// writer.write_key("value").unwrap();
/// writer.write_value(Scalar::String("abc".into())).unwrap();
/// writer.write_end().unwrap();
///
/// assert_eq!(writer.into_value().unwrap(), serde_json::json!({"value": "abc"}));
/// ```
#[derive(Default)]
pub struct ValueWriter {
    stack: Vec<Frame>,
    pending_key: Option<String>,
    root: Option<Value>,
}

impl ValueWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the finished root value.
    pub fn into_value(self) -> Result<Value, DocumentError> {
        if !self.stack.is_empty() {
            return Err(DocumentError::Structure("unclosed container"));
        }
        self.root.ok_or(DocumentError::UnexpectedEnd)
    }

    fn emit(&mut self, value: Value) -> Result<(), DocumentError> {
        match self.stack.last_mut() {
            None => {
                if self.root.is_some() {
                    return Err(DocumentError::Structure("more than one root value"));
                }
                self.root = Some(value);
            }
            Some(Frame::Object { map, .. }) => {
                let key = self
                    .pending_key
                    .take()
                    .ok_or(DocumentError::Structure("object value without key"))?;
                map.insert(key, value);
            }
            Some(Frame::Array { items, .. }) => items.push(value),
        }
        Ok(())
    }

    fn check_slot(&self) -> Result<(), DocumentError> {
        match self.stack.last() {
            Some(Frame::Object { .. }) if self.pending_key.is_none() => {
                Err(DocumentError::Structure("object value without key"))
            }
            None if self.root.is_some() => {
                Err(DocumentError::Structure("more than one root value"))
            }
            _ => Ok(()),
        }
    }
}

pub(super) fn scalar_to_value(value: Scalar) -> Result<Value, DocumentError> {
    Ok(match value {
        Scalar::Null => Value::Null,
        Scalar::Bool(v) => Value::Bool(v),
        Scalar::Int(v) => Value::from(v),
        Scalar::UInt(v) => Value::from(v),
        Scalar::Float(v) => Number::from_f64(v)
            .map(Value::Number)
            .ok_or(DocumentError::NonFinite(v))?,
        Scalar::String(v) => Value::String(v),
    })
}

impl DocumentWriter for ValueWriter {
    fn write_key(&mut self, name: &str) -> Result<(), DocumentError> {
        match self.stack.last() {
            Some(Frame::Object { .. }) if self.pending_key.is_none() => {
                self.pending_key = Some(String::from(name));
                Ok(())
            }
            Some(Frame::Object { .. }) => Err(DocumentError::Structure("two keys in a row")),
            _ => Err(DocumentError::Structure("key outside of an object")),
        }
    }

    fn write_value(&mut self, value: Scalar) -> Result<(), DocumentError> {
        let value = scalar_to_value(value)?;
        self.emit(value)
    }

    fn write_start_object(&mut self) -> Result<(), DocumentError> {
        self.check_slot()?;
        let key = self.pending_key.take();
        self.stack.push(Frame::Object {
            map: Map::new(),
            key,
        });
        Ok(())
    }

    fn write_start_array(&mut self) -> Result<(), DocumentError> {
        self.check_slot()?;
        let key = self.pending_key.take();
        self.stack.push(Frame::Array {
            items: Vec::new(),
            key,
        });
        Ok(())
    }

    fn write_end(&mut self) -> Result<(), DocumentError> {
        if self.pending_key.is_some() {
            return Err(DocumentError::Structure("key without value"));
        }
        let (value, key) = match self.stack.pop() {
            Some(Frame::Object { map, key }) => (Value::Object(map), key),
            Some(Frame::Array { items, key }) => (Value::Array(items), key),
            None => return Err(DocumentError::Structure("end without open container")),
        };
        self.pending_key = key;
        self.emit(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::ValueWriter;
    use crate::document::{DocumentWriter, Scalar};
    use crate::error::DocumentError;

    #[test]
    fn nested_containers() {
        let mut w = ValueWriter::new();
        w.write_start_object().unwrap();
        w.write_key("list").unwrap();
        w.write_start_array().unwrap();
        w.write_value(Scalar::Int(1)).unwrap();
        w.write_start_object().unwrap();
        w.write_key("x").unwrap();
        w.write_value(Scalar::Null).unwrap();
        w.write_end().unwrap();
        w.write_end().unwrap();
        w.write_key("flag").unwrap();
        w.write_value(Scalar::Bool(true)).unwrap();
        w.write_end().unwrap();

        assert_eq!(
            w.into_value().unwrap(),
            json!({"list": [1, {"x": null}], "flag": true})
        );
    }

    #[test]
    fn structure_errors() {
        let mut w = ValueWriter::new();
        w.write_start_object().unwrap();
        assert!(matches!(
            w.write_value(Scalar::Int(1)),
            Err(DocumentError::Structure(_))
        ));
        assert!(matches!(w.write_end(), Ok(())));
        assert!(matches!(w.write_end(), Err(DocumentError::Structure(_))));

        let mut w = ValueWriter::new();
        assert!(matches!(
            w.write_value(Scalar::Float(f64::NAN)),
            Err(DocumentError::NonFinite(_))
        ));
    }
}
