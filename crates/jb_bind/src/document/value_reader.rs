use alloc::vec::Vec;

use serde_json::{Value, map};

use super::{DocumentReader, Event, Scalar};
use crate::error::DocumentError;

enum Frame {
    Object {
        entries: map::IntoIter,
        pending: Option<Value>,
    },
    Array(alloc::vec::IntoIter<Value>),
}

enum Step {
    Key(alloc::string::String),
    Open(Value),
    Close,
}

/// A [`DocumentReader`] pulling events out of a `serde_json::Value`.
///
/// Containers are unpacked lazily, one level at a time.
pub struct ValueReader {
    root: Option<Value>,
    stack: Vec<Frame>,
}

impl ValueReader {
    pub fn new(value: Value) -> Self {
        Self {
            root: Some(value),
            stack: Vec::new(),
        }
    }

    fn open(&mut self, value: Value) -> Event {
        match value {
            Value::Null => Event::Value(Scalar::Null),
            Value::Bool(v) => Event::Value(Scalar::Bool(v)),
            Value::String(v) => Event::Value(Scalar::String(v)),
            Value::Number(n) => Event::Value(if let Some(v) = n.as_i64() {
                Scalar::Int(v)
            } else if let Some(v) = n.as_u64() {
                Scalar::UInt(v)
            } else {
                Scalar::Float(n.as_f64().unwrap_or(f64::NAN))
            }),
            Value::Array(items) => {
                self.stack.push(Frame::Array(items.into_iter()));
                Event::StartArray
            }
            Value::Object(entries) => {
                self.stack.push(Frame::Object {
                    entries: entries.into_iter(),
                    pending: None,
                });
                Event::StartObject
            }
        }
    }
}

impl DocumentReader for ValueReader {
    fn next(&mut self) -> Result<Option<Event>, DocumentError> {
        if let Some(root) = self.root.take() {
            return Ok(Some(self.open(root)));
        }

        let step = match self.stack.last_mut() {
            None => return Ok(None),
            Some(Frame::Object { entries, pending }) => match pending.take() {
                Some(value) => Step::Open(value),
                None => match entries.next() {
                    Some((key, value)) => {
                        *pending = Some(value);
                        Step::Key(key)
                    }
                    None => Step::Close,
                },
            },
            Some(Frame::Array(items)) => match items.next() {
                Some(value) => Step::Open(value),
                None => Step::Close,
            },
        };

        Ok(Some(match step {
            Step::Key(key) => Event::Key(key),
            Step::Open(value) => self.open(value),
            Step::Close => {
                self.stack.pop();
                Event::End
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use serde_json::json;

    use super::ValueReader;
    use crate::document::{DocumentReader, Event, Scalar};

    fn drain(mut reader: ValueReader) -> Vec<Event> {
        let mut events = Vec::new();
        while let Some(event) = reader.next().unwrap() {
            events.push(event);
        }
        events
    }

    #[test]
    fn events_in_document_order() {
        let events = drain(ValueReader::new(json!({"a": [1, 2.5], "b": u64::MAX})));
        assert_eq!(
            events,
            [
                Event::StartObject,
                Event::Key("a".into()),
                Event::StartArray,
                Event::Value(Scalar::Int(1)),
                Event::Value(Scalar::Float(2.5)),
                Event::End,
                Event::Key("b".into()),
                Event::Value(Scalar::UInt(u64::MAX)),
                Event::End,
            ]
        );
    }

    #[test]
    fn scalar_root() {
        let events = drain(ValueReader::new(json!("abc")));
        assert_eq!(events, [Event::Value(Scalar::String("abc".into()))]);
    }
}
