use alloc::collections::VecDeque;
use alloc::collections::vec_deque;

use super::{DocumentReader, Event};
use crate::error::DocumentError;

/// A [`DocumentReader`] replaying the events of one value read beforehand.
pub struct ReplayReader {
    events: VecDeque<Event>,
}

impl ReplayReader {
    /// Captures the value started by `first`, including every nested child.
    pub fn capture(first: Event, reader: &mut dyn DocumentReader) -> Result<Self, DocumentError> {
        let mut depth = usize::from(matches!(first, Event::StartObject | Event::StartArray));
        let mut events = VecDeque::new();
        events.push_back(first);
        while depth > 0 {
            let event = reader.next_event()?;
            match event {
                Event::StartObject | Event::StartArray => depth += 1,
                Event::End => depth -= 1,
                Event::Key(_) | Event::Value(_) => {}
            }
            events.push_back(event);
        }
        Ok(Self { events })
    }

    /// The events not replayed yet.
    pub fn events(&self) -> vec_deque::Iter<'_, Event> {
        self.events.iter()
    }
}

impl DocumentReader for ReplayReader {
    fn next(&mut self) -> Result<Option<Event>, DocumentError> {
        Ok(self.events.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::ReplayReader;
    use crate::document::{DocumentReader, Event, Scalar, ValueReader};

    #[test]
    fn captures_one_value_only() {
        let mut source = ValueReader::new(json!([{"a": [1]}, 2]));
        assert_eq!(source.next_event().unwrap(), Event::StartArray);

        let first = source.next_event().unwrap();
        let mut replay = ReplayReader::capture(first, &mut source).unwrap();
        assert_eq!(replay.events().len(), 6);

        assert_eq!(source.next_event().unwrap(), Event::Value(Scalar::Int(2)));
        assert_eq!(replay.next_event().unwrap(), Event::StartObject);
        assert_eq!(replay.next_event().unwrap(), Event::Key("a".into()));
        let list = replay.next_event().unwrap();
        replay.skip_value(&list).unwrap();
        assert_eq!(replay.next_event().unwrap(), Event::End);
        assert!(replay.next().unwrap().is_none());
    }
}
