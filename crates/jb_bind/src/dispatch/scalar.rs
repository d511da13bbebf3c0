use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::any::{TypeId, type_name};
use core::fmt::{self, Write};
use core::marker::PhantomData;
use core::net::IpAddr;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::SystemTime;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use jb_utils::TypeIdMap;
use url::Url;
use uuid::Uuid;

use crate::Bindable;
use crate::de::DeserializationContext;
use crate::dispatch::{KeyStrategy, TypeStrategy};
use crate::document::{DocumentReader, DocumentWriter, Event, Scalar};
use crate::error::{BindError, DocumentError, TypeMismatch};
use crate::format::{DateFormatter, Formats};
use crate::info::Typed;
use crate::ser::SerializationContext;

// -----------------------------------------------------------------------------
// ScalarCodec

/// A built-in leaf type and its document form.
///
/// `decode` never sees a null, callers handle it first.
pub trait ScalarCodec: Typed + Sized {
    fn encode(&self, formats: &Formats) -> Result<Scalar, BindError>;

    fn decode(scalar: Scalar, formats: &Formats) -> Result<Self, BindError>;

    /// The natural textual form, used as a map key.
    fn to_key(&self) -> Result<String, BindError> {
        Ok(match self.encode(&Formats::none())? {
            Scalar::String(text) => text,
            other => other.to_string(),
        })
    }

    fn from_key(key: &str) -> Result<Self, BindError> {
        Self::decode(Scalar::String(String::from(key)), &Formats::none())
    }
}

fn unexpected<T>(expected: &'static str, found: &Scalar) -> BindError {
    BindError::mismatch(type_name::<T>(), expected, found.kind_name())
}

fn unparsable<T>(expected: &'static str, text: &str, err: impl fmt::Display) -> BindError {
    BindError::mismatch(type_name::<T>(), expected, alloc::format!("{text:?} ({err})"))
}

fn text<T>(scalar: Scalar, expected: &'static str) -> Result<String, BindError> {
    match scalar {
        Scalar::String(text) => Ok(text),
        other => Err(unexpected::<T>(expected, &other)),
    }
}

/// The text to parse as a number, without grouping separators.
fn plain_number(text: &str, formats: &Formats) -> String {
    match &formats.number {
        Some(number) => number.normalize(text),
        None => String::from(text),
    }
}

// -----------------------------------------------------------------------------
// Text and boolean

impl ScalarCodec for bool {
    fn encode(&self, _formats: &Formats) -> Result<Scalar, BindError> {
        Ok(Scalar::Bool(*self))
    }

    fn decode(scalar: Scalar, _formats: &Formats) -> Result<Self, BindError> {
        match scalar {
            Scalar::Bool(value) => Ok(value),
            Scalar::String(text) => text
                .parse()
                .map_err(|err| unparsable::<Self>("a boolean", &text, err)),
            other => Err(unexpected::<Self>("a boolean", &other)),
        }
    }
}

impl ScalarCodec for char {
    fn encode(&self, _formats: &Formats) -> Result<Scalar, BindError> {
        Ok(Scalar::String(self.to_string()))
    }

    fn decode(scalar: Scalar, _formats: &Formats) -> Result<Self, BindError> {
        let text = text::<Self>(scalar, "a character")?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(unparsable::<Self>("a character", &text, "not exactly one character")),
        }
    }
}

impl ScalarCodec for String {
    fn encode(&self, _formats: &Formats) -> Result<Scalar, BindError> {
        Ok(Scalar::String(self.clone()))
    }

    /// Numbers and booleans are accepted in their textual form.
    fn decode(scalar: Scalar, _formats: &Formats) -> Result<Self, BindError> {
        match scalar {
            Scalar::String(text) => Ok(text),
            Scalar::Null => Err(unexpected::<Self>("a string", &Scalar::Null)),
            other => Ok(other.to_string()),
        }
    }
}

impl ScalarCodec for PathBuf {
    fn encode(&self, _formats: &Formats) -> Result<Scalar, BindError> {
        match self.to_str() {
            Some(path) => Ok(Scalar::String(String::from(path))),
            None => Err(BindError::custom(alloc::format!(
                "path `{}` is not valid unicode",
                self.display()
            ))),
        }
    }

    fn decode(scalar: Scalar, _formats: &Formats) -> Result<Self, BindError> {
        text::<Self>(scalar, "a path").map(PathBuf::from)
    }
}

// -----------------------------------------------------------------------------
// Numbers

/// The narrowest scalar holding `value`, its decimal text beyond 64 bits.
fn integer_scalar<T>(value: T) -> Scalar
where
    T: Copy + ToString,
    i64: TryFrom<T>,
    u64: TryFrom<T>,
{
    if let Ok(value) = i64::try_from(value) {
        Scalar::Int(value)
    } else if let Ok(value) = u64::try_from(value) {
        Scalar::UInt(value)
    } else {
        Scalar::String(value.to_string())
    }
}

macro_rules! impl_integer {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ScalarCodec for $ty {
                /// Formatted numbers are strings; values beyond 64 bits too.
                fn encode(&self, formats: &Formats) -> Result<Scalar, BindError> {
                    if let Some(number) = &formats.number {
                        return Ok(Scalar::String(number.format_integer(*self)));
                    }
                    Ok(integer_scalar(*self))
                }

                fn decode(scalar: Scalar, formats: &Formats) -> Result<Self, BindError> {
                    let out_of_range = |found: &dyn fmt::Display| {
                        BindError::mismatch(type_name::<Self>(), "an integer in range", found)
                    };
                    match scalar {
                        Scalar::Int(value) => Self::try_from(value).map_err(|_| out_of_range(&value)),
                        Scalar::UInt(value) => Self::try_from(value).map_err(|_| out_of_range(&value)),
                        Scalar::Float(value) if value.is_finite() && value.fract() == 0.0 => {
                            Self::try_from(value as i128).map_err(|_| out_of_range(&value))
                        }
                        Scalar::String(text) => plain_number(&text, formats)
                            .parse()
                            .map_err(|err| unparsable::<Self>("an integer", &text, err)),
                        other => Err(unexpected::<Self>("an integer", &other)),
                    }
                }
            }
        )+
    };
}

impl_integer!(i8, i16, i32, i64, i128, isize);
impl_integer!(u8, u16, u32, u64, u128, usize);

macro_rules! impl_float {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ScalarCodec for $ty {
                fn encode(&self, formats: &Formats) -> Result<Scalar, BindError> {
                    let value = f64::from(*self);
                    if !value.is_finite() {
                        return Err(DocumentError::NonFinite(value).into());
                    }
                    Ok(match &formats.number {
                        Some(number) => Scalar::String(number.format_float(value)),
                        None => Scalar::Float(value),
                    })
                }

                fn decode(scalar: Scalar, formats: &Formats) -> Result<Self, BindError> {
                    match scalar {
                        Scalar::Int(value) => Ok(value as $ty),
                        Scalar::UInt(value) => Ok(value as $ty),
                        Scalar::Float(value) => Ok(value as $ty),
                        Scalar::String(text) => plain_number(&text, formats)
                            .parse()
                            .map_err(|err| unparsable::<Self>("a number", &text, err)),
                        other => Err(unexpected::<Self>("a number", &other)),
                    }
                }
            }
        )+
    };
}

impl_float!(f32, f64);

// -----------------------------------------------------------------------------
// Dates

enum DateInput<'f> {
    Millis(i64),
    Pattern(String, &'f str),
    Default(String),
}

fn date_input<'f, T>(scalar: Scalar, formats: &'f Formats) -> Result<DateInput<'f>, BindError> {
    let date = formats.date.as_ref();
    let millis = date.is_some_and(DateFormatter::is_time_in_millis);
    match scalar {
        Scalar::Int(value) if millis => Ok(DateInput::Millis(value)),
        Scalar::UInt(value) if millis => i64::try_from(value)
            .map(DateInput::Millis)
            .map_err(|_| BindError::mismatch(type_name::<T>(), "epoch milliseconds in range", value)),
        Scalar::String(text) => Ok(match date {
            Some(date) if !millis => DateInput::Pattern(text, date.pattern()),
            _ => DateInput::Default(text),
        }),
        other => Err(unexpected::<T>("a date", &other)),
    }
}

enum DateOutput<'f> {
    Millis,
    Pattern(&'f str),
    Default,
}

fn date_output(formats: &Formats) -> DateOutput<'_> {
    match &formats.date {
        Some(date) if date.is_time_in_millis() => DateOutput::Millis,
        Some(date) => DateOutput::Pattern(date.pattern()),
        None => DateOutput::Default,
    }
}

/// Renders a user pattern; chrono reports items the value cannot fill as
/// a formatting error.
fn render(formatted: impl fmt::Display) -> Result<Scalar, BindError> {
    let mut text = String::new();
    write!(text, "{formatted}")
        .map_err(|_| BindError::custom("date pattern does not apply to this value"))?;
    Ok(Scalar::String(text))
}

fn from_millis<T>(millis: i64) -> Result<DateTime<Utc>, BindError> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        BindError::mismatch(type_name::<T>(), "epoch milliseconds in range", millis)
    })
}

impl ScalarCodec for NaiveDate {
    fn encode(&self, formats: &Formats) -> Result<Scalar, BindError> {
        match date_output(formats) {
            DateOutput::Millis => Ok(Scalar::Int(
                self.and_time(NaiveTime::default()).and_utc().timestamp_millis(),
            )),
            DateOutput::Pattern(pattern) => render(self.format(pattern)),
            DateOutput::Default => Ok(Scalar::String(self.to_string())),
        }
    }

    fn decode(scalar: Scalar, formats: &Formats) -> Result<Self, BindError> {
        match date_input::<Self>(scalar, formats)? {
            DateInput::Millis(millis) => Ok(from_millis::<Self>(millis)?.date_naive()),
            DateInput::Pattern(text, pattern) => NaiveDate::parse_from_str(&text, pattern)
                .map_err(|err| unparsable::<Self>("a date", &text, err)),
            DateInput::Default(text) => text
                .parse()
                .map_err(|err| unparsable::<Self>("a date", &text, err)),
        }
    }
}

impl ScalarCodec for NaiveTime {
    fn encode(&self, formats: &Formats) -> Result<Scalar, BindError> {
        match date_output(formats) {
            DateOutput::Millis => Ok(Scalar::Int(
                self.signed_duration_since(NaiveTime::default()).num_milliseconds(),
            )),
            DateOutput::Pattern(pattern) => render(self.format(pattern)),
            DateOutput::Default => Ok(Scalar::String(self.to_string())),
        }
    }

    fn decode(scalar: Scalar, formats: &Formats) -> Result<Self, BindError> {
        match date_input::<Self>(scalar, formats)? {
            DateInput::Millis(millis) => Ok(from_millis::<Self>(millis)?.time()),
            DateInput::Pattern(text, pattern) => NaiveTime::parse_from_str(&text, pattern)
                .map_err(|err| unparsable::<Self>("a time", &text, err)),
            DateInput::Default(text) => text
                .parse()
                .map_err(|err| unparsable::<Self>("a time", &text, err)),
        }
    }
}

impl ScalarCodec for NaiveDateTime {
    fn encode(&self, formats: &Formats) -> Result<Scalar, BindError> {
        match date_output(formats) {
            DateOutput::Millis => Ok(Scalar::Int(self.and_utc().timestamp_millis())),
            DateOutput::Pattern(pattern) => render(self.format(pattern)),
            DateOutput::Default => Ok(Scalar::String(
                self.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
            )),
        }
    }

    fn decode(scalar: Scalar, formats: &Formats) -> Result<Self, BindError> {
        match date_input::<Self>(scalar, formats)? {
            DateInput::Millis(millis) => Ok(from_millis::<Self>(millis)?.naive_utc()),
            DateInput::Pattern(text, pattern) => NaiveDateTime::parse_from_str(&text, pattern)
                .map_err(|err| unparsable::<Self>("a date-time", &text, err)),
            DateInput::Default(text) => text
                .parse()
                .map_err(|err| unparsable::<Self>("a date-time", &text, err)),
        }
    }
}

impl ScalarCodec for DateTime<Utc> {
    fn encode(&self, formats: &Formats) -> Result<Scalar, BindError> {
        match date_output(formats) {
            DateOutput::Millis => Ok(Scalar::Int(self.timestamp_millis())),
            DateOutput::Pattern(pattern) => render(self.format(pattern)),
            DateOutput::Default => Ok(Scalar::String(
                self.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            )),
        }
    }

    /// A pattern without an offset reads the text as UTC.
    fn decode(scalar: Scalar, formats: &Formats) -> Result<Self, BindError> {
        match date_input::<Self>(scalar, formats)? {
            DateInput::Millis(millis) => from_millis::<Self>(millis),
            DateInput::Pattern(text, pattern) => DateTime::parse_from_str(&text, pattern)
                .map(|date| date.with_timezone(&Utc))
                .or_else(|_| NaiveDateTime::parse_from_str(&text, pattern).map(|date| date.and_utc()))
                .map_err(|err| unparsable::<Self>("a date-time", &text, err)),
            DateInput::Default(text) => text
                .parse()
                .map_err(|err| unparsable::<Self>("a date-time", &text, err)),
        }
    }
}

impl ScalarCodec for DateTime<FixedOffset> {
    fn encode(&self, formats: &Formats) -> Result<Scalar, BindError> {
        match date_output(formats) {
            DateOutput::Millis => Ok(Scalar::Int(self.timestamp_millis())),
            DateOutput::Pattern(pattern) => render(self.format(pattern)),
            DateOutput::Default => Ok(Scalar::String(
                self.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            )),
        }
    }

    fn decode(scalar: Scalar, formats: &Formats) -> Result<Self, BindError> {
        match date_input::<Self>(scalar, formats)? {
            DateInput::Millis(millis) => Ok(from_millis::<Self>(millis)?.fixed_offset()),
            DateInput::Pattern(text, pattern) => DateTime::parse_from_str(&text, pattern)
                .or_else(|_| {
                    NaiveDateTime::parse_from_str(&text, pattern)
                        .map(|date| date.and_utc().fixed_offset())
                })
                .map_err(|err| unparsable::<Self>("a date-time", &text, err)),
            DateInput::Default(text) => DateTime::parse_from_rfc3339(&text)
                .map_err(|err| unparsable::<Self>("a date-time", &text, err)),
        }
    }
}

/// Encoded as a UTC date-time.
impl ScalarCodec for SystemTime {
    fn encode(&self, formats: &Formats) -> Result<Scalar, BindError> {
        DateTime::<Utc>::from(*self).encode(formats)
    }

    fn decode(scalar: Scalar, formats: &Formats) -> Result<Self, BindError> {
        DateTime::<Utc>::decode(scalar, formats).map(SystemTime::from)
    }
}

// -----------------------------------------------------------------------------
// Identifiers

impl ScalarCodec for Uuid {
    fn encode(&self, _formats: &Formats) -> Result<Scalar, BindError> {
        Ok(Scalar::String(self.to_string()))
    }

    fn decode(scalar: Scalar, _formats: &Formats) -> Result<Self, BindError> {
        let text = text::<Self>(scalar, "a UUID")?;
        Uuid::parse_str(&text).map_err(|err| unparsable::<Self>("a UUID", &text, err))
    }
}

impl ScalarCodec for IpAddr {
    fn encode(&self, _formats: &Formats) -> Result<Scalar, BindError> {
        Ok(Scalar::String(self.to_string()))
    }

    fn decode(scalar: Scalar, _formats: &Formats) -> Result<Self, BindError> {
        let text = text::<Self>(scalar, "an IP address")?;
        text.parse()
            .map_err(|err| unparsable::<Self>("an IP address", &text, err))
    }
}

impl ScalarCodec for Url {
    fn encode(&self, _formats: &Formats) -> Result<Scalar, BindError> {
        Ok(Scalar::String(String::from(self.as_str())))
    }

    fn decode(scalar: Scalar, _formats: &Formats) -> Result<Self, BindError> {
        let text = text::<Self>(scalar, "a URL")?;
        Url::parse(&text).map_err(|err| unparsable::<Self>("a URL", &text, err))
    }
}

// -----------------------------------------------------------------------------
// Strategies

pub(crate) struct ScalarStrategy<T> {
    formats: Formats,
    marker: PhantomData<fn() -> T>,
}

impl<T: ScalarCodec> TypeStrategy for ScalarStrategy<T> {
    fn serialize(
        &self,
        value: &dyn Bindable,
        writer: &mut dyn DocumentWriter,
        _ctx: &mut SerializationContext<'_>,
    ) -> Result<(), BindError> {
        let value = value
            .downcast_ref::<T>()
            .ok_or_else(|| TypeMismatch::new::<T>(value.type_path()))?;
        writer.write_value(value.encode(&self.formats)?)?;
        Ok(())
    }

    fn deserialize(
        &self,
        first: Event,
        _reader: &mut dyn DocumentReader,
        _ctx: &mut DeserializationContext<'_>,
    ) -> Result<Option<Box<dyn Bindable>>, BindError> {
        match first {
            Event::Value(Scalar::Null) => Ok(None),
            Event::Value(scalar) => Ok(Some(Box::new(T::decode(scalar, &self.formats)?))),
            other => Err(BindError::mismatch(type_name::<T>(), "a scalar", other.kind_name())),
        }
    }
}

struct ScalarKey<T>(PhantomData<fn() -> T>);

impl<T: ScalarCodec> KeyStrategy for ScalarKey<T> {
    fn write_key(&self, key: &dyn Bindable) -> Result<String, BindError> {
        key.downcast_ref::<T>()
            .ok_or_else(|| TypeMismatch::new::<T>(key.type_path()))?
            .to_key()
    }

    fn read_key(&self, key: &str) -> Result<Box<dyn Bindable>, BindError> {
        Ok(Box::new(T::from_key(key)?))
    }
}

// -----------------------------------------------------------------------------
// Built-in table

/// Strategy constructors of one built-in scalar.
#[derive(Clone, Copy)]
pub(crate) struct Builtin {
    pub value: fn(Formats) -> Arc<dyn TypeStrategy>,
    pub key: fn() -> Arc<dyn KeyStrategy>,
}

fn value_strategy<T: ScalarCodec>(formats: Formats) -> Arc<dyn TypeStrategy> {
    Arc::new(ScalarStrategy::<T> {
        formats,
        marker: PhantomData,
    })
}

fn key_strategy<T: ScalarCodec>() -> Arc<dyn KeyStrategy> {
    Arc::new(ScalarKey::<T>(PhantomData))
}

fn entry<T: ScalarCodec>() -> (TypeId, Builtin) {
    let builtin = Builtin {
        value: value_strategy::<T>,
        key: key_strategy::<T>,
    };
    (TypeId::of::<T>(), builtin)
}

/// The built-in strategies of a type, matched by exact type identity.
pub(crate) fn builtin(ty: TypeId) -> Option<Builtin> {
    static TABLE: OnceLock<TypeIdMap<Builtin>> = OnceLock::new();
    TABLE
        .get_or_init(|| {
            [
                entry::<bool>(),
                entry::<char>(),
                entry::<String>(),
                entry::<PathBuf>(),
                entry::<i8>(),
                entry::<i16>(),
                entry::<i32>(),
                entry::<i64>(),
                entry::<i128>(),
                entry::<isize>(),
                entry::<u8>(),
                entry::<u16>(),
                entry::<u32>(),
                entry::<u64>(),
                entry::<u128>(),
                entry::<usize>(),
                entry::<f32>(),
                entry::<f64>(),
                entry::<NaiveDate>(),
                entry::<NaiveTime>(),
                entry::<NaiveDateTime>(),
                entry::<DateTime<Utc>>(),
                entry::<DateTime<FixedOffset>>(),
                entry::<SystemTime>(),
                entry::<Uuid>(),
                entry::<IpAddr>(),
                entry::<Url>(),
            ]
            .into_iter()
            .collect()
        })
        .get(&ty)
        .copied()
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    use chrono::{DateTime, NaiveDate, Utc};
    use uuid::Uuid;

    use super::{ScalarCodec, builtin};
    use crate::document::Scalar;
    use crate::error::BindError;
    use crate::format::{DateFormatter, Formats, NumberFormatter};

    fn date(pattern: &str) -> Formats {
        Formats {
            date: Some(DateFormatter::new(pattern).unwrap()),
            number: None,
        }
    }

    fn number(pattern: &str) -> Formats {
        Formats {
            date: None,
            number: Some(NumberFormatter::new(pattern).unwrap()),
        }
    }

    #[test]
    fn integers() {
        let none = Formats::none();
        assert_eq!(7_u8.encode(&none).unwrap(), Scalar::Int(7));
        assert_eq!(i8::MIN.encode(&none).unwrap(), Scalar::Int(-128));
        assert_eq!((-5_i128).encode(&none).unwrap(), Scalar::Int(-5));
        assert_eq!(u64::MAX.encode(&none).unwrap(), Scalar::UInt(u64::MAX));
        assert_eq!(
            u128::MAX.encode(&none).unwrap(),
            Scalar::String(u128::MAX.to_string())
        );

        assert_eq!(i16::decode(Scalar::Int(-3), &none).unwrap(), -3);
        assert_eq!(u32::decode(Scalar::Float(4.0), &none).unwrap(), 4);
        assert!(matches!(
            u8::decode(Scalar::Int(300), &none),
            Err(BindError::Mismatch { .. })
        ));
        assert!(u8::decode(Scalar::Bool(true), &none).is_err());

        let grouped = number("#,##0");
        assert_eq!(
            1234567_i64.encode(&grouped).unwrap(),
            Scalar::String("1,234,567".into())
        );
        assert_eq!(
            i64::decode(Scalar::String("1,234,567".into()), &grouped).unwrap(),
            1234567
        );
    }

    #[test]
    fn floats() {
        let none = Formats::none();
        assert_eq!(1.5_f32.encode(&none).unwrap(), Scalar::Float(1.5));
        assert!(f64::NAN.encode(&none).is_err());
        assert_eq!(f64::decode(Scalar::Int(2), &none).unwrap(), 2.0);
        assert_eq!(
            2.5_f64.encode(&number("0.00")).unwrap(),
            Scalar::String("2.50".into())
        );
    }

    #[test]
    fn text_values() {
        let none = Formats::none();
        assert_eq!('x'.encode(&none).unwrap(), Scalar::String("x".into()));
        assert!(char::decode(Scalar::String("xy".into()), &none).is_err());
        assert_eq!(String::decode(Scalar::Int(5), &none).unwrap(), "5");
        assert!(bool::decode(Scalar::String("true".into()), &none).unwrap());

        let id = Uuid::nil();
        let encoded = id.encode(&none).unwrap();
        assert_eq!(Uuid::decode(encoded, &none).unwrap(), id);
    }

    #[test]
    fn dates() {
        let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(
            day.encode(&Formats::none()).unwrap(),
            Scalar::String("2024-02-29".into())
        );
        assert_eq!(
            day.encode(&date("%d.%m.%Y")).unwrap(),
            Scalar::String("29.02.2024".into())
        );
        assert_eq!(
            NaiveDate::decode(Scalar::String("29.02.2024".into()), &date("%d.%m.%Y")).unwrap(),
            day
        );

        let millis = date(crate::format::TIME_IN_MILLIS);
        let instant = DateTime::<Utc>::from_timestamp_millis(1_000).unwrap();
        assert_eq!(instant.encode(&millis).unwrap(), Scalar::Int(1_000));
        assert_eq!(
            DateTime::<Utc>::decode(Scalar::Int(1_000), &millis).unwrap(),
            instant
        );
        assert_eq!(
            instant.encode(&Formats::none()).unwrap(),
            Scalar::String("1970-01-01T00:00:01Z".into())
        );
    }

    #[test]
    fn keys_use_natural_text() {
        assert_eq!(42_i32.to_key().unwrap(), "42");
        assert_eq!(i32::from_key("42").unwrap(), 42);
        assert!(bool::from_key("true").unwrap());
    }

    #[test]
    fn table_matches_exact_types() {
        assert!(builtin(core::any::TypeId::of::<u8>()).is_some());
        assert!(builtin(core::any::TypeId::of::<Option<u8>>()).is_none());
        assert!(builtin(core::any::TypeId::of::<Vec<u8>>()).is_none());
    }
}
