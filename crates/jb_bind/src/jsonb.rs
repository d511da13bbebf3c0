//! The binder facade.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use std::io;
use std::sync::{PoisonError, RwLock};

use log::{debug, warn};
use serde_json::Value;

use crate::config::BindConfig;
use crate::document::{DocumentReader, DocumentWriter, JsonWriter, ValueReader, ValueWriter};
use crate::engine::Engine;
use crate::error::{BindError, DocumentError};
use crate::info::Typed;
use crate::{Bindable, downcast};

/// Binds values to and from JSON documents.
///
/// A `Jsonb` is cheap to share between threads. Every cache lives in its
/// [`Engine`]; [`reconfigure`](Self::reconfigure) swaps in a fresh engine
/// while calls in flight finish on the old one.
///
/// # Examples
///
/// ```
/// use jb_bind::Jsonb;
/// use jb_bind::derive::Bindable;
///
/// #[derive(Default, Bindable)]
/// #[bind(default)]
/// struct Wrapper {
///     pub value: String,
/// }
///
/// let jsonb = Jsonb::new();
/// let text = jsonb.to_string(&Wrapper { value: "abc".into() }).unwrap();
/// assert_eq!(text, r#"{"value":"abc"}"#);
///
/// let back: Wrapper = jsonb.from_str(&text).unwrap();
/// assert_eq!(back.value, "abc");
/// ```
pub struct Jsonb {
    engine: RwLock<Arc<Engine>>,
}

impl Jsonb {
    pub fn new() -> Self {
        Self::with_config(BindConfig::new())
    }

    pub fn with_config(config: BindConfig) -> Self {
        Self {
            engine: RwLock::new(Self::prepared(config)),
        }
    }

    /// A fresh engine with its eager types resolved. A type failing here is
    /// left unresolved and fails again at its first use.
    fn prepared(config: BindConfig) -> Arc<Engine> {
        let engine = Engine::new(Arc::new(config));
        if let Err(err) = engine.prepare() {
            warn!("eager resolution failed: {err}");
        }
        Arc::new(engine)
    }

    /// The engine of the current configuration.
    pub fn engine(&self) -> Arc<Engine> {
        self.engine
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the configuration, dropping every cached model and strategy.
    pub fn reconfigure(&self, config: BindConfig) {
        let engine = Self::prepared(config);
        *self.engine.write().unwrap_or_else(PoisonError::into_inner) = engine;
        debug!("binder reconfigured, caches dropped");
    }

    // -------------------------------------------------------------------------
    // Serialization

    /// Writes `value` to any document writer.
    pub fn serialize_into(&self, value: &dyn Bindable, writer: &mut dyn DocumentWriter) -> Result<(), BindError> {
        self.engine().serialize(value, writer)
    }

    /// Writes `value` as JSON text to `out`, returning it.
    pub fn to_writer<T: Typed, W: io::Write>(&self, value: &T, out: W) -> Result<W, BindError> {
        let engine = self.engine();
        let mut writer = if engine.config().formatting() {
            JsonWriter::pretty(out)
        } else {
            JsonWriter::new(out)
        };
        engine.serialize(value, &mut writer)?;
        Ok(writer.into_inner())
    }

    pub fn to_string<T: Typed>(&self, value: &T) -> Result<String, BindError> {
        let bytes = self.to_writer(value, Vec::new())?;
        String::from_utf8(bytes).map_err(BindError::custom)
    }

    pub fn to_value<T: Typed>(&self, value: &T) -> Result<Value, BindError> {
        let mut writer = ValueWriter::new();
        self.serialize_into(value, &mut writer)?;
        Ok(writer.into_value()?)
    }

    // -------------------------------------------------------------------------
    // Deserialization

    /// Reads a `T` from any document reader.
    pub fn deserialize_from<T: Typed>(&self, reader: &mut dyn DocumentReader) -> Result<T, BindError> {
        let value = self.engine().deserialize(T::type_info(), reader)?;
        Ok(downcast::<T>(value)?)
    }

    pub fn from_value<T: Typed>(&self, value: Value) -> Result<T, BindError> {
        self.deserialize_from(&mut ValueReader::new(value))
    }

    /// Reads a `T` from JSON text.
    ///
    /// The whole text is parsed into a `serde_json::Value` before binding.
    /// Use [`deserialize_from`](Self::deserialize_from) with a streaming
    /// [`DocumentReader`] to bind without holding the parsed document.
    pub fn from_str<T: Typed>(&self, text: &str) -> Result<T, BindError> {
        let value: Value = serde_json::from_str(text).map_err(DocumentError::from)?;
        self.from_value(value)
    }
}

impl Default for Jsonb {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Jsonb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Jsonb")
            .field("engine", &self.engine())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use chrono::NaiveDate;

    use super::Jsonb;
    use crate::Bindable;
    use crate::binding::{Adapter, Serializer, SerializerBinding};
    use crate::config::{BindConfig, OrderStrategy};
    use crate::derive::Bindable;
    use crate::document::DocumentWriter;
    use crate::error::{BindError, BoxError, CreatorInvocationError};
    use crate::naming::NamingStrategy;
    use crate::polymorphism::{TypeInheritance, TypeMapping};
    use crate::ser::SerializationContext;

    #[derive(Debug, Default, PartialEq, Bindable)]
    #[bind(default)]
    struct Simple {
        pub value: u8,
    }

    #[test]
    fn accessors_and_naming() {
        #[derive(Default, Bindable)]
        #[bind(default)]
        struct Holder {
            #[bind(get = Self::str_field, set = Self::set_str_field)]
            str_field: String,
        }

        impl Holder {
            fn str_field(&self) -> String {
                self.str_field.clone()
            }

            fn set_str_field(&mut self, value: String) {
                self.str_field = value;
            }
        }

        let jsonb = Jsonb::with_config(BindConfig::new().with_naming(NamingStrategy::LowerCamelCase));
        let holder = Holder {
            str_field: "abc".into(),
        };
        assert_eq!(jsonb.to_string(&holder).unwrap(), r#"{"strField":"abc"}"#);

        let back: Holder = jsonb.from_str(r#"{"strField":"xyz"}"#).unwrap();
        assert_eq!(back.str_field, "xyz");
    }

    #[test]
    fn explicit_order_comes_first() {
        #[derive(Default, Bindable)]
        #[bind(default, order(first, second))]
        struct Ordered {
            pub first: u8,
            pub second: u8,
            pub third: u8,
            pub alpha: u8,
        }

        let value = Ordered {
            first: 1,
            second: 2,
            third: 3,
            alpha: 4,
        };

        let reverse = Jsonb::with_config(BindConfig::new().with_order(OrderStrategy::Reverse));
        assert_eq!(
            reverse.to_string(&value).unwrap(),
            r#"{"first":1,"second":2,"third":3,"alpha":4}"#
        );

        let lexicographical = Jsonb::with_config(BindConfig::new().with_order(OrderStrategy::Lexicographical));
        assert_eq!(
            lexicographical.to_string(&value).unwrap(),
            r#"{"first":1,"second":2,"alpha":4,"third":3}"#
        );
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Bindable)]
    enum Color {
        Red,
        #[bind(name = "dark-blue")]
        Blue,
    }

    #[test]
    fn nested_round_trip() {
        #[derive(Debug, Default, PartialEq, Bindable)]
        #[bind(default)]
        struct Palette {
            pub name: String,
            pub colors: Vec<Color>,
            pub weights: BTreeMap<Color, f64>,
            pub note: Option<String>,
            pub inner: Simple,
        }

        let palette = Palette {
            name: "sea".into(),
            colors: vec![Color::Red, Color::Blue],
            weights: BTreeMap::from([(Color::Red, 0.5), (Color::Blue, 1.5)]),
            note: None,
            inner: Simple { value: 9 },
        };

        let jsonb = Jsonb::new();
        let text = jsonb.to_string(&palette).unwrap();
        assert_eq!(
            text,
            r#"{"name":"sea","colors":["Red","dark-blue"],"weights":{"Red":0.5,"dark-blue":1.5},"inner":{"value":9}}"#
        );

        let back: Palette = jsonb.from_str(&text).unwrap();
        assert_eq!(back, palette);

        let value = jsonb.to_value(&palette).unwrap();
        assert_eq!(value["colors"][1], "dark-blue");
        assert_eq!(jsonb.from_value::<Palette>(value).unwrap(), palette);
    }

    #[test]
    fn unknown_properties() {
        let text = r#"{"value":1,"extra":{"a":[1,2]}}"#;

        let lenient = Jsonb::new();
        assert_eq!(lenient.from_str::<Simple>(text).unwrap(), Simple { value: 1 });

        let strict = Jsonb::with_config(BindConfig::new().with_fail_on_unknown_properties(true));
        let err = strict.from_str::<Simple>(text).unwrap_err();
        assert!(matches!(err, BindError::UnknownProperty { ref key, .. } if key == "extra"));
    }

    #[test]
    fn nulls_and_nillable() {
        #[derive(Bindable)]
        #[bind(default)]
        struct Sparse {
            pub a: Option<u8>,
            #[bind(nillable)]
            pub b: Option<u8>,
            pub count: u8,
        }

        impl Default for Sparse {
            fn default() -> Self {
                Self {
                    a: Some(1),
                    b: None,
                    count: 7,
                }
            }
        }

        let jsonb = Jsonb::new();
        let sparse = Sparse {
            a: None,
            b: None,
            count: 0,
        };
        assert_eq!(jsonb.to_string(&sparse).unwrap(), r#"{"b":null,"count":0}"#);

        let back: Sparse = jsonb.from_str(r#"{"a":null,"b":5,"count":null}"#).unwrap();
        assert_eq!(back.a, None);
        assert_eq!(back.b, Some(5));
        // A null leaves a non-optional property untouched.
        assert_eq!(back.count, 7);

        let everywhere = Jsonb::with_config(BindConfig::new().with_nillable_by_default(true));
        assert_eq!(
            everywhere.to_string(&sparse).unwrap(),
            r#"{"a":null,"b":null,"count":0}"#
        );
    }

    #[derive(Debug, PartialEq, Bindable)]
    enum Currency {
        Eur,
        Usd,
    }

    #[derive(Debug, PartialEq, Bindable)]
    #[bind(creator = Self::new)]
    struct Money {
        #[bind(param)]
        pub amount: u32,
        #[bind(param = "cur", name = "cur")]
        pub currency: Currency,
        pub note: String,
    }

    impl Money {
        fn new(amount: u32, currency: Currency) -> Self {
            Self {
                amount,
                currency,
                note: String::new(),
            }
        }
    }

    #[test]
    fn creator_arguments() {
        let jsonb = Jsonb::new();

        let money: Money = jsonb
            .from_str(r#"{"note":"fee","cur":"Eur","amount":5}"#)
            .unwrap();
        assert_eq!(
            money,
            Money {
                amount: 5,
                currency: Currency::Eur,
                note: "fee".into(),
            }
        );

        // A missing scalar argument takes its absent value.
        let money: Money = jsonb.from_str(r#"{"cur":"Usd"}"#).unwrap();
        assert_eq!(money.amount, 0);

        let err = jsonb.from_str::<Money>(r#"{"amount":1}"#).unwrap_err();
        assert!(matches!(
            err.root_cause(),
            BindError::CreatorInvocation(CreatorInvocationError::MissingParameter { name, .. }) if name == "cur"
        ));

        let required = Jsonb::with_config(BindConfig::new().with_creator_parameters_required(true));
        let err = required.from_str::<Money>(r#"{"cur":"Usd"}"#).unwrap_err();
        assert!(matches!(
            err.root_cause(),
            BindError::CreatorInvocation(CreatorInvocationError::MissingParameter { name, .. }) if name == "amount"
        ));
    }

    #[test]
    fn fallible_creator() {
        #[derive(Debug, Bindable)]
        #[bind(creator(with = Percent::parse, fallible))]
        struct Percent {
            #[bind(param)]
            pub value: u8,
        }

        impl Percent {
            fn parse(value: u8) -> Result<Self, String> {
                if value <= 100 {
                    Ok(Self { value })
                } else {
                    Err(format!("{value} is over 100"))
                }
            }
        }

        let jsonb = Jsonb::new();
        assert_eq!(jsonb.from_str::<Percent>(r#"{"value":40}"#).unwrap().value, 40);

        let err = jsonb.from_str::<Percent>(r#"{"value":140}"#).unwrap_err();
        assert!(matches!(
            err.root_cause(),
            BindError::CreatorInvocation(CreatorInvocationError::Failed { .. })
        ));
    }

    #[derive(Default)]
    struct CentsAdapter;

    impl Adapter for CentsAdapter {
        type Original = u64;
        type Adapted = String;

        fn adapt_to(&self, cents: &u64) -> Result<String, BoxError> {
            Ok(format!("{}.{:02}", cents / 100, cents % 100))
        }

        fn adapt_from(&self, text: String) -> Result<u64, BoxError> {
            let (units, cents) = text.split_once('.').ok_or("missing decimal point")?;
            Ok(units.parse::<u64>()? * 100 + cents.parse::<u64>()?)
        }
    }

    #[test]
    fn property_adapter() {
        #[derive(Debug, Default, PartialEq, Bindable)]
        #[bind(default)]
        struct Price {
            #[bind(adapter = CentsAdapter)]
            pub cents: u64,
        }

        let jsonb = Jsonb::new();
        assert_eq!(jsonb.to_string(&Price { cents: 1234 }).unwrap(), r#"{"cents":"12.34"}"#);
        assert_eq!(jsonb.from_str::<Price>(r#"{"cents":"3.05"}"#).unwrap(), Price { cents: 305 });

        let err = jsonb.from_str::<Price>(r#"{"cents":"12"}"#).unwrap_err();
        assert!(matches!(err.root_cause(), BindError::Adapter { .. }));
        assert_eq!(err.property_path().len(), 1);
    }

    #[derive(Default, Bindable)]
    #[bind(default)]
    struct Pair {
        pub left: u8,
        pub right: String,
    }

    #[derive(Default)]
    struct PairSerializer;

    impl Serializer for PairSerializer {
        type Value = Pair;

        fn serialize(
            &self,
            value: &Pair,
            writer: &mut dyn DocumentWriter,
            ctx: &mut SerializationContext<'_>,
        ) -> Result<(), BindError> {
            writer.write_start_array()?;
            ctx.serialize(&value.left, writer)?;
            ctx.serialize(&value.right, writer)?;
            writer.write_end()?;
            Ok(())
        }
    }

    #[derive(Default)]
    struct LoopSerializer;

    impl Serializer for LoopSerializer {
        type Value = Pair;

        fn serialize(
            &self,
            value: &Pair,
            writer: &mut dyn DocumentWriter,
            ctx: &mut SerializationContext<'_>,
        ) -> Result<(), BindError> {
            ctx.serialize(value, writer)
        }
    }

    #[test]
    fn custom_serializers() {
        #[derive(Default, Bindable)]
        #[bind(default)]
        struct Holder {
            #[bind(serializer = PairSerializer)]
            pub pair: Pair,
        }

        let holder = Holder {
            pair: Pair {
                left: 1,
                right: "x".into(),
            },
        };
        // `left` shares the address of `pair`, but not its type.
        let jsonb = Jsonb::new();
        assert_eq!(jsonb.to_string(&holder).unwrap(), r#"{"pair":[1,"x"]}"#);

        let looping = Jsonb::with_config(BindConfig::new().with_serializer(SerializerBinding::of::<LoopSerializer>()));
        let err = looping.to_string(&Pair::default()).unwrap_err();
        assert!(matches!(err.root_cause(), BindError::RecursiveReference(_)));
    }

    #[test]
    fn dynamic_values() {
        #[derive(Default, Bindable)]
        #[bind(default)]
        struct Bag {
            pub items: Vec<Box<dyn Bindable>>,
        }

        let items: Vec<Box<dyn Bindable>> = vec![
            Box::new(1_i32),
            Box::new(String::from("x")),
            Box::new(Simple { value: 2 }),
        ];
        let bag = Bag { items };
        let jsonb = Jsonb::new();
        let text = jsonb.to_string(&bag).unwrap();
        assert_eq!(text, r#"{"items":[1,"x",{"value":2}]}"#);

        let back: Bag = jsonb.from_str(&text).unwrap();
        assert_eq!(back.items.len(), 3);
        assert_eq!((*back.items[0]).downcast_ref::<i64>(), Some(&1));
        assert_eq!(
            (*back.items[1]).downcast_ref::<String>().map(String::as_str),
            Some("x")
        );
        let object = (*back.items[2])
            .downcast_ref::<BTreeMap<String, Box<dyn Bindable>>>()
            .unwrap();
        assert_eq!((*object["value"]).downcast_ref::<i64>(), Some(&2));
    }

    #[test]
    fn scalar_supertype() {
        #[derive(Default, Bindable)]
        #[bind(default)]
        struct Meters {
            #[bind(extends)]
            value: f64,
        }

        #[derive(Default, Bindable)]
        #[bind(default)]
        struct Trip {
            pub distance: Meters,
        }

        let jsonb = Jsonb::new();
        let trip = Trip {
            distance: Meters { value: 2.5 },
        };
        assert_eq!(jsonb.to_string(&trip).unwrap(), r#"{"distance":2.5}"#);
        assert_eq!(jsonb.from_str::<Trip>(r#"{"distance":4.0}"#).unwrap().distance.value, 4.0);
    }

    #[test]
    fn generic_properties() {
        #[derive(Default, Bindable)]
        #[bind(default)]
        struct Envelope<T> {
            pub body: T,
            pub id: u32,
        }

        let jsonb = Jsonb::new();
        let envelope = Envelope {
            body: Simple { value: 3 },
            id: 1,
        };
        assert_eq!(jsonb.to_string(&envelope).unwrap(), r#"{"body":{"value":3},"id":1}"#);

        let back: Envelope<String> = jsonb.from_str(r#"{"body":"hi","id":2}"#).unwrap();
        assert_eq!(back.body, "hi");
        assert_eq!(back.id, 2);
    }

    #[test]
    fn generic_property_customization() {
        #[derive(Debug, Default, PartialEq, Bindable)]
        #[bind(default)]
        struct Stamp<T> {
            #[bind(date_format = "%d.%m.%Y")]
            pub when: T,
        }

        #[derive(Default, Bindable)]
        #[bind(default)]
        struct Holder<T> {
            #[bind(serializer = PairSerializer)]
            pub item: T,
        }

        let jsonb = Jsonb::new();
        let stamp = Stamp {
            when: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        };
        let text = jsonb.to_string(&stamp).unwrap();
        assert_eq!(text, r#"{"when":"29.02.2024"}"#);
        assert_eq!(jsonb.from_str::<Stamp<NaiveDate>>(&text).unwrap(), stamp);

        let holder = Holder {
            item: Pair {
                left: 1,
                right: "x".into(),
            },
        };
        assert_eq!(jsonb.to_string(&holder).unwrap(), r#"{"item":[1,"x"]}"#);
        // Values the binding does not target keep their default strategy.
        assert_eq!(jsonb.to_string(&Holder { item: 5_u8 }).unwrap(), r#"{"item":5}"#);
    }

    #[test]
    fn recursive_boxes() {
        #[derive(Debug, Default, PartialEq, Bindable)]
        #[bind(default)]
        struct Node {
            pub value: u8,
            pub next: Option<Box<Node>>,
        }

        let jsonb = Jsonb::new();
        let list = Node {
            value: 1,
            next: Some(Box::new(Node {
                value: 2,
                next: None,
            })),
        };
        let text = jsonb.to_string(&list).unwrap();
        assert_eq!(text, r#"{"value":1,"next":{"value":2}}"#);
        assert_eq!(jsonb.from_str::<Node>(&text).unwrap(), list);
    }

    #[derive(Debug, Default, PartialEq, Bindable)]
    #[bind(default)]
    struct Dog {
        pub name: String,
    }

    #[derive(Debug, Default, PartialEq, Bindable)]
    #[bind(default)]
    struct Cat {
        pub lives: u8,
    }

    #[derive(Default, Bindable)]
    #[bind(default)]
    struct Zoo {
        pub animals: Vec<Box<dyn Bindable>>,
    }

    fn animals() -> TypeInheritance {
        TypeInheritance::new("@type")
            .with_subtype::<Dog>("dog")
            .with_subtype::<Cat>("cat")
    }

    #[test]
    fn polymorphic_slots() {
        let jsonb = Jsonb::with_config(BindConfig::new().with_type_inheritance(animals()));
        let zoo = Zoo {
            animals: vec![
                Box::new(Dog { name: "rex".into() }),
                Box::new(Cat { lives: 9 }),
                Box::new(Simple { value: 1 }),
            ],
        };
        let text = jsonb.to_string(&zoo).unwrap();
        assert_eq!(
            text,
            r#"{"animals":[{"@type":"dog","name":"rex"},{"@type":"cat","lives":9},{"value":1}]}"#
        );

        let back: Zoo = jsonb.from_str(&text).unwrap();
        assert_eq!((*back.animals[0]).downcast_ref::<Dog>(), Some(&Dog { name: "rex".into() }));
        assert_eq!((*back.animals[1]).downcast_ref::<Cat>(), Some(&Cat { lives: 9 }));
        assert!((*back.animals[2]).is::<BTreeMap<String, Box<dyn Bindable>>>());

        // The type key may follow the properties.
        let any: Box<dyn Bindable> = jsonb.from_str(r#"{"lives":3,"@type":"cat"}"#).unwrap();
        assert_eq!((*any).downcast_ref::<Cat>(), Some(&Cat { lives: 3 }));

        let err = jsonb.from_str::<Box<dyn Bindable>>(r#"{"@type":"cow"}"#).unwrap_err();
        assert!(matches!(err.root_cause(), BindError::UnknownAlias { alias, .. } if alias == "cow"));
    }

    #[test]
    fn declared_subtypes_skip_their_type_key() {
        let config = BindConfig::new()
            .with_type_inheritance(animals())
            .with_fail_on_unknown_properties(true);
        let jsonb = Jsonb::with_config(config);

        let dog: Dog = jsonb.from_str(r#"{"@type":"dog","name":"max"}"#).unwrap();
        assert_eq!(dog.name, "max");
        assert!(jsonb.from_str::<Simple>(r#"{"@type":"dog","value":1}"#).is_err());
    }

    #[test]
    fn mapped_declared_type() {
        let mapping = TypeMapping::new::<Box<dyn Bindable>, Simple>(|simple| Box::new(simple) as Box<dyn Bindable>);
        let jsonb = Jsonb::with_config(BindConfig::new().with_type_mapping(mapping));

        let zoo: Zoo = jsonb.from_str(r#"{"animals":[{"value":4}]}"#).unwrap();
        assert_eq!((*zoo.animals[0]).downcast_ref::<Simple>(), Some(&Simple { value: 4 }));
        assert_eq!(jsonb.to_string(&zoo).unwrap(), r#"{"animals":[{"value":4}]}"#);

        assert!(jsonb.from_str::<Zoo>(r#"{"animals":["four"]}"#).is_err());
    }

    #[test]
    fn eager_types_resolve_with_the_binder() {
        let jsonb = Jsonb::with_config(BindConfig::new().with_eager_type::<Simple>());
        let engine = jsonb.engine();
        assert_eq!(engine.registry().len(), 1);
        assert_eq!(engine.cached_strategies(), 1);
    }

    #[test]
    fn reconfigure_drops_caches() {
        let jsonb = Jsonb::new();
        assert_eq!(jsonb.to_string(&Simple { value: 1 }).unwrap(), r#"{"value":1}"#);
        assert_eq!(jsonb.engine().registry().len(), 1);

        jsonb.reconfigure(BindConfig::new().with_naming(NamingStrategy::UpperCamelCase));
        assert_eq!(jsonb.engine().registry().len(), 0);
        assert_eq!(jsonb.to_string(&Simple { value: 1 }).unwrap(), r#"{"Value":1}"#);
    }

    #[test]
    fn pretty_output() {
        let jsonb = Jsonb::with_config(BindConfig::new().with_formatting(true));
        let text = jsonb.to_string(&Simple { value: 1 }).unwrap();
        assert!(text.contains('\n'));
        assert_eq!(jsonb.from_str::<Simple>(&text).unwrap().value, 1);
        assert_eq!(text.replace([' ', '\n'], ""), r#"{"value":1}"#);
    }
}
