//! Engine configuration.
//!
//! [`BindConfig`] is built once and handed to [`Jsonb`](crate::Jsonb).
//! Reconfiguring a binder builds fresh caches, cached models are never
//! patched in place.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use jb_utils::TypeIdMap;
use serde::Deserialize;

use crate::binding::{AdapterBinding, DeserializerBinding, SerializerBinding};
use crate::format::{DateFormatter, FormatError, NumberFormatter};
use crate::info::{TypeInfo, Typed};
use crate::naming::NamingStrategy;
use crate::polymorphism::{TypeInheritance, TypeMapping};
use crate::visibility::VisibilityPolicy;

// -----------------------------------------------------------------------------
// OrderStrategy

/// Ordering applied to the properties not named by an explicit order list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStrategy {
    /// Declaration order.
    #[default]
    AsDeclared,
    /// Ascending by write name.
    Lexicographical,
    /// Descending by write name.
    Reverse,
    /// No particular order; declaration order in practice.
    Any,
}

// -----------------------------------------------------------------------------
// ModuleCustomization

/// Defaults shared by every class declared under a module path.
#[derive(Clone, Default)]
pub struct ModuleCustomization {
    pub nillable: Option<bool>,
    pub date_format: Option<DateFormatter>,
    pub number_format: Option<NumberFormatter>,
    pub visibility: Option<Arc<dyn VisibilityPolicy>>,
}

impl ModuleCustomization {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nillable(mut self, nillable: bool) -> Self {
        self.nillable = Some(nillable);
        self
    }

    pub fn with_date_formatter(mut self, formatter: DateFormatter) -> Self {
        self.date_format = Some(formatter);
        self
    }

    pub fn with_number_formatter(mut self, formatter: NumberFormatter) -> Self {
        self.number_format = Some(formatter);
        self
    }

    pub fn with_visibility(mut self, policy: impl VisibilityPolicy + 'static) -> Self {
        self.visibility = Some(Arc::new(policy));
        self
    }
}

impl fmt::Debug for ModuleCustomization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleCustomization")
            .field("nillable", &self.nillable)
            .field("date_format", &self.date_format)
            .field("number_format", &self.number_format)
            .field("visibility", &self.visibility.is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// BindConfig

/// Options of a binder.
///
/// # Examples
///
/// ```
/// use jb_bind::config::{BindConfig, OrderStrategy};
/// use jb_bind::naming::NamingStrategy;
///
/// let config = BindConfig::new()
///     .with_naming(NamingStrategy::LowerCaseWithUnderscores)
///     .with_order(OrderStrategy::Lexicographical)
///     .with_fail_on_unknown_properties(true);
///
/// assert_eq!(config.order(), OrderStrategy::Lexicographical);
/// assert!(config.fail_on_unknown_properties());
/// ```
#[derive(Clone, Default)]
pub struct BindConfig {
    naming: NamingStrategy,
    order: OrderStrategy,
    visibility: Option<Arc<dyn VisibilityPolicy>>,
    fail_on_unknown_properties: bool,
    creator_parameters_required: bool,
    nillable_by_default: bool,
    formatting: bool,
    date_format: Option<DateFormatter>,
    number_format: Option<NumberFormatter>,
    modules: Vec<(String, ModuleCustomization)>,
    adapters: TypeIdMap<AdapterBinding>,
    serializers: TypeIdMap<SerializerBinding>,
    deserializers: TypeIdMap<DeserializerBinding>,
    inheritances: Vec<TypeInheritance>,
    mappings: TypeIdMap<TypeMapping>,
    eager: Vec<fn() -> &'static TypeInfo>,
}

impl BindConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_naming(mut self, naming: NamingStrategy) -> Self {
        self.naming = naming;
        self
    }

    pub fn with_order(mut self, order: OrderStrategy) -> Self {
        self.order = order;
        self
    }

    /// Replaces the default visibility rule for every class that does not
    /// declare its own policy.
    pub fn with_visibility(mut self, policy: impl VisibilityPolicy + 'static) -> Self {
        self.visibility = Some(Arc::new(policy));
        self
    }

    pub fn with_fail_on_unknown_properties(mut self, fail: bool) -> Self {
        self.fail_on_unknown_properties = fail;
        self
    }

    /// Creator parameters missing from a document become errors instead
    /// of absent values.
    pub fn with_creator_parameters_required(mut self, required: bool) -> Self {
        self.creator_parameters_required = required;
        self
    }

    /// Whether null properties are written as `null` instead of skipped.
    pub fn with_nillable_by_default(mut self, nillable: bool) -> Self {
        self.nillable_by_default = nillable;
        self
    }

    /// Pretty-printed text output.
    pub fn with_formatting(mut self, formatting: bool) -> Self {
        self.formatting = formatting;
        self
    }

    pub fn with_date_formatter(mut self, formatter: DateFormatter) -> Self {
        self.date_format = Some(formatter);
        self
    }

    pub fn with_number_formatter(mut self, formatter: NumberFormatter) -> Self {
        self.number_format = Some(formatter);
        self
    }

    /// Customizes every class whose module path is `prefix` or below it.
    ///
    /// The longest matching prefix wins.
    pub fn with_module(mut self, prefix: impl Into<String>, module: ModuleCustomization) -> Self {
        let prefix = prefix.into();
        self.modules.retain(|(p, _)| *p != prefix);
        self.modules.push((prefix, module));
        self
    }

    /// Adapts every property whose type is the adapter's original type.
    pub fn with_adapter(mut self, adapter: AdapterBinding) -> Self {
        self.adapters.insert(adapter.original().id(), adapter);
        self
    }

    pub fn with_serializer(mut self, serializer: SerializerBinding) -> Self {
        self.serializers.insert(serializer.ty().id(), serializer);
        self
    }

    pub fn with_deserializer(mut self, deserializer: DeserializerBinding) -> Self {
        self.deserializers.insert(deserializer.ty().id(), deserializer);
        self
    }

    /// Writes the alias of every listed class under the inheritance key and
    /// decodes open value slots by that alias.
    ///
    /// An inheritance with the key of an earlier one replaces it.
    pub fn with_type_inheritance(mut self, inheritance: TypeInheritance) -> Self {
        self.inheritances.retain(|i| i.key() != inheritance.key());
        self.inheritances.push(inheritance);
        self
    }

    pub fn with_type_mapping(mut self, mapping: TypeMapping) -> Self {
        self.mappings.insert(mapping.declared().id(), mapping);
        self
    }

    /// Resolves `T` when the binder is created instead of on first use.
    pub fn with_eager_type<T: Typed>(mut self) -> Self {
        self.eager.push(T::type_info);
        self
    }

    #[inline]
    pub fn naming(&self) -> &NamingStrategy {
        &self.naming
    }

    #[inline]
    pub fn order(&self) -> OrderStrategy {
        self.order
    }

    #[inline]
    pub fn visibility(&self) -> Option<&Arc<dyn VisibilityPolicy>> {
        self.visibility.as_ref()
    }

    #[inline]
    pub fn fail_on_unknown_properties(&self) -> bool {
        self.fail_on_unknown_properties
    }

    #[inline]
    pub fn creator_parameters_required(&self) -> bool {
        self.creator_parameters_required
    }

    #[inline]
    pub fn nillable_by_default(&self) -> bool {
        self.nillable_by_default
    }

    #[inline]
    pub fn formatting(&self) -> bool {
        self.formatting
    }

    #[inline]
    pub fn date_formatter(&self) -> Option<&DateFormatter> {
        self.date_format.as_ref()
    }

    #[inline]
    pub fn number_formatter(&self) -> Option<&NumberFormatter> {
        self.number_format.as_ref()
    }

    /// The customization of the most specific module enclosing `module_path`.
    pub fn module(&self, module_path: &str) -> Option<&ModuleCustomization> {
        self.modules
            .iter()
            .filter(|(prefix, _)| {
                module_path
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
            })
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, module)| module)
    }

    pub fn adapter(&self, ty: TypeId) -> Option<&AdapterBinding> {
        self.adapters.get(&ty)
    }

    pub fn serializer(&self, ty: TypeId) -> Option<&SerializerBinding> {
        self.serializers.get(&ty)
    }

    pub fn deserializer(&self, ty: TypeId) -> Option<&DeserializerBinding> {
        self.deserializers.get(&ty)
    }

    #[inline]
    pub fn type_inheritances(&self) -> &[TypeInheritance] {
        &self.inheritances
    }

    /// The inheritance whose discriminator is `key`.
    pub fn type_inheritance(&self, key: &str) -> Option<&TypeInheritance> {
        self.inheritances.iter().find(|i| i.key() == key)
    }

    /// The discriminator key and alias of the class `ty`.
    pub fn type_alias(&self, ty: TypeId) -> Option<(&str, &str)> {
        self.inheritances
            .iter()
            .find_map(|i| i.alias_of(ty).map(|alias| (i.key(), alias)))
    }

    pub fn type_mapping(&self, ty: TypeId) -> Option<&TypeMapping> {
        self.mappings.get(&ty)
    }

    pub(crate) fn eager_types(&self) -> impl Iterator<Item = &'static TypeInfo> + '_ {
        self.eager.iter().map(|info| info())
    }
}

impl fmt::Debug for BindConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindConfig")
            .field("naming", &self.naming)
            .field("order", &self.order)
            .field("visibility", &self.visibility.is_some())
            .field("fail_on_unknown_properties", &self.fail_on_unknown_properties)
            .field("creator_parameters_required", &self.creator_parameters_required)
            .field("nillable_by_default", &self.nillable_by_default)
            .field("formatting", &self.formatting)
            .field("date_format", &self.date_format)
            .field("number_format", &self.number_format)
            .field("modules", &self.modules)
            .field("adapters", &self.adapters.len())
            .field("serializers", &self.serializers.len())
            .field("deserializers", &self.deserializers.len())
            .field("inheritances", &self.inheritances)
            .field("mappings", &self.mappings.len())
            .field("eager", &self.eager.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ConfigOptions

/// The plain options of a [`BindConfig`] in a form any serde format can load.
///
/// # Examples
///
/// ```
/// use jb_bind::config::{BindConfig, ConfigOptions};
///
/// let options: ConfigOptions = serde_json::from_str(
///     r#"{ "naming_strategy": "LOWER_CASE_WITH_DASHES", "date_format": "%d.%m.%Y" }"#,
/// )
/// .unwrap();
///
/// let config = BindConfig::try_from(options).unwrap();
/// assert_eq!(config.naming().translate("fooBar"), "foo-bar");
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOptions {
    pub naming_strategy: Option<NamingStrategy>,
    pub order_strategy: Option<OrderStrategy>,
    pub fail_on_unknown_properties: Option<bool>,
    pub creator_parameters_required: Option<bool>,
    pub nillable_by_default: Option<bool>,
    pub formatting: Option<bool>,
    pub date_format: Option<String>,
    pub number_format: Option<String>,
}

impl ConfigOptions {
    /// Applies the options present on top of `config`.
    pub fn apply(self, mut config: BindConfig) -> Result<BindConfig, FormatError> {
        if let Some(naming) = self.naming_strategy {
            config.naming = naming;
        }
        if let Some(order) = self.order_strategy {
            config.order = order;
        }
        if let Some(fail) = self.fail_on_unknown_properties {
            config.fail_on_unknown_properties = fail;
        }
        if let Some(required) = self.creator_parameters_required {
            config.creator_parameters_required = required;
        }
        if let Some(nillable) = self.nillable_by_default {
            config.nillable_by_default = nillable;
        }
        if let Some(formatting) = self.formatting {
            config.formatting = formatting;
        }
        if let Some(pattern) = self.date_format {
            config.date_format = Some(DateFormatter::new(&pattern)?);
        }
        if let Some(pattern) = self.number_format {
            config.number_format = Some(NumberFormatter::new(&pattern)?);
        }
        Ok(config)
    }
}

impl TryFrom<ConfigOptions> for BindConfig {
    type Error = FormatError;

    fn try_from(options: ConfigOptions) -> Result<Self, Self::Error> {
        options.apply(BindConfig::new())
    }
}

#[cfg(test)]
mod tests {
    use super::{BindConfig, ConfigOptions, ModuleCustomization, OrderStrategy};
    use crate::naming::NamingStrategy;

    #[test]
    fn module_longest_prefix() {
        let config = BindConfig::new()
            .with_module("app", ModuleCustomization::new().with_nillable(false))
            .with_module("app::model", ModuleCustomization::new().with_nillable(true));

        let nillable = |path| config.module(path).and_then(|m| m.nillable);
        assert_eq!(nillable("app::model::user"), Some(true));
        assert_eq!(nillable("app::model"), Some(true));
        assert_eq!(nillable("app::modeling"), Some(false));
        assert_eq!(nillable("application"), None);
    }

    #[test]
    fn options_from_ron() {
        let options: ConfigOptions = ron::from_str(
            r##"(
                naming_strategy: Some(UPPER_CAMEL_CASE),
                order_strategy: Some(REVERSE),
                nillable_by_default: Some(true),
                number_format: Some("#,##0.00"),
            )"##,
        )
        .unwrap();

        let config = BindConfig::try_from(options).unwrap();
        assert!(matches!(config.naming(), NamingStrategy::UpperCamelCase));
        assert_eq!(config.order(), OrderStrategy::Reverse);
        assert!(config.nillable_by_default());
        assert_eq!(config.number_formatter().unwrap().pattern(), "#,##0.00");
    }

    #[test]
    fn options_reject_bad_input() {
        assert!(serde_json::from_str::<ConfigOptions>(r#"{"unknown": 1}"#).is_err());

        let options: ConfigOptions = serde_json::from_str(r#"{"date_format": "%!"}"#).unwrap();
        assert!(BindConfig::try_from(options).is_err());
    }
}
