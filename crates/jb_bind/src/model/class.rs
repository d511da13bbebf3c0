use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use jb_utils::hash::HashMap;

use crate::customization::ClassCustomization;
use crate::info::{ClassInfo, Type};
use crate::model::{CreatorModel, PropertyModel};

/// Binding metadata of one class.
///
/// The ordered property list and the identity index always hold the same
/// set of properties.
pub struct ClassModel {
    pub(crate) info: &'static ClassInfo,
    pub(crate) customization: ClassCustomization,
    pub(crate) properties: Vec<Arc<PropertyModel>>,
    pub(crate) by_identity: HashMap<&'static str, usize>,
    pub(crate) creator: Option<CreatorModel>,
    pub(crate) parent: Option<Arc<ClassModel>>,
    pub(crate) case_insensitive: bool,
}

impl ClassModel {
    #[inline]
    pub fn ty(&self) -> &Type {
        self.info.ty()
    }

    #[inline]
    pub fn info(&self) -> &'static ClassInfo {
        self.info
    }

    #[inline]
    pub fn customization(&self) -> &ClassCustomization {
        &self.customization
    }

    /// Properties in serialization order; inherited ones come first.
    #[inline]
    pub fn properties(&self) -> &[Arc<PropertyModel>] {
        &self.properties
    }

    #[inline]
    pub fn creator(&self) -> Option<&CreatorModel> {
        self.creator.as_ref()
    }

    /// The model of the embedded supertype.
    #[inline]
    pub fn parent(&self) -> Option<&Arc<ClassModel>> {
        self.parent.as_ref()
    }

    /// Property by its identity name.
    pub fn property(&self, identity: &str) -> Option<&Arc<PropertyModel>> {
        self.by_identity
            .get(identity)
            .map(|&index| &self.properties[index])
    }

    /// Property whose read name matches a document key.
    ///
    /// The identity index is tried first and accepted only if the property
    /// was not renamed. Otherwise every property is scanned, first match
    /// wins. Names compare case-insensitively under a case-insensitive
    /// naming strategy.
    pub fn find_by_read_name(&self, key: &str) -> Option<&Arc<PropertyModel>> {
        if let Some(property) = self.property(key)
            && property.read_name() == Some(key)
        {
            return Some(property);
        }
        self.properties.iter().find(|property| {
            property
                .read_name()
                .is_some_and(|name| self.names_match(name, key))
        })
    }

    fn names_match(&self, name: &str, key: &str) -> bool {
        if self.case_insensitive {
            name.chars()
                .flat_map(char::to_lowercase)
                .eq(key.chars().flat_map(char::to_lowercase))
        } else {
            name == key
        }
    }
}

impl fmt::Debug for ClassModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassModel")
            .field("ty", self.ty())
            .field("customization", &self.customization)
            .field("properties", &self.properties)
            .field("creator", &self.creator)
            .field("parent", &self.parent.as_ref().map(|p| *p.ty()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::sync::Arc;

    use super::ClassModel;
    use crate::config::BindConfig;
    use crate::derive::Bindable;
    use crate::info::Typed;
    use crate::naming::NamingStrategy;
    use crate::registry::ClassModelRegistry;

    #[derive(Default, Bindable)]
    #[bind(default)]
    struct Account {
        pub owner_id: u32,
        #[bind(name = "label")]
        pub title: String,
    }

    fn model(config: BindConfig) -> Arc<ClassModel> {
        let registry = ClassModelRegistry::new(Arc::new(config));
        registry
            .get_or_build(Account::type_info().as_class().unwrap())
            .unwrap()
    }

    #[test]
    fn lookup_by_read_name() {
        let model = model(BindConfig::new());
        let identity = |key| model.find_by_read_name(key).map(|p| p.identity());

        assert_eq!(identity("owner_id"), Some("owner_id"));
        assert_eq!(identity("label"), Some("title"));
        // A renamed property is not reachable by its identity name.
        assert_eq!(identity("title"), None);
        assert_eq!(identity("OWNER_ID"), None);
    }

    #[test]
    fn case_insensitive_lookup() {
        let model = model(BindConfig::new().with_naming(NamingStrategy::CaseInsensitive));
        let identity = |key| model.find_by_read_name(key).map(|p| p.identity());

        assert_eq!(identity("Owner_Id"), Some("owner_id"));
        assert_eq!(identity("LABEL"), Some("title"));
        assert_eq!(identity("labels"), None);
    }
}
