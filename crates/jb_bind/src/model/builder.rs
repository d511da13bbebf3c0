use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::sync::OnceLock;

use jb_utils::hash::{HashMap, HashSet};

use crate::access::PropertyAccessor;
use crate::config::BindConfig;
use crate::customization::{ClassCustomization, PropertySites};
use crate::customization::{resolve_class, resolve_property};
use crate::error::ConfigurationError;
use crate::format::{DateFormatter, Formats, NumberFormatter};
use crate::info::{ClassInfo, CreatorInfo, InterfaceInfo, MemberInfo, MemberKind};
use crate::model::ordering::order_properties;
use crate::model::{ClassModel, CreatorModel, CreatorParam, PropertyModel, ValueSite};
use crate::visibility::VisibilityResolver;

// -----------------------------------------------------------------------------
// Discovery

type Candidates = Vec<(&'static str, PropertySites<'static>)>;

/// Fills the role of `member` unless an earlier declaration holds it.
fn add_member(candidates: &mut Candidates, member: &'static MemberInfo) {
    let index = match candidates
        .iter()
        .position(|(identity, _)| *identity == member.property())
    {
        Some(index) => index,
        None => {
            candidates.push((member.property(), PropertySites::default()));
            candidates.len() - 1
        }
    };
    let sites = &mut candidates[index].1;
    let slot = match member.kind() {
        MemberKind::Field => &mut sites.field,
        MemberKind::Getter => &mut sites.getter,
        MemberKind::Setter => &mut sites.setter,
    };
    slot.get_or_insert(member);
}

/// Class members first, then interfaces breadth-first, so a nearer
/// declaration wins over one further up the interface hierarchy.
fn discover(info: &'static ClassInfo) -> Candidates {
    let mut candidates = Candidates::new();
    for member in info.members() {
        add_member(&mut candidates, member);
    }
    let mut queue: VecDeque<&'static InterfaceInfo> = info.interfaces().iter().collect();
    while let Some(interface) = queue.pop_front() {
        for member in interface.members() {
            add_member(&mut candidates, member);
        }
        queue.extend(interface.extends());
    }
    candidates
}

fn value_site(member: &MemberInfo) -> ValueSite {
    ValueSite {
        ty: *member.value_type(),
        info: member.value_info_fn(),
        resolution: member.resolution(),
    }
}

// -----------------------------------------------------------------------------
// Checks

fn check_name_clashes(
    info: &ClassInfo,
    properties: &[Arc<PropertyModel>],
) -> Result<(), ConfigurationError> {
    fn check<'a>(
        info: &ClassInfo,
        seen: &mut HashMap<&'a str, &'static str>,
        name: Option<&'a str>,
        identity: &'static str,
    ) -> Result<(), ConfigurationError> {
        let Some(name) = name else {
            return Ok(());
        };
        match seen.insert(name, identity) {
            Some(first) => Err(ConfigurationError::NameClash {
                type_path: info.ty().path(),
                name: String::from(name),
                first,
                second: identity,
            }),
            None => Ok(()),
        }
    }

    let mut written = HashMap::default();
    let mut read = HashMap::default();
    for property in properties {
        if property.is_readable() {
            check(info, &mut written, property.write_name(), property.identity())?;
        }
        if property.is_writable() {
            check(info, &mut read, property.read_name(), property.identity())?;
        }
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// Creator

fn build_creator(
    info: &'static ClassInfo,
    creator: &'static CreatorInfo,
    class: &ClassCustomization,
    config: &BindConfig,
) -> Result<CreatorModel, ConfigurationError> {
    let mut params = Vec::with_capacity(creator.params().len());
    let mut by_name = HashMap::default();

    for param in creator.params() {
        let name = match param.name() {
            Some(name) => String::from(name),
            None => config.naming().translate(param.identity()),
        };
        if by_name.insert(name.clone(), params.len()).is_some() {
            return Err(ConfigurationError::DuplicateCreatorParameter {
                type_path: info.ty().path(),
                name,
            });
        }

        let invalid = |source| ConfigurationError::InvalidFormat {
            site: alloc::format!("{}::{}({})", info.ty().path(), creator.member(), param.identity()),
            source,
        };
        let date = match param.date_format() {
            Some(pattern) => Some(DateFormatter::new(pattern).map_err(invalid)?),
            None => class.formats().date.clone(),
        };
        let number = match param.number_format() {
            Some(pattern) => Some(NumberFormatter::new(pattern).map_err(invalid)?),
            None => class.formats().number.clone(),
        };

        params.push(CreatorParam {
            info: param,
            name,
            formats: Formats { date, number },
            route: OnceLock::new(),
        });
    }

    Ok(CreatorModel {
        info: creator,
        params,
        by_name,
    })
}

// -----------------------------------------------------------------------------
// Build
/// The type key of a class with an alias is reserved for the alias.
fn check_type_key(
    info: &ClassInfo,
    properties: &[Arc<PropertyModel>],
    config: &BindConfig,
) -> Result<(), ConfigurationError> {
    let Some((key, _)) = config.type_alias(info.ty().id()) else {
        return Ok(());
    };
    if properties
        .iter()
        .any(|p| p.is_readable() && p.write_name() == Some(key))
    {
        return Err(ConfigurationError::DiscriminatorClash {
            type_path: info.ty().path(),
            key: String::from(key),
        });
    }
    Ok(())
}

/// Builds the model of `info`; `parent` is the model of its embedded
/// supertype, built beforehand.
pub(crate) fn build_class_model(
    info: &'static ClassInfo,
    parent: Option<Arc<ClassModel>>,
    config: &BindConfig,
) -> Result<ClassModel, ConfigurationError> {
    let customization = resolve_class(info, config)?;
    let visibility = VisibilityResolver::for_class(info, config);

    let mut own = Vec::new();
    for (identity, sites) in discover(info) {
        let resolved = resolve_property(identity, sites, &customization, config)?;
        let accessor = PropertyAccessor::select(sites, &visibility, info.is_anonymous());
        own.push(Arc::new(PropertyModel::new(
            *info.ty(),
            identity,
            resolved,
            sites.read_site().map(value_site),
            sites.write_site().map(value_site),
            accessor,
        )));
    }
    let own = order_properties(
        own,
        customization.property_order(),
        config.order(),
        info.ty().path(),
    );

    let mut properties = Vec::new();
    if let (Some(parent), Some(link)) = (&parent, info.parent()) {
        let overridden: HashSet<&str> = own.iter().map(|p| p.identity()).collect();
        for inherited in parent.properties() {
            if overridden.contains(inherited.identity()) {
                continue;
            }
            let accessor = inherited.accessor().inherited(link.access().clone());
            properties.push(Arc::new(inherited.with_accessor(accessor)));
        }
    }
    properties.extend(own);
    check_name_clashes(info, &properties)?;
    check_type_key(info, &properties, config)?;

    let by_identity = properties
        .iter()
        .enumerate()
        .map(|(index, p)| (p.identity(), index))
        .collect();
    let creator = info
        .creator()
        .map(|creator| build_creator(info, creator, &customization, config))
        .transpose()?;

    Ok(ClassModel {
        info,
        customization,
        properties,
        by_identity,
        creator,
        parent,
        case_insensitive: config.naming().is_case_insensitive(),
    })
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec::Vec;

    use crate::config::BindConfig;
    use crate::derive::Bindable;
    use crate::error::ConfigurationError;
    use crate::info::{InterfaceInfo, MemberInfo, Typed};
    use crate::naming::NamingStrategy;
    use crate::polymorphism::TypeInheritance;
    use crate::registry::ClassModelRegistry;

    trait Labelled {
        fn label(&self) -> String {
            String::from("unnamed")
        }
    }

    fn labelled<T: Labelled + 'static>() -> InterfaceInfo {
        InterfaceInfo::new::<dyn Labelled>()
            .with_member(MemberInfo::getter::<T, String>("label", "label", |t| Ok(t.label())))
    }

    #[derive(Default, Bindable)]
    #[bind(default, implements = labelled::<Self>())]
    struct Tag {
        pub code: u32,
    }

    impl Labelled for Tag {}

    #[derive(Default, Bindable)]
    #[bind(default, implements = labelled::<Self>())]
    struct Named {
        pub label: String,
    }

    impl Labelled for Named {}

    fn label_getter<T: 'static>(text: &'static str) -> MemberInfo {
        MemberInfo::getter::<T, String>("label", "label", move |_| Ok(String::from(text)))
    }

    fn mid<T: 'static>() -> InterfaceInfo {
        let far = InterfaceInfo::new::<dyn Labelled>().with_member(label_getter::<T>("far"));
        InterfaceInfo::new::<dyn core::fmt::Debug>().with_extends(far)
    }

    fn near<T: 'static>() -> InterfaceInfo {
        InterfaceInfo::new::<dyn core::any::Any>().with_member(label_getter::<T>("near"))
    }

    #[derive(Default, Bindable)]
    #[bind(default, implements = mid::<Self>(), implements = near::<Self>())]
    struct Thing {
        pub id: u32,
    }

    #[derive(Default, Bindable)]
    #[bind(default)]
    struct Clash {
        pub first: u8,
        #[bind(name = "first")]
        pub second: u8,
    }

    #[derive(Default, Bindable)]
    #[bind(default)]
    struct Tagged {
        #[bind(name = "kind")]
        pub tag: u8,
    }

    #[derive(Bindable)]
    #[bind(creator)]
    struct Point {
        #[bind(param)]
        pub pos_x: i32,
        #[bind(param = "Y")]
        pub pos_y: i32,
    }

    fn registry(config: BindConfig) -> ClassModelRegistry {
        ClassModelRegistry::new(Arc::new(config))
    }

    #[test]
    fn interface_members_fill_missing_roles() {
        let registry = registry(BindConfig::new());

        let model = registry.get_or_build(Tag::type_info().as_class().unwrap()).unwrap();
        let names: Vec<_> = model.properties().iter().map(|p| p.identity()).collect();
        assert_eq!(names, ["code", "label"]);
        let label = model.property("label").unwrap();
        assert!(label.is_readable());
        assert!(!label.is_writable());

        // The class field and the interface getter share one property.
        let model = registry.get_or_build(Named::type_info().as_class().unwrap()).unwrap();
        assert_eq!(model.properties().len(), 1);
    }

    #[test]
    fn nearer_interface_declaration_wins() {
        let registry = registry(BindConfig::new());
        let model = registry.get_or_build(Thing::type_info().as_class().unwrap()).unwrap();

        let names: Vec<_> = model.properties().iter().map(|p| p.identity()).collect();
        assert_eq!(names, ["id", "label"]);
        let label = model.property("label").unwrap();
        let thing = Thing::default();
        let value = label.accessor().get(&thing).unwrap();
        assert_eq!((*value).downcast_ref::<String>().unwrap(), "near");
    }

    #[test]
    fn write_name_clash_is_rejected() {
        let registry = registry(BindConfig::new());
        let err = registry
            .get_or_build(Clash::type_info().as_class().unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::NameClash { first: "first", second: "second", .. }
        ));
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn type_key_is_reserved() {
        let animals = TypeInheritance::new("kind").with_subtype::<Tagged>("tagged");
        let registry = registry(BindConfig::new().with_type_inheritance(animals));
        let err = registry
            .get_or_build(Tagged::type_info().as_class().unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::DiscriminatorClash { ref key, .. } if key == "kind"
        ));
    }

    #[test]
    fn creator_parameter_names() {
        let registry = registry(BindConfig::new().with_naming(NamingStrategy::LowerCamelCase));
        let model = registry.get_or_build(Point::type_info().as_class().unwrap()).unwrap();
        let creator = model.creator().unwrap();

        let names: Vec<_> = creator.params().iter().map(|p| p.name()).collect();
        assert_eq!(names, ["posX", "Y"]);
        assert_eq!(creator.position("Y"), Some(1));
        assert_eq!(creator.position("posY"), None);
    }
}
