use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::Bindable;
use crate::access::PropertyValue;
use crate::customization::PropertySites;
use crate::error::AccessError;
use crate::info::{FieldAccess, GetterFn, MemberAccess, MemberInfo, SetterFn};
use crate::visibility::VisibilityResolver;

#[derive(Clone)]
enum ReadAccess {
    Field(Arc<dyn FieldAccess>),
    Getter(GetterFn),
}

#[derive(Clone)]
enum WriteAccess {
    Field(Arc<dyn FieldAccess>),
    Setter(SetterFn),
}

#[derive(Clone)]
struct Role<A> {
    access: A,
    /// Identity of the selected member, for errors.
    member: String,
}

fn read_role(member: &MemberInfo) -> Option<Role<ReadAccess>> {
    let access = match member.access() {
        MemberAccess::Field(field) => ReadAccess::Field(field.clone()),
        MemberAccess::Getter(getter) => ReadAccess::Getter(getter.clone()),
        MemberAccess::Setter(_) => return None,
    };
    Some(Role {
        access,
        member: member.identity(),
    })
}

fn write_role(member: &MemberInfo) -> Option<Role<WriteAccess>> {
    let access = match member.access() {
        MemberAccess::Field(field) => WriteAccess::Field(field.clone()),
        MemberAccess::Setter(setter) => WriteAccess::Setter(setter.clone()),
        MemberAccess::Getter(_) => return None,
    };
    Some(Role {
        access,
        member: member.identity(),
    })
}

fn unexpected(member: &str, found: &str) -> AccessError {
    AccessError::new(member, alloc::format!("unexpected instance of `{found}`"))
}

/// Reads and writes one property of type-erased instances.
#[derive(Clone)]
pub struct PropertyAccessor {
    /// Up-casts from the bound instance to the parent declaring the property.
    lineage: Vec<Arc<dyn FieldAccess>>,
    get: Option<Role<ReadAccess>>,
    set: Option<Role<WriteAccess>>,
}

impl PropertyAccessor {
    pub(crate) fn select(
        sites: PropertySites<'_>,
        visibility: &VisibilityResolver,
        anonymous: bool,
    ) -> Self {
        let get = match (sites.getter, sites.field) {
            (Some(getter), _) if visibility.is_visible(getter, None) => read_role(getter),
            (_, Some(field)) if visibility.is_visible(field, sites.getter) => read_role(field),
            _ => None,
        };
        let set = match (sites.setter, sites.field) {
            _ if anonymous => None,
            (Some(setter), _) if visibility.is_visible(setter, None) => write_role(setter),
            (_, Some(field)) if visibility.is_visible(field, sites.setter) => write_role(field),
            _ => None,
        };
        Self {
            lineage: Vec::new(),
            get,
            set,
        }
    }

    /// The same accessor, reached from a subtype through `upcast`.
    pub(crate) fn inherited(&self, upcast: Arc<dyn FieldAccess>) -> Self {
        let mut lineage = Vec::with_capacity(self.lineage.len() + 1);
        lineage.push(upcast);
        lineage.extend(self.lineage.iter().cloned());
        Self {
            lineage,
            get: self.get.clone(),
            set: self.set.clone(),
        }
    }

    #[inline]
    pub fn can_get(&self) -> bool {
        self.get.is_some()
    }

    #[inline]
    pub fn can_set(&self) -> bool {
        self.set.is_some()
    }

    /// Identity of the member read, `Type::member` or `Type::member()`.
    pub fn read_member(&self) -> Option<&str> {
        self.get.as_ref().map(|role| role.member.as_str())
    }

    /// Identity of the member written.
    pub fn write_member(&self) -> Option<&str> {
        self.set.as_ref().map(|role| role.member.as_str())
    }

    pub fn get<'a>(&self, instance: &'a dyn Bindable) -> Result<PropertyValue<'a>, AccessError> {
        let role = self
            .get
            .as_ref()
            .ok_or_else(|| AccessError::new("", "property is not readable"))?;
        let mismatch = |found: &dyn Bindable| unexpected(&role.member, found.type_path());

        let mut target = instance;
        for upcast in &self.lineage {
            target = upcast.get(target).ok_or_else(|| mismatch(target))?;
        }
        match &role.access {
            ReadAccess::Field(field) => field
                .get(target)
                .map(PropertyValue::Borrowed)
                .ok_or_else(|| mismatch(target)),
            ReadAccess::Getter(getter) => getter(target)
                .map(PropertyValue::Owned)
                .map_err(|err| AccessError::new(role.member.as_str(), err)),
        }
    }

    pub fn set(&self, instance: &mut dyn Bindable, value: Box<dyn Bindable>) -> Result<(), AccessError> {
        let role = self
            .set
            .as_ref()
            .ok_or_else(|| AccessError::new("", "property is not writable"))?;
        let mismatch = |found: &'static str| unexpected(&role.member, found);

        let mut target = instance;
        for upcast in &self.lineage {
            let found = target.type_path();
            target = upcast.get_mut(target).ok_or_else(|| mismatch(found))?;
        }
        match &role.access {
            WriteAccess::Field(field) => {
                let found = target.type_path();
                let slot = field.get_mut(target).ok_or_else(|| mismatch(found))?;
                slot.assign(value)
                    .map_err(|err| AccessError::new(role.member.as_str(), err))
            }
            WriteAccess::Setter(setter) => {
                setter(target, value).map_err(|err| AccessError::new(role.member.as_str(), err))
            }
        }
    }
}

impl fmt::Debug for PropertyAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyAccessor")
            .field("lineage", &self.lineage.len())
            .field("get", &self.read_member())
            .field("set", &self.write_member())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;

    use super::PropertyAccessor;
    use crate::config::BindConfig;
    use crate::customization::PropertySites;
    use crate::derive::Bindable;
    use crate::error::BoxError;
    use crate::info::{ClassInfo, MemberInfo, MemberVisibility};
    use crate::visibility::VisibilityResolver;

    #[derive(Default, Bindable)]
    #[bind(default)]
    struct Bean {
        name: String,
        calls: u32,
    }

    fn visibility() -> VisibilityResolver {
        VisibilityResolver::for_class(&ClassInfo::new::<u8>("test"), &BindConfig::new())
    }

    #[test]
    fn getter_wins_over_field() {
        let field = MemberInfo::field::<Bean, String>("name", |b| &b.name, |b| &mut b.name);
        let getter = MemberInfo::getter::<Bean, String>("name", "name", |b| {
            Ok(alloc::format!("<{}>", b.name))
        });
        let sites = PropertySites {
            field: Some(&field),
            getter: Some(&getter),
            setter: None,
        };
        let accessor = PropertyAccessor::select(sites, &visibility(), false);

        let mut bean = Bean::default();
        accessor.set(&mut bean, Box::new(String::from("x"))).unwrap();
        let value = accessor.get(&bean).unwrap();
        assert_eq!(value.downcast_ref::<String>().unwrap(), "<x>");
        assert!(accessor.read_member().unwrap().ends_with("Bean::name()"));
        assert!(accessor.write_member().unwrap().ends_with("Bean::name"));
    }

    #[test]
    fn private_members_are_unavailable() {
        let field = MemberInfo::field::<Bean, String>("name", |b| &b.name, |b| &mut b.name)
            .with_visibility(MemberVisibility::Private);
        let sites = PropertySites {
            field: Some(&field),
            ..Default::default()
        };
        let accessor = PropertyAccessor::select(sites, &visibility(), false);
        assert!(!accessor.can_get());
        assert!(!accessor.can_set());
        assert!(accessor.get(&Bean::default()).is_err());
    }

    #[test]
    fn anonymous_types_are_never_written() {
        let field = MemberInfo::field::<Bean, u32>("calls", |b| &b.calls, |b| &mut b.calls);
        let sites = PropertySites {
            field: Some(&field),
            ..Default::default()
        };
        let accessor = PropertyAccessor::select(sites, &visibility(), true);
        assert!(accessor.can_get());
        assert!(!accessor.can_set());
    }

    #[test]
    fn failing_setter_reports_member() {
        let setter = MemberInfo::setter::<Bean, u32>("calls", "set_calls", |_, _| {
            Err(BoxError::from("rejected"))
        });
        let sites = PropertySites {
            setter: Some(&setter),
            ..Default::default()
        };
        let accessor = PropertyAccessor::select(sites, &visibility(), false);

        let err = accessor.set(&mut Bean::default(), Box::new(3_u32)).unwrap_err();
        assert!(err.member().ends_with("Bean::set_calls()"));

        let err = accessor.set(&mut Bean::default(), Box::new(3_i64)).unwrap_err();
        assert!(err.member().ends_with("Bean::set_calls()"));
    }
}
