//! Which members may take part in binding.
//!
//! A policy declared on the class wins, then the one of the enclosing
//! module, then the one of the configuration. Without any policy the
//! default rule applies:
//!
//! - a getter or setter is visible iff it is public;
//! - a field is visible iff it is public and its paired getter or setter,
//!   if declared, is visible too.

use alloc::sync::Arc;

use log::debug;

use crate::config::BindConfig;
use crate::info::{ClassInfo, MemberInfo, MemberKind};

/// A visibility policy over fields and accessor methods.
pub trait VisibilityPolicy: Send + Sync {
    fn is_field_visible(&self, field: &MemberInfo) -> bool;

    fn is_method_visible(&self, method: &MemberInfo) -> bool;
}

/// The default rule as a policy: public members only.
///
/// Unlike the built-in rule, it does not look at the paired accessor of a
/// field.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicMembers;

impl VisibilityPolicy for PublicMembers {
    fn is_field_visible(&self, field: &MemberInfo) -> bool {
        field.is_public()
    }

    fn is_method_visible(&self, method: &MemberInfo) -> bool {
        method.is_public()
    }
}

/// Every field is visible regardless of its declared visibility; methods
/// only when public.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllFields;

impl VisibilityPolicy for AllFields {
    fn is_field_visible(&self, _field: &MemberInfo) -> bool {
        true
    }

    fn is_method_visible(&self, method: &MemberInfo) -> bool {
        method.is_public()
    }
}

// -----------------------------------------------------------------------------
// VisibilityResolver

/// The policy in effect for one class.
#[derive(Clone)]
pub(crate) struct VisibilityResolver {
    policy: Option<Arc<dyn VisibilityPolicy>>,
}

impl VisibilityResolver {
    pub(crate) fn for_class(class: &ClassInfo, config: &BindConfig) -> Self {
        let policy = class
            .annotations()
            .visibility
            .map(|make| make())
            .or_else(|| {
                config
                    .module(class.module_path())
                    .and_then(|module| module.visibility.clone())
            })
            .or_else(|| config.visibility().cloned());
        Self { policy }
    }

    /// Whether `member` is visible; `paired` is the getter or setter sharing
    /// the role of a field, if any.
    pub(crate) fn is_visible(&self, member: &MemberInfo, paired: Option<&MemberInfo>) -> bool {
        let Some(policy) = &self.policy else {
            return match member.kind() {
                MemberKind::Field => {
                    member.is_public() && paired.is_none_or(|method| method.is_public())
                }
                MemberKind::Getter | MemberKind::Setter => member.is_public(),
            };
        };

        let visible = match member.kind() {
            MemberKind::Field => policy.is_field_visible(member),
            MemberKind::Getter | MemberKind::Setter => policy.is_method_visible(member),
        };
        if visible && !member.is_public() {
            debug!(
                "visibility policy grants access to non-public {} `{}`",
                member.kind().as_str(),
                member.identity()
            );
        }
        visible
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::{AllFields, VisibilityResolver};
    use crate::config::{BindConfig, ModuleCustomization};
    use crate::info::{ClassInfo, MemberInfo, MemberVisibility};

    struct Bean {
        name: String,
    }

    fn class() -> ClassInfo {
        ClassInfo::new::<Option<u8>>("app::model")
    }

    fn private_field() -> MemberInfo {
        MemberInfo::field::<Bean, String>("name", |b| &b.name, |b| &mut b.name)
            .with_visibility(MemberVisibility::Private)
    }

    #[test]
    fn default_rule() {
        let resolver = VisibilityResolver::for_class(&class(), &BindConfig::new());

        let public_field = MemberInfo::field::<Bean, String>("name", |b| &b.name, |b| &mut b.name);
        let getter = MemberInfo::getter::<Bean, String>("name", "name", |b| Ok(b.name.clone()));
        let private_getter = getter.clone().with_visibility(MemberVisibility::Private);

        assert!(resolver.is_visible(&public_field, None));
        assert!(resolver.is_visible(&public_field, Some(&getter)));
        assert!(!resolver.is_visible(&public_field, Some(&private_getter)));
        assert!(!resolver.is_visible(&private_field(), None));
        assert!(!resolver.is_visible(&private_getter, None));
    }

    #[test]
    fn module_policy_beats_config_default() {
        let config = BindConfig::new().with_module("app", ModuleCustomization::new().with_visibility(AllFields));
        let resolver = VisibilityResolver::for_class(&class(), &config);
        assert!(resolver.is_visible(&private_field(), None));

        let other = ClassInfo::new::<Option<u8>>("other");
        let resolver = VisibilityResolver::for_class(&other, &config);
        assert!(!resolver.is_visible(&private_field(), None));
    }
}
