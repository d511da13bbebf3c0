use alloc::string::String;

use crate::config::BindConfig;
use crate::customization::{ClassCustomization, Customization};
use crate::error::ConfigurationError;
use crate::format::{DateFormatter, Formats, NumberFormatter};
use crate::info::{ClassInfo, MemberInfo, SiteAnnotations};

// -----------------------------------------------------------------------------
// Class

/// Class annotation, then module, then global configuration.
pub(crate) fn resolve_class(
    class: &ClassInfo,
    config: &BindConfig,
) -> Result<ClassCustomization, ConfigurationError> {
    let annotations = class.annotations();
    let module = config.module(class.module_path());
    let invalid = |source| ConfigurationError::InvalidFormat {
        site: String::from(class.ty().path()),
        source,
    };

    let date = match annotations.date_format {
        Some(pattern) => Some(DateFormatter::new(pattern).map_err(invalid)?),
        None => module
            .and_then(|m| m.date_format.clone())
            .or_else(|| config.date_formatter().cloned()),
    };
    let number = match annotations.number_format {
        Some(pattern) => Some(NumberFormatter::new(pattern).map_err(invalid)?),
        None => module
            .and_then(|m| m.number_format.clone())
            .or_else(|| config.number_formatter().cloned()),
    };
    let nillable = annotations
        .nillable
        .or_else(|| module.and_then(|m| m.nillable))
        .unwrap_or(config.nillable_by_default());

    Ok(ClassCustomization::new(
        nillable,
        Formats { date, number },
        annotations.property_order.clone(),
    ))
}

/// Arrays, collections and maps only inherit the global formatters.
pub(crate) fn resolve_container(config: &BindConfig) -> ClassCustomization {
    ClassCustomization::container(Formats {
        date: config.date_formatter().cloned(),
        number: config.number_formatter().cloned(),
    })
}

// -----------------------------------------------------------------------------
// Property

/// The declaration sites of one property.
#[derive(Clone, Copy, Default)]
pub(crate) struct PropertySites<'a> {
    pub field: Option<&'a MemberInfo>,
    pub getter: Option<&'a MemberInfo>,
    pub setter: Option<&'a MemberInfo>,
}

impl<'a> PropertySites<'a> {
    fn iter(&self) -> impl Iterator<Item = &'a MemberInfo> {
        [self.field, self.getter, self.setter].into_iter().flatten()
    }

    /// The member whose type is read on serialization.
    pub fn read_site(&self) -> Option<&'a MemberInfo> {
        self.getter.or(self.field)
    }

    /// The member whose type is written on deserialization.
    pub fn write_site(&self) -> Option<&'a MemberInfo> {
        self.setter.or(self.field)
    }
}

fn annotation<'a, T>(
    site: Option<&'a MemberInfo>,
    get: impl Fn(&'a SiteAnnotations) -> Option<T>,
) -> Option<T> {
    site.and_then(|member| get(member.annotations()))
}

fn is_transient(site: Option<&MemberInfo>) -> bool {
    site.is_some_and(|member| member.annotations().transient)
}

fn check_transient(site: Option<&MemberInfo>) -> Result<(), ConfigurationError> {
    if let Some(member) = site
        && let Some(annotation) = member.annotations().declared().next()
    {
        return Err(ConfigurationError::TransientConflict {
            member: member.identity(),
            annotation,
        });
    }
    Ok(())
}

fn site_formats(site: Option<&MemberInfo>) -> Result<Formats, ConfigurationError> {
    let Some(member) = site else {
        return Ok(Formats::none());
    };
    let annotations = member.annotations();
    let invalid = |source| ConfigurationError::InvalidFormat {
        site: member.identity(),
        source,
    };
    Ok(Formats {
        date: annotations
            .date_format
            .map(DateFormatter::new)
            .transpose()
            .map_err(invalid)?,
        number: annotations
            .number_format
            .map(NumberFormatter::new)
            .transpose()
            .map_err(invalid)?,
    })
}

/// Most specific first: accessor, then field, then class.
fn ladder(accessor: Formats, field: &Formats, class: &Formats) -> Formats {
    Formats {
        date: accessor
            .date
            .or_else(|| field.date.clone())
            .or_else(|| class.date.clone()),
        number: accessor
            .number
            .or_else(|| field.number.clone())
            .or_else(|| class.number.clone()),
    }
}

/// Customization and document keys of one property.
#[derive(Debug)]
pub(crate) struct ResolvedProperty {
    pub customization: Customization,
    /// Key read on deserialization, `None` when write transient.
    pub read_name: Option<String>,
    /// Key written on serialization, `None` when read transient.
    pub write_name: Option<String>,
}

pub(crate) fn resolve_property(
    identity: &str,
    sites: PropertySites<'_>,
    class: &ClassCustomization,
    config: &BindConfig,
) -> Result<ResolvedProperty, ConfigurationError> {
    let PropertySites {
        field,
        getter,
        setter,
    } = sites;

    // Transience comes first and gates everything else of its direction.
    let field_transient = is_transient(field);
    let read_transient = field_transient || is_transient(getter);
    let write_transient = field_transient || is_transient(setter);

    if field_transient {
        sites.iter().try_for_each(|site| check_transient(Some(site)))?;
    }
    if is_transient(getter) {
        check_transient(getter)?;
    }
    if is_transient(setter) {
        check_transient(setter)?;
    }

    let field_formats = site_formats(field)?;
    let mut customization = Customization {
        nillable: annotation(field, |a| a.nillable)
            .or_else(|| annotation(getter, |a| a.nillable))
            .or_else(|| annotation(setter, |a| a.nillable))
            .unwrap_or(class.is_nillable()),
        read_transient,
        write_transient,
        ..Customization::default()
    };

    let mut write_name = None;
    if !read_transient {
        let name = annotation(getter, |a| a.name).or_else(|| annotation(field, |a| a.name));
        write_name = Some(match name {
            Some(name) => String::from(name),
            None => config.naming().translate(identity),
        });

        let ty = sites.read_site().map(|site| site.value_type().id());
        customization.serialize_formats = ladder(site_formats(getter)?, &field_formats, class.formats());
        customization.serialize_adapter = annotation(getter, |a| a.adapter.clone())
            .or_else(|| annotation(field, |a| a.adapter.clone()))
            .or_else(|| ty.and_then(|ty| config.adapter(ty).cloned()));
        customization.serializer = annotation(getter, |a| a.serializer.clone())
            .or_else(|| annotation(field, |a| a.serializer.clone()))
            .or_else(|| ty.and_then(|ty| config.serializer(ty).cloned()));
    }

    let mut read_name = None;
    if !write_transient {
        let name = annotation(setter, |a| a.name).or_else(|| annotation(field, |a| a.name));
        read_name = Some(match name {
            Some(name) => String::from(name),
            None => config.naming().translate(identity),
        });

        let ty = sites.write_site().map(|site| site.value_type().id());
        customization.deserialize_formats =
            ladder(site_formats(setter)?, &field_formats, class.formats());
        customization.deserialize_adapter = annotation(setter, |a| a.adapter.clone())
            .or_else(|| annotation(field, |a| a.adapter.clone()))
            .or_else(|| ty.and_then(|ty| config.adapter(ty).cloned()));
        customization.deserializer = annotation(setter, |a| a.deserializer.clone())
            .or_else(|| annotation(field, |a| a.deserializer.clone()))
            .or_else(|| ty.and_then(|ty| config.deserializer(ty).cloned()));
    }

    Ok(ResolvedProperty {
        customization,
        read_name,
        write_name,
    })
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;

    use super::{PropertySites, resolve_class, resolve_container, resolve_property};
    use crate::config::{BindConfig, ModuleCustomization};
    use crate::customization::ClassCustomization;
    use crate::derive::Bindable;
    use crate::error::ConfigurationError;
    use crate::format::{DateFormatter, Formats};
    use crate::info::{ClassAnnotations, ClassInfo, MemberInfo, SiteAnnotations};
    use crate::naming::NamingStrategy;

    #[derive(Default, Bindable)]
    #[bind(default)]
    struct Bean {
        str_field: String,
    }

    fn field(annotations: SiteAnnotations) -> MemberInfo {
        MemberInfo::field::<Bean, String>("str_field", |b| &b.str_field, |b| &mut b.str_field)
            .with_annotations(annotations)
    }

    fn getter(annotations: SiteAnnotations) -> MemberInfo {
        MemberInfo::getter::<Bean, String>("str_field", "str_field", |b| Ok(b.str_field.clone()))
            .with_annotations(annotations)
    }

    fn setter(annotations: SiteAnnotations) -> MemberInfo {
        MemberInfo::setter::<Bean, String>("str_field", "set_str_field", |b, v| {
            b.str_field = v;
            Ok(())
        })
        .with_annotations(annotations)
    }

    fn class_with_date(pattern: &str) -> ClassCustomization {
        let date = Some(DateFormatter::new(pattern).unwrap());
        ClassCustomization::new(false, Formats { date, number: None }, vec![])
    }

    fn date_of(formats: &Formats) -> &str {
        formats.date.as_ref().unwrap().pattern()
    }

    #[test]
    fn names_follow_naming_strategy_and_accessor_overrides() {
        let config = BindConfig::new().with_naming(NamingStrategy::LowerCamelCase);
        let f = field(SiteAnnotations::default());
        let s = setter(SiteAnnotations {
            name: Some("in"),
            ..Default::default()
        });
        let sites = PropertySites {
            field: Some(&f),
            getter: None,
            setter: Some(&s),
        };

        let resolved =
            resolve_property("str_field", sites, &ClassCustomization::default(), &config).unwrap();
        assert_eq!(resolved.write_name.as_deref(), Some("strField"));
        assert_eq!(resolved.read_name.as_deref(), Some("in"));
    }

    #[test]
    fn date_format_precedence() {
        let class = class_with_date("%Y");
        let config = BindConfig::new();

        let f = field(SiteAnnotations {
            date_format: Some("%m"),
            ..Default::default()
        });
        let g = getter(SiteAnnotations {
            date_format: Some("%d"),
            ..Default::default()
        });
        let sites = PropertySites {
            field: Some(&f),
            getter: Some(&g),
            setter: None,
        };
        let c = resolve_property("str_field", sites, &class, &config)
            .unwrap()
            .customization;
        assert_eq!(date_of(c.serialize_formats()), "%d");
        assert_eq!(date_of(c.deserialize_formats()), "%m");

        let plain = field(SiteAnnotations::default());
        let sites = PropertySites {
            field: Some(&plain),
            ..Default::default()
        };
        let c = resolve_property("str_field", sites, &class, &config)
            .unwrap()
            .customization;
        assert_eq!(date_of(c.serialize_formats()), "%Y");
    }

    #[test]
    fn transience_gates_its_direction() {
        let f = field(SiteAnnotations {
            name: Some("renamed"),
            ..Default::default()
        });
        let s = setter(SiteAnnotations {
            transient: true,
            ..Default::default()
        });
        let sites = PropertySites {
            field: Some(&f),
            getter: None,
            setter: Some(&s),
        };
        let resolved =
            resolve_property("str_field", sites, &ClassCustomization::default(), &BindConfig::new())
                .unwrap();
        assert!(resolved.customization.is_write_transient());
        assert!(!resolved.customization.is_read_transient());
        assert_eq!(resolved.read_name, None);
        assert_eq!(resolved.write_name.as_deref(), Some("renamed"));
    }

    #[test]
    fn transient_conflicts_are_rejected() {
        let f = field(SiteAnnotations {
            transient: true,
            ..Default::default()
        });
        let g = getter(SiteAnnotations {
            nillable: Some(true),
            ..Default::default()
        });
        let sites = PropertySites {
            field: Some(&f),
            getter: Some(&g),
            setter: None,
        };
        let err =
            resolve_property("str_field", sites, &ClassCustomization::default(), &BindConfig::new())
                .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::TransientConflict {
                annotation: "nillable",
                ..
            }
        ));

        let s = setter(SiteAnnotations {
            transient: true,
            name: Some("x"),
            ..Default::default()
        });
        let sites = PropertySites {
            setter: Some(&s),
            ..Default::default()
        };
        assert!(
            resolve_property("str_field", sites, &ClassCustomization::default(), &BindConfig::new())
                .is_err()
        );
    }

    #[test]
    fn class_nillable_and_formats() {
        let config = BindConfig::new()
            .with_nillable_by_default(false)
            .with_date_formatter(DateFormatter::new("%F").unwrap())
            .with_module("jb_bind", ModuleCustomization::new().with_nillable(true));

        let info = ClassInfo::new::<Bean>(module_path!());
        let class = resolve_class(&info, &config).unwrap();
        assert!(class.is_nillable());
        assert_eq!(date_of(class.formats()), "%F");

        let info = ClassInfo::new::<Bean>("elsewhere").with_annotations(ClassAnnotations {
            date_format: Some("%!"),
            ..Default::default()
        });
        assert!(matches!(
            resolve_class(&info, &config),
            Err(ConfigurationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn containers_are_always_nillable() {
        let config = BindConfig::new().with_nillable_by_default(false);
        let container = resolve_container(&config);
        assert!(container.is_nillable());
        assert!(container.is_container());
    }
}
