use alloc::sync::Arc;
use alloc::vec::Vec;

use log::warn;

use crate::config::OrderStrategy;
use crate::model::PropertyModel;

/// Serialization order of the properties declared by one class.
///
/// Names of the explicit order list come first, in listed sequence. The
/// remaining properties follow, sorted by write name per `strategy`.
pub(crate) fn order_properties(
    mut properties: Vec<Arc<PropertyModel>>,
    explicit: &[&str],
    strategy: OrderStrategy,
    owner: &str,
) -> Vec<Arc<PropertyModel>> {
    let mut ordered = Vec::with_capacity(properties.len());
    for &name in explicit {
        let found = properties
            .iter()
            .position(|p| p.identity() == name)
            .or_else(|| properties.iter().position(|p| p.write_name() == Some(name)));
        match found {
            Some(index) => ordered.push(properties.remove(index)),
            None => warn!("order list of `{owner}` names unknown property `{name}`"),
        }
    }

    match strategy {
        OrderStrategy::Lexicographical => properties.sort_by(|a, b| a.write_name().cmp(&b.write_name())),
        OrderStrategy::Reverse => properties.sort_by(|a, b| b.write_name().cmp(&a.write_name())),
        OrderStrategy::AsDeclared | OrderStrategy::Any => {}
    }
    ordered.append(&mut properties);
    ordered
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec::Vec;

    use super::order_properties;
    use crate::access::PropertyAccessor;
    use crate::config::{BindConfig, OrderStrategy};
    use crate::customization::{Customization, PropertySites, ResolvedProperty};
    use crate::info::{ClassInfo, Type};
    use crate::model::PropertyModel;
    use crate::visibility::VisibilityResolver;

    fn properties(names: &[&'static str]) -> Vec<Arc<PropertyModel>> {
        let visibility = VisibilityResolver::for_class(&ClassInfo::new::<u8>("test"), &BindConfig::new());
        names
            .iter()
            .map(|&name| {
                Arc::new(PropertyModel::new(
                    Type::of::<u8>(),
                    name,
                    ResolvedProperty {
                        customization: Customization::default(),
                        read_name: Some(String::from(name)),
                        write_name: Some(String::from(name)),
                    },
                    None,
                    None,
                    PropertyAccessor::select(PropertySites::default(), &visibility, false),
                ))
            })
            .collect()
    }

    fn names(ordered: &[Arc<PropertyModel>]) -> Vec<&'static str> {
        ordered.iter().map(|p| p.identity()).collect()
    }

    #[test]
    fn explicit_prefix_then_strategy() {
        let props = properties(&["first", "second", "third"]);
        let ordered = order_properties(props, &["first", "second"], OrderStrategy::Reverse, "T");
        assert_eq!(names(&ordered), ["first", "second", "third"]);

        let props = properties(&["b", "c", "a", "d"]);
        let ordered = order_properties(props, &["d", "missing"], OrderStrategy::Lexicographical, "T");
        assert_eq!(names(&ordered), ["d", "a", "b", "c"]);
    }

    #[test]
    fn strategies() {
        let order = |strategy| names(&order_properties(properties(&["b", "c", "a"]), &[], strategy, "T"));
        assert_eq!(order(OrderStrategy::AsDeclared), ["b", "c", "a"]);
        assert_eq!(order(OrderStrategy::Lexicographical), ["a", "b", "c"]);
        assert_eq!(order(OrderStrategy::Reverse), ["c", "b", "a"]);
    }
}
