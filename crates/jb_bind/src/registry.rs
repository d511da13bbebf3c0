//! The compute-once cache of class models.

use alloc::sync::Arc;
use core::any::TypeId;
use core::sync::atomic::{AtomicUsize, Ordering};

use jb_utils::TypeIdOnceMap;
use log::debug;

use crate::config::BindConfig;
use crate::error::ConfigurationError;
use crate::info::{ClassInfo, TypeInfo};
use crate::model::{ClassModel, build_class_model};

/// Builds each [`ClassModel`] on first use and keeps it until invalidated.
///
/// Concurrent first use of one class may build it more than once; the first
/// model installed is the one every caller receives, later ones are dropped.
/// A failed build caches nothing.
pub struct ClassModelRegistry {
    config: Arc<BindConfig>,
    models: TypeIdOnceMap<Arc<ClassModel>>,
    builds: AtomicUsize,
}

impl ClassModelRegistry {
    pub fn new(config: Arc<BindConfig>) -> Self {
        Self {
            config,
            models: TypeIdOnceMap::new(),
            builds: AtomicUsize::new(0),
        }
    }

    #[inline]
    pub fn config(&self) -> &BindConfig {
        &self.config
    }

    /// The cached model of a class, without building it.
    pub fn get(&self, ty: TypeId) -> Option<Arc<ClassModel>> {
        self.models.get(&ty)
    }

    pub fn get_or_build(&self, info: &'static ClassInfo) -> Result<Arc<ClassModel>, ConfigurationError> {
        let id = info.ty().id();
        if let Some(model) = self.models.get(&id) {
            return Ok(model);
        }

        let parent = match info.parent().map(|link| link.info()) {
            Some(TypeInfo::Class(parent)) => Some(self.get_or_build(parent)?),
            _ => None,
        };
        let built = Arc::new(build_class_model(info, parent, &self.config)?);
        self.builds.fetch_add(1, Ordering::Relaxed);
        debug!(
            "built class model of `{}` with {} properties",
            info.ty().path(),
            built.properties().len()
        );

        let installed = self.models.install(id, built.clone());
        if !Arc::ptr_eq(&installed, &built) {
            debug!("discarded class model of `{}`, another build won", info.ty().path());
        }
        Ok(installed)
    }

    /// Number of cached models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Number of builds run, including discarded ones.
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    /// Drops every cached model.
    pub fn invalidate_all(&self) {
        self.models.clear();
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec::Vec;

    use super::ClassModelRegistry;
    use crate::config::BindConfig;
    use crate::derive::Bindable;
    use crate::info::Typed;

    #[derive(Default, Bindable)]
    #[bind(default)]
    struct Base {
        pub id: u64,
    }

    #[derive(Default, Bindable)]
    #[bind(default)]
    struct Derived {
        #[bind(extends)]
        base: Base,
        pub name: String,
    }

    fn registry() -> ClassModelRegistry {
        ClassModelRegistry::new(Arc::new(BindConfig::new()))
    }

    #[test]
    fn builds_once_and_shares() {
        let registry = registry();
        let info = Derived::type_info().as_class().unwrap();

        let a = registry.get_or_build(info).unwrap();
        let b = registry.get_or_build(info).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        // The parent is built first and cached as well.
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.build_count(), 2);

        let names: Vec<_> = a.properties().iter().map(|p| p.identity()).collect();
        assert_eq!(names, ["id", "name"]);
        assert!(a.parent().is_some());
    }

    #[test]
    fn concurrent_first_use_converges() {
        let registry = registry();
        let info = Base::type_info().as_class().unwrap();

        let models: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| registry.get_or_build(info).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(models.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn invalidation_rebuilds() {
        let registry = registry();
        let info = Base::type_info().as_class().unwrap();

        let first = registry.get_or_build(info).unwrap();
        registry.invalidate_all();
        assert_eq!(registry.len(), 0);
        let second = registry.get_or_build(info).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }
}
