use core::any::{TypeId, type_name};
use core::fmt;
use core::hash::{Hash, Hasher};

/// Identity of a Rust type: its [`TypeId`] plus a readable path.
///
/// Equality and hashing only look at the [`TypeId`].
///
/// # Examples
///
/// ```
/// use jb_bind::info::Type;
///
/// let ty = Type::of::<Vec<String>>();
/// assert_eq!(ty.name(), "Vec<alloc::string::String>");
/// assert!(ty.is::<Vec<String>>());
/// ```
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    path: &'static str,
}

impl Type {
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: type_name::<T>(),
        }
    }

    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Full path as reported by [`core::any::type_name`].
    #[inline(always)]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// The path without its leading module segments.
    pub fn name(&self) -> &'static str {
        let head = self.head();
        match head.rfind("::") {
            Some(at) => &self.path[at + 2..],
            None => self.path,
        }
    }

    /// Module segments of the path, empty for primitives.
    pub fn module_path(&self) -> &'static str {
        let head = self.head();
        match head.rfind("::") {
            Some(at) => &self.path[..at],
            None => "",
        }
    }

    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    fn head(&self) -> &'static str {
        let end = self.path.find('<').unwrap_or(self.path.len());
        &self.path[..end]
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl Hash for Type {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.path)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.path)
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;

    use super::Type;

    #[test]
    fn names_and_modules() {
        let ty = Type::of::<BTreeMap<String, u8>>();
        assert_eq!(ty.name(), "BTreeMap<alloc::string::String, u8>");
        assert_eq!(ty.module_path(), "alloc::collections::btree::map");

        let ty = Type::of::<u8>();
        assert_eq!(ty.name(), "u8");
        assert_eq!(ty.module_path(), "");
        assert_eq!(ty, Type::of::<u8>());
        assert_ne!(ty, Type::of::<i8>());
    }
}
