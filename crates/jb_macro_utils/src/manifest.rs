use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use proc_macro2::Span;
use toml_edit::{Document, Item, Table};

/// Locate an accessible [`syn::Path`] for an engine crate as seen from the
/// caller's Cargo.toml.
///
/// Derive output must name `jb_bind` through whatever dependency the
/// invoking crate actually declares.
///
/// ```rust
/// # use jb_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("jb_bind"));
/// ```
///
/// # Resolution rules
///
/// 1. If the requested crate is listed in `dependencies`, return `::crate_name`.
/// 2. If the name starts with `jb_` and the caller depends on `jb_core`,
///    return `::jb_core::short_name` (e.g. `jb_bind` -> `::jb_core::bind`).
/// 3. Repeat 1-2 in `dev-dependencies`.
/// 4. Otherwise fall back to `::crate_name`.
///
/// A crate referencing itself from tests should declare
/// `extern crate self as jb_bind;` at its root so rule 4 resolves.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const CORE_ENGINE_NAME: &str = "jb_core";
const ENGINE_PREFIX: &str = "jb_";

impl Manifest {
    #[inline(never)]
    fn get_manifest_path() -> PathBuf {
        let Some(dir) = env::var_os("CARGO_MANIFEST_DIR") else {
            panic!("CARGO_MANIFEST_DIR should be auto-defined by cargo.");
        };
        let mut path = PathBuf::from(dir);
        path.push("Cargo.toml");
        assert!(
            path.exists(),
            "Cargo manifest does not exist at path {}",
            path.display(),
        );
        path
    }

    #[inline(never)]
    fn get_manifest_modified_time(
        cargo_manifest_path: &Path,
    ) -> Result<SystemTime, std::io::Error> {
        std::fs::metadata(cargo_manifest_path).and_then(|metadata| metadata.modified())
    }

    #[inline(never)]
    fn read_manifest(path: &Path) -> Document<Box<str>> {
        let manifest = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Document::parse(manifest)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    fn crate_root(name: &str) -> syn::Path {
        let mut path = syn::Path::from(syn::Ident::new(name, Span::call_site()));
        path.leading_colon = Some(Default::default());
        path
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::crate_root(name));
        }
        let module = name.strip_prefix(ENGINE_PREFIX)?;
        if !deps.contains_key(CORE_ENGINE_NAME) {
            return None;
        }
        let mut path = Self::crate_root(CORE_ENGINE_NAME);
        path.segments
            .push(syn::Ident::new(module, Span::call_site()).into());
        Some(path)
    }

    /// Return a [`syn::Path`] for the package named `name` as resolved from this
    /// crate's Cargo.toml. See the type documentation for the resolution order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        if let Some(Item::Table(deps)) = self.manifest.get("dependencies")
            && let Some(val) = Self::find_in_deps(deps, name)
        {
            return val;
        }

        if let Some(Item::Table(deps)) = self.manifest.get("dev-dependencies")
            && let Some(val) = Self::find_in_deps(deps, name)
        {
            return val;
        }

        Self::crate_root(name)
    }

    /// Run `func` with the cached [`Manifest`] of the caller's Cargo.toml.
    ///
    /// The manifest is parsed once per modification time. Callers should
    /// resolve paths once per macro invocation and pass them along.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let manifest_path = Self::get_manifest_path();
        let modified_time = Self::get_manifest_modified_time(&manifest_path)
            .unwrap_or(SystemTime::UNIX_EPOCH);

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);

        if let Some(manifest) = manifests.get(&manifest_path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }

        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read_manifest(&manifest_path),
            modified_time,
        };

        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(manifest_path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::Manifest;

    fn path_string(path: &syn::Path) -> String {
        let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        let prefix = if path.leading_colon.is_some() { "::" } else { "" };
        format!("{prefix}{}", segments.join("::"))
    }

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: toml_edit::Document::parse(Box::<str>::from(text)).unwrap(),
            modified_time: std::time::SystemTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn direct_dependency() {
        let m = manifest("[dependencies]\njb_bind = \"0.0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("jb_bind")), "::jb_bind");
    }

    #[test]
    fn through_core_facade() {
        let m = manifest("[dependencies]\njb_core = { path = \"..\" }\n");
        assert_eq!(path_string(&m.get_crate_path("jb_bind")), "::jb_core::bind");
    }

    #[test]
    fn dev_dependency_and_fallback() {
        let m = manifest("[dev-dependencies]\njb_core = \"0.0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("jb_utils")), "::jb_core::utils");
        assert_eq!(path_string(&m.get_crate_path("serde")), "::serde");
    }
}
