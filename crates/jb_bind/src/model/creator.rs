use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use std::sync::OnceLock;

use jb_utils::hash::HashMap;

use crate::dispatch::TypeStrategy;
use crate::error::BindError;
use crate::format::Formats;
use crate::info::{CreatorInfo, CreatorParamInfo};
use crate::model::property::cached;

/// One parameter of a [`CreatorModel`].
pub struct CreatorParam {
    pub(crate) info: &'static CreatorParamInfo,
    pub(crate) name: String,
    pub(crate) formats: Formats,
    pub(crate) route: OnceLock<Arc<dyn TypeStrategy>>,
}

impl CreatorParam {
    #[inline]
    pub fn info(&self) -> &'static CreatorParamInfo {
        self.info
    }

    /// The document key of the parameter.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn formats(&self) -> &Formats {
        &self.formats
    }

    pub(crate) fn route(
        &self,
        build: impl FnOnce(&Self) -> Result<Arc<dyn TypeStrategy>, BindError>,
    ) -> Result<Arc<dyn TypeStrategy>, BindError> {
        cached(&self.route, true, || build(self))
    }
}

impl fmt::Debug for CreatorParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreatorParam")
            .field("identity", &self.info.identity())
            .field("name", &self.name)
            .field("formats", &self.formats)
            .finish()
    }
}

/// The creator of a class with its parameters indexed by document key.
pub struct CreatorModel {
    pub(crate) info: &'static CreatorInfo,
    pub(crate) params: Vec<CreatorParam>,
    pub(crate) by_name: HashMap<String, usize>,
}

impl CreatorModel {
    #[inline]
    pub fn info(&self) -> &'static CreatorInfo {
        self.info
    }

    /// Parameters in positional order.
    #[inline]
    pub fn params(&self) -> &[CreatorParam] {
        &self.params
    }

    /// Position of the parameter read from `key`.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.by_name.get(key).copied()
    }
}

impl fmt::Debug for CreatorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreatorModel")
            .field("member", &self.info.member())
            .field("params", &self.params)
            .finish()
    }
}
