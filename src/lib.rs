#![doc = include_str!("../README.md")]
#![no_std]

pub use jb_bind as bind;
pub use jb_utils as utils;
