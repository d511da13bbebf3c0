use alloc::string::String;
use core::net::IpAddr;
use std::path::PathBuf;
use std::time::SystemTime;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use url::Url;
use uuid::Uuid;

use crate::impls::NonGenericTypeInfoCell;
use crate::info::{ScalarInfo, TypeInfo, Typed};

macro_rules! impl_scalar {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Typed for $ty {
                fn type_info() -> &'static TypeInfo {
                    static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                    CELL.get_or_init(|| TypeInfo::Scalar(ScalarInfo::new::<Self>()))
                }
            }
        )+
    };
    (without_default: $($ty:ty),+ $(,)?) => {
        $(
            impl Typed for $ty {
                fn type_info() -> &'static TypeInfo {
                    static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                    CELL.get_or_init(|| TypeInfo::Scalar(ScalarInfo::without_default::<Self>()))
                }
            }
        )+
    };
}

impl_scalar!(bool, char, String, PathBuf);
impl_scalar!(i8, i16, i32, i64, i128, isize);
impl_scalar!(u8, u16, u32, u64, u128, usize);
impl_scalar!(f32, f64);
impl_scalar!(NaiveDate, NaiveTime, NaiveDateTime, DateTime<Utc>, DateTime<FixedOffset>);
impl_scalar!(without_default: Uuid, IpAddr, SystemTime, Url);
