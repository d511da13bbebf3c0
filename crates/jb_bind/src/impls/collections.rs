use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::vec::Vec;
use core::hash::{BuildHasher, Hash};
use std::collections::{HashMap, HashSet};

use crate::Bindable;
use crate::impls::GenericTypeInfoCell;
use crate::info::{ListInfo, MapInfo, Mapping, Sequence, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// Sequences

macro_rules! impl_sequence {
    ($ty:ident<T $(, $s:ident)?> where $($bound:path),* ; $push:ident) => {
        impl<T $(, $s)?> Sequence for $ty<T $(, $s)?>
        where
            T: Typed $(+ $bound)*,
            $($s: BuildHasher + Default + Send + Sync + 'static,)?
        {
            type Item = T;

            fn items(&self) -> Box<dyn Iterator<Item = &dyn Bindable> + '_> {
                Box::new(self.iter().map(|item| item as &dyn Bindable))
            }

            fn push_item(&mut self, item: T) {
                self.$push(item);
            }
        }

        impl<T $(, $s)?> Typed for $ty<T $(, $s)?>
        where
            T: Typed $(+ $bound)*,
            $($s: BuildHasher + Default + Send + Sync + 'static,)?
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| TypeInfo::List(ListInfo::new::<Self>()))
            }
        }
    };
}

impl_sequence!(Vec<T> where ; push);
impl_sequence!(VecDeque<T> where ; push_back);
impl_sequence!(BTreeSet<T> where Ord ; insert);
impl_sequence!(HashSet<T, S> where Eq, Hash ; insert);

// -----------------------------------------------------------------------------
// Maps

macro_rules! impl_mapping {
    ($ty:ident<K, V $(, $s:ident)?> where $($bound:path),*) => {
        impl<K, V $(, $s)?> Mapping for $ty<K, V $(, $s)?>
        where
            K: Typed $(+ $bound)*,
            V: Typed,
            $($s: BuildHasher + Default + Send + Sync + 'static,)?
        {
            type Key = K;
            type Value = V;

            fn entries(&self) -> Box<dyn Iterator<Item = (&dyn Bindable, &dyn Bindable)> + '_> {
                Box::new(
                    self.iter()
                        .map(|(k, v)| (k as &dyn Bindable, v as &dyn Bindable)),
                )
            }

            fn insert_entry(&mut self, key: K, value: V) {
                self.insert(key, value);
            }
        }

        impl<K, V $(, $s)?> Typed for $ty<K, V $(, $s)?>
        where
            K: Typed $(+ $bound)*,
            V: Typed,
            $($s: BuildHasher + Default + Send + Sync + 'static,)?
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| TypeInfo::Map(MapInfo::new::<Self>()))
            }
        }
    };
}

impl_mapping!(BTreeMap<K, V> where Ord);
impl_mapping!(HashMap<K, V, S> where Eq, Hash);

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::info::{Mapping, Sequence, Typed};

    #[test]
    fn list_info_pushes_and_iterates() {
        let info = <Vec<i32>>::type_info().as_list().unwrap();
        let mut list = info.new_list();
        info.push(&mut *list, alloc::boxed::Box::new(4_i32)).unwrap();
        assert!(info.push(&mut *list, alloc::boxed::Box::new(4_u8)).is_err());

        let items: Vec<i32> = info
            .items(&*list)
            .unwrap()
            .map(|item| *item.downcast_ref::<i32>().unwrap())
            .collect();
        assert_eq!(items, [4]);
        assert_eq!(vec![1, 2].items().count(), 2);
    }

    #[test]
    fn map_info_entries() {
        let mut map = BTreeMap::new();
        map.insert_entry(String::from("b"), 2_u8);
        map.insert_entry(String::from("a"), 1_u8);

        let info = <BTreeMap<String, u8>>::type_info().as_map().unwrap();
        assert_eq!(info.key_info().type_path(), "alloc::string::String");
        let keys: Vec<&str> = info
            .entries(&map)
            .unwrap()
            .map(|(k, _)| k.downcast_ref::<String>().unwrap().as_str())
            .collect();
        assert_eq!(keys, ["a", "b"]);
    }
}
