use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, RwLock};

use indexmap::IndexMap;

use crate::error::ConvertError;
use crate::record::{Property, Record};

/// Field name every mapping skips. The defined-fields set is decode
/// bookkeeping, never wire data.
pub const DEFINED_FIELDS_FIELD: &str = "defined_fields";

/// Validated bound field mapping for one record type.
///
/// Entries keep declaration order. Wire names are unique within the table;
/// a duplicate aborts construction rather than silently keeping either
/// binding.
pub struct PropertyTable<T> {
    map: IndexMap<&'static str, Property<T>>,
}

impl<T: Record> PropertyTable<T> {
    fn build() -> Result<Self, ConvertError> {
        let mut map = IndexMap::new();
        for property in T::properties() {
            if property.field_name == DEFINED_FIELDS_FIELD {
                continue;
            }
            let wire = property.wire_name;
            if map.insert(wire, property).is_some() {
                return Err(ConvertError::DuplicateBinding {
                    type_name: T::type_name(),
                    wire,
                });
            }
        }
        Ok(Self { map })
    }
}

impl<T> PropertyTable<T> {
    /// Bindings in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = &Property<T>> {
        self.map.values()
    }

    pub fn get(&self, wire_name: &str) -> Option<&Property<T>> {
        self.map.get(wire_name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

// manual impl: the bindings are fn pointers, only the wire names are
// worth printing
impl<T> fmt::Debug for PropertyTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PropertyTable")
            .field(&self.map.keys().collect::<Vec<_>>())
            .finish()
    }
}

type TableCell = Arc<dyn Any + Send + Sync>;

static TABLES: LazyLock<RwLock<HashMap<TypeId, TableCell>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Resolve the cached bound field mapping for `T`, computing and validating
/// it on first use.
///
/// Concurrent first use may build the table more than once; whichever
/// insert lands first is kept and a complete table is returned either way.
/// The table is computed outside the write lock, and no lock is held once
/// this function returns, so decoding through the table can recurse back
/// into the codec freely. Tables are never invalidated: bindings are static
/// for the life of the process.
pub fn property_table<T: Record>() -> Result<Arc<PropertyTable<T>>, ConvertError> {
    let key = TypeId::of::<T>();
    if let Ok(tables) = TABLES.read() {
        if let Some(cell) = tables.get(&key) {
            if let Ok(table) = Arc::downcast::<PropertyTable<T>>(cell.clone()) {
                return Ok(table);
            }
        }
    }

    let built = Arc::new(PropertyTable::<T>::build()?);
    let mut tables = match TABLES.write() {
        Ok(tables) => tables,
        Err(poisoned) => poisoned.into_inner(),
    };
    let cell = tables
        .entry(key)
        .or_insert_with(|| built.clone() as TableCell)
        .clone();
    drop(tables);
    Ok(Arc::downcast::<PropertyTable<T>>(cell).unwrap_or(built))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings;

    #[derive(Default)]
    struct Plain {
        id: i64,
        label: String,
    }

    impl Record for Plain {
        fn properties() -> Vec<Property<Self>> {
            bindings!(Plain {
                id as "Id": i64,
                label as "Label": String,
            })
        }
    }

    #[derive(Default)]
    struct Clashing {
        a: i64,
        b: i64,
    }

    impl Record for Clashing {
        fn properties() -> Vec<Property<Self>> {
            bindings!(Clashing {
                a as "Value": i64,
                b as "Value": i64,
            })
        }
    }

    #[test]
    fn table_preserves_declaration_order_and_caches() {
        let first = property_table::<Plain>().unwrap();
        let names: Vec<_> = first.properties().map(|p| p.wire_name).collect();
        assert_eq!(names, vec!["Id", "Label"]);

        let second = property_table::<Plain>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn duplicate_wire_name_fails_every_resolution() {
        for _ in 0..3 {
            let err = property_table::<Clashing>().unwrap_err();
            match err {
                ConvertError::DuplicateBinding { wire, .. } => assert_eq!(wire, "Value"),
                other => panic!("expected DuplicateBinding, got {other}"),
            }
        }
    }

    #[test]
    fn table_debug_lists_the_wire_names() {
        let table = property_table::<Plain>().unwrap();
        assert_eq!(format!("{table:?}"), r#"PropertyTable(["Id", "Label"])"#);
    }

    #[derive(Default)]
    struct WithBookkeeping {
        id: i64,
        defined_fields: i64,
    }

    impl Record for WithBookkeeping {
        fn properties() -> Vec<Property<Self>> {
            bindings!(WithBookkeeping {
                id as "Id": i64,
                defined_fields as "DefinedFields": i64,
            })
        }
    }

    #[test]
    fn defined_fields_binding_is_never_wire_data() {
        let table = property_table::<WithBookkeeping>().unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.get("DefinedFields").is_none());
    }
}
