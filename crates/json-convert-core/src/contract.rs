use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};

use crate::codec::JsonCodec;
use crate::converter::Converter;
use crate::error::ConvertError;
use crate::metadata::property_table;
use crate::record::{Property, Record};

/// Per-entry serialization predicate of a contract entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShouldSerialize {
    #[default]
    Always,
    Never,
}

/// The resolver-visible part of one contract entry.
#[derive(Debug, Clone)]
pub struct PropertyPolicy {
    pub wire_name: &'static str,
    pub field_name: &'static str,
    pub should_serialize: ShouldSerialize,
}

/// Extension point over contract construction.
///
/// Every field-level entry of every record contract the codec builds is
/// passed through the resolver, which may override its serialization
/// predicate. Entries are never removed: a suppressed entry still exists
/// for decoding.
pub trait ContractResolver: Send + Sync {
    fn resolve_property(&self, policy: PropertyPolicy) -> PropertyPolicy {
        policy
    }
}

/// Resolver that applies no overrides.
pub struct DefaultResolver;

impl ContractResolver for DefaultResolver {}

/// Suppresses serialization of the named wire fields.
///
/// Suppressed entries are marked never-serialize rather than dropped, so
/// documents carrying those members still decode into the corresponding
/// fields.
pub struct IgnoreFieldsResolver {
    ignored: HashSet<String>,
}

impl IgnoreFieldsResolver {
    pub fn new(ignored: HashSet<String>) -> Self {
        Self { ignored }
    }
}

impl ContractResolver for IgnoreFieldsResolver {
    fn resolve_property(&self, mut policy: PropertyPolicy) -> PropertyPolicy {
        if self.ignored.contains(policy.wire_name) {
            policy.should_serialize = ShouldSerialize::Never;
        }
        policy
    }
}

pub struct ContractEntry<T> {
    pub property: Property<T>,
    pub policy: PropertyPolicy,
}

/// Resolved serialization contract for one record type: the cached bound
/// field mapping paired with resolved per-entry policies.
pub struct Contract<T> {
    entries: Vec<ContractEntry<T>>,
}

impl<T: Record> Contract<T> {
    /// Build the contract from the type's cached mapping, passing every
    /// entry through the resolver.
    pub fn resolve(resolver: &dyn ContractResolver) -> Result<Self, ConvertError> {
        let table = property_table::<T>()?;
        let entries = table
            .properties()
            .map(|property| {
                let policy = resolver.resolve_property(PropertyPolicy {
                    wire_name: property.wire_name,
                    field_name: property.field_name,
                    should_serialize: ShouldSerialize::Always,
                });
                ContractEntry {
                    property: *property,
                    policy,
                }
            })
            .collect();
        Ok(Self { entries })
    }

    pub fn entries(&self) -> impl Iterator<Item = &ContractEntry<T>> {
        self.entries.iter()
    }

    /// Encode a record through the contract. Entries marked never-serialize
    /// are left out of the output object.
    pub fn encode(&self, value: &T, codec: &JsonCodec) -> Result<Value, ConvertError> {
        let mut members = Map::new();
        for entry in &self.entries {
            if entry.policy.should_serialize == ShouldSerialize::Never {
                continue;
            }
            members.insert(
                entry.property.wire_name.to_string(),
                (entry.property.read)(value, codec)?,
            );
        }
        Ok(Value::Object(members))
    }
}

type EncodeFn = fn(&dyn Any, &JsonCodec) -> Result<Value, ConvertError>;

/// Encode-only converter that serializes registered record types through
/// their resolved contracts.
#[derive(Default)]
pub struct RecordConverter {
    handlers: HashMap<TypeId, EncodeFn>,
}

impl RecordConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<T: Record>(mut self) -> Self {
        self.handlers.insert(TypeId::of::<T>(), encode_record::<T>);
        self
    }
}

fn encode_record<T: Record>(value: &dyn Any, codec: &JsonCodec) -> Result<Value, ConvertError> {
    let record = value
        .downcast_ref::<T>()
        .ok_or(ConvertError::ConverterMismatch(T::type_name()))?;
    let contract = Contract::<T>::resolve(codec.resolver())?;
    contract.encode(record, codec)
}

impl Converter for RecordConverter {
    fn can_handle(&self, ty: TypeId) -> bool {
        self.handlers.contains_key(&ty)
    }

    fn can_decode(&self) -> bool {
        false
    }

    fn encode(&self, value: &dyn Any, codec: &JsonCodec) -> Result<Value, ConvertError> {
        match self.handlers.get(&value.type_id()) {
            Some(handler) => handler(value, codec),
            None => Err(ConvertError::Unsupported("encode of an unregistered type")),
        }
    }
}
