use std::any::{Any, TypeId};
use std::collections::HashMap;

use serde_json::Value;

use json_convert_core::{property_table, ConvertError, Converter, JsonCodec, NodeKind};

use crate::Trackable;

type DecodeFn = fn(&Value, Option<Box<dyn Any>>, &JsonCodec) -> Result<Box<dyn Any>, ConvertError>;

/// Decode-only converter for trackable records.
///
/// Applicability is an explicit registration set: every trackable type is
/// announced once with [`with`](Self::with). Decoding replaces the
/// instance's defined-fields set with exactly the bound members present in
/// the document, assigning values for every present non-null member.
#[derive(Default)]
pub struct TrackedConverter {
    handlers: HashMap<TypeId, DecodeFn>,
}

impl TrackedConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trackable record type.
    pub fn with<T: Trackable>(mut self) -> Self {
        self.handlers.insert(TypeId::of::<T>(), decode_tracked::<T>);
        self
    }
}

fn decode_tracked<T: Trackable>(
    node: &Value,
    existing: Option<Box<dyn Any>>,
    codec: &JsonCodec,
) -> Result<Box<dyn Any>, ConvertError> {
    let mut target: T = match existing {
        Some(boxed) => *boxed
            .downcast::<T>()
            .map_err(|_| ConvertError::Instantiation(T::type_name()))?,
        None => T::default(),
    };
    target.defined_fields_mut().clear();

    let table = property_table::<T>()?;
    let members = node.as_object().ok_or_else(|| ConvertError::UnexpectedType {
        expected: "object",
        got: NodeKind::of(node).to_string(),
    })?;

    for property in table.properties() {
        let Some(member) = members.get(property.wire_name) else {
            continue;
        };
        // Present-but-null marks the field as defined and leaves its prior
        // value in place.
        if !member.is_null() {
            (property.assign)(&mut target, member, codec)?;
        }
        target.defined_fields_mut().insert(property.field_name);
    }

    Ok(Box::new(target))
}

impl Converter for TrackedConverter {
    fn can_handle(&self, ty: TypeId) -> bool {
        self.handlers.contains_key(&ty)
    }

    fn can_encode(&self) -> bool {
        false
    }

    fn decode(
        &self,
        node: &Value,
        existing: Option<Box<dyn Any>>,
        ty: TypeId,
        codec: &JsonCodec,
    ) -> Result<Box<dyn Any>, ConvertError> {
        match self.handlers.get(&ty) {
            Some(handler) => handler(node, existing, codec),
            None => Err(ConvertError::Unsupported("decode of an unregistered type")),
        }
    }
}
