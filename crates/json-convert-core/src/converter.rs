use std::any::{Any, TypeId};

use serde_json::Value;

use crate::codec::JsonCodec;
use crate::error::ConvertError;

/// Registration contract for a value converter.
///
/// A converter claims target types through [`can_handle`](Self::can_handle)
/// and declares which directions it implements through
/// [`can_decode`](Self::can_decode) / [`can_encode`](Self::can_encode).
/// The codec never dispatches into a direction a converter has declined,
/// so the default method bodies only fire on a direct misuse — they signal
/// the unsupported direction instead of guessing.
pub trait Converter: Send + Sync {
    /// Whether this converter handles the given target type.
    fn can_handle(&self, ty: TypeId) -> bool;

    fn can_decode(&self) -> bool {
        true
    }

    fn can_encode(&self) -> bool {
        true
    }

    /// Decode `node` into a value of type `ty`, reusing `existing` when the
    /// converter supports partial updates. Nested values are decoded back
    /// through `codec`.
    fn decode(
        &self,
        node: &Value,
        existing: Option<Box<dyn Any>>,
        ty: TypeId,
        codec: &JsonCodec,
    ) -> Result<Box<dyn Any>, ConvertError> {
        let _ = (node, existing, ty, codec);
        Err(ConvertError::Unsupported("decode"))
    }

    /// Encode `value` to a JSON node. Nested values are encoded back
    /// through `codec`.
    fn encode(&self, value: &dyn Any, codec: &JsonCodec) -> Result<Value, ConvertError> {
        let _ = (value, codec);
        Err(ConvertError::Unsupported("encode"))
    }
}
