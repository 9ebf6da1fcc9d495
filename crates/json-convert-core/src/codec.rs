use std::any::{Any, TypeId};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::contract::{ContractResolver, DefaultResolver};
use crate::converter::Converter;
use crate::error::ConvertError;

/// Host facade over the registered converters and the contract resolver.
///
/// Dispatch order is registration order; the first converter that claims a
/// type in the requested direction wins. Types no converter claims flow
/// through serde untouched. The codec is shared across threads; converters
/// are required to be `Send + Sync` and all calls are synchronous.
pub struct JsonCodec {
    converters: Vec<Arc<dyn Converter>>,
    resolver: Arc<dyn ContractResolver>,
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonCodec {
    pub fn new() -> Self {
        Self {
            converters: Vec::new(),
            resolver: Arc::new(DefaultResolver),
        }
    }

    pub fn with_converter(mut self, converter: impl Converter + 'static) -> Self {
        self.converters.push(Arc::new(converter));
        self
    }

    pub fn with_resolver(mut self, resolver: impl ContractResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    pub fn resolver(&self) -> &dyn ContractResolver {
        self.resolver.as_ref()
    }

    /// Decode a document node into a fresh `T`.
    pub fn decode_as<T: DeserializeOwned + 'static>(&self, node: &Value) -> Result<T, ConvertError> {
        let ty = TypeId::of::<T>();
        if let Some(converter) = self.decoder_for(ty) {
            return unbox::<T>(converter.decode(node, None, ty, self)?);
        }
        Ok(serde_json::from_value(node.clone())?)
    }

    /// Decode a document node into an existing instance of `T`.
    ///
    /// Partial-update semantics are a converter behavior; without a
    /// registered converter for `T` the existing instance is replaced by a
    /// plain decode.
    pub fn decode_into<T: DeserializeOwned + 'static>(
        &self,
        node: &Value,
        existing: T,
    ) -> Result<T, ConvertError> {
        let ty = TypeId::of::<T>();
        if let Some(converter) = self.decoder_for(ty) {
            return unbox::<T>(converter.decode(node, Some(Box::new(existing)), ty, self)?);
        }
        Ok(serde_json::from_value(node.clone())?)
    }

    /// Encode a value to a JSON node.
    pub fn encode_as<T: Serialize + 'static>(&self, value: &T) -> Result<Value, ConvertError> {
        let ty = TypeId::of::<T>();
        for converter in &self.converters {
            if converter.can_handle(ty) && converter.can_encode() {
                return converter.encode(value, self);
            }
        }
        Ok(serde_json::to_value(value)?)
    }

    fn decoder_for(&self, ty: TypeId) -> Option<&dyn Converter> {
        self.converters
            .iter()
            .find(|converter| converter.can_handle(ty) && converter.can_decode())
            .map(|converter| converter.as_ref())
    }
}

fn unbox<T: 'static>(boxed: Box<dyn Any>) -> Result<T, ConvertError> {
    match boxed.downcast::<T>() {
        Ok(value) => Ok(*value),
        Err(_) => Err(ConvertError::ConverterMismatch(std::any::type_name::<T>())),
    }
}
