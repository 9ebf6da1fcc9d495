//! Core contracts for the json-convert extension crates.
//!
//! This crate carries the converter registration contract and codec
//! facade, explicit per-type wire bindings with a process-wide cached
//! mapping, and serialization-contract resolution. The companion crates
//! build the presence-tracking decoder and the date/time codecs on top
//! of these pieces.

pub mod codec;
pub mod contract;
pub mod converter;
pub mod error;
pub mod metadata;
pub mod node;
pub mod record;

pub use codec::JsonCodec;
pub use contract::{
    Contract, ContractEntry, ContractResolver, DefaultResolver, IgnoreFieldsResolver,
    PropertyPolicy, RecordConverter, ShouldSerialize,
};
pub use converter::Converter;
pub use error::ConvertError;
pub use metadata::{property_table, PropertyTable, DEFINED_FIELDS_FIELD};
pub use node::NodeKind;
pub use record::{Property, Record};

// Re-exported for `bindings!` expansion.
#[doc(hidden)]
pub use serde_json;
