//! Extensions to a serde_json encode/decode pipeline.
//!
//! Four concerns, one registration surface:
//!
//! - **presence-tracked decoding** — after a decode, a trackable record
//!   knows exactly which of its bound fields were present in the document
//!   ([`TrackedConverter`], [`Trackable`], [`DefinedFields`]);
//! - **zone-kind normalization** — date-times are normalized to a target
//!   zone kind on both directions, with a reference-zone fallback for
//!   offset-less wire values ([`TimeKindConverter`]);
//! - **calendar dates** — `YYYY-MM-DD` with floor-to-day truncation
//!   ([`ShortDateConverter`]);
//! - **field suppression** — named wire fields are excluded from encode
//!   output without touching decode ([`IgnoreFieldsResolver`]).
//!
//! Everything is registered on a [`JsonCodec`]; types no converter claims
//! flow through serde untouched.

pub use json_convert_core::{
    bindings, property_table, Contract, ContractEntry, ContractResolver, ConvertError, Converter,
    DefaultResolver, IgnoreFieldsResolver, JsonCodec, NodeKind, Property, PropertyPolicy,
    PropertyTable, Record, RecordConverter, ShouldSerialize, DEFINED_FIELDS_FIELD,
};
pub use json_convert_datetime::{ShortDateConverter, TimeKindConverter, ZoneKind};
pub use json_convert_tracked::{DefinedFields, Trackable, TrackedConverter};
