//! Field-presence tracking for JSON decoding.
//!
//! A trackable record reports, after decoding, exactly which of its bound
//! fields were explicitly present in the source document — the piece of
//! information partial-update ("PATCH") handlers need and a plain decode
//! discards. Presence is tracked per in-memory field name in a
//! [`DefinedFields`] set owned by the record; the [`TrackedConverter`]
//! rebuilds that set on every decode.

mod converter;
mod defined;

pub use converter::TrackedConverter;
pub use defined::DefinedFields;

use json_convert_core::Record;

/// Capability a record implements to opt into presence tracking.
///
/// The defined-fields set is bookkeeping, not wire data: it must not
/// appear among the type's bindings (the mapping skips it by field name)
/// and is skipped from any serde derive on the record.
pub trait Trackable: Record + Default {
    fn defined_fields(&self) -> &DefinedFields;
    fn defined_fields_mut(&mut self) -> &mut DefinedFields;
}
