use thiserror::Error;

/// Shared error taxonomy for every converter and for contract resolution.
///
/// All variants are terminal for the current decode/encode call: nothing
/// here is retried, and a malformed value is never silently defaulted.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Two bindings on one type claim the same wire name. A static
    /// configuration defect, surfaced when the type's mapping is resolved.
    #[error("wire field {wire:?} is bound more than once on {type_name}")]
    DuplicateBinding {
        type_name: &'static str,
        wire: &'static str,
    },

    /// No usable target instance could be obtained for a decode.
    #[error("cannot instantiate target type {0}")]
    Instantiation(&'static str),

    /// A value of the wrong shape was supplied; carries the received kind.
    #[error("unexpected value: expected {expected}, got {got}")]
    UnexpectedType { expected: &'static str, got: String },

    /// JSON null where the target type cannot represent absence.
    #[error("unexpected null: {0} is not nullable")]
    UnexpectedNull(&'static str),

    /// A converter was invoked in a direction it does not implement.
    /// A programming/configuration error, not a data error.
    #[error("{0} is not supported by this converter")]
    Unsupported(&'static str),

    /// `ZoneKind::Unspecified` used as a normalization target.
    #[error("zone kind Unspecified is not a valid normalization target")]
    UnspecifiedZoneKind,

    /// An offset-less wall-clock time that does not exist in the reference
    /// zone (spring-forward gap).
    #[error("wall-clock time {wall_clock} does not exist in zone {zone}")]
    NonexistentLocalTime { wall_clock: String, zone: String },

    /// Unparseable date or date-time text.
    #[error("invalid date-time literal {literal:?}: {detail}")]
    InvalidDateTime { literal: String, detail: String },

    /// A converter produced a value of a type other than the one requested.
    #[error("converter produced a value of the wrong type, expected {0}")]
    ConverterMismatch(&'static str),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
