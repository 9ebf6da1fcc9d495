use std::any::{Any, TypeId};

use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;

use json_convert_core::{ConvertError, Converter, JsonCodec, NodeKind};

use crate::kind::{parse_iso, to_local, to_utc, Parsed, ZoneKind};

/// Date-time codec that normalizes zone kind on both directions.
///
/// Wire payloads frequently omit zone information; treating every
/// offset-less value as UTC would misread legacy data recorded in a fixed
/// zone, so the UTC path interprets those values in the reference zone
/// while the local path relabels them without arithmetic. Handled target
/// types are `DateTime<Utc>`, `DateTime<Local>`, `NaiveDateTime` and their
/// `Option`s; everything else flows through the underlying serde codec
/// unchanged.
pub struct TimeKindConverter {
    read_kind: ZoneKind,
    write_kind: ZoneKind,
}

impl Default for TimeKindConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeKindConverter {
    /// UTC on both directions.
    pub fn new() -> Self {
        Self {
            read_kind: ZoneKind::Utc,
            write_kind: ZoneKind::Utc,
        }
    }

    /// Explicit read kind; writes stay UTC.
    pub fn with_read_kind(read_kind: ZoneKind) -> Result<Self, ConvertError> {
        Self::with_kinds(read_kind, ZoneKind::Utc)
    }

    /// Explicit kinds for both directions. `Unspecified` is rejected as a
    /// target on either side.
    pub fn with_kinds(read_kind: ZoneKind, write_kind: ZoneKind) -> Result<Self, ConvertError> {
        if read_kind == ZoneKind::Unspecified || write_kind == ZoneKind::Unspecified {
            return Err(ConvertError::UnspecifiedZoneKind);
        }
        Ok(Self {
            read_kind,
            write_kind,
        })
    }

    pub fn read_kind(&self) -> ZoneKind {
        self.read_kind
    }

    pub fn write_kind(&self) -> ZoneKind {
        self.write_kind
    }

    fn normalize(parsed: Parsed, target: ZoneKind) -> Result<Normalized, ConvertError> {
        match target {
            ZoneKind::Utc => to_utc(parsed).map(Normalized::Utc),
            ZoneKind::Local => to_local(parsed).map(Normalized::Local),
            // unreachable by construction, but never silently defaulted
            ZoneKind::Unspecified => Err(ConvertError::UnspecifiedZoneKind),
        }
    }
}

/// A value normalized to one of the two valid target kinds.
#[derive(Debug, Clone, Copy)]
enum Normalized {
    Utc(DateTime<Utc>),
    Local(DateTime<Local>),
}

impl Normalized {
    fn as_utc(self) -> DateTime<Utc> {
        match self {
            Normalized::Utc(dt) => dt,
            Normalized::Local(dt) => dt.with_timezone(&Utc),
        }
    }

    fn as_local(self) -> DateTime<Local> {
        match self {
            Normalized::Utc(dt) => dt.with_timezone(&Local),
            Normalized::Local(dt) => dt,
        }
    }

    fn as_naive(self) -> NaiveDateTime {
        match self {
            Normalized::Utc(dt) => dt.naive_utc(),
            Normalized::Local(dt) => dt.naive_local(),
        }
    }

    fn format(self) -> String {
        match self {
            Normalized::Utc(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            Normalized::Local(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, false),
        }
    }
}

/// The value's own zone kind, for the write-side normalization. `None`
/// means the value encodes JSON null; a missing outer `Option` means the
/// type is not a handled date-time type.
fn own_form(value: &dyn Any) -> Option<Option<Parsed>> {
    if let Some(dt) = value.downcast_ref::<DateTime<Utc>>() {
        return Some(Some(Parsed::Offset(dt.fixed_offset())));
    }
    if let Some(dt) = value.downcast_ref::<DateTime<Local>>() {
        return Some(Some(Parsed::Offset(dt.fixed_offset())));
    }
    if let Some(naive) = value.downcast_ref::<NaiveDateTime>() {
        return Some(Some(Parsed::Unspecified(*naive)));
    }
    if let Some(opt) = value.downcast_ref::<Option<DateTime<Utc>>>() {
        return Some(opt.map(|dt| Parsed::Offset(dt.fixed_offset())));
    }
    if let Some(opt) = value.downcast_ref::<Option<DateTime<Local>>>() {
        return Some(opt.map(|dt| Parsed::Offset(dt.fixed_offset())));
    }
    if let Some(opt) = value.downcast_ref::<Option<NaiveDateTime>>() {
        return Some(opt.map(Parsed::Unspecified));
    }
    None
}

impl Converter for TimeKindConverter {
    fn can_handle(&self, ty: TypeId) -> bool {
        ty == TypeId::of::<DateTime<Utc>>()
            || ty == TypeId::of::<DateTime<Local>>()
            || ty == TypeId::of::<NaiveDateTime>()
            || ty == TypeId::of::<Option<DateTime<Utc>>>()
            || ty == TypeId::of::<Option<DateTime<Local>>>()
            || ty == TypeId::of::<Option<NaiveDateTime>>()
    }

    fn decode(
        &self,
        node: &Value,
        _existing: Option<Box<dyn Any>>,
        ty: TypeId,
        _codec: &JsonCodec,
    ) -> Result<Box<dyn Any>, ConvertError> {
        if node.is_null() {
            if ty == TypeId::of::<Option<DateTime<Utc>>>() {
                return Ok(Box::new(None::<DateTime<Utc>>));
            }
            if ty == TypeId::of::<Option<DateTime<Local>>>() {
                return Ok(Box::new(None::<DateTime<Local>>));
            }
            if ty == TypeId::of::<Option<NaiveDateTime>>() {
                return Ok(Box::new(None::<NaiveDateTime>));
            }
            return Err(ConvertError::UnexpectedNull("date-time"));
        }

        let text = node.as_str().ok_or_else(|| ConvertError::UnexpectedType {
            expected: "string",
            got: NodeKind::of(node).to_string(),
        })?;
        let normalized = Self::normalize(parse_iso(text)?, self.read_kind)?;

        if ty == TypeId::of::<DateTime<Utc>>() {
            return Ok(Box::new(normalized.as_utc()));
        }
        if ty == TypeId::of::<Option<DateTime<Utc>>>() {
            return Ok(Box::new(Some(normalized.as_utc())));
        }
        if ty == TypeId::of::<DateTime<Local>>() {
            return Ok(Box::new(normalized.as_local()));
        }
        if ty == TypeId::of::<Option<DateTime<Local>>>() {
            return Ok(Box::new(Some(normalized.as_local())));
        }
        if ty == TypeId::of::<NaiveDateTime>() {
            return Ok(Box::new(normalized.as_naive()));
        }
        if ty == TypeId::of::<Option<NaiveDateTime>>() {
            return Ok(Box::new(Some(normalized.as_naive())));
        }
        Err(ConvertError::Unsupported("decode of an unhandled type"))
    }

    fn encode(&self, value: &dyn Any, _codec: &JsonCodec) -> Result<Value, ConvertError> {
        match own_form(value) {
            Some(Some(parsed)) => {
                let normalized = Self::normalize(parsed, self.write_kind)?;
                Ok(Value::String(normalized.format()))
            }
            Some(None) => Ok(Value::Null),
            None => Err(ConvertError::Unsupported("encode of an unhandled type")),
        }
    }
}
