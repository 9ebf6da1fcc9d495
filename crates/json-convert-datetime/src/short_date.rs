use std::any::{Any, TypeId};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde_json::Value;

use json_convert_core::{ConvertError, Converter, JsonCodec, NodeKind};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Calendar-date codec: `YYYY-MM-DD` on the wire, day granularity in
/// memory.
///
/// Decoded values are floored to the start of the calendar day — the time
/// of day is discarded, never rounded. Offset-bearing input truncates on
/// its own wall clock. Handled target types are `NaiveDate`,
/// `NaiveDateTime` (midnight), `DateTime<Utc>` and `DateTime<FixedOffset>`
/// (midnight, zero offset), and their `Option`s.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShortDateConverter;

impl ShortDateConverter {
    pub fn new() -> Self {
        Self
    }
}

fn day_from_text(text: &str) -> Result<NaiveDate, ConvertError> {
    if let Ok(date) = NaiveDate::parse_from_str(text, DATE_FORMAT) {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.naive_local().date());
    }
    match NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(naive) => Ok(naive.date()),
        Err(err) => Err(ConvertError::InvalidDateTime {
            literal: text.to_string(),
            detail: err.to_string(),
        }),
    }
}

fn midnight(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

fn type_label(ty: TypeId) -> &'static str {
    if ty == TypeId::of::<NaiveDate>() {
        "NaiveDate"
    } else if ty == TypeId::of::<NaiveDateTime>() {
        "NaiveDateTime"
    } else if ty == TypeId::of::<DateTime<Utc>>() {
        "DateTime<Utc>"
    } else if ty == TypeId::of::<DateTime<FixedOffset>>() {
        "DateTime<FixedOffset>"
    } else {
        "date"
    }
}

/// The calendar day of a handled value, on its own wall clock. `None`
/// encodes JSON null; a missing outer `Option` means the type is not
/// handled.
fn own_day(value: &dyn Any) -> Option<Option<NaiveDate>> {
    if let Some(date) = value.downcast_ref::<NaiveDate>() {
        return Some(Some(*date));
    }
    if let Some(naive) = value.downcast_ref::<NaiveDateTime>() {
        return Some(Some(naive.date()));
    }
    if let Some(dt) = value.downcast_ref::<DateTime<Utc>>() {
        return Some(Some(dt.naive_utc().date()));
    }
    if let Some(dt) = value.downcast_ref::<DateTime<FixedOffset>>() {
        return Some(Some(dt.naive_local().date()));
    }
    if let Some(opt) = value.downcast_ref::<Option<NaiveDate>>() {
        return Some(*opt);
    }
    if let Some(opt) = value.downcast_ref::<Option<NaiveDateTime>>() {
        return Some(opt.map(|naive| naive.date()));
    }
    if let Some(opt) = value.downcast_ref::<Option<DateTime<Utc>>>() {
        return Some(opt.map(|dt| dt.naive_utc().date()));
    }
    if let Some(opt) = value.downcast_ref::<Option<DateTime<FixedOffset>>>() {
        return Some(opt.map(|dt| dt.naive_local().date()));
    }
    None
}

impl Converter for ShortDateConverter {
    fn can_handle(&self, ty: TypeId) -> bool {
        ty == TypeId::of::<NaiveDate>()
            || ty == TypeId::of::<NaiveDateTime>()
            || ty == TypeId::of::<DateTime<Utc>>()
            || ty == TypeId::of::<DateTime<FixedOffset>>()
            || ty == TypeId::of::<Option<NaiveDate>>()
            || ty == TypeId::of::<Option<NaiveDateTime>>()
            || ty == TypeId::of::<Option<DateTime<Utc>>>()
            || ty == TypeId::of::<Option<DateTime<FixedOffset>>>()
    }

    fn decode(
        &self,
        node: &Value,
        _existing: Option<Box<dyn Any>>,
        ty: TypeId,
        _codec: &JsonCodec,
    ) -> Result<Box<dyn Any>, ConvertError> {
        if node.is_null() {
            if ty == TypeId::of::<Option<NaiveDate>>() {
                return Ok(Box::new(None::<NaiveDate>));
            }
            if ty == TypeId::of::<Option<NaiveDateTime>>() {
                return Ok(Box::new(None::<NaiveDateTime>));
            }
            if ty == TypeId::of::<Option<DateTime<Utc>>>() {
                return Ok(Box::new(None::<DateTime<Utc>>));
            }
            if ty == TypeId::of::<Option<DateTime<FixedOffset>>>() {
                return Ok(Box::new(None::<DateTime<FixedOffset>>));
            }
            return Err(ConvertError::UnexpectedNull(type_label(ty)));
        }

        let text = node.as_str().ok_or_else(|| ConvertError::UnexpectedType {
            expected: "string",
            got: NodeKind::of(node).to_string(),
        })?;
        let day = day_from_text(text)?;

        if ty == TypeId::of::<NaiveDate>() {
            return Ok(Box::new(day));
        }
        if ty == TypeId::of::<Option<NaiveDate>>() {
            return Ok(Box::new(Some(day)));
        }
        if ty == TypeId::of::<NaiveDateTime>() {
            return Ok(Box::new(midnight(day)));
        }
        if ty == TypeId::of::<Option<NaiveDateTime>>() {
            return Ok(Box::new(Some(midnight(day))));
        }
        if ty == TypeId::of::<DateTime<Utc>>() {
            return Ok(Box::new(Utc.from_utc_datetime(&midnight(day))));
        }
        if ty == TypeId::of::<Option<DateTime<Utc>>>() {
            return Ok(Box::new(Some(Utc.from_utc_datetime(&midnight(day)))));
        }
        if ty == TypeId::of::<DateTime<FixedOffset>>() {
            return Ok(Box::new(Utc.from_utc_datetime(&midnight(day)).fixed_offset()));
        }
        if ty == TypeId::of::<Option<DateTime<FixedOffset>>>() {
            return Ok(Box::new(Some(
                Utc.from_utc_datetime(&midnight(day)).fixed_offset(),
            )));
        }
        Err(ConvertError::Unsupported("decode of an unhandled type"))
    }

    fn encode(&self, value: &dyn Any, _codec: &JsonCodec) -> Result<Value, ConvertError> {
        match own_day(value) {
            Some(Some(day)) => Ok(Value::String(day.format(DATE_FORMAT).to_string())),
            Some(None) => Ok(Value::Null),
            None => Err(ConvertError::Unsupported("encode of an unhandled type")),
        }
    }
}
