use chrono::{DateTime, FixedOffset, Local, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use json_convert_core::ConvertError;

/// Zone information carried by a date-time value: expressed in UTC, in the
/// local zone, or carrying no zone information at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneKind {
    Utc,
    Local,
    Unspecified,
}

/// Reference zone for offset-less wire values normalized to UTC. Legacy
/// payloads carry wall-clock times recorded in US Central time.
pub(crate) const REFERENCE_ZONE: Tz = chrono_tz::America::Chicago;

/// A parsed ISO-8601 date-time, keeping whether the text carried zone
/// information.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Parsed {
    Offset(DateTime<FixedOffset>),
    Unspecified(NaiveDateTime),
}

pub(crate) fn parse_iso(text: &str) -> Result<Parsed, ConvertError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(Parsed::Offset(dt));
    }
    match NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(naive) => Ok(Parsed::Unspecified(naive)),
        Err(err) => Err(ConvertError::InvalidDateTime {
            literal: text.to_string(),
            detail: err.to_string(),
        }),
    }
}

/// Normalize to UTC: offset-bearing values convert arithmetically,
/// offset-less values are interpreted in the reference zone first.
pub(crate) fn to_utc(parsed: Parsed) -> Result<DateTime<Utc>, ConvertError> {
    match parsed {
        Parsed::Offset(dt) => Ok(dt.with_timezone(&Utc)),
        Parsed::Unspecified(naive) => {
            let resolved = resolve_local(
                REFERENCE_ZONE.from_local_datetime(&naive),
                naive,
                REFERENCE_ZONE.name(),
            )?;
            Ok(resolved.with_timezone(&Utc))
        }
    }
}

/// Normalize to the local zone: offset-bearing values convert, offset-less
/// values are relabeled as local wall-clock time without arithmetic.
pub(crate) fn to_local(parsed: Parsed) -> Result<DateTime<Local>, ConvertError> {
    match parsed {
        Parsed::Offset(dt) => Ok(dt.with_timezone(&Local)),
        Parsed::Unspecified(naive) => {
            resolve_local(Local.from_local_datetime(&naive), naive, "local")
        }
    }
}

fn resolve_local<Z: TimeZone>(
    result: LocalResult<DateTime<Z>>,
    naive: NaiveDateTime,
    zone: &str,
) -> Result<DateTime<Z>, ConvertError> {
    match result {
        LocalResult::Single(dt) => Ok(dt),
        // Fall-back hour: take the standard-time reading.
        LocalResult::Ambiguous(_, later) => Ok(later),
        LocalResult::None => Err(ConvertError::NonexistentLocalTime {
            wall_clock: naive.to_string(),
            zone: zone.to_string(),
        }),
    }
}
