//! Stored form of turn deadlines.
//!
//! Deadlines are UTC instants written as
//! `YYYY-MM-DD HH:MM:SS[.fraction] +0000 UTC`, the fraction trimmed of
//! trailing zeros and left out entirely when zero.

use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::errors::domain::{DomainError, ValidationKind};

const DATE_TIME: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const UTC_SUFFIX: &str = " +0000 UTC";

pub fn format_deadline(deadline: OffsetDateTime) -> Result<String, DomainError> {
    let utc = deadline.to_offset(UtcOffset::UTC);
    let mut out = utc.format(DATE_TIME).map_err(|e| {
        DomainError::validation(ValidationKind::InvalidDeadline, format!("format: {e}"))
    })?;

    let nanos = utc.nanosecond();
    if nanos > 0 {
        let fraction = format!("{nanos:09}");
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out.push_str(UTC_SUFFIX);
    Ok(out)
}

pub fn parse_deadline(s: &str) -> Result<OffsetDateTime, DomainError> {
    let invalid = |detail: String| DomainError::validation(ValidationKind::InvalidDeadline, detail);

    let body = s
        .strip_suffix(UTC_SUFFIX)
        .ok_or_else(|| invalid(format!("missing UTC suffix: {s}")))?;
    let (seconds_part, fraction) = match body.split_once('.') {
        Some((head, frac)) => (head, Some(frac)),
        None => (body, None),
    };

    let base = PrimitiveDateTime::parse(seconds_part, DATE_TIME)
        .map_err(|e| invalid(format!("parse {s}: {e}")))?;

    let nanos = match fraction {
        None => 0,
        Some(frac) => {
            if frac.is_empty() || frac.len() > 9 || !frac.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid(format!("bad fraction in {s}")));
            }
            let padded = format!("{frac:0<9}");
            padded
                .parse::<u32>()
                .map_err(|e| invalid(format!("bad fraction in {s}: {e}")))?
        }
    };

    let with_nanos = base
        .replace_nanosecond(nanos)
        .map_err(|e| invalid(format!("bad fraction in {s}: {e}")))?;
    Ok(with_nanos.assume_utc())
}
