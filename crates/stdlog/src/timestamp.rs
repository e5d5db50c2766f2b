//! Record timestamps.
//!
//! Timestamps are fixed width with millisecond precision. UTC renders with a
//! `Z` suffix and any other offset as `±HH:MM`, e.g.
//! `2024-03-09T17:04:05.123Z` or `2024-03-09T19:04:05.123+02:00`.

use std::io;

use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;

const UTC_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
);

const OFFSET_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3][offset_hour sign:mandatory]:[offset_minute]"
);

/// Current wall-clock time in the local offset.
///
/// Falls back to UTC when the local offset cannot be determined soundly, which
/// is the case on some platforms once the process has spawned threads.
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Renders `at` into `out`.
pub fn write_timestamp<W>(out: &mut W, at: OffsetDateTime) -> Result<usize, time::error::Format>
where
    W: io::Write,
{
    let format = if at.offset().is_utc() {
        UTC_FORMAT
    } else {
        OFFSET_FORMAT
    };
    at.format_into(out, format)
}

/// Renders `at` into a new string.
pub fn format(at: OffsetDateTime) -> Result<String, time::error::Format> {
    let mut out = Vec::with_capacity(32);
    write_timestamp(&mut out, at)?;
    // The format description only emits ASCII.
    Ok(String::from_utf8_lossy(&out).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn utc_uses_z_suffix() {
        let at = datetime!(2024-03-09 17:04:05.123 UTC);
        assert_eq!(format(at).unwrap(), "2024-03-09T17:04:05.123Z");
    }

    #[test]
    fn positive_offset_is_rendered() {
        let at = datetime!(2024-03-09 19:04:05.123 +02:00);
        assert_eq!(format(at).unwrap(), "2024-03-09T19:04:05.123+02:00");
    }

    #[test]
    fn negative_offset_with_minutes_is_rendered() {
        let at = datetime!(2024-03-09 13:34:05.007 -03:30);
        assert_eq!(format(at).unwrap(), "2024-03-09T13:34:05.007-03:30");
    }

    #[test]
    fn milliseconds_truncate_sub_millisecond_precision() {
        let at = datetime!(2024-01-01 00:00:00.9999 UTC);
        assert_eq!(format(at).unwrap(), "2024-01-01T00:00:00.999Z");
    }

    #[test]
    fn fields_are_zero_padded() {
        let at = datetime!(2024-01-02 03:04:05 UTC);
        assert_eq!(format(at).unwrap(), "2024-01-02T03:04:05.000Z");
    }

    #[test]
    fn write_timestamp_reports_length() {
        let mut out = Vec::new();
        let written = write_timestamp(&mut out, datetime!(2024-03-09 17:04:05.123 UTC)).unwrap();
        assert_eq!(written, 24);
        assert_eq!(out.len(), 24);
    }

    #[test]
    fn now_has_fixed_shape() {
        let rendered = format(now()).unwrap();
        assert_eq!(&rendered[4..5], "-");
        assert_eq!(&rendered[10..11], "T");
        assert_eq!(&rendered[19..20], ".");
        assert!(rendered.ends_with('Z') || rendered.len() == 29);
    }
}
