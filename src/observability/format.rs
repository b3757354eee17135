//! Log line layout.
//!
//! ```text
//! 2024-05-01 17:03:12 - INFO - [3f9a1c2e] - Download complete elapsed=0.41s
//! ```
//!
//! Timestamps are the raw UTC instant plus a fixed hour offset, rendered as a
//! naive date/time. There is no timezone database lookup and no DST handling.

use std::fmt::{self, Write as _};

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::observability::correlation::{request_id_in_scope, SYSTEM_REQUEST_ID};

/// Timestamp renderer with a fixed offset from UTC.
#[derive(Debug, Clone)]
pub struct FixedOffsetTime {
    offset: TimeDelta,
    pattern: String,
}

impl FixedOffsetTime {
    pub fn new(offset_hours: i64, pattern: impl Into<String>) -> Self {
        Self {
            offset: TimeDelta::hours(offset_hours),
            pattern: pattern.into(),
        }
    }

    /// Render `instant` shifted by the offset.
    pub fn render(&self, instant: DateTime<Utc>) -> String {
        let mut out = String::new();
        let _ = self.write_instant(&mut out, instant);
        out
    }

    fn write_instant(&self, out: &mut impl fmt::Write, instant: DateTime<Utc>) -> fmt::Result {
        let shifted = instant.naive_utc() + self.offset;
        write!(out, "{}", shifted.format(&self.pattern))
    }
}

impl FormatTime for FixedOffsetTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        self.write_instant(w, Utc::now())
    }
}

/// `<time> - <LEVEL> - [<request id>] - <message> <fields>`
#[derive(Debug, Clone)]
pub struct CorrelatedFormat {
    timer: FixedOffsetTime,
}

impl CorrelatedFormat {
    pub fn new(timer: FixedOffsetTime) -> Self {
        Self { timer }
    }
}

fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "TRACE",
        Level::DEBUG => "DEBUG",
        Level::INFO => "INFO",
        Level::WARN => "WARNING",
        Level::ERROR => "ERROR",
    }
}

impl<S, N> FormatEvent<S, N> for CorrelatedFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        self.timer.format_time(&mut writer)?;

        let request_id = request_id_in_scope(ctx.event_scope());
        write!(
            writer,
            " - {} - [{}] - ",
            level_name(event.metadata().level()),
            request_id.as_deref().unwrap_or(SYSTEM_REQUEST_ID)
        )?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_adds_eight_hours_across_midnight() {
        let timer = FixedOffsetTime::new(8, "%Y-%m-%d %H:%M:%S");
        let instant = Utc.with_ymd_and_hms(2024, 12, 31, 20, 30, 5).unwrap();
        assert_eq!(timer.render(instant), "2025-01-01 04:30:05");
    }

    #[test]
    fn test_offset_ignores_dst_transitions() {
        // A real zone would shift by 7 or 9 hours around a DST change; the
        // fixed offset never does.
        let timer = FixedOffsetTime::new(8, "%H:%M");
        let march = Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap();
        let october = Utc.with_ymd_and_hms(2024, 10, 27, 0, 0, 0).unwrap();
        assert_eq!(timer.render(march), "08:00");
        assert_eq!(timer.render(october), "08:00");
    }

    #[test]
    fn test_custom_pattern() {
        let timer = FixedOffsetTime::new(8, "%d/%m %Hh");
        let instant = Utc.with_ymd_and_hms(2024, 2, 29, 1, 0, 0).unwrap();
        assert_eq!(timer.render(instant), "29/02 09h");
    }

    #[test]
    fn test_level_names() {
        assert_eq!(level_name(&Level::WARN), "WARNING");
        assert_eq!(level_name(&Level::ERROR), "ERROR");
        assert_eq!(level_name(&Level::INFO), "INFO");
    }
}
