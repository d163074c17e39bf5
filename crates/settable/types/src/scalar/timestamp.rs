use crate::error::{ValueError, ValueResult};
use crate::settable::{Settable, ToWire};
use crate::state::{Column, Null, State};
use crate::wire::{timestamp_from_wire, WireTimestamp};
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tri-state timestamp, always held in UTC.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Timestamp {
    state: State<DateTime<Utc>>,
}

/// Input shapes accepted by [`Timestamp`].
#[derive(Clone, Debug, PartialEq)]
pub enum TimestampInput {
    Value(DateTime<Utc>),
    /// Seconds since the Unix epoch.
    Unix(i64),
    /// RFC 3339 text, or decimal Unix seconds. Empty text is null.
    Text(String),
    Wire(WireTimestamp),
    Column(Column<DateTime<Utc>>),
    Null,
}

impl Timestamp {
    pub fn new(value: DateTime<Utc>) -> Self {
        Self {
            state: State::Present(value),
        }
    }

    pub fn null() -> Self {
        Self { state: State::Null }
    }

    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    pub fn from_unix(seconds: i64) -> ValueResult<Self> {
        unix_seconds(seconds).map(Self::new)
    }

    pub fn from_unix_nanos(nanos: i64) -> Self {
        Self::new(DateTime::from_timestamp_nanos(nanos))
    }

    pub fn is_unset(&self) -> bool {
        !self.state.is_set()
    }

    pub fn state(&self) -> &State<DateTime<Utc>> {
        &self.state
    }

    /// Seconds since the Unix epoch; 0 when unset or null.
    pub fn unix(&self) -> i64 {
        self.state.as_ref().map_or(0, DateTime::timestamp)
    }

    /// Nanoseconds since the Unix epoch; 0 when unset, null, or outside the
    /// range an `i64` of nanoseconds can represent.
    pub fn unix_nanos(&self) -> i64 {
        self.state
            .as_ref()
            .and_then(DateTime::timestamp_nanos_opt)
            .unwrap_or(0)
    }

    /// Format with a `chrono` format string; empty when unset or null.
    pub fn format(&self, fmt: &str) -> String {
        self.state
            .as_ref()
            .map(|ts| ts.format(fmt).to_string())
            .unwrap_or_default()
    }

    /// RFC 3339 text with a `Z` suffix; empty when unset or null.
    pub fn rfc3339(&self) -> String {
        self.state
            .as_ref()
            .map(|ts| ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            .unwrap_or_default()
    }
}

fn unix_seconds(seconds: i64) -> ValueResult<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0).ok_or_else(|| {
        ValueError::format("timestamp", format!("unix seconds out of range: {seconds}"))
    })
}

/// `None` means the text was empty, which assigns null.
fn parse_timestamp(text: &str) -> ValueResult<Option<DateTime<Utc>>> {
    if text.is_empty() {
        return Ok(None);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }
    match text.parse::<i64>() {
        Ok(seconds) => unix_seconds(seconds).map(Some),
        Err(_) => {
            tracing::debug!(kind = "timestamp", input = %text, "rejected textual input");
            Err(ValueError::format(
                "timestamp",
                format!("{text:?} is neither RFC 3339 nor unix seconds"),
            ))
        }
    }
}

impl Settable for Timestamp {
    type Value = DateTime<Utc>;
    type Input = TimestampInput;
    type Bind = DateTime<Utc>;

    fn set<I: Into<TimestampInput>>(&mut self, input: I) -> ValueResult<()> {
        self.state = match input.into() {
            TimestampInput::Value(value) => State::Present(value),
            TimestampInput::Unix(seconds) => State::Present(unix_seconds(seconds)?),
            TimestampInput::Text(text) => State::from_option(parse_timestamp(&text)?),
            TimestampInput::Wire(wire) => State::Present(timestamp_from_wire(&wire)?),
            TimestampInput::Column(column) => State::from_option(column.into_option()),
            TimestampInput::Null => State::Null,
        };
        Ok(())
    }

    fn get_value(&self) -> DateTime<Utc> {
        self.state.value_or_default()
    }

    fn get_ptr(&self) -> Option<&DateTime<Utc>> {
        self.state.as_ref()
    }

    fn is_set(&self) -> bool {
        self.state.is_set()
    }

    fn is_null(&self) -> bool {
        self.state.is_null()
    }

    fn to_column(&self) -> Column<DateTime<Utc>> {
        self.state.to_column()
    }
}

impl ToWire for Timestamp {
    type Wire = WireTimestamp;

    fn to_wire(&self) -> Option<WireTimestamp> {
        self.state.as_ref().and_then(ToWire::to_wire)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self::new(value)
    }
}

impl From<DateTime<Utc>> for TimestampInput {
    fn from(value: DateTime<Utc>) -> Self {
        TimestampInput::Value(value)
    }
}

impl From<DateTime<FixedOffset>> for TimestampInput {
    fn from(value: DateTime<FixedOffset>) -> Self {
        TimestampInput::Value(value.with_timezone(&Utc))
    }
}

impl From<Option<DateTime<Utc>>> for TimestampInput {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(TimestampInput::Null, TimestampInput::Value)
    }
}

impl From<i64> for TimestampInput {
    fn from(seconds: i64) -> Self {
        TimestampInput::Unix(seconds)
    }
}

impl From<&str> for TimestampInput {
    fn from(text: &str) -> Self {
        TimestampInput::Text(text.to_string())
    }
}

impl From<String> for TimestampInput {
    fn from(text: String) -> Self {
        TimestampInput::Text(text)
    }
}

impl From<Option<&str>> for TimestampInput {
    fn from(text: Option<&str>) -> Self {
        text.map_or(TimestampInput::Null, TimestampInput::from)
    }
}

impl From<WireTimestamp> for TimestampInput {
    fn from(wire: WireTimestamp) -> Self {
        TimestampInput::Wire(wire)
    }
}

impl From<Option<WireTimestamp>> for TimestampInput {
    fn from(wire: Option<WireTimestamp>) -> Self {
        wire.map_or(TimestampInput::Null, TimestampInput::Wire)
    }
}

impl From<Column<DateTime<Utc>>> for TimestampInput {
    fn from(column: Column<DateTime<Utc>>) -> Self {
        TimestampInput::Column(column)
    }
}

impl From<Null> for TimestampInput {
    fn from(_: Null) -> Self {
        TimestampInput::Null
    }
}

impl Serialize for Timestamp {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.state.as_ref() {
            Some(_) => serializer.serialize_str(&self.rfc3339()),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(TimestampVisitor)
    }
}

/// Accepts null, RFC 3339 / unix-seconds text, and integer unix seconds.
struct TimestampVisitor;

impl TimestampVisitor {
    fn assign<E: serde::de::Error>(input: impl Into<TimestampInput>) -> Result<Timestamp, E> {
        let mut ts = Timestamp::default();
        ts.set(input).map_err(E::custom)?;
        Ok(ts)
    }
}

impl<'de> serde::de::Visitor<'de> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null, an RFC 3339 string, or unix seconds")
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Timestamp, E> {
        Ok(Timestamp::null())
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Timestamp, E> {
        Ok(Timestamp::null())
    }

    fn visit_some<D: serde::Deserializer<'de>>(self, deserializer: D) -> Result<Timestamp, D::Error> {
        deserializer.deserialize_any(TimestampVisitor)
    }

    fn visit_str<E: serde::de::Error>(self, text: &str) -> Result<Timestamp, E> {
        Self::assign(text)
    }

    fn visit_i64<E: serde::de::Error>(self, seconds: i64) -> Result<Timestamp, E> {
        Self::assign(seconds)
    }

    fn visit_u64<E: serde::de::Error>(self, seconds: u64) -> Result<Timestamp, E> {
        let seconds = i64::try_from(seconds).map_err(E::custom)?;
        Self::assign(seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn rfc3339_text_to_unix_seconds() {
        let mut ts = Timestamp::default();
        ts.set("2024-01-01T00:00:00Z").unwrap();
        assert_eq!(ts.unix(), 1_704_067_200);
    }

    #[test]
    fn offsets_normalize_to_utc() {
        let mut ts = Timestamp::default();
        ts.set("2024-01-01T03:00:00+03:00").unwrap();
        assert_eq!(ts.unix(), 1_704_067_200);
        assert_eq!(ts.rfc3339(), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn unix_seconds_text_fallback() {
        let mut ts = Timestamp::default();
        ts.set("1704067200").unwrap();
        assert_eq!(ts.get_value(), Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn raw_integer_is_seconds() {
        let mut ts = Timestamp::default();
        ts.set(1_704_067_200_i64).unwrap();
        assert_eq!(ts.rfc3339(), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn empty_text_is_null() {
        let mut ts = Timestamp::now();
        ts.set("").unwrap();
        assert!(ts.is_null());
        assert_eq!(ts.unix(), 0);
        assert_eq!(ts.rfc3339(), "");
    }

    #[test]
    fn malformed_text_keeps_prior_state() {
        let mut ts = Timestamp::from_unix(10).unwrap();
        assert!(ts.set("yesterday").unwrap_err().is_format());
        assert_eq!(ts.unix(), 10);
    }

    #[test]
    fn out_of_range_seconds_are_rejected() {
        let mut ts = Timestamp::default();
        assert!(ts.set(i64::MAX).is_err());
        assert!(!ts.is_set());
        assert!(Timestamp::from_unix(i64::MIN).is_err());
    }

    #[test]
    fn wire_round_trip() {
        let ts = Timestamp::from_unix_nanos(1_704_067_200_123_456_789);
        let wire = ts.to_wire().unwrap();
        assert_eq!(wire.seconds, 1_704_067_200);
        assert_eq!(wire.nanos, 123_456_789);

        let mut back = Timestamp::default();
        back.set(wire).unwrap();
        assert_eq!(back, ts);
        assert_eq!(back.unix_nanos(), 1_704_067_200_123_456_789);

        back.set(None::<WireTimestamp>).unwrap();
        assert!(back.is_null());
        assert!(back.to_wire().is_none());
    }

    #[test]
    fn fixed_offset_input() {
        let local = DateTime::parse_from_rfc3339("2024-06-01T12:00:00-05:00").unwrap();
        let mut ts = Timestamp::default();
        ts.set(local).unwrap();
        assert_eq!(ts.format("%H:%M"), "17:00");
    }

    #[test]
    fn absent_reads_are_epoch_zero() {
        assert_eq!(Timestamp::default().get_value(), DateTime::<Utc>::default());
        assert_eq!(Timestamp::null().unix_nanos(), 0);
        assert_eq!(Timestamp::null().format("%Y"), "");
        assert_eq!(Timestamp::default().to_column(), Column::null());
    }

    #[test]
    fn document_encoding() {
        let ts = Timestamp::from_unix(1_704_067_200).unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2024-01-01T00:00:00Z\"");
        assert_eq!(serde_json::from_str::<Timestamp>(&json).unwrap(), ts);
        assert_eq!(serde_json::from_str::<Timestamp>("1704067200").unwrap(), ts);
        assert!(serde_json::from_str::<Timestamp>("null").unwrap().is_null());
        assert!(serde_json::from_str::<Timestamp>("\"soon\"").is_err());
        assert!(serde_json::from_str::<Timestamp>("true").is_err());
    }

    #[test]
    fn sub_second_precision_survives_document_round_trip() {
        let ts = Timestamp::from_unix_nanos(1_704_067_200_000_000_001);
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(serde_json::from_str::<Timestamp>(&json).unwrap(), ts);
    }
}
