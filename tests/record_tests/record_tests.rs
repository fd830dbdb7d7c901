//! Tests for Record
//!
//! These tests verify:
//! - Expiry is fixed at creation and never slides
//! - Encoding keeps every field (timestamps to the nanosecond)
//! - Decoding rejects missing fields and bad timestamps
//! - Older field names still decode

use chrono::{DateTime, TimeDelta, Utc};
use serde_json::json;
use sessionkv::{Payload, Record, SessionError};

// =============================================================================
// Helper Functions
// =============================================================================

fn base_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-10-19T08:00:00.123456789+00:00")
        .unwrap()
        .with_timezone(&Utc)
}

fn payload(value: serde_json::Value) -> Payload {
    value.as_object().cloned().unwrap()
}

fn sample_record() -> Record {
    Record::new(
        "test-123",
        "user-456",
        payload(json!({"key": "value", "n": 7, "nested": {"ok": true}})),
        base_time(),
        3600,
    )
    .unwrap()
}

// =============================================================================
// Construction / Expiry Tests
// =============================================================================

#[test]
fn test_record_creation_fields() {
    let record = sample_record();

    assert_eq!(record.id(), "test-123");
    assert_eq!(record.owner(), "user-456");
    assert_eq!(record.payload()["key"], json!("value"));
    assert_eq!(record.created_at(), base_time());
    assert_eq!(record.last_accessed(), base_time());
    assert_eq!(record.expires_at(), base_time() + TimeDelta::seconds(3600));
}

#[test]
fn test_record_not_expired_within_ttl() {
    let record = sample_record();
    assert!(!record.is_expired(base_time() + TimeDelta::seconds(3599)));
}

#[test]
fn test_record_expired_after_ttl() {
    let record = sample_record();
    assert!(record.is_expired(base_time() + TimeDelta::seconds(3600) + TimeDelta::nanoseconds(1)));
}

#[test]
fn test_zero_ttl_is_expired_at_creation_instant() {
    let record = Record::new("s", "u", Payload::new(), base_time(), 0).unwrap();

    assert_eq!(record.expires_at(), base_time());
    assert!(record.is_expired(base_time()));
    assert!(record.is_expired(base_time() + TimeDelta::milliseconds(1)));
}

#[test]
fn test_repeated_touch_never_extends_expiry() {
    let mut record = sample_record();
    let deadline = record.expires_at();

    for minutes in [10, 20, 59] {
        record.touch(base_time() + TimeDelta::minutes(minutes));
        assert_eq!(record.expires_at(), deadline);
    }

    assert_eq!(record.last_accessed(), base_time() + TimeDelta::minutes(59));
    assert!(record.created_at() <= record.last_accessed());
}

#[test]
fn test_remaining() {
    let record = sample_record();
    assert_eq!(record.remaining(base_time() + TimeDelta::seconds(600)), TimeDelta::seconds(3000));
    assert!(record.remaining(base_time() + TimeDelta::seconds(3601)) < TimeDelta::zero());
}

// =============================================================================
// Encoding Tests
// =============================================================================

#[test]
fn test_decode_reproduces_touched_record() {
    let mut record = sample_record();
    record.touch(base_time() + TimeDelta::nanoseconds(987_654_321));

    let decoded = Record::from_bytes(&record.to_bytes().unwrap()).unwrap();

    assert_eq!(decoded.id(), record.id());
    assert_eq!(decoded.owner(), record.owner());
    assert_eq!(decoded.payload(), record.payload());
    assert_eq!(decoded.created_at(), record.created_at());
    assert_eq!(decoded.last_accessed(), record.last_accessed());
    assert_eq!(decoded.expires_at(), record.expires_at());
}

#[test]
fn test_encoded_timestamps_carry_utc_offset() {
    let blob = sample_record().to_bytes().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&blob).unwrap();

    for field in ["created_at", "last_accessed", "expires_at"] {
        let text = value[field].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(text).is_ok(), "{} = {}", field, text);
        assert!(text.ends_with('Z') || text.ends_with("+00:00"));
    }
}

#[test]
fn test_decode_accepts_non_utc_offset() {
    let blob = json!({
        "id": "s1",
        "owner": "u1",
        "payload": {},
        "created_at": "2026-10-19T10:00:00+02:00",
        "last_accessed": "2026-10-19T10:00:00+02:00",
        "expires_at": "2026-10-19T11:00:00+02:00"
    });

    let record = Record::from_bytes(blob.to_string().as_bytes()).unwrap();

    assert_eq!(record.created_at(), DateTime::parse_from_rfc3339("2026-10-19T08:00:00Z").unwrap());
}

#[test]
fn test_decode_accepts_legacy_field_names() {
    let blob = json!({
        "session_id": "s1",
        "user_id": "u1",
        "data": {"role": "admin"},
        "created_at": "2026-10-19T08:00:00+00:00",
        "last_accessed": "2026-10-19T08:00:01+00:00",
        "expires_at": "2026-10-19T09:00:00+00:00"
    });

    let record = Record::from_bytes(blob.to_string().as_bytes()).unwrap();

    assert_eq!(record.id(), "s1");
    assert_eq!(record.owner(), "u1");
    assert_eq!(record.payload()["role"], json!("admin"));
}

#[test]
fn test_decode_missing_payload_defaults_to_empty() {
    let blob = json!({
        "id": "s1",
        "owner": "u1",
        "created_at": "2026-10-19T08:00:00Z",
        "last_accessed": "2026-10-19T08:00:00Z",
        "expires_at": "2026-10-19T09:00:00Z"
    });

    let record = Record::from_bytes(blob.to_string().as_bytes()).unwrap();
    assert!(record.payload().is_empty());
}

#[test]
fn test_decode_missing_field_is_malformed() {
    let blob = json!({
        "id": "s1",
        "owner": "u1",
        "created_at": "2026-10-19T08:00:00Z",
        "last_accessed": "2026-10-19T08:00:00Z"
    });

    let err = Record::from_bytes(blob.to_string().as_bytes()).unwrap_err();
    assert!(matches!(err, SessionError::MalformedRecord(_)));
}

#[test]
fn test_decode_bad_timestamp_is_malformed() {
    let blob = json!({
        "id": "s1",
        "owner": "u1",
        "created_at": "yesterday",
        "last_accessed": "2026-10-19T08:00:00Z",
        "expires_at": "2026-10-19T09:00:00Z"
    });

    let err = Record::from_bytes(blob.to_string().as_bytes()).unwrap_err();
    assert!(matches!(err, SessionError::MalformedRecord(_)));
}

#[test]
fn test_decode_access_before_creation_is_malformed() {
    let blob = json!({
        "id": "s1",
        "owner": "u1",
        "created_at": "2026-10-19T08:00:00Z",
        "last_accessed": "2026-10-19T07:00:00Z",
        "expires_at": "2026-10-19T09:00:00Z"
    });

    let err = Record::from_bytes(blob.to_string().as_bytes()).unwrap_err();
    assert!(matches!(err, SessionError::MalformedRecord(_)));
}

#[test]
fn test_decode_empty_input_is_malformed() {
    assert!(matches!(Record::from_bytes(b""), Err(SessionError::MalformedRecord(_))));
}
