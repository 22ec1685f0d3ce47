use super::decoder::ColumnDecoder;
use super::encoder::ColumnEncoder;
use crate::engine::column::{Column, StringColumn};
use crate::engine::errors::WireError;
use crate::engine::types::{ColumnType, ValueRef};
use crate::test_helpers::factory::Factory;

fn string_body(data: &[u8], starts: &[u32], ends: &[u32]) -> Vec<u8> {
    let mut buf = vec![ColumnType::String.tag()];
    buf.extend_from_slice(&(starts.len() as u32).to_be_bytes());
    buf.extend_from_slice(&(data.len() as u32).to_be_bytes());
    buf.extend_from_slice(data);
    for s in starts {
        buf.extend_from_slice(&s.to_le_bytes());
    }
    for e in ends {
        buf.extend_from_slice(&e.to_le_bytes());
    }
    buf
}

#[test]
fn decodes_every_column_type() {
    let columns = vec![
        Column::from_i32s([i32::MIN, 0, i32::MAX]),
        Column::from_i64s([-1, 1 << 50]),
        Column::from_f32s([f32::MIN_POSITIVE, -0.0]),
        Column::from_f64s([f64::INFINITY, 2.5]),
        Column::from_strings(["ünïcode", "", "plain"]).unwrap(),
        Column::from_bools([true, true, false]),
    ];
    for col in columns {
        let bytes = ColumnEncoder::encode(&col).unwrap();
        let decoded = ColumnDecoder::decode(&bytes).unwrap();
        assert_eq!(decoded, col, "type {}", col.column_type());
    }
}

#[test]
fn decoded_string_column_keeps_shared_ranges() {
    let strings = StringColumn::from_parts(b"abxyz".to_vec(), vec![2, 0], vec![5, 5]).unwrap();
    let bytes = ColumnEncoder::encode(&Column::from_string_column(strings)).unwrap();
    let decoded = ColumnDecoder::decode(&bytes).unwrap();

    let s = decoded.strings().unwrap();
    assert_eq!(s.starts(), &[2, 0]);
    assert_eq!(s.ends(), &[5, 5]);
    assert_eq!(decoded.value_at(1).unwrap(), ValueRef::String(b"abxyz"));
}

#[test]
fn unknown_tag_is_schema_error() {
    let buf = [6u8, 0, 0, 0, 0];
    match ColumnDecoder::decode(&buf).unwrap_err() {
        WireError::Schema(msg) => assert!(msg.contains("unknown type tag 6"), "{msg}"),
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn short_fixed_body_is_truncated_input() {
    let mut bytes = ColumnEncoder::encode(&Column::from_i64s([1, 2])).unwrap().to_vec();
    bytes.pop();
    match ColumnDecoder::decode(&bytes).unwrap_err() {
        WireError::TruncatedInput {
            offset, needed, ..
        } => {
            assert_eq!(offset, 5);
            assert_eq!(needed, 16);
        }
        other => panic!("expected truncated input, got {other:?}"),
    }
}

#[test]
fn missing_row_count_is_truncated_input() {
    let err = ColumnDecoder::decode(&[0u8, 0, 0]).unwrap_err();
    assert!(matches!(err, WireError::TruncatedInput { .. }));
}

#[test]
fn huge_row_count_does_not_allocate_or_panic() {
    let buf = [ColumnType::Int64.tag(), 0xFF, 0xFF, 0xFF, 0xFF];
    let err = ColumnDecoder::decode(&buf).unwrap_err();
    assert!(matches!(err, WireError::TruncatedInput { .. }));
}

#[test]
fn string_end_before_start_is_malformed() {
    let buf = string_body(b"abc", &[2], &[1]);
    match ColumnDecoder::decode(&buf).unwrap_err() {
        WireError::MalformedColumn { column, reason } => {
            assert_eq!(column, 0);
            assert!(reason.contains("start 2 > end 1"), "{reason}");
        }
        other => panic!("expected malformed column, got {other:?}"),
    }
}

#[test]
fn string_end_past_data_is_malformed() {
    let buf = string_body(b"abc", &[0, 1], &[3, 4]);
    match ColumnDecoder::decode(&buf).unwrap_err() {
        WireError::MalformedColumn { reason, .. } => {
            assert!(reason.contains("row 1"), "{reason}");
        }
        other => panic!("expected malformed column, got {other:?}"),
    }
}

#[test]
fn truncated_string_offsets_are_truncated_input() {
    let mut buf = string_body(b"abc", &[0, 1], &[1, 3]);
    buf.truncate(buf.len() - 2);
    let err = ColumnDecoder::decode(&buf).unwrap_err();
    assert!(matches!(err, WireError::TruncatedInput { .. }));
}

#[test]
fn boolean_byte_outside_zero_one_is_malformed() {
    let buf = [ColumnType::Boolean.tag(), 0, 0, 0, 2, 1, 7];
    match ColumnDecoder::decode(&buf).unwrap_err() {
        WireError::MalformedColumn { reason, .. } => {
            assert!(reason.contains("row 1"), "{reason}");
            assert!(reason.contains("byte 6"), "{reason}");
        }
        other => panic!("expected malformed column, got {other:?}"),
    }
}

#[test]
fn trailing_bytes_after_single_column_are_rejected() {
    let mut bytes = ColumnEncoder::encode(&Column::from_bools([true])).unwrap().to_vec();
    bytes.push(0);
    assert!(matches!(
        ColumnDecoder::decode(&bytes).unwrap_err(),
        WireError::Schema(_)
    ));
}

#[test]
fn random_columns_of_every_type_roundtrip() {
    for (seed, ty) in ColumnType::ALL.iter().cycle().take(60).enumerate() {
        let column = Factory::column()
            .with_type(*ty)
            .with_rows(seed % 13)
            .with_seed(seed as u64)
            .create();
        let bytes = ColumnEncoder::encode(&column).unwrap();
        assert_eq!(ColumnDecoder::decode(&bytes).unwrap(), column, "{ty} seed {seed}");
    }
}
