use bytes::BytesMut;

use super::column_codec::{BooleanCodec, ColumnCodec, FixedWidthCodec, StringCodec};
use super::reader::WireReader;
use crate::engine::column::Column;
use crate::engine::errors::WireError;
use crate::engine::types::ColumnType;

#[test]
fn fixed_codec_rejects_column_of_other_type() {
    let codec = FixedWidthCodec::new(ColumnType::Int64, 8);
    let mut out = BytesMut::new();
    let err = codec
        .encode_body(&Column::from_i32s([1]), &mut out)
        .unwrap_err();
    assert!(matches!(err, WireError::Schema(_)));
    assert!(out.is_empty());
}

#[test]
fn string_codec_rejects_fixed_column() {
    let mut out = BytesMut::new();
    let err = StringCodec
        .encode_body(&Column::from_bools([true]), &mut out)
        .unwrap_err();
    assert!(matches!(err, WireError::Schema(_)));
}

#[test]
fn bodies_decode_with_row_count_supplied_by_caller() {
    let col = Column::from_f32s([1.0, 2.0]);
    let codec = FixedWidthCodec::new(ColumnType::Float32, 4);
    let mut out = BytesMut::new();
    codec.encode_body(&col, &mut out).unwrap();
    assert_eq!(out.len(), 8);

    let mut reader = WireReader::new(&out);
    let decoded = codec.decode_body(&mut reader, 2, 0).unwrap();
    assert_eq!(decoded, col);
    assert!(reader.is_empty());
}

#[test]
fn decode_errors_carry_column_index() {
    let body = [1u8, 9];
    let mut reader = WireReader::new(&body);
    match BooleanCodec.decode_body(&mut reader, 2, 4).unwrap_err() {
        WireError::MalformedColumn { column, .. } => assert_eq!(column, 4),
        other => panic!("expected malformed column, got {other:?}"),
    }

    let mut reader = WireReader::new(&body);
    match StringCodec.decode_body(&mut reader, 1, 3).unwrap_err() {
        WireError::TruncatedInput { context, .. } => assert!(context.starts_with("column 3")),
        other => panic!("expected truncated input, got {other:?}"),
    }
}
