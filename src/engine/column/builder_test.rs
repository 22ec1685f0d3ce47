use super::{Column, ColumnBuilder};
use crate::engine::errors::WireError;
use crate::engine::types::{ColumnType, ValueRef};

#[test]
fn builder_produces_same_column_as_constructor() {
    let mut builder = ColumnBuilder::with_capacity(ColumnType::Int32, 3);
    for v in [1, 2, 3] {
        builder.push(ValueRef::Int32(v)).unwrap();
    }
    assert_eq!(builder.len(), 3);
    assert_eq!(builder.finish(), Column::from_i32s([1, 2, 3]));
}

#[test]
fn builder_handles_strings() {
    let mut builder = ColumnBuilder::new(ColumnType::String);
    builder.push(ValueRef::from("ab")).unwrap();
    builder.push(ValueRef::from("")).unwrap();
    let col = builder.finish();
    assert_eq!(col.len(), 2);
    assert_eq!(col.value_at(0).unwrap(), ValueRef::String(b"ab"));
}

#[test]
fn builder_rejects_type_mismatch_without_side_effects() {
    let mut builder = ColumnBuilder::new(ColumnType::Boolean);
    builder.push(ValueRef::Boolean(true)).unwrap();

    let err = builder.push(ValueRef::Int64(1)).unwrap_err();
    assert!(matches!(err, WireError::Schema(_)));
    assert_eq!(builder.len(), 1);
    assert_eq!(builder.finish(), Column::from_bools([true]));
}

#[test]
fn empty_builder_yields_empty_column_of_its_type() {
    let col = ColumnBuilder::new(ColumnType::Float64).finish();
    assert_eq!(col.column_type(), ColumnType::Float64);
    assert!(col.is_empty());
}
