use crate::engine::types::ColumnType;
use crate::test_helpers::factories::ColumnFactory;

#[test]
fn builds_column_with_defaults_and_overrides() {
    let c1 = ColumnFactory::new().create();
    assert_eq!(c1.column_type(), ColumnType::Int32);
    assert_eq!(c1.len(), 3);

    let c2 = ColumnFactory::new()
        .with_type(ColumnType::String)
        .with_rows(10)
        .with_seed(42)
        .create();
    assert_eq!(c2.column_type(), ColumnType::String);
    assert_eq!(c2.len(), 10);
}

#[test]
fn same_seed_same_column() {
    let a = ColumnFactory::new().with_type(ColumnType::Float64).with_seed(9).create();
    let b = ColumnFactory::new().with_type(ColumnType::Float64).with_seed(9).create();
    assert_eq!(a, b);
}
