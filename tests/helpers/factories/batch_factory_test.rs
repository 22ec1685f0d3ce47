use crate::engine::types::{BatchKind, ColumnType};
use crate::test_helpers::factories::BatchFactory;

#[test]
fn builds_batch_with_defaults() {
    let batch = BatchFactory::new().create();
    assert_eq!(batch.kind(), BatchKind::Normal);
    assert_eq!(batch.source_id(), 7);
    assert_eq!(batch.column_count(), 2);
    assert_eq!(batch.row_count(), 3);
}

#[test]
fn builds_batch_with_random_columns() {
    let batch = BatchFactory::new()
        .with_source_id(-1)
        .with_rows(25)
        .with_seed(3)
        .with_random_columns(6)
        .create();
    assert_eq!(batch.source_id(), -1);
    assert_eq!(batch.column_count(), 6);
    assert!(batch.columns().iter().all(|c| c.len() == 25));
}

#[test]
fn explicit_column_types_are_kept_in_order() {
    let batch = BatchFactory::new()
        .with_column_types(vec![ColumnType::Boolean, ColumnType::Int64])
        .create();
    let types: Vec<ColumnType> = batch.columns().iter().map(|c| c.column_type()).collect();
    assert_eq!(types, vec![ColumnType::Boolean, ColumnType::Int64]);
    assert!(BatchFactory::eos(3).is_end_of_stream());
}
