use serde_json::Value as JsonValue;

use crate::engine::column::Column;
use crate::engine::errors::WireError;
use crate::engine::limits::WireLimits;
use crate::engine::types::BatchKind;

/// One unit of transfer between operators. Immutable once built; any
/// downstream transform builds a new batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    kind: BatchKind,
    source_id: i64,
    columns: Vec<Column>,
}

impl Batch {
    /// Validates the envelope invariants before anything is encoded:
    /// EOS carries no columns, NORMAL columns share one row count, and the
    /// column count stays within `limits.max_columns`.
    pub fn build(
        kind: BatchKind,
        source_id: i64,
        columns: Vec<Column>,
        limits: &WireLimits,
    ) -> Result<Self, WireError> {
        validate_columns(kind, &columns, limits)?;
        Ok(Self {
            kind,
            source_id,
            columns,
        })
    }

    pub fn normal(source_id: i64, columns: Vec<Column>) -> Result<Self, WireError> {
        Self::build(BatchKind::Normal, source_id, columns, &WireLimits::default())
    }

    pub fn end_of_stream(source_id: i64) -> Self {
        Self {
            kind: BatchKind::EndOfStream,
            source_id,
            columns: Vec::new(),
        }
    }

    pub fn kind(&self) -> BatchKind {
        self.kind
    }

    pub fn is_end_of_stream(&self) -> bool {
        self.kind == BatchKind::EndOfStream
    }

    pub fn source_id(&self) -> i64 {
        self.source_id
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, idx: usize) -> Option<&Column> {
        self.columns.get(idx)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Shared row count; 0 for EOS and for batches without columns.
    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    pub fn to_json(&self) -> JsonValue {
        serde_json::json!({
            "kind": self.kind.as_str(),
            "source_id": self.source_id,
            "row_count": self.row_count(),
            "columns": self.columns.iter().map(Column::to_json).collect::<Vec<_>>(),
        })
    }
}

fn validate_columns(
    kind: BatchKind,
    columns: &[Column],
    limits: &WireLimits,
) -> Result<(), WireError> {
    match kind {
        BatchKind::EndOfStream => {
            if !columns.is_empty() {
                return Err(WireError::schema(format!(
                    "EOS batch must not carry columns, got {}",
                    columns.len()
                )));
            }
        }
        BatchKind::Normal => {
            if columns.len() > limits.max_columns {
                return Err(WireError::schema(format!(
                    "batch has {} columns, limit is {}",
                    columns.len(),
                    limits.max_columns
                )));
            }
            if let Some(first) = columns.first() {
                let expected = first.len();
                for (idx, column) in columns.iter().enumerate().skip(1) {
                    if column.len() != expected {
                        return Err(WireError::schema(format!(
                            "column {idx} has {} rows, column 0 has {expected}",
                            column.len()
                        )));
                    }
                }
            }
        }
    }
    Ok(())
}
