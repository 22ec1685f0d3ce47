use std::collections::VecDeque;

use tracing::debug;

use crate::engine::column::ColumnBuilder;
use crate::engine::errors::WireError;
use crate::engine::limits::WireLimits;
use crate::engine::types::{BatchKind, ColumnType, ValueRef};

use super::envelope::Batch;

/// Row-wise producer side: collects rows into per-column builders and seals
/// a NORMAL batch every `batch_rows` rows.
#[derive(Debug)]
pub struct BatchBuffer {
    source_id: i64,
    column_types: Vec<ColumnType>,
    builders: Vec<ColumnBuilder>,
    len: usize,
    limits: WireLimits,
    ready: VecDeque<Batch>,
    finished: bool,
}

impl BatchBuffer {
    pub fn new(
        source_id: i64,
        column_types: Vec<ColumnType>,
        limits: WireLimits,
    ) -> Result<Self, WireError> {
        if column_types.len() > limits.max_columns {
            return Err(WireError::schema(format!(
                "{} columns requested, limit is {}",
                column_types.len(),
                limits.max_columns
            )));
        }
        let builders = Self::fresh_builders(&column_types, limits.batch_rows);
        Ok(Self {
            source_id,
            column_types,
            builders,
            len: 0,
            limits,
            ready: VecDeque::new(),
            finished: false,
        })
    }

    fn fresh_builders(column_types: &[ColumnType], rows: usize) -> Vec<ColumnBuilder> {
        column_types
            .iter()
            .map(|ty| ColumnBuilder::with_capacity(*ty, rows))
            .collect()
    }

    pub fn source_id(&self) -> i64 {
        self.source_id
    }

    pub fn column_types(&self) -> &[ColumnType] {
        &self.column_types
    }

    /// Rows waiting in the open (unsealed) batch.
    pub fn pending_rows(&self) -> usize {
        self.len
    }

    pub fn ready_len(&self) -> usize {
        self.ready.len()
    }

    /// Appends one row. The whole row is type-checked before any column is
    /// touched, so a rejected row leaves the buffer unchanged.
    pub fn push_row(&mut self, row: &[ValueRef<'_>]) -> Result<(), WireError> {
        if self.finished {
            return Err(WireError::schema("batch buffer already finished"));
        }
        if row.len() != self.column_types.len() {
            return Err(WireError::schema(format!(
                "row has {} values, expected {}",
                row.len(),
                self.column_types.len()
            )));
        }
        for (idx, (value, ty)) in row.iter().zip(&self.column_types).enumerate() {
            if value.column_type() != *ty {
                return Err(WireError::schema(format!(
                    "column {idx}: expected {ty}, got {}",
                    value.column_type()
                )));
            }
        }

        for (builder, value) in self.builders.iter_mut().zip(row) {
            builder.push(*value)?;
        }
        self.len += 1;

        if self.len >= self.limits.batch_rows {
            self.seal()?;
        }
        Ok(())
    }

    fn seal(&mut self) -> Result<(), WireError> {
        if self.len == 0 {
            return Ok(());
        }
        let builders = std::mem::replace(
            &mut self.builders,
            Self::fresh_builders(&self.column_types, self.limits.batch_rows),
        );
        let columns = builders.into_iter().map(ColumnBuilder::finish).collect();
        let batch = Batch::build(BatchKind::Normal, self.source_id, columns, &self.limits)?;
        debug!(source_id = self.source_id, rows = self.len, "sealed batch");
        self.len = 0;
        self.ready.push_back(batch);
        Ok(())
    }

    /// Next sealed batch, oldest first.
    pub fn pop_ready(&mut self) -> Option<Batch> {
        self.ready.pop_front()
    }

    /// Seals the trailing partial batch and queues the EOS marker. Returns
    /// every batch still queued, EOS last.
    pub fn finish(&mut self) -> Result<Vec<Batch>, WireError> {
        if !self.finished {
            self.seal()?;
            self.ready.push_back(Batch::end_of_stream(self.source_id));
            self.finished = true;
        }
        Ok(self.ready.drain(..).collect())
    }
}
