use rand::rngs::StdRng;
use rand::SeedableRng;

use super::column_factory::ColumnFactory;
use crate::engine::batch::Batch;
use crate::engine::types::ColumnType;

pub struct BatchFactory {
    source_id: i64,
    rows: usize,
    column_types: Vec<ColumnType>,
    seed: u64,
}

impl BatchFactory {
    pub fn new() -> Self {
        Self {
            source_id: 7,
            rows: 3,
            column_types: vec![ColumnType::Int32, ColumnType::String],
            seed: 0,
        }
    }

    pub fn with_source_id(mut self, source_id: i64) -> Self {
        self.source_id = source_id;
        self
    }

    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_column_types(mut self, column_types: Vec<ColumnType>) -> Self {
        self.column_types = column_types;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replaces the column types with `count` randomly chosen ones.
    pub fn with_random_columns(mut self, count: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(self.seed ^ 0x5eed);
        self.column_types = (0..count)
            .map(|_| ColumnFactory::random_type(&mut rng))
            .collect();
        self
    }

    pub fn create(self) -> Batch {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let columns = self
            .column_types
            .iter()
            .map(|ty| ColumnFactory::random_column(&mut rng, *ty, self.rows))
            .collect();
        Batch::normal(self.source_id, columns).expect("factory columns share a row count")
    }

    pub fn eos(source_id: i64) -> Batch {
        Batch::end_of_stream(source_id)
    }
}
