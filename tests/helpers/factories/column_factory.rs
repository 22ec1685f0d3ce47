use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::column::Column;
use crate::engine::types::ColumnType;

pub struct ColumnFactory {
    column_type: ColumnType,
    rows: usize,
    seed: u64,
}

impl ColumnFactory {
    pub fn new() -> Self {
        Self {
            column_type: ColumnType::Int32,
            rows: 3,
            seed: 0,
        }
    }

    pub fn with_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = column_type;
        self
    }

    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn random_type<R: Rng>(rng: &mut R) -> ColumnType {
        ColumnType::ALL[rng.gen_range(0..ColumnType::ALL.len())]
    }

    /// Random values of the configured type; strings are arbitrary bytes,
    /// not necessarily UTF-8.
    pub fn create(self) -> Column {
        let mut rng = StdRng::seed_from_u64(self.seed);
        Self::random_column(&mut rng, self.column_type, self.rows)
    }

    pub fn random_column<R: Rng>(rng: &mut R, column_type: ColumnType, rows: usize) -> Column {
        match column_type {
            ColumnType::Int32 => Column::from_i32s((0..rows).map(|_| rng.r#gen::<i32>())),
            ColumnType::Int64 => Column::from_i64s((0..rows).map(|_| rng.r#gen::<i64>())),
            ColumnType::Float32 => Column::from_f32s((0..rows).map(|_| rng.r#gen::<f32>())),
            ColumnType::Float64 => Column::from_f64s((0..rows).map(|_| rng.r#gen::<f64>())),
            ColumnType::Boolean => Column::from_bools((0..rows).map(|_| rng.gen_bool(0.5))),
            ColumnType::String => {
                let values: Vec<Vec<u8>> = (0..rows)
                    .map(|_| {
                        let len = rng.gen_range(0..12);
                        (0..len).map(|_| rng.r#gen::<u8>()).collect()
                    })
                    .collect();
                Column::from_strings(values).expect("small strings fit u32 offsets")
            }
        }
    }
}
