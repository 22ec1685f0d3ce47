pub use super::factories::{BatchFactory, ColumnFactory};

pub struct Factory;

impl Factory {
    pub fn column() -> ColumnFactory {
        ColumnFactory::new()
    }

    pub fn batch() -> BatchFactory {
        BatchFactory::new()
    }
}
