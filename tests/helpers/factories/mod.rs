pub mod batch_factory;
pub mod column_factory;

pub use batch_factory::BatchFactory;
pub use column_factory::ColumnFactory;

#[cfg(test)]
mod batch_factory_test;
#[cfg(test)]
mod column_factory_test;
