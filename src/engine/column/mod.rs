mod builder;
mod string_column;
mod values;

#[cfg(test)]
mod builder_test;

pub use builder::ColumnBuilder;
pub use string_column::StringColumn;
pub use values::{Column, ColumnPayload};
