pub mod columns;
pub mod dataset;
pub mod labels;
pub mod row;

pub use columns::{CategoricalColumn, Column, DirectionColumn, NumericColumn, TimeColumn};
pub use dataset::{Dataset, LoadReport};
pub use labels::{BoxColor, Direction, UnknownLabel};
pub use row::OrbRow;
