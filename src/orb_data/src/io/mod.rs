pub mod cells;
pub mod csv;

pub use cells::normalize_hhmm;
pub use csv::{combinations_from_csv, dataset_from_csv, dataset_from_frame, read_frame};
