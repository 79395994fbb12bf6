//! CSV bytes → polars [`DataFrame`] → typed tables.
//!
//! Every column is read as a string column (`infer_schema_length = 0`) so
//! that a single odd cell ("inf", "None", a stray label) can never make
//! polars pick a type that rejects the rest of the column. Typing happens
//! afterwards, cell by cell, in [`super::cells`].

use std::io::Cursor;

use polars::prelude::*;
use tracing::debug;

use crate::{
    io::cells::{self, Cells},
    models::{Column, Dataset, OrbRow},
    providers::ProviderError,
    selector::{Combination, CombinationTable, DatasetKey},
};

/// Headers of the combinations table, in the order a [`Combination`] needs them.
const COMBINATION_HEADERS: [&str; 5] = [
    "instrument",
    "orb_start_time",
    "orb_end_time",
    "range_end_time",
    "filename",
];

/// Parse raw CSV bytes (with a header row) into an all-string frame.
pub fn read_frame(bytes: Vec<u8>) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
}

/// One column as owned optional strings; `Ok(None)` when the header lacks it.
fn text_column(df: &DataFrame, name: &str) -> PolarsResult<Option<Vec<Option<String>>>> {
    let Ok(column) = df.column(name) else {
        return Ok(None);
    };
    let series = column.as_materialized_series().cast(&DataType::String)?;
    let values = series
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_owned))
        .collect();
    Ok(Some(values))
}

/// Convert a statistics frame into a [`Dataset`].
///
/// Missing columns are recorded in the dataset's report, not treated as
/// errors; unparseable cells are blanked and counted.
pub fn dataset_from_frame(df: &DataFrame) -> PolarsResult<Dataset> {
    let mut rows = vec![OrbRow::default(); df.height()];
    let mut present = Vec::with_capacity(Column::ALL.len());
    let mut cells = Cells::default();

    for column in Column::ALL {
        let Some(values) = text_column(df, column.name())? else {
            continue;
        };
        present.push(column);
        for (row, raw) in rows.iter_mut().zip(&values) {
            assign(row, column, raw.as_deref(), &mut cells);
        }
    }

    debug!(
        rows = rows.len(),
        columns = present.len(),
        blanked = cells.blanked,
        "converted statistics frame"
    );
    Ok(Dataset::new(rows, present, cells.blanked))
}

fn assign(row: &mut OrbRow, column: Column, raw: Option<&str>, cells: &mut Cells) {
    match column {
        Column::Date => row.date = cells.parse(raw, cells::date),
        Column::OrbConfDirection => row.orb_conf_direction = cells.parse(raw, cells::direction),
        Column::OrbConfTime => row.orb_conf_time = cells.parse(raw, cells::time),
        Column::OrbRangeDirection => row.orb_range_direction = cells.parse(raw, cells::direction),
        Column::OrbTrue => row.orb_true = cells.parse(raw, cells::flag),
        Column::BoxColor => row.box_color = cells.parse(raw, cells::box_color),
        Column::RangeConfDirection => {
            row.range_conf_direction = cells.parse(raw, cells::direction)
        }
        Column::RangeHighTime => row.range_high_time = cells.parse(raw, cells::time),
        Column::RangeLowTime => row.range_low_time = cells.parse(raw, cells::time),
        Column::OrbOpenTouchTime => row.orb_open_touch_time = cells.parse(raw, cells::time),
        Column::MaxRetPct => row.max_ret_pct = cells.parse(raw, cells::number),
        Column::MaxExtPct => row.max_ext_pct = cells.parse(raw, cells::number),
        Column::MaxRetTime => row.max_ret_time = cells.parse(raw, cells::time),
        Column::MaxExtTime => row.max_ext_time = cells.parse(raw, cells::time),
    }
}

/// Parse a statistics CSV straight from bytes.
pub fn dataset_from_csv(bytes: Vec<u8>) -> Result<Dataset, ProviderError> {
    let df = read_frame(bytes)?;
    Ok(dataset_from_frame(&df)?)
}

/// Parse the combinations table (`available_files.csv`).
///
/// Unlike statistics tables, every column is required: without them no
/// selection can be resolved. Rows with a blank field are skipped.
pub fn combinations_from_csv(bytes: Vec<u8>) -> Result<CombinationTable, ProviderError> {
    let df = read_frame(bytes)?;

    let mut columns = Vec::with_capacity(COMBINATION_HEADERS.len());
    for header in COMBINATION_HEADERS {
        let values = text_column(&df, header)?.ok_or_else(|| {
            ProviderError::Schema(format!("combinations table has no '{header}' column"))
        })?;
        columns.push(values);
    }

    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let field = |c: usize| {
            columns[c][i]
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
        };
        let (Some(instrument), Some(start), Some(end), Some(range_end), Some(filename)) =
            (field(0), field(1), field(2), field(3), field(4))
        else {
            continue;
        };
        rows.push(Combination {
            key: DatasetKey::new(instrument, start, end, range_end),
            filename: filename.to_string(),
        });
    }

    let skipped = df.height() - rows.len();
    debug!(rows = rows.len(), skipped, "parsed combinations table");
    Ok(CombinationTable::new(rows))
}
