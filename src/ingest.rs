use std::io::{Read, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Result, SurveyError};
use crate::items::{all_items, ItemGroup, COMPOSITE_COLUMNS, TOTAL_ITEMS};
use crate::models::{NumericDataset, NumericRecord, RawRecord, RawTable, ScoredDataset};

pub fn read_table_from_path(path: &Path, delimiter: u8) -> Result<RawTable> {
    let file = std::fs::File::open(path)?;
    let table = read_table(file, delimiter)?;
    info!(
        path = %path.display(),
        rows = table.len(),
        columns = table.headers.len(),
        "loaded survey export"
    );
    Ok(table)
}

pub fn read_table<R: Read>(source: R, delimiter: u8) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(source);

    let original_headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let headers = original_headers
        .iter()
        .map(|header| header.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let mut values: Vec<String> = row.iter().map(str::to_string).collect();
        values.resize(original_headers.len(), String::new());
        records.push(RawRecord { values });
    }

    Ok(RawTable {
        headers,
        original_headers,
        records,
    })
}

/// Question texts of `group` that are not among the table's (trimmed) headers.
pub fn missing_columns(table: &RawTable, group: ItemGroup) -> Vec<String> {
    group
        .items()
        .iter()
        .filter(|item| table.column_index(item).is_none())
        .map(|item| item.to_string())
        .collect()
}

pub fn validate_schema(table: &RawTable) -> Result<()> {
    let missing_x = missing_columns(table, ItemGroup::X);
    let missing_y = missing_columns(table, ItemGroup::Y);

    if missing_x.is_empty() && missing_y.is_empty() {
        return Ok(());
    }

    Err(SurveyError::MissingColumns {
        missing_x,
        missing_y,
    })
}

/// Numeric value of a cell, or `None` when it is blank or not a finite number.
pub fn parse_answer(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Coerce the 20 item columns to numbers. Expects `validate_schema` to have passed.
pub fn coerce(table: &RawTable) -> Result<NumericDataset> {
    validate_schema(table)?;

    let item_indices: Vec<usize> = all_items()
        .filter_map(|item| table.column_index(item))
        .collect();
    // Composite columns from an earlier export are recomputed, never carried over.
    let passthrough_indices: Vec<usize> = (0..table.headers.len())
        .filter(|index| !item_indices.contains(index))
        .filter(|&index| !COMPOSITE_COLUMNS.contains(&table.headers[index].as_str()))
        .collect();
    let passthrough_columns = passthrough_indices
        .iter()
        .map(|&index| table.headers[index].clone())
        .collect();

    let mut unparsed = 0usize;
    let records = table
        .records
        .iter()
        .map(|raw| {
            let mut answers = [None; TOTAL_ITEMS];
            for (slot, &index) in answers.iter_mut().zip(item_indices.iter()) {
                let cell = raw.values[index].as_str();
                *slot = parse_answer(cell);
                if slot.is_none() && !cell.trim().is_empty() {
                    unparsed += 1;
                }
            }
            NumericRecord {
                passthrough: passthrough_indices
                    .iter()
                    .map(|&index| raw.values[index].clone())
                    .collect(),
                answers,
            }
        })
        .collect();

    if unparsed > 0 {
        debug!(cells = unparsed, "non-numeric item answers treated as missing");
    }

    Ok(NumericDataset {
        passthrough_columns,
        records,
    })
}

/// The first `rows` records with their original header text.
pub fn preview(table: &RawTable, rows: usize) -> (Vec<String>, Vec<RawRecord>) {
    (
        table.original_headers.clone(),
        table.records.iter().take(rows).cloned().collect(),
    )
}

fn format_number(value: f64) -> String {
    format!("{value}")
}

pub fn export_header(dataset: &ScoredDataset) -> Vec<String> {
    dataset
        .passthrough_columns
        .iter()
        .cloned()
        .chain(all_items().map(str::to_string))
        .chain(COMPOSITE_COLUMNS.iter().map(|column| column.to_string()))
        .collect()
}

pub fn write_export<W: Write>(dataset: &ScoredDataset, sink: W, delimiter: u8) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(sink);
    writer.write_record(export_header(dataset))?;

    for record in &dataset.records {
        let mut row: Vec<String> = record.passthrough().to_vec();
        row.extend(
            record
                .answers()
                .iter()
                .map(|answer| answer.map(format_number).unwrap_or_default()),
        );
        row.extend(
            [record.x_total, record.y_total, record.x_mean, record.y_mean]
                .into_iter()
                .map(format_number),
        );
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn export_to_path(dataset: &ScoredDataset, path: &Path, delimiter: u8) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_export(dataset, file, delimiter)?;
    info!(path = %path.display(), rows = dataset.len(), "wrote cleaned export");
    Ok(())
}
