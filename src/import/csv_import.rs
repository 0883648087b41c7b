use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;

use crate::{
    database::{quote_ident, Session},
    error::ServiceResult,
    models::SqlValue,
};

/// Build the insert statement for a row of `field_count` fields.
///
/// Every field is bound as text and cast to the declared type of its column, so the
/// database performs the conversion. Fields without a matching column stay uncast and
/// the database reports the arity mismatch.
pub fn insert_query(table: &str, column_types: &[String], field_count: usize) -> String {
    let placeholders = (1..=field_count)
        .map(|i| match column_types.get(i - 1) {
            Some(column_type) => format!("CAST(${} AS {})", i, column_type),
            None => format!("${}", i),
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!("INSERT INTO {} VALUES ({})", quote_ident(table), placeholders)
}

/// Insert every record of `reader` into `table`, the first line is always skipped.
///
/// Each statement runs on its own, a failing row aborts the load with all previous rows kept.
pub async fn load_rows<S: Session, R: Read>(
    session: &mut S,
    reader: R,
    table: &str,
) -> ServiceResult<u64> {
    let column_types = session.column_types(table).await?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut count = 0;
    for result in csv_reader.records() {
        let record = result?;
        let params: Vec<SqlValue> = record.iter().map(SqlValue::from).collect();

        let query = insert_query(table, &column_types, params.len());
        session.execute(&query, &params).await?;
        count += 1;
    }

    Ok(count)
}

pub async fn load_data_from_csv<S: Session>(
    session: &mut S,
    path: &Path,
    table: &str,
) -> ServiceResult<u64> {
    let file = File::open(path)?;
    let count = load_rows(session, file, table).await?;

    info!("Inserted {} rows from {:?} into {}", count, path, table);
    Ok(count)
}
