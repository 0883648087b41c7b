use log::info;

use crate::{database::Session, error::ServiceResult, models::TableImport};

use self::csv_import::load_data_from_csv;

pub mod bootstrap;
pub mod csv_import;

/// Load every csv file into its table, in the given order.
///
/// The first failing row stops the whole import, rows of earlier files and earlier rows stay inserted.
pub async fn import_csv_tables<S: Session>(
    session: &mut S,
    imports: &[TableImport],
) -> ServiceResult<u64> {
    let mut total = 0;
    for import in imports {
        total += load_data_from_csv(session, &import.path, &import.table).await?;
    }

    info!("Imported {} rows into {} tables", total, imports.len());
    Ok(total)
}
