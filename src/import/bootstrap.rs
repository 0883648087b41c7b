use std::fs::File;
use std::path::{Path, PathBuf};

use log::{error, info};
use sqlx::postgres::PgConnectOptions;
use sqlx::Connection;

use crate::{
    database::{self, quote_ident, Session},
    error::{ServiceError, ServiceResult},
    models::{SqlValue, Supplier},
};

/// Schema and seed data of the bootstrapped database
pub const FILL_DB_SCRIPT: &str = include_str!("../sql/fill_db.sql");

const CREATE_SUPPLIERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS suppliers (
        supplier_id SERIAL PRIMARY KEY,
        company_name TEXT NOT NULL,
        contact TEXT,
        address TEXT,
        phone TEXT,
        fax TEXT,
        homepage TEXT
    )
"#;

const INSERT_SUPPLIER: &str = r#"
    INSERT INTO suppliers (company_name, contact, address, phone, fax, homepage)
    VALUES ($1, $2, $3, $4, $5, $6)
"#;

const ADD_SUPPLIER_COLUMN: &str = "ALTER TABLE products ADD COLUMN supplier_id INTEGER";

const SELECT_SUPPLIER_ID: &str = "SELECT supplier_id FROM suppliers WHERE company_name = $1";

const UPDATE_PRODUCT_SUPPLIER: &str =
    "UPDATE products SET supplier_id = $1 WHERE product_name = $2";

const ADD_SUPPLIER_CONSTRAINT: &str = r#"
    ALTER TABLE products
    ADD CONSTRAINT fk_products_supplier
    FOREIGN KEY (supplier_id)
    REFERENCES suppliers(supplier_id)
    ON DELETE SET NULL
"#;

/// Where the schema and seed script comes from
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ScriptSource {
    Bundled,
    File(PathBuf),
}

impl ScriptSource {
    pub fn load(&self) -> ServiceResult<String> {
        match self {
            ScriptSource::Bundled => Ok(FILL_DB_SCRIPT.to_owned()),
            ScriptSource::File(path) => Ok(std::fs::read_to_string(path)?),
        }
    }
}

/// Everything the bootstrapper needs to know
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Connection to an existing database, used to issue `CREATE DATABASE`
    pub admin_options: PgConnectOptions,
    pub db_name: String,
    pub script: ScriptSource,
    pub suppliers_path: String,
}

/// Outcome of the supplier id backfill
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct BackfillReport {
    pub matched_suppliers: usize,
    pub updated_products: u64,
}

/// Create the database `db_name`. `CREATE DATABASE` cannot run inside a transaction,
/// the statement is issued on a plain autocommit connection.
pub async fn create_database(admin_options: &PgConnectOptions, db_name: &str) -> ServiceResult<()> {
    let mut connection = database::connect(admin_options).await?;
    let result = connection
        .execute_script(&format!("CREATE DATABASE {}", quote_ident(db_name)))
        .await;
    connection.close().await?;
    result
}

pub async fn execute_sql_script<S: Session>(session: &mut S, script: &str) -> ServiceResult<()> {
    session.execute_script(script).await
}

pub async fn create_suppliers_table<S: Session>(session: &mut S) -> ServiceResult<()> {
    session.execute(CREATE_SUPPLIERS_TABLE, &[]).await?;
    Ok(())
}

pub fn get_suppliers_data(path: &Path) -> ServiceResult<Vec<Supplier>> {
    let mut file = File::open(path)?;
    let suppliers: Vec<Supplier> = serde_json::from_reader(&mut file)?;
    Ok(suppliers)
}

pub async fn insert_suppliers_data<S: Session>(
    session: &mut S,
    suppliers: &[Supplier],
) -> ServiceResult<()> {
    for supplier in suppliers {
        session
            .execute(
                INSERT_SUPPLIER,
                &[
                    SqlValue::from(supplier.company_name.as_str()),
                    SqlValue::from(supplier.contact.as_ref()),
                    SqlValue::from(supplier.address.as_ref()),
                    SqlValue::from(supplier.phone.as_ref()),
                    SqlValue::from(supplier.fax.as_ref()),
                    SqlValue::from(supplier.homepage.as_ref()),
                ],
            )
            .await?;
    }
    Ok(())
}

/// Add `products.supplier_id` and set it for every product listed by a known supplier.
pub async fn backfill_supplier_ids<S: Session>(
    session: &mut S,
    suppliers: &[Supplier],
) -> ServiceResult<BackfillReport> {
    session.execute(ADD_SUPPLIER_COLUMN, &[]).await?;

    let mut report = BackfillReport::default();
    for supplier in suppliers {
        let supplier_id = session
            .fetch_id(
                SELECT_SUPPLIER_ID,
                &[SqlValue::from(supplier.company_name.as_str())],
            )
            .await?;

        let supplier_id = match supplier_id {
            Some(id) => id,
            None => continue,
        };
        report.matched_suppliers += 1;

        for product_name in &supplier.products {
            report.updated_products += session
                .execute(
                    UPDATE_PRODUCT_SUPPLIER,
                    &[
                        SqlValue::Integer(supplier_id),
                        SqlValue::from(product_name.as_str()),
                    ],
                )
                .await?;
        }
    }

    Ok(report)
}

pub async fn add_supplier_constraint<S: Session>(session: &mut S) -> ServiceResult<()> {
    session.execute(ADD_SUPPLIER_CONSTRAINT, &[]).await?;
    Ok(())
}

/// Backfill first, constrain second. The constraint is only added once every update succeeded.
pub async fn add_foreign_keys<S: Session>(
    session: &mut S,
    suppliers: &[Supplier],
) -> ServiceResult<BackfillReport> {
    let report = backfill_supplier_ids(session, suppliers).await?;
    add_supplier_constraint(session).await?;
    Ok(report)
}

/// Fill a freshly created database: schema script, suppliers and the product foreign key.
pub async fn populate<S: Session>(
    session: &mut S,
    script: &str,
    suppliers: &[Supplier],
) -> ServiceResult<BackfillReport> {
    execute_sql_script(session, script).await?;
    info!("Executed schema script");

    create_suppliers_table(session).await?;
    info!("Table suppliers created");

    insert_suppliers_data(session, suppliers).await?;
    info!("Inserted {} suppliers", suppliers.len());

    let report = add_foreign_keys(session, suppliers).await?;
    info!(
        "Foreign key added, {} products of {} suppliers linked",
        report.updated_products, report.matched_suppliers
    );

    Ok(report)
}

async fn populate_database(
    options: &PgConnectOptions,
    script: &ScriptSource,
    suppliers_path: &Path,
) -> ServiceResult<BackfillReport> {
    let mut connection = database::connect(options).await?;

    let result = async {
        let script = script.load()?;
        let suppliers = get_suppliers_data(suppliers_path)?;

        let mut transaction = connection.begin().await?;
        let report = populate(&mut *transaction, &script, &suppliers).await?;
        transaction.commit().await?;

        Ok::<_, ServiceError>(report)
    }
    .await;

    connection.close().await?;
    result
}

/// Create and fill the database.
///
/// Only a failing `CREATE DATABASE` is returned as error. Failures while filling the new
/// database are logged and the bootstrap ends without a result.
pub async fn bootstrap(config: &BootstrapConfig) -> ServiceResult<Option<BackfillReport>> {
    create_database(&config.admin_options, &config.db_name).await?;
    info!("Database {} created", config.db_name);

    let options = config.admin_options.clone().database(&config.db_name);
    match populate_database(&options, &config.script, Path::new(&config.suppliers_path)).await {
        Ok(report) => {
            info!("Database {} populated", config.db_name);
            Ok(Some(report))
        }
        Err(e) => {
            error!("{}", e);
            Ok(None)
        }
    }
}
