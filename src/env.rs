lazy_static::lazy_static! {
    /// Host name of the postgres server.
    ///
    /// Field name: `DATABASE_HOST`
    pub static ref DATABASE_HOST: String = std::env::var("DATABASE_HOST").unwrap_or_else(|_| "localhost".to_owned());

    /// Port of the postgres server.
    ///
    /// Field name: `DATABASE_PORT`
    pub static ref DATABASE_PORT: u16 = std::env::var("DATABASE_PORT")
        .unwrap_or_else(|_| "".to_string())
        .parse::<u16>()
        .unwrap_or(5432);

    /// Login user for the postgres server.
    ///
    /// Field name: `DATABASE_USER`
    pub static ref DATABASE_USER: String = std::env::var("DATABASE_USER").unwrap_or_else(|_| "postgres".to_owned());

    /// Login password for the postgres server.
    ///
    /// Field name: `DATABASE_PASSWORD`
    pub static ref DATABASE_PASSWORD: String = std::env::var("DATABASE_PASSWORD").unwrap_or_else(|_| "".to_owned());

    /// Database that receives the csv rows.
    ///
    /// Field name: `DATABASE_NAME`
    pub static ref DATABASE_NAME: String = std::env::var("DATABASE_NAME").unwrap_or_else(|_| "north".to_owned());

    /// Maintenance database used to issue `CREATE DATABASE`.
    ///
    /// Field name: `ADMIN_DATABASE`
    pub static ref ADMIN_DATABASE: String = std::env::var("ADMIN_DATABASE").unwrap_or_else(|_| "postgres".to_owned());

    /// Name of the database created by the bootstrapper.
    ///
    /// Field name: `BOOTSTRAP_DATABASE`
    pub static ref BOOTSTRAP_DATABASE: String = std::env::var("BOOTSTRAP_DATABASE").unwrap_or_else(|_| "my_new_db".to_owned());

    /// Supplier list, eg:
    /// `[{"company_name": "...", "products": ["..."]}]`
    ///
    /// Field name: `SUPPLIERS_JSON`
    pub static ref SUPPLIERS_JSON: String = std::env::var("SUPPLIERS_JSON").unwrap_or_else(|_| "suppliers.json".to_owned());

    /// Directory containing `customers_data.csv`, `employees_data.csv` and `orders_data.csv`.
    ///
    /// Field name: `NORTH_DATA_DIR`
    pub static ref NORTH_DATA_DIR: String = std::env::var("NORTH_DATA_DIR").unwrap_or_else(|_| "north_data".to_owned());
}
