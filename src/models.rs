use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{ServiceError, ServiceResult};

/// A single bound statement parameter
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum SqlValue {
    Text(String),
    Integer(i32),
    Null,
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_owned())
    }
}

impl From<Option<&String>> for SqlValue {
    fn from(value: Option<&String>) -> Self {
        match value {
            Some(v) => SqlValue::Text(v.clone()),
            None => SqlValue::Null,
        }
    }
}

/// Represent a supplier entry of the json supplier list
#[derive(Debug, PartialEq, Eq, Deserialize, Clone)]
pub struct Supplier {
    pub company_name: String,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub fax: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    /// Names of the products in `products.product_name` delivered by this supplier
    #[serde(default)]
    pub products: Vec<String>,
}

/// A csv file and the table its rows are inserted into
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TableImport {
    pub path: PathBuf,
    pub table: String,
}

impl TableImport {
    pub fn new(path: impl Into<PathBuf>, table: &str) -> Self {
        Self {
            path: path.into(),
            table: table.to_owned(),
        }
    }

    /// Parse a `<table>=<path>` argument
    pub fn parse(value: &str) -> ServiceResult<Self> {
        match value.split_once('=') {
            Some((table, path)) if !table.trim().is_empty() && !path.trim().is_empty() => {
                Ok(Self::new(path.trim(), table.trim()))
            }
            _ => Err(ServiceError::Config(format!(
                "expected '<table>=<path>', got '{}'",
                value
            ))),
        }
    }

    /// The customers, employees and orders files of the north dataset
    pub fn north_defaults(data_dir: &str) -> Vec<Self> {
        let data_dir = PathBuf::from(data_dir);
        ["customers", "employees", "orders"]
            .iter()
            .map(|table| Self::new(data_dir.join(format!("{}_data.csv", table)), table))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supplier_from_json() {
        let suppliers: Vec<Supplier> = serde_json::from_str(
            r#"[{"company_name":"Acme","contact":"Bob","address":"X","phone":"1","fax":"2","homepage":"h","products":["Widget"]}]"#,
        )
        .unwrap();

        assert_eq!(
            suppliers,
            vec![Supplier {
                company_name: "Acme".to_owned(),
                contact: Some("Bob".to_owned()),
                address: Some("X".to_owned()),
                phone: Some("1".to_owned()),
                fax: Some("2".to_owned()),
                homepage: Some("h".to_owned()),
                products: vec!["Widget".to_owned()],
            }]
        );
    }

    #[test]
    fn test_supplier_optional_fields() {
        let supplier: Supplier =
            serde_json::from_str(r#"{"company_name":"Acme","fax":null}"#).unwrap();

        assert_eq!(supplier.fax, None);
        assert_eq!(supplier.homepage, None);
        assert!(supplier.products.is_empty());

        assert!(serde_json::from_str::<Supplier>(r#"{"contact":"Bob"}"#).is_err());
    }

    #[test]
    fn test_table_import_parse() {
        assert_eq!(
            TableImport::parse("customers=north_data/customers_data.csv").unwrap(),
            TableImport::new("north_data/customers_data.csv", "customers")
        );
        assert!(matches!(
            TableImport::parse("north_data/customers_data.csv"),
            Err(ServiceError::Config(_))
        ));
        assert!(TableImport::parse("=x.csv").is_err());
    }

    #[test]
    fn test_north_defaults() {
        let imports = TableImport::north_defaults("north_data");

        assert_eq!(
            imports
                .iter()
                .map(|i| i.table.as_str())
                .collect::<Vec<_>>(),
            vec!["customers", "employees", "orders"]
        );
        assert_eq!(
            imports[1].path,
            PathBuf::from("north_data").join("employees_data.csv")
        );
    }
}
