//! # Supplier Record
//!
//! Supplier contacts. Only stored and looked up: no purchase order is ever
//! created for a supplier, including by the low-stock scan.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DbResult;
use crate::store::Store;
use stockroom_core::validation::{validate_email, validate_supplier_name};
use stockroom_core::SupplierRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub name: String,
    pub email: String,
}

impl Supplier {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Supplier {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Inserts the supplier and commits.
    pub async fn add(&self, store: &mut Store) -> DbResult<()> {
        validate_supplier_name(&self.name)?;
        validate_email(&self.email)?;

        debug!(name = %self.name, "Adding supplier");

        store
            .execute(
                sqlx::query("INSERT INTO suppliers (name, email) VALUES (?, ?)")
                    .bind(&self.name)
                    .bind(&self.email),
            )
            .await?;
        store.commit().await
    }

    /// Gets the first supplier with this name. Names are not unique.
    pub async fn find_by_name(store: &mut Store, name: &str) -> DbResult<Option<SupplierRow>> {
        store
            .query_one(
                sqlx::query_as::<_, SupplierRow>(
                    "SELECT id, name, email FROM suppliers WHERE name = ? ORDER BY id LIMIT 1",
                )
                .bind(name),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::error::ErrorKind;

    #[tokio::test]
    async fn test_add_supplier() {
        let mut store = Store::connect(StoreConfig::in_memory()).await.unwrap();

        Supplier::new("Test Supplier", "test@supplier.com")
            .add(&mut store)
            .await
            .unwrap();

        let row = Supplier::find_by_name(&mut store, "Test Supplier")
            .await
            .unwrap()
            .expect("supplier should exist");
        assert_eq!(row.name, "Test Supplier");
        assert_eq!(row.email, "test@supplier.com");
    }

    #[tokio::test]
    async fn test_invalid_email_rejected() {
        let mut store = Store::connect(StoreConfig::in_memory()).await.unwrap();

        let err = Supplier::new("Test Supplier", "not-an-email")
            .add(&mut store)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            Supplier::find_by_name(&mut store, "Test Supplier").await.unwrap(),
            None
        );
    }
}
