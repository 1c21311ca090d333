//! Salesman persistence interface.

use async_trait::async_trait;

use crate::interfaces::Result;
use crate::model::Salesman;

#[async_trait]
pub trait SalesmanStore: Send + Sync {
    /// Fetch a salesman by id.
    async fn get(&self, salesman_id: i64) -> Result<Option<Salesman>>;

    /// All approved salesmen.
    async fn approved(&self) -> Result<Vec<Salesman>>;

    /// Remove an approved salesman. `NotFound` when the id does not exist
    /// or the salesman is not approved.
    async fn remove(&self, salesman_id: i64) -> Result<()>;
}
