//! Client repository interface

use async_trait::async_trait;

use super::model::{Address, Client, ClientDetails};
use crate::domain::DomainResult;

#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Whether a client with this id exists
    async fn exists(&self, id: i32) -> DomainResult<bool>;

    /// Load a client together with its address and phone numbers
    async fn get(&self, id: i32) -> DomainResult<Option<ClientDetails>>;

    /// All clients, ordered by id
    async fn list(&self) -> DomainResult<Vec<Client>>;

    /// Store a new client and its optional address atomically.
    /// `client.id` and `address.client_id` are ignored and server-assigned.
    async fn create(&self, client: Client, address: Option<Address>)
        -> DomainResult<ClientDetails>;

    /// Delete the client, its address and its phone numbers atomically.
    ///
    /// Fails with `Conflict` if the store still references the client
    /// from reservations or invoices.
    async fn delete_with_dependents(&self, id: i32) -> DomainResult<()>;
}
