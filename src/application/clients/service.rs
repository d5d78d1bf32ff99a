//! Client management use-cases

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::phone_numbers::insert_unique;
use crate::domain::{
    Address, Client, ClientDetails, DomainError, DomainResult, PhoneNumber, RepositoryProvider,
};

pub struct ClientService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ClientService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self) -> DomainResult<Vec<Client>> {
        self.repos.clients().list().await
    }

    /// Client with address and phone numbers
    pub async fn get(&self, id: i32) -> DomainResult<ClientDetails> {
        self.repos
            .clients()
            .get(id)
            .await?
            .ok_or(DomainError::ClientNotFound(id))
    }

    pub async fn create(&self, client: Client, address: Option<Address>) -> DomainResult<ClientDetails> {
        if client.last_name.trim().is_empty() {
            return Err(DomainError::InvalidArgument("last_name must not be empty".into()));
        }
        let created = self.repos.clients().create(client, address).await?;
        info!(client_id = created.client.id, "Client created");
        Ok(created)
    }

    /// Attach a phone number. The owner is always `client_id`.
    pub async fn add_phone(&self, client_id: i32, mut phone: PhoneNumber) -> DomainResult<PhoneNumber> {
        if !self.repos.clients().exists(client_id).await? {
            return Err(DomainError::ClientNotFound(client_id));
        }
        phone.client_id = client_id;
        insert_unique(self.repos.as_ref(), phone).await
    }

    /// Delete a client together with its address and phone numbers.
    ///
    /// Refused while the client still has invoices or reservations.
    pub async fn delete(&self, id: i32) -> DomainResult<ClientDetails> {
        let details = self.get(id).await?;

        let has_invoices = self.repos.invoices().exists_for_client(id).await?;
        let has_reservations = self.repos.reservations().exists_for_client(id).await?;
        if has_invoices || has_reservations {
            warn!(client_id = id, has_invoices, has_reservations, "Client delete refused");
            return Err(DomainError::ClientHasDependents(id));
        }

        match self.repos.clients().delete_with_dependents(id).await {
            Ok(()) => {}
            Err(DomainError::Conflict(_)) => return Err(DomainError::ClientHasDependents(id)),
            Err(e) => return Err(e),
        }

        info!(client_id = id, "Client deleted");
        Ok(details)
    }
}
