//! Phone number use-cases

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, DomainResult, PhoneNumber, RepositoryProvider};

pub struct PhoneNumberService {
    repos: Arc<dyn RepositoryProvider>,
}

impl PhoneNumberService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self) -> DomainResult<Vec<PhoneNumber>> {
        self.repos.phone_numbers().list().await
    }

    pub async fn get(&self, number: &str) -> DomainResult<PhoneNumber> {
        self.repos
            .phone_numbers()
            .find(number)
            .await?
            .ok_or_else(|| not_found(number))
    }

    pub async fn create(&self, phone: PhoneNumber) -> DomainResult<PhoneNumber> {
        self.ensure_owner(phone.client_id).await?;
        insert_unique(self.repos.as_ref(), phone).await
    }

    pub async fn update(&self, number: &str, phone: PhoneNumber) -> DomainResult<PhoneNumber> {
        if phone.number != number {
            return Err(DomainError::InvalidArgument(format!(
                "body number {} does not match {}",
                phone.number, number
            )));
        }
        self.get(number).await?;
        self.ensure_owner(phone.client_id).await?;

        self.repos.phone_numbers().update(phone.clone()).await?;
        info!(number, client_id = phone.client_id, "Phone number updated");
        Ok(phone)
    }

    /// Remove a number and return what was stored
    pub async fn delete(&self, number: &str) -> DomainResult<PhoneNumber> {
        let existing = self.get(number).await?;
        self.repos.phone_numbers().delete(number).await?;
        info!(number, "Phone number deleted");
        Ok(existing)
    }

    async fn ensure_owner(&self, client_id: i32) -> DomainResult<()> {
        if client_id > 0 && self.repos.clients().exists(client_id).await? {
            Ok(())
        } else {
            Err(DomainError::ClientNotFound(client_id))
        }
    }
}

/// Insert a number, reporting an existing one as `Conflict`
pub(crate) async fn insert_unique(
    repos: &dyn RepositoryProvider,
    phone: PhoneNumber,
) -> DomainResult<PhoneNumber> {
    if repos.phone_numbers().find(&phone.number).await?.is_some() {
        return Err(already_exists(&phone.number));
    }
    match repos.phone_numbers().insert(phone.clone()).await {
        Ok(()) => {}
        Err(DomainError::ConcurrencyConflict(_)) => return Err(already_exists(&phone.number)),
        Err(e) => return Err(e),
    }
    info!(number = %phone.number, client_id = phone.client_id, "Phone number added");
    Ok(phone)
}

fn not_found(number: &str) -> DomainError {
    DomainError::NotFound {
        entity: "PhoneNumber",
        field: "number",
        value: number.to_string(),
    }
}

fn already_exists(number: &str) -> DomainError {
    DomainError::Conflict(format!("phone number {} already exists", number))
}
