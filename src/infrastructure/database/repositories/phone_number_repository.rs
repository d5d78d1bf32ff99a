//! SeaORM implementation of PhoneNumberRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::db_err;
use crate::domain::{DomainError, DomainResult, PhoneKind, PhoneNumber, PhoneNumberRepository};
use crate::infrastructure::database::entities::phone_number;

pub struct SeaOrmPhoneNumberRepository {
    db: DatabaseConnection,
}

impl SeaOrmPhoneNumberRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(super) fn model_to_domain(m: phone_number::Model) -> DomainResult<PhoneNumber> {
    let kind = PhoneKind::from_code(&m.kind).ok_or_else(|| {
        DomainError::Storage(format!("phone number {} has unknown kind '{}'", m.number, m.kind))
    })?;
    Ok(PhoneNumber {
        number: m.number,
        client_id: m.client_id,
        kind,
        professional: m.professional,
    })
}

fn domain_to_active(p: PhoneNumber) -> phone_number::ActiveModel {
    phone_number::ActiveModel {
        number: Set(p.number),
        client_id: Set(p.client_id),
        kind: Set(p.kind.as_str().to_string()),
        professional: Set(p.professional),
    }
}

#[async_trait]
impl PhoneNumberRepository for SeaOrmPhoneNumberRepository {
    async fn find(&self, number: &str) -> DomainResult<Option<PhoneNumber>> {
        phone_number::Entity::find_by_id(number.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(model_to_domain)
            .transpose()
    }

    async fn list(&self) -> DomainResult<Vec<PhoneNumber>> {
        phone_number::Entity::find()
            .order_by_asc(phone_number::Column::Number)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(model_to_domain)
            .collect()
    }

    async fn insert(&self, p: PhoneNumber) -> DomainResult<()> {
        debug!("Saving phone number {} for client {}", p.number, p.client_id);
        phone_number::Entity::insert(domain_to_active(p))
            .exec_without_returning(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn update(&self, p: PhoneNumber) -> DomainResult<()> {
        debug!("Updating phone number {}", p.number);

        let existing = phone_number::Entity::find_by_id(p.number.clone())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::NotFound {
                entity: "PhoneNumber",
                field: "number",
                value: p.number,
            });
        }

        domain_to_active(p).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, number: &str) -> DomainResult<()> {
        phone_number::Entity::delete_by_id(number.to_string())
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
