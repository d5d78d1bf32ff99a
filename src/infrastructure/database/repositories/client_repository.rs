//! SeaORM implementation of ClientRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait, TryIntoModel,
};

use super::db_err;
use super::phone_number_repository::model_to_domain as phone_to_domain;
use crate::domain::{Address, Client, ClientDetails, ClientRepository, DomainError, DomainResult};
use crate::infrastructure::database::entities::{address, client, invoice, phone_number, reservation};

pub struct SeaOrmClientRepository {
    db: DatabaseConnection,
}

impl SeaOrmClientRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: client::Model) -> Client {
    Client {
        id: m.id,
        title: m.title,
        last_name: m.last_name,
        first_name: m.first_name,
        email: m.email,
        loyalty_card: m.loyalty_card,
        company: m.company,
    }
}

fn address_to_domain(m: address::Model) -> Address {
    Address {
        client_id: m.client_id,
        street: m.street,
        complement: m.complement,
        postal_code: m.postal_code,
        city: m.city,
    }
}

// ── ClientRepository impl ───────────────────────────────────────

#[async_trait]
impl ClientRepository for SeaOrmClientRepository {
    async fn exists(&self, id: i32) -> DomainResult<bool> {
        let model = client::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.is_some())
    }

    async fn get(&self, id: i32) -> DomainResult<Option<ClientDetails>> {
        let Some(model) = client::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let address = model
            .find_related(address::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(address_to_domain);

        let phone_numbers = model
            .find_related(phone_number::Entity)
            .order_by_asc(phone_number::Column::Number)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(phone_to_domain)
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(Some(ClientDetails {
            client: model_to_domain(model),
            address,
            phone_numbers,
        }))
    }

    async fn list(&self) -> DomainResult<Vec<Client>> {
        let models = client::Entity::find()
            .order_by_asc(client::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn create(&self, c: Client, address: Option<Address>) -> DomainResult<ClientDetails> {
        debug!("Creating client: {} {}", c.first_name, c.last_name);

        let txn = self.db.begin().await.map_err(db_err)?;

        let stored = client::ActiveModel {
            id: NotSet,
            title: Set(c.title),
            last_name: Set(c.last_name),
            first_name: Set(c.first_name),
            email: Set(c.email),
            loyalty_card: Set(c.loyalty_card),
            company: Set(c.company),
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        let address = match address {
            Some(a) => {
                let model = address::ActiveModel {
                    client_id: Set(stored.id),
                    street: Set(a.street),
                    complement: Set(a.complement),
                    postal_code: Set(a.postal_code),
                    city: Set(a.city),
                };
                address::Entity::insert(model.clone())
                    .exec_without_returning(&txn)
                    .await
                    .map_err(db_err)?;
                Some(address_to_domain(model.try_into_model().map_err(db_err)?))
            }
            None => None,
        };

        txn.commit().await.map_err(db_err)?;

        Ok(ClientDetails {
            client: model_to_domain(stored),
            address,
            phone_numbers: Vec::new(),
        })
    }

    async fn delete_with_dependents(&self, id: i32) -> DomainResult<()> {
        debug!("Deleting client {} with address and phone numbers", id);

        let txn = self.db.begin().await.map_err(db_err)?;

        // Dependents may have appeared since the caller checked.
        let reservations = reservation::Entity::find()
            .filter(reservation::Column::ClientId.eq(id))
            .count(&txn)
            .await
            .map_err(db_err)?;
        let invoices = invoice::Entity::find()
            .filter(invoice::Column::ClientId.eq(id))
            .count(&txn)
            .await
            .map_err(db_err)?;
        if reservations > 0 || invoices > 0 {
            txn.rollback().await.map_err(db_err)?;
            return Err(DomainError::ClientHasDependents(id));
        }

        phone_number::Entity::delete_many()
            .filter(phone_number::Column::ClientId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        address::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;
        let deleted = client::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if deleted.rows_affected == 0 {
            txn.rollback().await.map_err(db_err)?;
            return Err(DomainError::ClientNotFound(id));
        }

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }
}
