//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::db_err;
use crate::domain::{DomainError, DomainResult, Reservation, ReservationKey, ReservationRepository};
use crate::infrastructure::database::entities::reservation;

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> Reservation {
    Reservation {
        room_number: m.room_number,
        day: m.day,
        client_id: m.client_id,
        guests: m.guests,
        arrival_time: m.arrival_time,
        business_trip: m.business_trip,
    }
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn find(&self, key: ReservationKey) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id((key.room_number, key.day))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_day(&self, day: NaiveDate) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::Day.eq(day))
            .order_by_asc(reservation::Column::RoomNumber)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_client(&self, client_id: i32) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::ClientId.eq(client_id))
            .order_by_asc(reservation::Column::Day)
            .order_by_asc(reservation::Column::RoomNumber)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn exists_for_client(&self, client_id: i32) -> DomainResult<bool> {
        let count = reservation::Entity::find()
            .filter(reservation::Column::ClientId.eq(client_id))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn insert(&self, r: Reservation) -> DomainResult<()> {
        debug!("Saving reservation: {}", r.key());

        let model = reservation::ActiveModel {
            room_number: Set(r.room_number),
            day: Set(r.day),
            client_id: Set(r.client_id),
            guests: Set(r.guests),
            arrival_time: Set(r.arrival_time),
            business_trip: Set(r.business_trip),
        };
        reservation::Entity::insert(model)
            .exec_without_returning(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn update(&self, r: Reservation) -> DomainResult<()> {
        debug!("Updating reservation: {}", r.key());

        let Some(existing) = reservation::Entity::find_by_id((r.room_number, r.day))
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Err(DomainError::ReservationNotFound {
                room_number: r.room_number,
                day: r.day,
            });
        };

        let mut active: reservation::ActiveModel = existing.into();
        active.guests = Set(r.guests);
        active.arrival_time = Set(r.arrival_time);
        active.business_trip = Set(r.business_trip);
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, key: ReservationKey) -> DomainResult<()> {
        debug!("Deleting reservation: {}", key);
        reservation::Entity::delete_by_id((key.room_number, key.day))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
