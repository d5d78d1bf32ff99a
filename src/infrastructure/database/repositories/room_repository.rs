//! SeaORM implementation of RoomRepository

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use super::db_err;
use crate::domain::{DomainResult, Room, RoomRepository};
use crate::infrastructure::database::entities::room;

pub struct SeaOrmRoomRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoomRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: room::Model) -> Room {
    Room {
        number: m.number,
        floor: m.floor,
        bath: m.bath,
        shower: m.shower,
        toilet: m.toilet,
        beds: m.beds,
        phone_extension: m.phone_extension,
    }
}

#[async_trait]
impl RoomRepository for SeaOrmRoomRepository {
    async fn exists(&self, number: i32) -> DomainResult<bool> {
        let model = room::Entity::find_by_id(number)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.is_some())
    }

    async fn list(&self) -> DomainResult<Vec<Room>> {
        let models = room::Entity::find()
            .order_by_asc(room::Column::Number)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
