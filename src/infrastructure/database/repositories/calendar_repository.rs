//! SeaORM implementation of CalendarRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, Set};

use super::db_err;
use crate::domain::{CalendarRepository, DomainResult};
use crate::infrastructure::database::entities::calendar_day;

pub struct SeaOrmCalendarRepository {
    db: DatabaseConnection,
}

impl SeaOrmCalendarRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CalendarRepository for SeaOrmCalendarRepository {
    async fn exists(&self, day: NaiveDate) -> DomainResult<bool> {
        let model = calendar_day::Entity::find_by_id(day)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.is_some())
    }

    async fn insert(&self, day: NaiveDate) -> DomainResult<()> {
        let inserted = calendar_day::Entity::insert(calendar_day::ActiveModel { day: Set(day) })
            .on_conflict(
                OnConflict::column(calendar_day::Column::Day)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(db_err)?;
        if inserted > 0 {
            debug!("Calendar day {} recorded", day);
        }
        Ok(())
    }
}
