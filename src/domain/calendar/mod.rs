//! Calendar of occupied days
//!
//! A day is recorded the first time a reservation is booked for it and is
//! never removed, even once all of its reservations are cancelled.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::DomainResult;

/// Inclusive, ordered date interval (`start <= end`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

#[async_trait]
pub trait CalendarRepository: Send + Sync {
    async fn exists(&self, day: NaiveDate) -> DomainResult<bool>;

    /// Record a day. Recording an already-present day is a no-op.
    async fn insert(&self, day: NaiveDate) -> DomainResult<()>;
}
