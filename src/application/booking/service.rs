//! Reservation use-cases
//!
//! HTTP handlers are thin wrappers around this service. Every check runs
//! before the first write; the room/day uniqueness constraint settles races
//! that slip between the availability check and the insert.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use super::availability::AvailabilityChecker;
use crate::domain::{
    DomainError, DomainResult, RepositoryProvider, Reservation, ReservationDraft, ReservationKey,
};

pub struct ReservationService {
    repos: Arc<dyn RepositoryProvider>,
    availability: AvailabilityChecker,
}

impl ReservationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        let availability = AvailabilityChecker::new(repos.clone());
        Self { repos, availability }
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Reservations of one day, ordered by room
    pub async fn list_by_day(&self, day: Option<NaiveDate>) -> DomainResult<Vec<Reservation>> {
        let day = day.ok_or_else(|| DomainError::InvalidArgument("day is required".into()))?;
        self.repos.reservations().find_by_day(day).await
    }

    /// Reservations of one client, ordered by day then room
    pub async fn list_by_client(&self, client_id: i32) -> DomainResult<Vec<Reservation>> {
        self.ensure_client(client_id).await?;
        self.repos.reservations().find_by_client(client_id).await
    }

    // ── Mutations ───────────────────────────────────────────────

    /// Book a room for a day on behalf of `client_id`.
    ///
    /// The owner is always `client_id`, whatever the draft carries.
    pub async fn book(&self, client_id: i32, draft: ReservationDraft) -> DomainResult<Reservation> {
        let key = draft.key()?;
        self.ensure_client(client_id).await?;
        let reservation = draft.into_reservation(client_id)?;

        self.availability.ensure_room_exists(key.room_number).await?;
        if let Err(e) = self.availability.ensure_available(key).await {
            metrics::counter!("reservation_conflicts_total").increment(1);
            return Err(e);
        }

        self.repos.calendar().insert(key.day).await?;

        match self.repos.reservations().insert(reservation.clone()).await {
            Ok(()) => {}
            Err(DomainError::ConcurrencyConflict(_)) => {
                metrics::counter!("reservation_conflicts_total").increment(1);
                warn!(client_id, %key, "Lost booking race");
                return Err(DomainError::RoomUnavailable {
                    room_number: key.room_number,
                    day: key.day,
                });
            }
            Err(e) => return Err(e),
        }

        metrics::counter!("reservations_booked_total").increment(1);
        info!(client_id, room_number = key.room_number, day = %key.day, "Reservation booked");
        Ok(reservation)
    }

    /// Change guests, arrival time and business flag of an existing booking.
    pub async fn update(&self, client_id: i32, changes: ReservationDraft) -> DomainResult<Reservation> {
        let key = changes.key()?;
        self.ensure_client(client_id).await?;
        changes.check_guests()?;

        let mut reservation = self.find_owned(client_id, key).await?;
        reservation.apply_changes(&changes);
        self.repos.reservations().update(reservation.clone()).await?;

        info!(client_id, %key, guests = reservation.guests, "Reservation updated");
        Ok(reservation)
    }

    /// Remove a booking and return it. The calendar day stays recorded.
    pub async fn cancel(&self, client_id: i32, target: ReservationDraft) -> DomainResult<Reservation> {
        let key = target.key()?;
        self.ensure_client(client_id).await?;

        let reservation = self.find_owned(client_id, key).await?;
        self.repos.reservations().delete(key).await?;

        info!(client_id, %key, "Reservation cancelled");
        Ok(reservation)
    }

    // ── Helpers ─────────────────────────────────────────────────

    async fn ensure_client(&self, client_id: i32) -> DomainResult<()> {
        if client_id > 0 && self.repos.clients().exists(client_id).await? {
            Ok(())
        } else {
            Err(DomainError::ClientNotFound(client_id))
        }
    }

    /// A reservation held by someone else is reported as absent.
    async fn find_owned(&self, client_id: i32, key: ReservationKey) -> DomainResult<Reservation> {
        match self.repos.reservations().find(key).await? {
            Some(r) if r.client_id == client_id => Ok(r),
            _ => Err(DomainError::ReservationNotFound {
                room_number: key.room_number,
                day: key.day,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::NaiveTime;

    use super::*;
    use crate::domain::{
        CalendarRepository, Client, ClientRepository, InvoiceLineRepository, InvoiceRepository,
        PhoneNumberRepository, ReservationRepository, RoomRepository,
    };
    use crate::infrastructure::storage::InMemoryStore;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    struct Fixture {
        repos: Arc<dyn RepositoryProvider>,
        service: ReservationService,
        alice: i32,
        bob: i32,
    }

    async fn fixture() -> Fixture {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryStore::new());
        let alice = repos
            .clients()
            .create(Client::new("Mme", "Durand", "Alice"), None)
            .await
            .unwrap()
            .client
            .id;
        let bob = repos
            .clients()
            .create(Client::new("M", "Martin", "Bob"), None)
            .await
            .unwrap()
            .client
            .id;
        Fixture {
            service: ReservationService::new(repos.clone()),
            repos,
            alice,
            bob,
        }
    }

    /// Store whose reservation lookups never see existing rows, so a
    /// competing booking lands between the availability check and the insert.
    struct StaleReadStore {
        inner: Arc<InMemoryStore>,
        reservations: StaleReservations,
    }

    struct StaleReservations {
        inner: Arc<InMemoryStore>,
    }

    #[async_trait]
    impl ReservationRepository for StaleReservations {
        async fn find(&self, _key: ReservationKey) -> DomainResult<Option<Reservation>> {
            Ok(None)
        }
        async fn find_by_day(&self, day: NaiveDate) -> DomainResult<Vec<Reservation>> {
            self.inner.reservations().find_by_day(day).await
        }
        async fn find_by_client(&self, client_id: i32) -> DomainResult<Vec<Reservation>> {
            self.inner.reservations().find_by_client(client_id).await
        }
        async fn exists_for_client(&self, client_id: i32) -> DomainResult<bool> {
            self.inner.reservations().exists_for_client(client_id).await
        }
        async fn insert(&self, reservation: Reservation) -> DomainResult<()> {
            self.inner.reservations().insert(reservation).await
        }
        async fn update(&self, reservation: Reservation) -> DomainResult<()> {
            self.inner.reservations().update(reservation).await
        }
        async fn delete(&self, key: ReservationKey) -> DomainResult<()> {
            self.inner.reservations().delete(key).await
        }
    }

    impl RepositoryProvider for StaleReadStore {
        fn clients(&self) -> &dyn ClientRepository {
            self.inner.clients()
        }
        fn phone_numbers(&self) -> &dyn PhoneNumberRepository {
            self.inner.phone_numbers()
        }
        fn rooms(&self) -> &dyn RoomRepository {
            self.inner.rooms()
        }
        fn calendar(&self) -> &dyn CalendarRepository {
            self.inner.calendar()
        }
        fn reservations(&self) -> &dyn ReservationRepository {
            &self.reservations
        }
        fn invoices(&self) -> &dyn InvoiceRepository {
            self.inner.invoices()
        }
        fn invoice_lines(&self) -> &dyn InvoiceLineRepository {
            self.inner.invoice_lines()
        }
    }

    #[tokio::test]
    async fn book_records_calendar_day_and_reservation() {
        let f = fixture().await;
        let booked = f.service.book(f.alice, ReservationDraft::new(12, day(1), 2)).await.unwrap();

        assert_eq!(booked.client_id, f.alice);
        assert!(f.repos.calendar().exists(day(1)).await.unwrap());
        let stored = f.repos.reservations().find(booked.key()).await.unwrap();
        assert_eq!(stored, Some(booked));
    }

    #[tokio::test]
    async fn book_forces_owner_from_route() {
        let f = fixture().await;
        let draft = ReservationDraft {
            client_id: Some(f.bob),
            ..ReservationDraft::new(3, day(1), 1)
        };
        let booked = f.service.book(f.alice, draft).await.unwrap();
        assert_eq!(booked.client_id, f.alice);
    }

    #[tokio::test]
    async fn double_booking_is_rejected_and_first_booking_kept() {
        let f = fixture().await;
        f.service.book(f.alice, ReservationDraft::new(12, day(1), 2)).await.unwrap();

        let err = f
            .service
            .book(f.bob, ReservationDraft::new(12, day(1), 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::RoomUnavailable { room_number: 12, .. }));

        let rows = f.repos.reservations().find_by_day(day(1)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].client_id, f.alice);
    }

    #[tokio::test]
    async fn booking_that_loses_the_insert_race_is_unavailable() {
        let inner = Arc::new(InMemoryStore::new());
        let repos: Arc<dyn RepositoryProvider> = Arc::new(StaleReadStore {
            inner: inner.clone(),
            reservations: StaleReservations { inner: inner.clone() },
        });
        let service = ReservationService::new(repos.clone());
        let alice = repos
            .clients()
            .create(Client::new("Mme", "Durand", "Alice"), None)
            .await
            .unwrap()
            .client
            .id;
        let bob = repos
            .clients()
            .create(Client::new("M", "Martin", "Bob"), None)
            .await
            .unwrap()
            .client
            .id;

        service.book(alice, ReservationDraft::new(12, day(1), 2)).await.unwrap();
        let err = service
            .book(bob, ReservationDraft::new(12, day(1), 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::RoomUnavailable { room_number: 12, .. }));

        let rows = repos.reservations().find_by_day(day(1)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].client_id, alice);
        assert_eq!(rows[0].guests, 2);
    }

    #[tokio::test]
    async fn book_validates_before_writing() {
        let f = fixture().await;

        let no_room = ReservationDraft { day: Some(day(1)), guests: Some(1), ..Default::default() };
        assert!(matches!(
            f.service.book(f.alice, no_room).await,
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(matches!(
            f.service.book(f.alice, ReservationDraft::new(0, day(1), 1)).await,
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(matches!(
            f.service.book(f.alice, ReservationDraft::new(4, day(1), 0)).await,
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(matches!(
            f.service.book(999, ReservationDraft::new(4, day(1), 1)).await,
            Err(DomainError::ClientNotFound(999))
        ));
        assert!(matches!(
            f.service.book(f.alice, ReservationDraft::new(77, day(1), 1)).await,
            Err(DomainError::UnknownRoom(77))
        ));

        assert!(!f.repos.calendar().exists(day(1)).await.unwrap());
    }

    #[tokio::test]
    async fn update_changes_only_mutable_fields() {
        let f = fixture().await;
        f.service.book(f.alice, ReservationDraft::new(5, day(2), 1)).await.unwrap();

        let changes = ReservationDraft {
            client_id: Some(f.bob),
            arrival_time: NaiveTime::from_hms_opt(18, 30, 0),
            business_trip: true,
            ..ReservationDraft::new(5, day(2), 3)
        };
        let updated = f.service.update(f.alice, changes).await.unwrap();

        assert_eq!(updated.client_id, f.alice);
        assert_eq!(updated.guests, 3);
        assert!(updated.business_trip);
        assert_eq!(updated.arrival_time, NaiveTime::from_hms_opt(18, 30, 0));
        let stored = f.repos.reservations().find(updated.key()).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn update_without_guests_keeps_stored_count() {
        let f = fixture().await;
        f.service.book(f.alice, ReservationDraft::new(5, day(2), 4)).await.unwrap();

        let changes = ReservationDraft {
            guests: None,
            business_trip: true,
            ..ReservationDraft::new(5, day(2), 0)
        };
        let updated = f.service.update(f.alice, changes).await.unwrap();
        assert_eq!(updated.guests, 4);
        assert!(updated.business_trip);

        let stored = f.repos.reservations().find(updated.key()).await.unwrap().unwrap();
        assert_eq!(stored.guests, 4);

        assert!(matches!(
            f.service.update(f.alice, ReservationDraft::new(5, day(2), 0)).await,
            Err(DomainError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn update_of_someone_elses_booking_is_not_found() {
        let f = fixture().await;
        f.service.book(f.alice, ReservationDraft::new(5, day(2), 1)).await.unwrap();

        let err = f
            .service
            .update(f.bob, ReservationDraft::new(5, day(2), 4))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ReservationNotFound { .. }));
    }

    #[tokio::test]
    async fn cancel_returns_deleted_reservation_and_keeps_calendar_day() {
        let f = fixture().await;
        let booked = f.service.book(f.alice, ReservationDraft::new(7, day(3), 2)).await.unwrap();

        let cancelled = f.service.cancel(f.alice, ReservationDraft::new(7, day(3), 0)).await.unwrap();
        assert_eq!(cancelled, booked);
        assert!(f.repos.reservations().find(booked.key()).await.unwrap().is_none());
        assert!(f.repos.calendar().exists(day(3)).await.unwrap());

        assert!(matches!(
            f.service.cancel(f.alice, ReservationDraft::new(7, day(3), 0)).await,
            Err(DomainError::ReservationNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn listing_requires_day_and_orders_results() {
        let f = fixture().await;
        assert!(matches!(
            f.service.list_by_day(None).await,
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(f.service.list_by_day(Some(day(9))).await.unwrap().is_empty());

        f.service.book(f.alice, ReservationDraft::new(9, day(4), 1)).await.unwrap();
        f.service.book(f.bob, ReservationDraft::new(2, day(4), 1)).await.unwrap();
        f.service.book(f.alice, ReservationDraft::new(1, day(3), 1)).await.unwrap();

        let rooms: Vec<i32> = f
            .service
            .list_by_day(Some(day(4)))
            .await
            .unwrap()
            .iter()
            .map(|r| r.room_number)
            .collect();
        assert_eq!(rooms, vec![2, 9]);

        let mine: Vec<(NaiveDate, i32)> = f
            .service
            .list_by_client(f.alice)
            .await
            .unwrap()
            .iter()
            .map(|r| (r.day, r.room_number))
            .collect();
        assert_eq!(mine, vec![(day(3), 1), (day(4), 9)]);

        assert!(matches!(
            f.service.list_by_client(4242).await,
            Err(DomainError::ClientNotFound(4242))
        ));
    }
}
