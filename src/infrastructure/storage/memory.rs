//! In-memory storage implementation
//!
//! Mirrors the database constraints: key uniqueness surfaces as
//! `ConcurrencyConflict`, dangling references as `Conflict`.

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::invoice::PAYMENT_MODES;
use crate::domain::{
    Address, CalendarRepository, Client, ClientDetails, ClientRepository, DateRange, DomainError,
    DomainResult, Invoice, InvoiceLine, InvoiceLineRepository, InvoiceRepository, PhoneNumber,
    PhoneNumberRepository, RepositoryProvider, Reservation, ReservationKey, ReservationRepository,
    Room, RoomRepository,
};

/// In-memory storage for development and testing
pub struct InMemoryStore {
    clients: DashMap<i32, Client>,
    addresses: DashMap<i32, Address>,
    phone_numbers: DashMap<String, PhoneNumber>,
    rooms: DashMap<i32, Room>,
    calendar: DashMap<NaiveDate, ()>,
    reservations: DashMap<ReservationKey, Reservation>,
    payment_modes: DashMap<String, String>,
    invoices: DashMap<i32, Invoice>,
    invoice_lines: DashMap<(i32, i32), InvoiceLine>,
    client_counter: AtomicI32,
    invoice_counter: AtomicI32,
}

impl InMemoryStore {
    /// Empty store seeded with the room catalogue and payment modes
    pub fn new() -> Self {
        let store = Self {
            clients: DashMap::new(),
            addresses: DashMap::new(),
            phone_numbers: DashMap::new(),
            rooms: DashMap::new(),
            calendar: DashMap::new(),
            reservations: DashMap::new(),
            payment_modes: DashMap::new(),
            invoices: DashMap::new(),
            invoice_lines: DashMap::new(),
            client_counter: AtomicI32::new(1),
            invoice_counter: AtomicI32::new(1),
        };

        for room in Room::catalogue() {
            store.rooms.insert(room.number, room);
        }
        for (code, label) in PAYMENT_MODES {
            store.payment_modes.insert(code.to_string(), label.to_string());
        }

        store
    }

    fn dangling(what: &str) -> DomainError {
        DomainError::Conflict(format!("reference to missing {}", what))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryStore {
    fn clients(&self) -> &dyn ClientRepository {
        self
    }
    fn phone_numbers(&self) -> &dyn PhoneNumberRepository {
        self
    }
    fn rooms(&self) -> &dyn RoomRepository {
        self
    }
    fn calendar(&self) -> &dyn CalendarRepository {
        self
    }
    fn reservations(&self) -> &dyn ReservationRepository {
        self
    }
    fn invoices(&self) -> &dyn InvoiceRepository {
        self
    }
    fn invoice_lines(&self) -> &dyn InvoiceLineRepository {
        self
    }
}

// ── Clients ────────────────────────────────────────────────────

#[async_trait]
impl ClientRepository for InMemoryStore {
    async fn exists(&self, id: i32) -> DomainResult<bool> {
        Ok(self.clients.contains_key(&id))
    }

    async fn get(&self, id: i32) -> DomainResult<Option<ClientDetails>> {
        let Some(client) = self.clients.get(&id).map(|c| c.clone()) else {
            return Ok(None);
        };
        let address = self.addresses.get(&id).map(|a| a.clone());
        let mut phone_numbers: Vec<PhoneNumber> = self
            .phone_numbers
            .iter()
            .filter(|p| p.client_id == id)
            .map(|p| p.value().clone())
            .collect();
        phone_numbers.sort_by(|a, b| a.number.cmp(&b.number));

        Ok(Some(ClientDetails {
            client,
            address,
            phone_numbers,
        }))
    }

    async fn list(&self) -> DomainResult<Vec<Client>> {
        let mut clients: Vec<Client> = self.clients.iter().map(|c| c.value().clone()).collect();
        clients.sort_by_key(|c| c.id);
        Ok(clients)
    }

    async fn create(&self, mut client: Client, address: Option<Address>) -> DomainResult<ClientDetails> {
        client.id = self.client_counter.fetch_add(1, Ordering::SeqCst);
        let address = address.map(|a| Address {
            client_id: client.id,
            ..a
        });

        self.clients.insert(client.id, client.clone());
        if let Some(a) = &address {
            self.addresses.insert(client.id, a.clone());
        }

        Ok(ClientDetails {
            client,
            address,
            phone_numbers: Vec::new(),
        })
    }

    async fn delete_with_dependents(&self, id: i32) -> DomainResult<()> {
        if self.reservations.iter().any(|r| r.client_id == id)
            || self.invoices.iter().any(|i| i.client_id == id)
        {
            return Err(DomainError::ClientHasDependents(id));
        }
        if self.clients.remove(&id).is_none() {
            return Err(DomainError::ClientNotFound(id));
        }
        self.addresses.remove(&id);
        self.phone_numbers.retain(|_, p| p.client_id != id);
        Ok(())
    }
}

// ── Phone numbers ──────────────────────────────────────────────

#[async_trait]
impl PhoneNumberRepository for InMemoryStore {
    async fn find(&self, number: &str) -> DomainResult<Option<PhoneNumber>> {
        Ok(self.phone_numbers.get(number).map(|p| p.clone()))
    }

    async fn list(&self) -> DomainResult<Vec<PhoneNumber>> {
        let mut phones: Vec<PhoneNumber> =
            self.phone_numbers.iter().map(|p| p.value().clone()).collect();
        phones.sort_by(|a, b| a.number.cmp(&b.number));
        Ok(phones)
    }

    async fn insert(&self, phone: PhoneNumber) -> DomainResult<()> {
        if !self.clients.contains_key(&phone.client_id) {
            return Err(Self::dangling("client"));
        }
        match self.phone_numbers.entry(phone.number.clone()) {
            Entry::Occupied(_) => Err(DomainError::ConcurrencyConflict(format!(
                "phone number {} already stored",
                phone.number
            ))),
            Entry::Vacant(slot) => {
                slot.insert(phone);
                Ok(())
            }
        }
    }

    async fn update(&self, phone: PhoneNumber) -> DomainResult<()> {
        if !self.clients.contains_key(&phone.client_id) {
            return Err(Self::dangling("client"));
        }
        match self.phone_numbers.get_mut(&phone.number) {
            Some(mut existing) => {
                *existing = phone;
                Ok(())
            }
            None => Err(DomainError::NotFound {
                entity: "PhoneNumber",
                field: "number",
                value: phone.number,
            }),
        }
    }

    async fn delete(&self, number: &str) -> DomainResult<()> {
        self.phone_numbers.remove(number);
        Ok(())
    }
}

// ── Rooms and calendar ─────────────────────────────────────────

#[async_trait]
impl RoomRepository for InMemoryStore {
    async fn exists(&self, number: i32) -> DomainResult<bool> {
        Ok(self.rooms.contains_key(&number))
    }

    async fn list(&self) -> DomainResult<Vec<Room>> {
        let mut rooms: Vec<Room> = self.rooms.iter().map(|r| r.value().clone()).collect();
        rooms.sort_by_key(|r| r.number);
        Ok(rooms)
    }
}

#[async_trait]
impl CalendarRepository for InMemoryStore {
    async fn exists(&self, day: NaiveDate) -> DomainResult<bool> {
        Ok(self.calendar.contains_key(&day))
    }

    async fn insert(&self, day: NaiveDate) -> DomainResult<()> {
        self.calendar.entry(day).or_insert(());
        Ok(())
    }
}

// ── Reservations ───────────────────────────────────────────────

#[async_trait]
impl ReservationRepository for InMemoryStore {
    async fn find(&self, key: ReservationKey) -> DomainResult<Option<Reservation>> {
        Ok(self.reservations.get(&key).map(|r| r.clone()))
    }

    async fn find_by_day(&self, day: NaiveDate) -> DomainResult<Vec<Reservation>> {
        let mut found: Vec<Reservation> = self
            .reservations
            .iter()
            .filter(|r| r.day == day)
            .map(|r| r.value().clone())
            .collect();
        found.sort_by_key(|r| r.room_number);
        Ok(found)
    }

    async fn find_by_client(&self, client_id: i32) -> DomainResult<Vec<Reservation>> {
        let mut found: Vec<Reservation> = self
            .reservations
            .iter()
            .filter(|r| r.client_id == client_id)
            .map(|r| r.value().clone())
            .collect();
        found.sort_by_key(|r| (r.day, r.room_number));
        Ok(found)
    }

    async fn exists_for_client(&self, client_id: i32) -> DomainResult<bool> {
        Ok(self.reservations.iter().any(|r| r.client_id == client_id))
    }

    async fn insert(&self, reservation: Reservation) -> DomainResult<()> {
        if !self.clients.contains_key(&reservation.client_id) {
            return Err(Self::dangling("client"));
        }
        if !self.rooms.contains_key(&reservation.room_number) {
            return Err(Self::dangling("room"));
        }
        if !self.calendar.contains_key(&reservation.day) {
            return Err(Self::dangling("calendar day"));
        }
        match self.reservations.entry(reservation.key()) {
            Entry::Occupied(slot) => Err(DomainError::ConcurrencyConflict(format!(
                "{} is already booked",
                slot.key()
            ))),
            Entry::Vacant(slot) => {
                slot.insert(reservation);
                Ok(())
            }
        }
    }

    async fn update(&self, reservation: Reservation) -> DomainResult<()> {
        let key = reservation.key();
        match self.reservations.get_mut(&key) {
            Some(mut existing) => {
                existing.guests = reservation.guests;
                existing.arrival_time = reservation.arrival_time;
                existing.business_trip = reservation.business_trip;
                Ok(())
            }
            None => Err(DomainError::ReservationNotFound {
                room_number: key.room_number,
                day: key.day,
            }),
        }
    }

    async fn delete(&self, key: ReservationKey) -> DomainResult<()> {
        self.reservations.remove(&key);
        Ok(())
    }
}

// ── Invoices ───────────────────────────────────────────────────

#[async_trait]
impl InvoiceRepository for InMemoryStore {
    async fn find(&self, id: i32) -> DomainResult<Option<Invoice>> {
        Ok(self.invoices.get(&id).map(|i| i.clone()))
    }

    async fn find_for_client_between(
        &self,
        client_id: i32,
        range: DateRange,
    ) -> DomainResult<Vec<Invoice>> {
        let mut found: Vec<Invoice> = self
            .invoices
            .iter()
            .filter(|i| i.client_id == client_id && range.contains(i.invoice_date))
            .map(|i| i.value().clone())
            .collect();
        found.sort_by_key(|i| (i.invoice_date, i.id));
        Ok(found)
    }

    async fn exists_for_client(&self, client_id: i32) -> DomainResult<bool> {
        Ok(self.invoices.iter().any(|i| i.client_id == client_id))
    }

    async fn insert(&self, mut invoice: Invoice) -> DomainResult<Invoice> {
        if !self.clients.contains_key(&invoice.client_id) {
            return Err(Self::dangling("client"));
        }
        if !self.payment_modes.contains_key(&invoice.payment_mode_code) {
            return Err(Self::dangling("payment mode"));
        }
        invoice.id = self.invoice_counter.fetch_add(1, Ordering::SeqCst);
        invoice.lines.clear();
        self.invoices.insert(invoice.id, invoice.clone());
        Ok(invoice)
    }

    async fn update(&self, invoice: Invoice) -> DomainResult<()> {
        if !self.payment_modes.contains_key(&invoice.payment_mode_code) {
            return Err(Self::dangling("payment mode"));
        }
        match self.invoices.get_mut(&invoice.id) {
            Some(mut existing) => {
                existing.invoice_date = invoice.invoice_date;
                existing.payment_mode_code = invoice.payment_mode_code;
                Ok(())
            }
            None => Err(DomainError::InvoiceNotFound(invoice.id)),
        }
    }

    async fn payment_mode_exists(&self, code: &str) -> DomainResult<bool> {
        Ok(self.payment_modes.contains_key(code))
    }
}

#[async_trait]
impl InvoiceLineRepository for InMemoryStore {
    async fn find_by_invoice(&self, invoice_id: i32) -> DomainResult<Vec<InvoiceLine>> {
        let mut lines: Vec<InvoiceLine> = self
            .invoice_lines
            .iter()
            .filter(|l| l.invoice_id == invoice_id)
            .map(|l| l.value().clone())
            .collect();
        lines.sort_by_key(|l| l.line_number);
        Ok(lines)
    }

    async fn insert(&self, line: InvoiceLine) -> DomainResult<()> {
        if !self.invoices.contains_key(&line.invoice_id) {
            return Err(Self::dangling("invoice"));
        }
        match self.invoice_lines.entry((line.invoice_id, line.line_number)) {
            Entry::Occupied(_) => Err(DomainError::ConcurrencyConflict(format!(
                "line {} of invoice {} already exists",
                line.line_number, line.invoice_id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(line);
                Ok(())
            }
        }
    }
}
