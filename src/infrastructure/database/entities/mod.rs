//! Database entities module

pub mod address;
pub mod calendar_day;
pub mod client;
pub mod invoice;
pub mod invoice_line;
pub mod payment_mode;
pub mod phone_number;
pub mod reservation;
pub mod room;

pub use address::Entity as Address;
pub use calendar_day::Entity as CalendarDay;
pub use client::Entity as Client;
pub use invoice::Entity as Invoice;
pub use invoice_line::Entity as InvoiceLine;
pub use payment_mode::Entity as PaymentMode;
pub use phone_number::Entity as PhoneNumber;
pub use reservation::Entity as Reservation;
pub use room::Entity as Room;
