pub mod service;

pub(crate) use service::insert_unique;
pub use service::PhoneNumberService;
