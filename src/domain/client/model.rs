//! Client domain entity

use crate::domain::phone_number::PhoneNumber;

/// A hotel client
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    /// Server-assigned identifier (0 until stored)
    pub id: i32,
    /// Civility, e.g. "M", "Mme"
    pub title: String,
    pub last_name: String,
    pub first_name: String,
    pub email: Option<String>,
    /// Holds a loyalty card
    pub loyalty_card: bool,
    pub company: Option<String>,
}

impl Client {
    pub fn new(
        title: impl Into<String>,
        last_name: impl Into<String>,
        first_name: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            last_name: last_name.into(),
            first_name: first_name.into(),
            email: None,
            loyalty_card: false,
            company: None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Postal address, owned by exactly one client
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub client_id: i32,
    pub street: String,
    pub complement: Option<String>,
    pub postal_code: String,
    pub city: String,
}

/// Client aggregate with its address and phone numbers loaded
#[derive(Debug, Clone)]
pub struct ClientDetails {
    pub client: Client,
    pub address: Option<Address>,
    pub phone_numbers: Vec<PhoneNumber>,
}
