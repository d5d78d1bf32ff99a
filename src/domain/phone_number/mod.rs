//! Phone numbers
//!
//! The number string itself is the identity; each number belongs to one client.

use async_trait::async_trait;

use crate::domain::DomainResult;

/// Line type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneKind {
    Mobile,
    Landline,
}

impl PhoneKind {
    /// Storage code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "M",
            Self::Landline => "F",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "M" => Some(Self::Mobile),
            "F" => Some(Self::Landline),
            _ => None,
        }
    }
}

impl std::fmt::Display for PhoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhoneNumber {
    /// Natural key
    pub number: String,
    pub client_id: i32,
    pub kind: PhoneKind,
    /// Work number
    pub professional: bool,
}

#[async_trait]
pub trait PhoneNumberRepository: Send + Sync {
    async fn find(&self, number: &str) -> DomainResult<Option<PhoneNumber>>;

    /// All numbers, ordered by number
    async fn list(&self) -> DomainResult<Vec<PhoneNumber>>;

    /// Insert a new number. A duplicate number surfaces as `ConcurrencyConflict`.
    async fn insert(&self, phone: PhoneNumber) -> DomainResult<()>;

    /// Overwrite an existing number's attributes
    async fn update(&self, phone: PhoneNumber) -> DomainResult<()>;

    async fn delete(&self, number: &str) -> DomainResult<()>;
}
