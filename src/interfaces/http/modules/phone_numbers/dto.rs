//! Phone number DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{PhoneKind, PhoneNumber};

/// Line type: `M` mobile, `F` landline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PhoneKindDto {
    #[serde(rename = "M")]
    Mobile,
    #[serde(rename = "F")]
    Landline,
}

impl From<PhoneKind> for PhoneKindDto {
    fn from(kind: PhoneKind) -> Self {
        match kind {
            PhoneKind::Mobile => Self::Mobile,
            PhoneKind::Landline => Self::Landline,
        }
    }
}

impl From<PhoneKindDto> for PhoneKind {
    fn from(kind: PhoneKindDto) -> Self {
        match kind {
            PhoneKindDto::Mobile => Self::Mobile,
            PhoneKindDto::Landline => Self::Landline,
        }
    }
}

/// Phone number as returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PhoneNumberDto {
    pub number: String,
    pub client_id: i32,
    pub kind: PhoneKindDto,
    pub professional: bool,
}

impl From<PhoneNumber> for PhoneNumberDto {
    fn from(p: PhoneNumber) -> Self {
        Self {
            number: p.number,
            client_id: p.client_id,
            kind: p.kind.into(),
            professional: p.professional,
        }
    }
}

/// Create or replace a phone number
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PhoneNumberRequest {
    #[validate(length(min = 1, max = 20))]
    pub number: String,
    /// Owner. Required on create.
    pub client_id: Option<i32>,
    pub kind: PhoneKindDto,
    #[serde(default)]
    pub professional: bool,
}

impl PhoneNumberRequest {
    pub fn into_domain(self, client_id: i32) -> PhoneNumber {
        PhoneNumber {
            number: self.number,
            client_id,
            kind: self.kind.into(),
            professional: self.professional,
        }
    }
}
