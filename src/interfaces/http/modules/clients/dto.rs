//! Client DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Address, Client, ClientDetails, PhoneNumber};
use crate::interfaces::http::modules::phone_numbers::{PhoneKindDto, PhoneNumberDto};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClientDto {
    pub id: i32,
    pub title: String,
    pub last_name: String,
    pub first_name: String,
    pub email: Option<String>,
    pub loyalty_card: bool,
    pub company: Option<String>,
}

impl From<Client> for ClientDto {
    fn from(c: Client) -> Self {
        Self {
            id: c.id,
            title: c.title,
            last_name: c.last_name,
            first_name: c.first_name,
            email: c.email,
            loyalty_card: c.loyalty_card,
            company: c.company,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddressDto {
    #[validate(length(min = 1, max = 100))]
    pub street: String,
    pub complement: Option<String>,
    #[validate(length(min = 1, max = 10))]
    pub postal_code: String,
    #[validate(length(min = 1, max = 50))]
    pub city: String,
}

impl From<Address> for AddressDto {
    fn from(a: Address) -> Self {
        Self {
            street: a.street,
            complement: a.complement,
            postal_code: a.postal_code,
            city: a.city,
        }
    }
}

impl From<AddressDto> for Address {
    fn from(a: AddressDto) -> Self {
        Self {
            client_id: 0,
            street: a.street,
            complement: a.complement,
            postal_code: a.postal_code,
            city: a.city,
        }
    }
}

/// Client with address and phone numbers
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClientDetailsDto {
    pub client: ClientDto,
    pub address: Option<AddressDto>,
    pub phone_numbers: Vec<PhoneNumberDto>,
}

impl From<ClientDetails> for ClientDetailsDto {
    fn from(d: ClientDetails) -> Self {
        Self {
            client: d.client.into(),
            address: d.address.map(AddressDto::from),
            phone_numbers: d.phone_numbers.into_iter().map(PhoneNumberDto::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClientRequest {
    /// Civility: M, Mme, Mlle
    #[validate(length(min = 1, max = 10))]
    pub title: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default)]
    pub loyalty_card: bool,
    #[validate(length(max = 50))]
    pub company: Option<String>,
    #[validate(nested)]
    pub address: Option<AddressDto>,
}

impl CreateClientRequest {
    pub fn into_domain(self) -> (Client, Option<Address>) {
        let client = Client {
            id: 0,
            title: self.title,
            last_name: self.last_name,
            first_name: self.first_name,
            email: self.email,
            loyalty_card: self.loyalty_card,
            company: self.company,
        };
        (client, self.address.map(Address::from))
    }
}

/// Phone number attached through `POST /api/v1/clients/{id}`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddPhoneRequest {
    #[validate(length(min = 1, max = 20))]
    pub number: String,
    pub kind: PhoneKindDto,
    #[serde(default)]
    pub professional: bool,
}

impl AddPhoneRequest {
    pub fn into_domain(self, client_id: i32) -> PhoneNumber {
        PhoneNumber {
            number: self.number,
            client_id,
            kind: self.kind.into(),
            professional: self.professional,
        }
    }
}
