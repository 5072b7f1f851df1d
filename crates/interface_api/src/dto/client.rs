//! Client DTOs

use serde::Deserialize;
use validator::Validate;

use domain_fleet::client::{ClientStatus, ClientUpdate, NewClient};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClientRequest {
    #[validate(length(min = 1))]
    pub client_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub phone_number: String,
    #[validate(length(min = 1))]
    pub company_name: String,
    #[validate(length(min = 1))]
    pub industry: String,
    /// Defaults to `Active` when omitted
    pub status: Option<ClientStatus>,
    pub note: Option<String>,
}

impl CreateClientRequest {
    pub fn into_new_client(self) -> NewClient {
        NewClient {
            client_name: self.client_name,
            email: self.email,
            phone_number: self.phone_number,
            company_name: self.company_name,
            industry: self.industry,
            status: self.status.unwrap_or(ClientStatus::Active),
            note: self.note,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateClientRequest {
    #[validate(length(min = 1))]
    pub client_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub company_name: Option<String>,
    pub industry: Option<String>,
    pub status: Option<ClientStatus>,
    pub note: Option<String>,
}

impl UpdateClientRequest {
    pub fn into_update(self) -> ClientUpdate {
        ClientUpdate {
            client_name: self.client_name,
            email: self.email,
            phone_number: self.phone_number,
            company_name: self.company_name,
            industry: self.industry,
            status: self.status,
            note: self.note,
        }
    }
}
