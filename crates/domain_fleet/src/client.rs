//! Client records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::ClientId;

/// Client account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientStatus {
    Active,
    Inactive,
}

impl ClientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Active => "Active",
            ClientStatus::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(ClientStatus::Active),
            "Inactive" => Ok(ClientStatus::Inactive),
            other => Err(format!("unknown client status: {other}")),
        }
    }
}

/// A client of the freight company
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    /// Allocated identifier, assigned once at creation
    pub client_id: ClientId,
    pub client_name: String,
    pub email: String,
    pub phone_number: String,
    pub company_name: String,
    pub industry: String,
    pub status: ClientStatus,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for creating a client, before an id has been allocated
#[derive(Debug, Clone)]
pub struct NewClient {
    pub client_name: String,
    pub email: String,
    pub phone_number: String,
    pub company_name: String,
    pub industry: String,
    pub status: ClientStatus,
    pub note: Option<String>,
}

/// Partial update for a client record
#[derive(Debug, Clone, Default)]
pub struct ClientUpdate {
    pub client_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub company_name: Option<String>,
    pub industry: Option<String>,
    pub status: Option<ClientStatus>,
    pub note: Option<String>,
}

impl Client {
    /// Attaches an allocated identifier to a validated payload
    pub fn new(client_id: ClientId, new: NewClient) -> Self {
        let now = Utc::now();
        Self {
            client_id,
            client_name: new.client_name,
            email: new.email,
            phone_number: new.phone_number,
            company_name: new.company_name,
            industry: new.industry,
            status: new.status,
            note: new.note,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial update, touching `updated_at`
    pub fn apply(&mut self, update: ClientUpdate) {
        if let Some(name) = update.client_name {
            self.client_name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone_number {
            self.phone_number = phone;
        }
        if let Some(company) = update.company_name {
            self.company_name = company;
        }
        if let Some(industry) = update.industry {
            self.industry = industry;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(note) = update.note {
            self.note = Some(note);
        }
        self.updated_at = Utc::now();
    }
}
