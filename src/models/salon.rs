//! Salon model.

use serde::{Deserialize, Serialize};

use super::{active_flag, blank_to_none, check_email, id_string, require};
use crate::mock;
use crate::store::{FormDraft, Resource};

/// Salon as sent by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSalon {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "active_flag")]
    pub is_active: bool,
}

/// A salon listed on the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Salon {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
}

impl From<RawSalon> for Salon {
    fn from(raw: RawSalon) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            email: raw.email,
            phone: raw.phone,
            address: raw.address,
            description: raw.description,
            is_active: raw.is_active,
        }
    }
}

/// Create/edit form for a salon.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SalonDraft {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
}

impl FormDraft for SalonDraft {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        require(&mut errors, &self.name, "Name");
        check_email(&mut errors, self.email.as_deref());
        errors
    }
}

impl Resource for Salon {
    const TYPE_NAME: &'static str = "Salon";
    const ENDPOINT: &'static str = "salons";

    type Raw = RawSalon;
    type Draft = SalonDraft;

    fn from_raw(raw: RawSalon) -> Self {
        raw.into()
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.address.as_deref());
        fields.extend(self.description.as_deref());
        fields
    }

    fn to_draft(&self) -> SalonDraft {
        SalonDraft {
            name: self.name.clone(),
            email: blank_to_none(&self.email),
            phone: blank_to_none(&self.phone),
            address: blank_to_none(&self.address),
            description: blank_to_none(&self.description),
        }
    }

    fn mock_catalog() -> Vec<Self> {
        mock::salons()
    }
}
