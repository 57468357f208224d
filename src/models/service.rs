//! Service model: a bookable treatment offered by one salon.

use serde::{Deserialize, Serialize};

use super::{active_flag, blank_to_none, id_string, opt_id_string, opt_number, require, NamedRef};
use crate::mock;
use crate::store::{FormDraft, Resource};

/// Service as sent by the backend, with its salon embedded.
#[derive(Debug, Clone, Deserialize)]
pub struct RawService {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "opt_number")]
    pub price: Option<f64>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub salon_id: Option<String>,
    #[serde(default)]
    pub salon: Option<NamedRef>,
    #[serde(default, deserialize_with = "active_flag")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub duration_minutes: Option<u32>,
    pub salon_id: Option<String>,
    pub salon_name: Option<String>,
    pub is_active: bool,
}

impl From<RawService> for Service {
    fn from(raw: RawService) -> Self {
        let (salon_id, salon_name) = match raw.salon {
            Some(salon) => (Some(salon.id), salon.name),
            None => (raw.salon_id, None),
        };

        Self {
            id: raw.id,
            name: raw.name,
            description: raw.description,
            price: raw.price,
            duration_minutes: raw.duration,
            salon_id,
            salon_name,
            is_active: raw.is_active,
        }
    }
}

/// Create/edit form for a service. Price stays as typed so the backend sees
/// exactly what the user entered.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServiceDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    pub duration: Option<u32>,
    pub salon_id: String,
}

impl FormDraft for ServiceDraft {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        require(&mut errors, &self.name, "Name");
        require(&mut errors, &self.salon_id, "Salon");
        match self.price.trim().parse::<f64>() {
            Ok(price) if price.is_finite() && price >= 0.0 => {}
            Ok(_) => errors.push("Price must be positive".to_string()),
            Err(_) => errors.push("Price must be a number".to_string()),
        }
        if self.duration == Some(0) {
            errors.push("Duration must be at least one minute".to_string());
        }
        errors
    }
}

impl Resource for Service {
    const TYPE_NAME: &'static str = "Service";
    const ENDPOINT: &'static str = "services";

    type Raw = RawService;
    type Draft = ServiceDraft;

    fn from_raw(raw: RawService) -> Self {
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
        fields.extend(self.description.as_deref());
        fields.extend(self.salon_name.as_deref());
        fields
    }

    fn to_draft(&self) -> ServiceDraft {
        ServiceDraft {
            name: self.name.clone(),
            description: blank_to_none(&self.description),
            price: self.price.map(|p| p.to_string()).unwrap_or_default(),
            duration: self.duration_minutes,
            salon_id: self.salon_id.clone().unwrap_or_default(),
        }
    }

    fn mock_catalog() -> Vec<Self> {
        mock::services()
    }
}
