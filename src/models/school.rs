//! School model (training academies listed alongside salons).

use serde::{Deserialize, Serialize};

use super::{active_flag, blank_to_none, check_email, id_string, require};
use crate::mock;
use crate::store::{FormDraft, Resource};

#[derive(Debug, Clone, Deserialize)]
pub struct RawSchool {
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

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
}

impl From<RawSchool> for School {
    fn from(raw: RawSchool) -> Self {
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

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchoolDraft {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
}

impl FormDraft for SchoolDraft {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        require(&mut errors, &self.name, "Name");
        check_email(&mut errors, self.email.as_deref());
        if let Some(phone) = self.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            let digits = phone.chars().filter(char::is_ascii_digit).count();
            if digits < 7 {
                errors.push("Phone must contain at least 7 digits".to_string());
            }
        }
        errors
    }
}

impl Resource for School {
    const TYPE_NAME: &'static str = "School";
    const ENDPOINT: &'static str = "schools";

    type Raw = RawSchool;
    type Draft = SchoolDraft;

    fn from_raw(raw: RawSchool) -> Self {
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

    fn to_draft(&self) -> SchoolDraft {
        SchoolDraft {
            name: self.name.clone(),
            email: blank_to_none(&self.email),
            phone: blank_to_none(&self.phone),
            address: blank_to_none(&self.address),
            description: blank_to_none(&self.description),
        }
    }

    fn mock_catalog() -> Vec<Self> {
        mock::schools()
    }
}
