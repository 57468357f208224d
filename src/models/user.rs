//! Admin user model.

use serde::{Deserialize, Serialize};

use super::{active_flag, blank_to_none, check_email, id_string, opt_id_string, require, NamedRef};
use crate::mock;
use crate::store::{FormDraft, Resource};

/// User as sent by the backend, with department and role embedded.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub department_id: Option<String>,
    #[serde(default)]
    pub department: Option<NamedRef>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub role_id: Option<String>,
    #[serde(default)]
    pub role: Option<NamedRef>,
    #[serde(default, deserialize_with = "active_flag")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department_id: Option<String>,
    pub department_name: Option<String>,
    pub role_id: Option<String>,
    pub role_name: Option<String>,
    pub is_active: bool,
}

fn flatten(nested: Option<NamedRef>, fallback_id: Option<String>) -> (Option<String>, Option<String>) {
    match nested {
        Some(r) => (Some(r.id), r.name),
        None => (fallback_id, None),
    }
}

impl From<RawUser> for User {
    fn from(raw: RawUser) -> Self {
        let (department_id, department_name) = flatten(raw.department, raw.department_id);
        let (role_id, role_name) = flatten(raw.role, raw.role_id);

        Self {
            id: raw.id,
            name: raw.name,
            email: raw.email,
            phone: raw.phone,
            department_id,
            department_name,
            role_id,
            role_name,
            is_active: raw.is_active,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department_id: Option<String>,
    pub role_id: String,
}

impl FormDraft for UserDraft {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        require(&mut errors, &self.name, "Name");
        require(&mut errors, &self.email, "Email");
        check_email(&mut errors, Some(&self.email));
        require(&mut errors, &self.role_id, "Role");
        errors
    }
}

impl Resource for User {
    const TYPE_NAME: &'static str = "User";
    const ENDPOINT: &'static str = "users";

    type Raw = RawUser;
    type Draft = UserDraft;

    fn from_raw(raw: RawUser) -> Self {
        raw.into()
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }

    fn to_draft(&self) -> UserDraft {
        UserDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: blank_to_none(&self.phone),
            department_id: self.department_id.clone(),
            role_id: self.role_id.clone().unwrap_or_default(),
        }
    }

    fn mock_catalog() -> Vec<Self> {
        mock::users()
    }
}
