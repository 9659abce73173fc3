use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    #[serde(default)]
    pub role: String,
    pub email: String,
}

/// Generated outreach material for one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutreachPackage {
    pub company_name: String,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub cover_letter: String,
}

/// Body of `POST /api/outreach`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutreachRequest {
    pub session_id: String,
    pub company_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutreachResponse {
    pub success: bool,
    #[serde(default)]
    pub outreach_package: Option<OutreachPackage>,
}
