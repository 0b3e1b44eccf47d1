use serde::{Deserialize, Serialize};

use crate::error::{GinumError, Result};

/// Authenticated session stored after `ginum login`.
///
/// This is the only place the company id and bearer token come from; it is
/// loaded once per invocation and handed to the API client.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Session {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company_id: Option<u64>,
    #[serde(default)]
    pub user_id: Option<u64>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn company_id(&self) -> Result<u64> {
        if !self.is_authenticated() {
            return Err(GinumError::NotLoggedIn);
        }
        self.company_id.ok_or(GinumError::NoCompany)
    }
}
