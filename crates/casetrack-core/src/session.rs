use serde::{Deserialize, Serialize};

/// An authenticated API session.
///
/// Created once at login and handed to the components that need it;
/// there is no global "current user" state. Dropping the session is
/// logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
}

impl Session {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}
