use serde::{Deserialize, Serialize};

use crate::{ids::UserId, time::Timestamp};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub date_joined: Option<Timestamp>,
}

impl UserProfile {
    pub fn display_name(&self) -> String {
        let full_name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full_name = full_name.trim();
        if full_name.is_empty() {
            self.username.clone()
        } else {
            full_name.to_owned()
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Refresh responses always carry a new access token; the refresh token is
/// only present when the server rotates it.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct RefreshedAccess {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Registration {
    #[serde(default)]
    pub message: Option<String>,
    pub user: UserProfile,
    pub tokens: TokenPair,
}

#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.password.is_none()
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ProfileUpdated {
    #[serde(default)]
    pub message: Option<String>,
    pub user: UserProfile,
}
