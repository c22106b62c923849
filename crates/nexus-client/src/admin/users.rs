//! Users and RBAC.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{AdminClient, AdminError};

const USERS_PATH: &str = "/api/v1/users";
const INVITE_PATH: &str = "/api/v1/users/invite";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Viewer,
    Analyst,
    Developer,
    Admin,
}

impl UserRole {
    pub const ALL: [UserRole; 4] = [
        UserRole::Viewer,
        UserRole::Analyst,
        UserRole::Developer,
        UserRole::Admin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Analyst => "analyst",
            Self::Developer => "developer",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| {
                AdminError::InvalidRequest(format!(
                    "unknown role '{s}' (expected viewer, analyst, developer or admin)"
                ))
            })
    }
}

/// Body of `POST /api/v1/users/invite`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InviteUser {
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
}

impl InviteUser {
    pub fn new(email: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            full_name: full_name.into(),
            role: UserRole::default(),
        }
    }

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    pub(super) fn validate(&self) -> Result<(), AdminError> {
        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(AdminError::InvalidRequest(format!(
                "'{}' is not an email address",
                self.email
            ))),
        }
    }
}

/// One entry of `GET /api/v1/users`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub last_active_at: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UserList {
    users: Vec<UserRecord>,
}

/// Response of a successful invite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvitedUser {
    pub id: String,
    pub email: String,
    pub message: Option<String>,
}

impl AdminClient {
    pub async fn list_users(&self) -> Result<Vec<UserRecord>, AdminError> {
        debug!("listing users");
        let list: UserList = self.http.execute(self.http.get(USERS_PATH)).await?;
        Ok(list.users)
    }

    pub async fn invite_user(&self, invite: &InviteUser) -> Result<InvitedUser, AdminError> {
        invite.validate()?;
        let invited: InvitedUser = self
            .http
            .execute(self.http.post(INVITE_PATH).json(invite))
            .await?;
        info!(user_id = %invited.id, role = %invite.role, "invited user");
        Ok(invited)
    }
}
