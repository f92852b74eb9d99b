//! Payloads exchanged with the authentication endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::job_board::Professional;
use crate::domain::user::{Permission, Role, User};
use crate::dto::envelope::ApiMessage;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct LoginData {
    pub user: User,
    pub roles: Vec<Role>,
    pub permissions: Vec<Permission>,
    pub professional: Option<Professional>,
}

/// Response of `POST /auth/login`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub data: LoginData,
    pub token: String,
    #[serde(default)]
    pub msg: Option<ApiMessage>,
}
