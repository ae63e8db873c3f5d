use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtHeader {
    pub alg: String,
    pub typ: String,
}

/// Claims carried by a session token. Exactly one of `user_id` /
/// `doctor_id` is present, named for the account kind that logged in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<i32>,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    /// The numeric account id, whichever kind issued the token.
    pub fn account_id(&self) -> Option<i32> {
        self.user_id.or(self.doctor_id)
    }
}
