use serde::{Deserialize, Serialize};

use super::{ensure_not_empty, ensure_text, USER_NAME_MAX_LEN};
use crate::error::ApiError;
use crate::types::Role;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub password: String,
    pub user_type: Role,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        const OP: &str = "api/CreateUserRequest.validate";
        ensure_text(OP, &self.user_name, USER_NAME_MAX_LEN, "invalid username.")?;
        ensure_not_empty(OP, &self.password, "invalid password.")
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserRequest {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub password: String,
}

impl LoginUserRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        const OP: &str = "api/LoginUserRequest.validate";
        ensure_not_empty(OP, &self.user_name, "invalid username.")?;
        ensure_not_empty(OP, &self.password, "invalid password.")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserResponse {
    pub access_token: String,
    /// Expiry instant in unix seconds.
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_unknown_user_type_at_deserialization() {
        let body = json!({ "userName": "a", "password": "b", "userType": "TEACHER" });
        assert!(serde_json::from_value::<CreateUserRequest>(body).is_err());
    }

    #[test]
    fn missing_fields_fail_validation() {
        let req: CreateUserRequest =
            serde_json::from_value(json!({ "password": "b", "userType": "ADMIN" })).unwrap();
        assert_eq!(req.validate().unwrap_err().message(), "invalid username.");

        let req: LoginUserRequest = serde_json::from_value(json!({ "userName": "a" })).unwrap();
        assert_eq!(req.validate().unwrap_err().message(), "invalid password.");
    }

    #[test]
    fn username_longer_than_the_column_is_invalid() {
        let req = CreateUserRequest {
            user_name: "x".repeat(USER_NAME_MAX_LEN + 1),
            password: "b".into(),
            user_type: Role::Student,
        };
        assert_eq!(req.validate().unwrap_err().message(), "invalid username.");

        let req = CreateUserRequest { user_name: "x".repeat(USER_NAME_MAX_LEN), ..req };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn login_response_uses_camel_case() {
        let body = serde_json::to_value(LoginUserResponse {
            access_token: "tok".into(),
            expires_in: 42,
        })
        .unwrap();
        assert_eq!(body, json!({ "accessToken": "tok", "expiresIn": 42 }));
    }
}
