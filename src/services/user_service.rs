use chrono::{Duration, Utc};
use std::sync::Arc;

use super::{storage_error, storage_error_or_duplicate};
use crate::api::user::{CreateUserRequest, LoginUserRequest, LoginUserResponse};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::JwtKeys;
use crate::database::models::NewUser;
use crate::database::UserRepository;
use crate::error::ApiError;

const USER_NAME_IN_USE: &str = "username is already in use.";
const LOGIN_FAILED: &str = "check your username or password.";

/// Signup and login.
pub struct UserService {
    users: Arc<dyn UserRepository>,
    keys: JwtKeys,
    token_ttl: Duration,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, keys: JwtKeys, token_ttl_hours: u64) -> Self {
        // Clamped to ten years.
        let hours = token_ttl_hours.min(24 * 365 * 10) as i64;
        Self {
            users,
            keys,
            token_ttl: Duration::hours(hours),
        }
    }

    pub async fn create_user(&self, req: CreateUserRequest) -> Result<(), ApiError> {
        const OP: &str = "user/service/create";

        let existing = self
            .users
            .find_user_by_user_name(&req.user_name)
            .await
            .map_err(storage_error(OP))?;
        if existing.is_some() {
            return Err(ApiError::invalid(OP, USER_NAME_IN_USE));
        }

        let password = req.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| ApiError::internal(OP, e))?
            .map_err(|e| ApiError::internal(OP, e))?;

        self.users
            .create_user(NewUser {
                user_name: req.user_name,
                password_hash,
                role: req.user_type,
            })
            .await
            .map_err(storage_error_or_duplicate(OP, USER_NAME_IN_USE))?;

        Ok(())
    }

    /// Unknown usernames and wrong passwords fail with the same message.
    pub async fn login(&self, req: LoginUserRequest) -> Result<LoginUserResponse, ApiError> {
        const OP: &str = "user/service/login";

        let user = self
            .users
            .find_user_by_user_name(&req.user_name)
            .await
            .map_err(storage_error(OP))?
            .ok_or_else(|| ApiError::invalid(OP, LOGIN_FAILED))?;

        let password = req.password;
        let stored = user.password.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &stored))
            .await
            .map_err(|e| ApiError::internal(OP, e))?
            .map_err(|e| ApiError::internal(OP, e))?;
        if !matches {
            return Err(ApiError::invalid(OP, LOGIN_FAILED));
        }

        let expires_at = Utc::now() + self.token_ttl;
        let access_token = self
            .keys
            .issue(user.id, user.role, expires_at)
            .map_err(|e| ApiError::internal(OP, e))?;

        tracing::info!(user_id = user.id, role = %user.role, "User logged in");
        Ok(LoginUserResponse {
            access_token,
            expires_in: expires_at.timestamp(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::User;
    use crate::database::repository::MockUserRepository;
    use crate::database::DatabaseError;
    use crate::error::ErrorKind;
    use crate::types::Role;

    fn service(repo: MockUserRepository) -> UserService {
        UserService::new(Arc::new(repo), JwtKeys::new("test-secret").unwrap(), 1)
    }

    fn stored_user(password: &str) -> User {
        let now = Utc::now();
        User {
            id: 5,
            user_name: "admin".into(),
            password: hash_password(password).unwrap(),
            role: Role::Admin,
            create_date: now,
            update_date: now,
        }
    }

    fn signup(user_name: &str) -> CreateUserRequest {
        CreateUserRequest {
            user_name: user_name.into(),
            password: "secret".into(),
            user_type: Role::Student,
        }
    }

    #[tokio::test]
    async fn create_user_stores_hash_not_plaintext() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_user_by_user_name().returning(|_| Ok(None));
        repo.expect_create_user()
            .withf(|user| {
                user.user_name == "kim"
                    && user.role == Role::Student
                    && user.password_hash != "secret"
                    && verify_password("secret", &user.password_hash).unwrap()
            })
            .times(1)
            .returning(|_| Ok(1));

        service(repo).create_user(signup("kim")).await.unwrap();
    }

    #[tokio::test]
    async fn create_user_rejects_taken_name_before_insert() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_user_by_user_name()
            .returning(|_| Ok(Some(stored_user("x"))));
        repo.expect_create_user().never();

        let err = service(repo).create_user(signup("admin")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Invalid);
        assert_eq!(err.message(), USER_NAME_IN_USE);
    }

    #[tokio::test]
    async fn create_user_maps_unique_violation_to_invalid() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_user_by_user_name().returning(|_| Ok(None));
        repo.expect_create_user()
            .returning(|_| Err(DatabaseError::UniqueViolation("users_user_name_key".into())));

        let err = service(repo).create_user(signup("kim")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Invalid);
        assert_eq!(err.message(), USER_NAME_IN_USE);
    }

    #[tokio::test]
    async fn login_issues_verifiable_token() {
        let mut repo = MockUserRepository::new();
        let user = stored_user("pw");
        repo.expect_find_user_by_user_name()
            .withf(|name| name == "admin")
            .returning(move |_| Ok(Some(user.clone())));

        let keys = JwtKeys::new("test-secret").unwrap();
        let res = service(repo)
            .login(LoginUserRequest { user_name: "admin".into(), password: "pw".into() })
            .await
            .unwrap();

        let claims = keys.verify(&res.access_token).unwrap();
        assert_eq!(claims.user_id, 5);
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp, res.expires_in);
    }

    #[tokio::test]
    async fn login_failures_share_one_message() {
        let mut unknown = MockUserRepository::new();
        unknown.expect_find_user_by_user_name().returning(|_| Ok(None));
        let err_unknown = service(unknown)
            .login(LoginUserRequest { user_name: "nobody".into(), password: "pw".into() })
            .await
            .unwrap_err();

        let mut wrong = MockUserRepository::new();
        let user = stored_user("pw");
        wrong.expect_find_user_by_user_name()
            .returning(move |_| Ok(Some(user.clone())));
        let err_wrong = service(wrong)
            .login(LoginUserRequest { user_name: "admin".into(), password: "nope".into() })
            .await
            .unwrap_err();

        assert_eq!(err_unknown.kind(), ErrorKind::Invalid);
        assert_eq!(err_wrong.kind(), ErrorKind::Invalid);
        assert_eq!(err_unknown.message(), err_wrong.message());
    }

    #[tokio::test]
    async fn storage_failure_is_internal() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_user_by_user_name()
            .returning(|_| Err(DatabaseError::Decode("bad role".into())));

        let err = service(repo)
            .login(LoginUserRequest { user_name: "admin".into(), password: "pw".into() })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }
}
