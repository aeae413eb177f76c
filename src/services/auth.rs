//! Registration and login: validation, hashing, persistence and token issuance.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, instrument, warn};

use crate::auth::{password, JwtSecret};
use crate::db::{StoreError, UserStore};
use crate::error::{AppError, AppResult};
use crate::models::{normalize_email, LoginInput, LoginView, NewUser, RegisterInput, UserView};
use crate::validation;

/// Checks a plaintext against a PHC string.
type Verifier = fn(&str, &str) -> AppResult<bool>;

/// Digest checked when the email is unknown, so both login failures cost one
/// Argon2 verification.
static DUMMY_HASH: OnceCell<String> = OnceCell::const_new();

/// Stateless between calls; each call is one self-contained transaction
/// against the store.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    jwt: JwtSecret,
    verify: Verifier,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, jwt: JwtSecret) -> Self {
        Self {
            store,
            jwt,
            verify: password::verify_password,
        }
    }

    #[cfg(test)]
    fn with_verifier(mut self, verify: Verifier) -> Self {
        self.verify = verify;
        self
    }

    #[instrument(skip_all, fields(email = %input.email.trim()))]
    pub async fn register_user(&self, mut input: RegisterInput) -> AppResult<UserView> {
        input.email = normalize_email(&input.email);
        validation::check(&input)?;

        let password_hash = hash_blocking(input.password).await?;
        let new_user = NewUser {
            username: input.username,
            email: input.email,
            password_hash,
            address: input.address,
            phone: input.phone,
            age: input.age,
        };

        let user = match self.store.create(new_user).await {
            Ok(user) => user,
            Err(StoreError::DuplicateKey(email)) => {
                warn!(email = %email, "email already registered");
                return Err(AppError::Conflict("email already registered".to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        info!(user_id = %user.id, email = %user.email, "user registered");
        Ok(UserView::from(&user))
    }

    #[instrument(skip_all, fields(email = %input.email.trim()))]
    pub async fn login_user(&self, mut input: LoginInput) -> AppResult<LoginView> {
        input.email = normalize_email(&input.email);
        validation::check(&input)?;

        let found = match self.store.find_by_email(&input.email).await {
            Ok(user) => Some(user),
            Err(StoreError::NotFound) => None,
            Err(e) => return Err(e.into()),
        };

        let digest = match &found {
            Some(user) => user.password_hash.clone(),
            None => dummy_hash().await?.to_string(),
        };
        let matched = verify_blocking(self.verify, input.password, digest).await?;

        let user = match found {
            Some(user) if matched => user,
            Some(user) => {
                warn!(user_id = %user.id, "login with wrong password");
                return Err(AppError::InvalidCredentials);
            }
            None => {
                warn!("login for unknown email");
                return Err(AppError::InvalidCredentials);
            }
        };

        let token = self.jwt.issue(user.id)?;
        info!(user_id = %user.id, "user logged in");
        Ok(LoginView {
            user: UserView::from(&user),
            token,
        })
    }
}

// Argon2 is deliberately slow; keep it off the async workers.
async fn hash_blocking(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || password::hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("hash task: {}", e)))?
}

async fn verify_blocking(verify: Verifier, password: String, hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || verify(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("verify task: {}", e)))?
}

async fn dummy_hash() -> AppResult<&'static str> {
    DUMMY_HASH
        .get_or_try_init(|| hash_blocking("userauth-unknown-account".to_string()))
        .await
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryUserStore;
    use jsonwebtoken::{decode, DecodingKey, Validation};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio_test::{assert_err, assert_ok};

    const SECRET: &str = "test-jwt-secret";

    fn service() -> (AuthService, MemoryUserStore) {
        let store = MemoryUserStore::new();
        let jwt = JwtSecret::new(SECRET.to_string(), Duration::from_secs(3600));
        (AuthService::new(Arc::new(store.clone()), jwt), store)
    }

    fn alice() -> RegisterInput {
        RegisterInput {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: "secret1".to_string(),
            address: "1 Main St".to_string(),
            phone: "555-0100".to_string(),
            age: 30,
        }
    }

    fn login(email: &str, password: &str) -> LoginInput {
        LoginInput {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn register_returns_sanitized_view_and_stores_hash() {
        let (svc, store) = service();
        let view = assert_ok!(svc.register_user(alice()).await);
        assert_eq!(view.username, "alice");
        assert_eq!(view.email, "a@x.com");

        let stored = store.find_by_email("a@x.com").await.unwrap();
        assert_ne!(stored.password_hash, "secret1");
        assert!(password::verify_password("secret1", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn second_register_with_same_email_conflicts() {
        let (svc, store) = service();
        assert_ok!(svc.register_user(alice()).await);

        let mut other = alice();
        other.username = "someone".to_string();
        other.email = " A@X.com ".to_string();
        other.age = 41;
        let err = assert_err!(svc.register_user(other).await);
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn invalid_register_persists_nothing() {
        let (svc, store) = service();
        let mut input = alice();
        input.password = "12345".to_string();
        input.age = -1;
        let err = assert_err!(svc.register_user(input).await);
        match err {
            AppError::Validation(fields) => {
                assert!(fields.get("password").is_some());
                assert!(fields.get("age").is_some());
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn login_issues_token_for_valid_credentials() {
        let (svc, _) = service();
        assert_ok!(svc.register_user(alice()).await);

        let view = assert_ok!(svc.login_user(login("a@x.com", "secret1")).await);
        assert_eq!(view.user.username, "alice");
        assert!(!view.token.is_empty());
        let claims = decode::<serde_json::Value>(
            &view.token,
            &DecodingKey::from_secret(SECRET.as_bytes()),
            &Validation::default(),
        )
        .unwrap()
        .claims;
        assert!(claims["sub"].as_str().is_some_and(|s| !s.is_empty()));
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_fail_identically() {
        let (svc, _) = service();
        assert_ok!(svc.register_user(alice()).await);

        let wrong_password = assert_err!(svc.login_user(login("a@x.com", "wrong")).await);
        let unknown_email = assert_err!(svc.login_user(login("b@x.com", "secret1")).await);
        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_email, AppError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert_eq!(wrong_password.status(), unknown_email.status());
    }

    static VERIFICATIONS: AtomicUsize = AtomicUsize::new(0);

    fn counting_verify(password: &str, hash: &str) -> AppResult<bool> {
        assert!(hash.starts_with("$argon2"), "verified against {}", hash);
        VERIFICATIONS.fetch_add(1, Ordering::SeqCst);
        password::verify_password(password, hash)
    }

    #[tokio::test]
    async fn unknown_email_still_pays_for_a_verification() {
        let (svc, _) = service();
        let svc = svc.with_verifier(counting_verify);
        assert_ok!(svc.register_user(alice()).await);

        assert_err!(svc.login_user(login("nobody@x.com", "secret1")).await);
        assert_eq!(VERIFICATIONS.load(Ordering::SeqCst), 1);

        assert_err!(svc.login_user(login("a@x.com", "wrong")).await);
        assert_eq!(VERIFICATIONS.load(Ordering::SeqCst), 2);

        assert_ok!(svc.login_user(login("a@x.com", "secret1")).await);
        assert_eq!(VERIFICATIONS.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn dummy_hash_uses_the_same_argon2_parameters() {
        let real = password::hash_password("secret1").unwrap();
        let dummy = dummy_hash().await.unwrap();
        let params = |h: &str| h.rsplitn(3, '$').nth(2).map(str::to_string);
        assert_eq!(params(dummy), params(&real));
        assert!(!password::verify_password("secret1", dummy).unwrap());
    }

    #[tokio::test]
    async fn repeated_login_keeps_identity_and_refreshes_token() {
        let (svc, _) = service();
        assert_ok!(svc.register_user(alice()).await);

        let first = assert_ok!(svc.login_user(login("a@x.com", "secret1")).await);
        let second = assert_ok!(svc.login_user(login("a@x.com", "secret1")).await);
        assert_eq!(first.user, second.user);
        assert_ne!(first.token, second.token);
    }

    #[tokio::test]
    async fn login_input_is_validated_before_lookup() {
        let (svc, _) = service();
        let err = assert_err!(svc.login_user(login("not-an-email", "secret1")).await);
        assert!(matches!(err, AppError::Validation(_)));
    }
}
