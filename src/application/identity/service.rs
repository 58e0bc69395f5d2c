//! Identity service — application-layer orchestration
//!
//! Registration, authentication, profile lookup and file attachment live
//! here. HTTP handlers are thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    resolve_role_labels, Account, AccountRepositoryInterface, CreateAccountDto, DeliveryAccount,
    DeliveryDetails, DomainError, DomainResult, NewRegistration, RoleName, StoredFile,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

/// Authentication result returned after a successful sign-in
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub account: Account,
    pub roles: Vec<RoleName>,
}

/// Identity service — orchestrates registration and authentication.
///
/// Generic over `R: AccountRepositoryInterface` so it stays decoupled from
/// the concrete persistence layer. The token-signing strategy is an
/// explicit constructor dependency, not a process-wide singleton.
pub struct IdentityService<R: AccountRepositoryInterface> {
    repo: Arc<R>,
    jwt_config: JwtConfig,
}

impl<R: AccountRepositoryInterface> IdentityService<R> {
    pub fn new(repo: Arc<R>, jwt_config: JwtConfig) -> Self {
        Self { repo, jwt_config }
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by email + password and return a signed JWT.
    ///
    /// An unknown email and a wrong password produce the same error, so
    /// the response never reveals whether an account exists.
    pub async fn authenticate(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let Some(found) = self.repo.get_account_by_email(email).await? else {
            return Err(DomainError::InvalidCredentials);
        };

        let valid = verify_password(password, &found.account.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::InvalidCredentials);
        }

        let token = create_token(&found.account, &found.roles, &self.jwt_config)
            .map_err(|e| DomainError::Storage(format!("Failed to create token: {}", e)))?;

        info!(account_id = %found.account.id, "Account signed in");

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            account: found.account,
            roles: found.roles,
        })
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a standard account.
    pub async fn register_standard(&self, registration: NewRegistration) -> DomainResult<()> {
        self.register(registration, None).await
    }

    /// Register a delivery account with its banking/identity fields.
    pub async fn register_delivery(
        &self,
        registration: NewRegistration,
        details: DeliveryDetails,
    ) -> DomainResult<()> {
        self.register(registration, Some(details)).await
    }

    async fn register(
        &self,
        registration: NewRegistration,
        delivery: Option<DeliveryDetails>,
    ) -> DomainResult<()> {
        // Pre-check is an optimization only; the store's unique constraint
        // decides races at insert time.
        if self.repo.email_exists(&registration.email).await? {
            return Err(DomainError::DuplicateEmail(registration.email));
        }

        let password_hash = hash_password(&registration.password)
            .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))?;

        let roles = resolve_role_labels(registration.roles.as_deref());
        let email = registration.email.clone();

        self.repo
            .create_account(CreateAccountDto {
                first_name: registration.first_name,
                last_name: registration.last_name,
                email: registration.email,
                governorate: registration.governorate,
                address: registration.address,
                phone: registration.phone,
                password_hash,
                roles,
                delivery,
            })
            .await?;

        info!(email = %email, "New account registered");
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Look up an account id by email.
    pub async fn account_id_by_email(&self, email: &str) -> DomainResult<String> {
        match self.repo.get_account_by_email(email).await? {
            Some(found) => Ok(found.account.id),
            None => Err(DomainError::NotFound {
                entity: "Account",
                field: "email",
                value: email.to_string(),
            }),
        }
    }

    // ── File attachment ─────────────────────────────────────────

    /// Attach a file to a delivery account, replacing any previous one.
    pub async fn attach_file(
        &self,
        account_id: &str,
        file: StoredFile,
    ) -> DomainResult<DeliveryAccount> {
        let updated = self.repo.attach_file(account_id, file).await?;
        info!(account_id = %updated.account_id, "Delivery file attached");
        Ok(updated)
    }
}

// ── Tests ──────────────────────────────────────────────────────
