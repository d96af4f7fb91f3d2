//! Builders wiring the driven adapters into the HTTP state.

use std::sync::Arc;

use tracing::info;

use advice_api::domain::ports::{CredentialHasher, UserRepository};
use advice_api::domain::{
    Advice, AdviceService, CredentialLoginService, MutationPipeline, Resource, RoleSet, User,
    UserService, ValidationMode, validate,
};
use advice_api::inbound::http::state::HttpState;
use advice_api::outbound::cache::TagVersionCache;
use advice_api::outbound::credentials::Argon2CredentialHasher;
use advice_api::outbound::persistence::{InMemoryAdviceRepository, InMemoryUserRepository};

use super::config::BootstrapAdmin;
use super::ServerConfig;

/// Build the HTTP state around in-process stores and seed the bootstrap
/// administrator, if one is configured.
///
/// # Errors
/// Returns [`std::io::Error`] when the administrator account cannot be seeded.
pub(super) async fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let cache = Arc::new(TagVersionCache::default());
    let hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2CredentialHasher::default());
    let advices = Arc::new(InMemoryAdviceRepository::default());
    let users = Arc::new(InMemoryUserRepository::default());

    if let Some(admin) = &config.bootstrap_admin {
        seed_admin(users.as_ref(), hasher.as_ref(), admin).await?;
    }

    let advice_pipeline = MutationPipeline::<Advice>::new(advices, cache.clone(), hasher.clone());
    let user_pipeline = MutationPipeline::<User>::new(users.clone(), cache, hasher.clone());
    Ok(HttpState::new(
        Arc::new(CredentialLoginService::new(users, hasher)),
        Arc::new(AdviceService::new(advice_pipeline)),
        Arc::new(UserService::new(user_pipeline)),
    ))
}

/// Insert an administrator unless the email is already registered.
///
/// This is the only path that grants the elevated role; the mutation
/// pipeline never does.
pub(super) async fn seed_admin(
    users: &dyn UserRepository,
    hasher: &dyn CredentialHasher,
    admin: &BootstrapAdmin,
) -> std::io::Result<()> {
    let existing = users
        .find_by_email(&admin.email)
        .await
        .map_err(|err| std::io::Error::other(format!("bootstrap lookup failed: {err}")))?;
    if existing.is_some() {
        info!(email = %admin.email, "bootstrap administrator already present");
        return Ok(());
    }

    let hash = hasher
        .hash(&admin.password)
        .await
        .map_err(|err| std::io::Error::other(format!("bootstrap hashing failed: {err}")))?;
    let account = User::new(
        admin.email.as_str(),
        hash,
        admin.postal_code,
        RoleSet::with_elevated(),
    );
    let violations = validate(&account, ValidationMode::Create);
    if let Some(first) = violations.first() {
        return Err(std::io::Error::other(format!(
            "bootstrap administrator is invalid: {}",
            first.message()
        )));
    }
    let saved = users
        .save(account)
        .await
        .map_err(|err| std::io::Error::other(format!("bootstrap insert failed: {err}")))?;
    info!(email = %admin.email, user_id = ?saved.id(), "bootstrap administrator seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use advice_api::domain::{Role, Secret};
    use argon2::Params;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2CredentialHasher {
        let params = Params::new(Params::MIN_M_COST, 1, 1, None).expect("valid argon2 params");
        Argon2CredentialHasher::new(params)
    }

    fn admin() -> BootstrapAdmin {
        BootstrapAdmin {
            email: "admin@mail.com".to_owned(),
            password: Secret::new("root123"),
            postal_code: 75001,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn seeds_elevated_account_once(hasher: Argon2CredentialHasher) {
        let users = InMemoryUserRepository::default();
        seed_admin(&users, &hasher, &admin()).await.expect("seed");
        seed_admin(&users, &hasher, &admin()).await.expect("idempotent");

        let rows = users.snapshot().await;
        assert_eq!(rows.len(), 1);
        let stored = &rows[0];
        assert!(stored.roles().contains(Role::Admin));
        let hash = stored.password_hash().expect("hash stored");
        assert_ne!(hash.as_str(), "root123");
        assert!(
            hasher
                .verify(&Secret::new("root123"), hash)
                .await
                .expect("verify")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_admin_email_is_rejected(hasher: Argon2CredentialHasher) {
        let users = InMemoryUserRepository::default();
        let mut bad = admin();
        bad.email = "not-an-email".to_owned();
        let err = seed_admin(&users, &hasher, &bad).await.expect_err("invalid");
        assert!(err.to_string().contains("email"));
        assert!(users.snapshot().await.is_empty());
    }
}
