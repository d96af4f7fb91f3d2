//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AdviceCommand, LoginService, UserCommand};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub advices: Arc<dyn AdviceCommand>,
    pub users: Arc<dyn UserCommand>,
}

impl HttpState {
    /// Construct state from the port implementations.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use advice_api::domain::{
    ///     Advice, AdviceService, CredentialLoginService, MutationPipeline, User, UserService,
    /// };
    /// use advice_api::inbound::http::state::HttpState;
    /// use advice_api::outbound::cache::TagVersionCache;
    /// use advice_api::outbound::credentials::Argon2CredentialHasher;
    /// use advice_api::outbound::persistence::{InMemoryAdviceRepository, InMemoryUserRepository};
    ///
    /// let cache = Arc::new(TagVersionCache::default());
    /// let hasher = Arc::new(Argon2CredentialHasher::default());
    /// let users = Arc::new(InMemoryUserRepository::default());
    /// let state = HttpState::new(
    ///     Arc::new(CredentialLoginService::new(users.clone(), hasher.clone())),
    ///     Arc::new(AdviceService::new(MutationPipeline::<Advice>::new(
    ///         Arc::new(InMemoryAdviceRepository::default()),
    ///         cache.clone(),
    ///         hasher.clone(),
    ///     ))),
    ///     Arc::new(UserService::new(MutationPipeline::<User>::new(users, cache, hasher))),
    /// );
    /// let _advices = state.advices.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        advices: Arc<dyn AdviceCommand>,
        users: Arc<dyn UserCommand>,
    ) -> Self {
        Self {
            login,
            advices,
            users,
        }
    }
}
