//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod advice_command;
mod cache_invalidator;
mod credential_hasher;
mod login_service;
mod repository;
mod user_command;

#[cfg(test)]
pub use advice_command::MockAdviceCommand;
pub use advice_command::AdviceCommand;
#[cfg(test)]
pub use cache_invalidator::MockCacheInvalidator;
pub use cache_invalidator::{CacheError, CacheInvalidator, CacheTag};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialError, CredentialHasher};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
pub use repository::{Repository, RepositoryError, UserRepository};
#[cfg(test)]
pub use user_command::MockUserCommand;
pub use user_command::UserCommand;
