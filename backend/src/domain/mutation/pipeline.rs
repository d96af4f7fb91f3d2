//! Generic create/update/delete state machine.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::{CacheInvalidator, CacheTag, CredentialHasher, Repository};
use crate::domain::{
    Action, AuthorizationGate, Decision, MergeOutcome, PatchPayload, Principal, Resource, Secret,
    ValidationMode, merge, validate,
};

use super::MutationError;

/// Stage names reported in logs.
mod stage {
    pub(super) const PARSE: &str = "parse_payload";
    pub(super) const AUTHORIZE: &str = "authorize";
    pub(super) const LOAD: &str = "load_existing";
    pub(super) const SANITIZE: &str = "sanitize";
    pub(super) const PATCH: &str = "patch";
    pub(super) const VALIDATE: &str = "validate";
    pub(super) const COMMIT: &str = "commit";
    pub(super) const INVALIDATE: &str = "invalidate_cache";
}

/// Mutation orchestrator for one resource kind.
///
/// Stages run in a fixed order and the first failure ends the run:
/// parse, authorize, load (update and delete), sanitize, patch, validate,
/// commit, invalidate cache, project. Delete skips parsing and the three
/// payload stages. A pending secret is hashed inside the validate stage,
/// after the rules on every other field pass. Nothing reaches the store
/// unless every earlier stage passed.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use advice_api::domain::{Advice, MutationPipeline, Principal, Role, UserId};
/// use advice_api::outbound::cache::TagVersionCache;
/// use advice_api::outbound::credentials::Argon2CredentialHasher;
/// use advice_api::outbound::persistence::InMemoryAdviceRepository;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let pipeline = MutationPipeline::<Advice>::new(
///     Arc::new(InMemoryAdviceRepository::default()),
///     Arc::new(TagVersionCache::default()),
///     Arc::new(Argon2CredentialHasher::default()),
/// );
/// let admin = Principal::authenticated(UserId::new(1), [Role::User, Role::Admin]);
/// let created = pipeline
///     .create(&admin, br#"{"text": "Sow beans", "month": 4}"#)
///     .await
///     .expect("valid advice");
/// assert_eq!(created.month, Some(4));
/// # });
/// ```
#[derive(Clone)]
pub struct MutationPipeline<E: Resource> {
    repository: Arc<dyn Repository<E>>,
    cache: Arc<dyn CacheInvalidator>,
    hasher: Arc<dyn CredentialHasher>,
    gate: AuthorizationGate,
}

impl<E: Resource> MutationPipeline<E> {
    /// Wire the pipeline to its collaborators.
    pub fn new(
        repository: Arc<dyn Repository<E>>,
        cache: Arc<dyn CacheInvalidator>,
        hasher: Arc<dyn CredentialHasher>,
    ) -> Self {
        Self {
            repository,
            cache,
            hasher,
            gate: AuthorizationGate,
        }
    }

    /// Create an entity from a JSON object body.
    pub async fn create(
        &self,
        principal: &Principal,
        body: &[u8],
    ) -> Result<E::View, MutationError> {
        let mut payload = Self::parse(body)?;
        self.authorize(principal, Action::Create)?;
        self.sanitize(Action::Create, &mut payload);
        let mut working = E::draft();
        let outcome = Self::patch(Action::Create, &mut working, &payload)?;
        self.seal(Action::Create, &mut working, outcome.secret, ValidationMode::Create)
            .await?;
        let committed = self.commit(Action::Create, working).await?;
        self.invalidate(Action::Create).await;
        Ok(committed.project())
    }

    /// Patch the entity `id` with the recognized keys present in `body`.
    pub async fn update(
        &self,
        principal: &Principal,
        id: E::Id,
        body: &[u8],
    ) -> Result<E::View, MutationError> {
        let mut payload = Self::parse(body)?;
        self.authorize(principal, Action::Update)?;
        let mut working = self.load(id).await?;
        self.sanitize(Action::Update, &mut payload);
        let outcome = Self::patch(Action::Update, &mut working, &payload)?;
        if outcome.touched == 0 {
            debug!(kind = %E::KIND, %id, stage = stage::PATCH, "no recognized fields");
            return Err(MutationError::NoRecognizedFields { kind: E::KIND });
        }
        self.seal(Action::Update, &mut working, outcome.secret, ValidationMode::Update)
            .await?;
        let committed = self.commit(Action::Update, working).await?;
        self.invalidate(Action::Update).await;
        Ok(committed.project())
    }

    /// Remove the entity `id`.
    pub async fn delete(&self, principal: &Principal, id: E::Id) -> Result<(), MutationError> {
        self.authorize(principal, Action::Delete)?;
        self.load(id).await?;
        self.repository
            .delete(id)
            .await
            .map_err(|err| MutationError::from_store(E::KIND, err))?;
        debug!(kind = %E::KIND, %id, stage = stage::COMMIT, "entity deleted");
        self.invalidate(Action::Delete).await;
        Ok(())
    }

    fn parse(body: &[u8]) -> Result<PatchPayload, MutationError> {
        PatchPayload::parse(body).map_err(|err| {
            debug!(kind = %E::KIND, stage = stage::PARSE, error = %err, "payload rejected");
            MutationError::MalformedPayload {
                reason: err.to_string(),
            }
        })
    }

    fn authorize(&self, principal: &Principal, action: Action) -> Result<(), MutationError> {
        match self.gate.authorize(principal, action, E::KIND) {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => {
                warn!(
                    kind = %E::KIND,
                    %action,
                    stage = stage::AUTHORIZE,
                    user_id = ?principal.user_id(),
                    %reason,
                    "mutation denied"
                );
                Err(MutationError::Unauthorized {
                    kind: E::KIND,
                    action,
                    reason,
                })
            }
        }
    }

    async fn load(&self, id: E::Id) -> Result<E, MutationError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|err| MutationError::from_store(E::KIND, err))?
            .ok_or_else(|| {
                debug!(kind = %E::KIND, %id, stage = stage::LOAD, "entity not found");
                MutationError::NotFound {
                    kind: E::KIND,
                    id: id.to_string(),
                }
            })
    }

    fn sanitize(&self, action: Action, payload: &mut PatchPayload) {
        let stripped = self.gate.sanitize(E::KIND, payload);
        if !stripped.is_empty() {
            warn!(
                kind = %E::KIND,
                %action,
                stage = stage::SANITIZE,
                fields = ?stripped,
                "protected fields dropped from payload"
            );
        }
    }

    /// Merge `payload` into `working`, leaving any secret unhashed.
    fn patch(
        action: Action,
        working: &mut E,
        payload: &PatchPayload,
    ) -> Result<MergeOutcome, MutationError> {
        merge(working, payload).map_err(|err| {
            debug!(kind = %E::KIND, %action, stage = stage::PATCH, error = %err, "field rejected");
            MutationError::MalformedPayload {
                reason: err.to_string(),
            }
        })
    }

    /// Validate `working`, hashing a pending secret only once every other
    /// rule holds.
    async fn seal(
        &self,
        action: Action,
        working: &mut E,
        secret: Option<Secret>,
        mode: ValidationMode,
    ) -> Result<(), MutationError> {
        let Some(secret) = secret else {
            return Self::check(action, working, mode, None);
        };
        Self::check(action, working, mode, E::CREDENTIAL_FIELD)?;
        let hash = self
            .hasher
            .hash(&secret)
            .await
            .map_err(|err| MutationError::Internal {
                message: err.to_string(),
            })?;
        working.apply_credential(hash);
        Self::check(action, working, mode, None)
    }

    /// Run the kind's rules, skipping those on `deferred`.
    fn check(
        action: Action,
        working: &E,
        mode: ValidationMode,
        deferred: Option<&str>,
    ) -> Result<(), MutationError> {
        let mut violations = validate(working, mode);
        if let Some(field) = deferred {
            violations.retain(|violation| violation.field() != field);
        }
        if violations.is_empty() {
            return Ok(());
        }
        debug!(
            kind = %E::KIND,
            %action,
            stage = stage::VALIDATE,
            violations = violations.len(),
            "entity rejected"
        );
        Err(MutationError::InvalidEntity {
            kind: E::KIND,
            violations,
        })
    }

    async fn commit(&self, action: Action, working: E) -> Result<E, MutationError> {
        let committed = self
            .repository
            .save(working)
            .await
            .map_err(|err| MutationError::from_store(E::KIND, err))?;
        debug!(
            kind = %E::KIND,
            %action,
            stage = stage::COMMIT,
            id = ?committed.id(),
            "entity committed"
        );
        Ok(committed)
    }

    /// Bump the kind's cache tag; failures are logged and swallowed.
    async fn invalidate(&self, action: Action) {
        let tag = CacheTag::for_kind(E::KIND);
        if let Err(err) = self.cache.invalidate(tag).await {
            warn!(
                kind = %E::KIND,
                %action,
                stage = stage::INVALIDATE,
                %tag,
                error = %err,
                "cache invalidation failed; entries may be stale"
            );
        }
    }
}
