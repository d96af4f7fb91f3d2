//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: persisting the authenticated principal after
//! login and resolving it on later requests.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Principal, Role, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const ROLES_KEY: &str = "roles";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist an authenticated principal in the session cookie.
    ///
    /// The session is renewed first so a login never reuses a cookie issued
    /// to an earlier caller.
    pub fn persist_principal(&self, principal: &Principal) -> Result<(), Error> {
        let user_id = principal
            .user_id()
            .ok_or_else(|| Error::internal("cannot persist an anonymous principal"))?;
        let roles: Vec<&'static str> = principal.roles().map(Role::as_str).collect();
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.get())
            .and_then(|()| self.0.insert(ROLES_KEY, roles))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Resolve the caller, falling back to anonymous when no usable session
    /// accompanies the request.
    #[must_use]
    pub fn principal(&self) -> Principal {
        let user_id = match self.0.get::<i64>(USER_ID_KEY) {
            Ok(Some(raw)) => UserId::new(raw),
            Ok(None) => return Principal::anonymous(),
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                return Principal::anonymous();
            }
        };
        let tokens = match self.0.get::<Vec<String>>(ROLES_KEY) {
            Ok(tokens) => tokens.unwrap_or_default(),
            Err(error) => {
                warn!(%error, "invalid role list in session cookie");
                Vec::new()
            }
        };
        let roles = tokens.iter().filter_map(|token| match token.parse::<Role>() {
            Ok(role) => Some(role),
            Err(error) => {
                warn!(%error, "ignoring role from session cookie");
                None
            }
        });
        Principal::authenticated(user_id, roles)
    }

    /// Drop every session value and expire the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::session_cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .route(
                "/whoami",
                web::get().to(|session: SessionContext| async move {
                    let principal = session.principal();
                    let roles: Vec<&str> = principal.roles().map(Role::as_str).collect();
                    HttpResponse::Ok().json(serde_json::json!({
                        "userId": principal.user_id().map(UserId::get),
                        "roles": roles,
                    }))
                }),
            )
    }

    async fn whoami<S>(app: &S, cookie: Option<actix_web::cookie::Cookie<'static>>) -> serde_json::Value
    where
        S: actix_web::dev::Service<
                actix_http::Request,
                Response = actix_web::dev::ServiceResponse,
                Error = actix_web::Error,
            >,
    {
        let mut request = test::TestRequest::get().uri("/whoami");
        if let Some(cookie) = cookie {
            request = request.cookie(cookie);
        }
        let res = test::call_service(app, request.to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        test::read_body_json(res).await
    }

    #[actix_web::test]
    async fn round_trips_principal() {
        let app = test::init_service(session_test_app().route(
            "/set",
            web::get().to(|session: SessionContext| async move {
                let admin = Principal::authenticated(UserId::new(7), [Role::User, Role::Admin]);
                session.persist_principal(&admin)?;
                Ok::<_, Error>(HttpResponse::Ok())
            }),
        ))
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let body = whoami(&app, Some(session_cookie(&set_res))).await;
        assert_eq!(body["userId"], 7);
        assert_eq!(body["roles"], serde_json::json!(["ROLE_USER", "ROLE_ADMIN"]));
    }

    #[actix_web::test]
    async fn missing_session_is_anonymous() {
        let app = test::init_service(session_test_app()).await;
        let body = whoami(&app, None).await;
        assert!(body["userId"].is_null());
        assert_eq!(body["roles"], serde_json::json!([]));
    }

    #[actix_web::test]
    async fn tampered_user_id_is_anonymous() {
        let app = test::init_service(session_test_app().route(
            "/set-invalid",
            web::get().to(|session: Session| async move {
                session
                    .insert(USER_ID_KEY, "not-a-number")
                    .expect("set invalid user id");
                HttpResponse::Ok()
            }),
        ))
        .await;

        let set_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/set-invalid").to_request(),
        )
        .await;
        let body = whoami(&app, Some(session_cookie(&set_res))).await;
        assert!(body["userId"].is_null());
    }

    #[actix_web::test]
    async fn unknown_role_tokens_are_dropped() {
        let app = test::init_service(session_test_app().route(
            "/set-roles",
            web::get().to(|session: Session| async move {
                session.insert(USER_ID_KEY, 3_i64).expect("set user id");
                session
                    .insert(ROLES_KEY, ["ROLE_USER", "ROLE_ROOT"])
                    .expect("set roles");
                HttpResponse::Ok()
            }),
        ))
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set-roles").to_request())
                .await;
        let body = whoami(&app, Some(session_cookie(&set_res))).await;
        assert_eq!(body["userId"], 3);
        assert_eq!(body["roles"], serde_json::json!(["ROLE_USER"]));
    }
}
