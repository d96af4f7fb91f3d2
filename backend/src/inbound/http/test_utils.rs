//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test;
use serde_json::json;

use crate::domain::{Principal, Role, UserId};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Principal holding the elevated role.
pub fn admin_principal() -> Principal {
    Principal::authenticated(UserId::new(1), [Role::User, Role::Admin])
}

/// Principal holding only the default role.
pub fn member_principal() -> Principal {
    Principal::authenticated(UserId::new(2), [Role::User])
}

/// Extract the session cookie set by a response.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Log in through `POST /api/v1/login` and return the issued cookie.
///
/// The app's login port decides which principal the cookie carries.
pub async fn login_and_get_cookie(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse,
        Error = actix_web::Error,
    >,
) -> Cookie<'static> {
    let login_req = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "email": "admin@mail.com", "password": "root123" }))
        .to_request();
    let login_res = test::call_service(app, login_req).await;
    assert!(login_res.status().is_success(), "login failed");
    session_cookie(&login_res)
}
