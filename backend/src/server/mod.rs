//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{BuildMode, ServerConfig, ServerSettings};

use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use advice_api::Trace;
#[cfg(debug_assertions)]
use advice_api::doc::ApiDoc;
use advice_api::inbound::http::advices::{create_advice, delete_advice, update_advice};
use advice_api::inbound::http::state::HttpState;
use advice_api::inbound::http::users::{create_user, delete_user, login, logout, update_user};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(login)
        .service(logout)
        .service(create_user)
        .service(update_user)
        .service(delete_user)
        .service(create_advice)
        .service(update_advice)
        .service(delete_advice);

    let app = App::new()
        .app_data(http_state)
        .wrap(Trace)
        .service(api);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server from the validated configuration.
///
/// # Parameters
/// - `config`: validated [`ServerConfig`] containing session, binding, and bootstrap settings.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when seeding the bootstrap account, binding
/// the socket, or starting the server fails.
pub async fn create_server(
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config).await?);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        bootstrap_admin: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}

#[cfg(test)]
mod tests {
    //! End-to-end tests over the fully wired application.

    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use advice_api::domain::Secret;
    use advice_api::domain::TRACE_ID_HEADER;
    use serde_json::{Value, json};

    use super::config::BootstrapAdmin;

    async fn wired_app() -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = ServiceResponse,
        Error = actix_web::Error,
    > {
        let config = ServerConfig {
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
            bind_addr: "127.0.0.1:0".parse().expect("literal address"),
            bootstrap_admin: Some(BootstrapAdmin {
                email: "admin@mail.com".to_owned(),
                password: Secret::new("root123"),
                postal_code: 75001,
            }),
        };
        let http_state = build_http_state(&config).await.expect("state");
        test::init_service(build_app(AppDependencies {
            http_state: web::Data::new(http_state),
            key: config.key.clone(),
            cookie_secure: config.cookie_secure,
            same_site: config.same_site,
        }))
        .await
    }

    #[actix_web::test]
    async fn admin_can_publish_advice_after_login() {
        let app = wired_app().await;
        let login_res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(json!({"email": "admin@mail.com", "password": "root123"}))
                .to_request(),
        )
        .await;
        assert_eq!(login_res.status(), StatusCode::OK);
        let cookie = login_res
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie")
            .into_owned();

        let created = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/advices")
                .cookie(cookie)
                .set_payload(r#"{"text":"Prune the roses","month":2}"#)
                .to_request(),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        assert!(created.headers().contains_key(TRACE_ID_HEADER));
        let body: Value = test::read_body_json(created).await;
        assert_eq!(body["month"], 2);
        assert!(body["id"].is_i64());
    }

    #[actix_web::test]
    async fn anonymous_advice_mutation_is_unauthorised() {
        let app = wired_app().await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/advices")
                .set_payload(r#"{"text":"Prune the roses","month":2}"#)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let trace_header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .expect("trace header");
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "unauthorized");
        assert_eq!(body["traceId"].as_str(), Some(trace_header.as_str()));
    }

    #[actix_web::test]
    async fn registration_is_open_and_never_elevates() {
        let app = wired_app().await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/users")
                .set_payload(
                    r#"{"email":"gardener@mail.com","password":"tulip","postalCode":33000,"roles":["ROLE_ADMIN"]}"#,
                )
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["roles"], json!(["ROLE_USER"]));
        assert!(body.get("password").is_none());
    }
}
