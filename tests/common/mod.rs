#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::Logger;
use actix_web::{test, web, App};

use tasklog::auth::{SessionKeys, SESSION_COOKIE};
use tasklog::db;
use tasklog::mail::Mailer;
use tasklog::routes::{self, pages};
use tasklog::AppContext;

pub const PER_PAGE: i64 = 5;

/// Fresh in-memory database with the schema applied.
pub async fn test_context() -> web::Data<AppContext> {
    let pool = db::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    db::migrate(&pool).await.expect("Failed to run migrations");

    web::Data::new(AppContext::new(
        pool,
        SessionKeys::new("integration-test-secret", 24),
        Mailer::log_only("noreply@tasklog.local"),
        PER_PAGE,
    ))
}

pub async fn init_app(
    ctx: web::Data<AppContext>,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(ctx)
            .wrap(Logger::default())
            .configure(routes::config)
            .default_service(web::route().to(pages::not_found)),
    )
    .await
}

pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
}

pub fn location<B>(resp: &ServiceResponse<B>) -> Option<String> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub async fn body_text<B: MessageBody>(resp: ServiceResponse<B>) -> String {
    let bytes = test::read_body(resp).await;
    String::from_utf8_lossy(&bytes).into_owned()
}

pub async fn get<S, B>(app: &S, uri: &str, cookie: Option<&Cookie<'static>>) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let mut req = test::TestRequest::get().uri(uri);
    if let Some(cookie) = cookie {
        req = req.cookie(cookie.clone());
    }
    test::call_service(app, req.to_request()).await
}

pub async fn post_form<S, B>(
    app: &S,
    uri: &str,
    fields: &[(&str, &str)],
    cookie: Option<&Cookie<'static>>,
) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let mut req = test::TestRequest::post().uri(uri).set_form(fields);
    if let Some(cookie) = cookie {
        req = req.cookie(cookie.clone());
    }
    test::call_service(app, req.to_request()).await
}

/// Registers an account through the form and returns its session cookie.
pub async fn register<S, B>(app: &S, username: &str, email: &str, password: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = post_form(
        app,
        "/register",
        &[
            ("username", username),
            ("email", email),
            ("password", password),
            ("confirm_password", password),
            ("honeypot", ""),
        ],
        None,
    )
    .await;
    assert!(
        resp.status().is_redirection(),
        "Registration of {} failed with {}",
        username,
        resp.status()
    );
    session_cookie(&resp).expect("Registration should start a session")
}

pub async fn user_count(ctx: &AppContext) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&ctx.pool)
        .await
        .expect("Failed to count users")
}

pub async fn task_count(ctx: &AppContext) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
        .fetch_one(&ctx.pool)
        .await
        .expect("Failed to count tasks")
}
