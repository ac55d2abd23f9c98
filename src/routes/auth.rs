use crate::{
    auth::{self, end_session, AuthMiddleware, CurrentUser},
    context::AppContext,
    error::AppError,
    forms::{LoginForm, RegisterForm},
    mail::welcome_email,
    models::user,
    routes::{html, redirect},
    views,
};
use actix_web::{get, http::header, http::StatusCode, post, web, HttpRequest, HttpResponse};

/// Shown for both unknown usernames and wrong passwords.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[get("/login")]
pub async fn login_form(ctx: web::Data<AppContext>, req: HttpRequest) -> HttpResponse {
    if ctx.sessions.current_session(&req).is_some() {
        return redirect("/tasks");
    }
    html(
        StatusCode::OK,
        views::login_page(&LoginForm::default(), None, None),
    )
}

/// Log in
///
/// Checks the credentials and starts a session. Validation problems re-render
/// the form with 422; bad credentials re-render it with 401 and one generic
/// message.
#[post("/login")]
pub async fn login(
    ctx: web::Data<AppContext>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();

    if let Err(errors) = form.validate() {
        return Ok(html(
            StatusCode::UNPROCESSABLE_ENTITY,
            views::login_page(&form, Some(&errors), None),
        ));
    }

    match auth::authenticate(&ctx.pool, &form.username, &form.password).await? {
        Some(user) => {
            let cookie = ctx.sessions.start_session(&user)?;
            log::info!("User {} logged in", user.id);
            Ok(HttpResponse::Found()
                .insert_header((header::LOCATION, "/tasks"))
                .cookie(cookie)
                .finish())
        }
        None => {
            log::warn!("Failed login attempt for username {:?}", form.username);
            Ok(html(
                StatusCode::UNAUTHORIZED,
                views::login_page(&form, None, Some(INVALID_CREDENTIALS)),
            ))
        }
    }
}

#[get("/register")]
pub async fn register_form(ctx: web::Data<AppContext>, req: HttpRequest) -> HttpResponse {
    if ctx.sessions.current_session(&req).is_some() {
        return redirect("/tasks");
    }
    html(
        StatusCode::OK,
        views::register_page(&RegisterForm::default(), None),
    )
}

/// Register a new user
///
/// Validates the form (including uniqueness against the store), creates the
/// account, signs the user in and queues the welcome email.
#[post("/register")]
pub async fn register(
    ctx: web::Data<AppContext>,
    form: web::Form<RegisterForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();

    if let Err(errors) = form.validate(&ctx.pool).await? {
        if RegisterForm::is_bot(&errors) {
            log::warn!("Registration rejected: honeypot field was filled in");
        }
        return Ok(html(
            StatusCode::UNPROCESSABLE_ENTITY,
            views::register_page(&form, Some(&errors)),
        ));
    }

    let user = user::create_user(&ctx.pool, &form.username, &form.email, &form.password).await?;
    log::info!("Registered user {} ({})", user.id, user.username);

    ctx.mailer.send_in_background(welcome_email(&user));

    let cookie = ctx.sessions.start_session(&user)?;
    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, "/tasks"))
        .cookie(cookie)
        .finish())
}

#[get("/logout", wrap = "AuthMiddleware")]
pub async fn logout(user: CurrentUser) -> HttpResponse {
    log::info!("User {} logged out", user.id());
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/login"))
        .cookie(end_session())
        .finish()
}
