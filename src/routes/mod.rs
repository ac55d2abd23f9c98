pub mod auth;
pub mod pages;
pub mod tasks;

use actix_web::{http::header, http::StatusCode, web, HttpResponse};

use crate::auth::AuthMiddleware;
use crate::error::AppError;

pub fn config(cfg: &mut web::ServiceConfig) {
    // Unparsable ids and page numbers get the same page as unknown routes.
    cfg.app_data(web::PathConfig::default().error_handler(|err, req| {
        log::debug!("Bad path segment in {}: {}", req.path(), err);
        AppError::NotFound("Page not found".into()).into()
    }));
    cfg.app_data(web::FormConfig::default().error_handler(|err, req| {
        log::warn!("Unreadable form posted to {}: {}", req.path(), err);
        AppError::BadRequest("The form could not be read.".into()).into()
    }));

    cfg.service(pages::index)
        .service(auth::login_form)
        .service(auth::login)
        .service(auth::register_form)
        .service(auth::register)
        .service(auth::logout)
        .service(
            web::scope("/tasks")
                .wrap(AuthMiddleware)
                .service(tasks::list)
                .service(tasks::new)
                .service(tasks::create)
                .service(tasks::show)
                .service(tasks::edit)
                .service(tasks::update)
                .service(tasks::delete)
                // Registered last so `/tasks/new` is never taken for a page number.
                .service(tasks::list_page),
        );
}

pub(crate) fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}
