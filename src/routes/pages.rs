use actix_web::{get, http::StatusCode, web, HttpRequest, HttpResponse};

use crate::context::AppContext;
use crate::routes::html;
use crate::views;

#[get("/")]
pub async fn index(ctx: web::Data<AppContext>, req: HttpRequest) -> HttpResponse {
    let user = ctx.sessions.current_session(&req);
    html(StatusCode::OK, views::index_page(user.as_ref()))
}

/// Fallback for every unmatched route.
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    log::debug!("No route for {} {}", req.method(), req.path());
    html(StatusCode::NOT_FOUND, views::not_found_page())
}
