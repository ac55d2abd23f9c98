use crate::{
    auth::CurrentUser,
    context::AppContext,
    error::AppError,
    forms::TaskForm,
    models::task,
    routes::{html, redirect},
    views,
};
use actix_web::{get, http::StatusCode, post, web, HttpResponse};
use validator::Validate;

async fn render_page(
    ctx: &AppContext,
    user: &CurrentUser,
    page: i64,
) -> Result<HttpResponse, AppError> {
    let page = task::paginate_tasks(&ctx.pool, user.id(), page, ctx.tasks_per_page).await?;
    Ok(html(StatusCode::OK, views::task_list_page(&user.0, &page)))
}

/// First page of the signed-in user's tasks, oldest first.
#[get("")]
pub async fn list(ctx: web::Data<AppContext>, user: CurrentUser) -> Result<HttpResponse, AppError> {
    render_page(&ctx, &user, 1).await
}

/// Any page of the signed-in user's tasks. Pages past the end are not found.
#[get("/{page}")]
pub async fn list_page(
    ctx: web::Data<AppContext>,
    user: CurrentUser,
    page: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    render_page(&ctx, &user, page.into_inner()).await
}

#[get("/new")]
pub async fn new(user: CurrentUser) -> HttpResponse {
    html(
        StatusCode::OK,
        views::task_form_page(&user.0, "New task", "/tasks/new", &TaskForm::default(), None),
    )
}

#[post("/new")]
pub async fn create(
    ctx: web::Data<AppContext>,
    user: CurrentUser,
    form: web::Form<TaskForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner().normalized();

    if let Err(errors) = form.validate() {
        return Ok(html(
            StatusCode::UNPROCESSABLE_ENTITY,
            views::task_form_page(&user.0, "New task", "/tasks/new", &form, Some(&errors)),
        ));
    }

    let created = task::create_task(&ctx.pool, &form, user.id()).await?;
    log::info!("User {} created task {}", user.id(), created.id);
    Ok(redirect("/tasks"))
}

#[get("/show/{id}")]
pub async fn show(
    ctx: web::Data<AppContext>,
    user: CurrentUser,
    task_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let found = task::get_owned_task(&ctx.pool, task_id.into_inner(), user.id()).await?;
    Ok(html(StatusCode::OK, views::task_detail_page(&user.0, &found)))
}

#[get("/edit/{id}")]
pub async fn edit(
    ctx: web::Data<AppContext>,
    user: CurrentUser,
    task_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let found = task::get_owned_task(&ctx.pool, task_id.into_inner(), user.id()).await?;
    let form = TaskForm {
        title: found.title.clone(),
        description: found.description.clone(),
    };
    let action = format!("/tasks/edit/{}", found.id);
    Ok(html(
        StatusCode::OK,
        views::task_form_page(&user.0, "Edit task", &action, &form, None),
    ))
}

/// Updates a task the signed-in user owns.
///
/// Ownership is checked before the form, so someone else's task is a 404 even
/// when the submitted form is invalid.
#[post("/edit/{id}")]
pub async fn update(
    ctx: web::Data<AppContext>,
    user: CurrentUser,
    task_id: web::Path<i64>,
    form: web::Form<TaskForm>,
) -> Result<HttpResponse, AppError> {
    let found = task::get_owned_task(&ctx.pool, task_id.into_inner(), user.id()).await?;
    let form = form.into_inner().normalized();

    if let Err(errors) = form.validate() {
        let action = format!("/tasks/edit/{}", found.id);
        return Ok(html(
            StatusCode::UNPROCESSABLE_ENTITY,
            views::task_form_page(&user.0, "Edit task", &action, &form, Some(&errors)),
        ));
    }

    let updated = task::update_task(&ctx.pool, &found, &form).await?;
    log::info!("User {} updated task {}", user.id(), updated.id);
    Ok(redirect(&format!("/tasks/show/{}", updated.id)))
}

#[get("/delete/{id}")]
pub async fn delete(
    ctx: web::Data<AppContext>,
    user: CurrentUser,
    task_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let found = task::get_owned_task(&ctx.pool, task_id.into_inner(), user.id()).await?;
    task::delete_task(&ctx.pool, &found).await?;
    log::info!("User {} deleted task {}", user.id(), found.id);
    Ok(redirect("/tasks"))
}
