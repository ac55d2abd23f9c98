mod common;

use actix_web::http::StatusCode;
use pretty_assertions::assert_eq;
use tasklog::models::task;

use common::{body_text, get, init_app, location, post_form, register};

#[actix_rt::test]
async fn test_task_crud_flow() {
    let ctx = common::test_context().await;
    let app = init_app(ctx.clone()).await;
    let cookie = register(&app, "crud_user", "crud@example.com", "PasswordCrud123").await;

    // Empty list
    let resp = get(&app, "/tasks", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("No tasks yet"));

    // New task form
    let resp = get(&app, "/tasks/new", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 1. Create
    let resp = post_form(
        &app,
        "/tasks/new",
        &[("title", "CRUD Task Original"), ("description", "Initial description")],
        Some(&cookie),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp).as_deref(), Some("/tasks"));
    assert_eq!(common::task_count(&ctx).await, 1);

    let resp = get(&app, "/tasks", Some(&cookie)).await;
    let html = body_text(resp).await;
    assert!(html.contains("CRUD Task Original"));
    assert!(html.contains("/tasks/show/1"));

    // 2. Show
    let resp = get(&app, "/tasks/show/1", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Initial description"));

    // 3. Edit form is prefilled
    let resp = get(&app, "/tasks/edit/1", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains(r#"value="CRUD Task Original""#));

    // 4. Update
    let resp = post_form(
        &app,
        "/tasks/edit/1",
        &[("title", "CRUD Task Updated"), ("description", "Updated description")],
        Some(&cookie),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp).as_deref(), Some("/tasks/show/1"));

    let stored = task::get_task(&ctx.pool, 1).await.unwrap().unwrap();
    assert_eq!(stored.title, "CRUD Task Updated");
    assert_eq!(stored.description, "Updated description");
    assert!(stored.updated_at >= stored.created_at);

    // 5. Delete
    let resp = get(&app, "/tasks/delete/1", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp).as_deref(), Some("/tasks"));
    assert_eq!(common::task_count(&ctx).await, 0);

    let resp = get(&app, "/tasks/show/1", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_other_users_tasks_are_not_found() {
    let ctx = common::test_context().await;
    let app = init_app(ctx.clone()).await;
    let alice = register(&app, "alice", "alice@example.com", "password").await;
    let bob = register(&app, "bob_b", "bob@example.com", "password").await;

    post_form(
        &app,
        "/tasks/new",
        &[("title", "Alice's secret"), ("description", "do not touch")],
        Some(&alice),
    )
    .await;

    // Bob gets exactly what he would get for a task that does not exist.
    let missing = body_text(get(&app, "/tasks/show/999", Some(&bob)).await).await;
    for uri in ["/tasks/show/1", "/tasks/edit/1", "/tasks/delete/1"] {
        let resp = get(&app, uri, Some(&bob)).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "GET {}", uri);
        assert_eq!(body_text(resp).await, missing);
    }

    let resp = post_form(
        &app,
        "/tasks/edit/1",
        &[("title", "Hijacked"), ("description", "")],
        Some(&bob),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // An invalid form on someone else's task is still not found.
    let resp = post_form(&app, "/tasks/edit/1", &[("title", "")], Some(&bob)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let stored = task::get_task(&ctx.pool, 1).await.unwrap().unwrap();
    assert_eq!(stored.title, "Alice's secret");
    assert_eq!(stored.description, "do not touch");

    // Bob's list does not include it either.
    let html = body_text(get(&app, "/tasks", Some(&bob)).await).await;
    assert!(!html.contains("Alice&#x27;s secret"));

    let resp = get(&app, "/tasks/show/1", Some(&alice)).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_invalid_task_form_is_not_saved() {
    let ctx = common::test_context().await;
    let app = init_app(ctx.clone()).await;
    let cookie = register(&app, "validator", "validator@example.com", "password").await;

    let resp = post_form(
        &app,
        "/tasks/new",
        &[("title", "   "), ("description", "no title")],
        Some(&cookie),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(resp).await;
    assert!(html.contains("Enter a title of at most 50 characters"));
    assert!(html.contains("no title"));
    assert_eq!(common::task_count(&ctx).await, 0);

    let long_title = "a".repeat(51);
    let resp = post_form(
        &app,
        "/tasks/new",
        &[("title", long_title.as_str())],
        Some(&cookie),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(common::task_count(&ctx).await, 0);
}

#[actix_rt::test]
async fn test_task_list_pagination() {
    let ctx = common::test_context().await;
    let app = init_app(ctx.clone()).await;
    let cookie = register(&app, "pager", "pager@example.com", "password").await;

    for i in 1..=7 {
        let title = format!("Paged task {:02}", i);
        let resp = post_form(&app, "/tasks/new", &[("title", title.as_str())], Some(&cookie)).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
    }

    let first = body_text(get(&app, "/tasks", Some(&cookie)).await).await;
    assert!(first.contains("Page 1 of 2"));
    for i in 1..=5 {
        assert!(first.contains(&format!("Paged task {:02}", i)));
    }
    assert!(!first.contains("Paged task 06"));
    assert!(first.contains(r#"href="/tasks/2""#));

    let resp = get(&app, "/tasks/2", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let second = body_text(resp).await;
    assert!(second.contains("Page 2 of 2"));
    assert!(second.contains("Paged task 06"));
    assert!(second.contains("Paged task 07"));
    assert!(!second.contains("Paged task 05"));
    assert!(second.contains(r#"href="/tasks/1""#));

    for uri in ["/tasks/3", "/tasks/0", "/tasks/not-a-number"] {
        let resp = get(&app, uri, Some(&cookie)).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "GET {}", uri);
        assert!(body_text(resp).await.contains("Page not found"), "GET {}", uri);
    }
}

#[actix_rt::test]
async fn test_unparsable_ids_render_not_found_page() {
    let ctx = common::test_context().await;
    let app = init_app(ctx).await;
    let cookie = register(&app, "parser", "parser@example.com", "password").await;

    for uri in [
        "/tasks/show/abc",
        "/tasks/edit/abc",
        "/tasks/delete/abc",
        "/tasks/show/99999999999999999999",
    ] {
        let resp = get(&app, uri, Some(&cookie)).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "GET {}", uri);
        let html = body_text(resp).await;
        assert!(html.contains("Page not found"), "GET {}", uri);
        assert!(!html.contains("can not parse"), "GET {}", uri);
    }

    let resp = post_form(&app, "/tasks/edit/abc", &[("title", "x")], Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_invalid_edit_keeps_stored_task() {
    let ctx = common::test_context().await;
    let app = init_app(ctx.clone()).await;
    let cookie = register(&app, "editor", "editor@example.com", "password").await;

    post_form(
        &app,
        "/tasks/new",
        &[("title", "Keep me"), ("description", "original notes")],
        Some(&cookie),
    )
    .await;

    let resp = post_form(
        &app,
        "/tasks/edit/1",
        &[("title", ""), ("description", "rewritten notes")],
        Some(&cookie),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(resp).await;
    assert!(html.contains("Enter a title of at most 50 characters"));
    assert!(html.contains("rewritten notes"));
    assert!(html.contains(r#"action="/tasks/edit/1""#));

    let stored = task::get_task(&ctx.pool, 1).await.unwrap().unwrap();
    assert_eq!(stored.title, "Keep me");
    assert_eq!(stored.description, "original notes");
}
