//! HTML pages.
//!
//! Every page goes through [`layout`], which adds the navigation bar for the
//! signed-in user. User-supplied text is always passed through [`escape`].

use actix_web::http::StatusCode;
use validator::ValidationErrors;

use crate::auth::SessionUser;
use crate::forms::{first_error, LoginForm, RegisterForm, TaskForm};
use crate::models::Task;
use crate::pagination::Page;

/// Escapes text for use inside HTML element content and attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn layout(title: &str, user: Option<&SessionUser>, content: &str) -> String {
    let nav = match user {
        Some(user) => format!(
            r#"<a href="/tasks">Tasks</a> <a href="/tasks/new">New task</a> <span class="user">{}</span> <a href="/logout">Log out</a>"#,
            escape(&user.username)
        ),
        None => r#"<a href="/login">Log in</a> <a href="/register">Register</a>"#.to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} | Tasklog</title>
</head>
<body>
<nav><a href="/">Tasklog</a> {nav}</nav>
<main>
{content}
</main>
</body>
</html>
"#,
        title = escape(title),
        nav = nav,
        content = content,
    )
}

pub fn index_page(user: Option<&SessionUser>) -> String {
    let content = match user {
        Some(user) => format!(
            r#"<h1>Welcome back, {}</h1><p><a href="/tasks">Go to your tasks</a></p>"#,
            escape(&user.username)
        ),
        None => r#"<h1>Tasklog</h1><p>Keep track of what needs doing. <a href="/register">Create an account</a> or <a href="/login">log in</a>.</p>"#.to_string(),
    };
    layout("Index", user, &content)
}

fn text_input(
    label: &str,
    name: &'static str,
    kind: &str,
    value: &str,
    errors: Option<&ValidationErrors>,
) -> String {
    let error = errors
        .and_then(|e| first_error(e, name))
        .map(|msg| format!(r#"<span class="error">{}</span>"#, escape(&msg)))
        .unwrap_or_default();
    format!(
        r#"<p><label for="{name}">{label}</label> <input type="{kind}" id="{name}" name="{name}" value="{value}">{error}</p>"#,
        name = name,
        label = label,
        kind = kind,
        value = escape(value),
        error = error,
    )
}

pub fn login_page(
    form: &LoginForm,
    errors: Option<&ValidationErrors>,
    notice: Option<&str>,
) -> String {
    let notice = notice
        .map(|n| format!(r#"<p class="notice">{}</p>"#, escape(n)))
        .unwrap_or_default();
    let content = format!(
        r#"<h1>Log in</h1>{notice}<form method="post" action="/login">{username}{password}<p><button type="submit">Log in</button></p></form>"#,
        notice = notice,
        username = text_input("Username", "username", "text", &form.username, errors),
        password = text_input("Password", "password", "password", "", errors),
    );
    layout("Log in", None, &content)
}

pub fn register_page(form: &RegisterForm, errors: Option<&ValidationErrors>) -> String {
    let content = format!(
        r#"<h1>Register</h1><form method="post" action="/register">{username}{email}{password}{confirm}<input type="hidden" name="honeypot" value=""><p><button type="submit">Create account</button></p></form>"#,
        username = text_input("Username", "username", "text", &form.username, errors),
        email = text_input("Email", "email", "email", &form.email, errors),
        password = text_input("Password", "password", "password", "", errors),
        confirm = text_input(
            "Confirm password",
            "confirm_password",
            "password",
            "",
            errors
        ),
    );
    layout("Register", None, &content)
}

pub fn task_list_page(user: &SessionUser, page: &Page<Task>) -> String {
    let mut content = String::from("<h1>Your tasks</h1>");

    if page.items.is_empty() {
        content.push_str(r#"<p>No tasks yet. <a href="/tasks/new">Add one</a>.</p>"#);
    } else {
        content.push_str("<ul class=\"tasks\">");
        for task in &page.items {
            content.push_str(&format!(
                r#"<li><a href="/tasks/show/{id}">{title}</a> <a href="/tasks/edit/{id}">Edit</a> <a href="/tasks/delete/{id}">Delete</a></li>"#,
                id = task.id,
                title = escape(&task.title),
            ));
        }
        content.push_str("</ul>");
    }

    content.push_str("<nav class=\"pagination\">");
    if page.has_prev() {
        content.push_str(&format!(
            r#"<a href="/tasks/{}">Previous</a> "#,
            page.page - 1
        ));
    }
    content.push_str(&format!(
        "<span>Page {} of {}</span>",
        page.page,
        page.total_pages().max(1)
    ));
    if page.has_next() {
        content.push_str(&format!(r#" <a href="/tasks/{}">Next</a>"#, page.page + 1));
    }
    content.push_str("</nav>");

    layout("Tasks", Some(user), &content)
}

pub fn task_detail_page(user: &SessionUser, task: &Task) -> String {
    let content = format!(
        r#"<h1>{title}</h1><p class="description">{description}</p><p class="meta">Created {created} &middot; Updated {updated}</p><p><a href="/tasks/edit/{id}">Edit</a> <a href="/tasks/delete/{id}">Delete</a> <a href="/tasks">Back</a></p>"#,
        title = escape(&task.title),
        description = escape(&task.description),
        created = task.created_at.format("%Y-%m-%d %H:%M"),
        updated = task.updated_at.format("%Y-%m-%d %H:%M"),
        id = task.id,
    );
    layout(&task.title, Some(user), &content)
}

pub fn task_form_page(
    user: &SessionUser,
    heading: &str,
    action: &str,
    form: &TaskForm,
    errors: Option<&ValidationErrors>,
) -> String {
    let description_error = errors
        .and_then(|e| first_error(e, "description"))
        .map(|msg| format!(r#"<span class="error">{}</span>"#, escape(&msg)))
        .unwrap_or_default();
    let content = format!(
        r#"<h1>{heading}</h1><form method="post" action="{action}">{title}<p><label for="description">Description</label> <textarea id="description" name="description">{description}</textarea>{description_error}</p><p><button type="submit">Save</button></p></form>"#,
        heading = escape(heading),
        action = escape(action),
        title = text_input("Title", "title", "text", &form.title, errors),
        description = escape(&form.description),
        description_error = description_error,
    );
    layout(heading, Some(user), &content)
}

pub fn not_found_page() -> String {
    layout(
        "Not found",
        None,
        r#"<h1>Page not found</h1><p>The page you are looking for does not exist. <a href="/">Go home</a>.</p>"#,
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let content = format!(
        "<h1>{}</h1><p>{}</p>",
        status.as_u16(),
        escape(message)
    );
    layout("Error", None, &content)
}
