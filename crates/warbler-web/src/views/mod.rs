//! Server-rendered HTML.
//!
//! Pages are plain functions returning `String`. Everything that came from a
//! user passes through [`ammonia::clean_text`] before it is interpolated.

pub mod auth;
pub mod errors;
pub mod home;
pub mod messages;
pub mod users;

use std::collections::HashSet;

use ammonia::clean_text;

use warbler_db::models::{MessageRow, UserRow};
use warbler_types::flash::Flash;

pub fn layout(title: &str, user: Option<&UserRow>, flashes: &[Flash], body: &str) -> String {
    let nav = match user {
        Some(user) => format!(
            r#"<li>
          <form class="navbar-form navbar-right" action="/users">
            <input name="q" class="form-control" placeholder="Search Warbler" id="search">
            <button class="btn btn-default"><span class="fa fa-search"></span></button>
          </form>
        </li>
        <li><a href="/users/{id}"><img src="{image}" alt="Your profile"></a></li>
        <li><a href="/messages/new">New Message</a></li>
        <li><a href="/logout">Log out</a></li>"#,
            id = user.id,
            image = clean_text(&user.image_url),
        ),
        None => r#"<li><a href="/signup">Sign up</a></li>
        <li><a href="/login">Log in</a></li>"#
            .to_string(),
    };

    let alerts: String = flashes
        .iter()
        .map(|f| {
            format!(
                r#"<div class="alert alert-{}">{}</div>"#,
                f.category.as_str(),
                clean_text(&f.message)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>{title}</title>
  <link rel="stylesheet" href="https://unpkg.com/bootstrap/dist/css/bootstrap.css">
  <link rel="stylesheet" href="https://use.fontawesome.com/releases/v5.3.1/css/all.css">
  <link rel="stylesheet" href="/static/stylesheets/style.css">
</head>
<body class="{body_class}">
<nav class="navbar navbar-expand">
  <div class="container-fluid">
    <div class="navbar-header">
      <a href="/" class="navbar-brand"><span>Warbler</span></a>
    </div>
    <ul class="nav navbar-nav navbar-right">
        {nav}
    </ul>
  </div>
</nav>
<div class="container">
  {alerts}
  {body}
</div>
</body>
</html>
"#,
        title = clean_text(title),
        body_class = if user.is_some() { "" } else { "anon" },
    )
}

/// Validation failures shown above a form.
pub(crate) fn form_errors(errors: &[String]) -> String {
    errors
        .iter()
        .map(|e| format!(r#"<span class="text-danger">{}</span>"#, clean_text(e)))
        .collect()
}

/// Messages as timeline items. Other users' messages get a like toggle when
/// someone is logged in: a star when already liked, a thumbs-up otherwise.
pub(crate) fn message_list(
    messages: &[MessageRow],
    viewer: Option<&UserRow>,
    liked: &HashSet<i64>,
) -> String {
    let items: String = messages
        .iter()
        .map(|msg| message_item(msg, viewer, liked.contains(&msg.id)))
        .collect();

    format!(r#"<ul class="list-group" id="messages">{items}</ul>"#)
}

fn message_item(msg: &MessageRow, viewer: Option<&UserRow>, liked: bool) -> String {
    let toggle = match viewer {
        Some(viewer) if viewer.id != msg.user_id => like_toggle(msg.id, liked),
        _ => String::new(),
    };

    format!(
        r#"<li class="list-group-item">
  <a href="/messages/{id}" class="message-link"></a>
  <a href="/users/{user_id}"><img src="{image}" alt="" class="timeline-image"></a>
  <div class="message-area">
    <a href="/users/{user_id}">@{username}</a>
    <span class="text-muted">{date}</span>
    <p>{text}</p>
  </div>
  {toggle}
</li>"#,
        id = msg.id,
        user_id = msg.user_id,
        image = clean_text(&msg.author_image_url),
        username = clean_text(&msg.author_username),
        date = msg.timestamp.format("%d %B %Y"),
        text = clean_text(&msg.text),
    )
}

pub(crate) fn like_toggle(message_id: i64, liked: bool) -> String {
    if liked {
        format!(
            r#"<form method="POST" action="/users/unlike/{message_id}" class="messages-like">
    <button class="btn btn-sm btn-primary"><i class="fa fa-star"></i></button>
  </form>"#
        )
    } else {
        format!(
            r#"<form method="POST" action="/users/add_like/{message_id}" class="messages-like">
    <button class="btn btn-sm btn-secondary"><i class="fa fa-thumbs-up"></i></button>
  </form>"#
        )
    }
}
