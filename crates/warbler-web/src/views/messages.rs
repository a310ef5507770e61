use ammonia::clean_text;

use warbler_db::models::{MessageRow, UserRow};
use warbler_types::forms::{MESSAGE_MAX_LEN, MessageForm};

use super::{form_errors, like_toggle};

pub fn new_message(form: &MessageForm, errors: &[String]) -> String {
    format!(
        r#"<div class="row justify-content-md-center">
  <div class="col-md-7 col-lg-5">
    <form method="POST">
      {errors}
      <textarea name="text" class="form-control" rows="3" maxlength="{max}" placeholder="What's happening?">{text}</textarea>
      <button class="btn btn-outline-success btn-block">Add my message!</button>
    </form>
  </div>
</div>"#,
        errors = form_errors(errors),
        max = MESSAGE_MAX_LEN,
        text = clean_text(&form.text),
    )
}

/// A single message. The author gets a delete button, everyone else who is
/// logged in gets the like toggle.
pub fn show(msg: &MessageRow, viewer: Option<&UserRow>, liked: bool) -> String {
    let action = match viewer {
        Some(viewer) if viewer.id == msg.user_id => format!(
            r#"<form method="POST" action="/messages/{}/delete">
          <button class="btn btn-outline-danger">Delete</button>
        </form>"#,
            msg.id
        ),
        Some(_) => like_toggle(msg.id, liked),
        None => String::new(),
    };

    format!(
        r#"<div class="bg"></div>
<div class="row justify-content-center">
  <div class="col-md-6">
    <ul class="list-group no-hover" id="messages">
      <li class="list-group-item">
        <a href="/users/{user_id}"><img src="{image}" alt="" class="timeline-image"></a>
        <div class="message-area">
          <div class="message-heading">
            <a href="/users/{user_id}">@{username}</a>
            {action}
          </div>
          <p class="single-message">{text}</p>
          <span class="text-muted">{date}</span>
        </div>
      </li>
    </ul>
  </div>
</div>"#,
        user_id = msg.user_id,
        image = clean_text(&msg.author_image_url),
        username = clean_text(&msg.author_username),
        text = clean_text(&msg.text),
        date = msg.timestamp.format("%d %B %Y"),
    )
}
