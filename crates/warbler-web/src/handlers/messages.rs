use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    response::{IntoResponse, Response},
};
use tracing::{info, warn};
use validator::Validate;

use warbler_types::forms::{MessageForm, error_messages};

use crate::error::AppError;
use crate::extract::Id;
use crate::session::{ACCESS_UNAUTHORIZED, WebSession};
use crate::state::AppState;
use crate::views;

pub async fn new_message_form(session: WebSession) -> Response {
    if session.user.is_none() {
        return session.deny(ACCESS_UNAUTHORIZED);
    }
    session.render("New message", views::messages::new_message(&MessageForm::default(), &[]))
}

/// POST /messages/new: Post a message, then show the author's profile.
pub async fn create_message(
    State(state): State<AppState>,
    session: WebSession,
    form: Result<Form<MessageForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Some(user) = session.user.clone() else {
        return Ok(session.deny(ACCESS_UNAUTHORIZED));
    };
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => return Ok(rejection.into_response()),
    };

    if let Err(errors) = form.validate() {
        let body = views::messages::new_message(&form, &error_messages(&errors));
        return Ok(session.render("New message", body));
    }

    let msg = state.db.create_message(user.id, &form.text)?;
    info!(message_id = msg.id, user_id = user.id, "Message created");

    Ok(session.redirect(&format!("/users/{}", user.id)))
}

pub async fn show_message(
    State(state): State<AppState>,
    session: WebSession,
    Id(id): Id,
) -> Result<Response, AppError> {
    let msg = state.db.get_message(id)?.ok_or(AppError::NotFound)?;

    let liked = match &session.user {
        Some(user) => state.db.liked_message_ids(user.id)?.contains(&msg.id),
        None => false,
    };

    let body = views::messages::show(&msg, session.user.as_ref(), liked);
    Ok(session.render("Message", body))
}

/// POST /messages/<id>/delete: Only the author may delete.
pub async fn delete_message(
    State(state): State<AppState>,
    session: WebSession,
    Id(id): Id,
) -> Result<Response, AppError> {
    let Some(user) = session.user.clone() else {
        return Ok(session.deny(ACCESS_UNAUTHORIZED));
    };

    let msg = state.db.get_message(id)?.ok_or(AppError::NotFound)?;
    if msg.user_id != user.id {
        warn!(message_id = id, user_id = user.id, "Refusing to delete another user's message");
        return Ok(session.deny(ACCESS_UNAUTHORIZED));
    }

    state.db.delete_message(id)?;
    info!(message_id = id, user_id = user.id, "Message deleted");

    Ok(session.redirect(&format!("/users/{}", user.id)))
}
