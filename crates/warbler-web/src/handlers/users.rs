use std::collections::HashSet;

use axum::{
    Form,
    extract::{Query, State, rejection::FormRejection},
    response::{IntoResponse, Response},
};
use tracing::{info, warn};
use validator::Validate;

use warbler_db::models::{ProfileUpdate, UserRow};
use warbler_types::flash::Flash;
use warbler_types::forms::{SearchQuery, UserEditForm, error_messages, optional};

use crate::error::AppError;
use crate::extract::Id;
use crate::session::{ACCESS_UNAUTHORIZED, WebSession};
use crate::state::AppState;
use crate::views::{self, users::Profile};

const PROFILE_MESSAGE_LIMIT: u32 = 100;

/// Ids the viewer follows, for rendering follow/unfollow buttons.
fn viewer_following(state: &AppState, viewer: Option<&UserRow>) -> Result<HashSet<i64>, AppError> {
    let Some(viewer) = viewer else {
        return Ok(HashSet::new());
    };
    let ids = state.db.following(viewer.id)?.into_iter().map(|u| u.id).collect();
    Ok(ids)
}

fn viewer_liked(state: &AppState, viewer: Option<&UserRow>) -> Result<HashSet<i64>, AppError> {
    match viewer {
        Some(viewer) => Ok(state.db.liked_message_ids(viewer.id)?),
        None => Ok(HashSet::new()),
    }
}

fn viewer_follows(state: &AppState, viewer: Option<&UserRow>, user_id: i64) -> Result<bool, AppError> {
    match viewer {
        Some(viewer) if viewer.id != user_id => Ok(state.db.is_following(viewer.id, user_id)?),
        _ => Ok(false),
    }
}

/// GET /users: All users, or those whose username contains `q`.
pub async fn list_users(
    State(state): State<AppState>,
    session: WebSession,
    Query(query): Query<SearchQuery>,
) -> Result<Response, AppError> {
    let search = query.term();
    let users = state.db.list_users(search)?;
    let following = viewer_following(&state, session.user.as_ref())?;

    let body = views::users::index(&users, search, session.user.as_ref(), &following);
    Ok(session.render("Users", body))
}

/// GET /users/<id>
pub async fn show_user(
    State(state): State<AppState>,
    session: WebSession,
    Id(id): Id,
) -> Result<Response, AppError> {
    let user = state.db.get_user(id)?.ok_or(AppError::NotFound)?;
    let stats = state.db.user_stats(user.id)?;
    let messages = state.db.messages_for_user(user.id, PROFILE_MESSAGE_LIMIT)?;

    let viewer = session.user.as_ref();
    let liked = viewer_liked(&state, viewer)?;
    let profile = Profile {
        user: &user,
        stats: &stats,
        viewer,
        viewer_follows: viewer_follows(&state, viewer, user.id)?,
    };

    let body = views::users::show(&profile, &messages, &liked);
    Ok(session.render(&user.username, body))
}

#[derive(Clone, Copy)]
enum Relation {
    Following,
    Followers,
}

async fn show_people(
    state: AppState,
    session: WebSession,
    id: i64,
    relation: Relation,
) -> Result<Response, AppError> {
    if session.user.is_none() {
        return Ok(session.deny(ACCESS_UNAUTHORIZED));
    }

    let user = state.db.get_user(id)?.ok_or(AppError::NotFound)?;
    let stats = state.db.user_stats(user.id)?;
    let people = match relation {
        Relation::Following => state.db.following(user.id)?,
        Relation::Followers => state.db.followers(user.id)?,
    };

    let viewer = session.user.as_ref();
    let following = viewer_following(&state, viewer)?;
    let profile = Profile {
        user: &user,
        stats: &stats,
        viewer,
        viewer_follows: viewer_follows(&state, viewer, user.id)?,
    };

    let body = views::users::people(&profile, &people, &following);
    Ok(session.render(&user.username, body))
}

/// GET /users/<id>/following
pub async fn show_following(
    State(state): State<AppState>,
    session: WebSession,
    Id(id): Id,
) -> Result<Response, AppError> {
    show_people(state, session, id, Relation::Following).await
}

/// GET /users/<id>/followers
pub async fn show_followers(
    State(state): State<AppState>,
    session: WebSession,
    Id(id): Id,
) -> Result<Response, AppError> {
    show_people(state, session, id, Relation::Followers).await
}

/// GET /users/<id>/likes: Messages this user has liked.
pub async fn show_likes(
    State(state): State<AppState>,
    session: WebSession,
    Id(id): Id,
) -> Result<Response, AppError> {
    if session.user.is_none() {
        return Ok(session.deny(ACCESS_UNAUTHORIZED));
    }

    let user = state.db.get_user(id)?.ok_or(AppError::NotFound)?;
    let stats = state.db.user_stats(user.id)?;
    let messages = state.db.liked_messages(user.id)?;

    let viewer = session.user.as_ref();
    let liked = viewer_liked(&state, viewer)?;
    let profile = Profile {
        user: &user,
        stats: &stats,
        viewer,
        viewer_follows: viewer_follows(&state, viewer, user.id)?,
    };

    let body = views::users::likes(&profile, &messages, &liked);
    Ok(session.render(&user.username, body))
}

/// POST /users/follow/<id>
pub async fn add_follow(
    State(state): State<AppState>,
    mut session: WebSession,
    Id(id): Id,
) -> Result<Response, AppError> {
    let Some(me) = session.user.clone() else {
        return Ok(session.deny(ACCESS_UNAUTHORIZED));
    };

    let followed = state.db.get_user(id)?.ok_or(AppError::NotFound)?;
    if followed.id == me.id {
        session.flash(Flash::danger("You cannot follow yourself."));
    } else {
        state.db.follow(me.id, followed.id)?;
        info!(follower = me.id, followed = followed.id, "Follow added");
    }

    Ok(session.redirect(&format!("/users/{}/following", me.id)))
}

/// POST /users/stop-following/<id>
pub async fn stop_following(
    State(state): State<AppState>,
    session: WebSession,
    Id(id): Id,
) -> Result<Response, AppError> {
    let Some(me) = session.user.clone() else {
        return Ok(session.deny(ACCESS_UNAUTHORIZED));
    };

    let followed = state.db.get_user(id)?.ok_or(AppError::NotFound)?;
    if state.db.unfollow(me.id, followed.id)? {
        info!(follower = me.id, followed = followed.id, "Follow removed");
    }

    Ok(session.redirect(&format!("/users/{}/following", me.id)))
}

/// GET /users/profile: The edit form, prefilled.
pub async fn edit_profile_form(session: WebSession) -> Response {
    let Some(user) = session.user.clone() else {
        return session.deny(ACCESS_UNAUTHORIZED);
    };

    let form = UserEditForm {
        username: user.username,
        email: user.email,
        image_url: user.image_url,
        header_image_url: user.header_image_url,
        bio: user.bio.unwrap_or_default(),
        location: user.location.unwrap_or_default(),
        password: String::new(),
    };
    session.render("Edit profile", views::users::edit_profile(&form, &[]))
}

/// POST /users/profile: Apply the edit once the password checks out.
pub async fn edit_profile(
    State(state): State<AppState>,
    mut session: WebSession,
    form: Result<Form<UserEditForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Some(user) = session.user.clone() else {
        return Ok(session.deny(ACCESS_UNAUTHORIZED));
    };
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => return Ok(rejection.into_response()),
    };

    if let Err(errors) = form.validate() {
        let body = views::users::edit_profile(&form, &error_messages(&errors));
        return Ok(session.render("Edit profile", body));
    }

    let db = state.db.clone();
    let username = user.username.clone();
    let password = form.password.clone();
    let confirmed = tokio::task::spawn_blocking(move || db.authenticate(&username, &password)).await??;

    if confirmed.is_none() {
        warn!(user_id = user.id, "Profile edit with wrong password");
        session.flash(Flash::danger("Wrong password, please try again."));
        return Ok(session.redirect("/"));
    }

    let changes = ProfileUpdate {
        username: form.username.trim(),
        email: form.email.trim(),
        image_url: optional(&form.image_url),
        header_image_url: optional(&form.header_image_url),
        bio: optional(&form.bio),
        location: optional(&form.location),
    };

    match state.db.update_profile(user.id, &changes) {
        Ok(Some(updated)) => {
            info!(user_id = updated.id, "Profile updated");
            Ok(session.redirect(&format!("/users/{}", updated.id)))
        }
        Ok(None) => Err(AppError::NotFound),
        Err(e) if e.is_integrity() => {
            session.flash(Flash::danger("Username or email already taken."));
            let body = views::users::edit_profile(&form, &[]);
            Ok(session.render("Edit profile", body))
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /users/delete: Remove the current user and everything they own.
pub async fn delete_user(
    State(state): State<AppState>,
    mut session: WebSession,
) -> Result<Response, AppError> {
    let Some(user) = session.user.clone() else {
        return Ok(session.deny(ACCESS_UNAUTHORIZED));
    };

    session.logout();
    state.db.delete_user(user.id)?;
    info!(user_id = user.id, username = %user.username, "User deleted");

    Ok(session.redirect("/signup"))
}
