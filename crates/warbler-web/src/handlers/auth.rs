use axum::{Form, extract::State, response::Response};
use tracing::{info, warn};
use validator::Validate;

use warbler_types::flash::Flash;
use warbler_types::forms::{LoginForm, SignupForm, error_messages, optional};

use crate::error::AppError;
use crate::session::WebSession;
use crate::state::AppState;
use crate::views;

pub async fn signup_form(session: WebSession) -> Response {
    session.render("Sign up", views::auth::signup_form(&SignupForm::default(), &[]))
}

/// POST /signup: Create the user and log them in.
pub async fn signup(
    State(state): State<AppState>,
    mut session: WebSession,
    Form(form): Form<SignupForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.validate() {
        let body = views::auth::signup_form(&form, &error_messages(&errors));
        return Ok(session.render("Sign up", body));
    }

    let db = state.db.clone();
    let username = form.username.clone();
    let email = form.email.clone();
    let password = form.password.clone();
    let image_url = optional(&form.image_url).map(str::to_string);
    let result = tokio::task::spawn_blocking(move || {
        db.signup(&username, &email, &password, image_url.as_deref())
    })
    .await?;

    match result {
        Ok(user) => {
            info!(user_id = user.id, username = %user.username, "User signed up");
            session.login(&user);
            Ok(session.redirect("/"))
        }
        Err(e) if e.is_integrity() => {
            session.flash(Flash::danger("Username already taken"));
            let body = views::auth::signup_form(&form, &[]);
            Ok(session.render("Sign up", body))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn login_form(session: WebSession) -> Response {
    session.render("Log in", views::auth::login_form(&LoginForm::default(), &[]))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    mut session: WebSession,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.validate() {
        let body = views::auth::login_form(&form, &error_messages(&errors));
        return Ok(session.render("Log in", body));
    }

    let db = state.db.clone();
    let username = form.username.clone();
    let password = form.password.clone();
    let user = tokio::task::spawn_blocking(move || db.authenticate(&username, &password)).await??;

    match user {
        Some(user) => {
            info!(user_id = user.id, "User logged in");
            session.flash(Flash::success(format!("Hello, {}!", user.username)));
            session.login(&user);
            Ok(session.redirect("/"))
        }
        None => {
            warn!(username = %form.username, "Failed login");
            session.flash(Flash::danger("Invalid credentials."));
            let body = views::auth::login_form(&form, &[]);
            Ok(session.render("Log in", body))
        }
    }
}

/// GET /logout
pub async fn logout(mut session: WebSession) -> Response {
    if let Some(user) = &session.user {
        info!(user_id = user.id, "User logged out");
    }
    session.logout();
    session.flash(Flash::success("You have successfully logged out."));
    session.redirect("/login")
}
