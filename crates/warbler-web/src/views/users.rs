use std::collections::HashSet;

use ammonia::clean_text;

use warbler_db::models::{MessageRow, UserRow, UserStats};
use warbler_types::forms::UserEditForm;

use super::{form_errors, message_list};

/// Everything the profile header needs about the page owner and the viewer.
pub struct Profile<'a> {
    pub user: &'a UserRow,
    pub stats: &'a UserStats,
    pub viewer: Option<&'a UserRow>,
    /// Whether the viewer follows `user`.
    pub viewer_follows: bool,
}

pub fn index(
    users: &[UserRow],
    search: Option<&str>,
    viewer: Option<&UserRow>,
    viewer_following: &HashSet<i64>,
) -> String {
    if users.is_empty() {
        let what = match search {
            Some(term) => format!(" matching \"{}\"", clean_text(term)),
            None => String::new(),
        };
        return format!(r#"<h3>Sorry, no users found{what}.</h3>"#);
    }

    format!(
        r#"<div class="row justify-content-end">
  <div class="col-sm-9">
    <div class="row">{}</div>
  </div>
</div>"#,
        user_cards(users, viewer, viewer_following)
    )
}

pub fn show(profile: &Profile<'_>, messages: &[MessageRow], liked: &HashSet<i64>) -> String {
    frame(profile, &message_list(messages, profile.viewer, liked))
}

/// Following and followers pages: the profile frame around user cards.
pub fn people(profile: &Profile<'_>, people: &[UserRow], viewer_following: &HashSet<i64>) -> String {
    let cards = format!(
        r#"<div class="row">{}</div>"#,
        user_cards(people, profile.viewer, viewer_following)
    );
    frame(profile, &cards)
}

pub fn likes(profile: &Profile<'_>, messages: &[MessageRow], liked: &HashSet<i64>) -> String {
    let content = format!(
        r#"<h5 class="liked-heading">Liked warbles</h5>{}"#,
        message_list(messages, profile.viewer, liked)
    );
    frame(profile, &content)
}

pub fn edit_profile(form: &UserEditForm, errors: &[String]) -> String {
    format!(
        r#"<div class="row justify-content-md-center">
  <div class="col-md-7 col-lg-5">
    <h2 class="join-message">Edit Your Profile.</h2>
    <form method="POST" id="user_form">
      {errors}
      <input name="username" class="form-control" placeholder="Username" value="{username}">
      <input name="email" type="email" class="form-control" placeholder="E-mail" value="{email}">
      <input name="image_url" class="form-control" placeholder="(Optional) Image URL" value="{image_url}">
      <input name="header_image_url" class="form-control" placeholder="(Optional) Header Image URL" value="{header_image_url}">
      <textarea name="bio" class="form-control" placeholder="(Optional) Bio">{bio}</textarea>
      <input name="location" class="form-control" placeholder="(Optional) Location" value="{location}">
      <p>To confirm changes, enter your password:</p>
      <input name="password" type="password" class="form-control" placeholder="Password">
      <div class="edit-btn-area">
        <button class="btn btn-success">Edit this user!</button>
        <a href="/" class="btn btn-outline-secondary">Cancel</a>
      </div>
    </form>
  </div>
</div>"#,
        errors = form_errors(errors),
        username = clean_text(&form.username),
        email = clean_text(&form.email),
        image_url = clean_text(&form.image_url),
        header_image_url = clean_text(&form.header_image_url),
        bio = clean_text(&form.bio),
        location = clean_text(&form.location),
    )
}

fn frame(profile: &Profile<'_>, content: &str) -> String {
    let user = profile.user;
    let stats = profile.stats;

    let actions = match profile.viewer {
        Some(viewer) if viewer.id == user.id => r#"<a href="/users/profile" class="btn btn-outline-secondary">Edit Profile</a>
        <form method="POST" action="/users/delete" class="form-inline">
          <button class="btn btn-outline-danger ml-2">Delete Profile</button>
        </form>"#
            .to_string(),
        Some(_) => follow_button(user.id, profile.viewer_follows),
        None => String::new(),
    };

    format!(
        r#"<div id="warbler-hero" class="full-width">
  <img src="{header}" alt="" class="header-image">
</div>
<img src="{image}" alt="Image for {username}" id="profile-avatar">
<div class="row full-width">
  <div class="container">
    <div class="row justify-content-end">
      <div class="col-9">
        <ul class="user-stats nav nav-pills">
          <li class="stat"><p class="small">Messages</p><h4><a href="/users/{id}">{messages}</a></h4></li>
          <li class="stat"><p class="small">Following</p><h4><a href="/users/{id}/following">{following}</a></h4></li>
          <li class="stat"><p class="small">Followers</p><h4><a href="/users/{id}/followers">{followers}</a></h4></li>
          <li class="stat"><p class="small">Likes</p><h4><a href="/users/{id}/likes">{likes}</a></h4></li>
          <div class="ml-auto">
            {actions}
          </div>
        </ul>
      </div>
    </div>
  </div>
</div>
<div class="row">
  <div class="col-sm-3">
    <h4 id="sidebar-username">@{username}</h4>
    <p>{bio}</p>
    <p class="user-location"><span class="fa fa-map-marker"></span> {location}</p>
  </div>
  <div class="col-sm-9">
    {content}
  </div>
</div>"#,
        id = user.id,
        header = clean_text(&user.header_image_url),
        image = clean_text(&user.image_url),
        username = clean_text(&user.username),
        messages = stats.messages,
        following = stats.following,
        followers = stats.followers,
        likes = stats.likes,
        bio = clean_text(user.bio.as_deref().unwrap_or_default()),
        location = clean_text(user.location.as_deref().unwrap_or_default()),
    )
}

fn user_cards(users: &[UserRow], viewer: Option<&UserRow>, viewer_following: &HashSet<i64>) -> String {
    users
        .iter()
        .map(|user| {
            let button = match viewer {
                Some(viewer) if viewer.id != user.id => {
                    follow_button(user.id, viewer_following.contains(&user.id))
                }
                _ => String::new(),
            };

            format!(
                r#"<div class="col-lg-4 col-md-6 col-12">
  <div class="card user-card">
    <div class="card-inner">
      <div class="image-wrapper">
        <img src="{header}" alt="" class="card-hero">
      </div>
      <div class="card-contents">
        <a href="/users/{id}" class="card-link">
          <img src="{image}" alt="Image for {username}" class="card-image">
          <p>@{username}</p>
        </a>
        {button}
      </div>
      <p class="card-bio">{bio}</p>
    </div>
  </div>
</div>"#,
                id = user.id,
                header = clean_text(&user.header_image_url),
                image = clean_text(&user.image_url),
                username = clean_text(&user.username),
                bio = clean_text(user.bio.as_deref().unwrap_or_default()),
            )
        })
        .collect()
}

fn follow_button(user_id: i64, following: bool) -> String {
    if following {
        format!(
            r#"<form method="POST" action="/users/stop-following/{user_id}">
          <button class="btn btn-primary btn-sm">Unfollow</button>
        </form>"#
        )
    } else {
        format!(
            r#"<form method="POST" action="/users/follow/{user_id}">
          <button class="btn btn-outline-primary btn-sm">Follow</button>
        </form>"#
        )
    }
}
