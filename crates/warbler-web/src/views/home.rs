use std::collections::HashSet;

use ammonia::clean_text;

use warbler_db::models::{MessageRow, UserRow, UserStats};

use super::message_list;

pub fn anon() -> String {
    r#"<div class="home-hero">
  <h1>What's Happening?</h1>
  <h4>New to Warbler?</h4>
  <a href="/signup" class="btn btn-primary">Sign up</a>
</div>"#
        .to_string()
}

pub fn home(user: &UserRow, stats: &UserStats, timeline: &[MessageRow], liked: &HashSet<i64>) -> String {
    format!(
        r#"<div class="row">
  <aside class="col-md-4 col-lg-3 col-sm-12" id="home-aside">
    <div class="card user-card">
      <div>
        <div class="image-wrapper">
          <img src="{header}" alt="" class="card-hero">
        </div>
        <a href="/users/{id}" class="card-link">
          <img src="{image}" alt="Image for {username}" class="card-image">
          <p>@{username}</p>
        </a>
        <ul class="user-stats nav nav-pills">
          <li class="stat"><p class="small">Messages</p><h4><a href="/users/{id}">{messages}</a></h4></li>
          <li class="stat"><p class="small">Following</p><h4><a href="/users/{id}/following">{following}</a></h4></li>
          <li class="stat"><p class="small">Followers</p><h4><a href="/users/{id}/followers">{followers}</a></h4></li>
          <li class="stat"><p class="small">Likes</p><h4><a href="/users/{id}/likes">{likes}</a></h4></li>
        </ul>
      </div>
    </div>
  </aside>
  <div class="col-lg-6 col-md-8 col-sm-12">
    {timeline}
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
        timeline = message_list(timeline, Some(user), liked),
    )
}
