use ammonia::clean_text;

use warbler_types::forms::{LoginForm, SignupForm};

use super::form_errors;

pub fn signup_form(form: &SignupForm, errors: &[String]) -> String {
    format!(
        r#"<div class="row justify-content-md-center">
  <div class="col-md-7 col-lg-5">
    <h2 class="join-message">Join Warbler today.</h2>
    <form method="POST" id="user_form">
      {errors}
      <input name="username" class="form-control" placeholder="Username" value="{username}">
      <input name="email" type="email" class="form-control" placeholder="E-mail" value="{email}">
      <input name="password" type="password" class="form-control" placeholder="Password">
      <input name="image_url" class="form-control" placeholder="(Optional) Image URL" value="{image_url}">
      <button class="btn btn-primary btn-lg btn-block">Sign me up!</button>
    </form>
  </div>
</div>"#,
        errors = form_errors(errors),
        username = clean_text(&form.username),
        email = clean_text(&form.email),
        image_url = clean_text(&form.image_url),
    )
}

pub fn login_form(form: &LoginForm, errors: &[String]) -> String {
    format!(
        r#"<div class="row justify-content-md-center">
  <div class="col-md-7 col-lg-5">
    <h2 class="join-message">Welcome back.</h2>
    <form method="POST" id="user_form">
      {errors}
      <input name="username" class="form-control" placeholder="Username" value="{username}">
      <input name="password" type="password" class="form-control" placeholder="Password">
      <button class="btn btn-primary btn-block btn-lg">Log in</button>
    </form>
  </div>
</div>"#,
        errors = form_errors(errors),
        username = clean_text(&form.username),
    )
}
