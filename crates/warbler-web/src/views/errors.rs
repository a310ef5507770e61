use axum::http::StatusCode;

pub fn error_page(status: StatusCode) -> String {
    if status == StatusCode::NOT_FOUND {
        return r#"<div class="row justify-content-center">
  <div class="col-md-6 text-center">
    <h1>404</h1>
    <p>The page you were looking for flew away.</p>
    <a href="/" class="btn btn-primary">Go home</a>
  </div>
</div>"#
            .to_string();
    }

    format!(
        r#"<div class="row justify-content-center">
  <div class="col-md-6 text-center">
    <h1>{}</h1>
    <p>Something went wrong. Please try again.</p>
  </div>
</div>"#,
        status.as_u16()
    )
}
