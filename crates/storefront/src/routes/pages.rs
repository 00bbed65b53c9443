//! Static page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::instrument;

use crate::content::{VALUE_PROPS, ValueProp};
use crate::filters;

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub value_props: &'static [ValueProp],
}

/// 404 page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/not_found.html")]
pub struct NotFoundTemplate;

/// Display the about page.
#[instrument]
pub async fn about() -> AboutTemplate {
    AboutTemplate {
        value_props: VALUE_PROPS,
    }
}

/// Fallback handler for unmatched routes.
#[instrument]
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, NotFoundTemplate)
}

/// Newsletter signup form data.
#[derive(Debug, Deserialize)]
pub struct NewsletterForm {
    pub email: String,
}

/// Confirmation fragment swapped in for the signup form (HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/newsletter_thanks.html")]
pub struct NewsletterThanksTemplate;

/// Handle a newsletter signup. Logged for follow-up; there is no mailing
/// pipeline behind this form.
#[instrument(skip(form))]
pub async fn newsletter_signup(Form(form): Form<NewsletterForm>) -> Response {
    let email = form.email.trim();
    if email.is_empty() || !email.contains('@') {
        return (StatusCode::BAD_REQUEST, "Enter a valid email address").into_response();
    }

    tracing::info!(email = %email, "newsletter signup");
    NewsletterThanksTemplate.into_response()
}
