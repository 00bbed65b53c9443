//! Bulk-order quote request form.
//!
//! Schools and studios buying in volume request a quote instead of checking
//! out. Submissions are logged for follow-up; there is no order pipeline
//! behind this form.

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::instrument;

use crate::content::{STUDIO_TYPES, StudioType};
use crate::filters;

/// Quote form submission.
#[derive(Debug, Deserialize)]
pub struct QuoteForm {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub organization_name: String,
    #[serde(default)]
    pub organization_type: String,
    #[serde(default)]
    pub estimated_spend: String,
    #[serde(default)]
    pub products_of_interest: String,
    #[serde(default)]
    pub notes: String,
}

impl QuoteForm {
    /// Field-level validation; returns messages to re-render with the form.
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.full_name.trim().is_empty() {
            errors.push("Full name is required".to_string());
        }
        let email = self.email.trim();
        if email.is_empty() {
            errors.push("Email is required".to_string());
        } else if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            errors.push("Email address is invalid".to_string());
        }
        if self.organization_name.trim().is_empty() {
            errors.push("Organization name is required".to_string());
        }
        errors
    }
}

/// Quote form page template.
#[derive(Template, WebTemplate)]
#[template(path = "quote/show.html")]
pub struct QuoteShowTemplate {
    pub studio_types: &'static [StudioType],
    pub errors: Vec<String>,
}

/// Quote submitted confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "quote/submitted.html")]
pub struct QuoteSubmittedTemplate {
    pub full_name: String,
}

/// Display the quote request form.
#[instrument]
pub async fn show() -> QuoteShowTemplate {
    QuoteShowTemplate {
        studio_types: STUDIO_TYPES,
        errors: Vec::new(),
    }
}

/// Handle a quote request submission.
#[instrument(skip(form))]
pub async fn submit(Form(form): Form<QuoteForm>) -> Response {
    let errors = form.validate();
    if !errors.is_empty() {
        return QuoteShowTemplate {
            studio_types: STUDIO_TYPES,
            errors,
        }
        .into_response();
    }

    tracing::info!(
        organization = %form.organization_name.trim(),
        organization_type = %form.organization_type,
        estimated_spend = %form.estimated_spend,
        "quote request received"
    );

    QuoteSubmittedTemplate {
        full_name: form.full_name.trim().to_string(),
    }
    .into_response()
}
