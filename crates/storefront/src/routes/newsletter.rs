//! Newsletter subscription handler.
//!
//! Signs the address up as a Shopify customer with marketing consent. An
//! address that is already a customer counts as subscribed.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::IntoResponse};
use kittaly_core::{Email, EmailError};
use serde::Deserialize;
use tracing::instrument;

use crate::shopify::{NewsletterSignup, ShopifyError};
use crate::state::AppState;

/// Newsletter subscription form data.
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    pub email: String,
}

/// Success fragment template (replaces the form via HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "newsletter/subscribe_success.html")]
pub struct SubscribeSuccessTemplate {
    pub email: String,
    pub already_subscribed: bool,
}

/// Error fragment template (replaces the form via HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "newsletter/subscribe_error.html")]
pub struct SubscribeErrorTemplate {
    pub message: String,
    pub email: String,
}

fn validation_message(err: &EmailError) -> String {
    match err {
        EmailError::Empty => "Please enter your email address.".to_string(),
        _ => "Please enter a valid email address.".to_string(),
    }
}

/// Subscribe to the newsletter (HTMX).
#[instrument(skip(state, form))]
pub async fn subscribe(
    State(state): State<AppState>,
    Form(form): Form<SubscribeForm>,
) -> impl IntoResponse {
    let email = match Email::parse(&form.email) {
        Ok(email) => email,
        Err(e) => {
            return SubscribeErrorTemplate {
                message: validation_message(&e),
                email: form.email.trim().to_string(),
            }
            .into_response();
        }
    };

    match state.storefront().subscribe_newsletter(email.as_str()).await {
        Ok(signup) => {
            tracing::info!(domain = %email.domain(), ?signup, "Newsletter subscription");
            SubscribeSuccessTemplate {
                email: email.into_inner(),
                already_subscribed: signup == NewsletterSignup::AlreadySubscribed,
            }
            .into_response()
        }
        Err(ShopifyError::UserError(message)) => {
            tracing::warn!(domain = %email.domain(), %message, "Newsletter signup rejected");
            SubscribeErrorTemplate {
                message,
                email: email.into_inner(),
            }
            .into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Newsletter subscription failed");
            SubscribeErrorTemplate {
                message: "Something went wrong. Please try again.".to_string(),
                email: email.into_inner(),
            }
            .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message() {
        assert_eq!(
            validation_message(&EmailError::Empty),
            "Please enter your email address."
        );
        let Err(err) = Email::parse("not-an-email") else {
            panic!("expected a validation error");
        };
        assert_eq!(validation_message(&err), "Please enter a valid email address.");
    }
}
