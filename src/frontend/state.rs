//! # Front-end State

use axum::response::{Html, Response};
use serde::Serialize;
use std::sync::Arc;
use tera::Context;

use crate::config::WebFrontendConfig;
use crate::error::TodoResult;
use crate::frontend::error::FrontendResult;
use crate::frontend::session::{CookieSigner, Visitor, CSRF_FIELD};
use crate::frontend::templates::Templates;
use crate::services::{AccountService, Services};

/// Shared state for every page handler
#[derive(Clone, Debug)]
pub struct FrontendState {
    pub config: Arc<WebFrontendConfig>,
    pub services: Services,
    /// Accounts always live in the local database, whatever backs `services`
    pub accounts: AccountService,
    pub templates: Templates,
    pub signer: CookieSigner,
}

#[derive(Debug, Serialize)]
struct CurrentUser<'a> {
    user_id: &'a str,
    email: &'a str,
    display_name: &'a str,
}

impl FrontendState {
    pub fn new(
        config: WebFrontendConfig,
        services: Services,
        accounts: AccountService,
    ) -> TodoResult<Self> {
        let signer = CookieSigner::new(&config.session_secret)?;
        Ok(Self {
            config: Arc::new(config),
            services,
            accounts,
            templates: Templates::load()?,
            signer,
        })
    }

    /// Render `template` with the layout variables every page expects
    pub fn render(
        &self,
        visitor: Visitor,
        template: &str,
        mut context: Context,
    ) -> FrontendResult<Response> {
        context.insert(
            "current_user",
            &visitor.user.as_ref().map(|user| CurrentUser {
                user_id: &user.user_id,
                email: &user.email,
                display_name: &user.display_name,
            }),
        );
        context.insert("flash", &visitor.flash);
        context.insert("csrf_field", CSRF_FIELD);
        context.insert("csrf_token", &visitor.csrf_token());
        let body = self.templates.render(template, &context)?;
        Ok(visitor.respond(Html(body)))
    }
}
