//! Registration, sign-in and sign-out.

use axum::extract::{Query, State};
use axum::response::Response;
use serde::Deserialize;
use tera::Context;
use tracing::info;

use super::{CsrfOnly, PageForm};
use crate::error::TodoError;
use crate::frontend::error::{describe, safe_return_url, FrontendResult};
use crate::frontend::session::{Flash, SessionUser, Visitor};
use crate::frontend::state::FrontendState;
use crate::services::{LoginRequest, RegisterRequest};

#[derive(Debug, Deserialize)]
pub struct ReturnUrlQuery {
    #[serde(rename = "returnUrl")]
    pub return_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(rename = "_csrf", default)]
    pub csrf: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(rename = "returnUrl")]
    pub return_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(rename = "_csrf", default)]
    pub csrf: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

fn login_page(
    state: &FrontendState,
    visitor: Visitor,
    email: &str,
    return_url: Option<&str>,
    errors: &[String],
) -> FrontendResult<Response> {
    let mut context = Context::new();
    context.insert("title", "Log in");
    context.insert("email", email);
    context.insert("return_url", &return_url);
    context.insert("errors", errors);
    state.render(visitor, "account/login.html", context)
}

fn register_page(
    state: &FrontendState,
    visitor: Visitor,
    form: &RegisterForm,
    errors: &[String],
) -> FrontendResult<Response> {
    let mut context = Context::new();
    context.insert("title", "Register");
    context.insert("email", &form.email);
    context.insert("first_name", &form.first_name);
    context.insert("last_name", &form.last_name);
    context.insert("errors", errors);
    state.render(visitor, "account/register.html", context)
}

fn start_session(visitor: &mut Visitor, user: &crate::models::User) -> FrontendResult<()> {
    let ttl = visitor.session_ttl();
    visitor.start_session(SessionUser::new(
        user.id.clone(),
        user.email.clone(),
        user.display_name(),
        ttl,
    ))?;
    Ok(())
}

pub async fn login_form(
    State(state): State<FrontendState>,
    visitor: Visitor,
    Query(query): Query<ReturnUrlQuery>,
) -> FrontendResult<Response> {
    if visitor.user.is_some() {
        return Ok(visitor.redirect(safe_return_url(query.return_url.as_deref())));
    }
    login_page(&state, visitor, "", query.return_url.as_deref(), &[])
}

pub async fn login(
    State(state): State<FrontendState>,
    mut visitor: Visitor,
    PageForm(form): PageForm<LoginForm>,
) -> FrontendResult<Response> {
    visitor.verify_csrf(&form.csrf)?;

    let request = LoginRequest {
        email: form.email.trim().to_string(),
        password: form.password,
    };
    match state.accounts.login(&request).await {
        Ok(user) => {
            start_session(&mut visitor, &user)?;
            let to = safe_return_url(form.return_url.as_deref()).to_string();
            Ok(visitor.redirect(&to))
        }
        Err(err @ TodoError::Authorization(_)) => {
            let errors = [err_message(&err)];
            login_page(&state, visitor, &request.email, form.return_url.as_deref(), &errors)
        }
        Err(err) => Err(err.into()),
    }
}

fn err_message(err: &TodoError) -> String {
    match err {
        TodoError::Authorization(message) | TodoError::Validation(message) => message.clone(),
        other => describe(other, "Account"),
    }
}

pub async fn register_form(
    State(state): State<FrontendState>,
    visitor: Visitor,
) -> FrontendResult<Response> {
    if visitor.user.is_some() {
        return Ok(visitor.redirect("/todolist"));
    }
    let empty = RegisterForm {
        csrf: String::new(),
        email: String::new(),
        first_name: String::new(),
        last_name: String::new(),
        password: String::new(),
        confirm_password: String::new(),
    };
    register_page(&state, visitor, &empty, &[])
}

pub async fn register(
    State(state): State<FrontendState>,
    mut visitor: Visitor,
    PageForm(form): PageForm<RegisterForm>,
) -> FrontendResult<Response> {
    visitor.verify_csrf(&form.csrf)?;

    let request = RegisterRequest {
        email: form.email.trim().to_string(),
        first_name: form.first_name.clone(),
        last_name: form.last_name.clone(),
        password: form.password.clone(),
        confirm_password: form.confirm_password.clone(),
    };
    match state.accounts.register(request).await {
        Ok(user) => {
            start_session(&mut visitor, &user)?;
            Ok(visitor.redirect_with(
                "/todolist",
                Flash::success("Registration successful. Welcome!"),
            ))
        }
        Err(err @ TodoError::Validation(_)) => {
            let errors = [err_message(&err)];
            register_page(&state, visitor, &form, &errors)
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn logout(
    mut visitor: Visitor,
    PageForm(form): PageForm<CsrfOnly>,
) -> FrontendResult<Response> {
    visitor.verify_csrf(&form.csrf)?;
    if let Some(user) = &visitor.user {
        info!(user_id = %user.user_id, "User logged out");
    }
    visitor.end_session();
    Ok(visitor.redirect("/account/login"))
}

pub async fn access_denied(
    State(state): State<FrontendState>,
    visitor: Visitor,
) -> FrontendResult<Response> {
    let mut context = Context::new();
    context.insert("title", "Access denied");
    state.render(visitor, "account/access_denied.html", context)
}
