use axum::{
    Form, Json, Router,
    extract::{
        State,
        rejection::{FormRejection, JsonRejection},
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use axum_helpers::{AppError, ErrorResponse};
use utoipa::OpenApi;

use crate::error::RegistrationError;
use crate::models::{Confirmation, RegistrationRequest};
use crate::repository::UserRepository;
use crate::service::RegistrationService;

const REGISTRATION_FORM: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Register</title>
</head>
<body>
<form method="POST" action="/register">
<input type="text" name="username" placeholder="Username">
<input type="email" name="email" placeholder="Email">
<input type="password" name="password" placeholder="Password">
<button type="submit" name="submit">Register</button>
</form>
</body>
</html>
"#;

const GENERIC_FAILURE: &str = "Internal server error";

/// OpenAPI documentation for the registration API
#[derive(OpenApi)]
#[openapi(
    paths(register_user),
    components(schemas(RegistrationRequest, Confirmation, ErrorResponse)),
    tags(
        (name = "registration", description = "Account sign-up")
    )
)]
pub struct ApiDoc;

/// `GET/POST /register`, the HTML form surface.
pub fn form_router<R: UserRepository + 'static>(service: RegistrationService<R>) -> Router {
    Router::new()
        .route("/register", get(registration_form).post(submit_form))
        .with_state(service)
}

/// `POST /users`, the JSON surface. Nest it under `/api`.
pub fn api_router<R: UserRepository + 'static>(service: RegistrationService<R>) -> Router {
    Router::new()
        .route("/users", post(register_user))
        .with_state(service)
}

async fn registration_form() -> Html<&'static str> {
    Html(REGISTRATION_FORM)
}

/// Plain-text outcome: a confirmation, one line per validation message, or a
/// generic failure.
async fn submit_form<R: UserRepository>(
    State(service): State<RegistrationService<R>>,
    payload: Result<Form<RegistrationRequest>, FormRejection>,
) -> Response {
    let Form(request) = match payload {
        Ok(form) => form,
        Err(rejection) => return AppError::from(rejection).into_response(),
    };

    match service.register(request).await {
        Ok(_) => (StatusCode::CREATED, Confirmation::MESSAGE).into_response(),
        Err(RegistrationError::Validation(errors)) => {
            (StatusCode::BAD_REQUEST, errors.messages().join("\n")).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Registration failed");
            (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE).into_response()
        }
    }
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "registration",
    request_body = RegistrationRequest,
    responses(
        (status = 201, description = "User registered", body = Confirmation),
        (status = 400, description = "One or more fields are empty", body = ErrorResponse),
        (status = 500, description = "Registration could not be stored", body = ErrorResponse)
    )
)]
async fn register_user<R: UserRepository>(
    State(service): State<RegistrationService<R>>,
    payload: Result<Json<RegistrationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Confirmation>), AppError> {
    let Json(request) = payload?;
    let confirmation = service.register(request).await?;
    Ok((StatusCode::CREATED, Json(confirmation)))
}
