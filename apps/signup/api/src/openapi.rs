use utoipa::OpenApi;

/// Combined API documentation served at `/api-docs/openapi.json`
#[derive(OpenApi)]
#[openapi(
    info(title = "Signup API", description = "Account registration"),
    nest(
        (path = "/api", api = domain_registration::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
