//! OpenAPI documentation configuration
//!
//! Generates OpenAPI 3.0 specification for the Bugtrack API.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::db::Bug;
use crate::handlers::{
    CreateBugRequest, CredentialsRequest, HealthResponse, LoginResponse, ReadyResponse,
    RegisterResponse, UpdateBugRequest,
};

/// Bugtrack API - OpenAPI Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bugtrack API",
        version = "0.1.0",
        description = r#"
## Minimal Bug Tracking API

CRUD operations on bug records with optional token-gated access:

- **List** bugs with equality filters on `status` and `priority`
- **Create** bugs with a required title and defaulted labels
- **Update** bugs partially: omitted fields keep their stored values
- **Delete** bugs idempotently

### Authentication

When the server runs with `REQUIRE_AUTH=true` (the production default),
every `/bugs` route demands a bearer token:

1. Create an account via `POST /register`
2. Obtain a token via `POST /login`
3. Send it as `Authorization: Bearer <token>`

`/register` and `/login` are always open.
"#,
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    tags(
        (name = "Bugs", description = "Bug record CRUD and filtered listing"),
        (name = "Auth", description = "Account registration and token issuance"),
        (name = "Health", description = "Service health and readiness endpoints")
    ),
    paths(
        crate::handlers::health::health,
        crate::handlers::health::ready,
        crate::handlers::bugs::list_bugs_handler,
        crate::handlers::bugs::create_bug_handler,
        crate::handlers::bugs::update_bug_handler,
        crate::handlers::bugs::delete_bug_handler,
        crate::handlers::auth::register_handler,
        crate::handlers::auth::login_handler,
    ),
    components(
        schemas(
            Bug,
            CreateBugRequest,
            UpdateBugRequest,
            CredentialsRequest,
            RegisterResponse,
            LoginResponse,
            HealthResponse,
            ReadyResponse,
        )
    ),
    modifiers(&BearerTokenAddon)
)]
pub struct ApiDoc;

/// Registers the `bearer_token` security scheme referenced by the bug paths
struct BearerTokenAddon;

impl Modify for BearerTokenAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
