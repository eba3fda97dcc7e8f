use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use roster_models::auth::{LoginRequest, MessageResponse, RegisterRequest, TokenResponse};
use roster_models::open_persons::OpenPerson;
use roster_models::persons::{PersonDto, PersonInput};
use roster_models::users::{RoleAssignmentRequest, UserDto};

use crate::modules::auth::controller::ErrorResponse;
use crate::route_table::RouteDescriptor;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::verify,
        crate::modules::auth::controller::add_role,
        crate::modules::auth::controller::remove_role,
        crate::modules::persons::controller::get_all_persons,
        crate::modules::persons::controller::reset_data,
        crate::modules::persons::controller::get_person,
        crate::modules::persons::controller::get_person_by_email,
        crate::modules::persons::controller::create_person,
        crate::modules::persons::controller::update_person,
        crate::modules::persons::controller::delete_person,
        crate::modules::open_persons::controller::get_all,
        crate::modules::open_persons::controller::get_by_id,
        crate::modules::open_persons::controller::get_by_email,
        crate::modules::open_persons::controller::create,
        crate::modules::open_persons::controller::update,
        crate::modules::open_persons::controller::delete,
        crate::modules::protected::controller::user_demo,
        crate::modules::protected::controller::admin_demo,
        crate::route_table::list_routes,
    ),
    components(
        schemas(
            LoginRequest,
            RegisterRequest,
            TokenResponse,
            MessageResponse,
            RoleAssignmentRequest,
            UserDto,
            PersonDto,
            PersonInput,
            OpenPerson,
            RouteDescriptor,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, registration, token check and role assignment"),
        (name = "Persons", description = "Database-backed persons"),
        (name = "Open Persons", description = "In-memory demo persons, no authentication"),
        (name = "Protected", description = "Role-gated demo endpoints"),
        (name = "Routes", description = "Route table overview")
    ),
    info(
        title = "Roster API",
        version = "0.1.0",
        description = "Person registry with token authentication and role-based route access.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
