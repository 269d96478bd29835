use crate::application::http::{
    health::HealthApiDoc, task::router::TaskApiDoc, task_list::router::TaskListApiDoc,
    user::router::UserApiDoc,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Taskhub API"
    ),
    modifiers(&SecurityAddon),
    nest(
        (path = "/health", api = HealthApiDoc),
        (path = "/users", api = UserApiDoc),
        (path = "/tasks", api = TaskApiDoc),
        (path = "/task-lists", api = TaskListApiDoc),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi
            .components
            .get_or_insert_with(Default::default)
            .add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
    }
}
