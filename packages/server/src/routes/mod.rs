use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers::posts::*;
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_posts, create_post))
        .routes(routes!(get_post, update_post, delete_post))
}
