use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{services::documentation::ApiDoc, state::SharedState};

pub mod health;
pub mod leagues;
pub mod schedule;

/// Compose all route trees and the Swagger UI, wiring in shared state.
pub fn router(state: SharedState) -> Router<()> {
    let docs: Router<SharedState> = SwaggerUi::new("/docs")
        .url("/api-doc/openapi.json", ApiDoc::openapi())
        .into();

    health::router()
        .merge(schedule::router())
        .merge(leagues::router())
        .merge(docs)
        .with_state(state)
}
