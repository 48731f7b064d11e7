mod dto;
pub mod handlers;
pub mod repo;
pub(crate) mod repo_types;
pub mod validate;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::account_routes())
        .merge(handlers::profile_routes())
}
