pub(crate) mod lists;
pub(crate) mod movies;
pub(crate) mod stats;
pub(crate) mod watched;

use axum::routing::{delete, get, post};

use crate::application::state::AppState;

pub(super) fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/movies", post(movies::import_movie))
        .route("/movies/search", get(movies::search_movies))
        .route("/movies/{id}", get(movies::get_movie))
        .route(
            "/watched",
            get(watched::list_watched).post(watched::create_watched),
        )
        .route("/watched/{id}", delete(watched::delete_watched))
        .route("/lists", get(lists::list_lists).post(lists::create_list))
        .route(
            "/lists/{id}",
            get(lists::get_list).delete(lists::delete_list),
        )
        .route("/lists/{id}/movies", post(lists::add_movie))
        .route(
            "/lists/{id}/movies/{movie_id}",
            delete(lists::remove_movie),
        )
        .route("/stats", get(stats::get_stats))
}
