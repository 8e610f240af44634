//! Application router configuration with unprotected, protected and
//! admin-only route definitions.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{delete, get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::{admin_guard, admin_guard_hx, auth_guard, auth_guard_hx, get_log_in_page, get_log_out, post_log_in},
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    record::{
        create_record_endpoint, delete_record_endpoint, get_edit_record_page, get_new_record_page,
        get_records_page, update_record_endpoint,
    },
    summary::{get_summary_api, get_summary_page},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::SUMMARY_VIEW, get(get_summary_page))
        .route(endpoints::RECORDS_VIEW, get(get_records_page))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // This GET route needs to use the HX-REDIRECT header for auth redirects to
    // work properly for HTMX requests.
    let protected_routes = protected_routes.merge(
        Router::new()
            .route(endpoints::SUMMARY_API, get(get_summary_api))
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx)),
    );

    // The admin guard reads the user ID inserted by the auth guard, so the
    // auth guard must be the outer layer.
    let admin_routes = Router::new()
        .route(endpoints::NEW_RECORD_VIEW, get(get_new_record_page))
        .route(endpoints::EDIT_RECORD_VIEW, get(get_edit_record_page))
        .layer(middleware::from_fn_with_state(state.clone(), admin_guard))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    let admin_routes = admin_routes.merge(
        Router::new()
            .route(endpoints::RECORDS_API, post(create_record_endpoint))
            .route(endpoints::EDIT_RECORD_VIEW, put(update_record_endpoint))
            .route(endpoints::DELETE_RECORD, delete(delete_record_endpoint))
            .layer(middleware::from_fn_with_state(state.clone(), admin_guard_hx))
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx)),
    );

    protected_routes
        .merge(admin_routes)
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the summary page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::SUMMARY_VIEW)
}
