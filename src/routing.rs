//! Application router configuration with session gated and open route definitions.

use axum::{
    Router,
    http::{Method, header::SET_COOKIE},
    middleware,
    routing::{delete, get, post},
};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

use crate::{
    AppConfig, AppState, endpoints,
    logging::logging_middleware,
    session::session_guard,
    transaction::{
        TransactionStore, create_transaction_endpoint, delete_transaction_by_segment_endpoint,
        delete_transaction_endpoint, get_summary_endpoint, get_transaction_endpoint,
        list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router<S>(state: AppState<S>) -> Router
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let cors = build_cors_layer(&state.config);

    // Reads are only served to requests carrying a session cookie.
    let session_routes = Router::new()
        .route(endpoints::TRANSACTIONS, get(list_transactions_endpoint::<S>))
        .route(endpoints::TRANSACTIONS_SUMMARY, get(get_summary_endpoint::<S>))
        .route(endpoints::TRANSACTION, get(get_transaction_endpoint::<S>))
        .route_layer(middleware::from_fn(session_guard));

    // Writes issue a session themselves when the request has none.
    // The summary path is also a valid transaction ID for deletes.
    let open_routes = Router::new()
        .route(endpoints::TRANSACTIONS, post(create_transaction_endpoint::<S>))
        .route(
            endpoints::TRANSACTION,
            delete(delete_transaction_endpoint::<S>),
        )
        .route(
            endpoints::TRANSACTIONS_SUMMARY,
            delete(delete_transaction_by_segment_endpoint::<S>),
        );

    session_routes
        .merge(open_routes)
        .layer(middleware::from_fn(logging_middleware))
        .layer(cors)
        .with_state(state)
}

/// Allow credentialed requests from the configured origin only, and let its
/// scripts see the `set-cookie` header.
///
/// Requests from any other origin get no `access-control-allow-origin` header.
fn build_cors_layer(config: &AppConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list([config.allowed_origin.clone()]))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::PUT, Method::POST, Method::DELETE])
        .allow_headers(AllowHeaders::mirror_request())
        .expose_headers([SET_COOKIE])
}
