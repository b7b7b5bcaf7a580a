pub mod middleware;
pub mod openapi;
pub mod routes;

use axum::Router;
use rvd_clients::{EventCatalogClient, RegistrationClient};
use rvd_core::{ReviewService, ServiceError};
use rvd_db::schema;
use rvd_db::store::DbStore;
use tokio::net::TcpListener;

#[derive(Clone)]
pub struct AppState {
    pub db_path: String,
    pub events: EventCatalogClient,
    pub registrations: RegistrationClient,
}

pub fn build_service(state: &AppState) -> Result<ReviewService<DbStore>, ServiceError> {
    let conn = schema::open_and_migrate(&state.db_path).map_err(|err| ServiceError::Internal {
        message: err.to_string(),
    })?;
    Ok(ReviewService::new(DbStore::new(conn)))
}

pub fn app(state: AppState) -> Router {
    routes::router(state)
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await
}
