//! Builds the HTTP state from the configured storage backend.

use std::sync::Arc;

use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::memory::InMemoryStore;
use backend::outbound::persistence::{
    DbPool, DieselCafeRepository, DieselCityRepository, DieselLikeRepository,
    DieselUserRepository,
};
use tracing::{info, warn};

use super::ServerConfig;

fn diesel_ports(pool: &DbPool) -> HttpStatePorts {
    HttpStatePorts {
        cities: Arc::new(DieselCityRepository::new(pool.clone())),
        cafes: Arc::new(DieselCafeRepository::new(pool.clone())),
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        likes: Arc::new(DieselLikeRepository::new(pool.clone())),
    }
}

/// Diesel adapters when a pool is configured, the seeded in-memory store
/// otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => {
            info!(storage = "postgres", "repositories configured");
            HttpState::new(diesel_ports(pool))
        }
        None => {
            warn!(storage = "memory", "no database configured; data is lost on restart");
            HttpState::from_store(Arc::new(InMemoryStore::seeded()))
        }
    }
}
