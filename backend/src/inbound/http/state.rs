//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::AuthService;
use crate::domain::ports::{CafeRepository, CityRepository, LikeRepository, UserRepository};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub cities: Arc<dyn CityRepository>,
    pub cafes: Arc<dyn CafeRepository>,
    pub users: Arc<dyn UserRepository>,
    pub likes: Arc<dyn LikeRepository>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub cities: Arc<dyn CityRepository>,
    pub cafes: Arc<dyn CafeRepository>,
    pub users: Arc<dyn UserRepository>,
    pub likes: Arc<dyn LikeRepository>,
    pub auth: AuthService,
}

impl HttpState {
    /// State over `ports`, with an [`AuthService`] on the user port.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            cities,
            cafes,
            users,
            likes,
        } = ports;
        let auth = AuthService::new(users.clone());
        Self {
            cities,
            cafes,
            users,
            likes,
            auth,
        }
    }

    /// State backed by one adapter implementing every port.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: CityRepository + CafeRepository + UserRepository + LikeRepository + 'static,
    {
        Self::new(HttpStatePorts {
            cities: store.clone(),
            cafes: store.clone(),
            users: store.clone(),
            likes: store,
        })
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
