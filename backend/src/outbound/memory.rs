//! In-process implementation of every repository port.
//!
//! Used when no database URL is configured and by the HTTP tests. It enforces
//! the same constraints as the PostgreSQL schema: unique usernames, foreign
//! keys from cafes to cities and from likes to users and cafes, composite like
//! keys, and name ordering on list queries.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    CafeRepository, CafeRepositoryError, CityRepository, CityRepositoryError, LikeRepository,
    LikeRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{
    Cafe, CafeDraft, CafeId, City, CityCode, Like, NewUser, ProfileUpdate, User, UserId, Username,
};

#[derive(Debug, Default)]
struct Tables {
    cities: BTreeMap<CityCode, City>,
    cafes: BTreeMap<CafeId, Cafe>,
    users: BTreeMap<UserId, User>,
    likes: BTreeSet<Like>,
    last_cafe_id: i32,
    last_user_id: i32,
}

impl Tables {
    fn next_cafe_id(&mut self) -> CafeId {
        self.last_cafe_id += 1;
        CafeId::new(self.last_cafe_id)
    }

    fn next_user_id(&mut self) -> UserId {
        self.last_user_id += 1;
        UserId::new(self.last_user_id)
    }

    fn check_city(&self, code: &CityCode) -> Result<(), CafeRepositoryError> {
        if self.cities.contains_key(code) {
            Ok(())
        } else {
            Err(CafeRepositoryError::referential_integrity(format!(
                "unknown city code {code}"
            )))
        }
    }

    fn check_like(&self, like: Like) -> Result<(), LikeRepositoryError> {
        if !self.users.contains_key(&like.user_id) {
            return Err(LikeRepositoryError::referential_integrity(format!(
                "unknown user {}",
                like.user_id
            )));
        }
        if !self.cafes.contains_key(&like.cafe_id) {
            return Err(LikeRepositoryError::referential_integrity(format!(
                "unknown cafe {}",
                like.cafe_id
            )));
        }
        Ok(())
    }
}

/// Cities seeded into a fresh in-memory store.
pub fn demo_cities() -> Vec<City> {
    [
        ("berk", "Berkeley", "CA"),
        ("oak", "Oakland", "CA"),
        ("sf", "San Francisco", "CA"),
    ]
    .into_iter()
    .filter_map(|(code, name, state)| City::try_new(code, name, state).ok())
    .collect()
}

/// Shared in-memory tables. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    /// Empty store with no cities.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given cities.
    pub fn with_cities(cities: impl IntoIterator<Item = City>) -> Self {
        let tables = Tables {
            cities: cities
                .into_iter()
                .map(|city| (city.code().clone(), city))
                .collect(),
            ..Tables::default()
        };
        Self {
            tables: Arc::new(Mutex::new(tables)),
        }
    }

    /// Store pre-populated with [`demo_cities`].
    pub fn seeded() -> Self {
        Self::with_cities(demo_cities())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, String> {
        self.tables
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }
}

fn sorted_by_name(mut cafes: Vec<Cafe>) -> Vec<Cafe> {
    cafes.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    cafes
}

#[async_trait]
impl CityRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<City>, CityRepositoryError> {
        let tables = self.lock().map_err(CityRepositoryError::query)?;
        let mut cities: Vec<City> = tables.cities.values().cloned().collect();
        cities.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(cities)
    }

    async fn find(&self, code: &CityCode) -> Result<Option<City>, CityRepositoryError> {
        let tables = self.lock().map_err(CityRepositoryError::query)?;
        Ok(tables.cities.get(code).cloned())
    }

    async fn insert(&self, city: &City) -> Result<(), CityRepositoryError> {
        let mut tables = self.lock().map_err(CityRepositoryError::query)?;
        if tables.cities.contains_key(city.code()) {
            return Err(CityRepositoryError::duplicate_code(city.code().as_ref()));
        }
        tables.cities.insert(city.code().clone(), city.clone());
        Ok(())
    }
}

#[async_trait]
impl CafeRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Cafe>, CafeRepositoryError> {
        let tables = self.lock().map_err(CafeRepositoryError::query)?;
        Ok(sorted_by_name(tables.cafes.values().cloned().collect()))
    }

    async fn get(&self, id: CafeId) -> Result<Cafe, CafeRepositoryError> {
        let tables = self.lock().map_err(CafeRepositoryError::query)?;
        tables
            .cafes
            .get(&id)
            .cloned()
            .ok_or_else(|| CafeRepositoryError::not_found(id.get()))
    }

    async fn insert(&self, draft: &CafeDraft) -> Result<Cafe, CafeRepositoryError> {
        let mut tables = self.lock().map_err(CafeRepositoryError::query)?;
        tables.check_city(&draft.city_code)?;
        let id = tables.next_cafe_id();
        let cafe = Cafe::from_draft(id, draft.clone());
        tables.cafes.insert(id, cafe.clone());
        Ok(cafe)
    }

    async fn update(&self, id: CafeId, draft: &CafeDraft) -> Result<Cafe, CafeRepositoryError> {
        let mut tables = self.lock().map_err(CafeRepositoryError::query)?;
        if !tables.cafes.contains_key(&id) {
            return Err(CafeRepositoryError::not_found(id.get()));
        }
        tables.check_city(&draft.city_code)?;
        let cafe = Cafe::from_draft(id, draft.clone());
        tables.cafes.insert(id, cafe.clone());
        Ok(cafe)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn get(&self, id: UserId) -> Result<User, UserRepositoryError> {
        let tables = self.lock().map_err(UserRepositoryError::query)?;
        tables
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| UserRepositoryError::not_found(id.get()))
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError> {
        let tables = self.lock().map_err(UserRepositoryError::query)?;
        Ok(tables
            .users
            .values()
            .find(|user| &user.username == username)
            .cloned())
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut tables = self.lock().map_err(UserRepositoryError::query)?;
        if tables
            .users
            .values()
            .any(|existing| existing.username == user.username)
        {
            return Err(UserRepositoryError::duplicate_username(
                user.username.as_ref(),
            ));
        }
        let id = tables.next_user_id();
        let stored = User::from_new(id, user.clone());
        tables.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_profile(
        &self,
        id: UserId,
        update: &ProfileUpdate,
    ) -> Result<User, UserRepositoryError> {
        let mut tables = self.lock().map_err(UserRepositoryError::query)?;
        let user = tables
            .users
            .get_mut(&id)
            .ok_or_else(|| UserRepositoryError::not_found(id.get()))?;
        user.apply_profile(update.clone());
        Ok(user.clone())
    }
}

#[async_trait]
impl LikeRepository for InMemoryStore {
    async fn like(&self, like: Like) -> Result<bool, LikeRepositoryError> {
        let mut tables = self.lock().map_err(LikeRepositoryError::query)?;
        tables.check_like(like)?;
        Ok(tables.likes.insert(like))
    }

    async fn unlike(&self, like: Like) -> Result<bool, LikeRepositoryError> {
        let mut tables = self.lock().map_err(LikeRepositoryError::query)?;
        Ok(tables.likes.remove(&like))
    }

    async fn is_liked(&self, like: Like) -> Result<bool, LikeRepositoryError> {
        let tables = self.lock().map_err(LikeRepositoryError::query)?;
        Ok(tables.likes.contains(&like))
    }

    async fn liked_cafes(&self, user_id: UserId) -> Result<Vec<Cafe>, LikeRepositoryError> {
        let tables = self.lock().map_err(LikeRepositoryError::query)?;
        let cafes = tables
            .likes
            .iter()
            .filter(|like| like.user_id == user_id)
            .filter_map(|like| tables.cafes.get(&like.cafe_id).cloned())
            .collect();
        Ok(sorted_by_name(cafes))
    }

    async fn liking_users(&self, cafe_id: CafeId) -> Result<Vec<User>, LikeRepositoryError> {
        let tables = self.lock().map_err(LikeRepositoryError::query)?;
        let mut users: Vec<User> = tables
            .likes
            .iter()
            .filter(|like| like.cafe_id == cafe_id)
            .filter_map(|like| tables.users.get(&like.user_id).cloned())
            .collect();
        users.sort_by(|a, b| a.username.as_ref().cmp(b.username.as_ref()));
        Ok(users)
    }
}
