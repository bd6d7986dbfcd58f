use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::Config,
    services::{AccountService, CommentService, LikeService, PostAggregator, PostService},
    store::{ContentStore, UserDirectory},
    utils::jwt::SessionManager,
};

/// Everything a request needs, built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionManager,
    pub accounts: AccountService,
    pub aggregator: PostAggregator,
    pub likes: LikeService,
    pub comments: CommentService,
    pub posts: PostService,
}

impl AppState {
    /// Wires every service to one backend that serves both content and users.
    pub fn new<B>(backend: Arc<B>, config: Config) -> Self
    where
        B: ContentStore + UserDirectory + 'static,
    {
        let store: Arc<dyn ContentStore> = backend.clone();
        let users: Arc<dyn UserDirectory> = backend;
        let sessions = SessionManager::new(config.jwt_secret.clone());

        Self {
            accounts: AccountService::new(users, sessions.clone()),
            aggregator: PostAggregator::new(store.clone()),
            likes: LikeService::new(store.clone()),
            comments: CommentService::new(store.clone()),
            posts: PostService::new(store),
            sessions,
            config,
        }
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for SessionManager {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for AccountService {
    fn from_ref(state: &AppState) -> Self {
        state.accounts.clone()
    }
}

impl FromRef<AppState> for PostAggregator {
    fn from_ref(state: &AppState) -> Self {
        state.aggregator.clone()
    }
}

impl FromRef<AppState> for LikeService {
    fn from_ref(state: &AppState) -> Self {
        state.likes.clone()
    }
}

impl FromRef<AppState> for CommentService {
    fn from_ref(state: &AppState) -> Self {
        state.comments.clone()
    }
}

impl FromRef<AppState> for PostService {
    fn from_ref(state: &AppState) -> Self {
        state.posts.clone()
    }
}
