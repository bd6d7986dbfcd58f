// src/services/mod.rs

pub mod accounts;
pub mod aggregation;
pub mod comments;
pub mod likes;
pub mod posts;

pub use accounts::AccountService;
pub use aggregation::PostAggregator;
pub use comments::CommentService;
pub use likes::LikeService;
pub use posts::PostService;
