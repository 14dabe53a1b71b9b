pub mod auth;
pub mod dashboard;
pub mod documents;
pub mod quotes;
