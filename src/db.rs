pub mod user_repo;
pub use user_repo::UserRepository;
pub mod quote_repo;
pub use quote_repo::QuoteRepository;
