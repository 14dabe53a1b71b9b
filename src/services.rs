pub mod auth;
pub mod dashboard_service;
pub mod document_service;
pub mod quote_service;
