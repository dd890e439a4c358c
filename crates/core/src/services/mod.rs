pub mod date_service;
pub mod filter_service;
