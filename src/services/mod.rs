pub mod chart_backend;
pub mod chart_service;
pub mod market_service;
