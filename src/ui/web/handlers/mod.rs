pub mod analysis;
pub mod dashboard;
pub mod health;
pub mod performance;
pub mod predict;
pub mod risk_factors;
