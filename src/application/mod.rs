pub mod dashboard;
pub mod predictor;
pub mod search;
