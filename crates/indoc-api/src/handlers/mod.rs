pub mod analytics;
pub mod documents;
pub mod upload;
