pub mod export;
pub mod model;
pub mod store;
pub mod validation;
