pub mod eligibility;
pub mod error;
pub mod opinions;
pub mod reviews;
pub mod service;
pub mod store;
pub mod users;
pub mod validation;

pub mod types;

pub use crate::error::ServiceError;
pub use crate::service::ReviewService;
pub use crate::store::Store;
