pub mod opinion_repo;
pub mod review_repo;
pub mod schema;
pub mod store;
pub mod user_repo;
pub mod util;
