pub mod analytics;
pub mod enums;
pub mod ids;
pub mod io;
pub mod opinion;
pub mod review;
pub mod upstream;
pub mod user;

pub use analytics::{AuthorAverageMark, BestAndWorstReviews, EventAverageMark, EventIndicators};
pub use enums::Label;
pub use ids::{EventId, OpinionId, ReviewId, UserId};
pub use opinion::Opinion;
pub use review::Review;
pub use upstream::EventSnapshot;
pub use user::UserSnapshot;
