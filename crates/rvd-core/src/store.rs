use crate::opinions::OpinionRepository;
use crate::reviews::ReviewRepository;
use crate::users::UserRepository;
use crate::ServiceError;

pub trait Store {
    type Reviews<'a>: ReviewRepository
    where
        Self: 'a;
    type Opinions<'a>: OpinionRepository
    where
        Self: 'a;
    type Users<'a>: UserRepository
    where
        Self: 'a;

    fn reviews(&self) -> Self::Reviews<'_>;
    fn opinions(&self) -> Self::Opinions<'_>;
    fn users(&self) -> Self::Users<'_>;

    /// Runs `f` inside one all-or-nothing transaction. Every
    /// read-check-write sequence that touches counters and opinion rows
    /// must go through here.
    fn with_tx<F, T>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&Self) -> Result<T, ServiceError>;
}
