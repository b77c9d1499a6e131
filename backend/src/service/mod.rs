//! Business logic on top of the user store.

mod users;

pub use users::UserService;
