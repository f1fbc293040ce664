//! Account models shared by the server functions.

mod user;

#[cfg(feature = "server")]
pub use user::User;
pub use user::UserInfo;
