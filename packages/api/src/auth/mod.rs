//! Authentication for local email + password accounts.

#[cfg(feature = "server")]
mod accounts;
#[cfg(feature = "server")]
mod password;
#[cfg(feature = "server")]
mod session;

#[cfg(feature = "server")]
pub use accounts::{authenticate, create_account, find_user, normalize_email};
#[cfg(feature = "server")]
pub use password::{hash_password, verify_password};
#[cfg(feature = "server")]
pub use session::{current_user_id, remember_user, SESSION_USER_ID_KEY};
