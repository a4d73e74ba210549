mod password;
mod slug;
mod validation;

pub use password::{hash_secret, verify_secret, PasswordError};
pub use slug::slugify;
pub use validation::is_valid_email;
