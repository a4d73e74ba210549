use serde::{Deserialize, Serialize};

/// A registration form. Every field is mandatory; missing fields deserialize as empty strings and are rejected by
/// [`crate::AuthApi::register`] with a field-specific message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
    /// The answer to the security question, used to recover a forgotten password.
    pub answer: String,
}

/// Requested profile changes. Absent or blank fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}
