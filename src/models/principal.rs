use serde::{Deserialize, Serialize};

/// An authenticated user identity as reported by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Principal {
    pub uid: String,
    pub email: String,
}
