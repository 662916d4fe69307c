//! Caller identity resolved from a verified session.

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
    pub is_admin: bool,
}
