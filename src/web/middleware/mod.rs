//! Web-specific middleware.
//!
//! - [`admin_guard`] - Gates admin routes behind an administrator session
//! - [`sup_header`] - `X-SUP-ID` on `HEAD` feed requests

pub mod admin_guard;
pub mod sup_header;
