//! Session verification and admin authorization.

use axum::http::Method;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;

use crate::config::BlogSettings;
use crate::domain::entities::Identity;
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "blog_session";

/// Result of checking a caller against an admin-only route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAccess {
    Allowed(Identity),
    /// Anonymous browser navigation; send the caller to this login URL.
    RedirectToLogin(String),
    Forbidden,
}

/// Verifies session cookies and decides admin access.
///
/// A session cookie value is `<base64url(email)>.<hex HMAC-SHA256(email)>`,
/// keyed by `SESSION_SECRET`. The identity provider that sets it is external;
/// `admin session issue` mints one for operators.
pub struct AuthService {
    session_secret: String,
    admin_emails: Vec<String>,
    login_url: String,
}

impl AuthService {
    pub fn new(session_secret: String, settings: &BlogSettings) -> Self {
        Self {
            session_secret,
            admin_emails: settings.admin_emails.clone(),
            login_url: settings.login_url.clone(),
        }
    }

    fn mac(&self) -> Result<HmacSha256, AppError> {
        HmacSha256::new_from_slice(self.session_secret.as_bytes()).map_err(|e| {
            AppError::internal("Invalid session secret", json!({ "reason": e.to_string() }))
        })
    }

    /// Mints a session cookie value for `email`.
    pub fn issue_session(&self, email: &str) -> Result<String, AppError> {
        let email = email.trim().to_ascii_lowercase();
        if email.is_empty() {
            return Err(AppError::bad_request("Email is required", json!({})));
        }

        let mut mac = self.mac()?;
        mac.update(email.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        Ok(format!("{}.{}", URL_SAFE_NO_PAD.encode(&email), signature))
    }

    /// Returns the e-mail address named by a valid session value.
    pub fn verify_session(&self, value: &str) -> Option<String> {
        let (encoded, signature) = value.split_once('.')?;
        let email = String::from_utf8(URL_SAFE_NO_PAD.decode(encoded).ok()?).ok()?;
        let signature = hex::decode(signature).ok()?;

        let mut mac = self.mac().ok()?;
        mac.update(email.as_bytes());
        mac.verify_slice(&signature).ok()?;

        Some(email)
    }

    /// Resolves the caller from a raw `Cookie` header.
    pub fn identify(&self, cookie_header: Option<&str>) -> Option<Identity> {
        let value = cookie_header?.split(';').find_map(|cookie| {
            match cookie.trim().split_once('=') {
                Some((SESSION_COOKIE, value)) => Some(value),
                _ => None,
            }
        })?;

        let email = self.verify_session(value)?;
        Some(Identity {
            is_admin: self.is_admin(&email),
            email,
        })
    }

    pub fn is_admin(&self, email: &str) -> bool {
        let email = email.to_ascii_lowercase();
        self.admin_emails.iter().any(|admin| *admin == email)
    }

    /// Login URL that returns the caller to `continue_url` afterwards.
    pub fn login_url(&self, continue_url: &str) -> String {
        let separator = if self.login_url.contains('?') { '&' } else { '?' };
        let encoded: String = url::form_urlencoded::byte_serialize(continue_url.as_bytes()).collect();
        format!("{}{}continue={}", self.login_url, separator, encoded)
    }

    /// Decides whether a caller may use an admin route.
    ///
    /// Anonymous `GET` requests are sent to the login page; any other anonymous
    /// request and every non-admin request is forbidden.
    pub fn authorize(
        &self,
        identity: Option<Identity>,
        method: &Method,
        continue_url: &str,
    ) -> AdminAccess {
        match identity {
            Some(identity) if identity.is_admin => AdminAccess::Allowed(identity),
            Some(_) => AdminAccess::Forbidden,
            None if *method == Method::GET => {
                AdminAccess::RedirectToLogin(self.login_url(continue_url))
            }
            None => AdminAccess::Forbidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        let settings = BlogSettings {
            admin_emails: vec!["admin@example.com".to_string()],
            login_url: "https://login.example.com/signin".to_string(),
            ..BlogSettings::default()
        };
        AuthService::new("test-session-secret".to_string(), &settings)
    }

    fn cookie(value: &str) -> String {
        format!("theme=dark; {}={}", SESSION_COOKIE, value)
    }

    #[test]
    fn test_issue_and_verify_session() {
        let service = service();
        let value = service.issue_session("Admin@Example.com").unwrap();
        assert_eq!(
            service.verify_session(&value).as_deref(),
            Some("admin@example.com")
        );
    }

    #[test]
    fn test_verify_rejects_tampered_session() {
        let service = service();
        let value = service.issue_session("reader@example.com").unwrap();
        let (_, signature) = value.split_once('.').unwrap();
        let forged = format!("{}.{}", URL_SAFE_NO_PAD.encode("admin@example.com"), signature);

        assert!(service.verify_session(&forged).is_none());
        assert!(service.verify_session("garbage").is_none());
    }

    #[test]
    fn test_verify_rejects_other_secret() {
        let value = service().issue_session("admin@example.com").unwrap();
        let other = AuthService::new("other-secret".to_string(), &BlogSettings::default());
        assert!(other.verify_session(&value).is_none());
    }

    #[test]
    fn test_identify_from_cookie_header() {
        let service = service();
        let admin = service.issue_session("admin@example.com").unwrap();
        let reader = service.issue_session("reader@example.com").unwrap();

        let identity = service.identify(Some(&cookie(&admin))).unwrap();
        assert!(identity.is_admin);
        assert_eq!(identity.email, "admin@example.com");

        let identity = service.identify(Some(&cookie(&reader))).unwrap();
        assert!(!identity.is_admin);

        assert!(service.identify(Some("theme=dark")).is_none());
        assert!(service.identify(None).is_none());
    }

    #[test]
    fn test_login_url_encodes_continue() {
        assert_eq!(
            service().login_url("https://blog.example.com/compose?key=1"),
            "https://login.example.com/signin?continue=https%3A%2F%2Fblog.example.com%2Fcompose%3Fkey%3D1"
        );
    }

    #[test]
    fn test_authorize() {
        let service = service();
        let admin = Identity {
            email: "admin@example.com".to_string(),
            is_admin: true,
        };
        let reader = Identity {
            email: "reader@example.com".to_string(),
            is_admin: false,
        };
        let url = "https://blog.example.com/compose";

        assert_eq!(
            service.authorize(Some(admin.clone()), &Method::POST, url),
            AdminAccess::Allowed(admin)
        );
        assert_eq!(
            service.authorize(Some(reader), &Method::GET, url),
            AdminAccess::Forbidden
        );
        assert_eq!(
            service.authorize(None, &Method::POST, url),
            AdminAccess::Forbidden
        );
        assert!(matches!(
            service.authorize(None, &Method::GET, url),
            AdminAccess::RedirectToLogin(login) if login.starts_with("https://login.example.com/signin?continue=")
        ));
    }
}
