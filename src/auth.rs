//! Access credentials for the business customer shipping web service.
//!
//! The service authenticates on two levels: the *application* (id and token,
//! sent as HTTP basic auth on every request) and the *account* (user and
//! signature, sent as a SOAP header). Both pairs are supplied once when the
//! service is built and are read-only afterwards.

use std::fmt;

/// Immutable credential storage for one web service account.
///
/// The `Debug` implementation redacts the application token and the account
/// signature so that credentials cannot leak through logging or error
/// formatting.
///
/// # Examples
///
/// ```
/// use frachtwerk::AuthenticationStorage;
///
/// let auth = AuthenticationStorage::new(
///     "my_app_id",
///     "app_token",
///     "2222222222_01",
///     "pass",
/// );
///
/// assert_eq!(auth.user(), "2222222222_01");
/// assert!(!format!("{:?}", auth).contains("app_token"));
/// ```
#[derive(Clone)]
pub struct AuthenticationStorage {
    application_id: String,
    application_token: String,
    user: String,
    signature: String,
}

impl AuthenticationStorage {
    /// Creates a new credential store.
    pub fn new(
        application_id: impl Into<String>,
        application_token: impl Into<String>,
        user: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            application_id: application_id.into(),
            application_token: application_token.into(),
            user: user.into(),
            signature: signature.into(),
        }
    }

    /// The application id registered in the carrier's developer portal.
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// The token belonging to the application id.
    pub fn application_token(&self) -> &str {
        &self.application_token
    }

    /// The business customer user name (EKP plus participation suffix).
    pub fn user(&self) -> &str {
        &self.user
    }

    /// The signature (password) belonging to the user.
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

impl fmt::Debug for AuthenticationStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticationStorage")
            .field("application_id", &self.application_id)
            .field("application_token", &"<redacted>")
            .field("user", &self.user)
            .field("signature", &"<redacted>")
            .finish()
    }
}
