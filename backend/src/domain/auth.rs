//! Login credentials accepted by the authentication flow.
//!
//! Inbound adapters hand raw strings to [`LoginCredentials::try_from_parts`]
//! so that a handler only ever talks to the login port with validated input.

use zeroize::Zeroizing;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

impl LoginValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyEmail => "email",
            Self::EmptyPassword => "password",
        }
    }

    /// Stable machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyEmail => "empty_email",
            Self::EmptyPassword => "empty_password",
        }
    }
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and non-empty. It is not syntax-checked: an address
///   that cannot exist simply matches no account.
/// - `password` is non-empty and keeps caller whitespace so comparisons use
///   exactly what was typed.
///
/// # Examples
/// ```
/// use accounts::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ler@x.com ", "pw1234").unwrap();
/// assert_eq!(creds.email(), "ler@x.com");
/// assert_eq!(creds.password(), "pw1234");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for the account lookup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Candidate password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
