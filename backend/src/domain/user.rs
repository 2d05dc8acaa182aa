//! User account model and its validated components.
//!
//! A [`User`] is what the credential store persists. Its password is only
//! ever held as a [`PasswordHash`]; the caller-supplied
//! [`PlaintextPassword`] exists just long enough to be hashed or compared.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use zeroize::Zeroizing;

/// Validation errors returned by the user component constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must be a positive integer")]
    InvalidId,
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("username must be at most {max} characters")]
    UsernameTooLong { max: usize },
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("email must be at most {max} characters")]
    EmailTooLong { max: usize },
    #[error("email must be a valid email address")]
    InvalidEmail,
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("password hash must not be empty")]
    EmptyPasswordHash,
    #[error("at least one of username, email or password must be supplied")]
    NoChanges,
}

impl UserValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::EmptyUsername | Self::UsernameTooLong { .. } => "username",
            Self::EmptyEmail | Self::EmailTooLong { .. } | Self::InvalidEmail => "email",
            Self::PasswordTooShort { .. } | Self::EmptyPasswordHash => "password",
            Self::NoChanges => "body",
        }
    }

    /// Stable machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::EmptyUsername => "empty_username",
            Self::UsernameTooLong { .. } => "username_too_long",
            Self::EmptyEmail => "empty_email",
            Self::EmailTooLong { .. } => "email_too_long",
            Self::InvalidEmail => "invalid_email",
            Self::PasswordTooShort { .. } => "password_too_short",
            Self::EmptyPasswordHash => "empty_password_hash",
            Self::NoChanges => "no_changes",
        }
    }
}

/// Store-assigned user identifier.
///
/// ## Invariants
/// - Always strictly positive, matching a PostgreSQL `SERIAL` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(i32);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: i32) -> Result<Self, UserValidationError> {
        if id <= 0 {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Parse an identifier from its decimal text form, e.g. a path segment.
    pub fn parse(raw: &str) -> Result<Self, UserValidationError> {
        let id = raw
            .trim()
            .parse::<i32>()
            .map_err(|_| UserValidationError::InvalidId)?;
        Self::new(id)
    }

    /// Underlying integer value.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum length, in characters, of username and email columns.
pub const TEXT_COLUMN_MAX: usize = 255;

/// Account username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`]; surrounding whitespace is trimmed.
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = username.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > TEXT_COLUMN_MAX {
            return Err(UserValidationError::UsernameTooLong {
                max: TEXT_COLUMN_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // One `@`, no whitespace, and a dotted domain with a non-empty TLD.
        let pattern = r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Unique account email address.
///
/// Comparison is case-sensitive; the address is stored as given apart from
/// trimming surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if trimmed.chars().count() > TEXT_COLUMN_MAX {
            return Err(UserValidationError::EmailTooLong {
                max: TEXT_COLUMN_MAX,
            });
        }
        if !email_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Minimum password length accepted from callers.
pub const PASSWORD_MIN: usize = 4;

/// Caller-supplied password awaiting hashing.
///
/// The buffer is zeroed on drop and `Debug` never prints it. Whitespace is
/// preserved as typed.
#[derive(Clone, PartialEq, Eq)]
pub struct PlaintextPassword(Zeroizing<String>);

impl PlaintextPassword {
    /// Validate and construct a [`PlaintextPassword`].
    pub fn new(password: impl Into<String>) -> Result<Self, UserValidationError> {
        let password = Zeroizing::new(password.into());
        if password.chars().count() < PASSWORD_MIN {
            return Err(UserValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self(password))
    }

    /// Expose the secret for hashing or verification.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PlaintextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlaintextPassword(<redacted>)")
    }
}

/// One-way salted hash of a password, in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a password hasher or read from storage.
    pub fn new(encoded: impl Into<String>) -> Result<Self, UserValidationError> {
        let encoded = encoded.into();
        if encoded.trim().is_empty() {
            return Err(UserValidationError::EmptyPasswordHash);
        }
        Ok(Self(encoded))
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Persisted user account.
///
/// ## Invariants
/// - `password_hash` is always a salted hash, never caller plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    email: EmailAddress,
    password_hash: PasswordHash,
}

impl User {
    /// Assemble a user from validated components.
    pub fn new(
        id: UserId,
        username: Username,
        email: EmailAddress,
        password_hash: PasswordHash,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Account username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Unique email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Stored password hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}

/// Validated input for creating an account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub email: EmailAddress,
    pub password: PlaintextPassword,
}

impl NewUser {
    /// Validate raw create-request fields.
    ///
    /// # Examples
    /// ```
    /// use accounts::domain::NewUser;
    ///
    /// let user = NewUser::try_from_parts("Ler", "ler@x.com", "pw1234").unwrap();
    /// assert_eq!(user.email.as_ref(), "ler@x.com");
    /// assert!(NewUser::try_from_parts("Ler", "ler@x.com", "pw").is_err());
    /// ```
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            email: EmailAddress::new(email)?,
            password: PlaintextPassword::new(password)?,
        })
    }
}

/// Validated partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<Username>,
    pub email: Option<EmailAddress>,
    pub password: Option<PlaintextPassword>,
}

impl UserChanges {
    /// Validate raw update-request fields, rejecting an empty change set.
    pub fn try_from_parts(
        username: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, UserValidationError> {
        let changes = Self {
            username: username.map(Username::new).transpose()?,
            email: email.map(EmailAddress::new).transpose()?,
            password: password.map(PlaintextPassword::new).transpose()?,
        };
        if changes.is_empty() {
            return Err(UserValidationError::NoChanges);
        }
        Ok(changes)
    }

    /// True when no field is being changed.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.password.is_none()
    }
}
