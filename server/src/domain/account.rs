//! Account entity and its value objects.
//!
//! Accounts are the root of the ownership chain: collections belong to an
//! account and documents belong to a collection. The account itself has no
//! ancestor, so its operations carry no scoping beyond the identifier.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Unique identifier for an [`Account`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Construct an identifier from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<AccountId> for String {
    fn from(value: AccountId) -> Self {
        value.to_string()
    }
}

/// Validation errors emitted by [`Handle::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleValidationError {
    /// The handle was empty or contained only whitespace.
    Empty,
}

impl std::fmt::Display for HandleValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "handle must not be empty"),
        }
    }
}

impl std::error::Error for HandleValidationError {}

/// Unique human-readable name claimed by an account.
///
/// # Examples
/// ```
/// use folio_server::domain::Handle;
///
/// let handle = Handle::new("ada").expect("valid handle");
/// assert_eq!(handle.as_ref(), "ada");
/// assert!(Handle::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handle(String);

impl Handle {
    /// Validate and wrap a handle value.
    ///
    /// # Errors
    /// Returns [`HandleValidationError::Empty`] when the value is blank once
    /// trimmed of whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, HandleValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(HandleValidationError::Empty);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Handle> for String {
    fn from(value: Handle) -> Self {
        value.0
    }
}

/// Account record as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    id: AccountId,
    handle: Handle,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Account {
    /// Assemble an account from stored parts.
    #[must_use]
    pub fn new(
        id: AccountId,
        handle: Handle,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            handle,
            created_at,
            updated_at,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Unique handle.
    #[must_use]
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Creation timestamp, immutable after creation.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Timestamp of the most recent successful update.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Return a copy with the handle replaced.
    #[must_use]
    pub fn with_handle(mut self, handle: Handle) -> Self {
        self.handle = handle;
        self
    }

    /// Return a copy with the update timestamp replaced.
    #[must_use]
    pub(crate) fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ada")]
    #[case("ada-lovelace_01")]
    #[case("  padded  ")]
    fn handle_accepts_non_blank_values(#[case] value: &str) {
        let handle = Handle::new(value).expect("valid handle");
        assert_eq!(handle.as_ref(), value);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn handle_rejects_blank_values(#[case] value: &str) {
        assert_eq!(Handle::new(value), Err(HandleValidationError::Empty));
    }

    #[test]
    fn with_handle_preserves_identity_and_timestamps() {
        let created = Utc::now();
        let account = Account::new(
            AccountId::random(),
            Handle::new("before").expect("valid handle"),
            created,
            created,
        );
        let id = account.id();

        let renamed = account.with_handle(Handle::new("after").expect("valid handle"));
        assert_eq!(renamed.id(), id);
        assert_eq!(renamed.handle().as_ref(), "after");
        assert_eq!(renamed.created_at(), created);
    }

    #[test]
    fn account_id_display_matches_uuid() {
        let uuid = Uuid::new_v4();
        assert_eq!(AccountId::from_uuid(uuid).to_string(), uuid.to_string());
    }
}
