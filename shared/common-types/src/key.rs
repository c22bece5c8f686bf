use std::fmt;

use uuid::Uuid;

/// Namespace every upload key lives under unless `KEY_PREFIX` overrides it
pub const DEFAULT_KEY_PREFIX: &str = "uploads/userdata/pdftestresults/";

/// Longest sanitized filename kept in a key
pub const MAX_FILENAME_LEN: usize = 200;

/// Name used when nothing usable is left of the client's filename
pub const FALLBACK_FILENAME: &str = "upload";

/// Reduces a client-supplied filename to something safe inside an S3 key
///
/// Only the last path segment survives (both `/` and `\` count as
/// separators). Every character outside `[A-Za-z0-9_.-]` becomes `_` and the
/// result is capped at [`MAX_FILENAME_LEN`] characters.
#[must_use]
pub fn sanitize_filename(filename: &str) -> String {
    let basename = filename
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();

    if basename.is_empty() {
        return FALLBACK_FILENAME.to_string();
    }

    basename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_FILENAME_LEN)
        .collect()
}

/// Storage key of a single upload: `<prefix><user-id>-<token>-<filename>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    /// Builds a key from already-resolved parts
    ///
    /// `filename` is sanitized here, so callers pass the raw client value.
    #[must_use]
    pub fn compose(prefix: &str, user_id: &str, token: Uuid, filename: &str) -> Self {
        let safe_name = sanitize_filename(filename);
        Self(format!("{prefix}{user_id}-{token}-{safe_name}"))
    }

    /// Builds a key with a freshly generated random token
    #[must_use]
    pub fn generate(prefix: &str, user_id: &str, filename: &str) -> Self {
        Self::compose(prefix, user_id, Uuid::new_v4(), filename)
    }

    /// The key as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key, returning the owned string
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
