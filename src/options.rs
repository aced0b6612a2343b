use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::document;
use crate::error::{DocumentError, DocumentResult};

/// Signing alias reported when the document carries no `algorithm` key.
pub const DEFAULT_ALGORITHM: &str = "HS256";

const ALGORITHM: &str = "algorithm";
const EXPIRES_IN_MINUTES: &str = "expiresInMinutes";
const EXPIRES_IN_SECONDS: &str = "expiresInSeconds";
const AUDIENCE: &str = "audience";
const SUBJECT: &str = "subject";
const ISSUER: &str = "issuer";
const NO_TIMESTAMP: &str = "noTimestamp";
const HEADER: &str = "header";
const PERMISSIONS: &str = "permissions";

const RECOGNIZED_KEYS: [&str; 9] = [
    ALGORITHM,
    EXPIRES_IN_MINUTES,
    EXPIRES_IN_SECONDS,
    AUDIENCE,
    SUBJECT,
    ISSUER,
    NO_TIMESTAMP,
    HEADER,
    PERMISSIONS,
];

/// Options a JWT engine reads when signing, encoding, or validating tokens.
///
/// All state lives in a single JSON document; the typed accessors are views
/// over it, and unrecognized keys ride along untouched so the projection
/// handed to the signer carries everything the source document did. Mutators
/// consume and return the value for chaining:
///
/// ```
/// use jwt_options::JwtOptions;
///
/// let options = JwtOptions::new()
///     .set_algorithm("RS256")
///     .set_issuer("issuer.example")
///     .add_audience("svc-a")
///     .set_expires_in_seconds(3600);
///
/// assert_eq!(options.algorithm().unwrap(), "RS256");
/// ```
///
/// The options object validates nothing: unknown algorithm aliases, coexisting
/// minute/second lifetimes, and empty audiences are all stored as given and
/// judged by the signer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct JwtOptions {
    document: Map<String, Value>,
}

impl JwtOptions {
    /// Empty options; every accessor reports its default or absence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing document. The map is taken by value, so no aliased
    /// handle survives outside the options; callers keep a copy by cloning
    /// before the move.
    pub fn from_document(document: Map<String, Value>) -> Self {
        let unrecognized: Vec<&str> = document
            .keys()
            .filter(|key| !RECOGNIZED_KEYS.contains(&key.as_str()))
            .map(String::as_str)
            .collect();
        if !unrecognized.is_empty() {
            debug!(keys = ?unrecognized, "options document retains unrecognized keys");
        }
        Self { document }
    }

    /// Signing algorithm alias; [`DEFAULT_ALGORITHM`] when the key is absent.
    ///
    /// The alias is one of {HS256, HS384, HS512, RS256, RS384, RS512, ES256,
    /// ES384, ES512}; membership is not enforced here, the signer rejects
    /// unknown aliases.
    pub fn algorithm(&self) -> DocumentResult<&str> {
        Ok(document::get_str(&self.document, ALGORITHM)?.unwrap_or(DEFAULT_ALGORITHM))
    }

    /// Token lifetime in minutes.
    pub fn expires_in_minutes(&self) -> DocumentResult<Option<i64>> {
        document::get_i64(&self.document, EXPIRES_IN_MINUTES)
    }

    /// Token lifetime in seconds. May coexist with the minutes variant;
    /// precedence between the two is the signer's decision.
    pub fn expires_in_seconds(&self) -> DocumentResult<Option<i64>> {
        document::get_i64(&self.document, EXPIRES_IN_SECONDS)
    }

    /// Target audiences (`aud` claim), in insertion order.
    pub fn audience(&self) -> DocumentResult<Option<Vec<&str>>> {
        document::get_string_array(&self.document, AUDIENCE)
    }

    /// `sub` claim.
    pub fn subject(&self) -> DocumentResult<Option<&str>> {
        document::get_str(&self.document, SUBJECT)
    }

    /// `iss` claim.
    pub fn issuer(&self) -> DocumentResult<Option<&str>> {
        document::get_str(&self.document, ISSUER)
    }

    /// When true the signer suppresses the issued-at (`iat`) claim.
    pub fn no_timestamp(&self) -> DocumentResult<bool> {
        Ok(document::get_bool(&self.document, NO_TIMESTAMP)?.unwrap_or(false))
    }

    /// Extra JOSE header entries, borrowed from the live backing document.
    pub fn header(&self) -> DocumentResult<Option<&Map<String, Value>>> {
        document::get_object(&self.document, HEADER)
    }

    /// Authorization scopes attached to the token, in insertion order.
    pub fn permissions(&self) -> DocumentResult<Option<Vec<&str>>> {
        document::get_string_array(&self.document, PERMISSIONS)
    }

    /// Store the signing algorithm alias, verbatim.
    pub fn set_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.document
            .insert(ALGORITHM.to_owned(), Value::String(algorithm.into()));
        self
    }

    /// Set the token lifetime in minutes. `None` removes the key instead of
    /// storing null.
    pub fn set_expires_in_minutes(mut self, minutes: impl Into<Option<i64>>) -> Self {
        match minutes.into() {
            Some(minutes) => {
                self.document
                    .insert(EXPIRES_IN_MINUTES.to_owned(), Value::from(minutes));
            }
            None => {
                self.document.shift_remove(EXPIRES_IN_MINUTES);
            }
        }
        self
    }

    /// Set the token lifetime in seconds. `None` removes the key instead of
    /// storing null.
    pub fn set_expires_in_seconds(mut self, seconds: impl Into<Option<i64>>) -> Self {
        match seconds.into() {
            Some(seconds) => {
                self.document
                    .insert(EXPIRES_IN_SECONDS.to_owned(), Value::from(seconds));
            }
            None => {
                self.document.shift_remove(EXPIRES_IN_SECONDS);
            }
        }
        self
    }

    /// Replace the audience list with a fresh one built from the input, in
    /// iteration order.
    pub fn set_audience<I, S>(mut self, audience: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.document
            .insert(AUDIENCE.to_owned(), string_array(audience));
        self
    }

    /// Append one audience entry, creating the list on first use. Duplicates
    /// are kept.
    pub fn add_audience(mut self, audience: impl Into<String>) -> Self {
        push_string(&mut self.document, AUDIENCE, audience.into());
        self
    }

    /// `sub` claim. Stored verbatim, empty strings included.
    pub fn set_subject(mut self, subject: impl Into<String>) -> Self {
        self.document
            .insert(SUBJECT.to_owned(), Value::String(subject.into()));
        self
    }

    /// `iss` claim. Stored verbatim, empty strings included.
    pub fn set_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.document
            .insert(ISSUER.to_owned(), Value::String(issuer.into()));
        self
    }

    /// Suppress (or restore) generation of the issued-at claim.
    pub fn set_no_timestamp(mut self, no_timestamp: bool) -> Self {
        self.document
            .insert(NO_TIMESTAMP.to_owned(), Value::Bool(no_timestamp));
        self
    }

    /// Merge one entry into the extra JOSE header, creating the object on
    /// first use and overwriting a prior entry under the same name.
    pub fn add_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        insert_string(&mut self.document, HEADER, name.into(), value.into());
        self
    }

    /// Replace the permissions list with a fresh one built from the input,
    /// in iteration order.
    pub fn set_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.document
            .insert(PERMISSIONS.to_owned(), string_array(permissions));
        self
    }

    /// Append one permission, creating the list on first use. Duplicates are
    /// kept.
    pub fn add_permission(mut self, permission: impl Into<String>) -> Self {
        push_string(&mut self.document, PERMISSIONS, permission.into());
        self
    }

    /// The live backing document. This borrows the store itself, never a
    /// copy; callers needing isolation clone it.
    pub fn document(&self) -> &Map<String, Value> {
        &self.document
    }

    /// Consume the options and hand the backing document to the caller.
    pub fn into_document(self) -> Map<String, Value> {
        self.document
    }
}

impl From<Map<String, Value>> for JwtOptions {
    fn from(document: Map<String, Value>) -> Self {
        Self::from_document(document)
    }
}

impl TryFrom<Value> for JwtOptions {
    type Error = DocumentError;

    fn try_from(value: Value) -> DocumentResult<Self> {
        match value {
            Value::Object(document) => Ok(Self::from_document(document)),
            other => Err(DocumentError::NotAnObject {
                found: document::type_name(&other),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for JwtOptions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Map::<String, Value>::deserialize(deserializer).map(Self::from_document)
    }
}

fn string_array<I, S>(items: I) -> Value
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Value::Array(
        items
            .into_iter()
            .map(|item| Value::String(item.into()))
            .collect(),
    )
}

// Mutators stay total on corrupted documents: a non-container value under
// the key is replaced by a fresh container.
fn push_string(document: &mut Map<String, Value>, key: &str, value: String) {
    let entry = document
        .entry(key)
        .or_insert_with(|| Value::Array(Vec::new()));
    match entry {
        Value::Array(items) => items.push(Value::String(value)),
        other => *other = Value::Array(vec![Value::String(value)]),
    }
}

fn insert_string(document: &mut Map<String, Value>, key: &str, name: String, value: String) {
    let entry = document
        .entry(key)
        .or_insert_with(|| Value::Object(Map::new()));
    match entry {
        Value::Object(map) => {
            map.insert(name, Value::String(value));
        }
        other => {
            let mut map = Map::new();
            map.insert(name, Value::String(value));
            *other = Value::Object(map);
        }
    }
}
