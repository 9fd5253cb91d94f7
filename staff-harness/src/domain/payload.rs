use rand::Rng;
use serde::Serialize;
use serde_json::{Map, Value};

pub const OFFICE_ID: &str = "officeId";
pub const FIRSTNAME: &str = "firstname";
pub const LASTNAME: &str = "lastname";
pub const MOBILE_NO: &str = "mobileNo";
pub const IS_ACTIVE: &str = "isActive";

pub const FIRSTNAME_PREFIX: &str = "michael_";
pub const LASTNAME_PREFIX: &str = "Doe_";
pub const MOBILE_NO_PREFIX: &str = "num_";

const NAME_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// `prefix` followed by `suffix_len` random uppercase letters.
pub fn random_name(prefix: &str, suffix_len: usize) -> String {
    let mut rng = rand::thread_rng();
    let mut name = String::with_capacity(prefix.len() + suffix_len);
    name.push_str(prefix);
    for _ in 0..suffix_len {
        let idx = rng.gen_range(0..NAME_ALPHABET.len());
        name.push(char::from(NAME_ALPHABET[idx]));
    }
    name
}

/// A random name of exactly `total_len` characters starting with `prefix`.
///
/// Falls back to the bare prefix when it is already longer than `total_len`.
pub fn random_name_of_len(prefix: &str, total_len: usize) -> String {
    random_name(prefix, total_len.saturating_sub(prefix.chars().count()))
}

/// JSON body for `POST /staff`.
///
/// Kept untyped on purpose: the validation scenarios need payloads that a
/// typed request struct could not express, such as a missing `officeId`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StaffPayload {
    fields: Map<String, Value>,
}

impl StaffPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// The well-formed payload every create scenario starts from.
    pub fn valid(office_id: i64) -> Self {
        Self::new()
            .with(OFFICE_ID, office_id)
            .with(FIRSTNAME, random_name(FIRSTNAME_PREFIX, 5))
            .with(LASTNAME, random_name(LASTNAME_PREFIX, 4))
            .with(IS_ACTIVE, true)
    }

    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: &str, value: impl Into<Value>) {
        self.fields.insert(field.to_owned(), value.into());
    }

    /// Keeps only the named fields, dropping everything else.
    pub fn only(mut self, keep: &[&str]) -> Self {
        self.fields.retain(|k, _| keep.contains(&k.as_str()));
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn office_id(&self) -> Option<i64> {
        self.get(OFFICE_ID).and_then(Value::as_i64)
    }

    /// Character length of a string field, `None` if absent or not a string.
    pub fn str_len(&self, field: &str) -> Option<usize> {
        self.get(field)
            .and_then(Value::as_str)
            .map(|s| s.chars().count())
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}
