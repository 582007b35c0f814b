//! Normalization of tool results into record collections.
//!
//! The agent runtime hands renderers whatever a tool returned, and tools are
//! not consistent about shape: a bare array, an object wrapping the array, a
//! single record, or nothing at all. [`Payload`] resolves that ambiguity once,
//! and [`validate`] turns the resulting elements into typed records while
//! counting what had to be dropped.
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Keys under which tools wrap their collections
pub const WRAPPER_KEYS: &[&str] = &["appointments", "history"];

/// Field whose presence marks a bare object as a single record
pub const IDENTITY_FIELD: &str = "id";

/// A tool result after its shape has been resolved
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Collection(Vec<Value>),
    Single(Value),
    Empty,
}

impl Payload {
    pub fn classify(value: &Value) -> Self {
        match value {
            Value::Array(items) => Payload::Collection(items.clone()),
            Value::Object(obj) => {
                if let Some(items) = WRAPPER_KEYS
                    .iter()
                    .find_map(|key| obj.get(*key).and_then(Value::as_array))
                {
                    Payload::Collection(items.clone())
                } else if has_identity(value) {
                    Payload::Single(value.clone())
                } else {
                    Payload::Empty
                }
            }
            _ => Payload::Empty,
        }
    }

    pub fn into_items(self) -> Vec<Value> {
        match self {
            Payload::Collection(items) => items,
            Payload::Single(record) => vec![record],
            Payload::Empty => Vec::new(),
        }
    }
}

/// Resolve any value into an ordered list of elements. Never fails.
pub fn normalize(value: &Value) -> Vec<Value> {
    let payload = Payload::classify(value);
    tracing::debug!(
        shape = match &payload {
            Payload::Collection(items) => format!("collection({})", items.len()),
            Payload::Single(_) => "single".to_string(),
            Payload::Empty => "empty".to_string(),
        },
        "normalized tool payload"
    );
    payload.into_items()
}

/// Records that survived validation, and how many elements did not
#[derive(Debug, Clone, PartialEq)]
pub struct Validated<T> {
    pub records: Vec<T>,
    pub rejected: usize,
}

impl<T> Validated<T> {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

impl<T> Default for Validated<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            rejected: 0,
        }
    }
}

/// Decode elements into records. Nulls, elements refused by `accept`, and
/// elements that do not decode are dropped and counted, never raised.
pub fn validate<T, F>(items: Vec<Value>, accept: F) -> Validated<T>
where
    T: DeserializeOwned,
    F: Fn(&Value) -> bool,
{
    let mut validated = Validated::default();
    for (index, item) in items.into_iter().enumerate() {
        if item.is_null() || !accept(&item) {
            tracing::debug!(index, "dropping malformed element");
            validated.rejected += 1;
            continue;
        }
        match serde_json::from_value::<T>(item) {
            Ok(record) => validated.records.push(record),
            Err(e) => {
                tracing::debug!(index, error = %e, "dropping undecodable element");
                validated.rejected += 1;
            }
        }
    }
    if validated.rejected > 0 {
        tracing::warn!(
            kept = validated.records.len(),
            rejected = validated.rejected,
            "tool payload contained malformed records"
        );
    }
    validated
}

/// Normalize then validate in one step
pub fn collect<T, F>(value: &Value, accept: F) -> Validated<T>
where
    T: DeserializeOwned,
    F: Fn(&Value) -> bool,
{
    validate(normalize(value), accept)
}

/// Whether an element carries a usable identifier. Zero, `false`, empty
/// strings and null do not count; whitespace does.
pub fn has_identity(value: &Value) -> bool {
    is_truthy(value.get(IDENTITY_FIELD))
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(_) => true,
    }
}
