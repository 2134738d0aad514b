// Canonical hashing for cache addressing.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
#[cfg(feature = "observability")]
use tracing::trace;

use super::error::{HashError, HashResult};
use super::serializer;

/// Pure hasher turning serializable values into stable SHA-256 hex digests.
///
/// The value is lowered into a `serde_json::Value` tree and written back out
/// compactly with object keys sorted bytewise at every level, so two values
/// that differ only in map iteration order produce the same bytes. Key order
/// is imposed here rather than taken from `serde_json::Map`, whose ordering
/// changes when any crate in the build enables `preserve_order`.
///
/// Floating point numbers are rejected outright, NaN and infinities included,
/// since their textual form is not a reliable identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalHasher;

impl CanonicalHasher {
    pub fn new() -> Self {
        Self
    }

    /// Canonical byte representation of `value`.
    pub fn canonical_bytes<T>(&self, value: &T) -> HashResult<Vec<u8>>
    where
        T: Serialize + ?Sized,
    {
        let tree = serializer::to_value(value)?;
        let mut out = Vec::new();
        write_canonical(&tree, &mut out)?;
        Ok(out)
    }

    /// Lowercase hex digest of the canonical form of `value`.
    pub fn digest<T>(&self, value: &T) -> HashResult<String>
    where
        T: Serialize + ?Sized,
    {
        let bytes = self.canonical_bytes(value)?;
        #[cfg(feature = "observability")]
        trace!(canonical_len = bytes.len(), "hashing canonical value");
        Ok(self.digest_bytes(&bytes))
    }

    pub fn digest_bytes(&self, bytes: &[u8]) -> String {
        hex::encode(Sha256::digest(bytes))
    }
}

/// Digest `value` with the default hasher.
pub fn digest<T>(value: &T) -> HashResult<String>
where
    T: Serialize + ?Sized,
{
    CanonicalHasher::new().digest(value)
}

fn write_canonical(value: &Value, out: &mut Vec<u8>) -> HashResult<()> {
    match value {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(true) => out.extend_from_slice(b"true"),
        Value::Bool(false) => out.extend_from_slice(b"false"),
        Value::Number(number) => out.extend_from_slice(number.to_string().as_bytes()),
        Value::String(text) => write_string(text, out)?,
        Value::Array(items) => {
            out.push(b'[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push(b',');
                }
                write_canonical(item, out)?;
            }
            out.push(b']');
        }
        Value::Object(fields) => {
            let mut entries: Vec<(&String, &Value)> = fields.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

            out.push(b'{');
            for (index, (key, item)) in entries.into_iter().enumerate() {
                if index > 0 {
                    out.push(b',');
                }
                write_string(key, out)?;
                out.push(b':');
                write_canonical(item, out)?;
            }
            out.push(b'}');
        }
    }
    Ok(())
}

fn write_string(text: &str, out: &mut Vec<u8>) -> HashResult<()> {
    serde_json::to_writer(&mut *out, text).map_err(|err| HashError::Serialization(err.to_string()))
}
