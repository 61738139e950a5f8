use casket_types::ObjectId;
use serde::{Deserialize, Serialize};

/// Descriptor returned by a successful write.
///
/// Serializes as `{"size": <bytes>, "oid": "<hex>"}`, which is the body of a
/// `201 Created` response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrittenObject {
    /// Length of the stored bytes.
    pub size: u64,
    /// Content-addressed id the bytes were stored under.
    pub oid: ObjectId,
}

impl WrittenObject {
    pub fn new(oid: ObjectId, data: &[u8]) -> Self {
        Self {
            size: data.len() as u64,
            oid,
        }
    }
}
