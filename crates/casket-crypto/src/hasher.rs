use casket_types::ObjectId;

/// BLAKE3 content hasher.
///
/// [`ContentHasher::OBJECT`] hashes the bytes exactly as given, so an object's
/// id equals its plain BLAKE3 digest and can be checked with `b3sum`. Hashers
/// built with [`ContentHasher::with_domain`] prepend a domain tag, which keeps
/// ids from different namespaces from ever colliding on identical bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContentHasher {
    domain: Option<&'static str>,
}

impl ContentHasher {
    /// Hasher used by the object store: undomained BLAKE3.
    pub const OBJECT: Self = Self { domain: None };

    /// Create a hasher with a custom domain tag.
    pub const fn with_domain(domain: &'static str) -> Self {
        Self {
            domain: Some(domain),
        }
    }

    /// Hash raw bytes into an object id.
    pub fn hash(&self, data: &[u8]) -> ObjectId {
        match self.domain {
            None => ObjectId::from_hash(Self::raw_hash(data)),
            Some(domain) => {
                let mut hasher = blake3::Hasher::new();
                hasher.update(domain.as_bytes());
                hasher.update(b":");
                hasher.update(data);
                ObjectId::from_hash(*hasher.finalize().as_bytes())
            }
        }
    }

    /// Verify that data produces the expected object ID.
    pub fn verify(&self, data: &[u8], expected: &ObjectId) -> bool {
        self.hash(data) == *expected
    }

    /// Raw BLAKE3 hash without domain separation.
    pub fn raw_hash(data: &[u8]) -> [u8; 32] {
        *blake3::hash(data).as_bytes()
    }

    /// The domain tag used by this hasher, if any.
    pub fn domain(&self) -> Option<&str> {
        self.domain
    }
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::OBJECT
    }
}
