//! Digest provider registry
//!
//! Maps algorithm identifiers to hasher constructors. The mapping is explicit and
//! resolved at startup; callers validate a requested algorithm against
//! [`DigestRegistry::supported`] before touching the filesystem.

use crate::digest::Algorithm;
use crate::error::ChecksumError;
use sha2::Digest as _;
use std::collections::BTreeMap;
use std::io::Read;

const BUF_SIZE: usize = 64 * 1024;

/// Incremental hasher behind a digest function
pub trait StreamHasher: Send {
    fn update(&mut self, data: &[u8]);
    fn finalize(self: Box<Self>) -> Vec<u8>;
}

/// Adapter for the RustCrypto `Digest` family (md-5, sha2)
struct RustCryptoHasher<D>(D);

impl<D> StreamHasher for RustCryptoHasher<D>
where
    D: sha2::Digest + Send,
{
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.0.finalize().to_vec()
    }
}

struct Blake3Hasher(blake3::Hasher);

impl StreamHasher for Blake3Hasher {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.0.finalize().as_bytes().to_vec()
    }
}

fn md5_hasher() -> Box<dyn StreamHasher> {
    Box::new(RustCryptoHasher(md5::Md5::new()))
}

fn sha256_hasher() -> Box<dyn StreamHasher> {
    Box::new(RustCryptoHasher(sha2::Sha256::new()))
}

fn sha512_hasher() -> Box<dyn StreamHasher> {
    Box::new(RustCryptoHasher(sha2::Sha512::new()))
}

fn blake3_hasher() -> Box<dyn StreamHasher> {
    Box::new(Blake3Hasher(blake3::Hasher::new()))
}

/// Constructor for a fresh hasher
pub type HasherConstructor = fn() -> Box<dyn StreamHasher>;

/// A resolved stream-digesting capability for one algorithm
#[derive(Clone, Copy)]
pub struct DigestFunction {
    algorithm: Algorithm,
    constructor: HasherConstructor,
}

impl DigestFunction {
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Drain `reader` and return its digest.
    ///
    /// The reader is consumed and dropped whether or not reading succeeds.
    pub fn digest<R: Read>(&self, mut reader: R) -> std::io::Result<Vec<u8>> {
        let mut hasher = (self.constructor)();
        let mut buf = vec![0u8; BUF_SIZE];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        Ok(hasher.finalize())
    }
}

impl std::fmt::Debug for DigestFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigestFunction")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

/// Registry of digest providers keyed by algorithm
#[derive(Clone)]
pub struct DigestRegistry {
    providers: BTreeMap<Algorithm, HasherConstructor>,
}

impl Default for DigestRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl DigestRegistry {
    /// Registry with no providers
    pub fn empty() -> Self {
        Self {
            providers: BTreeMap::new(),
        }
    }

    /// Registry with every built-in algorithm
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(Algorithm::Md5, md5_hasher);
        registry.register(Algorithm::Sha256, sha256_hasher);
        registry.register(Algorithm::Sha512, sha512_hasher);
        registry.register(Algorithm::Blake3, blake3_hasher);
        registry
    }

    /// Register (or replace) the provider for an algorithm
    pub fn register(&mut self, algorithm: Algorithm, constructor: HasherConstructor) {
        self.providers.insert(algorithm, constructor);
    }

    /// Supported algorithms in stable order
    pub fn supported(&self) -> Vec<Algorithm> {
        self.providers.keys().copied().collect()
    }

    pub fn supports(&self, algorithm: Algorithm) -> bool {
        self.providers.contains_key(&algorithm)
    }

    pub fn resolve(&self, algorithm: Algorithm) -> Result<DigestFunction, ChecksumError> {
        self.providers
            .get(&algorithm)
            .map(|constructor| DigestFunction {
                algorithm,
                constructor: *constructor,
            })
            .ok_or_else(|| ChecksumError::UnsupportedAlgorithm(algorithm.name().to_string()))
    }

    /// Parse an algorithm identifier and resolve it in one step
    pub fn resolve_name(&self, name: &str) -> Result<DigestFunction, ChecksumError> {
        self.resolve(name.parse::<Algorithm>()?)
    }
}
