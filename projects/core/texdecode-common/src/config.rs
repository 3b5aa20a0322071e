//! Decoder configuration.

use crate::allocate::{BufferAllocator, HeapAllocator};
use crate::image_format::ImageFormat;
use core::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

/// Default size of the chunked-mode working buffer.
pub const DEFAULT_BUFFER_SIZE: usize = 0x8000;

/// Settings for a single decode.
///
/// Equality and hashing compare all value fields, and compare the allocator by identity, so a
/// [`Config`] can serve as part of a cache key.
///
/// # Examples
///
/// ```
/// use texdecode_common::config::Config;
///
/// let config = Config::default().with_buffer_size(4096).with_decompress(false);
/// assert_eq!(config.buffer_size, 4096);
/// assert!(!config.decompress);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Size of the working buffer used when reading from a stream.
    /// Grown on demand when one packet or tile-row needs more.
    pub buffer_size: usize,
    /// Format the caller would like to end up with. Informational only.
    pub target_format: Option<ImageFormat>,
    /// If `false`, block-compressed payloads are kept compressed and flagged as such.
    pub decompress: bool,
    /// Tile-row parallelism. `1` decodes sequentially, `0` uses the global thread pool,
    /// any other value builds a pool of that many threads.
    pub threads: usize,
    /// Where decoded buffers are rented from.
    pub allocator: Arc<dyn BufferAllocator>,
}

/// The process-wide [`HeapAllocator`] handed to default configs, so two defaults compare equal.
pub fn default_allocator() -> Arc<dyn BufferAllocator> {
    static HEAP: OnceLock<Arc<dyn BufferAllocator>> = OnceLock::new();
    Arc::clone(HEAP.get_or_init(|| Arc::new(HeapAllocator)))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            target_format: None,
            decompress: true,
            threads: 1,
            allocator: default_allocator(),
        }
    }
}

impl Config {
    /// Sets the chunked-mode working buffer size.
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Sets the informational target format.
    pub fn with_target_format(mut self, target_format: Option<ImageFormat>) -> Self {
        self.target_format = target_format;
        self
    }

    /// Sets whether block-compressed payloads are decoded.
    pub fn with_decompress(mut self, decompress: bool) -> Self {
        self.decompress = decompress;
        self
    }

    /// Sets tile-row parallelism.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Sets the buffer allocator.
    pub fn with_allocator(mut self, allocator: Arc<dyn BufferAllocator>) -> Self {
        self.allocator = allocator;
        self
    }
}

impl PartialEq for Config {
    fn eq(&self, other: &Self) -> bool {
        self.buffer_size == other.buffer_size
            && self.target_format == other.target_format
            && self.decompress == other.decompress
            && self.threads == other.threads
            && core::ptr::addr_eq(Arc::as_ptr(&self.allocator), Arc::as_ptr(&other.allocator))
    }
}

impl Eq for Config {}

impl Hash for Config {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.buffer_size.hash(state);
        self.target_format.hash(state);
        self.decompress.hash(state);
        self.threads.hash(state);
        (Arc::as_ptr(&self.allocator) as *const () as usize).hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocate::PoolAllocator;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(config: &Config) -> u64 {
        let mut hasher = DefaultHasher::new();
        config.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.buffer_size, 0x8000);
        assert_eq!(config.target_format, None);
        assert!(config.decompress);
        assert_eq!(config.threads, 1);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn clones_are_equal_and_hash_alike() {
        let config = Config::default().with_target_format(Some(ImageFormat::Rgba32));
        let clone = config.clone();
        assert_eq!(config, clone);
        assert_eq!(hash_of(&config), hash_of(&clone));
    }

    #[test]
    fn value_fields_participate_in_equality() {
        let base = Config::default();
        assert_ne!(base, base.clone().with_buffer_size(64));
        assert_ne!(base, base.clone().with_decompress(false));
        assert_ne!(base, base.clone().with_threads(4));
        assert_ne!(
            base,
            base.clone().with_target_format(Some(ImageFormat::Rgb8))
        );
    }

    #[test]
    fn allocator_compares_by_identity() {
        let pool: Arc<dyn BufferAllocator> = Arc::new(PoolAllocator::new());
        let a = Config::default().with_allocator(pool.clone());
        let b = Config::default().with_allocator(pool);
        let c = Config::default().with_allocator(Arc::new(PoolAllocator::new()));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
