use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lru::LruCache;
use tracing::debug;

use crate::consts::MIN_STORE_CAPACITY;
use crate::error::{LoupeError, Result};
use crate::render::Renderer;
use crate::surface::ImageSurface;
use crate::viewport::Viewport;

/// How many viewports a [`ViewportStore`] keeps alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorePolicy {
    /// Never evict.
    Unbounded,
    /// Evict the least recently used viewport beyond this many.
    Lru(NonZeroUsize),
}

impl StorePolicy {
    /// `None` means unbounded. Bounded stores must hold at least a primary
    /// and a secondary viewport.
    pub fn from_capacity(capacity: Option<usize>) -> Result<Self> {
        match capacity {
            None => Ok(Self::Unbounded),
            Some(cap) if cap < MIN_STORE_CAPACITY => Err(LoupeError::Config(format!(
                "cache capacity must be at least {MIN_STORE_CAPACITY}, got {cap}"
            ))),
            Some(cap) => NonZeroUsize::new(cap)
                .map(Self::Lru)
                .ok_or_else(|| LoupeError::Config("cache capacity must be non-zero".into())),
        }
    }
}

/// Viewports keyed by image path, created on first access.
///
/// At most one viewport exists per path, so revisiting an image brings back
/// its zoom and pan.
pub struct ViewportStore {
    entries: LruCache<PathBuf, Viewport>,
    renderer: Arc<dyn Renderer>,
}

impl ViewportStore {
    pub fn new(policy: StorePolicy, renderer: Arc<dyn Renderer>) -> Self {
        let entries = match policy {
            StorePolicy::Unbounded => LruCache::unbounded(),
            StorePolicy::Lru(cap) => LruCache::new(cap),
        };
        Self { entries, renderer }
    }

    pub fn unbounded(renderer: Arc<dyn Renderer>) -> Self {
        Self::new(StorePolicy::Unbounded, renderer)
    }

    /// The viewport for `id`, creating an uninitialized one around `surface`
    /// if there is none.
    pub fn get_or_create(&mut self, id: &Path, surface: ImageSurface) -> &mut Viewport {
        if !self.entries.contains(id) {
            self.log_eviction();
            debug!(path = %id.display(), "Viewport created");
        }
        let renderer = Arc::clone(&self.renderer);
        self.entries
            .get_or_insert_mut(id.to_path_buf(), || Viewport::new(surface, renderer))
    }

    /// Like [`get_or_create`](Self::get_or_create), but only calls `load`
    /// when the viewport does not exist yet.
    pub fn get_or_load<F>(&mut self, id: &Path, load: F) -> Result<&mut Viewport>
    where
        F: FnOnce() -> Result<ImageSurface>,
    {
        if !self.entries.contains(id) {
            let surface = load()?;
            return Ok(self.get_or_create(id, surface));
        }
        self.entries
            .get_mut(id)
            .ok_or_else(|| LoupeError::NotFound(id.to_path_buf()))
    }

    /// Existing viewport for `id`, marking it as recently used.
    pub fn get(&mut self, id: &Path) -> Option<&mut Viewport> {
        self.entries.get_mut(id)
    }

    /// Existing viewport for `id`, without touching recency.
    pub fn peek(&self, id: &Path) -> Option<&Viewport> {
        self.entries.peek(id)
    }

    pub fn contains(&self, id: &Path) -> bool {
        self.entries.contains(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `None` for an unbounded store.
    pub fn capacity(&self) -> Option<usize> {
        let cap = self.entries.cap().get();
        (cap != usize::MAX).then_some(cap)
    }

    fn log_eviction(&self) {
        if self.entries.len() < self.entries.cap().get() {
            return;
        }
        if let Some((evicted, _)) = self.entries.peek_lru() {
            debug!(path = %evicted.display(), "Viewport evicted");
        }
    }
}
