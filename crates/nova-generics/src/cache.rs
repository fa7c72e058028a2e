use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use crate::bindings::HierarchyMap;
use crate::descriptor::TypeDescriptor;
use crate::error::HierarchyError;
use crate::model::DeclaredType;

/// Cache key: a root declared type plus the arguments it was instantiated with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HierarchyKey {
    pub root: DeclaredType,
    pub arguments: Vec<TypeDescriptor>,
}

impl HierarchyKey {
    pub fn new(root: DeclaredType, arguments: Vec<TypeDescriptor>) -> Self {
        Self { root, arguments }
    }
}

type Slot = Arc<OnceLock<Result<Arc<HierarchyMap>, HierarchyError>>>;

/// Memoised hierarchy maps.
///
/// Each key is built at most once even when several threads ask for it concurrently; later
/// callers block on the same slot and receive the shared result. Failures are cached too,
/// since the universe they were computed from does not change.
///
/// Nothing is evicted: entries live until [`Self::clear`] or until the cache is dropped. A
/// cache belongs to one universe (see `GenericsResolver`), so it is bounded by the number of
/// distinct instantiations that universe is queried with.
#[derive(Debug, Default)]
pub struct HierarchyCache {
    slots: Mutex<HashMap<HierarchyKey, Slot>>,
    builds: AtomicUsize,
}

impl HierarchyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(
        &self,
        key: HierarchyKey,
        build: impl FnOnce() -> Result<HierarchyMap, HierarchyError>,
    ) -> Result<Arc<HierarchyMap>, HierarchyError> {
        let slot = {
            let mut slots = self.lock_slots();
            slots.entry(key).or_default().clone()
        };

        let mut built = false;
        let result = slot.get_or_init(|| {
            built = true;
            self.builds.fetch_add(1, Ordering::Relaxed);
            build().map(Arc::new)
        });
        if !built {
            tracing::debug!(target = "nova.generics", "hierarchy cache hit");
        }
        result.clone()
    }

    /// Number of hierarchy builds performed since creation (or the last [`Self::clear`]).
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.lock_slots().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_slots().is_empty()
    }

    pub fn clear(&self) {
        self.lock_slots().clear();
        self.builds.store(0, Ordering::Relaxed);
    }

    #[track_caller]
    fn lock_slots(&self) -> MutexGuard<'_, HashMap<HierarchyKey, Slot>> {
        match self.slots.lock() {
            Ok(guard) => guard,
            Err(err) => {
                let loc = std::panic::Location::caller();
                tracing::error!(
                    target = "nova.generics",
                    file = loc.file(),
                    line = loc.line(),
                    column = loc.column(),
                    error = %err,
                    "mutex poisoned; continuing with recovered guard"
                );
                err.into_inner()
            }
        }
    }
}
