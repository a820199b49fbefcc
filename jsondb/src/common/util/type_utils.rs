use std::sync::Arc;

use parking_lot::RwLock;

/// Shared, lock-protected state.
pub type Atomic<T> = Arc<RwLock<T>>;

#[inline]
pub fn atomic<T>(t: T) -> Atomic<T> {
    Arc::new(RwLock::new(t))
}
