//! Name-keyed registry of cache backends.
//!
//! Backends register themselves via `declare_object_cache_plugin!` before
//! `main` runs; startup then constructs the configured backend by name.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use crate::cache::traits::ObjectCache;
use crate::errors::Result;

pub type CacheConstructorFuture =
    Pin<Box<dyn Future<Output = Result<Box<dyn ObjectCache>>> + Send>>;
pub type CacheConstructor = Arc<dyn Fn() -> CacheConstructorFuture + Send + Sync>;

static CACHE_BACKENDS: Lazy<RwLock<HashMap<String, CacheConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub fn register_cache_backend<S: Into<String>>(name: S, constructor: CacheConstructor) {
    CACHE_BACKENDS
        .write()
        .expect("cache backend registry poisoned")
        .insert(name.into(), constructor);
}

pub fn cache_backend(name: &str) -> Option<CacheConstructor> {
    CACHE_BACKENDS
        .read()
        .expect("cache backend registry poisoned")
        .get(name)
        .cloned()
}

/// Logs what the ctor pass registered; wired into debug-build startup.
pub fn log_registered_cache_backends() {
    let backends = CACHE_BACKENDS
        .read()
        .expect("cache backend registry poisoned");
    if backends.is_empty() {
        tracing::debug!("no cache backends registered");
        return;
    }
    for name in backends.keys() {
        tracing::debug!("cache backend available: {}", name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;

    #[test]
    fn registered_backend_is_retrievable_by_name() {
        register_cache_backend(
            "moka-under-test",
            Arc::new(|| {
                Box::pin(async {
                    let cache = MokaCacheWrapper::new()
                        .map_err(crate::errors::SimsError::cache_connection)?;
                    Ok(Box::new(cache) as Box<dyn ObjectCache>)
                }) as CacheConstructorFuture
            }),
        );

        assert!(cache_backend("moka-under-test").is_some());
        assert!(cache_backend("memcached").is_none());
    }
}
