pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// Registers an [`ObjectCache`] implementation under a name before `main`
/// runs, so the configured backend can be constructed by name at startup.
/// The implementation must provide `fn new() -> Result<Self, String>`.
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $cache_type:ident) => {
        paste::paste! {
            #[ctor::ctor]
            #[allow(non_snake_case)]
            fn [<__register_object_cache_plugin_ $cache_type>]() {
                $crate::cache::register::register_cache_backend(
                    $name,
                    std::sync::Arc::new(|| {
                        Box::pin(async {
                            let cache = <$cache_type>::new()
                                .map_err($crate::errors::SimsError::cache_connection)?;
                            Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                        })
                            as $crate::cache::register::CacheConstructorFuture
                    }),
                );
            }
        }
    };
}
