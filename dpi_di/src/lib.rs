//! Compile time dependency injection.
//!
//! A [`Provider`] owns the leaf dependencies (configuration values, clients)
//! and a cache of already built services. Services derive [`Build`] and are
//! assembled recursively by [`Provide::provide`], so every service is built
//! at most once per provider.

extern crate self as dpi_di;

pub use dpi_di_derive::Build;
pub use typemap::TypeMap;

mod macros;
mod typemap;

pub trait Provider: Sized {
    /// Cache of the services which have already been built by this provider.
    fn cache(&mut self) -> &mut TypeMap;
}

#[diagnostic::on_unimplemented(
    message = "The type `{Self}` cannot be built using the provider `{P}`",
    note = "Add `{Self}` to the provider `{P}` or implement `Build` for `{Self}` and make sure \
            all dependencies are satisfied"
)]
pub trait Build<P: Provider>: Clone + 'static {
    fn build(provider: &mut P) -> Self;
}

pub trait Provide: Provider {
    fn provide<T: Build<Self>>(&mut self) -> T {
        T::build(self)
    }
}

impl<P: Provider> Provide for P {}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;

    static BUILT: AtomicUsize = AtomicUsize::new(0);

    #[derive(Debug, Clone)]
    struct Greeting(Arc<str>);

    #[derive(Debug, Clone)]
    struct Counted(Arc<()>);

    impl<P: Provider> Build<P> for Counted {
        fn build(provider: &mut P) -> Self {
            if let Some(cached) = provider.cache().get::<Self>() {
                return cached.clone();
            }
            BUILT.fetch_add(1, Ordering::SeqCst);
            let value = Self(Arc::new(()));
            provider.cache().insert(value.clone());
            value
        }
    }

    #[derive(Debug, Clone, Build)]
    struct Service {
        greeting: Greeting,
        counted: Counted,
    }

    crate::provider! {
        TestProvider {
            greeting: Greeting,
        }
    }

    #[test]
    fn provide() {
        let mut provider = TestProvider {
            _cache: Default::default(),
            greeting: Greeting("hello".into()),
        };

        let a: Service = provider.provide();
        let b: Service = provider.provide();

        assert_eq!(&*a.greeting.0, "hello");
        assert!(Arc::ptr_eq(&a.counted.0, &b.counted.0));
        assert_eq!(BUILT.load(Ordering::SeqCst), 1);
    }
}
