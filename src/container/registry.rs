//! Typed provider registry

use crate::domain::{ContainerError, ProviderError, Result};
use futures::future::{BoxFuture, FutureExt};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, OnceLock, RwLock};
use tokio::sync::OnceCell;

type Instance = Arc<dyn Any + Send + Sync>;
type Factory = Arc<dyn Fn(Container) -> BoxFuture<'static, Result<Instance>> + Send + Sync>;

struct Provider {
    type_name: &'static str,
    factory: Factory,
    instance: Arc<OnceCell<Instance>>,
}

#[derive(Default)]
struct Registry {
    providers: RwLock<HashMap<TypeId, Provider>>,
}

/// Dependency container
///
/// Maps a type to the factory that builds it. Each type is built at most once
/// per container, on first [`Container::resolve`], and the instance is shared
/// afterwards. A factory that fails leaves the type unbuilt so a later resolve
/// runs it again. Factories receive the container and may resolve their own
/// dependencies; a dependency cycle never completes.
///
/// Cloning a container yields another reference to the same registry.
#[derive(Clone, Default)]
pub struct Container {
    inner: Arc<Registry>,
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&'static str> = match self.inner.providers.read() {
            Ok(providers) => providers.values().map(|p| p.type_name).collect(),
            Err(_) => Vec::new(),
        };
        f.debug_struct("Container").field("providers", &names).finish()
    }
}

impl Container {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide container
    pub fn global() -> &'static Container {
        static GLOBAL: OnceLock<Container> = OnceLock::new();
        GLOBAL.get_or_init(Container::new)
    }

    /// Register an async factory for `T`
    ///
    /// Replaces any earlier provider for `T`, including an instance it
    /// already built.
    pub fn provide<T, F, Fut>(&self, factory: F)
    where
        T: Any + Send + Sync,
        F: Fn(Container) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let factory: Factory = Arc::new(move |container: Container| {
            let build = factory(container);
            async move { build.await.map(|value| Arc::new(value) as Instance) }.boxed()
        });
        self.insert::<T>(factory);
    }

    /// Register a ready-made instance of `T`
    pub fn provide_value<T>(&self, value: T)
    where
        T: Any + Send + Sync,
    {
        let instance: Instance = Arc::new(value);
        let factory: Factory = Arc::new(move |_: Container| {
            let instance = instance.clone();
            async move { Ok::<Instance, ProviderError>(instance) }.boxed()
        });
        self.insert::<T>(factory);
    }

    fn insert<T: Any>(&self, factory: Factory) {
        let type_name = std::any::type_name::<T>();
        let provider = Provider {
            type_name,
            factory,
            instance: Arc::new(OnceCell::new()),
        };

        let mut providers = match self.inner.providers.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if providers.insert(TypeId::of::<T>(), provider).is_some() {
            tracing::warn!(type_name, "Replaced existing provider");
        } else {
            tracing::debug!(type_name, "Registered provider");
        }
    }

    /// Whether a provider for `T` is registered
    pub fn is_registered<T: Any>(&self) -> bool {
        self.inner
            .providers
            .read()
            .map(|providers| providers.contains_key(&TypeId::of::<T>()))
            .unwrap_or(false)
    }

    /// Get the shared instance of `T`, building it on first use
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::NotRegistered`] when no provider exists and
    /// [`ContainerError::ConstructionFailed`] wrapping the factory error when
    /// the build fails.
    pub async fn resolve<T>(&self) -> Result<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        let type_name = std::any::type_name::<T>();

        let (factory, cell) = {
            let providers = self.inner.providers.read().map_err(|_| {
                ProviderError::Other("dependency container lock poisoned".to_string())
            })?;
            let provider = providers
                .get(&TypeId::of::<T>())
                .ok_or(ContainerError::NotRegistered(type_name))?;
            (provider.factory.clone(), provider.instance.clone())
        };

        let instance = cell
            .get_or_try_init(|| factory(self.clone()))
            .await
            .map_err(|source| ContainerError::ConstructionFailed {
                type_name,
                source: Box::new(source),
            })?
            .clone();

        instance
            .downcast::<T>()
            .map_err(|_| ContainerError::TypeMismatch(type_name).into())
    }
}
