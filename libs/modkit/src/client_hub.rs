//! Type-keyed registry of cross-module clients.
//!
//! Providers register an implementation once under its interface type
//! (`hub.register::<dyn profiles::contract::client::ProfilesApi>(..)`) and
//! consumers fetch it by the same type. Re-registering overwrites the
//! previous value; `Arc`s already handed out stay valid.

use parking_lot::RwLock;
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::Arc,
};

#[derive(Debug, thiserror::Error)]
pub enum ClientHubError {
    #[error("client not found: type={type_name}")]
    NotFound { type_name: &'static str },

    #[error("type mismatch in hub for type={type_name}")]
    TypeMismatch { type_name: &'static str },
}

type Boxed = Box<dyn Any + Send + Sync>;

#[derive(Default)]
pub struct ClientHub {
    map: RwLock<HashMap<TypeId, Boxed>>,
}

impl ClientHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client under the interface type `T` (usually `dyn SomeApi`).
    pub fn register<T>(&self, client: Arc<T>)
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.map.write().insert(TypeId::of::<T>(), Box::new(client));
    }

    /// Fetch a client by interface type `T`.
    pub fn get<T>(&self) -> Result<Arc<T>, ClientHubError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let type_name = std::any::type_name::<T>();
        let r = self.map.read();
        let boxed = r
            .get(&TypeId::of::<T>())
            .ok_or(ClientHubError::NotFound { type_name })?;
        boxed
            .downcast_ref::<Arc<T>>()
            .cloned()
            .ok_or(ClientHubError::TypeMismatch { type_name })
    }

    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[async_trait::async_trait]
    trait Directory: Send + Sync {
        async fn lookup(&self) -> usize;
    }

    struct Fixed(usize);

    #[async_trait::async_trait]
    impl Directory for Fixed {
        async fn lookup(&self) -> usize {
            self.0
        }
    }

    #[tokio::test]
    async fn register_and_get_dyn_trait() {
        let hub = ClientHub::new();
        let api: Arc<dyn Directory> = Arc::new(Fixed(7));
        hub.register::<dyn Directory>(api.clone());

        let got = hub.get::<dyn Directory>().unwrap();
        assert_eq!(got.lookup().await, 7);
        assert!(Arc::ptr_eq(&api, &got));
        assert_eq!(hub.len(), 1);
    }

    #[tokio::test]
    async fn re_registering_overwrites() {
        let hub = ClientHub::new();
        hub.register::<dyn Directory>(Arc::new(Fixed(1)));
        let first = hub.get::<dyn Directory>().unwrap();
        hub.register::<dyn Directory>(Arc::new(Fixed(2)));

        assert_eq!(hub.get::<dyn Directory>().unwrap().lookup().await, 2);
        assert_eq!(first.lookup().await, 1);
        assert_eq!(hub.len(), 1);
    }

    #[test]
    fn missing_client_is_reported_with_type_name() {
        let hub = ClientHub::new();
        let err = hub.get::<dyn Directory>().err().unwrap();
        assert!(matches!(err, ClientHubError::NotFound { .. }));
        assert!(err.to_string().contains("Directory"));
        assert!(hub.is_empty());
    }
}
