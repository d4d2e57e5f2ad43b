use crate::framework::{FrameworkError, StoreClient, StoreState};
use async_trait::async_trait;

/// Trait for store-specific clients to inherit the raw command and query calls.
///
/// Implementors only say where their [`StoreClient`] lives and how framework
/// errors become their own error type; the typed helpers (`add`, `products`, ...)
/// are built on top of [`apply`](DomainClient::apply) and
/// [`read`](DomainClient::read).
#[async_trait]
pub trait DomainClient<S: StoreState>: Send + Sync {
    /// The store-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic StoreClient.
    fn inner(&self) -> &StoreClient<S>;

    /// Map framework errors to the store-specific error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Send a command and wait until the store (and its hooks) handled it.
    #[tracing::instrument(skip(self), fields(store = S::NAME))]
    async fn apply(&self, command: S::Command) -> Result<S::Outcome, Self::Error> {
        tracing::debug!("Sending command");
        self.inner().apply(command).await.map_err(Self::map_error)
    }

    /// Ask the store for a view of its current state.
    #[tracing::instrument(skip(self), fields(store = S::NAME))]
    async fn read(&self, query: S::Query) -> Result<S::View, Self::Error> {
        tracing::debug!("Sending query");
        self.inner().read(query).await.map_err(Self::map_error)
    }
}

/// Declares `<State>Client`, a cloneable wrapper over `StoreClient<State>` that
/// implements [`DomainClient`] and turns rejections back into `$error`.
macro_rules! domain_client {
    ($state:ident, $error:ident) => {
        ::paste::paste! {
            #[doc = concat!("Client for interacting with the ", stringify!($state), " store.")]
            #[derive(Clone)]
            pub struct [<$state Client>] {
                inner: $crate::framework::StoreClient<$state>,
            }

            impl [<$state Client>] {
                pub fn new(inner: $crate::framework::StoreClient<$state>) -> Self {
                    Self { inner }
                }
            }

            #[::async_trait::async_trait]
            impl $crate::clients::DomainClient<$state> for [<$state Client>] {
                type Error = $error;

                fn inner(&self) -> &$crate::framework::StoreClient<$state> {
                    &self.inner
                }

                fn map_error(e: $crate::framework::FrameworkError) -> $error {
                    e.into_domain(|msg| <$error as From<String>>::from(msg))
                }
            }
        }
    };
}

pub(crate) use domain_client;
