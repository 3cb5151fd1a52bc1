//! # Deferred Results
//!
//! Every repository operation hands back a deferred value instead of doing
//! the work up front. A [`Deferred`] is a boxed future and a
//! [`DeferredStream`] is a boxed stream; neither touches the document store
//! until it is polled. Dropping an unpolled handle leaves the store as it was.

use futures::future::BoxFuture;
use futures::stream::BoxStream;
use futures::{FutureExt, StreamExt, TryStreamExt};

use crate::error::{PersistenceError, Result};

/// Single deferred value.
pub type Deferred<'a, T> = BoxFuture<'a, Result<T>>;

/// Deferred sequence of values.
pub type DeferredStream<'a, T> = BoxStream<'a, Result<T>>;

/// Draining helpers for deferred sequences.
pub trait DeferredStreamExt<'a, T> {
    /// Drain the whole sequence into a `Vec`. The first error aborts.
    fn collect_list(self) -> Deferred<'a, Vec<T>>;

    /// Resolve to the first element, or `None` for an empty sequence.
    fn first(self) -> Deferred<'a, Option<T>>;
}

impl<'a, T: Send + 'a> DeferredStreamExt<'a, T> for DeferredStream<'a, T> {
    fn collect_list(self) -> Deferred<'a, Vec<T>> {
        self.try_collect().boxed()
    }

    fn first(mut self) -> Deferred<'a, Option<T>> {
        async move { self.next().await.transpose() }.boxed()
    }
}

/// Helpers for deferred optional values.
pub trait DeferredOptionExt<'a, T> {
    /// Resolve to the value, failing with [`PersistenceError::NotFound`]
    /// when it is absent.
    fn require(self, entity_type: &str, key: impl Into<String>) -> Deferred<'a, T>;
}

impl<'a, T: Send + 'a> DeferredOptionExt<'a, T> for Deferred<'a, Option<T>> {
    fn require(self, entity_type: &str, key: impl Into<String>) -> Deferred<'a, T> {
        let entity_type = entity_type.to_string();
        let key = key.into();
        async move {
            self.await?
                .ok_or(PersistenceError::NotFound { entity_type, key })
        }
        .boxed()
    }
}
