//! Callback-to-future adaptation
//!
//! The client API is async throughout, but callers embedding it into
//! callback-shaped code (event handlers, FFI shims, schedulers that deliver
//! results through a trailing completion) need a bridge in the other
//! direction. [`from_callback`] turns any operation that reports through a
//! one-shot completion handle into a future.

use tokio::sync::oneshot;

use crate::error::{Error, Result};

/// One-shot completion handle handed to a callback-style operation.
///
/// Exactly one of [`resolve`](Completion::resolve),
/// [`reject`](Completion::reject) or [`finish`](Completion::finish) may be
/// called; the handle is consumed by all of them. Dropping the handle
/// without completing it rejects the adapted future with
/// [`Error::CallbackDropped`] instead of hanging it.
#[derive(Debug)]
pub struct Completion<T> {
    tx: oneshot::Sender<Result<T>>,
}

impl<T> Completion<T> {
    /// Complete successfully with `value`.
    pub fn resolve(self, value: T) {
        let _ = self.tx.send(Ok(value));
    }

    /// Complete with `error`.
    pub fn reject(self, error: Error) {
        let _ = self.tx.send(Err(error));
    }

    /// Complete with an already-formed result.
    pub fn finish(self, result: Result<T>) {
        let _ = self.tx.send(result);
    }
}

/// Adapt a callback-style operation into a future.
///
/// `start` is invoked immediately with a [`Completion`] handle; the returned
/// future resolves with whatever the handle is completed with. Because
/// `start` is a closure, it captures its receiver naturally; adapting a
/// method does not detach it from its owner.
///
/// ```
/// # use repository_client::adapter::{self, Completion};
/// # async fn example() -> repository_client::Result<()> {
/// fn lookup(id: u64, done: Completion<u64>) {
///     done.resolve(id * 2);
/// }
///
/// let doubled = adapter::from_callback(|done| lookup(21, done)).await?;
/// assert_eq!(doubled, 42);
/// # Ok(())
/// # }
/// ```
pub async fn from_callback<T, F>(start: F) -> Result<T>
where
    F: FnOnce(Completion<T>),
{
    let (tx, rx) = oneshot::channel();
    start(Completion { tx });
    rx.await.map_err(|_| Error::CallbackDropped)?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolving_the_completion_resolves_the_future() {
        let result = from_callback(|done: Completion<u64>| done.resolve(42)).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn rejecting_the_completion_rejects_the_future() {
        let result: Result<u64> = from_callback(|done| {
            done.reject(Error::MissingConfig("base_url".to_string()));
        })
        .await;
        assert!(matches!(result, Err(Error::MissingConfig(_))));
    }

    #[tokio::test]
    async fn dropped_completion_rejects_instead_of_hanging() {
        let result: Result<u64> = from_callback(|done| drop(done)).await;
        assert!(matches!(result, Err(Error::CallbackDropped)));
    }

    #[tokio::test]
    async fn captured_receiver_stays_bound() {
        struct Doubler {
            factor: u64,
        }

        impl Doubler {
            fn apply(&self, n: u64, done: Completion<u64>) {
                done.resolve(n * self.factor);
            }
        }

        let doubler = Doubler { factor: 2 };
        let result = from_callback(|done| doubler.apply(21, done)).await;
        assert_eq!(result.unwrap(), 42);
    }
}
