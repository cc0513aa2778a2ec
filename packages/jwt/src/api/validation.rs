//! Async result handling for spawned signing operations

use crate::error::{JwtError, JwtResult};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tokio::sync::oneshot;

/// Awaitable outcome of a signing operation running on a spawned task
pub struct AsyncJwtResult<T> {
    receiver: oneshot::Receiver<JwtResult<T>>,
}

impl<T> AsyncJwtResult<T> {
    pub(crate) fn new(receiver: oneshot::Receiver<JwtResult<T>>) -> Self {
        Self { receiver }
    }

    /// Already-completed result, for failures detected before spawning
    pub(crate) fn ready(result: JwtResult<T>) -> Self {
        let (tx, rx) = oneshot::channel();
        // the receiver is held right here, so the send cannot fail
        let _ = tx.send(result);
        Self::new(rx)
    }
}

impl<T> Future for AsyncJwtResult<T> {
    type Output = JwtResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(JwtError::internal("Signing task dropped"))),
            Poll::Pending => Poll::Pending,
        }
    }
}
