use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

pub(crate) fn shutdown_signal() -> (RpcServerShutdownHandle, RpcServerShutdownSignal) {
    let (tx, rx) = oneshot::channel();

    (RpcServerShutdownHandle { tx: Some(tx) }, RpcServerShutdownSignal { rx })
}

/// Calling `shutdown()` or dropping the handle stops the server.
pub(crate) struct RpcServerShutdownHandle {
    tx: Option<oneshot::Sender<()>>,
}

impl RpcServerShutdownHandle {
    pub(crate) fn shutdown(mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(());
        }
    }
}

pub(crate) struct RpcServerShutdownSignal {
    rx: oneshot::Receiver<()>,
}

impl Future for RpcServerShutdownSignal {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // Sent or dropped, either way we are done.
        Pin::new(&mut self.rx).poll(cx).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Duration};

    #[tokio::test]
    async fn signal_fires_on_explicit_shutdown() {
        let (handle, signal) = shutdown_signal();
        handle.shutdown();
        timeout(Duration::from_secs(1), signal).await.unwrap();
    }

    #[tokio::test]
    async fn signal_fires_when_handle_is_dropped() {
        let (handle, signal) = shutdown_signal();
        drop(handle);
        timeout(Duration::from_secs(1), signal).await.unwrap();
    }

    #[tokio::test]
    async fn signal_waits_while_handle_lives() {
        let (_handle, signal) = shutdown_signal();
        assert!(timeout(Duration::from_millis(50), signal).await.is_err());
    }
}
