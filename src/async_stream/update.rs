//! Async reader adapter for hasher sessions.
//!
//! # Example
//!
//! ```ignore
//! use tokio_util::compat::TokioAsyncReadCompatExt;
//! use xofhash::{HasherSession, update_async};
//!
//! async fn demo() -> Result<(), xofhash::HashError> {
//!     let file = tokio::fs::File::open("data.bin").await?;
//!     let mut session = HasherSession::standard();
//!     let consumed = update_async(&mut session, file.compat()).await?;
//!     println!("{} bytes -> {}", consumed, session.finalize(None)?);
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::error::HashError;
use crate::hash::XofPrimitive;
use crate::session::HasherSession;

/// Size of the read buffer used by [`UpdateAsync`].
const ASYNC_READ_BUFFER_LEN: usize = 8 * 1024;

pin_project! {
    /// Future returned by [`update_async`].
    ///
    /// Resolves to the number of bytes absorbed once the reader hits EOF.
    /// If the reader fails, the session is restored to its state before the
    /// call.
    #[must_use = "futures do nothing unless polled"]
    pub struct UpdateAsync<'a, R, P> {
        #[pin]
        reader: R,
        session: &'a mut HasherSession<P>,
        saved: Option<HasherSession<P>>,
        buffer: Vec<u8>,
        consumed: u64,
    }
}

/// Feeds everything `reader` yields into `session`.
///
/// Runtime agnostic: works with any `futures_io::AsyncRead`. Fails with
/// [`HashError::NotInitialized`] on the first poll if the session has no mode.
/// A reader error rolls the session back to where it was when this was called.
pub fn update_async<R, P>(session: &mut HasherSession<P>, reader: R) -> UpdateAsync<'_, R, P>
where
    R: AsyncRead,
    P: XofPrimitive,
{
    UpdateAsync {
        reader,
        saved: Some(session.clone()),
        session,
        buffer: vec![0u8; ASYNC_READ_BUFFER_LEN],
        consumed: 0,
    }
}

impl<R: AsyncRead, P: XofPrimitive> Future for UpdateAsync<'_, R, P> {
    type Output = Result<u64, HashError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        if !this.session.is_initialized() {
            return Poll::Ready(Err(HashError::NotInitialized));
        }

        loop {
            let n = match this.reader.as_mut().poll_read(cx, this.buffer) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Err(e)) if e.kind() == io::ErrorKind::Interrupted => continue,
                Poll::Ready(Err(e)) => {
                    if let Some(saved) = this.saved.take() {
                        **this.session = saved;
                    }
                    return Poll::Ready(Err(HashError::Io(e)));
                }
                Poll::Ready(Ok(0)) => return Poll::Ready(Ok(*this.consumed)),
                Poll::Ready(Ok(n)) => n,
            };
            this.session.update(&this.buffer[..n])?;
            *this.consumed += n as u64;
        }
    }
}
