//! Byte-counting reader adapter.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, ReadBuf};

use super::ProgressReporter;

/// Forwards reads to `inner` and reports every non-empty read to a
/// [`ProgressReporter`].
///
/// Bytes, EOF and errors pass through untouched.
pub struct CountingReader<'a, R> {
    inner: R,
    reporter: &'a mut ProgressReporter,
}

impl<'a, R> CountingReader<'a, R> {
    /// Wrap `inner`, reporting to `reporter`.
    pub const fn new(inner: R, reporter: &'a mut ProgressReporter) -> Self {
        Self { inner, reporter }
    }
}

impl<R: AsyncRead + Unpin> AsyncRead for CountingReader<'_, R> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let before = buf.filled().len();
        let poll = Pin::new(&mut this.inner).poll_read(cx, buf);
        if let Poll::Ready(Ok(())) = &poll {
            let read = buf.filled().len() - before;
            if read > 0 {
                this.reporter.increment(read);
            }
        }
        poll
    }
}
