//! Analysis Event Stream
//!
//! Reads the framed response body on a background task and hands decoded
//! events to the consumer. Cancelling (or dropping) the stream stops the
//! task, which drops the body and with it the connection.

use std::collections::VecDeque;
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::stream::{self, BoxStream, Stream, StreamExt};
use platform::frame::FrameBuffer;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::domain::value_object::event::AnalysisEvent;
use crate::infra::frame_decoder::FrameDecoder;

/// Events buffered between the reader task and the consumer
const CHANNEL_CAPACITY: usize = 16;

/// Finite, non-restartable sequence of analysis events
///
/// Ends right after the first `Complete` or `Error` event. A body that
/// breaks off before either yields a synthetic `Error`. After cancellation
/// the sequence ends without a terminal event.
pub struct AnalysisStream {
    inner: BoxStream<'static, AnalysisEvent>,
    cancel: CancellationToken,
}

impl AnalysisStream {
    /// Start reading `body` on a background task
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<S, B, E>(body: S, buffer: FrameBuffer, decoder: FrameDecoder) -> Self
    where
        S: Stream<Item = Result<B, E>> + Send + 'static,
        B: AsRef<[u8]> + Send + 'static,
        E: fmt::Display + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

        let reader = Reader {
            body: Box::pin(body),
            buffer,
            decoder,
            pending: VecDeque::new(),
            finished: false,
        };
        tokio::spawn(reader.run(tx, cancel.clone()));

        let inner = stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|event| (event, rx))
        })
        .boxed();

        Self { inner, cancel }
    }

    /// Token that aborts the underlying connection when cancelled
    pub fn cancel_handle(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Stream for AnalysisStream {
    type Item = AnalysisEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

impl Drop for AnalysisStream {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl fmt::Debug for AnalysisStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisStream")
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

struct Reader<S> {
    body: Pin<Box<S>>,
    buffer: FrameBuffer,
    decoder: FrameDecoder,
    pending: VecDeque<AnalysisEvent>,
    finished: bool,
}

impl<S, B, E> Reader<S>
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: fmt::Display + Send + 'static,
{
    async fn run(mut self, tx: mpsc::Sender<AnalysisEvent>, cancel: CancellationToken) {
        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!("Analysis stream cancelled, dropping connection");
                    return;
                }
                _ = tx.closed() => {
                    tracing::debug!("Analysis stream consumer gone, dropping connection");
                    return;
                }
                event = self.next_event() => event,
            };

            let Some(event) = next else {
                return;
            };
            let terminal = event.is_terminal();

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return,
                sent = tx.send(event) => {
                    if sent.is_err() || terminal {
                        return;
                    }
                }
            }
        }
    }

    async fn next_event(&mut self) -> Option<AnalysisEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                if event.is_terminal() {
                    // Anything after the terminal event is ignored
                    self.pending.clear();
                    self.finished = true;
                }
                return Some(event);
            }
            if self.finished {
                return None;
            }

            match self.body.next().await {
                Some(Ok(chunk)) => {
                    for frame in self.buffer.push(chunk.as_ref()) {
                        self.decode(&frame);
                    }
                }
                Some(Err(e)) => {
                    self.finished = true;
                    tracing::warn!(error = %e, "Analysis stream broke off");
                    return Some(AnalysisEvent::error(format!("Connection lost: {e}")));
                }
                None => {
                    self.finished = true;
                    // Tolerate a final frame missing its delimiter
                    let rest = String::from_utf8_lossy(self.buffer.remainder()).into_owned();
                    if !rest.trim().is_empty() {
                        self.decode(&rest);
                    }
                    if !self.pending.iter().any(AnalysisEvent::is_terminal) {
                        tracing::warn!("Analysis stream closed before a final result");
                        self.pending.push_back(AnalysisEvent::error(
                            "Stream ended before the analysis completed",
                        ));
                    }
                }
            }
        }
    }

    fn decode(&mut self, frame: &str) {
        match self.decoder.decode(frame) {
            Ok(Some(event)) => self.pending.push_back(event),
            Ok(None) => {}
            Err(err) => err.log(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::time::Duration;

    fn chunks(parts: &[&str]) -> impl Stream<Item = Result<Vec<u8>, Infallible>> + Send + 'static {
        let parts: Vec<_> = parts.iter().map(|p| Ok(p.as_bytes().to_vec())).collect();
        stream::iter(parts)
    }

    fn spawn_over<S>(body: S) -> AnalysisStream
    where
        S: Stream<Item = Result<Vec<u8>, Infallible>> + Send + 'static,
    {
        AnalysisStream::spawn(body, FrameBuffer::blank_line(), FrameDecoder::new("data:"))
    }

    #[tokio::test]
    async fn test_split_frame_yields_one_event_then_the_rest() {
        let stream = spawn_over(chunks(&[
            "data: {\"status\":\"progress\",\"agent\":\"collector\",\"message\":\"m\"}\n\ndata: {\"sta",
            "tus\":\"complete\",\"article\":{\"summary_short\":\"s\"}}\n\n",
        ]));

        let events: Vec<_> = stream.collect().await;
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], AnalysisEvent::Progress { ref agent, .. } if agent == "collector"));
        assert!(matches!(events[1], AnalysisEvent::Complete { .. }));
    }

    #[tokio::test]
    async fn test_malformed_frame_is_skipped() {
        let stream = spawn_over(chunks(&[
            "data: {not json}\n\n",
            "data: {\"status\":\"error\",\"message\":\"quota\"}\n\n",
        ]));

        let events: Vec<_> = stream.collect().await;
        assert_eq!(events, vec![AnalysisEvent::error("quota")]);
    }

    #[tokio::test]
    async fn test_events_after_terminal_are_dropped() {
        let stream = spawn_over(chunks(&[
            "data: {\"status\":\"error\",\"message\":\"first\"}\n\ndata: {\"status\":\"progress\",\"agent\":\"bias\"}\n\n",
        ]));

        let events: Vec<_> = stream.collect().await;
        assert_eq!(events, vec![AnalysisEvent::error("first")]);
    }

    #[tokio::test]
    async fn test_premature_close_yields_synthetic_error() {
        let stream = spawn_over(chunks(&[
            "data: {\"status\":\"progress\",\"agent\":\"collector\"}\n\n",
        ]));

        let events: Vec<_> = stream.collect().await;
        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], AnalysisEvent::Error { ref message } if message.contains("ended")));
    }

    #[tokio::test]
    async fn test_crlf_framed_stream_completes() {
        let stream = spawn_over(chunks(&[
            "data: {\"status\":\"progress\",\"agent\":\"collector\"}\r\n\r",
            "\ndata: {\"status\":\"complete\",\"article\":{\"sentiment\":\"neutral\"}}\r\n\r\n",
        ]));

        let events: Vec<_> = stream.collect().await;
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], AnalysisEvent::Progress { .. }));
        assert!(matches!(events[1], AnalysisEvent::Complete { .. }));
    }

    #[tokio::test]
    async fn test_missing_final_delimiter_is_tolerated() {
        let stream = spawn_over(chunks(&["data: {\"status\":\"error\",\"message\":\"x\"}"]));
        let events: Vec<_> = stream.collect().await;
        assert_eq!(events, vec![AnalysisEvent::error("x")]);
    }

    #[tokio::test]
    async fn test_transport_error_yields_synthetic_error() {
        let body = stream::iter(vec![
            Ok(b"data: {\"status\":\"progress\",\"agent\":\"collector\"}\n\n".to_vec()),
            Err("connection reset"),
        ]);
        let stream =
            AnalysisStream::spawn(body, FrameBuffer::blank_line(), FrameDecoder::new("data:"));

        let events: Vec<_> = stream.collect().await;
        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], AnalysisEvent::Error { ref message } if message.contains("connection reset")));
    }

    #[tokio::test]
    async fn test_cancel_ends_a_stalled_stream() {
        let body = chunks(&["data: {\"status\":\"progress\",\"agent\":\"collector\"}\n\n"])
            .chain(stream::pending());
        let mut stream = spawn_over(body);

        assert!(matches!(stream.next().await, Some(AnalysisEvent::Progress { .. })));

        stream.cancel_handle().cancel();
        let rest = tokio::time::timeout(Duration::from_secs(1), stream.next())
            .await
            .unwrap();
        assert!(rest.is_none());
        assert!(stream.is_cancelled());
    }
}
