//! Frame Buffer
//!
//! Reassembles delimiter-separated frames from a chunked byte stream.
//! Independent of the transport: callers push whatever chunks arrive and
//! receive only frames whose terminating delimiter has been seen.

/// Delimiter used by server-sent event streams (a blank line)
pub const BLANK_LINE: &[u8] = b"\n\n";

/// Rolling buffer that yields complete frames
///
/// Bytes after the last delimiter are retained across `push` calls, so a
/// frame is never returned from a partial read. Buffering happens on raw
/// bytes, which keeps multi-byte UTF-8 characters intact when a chunk
/// boundary splits them.
///
/// Unless the delimiter itself contains `\r`, CRLF line endings are folded
/// to LF on the way in, so `\r\n\r\n` ends a frame just like `\n\n`.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    buf: Vec<u8>,
    delimiter: Vec<u8>,
    /// Offset from which the next delimiter search starts
    scan_from: usize,
    fold_crlf: bool,
    /// A `\r` ended the previous chunk; held until the next byte is known
    pending_cr: bool,
}

impl FrameBuffer {
    /// Create a buffer splitting on `delimiter`
    ///
    /// ## Panics
    /// Panics if `delimiter` is empty.
    pub fn new(delimiter: &[u8]) -> Self {
        assert!(!delimiter.is_empty(), "frame delimiter must not be empty");
        Self {
            buf: Vec::new(),
            delimiter: delimiter.to_vec(),
            scan_from: 0,
            fold_crlf: !delimiter.contains(&b'\r'),
            pending_cr: false,
        }
    }

    /// Create a buffer for server-sent event framing
    pub fn blank_line() -> Self {
        Self::new(BLANK_LINE)
    }

    /// Append a chunk and drain every complete frame
    ///
    /// ## Returns
    /// Frames in arrival order, delimiter stripped. Empty frames
    /// (consecutive delimiters) are dropped.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        if self.fold_crlf {
            self.append_folded(chunk);
        } else {
            self.buf.extend_from_slice(chunk);
        }

        let mut frames = Vec::new();
        let mut start = 0;
        let mut search = self.scan_from;
        let width = self.delimiter.len();

        while let Some(pos) = find(&self.buf[search..], &self.delimiter) {
            let end = search + pos;
            let frame = &self.buf[start..end];
            if !frame.is_empty() {
                frames.push(String::from_utf8_lossy(frame).into_owned());
            }
            start = end + width;
            search = start;
        }

        self.buf.drain(..start);
        // A delimiter may straddle the next chunk boundary.
        self.scan_from = self.buf.len().saturating_sub(width - 1);
        frames
    }

    fn append_folded(&mut self, chunk: &[u8]) {
        for &byte in chunk {
            if self.pending_cr {
                self.pending_cr = false;
                if byte != b'\n' {
                    self.buf.push(b'\r');
                }
            }
            if byte == b'\r' {
                self.pending_cr = true;
            } else {
                self.buf.push(byte);
            }
        }
    }

    /// Bytes received after the last complete frame
    ///
    /// A trailing `\r` still waiting for its `\n` is not included.
    pub fn remainder(&self) -> &[u8] {
        &self.buf
    }

    /// Whether a partial frame is pending
    pub fn has_partial(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Consume the buffer at end of stream
    ///
    /// ## Returns
    /// The trailing partial frame, if any non-whitespace bytes remain
    pub fn finish(self) -> Option<String> {
        let rest = String::from_utf8_lossy(&self.buf).into_owned();
        if rest.trim().is_empty() {
            None
        } else {
            Some(rest)
        }
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_complete_frame() {
        let mut buffer = FrameBuffer::blank_line();
        let frames = buffer.push(b"data: {\"a\":1}\n\n");
        assert_eq!(frames, vec!["data: {\"a\":1}".to_string()]);
        assert!(!buffer.has_partial());
    }

    #[test]
    fn test_split_frame_is_retained() {
        let mut buffer = FrameBuffer::blank_line();
        let frames = buffer.push(b"data: {\"status\":\"progress\"}\n\ndata: {\"sta");
        assert_eq!(frames, vec!["data: {\"status\":\"progress\"}".to_string()]);
        assert_eq!(buffer.remainder(), b"data: {\"sta");

        let frames = buffer.push(b"tus\":\"complete\"}\n\n");
        assert_eq!(frames, vec!["data: {\"status\":\"complete\"}".to_string()]);
        assert!(!buffer.has_partial());
    }

    #[test]
    fn test_delimiter_split_across_chunks() {
        let mut buffer = FrameBuffer::blank_line();
        assert!(buffer.push(b"data: x\n").is_empty());
        let frames = buffer.push(b"\ndata: y\n\n");
        assert_eq!(frames, vec!["data: x".to_string(), "data: y".to_string()]);
    }

    #[test]
    fn test_multibyte_char_split_across_chunks() {
        let text = "data: é\n\n".as_bytes();
        // 'é' is two bytes; split between them
        let split = text.iter().position(|&b| b == 0xC3).unwrap() + 1;

        let mut buffer = FrameBuffer::blank_line();
        assert!(buffer.push(&text[..split]).is_empty());
        let frames = buffer.push(&text[split..]);
        assert_eq!(frames, vec!["data: é".to_string()]);
    }

    #[test]
    fn test_empty_frames_are_dropped() {
        let mut buffer = FrameBuffer::blank_line();
        let frames = buffer.push(b"\n\n\n\ndata: z\n\n");
        assert_eq!(frames, vec!["data: z".to_string()]);
    }

    #[test]
    fn test_finish_returns_trailing_partial() {
        let mut buffer = FrameBuffer::blank_line();
        buffer.push(b"data: done\n\ndata: {\"trunc");
        assert_eq!(buffer.finish().as_deref(), Some("data: {\"trunc"));

        let mut buffer = FrameBuffer::blank_line();
        buffer.push(b"data: done\n\n\n");
        assert!(buffer.finish().is_none());
    }

    #[test]
    fn test_crlf_blank_line_ends_frame() {
        let mut buffer = FrameBuffer::blank_line();
        let frames = buffer.push(b"data: a\r\n\r\ndata: b\r\n\r\n");
        assert_eq!(frames, vec!["data: a".to_string(), "data: b".to_string()]);
        assert!(!buffer.has_partial());
    }

    #[test]
    fn test_crlf_split_across_chunks() {
        let mut buffer = FrameBuffer::blank_line();
        assert!(buffer.push(b"data: a\r\n\r").is_empty());
        let frames = buffer.push(b"\ndata: b\r");
        assert_eq!(frames, vec!["data: a".to_string()]);
        assert_eq!(buffer.remainder(), b"data: b");

        let frames = buffer.push(b"\n\r\n");
        assert_eq!(frames, vec!["data: b".to_string()]);
    }

    #[test]
    fn test_lone_cr_is_kept() {
        let mut buffer = FrameBuffer::blank_line();
        let frames = buffer.push(b"data: a\rb\n\n");
        assert_eq!(frames, vec!["data: a\rb".to_string()]);
    }

    #[test]
    fn test_custom_delimiter() {
        let mut buffer = FrameBuffer::new(b"|");
        assert_eq!(buffer.push(b"a|b|c"), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(buffer.remainder(), b"c");
    }
}
