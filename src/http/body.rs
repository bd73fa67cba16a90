//! Buffered message bodies with single-consumer read semantics.

use std::fmt;

use bytes::Bytes;

/// A fully buffered message body with a read cursor.
///
/// `Body` models the stream semantics the logging layer depends on: a body
/// is a single-consumer resource whose `contents()` drains from the cursor
/// to the end, and a consumer that inspects a body it does not own must
/// `rewind()` it afterwards. The underlying buffer is never discarded, so
/// `as_bytes()` always exposes the full payload regardless of the cursor;
/// senders transmit from the buffer, which keeps a logging read of a
/// request body from changing the bytes that go out on the wire.
///
/// A body can also be *unreadable* (for example, a payload that was never
/// buffered); reading one yields `None` rather than an empty string so the
/// two cases stay distinguishable.
///
/// ## Example
///
/// ```rust
/// use wiretap::Body;
///
/// let mut body = Body::from("hello");
/// assert_eq!(body.contents().as_deref(), Some("hello"));
/// assert_eq!(body.contents().as_deref(), Some(""));
/// body.rewind();
/// assert_eq!(body.contents().as_deref(), Some("hello"));
/// ```
#[derive(Debug, Clone)]
pub struct Body {
    data: Bytes,
    pos: usize,
    readable: bool,
}

impl Body {
    /// Creates an empty, readable body.
    pub fn empty() -> Self {
        Self {
            data: Bytes::new(),
            pos: 0,
            readable: true,
        }
    }

    /// Creates a body whose contents cannot be read.
    ///
    /// `contents()` returns `None` for unreadable bodies, and the logging
    /// layer substitutes a fixed sentinel string for them.
    pub fn unreadable() -> Self {
        Self {
            data: Bytes::new(),
            pos: 0,
            readable: false,
        }
    }

    /// Returns `true` if the body can be read.
    pub fn is_readable(&self) -> bool {
        self.readable
    }

    /// Reads from the cursor to the end, advancing the cursor.
    ///
    /// Returns `None` when the body is unreadable. Non-UTF-8 bytes are
    /// replaced rather than rejected; a log excerpt does not need to be
    /// byte-exact.
    pub fn contents(&mut self) -> Option<String> {
        if !self.readable {
            return None;
        }
        let rest = String::from_utf8_lossy(&self.data[self.pos..]).into_owned();
        self.pos = self.data.len();
        Some(rest)
    }

    /// Resets the read cursor to the start of the buffer.
    pub fn rewind(&mut self) {
        self.pos = 0;
    }

    /// Returns the full underlying buffer, independent of the cursor.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns the buffer length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Bytes> for Body {
    fn from(data: Bytes) -> Self {
        Self {
            data,
            pos: 0,
            readable: true,
        }
    }
}

impl From<Vec<u8>> for Body {
    fn from(data: Vec<u8>) -> Self {
        Bytes::from(data).into()
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Bytes::from(text).into()
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Bytes::copy_from_slice(text.as_bytes()).into()
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.readable {
            write!(f, "Body({} bytes)", self.data.len())
        } else {
            write!(f, "Body(unreadable)")
        }
    }
}
