//! Content type tags.

/// Classification tag governing a contiguous region of document text
/// (e.g. "code", "comment", "string literal").
///
/// Content types are opaque to the engine; hosts allocate their own ids.
/// Two tags are reserved: [`ContentType::DEFAULT`] and
/// [`ContentType::UNDETERMINED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentType(pub u32);

impl ContentType {
    /// Create a content type from a raw numeric identifier.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The content type of text no transition rule has claimed.
    ///
    /// A freshly attached document consists of a single partition of this
    /// type, and it is the state the scanner starts from at the top of the
    /// document.
    pub const DEFAULT: Self = Self(0);

    /// Reserved tag for text whose classification could not be determined.
    ///
    /// The partition table never stores partitions of this type; it exists
    /// for hosts that need an explicit "unknown" answer.
    pub const UNDETERMINED: Self = Self(u32::MAX);
}

impl Default for ContentType {
    fn default() -> Self {
        Self::DEFAULT
    }
}
