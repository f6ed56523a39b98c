use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// The error returned by the checked accessors of a view.
///
/// # Examples
///
/// ```
/// use av_view::{ArrayView, OutOfRange};
///
/// let arr = [1, 2, 3];
/// let view = ArrayView::from(&arr);
///
/// assert_eq!(view.at(3), Err(OutOfRange::Index { index: 3, len: 3 }));
/// ```
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OutOfRange {
    #[error("index {index} is out of range for a view of length {len}")]
    Index { index: usize, len: usize },

    #[error("subview of {count} elements at offset {offset} exceeds a view of length {len}")]
    Range {
        offset: usize,
        count: usize,
        len: usize,
    },
}

impl OutOfRange {
    /// Panics with this error's message.
    #[cold]
    #[inline(never)]
    #[track_caller]
    pub fn handle_error(&self) -> ! {
        panic!("{self}");
    }

    /// The length of the view the access was made against.
    #[inline]
    pub const fn len(&self) -> usize {
        match *self {
            Self::Index { len, .. } | Self::Range { len, .. } => len,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::OutOfRange;

    #[test]
    fn display() {
        let index = OutOfRange::Index { index: 5, len: 5 };
        assert_eq!(
            index.to_string(),
            "index 5 is out of range for a view of length 5"
        );

        let range = OutOfRange::Range {
            offset: 2,
            count: 4,
            len: 5,
        };
        assert_eq!(
            range.to_string(),
            "subview of 4 elements at offset 2 exceeds a view of length 5"
        );
        assert_eq!(range.len(), 5);
    }

    #[test]
    #[should_panic(expected = "index 7 is out of range for a view of length 3")]
    fn handle_error_panics() {
        OutOfRange::Index { index: 7, len: 3 }.handle_error();
    }
}
