//! This crate provides non-owning views over contiguous runs of elements.
//!
//! A view is a pointer and a length, borrowed from storage owned by someone
//! else. It never allocates, copies, or frees the elements it observes.
//!
//! **ArrayView** and **ArrayViewMut**
//!
//! [`ArrayView<'a, T>`] and [`ArrayViewMut<'a, T>`] are `&'a [T]` and
//! `&'a mut [T]` equivalents that also admit a null empty view. A mutable view
//! converts into a read-only one, never the reverse.
//!
//! Element access comes in two families:
//!
//! - checked: [`at`](ArrayView::at), [`get`](ArrayView::get), indexing,
//!   [`front`](ArrayView::front), [`back`](ArrayView::back) and
//!   [`subview`](ArrayView::subview);
//! - unchecked: the `unsafe` `*_unchecked` methods. With the `debug` feature
//!   they assert their preconditions in debug builds.
//!
//! **Contiguous** and **ContiguousMut**
//!
//! Views are built from any type implementing [`Contiguous`]: fixed-size
//! arrays, slices, `str`, `CStr`, and with the `alloc` feature `Vec`,
//! `Box<[T]>` and `CString`. The element type must match exactly. The
//! [`observe`] module exposes the underlying pointer and length observers.
//!
//! ```
//! use av_view::{ArrayView, ArrayViewMut};
//!
//! let mut arr = [3, 1, 2];
//! let mut view = ArrayViewMut::from(&mut arr);
//! view.as_mut_slice().sort();
//!
//! let view = ArrayView::from(view);
//! assert_eq!(view.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
//! assert_eq!(view.iter_rev().copied().collect::<Vec<_>>(), [3, 2, 1]);
//! ```
#![expect(unsafe_code, reason = "Raw pointers are inherently unsafe.")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod macros;
mod view;
mod view_mut;

pub mod observe;

// -----------------------------------------------------------------------------
// Top-level exports

pub use error::OutOfRange;
pub use observe::{Contiguous, ContiguousMut};
pub use view::ArrayView;
pub use view_mut::ArrayViewMut;
