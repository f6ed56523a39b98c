//! Observers for contiguous element sources.
//!
//! A view never depends on the concrete container it borrows from. It only
//! needs the address of the first element and the element count, which this
//! module exposes through the [`Contiguous`] and [`ContiguousMut`] traits and
//! the free functions [`data`], [`data_mut`] and [`len`].

use core::ffi::CStr;

// -----------------------------------------------------------------------------
// Contiguous

/// A value whose elements occupy consecutive memory.
///
/// # Safety
///
/// For as long as `self` is borrowed:
///
/// - [`observe_ptr`](Self::observe_ptr) must return a pointer that is valid
///   for reads of [`observe_len`](Self::observe_len) consecutive, initialized
///   `Self::Element`s.
/// - The pointer must be non-null and properly aligned whenever the length is
///   greater than zero.
/// - Both methods must be side-effect free and must keep returning the same
///   values while the borrow lasts.
///
/// # Examples
///
/// ```
/// use av_view::Contiguous;
///
/// let arr = [1, 2, 3];
/// assert_eq!(arr.observe_len(), 3);
/// assert_eq!(arr.observe_ptr(), arr.as_ptr());
/// ```
pub unsafe trait Contiguous {
    /// The exact element type. Views only accept sources whose element type
    /// matches theirs.
    type Element;

    /// Returns the address of the first element.
    fn observe_ptr(&self) -> *const Self::Element;

    /// Returns the number of elements.
    fn observe_len(&self) -> usize;
}

/// A [`Contiguous`] value whose elements may be written through an exclusive
/// borrow.
///
/// # Safety
///
/// In addition to the [`Contiguous`] contract,
/// [`observe_mut_ptr`](Self::observe_mut_ptr) must return a pointer derived
/// from the exclusive borrow that is valid for reads and writes of
/// `observe_len()` elements while the borrow lasts.
pub unsafe trait ContiguousMut: Contiguous {
    /// Returns the mutable address of the first element.
    fn observe_mut_ptr(&mut self) -> *mut Self::Element;
}

// -----------------------------------------------------------------------------
// Free observers

/// Returns the address of the first element of `source`.
///
/// # Examples
///
/// ```
/// let arr = [0u8; 10];
/// assert_eq!(av_view::observe::data(&arr), arr.as_ptr());
/// ```
#[inline(always)]
pub fn data<S: Contiguous + ?Sized>(source: &S) -> *const S::Element {
    source.observe_ptr()
}

/// Returns the mutable address of the first element of `source`.
#[inline(always)]
pub fn data_mut<S: ContiguousMut + ?Sized>(source: &mut S) -> *mut S::Element {
    source.observe_mut_ptr()
}

/// Returns the number of elements in `source`.
///
/// For fixed-size arrays this is the compile-time length, for containers the
/// runtime length, and for C strings the byte count including the trailing
/// NUL.
///
/// # Examples
///
/// ```
/// assert_eq!(av_view::observe::len(&[1, 2, 3, 4]), 4);
/// assert_eq!(av_view::observe::len(c"abc"), 4);
/// ```
#[inline(always)]
pub fn len<S: Contiguous + ?Sized>(source: &S) -> usize {
    source.observe_len()
}

// -----------------------------------------------------------------------------
// Core impls

unsafe impl<T, const N: usize> Contiguous for [T; N] {
    type Element = T;

    #[inline(always)]
    fn observe_ptr(&self) -> *const T {
        self.as_ptr()
    }

    #[inline(always)]
    fn observe_len(&self) -> usize {
        N
    }
}

unsafe impl<T, const N: usize> ContiguousMut for [T; N] {
    #[inline(always)]
    fn observe_mut_ptr(&mut self) -> *mut T {
        self.as_mut_ptr()
    }
}

unsafe impl<T> Contiguous for [T] {
    type Element = T;

    #[inline(always)]
    fn observe_ptr(&self) -> *const T {
        self.as_ptr()
    }

    #[inline(always)]
    fn observe_len(&self) -> usize {
        <[T]>::len(self)
    }
}

unsafe impl<T> ContiguousMut for [T] {
    #[inline(always)]
    fn observe_mut_ptr(&mut self) -> *mut T {
        self.as_mut_ptr()
    }
}

/// UTF-8 bytes, without any terminator.
unsafe impl Contiguous for str {
    type Element = u8;

    #[inline(always)]
    fn observe_ptr(&self) -> *const u8 {
        self.as_ptr()
    }

    #[inline(always)]
    fn observe_len(&self) -> usize {
        str::len(self)
    }
}

/// Bytes including the trailing NUL, so `back()` of a view is `b'\0'`.
unsafe impl Contiguous for CStr {
    type Element = u8;

    #[inline(always)]
    fn observe_ptr(&self) -> *const u8 {
        self.as_ptr().cast()
    }

    #[inline(always)]
    fn observe_len(&self) -> usize {
        self.to_bytes_with_nul().len()
    }
}

// -----------------------------------------------------------------------------
// Alloc impls

#[cfg(feature = "alloc")]
mod alloc_impls {
    use alloc::boxed::Box;
    use alloc::ffi::CString;
    use alloc::vec::Vec;

    use super::{Contiguous, ContiguousMut};

    unsafe impl<T> Contiguous for Vec<T> {
        type Element = T;

        #[inline(always)]
        fn observe_ptr(&self) -> *const T {
            self.as_ptr()
        }

        #[inline(always)]
        fn observe_len(&self) -> usize {
            Vec::len(self)
        }
    }

    unsafe impl<T> ContiguousMut for Vec<T> {
        #[inline(always)]
        fn observe_mut_ptr(&mut self) -> *mut T {
            self.as_mut_ptr()
        }
    }

    unsafe impl<T> Contiguous for Box<[T]> {
        type Element = T;

        #[inline(always)]
        fn observe_ptr(&self) -> *const T {
            self.as_ptr()
        }

        #[inline(always)]
        fn observe_len(&self) -> usize {
            <[T]>::len(self)
        }
    }

    unsafe impl<T> ContiguousMut for Box<[T]> {
        #[inline(always)]
        fn observe_mut_ptr(&mut self) -> *mut T {
            self.as_mut_ptr()
        }
    }

    unsafe impl Contiguous for CString {
        type Element = u8;

        #[inline(always)]
        fn observe_ptr(&self) -> *const u8 {
            self.as_ptr().cast()
        }

        #[inline(always)]
        fn observe_len(&self) -> usize {
            self.as_bytes_with_nul().len()
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
