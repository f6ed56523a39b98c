use core::iter::Rev;
use core::marker::PhantomData;
use core::ops::Index;
use core::ptr::{self, NonNull};
use core::slice::{self, Iter};

use crate::macros::impl_view;
use crate::{ArrayViewMut, Contiguous, OutOfRange};

// -----------------------------------------------------------------------------
// ArrayView

/// A read-only view over a contiguous run of `T`, similar to `&'a [T]`.
///
/// The view stores a pointer and a length and never owns its elements.
/// Unlike a slice, a default view has a null data pointer.
///
/// It can be built from any [`Contiguous`] source whose element type is exactly
/// `T`, and from an [`ArrayViewMut`] over the same `T`. There is no way back
/// from an `ArrayView` to an `ArrayViewMut`.
///
/// # Examples
///
/// ```
/// use av_view::ArrayView;
///
/// let arr = [1, 2, 3, 4, 5];
/// let view = ArrayView::from(&arr);
///
/// assert_eq!(view.len(), 5);
/// assert_eq!(view.front(), Some(&1));
/// assert_eq!(view.at(4), Ok(&5));
/// assert!(view.at(5).is_err());
///
/// let tail = view.last(2);
/// assert_eq!(tail.as_slice(), &[4, 5]);
/// ```
pub struct ArrayView<'a, T> {
    ptr: *const T,
    len: usize,
    _marker: PhantomData<&'a [T]>,
}

impl_view!(ArrayView);

// SAFETY: `ArrayView` behaves like `&[T]`.
unsafe impl<T: Sync> Send for ArrayView<'_, T> {}
// SAFETY: `ArrayView` behaves like `&[T]`.
unsafe impl<T: Sync> Sync for ArrayView<'_, T> {}

impl<T> Clone for ArrayView<'_, T> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArrayView<'_, T> {}

impl<'a, T> ArrayView<'a, T> {
    /// Creates an empty view with a null data pointer.
    #[inline(always)]
    pub const fn empty() -> Self {
        Self {
            ptr: ptr::null(),
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Creates a view from a pointer and a length, storing both verbatim.
    ///
    /// `(null, 0)` and `(non-null, 0)` are both valid empty views.
    ///
    /// # Safety
    ///
    /// - If `len > 0`, `ptr` must be non-null, aligned, and valid for reads of
    ///   `len` initialized elements.
    /// - The elements must not be mutated during `'a`, except through
    ///   interior mutability.
    ///
    /// # Examples
    ///
    /// ```
    /// use av_view::ArrayView;
    ///
    /// let arr = [0u32; 5];
    /// let view = unsafe { ArrayView::from_raw_parts(arr.as_ptr(), 5) };
    /// assert_eq!(view.as_ptr(), arr.as_ptr());
    ///
    /// let null = unsafe { ArrayView::<u32>::from_raw_parts(core::ptr::null(), 0) };
    /// assert!(null.is_empty());
    /// ```
    #[inline(always)]
    pub const unsafe fn from_raw_parts(ptr: *const T, len: usize) -> Self {
        Self {
            ptr,
            len,
            _marker: PhantomData,
        }
    }

    /// Creates a view over any contiguous source with element type `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use av_view::ArrayView;
    ///
    /// let arr = [1, 2, 3];
    /// let view = ArrayView::new(&arr);
    /// assert_eq!(view.as_ptr(), arr.as_ptr());
    /// ```
    #[inline]
    pub fn new<S: Contiguous<Element = T> + ?Sized>(source: &'a S) -> Self {
        // SAFETY: `Contiguous` guarantees the range is readable while `source`
        // is borrowed, which is `'a`.
        unsafe { Self::from_raw_parts(source.observe_ptr(), source.observe_len()) }
    }

    /// Converts a slice to a view.
    ///
    /// [`From::from`] is not const, but this is.
    #[inline(always)]
    pub const fn from_slice(slice: &'a [T]) -> Self {
        Self {
            ptr: slice.as_ptr(),
            len: slice.len(),
            _marker: PhantomData,
        }
    }

    /// Returns the data pointer. It is null only for a null empty view.
    #[inline(always)]
    pub const fn as_ptr(&self) -> *const T {
        self.ptr
    }

    /// Returns the observed elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        let ptr = if self.ptr.is_null() {
            NonNull::<T>::dangling().as_ptr().cast_const()
        } else {
            self.ptr
        };
        // SAFETY: Non-null with `len` readable elements, or dangling with
        // `len == 0`.
        unsafe { slice::from_raw_parts(ptr, self.len) }
    }

    /// Returns the same range with read-only access.
    ///
    /// An `ArrayView` is already read-only, so this is the identity.
    #[inline(always)]
    pub const fn as_const(self) -> ArrayView<'a, T> {
        self
    }

    // -------------------------------------------------------------------------
    // Element access

    /// Returns the element at `index`, or `None` if out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&'a T> {
        self.as_slice().get(index)
    }

    /// Returns the element at `index`.
    ///
    /// Fails with [`OutOfRange::Index`] when `index >= len()`.
    #[inline]
    pub fn at(&self, index: usize) -> Result<&'a T, OutOfRange> {
        match self.get(index) {
            Some(elem) => Ok(elem),
            None => {
                let err = OutOfRange::Index {
                    index,
                    len: self.len,
                };
                log::debug!("ArrayView::at -> {err}");
                Err(err)
            }
        }
    }

    /// Returns the element at `index` without bounds checks.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len()`.
    #[cfg_attr(debug_assertions, track_caller)]
    #[cfg_attr(not(debug_assertions), inline(always))]
    pub unsafe fn get_unchecked(&self, index: usize) -> &'a T {
        #[cfg(all(debug_assertions, feature = "debug"))]
        assert!(index < self.len, "tried to index out-of-bounds of an array view");

        // SAFETY: `index` is in-bounds so the resulting pointer is valid to deref.
        unsafe { &*self.ptr.add(index) }
    }

    /// Returns the first element, or `None` if the view is empty.
    #[inline]
    pub fn front(&self) -> Option<&'a T> {
        self.as_slice().first()
    }

    /// Returns the last element, or `None` if the view is empty.
    #[inline]
    pub fn back(&self) -> Option<&'a T> {
        self.as_slice().last()
    }

    /// Returns the first element without checking for emptiness.
    ///
    /// # Safety
    ///
    /// The view must not be empty.
    #[cfg_attr(debug_assertions, track_caller)]
    #[inline]
    pub unsafe fn front_unchecked(&self) -> &'a T {
        // SAFETY: non-empty, so index 0 is in-bounds.
        unsafe { self.get_unchecked(0) }
    }

    /// Returns the last element without checking for emptiness.
    ///
    /// # Safety
    ///
    /// The view must not be empty.
    #[cfg_attr(debug_assertions, track_caller)]
    #[inline]
    pub unsafe fn back_unchecked(&self) -> &'a T {
        // SAFETY: non-empty, so `len - 1` is in-bounds.
        unsafe { self.get_unchecked(self.len.wrapping_sub(1)) }
    }

    // -------------------------------------------------------------------------
    // Iteration

    /// Returns a random-access iterator over the elements in storage order.
    #[inline]
    pub fn iter(&self) -> Iter<'a, T> {
        self.as_slice().iter()
    }

    /// Returns an iterator over the elements from last to first.
    #[inline]
    pub fn iter_rev(&self) -> Rev<Iter<'a, T>> {
        self.iter().rev()
    }

    // -------------------------------------------------------------------------
    // Derived views

    /// Returns a view of `count` elements starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + count > len()`.
    #[track_caller]
    #[inline]
    pub fn subview(self, offset: usize, count: usize) -> Self {
        match self.try_subview(offset, count) {
            Ok(view) => view,
            Err(err) => err.handle_error(),
        }
    }

    /// Returns a view of `count` elements starting at `offset`, or
    /// [`OutOfRange::Range`] if that range exceeds the view.
    #[inline]
    pub fn try_subview(self, offset: usize, count: usize) -> Result<Self, OutOfRange> {
        match offset.checked_add(count) {
            // SAFETY: the range was just checked.
            Some(end) if end <= self.len => Ok(unsafe { self.subview_unchecked(offset, count) }),
            _ => Err(OutOfRange::Range {
                offset,
                count,
                len: self.len,
            }),
        }
    }

    /// Returns a view of `count` elements starting at `offset` without
    /// bounds checks.
    ///
    /// # Safety
    ///
    /// `offset + count` must not exceed `len()`.
    #[cfg_attr(debug_assertions, track_caller)]
    #[cfg_attr(not(debug_assertions), inline(always))]
    pub unsafe fn subview_unchecked(self, offset: usize, count: usize) -> Self {
        #[cfg(all(debug_assertions, feature = "debug"))]
        assert!(
            offset.checked_add(count).is_some_and(|end| end <= self.len),
            "tried to take a subview out-of-bounds of an array view"
        );

        // SAFETY: The range lies inside the original one.
        unsafe { Self::from_raw_parts(self.ptr.wrapping_add(offset), count) }
    }

    /// Returns a view of the leading `count` elements.
    ///
    /// # Panics
    ///
    /// Panics if `count > len()`.
    #[track_caller]
    #[inline]
    pub fn first(self, count: usize) -> Self {
        self.subview(0, count)
    }

    /// Returns a view of the trailing `count` elements.
    ///
    /// # Panics
    ///
    /// Panics if `count > len()`.
    #[track_caller]
    #[inline]
    pub fn last(self, count: usize) -> Self {
        let offset = self.len.checked_sub(count).unwrap_or(self.len);
        self.subview(offset, count)
    }
}

// -----------------------------------------------------------------------------
// Conversions

impl<'a, S> From<&'a S> for ArrayView<'a, S::Element>
where
    S: Contiguous + ?Sized,
{
    #[inline]
    fn from(source: &'a S) -> Self {
        Self::new(source)
    }
}

impl<'a, T> From<ArrayViewMut<'a, T>> for ArrayView<'a, T> {
    #[inline]
    fn from(view: ArrayViewMut<'a, T>) -> Self {
        view.into_const()
    }
}

impl<T> AsRef<[T]> for ArrayView<'_, T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> Index<usize> for ArrayView<'_, T> {
    type Output = T;

    #[track_caller]
    #[inline]
    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(elem) => elem,
            Err(err) => err.handle_error(),
        }
    }
}

impl<'a, T> IntoIterator for ArrayView<'a, T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &ArrayView<'a, T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::ptr;

    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::ArrayView;
    use crate::{ArrayViewMut, OutOfRange};

    struct Expression;

    struct UnaryExpression {
        _base: Expression,
    }

    impl core::ops::Deref for UnaryExpression {
        type Target = Expression;

        fn deref(&self) -> &Expression {
            &self._base
        }
    }

    assert_impl_all!(ArrayView<'static, Expression>: From<&'static [Expression; 5]>);
    assert_not_impl_any!(ArrayView<'static, Expression>: From<&'static [UnaryExpression; 5]>);
    assert_not_impl_any!(ArrayView<'static, u32>: From<&'static [i32; 5]>);
    assert_impl_all!(ArrayView<'static, i32>: From<ArrayViewMut<'static, i32>>, Copy);

    #[test]
    fn is_sync_send() {
        use core::cell::Cell;

        fn is_send<T: Send>() {}
        fn is_sync<T: Sync>() {}

        is_send::<ArrayView<'_, i32>>();
        is_sync::<ArrayView<'_, i32>>();

        assert_not_impl_any!(ArrayView<'static, Cell<i32>>: Send, Sync);
    }

    #[test]
    fn default_is_null() {
        let view = ArrayView::<i32>::default();
        assert!(view.is_empty());
        assert!(view.as_ptr().is_null());
        assert_eq!(view.len(), 0);
        assert_eq!(view.as_slice(), &[] as &[i32]);
        assert_eq!(view.iter().count(), 0);
    }

    #[test]
    fn from_raw_parts() {
        let arr = [0i32; 5];
        let view = unsafe { ArrayView::from_raw_parts(arr.as_ptr(), 5) };
        assert!(!view.is_empty());
        assert_eq!(view.as_ptr(), arr.as_ptr());
        assert_eq!(view.len(), 5);

        let null = unsafe { ArrayView::<i32>::from_raw_parts(ptr::null(), 0) };
        assert!(null.is_empty());
        assert!(null.as_ptr().is_null());

        let dangling = unsafe { ArrayView::from_raw_parts(arr.as_ptr(), 0) };
        assert!(dangling.is_empty());
        assert_eq!(dangling.as_ptr(), arr.as_ptr());
    }

    #[test]
    fn copies_share_range() {
        let arr = [0i32; 5];
        let view = ArrayView::from(&arr);

        let copy = view;
        assert_eq!(copy.as_ptr(), view.as_ptr());
        assert_eq!(copy.len(), view.len());

        let from_ref = ArrayView::new(&view);
        assert_eq!(from_ref.as_ptr(), view.as_ptr());
        assert_eq!(from_ref.len(), view.len());
    }

    #[test]
    fn from_sources() {
        let arr = [0i32; 5];
        let view = ArrayView::from(&arr);
        assert_eq!(view.as_ptr(), &raw const arr[0]);
        assert_eq!(view.len(), 5);

        let slice = &arr[1..];
        let view = ArrayView::from(slice);
        assert_eq!(view.as_ptr(), slice.as_ptr());
        assert_eq!(view.len(), 4);

        const CONST_VIEW: ArrayView<'static, u8> = ArrayView::from_slice(b"abc");
        assert_eq!(CONST_VIEW.len(), 3);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn from_vec() {
        use alloc::vec;

        let vec = vec![0i32; 10];
        let view = ArrayView::from(&vec);
        assert_eq!(view.as_ptr(), vec.as_ptr());
        assert_eq!(view.len(), vec.len());
    }

    #[test]
    fn from_c_string_literal() {
        let view = ArrayView::from(c"Lorem ipsum dolor sit amet");
        assert_eq!(view.len(), 27);
        assert_eq!(view.front(), Some(&b'L'));
        assert_eq!(view.back(), Some(&b'\0'));
    }

    #[test]
    fn from_str() {
        let view = ArrayView::from("Lorem");
        assert_eq!(view.len(), 5);
        assert_eq!(view.back(), Some(&b'm'));
    }

    #[test]
    fn at_matches_unchecked() {
        let arr = [10, 20, 30, 40, 50];
        let view = ArrayView::from(&arr);

        for i in 0..view.len() {
            let checked = view.at(i).unwrap();
            let unchecked = unsafe { view.get_unchecked(i) };
            assert!(ptr::eq(checked, unchecked));
            assert!(ptr::eq(&view[i], unchecked));
        }

        assert_eq!(view.at(5), Err(OutOfRange::Index { index: 5, len: 5 }));
        assert_eq!(view.at(usize::MAX).unwrap_err().len(), 5);
        assert_eq!(view.get(5), None);
    }

    #[test]
    #[should_panic(expected = "index 3 is out of range for a view of length 3")]
    fn index_out_of_range_panics() {
        let arr = [1, 2, 3];
        let view = ArrayView::from(&arr);
        let _elem = view[3];
    }

    #[test]
    fn front_back() {
        let arr = [1, 2, 3];
        let view = ArrayView::from(&arr);
        assert_eq!(view.front(), Some(&1));
        assert_eq!(view.back(), Some(&3));
        assert_eq!(unsafe { *view.front_unchecked() }, 1);
        assert_eq!(unsafe { *view.back_unchecked() }, 3);

        let empty = ArrayView::<i32>::empty();
        assert_eq!(empty.front(), None);
        assert_eq!(empty.back(), None);
    }

    #[test]
    fn null_view_reads_as_empty_slice() {
        let null = ArrayView::<u64>::empty();
        assert_eq!(null.as_slice().len(), 0);
        assert_eq!(null.get(0), None);
        assert!(null.at(0).is_err());
        assert_eq!(null.iter_rev().next(), None);
        assert!(null.last(0).as_ptr().is_null());
        assert!(null.try_subview(0, 1).is_err());

        let copied = ArrayView::new(&null);
        assert!(copied.as_ptr().is_null());
        assert!(copied.is_empty());

        let units = [(), (), ()];
        let view = ArrayView::from(&units);
        assert_eq!(view.len(), 3);
        assert_eq!(view.iter().count(), 3);
        assert_eq!(view.last(1).len(), 1);
    }

    #[test]
    fn iterates_forward_and_backward() {
        let arr = [1, 2, 3];
        let view = ArrayView::from(&arr);

        let mut iter = view.iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.clone().nth(2), Some(&3));
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.as_slice(), &[2, 3]);

        let mut rev = view.iter_rev();
        assert_eq!(rev.next(), Some(&3));
        assert_eq!(rev.next(), Some(&2));
        assert_eq!(rev.next(), Some(&1));
        assert_eq!(rev.next(), None);

        let mut sum = 0;
        for x in view {
            sum += *x;
        }
        assert_eq!(sum, 6);
        assert_eq!((&view).into_iter().copied().max(), Some(3));
    }

    #[test]
    fn as_const_is_identity() {
        let arr = [1, 2, 3];
        let view = ArrayView::from(&arr);
        let const_view: ArrayView<'_, i32> = view.as_const();
        assert_eq!(const_view.as_ptr(), view.as_ptr());
        assert_eq!(const_view.len(), view.len());
    }

    #[test]
    fn subviews() {
        let arr = [0, 1, 2, 3, 4];
        let view = ArrayView::from(&arr);

        let sub = view.subview(1, 3);
        assert_eq!(sub.as_ptr(), &raw const arr[1]);
        assert_eq!(sub.len(), 3);

        let first = view.first(3);
        assert_eq!(first.as_ptr(), &raw const arr[0]);
        assert_eq!(first.len(), 3);

        let last = view.last(3);
        assert_eq!(last.as_ptr(), &raw const arr[2]);
        assert_eq!(last.len(), 3);
        assert_eq!(last.as_slice(), &[2, 3, 4]);

        assert_eq!(view.subview(5, 0).len(), 0);
        assert_eq!(
            view.try_subview(3, 3).unwrap_err(),
            OutOfRange::Range {
                offset: 3,
                count: 3,
                len: 5
            }
        );
        assert!(view.try_subview(usize::MAX, 2).is_err());

        let empty = ArrayView::<i32>::empty();
        assert!(empty.first(0).as_ptr().is_null());
    }

    #[test]
    #[should_panic(expected = "exceeds a view of length 5")]
    fn last_too_long_panics() {
        let arr = [0; 5];
        let _ = ArrayView::from(&arr).last(6);
    }

    #[test]
    fn swap_is_involution() {
        let arr_1 = [1, 2, 3];
        let arr_2 = [5, 6, 7, 8, 9];
        let mut view_1 = ArrayView::from(&arr_1);
        let mut view_2 = ArrayView::from(&arr_2);

        view_1.swap(&mut view_2);
        assert_eq!(view_1.as_ptr(), &raw const arr_2[0]);
        assert_eq!(view_1.len(), 5);
        assert_eq!(view_2.as_ptr(), &raw const arr_1[0]);
        assert_eq!(view_2.len(), 3);

        view_1.swap(&mut view_2);
        assert_eq!(view_1.as_ptr(), arr_1.as_ptr());
        assert_eq!(view_1.len(), 3);
        assert_eq!(view_2.as_ptr(), arr_2.as_ptr());
        assert_eq!(view_2.len(), 5);
    }
}
