use core::iter::Rev;
use core::marker::PhantomData;
use core::ops::{Index, IndexMut};
use core::ptr::{self, NonNull};
use core::slice::{self, Iter, IterMut};

use crate::macros::impl_view;
use crate::{ArrayView, ContiguousMut, OutOfRange};

// -----------------------------------------------------------------------------
// ArrayViewMut

/// A mutable view over a contiguous run of `T`, similar to `&'a mut [T]`.
///
/// It converts into an [`ArrayView`] over the same range, but never the other
/// way around. It is not `Copy`; use [`reborrow`](Self::reborrow) to get a
/// shorter-lived copy.
///
/// # Examples
///
/// ```
/// use av_view::{ArrayView, ArrayViewMut};
///
/// let mut arr = [0; 5];
/// let mut view = ArrayViewMut::from(&mut arr);
///
/// *view.front_mut().unwrap() = 10;
/// view[3] = 30;
///
/// let view: ArrayView<'_, i32> = view.into();
/// assert_eq!(view.as_slice(), &[10, 0, 0, 30, 0]);
/// ```
pub struct ArrayViewMut<'a, T> {
    ptr: *mut T,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

impl_view!(ArrayViewMut);

// SAFETY: `ArrayViewMut` behaves like `&mut [T]`.
unsafe impl<T: Send> Send for ArrayViewMut<'_, T> {}
// SAFETY: `ArrayViewMut` behaves like `&mut [T]`.
unsafe impl<T: Sync> Sync for ArrayViewMut<'_, T> {}

impl<'a, T> ArrayViewMut<'a, T> {
    /// Creates an empty view with a null data pointer.
    #[inline(always)]
    pub const fn empty() -> Self {
        Self {
            ptr: ptr::null_mut(),
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Creates a view from a pointer and a length, storing both verbatim.
    ///
    /// # Safety
    ///
    /// - If `len > 0`, `ptr` must be non-null, aligned, and valid for reads
    ///   and writes of `len` initialized elements.
    /// - The elements must not be accessed through any other pointer during
    ///   `'a`.
    #[inline(always)]
    pub const unsafe fn from_raw_parts(ptr: *mut T, len: usize) -> Self {
        Self {
            ptr,
            len,
            _marker: PhantomData,
        }
    }

    /// Creates a view over any mutable contiguous source with element type `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use av_view::ArrayViewMut;
    ///
    /// let mut arr = [1, 2, 3];
    /// let mut view = ArrayViewMut::new(&mut arr);
    /// view.iter_mut().for_each(|x| *x *= 2);
    /// assert_eq!(arr, [2, 4, 6]);
    /// ```
    #[inline]
    pub fn new<S: ContiguousMut<Element = T> + ?Sized>(source: &'a mut S) -> Self {
        let len = source.observe_len();
        let ptr = source.observe_mut_ptr();
        // SAFETY: `ContiguousMut` guarantees exclusive access to the range
        // while `source` is borrowed, which is `'a`.
        unsafe { Self::from_raw_parts(ptr, len) }
    }

    /// Converts a mutable slice to a view.
    #[inline(always)]
    pub const fn from_mut_slice(slice: &'a mut [T]) -> Self {
        Self {
            len: slice.len(),
            ptr: slice.as_mut_ptr(),
            _marker: PhantomData,
        }
    }

    /// Returns the data pointer. It is null only for a null empty view.
    #[inline(always)]
    pub const fn as_ptr(&self) -> *const T {
        self.ptr.cast_const()
    }

    /// Returns the mutable data pointer.
    #[inline(always)]
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr
    }

    #[inline(always)]
    fn data_or_dangling(&self) -> *mut T {
        if self.ptr.is_null() {
            NonNull::<T>::dangling().as_ptr()
        } else {
            self.ptr
        }
    }

    /// Returns the observed elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: Non-null with `len` readable elements, or dangling with
        // `len == 0`.
        unsafe { slice::from_raw_parts(self.data_or_dangling(), self.len) }
    }

    /// Returns the observed elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: See `as_slice`. `&mut self` keeps the access exclusive.
        unsafe { slice::from_raw_parts_mut(self.data_or_dangling(), self.len) }
    }

    /// Converts the view into a mutable slice with the full lifetime `'a`.
    #[inline]
    pub fn into_slice(self) -> &'a mut [T] {
        // SAFETY: See `as_slice`. `self` is consumed, so the slice is the only
        // access path left.
        unsafe { slice::from_raw_parts_mut(self.data_or_dangling(), self.len) }
    }

    /// Gets a copy of the view with a shorter lifetime.
    ///
    /// # Examples
    ///
    /// ```
    /// use av_view::ArrayViewMut;
    ///
    /// fn zero(view: ArrayViewMut<'_, u8>) {
    ///     view.into_slice().fill(0);
    /// }
    ///
    /// let mut arr = [1u8, 2, 3];
    /// let mut view = ArrayViewMut::from(&mut arr);
    /// zero(view.reborrow().last(2));
    /// assert_eq!(view.as_slice(), &[1, 0, 0]);
    /// ```
    #[inline(always)]
    pub const fn reborrow(&mut self) -> ArrayViewMut<'_, T> {
        // '_ instead of 'a
        ArrayViewMut {
            ptr: self.ptr,
            len: self.len,
            _marker: PhantomData,
        }
    }

    /// Returns a read-only view of the same range, borrowing `self`.
    #[inline(always)]
    pub const fn as_const(&self) -> ArrayView<'_, T> {
        // SAFETY: The shared borrow of `self` forbids writes through it.
        unsafe { ArrayView::from_raw_parts(self.ptr.cast_const(), self.len) }
    }

    /// Converts into a read-only view of the same range with lifetime `'a`.
    #[inline(always)]
    pub const fn into_const(self) -> ArrayView<'a, T> {
        // SAFETY: `self` is consumed, so no write access remains.
        unsafe { ArrayView::from_raw_parts(self.ptr.cast_const(), self.len) }
    }

    // -------------------------------------------------------------------------
    // Element access

    /// Returns the element at `index`, or `None` if out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Returns the element at `index` mutably, or `None` if out of range.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Returns the element at `index`.
    ///
    /// Fails with [`OutOfRange::Index`] when `index >= len()`.
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, OutOfRange> {
        let len = self.len;
        self.get(index).ok_or_else(|| out_of_range(index, len))
    }

    /// Returns the element at `index` mutably.
    ///
    /// Fails with [`OutOfRange::Index`] when `index >= len()`.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        let len = self.len;
        self.get_mut(index).ok_or_else(|| out_of_range(index, len))
    }

    /// Returns the element at `index` without bounds checks.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len()`.
    #[cfg_attr(debug_assertions, track_caller)]
    #[cfg_attr(not(debug_assertions), inline(always))]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        #[cfg(all(debug_assertions, feature = "debug"))]
        assert!(index < self.len, "tried to index out-of-bounds of an array view");

        // SAFETY: `index` is in-bounds so the resulting pointer is valid to deref.
        unsafe { &*self.ptr.add(index) }
    }

    /// Returns the element at `index` mutably without bounds checks.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len()`.
    #[cfg_attr(debug_assertions, track_caller)]
    #[cfg_attr(not(debug_assertions), inline(always))]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        #[cfg(all(debug_assertions, feature = "debug"))]
        assert!(index < self.len, "tried to index out-of-bounds of an array view");

        // SAFETY: `index` is in-bounds and `&mut self` is exclusive.
        unsafe { &mut *self.ptr.add(index) }
    }

    /// Returns the first element, or `None` if the view is empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Returns the first element mutably, or `None` if the view is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// Returns the last element, or `None` if the view is empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Returns the last element mutably, or `None` if the view is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Returns the first element without checking for emptiness.
    ///
    /// # Safety
    ///
    /// The view must not be empty.
    #[cfg_attr(debug_assertions, track_caller)]
    #[inline]
    pub unsafe fn front_unchecked(&self) -> &T {
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
    pub unsafe fn back_unchecked(&self) -> &T {
        // SAFETY: non-empty, so `len - 1` is in-bounds.
        unsafe { self.get_unchecked(self.len.wrapping_sub(1)) }
    }

    /// Returns the first element mutably without checking for emptiness.
    ///
    /// # Safety
    ///
    /// The view must not be empty.
    #[cfg_attr(debug_assertions, track_caller)]
    #[inline]
    pub unsafe fn front_unchecked_mut(&mut self) -> &mut T {
        // SAFETY: non-empty, so index 0 is in-bounds.
        unsafe { self.get_unchecked_mut(0) }
    }

    /// Returns the last element mutably without checking for emptiness.
    ///
    /// # Safety
    ///
    /// The view must not be empty.
    #[cfg_attr(debug_assertions, track_caller)]
    #[inline]
    pub unsafe fn back_unchecked_mut(&mut self) -> &mut T {
        let index = self.len.wrapping_sub(1);
        // SAFETY: non-empty, so `len - 1` is in-bounds.
        unsafe { self.get_unchecked_mut(index) }
    }

    // -------------------------------------------------------------------------
    // Iteration

    /// Returns a random-access iterator over the elements in storage order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns a mutable iterator over the elements in storage order.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Returns an iterator over the elements from last to first.
    #[inline]
    pub fn iter_rev(&self) -> Rev<Iter<'_, T>> {
        self.iter().rev()
    }

    // -------------------------------------------------------------------------
    // Derived views

    /// Returns a view of `count` elements starting at `offset`.
    ///
    /// Use [`reborrow`](Self::reborrow) first to keep `self` usable.
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

#[cold]
#[inline(never)]
fn out_of_range(index: usize, len: usize) -> OutOfRange {
    let err = OutOfRange::Index { index, len };
    log::debug!("ArrayViewMut::at -> {err}");
    err
}

// -----------------------------------------------------------------------------
// Conversions

impl<'a, S> From<&'a mut S> for ArrayViewMut<'a, S::Element>
where
    S: ContiguousMut + ?Sized,
{
    #[inline]
    fn from(source: &'a mut S) -> Self {
        Self::new(source)
    }
}

unsafe impl<T> ContiguousMut for ArrayViewMut<'_, T> {
    #[inline(always)]
    fn observe_mut_ptr(&mut self) -> *mut T {
        self.ptr
    }
}

impl<T> AsRef<[T]> for ArrayViewMut<'_, T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for ArrayViewMut<'_, T> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Index<usize> for ArrayViewMut<'_, T> {
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

impl<T> IndexMut<usize> for ArrayViewMut<'_, T> {
    #[track_caller]
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_mut(index) {
            Ok(elem) => elem,
            Err(err) => err.handle_error(),
        }
    }
}

impl<'a, T> IntoIterator for ArrayViewMut<'a, T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> IterMut<'a, T> {
        self.into_slice().iter_mut()
    }
}

impl<'b, T> IntoIterator for &'b ArrayViewMut<'_, T> {
    type Item = &'b T;
    type IntoIter = Iter<'b, T>;

    #[inline]
    fn into_iter(self) -> Iter<'b, T> {
        self.iter()
    }
}

impl<'b, T> IntoIterator for &'b mut ArrayViewMut<'_, T> {
    type Item = &'b mut T;
    type IntoIter = IterMut<'b, T>;

    #[inline]
    fn into_iter(self) -> IterMut<'b, T> {
        self.iter_mut()
    }
}

// -----------------------------------------------------------------------------
// Tests
