// -----------------------------------------------------------------------------
// Common methods

macro_rules! impl_view {
    ($view:ident) => {
        impl<T> $view<'_, T> {
            /// Returns the number of elements in the view.
            #[inline(always)]
            pub const fn len(&self) -> usize {
                self.len
            }

            /// Returns `true` if the view has no elements.
            #[inline(always)]
            pub const fn is_empty(&self) -> bool {
                self.len == 0
            }

            /// Exchanges the ranges observed by `self` and `other`.
            ///
            /// The elements themselves are not touched.
            #[inline]
            pub fn swap(&mut self, other: &mut Self) {
                ::core::mem::swap(self, other);
            }
        }

        impl<T> Default for $view<'_, T> {
            /// Creates an empty view with a null data pointer.
            #[inline(always)]
            fn default() -> Self {
                Self::empty()
            }
        }

        impl<T> ::core::fmt::Debug for $view<'_, T> {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.debug_struct(stringify!($view))
                    .field("ptr", &self.ptr)
                    .field("len", &self.len)
                    .finish()
            }
        }

        unsafe impl<T> $crate::Contiguous for $view<'_, T> {
            type Element = T;

            #[inline(always)]
            fn observe_ptr(&self) -> *const T {
                self.as_ptr()
            }

            #[inline(always)]
            fn observe_len(&self) -> usize {
                self.len
            }
        }
    };
}

pub(crate) use impl_view;
