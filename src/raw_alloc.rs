use core::alloc::Layout;
use core::fmt;
use core::ptr::NonNull;

/// An allocation request that the underlying allocator could not satisfy.
///
/// Carries the [`Layout`] of the failed request so callers can report it or
/// forward it to [`alloc::alloc::handle_alloc_error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AllocError {
    layout: Layout,
}

impl AllocError {
    /// The layout of the allocation that failed.
    pub fn layout(&self) -> Layout {
        self.layout
    }
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to allocate {} bytes (align {})",
            self.layout.size(),
            self.layout.align()
        )
    }
}

impl core::error::Error for AllocError {}

/// A raw allocator for contiguous element buffers.
///
/// This is the storage seam of the hash table: every backing array is
/// obtained from and returned to an implementation of this trait. Sizes are
/// expressed in element counts, not bytes. A valid allocator must implement
/// all three operations, and `reallocate` must support shrinking.
///
/// The table only ever calls [`allocate`] and [`deallocate`], since growth
/// builds a fresh array and releases the old one. [`reallocate`] completes
/// the contract for single-buffer containers that resize in place.
///
/// # Safety
///
/// Implementations must return pointers that are valid for reads and writes
/// of `count` elements of `T`, properly aligned, and exclusively owned by
/// the caller until passed back to `deallocate` or `reallocate`.
///
/// [`allocate`]: RawAllocator::allocate
/// [`deallocate`]: RawAllocator::deallocate
/// [`reallocate`]: RawAllocator::reallocate
pub unsafe trait RawAllocator {
    /// Allocates a buffer for `count` elements of `T`.
    ///
    /// Returns a dangling pointer without allocating if the requested buffer
    /// has zero size. Panics on layout-arithmetic overflow.
    fn allocate<T>(&self, count: usize) -> Result<NonNull<T>, AllocError>;

    /// Releases a buffer previously obtained from this allocator.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate` or `reallocate` on this
    /// allocator with the same `count`, and must not be used afterwards.
    unsafe fn deallocate<T>(&self, ptr: NonNull<T>, count: usize);

    /// Resizes a buffer, preserving the first `min(old_count, new_count)`
    /// elements. May shrink without relocating.
    ///
    /// The default implementation allocates a fresh buffer, copies, and
    /// releases the old one.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate` or `reallocate` on this
    /// allocator with a count of `old_count`, and the preserved prefix must
    /// hold initialized elements if the caller intends to read them. On
    /// success the old pointer must not be used.
    unsafe fn reallocate<T>(
        &self,
        ptr: NonNull<T>,
        new_count: usize,
        old_count: usize,
    ) -> Result<NonNull<T>, AllocError> {
        let new_ptr = self.allocate::<T>(new_count)?;
        // SAFETY: Caller guarantees `ptr` is valid for `old_count` elements;
        // `new_ptr` was just allocated for `new_count`. The regions are
        // distinct allocations.
        unsafe {
            core::ptr::copy_nonoverlapping(ptr.as_ptr(), new_ptr.as_ptr(), old_count.min(new_count));
            self.deallocate(ptr, old_count);
        }
        Ok(new_ptr)
    }
}

/// The global allocator, used when no allocator is specified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Global;

unsafe impl RawAllocator for Global {
    fn allocate<T>(&self, count: usize) -> Result<NonNull<T>, AllocError> {
        let layout = Layout::array::<T>(count).expect("allocation size overflow");
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }
        // SAFETY: `layout` has non-zero size.
        let raw = unsafe { alloc::alloc::alloc(layout) };
        NonNull::new(raw.cast()).ok_or(AllocError { layout })
    }

    unsafe fn deallocate<T>(&self, ptr: NonNull<T>, count: usize) {
        let layout = Layout::array::<T>(count).expect("allocation size overflow");
        if layout.size() == 0 {
            return;
        }
        // SAFETY: Caller guarantees `ptr` came from `allocate`/`reallocate`
        // with the same count, so the layout matches.
        unsafe {
            alloc::alloc::dealloc(ptr.as_ptr().cast(), layout);
        }
    }

    unsafe fn reallocate<T>(
        &self,
        ptr: NonNull<T>,
        new_count: usize,
        old_count: usize,
    ) -> Result<NonNull<T>, AllocError> {
        let old_layout = Layout::array::<T>(old_count).expect("allocation size overflow");
        let new_layout = Layout::array::<T>(new_count).expect("allocation size overflow");
        if old_layout.size() == 0 {
            return self.allocate(new_count);
        }
        if new_layout.size() == 0 {
            // SAFETY: Caller guarantees `ptr`/`old_count` match a live
            // allocation.
            unsafe {
                self.deallocate(ptr, old_count);
            }
            return Ok(NonNull::dangling());
        }
        // SAFETY: `ptr` was allocated with `old_layout` per the caller's
        // contract, and `new_layout` has non-zero size.
        let raw = unsafe { alloc::alloc::realloc(ptr.as_ptr().cast(), old_layout, new_layout.size()) };
        NonNull::new(raw.cast()).ok_or(AllocError { layout: new_layout })
    }
}
