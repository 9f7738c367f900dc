//! Memory allocators.
//!
//! Every byte owned by a [`HeadedVec`](crate::generic::HeadedVec) flows through the
//! [`Allocator`] it was constructed with.
//! This module defines that capability set and a few implementations:
//! [`Global`] forwards to the standard library allocator,
//! [`FnAllocator`] wraps a `malloc`/`realloc`/`free` function table,
//! and [`Tracking`] and [`Budgeted`] wrap another allocator to observe or limit it.
use core::{
	cell::Cell,
	ffi::c_void,
	fmt,
	mem,
	ptr::NonNull
};
use std::alloc::Layout;
use thiserror::Error;

/// The allocator could not provide the requested memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Error)]
#[error("memory allocation failed")]
pub struct AllocError;

/// Allocate, reallocate and release memory blocks.
///
/// ## Safety
///
/// Memory returned by `allocate` and `reallocate` must be valid for reads and writes
/// of `layout.size()` bytes, aligned to `layout.align()`, and stay valid until it is
/// passed to `reallocate` or `release`.
pub unsafe trait Allocator {
	/// Allocate a new memory block fitting `layout`.
	fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

	/// Resize the memory block at `ptr` to fit `new_layout`.
	///
	/// The first `min(old_layout.size(), new_layout.size())` bytes are preserved.
	/// The returned block may start at a different address, in which case `ptr`
	/// must not be used anymore.
	/// On failure the original block is left untouched.
	///
	/// ## Safety
	///
	/// `ptr` must denote a block currently allocated by this allocator with
	/// `old_layout`, and `new_layout` must have the same alignment.
	unsafe fn reallocate(&self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Result<NonNull<u8>, AllocError>;

	/// Release the memory block at `ptr`.
	///
	/// ## Safety
	///
	/// `ptr` must denote a block currently allocated by this allocator with `layout`.
	unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout);

	/// Returns `false` if this allocator cannot currently serve all three operations.
	///
	/// Vectors refuse to be created with, and to resize or release through,
	/// an incomplete allocator.
	#[inline]
	fn is_complete(&self) -> bool {
		true
	}
}

unsafe impl<'a, A: Allocator + ?Sized> Allocator for &'a A {
	#[inline]
	fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
		(**self).allocate(layout)
	}

	#[inline]
	unsafe fn reallocate(&self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Result<NonNull<u8>, AllocError> {
		(**self).reallocate(ptr, old_layout, new_layout)
	}

	#[inline]
	unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
		(**self).release(ptr, layout)
	}

	#[inline]
	fn is_complete(&self) -> bool {
		(**self).is_complete()
	}
}

/// A dangling but well-aligned pointer standing for a zero-sized block.
#[inline]
fn dangling(layout: Layout) -> NonNull<u8> {
	// `align` is never zero.
	unsafe { NonNull::new_unchecked(layout.align() as *mut u8) }
}

/// The standard library global allocator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Global;

unsafe impl Allocator for Global {
	#[inline]
	fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
		if layout.size() == 0 {
			return Ok(dangling(layout))
		}

		NonNull::new(unsafe { std::alloc::alloc(layout) }).ok_or(AllocError)
	}

	unsafe fn reallocate(&self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Result<NonNull<u8>, AllocError> {
		debug_assert_eq!(old_layout.align(), new_layout.align());

		if old_layout.size() == 0 {
			self.allocate(new_layout)
		} else if new_layout.size() == 0 {
			self.release(ptr, old_layout);
			Ok(dangling(new_layout))
		} else {
			NonNull::new(std::alloc::realloc(ptr.as_ptr(), old_layout, new_layout.size())).ok_or(AllocError)
		}
	}

	#[inline]
	unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
		if layout.size() != 0 {
			std::alloc::dealloc(ptr.as_ptr(), layout)
		}
	}
}

/// C `malloc` signature.
pub type AllocateFn = unsafe extern "C" fn(usize) -> *mut c_void;

/// C `realloc` signature.
pub type ReallocateFn = unsafe extern "C" fn(*mut c_void, usize) -> *mut c_void;

/// C `free` signature.
pub type ReleaseFn = unsafe extern "C" fn(*mut c_void);

/// Allocator backed by a table of C allocation functions.
///
/// This is the allocator to use when the memory must come from, or be handed back to,
/// foreign code, for instance `libc::malloc`, `libc::realloc` and `libc::free`.
/// Any missing function makes the allocator incomplete.
///
/// The functions only receive sizes, so the blocks they return are assumed to be aligned
/// like `malloc` guarantees: to at least two pointer widths.
/// Layouts requiring more alignment are refused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FnAllocator {
	pub allocate: Option<AllocateFn>,
	pub reallocate: Option<ReallocateFn>,
	pub release: Option<ReleaseFn>
}

impl FnAllocator {
	/// Alignment guaranteed by the wrapped functions.
	pub const MAX_ALIGN: usize = 2 * mem::size_of::<usize>();

	/// Creates a complete function table.
	pub const fn new(allocate: AllocateFn, reallocate: ReallocateFn, release: ReleaseFn) -> FnAllocator {
		FnAllocator {
			allocate: Some(allocate),
			reallocate: Some(reallocate),
			release: Some(release)
		}
	}

	#[inline]
	fn check(layout: Layout) -> Result<usize, AllocError> {
		if layout.align() > Self::MAX_ALIGN {
			return Err(AllocError)
		}

		// Some `malloc`s return null for zero-sized requests.
		Ok(layout.size().max(1))
	}
}

unsafe impl Allocator for FnAllocator {
	fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
		let size = Self::check(layout)?;
		let allocate = self.allocate.ok_or(AllocError)?;
		NonNull::new(unsafe { allocate(size) }.cast()).ok_or(AllocError)
	}

	unsafe fn reallocate(&self, ptr: NonNull<u8>, _old_layout: Layout, new_layout: Layout) -> Result<NonNull<u8>, AllocError> {
		let size = Self::check(new_layout)?;
		let reallocate = self.reallocate.ok_or(AllocError)?;
		NonNull::new(reallocate(ptr.as_ptr().cast(), size).cast()).ok_or(AllocError)
	}

	unsafe fn release(&self, ptr: NonNull<u8>, _layout: Layout) {
		if let Some(release) = self.release {
			release(ptr.as_ptr().cast())
		}
	}

	#[inline]
	fn is_complete(&self) -> bool {
		self.allocate.is_some() && self.reallocate.is_some() && self.release.is_some()
	}
}

/// Allocator wrapper counting the calls made to the inner allocator.
///
/// Only successful calls are counted.
/// Every call is also logged at the `trace` level.
pub struct Tracking<A> {
	inner: A,
	allocations: Cell<usize>,
	reallocations: Cell<usize>,
	releases: Cell<usize>,
	live_bytes: Cell<usize>
}

impl<A> Tracking<A> {
	pub fn new(inner: A) -> Tracking<A> {
		Tracking {
			inner,
			allocations: Cell::new(0),
			reallocations: Cell::new(0),
			releases: Cell::new(0),
			live_bytes: Cell::new(0)
		}
	}

	/// Number of successful `allocate` calls.
	#[inline]
	pub fn allocations(&self) -> usize {
		self.allocations.get()
	}

	/// Number of successful `reallocate` calls.
	#[inline]
	pub fn reallocations(&self) -> usize {
		self.reallocations.get()
	}

	/// Number of `release` calls.
	#[inline]
	pub fn releases(&self) -> usize {
		self.releases.get()
	}

	/// Number of allocated blocks not yet released.
	#[inline]
	pub fn live_blocks(&self) -> usize {
		self.allocations() - self.releases()
	}

	/// Total size of the allocated blocks not yet released.
	#[inline]
	pub fn live_bytes(&self) -> usize {
		self.live_bytes.get()
	}

	#[inline]
	pub fn inner(&self) -> &A {
		&self.inner
	}

	#[inline]
	pub fn into_inner(self) -> A {
		self.inner
	}
}

impl<A> fmt::Debug for Tracking<A> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Tracking")
			.field("allocations", &self.allocations())
			.field("reallocations", &self.reallocations())
			.field("releases", &self.releases())
			.field("live_bytes", &self.live_bytes())
			.finish()
	}
}

unsafe impl<A: Allocator> Allocator for Tracking<A> {
	fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
		let ptr = self.inner.allocate(layout)?;
		log::trace!("allocate {} bytes at {:p}", layout.size(), ptr);
		self.allocations.set(self.allocations.get() + 1);
		self.live_bytes.set(self.live_bytes.get() + layout.size());
		Ok(ptr)
	}

	unsafe fn reallocate(&self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Result<NonNull<u8>, AllocError> {
		let new_ptr = self.inner.reallocate(ptr, old_layout, new_layout)?;
		log::trace!("reallocate {:p} ({} bytes) to {:p} ({} bytes)", ptr, old_layout.size(), new_ptr, new_layout.size());
		self.reallocations.set(self.reallocations.get() + 1);
		self.live_bytes.set(self.live_bytes.get() - old_layout.size() + new_layout.size());
		Ok(new_ptr)
	}

	unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
		log::trace!("release {} bytes at {:p}", layout.size(), ptr);
		self.inner.release(ptr, layout);
		self.releases.set(self.releases.get() + 1);
		self.live_bytes.set(self.live_bytes.get() - layout.size());
	}

	#[inline]
	fn is_complete(&self) -> bool {
		self.inner.is_complete()
	}
}

/// Allocator wrapper refusing to hold more than a fixed number of bytes at once.
///
/// Requests that would push the amount of live memory above the budget fail
/// with [`AllocError`] without reaching the inner allocator.
pub struct Budgeted<A> {
	inner: A,
	budget: usize,
	used: Cell<usize>
}

impl<A> Budgeted<A> {
	pub fn new(inner: A, budget: usize) -> Budgeted<A> {
		Budgeted {
			inner,
			budget,
			used: Cell::new(0)
		}
	}

	#[inline]
	pub fn budget(&self) -> usize {
		self.budget
	}

	/// Bytes currently held through this allocator.
	#[inline]
	pub fn used(&self) -> usize {
		self.used.get()
	}

	#[inline]
	pub fn remaining(&self) -> usize {
		self.budget - self.used()
	}

	#[inline]
	pub fn inner(&self) -> &A {
		&self.inner
	}
}

impl<A> fmt::Debug for Budgeted<A> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Budgeted")
			.field("budget", &self.budget)
			.field("used", &self.used())
			.finish()
	}
}

unsafe impl<A: Allocator> Allocator for Budgeted<A> {
	fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
		if layout.size() > self.remaining() {
			log::debug!("allocation of {} bytes exceeds the remaining budget of {} bytes", layout.size(), self.remaining());
			return Err(AllocError)
		}

		let ptr = self.inner.allocate(layout)?;
		self.used.set(self.used() + layout.size());
		Ok(ptr)
	}

	unsafe fn reallocate(&self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Result<NonNull<u8>, AllocError> {
		let used = self.used() - old_layout.size();
		if new_layout.size() > self.budget - used {
			log::debug!("reallocation to {} bytes exceeds the remaining budget of {} bytes", new_layout.size(), self.budget - used);
			return Err(AllocError)
		}

		let new_ptr = self.inner.reallocate(ptr, old_layout, new_layout)?;
		self.used.set(used + new_layout.size());
		Ok(new_ptr)
	}

	unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
		self.inner.release(ptr, layout);
		self.used.set(self.used() - layout.size());
	}

	#[inline]
	fn is_complete(&self) -> bool {
		self.inner.is_complete()
	}
}
