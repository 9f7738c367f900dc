use core::{
	cmp,
	fmt,
	marker::PhantomData,
	mem::{
		self,
		ManuallyDrop
	},
	ptr::{
		self,
		NonNull
	}
};
use std::alloc::{
	Layout,
	handle_alloc_error
};
use crate::{
	alloc::Allocator,
	error::Error
};

/// Metadata representing the length and capacity of the array.
///
/// This crate provides two implementation of this trait:
/// [`wide::Meta`](crate::wide::Meta) stores the length and capacity with two `usize`.
/// Then the maximum size/capacity depends on the bit-depth of the plateform.
/// For 64-bit plateforms, this crate also provides [`lean::Meta`](crate::lean::Meta) that stores both the length
/// and capacity on a single `usize`. As a result, the maximum size/capacity is [`std::u32::MAX`].
pub trait Meta: Copy {
	/// Maximum size/capacity of the array using this metadata format.
	const MAX_LENGTH: usize;

	/// Create a new metadata from an array's length and capacity.
	fn new(len: usize, capacity: usize) -> Self;

	/// Get the length of the array.
	fn len(&self) -> usize;

	/// Get the capacity of the buffer.
	fn capacity(&self) -> usize;

	/// Set the new length of the array.
	fn set_len(&mut self, len: usize);

	/// Set the new capacity of the buffer.
	fn set_capacity(&mut self, capacity: usize);
}

/// Header stored at the very beginning of every allocation, right in front of the elements.
///
/// The allocation looks like this:
/// ```text
/// +--------+---------+------------+-----+----------------+
/// | Header | padding | element 0  | ... | element cap-1  |
/// +--------+---------+------------+-----+----------------+
/// ^ allocation start  ^ `as_ptr()`
/// ```
/// The padding is only there when the element type is more aligned than the header.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct Header<M> {
	meta: M,

	/// Size of one element, fixed for the whole life of the allocation.
	element_size: usize
}

impl<M: Meta> Header<M> {
	#[inline]
	pub fn meta(&self) -> &M {
		&self.meta
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.meta.len()
	}

	#[inline]
	pub fn capacity(&self) -> usize {
		self.meta.capacity()
	}

	#[inline]
	pub fn element_size(&self) -> usize {
		self.element_size
	}
}

impl<M: Meta> fmt::Debug for Header<M> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Header")
			.field("capacity", &self.capacity())
			.field("len", &self.len())
			.field("element_size", &self.element_size)
			.finish()
	}
}

/// A low-level utility managing the header and buffer of a vector in a single allocation.
///
/// This type does not in anyway inspect the memory that it manages. When dropped it *will*
/// free its memory, but it *won't* try to drop its contents. It is up to the user of `RawHeadedVec`
/// to handle the actual things *stored* inside of a `RawHeadedVec`.
pub struct RawHeadedVec<M: Meta, T, A: Allocator> {
	/// Start of the allocation.
	header: NonNull<Header<M>>,

	/// Allocator used to create, resize and release the allocation.
	alloc: A,

	marker: PhantomData<T>
}

unsafe impl<M: Meta + Send, T: Send, A: Allocator + Send> Send for RawHeadedVec<M, T, A> {}
unsafe impl<M: Meta + Sync, T: Sync, A: Allocator + Sync> Sync for RawHeadedVec<M, T, A> {}

impl<M: Meta, T, A: Allocator> Drop for RawHeadedVec<M, T, A> {
	fn drop(&mut self) {
		let layout = self.current_layout();
		if self.alloc.is_complete() {
			unsafe {
				self.alloc.release(self.header.cast(), layout)
			}
		} else {
			log::warn!("leaking {} bytes at {:p}: allocator is incomplete", layout.size(), self.header);
		}
	}
}

impl<M: Meta, T, A: Allocator> RawHeadedVec<M, T, A> {
	/// Offset of the first element from the start of the allocation.
	pub const DATA_OFFSET: usize = {
		let align = mem::align_of::<T>();
		(mem::size_of::<Header<M>>() + align - 1) & !(align - 1)
	};

	/// Allocate a new buffer able to hold `capacity` elements.
	pub fn try_with_capacity_in(capacity: usize, alloc: A) -> Result<Self, Error> {
		if !alloc.is_complete() {
			return Err(Error::InvalidAllocator)
		}

		let layout = Self::layout_for(capacity)?;
		let header = alloc.allocate(layout).map_err(|_| Error::AllocFailed { layout })?.cast::<Header<M>>();
		log::trace!("allocated buffer of {} elements at {:p}", capacity, header);

		unsafe {
			header.as_ptr().write(Header {
				meta: M::new(0, capacity),
				element_size: mem::size_of::<T>()
			})
		}

		Ok(RawHeadedVec {
			header,
			alloc,
			marker: PhantomData
		})
	}

	/// Computes the layout of an allocation holding the header and `capacity` elements.
	fn layout_for(capacity: usize) -> Result<Layout, Error> {
		if capacity > M::MAX_LENGTH {
			return Err(Error::CapacityOverflow)
		}

		let elements = Layout::array::<T>(capacity).map_err(|_| Error::CapacityOverflow)?;
		let (layout, offset) = Layout::new::<Header<M>>().extend(elements).map_err(|_| Error::CapacityOverflow)?;
		debug_assert_eq!(offset, Self::DATA_OFFSET);

		let layout = layout.pad_to_align();
		alloc_guard(layout.size())?;
		Ok(layout)
	}

	/// Layout of the current allocation.
	fn current_layout(&self) -> Layout {
		let align = cmp::max(mem::align_of::<Header<M>>(), mem::align_of::<T>());
		let size = Self::DATA_OFFSET + mem::size_of::<T>() * self.capacity();

		// This layout has already been checked by `layout_for` when the buffer was allocated.
		unsafe {
			Layout::from_size_align_unchecked(size, align).pad_to_align()
		}
	}

	#[inline]
	pub fn header(&self) -> &Header<M> {
		unsafe { self.header.as_ref() }
	}

	#[inline]
	pub fn meta(&self) -> &M {
		self.header().meta()
	}

	#[inline]
	pub fn meta_mut(&mut self) -> &mut M {
		unsafe { &mut self.header.as_mut().meta }
	}

	/// Returns a reference to the underlying allocator.
	#[inline]
	pub fn allocator(&self) -> &A {
		&self.alloc
	}

	/// Returns the start of the allocation, where the header lives.
	#[inline]
	pub fn header_ptr(&self) -> NonNull<u8> {
		self.header.cast()
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.meta().len()
	}

	/// Overwrites the length stored in the header.
	///
	/// ## Safety
	///
	/// `len` must not exceed the capacity,
	/// and the first `len` elements must be initialized.
	#[inline]
	pub unsafe fn set_len(&mut self, len: usize) {
		debug_assert!(len <= self.capacity());
		self.meta_mut().set_len(len)
	}

	#[inline]
	pub fn capacity(&self) -> usize {
		self.meta().capacity()
	}

	#[inline]
	pub fn element_size(&self) -> usize {
		self.header().element_size
	}

	/// Returns a raw pointer to the first element slot.
	///
	/// The pointer is invalidated by any operation that may reallocate the buffer.
	#[inline]
	pub fn as_ptr(&self) -> *const T {
		unsafe {
			(self.header.as_ptr() as *const u8).add(Self::DATA_OFFSET) as *const T
		}
	}

	/// Returns an unsafe mutable pointer to the first element slot.
	///
	/// The pointer is invalidated by any operation that may reallocate the buffer.
	#[inline]
	pub fn as_mut_ptr(&mut self) -> *mut T {
		unsafe {
			(self.header.as_ptr() as *mut u8).add(Self::DATA_OFFSET) as *mut T
		}
	}

	/// Returns if the buffer needs to grow to fulfill the needed extra capacity.
	#[inline]
	pub fn needs_to_grow(&self, additional: usize) -> bool {
		additional > self.capacity().wrapping_sub(self.len())
	}

	/// Reallocate the buffer so that it can hold exactly `new_capacity` elements.
	///
	/// If `new_capacity` is smaller than the current length, the length is clamped.
	/// The elements beyond the new capacity are *not* dropped.
	/// On error, the buffer is left untouched.
	pub fn try_resize(&mut self, new_capacity: usize) -> Result<(), Error> {
		if !self.alloc.is_complete() {
			return Err(Error::InvalidAllocator)
		}

		let new_layout = Self::layout_for(new_capacity)?;
		let old_layout = self.current_layout();

		let ptr = unsafe {
			self.alloc.reallocate(self.header.cast(), old_layout, new_layout)
		}.map_err(|_| Error::AllocFailed { layout: new_layout })?;

		log::trace!("reallocated buffer from {} elements at {:p} to {} elements at {:p}", self.capacity(), self.header, new_capacity, ptr);
		self.header = ptr.cast();

		let meta = self.meta_mut();
		meta.set_capacity(new_capacity);
		if meta.len() > new_capacity {
			meta.set_len(new_capacity)
		}

		Ok(())
	}

	/// Make room for one more element.
	///
	/// The buffer grows from `capacity` to `(capacity + 1) * 2` elements,
	/// so that pushing `n` elements one by one only reallocates `O(log n)` times.
	pub fn grow_one(&mut self) -> Result<(), Error> {
		let capacity = self.capacity();
		let new_capacity = capacity.checked_add(1)
			.and_then(|c| c.checked_mul(2))
			.map(|c| cmp::min(c, M::MAX_LENGTH))
			.ok_or(Error::CapacityOverflow)?;

		if new_capacity <= capacity {
			return Err(Error::CapacityOverflow)
		}

		log::debug!("growing buffer from {} to {} elements", capacity, new_capacity);
		self.try_resize(new_capacity)
	}

	/// Ensures that there is room for at least `additional` more elements.
	///
	/// When growing, the capacity at least doubles.
	pub fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
		if self.needs_to_grow(additional) {
			let required_capacity = self.len().checked_add(additional).ok_or(Error::CapacityOverflow)?;

			// This guarantees exponential growth.
			let doubled = cmp::min(self.capacity().saturating_mul(2), M::MAX_LENGTH);
			let new_capacity = cmp::max(doubled, required_capacity);

			log::debug!("growing buffer from {} to {} elements", self.capacity(), new_capacity);
			self.try_resize(new_capacity)
		} else {
			Ok(())
		}
	}

	/// Ensures that there is room for exactly `additional` more elements.
	pub fn try_reserve_exact(&mut self, additional: usize) -> Result<(), Error> {
		if self.needs_to_grow(additional) {
			let new_capacity = self.len().checked_add(additional).ok_or(Error::CapacityOverflow)?;
			self.try_resize(new_capacity)
		} else {
			Ok(())
		}
	}

	/// Hands the allocation back to the allocator.
	///
	/// Fails with [`Error::InvalidAllocator`] if the allocator became incomplete,
	/// in which case the memory is leaked.
	pub fn release(self) -> Result<(), Error> {
		let this = ManuallyDrop::new(self);
		let layout = this.current_layout();

		// `this` is never dropped, the allocator must be moved out of it to be.
		let alloc = unsafe { ptr::read(&this.alloc) };

		if alloc.is_complete() {
			unsafe {
				alloc.release(this.header.cast(), layout)
			}

			Ok(())
		} else {
			log::warn!("leaking {} bytes at {:p}: allocator is incomplete", layout.size(), this.header);
			Err(Error::InvalidAllocator)
		}
	}
}

impl<M: Meta, T, A: Allocator> fmt::Debug for RawHeadedVec<M, T, A> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RawHeadedVec")
			.field("header", self.header())
			.field("ptr", &self.as_ptr())
			.finish()
	}
}

// Central function for error handling in infallible operations.
#[inline]
pub(crate) fn handle_error<T>(result: Result<T, Error>) -> T {
	match result {
		Ok(t) => t,
		Err(Error::CapacityOverflow) => capacity_overflow(),
		Err(Error::AllocFailed { layout }) => handle_alloc_error(layout),
		Err(e) => panic!("{}", e)
	}
}

// We need to guarantee the following:
// * We don't ever allocate `> isize::MAX` byte-size objects.
// * We don't overflow `usize::MAX` and actually allocate too little.
//
// On 64-bit we just need to check for overflow since trying to allocate
// `> isize::MAX` bytes will surely fail. On 32-bit and 16-bit we need to add
// an extra guard for this in case we're running on a platform which can use
// all 4GB in user-space, e.g., PAE or x32.
#[inline]
fn alloc_guard(alloc_size: usize) -> Result<(), Error> {
	if mem::size_of::<usize>() < 8 && alloc_size > isize::MAX as usize {
		Err(Error::CapacityOverflow)
	} else {
		Ok(())
	}
}

// One central function responsible for reporting capacity overflows. This'll
// ensure that the code generation related to these panics is minimal as there's
// only one location which panics rather than a bunch throughout the module.
fn capacity_overflow() -> ! {
	panic!("capacity overflow");
}
