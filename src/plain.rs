use core::{
	fmt,
	mem,
	ops::{
		Deref,
		DerefMut
	},
	ptr::{
		self,
		NonNull
	}
};
use std::alloc::Layout;
use crate::{
	alloc::Allocator,
	error::Error
};

/// A fixed-size array without header, owning its memory.
///
/// This is what [`HeadedVec::copy_to_plain_array`](crate::generic::HeadedVec::copy_to_plain_array)
/// produces: the elements laid out exactly like a slice, in a block obtained from
/// an allocator of the caller's choice.
/// The elements are dropped and the block released through that allocator when
/// the array is dropped.
pub struct PlainArray<T, B: Allocator> {
	ptr: NonNull<T>,
	len: usize,
	alloc: B
}

unsafe impl<T: Send, B: Allocator + Send> Send for PlainArray<T, B> {}
unsafe impl<T: Sync, B: Allocator + Sync> Sync for PlainArray<T, B> {}

impl<T, B: Allocator> PlainArray<T, B> {
	/// Clones the elements of `slice` into a new block allocated with `alloc`.
	pub fn try_from_slice_in(slice: &[T], alloc: B) -> Result<Self, Error> where T: Clone {
		if !alloc.is_complete() {
			return Err(Error::InvalidAllocator)
		}

		let layout = Layout::array::<T>(slice.len()).map_err(|_| Error::CapacityOverflow)?;
		let ptr = alloc.allocate(layout).map_err(|_| Error::AllocFailed { layout })?.cast::<T>();

		// Drops what has been cloned so far and releases the block if a `clone` panics.
		let mut guard = PartialArray {
			ptr,
			len: 0,
			layout,
			alloc: &alloc
		};

		for item in slice {
			unsafe {
				ptr::write(ptr.as_ptr().add(guard.len), item.clone());
			}
			guard.len += 1;
		}

		mem::forget(guard);

		Ok(PlainArray {
			ptr,
			len: slice.len(),
			alloc
		})
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.len
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	#[inline]
	pub fn as_ptr(&self) -> *const T {
		self.ptr.as_ptr()
	}

	#[inline]
	pub fn as_slice(&self) -> &[T] {
		unsafe {
			std::slice::from_raw_parts(self.ptr.as_ptr(), self.len)
		}
	}

	#[inline]
	pub fn as_mut_slice(&mut self) -> &mut [T] {
		unsafe {
			std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len)
		}
	}

	/// Returns a reference to the allocator owning the block.
	#[inline]
	pub fn allocator(&self) -> &B {
		&self.alloc
	}

	#[inline]
	fn layout(&self) -> Layout {
		// Checked when the block was allocated.
		unsafe {
			Layout::from_size_align_unchecked(mem::size_of::<T>() * self.len, mem::align_of::<T>())
		}
	}
}

impl<T, B: Allocator> Drop for PlainArray<T, B> {
	fn drop(&mut self) {
		unsafe {
			ptr::drop_in_place(self.as_mut_slice());
		}

		let layout = self.layout();
		if self.alloc.is_complete() {
			unsafe {
				self.alloc.release(self.ptr.cast(), layout)
			}
		} else {
			log::warn!("leaking {} bytes at {:p}: allocator is incomplete", layout.size(), self.ptr);
		}
	}
}

struct PartialArray<'a, T, B: Allocator> {
	ptr: NonNull<T>,
	len: usize,
	layout: Layout,
	alloc: &'a B
}

impl<'a, T, B: Allocator> Drop for PartialArray<'a, T, B> {
	fn drop(&mut self) {
		unsafe {
			ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.len));
			self.alloc.release(self.ptr.cast(), self.layout)
		}
	}
}

impl<T, B: Allocator> Deref for PlainArray<T, B> {
	type Target = [T];

	#[inline]
	fn deref(&self) -> &[T] {
		self.as_slice()
	}
}

impl<T, B: Allocator> DerefMut for PlainArray<T, B> {
	#[inline]
	fn deref_mut(&mut self) -> &mut [T] {
		self.as_mut_slice()
	}
}

impl<T: fmt::Debug, B: Allocator> fmt::Debug for PlainArray<T, B> {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(self.as_slice(), f)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::alloc::{
		FnAllocator,
		Global,
		Tracking
	};

	#[test]
	fn copies_without_header() {
		let tracking = Tracking::new(Global);
		let array = PlainArray::try_from_slice_in(&[1u32, 2, 3], &tracking).unwrap();
		assert_eq!(array.as_slice(), &[1, 2, 3]);
		assert_eq!(tracking.live_bytes(), 12);

		std::mem::drop(array);
		assert_eq!(tracking.releases(), 1);
		assert_eq!(tracking.live_bytes(), 0);
	}

	#[test]
	fn refuses_incomplete_allocator() {
		let result = PlainArray::try_from_slice_in(&[1u8], FnAllocator::default());
		assert_eq!(result.err(), Some(Error::InvalidAllocator));
	}
}
