use std::alloc::Layout;
use thiserror::Error;

/// Errors reported by the fallible vector operations.
///
/// All of them are local conditions returned to the caller.
/// Nothing is ever retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
	/// The allocator does not provide a complete capability set.
	#[error("allocator is missing one of allocate, reallocate or release")]
	InvalidAllocator,

	/// The allocator failed to provide memory for the given layout.
	#[error("memory allocation of {} bytes failed", .layout.size())]
	AllocFailed {
		layout: Layout
	},

	/// The requested capacity cannot be represented.
	#[error("capacity overflow")]
	CapacityOverflow,

	#[error("index {index} is out of bounds (length is {len})")]
	IndexOutOfBounds {
		index: usize,
		len: usize
	},

	/// The vector holds no element.
	#[error("vector is empty")]
	Empty
}

/// Returned by `push_within_capacity` when there is no free slot left.
///
/// Gives the rejected element back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("vector is full")]
pub struct Full<T>(pub T);

impl<T> Full<T> {
	/// Recover the rejected element.
	#[inline]
	pub fn into_inner(self) -> T {
		self.0
	}
}
