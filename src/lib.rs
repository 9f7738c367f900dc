//! This crate provides the [`HeadedVec`](crate::generic::HeadedVec) data structure:
//! a growable array whose length and capacity are stored in a small header placed
//! right in front of the elements, in the same allocation.
//! All of its memory comes from an [`Allocator`] given at construction time,
//! and used again for every reallocation and for the final release.
//!
//! ## Basic usage
//!
//! ```rust
//! use headed_vec::{HeadedVec, Tracking, Global};
//!
//! let tracking = Tracking::new(Global);
//! let mut vec: HeadedVec<u32, _> = HeadedVec::try_with_capacity_in(16, &tracking).unwrap();
//! for i in 0..1000 {
//!     vec.push_back(i).unwrap(); // the buffer doubles (plus one) each time it is full.
//! }
//!
//! assert_eq!(vec.len(), 1000);
//! assert_eq!(vec[999], 999);
//! assert!(tracking.reallocations() < 10);
//! ```
//!
//! Since the header lives in the allocation, a vector is a single pointer
//! plus its allocator.
//! Growing or shrinking the buffer may move the whole allocation,
//! including the header:
//! ```rust
//! # use headed_vec::HeadedVec;
//! let mut vec: HeadedVec<u8> = HeadedVec::with_capacity(1);
//! vec.push(1);
//! let before = vec.as_ptr();
//! vec.push(2); // reallocation, `before` may now be dangling.
//! let after = vec.as_ptr();
//! # let _ = (before, after);
//! ```
//!
//! Memory can come from foreign code, for instance the C allocator:
//! ```rust,ignore
//! use headed_vec::{HeadedVec, FnAllocator};
//!
//! let malloc = FnAllocator::new(libc::malloc, libc::realloc, libc::free);
//! let mut vec: HeadedVec<i32, _> = HeadedVec::try_new_in(malloc)?;
//! ```
pub mod alloc;
pub mod error;
pub mod raw;
pub mod generic;
pub mod plain;
pub mod wide;
#[cfg(target_pointer_width = "64")]
pub mod lean;
#[cfg(not(target_pointer_width = "64"))]
pub mod lean {
	/// Re-exports `wide` for non-64-bit targets
	pub use super::wide::*;
}

/// Capacity of vectors created without an explicit capacity.
pub const DEFAULT_CAPACITY: usize = 64;

pub use crate::alloc::{
	AllocError,
	Allocator,
	Budgeted,
	FnAllocator,
	Global,
	Tracking
};
pub use crate::error::{
	Error,
	Full
};
pub use crate::plain::PlainArray;
pub use crate::raw::Meta;
pub use crate::wide::{
	HeadedVec,
	IntoIter
};
