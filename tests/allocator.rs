use headed_vec::{
	AllocError,
	Allocator,
	Budgeted,
	Error,
	FnAllocator,
	Global,
	HeadedVec,
	Tracking
};
use std::{
	alloc::Layout,
	cell::Cell,
	ptr::NonNull
};

fn malloc() -> FnAllocator {
	FnAllocator::new(libc::malloc, libc::realloc, libc::free)
}

#[test]
fn c_allocator() {
	let tracking = Tracking::new(malloc());
	let mut vec: HeadedVec<i32, _> = HeadedVec::try_new_in(&tracking).unwrap();
	for i in 0..200 {
		vec.push_back(i).unwrap();
	}

	assert_eq!(vec.len(), 200);
	assert!(vec.iter().copied().eq(0..200));
	assert_eq!(tracking.reallocations(), 2);

	vec.destroy().unwrap();
	assert_eq!(tracking.releases(), 1);
}

#[test]
fn incomplete_allocator_is_refused() {
	let incomplete = FnAllocator {
		reallocate: None,
		..malloc()
	};
	let tracking = Tracking::new(incomplete);

	let result = HeadedVec::<i32, _>::try_with_capacity_in(16, &tracking);
	assert_eq!(result.err(), Some(Error::InvalidAllocator));
	assert_eq!(tracking.allocations(), 0);
}

#[test]
fn over_aligned_elements_are_refused_by_malloc() {
	#[repr(align(64))]
	struct Line([u8; 64]);

	let result = HeadedVec::<Line, _>::try_with_capacity_in(1, malloc());
	assert!(matches!(result.err(), Some(Error::AllocFailed { .. })));
}

#[test]
fn failed_growth_leaves_vector_intact() {
	// Room for the header and exactly four `u32`.
	let budget = HeadedVec::<u32, Global>::with_capacity(4);
	let bytes = budget.as_ptr() as usize - budget.header_ptr().as_ptr() as usize + 16;

	let budgeted = Budgeted::new(Global, bytes);
	let mut vec: HeadedVec<u32, _> = HeadedVec::try_with_capacity_in(4, &budgeted).unwrap();
	vec.push_all(&[1, 2, 3, 4]).unwrap();

	assert!(matches!(vec.push_back(5), Err(Error::AllocFailed { .. })));
	assert!(matches!(vec.insert(0, 0), Err(Error::AllocFailed { .. })));
	assert!(matches!(vec.push_many(&[5, 6]), Err(Error::AllocFailed { .. })));
	assert!(matches!(vec.resize(5), Err(Error::AllocFailed { .. })));

	assert_eq!(vec.len(), 4);
	assert_eq!(vec.capacity(), 4);
	assert_eq!(vec, [1, 2, 3, 4]);
	assert_eq!(budgeted.used(), bytes);

	// shrinking does not need more memory.
	vec.resize(2).unwrap();
	assert_eq!(vec, [1, 2]);
	vec.push_back(3).unwrap_err();
	vec.resize(4).unwrap();
	vec.push_back(3).unwrap();
	assert_eq!(vec, [1, 2, 3]);
}

#[test]
fn failed_construction() {
	let budgeted = Budgeted::new(Global, 8);
	let result = HeadedVec::<u8, _>::try_with_capacity_in(64, &budgeted);
	assert!(matches!(result.err(), Some(Error::AllocFailed { .. })));
	assert_eq!(budgeted.used(), 0);
}

#[test]
fn plain_array_in_another_domain() {
	let own = Tracking::new(Global);
	let foreign = Tracking::new(malloc());

	let mut vec: HeadedVec<u16, _> = HeadedVec::try_with_capacity_in(4, &own).unwrap();
	vec.push_all(&[7, 8, 9]).unwrap();

	let plain = vec.copy_to_plain_array(&foreign).unwrap().unwrap();
	assert_eq!(&*plain, &[7, 8, 9]);
	assert_eq!(foreign.allocations(), 1);
	assert_eq!(own.allocations(), 1);
	assert_eq!(foreign.live_bytes(), 6);

	std::mem::drop(plain);
	std::mem::drop(vec);
	assert_eq!(foreign.live_blocks(), 0);
	assert_eq!(own.live_blocks(), 0);
}

#[test]
fn clone_uses_the_same_allocator() {
	let tracking = Tracking::new(Global);
	let mut vec: HeadedVec<String, _> = HeadedVec::try_with_capacity_in(2, &tracking).unwrap();
	vec.push("hello".to_string());

	let copy = vec.clone();
	assert_eq!(tracking.allocations(), 2);
	assert_eq!(copy, ["hello"]);
}

/// Global allocator whose `reallocate` always fails.
struct NoRealloc;

unsafe impl Allocator for NoRealloc {
	fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
		Global.allocate(layout)
	}

	unsafe fn reallocate(&self, _ptr: NonNull<u8>, _old_layout: Layout, _new_layout: Layout) -> Result<NonNull<u8>, AllocError> {
		Err(AllocError)
	}

	unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
		Global.release(ptr, layout)
	}
}

#[test]
fn failed_shrink_leaves_vector_intact() {
	let mut vec: HeadedVec<String, _> = HeadedVec::try_with_capacity_in(4, NoRealloc).unwrap();
	for s in &["a", "b", "c", "d"] {
		vec.push_back(s.to_string()).unwrap();
	}

	assert!(matches!(vec.resize(1), Err(Error::AllocFailed { .. })));
	assert!(matches!(vec.shrink_to_fit(), Err(Error::AllocFailed { .. })));
	assert_eq!(vec.len(), 4);
	assert_eq!(vec.capacity(), 4);
	assert_eq!(vec, ["a", "b", "c", "d"]);
}

/// Global allocator that can lose its completeness after the fact.
struct Breakable {
	complete: Cell<bool>
}

unsafe impl Allocator for Breakable {
	fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
		Global.allocate(layout)
	}

	unsafe fn reallocate(&self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Result<NonNull<u8>, AllocError> {
		Global.reallocate(ptr, old_layout, new_layout)
	}

	unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
		Global.release(ptr, layout)
	}

	fn is_complete(&self) -> bool {
		self.complete.get()
	}
}

#[test]
fn allocator_breaking_after_construction() {
	let breakable = Breakable { complete: Cell::new(true) };
	let mut vec: HeadedVec<i32, _> = HeadedVec::try_with_capacity_in(2, &breakable).unwrap();
	vec.push_all(&[1, 2]).unwrap();

	breakable.complete.set(false);
	assert_eq!(vec.resize(8), Err(Error::InvalidAllocator));
	assert_eq!(vec.resize(1), Err(Error::InvalidAllocator));
	assert_eq!(vec.push_back(3), Err(Error::InvalidAllocator));
	assert_eq!(vec.len(), 2);
	assert_eq!(vec.capacity(), 2);
	assert_eq!(vec, [1, 2]);

	// the block is leaked, not released.
	assert_eq!(vec.destroy(), Err(Error::InvalidAllocator));
}
