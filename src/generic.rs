use core::{
	fmt,
	iter::FromIterator,
	mem::{
		ManuallyDrop,
		MaybeUninit
	},
	ops::{
		Deref,
		DerefMut
	},
	ptr::{
		self,
		NonNull
	}
};
use crate::{
	DEFAULT_CAPACITY,
	alloc::{
		Allocator,
		Global
	},
	error::{
		Error,
		Full
	},
	plain::PlainArray,
	raw::{
		RawHeadedVec,
		handle_error
	}
};

pub use crate::raw::Meta;

/// Contiguous growable array type whose length and capacity live in the same allocation
/// as the elements, in a header placed right in front of them.
///
/// This type behaves like a `Vec<T>` built over an arbitrary [`Allocator`], given at
/// construction time and used for every subsequent reallocation and for the final release.
///
/// The metadata format is given as type parameter `M`, implementing the [`Meta`] trait.
/// [`wide::HeadedVec`](crate::wide::HeadedVec) (the default, re-exported at the crate root)
/// behaves just like `Vec`, with a maximum capacity of `std::usize::MAX`.
///
/// Any operation that may grow or shrink the buffer may also move it:
/// raw pointers obtained from [`as_ptr`](HeadedVec::as_ptr) must be fetched again afterwards.
///
/// # Examples
///
/// ```
/// # use headed_vec::{HeadedVec, Global};
/// let mut vec: HeadedVec<u32> = HeadedVec::try_with_capacity_in(2, Global).unwrap();
/// vec.push_back(1).unwrap();
/// vec.push_back(2).unwrap();
/// vec.push_back(3).unwrap(); // grows to (2 + 1) * 2 = 6 slots.
/// assert_eq!(vec.capacity(), 6);
/// assert_eq!(vec, [1, 2, 3]);
/// ```
pub struct HeadedVec<M: Meta, T, A: Allocator = Global> {
	raw: RawHeadedVec<M, T, A>
}

impl<M: Meta, T, A: Allocator> Drop for HeadedVec<M, T, A> {
	fn drop(&mut self) {
		unsafe {
			ptr::drop_in_place(self.as_mut_slice())
		}
		// `raw` releases the memory.
	}
}

impl<M: Meta, T> HeadedVec<M, T, Global> {
	/// Creates a new empty `HeadedVec` with [`DEFAULT_CAPACITY`] slots.
	///
	/// # Panics
	///
	/// Aborts if the allocation fails.
	#[inline]
	pub fn new() -> Self {
		Self::new_in(Global)
	}

	/// Creates a new empty `HeadedVec` with exactly `capacity` slots.
	#[inline]
	pub fn with_capacity(capacity: usize) -> Self {
		Self::with_capacity_in(capacity, Global)
	}
}

impl<M: Meta, T> Default for HeadedVec<M, T, Global> {
	#[inline]
	fn default() -> Self {
		Self::new()
	}
}

impl<M: Meta, T, A: Allocator> HeadedVec<M, T, A> {
	/// Creates a new empty vector able to hold `capacity` elements, allocated with `alloc`.
	///
	/// Fails with [`Error::InvalidAllocator`] without allocating anything if `alloc` is
	/// incomplete, and with [`Error::AllocFailed`] if the allocation fails.
	#[inline]
	pub fn try_with_capacity_in(capacity: usize, alloc: A) -> Result<Self, Error> {
		Ok(HeadedVec {
			raw: RawHeadedVec::try_with_capacity_in(capacity, alloc)?
		})
	}

	/// Creates a new empty vector with [`DEFAULT_CAPACITY`] slots allocated with `alloc`.
	#[inline]
	pub fn try_new_in(alloc: A) -> Result<Self, Error> {
		Self::try_with_capacity_in(DEFAULT_CAPACITY, alloc)
	}

	/// Like `with_capacity`, but parameterized over the choice of allocator.
	///
	/// # Panics
	///
	/// Panics if the allocator is incomplete or the capacity overflows,
	/// aborts if the allocation fails.
	#[inline]
	pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
		handle_error(Self::try_with_capacity_in(capacity, alloc))
	}

	/// Like `new`, but parameterized over the choice of allocator.
	#[inline]
	pub fn new_in(alloc: A) -> Self {
		Self::with_capacity_in(DEFAULT_CAPACITY, alloc)
	}

	/// Returns a reference to the underlying allocator.
	#[inline]
	pub fn allocator(&self) -> &A {
		self.raw.allocator()
	}

	/// Returns the start of the allocation, where the header is stored.
	///
	/// The elements start [`DATA_OFFSET`](RawHeadedVec::DATA_OFFSET) bytes further.
	#[inline]
	pub fn header_ptr(&self) -> NonNull<u8> {
		self.raw.header_ptr()
	}

	/// Returns the length of the array.
	#[inline]
	pub fn len(&self) -> usize {
		self.raw.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns the number of elements the vector can hold without reallocating.
	#[inline]
	pub fn capacity(&self) -> usize {
		self.raw.capacity()
	}

	/// Size in bytes of one element, as recorded in the header.
	#[inline]
	pub fn element_size(&self) -> usize {
		self.raw.element_size()
	}

	/// Returns `true` if one more element can be pushed without reallocating.
	#[inline]
	pub fn can_append(&self) -> bool {
		self.capacity() > self.len()
	}

	/// Forces the length of the vector to `len`.
	///
	/// This is a low-level operation that maintains none of the normal invariants of the
	/// type. Every other operation relies on the length to know which slots are
	/// initialized and where the next element goes, so misusing it corrupts all of them.
	///
	/// ## Safety
	///
	/// - `len` must be less than or equal to [`capacity()`](HeadedVec::capacity).
	/// - The elements at `old_len..len` must be initialized.
	#[inline]
	pub unsafe fn set_len(&mut self, len: usize) {
		self.raw.set_len(len)
	}

	/// Returns a raw pointer to the vector's buffer.
	///
	/// The caller must ensure that the vector outlives the pointer this
	/// function returns, or else it will end up pointing to garbage.
	/// Modifying the vector may cause its buffer to be reallocated,
	/// which would also make any pointers to it invalid.
	#[inline]
	pub fn as_ptr(&self) -> *const T {
		self.raw.as_ptr()
	}

	/// Returns an unsafe mutable pointer to the vector's buffer.
	#[inline]
	pub fn as_mut_ptr(&mut self) -> *mut T {
		self.raw.as_mut_ptr()
	}

	/// Extracts a slice containing the entire vector.
	#[inline]
	pub fn as_slice(&self) -> &[T] {
		unsafe {
			std::slice::from_raw_parts(self.as_ptr(), self.len())
		}
	}

	/// Extracts a mutable slice of the entire vector.
	#[inline]
	pub fn as_mut_slice(&mut self) -> &mut [T] {
		unsafe {
			std::slice::from_raw_parts_mut(self.as_mut_ptr(), self.len())
		}
	}

	/// Returns the remaining spare capacity of the vector as a slice of
	/// `MaybeUninit<T>`.
	///
	/// The returned slice can be used to fill the vector with data before marking
	/// the data as initialized using the [`set_len`] method.
	///
	/// [`set_len`]: HeadedVec::set_len
	#[inline]
	pub fn spare_capacity_mut(&mut self) -> &mut [MaybeUninit<T>] {
		let len = self.len();
		let capacity = self.capacity();
		unsafe {
			let ptr = self.as_mut_ptr() as *mut MaybeUninit<T>;
			std::slice::from_raw_parts_mut(ptr.add(len), capacity - len)
		}
	}

	/// Reallocates the buffer to hold exactly `new_capacity` elements.
	///
	/// If `new_capacity` is smaller than the length, the length is clamped once the
	/// reallocation succeeds. The elements past the new capacity are cut off with their
	/// memory and are *not* dropped: for types that need dropping they are leaked.
	/// Call [`truncate`](HeadedVec::truncate) first to drop them.
	///
	/// On error, the length, capacity and elements are left untouched.
	pub fn resize(&mut self, new_capacity: usize) -> Result<(), Error> {
		self.raw.try_resize(new_capacity)
	}

	/// Shrinks the capacity of the vector down to its length.
	#[inline]
	pub fn shrink_to_fit(&mut self) -> Result<(), Error> {
		self.resize(self.len())
	}

	/// Reserves capacity for at least `additional` more elements.
	///
	/// When the buffer must grow, its capacity becomes
	/// `max(capacity * 2, len + additional)`.
	/// Does nothing if capacity is already sufficient.
	#[inline]
	pub fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
		self.raw.try_reserve(additional)
	}

	/// Reserves the minimum capacity for exactly `additional` more elements.
	#[inline]
	pub fn try_reserve_exact(&mut self, additional: usize) -> Result<(), Error> {
		self.raw.try_reserve_exact(additional)
	}

	/// Same as [`try_reserve`](HeadedVec::try_reserve), panicking on errors.
	#[inline]
	pub fn reserve(&mut self, additional: usize) {
		handle_error(self.try_reserve(additional))
	}

	/// Appends an element to the back of the vector.
	///
	/// If the vector is full, its capacity first grows to `(capacity + 1) * 2`.
	/// If that fails, the error is returned, the vector is left untouched and `value`
	/// is dropped.
	#[inline]
	pub fn push_back(&mut self, value: T) -> Result<(), Error> {
		if !self.can_append() {
			self.raw.grow_one()?
		}

		unsafe {
			let len = self.len();
			ptr::write(self.as_mut_ptr().add(len), value);
			self.set_len(len + 1);
		}

		Ok(())
	}

	/// Appends an element to the back of the vector.
	///
	/// # Panics
	///
	/// Panics if the new capacity overflows, aborts if the allocation fails.
	#[inline]
	pub fn push(&mut self, value: T) {
		handle_error(self.push_back(value))
	}

	/// Appends an element if there is spare capacity, never reallocating.
	///
	/// Otherwise the element is given back inside [`Full`].
	#[inline]
	pub fn push_within_capacity(&mut self, value: T) -> Result<(), Full<T>> {
		if !self.can_append() {
			return Err(Full(value))
		}

		unsafe {
			let len = self.len();
			ptr::write(self.as_mut_ptr().add(len), value);
			self.set_len(len + 1);
		}

		Ok(())
	}

	/// Inserts an element at position `index` within the vector, shifting all
	/// elements after it to the right.
	///
	/// Inserting at `index == len` is the same as [`push_back`](HeadedVec::push_back).
	/// Grows exactly as `push_back` does.
	pub fn insert(&mut self, index: usize, element: T) -> Result<(), Error> {
		let len = self.len();
		if index > len {
			return Err(Error::IndexOutOfBounds { index, len })
		}

		// space for the new element
		if !self.can_append() {
			self.raw.grow_one()?
		}

		unsafe {
			// The spot to put the new value
			let p = self.as_mut_ptr().add(index);
			// Shift everything over to make space. (Duplicating the
			// `index`th element into two consecutive places.)
			ptr::copy(p, p.add(1), len - index);
			// Write it in, overwriting the first copy of the `index`th
			// element.
			ptr::write(p, element);
			self.set_len(len + 1);
		}

		Ok(())
	}

	/// Removes and returns the element at position `index` within the vector,
	/// moving the whole tail after it one slot to the left.
	///
	/// The remaining elements keep their relative order.
	pub fn remove_unordered(&mut self, index: usize) -> Result<T, Error> {
		let len = self.len();
		if index >= len {
			return Err(Error::IndexOutOfBounds { index, len })
		}

		unsafe {
			// the place we are taking from.
			let p = self.as_mut_ptr().add(index);
			// copy it out, unsafely having a copy of the value on
			// the stack and in the vector at the same time.
			let removed = ptr::read(p);

			// Shift everything down to fill in that spot.
			ptr::copy(p.add(1), p, len - index - 1);
			self.set_len(len - 1);
			Ok(removed)
		}
	}

	/// Removes and returns the element at position `index`, filling the gap with the
	/// element directly after it.
	///
	/// Only that single element moves: the elements further down the tail stay where they
	/// are, and the last slot is cut off by the length decrement.
	/// This matches a full ordered removal only when `index` is one of the last two
	/// positions.
	///
	/// ```
	/// # use headed_vec::HeadedVec;
	/// let mut vec: HeadedVec<u8> = HeadedVec::new();
	/// vec.push_all(&[5, 6, 7]).unwrap();
	/// assert_eq!(vec.remove_ordered(1), Ok(6));
	/// assert_eq!(vec, [5, 7]);
	/// ```
	pub fn remove_ordered(&mut self, index: usize) -> Result<T, Error> where T: Copy {
		let len = self.len();
		if index >= len {
			return Err(Error::IndexOutOfBounds { index, len })
		}

		unsafe {
			let p = self.as_mut_ptr().add(index);
			let removed = ptr::read(p);

			if index + 1 < len {
				ptr::copy_nonoverlapping(p.add(1), p, 1);
			}

			self.set_len(len - 1);
			Ok(removed)
		}
	}

	/// Removes the last element from the vector and returns it.
	///
	/// Fails with [`Error::Empty`] if there is none. Never reallocates.
	#[inline]
	pub fn pop_back(&mut self) -> Result<T, Error> {
		let len = self.len();
		if len == 0 {
			return Err(Error::Empty)
		}

		unsafe {
			self.set_len(len - 1);
			Ok(ptr::read(self.as_ptr().add(len - 1)))
		}
	}

	/// Removes the last element from a vector and returns it, or [`None`] if it
	/// is empty.
	#[inline]
	pub fn pop(&mut self) -> Option<T> {
		self.pop_back().ok()
	}

	/// Shortens the vector, keeping the first `len` elements and dropping
	/// the rest.
	///
	/// If `len` is greater than the vector's current length, this has no
	/// effect.
	///
	/// Note that this method has no effect on the allocated capacity
	/// of the vector.
	#[inline]
	pub fn truncate(&mut self, len: usize) {
		unsafe {
			if len > self.len() {
				return;
			}

			let remaining_len = self.len() - len;
			let s = ptr::slice_from_raw_parts_mut(self.as_mut_ptr().add(len), remaining_len);
			self.set_len(len);
			ptr::drop_in_place(s);
		}
	}

	/// Clears the vector, removing all values.
	#[inline]
	pub fn clear(&mut self) {
		self.truncate(0)
	}

	/// Clones and appends all elements in a slice to the vector.
	///
	/// This behaves like pushing every element of `items` in order, but the capacity is
	/// checked only once and the buffer grows at most once, to
	/// `max(capacity * 2, len + items.len())`.
	pub fn push_many(&mut self, items: &[T]) -> Result<(), Error> where T: Clone {
		self.try_reserve(items.len())?;

		let ptr = self.as_mut_ptr();
		let mut local_len = SetLenOnDrop::new(self.raw.meta_mut());
		for item in items {
			unsafe {
				ptr::write(ptr.add(local_len.current_len()), item.clone());
			}
			local_len.increment_len(1);
		}

		// len set by scope guard
		Ok(())
	}

	/// Appends all elements in a slice to the vector with a single bulk copy.
	///
	/// Grows the same way as [`push_many`](HeadedVec::push_many).
	pub fn push_all(&mut self, items: &[T]) -> Result<(), Error> where T: Copy {
		let count = items.len();
		self.try_reserve(count)?;

		unsafe {
			let len = self.len();
			ptr::copy_nonoverlapping(items.as_ptr(), self.as_mut_ptr().add(len), count);
			self.set_len(len + count);
		}

		Ok(())
	}

	/// Copies the elements into a new headerless array allocated with `alloc`.
	///
	/// `alloc` is independent from the vector's own allocator, so the copy can live
	/// in another allocation domain.
	/// Returns `Ok(None)` if the vector is empty.
	pub fn copy_to_plain_array<B: Allocator>(&self, alloc: B) -> Result<Option<PlainArray<T, B>>, Error> where T: Clone {
		if self.is_empty() {
			return Ok(None)
		}

		PlainArray::try_from_slice_in(self.as_slice(), alloc).map(Some)
	}

	/// Drops the elements and hands the allocation back to the allocator.
	///
	/// Fails with [`Error::InvalidAllocator`] if the allocator became incomplete,
	/// in which case the memory is leaked rather than released through it.
	/// Dropping the vector does the same, silently.
	pub fn destroy(self) -> Result<(), Error> {
		let mut this = ManuallyDrop::new(self);
		unsafe {
			ptr::drop_in_place(this.as_mut_slice());

			// `this` is never dropped, the buffer must be moved out of it to be released.
			let raw = ptr::read(&this.raw);
			raw.release()
		}
	}
}

// Set the length of the vec when the `SetLenOnDrop` value goes out of scope.
//
// The idea is: The length field in SetLenOnDrop is a local variable
// that the optimizer will see does not alias with any stores through the Vec's data
// pointer. This is a workaround for alias analysis issue #32155
struct SetLenOnDrop<'a, M: Meta> {
	meta: &'a mut M,
	local_len: usize,
}

impl<'a, M: Meta> SetLenOnDrop<'a, M> {
	#[inline]
	fn new(meta: &'a mut M) -> Self {
		SetLenOnDrop { local_len: meta.len(), meta }
	}

	#[inline]
	fn current_len(&self) -> usize {
		self.local_len
	}

	#[inline]
	fn increment_len(&mut self, increment: usize) {
		self.local_len += increment;
	}
}

impl<M: Meta> Drop for SetLenOnDrop<'_, M> {
	#[inline]
	fn drop(&mut self) {
		self.meta.set_len(self.local_len);
	}
}

impl<M: Meta, T: Clone, A: Allocator + Clone> Clone for HeadedVec<M, T, A> {
	fn clone(&self) -> Self {
		let mut vec = Self::with_capacity_in(self.len(), self.allocator().clone());
		handle_error(vec.push_many(self.as_slice()));
		vec
	}
}

impl<M: Meta, T, A: Allocator> Deref for HeadedVec<M, T, A> {
	type Target = [T];

	#[inline]
	fn deref(&self) -> &[T] {
		self.as_slice()
	}
}

impl<M: Meta, T, A: Allocator> DerefMut for HeadedVec<M, T, A> {
	#[inline]
	fn deref_mut(&mut self) -> &mut [T] {
		self.as_mut_slice()
	}
}

impl<'v, M: Meta, T, A: Allocator> IntoIterator for &'v HeadedVec<M, T, A> {
	type Item = &'v T;
	type IntoIter = std::slice::Iter<'v, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.as_slice().iter()
	}
}

impl<'v, M: Meta, T, A: Allocator> IntoIterator for &'v mut HeadedVec<M, T, A> {
	type Item = &'v mut T;
	type IntoIter = std::slice::IterMut<'v, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.as_mut_slice().iter_mut()
	}
}

/// An iterator that moves out of a vector.
///
/// The allocation is released once the iterator is dropped.
pub struct IntoIter<M: Meta, T, A: Allocator> {
	raw: RawHeadedVec<M, T, A>,
	offset: usize
}

impl<M: Meta, T, A: Allocator> IntoIter<M, T, A> {
	/// Returns the remaining items of this iterator as a slice.
	pub fn as_slice(&self) -> &[T] {
		unsafe {
			std::slice::from_raw_parts(self.raw.as_ptr().add(self.offset), self.raw.len() - self.offset)
		}
	}
}

impl<M: Meta, T, A: Allocator> Iterator for IntoIter<M, T, A> {
	type Item = T;

	fn next(&mut self) -> Option<T> {
		let i = self.offset;
		if i < self.raw.len() {
			self.offset += 1;
			unsafe {
				Some(ptr::read(self.raw.as_ptr().add(i)))
			}
		} else {
			None
		}
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = self.raw.len() - self.offset;
		(remaining, Some(remaining))
	}
}

impl<M: Meta, T, A: Allocator> DoubleEndedIterator for IntoIter<M, T, A> {
	fn next_back(&mut self) -> Option<T> {
		let len = self.raw.len();
		if self.offset < len {
			unsafe {
				self.raw.set_len(len - 1);
				Some(ptr::read(self.raw.as_ptr().add(len - 1)))
			}
		} else {
			None
		}
	}
}

impl<M: Meta, T, A: Allocator> ExactSizeIterator for IntoIter<M, T, A> {}

impl<M: Meta, T, A: Allocator> Drop for IntoIter<M, T, A> {
	fn drop(&mut self) {
		unsafe {
			// only drop remaining elements.
			let remaining = ptr::slice_from_raw_parts_mut(self.raw.as_mut_ptr().add(self.offset), self.raw.len() - self.offset);
			ptr::drop_in_place(remaining)
		}
	}
}

impl<M: Meta, T: fmt::Debug, A: Allocator> fmt::Debug for IntoIter<M, T, A> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
	}
}

impl<M: Meta, T, A: Allocator> IntoIterator for HeadedVec<M, T, A> {
	type Item = T;
	type IntoIter = IntoIter<M, T, A>;

	fn into_iter(self) -> Self::IntoIter {
		let this = ManuallyDrop::new(self);
		// this is safe because `this` is never used ever after.
		let raw = unsafe { ptr::read(&this.raw) };

		IntoIter {
			raw,
			offset: 0
		}
	}
}

impl<M: Meta, T, A: Allocator> Extend<T> for HeadedVec<M, T, A> {
	#[inline]
	fn extend<I: IntoIterator<Item = T>>(&mut self, iterator: I) {
		let mut iterator = iterator.into_iter();
		while let Some(element) = iterator.next() {
			let len = self.len();
			if len == self.capacity() {
				let (lower, _) = iterator.size_hint();
				self.reserve(lower.saturating_add(1));
			}
			unsafe {
				ptr::write(self.as_mut_ptr().add(len), element);
				// NB can't overflow since we would have had to alloc the address space
				self.set_len(len + 1);
			}
		}
	}
}

impl<'b, M: Meta, T: Copy + 'b, A: Allocator> Extend<&'b T> for HeadedVec<M, T, A> {
	#[inline]
	fn extend<I: IntoIterator<Item = &'b T>>(&mut self, iterator: I) {
		self.extend(iterator.into_iter().copied())
	}
}

impl<M: Meta, T> FromIterator<T> for HeadedVec<M, T, Global> {
	fn from_iter<I: IntoIterator<Item = T>>(iterator: I) -> Self {
		let iterator = iterator.into_iter();
		let (lower, _) = iterator.size_hint();
		let mut vec = Self::with_capacity(lower);
		vec.extend(iterator);
		vec
	}
}

impl<M: Meta, T: fmt::Debug, A: Allocator> fmt::Debug for HeadedVec<M, T, A> {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&**self, f)
	}
}

impl<M: Meta, T, A: Allocator> AsRef<[T]> for HeadedVec<M, T, A> {
	#[inline]
	fn as_ref(&self) -> &[T] {
		self
	}
}

impl<M: Meta, T, A: Allocator> AsMut<[T]> for HeadedVec<M, T, A> {
	#[inline]
	fn as_mut(&mut self) -> &mut [T] {
		self
	}
}

macro_rules! impl_slice_eq1 {
	([$($vars:tt)*] $lhs:ty, $rhs:ty) => {
		impl<$($vars)*> PartialEq<$rhs> for $lhs where T: PartialEq<U> {
			#[inline]
			fn eq(&self, other: &$rhs) -> bool { self[..] == other[..] }
			#[inline]
			fn ne(&self, other: &$rhs) -> bool { self[..] != other[..] }
		}
	}
}

impl_slice_eq1! { [T, U, O: Meta, P: Meta, A: Allocator, B: Allocator] HeadedVec<O, T, A>, HeadedVec<P, U, B> }
impl_slice_eq1! { [T, U, M: Meta, A: Allocator] HeadedVec<M, T, A>, Vec<U> }
impl_slice_eq1! { [T, U, M: Meta, A: Allocator] Vec<T>, HeadedVec<M, U, A> }
impl_slice_eq1! { [T, U, M: Meta, A: Allocator] HeadedVec<M, T, A>, &[U] }
impl_slice_eq1! { [T, U, M: Meta, A: Allocator] HeadedVec<M, T, A>, &mut [U] }
impl_slice_eq1! { [T, U, M: Meta, A: Allocator] &[T], HeadedVec<M, U, A> }
impl_slice_eq1! { [T, U, M: Meta, A: Allocator] &mut [T], HeadedVec<M, U, A> }
impl_slice_eq1! { [T, U, M: Meta, A: Allocator, const N: usize] HeadedVec<M, T, A>, [U; N] }
impl_slice_eq1! { [T, U, M: Meta, A: Allocator, const N: usize] HeadedVec<M, T, A>, &[U; N] }
impl_slice_eq1! { [T, U, M: Meta, A: Allocator, const N: usize] [T; N], HeadedVec<M, U, A> }

impl<M: Meta, T: Eq, A: Allocator> Eq for HeadedVec<M, T, A> {}
