use crate::alloc::Global;

/// Stores the length and capacity with two `usize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Meta {
	len: usize,
	capacity: usize
}

impl crate::raw::Meta for Meta {
	const MAX_LENGTH: usize = std::usize::MAX;

	fn new(len: usize, capacity: usize) -> Self {
		Meta {
			len,
			capacity
		}
	}

	fn len(&self) -> usize {
		self.len
	}

	fn capacity(&self) -> usize {
		self.capacity
	}

	fn set_len(&mut self, len: usize) {
		self.len = len
	}

	fn set_capacity(&mut self, capacity: usize) {
		self.capacity = capacity
	}
}

pub type HeadedVec<T, A = Global> = crate::generic::HeadedVec<Meta, T, A>;
pub type IntoIter<T, A = Global> = crate::generic::IntoIter<Meta, T, A>;
