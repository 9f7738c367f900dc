use crate::alloc::Global;

/// Stores both the length and capacity in a single `usize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Meta {
	data: usize
}

const CAP_MASK: usize = std::u32::MAX as usize;
const LEN_MASK: usize = (std::u32::MAX as usize) << 32;

impl crate::raw::Meta for Meta {
	const MAX_LENGTH: usize = std::u32::MAX as usize;

	fn new(len: usize, capacity: usize) -> Self {
		assert!(len <= Self::MAX_LENGTH);
		assert!(capacity <= Self::MAX_LENGTH);

		Meta {
			data: len << 32 | capacity
		}
	}

	fn len(&self) -> usize {
		self.data >> 32
	}

	fn capacity(&self) -> usize {
		self.data & CAP_MASK
	}

	fn set_len(&mut self, len: usize) {
		assert!(len <= Self::MAX_LENGTH);
		self.data = (len << 32) | (self.data & CAP_MASK)
	}

	fn set_capacity(&mut self, capacity: usize) {
		assert!(capacity <= Self::MAX_LENGTH);
		self.data = (self.data & LEN_MASK) | capacity
	}
}

pub type HeadedVec<T, A = Global> = crate::generic::HeadedVec<Meta, T, A>;
pub type IntoIter<T, A = Global> = crate::generic::IntoIter<Meta, T, A>;

#[cfg(test)]
mod tests {
	use super::*;
	use crate::raw::Meta as _;

	#[test]
	fn packing() {
		let mut meta = Meta::new(3, 10);
		assert_eq!(meta.len(), 3);
		assert_eq!(meta.capacity(), 10);

		meta.set_capacity(std::u32::MAX as usize);
		meta.set_len(7);
		assert_eq!(meta.len(), 7);
		assert_eq!(meta.capacity(), std::u32::MAX as usize);
	}

	#[test]
	fn header_is_smaller() {
		assert!(std::mem::size_of::<Meta>() < std::mem::size_of::<crate::wide::Meta>());
	}
}
