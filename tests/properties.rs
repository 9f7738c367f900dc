use headed_vec::{
	Error,
	Global,
	HeadedVec,
	Tracking
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
	Push(u32),
	PushMany(Vec<u32>),
	Insert(usize, u32),
	RemoveUnordered(usize),
	RemoveOrdered(usize),
	Pop,
	Resize(usize),
	ShrinkToFit
}

fn arb_op() -> impl Strategy<Value = Op> {
	prop_oneof![
		4 => any::<u32>().prop_map(Op::Push),
		1 => prop::collection::vec(any::<u32>(), 0..20).prop_map(Op::PushMany),
		2 => (0usize..40, any::<u32>()).prop_map(|(i, v)| Op::Insert(i, v)),
		2 => (0usize..40).prop_map(Op::RemoveUnordered),
		1 => (0usize..40).prop_map(Op::RemoveOrdered),
		2 => Just(Op::Pop),
		1 => (0usize..40).prop_map(Op::Resize),
		1 => Just(Op::ShrinkToFit),
	]
}

/// Applies `op` to both the vector and a `Vec` model of it.
fn apply(vec: &mut HeadedVec<u32, &Tracking<Global>>, model: &mut Vec<u32>, op: Op) {
	let len = model.len();
	match op {
		Op::Push(v) => {
			vec.push_back(v).unwrap();
			model.push(v);
		},
		Op::PushMany(items) => {
			vec.push_many(&items).unwrap();
			model.extend_from_slice(&items);
		},
		Op::Insert(index, v) => {
			if index > len {
				assert_eq!(vec.insert(index, v), Err(Error::IndexOutOfBounds { index, len }));
			} else {
				vec.insert(index, v).unwrap();
				model.insert(index, v);
			}
		},
		Op::RemoveUnordered(index) => {
			if index >= len {
				assert_eq!(vec.remove_unordered(index), Err(Error::IndexOutOfBounds { index, len }));
			} else {
				assert_eq!(vec.remove_unordered(index), Ok(model.remove(index)));
			}
		},
		Op::RemoveOrdered(index) => {
			if index >= len {
				assert_eq!(vec.remove_ordered(index), Err(Error::IndexOutOfBounds { index, len }));
			} else {
				assert_eq!(vec.remove_ordered(index), Ok(model[index]));
				if index + 1 < len {
					model[index] = model[index + 1];
				}
				model.truncate(len - 1);
			}
		},
		Op::Pop => {
			match model.pop() {
				Some(v) => assert_eq!(vec.pop_back(), Ok(v)),
				None => assert_eq!(vec.pop_back(), Err(Error::Empty))
			}
		},
		Op::Resize(capacity) => {
			vec.resize(capacity).unwrap();
			model.truncate(capacity);
			assert_eq!(vec.capacity(), capacity);
		},
		Op::ShrinkToFit => {
			vec.shrink_to_fit().unwrap();
			assert_eq!(vec.capacity(), model.len());
		}
	}
}

proptest! {
	#[test]
	fn behaves_like_vec(initial_capacity in 0usize..32, ops in prop::collection::vec(arb_op(), 0..100)) {
		let tracking = Tracking::new(Global);
		{
			let mut vec: HeadedVec<u32, _> = HeadedVec::try_with_capacity_in(initial_capacity, &tracking).unwrap();
			let mut model = Vec::new();

			for op in ops {
				apply(&mut vec, &mut model, op);
				prop_assert!(vec.len() <= vec.capacity());
				prop_assert_eq!(vec.as_slice(), model.as_slice());
				prop_assert_eq!(vec.element_size(), 4);
			}
		}

		prop_assert_eq!(tracking.allocations(), 1);
		prop_assert_eq!(tracking.releases(), 1);
		prop_assert_eq!(tracking.live_bytes(), 0);
	}

	#[test]
	fn pushes_preserve_insertion_order(values in prop::collection::vec(any::<i64>(), 0..500)) {
		let mut vec: HeadedVec<i64> = HeadedVec::with_capacity(0);
		for v in &values {
			vec.push_back(*v).unwrap();
		}

		prop_assert_eq!(vec.len(), values.len());
		prop_assert!(vec.capacity() >= values.len());
		for (i, v) in values.iter().enumerate() {
			prop_assert_eq!(vec[i], *v);
		}
	}

	#[test]
	fn push_pop_round_trip(prefix in prop::collection::vec(any::<u8>(), 0..50), x in any::<u8>()) {
		let mut vec: HeadedVec<u8> = HeadedVec::with_capacity(prefix.len());
		vec.push_all(&prefix).unwrap();

		vec.push_back(x).unwrap();
		prop_assert_eq!(vec.pop_back(), Ok(x));
		prop_assert_eq!(vec.len(), prefix.len());
	}

	#[test]
	fn reallocations_are_logarithmic(initial_capacity in 1usize..64, count in 0usize..5000) {
		let tracking = Tracking::new(Global);
		let mut vec: HeadedVec<u16, _> = HeadedVec::try_with_capacity_in(initial_capacity, &tracking).unwrap();
		for i in 0..count {
			vec.push_back(i as u16).unwrap();
		}

		// each growth at least doubles the capacity.
		let mut bound = 0;
		let mut capacity = initial_capacity;
		while capacity < count {
			capacity *= 2;
			bound += 1;
		}

		prop_assert!(tracking.reallocations() <= bound);
	}
}
