use crate::{LocalVec, TightLocalVec, local_vec};
use std::{cell::Cell, rc::Rc};

/// Element type that counts how many instances are live, for checking that
/// every non-trivial destructor runs exactly once.
#[derive(Debug)]
struct Counted {
    live: Rc<Cell<usize>>,
    value: u32,
}

impl Counted {
    fn new(live: &Rc<Cell<usize>>, value: u32) -> Self {
        live.set(live.get() + 1);
        Self {
            live: Rc::clone(live),
            value,
        }
    }
}

impl Clone for Counted {
    fn clone(&self) -> Self {
        Self::new(&self.live, self.value)
    }
}

impl Drop for Counted {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

#[test]
fn push_sets_len() {
    let mut vec = LocalVec::<u32>::new();
    for count in 0..32 {
        assert_eq!(vec.len(), count as usize);
        vec.push(count);
    }
    assert_eq!(vec.len(), 32);
}

#[test]
fn exponential_growth_doubles() {
    let mut vec = LocalVec::<u32>::new();
    let mut capacities = Vec::new();
    for value in 0..9 {
        vec.push(value);
        capacities.push(vec.capacity());
    }
    assert_eq!(capacities, [1, 2, 4, 4, 8, 8, 8, 8, 16]);
}

#[test]
fn tight_growth_adds_single_slots() {
    let mut vec = TightLocalVec::<u32>::new();
    let mut capacities = Vec::new();
    for value in 0..4 {
        vec.push(value);
        capacities.push(vec.capacity());
    }
    assert_eq!(capacities, [1, 2, 3, 4]);
}

#[test]
fn reserve_rounds_up_or_is_exact() {
    let mut exponential = LocalVec::<u8>::new();
    exponential.reserve(5);
    assert_eq!(exponential.capacity(), 8);

    let mut tight = TightLocalVec::<u8>::new();
    tight.reserve(5);
    assert_eq!(tight.capacity(), 5);
    tight.reserve(3);
    assert_eq!(tight.capacity(), 5);
}

#[test]
fn capacity_never_decreases_short_of_reset() {
    let mut vec = LocalVec::<u32>::new();
    vec.reserve(16);
    vec.push(1);
    vec.truncate(0);
    vec.resize(4);
    vec.clear();
    assert_eq!(vec.capacity(), 16);
    vec.reset();
    assert_eq!(vec.capacity(), 0);
    assert_eq!(vec.len(), 0);
}

#[test]
fn sort_makes_ascending() {
    let mut vec = LocalVec::<i32>::new();
    vec.push(3);
    vec.push(1);
    vec.push(2);
    assert_eq!(vec.len(), 3);
    vec.sort_unstable();
    assert_eq!(vec, [1, 2, 3]);
}

#[test]
fn sort_with_custom_comparator() {
    let mut vec = local_vec![1, 3, 2];
    vec.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(vec, [3, 2, 1]);

    let mut empty: LocalVec<i32> = local_vec![];
    empty.sort_unstable();
    assert!(empty.is_empty());
}

#[test]
fn insert_shifts_tail_up() {
    let mut vec = local_vec![1, 2, 3];
    vec.insert(1, 99);
    assert_eq!(vec, [1, 99, 2, 3]);
    vec.insert(0, 98);
    assert_eq!(vec, [98, 1, 99, 2, 3]);
}

#[test]
fn insert_at_len_appends() {
    let mut vec = local_vec![1, 2];
    vec.insert(2, 3);
    assert_eq!(vec, [1, 2, 3]);
}

#[test]
fn remove_preserves_order() {
    let mut vec = local_vec![1, 2, 3, 4];
    assert_eq!(vec.remove(1), 2);
    assert_eq!(vec, [1, 3, 4]);
    assert_eq!(vec.remove(2), 4);
    assert_eq!(vec, [1, 3]);
}

#[test]
fn swap_remove_backfills_with_last() {
    let mut vec = local_vec![1, 2, 3];
    assert_eq!(vec.swap_remove(0), 1);
    assert_eq!(vec, [3, 2]);

    // Removing the last slot is a plain pop.
    let mut vec = local_vec![1, 2, 3];
    assert_eq!(vec.swap_remove(2), 3);
    assert_eq!(vec, [1, 2]);
}

#[test]
fn remove_value_reports_presence() {
    let mut vec = local_vec![1, 2, 3];
    assert_eq!(vec.remove_value(&2), Some(2));
    assert_eq!(vec, [1, 3]);
    assert_eq!(vec.remove_value(&9), None);
    assert_eq!(vec, [1, 3]);
}

#[test]
fn find_returns_first_match() {
    let vec = local_vec![5, 7, 5, 7];
    assert_eq!(vec.find(&7), Some(1));
    assert_eq!(vec.find(&6), None);
    assert_eq!(vec.find_from(&7, 2), Some(3));
    assert_eq!(vec.find_from(&7, 4), None);
    assert_eq!(vec.find_from(&7, 100), None);
}

#[test]
fn insert_ordered_keeps_ascending() {
    let mut vec = local_vec![1, 2, 2, 4];
    vec.insert_ordered(2);
    assert_eq!(vec, [1, 2, 2, 2, 4]);
    vec.insert_ordered(0);
    assert_eq!(vec, [0, 1, 2, 2, 2, 4]);
    vec.insert_ordered(9);
    assert_eq!(vec, [0, 1, 2, 2, 2, 4, 9]);

    let mut empty = LocalVec::<i32>::new();
    empty.insert_ordered(5);
    assert_eq!(empty, [5]);
}

#[test]
fn reverse_inverts_order() {
    let mut vec = local_vec![1, 2, 3, 4, 5];
    vec.reverse();
    assert_eq!(vec, [5, 4, 3, 2, 1]);
}

#[test]
fn resize_default_fills_and_truncates() {
    let mut vec = local_vec![1, 2, 3];
    vec.resize(5);
    assert_eq!(vec, [1, 2, 3, 0, 0]);
    vec.resize(5);
    assert_eq!(vec.len(), 5);
    vec.resize(2);
    assert_eq!(vec, [1, 2]);
}

#[test]
fn resize_with_calls_constructor_in_order() {
    let mut vec = LocalVec::<u32>::new();
    let mut next = 0;
    vec.resize_with(4, || {
        next += 1;
        next
    });
    assert_eq!(vec, [1, 2, 3, 4]);
}

#[test]
fn byte_view_round_trip() {
    let vec = local_vec![0xDEADBEEFu32, 0x01020304, 7];
    let bytes = vec.to_byte_vec();
    assert_eq!(bytes.len(), 12);
    let back: Vec<u32> = bytes
        .chunks_exact(4)
        .map(|chunk| u32::from_ne_bytes(chunk.try_into().unwrap()))
        .collect();
    assert_eq!(vec, back);
}

#[test]
fn clone_is_deep() {
    let live = Rc::new(Cell::new(0));
    let mut original = LocalVec::<Counted>::new();
    for value in 0..3 {
        original.push(Counted::new(&live, value));
    }

    let mut copy = original.clone();
    assert_eq!(live.get(), 6);
    assert_eq!(copy.len(), original.len());
    for (a, b) in original.iter().zip(copy.iter()) {
        assert_eq!(a.value, b.value);
    }

    copy.push(Counted::new(&live, 99));
    copy[0].value = 41;
    assert_eq!(original.len(), 3);
    assert_eq!(original[0].value, 0);

    drop(copy);
    assert_eq!(live.get(), 3);
}

#[test]
fn indexing_reads_and_writes_in_place() {
    let mut vec = local_vec![1, 2, 3];
    assert_eq!(vec[1], 2);
    vec[1] = 42;
    assert_eq!(vec, [1, 42, 3]);
    assert_eq!(&vec[1..], [42, 3]);
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn indexed_read_past_len_panics() {
    let vec = local_vec![1];
    let _ = vec[1];
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn indexed_write_past_len_panics() {
    let mut vec = local_vec![1];
    vec[3] = 9;
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn insert_past_len_panics() {
    let mut vec = local_vec![1];
    vec.insert(2, 9);
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn remove_past_len_panics() {
    let mut vec = local_vec![1];
    vec.remove(1);
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn swap_remove_past_len_panics() {
    let mut vec: LocalVec<u32> = local_vec![];
    vec.swap_remove(0);
}

#[test]
fn drop_accounting() {
    let live = Rc::new(Cell::new(0));
    let mut vec = LocalVec::<Counted>::new();
    for value in 0..8 {
        vec.push(Counted::new(&live, value));
    }
    assert_eq!(live.get(), 8);

    vec.truncate(5);
    assert_eq!(live.get(), 5);
    drop(vec.remove(0));
    assert_eq!(live.get(), 4);
    drop(vec.swap_remove(1));
    assert_eq!(live.get(), 3);

    vec.clear();
    assert_eq!(live.get(), 0);
    assert_eq!(vec.capacity(), 8);

    for value in 0..4 {
        vec.push(Counted::new(&live, value));
    }
    vec.reset();
    assert_eq!(live.get(), 0);
    assert_eq!(vec.capacity(), 0);

    // Reusable after a full reset.
    for value in 0..4 {
        vec.push(Counted::new(&live, value));
    }
    assert_eq!(live.get(), 4);
    drop(vec);
    assert_eq!(live.get(), 0);
}

#[test]
fn into_iter_yields_in_order() {
    let vec = local_vec![1, 2, 3, 4];
    let forward: Vec<i32> = vec.clone().into_iter().collect();
    assert_eq!(forward, [1, 2, 3, 4]);
    let backward: Vec<i32> = vec.into_iter().rev().collect();
    assert_eq!(backward, [4, 3, 2, 1]);
}

#[test]
fn into_iter_drops_unconsumed_elements() {
    let live = Rc::new(Cell::new(0));
    let mut vec = LocalVec::<Counted>::new();
    for value in 0..6 {
        vec.push(Counted::new(&live, value));
    }

    let mut iter = vec.into_iter();
    let first = iter.next().unwrap();
    assert_eq!(first.value, 0);
    drop(first);
    assert_eq!(live.get(), 5);
    drop(iter);
    assert_eq!(live.get(), 0);
}

#[test]
fn vec_conversions() {
    let vec: LocalVec<String> = ["a", "b"].into_iter().map(String::from).collect();
    let std_vec: Vec<String> = vec.into();
    assert_eq!(std_vec, ["a", "b"]);

    let back: LocalVec<String> = std_vec.into();
    assert_eq!(back.len(), 2);
    assert_eq!(back[0], "a");
}

#[test]
fn construction_forms() {
    let repeated = local_vec![5; 3];
    assert_eq!(repeated, [5, 5, 5]);

    let mut vec = LocalVec::<u32>::from([1, 2]);
    vec.extend([3, 4]);
    vec.extend_from_slice(&[5]);
    vec.extend(&[6]);
    assert_eq!(vec, [1, 2, 3, 4, 5, 6]);

    let collected: LocalVec<u32> = (0..4).collect();
    assert_eq!(collected, [0, 1, 2, 3]);

    let from_slice: LocalVec<u32> = (&[7, 8][..]).into();
    assert_eq!(from_slice, [7, 8]);
}

#[test]
fn equality_crosses_parameterizations() {
    let exponential: LocalVec<u32> = local_vec![1, 2, 3];
    let tight: TightLocalVec<u32, usize> = [1, 2, 3].into();
    assert_eq!(exponential, tight);
    assert_eq!(exponential, [1, 2, 3]);
    assert_eq!(exponential, vec![1, 2, 3]);
    assert_eq!(vec![1, 2, 3], exponential);
    assert_ne!(exponential, [1, 2]);
}

#[test]
fn ordering_and_hashing_follow_slices() {
    use std::hash::{DefaultHasher, Hash, Hasher};

    let short = local_vec![1, 2];
    let long = local_vec![1, 2, 3];
    assert!(short < long);
    assert!(local_vec![2] > long);

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }
    assert_eq!(hash_of(&short), hash_of(&local_vec![1, 2]));
}

#[test]
fn zero_sized_elements_never_allocate() {
    #[derive(Debug, PartialEq)]
    struct Marker;

    let mut vec = LocalVec::<Marker>::new();
    assert_eq!(vec.capacity(), u32::MAX as usize);
    for _ in 0..100 {
        vec.push(Marker);
    }
    assert_eq!(vec.len(), 100);
    assert_eq!(vec.pop(), Some(Marker));
    assert_eq!(vec.iter().count(), 99);
    let collected: Vec<Marker> = vec.into_iter().collect();
    assert_eq!(collected.len(), 99);
}

#[test]
fn narrow_len_type_clamps_exponential_growth() {
    let mut vec = LocalVec::<u32, u8>::new();
    vec.reserve(200);
    assert_eq!(vec.capacity(), 255);
}

#[test]
#[should_panic(expected = "capacity overflow")]
fn narrow_len_type_overflow_panics() {
    let mut vec = LocalVec::<u32, u8>::new();
    vec.reserve(300);
}

#[test]
fn header_is_no_larger_than_vec() {
    assert!(size_of::<LocalVec<u8>>() <= size_of::<Vec<u8>>());
    assert!(size_of::<LocalVec<u8, u8>>() <= size_of::<LocalVec<u8, usize>>());
}

#[cfg(feature = "serde")]
mod serde_round_trip {
    use super::*;

    #[test]
    fn json() {
        let vec = local_vec![1u32, 2, 3];
        let json = serde_json::to_string(&vec).unwrap();
        assert_eq!(json, "[1,2,3]");
        let back: LocalVec<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec);
    }

    #[test]
    fn json_empty() {
        let vec: LocalVec<u32> = local_vec![];
        let json = serde_json::to_string(&vec).unwrap();
        assert_eq!(json, "[]");
        let back: LocalVec<u32> = serde_json::from_str(&json).unwrap();
        assert!(back.is_empty());
    }
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Push(u32),
        Pop,
        Insert(usize, u32),
        Remove(usize),
        SwapRemove(usize),
        Truncate(usize),
        Reserve(usize),
        Clear,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<u32>().prop_map(Op::Push),
            Just(Op::Pop),
            (any::<usize>(), any::<u32>()).prop_map(|(index, value)| Op::Insert(index, value)),
            any::<usize>().prop_map(Op::Remove),
            any::<usize>().prop_map(Op::SwapRemove),
            (0usize..32).prop_map(Op::Truncate),
            (0usize..64).prop_map(Op::Reserve),
            Just(Op::Clear),
        ]
    }

    proptest! {
        // Drives the container and std's Vec through the same operations
        // and requires identical observable state after each one.
        #[test]
        fn matches_vec_model(ops in proptest::collection::vec(op(), 1..64)) {
            let mut subject = LocalVec::<u32, usize>::new();
            let mut model = Vec::<u32>::new();
            for op in ops {
                match op {
                    Op::Push(value) => {
                        subject.push(value);
                        model.push(value);
                    }
                    Op::Pop => prop_assert_eq!(subject.pop(), model.pop()),
                    Op::Insert(index, value) => {
                        let index = index % (model.len() + 1);
                        subject.insert(index, value);
                        model.insert(index, value);
                    }
                    Op::Remove(index) => {
                        if !model.is_empty() {
                            let index = index % model.len();
                            prop_assert_eq!(subject.remove(index), model.remove(index));
                        }
                    }
                    Op::SwapRemove(index) => {
                        if !model.is_empty() {
                            let index = index % model.len();
                            prop_assert_eq!(subject.swap_remove(index), model.swap_remove(index));
                        }
                    }
                    Op::Truncate(len) => {
                        subject.truncate(len);
                        model.truncate(len);
                    }
                    Op::Reserve(capacity) => subject.reserve(capacity),
                    Op::Clear => {
                        subject.clear();
                        model.clear();
                    }
                }
                prop_assert_eq!(subject.as_slice(), model.as_slice());
                prop_assert!(subject.capacity() >= subject.len());
                prop_assert!(subject.capacity() == 0 || subject.capacity().is_power_of_two());
            }
        }

        #[test]
        fn n_pushes_give_len_n(values in proptest::collection::vec(any::<u32>(), 0..64)) {
            let mut vec = LocalVec::<u32>::new();
            for (count, &value) in values.iter().enumerate() {
                prop_assert_eq!(vec.len(), count);
                vec.push(value);
            }
            prop_assert_eq!(vec.as_slice(), values.as_slice());
        }

        #[test]
        fn tight_reserve_is_exact(first in 1usize..256, second in 1usize..256) {
            let mut vec = TightLocalVec::<u8, usize>::new();
            vec.reserve(first);
            prop_assert_eq!(vec.capacity(), first);
            vec.reserve(second);
            prop_assert_eq!(vec.capacity(), first.max(second));
        }

        #[test]
        fn insert_ordered_sorts(values in proptest::collection::vec(any::<i32>(), 0..32)) {
            let mut vec = LocalVec::<i32>::new();
            for &value in &values {
                vec.insert_ordered(value);
            }
            prop_assert_eq!(vec.len(), values.len());
            prop_assert!(vec.is_sorted());
        }
    }
}
