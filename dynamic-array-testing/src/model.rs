use dynamic_array::DynamicArray;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Push(i16),
    Pop,
    Insert(usize, i16),
    Erase(usize),
    Resize(usize),
    Reserve(usize),
    CloneFrom(Vec<i16>),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i16>().prop_map(Op::Push),
        1 => Just(Op::Pop),
        3 => (any::<usize>(), any::<i16>()).prop_map(|(i, v)| Op::Insert(i, v)),
        2 => any::<usize>().prop_map(Op::Erase),
        1 => (0usize..64).prop_map(Op::Resize),
        1 => (0usize..64).prop_map(Op::Reserve),
        1 => proptest::collection::vec(any::<i16>(), 0..32).prop_map(Op::CloneFrom),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    #[test]
    fn behaves_like_vec(ops in proptest::collection::vec(op(), 0..100)) {
        let mut array = DynamicArray::new();
        let mut model = Vec::new();
        for op in ops {
            let capacity = array.capacity();
            match op {
                Op::Push(v) => {
                    array.push(v);
                    model.push(v);
                    if capacity < array.len() {
                        prop_assert_eq!(array.capacity(), (capacity * 2).max(1));
                    }
                }
                Op::Pop => {
                    prop_assert_eq!(array.pop(), model.pop());
                }
                Op::Insert(i, v) => {
                    let i = i % (model.len() + 1);
                    prop_assert_eq!(*array.insert(i, v), v);
                    model.insert(i, v);
                }
                Op::Erase(i) => {
                    if !model.is_empty() {
                        let i = i % model.len();
                        array.erase(i);
                        model.remove(i);
                    }
                }
                Op::Resize(n) => {
                    array.resize(n);
                    model.resize(n, 0);
                }
                Op::Reserve(n) => {
                    array.reserve(n);
                    prop_assert_eq!(array.capacity(), capacity.max(n));
                }
                Op::CloneFrom(values) => {
                    let source = DynamicArray::from(values.clone());
                    array.clone_from(&source);
                    model = values;
                }
                Op::Clear => {
                    array.clear();
                    model.clear();
                    prop_assert_eq!(array.capacity(), capacity);
                }
            }
            prop_assert_eq!(&array, &model);
            prop_assert!(array.len() <= array.capacity());
        }
    }

    #[test]
    fn clone_round_trips(values in proptest::collection::vec(any::<u64>(), 0..64)) {
        let array = DynamicArray::from(values.clone());
        let copy = array.clone();
        prop_assert_eq!(copy.capacity(), values.len());
        prop_assert_eq!(&copy, &array);
        prop_assert_eq!(copy.into_iter().collect::<Vec<_>>(), values);
    }
}
