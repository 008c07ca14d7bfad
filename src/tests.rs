use super::{AvlTreeMap, AvlTreeSet, Order, Reversed};

const N: i32 = 1_000;
const LARGE_N: i32 = 10_000_000;

#[test]
fn test_new() {
    let map_i32 = AvlTreeMap::<i32, ()>::new();
    assert!(map_i32.is_empty());
    assert_eq!(map_i32.height(), 0);
    map_i32.check_consistency();

    let map_i8 = AvlTreeMap::<i8, ()>::new();
    assert!(map_i8.is_empty());
    map_i8.check_consistency();

    let map_string = AvlTreeMap::<String, String>::new();
    assert!(map_string.is_empty());
    map_string.check_consistency();
}

#[test]
fn test_rebalance() {
    {
        //     3 ->   2
        //    /      / \
        //   2      1   3
        //  /
        // 1
        let mut map = AvlTreeMap::new();
        map.insert(3, ());
        map.insert(2, ());
        map.insert(1, ());
        map.check_consistency();
        assert_eq!(map.height(), 2);
    }
    {
        //     3   ->     3 ->   2
        //    / \        /      / \
        //   2   4      2      1   3
        //  /          /
        // 1          1
        let mut map = AvlTreeMap::new();
        map.insert(3, ());
        map.insert(2, ());
        map.insert(4, ());
        map.insert(1, ());
        map.check_consistency();
        assert_eq!(map.height(), 3);
        map.remove(&4);
        map.check_consistency();
        assert_eq!(map.height(), 2);
    }
    {
        //   3  ->   2
        //  /       / \
        // 1       1   3
        //  \
        //   2
        let mut map = AvlTreeMap::new();
        map.insert(3, ());
        map.insert(1, ());
        map.insert(2, ());
        map.check_consistency();
        assert_eq!(map.height(), 2);
    }
    {
        //   3   ->   3  ->   2
        //  / \      /       / \
        // 1   4    1       1   3
        //  \        \
        //   2        2
        let mut map = AvlTreeMap::new();
        map.insert(3, ());
        map.insert(1, ());
        map.insert(4, ());
        map.insert(2, ());
        map.check_consistency();
        assert_eq!(map.height(), 3);
        map.remove(&4);
        map.check_consistency();
        assert_eq!(map.height(), 2);
    }
    {
        // 1 ->    2
        //  \     / \
        //   2   1   3
        //    \
        //     3
        let mut map = AvlTreeMap::new();
        map.insert(1, ());
        map.insert(2, ());
        map.insert(3, ());
        map.check_consistency();
        assert_eq!(map.height(), 2);
    }
    {
        //   1     -> 1     ->    2
        //  / \        \         / \
        // 0   2        2       1   3
        //      \        \
        //       3        3
        let mut map = AvlTreeMap::new();
        map.insert(1, ());
        map.insert(0, ());
        map.insert(2, ());
        map.insert(3, ());
        map.check_consistency();
        assert_eq!(map.height(), 3);
        map.remove(&0);
        map.check_consistency();
        assert_eq!(map.height(), 2);
    }
    {
        // 1   ->  2
        //  \     / \
        //   3   1   3
        //  /
        // 2
        let mut map = AvlTreeMap::new();
        map.insert(1, ());
        map.insert(3, ());
        map.insert(2, ());
        map.check_consistency();
        assert_eq!(map.height(), 2);
    }
    {
        //   1   ->  1   ->  2
        //  / \       \     / \
        // 0   3       3   1   3
        //    /       /
        //   2       2
        let mut map = AvlTreeMap::new();
        map.insert(1, ());
        map.insert(0, ());
        map.insert(3, ());
        map.insert(2, ());
        map.check_consistency();
        assert_eq!(map.height(), 3);
        map.remove(&0);
        map.check_consistency();
        assert_eq!(map.height(), 2);
    }
    {
        //   2       ->  2      ->    4
        //  / \           \          / \
        // 1   4           4        2   5
        //    / \         / \        \
        //   3   5       3   5        3
        let mut map = AvlTreeMap::new();
        for key in [2, 1, 4, 3, 5] {
            map.insert(key, ());
        }
        map.remove(&1);
        map.check_consistency();
        assert_eq!(map.height(), 3);
        let preorder: Vec<_> = map.traverse(Order::PreOrder).map(|(k, _)| *k).collect();
        assert_eq!(preorder, vec![4, 2, 3, 5]);
    }
}

#[test]
fn test_insert() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut values: Vec<i32> = (0..N).map(|_| rng.gen()).collect();
    values.sort();
    values.dedup();

    let mut map = AvlTreeMap::new();
    for value in &values {
        assert!(map.insert(*value, *value).is_none());
        map.check_consistency();
    }
    assert!(map.len() == values.len());

    for value in &values {
        assert_eq!(map.insert(*value, value.wrapping_add(1)), Some(*value));
    }
    assert!(map.len() == values.len());
    map.check_consistency();
}

#[test]
#[ignore]
fn test_insert_large() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);

    let mut map = AvlTreeMap::new();
    for value in (0..LARGE_N).map(|_| rng.gen::<i32>()) {
        map.insert(value, ());
    }
    map.check_consistency();
}

#[test]
fn test_insert_sorted_range() {
    let mut map = AvlTreeMap::new();
    for value in 0..N {
        assert!(map.insert(value, value).is_none());
        map.check_consistency();
    }
    assert!(map.len() == N as usize);
    assert!(map.height() > 0);
    // AVL height bound: < 1.45 log2(n + 2)
    assert!(map.height() <= 14);
    assert!(map.get(&-42).is_none());
}

#[test]
fn test_insert_shuffled_range() {
    use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

    let mut values: Vec<i32> = (0..N).collect();
    let mut rng = StdRng::seed_from_u64(0);
    values.shuffle(&mut rng);

    let mut map = AvlTreeMap::new();
    for value in &values {
        assert!(map.insert(*value, "foo").is_none());
        map.check_consistency();
    }
    assert!(map.len() == values.len());

    for value in &values {
        assert_eq!(map.insert(*value, "bar"), Some("foo"));
    }
    assert!(map.len() == values.len());
    assert!(map.get(&-42).is_none());
    assert!(map.values().all(|v| *v == "bar"));
}

#[test]
fn test_get() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let values: Vec<i32> = (0..N).map(|_| rng.gen()).collect();

    let mut map = AvlTreeMap::new();
    assert!(map.get(&42).is_none());
    for value in &values {
        map.insert(*value, value.wrapping_add(1));
    }

    for value in &values {
        let got = map.get(value);
        assert_eq!(got, Some(&value.wrapping_add(1)));
        let got = map.get_key_value(value);
        assert_eq!(got, Some((value, &value.wrapping_add(1))));
        assert!(map.contains_key(value));
        assert_eq!(map[value], value.wrapping_add(1));
    }

    for value in &values {
        if let Some(mapped) = map.get_mut(value) {
            *mapped = 42;
        }
    }
    assert!(map.values().all(|v| *v == 42));
}

#[test]
fn test_clear() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut values: Vec<i32> = (0..N).map(|_| rng.gen()).collect();
    values.sort();
    values.dedup();

    let mut map = AvlTreeMap::new();
    for value in &values {
        map.insert(*value, String::from("foo"));
    }
    assert!(!map.is_empty());
    assert!(map.len() == values.len());

    map.clear();
    assert!(map.is_empty());
    assert!(map.len() == 0);

    for value in &values {
        assert!(map.insert(*value, String::from("bar")).is_none());
    }
    assert!(!map.is_empty());
    assert!(map.len() == values.len());
    map.check_consistency();
}

#[test]
fn test_remove() {
    use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut values: Vec<i32> = (0..N).map(|_| rng.gen()).collect();
    values.sort();
    values.dedup();

    let mut map = AvlTreeMap::new();
    for value in &values {
        map.insert(*value, 42);
    }
    assert!(map.remove(&-42).is_none() || values.contains(&-42));

    values.shuffle(&mut rng);
    for (removed, value) in values.iter().enumerate() {
        assert!(map.get(value).is_some());
        assert_eq!(map.remove(value), Some(42));
        assert!(map.get(value).is_none());
        assert!(map.remove(value).is_none());
        map.check_consistency();

        // Remaining keys stay sorted
        if removed % 97 == 0 {
            let mut remaining = values[removed + 1..].to_vec();
            remaining.sort();
            assert!(map.keys().copied().eq(remaining));
        }
    }
    assert!(map.is_empty());
    assert!(map.len() == 0);
    assert_eq!(map.height(), 0);
}

#[test]
fn test_min_max() {
    let mut map = AvlTreeMap::new();
    assert!(map.first_key_value().is_none());
    assert!(map.last_key_value().is_none());
    assert!(map.pop_first().is_none());
    assert!(map.pop_last().is_none());

    for value in [5, 3, 8, 1, 4, 7, 9] {
        map.insert(value, value * 10);
    }
    assert_eq!(map.first_key_value(), Some((&1, &10)));
    assert_eq!(map.last_key_value(), Some((&9, &90)));

    assert_eq!(map.pop_first(), Some((1, 10)));
    map.check_consistency();
    assert_eq!(map.pop_last(), Some((9, 90)));
    map.check_consistency();
    assert_eq!(map.len(), 5);

    let mut drained = Vec::new();
    while let Some((key, _)) = map.pop_first() {
        map.check_consistency();
        drained.push(key);
    }
    assert_eq!(drained, vec![3, 4, 5, 7, 8]);
    assert!(map.is_empty());
}

#[test]
fn test_traverse() {
    let values = [50, 25, 75, 10, 30, 60, 80, 5, 15, 27, 55, 65, 90];
    let mut map = AvlTreeMap::new();
    for value in values {
        map.insert(value, ());
        map.check_consistency();
    }
    assert_eq!(map.height(), 4);

    let keys = |order| -> Vec<i32> { map.traverse(order).map(|(k, _)| *k).collect() };
    assert_eq!(
        keys(Order::InOrder),
        vec![5, 10, 15, 25, 27, 30, 50, 55, 60, 65, 75, 80, 90]
    );
    assert_eq!(
        keys(Order::PreOrder),
        vec![50, 25, 10, 5, 15, 30, 27, 75, 60, 55, 65, 80, 90]
    );
    assert_eq!(
        keys(Order::PostOrder),
        vec![5, 15, 10, 27, 30, 25, 55, 65, 60, 90, 80, 75, 50]
    );

    let mut level_order = Vec::new();
    map.traverse_level_order(|k, _| level_order.push(*k));
    assert_eq!(level_order, values.to_vec());

    // Restartable
    let mut traverse = map.traverse(Order::PreOrder);
    assert_eq!(traverse.len(), values.len());
    traverse.next();
    let restarted = traverse.clone();
    assert!(traverse.eq(restarted));

    // Remove leaf, then nodes with two children
    for value in [5, 25, 50] {
        assert!(map.remove(&value).is_some());
        map.check_consistency();
    }
    let keys = |order| -> Vec<i32> { map.traverse(order).map(|(k, _)| *k).collect() };
    assert_eq!(
        keys(Order::InOrder),
        vec![10, 15, 27, 30, 55, 60, 65, 75, 80, 90]
    );
    assert_eq!(
        keys(Order::PreOrder),
        vec![55, 27, 10, 15, 30, 75, 60, 65, 80, 90]
    );
}

#[test]
fn test_leaf_count() {
    let mut map = AvlTreeMap::new();
    assert_eq!(map.leaf_count(), 0);
    map.insert(1, ());
    assert_eq!(map.leaf_count(), 1);
    map.clear();

    for value in [50, 25, 75, 10, 30, 60, 80, 5, 15, 27, 55, 65, 90] {
        map.insert(value, ());
    }
    assert_eq!(map.leaf_count(), 6);

    for value in [5, 25, 50] {
        map.remove(&value);
    }
    // 55(27(10(-, 15), 30), 75(60(-, 65), 80(-, 90)))
    assert_eq!(map.leaf_count(), 4);

    let set: AvlTreeSet<i32> = (0..7).collect();
    assert_eq!(set.leaf_count(), 4);
}

#[test]
fn test_borrowed_lookup() {
    let mut map: AvlTreeMap<String, usize> = ["apple", "banana", "cherry", "date"]
        .iter()
        .map(|s| (s.to_string(), s.len()))
        .collect();
    assert_eq!(map.get("banana"), Some(&6));
    assert_eq!(map.get_key_value("date").map(|(k, _)| k.as_str()), Some("date"));
    assert!(map.contains_key("apple"));
    assert!(!map.contains_key("fig"));
    assert_eq!(map["cherry"], 6);
    if let Some(len) = map.get_mut("apple") {
        *len = 0;
    }
    assert_eq!(map.get("apple"), Some(&0));

    let keys: Vec<_> = map.range::<str, _>((std::ops::Bound::Included("b"), std::ops::Bound::Excluded("d"))).map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["banana", "cherry"]);

    assert_eq!(map.remove("banana"), Some(6));
    assert_eq!(map.remove_entry("date"), Some((String::from("date"), 4)));
    map.check_consistency();
    assert_eq!(map.len(), 2);

    let mut set: AvlTreeSet<String> = map.keys().cloned().collect();
    assert!(set.contains("cherry"));
    assert_eq!(set.get("apple").map(String::as_str), Some("apple"));
    assert_eq!(set.take("apple"), Some(String::from("apple")));
    assert!(!set.remove("apple"));
    assert!(set.remove("cherry"));
    assert!(set.is_empty());
}

#[test]
fn test_comparator() {
    let mut map = AvlTreeMap::with_comparator(Reversed);
    for value in 0..N {
        map.insert(value, ());
        map.check_consistency();
    }
    assert_eq!(map.first_key_value(), Some((&(N - 1), &())));
    assert!(map.keys().copied().eq((0..N).rev()));

    let by_len = |lhs: &String, rhs: &String| lhs.len().cmp(&rhs.len());
    let mut map = AvlTreeMap::with_comparator(by_len);
    map.insert(String::from("ccc"), 3);
    map.insert(String::from("a"), 1);
    // Same length as "a", so it replaces the value and keeps the stored key
    assert_eq!(map.insert(String::from("b"), 2), Some(1));
    assert_eq!(map.len(), 2);
    assert_eq!(
        map.get_key_value(&String::from("z")),
        Some((&String::from("a"), &2))
    );
    map.check_consistency();
}

#[test]
fn test_range() {
    let map: AvlTreeMap<i32, i32> = (0..100).map(|k| (k * 2, k)).collect();

    let keys: Vec<_> = map.range(10..20).map(|(k, _)| *k).collect();
    assert_eq!(keys, vec![10, 12, 14, 16, 18]);

    let keys: Vec<_> = map.range(9..=20).map(|(k, _)| *k).collect();
    assert_eq!(keys, vec![10, 12, 14, 16, 18, 20]);

    let keys: Vec<_> = map.range(190..).map(|(k, _)| *k).collect();
    assert_eq!(keys, vec![190, 192, 194, 196, 198]);

    let keys: Vec<_> = map.range(..3).map(|(k, _)| *k).collect();
    assert_eq!(keys, vec![0, 2]);

    assert_eq!(map.range::<i32, _>(..).count(), 100);
    assert_eq!(map.range(11..12).count(), 0);
    assert_eq!(map.range(500..).count(), 0);
    assert_eq!(map.range(..-1).count(), 0);
}

#[test]
#[should_panic]
fn test_range_panics_on_inverted_bounds() {
    let map: AvlTreeMap<i32, ()> = (0..10).map(|k| (k, ())).collect();
    #[allow(clippy::reversed_empty_ranges)]
    let _ = map.range(5..2);
}

#[test]
fn test_map_iter() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut values: Vec<i32> = (0..N).map(|_| rng.gen()).collect();

    let mut map = AvlTreeMap::new();
    for value in &values {
        map.insert(*value, value.wrapping_add(42));
    }

    values.sort();
    values.dedup();

    let mut map_iter = map.iter();
    assert_eq!(map_iter.len(), values.len());
    for value in &values {
        let kv = map_iter.next();
        assert!(kv.is_some());
        let (&key, &mapped) = kv.unwrap();
        assert_eq!(key, *value);
        assert_eq!(mapped, value.wrapping_add(42));
    }
    assert!(map_iter.next().is_none());

    let mut value_iter = values.iter();
    for (&key, &mapped) in &map {
        let value = value_iter.next();
        assert!(value.is_some());
        let value = value.unwrap();
        assert_eq!(key, *value);
        assert_eq!(mapped, value.wrapping_add(42));
    }
    assert!(value_iter.next().is_none());

    assert!(map.keys().rev().eq(values.iter().rev()));

    // Meet in the middle
    let mut map_iter = map.iter();
    let mut seen = Vec::new();
    loop {
        match (map_iter.next(), map_iter.next_back()) {
            (Some((front, _)), Some((back, _))) => {
                seen.push(*front);
                seen.push(*back);
            }
            (Some((front, _)), None) => seen.push(*front),
            _ => break,
        }
    }
    seen.sort();
    assert_eq!(seen, values);

    let owned: Vec<_> = map.clone().into_iter().map(|(k, _)| k).collect();
    assert_eq!(owned, values);
}

#[test]
fn test_map_eq_and_append() {
    let mut lhs: AvlTreeMap<i32, i32> = (0..50).map(|k| (k, k)).collect();
    let mut rhs: AvlTreeMap<i32, i32> = (25..75).map(|k| (k, -k)).collect();
    assert_ne!(lhs, rhs);
    assert_eq!(lhs, lhs.clone());

    lhs.append(&mut rhs);
    lhs.check_consistency();
    assert!(rhs.is_empty());
    assert_eq!(lhs.len(), 75);
    assert_eq!(lhs.get(&30), Some(&-30));
    assert_eq!(format!("{:?}", rhs), "{}");
}

#[test]
fn test_set() {
    use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut values: Vec<i32> = (0..N).map(|_| rng.gen_range(0..N)).collect();

    let mut set = AvlTreeSet::new();
    for value in &values {
        set.insert(*value);
    }
    set.check_consistency();

    for value in &values {
        let got = set.get(value);
        assert_eq!(got, Some(value));
        assert!(!set.insert(*value));
    }

    values.shuffle(&mut rng);
    values.resize(values.len() / 2, 0);
    for value in &values {
        set.remove(value);
        assert!(!set.contains(value));
    }
    set.check_consistency();
}

#[test]
fn test_set_iter() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut values: Vec<i32> = (0..N).map(|_| rng.gen()).collect();

    let mut set = AvlTreeSet::new();
    for value in &values {
        set.insert(*value);
    }

    values.sort();
    values.dedup();

    let mut set_iter = set.iter();
    for value in &values {
        let value_in_set = set_iter.next();
        assert!(value_in_set.is_some());
        let &value_in_set = value_in_set.unwrap();
        assert_eq!(value_in_set, *value);
    }
    assert!(set_iter.next().is_none());

    let mut value_iter = values.iter();
    for &value_in_set in &set {
        let value = value_iter.next();
        assert!(value.is_some());
        let value = value.unwrap();
        assert_eq!(value_in_set, *value);
    }
    assert!(value_iter.next().is_none());

    assert_eq!(set.first(), values.first());
    assert_eq!(set.last(), values.last());
    assert_eq!(set.traverse(Order::PostOrder).count(), values.len());
}

#[test]
fn test_set_operations() {
    let lhs: AvlTreeSet<i32> = (0..10).collect();
    let rhs: AvlTreeSet<i32> = (5..15).collect();
    let odd: AvlTreeSet<i32> = (20..30).filter(|v| v % 2 == 1).collect();

    assert!(lhs.union(&rhs).copied().eq(0..15));
    assert!(lhs.intersection(&rhs).copied().eq(5..10));
    assert!(lhs.is_disjoint(&odd));
    assert!(!lhs.is_disjoint(&rhs));

    let mut set = lhs.clone();
    assert_eq!(set.take(&3), Some(3));
    assert_eq!(set.take(&3), None);
    assert_eq!(set.pop_first(), Some(0));
    assert_eq!(set.pop_last(), Some(9));
    assert!(set.range(4..7).copied().eq([4, 5, 6]));
    set.check_consistency();
}

#[test]
#[ignore]
fn test_large() {
    use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut values: Vec<i32> = (0..LARGE_N).map(|_| rng.gen_range(0..LARGE_N)).collect();

    let mut map = AvlTreeMap::new();
    for value in &values {
        map.insert(*value, *value);
    }
    map.check_consistency();

    values.shuffle(&mut rng);
    values.resize(values.len() / 2, 0);
    for value in &values {
        map.remove(value);
    }
    map.check_consistency();
}

mod properties {
    use std::collections::BTreeMap;

    use proptest::prelude::*;

    use crate::{AvlTreeMap, PriorityQueue};

    #[derive(Debug, Clone)]
    enum Op {
        Insert(u8, u16),
        Remove(u8),
        PopFirst,
        PopLast,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (any::<u8>(), any::<u16>()).prop_map(|(k, v)| Op::Insert(k, v)),
            3 => any::<u8>().prop_map(Op::Remove),
            1 => Just(Op::PopFirst),
            1 => Just(Op::PopLast),
        ]
    }

    proptest! {
        #[test]
        fn prop_matches_btree_map(ops in proptest::collection::vec(op_strategy(), 0..300)) {
            let mut map = AvlTreeMap::new();
            let mut model = BTreeMap::new();
            for op in ops {
                match op {
                    Op::Insert(k, v) => {
                        prop_assert_eq!(map.insert(k, v), model.insert(k, v));
                    }
                    Op::Remove(k) => {
                        prop_assert_eq!(map.remove(&k), model.remove(&k));
                    }
                    Op::PopFirst => {
                        prop_assert_eq!(map.pop_first(), model.pop_first());
                    }
                    Op::PopLast => {
                        prop_assert_eq!(map.pop_last(), model.pop_last());
                    }
                }
                map.check_consistency();
                prop_assert_eq!(map.len(), model.len());
            }
            prop_assert!(map.iter().eq(model.iter()));
        }

        #[test]
        fn prop_insert_then_remove_all_empties(keys in proptest::collection::btree_set(any::<i32>(), 0..200)) {
            let mut map = AvlTreeMap::new();
            for key in &keys {
                map.insert(*key, ());
            }
            prop_assert!(map.keys().eq(keys.iter()));
            for key in &keys {
                prop_assert!(map.remove(key).is_some());
                map.check_consistency();
            }
            prop_assert!(map.is_empty());
        }

        #[test]
        fn prop_queue_pops_in_priority_order(entries in proptest::collection::vec((0u8..16, any::<u32>()), 0..200)) {
            let mut queue = PriorityQueue::new();
            for (priority, payload) in &entries {
                queue.push(*priority, *payload);
            }
            queue.check_consistency();

            // Stable sort gives the expected FIFO order among equal priorities
            let mut expected = entries.clone();
            expected.sort_by_key(|(priority, _)| *priority);
            let popped: Vec<_> = std::iter::from_fn(|| queue.pop()).collect();
            prop_assert_eq!(popped, expected);
        }
    }
}
