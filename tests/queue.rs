use avl_dijkstra::{PriorityQueue, Reversed};

#[test]
fn pops_are_non_decreasing() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut queue = PriorityQueue::new();
    for i in 0..1_000u32 {
        queue.push(rng.gen_range(0..50u32), i);
    }
    assert_eq!(queue.len(), 1_000);

    let mut last: Option<(u32, u32)> = None;
    while let Some((priority, payload)) = queue.pop() {
        if let Some((last_priority, last_payload)) = last {
            assert!(priority >= last_priority);
            if priority == last_priority {
                assert!(payload > last_payload);
            }
        }
        last = Some((priority, payload));
    }
    assert!(queue.is_empty());
}

#[test]
fn same_payload_with_different_priorities() {
    let mut queue = PriorityQueue::new();
    queue.push(12, "E");
    queue.push(9, "D");
    queue.push(10, "D");
    queue.push(11, "E");

    assert_eq!(queue.pop(), Some((9, "D")));
    assert_eq!(queue.pop(), Some((10, "D")));
    assert_eq!(queue.pop(), Some((11, "E")));
    assert_eq!(queue.pop(), Some((12, "E")));
    assert_eq!(queue.pop(), None);
}

#[test]
fn interleaved_push_and_pop() {
    let mut queue = PriorityQueue::new();
    queue.push(5, 'a');
    queue.push(3, 'b');
    assert_eq!(queue.pop(), Some((3, 'b')));
    queue.push(1, 'c');
    queue.push(5, 'd');
    assert_eq!(queue.peek(), Some((&1, &'c')));
    assert_eq!(queue.pop(), Some((1, 'c')));
    assert_eq!(queue.pop(), Some((5, 'a')));
    assert_eq!(queue.pop(), Some((5, 'd')));
    assert!(queue.pop().is_none());

    // Push order keeps counting after the queue drains
    queue.push(0, 'x');
    queue.push(0, 'y');
    assert_eq!(format!("{:?}", queue), "[(0, 'x'), (0, 'y')]");
    queue.clear();
    assert_eq!(queue.len(), 0);
}

#[test]
fn max_queue() {
    let mut queue = PriorityQueue::with_comparator(Reversed);
    for (priority, payload) in [(1, "low"), (9, "high"), (5, "mid"), (9, "high2")] {
        queue.push(priority, payload);
    }
    let order: Vec<_> = queue.iter().map(|(_, payload)| *payload).collect();
    assert_eq!(order, vec!["high", "high2", "mid", "low"]);
    assert_eq!(queue.iter().len(), 4);
}
