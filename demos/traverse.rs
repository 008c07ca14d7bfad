use avl_dijkstra::{AvlTreeMap, Order};

fn main() {
    let mut map = AvlTreeMap::new();
    for key in [50, 25, 75, 10, 30, 60, 80, 5, 15, 27, 55, 65, 90] {
        map.insert(key, key * 10);
    }
    println!("{} nodes, height {}", map.len(), map.height());

    for order in [Order::PreOrder, Order::InOrder, Order::PostOrder] {
        let keys: Vec<_> = map.traverse(order).map(|(k, _)| k).collect();
        println!("{:?}: {:?}", order, keys);
    }

    println!("Level-order traversal:");
    map.traverse_level_order(|k, v| {
        println!("Key: {}, Value: {}", k, v);
    });

    for key in [5, 25, 50] {
        map.remove(&key);
    }
    let keys: Vec<_> = map.traverse(Order::PreOrder).map(|(k, _)| k).collect();
    println!("After removing 5, 25 and 50: {:?}", keys);
    if let (Some((min, _)), Some((max, _))) = (map.first_key_value(), map.last_key_value()) {
        println!("min {}, max {}", min, max);
    }
}
