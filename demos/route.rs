use avl_dijkstra::{DijkstraSolver, Error, Graph};

fn main() -> Result<(), Error<&'static str>> {
    let mut graph = Graph::new();
    graph.add_edge("Tatooine", "Naboo", 4u32);
    graph.add_edge("Tatooine", "Coruscant", 2);
    graph.add_edge("Naboo", "Coruscant", 1);
    graph.add_edge("Naboo", "Kamino", 5);
    graph.add_edge("Coruscant", "Kamino", 8);
    graph.add_edge("Coruscant", "Kashyyyk", 10);
    graph.add_edge("Kamino", "Kashyyyk", 2);
    graph.add_edge("Kamino", "Endor", 6);
    graph.add_edge("Kashyyyk", "Endor", 3);

    let solver = DijkstraSolver::new(&graph);
    let paths = solver.shortest_paths(&"Tatooine")?;

    println!("Distances from {}:", paths.source());
    for (planet, distance) in paths.distances() {
        println!("  {planet}: {distance}");
    }

    let target = "Endor";
    match paths.path_to(&target)? {
        Some(path) => println!(
            "Route to {target}: {} (distance {})",
            path.vertices().join(" -> "),
            path.distance()
        ),
        None => println!("No route to {target}"),
    }

    let stats = paths.stats();
    println!(
        "{} pushes, {} pops, {} stale",
        stats.pushes, stats.pops, stats.stale_pops
    );

    if let Err(err) = solver.build_path(&"Tatooine", &"Hoth") {
        println!("{err}");
    }
    Ok(())
}
