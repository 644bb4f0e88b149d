//! # Maze Preview
//!
//! Command-line tool that carves one maze and prints it.
//!
//! Usage: `maze_preview [config.toml] [--seed N] [--topology NAME] [--chunk X Z]`

use labyrinth_procedural::{ChunkCoord, GeneratorKind, MazeChunkGenerator, MazeConfig};
use labyrinth_topology::Topology;

fn main() {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         LABYRINTH MAZE PREVIEW                                   ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("Usage: maze_preview [config.toml] [options]");
        println!();
        println!("Options:");
        println!("  --seed <n>          Override the world seed");
        println!("  --topology <name>   rectangle, outdoor, cylinder, torus or mobius");
        println!("  --chunk <x> <z>     Chunk coordinate to carve (default 0 0)");
        return;
    }

    let flag = |name: &str, offset: usize| {
        args.iter()
            .position(|a| a == name)
            .and_then(|i| args.get(i + offset))
    };

    let mut config = match args.first().filter(|a| !a.starts_with("--")) {
        Some(path) => {
            println!("Loading config: {path}");
            match MazeConfig::load(path) {
                Ok(config) => config,
                Err(e) => {
                    println!("Error: {e}");
                    return;
                }
            }
        }
        None => MazeConfig::default(),
    };

    if let Some(seed) = flag("--seed", 1) {
        match seed.parse() {
            Ok(seed) => config.seed = seed,
            Err(e) => {
                println!("Error: invalid seed {seed}: {e}");
                return;
            }
        }
    }
    if let Some(name) = flag("--topology", 1) {
        match name.parse::<Topology>() {
            Ok(topology) => config.topology = topology,
            Err(e) => {
                println!("Error: {e}");
                return;
            }
        }
    }
    let coord = match (flag("--chunk", 1), flag("--chunk", 2)) {
        (Some(x), Some(z)) => match (x.parse(), z.parse()) {
            (Ok(x), Ok(z)) => ChunkCoord::new(x, z),
            _ => {
                println!("Error: invalid chunk coordinate {x} {z}");
                return;
            }
        },
        _ => ChunkCoord::default(),
    };

    let generator = match MazeChunkGenerator::new(config) {
        Ok(generator) => generator,
        Err(e) => {
            println!("Error: {e}");
            return;
        }
    };
    let config = generator.config();

    println!("┌─ MAZE ─────────────────────────────────────────────────────────┐");
    println!("│ Generator:   {}", generator.name());
    println!("│ Seed:        {:#018x}", config.seed);
    println!("│ Chunk:       ({}, {})", coord.x, coord.z);

    match config.generator {
        GeneratorKind::Topology => {
            let graph = generator.graph();
            let maze = generator.carve_for(coord);
            let layout = generator.layout_for(coord);
            println!("│ Topology:    {} {}x{}", graph.topology(), graph.size_x(), graph.size_z());
            println!("│ Vertices:    {} ({} filled)", graph.vertex_count(), maze.filled_count());
            println!("│ Edges:       {} ({} opened)", graph.edge_count(), maze.passages().len());
            println!("│ Entrances:   {}", maze.entrances().count());
            println!("│ Stale:       {}", maze.stale_discards());
            println!("│ Raster:      {}x{} ({} open)", layout.width(), layout.depth(), layout.open_count());
            println!("└──────────────────────────────────────────────────────────────────┘");
            println!();
            print!("{}", layout.render_ascii());
        }
        GeneratorKind::FlatGrid => {
            let maze = generator.flat_for(coord);
            let grid = maze.grid();
            println!("│ Grid:        {}x{}", grid.width(), grid.height());
            println!("│ Visited:     {}", maze.visited_count());
            println!("│ Start:       {:?}", maze.visited_cells().next());
            println!("└──────────────────────────────────────────────────────────────────┘");
            println!();
            for row in 0..grid.height() {
                let line: String = (0..grid.width())
                    .map(|col| if maze.is_visited(grid.id(row, col)) { ' ' } else { '#' })
                    .collect();
                println!("{line}");
            }
        }
    }
}
