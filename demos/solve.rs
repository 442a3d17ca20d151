//! Headless A* solver: builds a grid, runs the search, prints the result.
//!
//! Run: cargo run --bin gridwalk-solve -- --start 12,6 --end 12,37

use std::io::Write;

use gridwalk_core::Pos;
use gridwalk_demos::{load_config, prepare_grid};
use gridwalk_search::{SearchOutcome, StepControl, run_search};

struct Args {
    config_path: Option<String>,
    start: Option<Pos>,
    end: Option<Pos>,
    max_steps: Option<usize>,
    show_barriers: bool,
}

fn parse_pos(s: &str) -> Result<Pos, String> {
    let (r, c) = s
        .split_once(',')
        .ok_or_else(|| format!("Invalid position: {s} (expected ROW,COL)"))?;
    let row = r
        .trim()
        .parse()
        .map_err(|_| format!("Invalid row in position: {s}"))?;
    let col = c
        .trim()
        .parse()
        .map_err(|_| format!("Invalid column in position: {s}"))?;
    Ok(Pos::new(row, col))
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut result = Args {
        config_path: None,
        start: None,
        end: None,
        max_steps: None,
        show_barriers: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --config".to_string());
                }
                result.config_path = Some(args[i].clone());
            }
            "--start" | "-s" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --start".to_string());
                }
                result.start = Some(parse_pos(&args[i])?);
            }
            "--end" | "-e" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --end".to_string());
                }
                result.end = Some(parse_pos(&args[i])?);
            }
            "--max-steps" | "-m" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --max-steps".to_string());
                }
                result.max_steps = Some(
                    args[i]
                        .parse()
                        .map_err(|_| format!("Invalid step count: {}", args[i]))?,
                );
            }
            "--barriers" | "-b" => result.show_barriers = true,
            "--help" | "-h" => {
                return Err("Help requested".to_string());
            }
            _ => {
                return Err(format!("Unknown argument: {}", args[i]));
            }
        }
        i += 1;
    }

    Ok(result)
}

fn print_usage(program: &str) {
    eprintln!("Usage: {program} [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <FILE>    Configuration file (default: gridwalk.toml)");
    eprintln!("  -s, --start <ROW,COL>  Start cell (overrides the config preset)");
    eprintln!("  -e, --end <ROW,COL>    End cell (overrides the config preset)");
    eprintln!("  -m, --max-steps <N>    Abort after N search steps");
    eprintln!("  -b, --barriers         Print the barrier coordinates");
    eprintln!("  -h, --help             Show this help");
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(args.config_path.as_deref());
    let mut grid = prepare_grid(&config);

    for (name, p) in [("start", args.start), ("end", args.end)] {
        if let Some(p) = p {
            if !grid.contains(p) {
                return Err(format!("{name} {p} is outside the {0}x{0} grid", grid.size()).into());
            }
        }
    }
    if let Some(p) = args.start {
        grid.mark_start(p);
    }
    if let Some(p) = args.end {
        grid.mark_end(p);
    }
    grid.recompute_all_neighbors();

    let mut steps = 0usize;
    let (start, end) = (grid.start(), grid.end());
    let outcome = run_search(&mut grid, start, end, |_| {
        steps += 1;
        match args.max_steps {
            Some(max) if steps >= max => StepControl::Abort,
            _ => StepControl::Continue,
        }
    })?;

    print!("{grid}");
    println!();
    match &outcome {
        SearchOutcome::Found(path) => {
            println!("Path found: {} moves ({steps} steps)", path.cost());
            let cells: Vec<String> = path.cells().iter().map(Pos::to_string).collect();
            println!("{}", cells.join(" -> "));
        }
        SearchOutcome::NotFound => println!("No path ({steps} steps)"),
        SearchOutcome::Aborted => println!("Aborted after {steps} steps"),
    }

    if args.show_barriers {
        println!();
        println!("Coordinates of barriers:");
        for p in grid.barrier_coordinates() {
            println!("{p}");
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map_or("gridwalk-solve", String::as_str);
    let parsed = match parse_args(&args) {
        Ok(a) => a,
        Err(e) if e == "Help requested" => {
            print_usage(program);
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            print_usage(program);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(parsed) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
