//! Interactive A* visualizer in the terminal.
//!
//! Run: cargo run --bin gridwalk [-- --config gridwalk.toml]

use std::io::Write;

use gridwalk_core::app::{App, AppConfig};
use gridwalk_crossterm::CrosstermDriver;
use gridwalk_demos::{Visualizer, load_config, screen_size};

struct Args {
    config_path: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut result = Args { config_path: None };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    result.config_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    result
}

fn print_help() {
    println!("gridwalk - interactive A* pathfinding visualizer");
    println!();
    println!("USAGE:");
    println!("    gridwalk [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <FILE>     Configuration file (default: gridwalk.toml)");
    println!("    -h, --help              Print help information");
    println!();
    println!("CONTROLS:");
    println!("    Left mouse    place start, then end, then barriers");
    println!("    Right mouse   remove start, end or barrier");
    println!("    Space         run A*");
    println!("    Esc           abort a running search, otherwise quit");
    println!("    C / P / L     clear grid / print barriers / load campus layout");
    println!("    Q             quit");
}

fn main() {
    // Log output shares the terminal with the UI; keep it quiet by default.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
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

    let args = parse_args();
    let config = load_config(args.config_path.as_deref());
    let (width, height) = screen_size(config.rows);

    let mut app = App::new(AppConfig {
        model: Visualizer::new(config),
        driver: CrosstermDriver::new(),
        width,
        height,
    });

    if let Err(e) = app.run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
