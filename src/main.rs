#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::time::Instant;

use anyhow::{Context, bail};
use sparse_life::sparselife::parse_seed;
use sparse_life::{Pattern, Rect, SparseLife, SparseLifeConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_STEPS: u64 = 4;
const USAGE: &str =
    "usage: sparse-life [--pattern NAME | --random x0..x1,y0..y1] [--steps N] [--seed N] [--print]";

enum Setup {
    Pattern(&'static Pattern),
    Random(Rect),
}

struct MainArgs {
    config: SparseLifeConfig,
    setup: Setup,
    steps: u64,
    print: bool,
}

fn parse_args() -> anyhow::Result<MainArgs> {
    let args: Vec<String> = std::env::args().collect();
    let mut config = SparseLifeConfig::default();
    let mut setup = Setup::Pattern(Pattern::find("glider")?);
    let mut steps = DEFAULT_STEPS;
    let mut print = false;
    let next_arg = |i: usize, flag: &str| -> anyhow::Result<&str> {
        args.get(i)
            .map(String::as_str)
            .with_context(|| format!("{flag} requires a value\n{USAGE}"))
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--pattern" => {
                i += 1;
                setup = Setup::Pattern(Pattern::find(next_arg(i, "--pattern")?)?);
            }
            "--random" => {
                i += 1;
                setup = Setup::Random(next_arg(i, "--random")?.parse()?);
            }
            "--steps" => {
                i += 1;
                let value = next_arg(i, "--steps")?;
                steps = value
                    .parse()
                    .with_context(|| format!("--steps requires a non-negative integer, got `{value}`"))?;
            }
            "--seed" => {
                i += 1;
                if let Some(seed) = parse_seed(next_arg(i, "--seed")?)? {
                    config = config.seed(seed);
                }
            }
            "--print" => {
                print = true;
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => bail!("unknown argument: {other}\n{USAGE}"),
        }
        i += 1;
    }
    Ok(MainArgs {
        config,
        setup,
        steps,
        print,
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: MainArgs) {
    let mut engine = SparseLife::with_config(args.config);
    match args.setup {
        Setup::Pattern(pattern) => {
            info!(pattern = pattern.name, cells = pattern.population(), "stamping pattern");
            engine.stamp(pattern, 0, 0);
        }
        Setup::Random(rect) => {
            info!(%rect, area = rect.area(), "randomizing region");
            engine.randomize(rect);
        }
    }

    if args.print {
        println!("Generation {}:\n{engine}\n", engine.generation());
    }

    let start = Instant::now();
    engine.step_n(args.steps);
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    let avg_ms = if args.steps > 0 {
        elapsed_ms / args.steps as f64
    } else {
        0.0
    };

    let (min_x, max_x, min_y, max_y) = engine.occupied_bounds().as_tuple();
    println!(
        "Generation {}: population = {}, bounds = x {min_x}..={max_x}, y {min_y}..={max_y}",
        engine.generation(),
        engine.population(),
    );
    println!("  {elapsed_ms:.3} ms total, {avg_ms:.6} ms/gen");

    if args.print {
        println!("{engine}");
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = parse_args()?;
    run(args);
    Ok(())
}
