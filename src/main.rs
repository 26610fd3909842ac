use std::ffi::OsString;
use std::io;
use std::num::NonZeroU32;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use turmite::palette::Palette;
use turmite::preview::Preview;
use turmite::render;
use turmite::rules::RuleTable;
use turmite::simulation::DEFAULT_STEPS;
use turmite::simulation::Simulation;
use turmite::simulation::SimulationConfig;

/// Run a turmite on a toroidal grid and draw the result as a PNG.
#[derive(Parser, Debug)]
#[command(name = "turmite", version)]
struct Cli {
    /// File containing the turmite program
    #[arg(long)]
    prog: PathBuf,

    /// Size of the field
    #[arg(short = 's', long = "size", default_value = "101")]
    size: NonZeroUsize,

    /// Number of steps
    #[arg(long, default_value_t = DEFAULT_STEPS)]
    steps: u64,

    /// Filename to draw output
    #[arg(short = 'o', long = "output", default_value = "output.png")]
    output: PathBuf,

    /// Side length of each cell in the image, in pixels
    #[arg(long, default_value = "5")]
    scale: NonZeroU32,

    /// Also print the final field to the terminal
    #[arg(long)]
    preview: bool,
}

impl Cli {
    fn config(&self) -> SimulationConfig {
        SimulationConfig {
            size: self.size.get(),
            steps: self.steps,
        }
    }
}

/// Single-dash long flags accepted for compatibility with older invocations.
const LEGACY_FLAGS: [&str; 2] = ["prog", "steps"];

/// Rewrite `-prog` and `-steps` (and their `-flag=value` forms) to `--prog` and `--steps`.
fn normalize_legacy_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let Some(s) = arg.to_str() else { return arg };
            let Some(flag) = s.strip_prefix('-').filter(|f| !f.starts_with('-')) else {
                return arg;
            };

            let name = flag.split_once('=').map_or(flag, |(name, _)| name);
            if LEGACY_FLAGS.contains(&name) {
                OsString::from(format!("-{s}"))
            } else {
                arg
            }
        })
        .collect()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse_from(normalize_legacy_flags(std::env::args_os()));
    let config = cli.config();

    let rules = RuleTable::read(&cli.prog)
        .with_context(|| format!("Failed to load turmite program {}", cli.prog.display()))?;

    let palette = Palette::default();
    palette.check(&rules)?;

    let mut sim = Simulation::new(rules, config.size);
    let res = sim.run(config.steps);

    println!("{}", sim.status());
    res?;

    info!(steps = sim.steps(), "Simulation complete");

    if cli.preview {
        Preview::of(sim.grid()).print(&mut io::stdout(), &palette)?;
    }

    render::save_png(sim.grid(), &palette, cli.scale.get(), &cli.output)
        .with_context(|| format!("Failed to draw {}", cli.output.display()))?;

    Ok(())
}

#[cfg(test)]
mod test {
    use std::ffi::OsString;

    use clap::Parser;

    use super::Cli;
    use super::normalize_legacy_flags;

    fn args(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn legacy_flags() {
        let got = normalize_legacy_flags(args(&[
            "turmite", "-prog", "ant.tm", "-steps=10", "-s", "7", "--prog", "-o", "x.png",
        ]));

        assert_eq!(
            got,
            args(&[
                "turmite", "--prog", "ant.tm", "--steps=10", "-s", "7", "--prog", "-o", "x.png",
            ])
        );
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(normalize_legacy_flags(args(&["turmite", "-prog", "a.tm"])))
            .unwrap();
        let config = cli.config();

        assert_eq!(config.size, 101);
        assert_eq!(config.steps, 6220);
        assert_eq!(cli.scale.get(), 5);
        assert_eq!(cli.output.to_str(), Some("output.png"));
        assert!(!cli.preview);
    }

    #[test]
    fn prog_is_required() {
        assert!(Cli::try_parse_from(args(&["turmite", "-s", "11"])).is_err());
    }

    #[test]
    fn size_must_be_positive() {
        assert!(Cli::try_parse_from(args(&["turmite", "--prog", "a", "-s", "0"])).is_err());
    }
}
