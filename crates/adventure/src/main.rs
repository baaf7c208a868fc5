//! Adventure map generator
//!
//! Main entry point: generate a map, walk it, or check a snapshot.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use adv_core::catalog::LocationCatalog;
use adv_core::enrich::TemplateEnricher;
use adv_core::explore::{Command as PlayCommand, Explorer, Outcome};
use adv_core::repair::is_connected;
use adv_core::{
    DEFAULT_ROOM_CAP, DEFAULT_ROOMS, DEFAULT_THEME, DEFAULT_TITLE, GenerationConfig, RepairOptions,
    RepairReport, validate_and_fix,
};
use adv_save::{default_output_path, load_adventure, read_adventure, save_adventure};

/// Procedural text-adventure maps
#[derive(Parser, Debug)]
#[command(name = "adventure")]
#[command(author, version, about = "Generate and explore room maps", long_about = None)]
struct Args {
    /// Verbose output
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a new adventure and write it as JSON
    Generate(GenerateArgs),
    /// Walk an adventure interactively
    Play {
        /// Snapshot to load
        path: PathBuf,
    },
    /// Validate a snapshot and report what repair would change
    Check {
        /// Snapshot to inspect
        path: PathBuf,

        /// Room cap applied by the repair pass
        #[arg(long = "cap", default_value_t = DEFAULT_ROOM_CAP)]
        cap: usize,
    },
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    /// Adventure title
    #[arg(short = 't', long = "title", default_value = DEFAULT_TITLE)]
    title: String,

    /// Number of rooms to generate (6-40)
    #[arg(short = 'n', long = "rooms", default_value_t = DEFAULT_ROOMS)]
    rooms: usize,

    /// Fixed seed; random when omitted
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Theme used for room text
    #[arg(long = "theme", default_value = DEFAULT_THEME)]
    theme: String,

    /// Maximum rooms kept after repair
    #[arg(long = "cap", default_value_t = DEFAULT_ROOM_CAP)]
    cap: usize,

    /// Reconnect rooms stranded by the cap
    #[arg(long = "reconnect-after-cap")]
    reconnect_after_cap: bool,

    /// Location catalog (JSON) for room types
    #[arg(short = 'c', long = "catalog")]
    catalog: Option<PathBuf>,

    /// World lore passed to the room writer
    #[arg(long = "lore")]
    lore: Option<String>,

    /// Style guide line for the room writer (repeatable)
    #[arg(long = "style")]
    style: Vec<String>,

    /// Output path
    #[arg(short = 'o', long = "out")]
    out: Option<PathBuf>,
}

impl GenerateArgs {
    fn config(&self) -> GenerationConfig {
        GenerationConfig {
            title: self.title.clone(),
            rooms: self.rooms,
            seed: self.seed,
            theme: self.theme.clone(),
            cap: self.cap,
            reconnect_after_cap: self.reconnect_after_cap,
            lore: self.lore.clone(),
            style_guide: (!self.style.is_empty()).then(|| self.style.clone()),
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "adventure=debug,adv_core=debug,adv_save=debug"
    } else {
        "adventure=info,adv_core=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Generate(generate) => run_generate(&generate),
        Commands::Play { path } => run_play(&path),
        Commands::Check { path, cap } => run_check(&path, cap),
    }
}

fn load_catalog(path: &Path) -> Result<LocationCatalog> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading catalog {}", path.display()))?;
    let catalog = LocationCatalog::from_json(&json)
        .with_context(|| format!("parsing catalog {}", path.display()))?;
    Ok(catalog)
}

fn run_generate(args: &GenerateArgs) -> Result<()> {
    let config = args.config();
    tracing::debug!(?config, "generation config");
    let catalog = args.catalog.as_deref().map(load_catalog).transpose()?;

    let generated = adv_core::generate_adventure(&config, catalog.as_ref(), &mut TemplateEnricher)
        .context("generating adventure")?;

    let out = args.out.clone().unwrap_or_else(default_output_path);
    save_adventure(&generated.adventure, &out)
        .with_context(|| format!("writing {}", out.display()))?;

    let adv = &generated.adventure;
    println!(
        "Wrote {} ({} rooms, {} exits, seed {})",
        out.display(),
        adv.rooms.len(),
        adv.exit_count(),
        adv.seed
    );
    if !is_connected(adv) {
        println!("warning: the room cap left parts of the map unreachable");
    }
    Ok(())
}

fn run_check(path: &Path, cap: usize) -> Result<()> {
    let options = RepairOptions::with_cap(cap);
    options.validate().context("invalid --cap")?;
    let mut adv = read_adventure(path).with_context(|| format!("reading {}", path.display()))?;

    match adv.validate() {
        Ok(()) => println!("{}: valid document", path.display()),
        Err(e) => println!("{}: {e}", path.display()),
    }

    let report = validate_and_fix(&mut adv, &options);
    print_report(&report);
    Ok(())
}

fn print_report(report: &RepairReport) {
    if report.is_clean() {
        println!("repair: nothing to fix");
        return;
    }
    let rows = [
        ("directions normalized", report.directions_normalized),
        ("invalid exits dropped", report.invalid_exits_dropped),
        ("reverse exits added", report.reverse_exits_added),
        ("corridors added", report.corridors_added),
        ("rooms capped", report.rooms_capped),
        ("exits dropped by cap", report.exits_dropped_by_cap),
        ("corridors added after cap", report.corridors_added_after_cap),
    ];
    for (label, count) in rows.iter().filter(|(_, n)| *n > 0) {
        println!("repair: {label}: {count}");
    }
    if report.start_moved {
        println!("repair: start room moved");
    }
    if report.disconnected_after_cap {
        println!("repair: map disconnected after cap");
    }
}

fn run_play(path: &Path) -> Result<()> {
    let adv = load_adventure(path).with_context(|| format!("loading {}", path.display()))?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    play(&adv, stdin.lock(), stdout.lock())
}

fn describe(explorer: &Explorer<'_>, out: &mut impl Write) -> io::Result<()> {
    if let Some(room) = explorer.current_room() {
        writeln!(out, "\n== {} ({}) ==", room.name, room.id)?;
        writeln!(out, "{}", room.description)?;
    }
    writeln!(out, "Exits: {}", explorer.exits_line())
}

/// Read commands line by line until `quit` or end of input
fn play(adv: &adv_core::Adventure, input: impl BufRead, mut out: impl Write) -> Result<()> {
    let Some(mut explorer) = Explorer::new(adv) else {
        bail!("start room {} does not exist", adv.start_room);
    };

    writeln!(out, "{}", adv.title)?;
    describe(&explorer, &mut out)?;

    for line in input.lines() {
        let line = line?;
        match explorer.apply(&PlayCommand::parse(&line)) {
            Outcome::Quit => break,
            Outcome::Moved { .. } | Outcome::Describe => describe(&explorer, &mut out)?,
            Outcome::Blocked => writeln!(out, "You can't go that way.")?,
            Outcome::Location(id) => writeln!(out, "You are in {id}.")?,
            Outcome::ListExits(dirs) if dirs.is_empty() => writeln!(out, "Exits: no exits")?,
            Outcome::ListExits(dirs) => writeln!(out, "Exits: {}", dirs.join(", "))?,
            Outcome::Nothing => {}
        }
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use adv_core::{Adventure, Exit, Room};
    use std::io::Cursor;

    fn adventure() -> Adventure {
        let mut hall = Room::new("A", "Hall", "A long hall.");
        hall.exits.push(Exit::new("n", "B"));
        let mut vault = Room::new("B", "Vault", "Cold.");
        vault.exits.push(Exit::new("s", "A"));
        Adventure::new("Test Run", 1, vec![hall, vault], "A")
    }

    fn session(input: &str) -> String {
        let mut out = Vec::new();
        play(&adventure(), Cursor::new(input), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_play_moves_and_quits() {
        let text = session("north\nwhere\nquit\nn\n");
        assert!(text.starts_with("Test Run\n"));
        assert!(text.contains("== Vault (B) =="));
        assert!(text.contains("You are in B."));
        assert_eq!(text.matches("== Vault (B) ==").count(), 1);
    }

    #[test]
    fn test_play_blocked_and_exits() {
        let text = session("w\nexits\n");
        assert!(text.contains("You can't go that way."));
        assert!(text.contains("Exits: n\n"));
    }

    #[test]
    fn test_generate_args_to_config() {
        let args = Args::parse_from([
            "adventure", "generate", "--rooms", "12", "--seed", "7", "--style", "terse", "--style",
            "grim",
        ]);
        let Commands::Generate(generate) = args.command else {
            panic!("expected generate");
        };
        let config = generate.config();
        assert_eq!(config.rooms, 12);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.title, DEFAULT_TITLE);
        assert_eq!(config.cap, DEFAULT_ROOM_CAP);
        assert_eq!(config.style_guide, Some(vec!["terse".to_string(), "grim".to_string()]));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_check_rejects_zero_cap() {
        let err = run_check(Path::new("does-not-matter.json"), 0).unwrap_err();
        assert!(err.to_string().contains("--cap"));
    }

    #[test]
    fn test_verbose_is_global() {
        let args = Args::parse_from(["adventure", "check", "x.json", "-v"]);
        assert!(args.verbose);
    }
}
