//! Purpose: `csgsi` CLI entry point and command dispatch.
//! Role: Binary crate root; parses args, runs commands, prints snapshots on
//! stdout and diagnostics on stderr.
//! Invariants: Process exit code is derived from `core::to_exit_code`.
//! Invariants: Snapshot output goes to stdout; verification and decode
//! notes go to stderr so pipelines stay clean.

use clap::{Args, Parser, Subcommand};
use csgsi::config::GsiConfig;
use csgsi::core::{Error, ErrorKind, Validate, decode_snapshot, to_exit_code};
use csgsi::endpoint::GsiServer;
use tracing_subscriber::EnvFilter;
use url::Url;

fn main() {
    let exit_code = match run() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("csgsi: {err}");
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<(), Error> {
    let cli = Cli::parse();
    init_tracing();
    match cli.command {
        Command::Log(args) => run_log(args),
        Command::Config(args) => run_config(args),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Parser)]
#[command(
    name = "csgsi",
    version,
    about = "Counter-Strike Game State Integration endpoint and tooling",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Listen for snapshots and log each decoded state")]
    Log(LogArgs),
    #[command(about = "Generate the game-side registration config file")]
    Config(ConfigArgs),
}

#[derive(Args)]
struct LogArgs {
    /// Path component of the endpoint address, e.g. /gsi
    path: String,
    /// Port on which the endpoint listens
    port: u16,
    /// Format output as JSON instead of the debug form
    #[arg(long)]
    json: bool,
    /// Validate each snapshot and print diagnostics to stderr
    #[arg(long)]
    verify: bool,
}

#[derive(Args)]
struct ConfigArgs {
    /// Unique name to identify the service
    name: String,
    /// Address of the endpoint including port and path
    uri: String,

    #[arg(long, default_value_t = 1.1, help_heading = "Rate and resolution")]
    timeout: f64,
    #[arg(long, default_value_t = 0.1, help_heading = "Rate and resolution")]
    buffer: f64,
    #[arg(long, default_value_t = 0.1, help_heading = "Rate and resolution")]
    throttle: f64,
    #[arg(long, default_value_t = 20.0, help_heading = "Rate and resolution")]
    heartbeat: f64,
    #[arg(long, default_value_t = 0.01, help_heading = "Rate and resolution")]
    precision_time: f64,
    #[arg(long, default_value_t = 0.1, help_heading = "Rate and resolution")]
    precision_position: f64,
    #[arg(long, default_value_t = 0.1, help_heading = "Rate and resolution")]
    precision_vector: f64,

    #[command(flatten)]
    components: ComponentFlags,

    /// Subscribe to every component at once
    #[arg(long)]
    subscribe_to_all: bool,
}

#[derive(Args)]
#[command(next_help_heading = "Game state components to subscribe to")]
struct ComponentFlags {
    #[arg(long)]
    provider: bool,
    #[arg(long)]
    player_id: bool,
    #[arg(long)]
    player_state: bool,
    #[arg(long)]
    map: bool,
    #[arg(long)]
    map_round_wins: bool,
    #[arg(long)]
    player_match_stats: bool,
    #[arg(long)]
    player_weapons: bool,
    #[arg(long)]
    round: bool,
    // Observer-only components below.
    #[arg(long)]
    player_position: bool,
    #[arg(long)]
    allgrenades: bool,
    #[arg(long)]
    allplayers_id: bool,
    #[arg(long)]
    allplayers_state: bool,
    #[arg(long)]
    allplayers_match_stats: bool,
    #[arg(long)]
    allplayers_weapons: bool,
    #[arg(long)]
    allplayers_position: bool,
    #[arg(long)]
    bomb: bool,
    #[arg(long)]
    phase_countdowns: bool,
}

fn run_log(args: LogArgs) -> Result<(), Error> {
    let server = GsiServer::spawn(&args.path, args.port)?;
    eprintln!("csgsi: listening on http://{}{}", server.local_addr(), normalized_path(&args.path));

    loop {
        // Block for a fresh snapshot; reset so a state is never logged twice.
        let Some(document) = server.read(true, true) else {
            continue;
        };
        let snapshot = match decode_snapshot(&document) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                // A malformed root fails only this snapshot.
                eprintln!("csgsi: {err}");
                continue;
            }
        };
        if args.verify {
            for note in &snapshot.notes {
                eprintln!("note: {note}");
            }
            for diag in snapshot.state.validate() {
                eprintln!("invalid: {diag}");
            }
        }
        if args.json {
            match serde_json::to_string(&snapshot.state) {
                Ok(line) => println!("{line}"),
                Err(err) => {
                    return Err(Error::new(ErrorKind::Internal)
                        .with_message("failed to serialize snapshot")
                        .with_source(err));
                }
            }
        } else {
            println!("{:#?}", snapshot.state);
        }
    }
}

fn normalized_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

fn run_config(args: ConfigArgs) -> Result<(), Error> {
    Url::parse(&args.uri).map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message(format!("'{}' is not a valid endpoint uri", args.uri))
            .with_source(err)
    })?;

    let mut config = GsiConfig::new(args.name, args.uri);
    config.timeout = args.timeout;
    config.buffer = args.buffer;
    config.throttle = args.throttle;
    config.heartbeat = args.heartbeat;
    config.precision_time = args.precision_time;
    config.precision_position = args.precision_position;
    config.precision_vector = args.precision_vector;

    let flags = &args.components;
    config.subscribe_to_all(false);
    config.provider = flags.provider;
    config.player_id = flags.player_id;
    config.player_state = flags.player_state;
    config.map = flags.map;
    config.map_round_wins = flags.map_round_wins;
    config.player_match_stats = flags.player_match_stats;
    config.player_weapons = flags.player_weapons;
    config.round = flags.round;
    config.player_position = flags.player_position;
    config.allgrenades = flags.allgrenades;
    config.allplayers_id = flags.allplayers_id;
    config.allplayers_state = flags.allplayers_state;
    config.allplayers_match_stats = flags.allplayers_match_stats;
    config.allplayers_weapons = flags.allplayers_weapons;
    config.allplayers_position = flags.allplayers_position;
    config.bomb = flags.bomb;
    config.phase_countdowns = flags.phase_countdowns;
    if args.subscribe_to_all {
        config.subscribe_to_all(true);
    }

    print!("{}", config.render());
    println!();
    println!("// To register this service with the game, place the configuration");
    println!("// above as \"{}\" into the", config.file_name());
    println!("// game's configuration directory.");
    Ok(())
}
