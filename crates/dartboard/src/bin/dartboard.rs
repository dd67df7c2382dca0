//! dartboard CLI: calibrate cameras, score impacts, replay games.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use dartboard::calib::{
    BoundaryLabel, Calibration, CalibrationBuilder, CalibrationStore, Circle, LabeledPoint,
    ReferenceLayout,
};
use dartboard::game::{Game, GameConfig, GameState, ThrowOutcome};
use dartboard::{Point2, ScoreResult};
use log::{info, LevelFilter};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "dartboard")]
#[command(about = "Calibrate dartboard cameras, score impacts and replay 501 games")]
#[command(version)]
struct Cli {
    /// Log verbosity (logs go to stderr); defaults to `DARTBOARD_LOG`, then warn.
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevelArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calibrate a camera and store the result.
    #[command(subcommand)]
    Calibrate(CalibrateCommand),

    /// Score one impact point with a stored calibration; prints JSON.
    #[command(allow_negative_numbers = true)]
    Classify {
        /// Calibration store (JSON).
        #[arg(long)]
        store: PathBuf,
        /// Camera id in the store.
        #[arg(long)]
        camera: String,
        /// Impact x (pixels).
        x: f64,
        /// Impact y (pixels).
        y: f64,
    },

    /// Replay a sequence of throws (darts notation such as T20, D16, 7, SB,
    /// DB, MISS, or `undo`).
    Play(PlayArgs),
}

#[derive(Subcommand)]
enum CalibrateCommand {
    /// From a detected board circle plus a rotation trim.
    Circle {
        #[command(flatten)]
        target: StoreTarget,
        #[arg(long, allow_negative_numbers = true)]
        cx: f64,
        #[arg(long, allow_negative_numbers = true)]
        cy: f64,
        #[arg(long)]
        radius: f64,
        /// Rotation offset in degrees.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        rotation: f64,
    },

    /// From four clicked wedge boundaries on the board's outer edge.
    Points {
        #[command(flatten)]
        target: StoreTarget,
        /// Clicked point as `X,Y`; repeat four times, in label order.
        #[arg(
            long = "point",
            value_parser = parse_point,
            required = true,
            allow_negative_numbers = true
        )]
        points: Vec<Point2<f64>>,
        /// Boundary label per point, e.g. `20/1`; defaults to 20/1 13/6 11/14 3/17.
        #[arg(long = "label")]
        labels: Vec<BoundaryLabel>,
        /// Boundary that fixes the rotation offset.
        #[arg(long, default_value = "20/1")]
        reference: BoundaryLabel,
        /// Also fit a perspective correction through the four points.
        #[arg(long)]
        rectify: bool,
    },
}

#[derive(Debug, Clone, Args)]
struct StoreTarget {
    /// Calibration store (JSON); created if missing.
    #[arg(long)]
    store: PathBuf,
    /// Camera id to write.
    #[arg(long)]
    camera: String,
}

#[derive(Debug, Clone, Args)]
struct PlayArgs {
    /// Game config (JSON); flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    starting_score: Option<i32>,
    #[arg(long)]
    players: Option<u32>,
    /// Throws in order.
    throws: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Off => LevelFilter::Off,
            LogLevelArg::Error => LevelFilter::Error,
            LogLevelArg::Warn => LevelFilter::Warn,
            LogLevelArg::Info => LevelFilter::Info,
            LogLevelArg::Debug => LevelFilter::Debug,
            LogLevelArg::Trace => LevelFilter::Trace,
        }
    }
}

fn parse_point(s: &str) -> Result<Point2<f64>, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|_| format!("bad x in '{s}'"))?;
    let y: f64 = y.trim().parse().map_err(|_| format!("bad y in '{s}'"))?;
    Ok(Point2::new(x, y))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    init_logging(cli.log_level.map(LevelFilter::from))?;

    match cli.command {
        Commands::Calibrate(cmd) => run_calibrate(cmd),
        Commands::Classify {
            store,
            camera,
            x,
            y,
        } => run_classify(&store, &camera, Point2::new(x, y)),
        Commands::Play(args) => run_play(&args),
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(level: Option<LevelFilter>) -> CliResult<()> {
    match level {
        Some(level) => dartboard::core::init_with_level(level)?,
        None => dartboard::core::init_from_env(LevelFilter::Warn)?,
    }
    Ok(())
}

#[cfg(feature = "tracing")]
fn init_logging(level: Option<LevelFilter>) -> CliResult<()> {
    let level = level.unwrap_or_else(|| dartboard::core::level_from_env(LevelFilter::Warn));
    let _ = tracing_log::LogTracer::init_with_filter(level);
    dartboard::core::init_tracing(false);
    Ok(())
}

// ── calibrate ─────────────────────────────────────────────────────────

fn run_calibrate(cmd: CalibrateCommand) -> CliResult<()> {
    let builder = CalibrationBuilder::default();
    let (target, calibration) = match cmd {
        CalibrateCommand::Circle {
            target,
            cx,
            cy,
            radius,
            rotation,
        } => {
            let geometry = builder.from_circle(Some(Circle::new(cx, cy, radius)), rotation)?;
            (target, Calibration::from(geometry))
        }
        CalibrateCommand::Points {
            target,
            points,
            labels,
            reference,
            rectify,
        } => {
            let mut layout = ReferenceLayout {
                reference,
                ..ReferenceLayout::default()
            };
            if !labels.is_empty() {
                layout.labels = labels
                    .as_slice()
                    .try_into()
                    .map_err(|_| format!("expected 4 --label values, got {}", labels.len()))?;
            }
            let builder = builder.with_layout(layout);
            let labeled: Vec<LabeledPoint> = points
                .iter()
                .zip(layout.labels.iter().cycle())
                .map(|(p, label)| LabeledPoint {
                    label: *label,
                    point: *p,
                })
                .collect();
            let calibration = if rectify {
                builder.from_four_points_rectified(&labeled)?
            } else {
                Calibration::from(builder.from_four_points(&labeled)?)
            };
            (target, calibration)
        }
    };

    let mut store = CalibrationStore::load_or_default(&target.store)?;
    store.insert(target.camera.as_str(), &calibration);
    store.write_json(&target.store)?;

    let g = &calibration.geometry;
    println!(
        "{}: center=({:.2}, {:.2}) radius={:.2} rotation={:.2}{}",
        target.camera,
        g.center().x,
        g.center().y,
        g.radius(),
        g.rotation_offset(),
        if calibration.perspective.is_some() {
            " perspective=yes"
        } else {
            ""
        }
    );
    info!("wrote {}", target.store.display());
    Ok(())
}

// ── classify ──────────────────────────────────────────────────────────

fn run_classify(store: &Path, camera: &str, point: Point2<f64>) -> CliResult<()> {
    let calibration = CalibrationStore::load_json(store)?.calibration(camera)?;
    let result = calibration.classify(point);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

// ── play ──────────────────────────────────────────────────────────────

fn run_play(args: &PlayArgs) -> CliResult<()> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load_json(path)?,
        None => GameConfig::default(),
    };
    if let Some(s) = args.starting_score {
        config.starting_score = s;
    }
    if let Some(n) = args.players {
        config.players = n;
    }
    let mut game = Game::new(&config)?;

    for token in &args.throws {
        if token.eq_ignore_ascii_case("undo") {
            let undone = game.undo_last_throw()?;
            println!("undo {} by {}", undone.result, undone.player);
            continue;
        }
        let throw: ScoreResult = token.parse()?;
        let player = game.current_player().id();
        match game.apply_throw(throw)? {
            ThrowOutcome::Scored { remaining } | ThrowOutcome::TurnOver { remaining } => {
                println!("{player}: {throw} -> {remaining}");
            }
            ThrowOutcome::Bust { reason, remaining } => {
                println!("{player}: {throw} bust ({reason}), stays on {remaining}");
            }
            ThrowOutcome::Won { player } => println!("{player} wins with {throw}"),
        }
    }

    print_summary(&game);
    Ok(())
}

fn print_summary(game: &Game) {
    for p in game.players() {
        println!("{}: {}", p.id(), p.score());
    }
    match game.state() {
        GameState::Won(id) => println!("winner: {id}"),
        GameState::InProgress => {
            let next = game.current_player();
            match game.checkout_hint() {
                Some(route) => {
                    let route: Vec<String> = route.iter().map(ToString::to_string).collect();
                    println!(
                        "to throw: {} ({} darts left, checkout {})",
                        next.id(),
                        game.throws_left(),
                        route.join(" ")
                    );
                }
                None => println!(
                    "to throw: {} ({} darts left)",
                    next.id(),
                    game.throws_left()
                ),
            }
        }
    }
}
