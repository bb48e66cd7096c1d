//! lobby: headless driver for the rust_tower simulation.
//!
//! Builds a small mixed-use tower (offices, hotel rooms, a condo, two food
//! courts, parking), runs it for two simulated days, and writes tick
//! summaries and car snapshots to `output/lobby`.
//!
//! ```text
//! cargo run -p lobby                      # default config
//! cargo run -p lobby -- tower.json        # TowerConfig as JSON
//! RUST_LOG=debug cargo run -p lobby       # per-occupant tracing
//! ```

mod layout;

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tw_core::Tick;
use tw_output::{CsvWriter, OutputWriter, TowerOutputObserver};
use tw_schedule::load_windows_reader;
use tw_sim::{TickReport, Tower, TowerBuilder, TowerConfig, TowerEvent, TowerObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

/// One 60 fps frame in milliseconds.
const DELTA:                 f64 = 16.0;
/// At the default clock rate a frame is half a simulated minute.
const TICKS_PER_DAY:         u64 = 2_880;
const SIM_DAYS:              u64 = 2;
const SNAPSHOT_INTERVAL:     u64 = 60;

// ── Window table ──────────────────────────────────────────────────────────────

const WINDOWS_CSV: &str = "\
minute,action,kind\n\
420,inbound,office_worker\n\
420,inbound,resident\n\
600,outbound,hotel_guest\n\
660,inbound,visitor\n\
780,outbound,visitor\n\
900,inbound,hotel_guest\n\
1020,outbound,office_worker\n\
";

// ── Observer wrapper: bookkeeping on top of the CSV output ────────────────────

struct LedgerObserver<W: OutputWriter> {
    inner:    TowerOutputObserver<W>,
    cash:     i64,
    arrivals: usize,
    gave_up:  usize,
    peak:     usize,
}

impl<W: OutputWriter> LedgerObserver<W> {
    fn new(inner: TowerOutputObserver<W>) -> Self {
        Self { inner, cash: 0, arrivals: 0, gave_up: 0, peak: 0 }
    }
}

impl<W: OutputWriter> TowerObserver for LedgerObserver<W> {
    fn on_events(&mut self, tick: Tick, events: &[TowerEvent]) {
        for event in events {
            match event {
                TowerEvent::Economic(e) => self.cash += e.amount(),
                TowerEvent::OccupantArrived { .. } => self.arrivals += 1,
                TowerEvent::OccupantGaveUp { .. } => self.gave_up += 1,
                TowerEvent::DayStarted { day } => info!(%tick, day, cash = self.cash, "new day"),
                _ => {}
            }
        }
        self.inner.on_events(tick, events);
    }

    fn on_tick_end(&mut self, tower: &Tower, report: &TickReport) {
        self.peak = self.peak.max(report.population);
        self.inner.on_tick_end(tower, report);
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        self.inner.on_run_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 1. Configuration.
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str::<TowerConfig>(&text).with_context(|| format!("parsing {path}"))?
        }
        None => TowerConfig { seed: 42, ..TowerConfig::default() },
    };
    let lobby = config.lobby_floor;
    if config.width < layout::MIN_WIDTH
        || lobby < layout::BELOW
        || lobby + layout::ABOVE >= config.height as i32
    {
        bail!(
            "grid {}x{} with lobby {} is too small for the demo layout",
            config.width, config.height, lobby
        );
    }

    println!("=== lobby: rust_tower ===");
    println!(
        "Grid: {}x{}  |  Lobby: floor {}  |  Days: {SIM_DAYS}  |  Seed: {}",
        config.width, config.height, lobby, config.seed
    );
    println!();

    // 2. Window table from the embedded CSV.
    let windows = load_windows_reader(Cursor::new(WINDOWS_CSV))?;
    println!("Loaded {} daily windows", windows.windows().len());

    // 3. Tower with the stock layout.
    let builder = TowerBuilder::new(config).windows(windows);
    let mut tower = layout::lobby_layout(builder, lobby).build()?;
    println!(
        "Tower: {} rooms, {} cars",
        tower.topology().room_count(),
        tower.query_cars().len()
    );
    tower.drain_events();

    // 4. Output.
    let writer = CsvWriter::new(Path::new("output/lobby"))?;
    let mut obs = LedgerObserver::new(TowerOutputObserver::new(writer, SNAPSHOT_INTERVAL));

    // 5. Run.
    let t0 = Instant::now();
    tower.run_ticks(TICKS_PER_DAY * SIM_DAYS, DELTA, &mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }
    let leftover = tower.drain_events().len();

    // 6. Summary.
    println!("Simulation complete in {:.3} s ({})", elapsed.as_secs_f64(), tower.clock());
    println!("  population now  : {}", tower.population());
    println!("  peak population : {}", obs.peak);
    println!("  arrivals        : {}", obs.arrivals);
    println!("  gave up         : {}", obs.gave_up);
    println!("  net cash flow   : {}", obs.cash);
    println!("  events emitted  : {leftover}");
    println!();

    // 7. Car table.
    println!("{:<8} {:<8} {:<10} {:<8} {:<6}", "Column", "Floor", "Direction", "Load", "Cap");
    println!("{}", "-".repeat(44));
    for car in tower.query_cars() {
        println!(
            "{:<8} {:<8.2} {:<10} {:<8} {:<6}",
            car.shaft_x,
            car.position,
            car.direction.as_str(),
            car.load,
            car.capacity,
        );
    }

    Ok(())
}
