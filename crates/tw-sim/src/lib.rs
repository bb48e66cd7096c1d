//! `tw-sim`: the `Tower` facade that drives every subsystem in a fixed
//! per-tick order.
//!
//! # Tick order
//!
//! ```text
//! tick(delta):
//!   ① Clock       : advance time; a paused tower returns immediately.
//!   ② Topology    : recompute connectivity if the grid changed.
//!   ③ Resync      : reconcile cars with shafts; evictions applied to agents.
//!   ④ Rollover    : re-arm windows, pay rent, soil one room, DayStarted.
//!   ⑤ Policy      : fire windows, release queued arrivals, send a janitor.
//!   ⑥ Agents      : one state-machine step per occupant → ride requests.
//!   ⑦ Transit     : register requests, move cars, exchange passengers;
//!                    Boarded / Disembarked applied to agents.
//!   ⑧ Metrics     : arrival income and dirt, janitor cleaning, purge,
//!                    room occupancy and stress, population.
//! ```
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `serde`   | `Serialize`/`Deserialize` on config and event types.     |
//! | `fx-hash` | FxHash for the per-tick room occupancy index.            |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tw_core::{GridPos, RoomType};
//! use tw_sim::{NoopObserver, TowerBuilder, TowerConfig};
//!
//! let mut tower = TowerBuilder::new(TowerConfig::with_grid(20, 12, 2)).build()?;
//! tower.build(GridPos::new(4, 3), RoomType::Office)?;
//! tower.run_ticks(1_000, 16.0, &mut NoopObserver);
//! println!("{} people inside", tower.population());
//! ```

pub mod builder;
pub mod config;
pub mod economy;
pub mod error;
pub mod event;
pub mod observer;
pub mod tower;


pub use builder::TowerBuilder;
pub use config::TowerConfig;
pub use error::{TowerError, TowerResult};
pub use event::{EconomicEvent, TowerEvent};
pub use observer::{NoopObserver, TowerObserver};
pub use tower::{MAX_REPLAYED_DAYS, TickReport, Tower};
