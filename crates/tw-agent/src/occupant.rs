//! Occupant records.

use tw_core::{CarId, OccupantId, OccupantKind, RoomId};

/// Street-side boundary: an occupant walking past this `x` has left.
pub const EXIT_X: f64 = -1.0;

/// Finite-state-machine states.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OccupantState {
    /// Just created at the entrance; routes on its first tick.
    Spawning,
    /// Choosing the next leg toward the goal floor.
    SeekingTransport,
    WalkingToTransport,
    WaitingForCar,
    /// Aboard a car; position mirrors the car until the scheduler puts it off.
    Riding,
    ClimbingStairs,
    /// On the goal floor, walking to the goal `x`.
    WalkingToRoom,
    /// Resting in its goal room until a new goal is issued.
    Arrived,
    /// Gave up; walking out along its current floor.
    Leaving,
    Despawned,
}

/// Where an occupant is trying to get to.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Goal {
    Room { room: RoomId, x: f64, floor: i32 },
    /// Out through the lobby entrance.
    Exit,
}

/// The current vertical hop of a route.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Leg {
    Car { car: CarId, column: i32, to_floor: i32 },
    Stairs { column: i32, to_floor: i32 },
}

impl Leg {
    pub fn column(&self) -> i32 {
        match *self {
            Leg::Car { column, .. } | Leg::Stairs { column, .. } => column,
        }
    }

    pub fn to_floor(&self) -> i32 {
        match *self {
            Leg::Car { to_floor, .. } | Leg::Stairs { to_floor, .. } => to_floor,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occupant {
    pub id:   OccupantId,
    pub kind: OccupantKind,
    /// Continuous horizontal position in cells.
    pub x:    f64,
    /// Continuous vertical position in floors.
    pub y:    f64,
    pub goal: Goal,
    /// The room this occupant counts against for capacity.
    pub home: Option<RoomId>,
    pub state: OccupantState,
    pub leg:   Option<Leg>,
    /// Consecutive ticks spent in `WaitingForCar`.
    pub wait_ticks: u32,
    pub patience:   u32,
    pub stress:     f32,
    /// The car carrying this occupant.  Set only while `Riding`.
    pub car: Option<CarId>,
}

impl Occupant {
    pub fn new(
        id: OccupantId,
        kind: OccupantKind,
        entrance: (f64, i32),
        goal: Goal,
        home: Option<RoomId>,
        patience: u32,
    ) -> Self {
        Self {
            id,
            kind,
            x: entrance.0,
            y: entrance.1 as f64,
            goal,
            home,
            state: OccupantState::Spawning,
            leg: None,
            wait_ticks: 0,
            patience,
            stress: 0.0,
            car: None,
        }
    }

    /// Nearest whole floor.
    pub fn floor(&self) -> i32 {
        self.y.round() as i32
    }

    pub fn goal_room(&self) -> Option<RoomId> {
        match self.goal {
            Goal::Room { room, .. } => Some(room),
            Goal::Exit => None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state != OccupantState::Despawned
    }

    /// Resting in `room`.
    pub fn is_resting_in(&self, room: RoomId) -> bool {
        self.state == OccupantState::Arrived && self.goal_room() == Some(room)
    }

    /// Re-target toward the exit.  Riders keep riding; the scheduler puts
    /// them off and they re-route from there.
    pub fn head_for_exit(&mut self) {
        self.goal = Goal::Exit;
        self.home = None;
        if !matches!(
            self.state,
            OccupantState::Riding | OccupantState::Leaving | OccupantState::Despawned
        ) {
            self.state = OccupantState::SeekingTransport;
            self.leg = None;
            self.wait_ticks = 0;
        }
    }
}
