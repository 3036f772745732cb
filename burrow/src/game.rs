//! Core game state and rules.

use std::fmt;

use burrow_core::{Board, Cell, Coord};
use rand::Rng;

use crate::command::{Command, Direction};
use crate::config::{GameConfig, SetupError};
use crate::setup;

/// Lifecycle of a game. `Won` and `Abandoned` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    Active,
    Won,
    Abandoned,
}

impl Status {
    /// Whether no further commands are accepted.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::Active)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Active => "active",
            Status::Won => "won",
            Status::Abandoned => "abandoned",
        })
    }
}

/// What an accepted command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Moved { from: Coord, to: Coord },
    PickedUp,
    Jumped { from: Coord, to: Coord },
    /// A carrot went into `hole`; `remaining` holes are still open.
    Delivered { hole: Coord, remaining: u32 },
    /// The last hole was filled.
    Won { hole: Coord },
    Quit,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Moved { to, .. } => write!(f, "Mr. Bunny hops to {to}."),
            Event::PickedUp => f.write_str("Mr. Bunny picks up a carrot."),
            Event::Jumped { .. } => f.write_str("Jumping over a rabbit hole!"),
            Event::Delivered { remaining, .. } => {
                write!(f, "The carrot is safely stored. {remaining} holes to go.")
            }
            Event::Won { .. } => f.write_str(
                "Congratulations! Mr. Bunny safely returned to his rabbit hole with the carrot!",
            ),
            Event::Quit => f.write_str("Game over. You quit."),
        }
    }
}

/// Why a command was rejected. The game state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// The step would leave the board.
    OutOfBounds { target: Coord },
    /// The step lands on a carrot while the rabbit's paws are empty.
    CarrotMustBePickedFirst { target: Coord },
    /// No adjacent carrot, or already carrying one.
    CannotPickCarrot,
    /// No adjacent hole.
    CannotJump,
    /// The game already ended.
    GameOver(Status),
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { .. } => f.write_str("Invalid move. Mr. Bunny can't go that way."),
            Self::CarrotMustBePickedFirst { .. } => {
                f.write_str("You need to pick up the carrot (p) first.")
            }
            Self::CannotPickCarrot => f.write_str("Cannot pick up a carrot."),
            Self::CannotJump => f.write_str("Cannot jump over a hole."),
            Self::GameOver(status) => write!(f, "The game is over ({status})."),
        }
    }
}

impl std::error::Error for MoveError {}

/// Whether `c` lies on `board`.
#[inline]
pub fn is_valid_move(board: &Board, c: Coord) -> bool {
    board.contains(c)
}

/// The board plus the rabbit's position, carrying flag, open-hole counter
/// and lifecycle status.
///
/// The board is only ever changed through [`apply`](GameState::apply), which
/// keeps exactly one rabbit cell on it. A hole the rabbit stands on is hidden
/// under the rabbit tag and put back when the rabbit leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    rabbit: Coord,
    underfoot: Cell,
    holding_carrot: bool,
    remaining_holes: u32,
    status: Status,
}

impl GameState {
    /// Start a new game on a freshly generated board.
    pub fn new(config: &GameConfig) -> Result<Self, SetupError> {
        Self::with_rng(config, &mut config.rng())
    }

    /// Start a new game, drawing placements from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Self, SetupError> {
        let (board, rabbit) = setup::initialize(config.size, config.carrots, config.holes, rng)?;
        Ok(Self {
            board,
            rabbit,
            underfoot: Cell::Pathway,
            holding_carrot: false,
            remaining_holes: config.holes,
            status: Status::Active,
        })
    }

    /// Resume play on a prepared board. The board must hold exactly one
    /// rabbit cell; a [`Cell::RabbitCarrying`] rabbit starts out holding a
    /// carrot. Every hole on the board counts as open.
    pub fn from_board(board: Board) -> Result<Self, SetupError> {
        let rabbits = board.count_fn(Cell::is_rabbit);
        let Some(rabbit) = board.rabbit().filter(|_| rabbits == 1) else {
            return Err(SetupError::RabbitCount(rabbits));
        };
        let holding_carrot = board.at(rabbit) == Some(Cell::RabbitCarrying);
        let remaining_holes = board.count(Cell::RabbitHole) as u32;
        Ok(Self {
            board,
            rabbit,
            underfoot: Cell::Pathway,
            holding_carrot,
            remaining_holes,
            status: Status::Active,
        })
    }

    // -------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// An owned copy of the board, safe to search while play continues.
    pub fn snapshot(&self) -> Board {
        self.board.clone()
    }

    pub fn rabbit(&self) -> Coord {
        self.rabbit
    }

    pub fn holding_carrot(&self) -> bool {
        self.holding_carrot
    }

    pub fn remaining_holes(&self) -> u32 {
        self.remaining_holes
    }

    pub fn status(&self) -> Status {
        self.status
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    /// Whether `c` lies on the board.
    pub fn is_valid_move(&self, c: Coord) -> bool {
        is_valid_move(&self.board, c)
    }

    /// Whether a carrot is orthogonally adjacent to the rabbit.
    pub fn can_pick_carrot(&self) -> bool {
        self.adjacent(Cell::Carrot).is_some()
    }

    /// Whether a hole is orthogonally adjacent to the rabbit.
    pub fn can_jump(&self) -> bool {
        self.adjacent(Cell::RabbitHole).is_some()
    }

    /// Whether the rabbit is standing on a hole.
    ///
    /// A pure query: it never ends the game. Winning is decided by the
    /// open-hole counter alone.
    pub fn has_won(&self) -> bool {
        self.underfoot == Cell::RabbitHole
    }

    /// First neighbor of the rabbit holding `cell`, checking up, down, left,
    /// right.
    fn adjacent(&self, cell: Cell) -> Option<Coord> {
        self.board
            .neighbors(self.rabbit)
            .find_map(|(c, v)| (v == cell).then_some(c))
    }

    // -------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------

    /// Apply one command. On error nothing changes.
    pub fn apply(&mut self, cmd: Command) -> Result<Event, MoveError> {
        if self.status.is_terminal() {
            return Err(MoveError::GameOver(self.status));
        }
        let result = match cmd {
            Command::MoveLeft => self.step(Direction::Left),
            Command::MoveRight => self.step(Direction::Right),
            Command::MoveUp => self.step(Direction::Up),
            Command::MoveDown => self.step(Direction::Down),
            Command::PickUp => self.pick_up(),
            Command::Jump => self.jump(),
            Command::Quit => Ok(self.quit()),
        };
        match &result {
            Ok(event) => log::debug!("{cmd}: {event:?}"),
            Err(err) => log::debug!("{cmd} rejected: {err:?}"),
        }
        result
    }

    fn step(&mut self, dir: Direction) -> Result<Event, MoveError> {
        let from = self.rabbit;
        let target = from + dir.delta();
        let Some(cell) = self.board.at(target) else {
            return Err(MoveError::OutOfBounds { target });
        };
        match cell {
            Cell::Carrot if !self.holding_carrot => {
                Err(MoveError::CarrotMustBePickedFirst { target })
            }
            Cell::RabbitHole if self.holding_carrot => Ok(self.deliver(target)),
            _ => {
                self.relocate(target);
                Ok(Event::Moved { from, to: target })
            }
        }
    }

    /// Drop the carried carrot into `hole`. The rabbit stays put.
    fn deliver(&mut self, hole: Coord) -> Event {
        self.board.set(hole, Cell::Pathway);
        self.holding_carrot = false;
        self.board.set(self.rabbit, Cell::RabbitPlain);
        self.remaining_holes = self.remaining_holes.saturating_sub(1);
        if self.remaining_holes == 0 {
            self.status = Status::Won;
            log::info!("last hole filled at {hole}, game won");
            Event::Won { hole }
        } else {
            Event::Delivered {
                hole,
                remaining: self.remaining_holes,
            }
        }
    }

    /// Move the rabbit marker to `target`. The vacated cell gets back what
    /// was under the rabbit; a carrot stepped on is gone for good.
    fn relocate(&mut self, target: Coord) {
        let landing = match self.board.at(target) {
            Some(Cell::RabbitHole) => Cell::RabbitHole,
            _ => Cell::Pathway,
        };
        self.board.set(self.rabbit, self.underfoot);
        self.underfoot = landing;
        self.board.set(target, Cell::rabbit(self.holding_carrot));
        self.rabbit = target;
    }

    /// The adjacent carrot stays on the board.
    fn pick_up(&mut self) -> Result<Event, MoveError> {
        if self.holding_carrot || !self.can_pick_carrot() {
            return Err(MoveError::CannotPickCarrot);
        }
        self.holding_carrot = true;
        self.board.set(self.rabbit, Cell::RabbitCarrying);
        Ok(Event::PickedUp)
    }

    /// Land on the first adjacent hole without filling it. The hole stays
    /// open and reappears once the rabbit moves on.
    fn jump(&mut self) -> Result<Event, MoveError> {
        let Some(to) = self.adjacent(Cell::RabbitHole) else {
            return Err(MoveError::CannotJump);
        };
        let from = self.rabbit;
        self.relocate(to);
        Ok(Event::Jumped { from, to })
    }

    fn quit(&mut self) -> Event {
        self.status = Status::Abandoned;
        log::info!("game abandoned with {} holes open", self.remaining_holes);
        Event::Quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn game(rows: &[&str]) -> GameState {
        GameState::from_board(Board::from_rows(rows).unwrap()).unwrap()
    }

    fn rabbit_cells(g: &GameState) -> usize {
        g.board().count_fn(Cell::is_rabbit)
    }

    #[test]
    fn new_game_from_config() {
        let cfg = GameConfig {
            size: 4,
            carrots: 2,
            holes: 3,
            seed: Some(11),
        };
        let g = GameState::new(&cfg).unwrap();
        assert_eq!(g.status(), Status::Active);
        assert_eq!(g.remaining_holes(), 3);
        assert!(!g.holding_carrot());
        assert_eq!(g.board().at(g.rabbit()), Some(Cell::RabbitPlain));
        assert_eq!(rabbit_cells(&g), 1);
    }

    #[test]
    fn new_game_rejects_impossible_config() {
        let cfg = GameConfig {
            size: 2,
            carrots: 2,
            holes: 2,
            seed: Some(0),
        };
        assert!(matches!(
            GameState::new(&cfg),
            Err(SetupError::InitializationImpossible { .. })
        ));
    }

    #[test]
    fn from_board_requires_one_rabbit() {
        let none = Board::from_rows(&["--", "--"]).unwrap();
        assert_eq!(GameState::from_board(none), Err(SetupError::RabbitCount(0)));
        let two = Board::from_rows(&["r-", "-R"]).unwrap();
        assert_eq!(GameState::from_board(two), Err(SetupError::RabbitCount(2)));
        let carrying = game(&["R-", "O-"]);
        assert!(carrying.holding_carrot());
        assert_eq!(carrying.remaining_holes(), 1);
    }

    #[test]
    fn move_onto_pathway() {
        let mut g = game(&["---", "-r-", "---"]);
        assert_eq!(
            g.apply(Command::MoveRight),
            Ok(Event::Moved {
                from: Coord::new(1, 1),
                to: Coord::new(1, 2)
            })
        );
        assert_eq!(g.rabbit(), Coord::new(1, 2));
        assert_eq!(g.board().at(Coord::new(1, 1)), Some(Cell::Pathway));
        assert_eq!(g.board().at(Coord::new(1, 2)), Some(Cell::RabbitPlain));
    }

    #[test]
    fn out_of_bounds_is_rejected_without_change() {
        let mut g = game(&["r-", "--"]);
        let before = g.clone();
        assert_eq!(
            g.apply(Command::MoveUp),
            Err(MoveError::OutOfBounds {
                target: Coord::new(-1, 0)
            })
        );
        assert_eq!(
            g.apply(Command::MoveLeft),
            Err(MoveError::OutOfBounds {
                target: Coord::new(0, -1)
            })
        );
        assert_eq!(g, before);
    }

    #[test]
    fn carrot_blocks_empty_paws() {
        let mut g = game(&["rc", "--"]);
        let before = g.clone();
        assert_eq!(
            g.apply(Command::MoveRight),
            Err(MoveError::CarrotMustBePickedFirst {
                target: Coord::new(0, 1)
            })
        );
        assert_eq!(g, before);
    }

    #[test]
    fn hole_without_carrot_is_walked_onto() {
        let mut g = game(&["rO", "--"]);
        assert!(g.apply(Command::MoveRight).is_ok());
        assert_eq!(g.rabbit(), Coord::new(0, 1));
        assert_eq!(g.board().at(Coord::new(0, 1)), Some(Cell::RabbitPlain));
        assert_eq!(g.remaining_holes(), 1);
    }

    #[test]
    fn pick_up_keeps_carrot_on_board() {
        let mut g = game(&["rc", "--"]);
        assert!(g.can_pick_carrot());
        assert_eq!(g.apply(Command::PickUp), Ok(Event::PickedUp));
        assert!(g.holding_carrot());
        assert_eq!(g.board().at(Coord::ZERO), Some(Cell::RabbitCarrying));
        assert_eq!(g.board().at(Coord::new(0, 1)), Some(Cell::Carrot));
    }

    #[test]
    fn pick_up_rejected_when_not_adjacent_or_full() {
        let mut far = game(&["r-c", "---", "---"]);
        assert_eq!(far.apply(Command::PickUp), Err(MoveError::CannotPickCarrot));

        let mut full = game(&["Rc", "--"]);
        let before = full.clone();
        assert_eq!(full.apply(Command::PickUp), Err(MoveError::CannotPickCarrot));
        assert_eq!(full, before);
    }

    #[test]
    fn pick_up_ignores_diagonals() {
        let g = game(&["r-", "-c"]);
        assert!(!g.can_pick_carrot());
    }

    #[test]
    fn delivery_fills_hole_and_keeps_rabbit_in_place() {
        let mut g = game(&["RO-", "---", "--O"]);
        assert_eq!(
            g.apply(Command::MoveRight),
            Ok(Event::Delivered {
                hole: Coord::new(0, 1),
                remaining: 1
            })
        );
        assert_eq!(g.rabbit(), Coord::ZERO);
        assert!(!g.holding_carrot());
        assert_eq!(g.board().at(Coord::ZERO), Some(Cell::RabbitPlain));
        assert_eq!(g.board().at(Coord::new(0, 1)), Some(Cell::Pathway));
        assert_eq!(g.status(), Status::Active);
    }

    #[test]
    fn walking_onto_carrot_while_carrying() {
        let mut g = game(&["Rc", "--"]);
        assert!(g.apply(Command::MoveRight).is_ok());
        assert_eq!(g.board().at(Coord::new(0, 1)), Some(Cell::RabbitCarrying));
        assert_eq!(g.board().count(Cell::Carrot), 0);
    }

    #[test]
    fn jump_lands_on_first_adjacent_hole() {
        // Holes above and to the right; up is checked first.
        let mut g = game(&["-O-", "-rO", "---"]);
        assert!(g.can_jump());
        assert_eq!(
            g.apply(Command::Jump),
            Ok(Event::Jumped {
                from: Coord::new(1, 1),
                to: Coord::new(0, 1)
            })
        );
        assert_eq!(g.rabbit(), Coord::new(0, 1));
        assert_eq!(g.board().at(Coord::new(1, 1)), Some(Cell::Pathway));
        assert_eq!(g.remaining_holes(), 2);
        assert_eq!(rabbit_cells(&g), 1);
    }

    #[test]
    fn jump_while_carrying_does_not_deliver() {
        let mut g = game(&["RO", "--"]);
        assert!(g.apply(Command::Jump).is_ok());
        assert!(g.holding_carrot());
        assert_eq!(g.board().at(Coord::new(0, 1)), Some(Cell::RabbitCarrying));
        assert_eq!(g.remaining_holes(), 1);
        assert_eq!(g.status(), Status::Active);
    }

    #[test]
    fn jump_without_hole_is_rejected() {
        let mut g = game(&["r-", "-O"]);
        let before = g.clone();
        assert_eq!(g.apply(Command::Jump), Err(MoveError::CannotJump));
        assert_eq!(g, before);
    }

    #[test]
    fn has_won_is_a_pure_query() {
        let mut g = game(&["RO", "--"]);
        assert!(!g.has_won());
        let _ = g.apply(Command::MoveRight);
        assert_eq!(g.status(), Status::Won);
        assert!(!g.has_won());

        let mut g = game(&["rO-", "---", "--O"]);
        g.apply(Command::Jump).unwrap();
        assert!(g.has_won());
        assert_eq!(g.status(), Status::Active);
        assert_eq!(g.remaining_holes(), 2);
    }

    #[test]
    fn jumped_hole_stays_open_for_delivery() {
        // r O -
        // c - -
        // - - -
        let mut g = game(&["rO-", "c--", "---"]);
        g.apply(Command::Jump).unwrap();
        g.apply(Command::MoveRight).unwrap();
        assert_eq!(g.board().at(Coord::new(0, 1)), Some(Cell::RabbitHole));
        assert_eq!(g.board().count(Cell::RabbitHole), 1);
        assert_eq!(g.remaining_holes(), 1);

        g.apply(Command::MoveDown).unwrap();
        g.apply(Command::MoveLeft).unwrap();
        assert_eq!(g.apply(Command::PickUp), Ok(Event::PickedUp));
        assert_eq!(
            g.apply(Command::MoveUp),
            Ok(Event::Won {
                hole: Coord::new(0, 1)
            })
        );
        assert_eq!(g.status(), Status::Won);
    }

    #[test]
    fn walking_over_hole_leaves_it_in_place() {
        let mut g = game(&["rO-", "---", "---"]);
        g.apply(Command::MoveRight).unwrap();
        assert!(g.has_won());
        g.apply(Command::MoveRight).unwrap();
        assert_eq!(g.board().at(Coord::new(0, 1)), Some(Cell::RabbitHole));
        assert_eq!(g.board().at(Coord::new(0, 0)), Some(Cell::Pathway));
        assert!(!g.has_won());
    }

    #[test]
    fn scenario_pick_walk_deliver() {
        // - O -
        // c r -
        // - - -
        let mut g = game(&["-O-", "cr-", "---"]);
        assert_eq!(g.remaining_holes(), 1);

        assert_eq!(g.apply(Command::PickUp), Ok(Event::PickedUp));
        assert!(g.holding_carrot());

        // The carrot was not cleared, so the carrying rabbit walks onto it.
        assert!(g.apply(Command::MoveLeft).is_ok());
        assert_eq!(g.rabbit(), Coord::new(1, 0));
        assert_eq!(g.board().at(Coord::new(1, 0)), Some(Cell::RabbitCarrying));
        assert_eq!(g.board().at(Coord::new(1, 1)), Some(Cell::Pathway));

        assert!(g.apply(Command::MoveUp).is_ok());
        assert_eq!(g.rabbit(), Coord::new(0, 0));

        assert_eq!(
            g.apply(Command::MoveRight),
            Ok(Event::Won {
                hole: Coord::new(0, 1)
            })
        );
        assert_eq!(g.status(), Status::Won);
        assert_eq!(g.remaining_holes(), 0);
        assert_eq!(g.board().to_string(), "r - -\n- - -\n- - -\n");
    }

    #[test]
    fn won_game_rejects_everything() {
        let mut g = game(&["RO", "--"]);
        assert!(matches!(g.apply(Command::MoveRight), Ok(Event::Won { .. })));
        let before = g.clone();
        for cmd in Command::ALL {
            assert_eq!(g.apply(cmd), Err(MoveError::GameOver(Status::Won)));
        }
        assert_eq!(g, before);
    }

    #[test]
    fn quit_from_any_state_abandons() {
        for rows in [&["r-", "--"][..], &["Rc", "O-"][..], &["rO", "c-"][..]] {
            let mut g = game(rows);
            assert_eq!(g.apply(Command::Quit), Ok(Event::Quit));
            assert_eq!(g.status(), Status::Abandoned);
            let before = g.clone();
            assert_eq!(
                g.apply(Command::MoveDown),
                Err(MoveError::GameOver(Status::Abandoned))
            );
            assert_eq!(g.apply(Command::Quit), Err(MoveError::GameOver(Status::Abandoned)));
            assert_eq!(g, before);
        }
    }

    #[test]
    fn random_play_keeps_invariants() {
        let mut rng = StdRng::seed_from_u64(2024);
        let moves = [
            Command::MoveLeft,
            Command::MoveRight,
            Command::MoveUp,
            Command::MoveDown,
            Command::PickUp,
            Command::Jump,
        ];
        for seed in 0..20 {
            let cfg = GameConfig {
                size: 5,
                carrots: 4,
                holes: 3,
                seed: Some(seed),
            };
            let mut g = GameState::new(&cfg).unwrap();
            for _ in 0..300 {
                let cmd = moves[rng.random_range(0..moves.len())];
                let before = g.clone();
                let holes_before = g.remaining_holes();
                match g.apply(cmd) {
                    Ok(_) => {
                        assert!(g.remaining_holes() <= holes_before);
                    }
                    Err(_) => assert_eq!(g, before),
                }
                assert_eq!(rabbit_cells(&g), 1);
                assert_eq!(g.board().rabbit(), Some(g.rabbit()));
                let hidden = usize::from(g.has_won());
                assert_eq!(
                    g.board().count(Cell::RabbitHole) + hidden,
                    g.remaining_holes() as usize
                );
                assert_eq!(
                    g.board().at(g.rabbit()),
                    Some(Cell::rabbit(g.holding_carrot()))
                );
                if g.status().is_terminal() {
                    break;
                }
            }
        }
    }

    #[test]
    fn snapshot_is_detached_from_play() {
        let mut g = game(&["r--", "-c-", "--O"]);
        let snap = g.snapshot();
        g.apply(Command::MoveRight).unwrap();
        g.apply(Command::MoveRight).unwrap();
        assert_eq!(snap.rabbit(), Some(Coord::ZERO));
        assert_eq!(snap.at(Coord::new(0, 2)), Some(Cell::Pathway));
        assert_ne!(&snap, g.board());
        let path = burrow_paths::find_path(&snap, Coord::ZERO, Coord::new(2, 2)).unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path.last(), Some(&Coord::new(2, 2)));
    }

    #[test]
    fn free_validity_check() {
        let b = Board::new(3);
        assert!(is_valid_move(&b, Coord::new(2, 0)));
        assert!(!is_valid_move(&b, Coord::new(0, 3)));
        assert!(!is_valid_move(&b, Coord::new(-1, 1)));
    }
}
