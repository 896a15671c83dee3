//! Game module - drives turns through the phase sequencer
//!
//! The board engine knows nothing about turns. This module registers one phase per
//! stage of a turn and wires board calls into the phase hooks:
//!
//! ```text
//! AwaitInput --(direction)--> Slide --(no moves)--> AwaitInput
//!                               |
//!                               +--(moved, settled)--> Spawn --> CheckGameOver --> AwaitInput
//!                                                                      |
//!                                                                      +--> GameOver
//! ```
//!
//! `Slide` runs one sweep per tick so a renderer can animate between sweeps.
//! `Paused` is entered with `gosub` from any phase and left with `ret`, which
//! resumes the interrupted phase without re-running its Enter hook.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::GameConfig;
use crate::core::{
    Board, BoardSnapshot, PhaseDef, PhaseSequencer, RandomSource, SequencerError, Spawned,
    StepResult,
};
use crate::error::GameError;
use crate::types::Direction;

/// Turn phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    AwaitInput,
    Slide,
    Spawn,
    CheckGameOver,
    GameOver,
    Paused,
}

/// Everything that happened during one turn
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnOutcome {
    pub direction: Option<Direction>,
    /// Sweeps that moved at least one tile, in order
    pub sweeps: Vec<StepResult>,
    /// Score gained this turn
    pub score: u32,
    pub spawned: Option<Spawned>,
    pub game_over: bool,
}

impl TurnOutcome {
    pub fn moved(&self) -> bool {
        !self.sweeps.is_empty()
    }
}

/// State shared by all phase hooks
#[derive(Debug)]
struct GameContext<R> {
    board: Board,
    rng: R,
    config: GameConfig,
    score: u32,
    /// Direction waiting to be consumed by `AwaitInput`
    pending: Option<Direction>,
    /// Turn in progress
    turn: TurnOutcome,
    /// Most recently completed turn
    last_turn: Option<TurnOutcome>,
    game_over: bool,
}

impl<R> GameContext<R> {
    fn finish_turn(&mut self) {
        if self.turn.direction.is_some() {
            self.last_turn = Some(std::mem::take(&mut self.turn));
        }
    }
}

type Sequencer<R> = PhaseSequencer<Phase, GameContext<R>>;
type HookResult = Result<(), SequencerError<Phase>>;

fn await_input_action<R>(sm: &mut Sequencer<R>, ctx: &mut GameContext<R>) -> HookResult {
    let Some(dir) = ctx.pending.take() else {
        return Ok(());
    };

    debug!("turn started: {}", dir.as_str());
    ctx.turn = TurnOutcome {
        direction: Some(dir),
        ..TurnOutcome::default()
    };
    sm.goto(Phase::Slide, ctx)
}

fn await_input_enter<R>(_: &mut Sequencer<R>, ctx: &mut GameContext<R>) -> HookResult {
    ctx.finish_turn();
    Ok(())
}

fn slide_action<R>(sm: &mut Sequencer<R>, ctx: &mut GameContext<R>) -> HookResult {
    let Some(dir) = ctx.turn.direction else {
        return sm.goto(Phase::AwaitInput, ctx);
    };

    let step = ctx.board.single_step(dir);
    if step.moved() {
        debug!("sweep {}: {} moves, +{}", dir.as_str(), step.moves.len(), step.score);
        ctx.turn.score += step.score;
        ctx.score += step.score;
        ctx.turn.sweeps.push(step);
        return Ok(());
    }

    // Settled; locks only guard merges within this turn.
    ctx.board.clear_locks();
    if ctx.turn.moved() {
        sm.goto(Phase::Spawn, ctx)
    } else {
        debug!("nothing moved {}", dir.as_str());
        sm.goto(Phase::AwaitInput, ctx)
    }
}

fn spawn_enter<R: RandomSource>(sm: &mut Sequencer<R>, ctx: &mut GameContext<R>) -> HookResult {
    let four_chance = ctx.config.four_chance_percent;
    ctx.turn.spawned = ctx.board.spawn_tile(&mut ctx.rng, four_chance);
    match ctx.turn.spawned {
        Some(tile) => debug!("spawned {} at ({}, {})", tile.value, tile.x, tile.y),
        None => debug!("board full, nothing spawned"),
    }
    sm.goto(Phase::CheckGameOver, ctx)
}

fn check_game_over_enter<R>(sm: &mut Sequencer<R>, ctx: &mut GameContext<R>) -> HookResult {
    if ctx.board.has_moves() {
        sm.goto(Phase::AwaitInput, ctx)
    } else {
        sm.goto(Phase::GameOver, ctx)
    }
}

fn game_over_enter<R>(_: &mut Sequencer<R>, ctx: &mut GameContext<R>) -> HookResult {
    ctx.game_over = true;
    ctx.turn.game_over = true;
    ctx.finish_turn();
    info!(
        "game over: score {}, max tile {}",
        ctx.score,
        ctx.board.max_tile()
    );
    Ok(())
}

fn build_sequencer<R: RandomSource + 'static>() -> Sequencer<R> {
    let mut sm = PhaseSequencer::new();
    sm.add_state(
        Phase::AwaitInput,
        PhaseDef::new()
            .on_enter(await_input_enter::<R>)
            .on_action(await_input_action::<R>),
    );
    sm.add_state(Phase::Slide, PhaseDef::new().on_action(slide_action::<R>));
    sm.add_state(Phase::Spawn, PhaseDef::new().on_enter(spawn_enter::<R>));
    sm.add_state(
        Phase::CheckGameOver,
        PhaseDef::new().on_enter(check_game_over_enter::<R>),
    );
    sm.add_state(Phase::GameOver, PhaseDef::new().on_enter(game_over_enter::<R>));
    sm.add_state(
        Phase::Paused,
        PhaseDef::new()
            .on_enter(|_, _| {
                debug!("paused");
                Ok(())
            })
            .on_exit(|_, _| {
                debug!("resumed");
                Ok(())
            }),
    );
    sm
}

/// A single game: board, score and turn sequencing
pub struct Game<R: RandomSource + 'static> {
    sm: Sequencer<R>,
    ctx: GameContext<R>,
}

impl Game<StdRng> {
    /// Create a game seeded from `config.seed`, or from entropy when unset.
    pub fn from_config(config: GameConfig) -> Result<Self, GameError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(config, rng)
    }
}

impl<R: RandomSource + 'static> Game<R> {
    /// Create a game and start it with `config.initial_tiles` spawned tiles.
    pub fn new(config: GameConfig, rng: R) -> Result<Self, GameError> {
        config.validate()?;

        let mut game = Self {
            sm: build_sequencer(),
            ctx: GameContext {
                board: Board::new(),
                rng,
                config,
                score: 0,
                pending: None,
                turn: TurnOutcome::default(),
                last_turn: None,
                game_over: false,
            },
        };
        game.restart()?;
        Ok(game)
    }

    /// Start over: empty board, zero score, fresh initial tiles.
    pub fn restart(&mut self) -> Result<(), GameError> {
        while self.sm.depth() > 0 {
            self.sm.ret(&mut self.ctx)?;
        }

        let ctx = &mut self.ctx;
        ctx.board.reset();
        ctx.score = 0;
        ctx.pending = None;
        ctx.turn = TurnOutcome::default();
        ctx.last_turn = None;
        ctx.game_over = false;

        for _ in 0..ctx.config.initial_tiles {
            ctx.board.spawn_tile(&mut ctx.rng, ctx.config.four_chance_percent);
        }
        info!("new game");

        self.sm.goto(Phase::AwaitInput, &mut self.ctx)?;
        Ok(())
    }

    /// Queue a direction for the next tick.
    pub fn queue(&mut self, dir: Direction) -> Result<(), GameError> {
        if self.ctx.game_over {
            return Err(GameError::GameOver);
        }
        if self.is_paused() {
            return Err(GameError::Paused);
        }
        self.ctx.pending = Some(dir);
        Ok(())
    }

    /// Advance the current phase by one action.
    pub fn tick(&mut self) -> Result<(), GameError> {
        self.sm.do_action(&mut self.ctx)?;
        Ok(())
    }

    /// Play one full turn in `dir` and return what happened.
    ///
    /// Fails with [`GameError::TurnInProgress`] when a turn started through
    /// [`Game::queue`] has not settled yet.
    pub fn submit(&mut self, dir: Direction) -> Result<TurnOutcome, GameError> {
        if !self.is_game_over() && !self.is_paused() && self.phase() != Some(Phase::AwaitInput) {
            return Err(GameError::TurnInProgress);
        }
        self.queue(dir)?;
        self.tick()?;
        while self.phase() == Some(Phase::Slide) {
            self.tick()?;
        }
        Ok(self.ctx.last_turn.clone().unwrap_or_default())
    }

    /// Suspend the current phase.
    pub fn pause(&mut self) -> Result<(), GameError> {
        if self.is_paused() {
            return Ok(());
        }
        self.sm.gosub(Phase::Paused, &mut self.ctx)?;
        Ok(())
    }

    /// Resume the phase interrupted by [`Game::pause`].
    pub fn resume(&mut self) -> Result<(), GameError> {
        if !self.is_paused() {
            return Err(GameError::NotPaused);
        }
        self.sm.ret(&mut self.ctx)?;
        Ok(())
    }

    pub fn phase(&self) -> Option<Phase> {
        self.sm.current()
    }

    pub fn is_paused(&self) -> bool {
        self.phase() == Some(Phase::Paused)
    }

    pub fn is_game_over(&self) -> bool {
        self.ctx.game_over
    }

    pub fn score(&self) -> u32 {
        self.ctx.score
    }

    pub fn board(&self) -> &Board {
        &self.ctx.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.ctx.config
    }

    pub fn last_turn(&self) -> Option<&TurnOutcome> {
        self.ctx.last_turn.as_ref()
    }

    /// Board view for renderers: the last sweep of the last completed turn.
    pub fn snapshot(&self) -> BoardSnapshot {
        let last = self.ctx.last_turn.as_ref();
        let mut snap = BoardSnapshot::capture(
            &self.ctx.board,
            last.and_then(|turn| turn.sweeps.last()),
            last.map_or(0, |turn| turn.score),
        );
        snap.score = self.ctx.score;
        snap.game_over = self.ctx.game_over;
        snap
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.ctx.board
    }
}
