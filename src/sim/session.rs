//! Game session state machine and fixed-step update
//!
//! Menu ⇄ Playing ⇄ Paused, Playing → GameOver → {Playing, Menu},
//! Menu ⇄ LeaderboardView. Quit terminates from any phase.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::first_hit;
use super::spawn::SpawnScheduler;
use super::state::{Field, GamePhase, Obstacle, Player};
use crate::consts::*;
use crate::difficulty::{self, Difficulty, DifficultyProfile};
use crate::error::GameError;
use crate::highscores::{LeaderboardStore, RecordStore, ScoreRecord};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held steering keys
    pub left: bool,
    pub right: bool,
    /// Difficulty chosen on the menu
    pub select_difficulty: Option<String>,
    /// Pause toggle
    pub pause: bool,
    /// Escape back to the menu
    pub menu: bool,
    /// Start over after game over
    pub restart: bool,
    /// Open the leaderboard from the menu
    pub view_leaderboard: bool,
    /// Leaderboard tab to show
    pub leaderboard_tab: Option<Difficulty>,
    /// Close the game
    pub quit: bool,
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Started { difficulty: Difficulty },
    DifficultyRejected { requested: String },
    Paused,
    Resumed,
    BatchSpawned { count: usize },
    Escalated { velocity_delta: f32 },
    GameOver { record: ScoreRecord },
    ReturnedToMenu,
    LeaderboardOpened,
    Quit,
}

/// Session-wide settings that don't change between runs
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub field: Field,
    pub player_name: String,
    /// RNG seed for spawn positions; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            field: Field::default(),
            player_name: "Player".to_string(),
            seed: None,
        }
    }
}

/// One live run on a chosen difficulty
#[derive(Debug, Clone)]
struct Run {
    profile: DifficultyProfile,
    player: Player,
    obstacles: Vec<Obstacle>,
    scheduler: SpawnScheduler,
    elapsed_ms: u64,
}

impl Run {
    fn new(profile: DifficultyProfile, field: &Field) -> Self {
        Self {
            profile,
            player: Player::spawn(field),
            obstacles: Vec::new(),
            scheduler: SpawnScheduler::new(&profile),
            elapsed_ms: 0,
        }
    }
}

pub struct GameSession<S> {
    config: SessionConfig,
    phase: GamePhase,
    run: Option<Run>,
    last_record: Option<ScoreRecord>,
    leaderboard: LeaderboardStore<S>,
    leaderboard_tab: Difficulty,
    rng: Pcg32,
    terminated: bool,
}

impl<S: RecordStore> GameSession<S> {
    pub fn new(config: SessionConfig, leaderboard: LeaderboardStore<S>) -> Self {
        let rng = match config.seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_os_rng(),
        };
        Self {
            config,
            phase: GamePhase::Menu,
            run: None,
            last_record: None,
            leaderboard,
            leaderboard_tab: Difficulty::Easy,
            rng,
            terminated: false,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn field(&self) -> &Field {
        &self.config.field
    }

    pub fn player_name(&self) -> &str {
        &self.config.player_name
    }

    pub fn profile(&self) -> Option<&DifficultyProfile> {
        self.run.as_ref().map(|r| &r.profile)
    }

    pub fn player(&self) -> Option<&Player> {
        self.run.as_ref().map(|r| &r.player)
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        match &self.run {
            Some(run) => &run.obstacles,
            None => &[],
        }
    }

    pub fn scheduler(&self) -> Option<&SpawnScheduler> {
        self.run.as_ref().map(|r| &r.scheduler)
    }

    /// Play time in milliseconds, excluding pauses
    pub fn elapsed_ms(&self) -> u64 {
        self.run.as_ref().map_or(0, |r| r.elapsed_ms)
    }

    /// Score shown to the player: rounded seconds survived
    pub fn score(&self) -> u32 {
        (self.elapsed_ms() as f64 / 1000.0).round() as u32
    }

    /// Record written at the most recent game over
    pub fn last_record(&self) -> Option<&ScoreRecord> {
        self.last_record.as_ref()
    }

    pub fn leaderboard(&self) -> &LeaderboardStore<S> {
        &self.leaderboard
    }

    pub fn leaderboard_tab(&self) -> Difficulty {
        self.leaderboard_tab
    }

    /// Rows for the leaderboard screen's current tab
    pub fn leaderboard_rows(&self) -> Vec<ScoreRecord> {
        self.leaderboard
            .top_n(Some(self.leaderboard_tab), LEADERBOARD_ROWS)
    }

    // --- Transitions ---

    /// Menu → Playing on the named difficulty. An unknown name leaves the
    /// session in the menu.
    pub fn start(&mut self, difficulty_id: &str) -> Result<(), GameError> {
        let profile = difficulty::lookup(difficulty_id)?;
        if self.phase != GamePhase::Menu || self.terminated {
            log::debug!("Ignoring start outside the menu ({:?})", self.phase);
            return Ok(());
        }
        self.begin_run(profile);
        Ok(())
    }

    /// Playing ⇄ Paused
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::Paused;
                true
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                true
            }
            other => {
                log::debug!("Ignoring pause toggle in {other:?}");
                false
            }
        }
    }

    /// Playing, GameOver or LeaderboardView → Menu; the run is discarded
    pub fn return_to_menu(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing | GamePhase::GameOver | GamePhase::LeaderboardView => {
                self.run = None;
                self.phase = GamePhase::Menu;
                true
            }
            other => {
                log::debug!("Ignoring return to menu in {other:?}");
                false
            }
        }
    }

    /// GameOver → Playing with a fresh run on the same difficulty
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            log::debug!("Ignoring restart in {:?}", self.phase);
            return false;
        }
        match self.run.as_ref().map(|r| r.profile) {
            Some(profile) => {
                self.begin_run(profile);
                true
            }
            None => false,
        }
    }

    /// Menu → LeaderboardView
    pub fn view_leaderboard(&mut self) -> bool {
        if self.phase != GamePhase::Menu {
            log::debug!("Ignoring leaderboard request in {:?}", self.phase);
            return false;
        }
        self.phase = GamePhase::LeaderboardView;
        true
    }

    pub fn select_leaderboard_tab(&mut self, difficulty: Difficulty) {
        self.leaderboard_tab = difficulty;
    }

    /// Terminate from any phase
    pub fn quit(&mut self) {
        self.run = None;
        self.terminated = true;
    }

    fn begin_run(&mut self, profile: DifficultyProfile) {
        log::info!("Difficulty is: {}", profile.id);
        self.run = Some(Run::new(profile, &self.config.field));
        self.phase = GamePhase::Playing;
    }

    // --- Update ---

    /// Apply this tick's inputs, then advance the simulation by `dt_ms` if playing
    pub fn tick(&mut self, input: &TickInput, dt_ms: u32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.terminated {
            return events;
        }
        if input.quit {
            self.quit();
            events.push(GameEvent::Quit);
            return events;
        }

        match self.phase {
            GamePhase::Menu => {
                if let Some(requested) = &input.select_difficulty {
                    match self.start(requested) {
                        Ok(()) => {
                            if let Some(profile) = self.profile() {
                                events.push(GameEvent::Started {
                                    difficulty: profile.id,
                                });
                            }
                        }
                        Err(e) => {
                            log::warn!("{e}");
                            events.push(GameEvent::DifficultyRejected {
                                requested: requested.clone(),
                            });
                        }
                    }
                } else if input.view_leaderboard && self.view_leaderboard() {
                    events.push(GameEvent::LeaderboardOpened);
                }
                // A fresh run starts simulating next tick
                return events;
            }
            GamePhase::Playing => {
                if input.menu {
                    self.return_to_menu();
                    events.push(GameEvent::ReturnedToMenu);
                    return events;
                }
                if input.pause {
                    // The tick the toggle arrives on is still played
                    self.step(input, dt_ms, &mut events);
                    if self.toggle_pause() {
                        events.push(GameEvent::Paused);
                    }
                    return events;
                }
            }
            GamePhase::Paused => {
                if input.pause {
                    self.toggle_pause();
                    events.push(GameEvent::Resumed);
                }
                // The resuming tick doesn't simulate, so paused wall time never leaks in
                return events;
            }
            GamePhase::GameOver => {
                if input.restart && self.restart() {
                    if let Some(profile) = self.profile() {
                        events.push(GameEvent::Started {
                            difficulty: profile.id,
                        });
                    }
                } else if input.menu && self.return_to_menu() {
                    events.push(GameEvent::ReturnedToMenu);
                }
                return events;
            }
            GamePhase::LeaderboardView => {
                if let Some(tab) = input.leaderboard_tab {
                    self.select_leaderboard_tab(tab);
                }
                if input.menu && self.return_to_menu() {
                    events.push(GameEvent::ReturnedToMenu);
                }
                return events;
            }
        }

        self.step(input, dt_ms, &mut events);
        events
    }

    /// One simulation step; only called while playing
    fn step(&mut self, input: &TickInput, dt_ms: u32, events: &mut Vec<GameEvent>) {
        let field = self.config.field;
        let Some(run) = self.run.as_mut() else {
            return;
        };

        run.elapsed_ms += u64::from(dt_ms);

        // Fall, then drop everything that left the field
        for obstacle in &mut run.obstacles {
            obstacle.fall();
        }
        let before = run.obstacles.len();
        run.obstacles.retain(|o| !o.has_passed(&field));
        let passed = (before - run.obstacles.len()) as u32;

        let decision = run.scheduler.advance(dt_ms, passed, &run.profile);
        if decision.velocity_delta > 0.0 {
            for obstacle in &mut run.obstacles {
                obstacle.velocity += decision.velocity_delta;
            }
            events.push(GameEvent::Escalated {
                velocity_delta: decision.velocity_delta,
            });
        }
        if decision.spawn_batch {
            let half = OBSTACLE_WIDTH / 2.0;
            let max_x = (field.width - half).max(half);
            for _ in 0..SPAWN_BATCH_SIZE {
                let x = self.rng.random_range(half..=max_x);
                run.obstacles
                    .push(Obstacle::spawn_at(x, run.profile.obstacle_velocity));
            }
            events.push(GameEvent::BatchSpawned {
                count: SPAWN_BATCH_SIZE,
            });
        }

        if let Some(hit) = first_hit(&run.obstacles, &run.player) {
            run.obstacles.remove(hit);
            self.finish_run(events);
            return;
        }

        let mut dx = 0.0;
        if input.left {
            dx -= run.profile.player_velocity;
        }
        if input.right {
            dx += run.profile.player_velocity;
        }
        if dx != 0.0 {
            run.player.steer(dx, &field);
        }
    }

    /// Playing → GameOver: record the score and freeze the run
    fn finish_run(&mut self, events: &mut Vec<GameEvent>) {
        let Some(profile) = self.profile().copied() else {
            return;
        };
        let record = ScoreRecord::new(&self.config.player_name, self.score(), profile.id);
        log::info!(
            "{} lost on {} after {}s",
            record.player_name,
            record.difficulty,
            record.score
        );
        if let Err(e) = self.leaderboard.append(record.clone()) {
            log::warn!("Error updating leaderboard: {e}");
        }
        self.phase = GamePhase::GameOver;
        self.last_record = Some(record.clone());
        events.push(GameEvent::GameOver { record });
    }

    /// Add an obstacle to the live run behind the spawned ones.
    ///
    /// Lets a headless driver script a scene (tutorials, fixed test layouts)
    /// on top of the scheduler's batches. It is simulated like any other
    /// obstacle from the next tick on. Ignored when no run is active.
    pub fn push_obstacle(&mut self, obstacle: Obstacle) {
        if let Some(run) = self.run.as_mut() {
            run.obstacles.push(obstacle);
        }
    }
}
