use glam::Vec2;
use space_dodgers::consts::*;
use space_dodgers::sim::{
    Field, GameEvent, GamePhase, GameSession, Obstacle, SessionConfig, TickInput, autopilot_input,
};
use space_dodgers::{Difficulty, GameError, LeaderboardStore, MemoryStore, ScoreRecord};

fn session_with(field: Field, board: LeaderboardStore<MemoryStore>) -> GameSession<MemoryStore> {
    let config = SessionConfig {
        field,
        player_name: "Tester".to_string(),
        seed: Some(42),
    };
    GameSession::new(config, board)
}

fn empty_session() -> GameSession<MemoryStore> {
    session_with(Field::default(), LeaderboardStore::new(MemoryStore::new()))
}

fn pause() -> TickInput {
    TickInput {
        pause: true,
        ..Default::default()
    }
}

#[test]
fn test_best_scores_rank_per_difficulty() {
    let board = LeaderboardStore::new(MemoryStore::with_contents(
        "Ann, 10, Easy\nAnn, 20, Easy\nBob, 15, Easy\n",
    ));
    assert_eq!(
        board.top_n(Some(Difficulty::Easy), 10),
        vec![
            ScoreRecord::new("Ann", 20, Difficulty::Easy),
            ScoreRecord::new("Bob", 15, Difficulty::Easy),
        ]
    );
}

#[test]
fn test_missing_leaderboard_is_empty() {
    let board = LeaderboardStore::new(MemoryStore::new());
    assert!(board.top_n(None, 5).is_empty());

    let dir = tempfile::tempdir().unwrap();
    let board = LeaderboardStore::new(space_dodgers::FileStore::new(
        dir.path().join("leaderboard.txt"),
    ));
    assert!(board.top_n(None, 5).is_empty());
}

#[test]
fn test_paused_time_excluded_from_score() {
    let mut session = empty_session();
    session.start("Easy").unwrap();
    for _ in 0..10 {
        session.tick(&TickInput::default(), 100);
    }
    assert_eq!(session.elapsed_ms(), 1000);

    // The tick carrying the toggle is played before the pause takes hold
    assert_eq!(session.tick(&pause(), 16), vec![GameEvent::Paused]);
    assert_eq!(session.elapsed_ms(), 1016);
    // 2000ms of wall time while paused
    for _ in 0..125 {
        session.tick(&TickInput::default(), 16);
    }
    assert_eq!(session.tick(&pause(), 16), vec![GameEvent::Resumed]);
    assert_eq!(session.elapsed_ms(), 1016);

    session.tick(&TickInput::default(), 500);
    assert_eq!(session.elapsed_ms(), 1516);
    assert_eq!(session.score(), 2);
}

#[test]
fn test_unknown_difficulty_rejected() {
    let mut session = empty_session();
    assert_eq!(
        session.start("Nightmare"),
        Err(GameError::UnknownDifficulty {
            requested: "Nightmare".to_string()
        })
    );
    assert_eq!(session.phase(), GamePhase::Menu);
    assert!(session.profile().is_none());
}

#[test]
fn test_full_batch_passing_resets_counter() {
    let field = Field {
        width: 400.0,
        height: 100.0,
    };
    let mut session = session_with(field, LeaderboardStore::new(MemoryStore::new()));
    session.start("Hard").unwrap();
    let player_x = session.player().unwrap().pos.x;

    // A column of stars well clear of the ship
    for i in 0..SPAWN_BATCH_SIZE {
        session.push_obstacle(Obstacle::spawn_at(
            player_x - 150.0 + i as f32,
            Difficulty::Hard.profile().obstacle_velocity,
        ));
    }

    let mut escalations = 0;
    for _ in 0..30 {
        for event in session.tick(&TickInput::default(), 16) {
            if matches!(event, GameEvent::Escalated { .. }) {
                escalations += 1;
            }
        }
    }

    assert_eq!(session.phase(), GamePhase::Playing);
    assert!(session.obstacles().is_empty());
    assert_eq!(escalations, 1);
    assert_eq!(session.scheduler().unwrap().passed_since_escalation(), 0);
}

#[test]
fn test_escalation_raises_every_survivor_by_increment() {
    let mut session = empty_session();
    session.start("Expert").unwrap();
    let height = session.field().height;
    let increment = Difficulty::Expert.profile().velocity_increment;

    for i in 0..8 {
        session.push_obstacle(Obstacle::new(Vec2::new(20.0 + i as f32, height - 1.0), 7.0));
    }
    let survivors = [(30.0, 2.0), (60.0, 7.0), (90.0, 11.5)];
    for (x, v) in survivors {
        session.push_obstacle(Obstacle::new(Vec2::new(x, 0.0), v));
    }

    session.tick(&TickInput::default(), 16);
    let obstacles = session.obstacles();
    assert_eq!(obstacles.len(), survivors.len());
    for (obstacle, (_, v)) in obstacles.iter().zip(survivors) {
        assert!(obstacle.velocity > v);
        assert!((obstacle.velocity - (v + increment)).abs() < 1e-5);
    }
}

#[test]
fn test_bot_run_keeps_obstacles_at_or_above_base_speed() {
    let mut session = empty_session();
    session.start("Medium").unwrap();
    let base = Difficulty::Medium.profile().obstacle_velocity;

    let mut last_elapsed = 0;
    for _ in 0..2000 {
        let input = autopilot_input(&session);
        session.tick(&input, DEFAULT_TICK_MS);
        if session.phase() != GamePhase::Playing {
            break;
        }
        assert!(session.elapsed_ms() > last_elapsed);
        last_elapsed = session.elapsed_ms();
        for obstacle in session.obstacles() {
            assert!(obstacle.velocity >= base);
            assert!(obstacle.pos.y <= session.field().height);
        }
        let interval = session.scheduler().unwrap().spawn_interval_ms();
        assert!(interval >= MIN_SPAWN_INTERVAL_MS);
    }
}

#[test]
fn test_game_over_writes_leaderboard_and_restarts() {
    let mut session = empty_session();
    session.start("Hard").unwrap();
    for _ in 0..60 {
        session.tick(&TickInput::default(), 50);
    }
    // 3s survived, then drop a star on the ship
    while session.phase() == GamePhase::Playing {
        let pos = session.player().unwrap().pos;
        session.push_obstacle(Obstacle::new(pos, 1.0));
        session.tick(&TickInput::default(), 0);
    }

    assert_eq!(session.phase(), GamePhase::GameOver);
    let record = session.last_record().cloned().unwrap();
    assert_eq!(record.player_name, "Tester");
    assert_eq!(record.difficulty, Difficulty::Hard);
    assert_eq!(record.score, 3);
    assert_eq!(
        session.leaderboard().top_n(Some(Difficulty::Hard), 10),
        vec![record]
    );

    let restart = TickInput {
        restart: true,
        ..Default::default()
    };
    session.tick(&restart, 16);
    assert_eq!(session.phase(), GamePhase::Playing);
    assert_eq!(session.profile().unwrap().id, Difficulty::Hard);
    assert_eq!(session.elapsed_ms(), 0);
}
