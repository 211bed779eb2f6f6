//! Background solver thread.
//!
//! The worker watches the session's spawn counter. Each time a new piece
//! appears it copies the session state out under the lock, searches without
//! holding it, and publishes the result. In robot mode it then walks the
//! piece to the chosen placement and hard-drops it, provided the session has
//! not moved on in the meantime.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::utils::Backoff;
use parking_lot::Mutex;
use tetrad_core::{Movement, Rotation};
use tetrad_engine::Session;
use tetrad_search::{LockPosition, SearchConfig, SearchEngine, SearchError, SearchInput, SearchResult};

use crate::driver::preview_len;

pub type SharedSession = Arc<Mutex<Session>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Actuator {
    /// Play the chosen placement on the session.
    Robot,
    /// Only publish; a human or caller applies the movements.
    Hints,
}

/// A search result tagged with the spawn counter it answers.
#[derive(Clone, Debug)]
pub struct Published {
    pub generation: u64,
    pub result: Arc<SearchResult>,
    pub movements: Vec<Movement>,
}

#[derive(Default)]
struct Latest {
    published: Option<Published>,
    /// Generation whose movements were already handed out.
    handed_out: Option<u64>,
}

#[derive(Default)]
struct Shared {
    stop: Arc<AtomicBool>,
    latest: Mutex<Latest>,
    searches: AtomicU64,
}

pub struct SolverWorker {
    shared: Arc<Shared>,
    handle: Option<JoinHandle<()>>,
}

impl SolverWorker {
    pub fn spawn(
        session: SharedSession,
        config: SearchConfig,
        actuator: Actuator,
    ) -> std::io::Result<Self> {
        let shared = Arc::new(Shared::default());
        let engine = SearchEngine::new(config).with_cancel_flag(Arc::clone(&shared.stop));

        let handle = thread::Builder::new().name("tetrad-solver".into()).spawn({
            let shared = Arc::clone(&shared);
            move || run(&session, &engine, actuator, &shared)
        })?;

        Ok(Self {
            shared,
            handle: Some(handle),
        })
    }

    /// Movements answering piece `generation`, handed out once.
    ///
    /// Empty when the newest result belongs to another piece or was already taken.
    pub fn current_best_movements(&self, generation: u64) -> Vec<Movement> {
        let mut latest = self.shared.latest.lock();
        let Latest { published, handed_out } = &mut *latest;
        match published {
            Some(p) if p.generation == generation && *handed_out != Some(generation) => {
                *handed_out = Some(generation);
                p.movements.clone()
            }
            _ => Vec::new(),
        }
    }

    /// Lock-table entry of the newest result.
    pub fn lock_position(&self, row: usize, column: usize, rotation: Rotation) -> Option<LockPosition> {
        self.shared
            .latest
            .lock()
            .published
            .as_ref()
            .and_then(|p| p.result.lock_position(row, column, rotation).copied())
    }

    pub fn latest(&self) -> Option<Published> {
        self.shared.latest.lock().published.clone()
    }

    /// Searches completed so far.
    pub fn searches(&self) -> u64 {
        self.shared.searches.load(Ordering::Acquire)
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel any in-flight search and wait for the thread to exit.
    pub fn stop(&mut self) {
        self.shared.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("solver thread panicked");
            }
        }
    }
}

impl Drop for SolverWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run(session: &SharedSession, engine: &SearchEngine, actuator: Actuator, shared: &Shared) {
    let preview = preview_len(engine.config());
    let backoff = Backoff::new();
    let mut last_generation = None;

    while !shared.stop.load(Ordering::Acquire) {
        let input = {
            let mut session = session.lock();
            if session.is_game_over() {
                log::info!("solver idle: game over");
                break;
            }
            if last_generation == Some(session.spawn_counter()) {
                None
            } else {
                Some(SearchInput::from(session.snapshot(preview)))
            }
        };

        let Some(input) = input else {
            if backoff.is_completed() {
                thread::sleep(Duration::from_millis(1));
            } else {
                backoff.snooze();
            }
            continue;
        };
        backoff.reset();
        last_generation = Some(input.generation);

        let result = match engine.search(&input) {
            Ok(result) => Arc::new(result),
            Err(SearchError::Cancelled) => break,
            Err(err) => {
                log::warn!("no move for piece {}: {err}", input.generation);
                continue;
            }
        };
        shared.searches.fetch_add(1, Ordering::AcqRel);
        let movements = result.movements();
        shared.latest.lock().published = Some(Published {
            generation: input.generation,
            result: Arc::clone(&result),
            movements: movements.clone(),
        });

        if actuator == Actuator::Robot {
            act(session, &input, &movements);
        }
    }
}

/// Replay the best movements and lock the piece, unless the session has moved on.
fn act(session: &SharedSession, input: &SearchInput, movements: &[Movement]) {
    let mut session = session.lock();
    if session.spawn_counter() != input.generation || *session.falling() != input.current {
        log::debug!("piece {} moved before the solver acted", input.generation);
        return;
    }
    for &movement in movements {
        if let Err(err) = session.apply(movement) {
            log::warn!("replay aborted: {err}");
            return;
        }
    }
    match session.hard_drop() {
        Ok(report) if report.topped_out => log::info!("topped out, score {}", session.score()),
        Ok(_) => {}
        Err(err) => log::warn!("lock failed: {err}"),
    }
}
