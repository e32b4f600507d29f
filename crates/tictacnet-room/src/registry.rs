//! The live-room registry: creation, joiner handoff, and teardown.
//!
//! The registry is the only state shared between connection tasks. It is
//! an owned, injectable object — callers decide how to guard it (the
//! server keeps it behind a `tokio::sync::Mutex`), and tests can spin up
//! as many isolated registries as they like.

use std::collections::HashMap;

use tokio::sync::oneshot;

use crate::{RoomCode, RoomError, WordPool};

/// One live room, as matchmaking sees it.
///
/// The board and the participants live with the creator's task once the
/// game starts; the registry only tracks liveness, whether the room has
/// started, and the slot through which the joiner's connection travels.
struct RoomEntry<T> {
    started: bool,
    joiner_tx: Option<oneshot::Sender<T>>,
}

/// Registry of all live rooms, keyed by code.
///
/// Generic over the handoff payload `T` — in the server that is the
/// joiner's connection handle; tests pass whatever is convenient.
pub struct RoomRegistry<T> {
    pool: WordPool,
    rooms: HashMap<RoomCode, RoomEntry<T>>,
}

impl<T> RoomRegistry<T> {
    /// Creates an empty registry drawing codes from `pool`.
    pub fn new(pool: WordPool) -> Self {
        Self {
            pool,
            rooms: HashMap::new(),
        }
    }

    /// Total number of distinct drawable codes.
    pub fn code_space(&self) -> usize {
        self.pool.code_space()
    }

    /// Draws a code and inserts a waiting room.
    ///
    /// A draw that collides with a live room fails with
    /// [`RoomError::CodeTaken`] — no retry. Collisions are tolerated by
    /// abandonment rather than avoided; the caller explains the odds to
    /// the unlucky client and closes.
    ///
    /// On success, returns the code and the receiver half of the handoff
    /// slot; the creator's task awaits it (under its opponent-wait
    /// timeout) to obtain the joiner's connection.
    pub fn create_room(&mut self) -> Result<(RoomCode, oneshot::Receiver<T>), RoomError> {
        let code = RoomCode::draw(&self.pool, &mut rand::rng());
        if self.rooms.contains_key(code.as_str()) {
            tracing::warn!(%code, "drawn code collides with a live room");
            return Err(RoomError::CodeTaken(code));
        }

        let (joiner_tx, joiner_rx) = oneshot::channel();
        self.rooms.insert(
            code.clone(),
            RoomEntry {
                started: false,
                joiner_tx: Some(joiner_tx),
            },
        );
        tracing::info!(%code, rooms = self.rooms.len(), "room created");
        Ok((code, joiner_rx))
    }

    /// Binds a joiner to a waiting room.
    ///
    /// Fails with [`RoomError::NotFound`] for unknown codes and
    /// [`RoomError::AlreadyStarted`] once a joiner is bound. On success
    /// the room is marked started and the handoff sender is returned;
    /// the caller pushes the joiner's connection through it. If that
    /// send fails the creator's task is gone; the caller gets the
    /// connection back from the oneshot and should [`remove_room`] the
    /// corpse.
    ///
    /// [`remove_room`]: Self::remove_room
    pub fn attach_joiner(&mut self, code: &str) -> Result<oneshot::Sender<T>, RoomError> {
        let entry = self
            .rooms
            .get_mut(code)
            .ok_or_else(|| RoomError::NotFound(code.to_string()))?;

        if entry.started {
            return Err(RoomError::AlreadyStarted(code.to_string()));
        }

        entry.started = true;
        let joiner_tx = entry
            .joiner_tx
            .take()
            .ok_or_else(|| RoomError::AlreadyStarted(code.to_string()))?;

        tracing::info!(%code, "joiner attached, room started");
        Ok(joiner_tx)
    }

    /// Removes a room. Idempotent: removing an unknown code is a no-op.
    pub fn remove_room(&mut self, code: &str) {
        if self.rooms.remove(code).is_some() {
            tracing::info!(%code, rooms = self.rooms.len(), "room removed");
        }
    }

    /// Resolves the opponent-wait timeout against a concurrent join.
    ///
    /// Called under the registry lock when the creator's timer fires.
    /// Returns `true` if the room was still waiting: it is removed and
    /// the creator should announce the timeout. Returns `false` if a
    /// joiner won the race: the room stays, the handoff is already in
    /// flight, and the timer result must be ignored.
    pub fn abandon_if_waiting(&mut self, code: &str) -> bool {
        match self.rooms.get(code) {
            Some(entry) if entry.started => false,
            Some(_) => {
                self.rooms.remove(code);
                tracing::info!(%code, "room abandoned, nobody joined");
                true
            }
            // Already gone; nothing left to wait for.
            None => true,
        }
    }

    /// Whether a live room has this code.
    pub fn contains(&self, code: &str) -> bool {
        self.rooms.contains_key(code)
    }

    /// Number of live rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
