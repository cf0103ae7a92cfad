//! Per-actor session state.
//!
//! Sessions live from connect to disconnect. Every accessor takes the lock
//! for the duration of one map operation and hands back owned copies, so no
//! caller holds the lock while it queries the world.
//!
//! Hosts that never call [`SessionStore::connect`] get sessions opened
//! lazily by the first write. Once any actor has connected, writes for an
//! actor without a session are dropped, so a hook racing a disconnect
//! cannot bring the actor's state back.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use lenient_core::{
    ActorId, BlockPos, DimensionId, GlobalPos, InventorySnapshot, ItemStack, SafePositionHistory,
};

use crate::error::{Result, poisoned};

/// A stack kept through death, waiting for the actor to respawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PreservedItemRecord {
    pub stack: ItemStack,
    /// Slot the stack was matched to in the death snapshot.
    pub original_slot: Option<usize>,
}

/// Everything the runtime remembers about one actor.
#[derive(Clone, Debug, Default)]
pub struct ActorSession {
    pub snapshot: Option<InventorySnapshot>,
    pub kept: Vec<PreservedItemRecord>,
    pub history: SafePositionHistory,
    /// Most recent recorded safe position.
    pub last_safe_pos: Option<GlobalPos>,
    pub pending_death_pos: Option<GlobalPos>,
}

/// Counts reported by [`SessionStore::stats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub sessions: usize,
    pub with_kept_items: usize,
    pub with_snapshot: usize,
    pub with_pending_death_pos: usize,
    pub with_history: usize,
}

/// Session store keyed by actor id.
pub struct SessionStore {
    sessions: RwLock<HashMap<ActorId, ActorSession>>,
    /// Set by the first [`connect`](Self::connect); disables lazy opening.
    explicit_connect: AtomicBool,
}

impl SessionStore {
    const NAME: &'static str = "session store";

    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            explicit_connect: AtomicBool::new(false),
        }
    }

    /// Opens a session. An existing one is left untouched.
    pub fn connect(&self, actor: ActorId) -> Result<()> {
        let mut sessions = self.sessions.write().map_err(poisoned(Self::NAME))?;
        self.explicit_connect.store(true, Ordering::Relaxed);
        sessions.entry(actor).or_default();
        Ok(())
    }

    /// Drops everything remembered about `actor`.
    pub fn disconnect(&self, actor: ActorId) -> Result<Option<ActorSession>> {
        let mut sessions = self.sessions.write().map_err(poisoned(Self::NAME))?;
        Ok(sessions.remove(&actor))
    }

    /// Moves the history of `old` onto `new` and closes `old`.
    ///
    /// `new` is opened if needed and keeps its own history when it already
    /// has one. Returns the last safe position of `old`.
    pub fn transfer(&self, old: ActorId, new: ActorId) -> Result<Option<GlobalPos>> {
        let mut sessions = self.sessions.write().map_err(poisoned(Self::NAME))?;
        let Some(previous) = sessions.remove(&old) else {
            return Ok(None);
        };
        let target = sessions.entry(new).or_default();
        if target.history.is_empty() {
            target.history = previous.history;
        }
        target.last_safe_pos = target.last_safe_pos.or(previous.last_safe_pos);
        Ok(previous.last_safe_pos)
    }

    /// Runs `f` on the actor's session, opening one lazily unless hosts
    /// connect explicitly. Returns `None` when the write was dropped.
    fn update<T>(
        &self,
        actor: ActorId,
        f: impl FnOnce(&mut ActorSession) -> T,
    ) -> Result<Option<T>> {
        let mut sessions = self.sessions.write().map_err(poisoned(Self::NAME))?;
        if self.explicit_connect.load(Ordering::Relaxed) {
            return Ok(sessions.get_mut(&actor).map(f));
        }
        Ok(Some(f(sessions.entry(actor).or_default())))
    }

    /// Runs `f` mutably on the actor's session if one exists.
    fn modify<T>(
        &self,
        actor: ActorId,
        f: impl FnOnce(&mut ActorSession) -> T,
    ) -> Result<Option<T>> {
        let mut sessions = self.sessions.write().map_err(poisoned(Self::NAME))?;
        Ok(sessions.get_mut(&actor).map(f))
    }

    /// Runs `f` on the actor's session if one exists.
    fn read<T>(&self, actor: ActorId, f: impl FnOnce(&ActorSession) -> T) -> Result<Option<T>> {
        let sessions = self.sessions.read().map_err(poisoned(Self::NAME))?;
        Ok(sessions.get(&actor).map(f))
    }

    /// Records a confirmed-safe standing position. Returns whether the
    /// history changed.
    pub fn record_safe_position(&self, actor: ActorId, pos: GlobalPos) -> Result<bool> {
        let changed = self.update(actor, |session| {
            session.last_safe_pos = Some(pos);
            session.history.record(pos)
        })?;
        Ok(changed.unwrap_or(false))
    }

    pub fn last_safe_position(&self, actor: ActorId) -> Result<Option<GlobalPos>> {
        Ok(self.read(actor, |session| session.last_safe_pos)?.flatten())
    }

    /// Safe point to store on drops: the history entry nearest `reference`
    /// in the same dimension, else the last recorded safe position.
    pub fn drop_safe_position(
        &self,
        actor: ActorId,
        dimension: DimensionId,
        reference: BlockPos,
    ) -> Result<Option<GlobalPos>> {
        let found = self.read(actor, |session| {
            session
                .history
                .best_match(dimension, reference)
                .map(|pos| GlobalPos::new(dimension, pos))
                .or(session.last_safe_pos)
        })?;
        Ok(found.flatten())
    }

    /// Copy of the actor's history for the resolver.
    pub fn history(&self, actor: ActorId) -> Result<Option<SafePositionHistory>> {
        self.read(actor, |session| session.history.clone())
    }

    pub fn store_snapshot(&self, actor: ActorId, snapshot: InventorySnapshot) -> Result<()> {
        self.update(actor, |session| session.snapshot = Some(snapshot))?;
        Ok(())
    }

    pub fn take_snapshot(&self, actor: ActorId) -> Result<Option<InventorySnapshot>> {
        Ok(self.modify(actor, |session| session.snapshot.take())?.flatten())
    }

    pub fn stash_death_position(&self, actor: ActorId, pos: GlobalPos) -> Result<()> {
        self.update(actor, |session| session.pending_death_pos = Some(pos))?;
        Ok(())
    }

    pub fn take_death_position(&self, actor: ActorId) -> Result<Option<GlobalPos>> {
        Ok(self
            .modify(actor, |session| session.pending_death_pos.take())?
            .flatten())
    }

    /// Replaces the kept items of the actor's latest death.
    pub fn store_kept(&self, actor: ActorId, kept: Vec<PreservedItemRecord>) -> Result<()> {
        self.update(actor, |session| session.kept = kept)?;
        Ok(())
    }

    pub fn take_kept(&self, actor: ActorId) -> Result<Vec<PreservedItemRecord>> {
        Ok(self
            .modify(actor, |session| std::mem::take(&mut session.kept))?
            .unwrap_or_default())
    }

    pub fn contains(&self, actor: ActorId) -> Result<bool> {
        Ok(self.read(actor, |_| ())?.is_some())
    }

    pub fn stats(&self) -> Result<SessionStats> {
        let sessions = self.sessions.read().map_err(poisoned(Self::NAME))?;
        let count = |pred: fn(&ActorSession) -> bool| sessions.values().filter(|s| pred(s)).count();
        Ok(SessionStats {
            sessions: sessions.len(),
            with_kept_items: count(|s| !s.kept.is_empty()),
            with_snapshot: count(|s| s.snapshot.is_some()),
            with_pending_death_pos: count(|s| s.pending_death_pos.is_some()),
            with_history: count(|s| !s.history.is_empty()),
        })
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
