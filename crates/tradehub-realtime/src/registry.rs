//! Presence registry — maps each user to their live connection.

use std::sync::Arc;

use dashmap::DashMap;

use tradehub_core::types::UserId;

use crate::connection::handle::{ConnectionHandle, ConnectionId};

/// Concurrency-safe map from user to their currently-authoritative
/// connection.
///
/// Invariant: at most one entry per user. A newer registration for the same
/// user supersedes the old one (last-writer-wins), which models a user
/// reconnecting from a new tab or device. Entries are `Arc`s so lookups
/// clone the handle out of the shard lock and all channel pushes happen with
/// no lock held.
///
/// The registry never closes a channel. Handles are owned by the session
/// that created them; superseded and unregistered handles are simply dropped
/// from the map.
#[derive(Debug, Default)]
pub struct PresenceRegistry {
    /// User ID → live connection handle.
    entries: DashMap<UserId, Arc<ConnectionHandle>>,
}

impl PresenceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Insert or replace the entry for the handle's user.
    ///
    /// Returns the superseded handle if one was present so the caller can
    /// retire it. Never fails.
    pub fn register(&self, handle: Arc<ConnectionHandle>) -> Option<Arc<ConnectionHandle>> {
        self.entries.insert(handle.user_id, handle)
    }

    /// Remove the entry for `user_id` only if it still belongs to
    /// `connection_id`.
    ///
    /// A session that was already superseded by a newer registration finds a
    /// different connection id stored and leaves the map untouched, so a
    /// late disconnect can never evict a live entry. Returns whether an
    /// entry was removed.
    pub fn unregister(&self, user_id: UserId, connection_id: ConnectionId) -> bool {
        self.entries
            .remove_if(&user_id, |_, handle| handle.id == connection_id)
            .is_some()
    }

    /// Look up the live connection for a user, if any.
    pub fn lookup(&self, user_id: UserId) -> Option<Arc<ConnectionHandle>> {
        self.entries.get(&user_id).map(|entry| entry.value().clone())
    }

    /// Check whether a user currently has a live connection.
    pub fn is_online(&self, user_id: UserId) -> bool {
        self.entries.contains_key(&user_id)
    }

    /// Number of users currently connected.
    pub fn online_count(&self) -> usize {
        self.entries.len()
    }

    /// All currently-connected user IDs.
    pub fn online_users(&self) -> Vec<UserId> {
        self.entries.iter().map(|entry| *entry.key()).collect()
    }

    /// Drop every entry. Used during engine shutdown.
    pub fn clear(&self) {
        self.entries.clear();
    }
}
