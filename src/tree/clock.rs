//! Modification time assignment for incoming records.
//!
//! Records that carry a real timestamp keep it. Records without one (most
//! notably deletions) need a synthetic tick so that they still order after
//! whatever the tree already knows about the path.

use super::update::Update;

/// Decides the modification time stored for an incoming record.
///
/// Only consulted for records that actually change the tree, never for
/// no-op re-applications.
pub trait ClockPolicy {
    fn resolve(&mut self, current: Option<&Update>, incoming: &Update) -> u64;
}

/// Ticks each (path, side) independently, one past its previous record.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerPathClock;

impl ClockPolicy for PerPathClock {
    fn resolve(&mut self, current: Option<&Update>, incoming: &Update) -> u64 {
        match (incoming.mod_time(), current) {
            (0, Some(current)) => current.mod_time().saturating_add(1),
            (explicit, _) => explicit,
        }
    }
}

/// One counter shared by every path, so synthetic ticks are totally
/// ordered across the whole tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalClock {
    last: u64,
}

impl GlobalClock {
    pub fn last(&self) -> u64 {
        self.last
    }
}

impl ClockPolicy for GlobalClock {
    fn resolve(&mut self, current: Option<&Update>, incoming: &Update) -> u64 {
        match (incoming.mod_time(), current) {
            (0, Some(current)) => {
                self.last = self.last.max(current.mod_time()).saturating_add(1);
                self.last
            }
            (explicit, _) => {
                self.last = self.last.max(explicit);
                explicit
            }
        }
    }
}
