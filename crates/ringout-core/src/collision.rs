use serde::{Deserialize, Serialize};

use crate::player::{Player, PlayerIndex};

/// A physics contact between two craft, reported once per struck body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// The body whose contact callback fired.
    pub struck: PlayerIndex,
    /// The other party to the contact.
    pub other: PlayerIndex,
}

impl Contact {
    pub fn new(struck: PlayerIndex, other: PlayerIndex) -> Self {
        Self { struck, other }
    }

    /// The same contact seen from the other body.
    pub fn mirrored(self) -> Self {
        Self {
            struck: self.other,
            other: self.struck,
        }
    }
}

/// Record who last touched whom. Self-contacts and indices outside the
/// roster are dropped. Returns whether attribution changed hands.
pub fn attribute_contact(players: &mut [Player], contact: Contact) -> bool {
    if contact.struck == contact.other || contact.other >= players.len() {
        tracing::debug!(?contact, "Ignored malformed contact");
        return false;
    }
    let Some(struck) = players.get_mut(contact.struck) else {
        tracing::debug!(?contact, "Ignored malformed contact");
        return false;
    };
    let changed = struck.last_touched_by != Some(contact.other);
    struck.last_touched_by = Some(contact.other);
    changed
}

/// Whether two craft circles overlap.
pub fn circles_overlap(ax: f32, ay: f32, bx: f32, by: f32, radius: f32) -> bool {
    let dx = ax - bx;
    let dy = ay - by;
    let reach = radius * 2.0;
    dx * dx + dy * dy < reach * reach
}
