use serde::{Deserialize, Serialize};

/// Position of a player in the match roster. Assigned once when the roster is
/// built and never reused within a match.
pub type PlayerIndex = usize;

/// Craft color shown on the scoreboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for PlayerColor {
    fn default() -> Self {
        Self::PALETTE[0]
    }
}

impl PlayerColor {
    /// Colors handed out in roster order.
    pub const PALETTE: &[PlayerColor] = &[
        PlayerColor {
            r: 0xF0,
            g: 0x0F,
            b: 0x00,
        }, // Vermilion
        PlayerColor {
            r: 0xF0,
            g: 0x00,
            b: 0x0F,
        }, // Crimson
        PlayerColor {
            r: 0xFF,
            g: 0x0F,
            b: 0x0F,
        }, // Red
        PlayerColor {
            r: 0xFF,
            g: 0xF0,
            b: 0x00,
        }, // Yellow
        PlayerColor {
            r: 0xFF,
            g: 0x00,
            b: 0xF0,
        }, // Magenta
        PlayerColor {
            r: 0xFF,
            g: 0x00,
            b: 0xFF,
        }, // Fuchsia
    ];

    /// Palette color for a roster slot, wrapping around for large rosters.
    pub fn for_index(index: PlayerIndex) -> Self {
        Self::PALETTE[index % Self::PALETTE.len()]
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Kinematic state of a craft. The physics host owns integration and writes
/// these fields; gameplay code only reads them or applies velocity deltas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Heading in degrees.
    pub angle: f32,
}

impl Body {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    pub fn set_zero_velocity(&mut self) {
        self.vx = 0.0;
        self.vy = 0.0;
    }
}

/// A craft taking part in the match.
///
/// Players live for the whole match: elimination only flips `alive`, and the
/// next round revives the same entity in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    index: PlayerIndex,
    pub name: String,
    pub color: PlayerColor,
    alive: bool,
    locked: bool,
    /// Set when the craft was eliminated by leaving the arena this round.
    pub fell_off_arena: bool,
    pub body: Body,
    pub start_x: f32,
    pub start_y: f32,
    /// Last player whose body made contact with this one.
    pub last_touched_by: Option<PlayerIndex>,
    pub score: u32,
}

impl Player {
    /// New players start alive but locked, waiting for the first countdown.
    pub fn new(index: PlayerIndex, name: impl Into<String>, color: PlayerColor) -> Self {
        Self {
            index,
            name: name.into(),
            color,
            alive: true,
            locked: true,
            fell_off_arena: false,
            body: Body::default(),
            start_x: 0.0,
            start_y: 0.0,
            last_touched_by: None,
            score: 0,
        }
    }

    pub fn index(&self) -> PlayerIndex {
        self.index
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Eliminate the player. Returns `true` only for a genuine alive to
    /// eliminated transition, so callers can emit exactly one notification.
    pub fn kill(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        true
    }

    /// Bring an eliminated player back for the next round. Revived players are
    /// always locked until the countdown releases them.
    pub fn revive(&mut self) {
        self.alive = true;
        self.locked = true;
        self.fell_off_arena = false;
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Whether control input should be translated into motion this tick.
    pub fn accepts_input(&self) -> bool {
        self.alive && !self.locked
    }

    /// Record a new start position and move the body onto it at rest.
    pub fn place_at(&mut self, x: f32, y: f32) {
        self.start_x = x;
        self.start_y = y;
        self.body.x = x;
        self.body.y = y;
        self.body.set_zero_velocity();
    }

    pub fn clear_attribution(&mut self) {
        self.last_touched_by = None;
    }
}
