use serde::{Deserialize, Serialize};

use crate::player::{Player, PlayerColor, PlayerIndex};

/// One row of the final results, ordered by score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub place: u32,
    pub player: PlayerIndex,
    pub name: String,
    pub score: u32,
}

/// Build standings sorted by score (descending), ties broken by roster order.
/// Tied scores share a place.
pub fn standings(players: &[Player]) -> Vec<Standing> {
    let mut order: Vec<&Player> = players.iter().collect();
    order.sort_by(|a, b| b.score.cmp(&a.score).then(a.index().cmp(&b.index())));

    let mut rows: Vec<Standing> = Vec::with_capacity(order.len());
    for (i, p) in order.iter().enumerate() {
        let place = match rows.last() {
            Some(prev) if prev.score == p.score => prev.place,
            _ => i as u32 + 1,
        };
        rows.push(Standing {
            place,
            player: p.index(),
            name: p.name.clone(),
            score: p.score,
        });
    }
    rows
}

/// Presentation sink for score changes. The match notifies it; it never feeds
/// anything back.
pub trait Scoreboard {
    fn add_player(&mut self, name: &str, color: PlayerColor);

    /// The player at `index` just scored a round.
    fn update_score(&mut self, index: PlayerIndex);

    fn show_results(&mut self, _standings: &[Standing]) {}
}

/// A scoreboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub color: PlayerColor,
    pub score: u32,
}

/// In-memory scoreboard that mirrors the match tally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreTable {
    entries: Vec<ScoreEntry>,
    final_results: Option<Vec<Standing>>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn score_of(&self, index: PlayerIndex) -> Option<u32> {
        self.entries.get(index).map(|e| e.score)
    }

    pub fn final_results(&self) -> Option<&[Standing]> {
        self.final_results.as_deref()
    }

    /// Text rows in the same layout a between-rounds screen uses.
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| format!("{} ({}) - {} pts", e.name, e.color.to_hex(), e.score))
            .collect()
    }
}

impl Scoreboard for ScoreTable {
    fn add_player(&mut self, name: &str, color: PlayerColor) {
        self.entries.push(ScoreEntry {
            name: name.to_string(),
            color,
            score: 0,
        });
    }

    fn update_score(&mut self, index: PlayerIndex) {
        match self.entries.get_mut(index) {
            Some(entry) => entry.score += 1,
            None => tracing::debug!(index, "Score update for unknown scoreboard row"),
        }
    }

    fn show_results(&mut self, standings: &[Standing]) {
        self.final_results = Some(standings.to_vec());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(scores: &[u32]) -> Vec<Player> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                let mut p = Player::new(i, format!("P{i}"), PlayerColor::for_index(i));
                p.score = s;
                p
            })
            .collect()
    }

    #[test]
    fn standings_sorted_by_score_then_index() {
        let rows = standings(&scored(&[1, 3, 0, 3]));
        let order: Vec<PlayerIndex> = rows.iter().map(|r| r.player).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
        let places: Vec<u32> = rows.iter().map(|r| r.place).collect();
        assert_eq!(places, vec![1, 1, 3, 4], "Ties share a place");
    }

    #[test]
    fn standings_empty_roster() {
        assert!(standings(&[]).is_empty());
    }

    #[test]
    fn score_table_tracks_updates() {
        let mut table = ScoreTable::new();
        table.add_player("Tome", PlayerColor::for_index(0));
        table.add_player("Dirda", PlayerColor::for_index(1));

        table.update_score(1);
        table.update_score(1);
        table.update_score(7); // ignored

        assert_eq!(table.score_of(0), Some(0));
        assert_eq!(table.score_of(1), Some(2));
        assert_eq!(table.score_of(7), None);
        assert_eq!(table.lines()[1], "Dirda (#F0000F) - 2 pts");
    }

    #[test]
    fn show_results_stores_final_standings() {
        let mut table = ScoreTable::new();
        assert!(table.final_results().is_none());
        let rows = standings(&scored(&[2, 1]));
        table.show_results(&rows);
        assert_eq!(table.final_results(), Some(rows.as_slice()));
    }
}
