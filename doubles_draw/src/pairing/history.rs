//! Partnership and opposition counts over the match history.

use crate::tournament::{Match, PlayerIndex, Team};

/// Repetition cost of a pairing, compared lexicographically: any number of
/// repeated opponents is cheaper than a single repeated partnership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct RepeatCost {
    pub partners: u32,
    pub opponents: u32,
}

impl RepeatCost {
    pub const ZERO: RepeatCost = RepeatCost {
        partners: 0,
        opponents: 0,
    };
}

/// How often every two players were partners and opponents so far.
#[derive(Debug, Clone)]
pub struct History {
    partners: Vec<Vec<u32>>,
    opponents: Vec<Vec<u32>>,
}

impl History {
    pub fn from_matches(player_count: usize, matches: &[Match]) -> Self {
        let mut history = Self {
            partners: vec![vec![0; player_count]; player_count],
            opponents: vec![vec![0; player_count]; player_count],
        };
        for m in matches {
            history.record(m);
        }
        history
    }

    fn in_range(&self, m: &Match) -> bool {
        m.players().iter().all(|&p| p < self.partners.len())
    }

    fn record(&mut self, m: &Match) {
        if !self.in_range(m) {
            return;
        }
        for team in [m.team1, m.team2] {
            self.partners[team[0]][team[1]] += 1;
            self.partners[team[1]][team[0]] += 1;
        }
        for a in m.team1 {
            for b in m.team2 {
                self.opponents[a][b] += 1;
                self.opponents[b][a] += 1;
            }
        }
    }

    pub fn partner_count(&self, a: PlayerIndex, b: PlayerIndex) -> u32 {
        self.partners[a][b]
    }

    pub fn opponent_count(&self, a: PlayerIndex, b: PlayerIndex) -> u32 {
        self.opponents[a][b]
    }

    /// Sum of previous meetings across the net between two teams.
    pub fn team_opponent_cost(&self, a: Team, b: Team) -> u32 {
        a.iter()
            .flat_map(|&x| b.iter().map(move |&y| (x, y)))
            .map(|(x, y)| self.opponents[x][y])
            .sum()
    }

    /// Repetition cost of a whole round.
    pub fn round_cost(&self, round: &[Match]) -> RepeatCost {
        round.iter().fold(RepeatCost::ZERO, |cost, m| RepeatCost {
            partners: cost.partners
                + self.partner_count(m.team1[0], m.team1[1])
                + self.partner_count(m.team2[0], m.team2[1]),
            opponents: cost.opponents + self.team_opponent_cost(m.team1, m.team2),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_are_symmetric() {
        let history = History::from_matches(
            4,
            &[Match::new([0, 1], [2, 3]), Match::new([0, 2], [1, 3])],
        );
        assert_eq!(history.partner_count(0, 1), 1);
        assert_eq!(history.partner_count(1, 0), 1);
        assert_eq!(history.partner_count(0, 3), 0);
        assert_eq!(history.opponent_count(0, 3), 2);
        assert_eq!(history.opponent_count(3, 0), 2);
        assert_eq!(history.opponent_count(0, 1), 1);
    }

    #[test]
    fn test_partner_repeat_outweighs_opponents() {
        let repeat_partner = RepeatCost {
            partners: 1,
            opponents: 0,
        };
        let many_opponents = RepeatCost {
            partners: 0,
            opponents: 12,
        };
        assert!(many_opponents < repeat_partner);
    }

    #[test]
    fn test_round_cost() {
        let history = History::from_matches(4, &[Match::new([0, 1], [2, 3])]);
        let same = history.round_cost(&[Match::new([0, 1], [2, 3])]);
        assert_eq!(
            same,
            RepeatCost {
                partners: 2,
                opponents: 4
            }
        );
        let fresh = history.round_cost(&[Match::new([0, 2], [1, 3])]);
        assert_eq!(
            fresh,
            RepeatCost {
                partners: 0,
                opponents: 2
            }
        );
    }
}
