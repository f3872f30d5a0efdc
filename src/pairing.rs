//! Round pairings
//!
//! Round one follows the seeded bracket recorded on the sheet. Every later
//! round is a Swiss pairing on the standings after the previous rounds: the
//! field is sorted by cumulative score, then cumulative solved count, then
//! username, and paired off in consecutive twos.

use crate::model::{Competitor, Match, RoundPairing, Unpaired, UnpairedReason};
use std::cmp::Reverse;

/// Pair every round in order
///
/// `competitors` must be in sheet order; round one walks them in that order.
/// Rounds are computed in sequence because round N ranks on rounds before N.
pub fn pair_rounds(rounds: &[&str], competitors: &[Competitor]) -> Vec<RoundPairing> {
    rounds
        .iter()
        .enumerate()
        .map(|(index, round)| {
            let pairing = if index == 0 {
                pair_seeded(round, competitors)
            } else {
                pair_swiss(round, &rounds[..index], competitors)
            };
            if !pairing.unpaired.is_empty() {
                log::warn!(
                    "{}: {} competitor(s) without a match",
                    round,
                    pairing.unpaired.len()
                );
            }
            log::debug!("{}: {} matches", round, pairing.matches.len());
            pairing
        })
        .collect()
}

/// Round one: each competitor meets its recorded seed opponent
pub fn pair_seeded(round: &str, competitors: &[Competitor]) -> RoundPairing {
    let mut paired = vec![false; competitors.len()];
    let mut matches = Vec::new();

    for (i, competitor) in competitors.iter().enumerate() {
        if paired[i] {
            continue;
        }
        let Some(j) = seed_opponent_index(competitors, i) else {
            continue;
        };
        if j == i || paired[j] {
            continue;
        }

        let opponent = &competitors[j];
        matches.push(Match::new(
            &competitor.username,
            &opponent.username,
            competitor.score(round),
            opponent.score(round),
        ));
        paired[i] = true;
        paired[j] = true;
    }

    let unpaired = competitors
        .iter()
        .enumerate()
        .filter(|(i, _)| !paired[*i])
        .map(|(i, c)| Unpaired {
            username: c.username.clone(),
            reason: match (&c.seed_opponent, seed_opponent_index(competitors, i)) {
                (None, _) => UnpairedReason::NoSeedOpponent,
                (Some(_), None) => UnpairedReason::UnknownOpponent,
                (Some(_), Some(_)) => UnpairedReason::OpponentUnavailable,
            },
        })
        .collect();

    RoundPairing {
        round: round.to_string(),
        matches,
        unpaired,
    }
}

/// First competitor whose username is the seed opponent of competitor `i`
fn seed_opponent_index(competitors: &[Competitor], i: usize) -> Option<usize> {
    let wanted = competitors[i].seed_opponent.as_deref()?;
    competitors.iter().position(|c| c.username == wanted)
}

/// Order of the field entering a Swiss round, given the rounds already played
pub fn swiss_order<'a>(previous_rounds: &[&str], competitors: &'a [Competitor]) -> Vec<&'a Competitor> {
    let mut standings: Vec<(i64, i64, &Competitor)> = competitors
        .iter()
        .map(|c| {
            let (score, solved) = c.cumulative(previous_rounds.iter().copied());
            (score, solved, c)
        })
        .collect();

    standings.sort_by(|a, b| {
        (Reverse(a.0), Reverse(a.1), &a.2.username).cmp(&(Reverse(b.0), Reverse(b.1), &b.2.username))
    });

    standings.into_iter().map(|(_, _, c)| c).collect()
}

/// Later rounds: consecutive pairs of the Swiss order
pub fn pair_swiss(round: &str, previous_rounds: &[&str], competitors: &[Competitor]) -> RoundPairing {
    let order = swiss_order(previous_rounds, competitors);

    let matches = order
        .chunks_exact(2)
        .map(|pair| {
            let (left, right) = (pair[0], pair[1]);
            Match::new(&left.username, &right.username, left.score(round), right.score(round))
        })
        .collect();

    let unpaired = order
        .chunks_exact(2)
        .remainder()
        .iter()
        .map(|c| Unpaired {
            username: c.username.clone(),
            reason: UnpairedReason::OddCount,
        })
        .collect();

    RoundPairing {
        round: round.to_string(),
        matches,
        unpaired,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WinnerSide;

    const R1: &str = "Round 1";
    const R2: &str = "Round 2";
    const R3: &str = "Round 3";

    fn player(name: &str, seed: Option<&str>, rounds: &[(i64, i64)]) -> Competitor {
        let mut c = Competitor::new(name);
        for (i, (score, solved)) in rounds.iter().enumerate() {
            c.set_round(&format!("Round {}", i + 1), *score, *solved);
        }
        match seed {
            Some(opponent) => c.with_seed_opponent(opponent),
            None => c,
        }
    }

    fn pairs(pairing: &RoundPairing) -> Vec<(&str, &str)> {
        pairing
            .matches
            .iter()
            .map(|m| (m.left.as_str(), m.right.as_str()))
            .collect()
    }

    fn sample() -> Vec<Competitor> {
        vec![
            player("Alice", Some("Bob"), &[(10, 2), (8, 1)]),
            player("Bob", Some("Alice"), &[(7, 1), (8, 1)]),
            player("Carol", Some("Dave"), &[(9, 2), (9, 2)]),
            player("Dave", Some("Carol"), &[(9, 2), (5, 1)]),
        ]
    }

    #[test]
    fn test_sample_tournament() {
        let rounds = pair_rounds(&[R1, R2], &sample());
        assert_eq!(rounds.len(), 2);

        assert_eq!(pairs(&rounds[0]), vec![("Alice", "Bob"), ("Carol", "Dave")]);
        assert_eq!(rounds[0].matches[0].left_score, 10);
        assert_eq!(rounds[0].matches[0].right_score, 7);
        assert_eq!(rounds[0].matches[0].winner, WinnerSide::Left);
        assert_eq!(rounds[0].matches[1].winner, WinnerSide::Draw);

        assert_eq!(pairs(&rounds[1]), vec![("Alice", "Carol"), ("Dave", "Bob")]);
        // Round two uses round two scores, not cumulative ones
        assert_eq!(rounds[1].matches[0].left_score, 8);
        assert_eq!(rounds[1].matches[0].right_score, 9);
        assert_eq!(rounds[1].matches[0].winner, WinnerSide::Right);
        assert_eq!(rounds[1].matches[1].winner, WinnerSide::Right);
        assert!(rounds[1].unpaired.is_empty());
    }

    #[test]
    fn test_seeded_pairs_are_symmetric() {
        let field = vec![
            player("A", Some("B"), &[(1, 0)]),
            player("B", Some("C"), &[(1, 0)]),
            player("C", Some("A"), &[(1, 0)]),
            player("D", Some("C"), &[(1, 0)]),
        ];
        let pairing = pair_seeded(R1, &field);
        // B's and C's own picks are moot once they are paired by A and D
        assert_eq!(pairs(&pairing), vec![("A", "B"), ("D", "C")]);
        assert!(pairing.unpaired.is_empty());
    }

    #[test]
    fn test_seeded_no_competitor_twice() {
        let field = vec![
            player("A", Some("B"), &[(1, 0)]),
            player("B", Some("A"), &[(1, 0)]),
            player("C", Some("B"), &[(1, 0)]),
            player("D", Some("A"), &[(1, 0)]),
        ];
        let pairing = pair_seeded(R1, &field);
        assert_eq!(pairs(&pairing), vec![("A", "B")]);
        for name in ["A", "B", "C", "D"] {
            let count = pairing.matches.iter().filter(|m| m.involves(name)).count();
            assert!(count <= 1, "{} appears {} times", name, count);
        }
    }

    #[test]
    fn test_seeded_pairing_found_from_opponent_side() {
        // A names nobody, but B names A; B's turn pairs them
        let field = vec![
            player("A", None, &[(3, 0)]),
            player("B", Some("A"), &[(4, 0)]),
        ];
        let pairing = pair_seeded(R1, &field);
        assert_eq!(pairs(&pairing), vec![("B", "A")]);
        assert!(pairing.unpaired.is_empty());
    }

    #[test]
    fn test_seeded_unpaired_reasons() {
        let field = vec![
            player("A", None, &[(1, 0)]),
            player("B", Some("Nobody"), &[(1, 0)]),
            player("C", Some("C"), &[(1, 0)]),
        ];
        let pairing = pair_seeded(R1, &field);
        assert!(pairing.is_empty());
        let reasons: Vec<UnpairedReason> = pairing.unpaired.iter().map(|u| u.reason).collect();
        assert_eq!(
            reasons,
            vec![
                UnpairedReason::NoSeedOpponent,
                UnpairedReason::UnknownOpponent,
                UnpairedReason::OpponentUnavailable,
            ]
        );
    }

    #[test]
    fn test_swiss_ties_broken_by_username() {
        let field = vec![
            player("Zoe", None, &[(5, 1), (0, 0)]),
            player("Max", None, &[(5, 1), (0, 0)]),
            player("Ann", None, &[(5, 1), (0, 0)]),
            player("Bea", None, &[(5, 1), (0, 0)]),
        ];
        let order: Vec<&str> = swiss_order(&[R1], &field)
            .iter()
            .map(|c| c.username.as_str())
            .collect();
        assert_eq!(order, vec!["Ann", "Bea", "Max", "Zoe"]);
    }

    #[test]
    fn test_swiss_solved_breaks_score_ties() {
        let field = vec![
            player("A", None, &[(5, 1), (0, 0)]),
            player("B", None, &[(5, 3), (0, 0)]),
            player("C", None, &[(6, 0), (0, 0)]),
            player("D", None, &[(1, 9), (0, 0)]),
        ];
        let pairing = pair_swiss(R2, &[R1], &field);
        assert_eq!(pairs(&pairing), vec![("C", "B"), ("A", "D")]);
    }

    #[test]
    fn test_swiss_odd_field_leaves_last_out() {
        let field = vec![
            player("A", None, &[(3, 0), (1, 0)]),
            player("B", None, &[(2, 0), (1, 0)]),
            player("C", None, &[(1, 0), (1, 0)]),
        ];
        let pairing = pair_swiss(R2, &[R1], &field);
        assert_eq!(pairs(&pairing), vec![("A", "B")]);
        assert_eq!(
            pairing.unpaired,
            vec![Unpaired { username: "C".into(), reason: UnpairedReason::OddCount }]
        );
    }

    #[test]
    fn test_swiss_ignores_current_round_scores() {
        let field = sample();
        let before = pair_swiss(R2, &[R1], &field);

        let mut shuffled = field.clone();
        let scores: Vec<i64> = field.iter().map(|c| c.score(R2)).rev().collect();
        for (c, score) in shuffled.iter_mut().zip(scores) {
            c.set_round(R2, score, 0);
        }
        let after = pair_swiss(R2, &[R1], &shuffled);
        assert_eq!(pairs(&before), pairs(&after));
    }

    #[test]
    fn test_third_round_uses_both_previous_rounds() {
        let field = vec![
            player("A", None, &[(1, 0), (1, 0), (0, 0)]),
            player("B", None, &[(9, 0), (0, 0), (0, 0)]),
            player("C", None, &[(4, 0), (4, 0), (0, 0)]),
            player("D", None, &[(0, 0), (2, 0), (0, 0)]),
        ];
        let pairing = pair_swiss(R3, &[R1, R2], &field);
        assert_eq!(pairs(&pairing), vec![("B", "C"), ("A", "D")]);
    }

    #[test]
    fn test_no_rounds_no_pairings() {
        assert!(pair_rounds(&[], &sample()).is_empty());
        let empty = pair_rounds(&[R1, R2], &[]);
        assert!(empty.iter().all(|r| r.matches.is_empty() && r.unpaired.is_empty()));
    }
}
