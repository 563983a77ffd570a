//! NFL playoff pairing rules:
//! 1. Wild Card round: #2 vs #7, #3 vs #6, #4 vs #5 (better seed hosts)
//! 2. Divisional round: the #1 seed comes off its bye against the lowest
//!    surviving seed; the other two winners play each other
//! 3. Conference Championship: divisional winners, better seed hosts
//! 4. Super Bowl: AFC champion vs NFC champion
//!
//! Everything here is a pure function over participants. Winner fields are
//! only ever touched through `Matchup::set_participants`, which is where the
//! keep-or-clear decision for an existing winner lives.

use crate::bracket::teams::{self, SeededTeam};
use crate::bracket::types::{Bracket, ConferenceBracket, Matchup, RoundLocks, now_millis};
use nfl_api::{Conference, PlayoffRound};
use uuid::Uuid;

/// A computed (home, away) pair for a derived matchup. Either slot may be
/// unknown while upstream games are undecided.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pairing {
    pub home: Option<SeededTeam>,
    pub away: Option<SeededTeam>,
}

pub const SUPER_BOWL_ID: &str = "super-bowl";

fn matchup_id(conference: Conference, infix: &str, game_number: u8) -> String {
    format!("{}-{infix}-{game_number}", conference.label())
}

/// The three fixed wild-card pairings for a conference: 2v7, 3v6, 4v5, with
/// the numerically lower seed at home.
pub fn wild_card_matchups(conference: Conference) -> Vec<Matchup> {
    [(2u8, 7u8), (3, 6), (4, 5)]
        .into_iter()
        .enumerate()
        .map(|(idx, (home_seed, away_seed))| Matchup {
            id: matchup_id(conference, "wc", idx as u8 + 1),
            round: PlayoffRound::WildCard,
            conference: Some(conference),
            game_number: idx as u8 + 1,
            home: teams::seeded_team(conference, home_seed),
            away: teams::seeded_team(conference, away_seed),
            winner: None,
        })
        .collect()
}

/// Initial divisional slots: the bye team is pre-filled and waits for the
/// lowest surviving seed; the second game starts fully unknown.
pub fn divisional_matchups(conference: Conference) -> Vec<Matchup> {
    let mut matchups: Vec<Matchup> = (1..=2u8)
        .map(|game_number| Matchup {
            id: matchup_id(conference, "div", game_number),
            round: PlayoffRound::Divisional,
            conference: Some(conference),
            game_number,
            home: None,
            away: None,
            winner: None,
        })
        .collect();
    matchups[0].home = Some(teams::bye_team(conference));
    matchups
}

pub fn championship_matchup(conference: Conference) -> Matchup {
    Matchup {
        id: format!("{}-champ", conference.label()),
        round: PlayoffRound::Championship,
        conference: Some(conference),
        game_number: 1,
        home: None,
        away: None,
        winner: None,
    }
}

pub fn super_bowl_matchup() -> Matchup {
    Matchup {
        id: SUPER_BOWL_ID.to_owned(),
        round: PlayoffRound::SuperBowl,
        conference: None,
        game_number: 1,
        home: None,
        away: None,
        winner: None,
    }
}

/// Divisional pairings from the wild-card winners.
///
/// Matchups can only be fully determined once ALL three wild-card games are
/// decided: the #1 seed plays the lowest surviving seed, which a partial set
/// of winners cannot identify — the missing game could still change who that
/// is. Until then the bye team is shown with an open opponent slot and the
/// second game stays fully open; we never guess.
pub fn divisional_pairings(
    conference: Conference,
    wild_card_winners: &[Option<SeededTeam>],
) -> [Pairing; 2] {
    let bye = teams::bye_team(conference);
    let winners: Vec<SeededTeam> = wild_card_winners.iter().flatten().cloned().collect();

    if winners.len() < 3 {
        return [
            Pairing {
                home: Some(bye),
                away: None,
            },
            Pairing::default(),
        ];
    }

    // Highest seed number = lowest surviving seed — plays the bye team.
    // Seeds are unique 1–7 per conference, so the sort is deterministic.
    let mut sorted = winners;
    sorted.sort_by_key(|t| std::cmp::Reverse(t.seed));
    let mut it = sorted.into_iter();
    let lowest = it.next();
    let middle = it.next();
    let best = it.next();

    [
        Pairing {
            home: Some(bye),
            away: lowest,
        },
        Pairing {
            home: best,
            away: middle,
        },
    ]
}

/// Championship pairing from the divisional winners: better seed hosts. A
/// lone known winner passes through as home; the open slot is never guessed.
pub fn championship_pairing(divisional_winners: &[Option<SeededTeam>]) -> Pairing {
    let mut winners: Vec<SeededTeam> = divisional_winners.iter().flatten().cloned().collect();
    winners.sort_by_key(|t| t.seed);
    let mut it = winners.into_iter();
    Pairing {
        home: it.next(),
        away: it.next(),
    }
}

/// Super Bowl pairing: the AFC champion always takes the home slot, the NFC
/// champion the away slot. The assignment is fixed for the bracket's
/// lifetime and does not depend on seeds.
pub fn super_bowl_pairing(
    afc_champion: Option<SeededTeam>,
    nfc_champion: Option<SeededTeam>,
) -> Pairing {
    Pairing {
        home: afc_champion,
        away: nfc_champion,
    }
}

fn conference_bracket(conference: Conference) -> ConferenceBracket {
    ConferenceBracket {
        wild_card: wild_card_matchups(conference),
        divisional: divisional_matchups(conference),
        championship: championship_matchup(conference),
    }
}

/// Factory for a fresh bracket: wild-card games seeded from the registry,
/// downstream rounds open, all locks off, no cached live results.
pub fn create_bracket(owner_name: &str) -> Bracket {
    let now = now_millis();
    Bracket {
        id: Uuid::new_v4().to_string(),
        name: String::new(),
        subtitle: None,
        owner_name: owner_name.to_owned(),
        afc: conference_bracket(Conference::Afc),
        nfc: conference_bracket(Conference::Nfc),
        super_bowl: super_bowl_matchup(),
        locked_rounds: RoundLocks::default(),
        live_results: None,
        is_complete: false,
        created_at: now,
        updated_at: now,
    }
}

/// True iff every matchup in both conference brackets and the Super Bowl has
/// a winner.
pub fn bracket_complete(bracket: &Bracket) -> bool {
    bracket.matchups().iter().all(|m| m.winner.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(conference: Conference, seed: u8) -> SeededTeam {
        teams::seeded_team(conference, seed).expect("seed is in the registry")
    }

    #[test]
    fn wild_card_pairings_are_fixed_by_seed() {
        for conference in Conference::ALL {
            let matchups = wild_card_matchups(conference);
            assert_eq!(matchups.len(), 3);
            let pairs: Vec<(u8, u8)> = matchups
                .iter()
                .map(|m| {
                    (
                        m.home.as_ref().expect("home seeded").seed,
                        m.away.as_ref().expect("away seeded").seed,
                    )
                })
                .collect();
            assert_eq!(pairs, vec![(2, 7), (3, 6), (4, 5)]);
            assert!(matchups.iter().all(|m| m.winner.is_none()));
        }
    }

    #[test]
    fn divisional_is_undetermined_until_all_three_winners_known() {
        let winners = vec![
            Some(seeded(Conference::Afc, 2)),
            None,
            Some(seeded(Conference::Afc, 5)),
        ];
        let [first, second] = divisional_pairings(Conference::Afc, &winners);
        assert_eq!(first.home.as_ref().map(|t| t.seed), Some(1));
        assert!(first.away.is_none(), "bye opponent must not be guessed");
        assert!(second.home.is_none());
        assert!(second.away.is_none());
    }

    #[test]
    fn lowest_surviving_seed_visits_the_bye_team() {
        // All three underdogs win: surviving seeds 7, 6, 5.
        let winners = vec![
            Some(seeded(Conference::Afc, 7)),
            Some(seeded(Conference::Afc, 6)),
            Some(seeded(Conference::Afc, 5)),
        ];
        let [first, second] = divisional_pairings(Conference::Afc, &winners);
        assert_eq!(first.home.as_ref().map(|t| t.seed), Some(1));
        assert_eq!(first.away.as_ref().map(|t| t.seed), Some(7));
        assert_eq!(second.home.as_ref().map(|t| t.seed), Some(5));
        assert_eq!(second.away.as_ref().map(|t| t.seed), Some(6));
    }

    #[test]
    fn chalk_results_pair_two_and_three() {
        let winners = vec![
            Some(seeded(Conference::Nfc, 2)),
            Some(seeded(Conference::Nfc, 3)),
            Some(seeded(Conference::Nfc, 4)),
        ];
        let [first, second] = divisional_pairings(Conference::Nfc, &winners);
        assert_eq!(first.away.as_ref().map(|t| t.seed), Some(4));
        assert_eq!(second.home.as_ref().map(|t| t.seed), Some(2));
        assert_eq!(second.away.as_ref().map(|t| t.seed), Some(3));
    }

    #[test]
    fn championship_seats_better_seed_at_home() {
        let pairing = championship_pairing(&[
            Some(seeded(Conference::Afc, 6)),
            Some(seeded(Conference::Afc, 1)),
        ]);
        assert_eq!(pairing.home.as_ref().map(|t| t.seed), Some(1));
        assert_eq!(pairing.away.as_ref().map(|t| t.seed), Some(6));
    }

    #[test]
    fn lone_championship_qualifier_passes_through_as_home() {
        let pairing = championship_pairing(&[Some(seeded(Conference::Afc, 3)), None]);
        assert_eq!(pairing.home.as_ref().map(|t| t.seed), Some(3));
        assert!(pairing.away.is_none());

        let empty = championship_pairing(&[None, None]);
        assert!(empty.home.is_none() && empty.away.is_none());
    }

    #[test]
    fn super_bowl_slots_are_fixed_per_conference() {
        let pairing = super_bowl_pairing(
            Some(seeded(Conference::Afc, 7)),
            Some(seeded(Conference::Nfc, 1)),
        );
        // Slot assignment ignores seeds: AFC home, NFC away.
        assert_eq!(pairing.home.as_ref().map(|t| t.id().to_owned()), Some("LAC".to_owned()));
        assert_eq!(pairing.away.as_ref().map(|t| t.id().to_owned()), Some("SEA".to_owned()));
    }

    #[test]
    fn fresh_bracket_has_thirteen_open_matchups() {
        let bracket = create_bracket("Alice");
        assert_eq!(bracket.owner_name, "Alice");
        assert_eq!(bracket.matchups().len(), 13);
        assert!(!bracket.is_complete);
        assert!(!bracket_complete(&bracket));

        // Downstream rounds carry no participants apart from the bye teams.
        for conference in Conference::ALL {
            let cb = bracket.conference(conference);
            assert_eq!(cb.divisional[0].home.as_ref().map(|t| t.seed), Some(1));
            assert!(cb.divisional[0].away.is_none());
            assert!(cb.divisional[1].home.is_none());
            assert!(cb.championship.home.is_none());
        }
        assert!(bracket.super_bowl.home.is_none());
        assert!(bracket.super_bowl.away.is_none());
    }
}
