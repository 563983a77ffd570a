//! The bracket progression engine.
//!
//! A single reducer: one `Bracket` value and one event in, a new consistent
//! `Bracket` out. After any winner change, every downstream round is
//! recomputed through the pairing rules, which clear winners that no longer
//! match their participants. Locked rounds are reconciled against the cached
//! live-results snapshot so factual outcomes propagate exactly like manual
//! picks do.

use crate::bracket::rules;
use crate::bracket::teams::{self, SeededTeam};
use crate::bracket::types::{Bracket, Matchup};
use log::debug;
use nfl_api::{Conference, LiveMatchupResult, LiveResults, PlayoffRound};

/// Events accepted by the engine. A closed set: every variant has defined
/// behavior, including ids that do not resolve (no-op).
#[derive(Debug, Clone)]
pub enum BracketEvent {
    SelectWinner {
        matchup_id: String,
        winner: SeededTeam,
    },
    ClearWinner {
        matchup_id: String,
    },
    Reset,
    Load {
        bracket: Box<Bracket>,
    },
    SetName {
        name: String,
    },
    SetOwnerName {
        owner_name: String,
    },
    SetSubtitle {
        subtitle: Option<String>,
    },
    ToggleRoundLock {
        round: PlayoffRound,
    },
    SetLiveResults {
        results: LiveResults,
    },
    ApplyLiveResults,
}

/// Tagged location of a matchup within the aggregate. Lookups resolve to a
/// location once, and the downstream cascade becomes an ordered dispatch on
/// it instead of repeated id searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Location {
    WildCard(Conference, usize),
    Divisional(Conference, usize),
    Championship(Conference),
    SuperBowl,
}

fn locate(bracket: &Bracket, matchup_id: &str) -> Option<Location> {
    if matchup_id == rules::SUPER_BOWL_ID {
        return Some(Location::SuperBowl);
    }
    for conference in Conference::ALL {
        let cb = bracket.conference(conference);
        if let Some(idx) = cb.wild_card.iter().position(|m| m.id == matchup_id) {
            return Some(Location::WildCard(conference, idx));
        }
        if let Some(idx) = cb.divisional.iter().position(|m| m.id == matchup_id) {
            return Some(Location::Divisional(conference, idx));
        }
        if cb.championship.id == matchup_id {
            return Some(Location::Championship(conference));
        }
    }
    None
}

/// The engine entry point. Every event produces a complete, consistent
/// aggregate before the next one is accepted; there are no partial states.
pub fn transition(bracket: Bracket, event: BracketEvent) -> Bracket {
    match event {
        BracketEvent::SelectWinner { matchup_id, winner } => {
            set_winner(bracket, &matchup_id, Some(winner))
        }
        BracketEvent::ClearWinner { matchup_id } => set_winner(bracket, &matchup_id, None),
        BracketEvent::Reset => rules::create_bracket(&bracket.owner_name),
        // Externally supplied snapshot, assumed valid — replaced verbatim so
        // a load immediately read back is deep-equal.
        BracketEvent::Load { bracket } => *bracket,
        BracketEvent::SetName { name } => {
            let mut bracket = bracket;
            bracket.name = name;
            bracket.touch();
            bracket
        }
        BracketEvent::SetOwnerName { owner_name } => {
            let mut bracket = bracket;
            bracket.owner_name = owner_name;
            bracket.touch();
            bracket
        }
        BracketEvent::SetSubtitle { subtitle } => {
            let mut bracket = bracket;
            bracket.subtitle = subtitle;
            bracket.touch();
            bracket
        }
        BracketEvent::ToggleRoundLock { round } => {
            let mut bracket = bracket;
            bracket.locked_rounds.toggle(round);
            bracket.touch();
            // Locking means "trust the facts for this round from now on".
            // Unlocking never mutates winners.
            if bracket.locked_rounds.is_locked(round) {
                bracket = apply_live_results(bracket);
            }
            bracket
        }
        BracketEvent::SetLiveResults { results } => {
            let mut bracket = bracket;
            bracket.live_results = Some(results);
            bracket.touch();
            bracket
        }
        // Reconciliation alone does not bump updated_at: a run that changes
        // nothing returns a value deep-equal to its input.
        BracketEvent::ApplyLiveResults => apply_live_results(bracket),
    }
}

/// Shared select/clear path: write the winner slot, then re-derive every
/// round downstream of the change.
fn set_winner(mut bracket: Bracket, matchup_id: &str, winner: Option<SeededTeam>) -> Bracket {
    let Some(location) = locate(&bracket, matchup_id) else {
        // Downstream matchup ids appear progressively, so callers cannot
        // know which ids currently resolve. Unknown ids are no-ops.
        debug!("ignoring winner change for unknown matchup {matchup_id}");
        return bracket;
    };

    match location {
        Location::WildCard(conference, idx) => {
            bracket.conference_mut(conference).wild_card[idx].winner = winner;
        }
        Location::Divisional(conference, idx) => {
            bracket.conference_mut(conference).divisional[idx].winner = winner;
        }
        Location::Championship(conference) => {
            bracket.conference_mut(conference).championship.winner = winner;
        }
        Location::SuperBowl => bracket.super_bowl.winner = winner,
    }

    cascade_from(&mut bracket, location);
    bracket.is_complete = rules::bracket_complete(&bracket);
    bracket.touch();
    bracket
}

/// Recompute every round downstream of the changed location, in bracket
/// order. Each recompute runs the pairing rules and the winner-preservation
/// check.
fn cascade_from(bracket: &mut Bracket, location: Location) {
    match location {
        Location::WildCard(conference, _) => {
            recompute_divisional(bracket, conference);
            recompute_championship(bracket, conference);
            recompute_super_bowl(bracket);
        }
        Location::Divisional(conference, _) => {
            recompute_championship(bracket, conference);
            recompute_super_bowl(bracket);
        }
        Location::Championship(_) => recompute_super_bowl(bracket),
        Location::SuperBowl => {}
    }
}

fn recompute_divisional(bracket: &mut Bracket, conference: Conference) {
    let winners = bracket.conference(conference).wild_card_winners();
    let [first, second] = rules::divisional_pairings(conference, &winners);
    let divisional = &mut bracket.conference_mut(conference).divisional;
    divisional[0].set_participants(first.home, first.away);
    divisional[1].set_participants(second.home, second.away);
}

fn recompute_championship(bracket: &mut Bracket, conference: Conference) {
    let winners = bracket.conference(conference).divisional_winners();
    let pairing = rules::championship_pairing(&winners);
    bracket
        .conference_mut(conference)
        .championship
        .set_participants(pairing.home, pairing.away);
}

fn recompute_super_bowl(bracket: &mut Bracket) {
    let pairing = rules::super_bowl_pairing(
        bracket.afc.championship.winner.clone(),
        bracket.nfc.championship.winner.clone(),
    );
    bracket.super_bowl.set_participants(pairing.home, pairing.away);
}

/// Reconcile locked rounds against the cached snapshot.
///
/// Per locked round, in round order: overwrite each matchup's winner from
/// the matching complete result, then re-derive the rounds downstream so the
/// facts flow forward exactly like manual picks. Absent, unmatched or
/// unfinished results leave existing picks untouched — the bracket stays
/// usable on an empty or partial feed.
fn apply_live_results(mut bracket: Bracket) -> Bracket {
    let Some(results) = bracket.live_results.clone() else {
        return bracket;
    };

    if bracket.locked_rounds.wild_card {
        for conference in Conference::ALL {
            overwrite_round(
                &mut bracket.conference_mut(conference).wild_card,
                &results.conference(conference).wild_card,
            );
        }
        for conference in Conference::ALL {
            recompute_divisional(&mut bracket, conference);
            recompute_championship(&mut bracket, conference);
        }
        recompute_super_bowl(&mut bracket);
    }

    if bracket.locked_rounds.divisional {
        for conference in Conference::ALL {
            overwrite_round(
                &mut bracket.conference_mut(conference).divisional,
                &results.conference(conference).divisional,
            );
        }
        for conference in Conference::ALL {
            recompute_championship(&mut bracket, conference);
        }
        recompute_super_bowl(&mut bracket);
    }

    if bracket.locked_rounds.championship {
        for conference in Conference::ALL {
            if let Some(result) = &results.conference(conference).championship {
                overwrite_round(
                    std::slice::from_mut(&mut bracket.conference_mut(conference).championship),
                    std::slice::from_ref(result),
                );
            }
        }
        recompute_super_bowl(&mut bracket);
    }

    if bracket.locked_rounds.super_bowl
        && let Some(result) = &results.super_bowl
    {
        overwrite_round(
            std::slice::from_mut(&mut bracket.super_bowl),
            std::slice::from_ref(result),
        );
    }

    bracket.is_complete = rules::bracket_complete(&bracket);
    bracket
}

/// Overwrite winners in one round from matching complete results. Results
/// are matched by unordered team pair and must resolve through the team
/// registry; anything else is "no information", never an error.
fn overwrite_round(matchups: &mut [Matchup], results: &[LiveMatchupResult]) {
    for matchup in matchups {
        let (Some(home), Some(away)) = (&matchup.home, &matchup.away) else {
            continue;
        };
        let Some(result) = results.iter().find(|r| r.involves_pair(home.id(), away.id())) else {
            continue;
        };
        let Some(winner_id) = result.decided_winner() else {
            continue;
        };
        match teams::team_by_id(winner_id) {
            Some(winner) => matchup.winner = Some(winner),
            None => debug!("live winner {winner_id} not in the playoff field, skipping"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn seeded(conference: Conference, seed: u8) -> SeededTeam {
        teams::seeded_team(conference, seed).expect("seed is in the registry")
    }

    fn select(bracket: Bracket, matchup_id: &str, winner: SeededTeam) -> Bracket {
        transition(
            bracket,
            BracketEvent::SelectWinner {
                matchup_id: matchup_id.to_owned(),
                winner,
            },
        )
    }

    /// AFC wild card decided as seeds 2, 6, 5 advancing.
    fn afc_wild_card_done(bracket: Bracket) -> Bracket {
        let bracket = select(bracket, "AFC-wc-1", seeded(Conference::Afc, 2));
        let bracket = select(bracket, "AFC-wc-2", seeded(Conference::Afc, 6));
        select(bracket, "AFC-wc-3", seeded(Conference::Afc, 5))
    }

    fn completed_result(home: &str, away: &str, winner: &str) -> LiveMatchupResult {
        LiveMatchupResult {
            home_team_id: home.to_owned(),
            away_team_id: away.to_owned(),
            home_score: Some(27),
            away_score: Some(20),
            winner_id: Some(winner.to_owned()),
            completed: true,
            ..Default::default()
        }
    }

    #[test]
    fn upset_sweep_reseeds_divisional_round() {
        // All three AFC underdogs win: survivors are seeds 7, 6, 5.
        let bracket = rules::create_bracket("Alice");
        let bracket = select(bracket, "AFC-wc-1", seeded(Conference::Afc, 7));
        let bracket = select(bracket, "AFC-wc-2", seeded(Conference::Afc, 6));
        let bracket = select(bracket, "AFC-wc-3", seeded(Conference::Afc, 5));

        let divisional = &bracket.afc.divisional;
        assert_eq!(divisional[0].home.as_ref().map(|t| t.seed), Some(1));
        assert_eq!(divisional[0].away.as_ref().map(|t| t.seed), Some(7));
        assert_eq!(divisional[1].home.as_ref().map(|t| t.seed), Some(5));
        assert_eq!(divisional[1].away.as_ref().map(|t| t.seed), Some(6));

        // The NFC side is untouched by AFC picks.
        assert!(bracket.nfc.divisional[0].away.is_none());
    }

    #[test]
    fn divisional_stays_open_until_last_wild_card_game() {
        let bracket = rules::create_bracket("Alice");
        let bracket = select(bracket, "AFC-wc-1", seeded(Conference::Afc, 2));
        let bracket = select(bracket, "AFC-wc-2", seeded(Conference::Afc, 3));

        let divisional = &bracket.afc.divisional;
        assert_eq!(divisional[0].home.as_ref().map(|t| t.seed), Some(1));
        assert!(divisional[0].away.is_none());
        assert!(divisional[1].home.is_none() && divisional[1].away.is_none());
    }

    #[test]
    fn clearing_a_wild_card_pick_reverts_the_divisional_round() {
        // Winners 2, 6, 5 → divisional is {1 v 6} and {2 v 5}. Pick the
        // visiting seed 6 in the bye game and seed 2 in the other.
        let bracket = afc_wild_card_done(rules::create_bracket("Alice"));
        let bracket = select(bracket, "AFC-div-1", seeded(Conference::Afc, 6));
        let bracket = select(bracket, "AFC-div-2", seeded(Conference::Afc, 2));

        let bracket = transition(
            bracket,
            BracketEvent::ClearWinner {
                matchup_id: "AFC-wc-3".to_owned(),
            },
        );

        let divisional = &bracket.afc.divisional;
        assert_eq!(divisional[0].home.as_ref().map(|t| t.seed), Some(1));
        assert!(divisional[0].away.is_none());
        assert!(divisional[1].home.is_none() && divisional[1].away.is_none());
        assert!(
            divisional[0].winner.is_none(),
            "seed 6 lost its slot when the pairing reverted, so its win is cleared"
        );
        assert!(
            divisional[1].winner.is_none(),
            "a winner cannot survive a fully dissolved pairing"
        );
    }

    #[test]
    fn bye_game_winner_survives_a_wild_card_revert() {
        // The bye team keeps its divisional home slot even while the round
        // is undetermined, so a recorded seed-1 win is retained.
        let bracket = afc_wild_card_done(rules::create_bracket("Alice"));
        let bracket = select(bracket, "AFC-div-1", seeded(Conference::Afc, 1));

        let bracket = transition(
            bracket,
            BracketEvent::ClearWinner {
                matchup_id: "AFC-wc-3".to_owned(),
            },
        );

        let divisional = &bracket.afc.divisional;
        assert_eq!(divisional[0].home.as_ref().map(|t| t.seed), Some(1));
        assert!(divisional[0].away.is_none());
        assert_eq!(
            divisional[0].winner.as_ref().map(|t| t.seed),
            Some(1),
            "seed 1 still occupies the home slot, so its win is retained"
        );
    }

    #[test]
    fn changing_an_upstream_pick_clears_only_dependent_winners() {
        // Winners 2, 6, 5 → divisional is {1 v 6} and {2 v 5}.
        let bracket = afc_wild_card_done(rules::create_bracket("Alice"));
        let bracket = select(bracket, "AFC-div-1", seeded(Conference::Afc, 1));
        let bracket = select(bracket, "AFC-div-2", seeded(Conference::Afc, 2));
        let bracket = select(bracket, "AFC-champ", seeded(Conference::Afc, 2));

        // Flip game 3 from seed 5 to seed 4: survivors 2, 6, 4 → divisional
        // becomes {1 v 6} (unchanged pair) and {2 v 4}.
        let bracket = select(bracket, "AFC-wc-3", seeded(Conference::Afc, 4));

        let divisional = &bracket.afc.divisional;
        assert_eq!(
            divisional[0].winner.as_ref().map(|t| t.seed),
            Some(1),
            "winner of an unchanged pairing survives"
        );
        assert_eq!(
            divisional[1].winner.as_ref().map(|t| t.seed),
            Some(2),
            "seed 2 still participates, so its win survives"
        );
        assert_eq!(
            bracket.afc.championship.winner.as_ref().map(|t| t.seed),
            Some(2),
            "championship pairing {1 v 2} is unchanged"
        );

        // Now flip game 1 away from seed 2: everything built on 2 collapses.
        let bracket = select(bracket, "AFC-wc-1", seeded(Conference::Afc, 7));
        assert!(bracket.afc.divisional[1].winner.is_none());
        assert!(bracket.afc.championship.winner.is_none());
        assert_eq!(
            bracket.afc.divisional[0].winner.as_ref().map(|t| t.seed),
            Some(1),
            "seed 1 still participates in the re-paired bye game, so its win survives"
        );
    }

    #[test]
    fn super_bowl_derives_from_both_champions() {
        let bracket = afc_wild_card_done(rules::create_bracket("Alice"));
        let bracket = select(bracket, "AFC-div-1", seeded(Conference::Afc, 1));
        let bracket = select(bracket, "AFC-div-2", seeded(Conference::Afc, 5));
        let bracket = select(bracket, "AFC-champ", seeded(Conference::Afc, 5));

        let bracket = select(bracket, "NFC-wc-1", seeded(Conference::Nfc, 2));
        let bracket = select(bracket, "NFC-wc-2", seeded(Conference::Nfc, 3));
        let bracket = select(bracket, "NFC-wc-3", seeded(Conference::Nfc, 4));
        let bracket = select(bracket, "NFC-div-1", seeded(Conference::Nfc, 1));
        let bracket = select(bracket, "NFC-div-2", seeded(Conference::Nfc, 2));
        let bracket = select(bracket, "NFC-champ", seeded(Conference::Nfc, 1));

        // AFC champion is home regardless of seed (5 vs 1 here).
        assert_eq!(bracket.super_bowl.home.as_ref().map(|t| t.seed), Some(5));
        assert_eq!(
            bracket.super_bowl.home.as_ref().map(|t| t.team.conference),
            Some(Conference::Afc)
        );
        assert_eq!(bracket.super_bowl.away.as_ref().map(|t| t.seed), Some(1));

        assert!(!bracket.is_complete);
        let bracket = select(bracket, "super-bowl", seeded(Conference::Afc, 5));
        assert!(bracket.is_complete, "all 13 matchups decided");
    }

    #[test]
    fn unknown_matchup_id_is_a_noop() {
        let bracket = rules::create_bracket("Alice");
        let before = bracket.clone();
        let after = select(bracket, "AFC-wc-9", seeded(Conference::Afc, 2));
        assert_eq!(before, after);
    }

    #[test]
    fn load_replaces_the_aggregate_verbatim() {
        let current = rules::create_bracket("Alice");
        let snapshot = afc_wild_card_done(rules::create_bracket("Bob"));
        let loaded = transition(
            current,
            BracketEvent::Load {
                bracket: Box::new(snapshot.clone()),
            },
        );
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn reset_keeps_the_owner_and_drops_everything_else() {
        let bracket = afc_wild_card_done(rules::create_bracket("Alice"));
        let bracket = transition(
            bracket,
            BracketEvent::ToggleRoundLock {
                round: PlayoffRound::WildCard,
            },
        );
        let bracket = transition(bracket, BracketEvent::Reset);
        assert_eq!(bracket.owner_name, "Alice");
        assert!(bracket.matchups().iter().all(|m| m.winner.is_none()));
        assert!(!bracket.locked_rounds.wild_card);
        assert!(bracket.live_results.is_none());
    }

    #[test]
    fn metadata_events_bump_updated_at() {
        let mut bracket = rules::create_bracket("Alice");
        bracket.updated_at = 0;
        let bracket = transition(
            bracket,
            BracketEvent::SetName {
                name: "Road to the Bowl".to_owned(),
            },
        );
        assert_eq!(bracket.name, "Road to the Bowl");
        assert!(bracket.updated_at > 0);

        let mut bracket = bracket;
        bracket.updated_at = 0;
        let bracket = transition(
            bracket,
            BracketEvent::SetSubtitle {
                subtitle: Some("office pool".to_owned()),
            },
        );
        assert_eq!(bracket.subtitle.as_deref(), Some("office pool"));
        assert!(bracket.updated_at > 0);
    }

    #[test]
    fn locking_a_round_applies_cached_results() {
        let bracket = rules::create_bracket("Alice");
        // User picked the Patriots; the feed says the Chargers won.
        let bracket = select(bracket, "AFC-wc-1", seeded(Conference::Afc, 2));

        let mut results = LiveResults::empty(Utc::now());
        results.afc.wild_card.push(completed_result("NE", "LAC", "LAC"));
        let bracket = transition(bracket, BracketEvent::SetLiveResults { results });

        // Setting results alone changes no picks.
        assert_eq!(
            bracket.afc.wild_card[0].winner.as_ref().map(|t| t.id().to_owned()),
            Some("NE".to_owned())
        );

        let bracket = transition(
            bracket,
            BracketEvent::ToggleRoundLock {
                round: PlayoffRound::WildCard,
            },
        );
        assert!(bracket.locked_rounds.wild_card);
        assert_eq!(
            bracket.afc.wild_card[0].winner.as_ref().map(|t| t.id().to_owned()),
            Some("LAC".to_owned()),
            "fact overrides the manual pick once the round is locked"
        );
    }

    #[test]
    fn locked_facts_flow_into_downstream_participants() {
        let bracket = rules::create_bracket("Alice");
        let mut results = LiveResults::empty(Utc::now());
        // Feed reports the away sides of games 1 and 3 winning and the home
        // side of game 2, with home/away flipped relative to the bracket.
        results.afc.wild_card.push(completed_result("LAC", "NE", "LAC"));
        results.afc.wild_card.push(completed_result("JAX", "BUF", "JAX"));
        results.afc.wild_card.push(completed_result("HOU", "PIT", "HOU"));
        let bracket = transition(bracket, BracketEvent::SetLiveResults { results });
        let bracket = transition(
            bracket,
            BracketEvent::ToggleRoundLock {
                round: PlayoffRound::WildCard,
            },
        );

        // Survivors: 7 (LAC), 3 (JAX), 5 (HOU) → bye hosts 7, 3 hosts 5.
        let divisional = &bracket.afc.divisional;
        assert_eq!(divisional[0].away.as_ref().map(|t| t.id().to_owned()), Some("LAC".to_owned()));
        assert_eq!(divisional[1].home.as_ref().map(|t| t.id().to_owned()), Some("JAX".to_owned()));
        assert_eq!(divisional[1].away.as_ref().map(|t| t.id().to_owned()), Some("HOU".to_owned()));
    }

    #[test]
    fn incomplete_or_unmatched_results_leave_picks_alone() {
        let bracket = rules::create_bracket("Alice");
        let bracket = select(bracket, "AFC-wc-2", seeded(Conference::Afc, 3));

        let mut results = LiveResults::empty(Utc::now());
        // In progress: no winner yet.
        results.afc.wild_card.push(LiveMatchupResult {
            home_team_id: "JAX".to_owned(),
            away_team_id: "BUF".to_owned(),
            home_score: Some(14),
            away_score: Some(10),
            in_progress: true,
            ..Default::default()
        });
        // Complete but for a pairing not present in the bracket.
        results.afc.wild_card.push(completed_result("KC", "BAL", "KC"));
        let bracket = transition(bracket, BracketEvent::SetLiveResults { results });
        let bracket = transition(
            bracket,
            BracketEvent::ToggleRoundLock {
                round: PlayoffRound::WildCard,
            },
        );

        assert_eq!(
            bracket.afc.wild_card[1].winner.as_ref().map(|t| t.id().to_owned()),
            Some("JAX".to_owned()),
            "manual pick survives absent facts"
        );
    }

    #[test]
    fn apply_live_results_is_idempotent() {
        let bracket = afc_wild_card_done(rules::create_bracket("Alice"));
        let bracket = transition(
            bracket,
            BracketEvent::SetLiveResults {
                results: LiveResults::empty(Utc::now()),
            },
        );
        let bracket = transition(
            bracket,
            BracketEvent::ToggleRoundLock {
                round: PlayoffRound::WildCard,
            },
        );

        let once = transition(bracket.clone(), BracketEvent::ApplyLiveResults);
        let twice = transition(once.clone(), BracketEvent::ApplyLiveResults);
        assert_eq!(bracket, once, "empty snapshot must not change the bracket");
        assert_eq!(once, twice);
    }

    #[test]
    fn unlocking_never_mutates_winners() {
        let bracket = rules::create_bracket("Alice");
        let mut results = LiveResults::empty(Utc::now());
        results.afc.wild_card.push(completed_result("NE", "LAC", "LAC"));
        let bracket = transition(bracket, BracketEvent::SetLiveResults { results });
        let bracket = transition(
            bracket,
            BracketEvent::ToggleRoundLock {
                round: PlayoffRound::WildCard,
            },
        );
        let locked_winners: Vec<_> = bracket
            .matchups()
            .iter()
            .map(|m| m.winner.clone())
            .collect();

        let bracket = transition(
            bracket,
            BracketEvent::ToggleRoundLock {
                round: PlayoffRound::WildCard,
            },
        );
        assert!(!bracket.locked_rounds.wild_card);
        let unlocked_winners: Vec<_> = bracket
            .matchups()
            .iter()
            .map(|m| m.winner.clone())
            .collect();
        assert_eq!(locked_winners, unlocked_winners);
    }

    #[test]
    fn winners_never_orphan_their_participants() {
        // Walk a messy event sequence and check the §8 invariant throughout.
        let mut bracket = rules::create_bracket("Alice");
        let script: Vec<BracketEvent> = vec![
            BracketEvent::SelectWinner {
                matchup_id: "AFC-wc-1".into(),
                winner: seeded(Conference::Afc, 7),
            },
            BracketEvent::SelectWinner {
                matchup_id: "AFC-wc-2".into(),
                winner: seeded(Conference::Afc, 6),
            },
            BracketEvent::SelectWinner {
                matchup_id: "AFC-wc-3".into(),
                winner: seeded(Conference::Afc, 5),
            },
            BracketEvent::SelectWinner {
                matchup_id: "AFC-div-1".into(),
                winner: seeded(Conference::Afc, 7),
            },
            BracketEvent::SelectWinner {
                matchup_id: "AFC-div-2".into(),
                winner: seeded(Conference::Afc, 5),
            },
            BracketEvent::SelectWinner {
                matchup_id: "AFC-champ".into(),
                winner: seeded(Conference::Afc, 7),
            },
            BracketEvent::SelectWinner {
                matchup_id: "AFC-wc-1".into(),
                winner: seeded(Conference::Afc, 2),
            },
            BracketEvent::ClearWinner {
                matchup_id: "AFC-wc-2".into(),
            },
        ];
        for event in script {
            bracket = transition(bracket, event);
            for matchup in bracket.matchups() {
                if let Some(winner) = &matchup.winner {
                    assert!(
                        matchup.involves(winner.id()),
                        "{} holds a winner that is no longer a participant",
                        matchup.id
                    );
                }
            }
        }
    }

    #[test]
    fn live_result_lookup_matches_unordered_pairs() {
        let bracket = rules::create_bracket("Alice");
        let mut results = LiveResults::empty(Utc::now());
        results.afc.wild_card.push(completed_result("LAC", "NE", "NE"));
        let bracket = transition(bracket, BracketEvent::SetLiveResults { results });

        let found = bracket.live_result_for("AFC-wc-1");
        assert!(found.is_some(), "flipped home/away still matches");
        assert!(bracket.live_result_for("AFC-div-2").is_none());
        assert!(bracket.live_result_for("nope").is_none());
    }
}
