use crate::bracket::teams::SeededTeam;
use chrono::Utc;
use nfl_api::{Conference, LiveMatchupResult, LiveResults, PlayoffRound};
use serde::{Deserialize, Serialize};

/// One game slot in the bracket tree.
///
/// Wild-card participants are fixed by seed at creation. Divisional,
/// championship and Super Bowl participants are derived from upstream
/// winners and are replaced, never edited, when the engine recomputes a
/// round. A recorded winner always equals the home or away participant as of
/// the last recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub id: String,
    pub round: PlayoffRound,
    /// `None` marks the Super Bowl, which belongs to both conferences.
    pub conference: Option<Conference>,
    pub game_number: u8,
    pub home: Option<SeededTeam>,
    pub away: Option<SeededTeam>,
    pub winner: Option<SeededTeam>,
}

impl Matchup {
    /// True when the given team currently occupies the home or away slot.
    ///
    /// This is the single "did the winner survive" check used by every
    /// cascade path, so the wild-card/divisional/championship recomputes
    /// cannot drift apart.
    pub fn involves(&self, team_id: &str) -> bool {
        self.home.as_ref().is_some_and(|t| t.id() == team_id)
            || self.away.as_ref().is_some_and(|t| t.id() == team_id)
    }

    /// Replace the participant slots, keeping the recorded winner only if it
    /// still matches one of the new participants.
    pub fn set_participants(&mut self, home: Option<SeededTeam>, away: Option<SeededTeam>) {
        self.home = home;
        self.away = away;
        let stale = self
            .winner
            .as_ref()
            .is_some_and(|w| !self.involves(w.id()));
        if stale {
            self.winner = None;
        }
    }
}

/// Three ordered rounds for one conference: wild card (3 games), divisional
/// (2 games), championship (1 game).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConferenceBracket {
    pub wild_card: Vec<Matchup>,
    pub divisional: Vec<Matchup>,
    pub championship: Matchup,
}

impl ConferenceBracket {
    pub fn wild_card_winners(&self) -> Vec<Option<SeededTeam>> {
        self.wild_card.iter().map(|m| m.winner.clone()).collect()
    }

    pub fn divisional_winners(&self) -> Vec<Option<SeededTeam>> {
        self.divisional.iter().map(|m| m.winner.clone()).collect()
    }

    pub fn matchups(&self) -> impl Iterator<Item = &Matchup> {
        self.wild_card
            .iter()
            .chain(self.divisional.iter())
            .chain(std::iter::once(&self.championship))
    }
}

/// Per-round lock flags. A locked round takes its winners from live results
/// instead of manual picks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoundLocks {
    pub wild_card: bool,
    pub divisional: bool,
    pub championship: bool,
    pub super_bowl: bool,
}

impl RoundLocks {
    pub fn is_locked(&self, round: PlayoffRound) -> bool {
        match round {
            PlayoffRound::WildCard => self.wild_card,
            PlayoffRound::Divisional => self.divisional,
            PlayoffRound::Championship => self.championship,
            PlayoffRound::SuperBowl => self.super_bowl,
        }
    }

    pub fn toggle(&mut self, round: PlayoffRound) {
        let flag = match round {
            PlayoffRound::WildCard => &mut self.wild_card,
            PlayoffRound::Divisional => &mut self.divisional,
            PlayoffRound::Championship => &mut self.championship,
            PlayoffRound::SuperBowl => &mut self.super_bowl,
        };
        *flag = !*flag;
    }
}

/// The full prediction bracket: both conference trees, the Super Bowl, lock
/// flags, and the cached live-results snapshot.
///
/// Treated as an immutable value: every event handed to the progression
/// engine returns a new `Bracket`, which keeps undo and persistence
/// snapshotting trivial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub id: String,
    pub name: String,
    pub subtitle: Option<String>,
    pub owner_name: String,
    pub afc: ConferenceBracket,
    pub nfc: ConferenceBracket,
    pub super_bowl: Matchup,
    #[serde(default)]
    pub locked_rounds: RoundLocks,
    #[serde(default)]
    pub live_results: Option<LiveResults>,
    pub is_complete: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    pub updated_at: i64,
}

impl Bracket {
    pub fn conference(&self, conference: Conference) -> &ConferenceBracket {
        match conference {
            Conference::Afc => &self.afc,
            Conference::Nfc => &self.nfc,
        }
    }

    pub fn conference_mut(&mut self, conference: Conference) -> &mut ConferenceBracket {
        match conference {
            Conference::Afc => &mut self.afc,
            Conference::Nfc => &mut self.nfc,
        }
    }

    /// All 13 matchups in round order (both conferences per round, then the
    /// Super Bowl).
    pub fn matchups(&self) -> Vec<&Matchup> {
        PlayoffRound::ALL
            .into_iter()
            .flat_map(|round| self.round_matchups(round))
            .collect()
    }

    /// The matchups of one round across both conferences.
    pub fn round_matchups(&self, round: PlayoffRound) -> Vec<&Matchup> {
        match round {
            PlayoffRound::WildCard => self
                .afc
                .wild_card
                .iter()
                .chain(self.nfc.wild_card.iter())
                .collect(),
            PlayoffRound::Divisional => self
                .afc
                .divisional
                .iter()
                .chain(self.nfc.divisional.iter())
                .collect(),
            PlayoffRound::Championship => {
                vec![&self.afc.championship, &self.nfc.championship]
            }
            PlayoffRound::SuperBowl => vec![&self.super_bowl],
        }
    }

    pub fn find_matchup(&self, matchup_id: &str) -> Option<&Matchup> {
        self.matchups().into_iter().find(|m| m.id == matchup_id)
    }

    /// The cached live result for a matchup, matched by unordered team pair.
    /// Matchups whose participants are not yet derived have no result.
    pub fn live_result_for(&self, matchup_id: &str) -> Option<&LiveMatchupResult> {
        let matchup = self.find_matchup(matchup_id)?;
        let home = matchup.home.as_ref()?;
        let away = matchup.away.as_ref()?;
        self.live_results
            .as_ref()?
            .find_for_pair(home.id(), away.id())
    }

    pub fn touch(&mut self) {
        self.updated_at = now_millis();
    }
}

pub(crate) fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
