pub mod client;
pub mod espn;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of ESPN wire format
// ---------------------------------------------------------------------------

/// The two NFL conferences. Each half of the playoff bracket belongs to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conference {
    #[serde(rename = "AFC")]
    Afc,
    #[serde(rename = "NFC")]
    Nfc,
}

impl Conference {
    pub const ALL: [Conference; 2] = [Conference::Afc, Conference::Nfc];

    pub fn label(&self) -> &'static str {
        match self {
            Conference::Afc => "AFC",
            Conference::Nfc => "NFC",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Conference::Afc => Conference::Nfc,
            Conference::Nfc => Conference::Afc,
        }
    }
}

/// Navigation axis for the playoff rounds. Ordered from earliest to latest.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum PlayoffRound {
    #[default]
    WildCard,
    Divisional,
    Championship,
    SuperBowl,
}

impl PlayoffRound {
    pub const ALL: [PlayoffRound; 4] = [
        PlayoffRound::WildCard,
        PlayoffRound::Divisional,
        PlayoffRound::Championship,
        PlayoffRound::SuperBowl,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PlayoffRound::WildCard => "Wild Card",
            PlayoffRound::Divisional => "Divisional",
            PlayoffRound::Championship => "Conference Championship",
            PlayoffRound::SuperBowl => "Super Bowl",
        }
    }

    pub fn prev(self) -> Option<Self> {
        match self {
            PlayoffRound::WildCard => None,
            PlayoffRound::Divisional => Some(PlayoffRound::WildCard),
            PlayoffRound::Championship => Some(PlayoffRound::Divisional),
            PlayoffRound::SuperBowl => Some(PlayoffRound::Championship),
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            PlayoffRound::WildCard => Some(PlayoffRound::Divisional),
            PlayoffRound::Divisional => Some(PlayoffRound::Championship),
            PlayoffRound::Championship => Some(PlayoffRound::SuperBowl),
            PlayoffRound::SuperBowl => None,
        }
    }
}

/// One game's factual state as reported by the scoreboard feed.
///
/// A result is matched to a bracket matchup by comparing its two team
/// identities against the matchup's home/away identities in either order,
/// never by shared id — the feed's identifiers differ from the bracket's.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveMatchupResult {
    pub home_team_id: String,
    pub away_team_id: String,
    pub home_score: Option<u16>,
    pub away_score: Option<u16>,
    pub winner_id: Option<String>,
    pub completed: bool,
    pub in_progress: bool,
    pub game_date: Option<DateTime<Utc>>,
    /// Clock info for in-progress games. Display-only.
    pub quarter: Option<u8>,
    pub clock: Option<String>,
    pub possession: Option<String>,
    pub red_zone: bool,
}

impl LiveMatchupResult {
    /// Unordered team-pair match — the feed's home/away assignment need not
    /// agree with the bracket's.
    pub fn involves_pair(&self, a: &str, b: &str) -> bool {
        (self.home_team_id == a && self.away_team_id == b)
            || (self.home_team_id == b && self.away_team_id == a)
    }

    /// The winner's identity, but only once the game is actually over.
    pub fn decided_winner(&self) -> Option<&str> {
        if self.completed {
            self.winner_id.as_deref()
        } else {
            None
        }
    }
}

/// Per-conference result buckets for the three conference rounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConferenceResults {
    pub wild_card: Vec<LiveMatchupResult>,
    pub divisional: Vec<LiveMatchupResult>,
    pub championship: Option<LiveMatchupResult>,
}

/// Snapshot of the live playoff scoreboard: one bucket per round per
/// conference plus the Super Bowl. Replaced wholesale whenever a fresh fetch
/// succeeds; never partially merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveResults {
    pub afc: ConferenceResults,
    pub nfc: ConferenceResults,
    pub super_bowl: Option<LiveMatchupResult>,
    pub fetched_at: DateTime<Utc>,
}

impl LiveResults {
    pub fn empty(fetched_at: DateTime<Utc>) -> Self {
        Self {
            afc: ConferenceResults::default(),
            nfc: ConferenceResults::default(),
            super_bowl: None,
            fetched_at,
        }
    }

    pub fn conference(&self, conference: Conference) -> &ConferenceResults {
        match conference {
            Conference::Afc => &self.afc,
            Conference::Nfc => &self.nfc,
        }
    }

    fn conference_mut(&mut self, conference: Conference) -> &mut ConferenceResults {
        match conference {
            Conference::Afc => &mut self.afc,
            Conference::Nfc => &mut self.nfc,
        }
    }

    /// File a result under its round/conference bucket. Championship and
    /// Super Bowl buckets hold a single game; a later result replaces an
    /// earlier one.
    pub fn insert(
        &mut self,
        round: PlayoffRound,
        conference: Option<Conference>,
        result: LiveMatchupResult,
    ) {
        match (round, conference) {
            (PlayoffRound::WildCard, Some(c)) => self.conference_mut(c).wild_card.push(result),
            (PlayoffRound::Divisional, Some(c)) => self.conference_mut(c).divisional.push(result),
            (PlayoffRound::Championship, Some(c)) => {
                self.conference_mut(c).championship = Some(result)
            }
            (PlayoffRound::SuperBowl, _) => self.super_bowl = Some(result),
            // A cross-conference pairing cannot occur before the Super Bowl.
            (_, None) => {}
        }
    }

    /// Every result in the snapshot, in round order.
    pub fn all(&self) -> impl Iterator<Item = &LiveMatchupResult> {
        PlayoffRound::ALL
            .into_iter()
            .flat_map(|round| self.round_results(round))
    }

    /// All results for one round, across both conferences.
    pub fn round_results(&self, round: PlayoffRound) -> Vec<&LiveMatchupResult> {
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
            PlayoffRound::Championship => self
                .afc
                .championship
                .iter()
                .chain(self.nfc.championship.iter())
                .collect(),
            PlayoffRound::SuperBowl => self.super_bowl.iter().collect(),
        }
    }

    /// Find the result matching a team pair, searching every bucket.
    pub fn find_for_pair(&self, a: &str, b: &str) -> Option<&LiveMatchupResult> {
        self.all().find(|r| r.involves_pair(a, b))
    }

    pub fn has_completed_games(&self, round: PlayoffRound) -> bool {
        self.round_results(round).iter().any(|r| r.completed)
    }

    pub fn has_in_progress_games(&self) -> bool {
        self.all().any(|r| r.in_progress)
    }
}
