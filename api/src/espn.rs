/// ESPN API raw wire types — serde shapes for deserializing ESPN responses.
/// These map to our clean domain types via the functions in client.rs.
use serde::Deserialize;

// ---------------------------------------------------------------------------
// NFL scoreboard  (site v2 API, seasontype=3 → playoffs)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    pub events: Option<Vec<EspnEvent>>,
    pub week: Option<EspnWeek>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnWeek {
    pub number: Option<u32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEvent {
    pub id: Option<String>,
    pub name: Option<String>,
    /// Playoff week: 1=Wild Card, 2=Divisional, 3=Championship, 4/5=Super Bowl.
    pub week: Option<EspnWeek>,
    pub date: Option<String>, // ISO 8601
    pub competitions: Option<Vec<EspnCompetition>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetition {
    pub date: Option<String>,
    pub competitors: Option<Vec<EspnCompetitor>>,
    pub status: Option<EspnStatus>,
    pub situation: Option<EspnSituation>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnStatus {
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
    pub period: Option<u8>,
    #[serde(rename = "displayClock")]
    pub display_clock: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnStatusType {
    pub name: Option<String>, // "STATUS_SCHEDULED", "STATUS_IN_PROGRESS", "STATUS_FINAL"
    pub state: Option<String>, // "pre" | "in" | "post"
    pub completed: Option<bool>,
}

/// Live game situation. Possession is ESPN's numeric team id, translated back
/// to an abbreviation in client.rs by matching against the competitors.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnSituation {
    pub possession: Option<String>,
    #[serde(rename = "isRedZone")]
    pub is_red_zone: Option<bool>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnCompetitor {
    pub id: Option<String>,
    #[serde(rename = "homeAway")]
    pub home_away: Option<String>, // "home" | "away"
    pub team: Option<EspnTeam>,
    pub score: Option<String>, // ESPN sends scores as strings
    pub winner: Option<bool>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnTeam {
    pub id: Option<String>,
    pub abbreviation: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "shortDisplayName")]
    pub short_display_name: Option<String>,
}
