use crate::espn::{EspnCompetitor, EspnEvent, ScoreboardResponse};
use crate::{Conference, LiveMatchupResult, LiveResults, PlayoffRound};
use chrono::Utc;
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const ESPN_SITE_V2: &str = "https://site.api.espn.com/apis/site/v2/sports/football/nfl";

/// Playoff weeks queried on every refresh. The Super Bowl lands on week 4 or
/// 5 depending on the year, so both are polled.
const PLAYOFF_WEEKS: [u32; 5] = [1, 2, 3, 4, 5];

/// NFL playoff scoreboard client backed by ESPN's public endpoints.
#[derive(Debug, Clone)]
pub struct NflApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for NflApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("pbtui/0.1 (terminal bracket predictor)")
                .build()
                .unwrap_or_default(),
            base_url: ESPN_SITE_V2.to_owned(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl NflApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at a different scoreboard host. Used by tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Fetch the full playoff scoreboard and fold it into a `LiveResults`
    /// snapshot.
    ///
    /// Source chain:
    /// 1) `PBTUI_SCOREBOARD_JSON` env var — load from a local ESPN-format
    ///    JSON file (events must carry their playoff week numbers).
    /// 2) ESPN scoreboard API, one request per playoff week.
    ///
    /// Individual week failures are tolerated; the call only errors when no
    /// week could be fetched at all, so a partial outage still yields a
    /// complete (if thinner) snapshot.
    pub async fn fetch_live_results(&self) -> ApiResult<LiveResults> {
        if let Ok(path) = std::env::var("PBTUI_SCOREBOARD_JSON")
            && !path.trim().is_empty()
        {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| ApiError::NotFound(format!("could not read {path}: {e}")))?;
            let raw: ScoreboardResponse = serde_json::from_str(&content)
                .map_err(|e| ApiError::NotFound(format!("invalid scoreboard json at {path}: {e}")))?;
            let mapped = raw
                .events
                .unwrap_or_default()
                .iter()
                .filter_map(|e| map_event(e, 0))
                .collect();
            return Ok(bucket_results(mapped));
        }

        let mut mapped = Vec::new();
        let mut fetched_any = false;
        let mut last_error: Option<ApiError> = None;

        for week in PLAYOFF_WEEKS {
            let url = format!("{}/scoreboard?seasontype=3&week={week}", self.base_url);
            match self.get::<ScoreboardResponse>(&url).await {
                Ok(raw) => {
                    fetched_any = true;
                    mapped.extend(
                        raw.events
                            .unwrap_or_default()
                            .iter()
                            .filter_map(|e| map_event(e, week)),
                    );
                }
                Err(e) => last_error = Some(e),
            }
        }

        if !fetched_any {
            return Err(last_error
                .unwrap_or_else(|| ApiError::NotFound("playoff scoreboard unavailable".into())));
        }

        Ok(bucket_results(mapped))
    }

    async fn get<T: Default + serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => {
                if e.status().map(|s| s.is_client_error()).unwrap_or(false) {
                    Ok(T::default())
                } else {
                    Err(ApiError::Api(e, url.to_owned()))
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping: ESPN wire types → clean domain types
// ---------------------------------------------------------------------------

/// ESPN playoff week → round. Wild Card is week 1 of seasontype 3; the Super
/// Bowl is week 4 or 5 depending on the year.
fn playoff_round_for_week(week: u32) -> Option<PlayoffRound> {
    match week {
        1 => Some(PlayoffRound::WildCard),
        2 => Some(PlayoffRound::Divisional),
        3 => Some(PlayoffRound::Championship),
        4 | 5 => Some(PlayoffRound::SuperBowl),
        _ => None,
    }
}

/// ESPN mostly shares our team ids, but a few abbreviations differ.
fn normalize_abbreviation(raw: &str) -> String {
    let upper = raw.to_ascii_uppercase();
    match upper.as_str() {
        "LA" => "LAR".to_owned(), // ESPN uses "LA" for the Rams
        "JAC" => "JAX".to_owned(),
        "WSH" => "WAS".to_owned(),
        _ => upper,
    }
}

const AFC_TEAM_IDS: [&str; 16] = [
    "BAL", "BUF", "CIN", "CLE", "DEN", "HOU", "IND", "JAX", "KC", "LAC", "LV", "MIA", "NE", "NYJ",
    "PIT", "TEN",
];

const NFC_TEAM_IDS: [&str; 16] = [
    "ARI", "ATL", "CAR", "CHI", "DAL", "DET", "GB", "LAR", "MIN", "NO", "NYG", "PHI", "SEA", "SF",
    "TB", "WAS",
];

/// Which conference bucket a game belongs to. `None` marks a cross-conference
/// pairing, i.e. the Super Bowl.
fn conference_for_pair(home_id: &str, away_id: &str) -> Option<Conference> {
    let home_afc = AFC_TEAM_IDS.contains(&home_id);
    let away_afc = AFC_TEAM_IDS.contains(&away_id);
    let home_nfc = NFC_TEAM_IDS.contains(&home_id);
    let away_nfc = NFC_TEAM_IDS.contains(&away_id);

    if (home_afc && away_nfc) || (home_nfc && away_afc) {
        None
    } else if home_afc || away_afc {
        Some(Conference::Afc)
    } else {
        Some(Conference::Nfc)
    }
}

fn competitor_abbrev(c: &EspnCompetitor) -> Option<String> {
    c.team
        .as_ref()
        .and_then(|t| t.abbreviation.as_deref())
        .map(normalize_abbreviation)
}

/// Map one scoreboard event into (round, conference bucket, result).
/// Events missing a home/away split or team abbreviations are dropped —
/// absent facts, not errors.
fn map_event(
    event: &EspnEvent,
    fallback_week: u32,
) -> Option<(PlayoffRound, Option<Conference>, LiveMatchupResult)> {
    let week = event
        .week
        .as_ref()
        .and_then(|w| w.number)
        .unwrap_or(fallback_week);
    let round = playoff_round_for_week(week)?;

    let competition = event.competitions.as_deref()?.first()?;
    let competitors = competition.competitors.as_deref().unwrap_or_default();
    let home = competitors
        .iter()
        .find(|c| c.home_away.as_deref() == Some("home"))?;
    let away = competitors
        .iter()
        .find(|c| c.home_away.as_deref() == Some("away"))?;

    let home_team_id = competitor_abbrev(home)?;
    let away_team_id = competitor_abbrev(away)?;

    let home_score = home.score.as_deref().and_then(|s| s.parse::<u16>().ok());
    let away_score = away.score.as_deref().and_then(|s| s.parse::<u16>().ok());

    let status = competition.status.as_ref();
    let status_type = status.and_then(|s| s.status_type.as_ref());
    let completed = status_type.and_then(|t| t.completed).unwrap_or(false);
    let in_progress = status_type.and_then(|t| t.state.as_deref()) == Some("in");

    let winner_id = if completed {
        if home.winner == Some(true) {
            Some(home_team_id.clone())
        } else if away.winner == Some(true) {
            Some(away_team_id.clone())
        } else if let (Some(h), Some(a)) = (home_score, away_score) {
            // Fallback: decide by score when the winner flag is missing.
            Some(if h > a {
                home_team_id.clone()
            } else {
                away_team_id.clone()
            })
        } else {
            None
        }
    } else {
        None
    };

    // ESPN reports possession as a numeric team id; translate it back to an
    // abbreviation by matching the competitors.
    let situation = competition.situation.as_ref();
    let possession = situation
        .and_then(|s| s.possession.as_deref())
        .and_then(|team_id| {
            if home.id.as_deref() == Some(team_id) {
                Some(home_team_id.clone())
            } else if away.id.as_deref() == Some(team_id) {
                Some(away_team_id.clone())
            } else {
                None
            }
        });
    let red_zone = situation.and_then(|s| s.is_red_zone).unwrap_or(false);

    let game_date = competition
        .date
        .as_deref()
        .or(event.date.as_deref())
        .and_then(|d| chrono::DateTime::parse_from_rfc3339(d).ok())
        .map(|dt| dt.with_timezone(&Utc));

    let conference = conference_for_pair(&home_team_id, &away_team_id);

    let result = LiveMatchupResult {
        home_team_id,
        away_team_id,
        home_score,
        away_score,
        winner_id,
        completed,
        in_progress,
        game_date,
        quarter: status.and_then(|s| s.period),
        clock: status.and_then(|s| s.display_clock.clone()),
        possession,
        red_zone,
    };

    Some((round, conference, result))
}

/// Fold mapped events into round/conference buckets.
fn bucket_results(
    mapped: Vec<(PlayoffRound, Option<Conference>, LiveMatchupResult)>,
) -> LiveResults {
    let mut results = LiveResults::empty(Utc::now());
    for (round, conference, result) in mapped {
        results.insert(round, conference, result);
    }
    results
}
