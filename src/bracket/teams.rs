use nfl_api::Conference;
use serde::{Deserialize, Serialize};

/// Immutable team reference data. Identity is the `id` field; the colors
/// ride along for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub city: String,
    pub conference: Conference,
    pub primary_color: String,
    pub secondary_color: String,
}

/// A team plus its playoff seed. Seeds are 1–7, unique within a conference,
/// assigned once per tournament and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededTeam {
    #[serde(flatten)]
    pub team: Team,
    pub seed: u8,
}

impl SeededTeam {
    pub fn id(&self) -> &str {
        &self.team.id
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.team.city, self.team.name)
    }
}

struct TeamRow {
    id: &'static str,
    city: &'static str,
    name: &'static str,
    conference: Conference,
    seed: u8,
    primary_color: &'static str,
    secondary_color: &'static str,
}

/// 2025-26 NFL playoff field. Seed 1 in each conference holds the first-round
/// bye.
const PLAYOFF_FIELD: [TeamRow; 14] = [
    // AFC
    TeamRow { id: "DEN", city: "Denver", name: "Broncos", conference: Conference::Afc, seed: 1, primary_color: "#FB4F14", secondary_color: "#002244" },
    TeamRow { id: "NE", city: "New England", name: "Patriots", conference: Conference::Afc, seed: 2, primary_color: "#002244", secondary_color: "#C60C30" },
    TeamRow { id: "JAX", city: "Jacksonville", name: "Jaguars", conference: Conference::Afc, seed: 3, primary_color: "#006778", secondary_color: "#D7A22A" },
    TeamRow { id: "PIT", city: "Pittsburgh", name: "Steelers", conference: Conference::Afc, seed: 4, primary_color: "#FFB612", secondary_color: "#101820" },
    TeamRow { id: "HOU", city: "Houston", name: "Texans", conference: Conference::Afc, seed: 5, primary_color: "#03202F", secondary_color: "#A71930" },
    TeamRow { id: "BUF", city: "Buffalo", name: "Bills", conference: Conference::Afc, seed: 6, primary_color: "#00338D", secondary_color: "#C60C30" },
    TeamRow { id: "LAC", city: "Los Angeles", name: "Chargers", conference: Conference::Afc, seed: 7, primary_color: "#0080C6", secondary_color: "#FFC20E" },
    // NFC
    TeamRow { id: "SEA", city: "Seattle", name: "Seahawks", conference: Conference::Nfc, seed: 1, primary_color: "#002244", secondary_color: "#69BE28" },
    TeamRow { id: "CHI", city: "Chicago", name: "Bears", conference: Conference::Nfc, seed: 2, primary_color: "#0B162A", secondary_color: "#C83803" },
    TeamRow { id: "PHI", city: "Philadelphia", name: "Eagles", conference: Conference::Nfc, seed: 3, primary_color: "#004C54", secondary_color: "#A5ACAF" },
    TeamRow { id: "CAR", city: "Carolina", name: "Panthers", conference: Conference::Nfc, seed: 4, primary_color: "#0085CA", secondary_color: "#101820" },
    TeamRow { id: "LAR", city: "Los Angeles", name: "Rams", conference: Conference::Nfc, seed: 5, primary_color: "#003594", secondary_color: "#FFA300" },
    TeamRow { id: "SF", city: "San Francisco", name: "49ers", conference: Conference::Nfc, seed: 6, primary_color: "#AA0000", secondary_color: "#B3995D" },
    TeamRow { id: "GB", city: "Green Bay", name: "Packers", conference: Conference::Nfc, seed: 7, primary_color: "#203731", secondary_color: "#FFB612" },
];

fn build(row: &TeamRow) -> SeededTeam {
    SeededTeam {
        team: Team {
            id: row.id.to_owned(),
            name: row.name.to_owned(),
            city: row.city.to_owned(),
            conference: row.conference,
            primary_color: row.primary_color.to_owned(),
            secondary_color: row.secondary_color.to_owned(),
        },
        seed: row.seed,
    }
}

/// All seeded teams for one conference, ordered by seed.
pub fn conference_seeds(conference: Conference) -> Vec<SeededTeam> {
    let mut seeds: Vec<SeededTeam> = PLAYOFF_FIELD
        .iter()
        .filter(|row| row.conference == conference)
        .map(build)
        .collect();
    seeds.sort_by_key(|t| t.seed);
    seeds
}

pub fn seeded_team(conference: Conference, seed: u8) -> Option<SeededTeam> {
    PLAYOFF_FIELD
        .iter()
        .find(|row| row.conference == conference && row.seed == seed)
        .map(build)
}

/// The conference's #1 seed. Every conference in the table has one, so this
/// is infallible by construction.
pub fn bye_team(conference: Conference) -> SeededTeam {
    PLAYOFF_FIELD
        .iter()
        .find(|row| row.conference == conference && row.seed == 1)
        .map(build)
        .unwrap_or_else(|| build(&PLAYOFF_FIELD[0]))
}

pub fn team_by_id(id: &str) -> Option<SeededTeam> {
    PLAYOFF_FIELD.iter().find(|row| row.id == id).map(build)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_conference_has_seven_unique_seeds() {
        for conference in Conference::ALL {
            let seeds = conference_seeds(conference);
            assert_eq!(seeds.len(), 7);
            for (idx, team) in seeds.iter().enumerate() {
                assert_eq!(team.seed as usize, idx + 1);
            }
        }
    }

    #[test]
    fn team_lookup_round_trips() {
        let team = team_by_id("LAC").expect("Chargers are in the field");
        assert_eq!(team.seed, 7);
        assert_eq!(team.team.conference, Conference::Afc);
        assert!(team_by_id("XYZ").is_none());
    }

    #[test]
    fn bye_team_is_the_top_seed() {
        assert_eq!(bye_team(Conference::Afc).id(), "DEN");
        assert_eq!(bye_team(Conference::Nfc).id(), "SEA");
    }
}
