use crate::bracket::{Matchup, SeededTeam};
use nfl_api::LiveMatchupResult;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::widgets::Widget;

/// Rows per matchup card: home-team line, score/status line, away-team line.
pub const CARD_HEIGHT: u16 = 3;

/// Vertical gap between stacked cards.
pub const CARD_GAP: u16 = 1;

// ---------------------------------------------------------------------------
// MatchupCard widget
// ---------------------------------------------------------------------------

/// One bracket game as a 3-row card:
///
/// ```text
/// > (2) New England Patriots ◀
///   FINAL 27-20
///   (7) Los Angeles Chargers
/// ```
///
/// The middle row shows the live status when the cached snapshot has a
/// matching result, otherwise the pick state.
pub struct MatchupCard<'a> {
    pub matchup: &'a Matchup,
    pub live: Option<&'a LiveMatchupResult>,
    pub selected: bool,
    pub locked: bool,
}

impl<'a> MatchupCard<'a> {
    /// Scores oriented to the bracket's home/away slots — the feed's own
    /// home/away assignment may be flipped.
    fn oriented_scores(&self) -> (Option<u16>, Option<u16>) {
        let (Some(live), Some(home)) = (self.live, &self.matchup.home) else {
            return (None, None);
        };
        if live.home_team_id == home.id() {
            (live.home_score, live.away_score)
        } else {
            (live.away_score, live.home_score)
        }
    }

    fn status_text(&self) -> String {
        let (home_score, away_score) = self.oriented_scores();
        if let Some(live) = self.live {
            if live.completed
                && let (Some(h), Some(a)) = (home_score, away_score)
            {
                return format!("FINAL {h}-{a}");
            }
            if live.in_progress {
                let quarter = live.quarter.map(|q| format!("Q{q}")).unwrap_or_default();
                let clock = live.clock.clone().unwrap_or_default();
                let red_zone = if live.red_zone { " RZ" } else { "" };
                return format!(
                    "LIVE {quarter} {clock}{red_zone} {}-{}",
                    home_score.unwrap_or(0),
                    away_score.unwrap_or(0)
                );
            }
        }
        match (&self.matchup.home, &self.matchup.away) {
            (Some(_), Some(_)) if self.locked => "awaiting result".to_owned(),
            (Some(_), Some(_)) => "vs".to_owned(),
            _ => "awaiting teams".to_owned(),
        }
    }
}

impl<'a> Widget for MatchupCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 10 || area.height < CARD_HEIGHT {
            return;
        }

        let marker = if self.selected { '>' } else { ' ' };
        let base = if self.selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };

        let winner_id = self.matchup.winner.as_ref().map(|t| t.id().to_owned());
        let max = area.width.saturating_sub(2) as usize;

        for (offset, slot) in [(0u16, &self.matchup.home), (2, &self.matchup.away)] {
            let is_winner = match (&winner_id, slot.as_ref()) {
                (Some(w), Some(team)) => w == team.id(),
                _ => false,
            };
            let style = if is_winner {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if slot.is_none() {
                Style::default().fg(Color::DarkGray)
            } else {
                base
            };
            let mut line = format!("{marker} {}", slot_label(slot));
            if is_winner {
                line.push_str(" ◀");
            }
            buf.set_stringn(area.x, area.y + offset, line, max + 2, style);
        }

        let status_style = Style::default().fg(Color::DarkGray);
        buf.set_stringn(
            area.x + 2,
            area.y + 1,
            self.status_text(),
            max,
            status_style,
        );
    }
}

fn slot_label(slot: &Option<SeededTeam>) -> String {
    match slot {
        Some(team) => format!("({}) {}", team.seed, team.display_name()),
        None => "TBD".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::rules;
    use nfl_api::Conference;

    fn render(card: MatchupCard) -> Buffer {
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        card.render(area, &mut buf);
        buf
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
            .collect()
    }

    #[test]
    fn renders_seeded_pairing_with_selection_marker() {
        let matchups = rules::wild_card_matchups(Conference::Afc);
        let buf = render(MatchupCard {
            matchup: &matchups[0],
            live: None,
            selected: true,
            locked: false,
        });
        assert!(row(&buf, 0).contains("(2) New England Patriots"));
        assert!(row(&buf, 0).starts_with('>'));
        assert!(row(&buf, 1).contains("vs"));
        assert!(row(&buf, 2).contains("(7) Los Angeles Chargers"));
    }

    #[test]
    fn marks_the_recorded_winner() {
        let mut matchups = rules::wild_card_matchups(Conference::Afc);
        matchups[0].winner = matchups[0].away.clone();
        let buf = render(MatchupCard {
            matchup: &matchups[0],
            live: None,
            selected: false,
            locked: false,
        });
        assert!(!row(&buf, 0).contains('◀'));
        assert!(row(&buf, 2).contains('◀'));
    }

    #[test]
    fn live_scores_orient_to_the_bracket_slots() {
        let matchups = rules::wild_card_matchups(Conference::Afc);
        // Feed has the Chargers as "home", the bracket has the Patriots.
        let live = LiveMatchupResult {
            home_team_id: "LAC".to_owned(),
            away_team_id: "NE".to_owned(),
            home_score: Some(20),
            away_score: Some(27),
            winner_id: Some("NE".to_owned()),
            completed: true,
            ..Default::default()
        };
        let buf = render(MatchupCard {
            matchup: &matchups[0],
            live: Some(&live),
            selected: false,
            locked: true,
        });
        assert!(
            row(&buf, 1).contains("FINAL 27-20"),
            "Patriots' 27 should display on the bracket's home side"
        );
    }

    #[test]
    fn open_slots_render_as_tbd() {
        let matchup = rules::championship_matchup(Conference::Nfc);
        let buf = render(MatchupCard {
            matchup: &matchup,
            live: None,
            selected: false,
            locked: false,
        });
        assert!(row(&buf, 0).contains("TBD"));
        assert!(row(&buf, 1).contains("awaiting teams"));
    }
}
