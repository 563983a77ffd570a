use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs, Widget};
use tui::{Frame, Terminal};

use crate::app::{App, MenuItem};
use crate::bracket::Bracket;
use crate::components::bracket::{CARD_GAP, CARD_HEIGHT, MatchupCard};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use chrono::Local;
use nfl_api::{Conference, LiveMatchupResult, PlayoffRound};

static TABS: &[&str; 3] = &["Bracket", "Live Games", "Saved"];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    terminal
        .draw(|f| {
            if app.state.show_intro {
                draw_intro(f, f.area(), app);
                return;
            }

            layout.update(f.area(), app.settings.full_screen);

            if !app.settings.full_screen {
                draw_tabs(f, layout.tab_bar, app);
            }

            let mut main = layout.main;
            if app.state.show_logs {
                let [rest, logs] =
                    Layout::vertical([Constraint::Fill(1), Constraint::Length(8)]).areas(main);
                main = rest;
                draw_logs(f, logs);
            }

            match app.state.active_tab {
                MenuItem::Bracket => draw_bracket(f, main, app),
                MenuItem::LiveGames => draw_live_games(f, main, app),
                MenuItem::Saved => draw_saved(f, main, app),
                MenuItem::Help => draw_help(f, main),
            }

            draw_status_bar(f, layout.status_bar, app);
            draw_loading_spinner(f, f.area(), app, loading);
        })
        .unwrap();
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_intro(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::DarkGray).title(" NFL Playoff Bracket ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let bracket = &app.state.bracket.bracket;
    let greeting = if bracket.owner_name.is_empty() {
        "Build your playoff bracket".to_owned()
    } else {
        format!("Welcome back, {}", bracket.owner_name)
    };

    let [_top_pad, title_area, prompt_area, _bottom_pad] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);
    f.render_widget(
        Paragraph::new(greeting)
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        title_area,
    );
    f.render_widget(
        Paragraph::new("Press Enter to open your bracket")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        prompt_area,
    );
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Bracket | MenuItem::Help => 0,
        MenuItem::LiveGames => 1,
        MenuItem::Saved => 2,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn bracket_title(bracket: &Bracket) -> String {
    if !bracket.name.is_empty() {
        bracket.name.clone()
    } else if !bracket.owner_name.is_empty() {
        format!("{}'s bracket", bracket.owner_name)
    } else {
        "Playoff bracket".to_owned()
    }
}

fn draw_bracket(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Bracket ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let bracket = &app.state.bracket.bracket;
    let view_round = app.state.bracket.view_round;

    let [header, key_legend, content] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);

    let mut header_text = format!("{} | {}", bracket_title(bracket), view_round.label());
    if let Some(subtitle) = bracket.subtitle.as_deref() {
        header_text.push_str(&format!(" | {subtitle}"));
    }
    if bracket.locked_rounds.is_locked(view_round) {
        header_text.push_str(" [LOCKED]");
    }
    if bracket.is_complete {
        header_text.push_str(" | COMPLETE");
    }
    f.render_widget(Paragraph::new(header_text), header);
    f.render_widget(
        Paragraph::new(
            "Keys: h/l=round  j/k=game  c=conference  t/b=pick  x=clear  L=lock  ?=help",
        )
        .style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );

    if view_round == PlayoffRound::SuperBowl {
        draw_super_bowl_view(f, content, app);
        return;
    }

    let [left, _gap, right] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(2),
        Constraint::Fill(1),
    ])
    .areas(content);

    for (conference, pane) in [(Conference::Afc, left), (Conference::Nfc, right)] {
        draw_conference_pane(f, pane, app, conference);
    }
}

fn draw_conference_pane(f: &mut Frame, area: Rect, app: &App, conference: Conference) {
    let bracket = &app.state.bracket.bracket;
    let view_round = app.state.bracket.view_round;
    let is_selected_pane = conference == app.state.bracket.selected_conference;

    let mut title = format!(" {} ", conference.label());
    if bracket.locked_rounds.is_locked(view_round) {
        title = format!(" {} [L] ", conference.label());
    }
    let pane_block = default_border(if is_selected_pane {
        Color::Yellow
    } else {
        Color::DarkGray
    })
    .title(title);
    let pane_inner = pane_block.inner(area);
    f.render_widget(pane_block, area);

    let conference_bracket = bracket.conference(conference);
    let matchups: Vec<_> = match view_round {
        PlayoffRound::WildCard => conference_bracket.wild_card.iter().collect(),
        PlayoffRound::Divisional => conference_bracket.divisional.iter().collect(),
        PlayoffRound::Championship => vec![&conference_bracket.championship],
        PlayoffRound::SuperBowl => return,
    };

    for (idx, matchup) in matchups.into_iter().enumerate() {
        let y = pane_inner.y + idx as u16 * (CARD_HEIGHT + CARD_GAP);
        if y + CARD_HEIGHT > pane_inner.y + pane_inner.height {
            break;
        }
        let card_area = Rect::new(pane_inner.x, y, pane_inner.width, CARD_HEIGHT);
        MatchupCard {
            matchup,
            live: bracket.live_result_for(&matchup.id),
            selected: is_selected_pane && idx == app.state.bracket.selected_game,
            locked: bracket.locked_rounds.is_locked(view_round),
        }
        .render(card_area, f.buffer_mut());
    }
}

fn draw_super_bowl_view(f: &mut Frame, area: Rect, app: &App) {
    let bracket = &app.state.bracket.bracket;

    let [_pad, card_area, champion_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(CARD_HEIGHT),
        Constraint::Fill(1),
    ])
    .areas(area);

    let card_width = card_area.width.min(44);
    let centered = Rect::new(
        card_area.x + (card_area.width.saturating_sub(card_width)) / 2,
        card_area.y,
        card_width,
        CARD_HEIGHT,
    );
    MatchupCard {
        matchup: &bracket.super_bowl,
        live: bracket.live_result_for(&bracket.super_bowl.id),
        selected: true,
        locked: bracket.locked_rounds.super_bowl,
    }
    .render(centered, f.buffer_mut());

    let champion_text = match &bracket.super_bowl.winner {
        Some(team) => format!("\n★ {} win the Super Bowl ★", team.display_name()),
        None => "\nPick a champion with t (home) or b (away)".to_owned(),
    };
    f.render_widget(
        Paragraph::new(champion_text)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        champion_area,
    );
}

fn round_tag(round: PlayoffRound) -> &'static str {
    match round {
        PlayoffRound::WildCard => "WC",
        PlayoffRound::Divisional => "DIV",
        PlayoffRound::Championship => "CC",
        PlayoffRound::SuperBowl => "SB",
    }
}

fn live_game_line(round: PlayoffRound, result: &LiveMatchupResult) -> Line<'static> {
    let status = if result.completed {
        "FINAL".to_owned()
    } else if result.in_progress {
        let quarter = result.quarter.map(|q| format!("Q{q}")).unwrap_or_default();
        format!("LIVE {quarter} {}", result.clock.clone().unwrap_or_default())
    } else {
        result
            .game_date
            .map(|d| d.with_timezone(&Local).format("%m/%d %I:%M%p").to_string())
            .unwrap_or_else(|| "SCHEDULED".to_owned())
    };

    let score = match (result.home_score, result.away_score) {
        (Some(h), Some(a)) => format!("{h:>2}-{a:<2}"),
        _ => "  -  ".to_owned(),
    };

    let style = if result.in_progress {
        Style::default().fg(Color::Yellow)
    } else if result.completed {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let possession = match &result.possession {
        Some(team) => format!("  ●{team}{}", if result.red_zone { " RZ" } else { "" }),
        None => String::new(),
    };

    Line::from(Span::styled(
        format!(
            "{:>3}  {:>3} {score} {:<3}  [{status}]{possession}",
            round_tag(round),
            result.home_team_id,
            result.away_team_id,
        ),
        style,
    ))
}

fn draw_live_games(f: &mut Frame, area: Rect, app: &App) {
    let live_now = app
        .state
        .bracket
        .bracket
        .live_results
        .as_ref()
        .is_some_and(|r| r.has_in_progress_games());
    let title = if live_now { " Live Games ● " } else { " Live Games " };
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(results) = app.state.bracket.bracket.live_results.as_ref() else {
        f.render_widget(
            Paragraph::new("No live results yet. Press r to refresh.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    // In-progress games first, then later rounds first.
    let mut games: Vec<(PlayoffRound, &LiveMatchupResult)> = PlayoffRound::ALL
        .into_iter()
        .flat_map(|round| {
            results
                .round_results(round)
                .into_iter()
                .map(move |r| (round, r))
        })
        .collect();
    games.sort_by_key(|(round, r)| (!r.in_progress, std::cmp::Reverse(*round)));

    let mut lines = Vec::with_capacity(games.len() + 2);
    lines.push(Line::from(Span::styled(
        format!(
            "fetched {}  |  j/k scroll, r refresh",
            results.fetched_at.with_timezone(&Local).format("%H:%M:%S")
        ),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));

    if games.is_empty() {
        lines.push(Line::from("No playoff games on the scoreboard."));
    }
    for (round, result) in games {
        lines.push(live_game_line(round, result));
    }

    let offset = app.state.live_games.scroll_offset as usize;
    let visible: Vec<Line> = lines
        .into_iter()
        .skip(offset)
        .take(inner.height as usize)
        .collect();
    f.render_widget(Paragraph::new(visible), inner);
}

fn draw_saved(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Saved Brackets ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let saved = &app.state.saved;
    let mut lines = Vec::with_capacity(saved.entries.len() + 3);
    lines.push(Line::from(Span::styled(
        "j/k move, Enter load, r refresh  (s on the Bracket tab saves a snapshot)",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));

    if let Some(err) = saved.last_error.as_deref() {
        lines.push(Line::from(Span::styled(
            err.to_owned(),
            Style::default().fg(Color::Red),
        )));
    }
    if saved.entries.is_empty() {
        lines.push(Line::from("No saved brackets yet."));
    }

    for (idx, entry) in saved.entries.iter().enumerate() {
        let marker = if idx == saved.selected { ">" } else { " " };
        let name = if entry.name.is_empty() {
            format!("{}'s bracket", entry.owner_name)
        } else {
            entry.name.clone()
        };
        let updated = chrono::DateTime::from_timestamp_millis(entry.updated_at)
            .map(|d| d.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let style = if idx == saved.selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(Span::styled(
            format!("{marker} {name}  |  {}  |  {updated}", entry.owner_name),
            style,
        )));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let text = "q=quit  1=Bracket  2=Live Games  3=Saved

Bracket:
  h/l or ←/→   previous / next round
  j/k or ↑/↓   move between games
  c or Tab     switch conference
  t / b        pick the home / away team as winner
  x            clear the pick
  L            lock the viewed round to live results
  a            apply live results to locked rounds now
  r            refresh the scoreboard
  R            reset the bracket
  n / o / u    edit bracket name / owner / subtitle
  s            save a snapshot

Saved: j/k move, Enter load, r refresh
Esc leaves this screen.";
    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::Gray)),
        inner,
    );
}

fn draw_status_bar(f: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 {
        return;
    }

    if let Some(target) = app.state.editor.target {
        f.render_widget(
            Paragraph::new(format!(
                "edit {}: {}_   (Enter save, Esc cancel)",
                target.label(),
                app.state.editor.buffer
            ))
            .style(Style::default().fg(Color::Yellow)),
            area,
        );
        return;
    }

    if let Some(err) = app.state.last_error.as_deref() {
        f.render_widget(
            Paragraph::new(format!("error: {err}")).style(Style::default().fg(Color::Red)),
            area,
        );
        return;
    }

    if let Some(status) = app.state.status.as_deref() {
        f.render_widget(
            Paragraph::new(status.to_owned()).style(Style::default().fg(Color::Green)),
            area,
        );
        return;
    }

    let bracket = &app.state.bracket.bracket;
    let picks = bracket
        .matchups()
        .iter()
        .filter(|m| m.winner.is_some())
        .count();
    let locks: String = PlayoffRound::ALL
        .into_iter()
        .map(|round| {
            if bracket.locked_rounds.is_locked(round) {
                format!(" {}*", round_tag(round))
            } else {
                format!(" {}", round_tag(round))
            }
        })
        .collect();
    let fetched = bracket
        .live_results
        .as_ref()
        .map(|r| {
            format!(
                "  |  results {}",
                r.fetched_at.with_timezone(&Local).format("%H:%M")
            )
        })
        .unwrap_or_default();
    f.render_widget(
        Paragraph::new(format!("picks {picks}/13  |  locks{locks}{fetched}"))
            .style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let widget = tui_logger::TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style(Style::default().fg(Color::Gray));
    f.render_widget(widget, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
