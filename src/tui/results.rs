use crate::discover::types::{Opportunity, Source};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, List, ListItem, Paragraph, Row, Table, TableState},
    Frame,
};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Idle hint shown before the first search
pub fn render_idle(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Find Active Opportunities",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Select target sectors and regions on the left."),
        Line::from("The model will search live data for active RFPs, RFQs, and EOIs."),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(panel(" Opportunities ", Color::DarkGray));
    frame.render_widget(paragraph, area);
}

/// Spinner view while the one outstanding request is in flight
pub fn render_generating(frame: &mut Frame, area: Rect, tick: usize) {
    let spinner = SPINNER[tick % SPINNER.len()];
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{spinner} Searching the web..."),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Finding live listings and extracting details."),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(panel(" Opportunities ", Color::Yellow));
    frame.render_widget(paragraph, area);
}

/// Error banner with the retry affordance
pub fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let mut text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Search Failed",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for line in textwrap::wrap(message, area.width.saturating_sub(4).max(20) as usize) {
        text.push(Line::from(Span::styled(
            line.into_owned(),
            Style::default().fg(Color::Red),
        )));
    }
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        "Press Enter to try again",
        Style::default().fg(Color::Gray),
    )));

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(panel(" Error ", Color::Red));
    frame.render_widget(paragraph, area);
}

/// Results table plus the grounding-sources sidebar
pub fn render_complete(
    frame: &mut Frame,
    area: Rect,
    opportunities: &[Opportunity],
    sources: &[Source],
    table_state: &mut TableState,
    notice: Option<&str>,
) {
    if sources.is_empty() {
        render_table(frame, area, opportunities, table_state, notice);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    render_table(frame, columns[0], opportunities, table_state, notice);
    render_sources(frame, columns[1], sources);
}

fn render_table(
    frame: &mut Frame,
    area: Rect,
    opportunities: &[Opportunity],
    table_state: &mut TableState,
    notice: Option<&str>,
) {
    let title = match notice {
        Some(n) => format!(" {} listings | {} ", opportunities.len(), n),
        None => format!(
            " {} listings (PgUp/PgDn=scroll, Ctrl+E=export, Enter=new search) ",
            opportunities.len()
        ),
    };

    if opportunities.is_empty() {
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from("No opportunities found. Try adjusting your search criteria."),
        ])
        .alignment(Alignment::Center)
        .block(panel(&title, Color::Green));
        frame.render_widget(paragraph, area);
        return;
    }

    let brief_width = (area.width as usize * 2 / 5).max(20);
    let rows: Vec<Row> = opportunities
        .iter()
        .map(|opp| {
            let brief = textwrap::wrap(&opp.brief, brief_width)
                .first()
                .map(|l| l.to_string())
                .unwrap_or_default();
            Row::new(vec![
                Cell::from(format!("{}\n{}", opp.title, brief)),
                Cell::from(format!("{}\n{}", opp.organization, opp.focus_area)),
                Cell::from(format!("{}\n{}", opp.region, opp.budget)),
                Cell::from(format!("{}\n{}", opp.deadline, opp.kind)),
                Cell::from(opp.link.clone()),
            ])
            .height(2)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Percentage(20),
            Constraint::Percentage(15),
            Constraint::Length(12),
            Constraint::Percentage(25),
        ],
    )
    .header(
        Row::new(["Opportunity", "Organization", "Region/Budget", "Deadline", "Link"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .highlight_style(Style::default().bg(Color::DarkGray))
    .block(panel(&title, Color::Green));

    frame.render_stateful_widget(table, area, table_state);
}

fn render_sources(frame: &mut Frame, area: Rect, sources: &[Source]) {
    let items: Vec<ListItem> = sources
        .iter()
        .map(|source| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    source.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    source.uri.clone(),
                    Style::default().fg(Color::Blue),
                )),
            ])
        })
        .collect();

    let list = List::new(items).block(panel(
        &format!(" Sources ({}) ", sources.len()),
        Color::Blue,
    ));
    frame.render_widget(list, area);
}

fn panel(title: &str, color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title.to_string())
        .border_style(Style::default().fg(color))
}
