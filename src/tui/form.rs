use crate::discover::filters::{OutputFormat, SearchFilters};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};
use tui_textarea::TextArea;

/// Sector catalog offered by the form
const SECTORS: [&str; 8] = [
    "Livelihood",
    "Women Empowerment",
    "Education",
    "Health",
    "Climate-resilient Agriculture",
    "Agriculture",
    "Skill Development",
    "Water & Sanitation",
];

/// Region catalog offered by the form
const REGIONS: [&str; 5] = [
    "Pan-India",
    "Uttarakhand",
    "Himachal Pradesh",
    "North East India",
    "Aspirational Districts",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormFocus {
    Sectors,
    Regions,
    Deadline,
    Organization,
    Format,
}

impl FormFocus {
    fn next(self) -> Self {
        match self {
            FormFocus::Sectors => FormFocus::Regions,
            FormFocus::Regions => FormFocus::Deadline,
            FormFocus::Deadline => FormFocus::Organization,
            FormFocus::Organization => FormFocus::Format,
            FormFocus::Format => FormFocus::Sectors,
        }
    }

    fn prev(self) -> Self {
        match self {
            FormFocus::Sectors => FormFocus::Format,
            FormFocus::Regions => FormFocus::Sectors,
            FormFocus::Deadline => FormFocus::Regions,
            FormFocus::Organization => FormFocus::Deadline,
            FormFocus::Format => FormFocus::Organization,
        }
    }
}

/// Interactive filter form.
///
/// Collects the search intent and snapshots it into `SearchFilters` on
/// submit. The form itself never talks to the network.
pub struct FilterForm {
    sectors: Vec<(String, bool)>,
    regions: Vec<(String, bool)>,
    sector_cursor: usize,
    region_cursor: usize,
    deadline: TextArea<'static>,
    organization: TextArea<'static>,
    output_format: OutputFormat,
    focus: FormFocus,
}

impl FilterForm {
    pub fn new() -> Self {
        let defaults = SearchFilters::default();

        let sectors = SECTORS
            .iter()
            .map(|s| (s.to_string(), defaults.sectors.iter().any(|d| d == s)))
            .collect();
        let regions = REGIONS
            .iter()
            .map(|r| (r.to_string(), defaults.geography.iter().any(|d| d == r)))
            .collect();

        let mut deadline = TextArea::default();
        deadline.insert_str(&defaults.deadline);

        Self {
            sectors,
            regions,
            sector_cursor: 0,
            region_cursor: 0,
            deadline,
            organization: TextArea::default(),
            output_format: defaults.output_format,
            focus: FormFocus::Sectors,
        }
    }

    /// Snapshot the current form values
    pub fn to_filters(&self) -> SearchFilters {
        SearchFilters {
            sectors: selected(&self.sectors),
            geography: selected(&self.regions),
            deadline: first_line(&self.deadline),
            specific_organization: first_line(&self.organization),
            output_format: self.output_format,
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    /// Handle keyboard input. Enter never reaches here; the app treats it
    /// as submit.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return;
            }
            _ => {}
        }

        match self.focus {
            FormFocus::Sectors => {
                handle_list_key(key, &mut self.sectors, &mut self.sector_cursor)
            }
            FormFocus::Regions => {
                handle_list_key(key, &mut self.regions, &mut self.region_cursor)
            }
            FormFocus::Deadline => {
                self.deadline.input(key);
            }
            FormFocus::Organization => {
                self.organization.input(key);
            }
            FormFocus::Format => {
                if matches!(key.code, KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right) {
                    self.output_format = self.output_format.next();
                }
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, generating: bool) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Search Filters (Tab=section, Space=toggle, Enter=search) ")
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(SECTORS.len() as u16 + 2),
                Constraint::Length(REGIONS.len() as u16 + 2),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(1),
            ])
            .split(inner);

        self.render_checklist(
            frame,
            chunks[0],
            "Target Sectors",
            FormFocus::Sectors,
        );
        self.render_checklist(
            frame,
            chunks[1],
            "Geographic Focus",
            FormFocus::Regions,
        );
        self.render_text_field(frame, chunks[2], "Deadline (YYYY-MM-DD)", FormFocus::Deadline);
        self.render_text_field(
            frame,
            chunks[3],
            "Organization (optional)",
            FormFocus::Organization,
        );
        self.render_format(frame, chunks[4]);

        let hint = if generating {
            Line::from(Span::styled(
                "Searching... submit disabled",
                Style::default().fg(Color::Yellow),
            ))
        } else {
            Line::from(Span::styled(
                "Press Enter to search",
                Style::default().fg(Color::Green),
            ))
        };
        frame.render_widget(Paragraph::new(hint), chunks[5]);
    }

    fn render_checklist(&self, frame: &mut Frame, area: Rect, title: &str, focus: FormFocus) {
        let focused = self.focus == focus;
        let (entries, cursor) = match focus {
            FormFocus::Sectors => (&self.sectors, self.sector_cursor),
            _ => (&self.regions, self.region_cursor),
        };

        let items: Vec<ListItem> = entries
            .iter()
            .enumerate()
            .map(|(i, (name, checked))| {
                let marker = if *checked { "[x]" } else { "[ ]" };
                let mut style = Style::default();
                if focused && i == cursor {
                    style = style.fg(Color::LightBlue).add_modifier(Modifier::BOLD);
                }
                ListItem::new(Line::from(Span::styled(
                    format!("{marker} {name}"),
                    style,
                )))
            })
            .collect();

        let list = List::new(items).block(section_block(title, focused));
        frame.render_widget(list, area);
    }

    fn render_text_field(&mut self, frame: &mut Frame, area: Rect, title: &str, focus: FormFocus) {
        let focused = self.focus == focus;
        let textarea = match focus {
            FormFocus::Deadline => &mut self.deadline,
            _ => &mut self.organization,
        };
        textarea.set_block(section_block(title, focused));
        textarea.set_cursor_line_style(Style::default());
        textarea.set_cursor_style(if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        });
        frame.render_widget(&*textarea, area);
    }

    fn render_format(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == FormFocus::Format;
        let text = Line::from(vec![
            Span::raw("Export format: "),
            Span::styled(
                self.output_format.label(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  (Space to change)"),
        ]);
        let paragraph = Paragraph::new(text).block(section_block("Output", focused));
        frame.render_widget(paragraph, area);
    }
}

impl Default for FilterForm {
    fn default() -> Self {
        Self::new()
    }
}

fn section_block(title: &str, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(Color::LightBlue)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {title} "))
        .border_style(border)
}

fn handle_list_key(key: KeyEvent, entries: &mut [(String, bool)], cursor: &mut usize) {
    match key.code {
        KeyCode::Up => {
            *cursor = cursor.saturating_sub(1);
        }
        KeyCode::Down => {
            if *cursor + 1 < entries.len() {
                *cursor += 1;
            }
        }
        KeyCode::Char(' ') => {
            if let Some(entry) = entries.get_mut(*cursor) {
                entry.1 = !entry.1;
            }
        }
        _ => {}
    }
}

fn selected(entries: &[(String, bool)]) -> Vec<String> {
    entries
        .iter()
        .filter(|(_, checked)| *checked)
        .map(|(name, _)| name.clone())
        .collect()
}

fn first_line(textarea: &TextArea<'_>) -> String {
    textarea
        .lines()
        .first()
        .map(|l| l.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_filter_defaults() {
        let form = FilterForm::new();
        let filters = form.to_filters();
        let defaults = SearchFilters::default();
        assert_eq!(filters.sectors, defaults.sectors);
        assert_eq!(filters.geography, defaults.geography);
        assert_eq!(filters.specific_organization, "");
    }

    #[test]
    fn space_toggles_focused_sector() {
        let mut form = FilterForm::new();
        let before = form.to_filters().sectors.len();

        // First sector is selected by default; Space deselects it.
        form.handle_key(KeyEvent::from(KeyCode::Char(' ')));
        assert_eq!(form.to_filters().sectors.len(), before - 1);
    }

    #[test]
    fn tab_cycles_back_to_start() {
        let mut form = FilterForm::new();
        for _ in 0..5 {
            form.handle_key(KeyEvent::from(KeyCode::Tab));
        }
        assert_eq!(form.focus, FormFocus::Sectors);
    }
}
