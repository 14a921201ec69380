use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use crate::search::SearchOutcome;

use super::app::{AppState, NoteFocus, StatusKind, Tab};

const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
const COLOR_MUTED_DARK: Color = Color::Rgb(118, 124, 130);
const COLOR_BG_MUTED: Color = Color::Rgb(52, 56, 60);
const COLOR_INFO: Color = Color::Rgb(116, 198, 219);
const COLOR_WARNING: Color = Color::Rgb(244, 200, 98);
const COLOR_ERROR: Color = Color::Rgb(255, 107, 107);
const COLOR_SUCCESS: Color = Color::Rgb(126, 210, 146);
const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);
const COLOR_BORDER_LIST: Color = Color::Rgb(92, 126, 166);

const HELP_TEXT: &str = "\
Welcome to your notebook!

Notes
  Write a title and some content, then save with Ctrl+S.
  Load a note by title (Ctrl+L) or pick one from the saved list.
  Ctrl+N starts a new note, Ctrl+D deletes the current one.

Calculator
  Type digits and + - * / . ( ), then press Enter or =.
  c or Delete clears, Backspace removes the last key.

To-Do
  Type a task and press Enter to add it.
  Space selects the highlighted task, Ctrl+D marks selected done,
  Delete removes them.

Search
  Type a keyword and press Enter to search titles and content.

Everything is saved to JSON files as you go.";

pub fn render(frame: &mut Frame, app: &AppState) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);

    render_tabs(frame, app, chunks[0]);
    match app.tab {
        Tab::Notes => render_notes(frame, app, chunks[1]),
        Tab::Calculator => render_calculator(frame, app, chunks[1]),
        Tab::Todo => render_todo(frame, app, chunks[1]),
        Tab::Search => render_search(frame, app, chunks[1]),
        Tab::Help => render_help(frame, chunks[1]),
    }
    render_footer(frame, app, chunks[2]);
}

fn render_tabs(frame: &mut Frame, app: &AppState, area: Rect) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(idx, tab)| Line::from(format!("F{} {}", idx + 1, tab.title())))
        .collect();
    let widget = Tabs::new(titles)
        .select(app.tab.index())
        .style(Style::default().fg(COLOR_MUTED))
        .highlight_style(
            Style::default()
                .fg(COLOR_INFO)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider(Span::styled("  ", Style::default().fg(COLOR_MUTED_DARK)))
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(COLOR_BG_MUTED)),
        );
    frame.render_widget(widget, area);
}

fn field_block(title: &str, focused: bool) -> Block<'_> {
    let color = if focused { COLOR_ACCENT } else { COLOR_BG_MUTED };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title)
}

/// Input text with a trailing cursor block when focused
fn input_line(text: &str, focused: bool) -> Line<'_> {
    let mut spans = vec![Span::styled(text, Style::default().fg(COLOR_TEXT))];
    if focused {
        spans.push(Span::styled("_", Style::default().fg(COLOR_ACCENT)));
    }
    Line::from(spans)
}

fn render_notes(frame: &mut Frame, app: &AppState, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)].as_ref())
        .split(area);
    let editor = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(columns[0]);

    let title_focused = app.note_focus == NoteFocus::Title;
    let title = Paragraph::new(input_line(&app.note_title, title_focused))
        .block(field_block("Title", title_focused));
    frame.render_widget(title, editor[0]);

    let content_focused = app.note_focus == NoteFocus::Content;
    let mut lines: Vec<Line> = app.note_content.split('\n').map(Line::from).collect();
    if content_focused {
        if let Some(last) = lines.last_mut() {
            last.spans
                .push(Span::styled("_", Style::default().fg(COLOR_ACCENT)));
        }
    }
    let content = Paragraph::new(lines)
        .style(Style::default().fg(COLOR_TEXT))
        .wrap(Wrap { trim: false })
        .block(field_block("Content", content_focused));
    frame.render_widget(content, editor[1]);

    let list_focused = app.note_focus == NoteFocus::List;
    let titles = app.book.notes.list();
    let list_title = format!("Saved notes ({})", titles.len());
    let items: Vec<ListItem> = titles.into_iter().map(ListItem::new).collect();
    let list = List::new(items)
        .block(field_block(&list_title, list_focused))
        .style(Style::default().fg(COLOR_TEXT))
        .highlight_style(highlight(list_focused));
    let mut state = ListState::default().with_selected(app.note_selected);
    frame.render_stateful_widget(list, columns[1], &mut state);
}

fn highlight(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::REVERSED)
    } else {
        Style::default().fg(COLOR_ACCENT)
    }
}

fn render_calculator(frame: &mut Frame, app: &AppState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    let shown = app.calculator.display();
    let style = if shown == crate::calc::ERROR {
        Style::default().fg(COLOR_ERROR).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(COLOR_TEXT).add_modifier(Modifier::BOLD)
    };
    let display = Paragraph::new(Span::styled(shown, style))
        .alignment(Alignment::Right)
        .block(field_block("Calculator", true));
    frame.render_widget(display, rows[0]);

    let keypad = [
        "7  8  9  /",
        "4  5  6  *",
        "1  2  3  -",
        "0  .  =  +",
        "(  )  C  CE",
    ];
    let mut lines: Vec<Line> = keypad
        .iter()
        .map(|row| Line::from(Span::styled(*row, Style::default().fg(COLOR_MUTED))))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "enter/= evaluate  c/del clear  backspace clear last",
        Style::default().fg(COLOR_MUTED_DARK),
    )));
    let widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(widget, rows[1]);
}

fn render_todo(frame: &mut Frame, app: &AppState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    let input = Paragraph::new(input_line(&app.todo_input, true))
        .block(field_block("New task", true));
    frame.render_widget(input, rows[0]);

    let tasks = app.book.tasks.list();
    let done = tasks.iter().filter(|task| task.done).count();
    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let marked = app.todo_marked.contains(&idx);
            let mut style = if task.done {
                Style::default().fg(COLOR_SUCCESS)
            } else {
                Style::default().fg(COLOR_TEXT)
            };
            if marked {
                style = style.fg(COLOR_WARNING).add_modifier(Modifier::BOLD);
            }
            let prefix = if marked { "* " } else { "  " };
            ListItem::new(Line::from(Span::styled(format!("{prefix}{task}"), style)))
        })
        .collect();
    let title = format!("To-do ({done}/{} done)", tasks.len());
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER_LIST))
                .title(title),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(app.todo_cursor);
    frame.render_stateful_widget(list, rows[1], &mut state);
}

fn render_search(frame: &mut Frame, app: &AppState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    let input = Paragraph::new(input_line(&app.search_input, true))
        .block(field_block("Keyword", true));
    frame.render_widget(input, rows[0]);

    let mut lines = Vec::new();
    match app.search_outcome.as_ref() {
        None => {}
        Some(SearchOutcome::NoMatches) => lines.push(Line::from(Span::styled(
            "No matches found.",
            Style::default().fg(COLOR_MUTED),
        ))),
        Some(SearchOutcome::Found(hits)) => {
            for hit in hits {
                lines.push(Line::from(Span::styled(
                    hit.title.as_str(),
                    Style::default()
                        .fg(COLOR_ACCENT)
                        .add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(Span::styled(
                    hit.snippet.as_str(),
                    Style::default().fg(COLOR_TEXT),
                )));
                lines.push(Line::from(""));
            }
        }
    }
    let results = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER_LIST))
                .title("Results"),
        );
    frame.render_widget(results, rows[1]);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new(HELP_TEXT)
        .style(Style::default().fg(COLOR_TEXT))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER_LIST))
                .title("Help"),
        );
    frame.render_widget(widget, area);
}

fn footer_hint(tab: Tab) -> &'static str {
    match tab {
        Tab::Notes => "tab focus  ^s save  ^l load  ^n new  ^d delete  ^q quit",
        Tab::Calculator => "enter evaluate  c clear  backspace clear last  ^q quit",
        Tab::Todo => "enter add  space select  ^d done  del delete  ^q quit",
        Tab::Search => "enter search  ^q quit",
        Tab::Help => "F1-F5 switch tabs  ^q quit",
    }
}

fn render_footer(frame: &mut Frame, app: &AppState, area: Rect) {
    let hint_span = Span::styled(footer_hint(app.tab), Style::default().fg(COLOR_INFO));
    let line = if let Some((kind, status)) = app.status() {
        let status_style = match kind {
            StatusKind::Error => Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
            StatusKind::Info => Style::default().fg(COLOR_WARNING),
        };
        Line::from(vec![
            hint_span,
            Span::raw("  |  "),
            Span::styled(status, status_style),
        ])
    } else {
        Line::from(hint_span)
    };
    let widget = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(COLOR_BORDER_LIST)),
    );
    frame.render_widget(widget, area);
}
