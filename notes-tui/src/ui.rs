//! UI rendering with Ratatui.
//!
//! Design: Minimal black and white aesthetic. No colored borders.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Field, Focus, TextForm, View};
use crate::client::NotesApi;

/// Render the application UI.
pub fn render<A: NotesApi>(frame: &mut Frame, app: &App<A>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Create form
            Constraint::Min(0),    // Notes
            Constraint::Length(1), // Status bar (single line, no border)
        ])
        .split(frame.area());

    render_create_form(frame, app, chunks[0]);
    render_notes(frame, app, chunks[1]);
    render_status(frame, app, chunks[2]);

    match &app.view {
        View::Editing(draft) => render_edit_modal(frame, &draft.form),
        View::ConfirmDelete(note) => render_confirm(frame, &note.title),
        View::Loading | View::Ready => {}
    }
}

fn field_line<'a>(label: &'a str, value: &'a str, active: bool) -> Line<'a> {
    let label_style = if active {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    let cursor = if active { "_" } else { "" };

    Line::from(vec![
        Span::styled(format!("{label:>8} "), label_style),
        Span::raw(value),
        Span::raw(cursor),
    ])
}

fn form_lines(form: &TextForm, active: bool) -> Vec<Line<'_>> {
    vec![
        field_line("title", &form.title, active && form.field == Field::Title),
        field_line("content", &form.content, active && form.field == Field::Content),
    ]
}

fn render_create_form<A: NotesApi>(frame: &mut Frame, app: &App<A>, area: Rect) {
    let active = app.view == View::Ready && app.focus == Focus::CreateForm;
    let title = if active { " new note " } else { " new note (n) " };

    let form = Paragraph::new(form_lines(&app.create_form, active))
        .block(Block::default().title(title).borders(Borders::ALL));

    frame.render_widget(form, area);
}

fn render_notes<A: NotesApi>(frame: &mut Frame, app: &App<A>, area: Rect) {
    let block = Block::default().title(" notes ").borders(Borders::ALL);

    if app.view == View::Loading {
        frame.render_widget(Paragraph::new("  loading...").block(block), area);
        return;
    }
    if app.notes.is_empty() {
        frame.render_widget(Paragraph::new("  no notes yet").block(block), area);
        return;
    }

    let items: Vec<ListItem> = app
        .notes
        .iter()
        .map(|note| {
            let created = note.created_at.format("%Y-%m-%d %H:%M");
            let bold = Style::default().add_modifier(Modifier::BOLD);
            let dim = Style::default().add_modifier(Modifier::DIM);
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(note.title.as_str(), bold),
                    Span::styled(format!("  {created}"), dim),
                ]),
                Line::from(format!("  {}", note.content)),
            ])
        })
        .collect();

    let highlight = if app.focus == Focus::List {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    let list = List::new(items).block(block).highlight_style(highlight);
    let mut state = ListState::default().with_selected(Some(app.selected));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_edit_modal(frame: &mut Frame, form: &TextForm) {
    let area = centered(frame.area(), 60, 6);
    let modal = Paragraph::new(form_lines(form, true))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" edit note (enter save, esc cancel) ")
                .borders(Borders::ALL),
        );

    frame.render_widget(Clear, area);
    frame.render_widget(modal, area);
}

fn render_confirm(frame: &mut Frame, title: &str) {
    let area = centered(frame.area(), 50, 3);
    let prompt = Paragraph::new(format!(" delete \"{title}\"? (y/n)"))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(Clear, area);
    frame.render_widget(prompt, area);
}

/// Render the status bar.
fn render_status<A: NotesApi>(frame: &mut Frame, app: &App<A>, area: Rect) {
    let status_text = if let Some(ref status) = app.status {
        Line::from(Span::styled(
            status.as_str(),
            Style::default().add_modifier(Modifier::DIM),
        ))
    } else {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let key = |k: &'static str| Span::styled(k, bold);
        Line::from(vec![
            key("n"),
            Span::raw(" new  "),
            key("e"),
            Span::raw(" edit  "),
            key("d"),
            Span::raw(" delete  "),
            key("r"),
            Span::raw(" refresh  "),
            key("esc"),
            Span::raw(" quit"),
        ])
    };

    frame.render_widget(Paragraph::new(status_text), area);
}

/// A `width` x `height` rectangle centered in `area`, clipped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
