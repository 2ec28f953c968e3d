use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::config::{ColorConfig, Config};
use crate::domain::Article;
use crate::tui::app::{ActivePane, InputMode, TuiApp};
use crate::tui::grid::{self, CARD_HEIGHT};

/// Placeholder cards drawn while a query is in flight.
const SKELETON_CARDS: usize = 9;

pub fn render(frame: &mut Frame, app: &mut TuiApp, config: &Config) {
    let colors = config.theme.palette(app.controller.state().theme).clone();

    frame.render_widget(
        Block::default().style(Style::default().bg(colors.background)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Theme button and search box
            Constraint::Min(CARD_HEIGHT),
            Constraint::Length(1), // Pager
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(chunks[1]);

    render_header(frame, app, chunks[0], &colors);
    render_articles_pane(frame, app, body[0], &colors);
    render_history_pane(frame, app, body[1], &colors);
    render_pager(frame, app, chunks[2], &colors);
    render_status_bar(frame, app, chunks[3], &colors);
}

fn pane_border(active: bool, colors: &ColorConfig) -> Style {
    if active {
        Style::default().fg(colors.highlight)
    } else {
        Style::default().fg(colors.border)
    }
}

fn render_header(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(16), Constraint::Min(10)])
        .split(area);

    let theme_button = Paragraph::new(app.controller.state().theme.toggle_label())
        .style(Style::default().fg(colors.text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border)),
        );
    frame.render_widget(theme_button, chunks[0]);

    let searching = app.input_mode == InputMode::Search;
    let text = if searching {
        app.search_input.as_str()
    } else {
        app.controller.state().search_term.as_str()
    };
    let search_box = Paragraph::new(text)
        .style(Style::default().fg(colors.text))
        .block(
            Block::default()
                .title(" Cari Berita ")
                .borders(Borders::ALL)
                .border_style(pane_border(searching, colors)),
        );
    frame.render_widget(search_box, chunks[1]);

    if searching {
        let width = app.search_input.chars().count() as u16;
        let x = (chunks[1].x + 1 + width).min(chunks[1].right().saturating_sub(2));
        frame.set_cursor_position(Position::new(x, chunks[1].y + 1));
    }
}

fn render_articles_pane(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    let is_active = app.active_pane == ActivePane::Articles && app.input_mode == InputMode::Normal;
    let state = app.controller.state();

    let title = if state.search_term.is_empty() {
        format!(" Berita ({}) ", state.total_results)
    } else {
        format!(" Berita: \"{}\" ({}) ", state.search_term, state.total_results)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(pane_border(is_active, colors));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = grid::columns_for_width(inner.width);
    let visible_rows = usize::from((inner.height / CARD_HEIGHT).max(1));
    app.grid_columns = columns;

    let state = app.controller.state();
    if state.loading {
        render_grid(frame, inner, columns, 0, SKELETON_CARDS, visible_rows, |frame, _, rect| {
            render_skeleton(frame, rect, colors)
        });
        return;
    }

    if state.articles.is_empty() {
        let empty = Paragraph::new("Tidak ada berita.").style(Style::default().fg(colors.muted));
        frame.render_widget(empty, inner);
        return;
    }

    let (selected_row, _) = grid::position(app.article_index, columns);
    app.grid_scroll = grid::scroll_for(selected_row, app.grid_scroll, visible_rows);

    let articles = &app.controller.state().articles;
    let selected = app.article_index;
    render_grid(
        frame,
        inner,
        columns,
        app.grid_scroll,
        articles.len(),
        visible_rows,
        |frame, index, rect| {
            render_card(frame, &articles[index], rect, is_active && index == selected, colors)
        },
    );
}

/// Lay out `len` cards in rows starting at `first_row` and draw each with `draw`.
fn render_grid<F>(
    frame: &mut Frame,
    area: Rect,
    columns: usize,
    first_row: usize,
    len: usize,
    visible_rows: usize,
    mut draw: F,
) where
    F: FnMut(&mut Frame, usize, Rect),
{
    let last_row = grid::row_count(len, columns).min(first_row + visible_rows);
    for (slot, row) in (first_row..last_row).enumerate() {
        let y = area.y + slot as u16 * CARD_HEIGHT;
        let height = CARD_HEIGHT.min(area.bottom().saturating_sub(y));
        if height == 0 {
            break;
        }
        let row_area = Rect::new(area.x, y, area.width, height);

        let range = grid::row_range(row, len, columns);
        let slots = if row == 0 { 1 } else { columns };
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, slots as u32); slots])
            .split(row_area);

        for (cell, index) in cells.iter().zip(range) {
            draw(frame, index, *cell);
        }
    }
}

fn render_card(
    frame: &mut Frame,
    article: &Article,
    area: Rect,
    selected: bool,
    colors: &ColorConfig,
) {
    let mut meta = vec![Span::styled(
        article.display_author().to_string(),
        Style::default().fg(colors.meta),
    )];
    meta.push(Span::styled(
        format!(" · {}", article.display_published_at()),
        Style::default().fg(colors.muted),
    ));
    if article.has_image() {
        meta.push(Span::styled(" [img]", Style::default().fg(colors.muted)));
    }

    let lines = vec![
        Line::from(Span::styled(
            article.display_title().to_string(),
            Style::default().fg(colors.title).add_modifier(Modifier::BOLD),
        )),
        Line::from(meta),
        Line::from(Span::styled(
            article.display_description().to_string(),
            Style::default().fg(colors.text),
        )),
    ];

    let border_style = if selected {
        Style::default().fg(colors.highlight).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.border)
    };

    let card = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(border_style));
    frame.render_widget(card, area);
}

fn render_skeleton(frame: &mut Frame, area: Rect, colors: &ColorConfig) {
    let bar = |fraction: u16| {
        let width = area.width.saturating_sub(2) * fraction / 4;
        Line::from(Span::styled(
            "░".repeat(usize::from(width)),
            Style::default().fg(colors.muted),
        ))
    };
    let skeleton = Paragraph::new(Text::from(vec![bar(3), bar(2), bar(4)])).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.border)),
    );
    frame.render_widget(skeleton, area);
}

fn render_history_pane(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    let is_active = app.active_pane == ActivePane::History && app.input_mode == InputMode::Normal;
    let history = &app.controller.state().history;

    let items: Vec<ListItem> = history
        .iter()
        .map(|article| {
            ListItem::new(Text::from(vec![
                Line::from(Span::styled(
                    article.display_title().to_string(),
                    Style::default().fg(colors.text),
                )),
                Line::from(Span::styled(
                    article.url.clone(),
                    Style::default().fg(colors.link),
                )),
            ]))
        })
        .collect();

    let block = Block::default()
        .title(format!(" Berita yang Pernah Dibaca ({}) ", history.len()))
        .borders(Borders::ALL)
        .border_style(pane_border(is_active, colors));

    let highlight_style = if is_active {
        Style::default()
            .fg(colors.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style)
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.history_list_state);
}

fn render_pager(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let controller = &app.controller;
    let mut spans = Vec::new();
    if controller.has_prev_page() {
        spans.push(Span::styled("[p] Back Page", Style::default().fg(colors.link)));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(
        format!("Halaman {}", controller.state().page),
        Style::default().fg(colors.meta),
    ));
    if controller.has_next_page() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("[n] Next Page", Style::default().fg(colors.link)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let status = if app.input_mode == InputMode::Search {
        "Enter:Search  Esc:Cancel".to_string()
    } else if let Some(ref msg) = app.status_message {
        msg.clone()
    } else if app.controller.state().loading {
        "Loading...".to_string()
    } else {
        "hjkl:Nav  Tab:Pane  o:Open  /:Search  n/p:Page  t:Theme  R:Headlines  d:Delete  q:Quit"
            .to_string()
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    frame.render_widget(paragraph, area);
}
