// UI rendering logic
use crate::{App, InputMode, Screen};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};
use storefront_core::Product;

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Screen body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    match app.screen {
        Screen::Listing => render_listing(frame, app, chunks[1]),
        Screen::Detail => render_detail(frame, app, chunks[1]),
        Screen::Favorites => render_favorites(frame, app, chunks[1]),
    }

    render_status_bar(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let tab_style = |screen: Screen| {
        if app.screen == screen {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    };

    let line = Line::from(vec![
        Span::styled(
            " Storefront ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Products", tab_style(Screen::Listing)),
        Span::raw("  |  "),
        Span::styled(
            format!("Favorites ({})", app.store.favorites_count()),
            tab_style(Screen::Favorites),
        ),
    ]);

    let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_listing(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search input
            Constraint::Length(1), // Filter summary
            Constraint::Min(3),    // Results
        ])
        .split(area);

    render_search_input(frame, app, chunks[0]);
    render_filter_summary(frame, app, chunks[1]);
    render_results_list(frame, app, chunks[2]);
}

fn render_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let input_style = match app.input_mode {
        InputMode::Searching => Style::default().fg(Color::Yellow),
        InputMode::Normal => Style::default(),
    };

    let input = Paragraph::new(app.search_input.as_str())
        .style(input_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Search by title (/ to type, ENTER to apply now)")
                .border_style(input_style),
        );

    frame.render_widget(input, area);

    if app.input_mode == InputMode::Searching {
        frame.set_cursor_position((
            area.x + app.search_input.chars().count() as u16 + 1,
            area.y + 1,
        ));
    }
}

fn render_filter_summary(frame: &mut Frame, app: &App, area: Rect) {
    let filters = app.store.filters();
    let category = if filters.selected_category().is_empty() {
        "All Categories".to_string()
    } else {
        capitalize(filters.selected_category())
    };

    let mut spans = vec![
        Span::styled(" Category: ", Style::default().fg(Color::Gray)),
        Span::styled(category, Style::default().fg(Color::Cyan)),
        Span::styled("   Sort: ", Style::default().fg(Color::Gray)),
        Span::styled(filters.sort_by().label(), Style::default().fg(Color::Cyan)),
    ];

    if filters.is_active() {
        spans.push(Span::styled(
            "   [x] Reset Filters",
            Style::default().fg(Color::Magenta),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_results_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let catalog = app.store.catalog();

    if catalog.is_loading_products() && catalog.items().is_empty() {
        render_message(frame, area, " Products ", "Loading products...", Color::Cyan);
        return;
    }

    if let Some(error) = catalog.products_error() {
        let text = format!("Error: {}\n\nPress r to retry", error);
        render_message(frame, area, " Products ", &text, Color::Red);
        return;
    }

    let products = app.store.visible_products();
    if products.is_empty() {
        render_message(frame, area, " Products ", "No products found.", Color::DarkGray);
        return;
    }

    let title = format!(" Products ({}) ", products.len());
    let items: Vec<ListItem> = products
        .iter()
        .map(|product| product_row(product, app.store.is_favorite(product.id)))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let catalog = app.store.catalog();

    if catalog.is_loading_product() {
        render_message(frame, area, " Product ", "Loading product...", Color::Cyan);
        return;
    }

    let product = match (catalog.selected_product(), catalog.product_error()) {
        (Some(product), _) => product,
        (None, error) => {
            let text = format!(
                "{}\n\nPress r to retry, ESC to go back",
                error.unwrap_or("Product not found")
            );
            render_message(frame, area, " Product ", &text, Color::Red);
            return;
        }
    };

    let favorite = if app.store.is_favorite(product.id) {
        Span::styled("♥ In favorites (f to remove)", Style::default().fg(Color::Red))
    } else {
        Span::styled("♡ Add to favorites (f)", Style::default().fg(Color::Gray))
    };

    let lines = vec![
        Line::from(Span::styled(
            product.title.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("${:.2}", product.price),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("★ ", Style::default().fg(Color::Yellow)),
            Span::raw(product.rating_label()),
            Span::raw("   "),
            Span::styled(capitalize(&product.category), Style::default().fg(Color::Magenta)),
        ]),
        Line::from(""),
        Line::from(product.description.clone()),
        Line::from(""),
        Line::from(Span::styled(product.image.clone(), Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(favorite),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Product "))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_favorites(frame: &mut Frame, app: &mut App, area: Rect) {
    let favorites = app.store.favorites();

    if favorites.is_empty() {
        render_message(
            frame,
            area,
            " Favorites ",
            "You haven't added any favorites yet.\n\nBrowse products and press f to add them!",
            Color::DarkGray,
        );
        return;
    }

    let title = format!(" Favorites ({}) ", favorites.len());
    let items: Vec<ListItem> = favorites
        .items()
        .iter()
        .map(|product| product_row(product, true))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.favorites_state);
}

fn product_row(product: &Product, favorite: bool) -> ListItem<'static> {
    let marker = if favorite {
        Span::styled("♥ ", Style::default().fg(Color::Red))
    } else {
        Span::raw("  ")
    };

    ListItem::new(Line::from(vec![
        marker,
        Span::styled(
            format!("{:>9}", format!("${:.2}", product.price)),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  "),
        Span::styled(product.title.clone(), Style::default().fg(Color::White)),
        Span::styled(
            format!("  [{}]", product.category),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
}

fn render_message(frame: &mut Frame, area: Rect, title: &str, text: &str, color: Color) {
    let paragraph = Paragraph::new(text.to_string())
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = match (app.input_mode, app.screen) {
        (InputMode::Searching, _) => Span::styled(
            "SEARCH | type to filter | ENTER: apply | ESC: done",
            Style::default().fg(Color::Yellow),
        ),
        (InputMode::Normal, Screen::Listing) => Span::raw(
            "j/k: navigate | /: search | c: category | s: sort | x: reset | f: favorite | F: favorites | ENTER: details | q: quit",
        ),
        (InputMode::Normal, Screen::Detail) => {
            Span::raw("f: toggle favorite | r: retry | ESC: back | q: quit")
        }
        (InputMode::Normal, Screen::Favorites) => Span::raw(
            "j/k: navigate | ENTER: details | d: remove | C: clear all | ESC: products | q: quit",
        ),
    };

    frame.render_widget(Paragraph::new(Line::from(status)), area);
}

/// "men's clothing" -> "Men's clothing"
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
