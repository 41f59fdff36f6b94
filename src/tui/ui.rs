use chrono::Datelike;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Map, MapResolution, Points},
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, List, ListItem,
        ListState, Paragraph, Wrap,
    },
    Frame,
};

use crate::app::{App, Page};
use crate::models::{
    ChartResult, NoDataReason, RoastLevelShare, RoasterCount, RoasterLocation, WeightPoint,
    CUMULATIVE_WEIGHT_TITLE, PLACEHOLDER_TITLE, ROASTER_DISTRIBUTION_TITLE,
    ROASTER_LOCATIONS_TITLE, ROAST_LEVEL_TITLE,
};

// Continental US, widened as needed to fit every marker
const US_LON: [f64; 2] = [-125.0, -66.0];
const US_LAT: [f64; 2] = [24.0, 50.0];

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar with page tabs
            Constraint::Min(0),    // Page body
            Constraint::Length(1), // Status line
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    match app.page {
        Page::Beans => render_beans_page(frame, app, chunks[1]),
        Page::Roasters => render_roasters_page(frame, app, chunks[1]),
    }
    render_status(frame, app, chunks[2]);

    if app.show_help {
        render_help(frame);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Coffee Canary ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans: Vec<Span> = Vec::new();
    for page in Page::ALL {
        let style = if page == app.page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", page.label()), style));
        spans.push(Span::raw("|"));
    }
    spans.pop();
    spans.push(Span::styled(
        format!(
            "   {} bags | {} roasters",
            app.dashboard.purchase_count,
            app.dashboard.roasters.len()
        ),
        Style::default().fg(Color::White),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn render_beans_page(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    match &app.dashboard.cumulative_weight {
        ChartResult::Data(points) => render_cumulative_weight(frame, points, chunks[0]),
        ChartResult::NoData(reason) => render_placeholder(frame, reason, chunks[0]),
    }
    match &app.dashboard.roast_levels {
        ChartResult::Data(shares) => render_roast_levels(frame, shares, chunks[1]),
        ChartResult::NoData(reason) => render_placeholder(frame, reason, chunks[1]),
    }
}

fn render_roasters_page(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(2, 3)])
        .split(area);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(columns[1]);

    render_roaster_list(frame, app, columns[0]);
    match &app.dashboard.roaster_locations {
        ChartResult::Data(locations) => render_map(frame, app, locations, right[0]),
        ChartResult::NoData(reason) => render_placeholder(frame, reason, right[0]),
    }
    match &app.dashboard.roaster_distribution {
        ChartResult::Data(counts) => render_distribution(frame, counts, right[1]),
        ChartResult::NoData(reason) => render_placeholder(frame, reason, right[1]),
    }
}

fn chart_block(title: &str, color: Color) -> Block<'static> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

fn render_placeholder(frame: &mut Frame, reason: &NoDataReason, area: Rect) {
    let text = format!("\n{PLACEHOLDER_TITLE}\n\n({})", reason.describe());
    let paragraph = Paragraph::new(text)
        .block(chart_block(PLACEHOLDER_TITLE, Color::DarkGray))
        .style(Style::default().fg(Color::DarkGray))
        .centered()
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_cumulative_weight(frame: &mut Frame, points: &[WeightPoint], area: Rect) {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return;
    };

    let data: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (p.date.num_days_from_ce() as f64, p.cumulative_weight_grams))
        .collect();

    let mut x_bounds = [data[0].0, data[data.len() - 1].0];
    if x_bounds[0] == x_bounds[1] {
        x_bounds = [x_bounds[0] - 1.0, x_bounds[1] + 1.0];
    }
    let y_max = (last.cumulative_weight_grams * 1.1).max(1.0);

    let dataset = Dataset::default()
        .name("grams")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Yellow))
        .data(&data);

    let x_axis = Axis::default()
        .title("Date")
        .style(Style::default().fg(Color::Gray))
        .bounds(x_bounds)
        .labels(vec![
            Span::raw(first.date.to_string()),
            Span::raw(last.date.to_string()),
        ]);
    let y_axis = Axis::default()
        .title("Cumulative Weight (g)")
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, y_max])
        .labels(vec![
            Span::raw("0"),
            Span::raw(format!("{:.0}", y_max / 2.0)),
            Span::raw(format!("{:.0}", y_max)),
        ]);

    let chart = Chart::new(vec![dataset])
        .block(chart_block(CUMULATIVE_WEIGHT_TITLE, Color::Green))
        .x_axis(x_axis)
        .y_axis(y_axis);
    frame.render_widget(chart, area);
}

fn render_roast_levels(frame: &mut Frame, shares: &[RoastLevelShare], area: Rect) {
    let bars: Vec<Bar> = shares
        .iter()
        .map(|s| {
            Bar::default()
                .label(Line::from(s.roast_level.clone()))
                .value(s.count as u64)
                .text_value(format!("{} ({:.0}%)", s.count, s.proportion * 100.0))
        })
        .collect();

    let chart = BarChart::default()
        .block(chart_block(ROAST_LEVEL_TITLE, Color::Magenta))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .bar_style(Style::default().fg(Color::Magenta))
        .value_style(Style::default().fg(Color::Black).bg(Color::Magenta))
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

fn render_distribution(frame: &mut Frame, counts: &[RoasterCount], area: Rect) {
    let bars: Vec<Bar> = counts
        .iter()
        .map(|c| {
            Bar::default()
                .label(Line::from(c.roaster.clone()))
                .value(c.count as u64)
        })
        .collect();

    let chart = BarChart::default()
        .block(chart_block(ROASTER_DISTRIBUTION_TITLE, Color::Blue))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .bar_style(Style::default().fg(Color::Blue))
        .value_style(Style::default().fg(Color::Black).bg(Color::Blue))
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

fn render_map(frame: &mut Frame, app: &App, locations: &[RoasterLocation], area: Rect) {
    let coords: Vec<(f64, f64)> = locations.iter().map(|l| (l.longitude, l.latitude)).collect();
    let selected = app.selected_roaster().map(|r| r.name.as_str());

    let (x_bounds, y_bounds) = map_bounds(&coords);

    let canvas = Canvas::default()
        .block(chart_block(ROASTER_LOCATIONS_TITLE, Color::Red))
        .marker(symbols::Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            ctx.draw(&Map {
                color: Color::DarkGray,
                resolution: MapResolution::High,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &coords,
                color: Color::Red,
            });
            for loc in locations {
                let style = if Some(loc.roaster.as_str()) == selected {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                ctx.print(
                    loc.longitude,
                    loc.latitude,
                    Span::styled(loc.roaster.clone(), style),
                );
            }
        });
    frame.render_widget(canvas, area);
}

fn map_bounds(coords: &[(f64, f64)]) -> ([f64; 2], [f64; 2]) {
    let mut x = US_LON;
    let mut y = US_LAT;
    for &(lon, lat) in coords {
        x = [x[0].min(lon - 2.0), x[1].max(lon + 2.0)];
        y = [y[0].min(lat - 2.0), y[1].max(lat + 2.0)];
    }
    (
        [x[0].max(-180.0), x[1].min(180.0)],
        [y[0].max(-90.0), y[1].min(90.0)],
    )
}

fn render_roaster_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .dashboard
        .roasters
        .iter()
        .map(|roaster| {
            let place = match (&roaster.city, &roaster.state) {
                (Some(city), Some(state)) => format!(" {city}, {state}"),
                _ => String::new(),
            };
            let line = Line::from(vec![
                Span::styled(roaster.name.clone(), Style::default().fg(Color::White)),
                Span::styled(place, Style::default().fg(Color::Blue)),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title(" Roasters ").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !app.dashboard.roasters.is_empty() {
        state.select(Some(app.selected_roaster));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.page {
        Page::Beans => "tab:page  r:reload  ?:help  q:quit",
        Page::Roasters => "tab:page  j/k:nav  o:website  r:reload  ?:help  q:quit",
    };
    let text = match &app.status_message {
        Some(msg) => format!("{msg} | {hints}"),
        None => hints.to_string(),
    };

    let paragraph = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(50, 60, frame.area());

    let help_text = vec![
        "",
        " Pages:",
        "   Tab / l  Next page",
        "   S-Tab / h  Previous page",
        "",
        " Roasters:",
        "   j / ↓    Move down",
        "   k / ↑    Move up",
        "   < / >    First / last roaster",
        "   o        Open roaster website",
        "",
        " General:",
        "   r        Reload data",
        "   ?        Toggle this help",
        "   q        Quit",
        "",
        " Press any key to close",
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_text.join("\n"))
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(ratatui::widgets::Clear, area);
    frame.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
