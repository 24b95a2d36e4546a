use std::io::{self, BufRead};
use std::net::TcpStream;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyCode, KeyEvent,
        KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use flume::{Receiver, Sender};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color as TColor, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use uno_tres::client::{project, store::Notice, GameStore, Phase, TableView};
use uno_tres::game::cards::{Card, Color as UColor, WildKind};
use uno_tres::ports::bus::NoticeBus;
use uno_tres::protocol::{ClientIntent, ServerEvent};

// ---------------- App state ----------------
#[derive(Default)]
struct AppState {
    store: GameStore,
    cursor: usize,
    log: Vec<String>,
    input_hint: String,
    mode: UiMode,
    join_input: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum UiMode {
    #[default]
    Normal,
    JoinRoom,
}

impl AppState {
    fn push_log<S: Into<String>>(&mut self, s: S) {
        self.log.push(s.into());
    }

    fn clamp_cursor(&mut self) {
        let len = self.store.my_hand().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }
}

// ---------------- Helpers ----------------
fn map_color(c: UColor) -> TColor {
    match c {
        UColor::Red => TColor::Red,
        UColor::Green => TColor::Green,
        UColor::Blue => TColor::Blue,
        UColor::Yellow => TColor::Yellow,
    }
}

fn card_line(card: &Card, selected: bool) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    if selected {
        spans.push(Span::styled(
            "▶ ",
            Style::default()
                .fg(TColor::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    } else {
        spans.push(Span::raw("  "));
    }
    match card {
        Card::Colored(color, rank) => {
            let fg = map_color(*color);
            spans.push(Span::styled(
                format!("{:<7}", rank.code()),
                Style::default().fg(fg).add_modifier(if selected {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                }),
            ));
            spans.push(Span::styled(
                format!("{:?}", color),
                Style::default().fg(fg),
            ));
        }
        Card::Wild(kind) => {
            let label = match kind {
                WildKind::Wild => "WILD",
                WildKind::WildDraw4 => "WILD+4",
            };
            spans.push(Span::styled(
                format!("{:<7}", label),
                Style::default()
                    .fg(TColor::White)
                    .add_modifier(Modifier::BOLD),
            ));
        }
    }
    Line::from(spans)
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::RoomPending => "joining...",
        Phase::RoomJoined => "in room",
        Phase::InGame => "in game",
    }
}

// ---------------- Entry point ----------------
fn main() -> anyhow::Result<()> {
    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:9000".into());
    let stream = TcpStream::connect(&addr).with_context(|| format!("connecting to {}", addr))?;
    stream.set_nodelay(true)?;
    let read_stream = stream.try_clone()?;
    let (net_to_ui_tx, net_to_ui_rx) = flume::bounded::<ServerEvent>(1024);
    let (ui_to_net_tx, ui_to_net_rx) = flume::bounded::<ClientIntent>(1024);
    let (notice_tx, notice_rx) = flume::unbounded::<Notice>();
    thread::spawn(move || net_read_loop(read_stream, net_to_ui_tx));
    thread::spawn(move || net_write_loop(stream, ui_to_net_rx));
    let mut bus = NoticeBus::new();
    bus.register_handler(Box::new(notice_tx));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let mut app = AppState::default();
    app.input_hint =
        "C create room\nJ join room\n↑/↓ select card\nEnter play\nD draw\nQ quit".into();
    app.push_log(format!("Connected to {}", addr));

    let tick_rate = Duration::from_millis(50);
    let mut last_tick = Instant::now();
    let mut quit = false;
    while !quit {
        // Inbound events keep applying even while the join popup is open.
        while let Ok(event) = net_to_ui_rx.try_recv() {
            let notices = app.store.apply(event);
            bus.publish(&notices);
            app.clamp_cursor();
        }
        while let Ok(notice) = notice_rx.try_recv() {
            app.push_log(notice.to_string());
        }
        let view = project(&app.store);
        terminal.draw(|f| ui(f, &app, &view))?;
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let CEvent::Key(key) = event::read()? {
                quit = should_quit(key, &mut app, &view, &ui_to_net_tx);
            }
        }
        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

// ---------------- Key handling ----------------
fn should_quit(
    key: KeyEvent,
    app: &mut AppState,
    view: &TableView,
    tx: &Sender<ClientIntent>,
) -> bool {
    let is_nav = matches!(key.code, KeyCode::Up | KeyCode::Down);
    let allow = if is_nav {
        matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    } else {
        matches!(key.kind, KeyEventKind::Press)
    };
    if !allow {
        return false;
    }
    match app.mode {
        UiMode::Normal => {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                return true;
            }
            handle_key_normal(key, app, view, tx);
        }
        UiMode::JoinRoom => handle_key_join(key, app, tx),
    }
    false
}

fn handle_key_normal(key: KeyEvent, app: &mut AppState, view: &TableView, tx: &Sender<ClientIntent>) {
    match key.code {
        KeyCode::Char('c') => {
            let intent = app.store.create_room();
            tx.send(intent).ok();
            app.push_log("Create room requested");
        }
        KeyCode::Char('j') => {
            app.join_input.clear();
            app.mode = UiMode::JoinRoom;
        }
        KeyCode::Up => {
            if app.cursor > 0 {
                app.cursor -= 1;
            }
        }
        KeyCode::Down => {
            app.cursor = app
                .cursor
                .saturating_add(1)
                .min(app.store.my_hand().len().saturating_sub(1));
        }
        KeyCode::Enter => {
            if let Some(card) = app.store.my_hand().get(app.cursor).copied() {
                let result = app.store.play_card(card);
                send_or_log(app, tx, result);
            }
        }
        KeyCode::Char('d') => {
            if !view.can_draw && view.my_turn {
                app.push_log("You still have a playable card");
            }
            let result = app.store.draw_card();
            send_or_log(app, tx, result);
        }
        _ => {}
    }
}

fn handle_key_join(key: KeyEvent, app: &mut AppState, tx: &Sender<ClientIntent>) {
    match key.code {
        KeyCode::Esc => {
            app.mode = UiMode::Normal;
            app.join_input.clear();
        }
        KeyCode::Backspace => {
            app.join_input.pop();
        }
        KeyCode::Char(c) if c.is_ascii_alphanumeric() => {
            app.join_input.push(c.to_ascii_uppercase());
        }
        KeyCode::Enter => {
            let input = app.join_input.clone();
            match app.store.join_room(&input) {
                Ok(intent) => {
                    tx.send(intent).ok();
                    app.push_log(format!("Joining room {}", input.trim().to_uppercase()));
                    app.mode = UiMode::Normal;
                    app.join_input.clear();
                }
                // Keep the popup open so the code can be fixed.
                Err(err) => app.push_log(err.to_string()),
            }
        }
        _ => {}
    }
}

fn send_or_log(app: &mut AppState, tx: &Sender<ClientIntent>, result: Result<ClientIntent, uno_tres::client::IntentError>) {
    match result {
        Ok(intent) => {
            tx.send(intent).ok();
        }
        Err(err) => app.push_log(Notice::Rejected(err).to_string()),
    }
}

// ---------------- Network IO ----------------
fn net_read_loop(stream: TcpStream, tx: Sender<ServerEvent>) {
    let reader = std::io::BufReader::new(stream);
    for line in reader.lines() {
        match line {
            Ok(text) => {
                if let Ok(event) = serde_json::from_str::<ServerEvent>(&text) {
                    let _ = tx.send(event);
                }
            }
            Err(_) => break,
        }
    }
}

fn net_write_loop(mut stream: TcpStream, rx: Receiver<ClientIntent>) {
    while let Ok(intent) = rx.recv() {
        if let Ok(json) = serde_json::to_string(&intent) {
            use std::io::Write;
            if writeln!(stream, "{}", json).is_err() {
                break;
            }
            let _ = stream.flush();
        }
    }
}

// ---------------- Drawing ----------------
fn ui(f: &mut ratatui::Frame<'_>, app: &AppState, view: &TableView) {
    let size = f.size();
    let v = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(8),
        ])
        .split(size);
    draw_status(f, v[0], app, view);
    draw_main(f, v[1], app, view);
    draw_log(f, v[2], app);
    if app.mode == UiMode::JoinRoom {
        draw_join_popup(f, size, app);
    }
}

fn draw_status(f: &mut ratatui::Frame<'_>, area: Rect, app: &AppState, view: &TableView) {
    let turn = if view.my_turn {
        "YOUR TURN".to_string()
    } else {
        view.seats
            .iter()
            .find(|s| s.is_current_turn)
            .map(|s| format!("turn: {}", short_id(&s.player_id)))
            .unwrap_or_else(|| "-".into())
    };
    let title = format!(
        "UNO+3 | room:{} | {} | {}",
        view.room_id.as_deref().unwrap_or("-"),
        phase_label(app.store.phase()),
        turn,
    );
    let para = Paragraph::new(title).block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(para, area);
}

// Truncate on chars, not bytes; ids are opaque and need not be ASCII.
fn short_id(id: &str) -> &str {
    id.char_indices().nth(5).map_or(id, |(i, _)| &id[..i])
}

fn draw_main(f: &mut ratatui::Frame<'_>, area: Rect, app: &AppState, view: &TableView) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(area);
    // Left: seats, local player first.
    let mut players_text: Vec<Line> = Vec::new();
    for seat in &view.seats {
        let name = if seat.slot == 0 {
            "You".to_string()
        } else {
            short_id(&seat.player_id).to_string()
        };
        let turn = if seat.is_current_turn { " ←" } else { "" };
        players_text.push(Line::from(format!(
            "{}: {:>2} cards{}",
            name, seat.card_count, turn
        )));
    }
    if view.seats.is_empty() {
        for (i, id) in app.store.players().iter().enumerate() {
            players_text.push(Line::from(format!("{}: {}", i, short_id(id))));
        }
    }
    let players = Paragraph::new(Text::from(players_text))
        .block(Block::default().borders(Borders::ALL).title("Players"));
    f.render_widget(players, cols[0]);
    // Center: table.
    let mut lines = vec![Line::from("Top card:")];
    match &view.top_card {
        None => lines.push(Line::from("none yet")),
        Some(c) => lines.push(card_line(c, false)),
    };
    lines.push(Line::from(""));
    if view.can_draw {
        lines.push(Line::from(Span::styled(
            "No playable card - press D to draw",
            Style::default()
                .fg(TColor::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(app.input_hint.as_str()));
    let desk = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("Table"));
    f.render_widget(desk, cols[1]);
    // Right: own hand.
    let hand_lines: Vec<Line> = app
        .store
        .my_hand()
        .iter()
        .enumerate()
        .map(|(i, c)| card_line(c, i == app.cursor))
        .collect();
    let hand = Paragraph::new(Text::from(hand_lines))
        .block(Block::default().borders(Borders::ALL).title("Hand"));
    f.render_widget(hand, cols[2]);
}

fn draw_log(f: &mut ratatui::Frame<'_>, area: Rect, app: &AppState) {
    let lines: Vec<Line> = app
        .log
        .iter()
        .rev()
        .take(8)
        .cloned()
        .map(Line::from)
        .collect();
    let para = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("Log"));
    f.render_widget(para, area);
}

// ---------------- Popup ----------------
fn draw_join_popup(f: &mut ratatui::Frame<'_>, area: Rect, app: &AppState) {
    let popup = centered_rect(40, 20, area);
    let lines = vec![
        Line::from("Enter room code (Enter confirm, Esc cancel)"),
        Line::from(Span::styled(
            format!("> {}_", app.join_input),
            Style::default()
                .fg(TColor::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    let block = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("Join room"));
    f.render_widget(block, popup);
}


fn centered_rect(pct_x: u16, pct_y: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - pct_y) / 2),
            Constraint::Percentage(pct_y),
            Constraint::Percentage((100 - pct_y) / 2),
        ])
        .split(r);
    let horz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - pct_x) / 2),
            Constraint::Percentage(pct_x),
            Constraint::Percentage((100 - pct_x) / 2),
        ])
        .split(vert[1]);
    horz[1]
}
