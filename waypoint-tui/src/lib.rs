use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::fs;
use std::io;
use std::path::PathBuf;
use waypoint_core::canvas::render_canvas;
use waypoint_core::console::{self, CommandError};
use waypoint_core::{PathResult, Session, SessionConfig, BANNER};

const MAX_OUTPUT_LINES: usize = 1000;
const MAX_HISTORY: usize = 100;
const PROMPT: &str = "wpt> ";
const SCROLL_STEP: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExitMode {
    None,
    Normal,      // exit, quit - ask about saving
    ForceQuit,   // :q! - don't save, don't ask
    WriteQuit,   // :wq!, ZZ - save and quit, don't ask
}

pub struct App {
    session: Session,
    input: String,
    history: Vec<String>,
    history_path: PathBuf,
    output: Vec<String>,
    cursor_position: usize,
    should_quit: bool,
    // Lines scrolled up from the newest output; 0 follows the tail
    scroll_offset: usize,
    // Output pane height from the last draw
    view_height: usize,
    history_index: Option<usize>,
    temp_input: String,
    exit_mode: ExitMode,
    awaiting_save_confirmation: bool,
}

pub fn default_history_path() -> PathBuf {
    PathBuf::from(shellexpand::tilde("~/.waypoint_history").as_ref())
}

impl App {
    pub fn new(config: SessionConfig) -> Self {
        let mut output: Vec<String> = BANNER.lines().map(|line| line.to_string()).collect();
        output.push(String::new());
        output.push("  Type 'help' for available commands, 'exit' or 'quit' to exit.".to_string());
        output.push(String::new());

        Self {
            session: Session::new(config),
            input: String::new(),
            history: Vec::new(),
            history_path: default_history_path(),
            output,
            cursor_position: 0,
            should_quit: false,
            scroll_offset: 0,
            view_height: 0,
            history_index: None,
            temp_input: String::new(),
            exit_mode: ExitMode::None,
            awaiting_save_confirmation: false,
        }
    }

    pub fn with_history_path(mut self, path: PathBuf) -> Self {
        self.history_path = path;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn exit_mode(&self) -> ExitMode {
        self.exit_mode
    }

    pub fn add_output(&mut self, message: impl Into<String>) {
        self.output.push(message.into());
        if self.output.len() > MAX_OUTPUT_LINES {
            self.output.drain(0..self.output.len() - MAX_OUTPUT_LINES);
        }
        // Auto-scroll to the bottom on new output
        self.scroll_offset = 0;
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Moves the output view `lines` towards older output.
    pub fn scroll_up(&mut self, lines: usize) {
        let limit = self.output.len().saturating_sub(self.view_height.max(1));
        self.scroll_offset = (self.scroll_offset + lines).min(limit);
    }

    /// Moves the output view `lines` towards the newest output.
    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn set_view_height(&mut self, height: usize) {
        self.view_height = height;
    }

    /// Indices of the output lines shown in a pane `height` rows tall.
    pub fn visible_range(&self, height: usize) -> std::ops::Range<usize> {
        let total = self.output.len();
        let offset = self.scroll_offset.min(total.saturating_sub(height));
        let end = total - offset;
        end.saturating_sub(height)..end
    }

    pub fn navigate_history_backward(&mut self) {
        if self.history.is_empty() {
            return;
        }

        // Starting history navigation: keep what was typed so far
        if self.history_index.is_none() {
            self.temp_input = self.input.clone();
        }

        let idx = match self.history_index {
            None => self.history.len() - 1,
            Some(0) => 0,
            Some(idx) => idx - 1,
        };
        self.history_index = Some(idx);
        self.input = self.history[idx].clone();
        self.cursor_position = self.input.len();
    }

    pub fn navigate_history_forward(&mut self) {
        let Some(idx) = self.history_index else {
            return;
        };

        if idx + 1 >= self.history.len() {
            // Past the newest entry: restore the in-progress input
            self.input = std::mem::take(&mut self.temp_input);
            self.cursor_position = self.input.len();
            self.history_index = None;
            return;
        }

        self.history_index = Some(idx + 1);
        self.input = self.history[idx + 1].clone();
        self.cursor_position = self.input.len();
    }

    pub fn load_history(&mut self) {
        if let Ok(content) = fs::read_to_string(&self.history_path) {
            let mut lines: Vec<String> = content.lines().map(|s| s.to_string()).collect();
            if lines.len() > MAX_HISTORY {
                lines.drain(0..lines.len() - MAX_HISTORY);
            }
            self.history = lines;
        }
    }

    pub fn save_history(&self) -> Result<()> {
        fs::write(&self.history_path, self.history.join("\n"))?;
        Ok(())
    }

    pub fn request_exit(&mut self, mode: ExitMode) {
        self.exit_mode = mode;

        match mode {
            ExitMode::Normal => {
                if !self.history.is_empty() {
                    self.awaiting_save_confirmation = true;
                    self.add_output("");
                    self.add_output(format!(
                        "Save command history to {}? [y/N]:",
                        self.history_path.display()
                    ));
                } else {
                    self.should_quit = true;
                }
            }
            ExitMode::ForceQuit => {
                self.should_quit = true;
            }
            ExitMode::WriteQuit => {
                if !self.history.is_empty() {
                    self.write_history_with_feedback();
                }
                self.should_quit = true;
            }
            ExitMode::None => {}
        }
    }

    pub fn handle_save_confirmation(&mut self, response: &str) {
        self.awaiting_save_confirmation = false;

        let response = response.trim().to_lowercase();
        if response == "y" || response == "yes" {
            self.write_history_with_feedback();
        } else {
            self.add_output("History not saved.");
        }
        self.should_quit = true;
    }

    fn write_history_with_feedback(&mut self) {
        match self.save_history() {
            Ok(()) => {
                let msg = format!("History saved to {}", self.history_path.display());
                self.add_output(msg);
            }
            Err(e) => self.add_output(format!("Error saving history: {}", e)),
        }
    }

    pub fn handle_input(&mut self, input: String) {
        if input.trim().is_empty() {
            return;
        }

        if self.awaiting_save_confirmation {
            self.handle_save_confirmation(&input);
            return;
        }

        self.history.push(input.clone());
        if self.history.len() > MAX_HISTORY {
            self.history.remove(0);
        }
        self.history_index = None;
        self.temp_input.clear();

        self.add_output(format!("> {}", input));

        let line = input.trim();
        match line {
            "exit" | "quit" => self.request_exit(ExitMode::Normal),
            ":q!" => self.request_exit(ExitMode::ForceQuit),
            ":wq!" | "ZZ" => self.request_exit(ExitMode::WriteQuit),
            "clear" => {
                self.output.clear();
                self.scroll_offset = 0;
            }
            "help" => {
                for l in console::HELP {
                    self.add_output(*l);
                }
                self.add_output("  clear                          - Clear the output");
                self.add_output("  exit, quit                     - Exit the REPL");
            }
            _ => match console::execute(&mut self.session, line) {
                Ok(lines) => {
                    for l in lines {
                        self.add_output(l);
                    }
                }
                Err(e @ CommandError::UnknownCommand(_)) => {
                    self.add_output(e.to_string());
                    self.add_output("Type 'help' for available commands");
                }
                Err(e) => self.add_output(format!("Error: {}", e)),
            },
        }
    }

    /// Canvas lines for the side panel, with the live path highlighted.
    pub fn canvas_lines(&mut self) -> Vec<String> {
        let highlight = self.session.highlight();
        render_canvas(
            self.session.graph(),
            self.session.bounds(),
            highlight.as_ref().and_then(PathResult::path),
        )
    }
}

pub fn run(config: SessionConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    app.load_history();

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            // Only process KeyPress events, ignore KeyRelease
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match key.code {
                KeyCode::Char(c) => {
                    app.input.insert(app.cursor_position, c);
                    app.cursor_position += c.len_utf8();
                    app.history_index = None;
                    app.temp_input.clear();
                }
                KeyCode::Backspace => {
                    if let Some((idx, _)) = app.input[..app.cursor_position].char_indices().last() {
                        app.input.remove(idx);
                        app.cursor_position = idx;
                        app.history_index = None;
                        app.temp_input.clear();
                    }
                }
                KeyCode::Enter => {
                    let input = app.input.drain(..).collect();
                    app.cursor_position = 0;
                    app.handle_input(input);
                }
                KeyCode::Up => app.navigate_history_backward(),
                KeyCode::Down => app.navigate_history_forward(),
                KeyCode::Left => {
                    if let Some((idx, _)) = app.input[..app.cursor_position].char_indices().last() {
                        app.cursor_position = idx;
                    }
                }
                KeyCode::Right => {
                    if let Some(c) = app.input[app.cursor_position..].chars().next() {
                        app.cursor_position += c.len_utf8();
                    }
                }
                KeyCode::Home => app.cursor_position = 0,
                KeyCode::End => app.cursor_position = app.input.len(),
                KeyCode::Esc => app.should_quit = true,
                KeyCode::PageUp => app.scroll_up(SCROLL_STEP),
                KeyCode::PageDown => app.scroll_down(SCROLL_STEP),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Output + canvas
            Constraint::Length(1), // Horizontal rule
            Constraint::Length(1), // Input area
            Constraint::Length(1), // Horizontal rule
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    // Output area - scrollable
    let output_height = panes[0].height as usize;
    app.set_view_height(output_height);

    let visible_output: Vec<Line> = app.output[app.visible_range(output_height)]
        .iter()
        .map(|line| {
            let style = if line.starts_with('✓') {
                Style::default().fg(Color::Green)
            } else if line.starts_with('✗') || line.starts_with("Error") {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::White)
            };
            Line::styled(line.clone(), style)
        })
        .collect();
    f.render_widget(Paragraph::new(visible_output), panes[0]);

    // Canvas panel
    let stats = app.session.stats();
    let title = format!(" Canvas · {} nodes · {} edges ", stats.node_count, stats.edge_count);
    let canvas: Vec<Line> = app
        .canvas_lines()
        .into_iter()
        .map(|line| {
            if line.contains('*') {
                Line::styled(line, Style::default().fg(Color::Yellow))
            } else {
                Line::from(line)
            }
        })
        .collect();
    let canvas = Paragraph::new(canvas).block(
        Block::default()
            .borders(Borders::LEFT)
            .title(title)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(canvas, panes[1]);

    let rule1 = Paragraph::new("─".repeat(chunks[1].width as usize))
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(rule1, chunks[1]);

    // Input area with prompt
    let input = Paragraph::new(format!("{}{}", PROMPT, app.input))
        .style(Style::default().fg(Color::Yellow));
    f.render_widget(input, chunks[2]);

    // Cursor column counts characters, not bytes
    let cursor_col = app.input[..app.cursor_position].chars().count();
    f.set_cursor_position((
        chunks[2].x + (PROMPT.len() + cursor_col) as u16,
        chunks[2].y,
    ));

    let rule2 = Paragraph::new("─".repeat(chunks[3].width as usize))
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(rule2, chunks[3]);

    let status = Paragraph::new(Line::from(vec![
        Span::raw("Press "),
        Span::styled("ESC", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" or type "),
        Span::styled("exit", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" to quit | "),
        Span::styled("help", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" for commands | "),
        Span::styled("↑↓", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" history | "),
        Span::styled("PgUp/PgDn", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" scroll"),
    ]))
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(status, chunks[4]);
}
