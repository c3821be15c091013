//! TUI module - Terminal dashboard with ratatui

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use std::io::{stdout, Stdout};

use crate::db::ProgramStore;
use crate::program::{TargetSpec, UserProgram, UserProgramDay};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// App state for TUI
pub struct App<S: ProgramStore> {
    store: S,
    user_id: String,
    program: Option<UserProgram>,
    selected_day: usize,
    should_quit: bool,
}

impl<S: ProgramStore> App<S> {
    pub fn new(store: S, user_id: &str) -> Result<Self> {
        let program = store.get(user_id)?;
        Ok(Self {
            store,
            user_id: user_id.to_string(),
            program,
            selected_day: 0,
            should_quit: false,
        })
    }

    /// Run the TUI application
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = init_terminal()?;

        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_events()?;
        }

        restore_terminal()?;
        Ok(())
    }

    fn current_day(&self) -> Option<&UserProgramDay> {
        self.program.as_ref()?.schedule.get(self.selected_day)
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(area);

        // Header
        let title = match &self.program {
            Some(p) => {
                let goal = p
                    .preferences
                    .as_ref()
                    .map(|pr| format!(" | {} ({} min)", pr.workout_goal, pr.workout_length_minutes))
                    .unwrap_or_default();
                format!("{} - {} | {}{}", self.user_id, p.template_name, p.program_type, goal)
            }
            None => format!("{} - no program assigned", self.user_id),
        };
        let header = Paragraph::new(title)
            .style(Style::default().fg(Color::Cyan).bold())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        // Exercise table for the selected day
        let (rows, day_title): (Vec<Row>, String) = match self.current_day() {
            Some(day) => {
                let rows = day
                    .exercises
                    .iter()
                    .map(|e| {
                        Row::new(vec![
                            Cell::from(e.name.clone()),
                            Cell::from(e.sets.to_string()),
                            Cell::from(TargetSpec::parse(&e.target_reps).render()),
                            Cell::from(e.reps_completed.to_string()),
                            Cell::from(format!("{} {}", e.weight.value, e.weight.unit)),
                        ])
                    })
                    .collect();
                let days = self.program.as_ref().map(|p| p.schedule.len()).unwrap_or(0);
                let title = format!(
                    "{} - {} ({}/{})",
                    day.day_name,
                    day.focus,
                    self.selected_day + 1,
                    days
                );
                (rows, title)
            }
            None => (Vec::new(), "Schedule".to_string()),
        };

        let table = Table::new(
            rows,
            [
                Constraint::Min(24),
                Constraint::Length(6),
                Constraint::Length(14),
                Constraint::Length(6),
                Constraint::Length(12),
            ],
        )
        .header(Row::new(vec!["Exercise", "Sets", "Target", "Reps", "Weight"])
            .style(Style::default().bold()))
        .block(Block::default().borders(Borders::ALL).title(day_title));

        frame.render_widget(table, chunks[1]);

        // Footer
        let footer = Paragraph::new("q: quit | r: reload | ←/→: day")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[2]);
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press {
                    let days = self.program.as_ref().map(|p| p.schedule.len()).unwrap_or(0);
                    match key.code {
                        KeyCode::Char('q') => self.should_quit = true,
                        KeyCode::Char('r') => {
                            self.program = self.store.get(&self.user_id)?;
                            let days = self.program.as_ref().map(|p| p.schedule.len()).unwrap_or(0);
                            self.selected_day = self.selected_day.min(days.saturating_sub(1));
                        }
                        KeyCode::Right if days > 0 => {
                            self.selected_day = (self.selected_day + 1) % days;
                        }
                        KeyCode::Left if days > 0 => {
                            self.selected_day = (self.selected_day + days - 1) % days;
                        }
                        _ => {}
                    }
                }
        Ok(())
    }
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
