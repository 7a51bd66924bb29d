//! Tooltip demo - hover, click and focus triggered overlays
//!
//! - "Save" shows a tooltip after hovering for 400ms
//! - "Open" toggles a popover on click; clicking anywhere else closes it
//! - "Help" shows a tooltip while it has focus (Tab cycles focus)
//!
//! Keys: Tab = next button, q/Esc = quit

use std::io;
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Flex, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Terminal,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tui_popper::prelude::*;

type Timers = TimerManager<PopperAction>;

const BUTTONS: [&str; 3] = ["[ Save ]", "[ Open ]", "[ Help ]"];

// ============================================================================
// State
// ============================================================================

struct App {
    save: Tooltip<Timers>,
    open: Popover<Timers>,
    help: Tooltip<Timers>,
    focus: usize,
    buttons: [Rect; 3],
    status: String,
}

impl App {
    fn new(timer_tx: &mpsc::UnboundedSender<PopperAction>) -> Result<Self, ConfigError> {
        let defaults = PopperDefaults::default();

        let save = Tooltip::new(
            TooltipConfig::from_defaults(&defaults)
                .with_placement(Placement::Top)
                .with_open_delay(Duration::from_millis(400))
                .with_close_delay(Duration::from_millis(150)),
            TimerManager::new(timer_tx.clone()),
        )?;

        let open = Popover::new(
            defaults
                .config()
                .with_trigger(TriggerConfig::click())
                .with_mask(true)
                .with_offset(1),
            TimerManager::new(timer_tx.clone()),
        )?
        .with_title(" Recent ")
        .with_width(28);

        let help = Tooltip::new(
            TooltipConfig::from_defaults(&defaults)
                .with_trigger(TriggerConfig::focus())
                .with_placement(Placement::Right),
            TimerManager::new(timer_tx.clone()),
        )?;

        Ok(Self {
            save,
            open,
            help,
            focus: 0,
            buttons: [Rect::default(); 3],
            status: String::from("Hover, click or Tab around"),
        })
    }

    fn save_props(&self) -> TooltipProps<'static> {
        TooltipProps {
            content: "Write changes to disk\n(ctrl+s)",
            focused: self.focus == 0,
        }
    }

    fn open_props(&self) -> PopoverProps<'static> {
        PopoverProps {
            content: "notes.md\ntodo.txt\nCargo.toml",
            focused: self.focus == 1,
        }
    }

    fn help_props(&self) -> TooltipProps<'static> {
        TooltipProps {
            content: "Tab moves focus, q quits",
            focused: self.focus == 2,
        }
    }

    /// Route one host event to every overlay; true when something changed
    fn handle_event(&mut self, event: &EventKind) -> bool {
        let (save, open, help) = (self.save_props(), self.open_props(), self.help_props());
        let mut notes = Vec::new();
        notes.extend(tag("save", self.save.handle_event(event, save)));
        notes.extend(tag("open", self.open.handle_event(event, open)));
        notes.extend(tag("help", self.help.handle_event(event, help)));
        self.record(notes)
    }

    /// Deliver an elapsed timer; only the popper that scheduled it reacts
    fn handle_timer(&mut self, action: PopperAction) -> bool {
        self.save.popper_mut().dispatch(action);
        self.open.popper_mut().dispatch(action);
        self.help.popper_mut().dispatch(action);

        let mut notes = Vec::new();
        notes.extend(tag("save", self.save.popper_mut().drain_events()));
        notes.extend(tag("open", self.open.popper_mut().drain_events()));
        notes.extend(tag("help", self.help.popper_mut().drain_events()));
        self.record(notes)
    }

    fn record(&mut self, notes: Vec<(&'static str, PopperEvent)>) -> bool {
        let Some((name, event)) = notes.last() else {
            return false;
        };
        self.status = format!("{name}: {event:?}");
        true
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [_, row, _, help_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);
        self.buttons = Layout::horizontal([Constraint::Length(10); 3])
            .flex(Flex::Center)
            .spacing(6)
            .areas(row);

        for (i, (label, button)) in BUTTONS.iter().zip(self.buttons).enumerate() {
            let color = if i == self.focus {
                Color::Yellow
            } else {
                Color::Cyan
            };
            frame.render_widget(
                Paragraph::new(*label).style(Style::default().fg(color)),
                button,
            );
        }

        let help = Paragraph::new(self.status.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, help_area);

        // Overlays last; the masked popover goes on top of everything
        let (save, open, help) = (self.save_props(), self.open_props(), self.help_props());
        self.save.render(frame, self.buttons[0], save);
        self.help.render(frame, self.buttons[2], help);
        self.open.render(frame, self.buttons[1], open);
    }
}

fn tag(
    name: &'static str,
    events: impl IntoIterator<Item = PopperEvent>,
) -> impl Iterator<Item = (&'static str, PopperEvent)> {
    events.into_iter().map(move |event| (name, event))
}

// ============================================================================
// Main - Setup terminal, run event loop, cleanup
// ============================================================================

#[tokio::main]
async fn main() -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>) -> io::Result<()> {
    // Elapsed show/hide delays come back on this channel
    let (timer_tx, mut timer_rx) = mpsc::unbounded_channel::<PopperAction>();
    let mut app = App::new(&timer_tx)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
    let cancel_token = CancellationToken::new();
    let _handle = spawn_event_poller(
        event_tx,
        Duration::from_millis(10),
        Duration::from_millis(16),
        cancel_token.clone(),
    );

    let mut should_render = true;

    loop {
        if should_render {
            terminal.draw(|frame| app.render(frame))?;
            should_render = false;
        }

        tokio::select! {
            Some(raw_event) = event_rx.recv() => {
                let event = process_raw_event(raw_event);
                let quit_key =
                    matches!(&event, EventKind::Key(key) if key.code == KeyCode::Char('q'));
                if event.is_quit() || quit_key {
                    break;
                }
                if let EventKind::Key(key) = &event {
                    if key.code == KeyCode::Tab {
                        app.focus = (app.focus + 1) % BUTTONS.len();
                        should_render = true;
                    }
                }
                should_render |= app.handle_event(&event);
                should_render |= event.is_layout_change();
            }

            Some(action) = timer_rx.recv() => {
                should_render |= app.handle_timer(action);
            }
        }
    }

    cancel_token.cancel();
    Ok(())
}
