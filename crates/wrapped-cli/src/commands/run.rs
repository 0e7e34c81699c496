use std::io::{self, Stdout};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, MouseButton, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use wrapped_core::{data::from_config, AppConfig, DataSource, MotionController};
use wrapped_tui::{
    app::{App, Mode},
    event::{AppEvent, DataLoadResult, EventHandler},
    input::{handle_key_event, Action},
    keymap::Keymap,
    load_theme, share,
    widgets::{screen_layout, PopupWidget, PresentationWidget, ProgressWidget, StatusBarWidget},
};

use crate::RunArgs;

/// Raw-mode alternate-screen terminal, restored on drop
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("OPay Wrapped")) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Deref for TerminalGuard {
    type Target = Terminal<CrosstermBackend<Stdout>>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for TerminalGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

pub async fn run(config: Arc<AppConfig>, args: RunArgs) -> Result<()> {
    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);
    let source = from_config(&config, args.data)?;

    let motion = if args.reduced_motion {
        MotionController::new(true)
    } else {
        MotionController::detect(&config.motion)
    };

    // Load theme from config
    let theme = load_theme(&config.ui.theme);
    let mut app = App::new(config.clone(), theme, motion);
    app.source_name = source.name().to_string();
    info!(
        source = source.name(),
        reduce_motion = app.reduce_motion(),
        "Starting presentation"
    );

    // Create channel for async summary loads
    let (data_tx, mut data_rx) = mpsc::unbounded_channel::<DataLoadResult>();
    spawn_load(source.clone(), data_tx.clone());

    let mut terminal = TerminalGuard::enter()?;

    // Create event handler with animation FPS support
    let event_handler = EventHandler::with_animation_fps(
        config.ui.tick_rate_ms,
        config.ui.scroll.animation_fps,
    );

    // Checked at the end of each iteration to pick the next poll timeout
    let mut needs_fast_update = false;

    // Main loop
    loop {
        // Process completed loads (non-blocking)
        while let Ok(result) = data_rx.try_recv() {
            app.apply_data_result(result);
        }
        if app.take_reload_request() {
            spawn_load(source.clone(), data_tx.clone());
        }

        let now = Instant::now();
        let area = match terminal.size() {
            Ok(size) => Some(Rect::new(0, 0, size.width, size.height)),
            Err(e) => {
                debug!(error = %e, "Terminal size unavailable");
                None
            }
        };
        app.prepare_frame(area, now);

        // Draw UI
        terminal.draw(|frame| draw(frame, &app, now))?;

        // Handle events (use faster tick rate during animations)
        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, &app, &keymap);
                    handle_action(&mut app, action, Instant::now());
                }
                AppEvent::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => app.wheel(1),
                    MouseEventKind::ScrollUp => app.wheel(-1),
                    MouseEventKind::Down(MouseButton::Left) => {
                        app.click(mouse.column, mouse.row, Instant::now());
                    }
                    _ => {}
                },
                AppEvent::Resize(width, height) => {
                    debug!(width, height, "Terminal resized");
                }
                AppEvent::Tick => {
                    // Tick spinner animation for loading indicator
                    if app.data.loading {
                        app.tick_spinner();
                    }
                }
            }
        }

        needs_fast_update = app.needs_fast_update(Instant::now());

        if app.should_quit {
            break;
        }
    }

    app.teardown();
    drop(terminal);
    info!("Presentation closed");
    Ok(())
}

/// Fetch the summary on a background task and report over `tx`
fn spawn_load(source: Arc<dyn DataSource>, tx: mpsc::UnboundedSender<DataLoadResult>) {
    tokio::spawn(async move {
        let result = match source.fetch().await {
            Ok(data) => DataLoadResult::Loaded(data),
            Err(e) => DataLoadResult::Failed(format!("Failed to fetch data: {}", e)),
        };
        if tx.send(result).is_err() {
            debug!("Presentation closed before the summary arrived");
        }
    });
}

fn draw(frame: &mut Frame, app: &App, now: Instant) {
    let area = frame.area();
    let layout = screen_layout(area);

    frame.render_widget(
        Block::default().style(Style::default().bg(app.theme.bg)),
        area,
    );
    PresentationWidget::render(frame, &layout, app, now);
    ProgressWidget::render(frame, &layout, app);
    StatusBarWidget::render(frame, layout.status, app);

    // Render popups on top
    match &app.mode {
        Mode::ShareMenu { selected } => {
            PopupWidget::render_share_menu(frame, *selected, &app.theme);
        }
        Mode::Help => PopupWidget::render_help(frame, &app.config.keymap, &app.theme),
        Mode::Normal => {}
    }
}

fn handle_action(app: &mut App, action: Action, now: Instant) {
    // Any action other than PendingG resets the pending key
    if action != Action::PendingG {
        app.clear_pending_key();
    }

    match action {
        Action::Quit => app.should_quit = true,
        Action::ScrollDown => app.scroll_down(),
        Action::ScrollUp => app.scroll_up(),
        Action::ScrollHalfPageDown => app.scroll_half_page_down(),
        Action::ScrollHalfPageUp => app.scroll_half_page_up(),
        Action::ScrollPageDown => app.scroll_page_down(),
        Action::ScrollPageUp => app.scroll_page_up(),
        Action::JumpToTop => app.jump_to_top(now),
        Action::JumpToBottom => app.jump_to_bottom(now),
        Action::PendingG => app.pending_key = Some('g'),
        Action::NextSection => app.next_section(now),
        Action::PrevSection => app.prev_section(now),
        Action::SkipToShare => app.skip_to_share(now),
        Action::JumpToSection(index) => app.jump_to_section(index, now),
        Action::OpenShareMenu => app.open_share_menu(),
        Action::ToggleMotion => app.toggle_motion(),
        Action::Retry => app.request_reload(),
        Action::ShowHelp => app.mode = Mode::Help,
        Action::ExitMode => {
            app.mode = Mode::Normal;
            app.clear_status();
        }
        Action::MenuUp => app.menu_up(),
        Action::MenuDown => app.menu_down(),
        Action::Confirm => {
            if let Some(target) = app.selected_share_target() {
                share_with(app, target);
            }
        }
        Action::ShareWith(target) => share_with(app, target),
        Action::None => {}
    }
}

fn share_with(app: &mut App, target: wrapped_core::ShareTarget) {
    app.mode = Mode::Normal;
    let message = app
        .share_action(target)
        .map_err(anyhow::Error::from)
        .and_then(|action| share::dispatch(&action));
    match message {
        Ok(message) => {
            info!(share_target = %target, "Shared");
            app.set_status(message);
        }
        Err(e) => {
            warn!(share_target = %target, error = %e, "Share failed");
            app.set_status(format!("{:#}", e));
        }
    }
}
