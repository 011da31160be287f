use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::sync::Arc;
use std::time::Instant;

use crate::background::{data_loader::DataLoader, BackgroundTaskManager};
use crate::cache::Cache;
use crate::commands::{executor, handlers};
use crate::input::KeyEvent;
use crate::log_buffer::LogBuffer;
use crate::logging::init_logging;
use crate::state::AppState;
use crate::ui::screens::Screen;
use fresh_api::Client;

pub struct App;

impl App {
    pub fn new() -> Self {
        Self
    }

    pub async fn run(&self) -> Result<()> {
        // Create log buffer before initializing logging
        let log_buffer = LogBuffer::new(5000);
        let _log_path = init_logging(log_buffer.clone())?;

        tracing::info!("sabzi starting");

        let mut terminal = self.init()?;
        let cache = Arc::new(Cache::new().await?);

        let (data_tx, mut data_rx) = tokio::sync::mpsc::unbounded_channel();

        let mut ui_state = AppState::new();
        let mut task_manager = BackgroundTaskManager::new();

        let api_client = Arc::new(Client::new());
        let data_loader = DataLoader::new(api_client.clone(), cache.clone(), data_tx.clone());

        let mut event_stream = EventStream::new();

        self.init_data(&mut ui_state, &mut task_manager, &data_loader);

        tracing::info!("Entering main event loop");

        let mut interval = tokio::time::interval(std::time::Duration::from_millis(100));
        loop {
            // Update total_entries for logs screen if active
            if let Screen::Logs(logs_state) = ui_state.current_screen_mut() {
                logs_state.total_entries = log_buffer.len();
            }

            terminal.draw(|f| {
                crate::ui::render_app(f, &ui_state, &log_buffer);
            })?;

            tokio::select! {
                _ = interval.tick() => {
                    if let Some(throbber_state) = ui_state.loading_state() {
                        throbber_state.calc_next();
                    }
                    // The tick also drives the autocomplete debounce; a
                    // redraw happens on the next loop pass either way
                    ui_state.tick_suggestions(Instant::now());
                }
                Some(Ok(event)) = event_stream.next() => {
                    match event {
                        Event::Key(key) if matches!(key.kind, KeyEventKind::Press) => {
                            // Don't log when on logs screen to avoid feedback loop
                            let on_logs_screen = matches!(ui_state.current_screen(), Screen::Logs(_));
                            if !on_logs_screen {
                                tracing::debug!("Key press: {:?}", key);
                            }
                            if let Some(command) = handlers::handle_key_input(KeyEvent::from(key), &ui_state) {
                                if !on_logs_screen {
                                    tracing::info!("Executing command: {:?}", command);
                                }
                                executor::execute_command(
                                    command,
                                    &mut ui_state,
                                    &mut task_manager,
                                    &data_loader,
                                );
                            }
                        }
                        _ => {
                            // Ignore other events
                        }
                    }
                }
                Some(data_event) = data_rx.recv() => {
                    tracing::debug!("Received data event: {:?}", data_event);
                    crate::state::reducer::reduce_data_event(&mut ui_state, data_event);
                }
            }

            // Check if we should quit
            if ui_state.should_quit {
                tracing::info!("Quit requested, exiting event loop");
                break;
            }
        }

        tracing::info!("Cleaning up application");

        // Cancel all background data loading tasks
        task_manager.cancel_all();

        self.exit(terminal)?;

        Ok(())
    }

    fn init(&self) -> Result<Terminal<CrosstermBackend<std::io::Stdout>>, std::io::Error> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    fn init_data(
        &self,
        ui_state: &mut AppState,
        task_manager: &mut BackgroundTaskManager,
        data_loader: &DataLoader,
    ) {
        tracing::info!("Loading bills and reference data");
        executor::execute_command(
            crate::commands::AppCommand::LoadBills {
                force_refresh: false,
            },
            ui_state,
            task_manager,
            data_loader,
        );

        // Reference collections for the filter panel and the bill form.
        // Loaded directly so the screen stays on Bills.
        let loader = data_loader.clone();
        task_manager.spawn_load_task("load_providers".to_string(), async move {
            loader.load_providers(false).await;
        });
        let loader = data_loader.clone();
        task_manager.spawn_load_task("load_signers".to_string(), async move {
            loader.load_signers().await;
        });
        let loader = data_loader.clone();
        task_manager.spawn_load_task("load_vegetables".to_string(), async move {
            loader.load_vegetables(false).await;
        });
    }

    fn exit(
        &self,
        mut terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<(), std::io::Error> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
