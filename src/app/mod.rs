//! Application controller and main event loop
//!
//! Terminal input, command completions and timer ticks all become [`Msg`]
//! values that [`update`] applies to the single [`AppState`]. The commands it
//! returns are handed to the [`Executor`], whose completions come back over
//! an unbounded channel drained once per loop iteration.

mod executor;
mod message;
mod state;
mod update;
mod view;


pub use executor::{channel, run as run_command, Executor, MsgReceiver, MsgSender};
pub use message::{Command, Msg, Op};
pub use state::AppState;
pub use update::{init, update};
pub use view::{View, HEADER_TABS, TAB_CYCLE};

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};

use crate::config::{Config, Settings};
use crate::gitlab::GitLabService;
use crate::input::Key;
use crate::tui::Tui;

/// Main application struct
pub struct App {
    /// Configuration as stored on disk; settings changes are written back
    config: Config,
    config_path: PathBuf,
    state: AppState,
    executor: Executor,
    rx: MsgReceiver,
    tui: Tui,
}

impl App {
    pub fn new(config: Config, config_path: PathBuf, service: Arc<GitLabService>) -> Result<Self> {
        let (tx, rx) = channel();
        let state = AppState::new(config.settings());
        Ok(Self {
            config,
            config_path,
            state,
            executor: Executor::new(service, tx),
            rx,
            tui: Tui::new()?,
        })
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        self.tui.enter()?;

        tracing::info!(
            "glcli started with {} tracked projects",
            self.state.settings.projects.len()
        );

        let result = self.event_loop().await;

        self.tui.exit()?;

        result
    }

    async fn event_loop(&mut self) -> Result<()> {
        let tick_rate = Duration::from_millis(16);

        let size = self.tui.size()?;
        self.apply(Msg::Resize {
            width: size.width,
            height: size.height,
        });
        let commands = init(&mut self.state);
        self.dispatch(commands);

        loop {
            // Only render when something has changed
            if self.state.needs_render {
                self.render()?;
                self.state.needs_render = false;
            }

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => {
                        if let Some(key) = Key::from_event(key) {
                            self.apply(Msg::Key(key));
                        }
                    }
                    Event::Resize(width, height) => self.apply(Msg::Resize { width, height }),
                    _ => {}
                }
            }

            // Command completions and timer ticks
            while let Ok(msg) = self.rx.try_recv() {
                self.apply(msg);
            }

            if self.state.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn apply(&mut self, msg: Msg) {
        let commands = update(&mut self.state, msg);
        self.dispatch(commands);
    }

    fn dispatch(&mut self, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::PersistSettings(settings) => {
                    if let Err(e) = self.persist(&settings) {
                        self.apply(Msg::Failed {
                            what: Op::SaveSettings,
                            error: format!("{:#}", e),
                        });
                    }
                }
                command => self.executor.spawn(command),
            }
        }
    }

    fn persist(&mut self, settings: &Settings) -> Result<()> {
        self.config.apply_settings(settings);
        self.config.save_to(&self.config_path)?;
        tracing::debug!("Saved settings to {}", self.config_path.display());
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let state = &self.state;
        self.tui.draw(|frame| crate::tui::render(frame, state))
    }
}
