mod config;
mod cues;
mod error;
mod face;
mod logging;
mod pump;
mod stopwatch;
mod ui;

use std::error::Error as _;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use stopwatch_core::{export_laps, format_split, format_total, Clock, Scheduler, Stopwatch, SystemClock};

use crate::config::AppConfig;
use crate::cues::{Beeper, Cue};
use crate::error::AppError;
use crate::pump::Pump;
use crate::stopwatch::StopwatchState;

const NOTICE_MS: u64 = 1500;
const NOTICE_POLL: Duration = Duration::from_millis(100);

/// Everything the main loop reacts to.
pub enum AppMsg {
    Input(Event),
    Pump,
    InputClosed,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Command {
    Toggle,
    Lap,
    Reset,
    Export,
    ScrollOlder,
    ScrollNewer,
    Help,
    Quit,
}

#[derive(Parser, Debug)]
#[command(version, about = "Terminal stopwatch with lap splits")]
struct Cli {
    /// Config file to use instead of the per-user one
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Display refresh interval
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,

    /// Disable audio cues
    #[arg(long)]
    mute: bool,

    /// Where `c` writes the lap list
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// Log file (filter with RUST_LOG)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save the effective settings back to the config file
    #[arg(long)]
    write_config: bool,
}

impl Cli {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(ms) = self.interval_ms {
            config.tick_interval_ms = ms;
        }
        if self.mute {
            config.cues.audio = false;
        }
        if let Some(path) = &self.export {
            config.export_path = path.clone();
        }
        if let Some(path) = &self.log_file {
            config.log_file = path.clone();
        }
    }
}

fn command_for_key(key: &KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char(' ') => Some(Command::Toggle),
        KeyCode::Char('l') | KeyCode::Char('L') => Some(Command::Lap),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Reset),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::Export),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::ScrollOlder),
        KeyCode::Up | KeyCode::Char('k') => Some(Command::ScrollNewer),
        KeyCode::Char('?') | KeyCode::F(1) => Some(Command::Help),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

struct Notice {
    text: String,
    until: Instant,
}

struct StopwatchApp<C: Clock, S: Scheduler> {
    stopwatch: StopwatchState<C, S>,
    beeper: Beeper,
    config: AppConfig,
    size: (u16, u16),
    notice: Option<Notice>,
    allow_redraw: bool,
    help_visible: bool,
    quit: bool,
}

impl<C: Clock, S: Scheduler> StopwatchApp<C, S> {
    fn new(config: AppConfig, timer: Stopwatch<C, S>, size: (u16, u16)) -> Self {
        let beeper = Beeper::new(config.cues.clone());
        Self {
            stopwatch: StopwatchState::new(timer),
            beeper,
            config,
            size,
            notice: None,
            allow_redraw: true,
            help_visible: false,
            quit: false,
        }
    }

    fn run(&mut self, rx: &Receiver<AppMsg>, out: &mut impl Write) -> Result<(), AppError> {
        self.redraw(out)?;

        let mut deferred: Option<AppMsg> = None;

        while !self.quit {
            let msg = if let Some(msg) = deferred.take() {
                msg
            } else if self.notice.is_some() {
                // Poll so the notice clears on time even when paused
                match rx.recv_timeout(NOTICE_POLL) {
                    Ok(msg) => msg,
                    Err(RecvTimeoutError::Timeout) => {
                        self.redraw(out)?;
                        continue;
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            } else {
                match rx.recv() {
                    Ok(msg) => msg,
                    Err(_) => break,
                }
            };

            match msg {
                AppMsg::Input(Event::Key(key)) => self.handle_key(&key),
                AppMsg::Input(Event::Resize(cols, rows)) => self.size = (cols, rows),
                AppMsg::Input(Event::FocusLost) => self.handle_focus(false),
                AppMsg::Input(Event::FocusGained) => self.handle_focus(true),
                AppMsg::Input(_) => continue,
                AppMsg::Pump => {
                    // One redraw per batch of queued ticks, however slow the terminal
                    deferred = drain_ticks(rx);
                    self.stopwatch.timer.tick();
                }
                AppMsg::InputClosed => {
                    log::warn!("input closed, exiting");
                    break;
                }
            }
            self.redraw(out)?;
        }

        if self.stopwatch.timer.is_running() {
            self.stopwatch.timer.pause();
        }
        log::info!("exiting at {}", format_total(self.stopwatch.timer.current_elapsed()));
        Ok(())
    }

    fn redraw(&mut self, out: &mut impl Write) -> io::Result<()> {
        if !self.allow_redraw {
            return Ok(());
        }
        if self.notice.as_ref().is_some_and(|n| Instant::now() >= n.until) {
            self.notice = None;
        }
        if self.help_visible {
            return ui::draw_help(out, self.size, ui::HELP_TEXT);
        }
        let notice = self.notice.as_ref().map(|n| n.text.as_str());
        let view = self.stopwatch.view(notice, self.beeper.is_enabled());
        ui::draw_stopwatch(out, self.size, &view)
    }

    fn handle_focus(&mut self, focused: bool) {
        self.allow_redraw = focused;
        if focused {
            self.stopwatch.timer.resume_ticking();
        } else {
            self.stopwatch.timer.suspend_ticking();
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        // If help screen is showing, any key dismisses it
        if self.help_visible {
            if key.kind == KeyEventKind::Press {
                self.help_visible = false;
            }
            return;
        }
        if let Some(command) = command_for_key(key) {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Toggle => {
                let cue = if self.stopwatch.timer.toggle() {
                    log::info!("started at {}", format_total(self.stopwatch.timer.current_elapsed()));
                    Cue::Start
                } else {
                    log::info!("paused at {}", format_total(self.stopwatch.timer.current_elapsed()));
                    Cue::Pause
                };
                self.beeper.play(cue);
            }
            Command::Lap => {
                if let Some(lap) = self.stopwatch.record_lap() {
                    log::info!(
                        "lap {}: split {} total {}",
                        lap.index,
                        format_split(lap.split_ms),
                        format_total(lap.total_ms)
                    );
                    self.beeper.play(Cue::Lap);
                }
            }
            Command::Reset => {
                self.stopwatch.reset();
                log::info!("reset");
                self.beeper.play(Cue::Reset);
            }
            Command::Export => match self.export_laps() {
                Ok(0) => self.show_notice("No laps"),
                Ok(count) => {
                    log::info!("copied {} laps to {}", count, self.config.export_path.display());
                    self.show_notice("Copied!");
                }
                Err(e) => {
                    log::error!("{}: {:?}", e, e.source());
                    self.show_notice("Copy failed");
                }
            },
            Command::ScrollOlder => self.stopwatch.scroll_older(),
            Command::ScrollNewer => self.stopwatch.scroll_newer(),
            Command::Help => self.help_visible = true,
            Command::Quit => self.quit = true,
        }
    }

    /// Write the lap list to the export file. Returns how many laps were written.
    fn export_laps(&self) -> Result<usize, AppError> {
        let laps = self.stopwatch.timer.laps();
        if laps.is_empty() {
            return Ok(0);
        }
        let path = &self.config.export_path;
        let mut text = export_laps(laps);
        text.push('\n');
        std::fs::write(path, text).map_err(|source| AppError::Export {
            path: path.clone(),
            source,
        })?;
        Ok(laps.len())
    }

    fn show_notice(&mut self, text: &str) {
        self.notice = Some(Notice {
            text: text.to_string(),
            until: Instant::now() + Duration::from_millis(NOTICE_MS),
        });
    }
}

/// Discard queued ticks. Returns the first other message, if any.
fn drain_ticks(rx: &Receiver<AppMsg>) -> Option<AppMsg> {
    while let Ok(msg) = rx.try_recv() {
        if !matches!(msg, AppMsg::Pump) {
            return Some(msg);
        }
    }
    None
}

/// The loop's own error wins; a failed terminal restore is reported only
/// when the loop itself succeeded.
fn settle(result: Result<(), AppError>, restored: io::Result<()>) -> Result<(), AppError> {
    match restored {
        Ok(()) => result,
        Err(e) => {
            log::error!("can't restore terminal: {}", e);
            result.and(Err(AppError::Terminal(e)))
        }
    }
}

fn input_thread(tx: Sender<AppMsg>) {
    loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(AppMsg::Input(ev)).is_err() {
                    break;
                }
            }
            Err(e) => {
                log::error!("can't read terminal input: {}", e);
                tx.send(AppMsg::InputClosed).ok();
                break;
            }
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let (mut config, config_err) = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    cli.apply(&mut config);

    logging::init_logging(&config.log_file)?;
    if let Some(e) = config_err {
        log::warn!("{} ({:?}), using defaults", e, e.source());
    }
    if cli.write_config {
        config.store(cli.config.as_deref())?;
        log::info!("saved settings");
    }
    log::info!(
        "stopwatch starting, tick {} ms, config {:?}",
        config.tick_interval_ms,
        cli.config.clone().or_else(AppConfig::default_location)
    );

    let (tx, rx) = mpsc::channel();
    let pump = Pump::spawn(tx.clone());
    std::thread::Builder::new()
        .name("input".into())
        .spawn(move || input_thread(tx))?;

    let timer = Stopwatch::with_interval(SystemClock::new(), pump, config.tick_interval_ms);
    let size = crossterm::terminal::size()?;
    let mut app = StopwatchApp::new(config, timer, size);

    let mut out = io::stdout();
    ui::enter(&mut out)?;
    let result = app.run(&rx, &mut out);
    // Restore the terminal even if the loop failed
    let restored = ui::leave(&mut out);
    let pump = app.stopwatch.timer.scheduler_mut();
    log::debug!("stopping pump (running: {})", pump.is_running());
    pump.shutdown();
    settle(result, restored)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("stopwatch: {}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
