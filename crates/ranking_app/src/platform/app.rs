use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use ranking_core::{Category, LoadPhase, LoadState};
use ranking_engine::{EngineHandle, LoadController};
use ranking_logging::{rank_info, rank_warn};

use super::cli::Cli;
use super::ui::input::{parse_command, UserCommand};
use super::ui::render::{render, render_help, render_registry};
use super::{config, logging};

/// Render throttle; completions arriving within one tick are shown together.
const TICK: Duration = Duration::from_millis(75);

pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::initialize(cli.log, cli.log_level);

    let mut config = config::load(&cli.config)?;
    config.apply_overrides(&cli);
    let settings = config.fetch_settings()?;

    let engine = EngineHandle::new(settings).context("failed to start ranking engine")?;
    let controller = LoadController::new(engine);

    if cli.once {
        run_once(controller, config.initial_category, cli.json, config.settle_timeout())
    } else {
        run_interactive(controller, config.initial_category)
    }
}

fn run_once(
    mut controller: LoadController,
    category: Category,
    json: bool,
    timeout: Duration,
) -> anyhow::Result<ExitCode> {
    controller.select_category(category);
    let view = controller.wait_until_settled(timeout);

    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &view.products)?;
        writeln!(stdout)?;
    } else {
        writeln!(stdout, "{}", render(&view))?;
    }

    Ok(match view.phase {
        LoadPhase::Ready => ExitCode::SUCCESS,
        LoadPhase::Idle | LoadPhase::Loading | LoadPhase::Failed => ExitCode::FAILURE,
    })
}

fn run_interactive(mut controller: LoadController, initial: Category) -> anyhow::Result<ExitCode> {
    let snapshots = controller.subscribe();
    let lines = spawn_stdin_reader();

    print_block(&render_help())?;
    controller.select_category(initial);

    loop {
        loop {
            match lines.try_recv() {
                Ok(line) => match parse_command(&line) {
                    Ok(Some(UserCommand::Select(category))) => {
                        controller.select_category(category);
                    }
                    Ok(Some(UserCommand::Refresh)) => controller.refresh(),
                    Ok(Some(UserCommand::List)) => print_block(&render_registry())?,
                    Ok(Some(UserCommand::Help)) => print_block(&render_help())?,
                    Ok(Some(UserCommand::Quit)) => return Ok(ExitCode::SUCCESS),
                    Ok(None) => {}
                    Err(err) => print_block(&err.to_string())?,
                },
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    rank_info!("stdin closed; exiting");
                    return Ok(ExitCode::SUCCESS);
                }
            }
        }

        controller.pump_blocking(TICK);

        // Only the newest snapshot is worth drawing.
        if let Some(view) = snapshots.try_iter().last() {
            draw(&view)?;
        }
    }
}

fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    rank_warn!("failed to read stdin: {}", err);
                    break;
                }
            }
        }
    });
    rx
}

fn draw(view: &LoadState) -> io::Result<()> {
    print_block(&render(view))?;
    let mut stdout = io::stdout().lock();
    write!(stdout, "> ")?;
    stdout.flush()
}

fn print_block(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout)?;
    writeln!(stdout, "{text}")
}
