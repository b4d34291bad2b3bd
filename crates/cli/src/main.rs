// SPDX-License-Identifier: MIT

//! `stash` — interactive POSIX-lite shell.

mod term;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use stash_shell::{Config, Registry, RunOptions, Runtime};
use tracing_subscriber::EnvFilter;

use term::StdTerminal;

#[derive(Parser, Debug)]
#[command(name = "stash", about = "An interactive, POSIX-lite shell", version)]
struct Cli {
    /// Run a single command line and exit.
    #[arg(short = 'c', long = "command")]
    command: Option<String>,

    /// Skip the rcfile at startup.
    #[arg(long)]
    no_rcfile: bool,

    /// Config file (default: <root>/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Shell root directory (default: ~/.stash).
    #[arg(long)]
    root: Option<PathBuf>,

    /// Script to run, followed by its arguments.
    #[arg(trailing_var_arg = true)]
    script: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let root = match cli.root {
        Some(root) => root,
        None => dirs::home_dir()
            .ok_or_else(|| anyhow!("cannot determine a home directory"))?
            .join(".stash"),
    };
    std::fs::create_dir_all(root.join("bin"))
        .with_context(|| format!("cannot create shell root {}", root.display()))?;

    let config_path = cli.config.unwrap_or_else(|| root.join("config.toml"));
    let config = Config::load_or_default(&config_path);
    tracing::debug!(root = %root.display(), config = %config_path.display(), "starting stash");

    let terminal = Arc::new(StdTerminal::new());
    let rt = Runtime::new(config, root, terminal.clone(), Registry::with_builtins());

    rt.load_history();
    if !cli.no_rcfile {
        rt.load_rcfile();
    }

    if let Some(line) = cli.command {
        rt.run(vec![line], RunOptions { add_new_inp_line: Some(false), ..RunOptions::default() })
            .join();
        rt.save_history();
        std::process::exit(rt.last_return_value());
    }

    if !cli.script.is_empty() {
        // Hand the script to the shell the way a typed line would, with
        // whitespace in the path and arguments kept intact.
        let line = cli
            .script
            .iter()
            .map(|word| word.replace(' ', "\\ "))
            .collect::<Vec<_>>()
            .join(" ");
        rt.run(vec![line], RunOptions { add_new_inp_line: Some(false), ..RunOptions::default() })
            .join();
        std::process::exit(rt.last_return_value());
    }

    repl(&rt, terminal);
    rt.save_history();
    Ok(())
}

/// Prompt, read, run, repeat until EOF.
fn repl(rt: &Arc<Runtime>, terminal: Arc<StdTerminal>) {
    use stash_shell::Terminal;

    loop {
        terminal.write(&rt.prompt());
        let Some(line) = terminal.read_line() else {
            terminal.write("\n");
            break;
        };
        rt.run(
            vec![line],
            RunOptions { add_new_inp_line: Some(false), ..RunOptions::default() },
        )
        .join();
    }
}
