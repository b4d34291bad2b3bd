// SPDX-License-Identifier: MIT

//! The runtime: worker threads, the frame stack, dispatch, and the
//! interactive plumbing (history, prompt, rcfile).
//!
//! One worker is spawned per [`Runtime::run`] call. Workers form a chain
//! rooted at the idle UI; the top of the chain is the foreground. Nested
//! calls (shell scripts, command substitution) push frames onto the same
//! chain and are joined by their parent; background sequences run on
//! detached workers that never contribute state back.

mod builtins;
mod error;
mod pipeline;
mod registry;
mod script;
mod state;

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use parking_lot::Mutex;

pub use error::RuntimeError;
pub use registry::{Command, Invocation, Registry};
pub use state::WorkerState;

use crate::complete::{self, Completion, SubCompleter};
use crate::config::Config;
use crate::expand::Expansion;
use crate::history::History;
use crate::stream::Stream;
use crate::terminal::Terminal;
use pipeline::Finals;

/// Commands run on startup before the user's rcfile.
const DEFAULT_RC: &str = r#"PROMPT='[\W]$ '
BIN_PATH=~/Documents/bin:$BIN_PATH
alias env='printenv'
alias logout='echo "Use EOF (ctrl-d) to leave."'
alias help='man'
alias la='ls -a'
alias ll='ls -la'
alias copy='pbcopy'
alias paste='pbpaste'
"#;

/// Options for one [`Runtime::run`] invocation.
#[derive(Clone)]
pub struct RunOptions {
    /// Stdin for the first stage of each pipe sequence.
    pub final_ins: Option<Stream>,
    /// Stdout for the last stage of each pipe sequence.
    pub final_outs: Option<Stream>,
    /// Stderr for the last stage of each pipe sequence.
    pub final_errs: Option<Stream>,
    /// `None` means "record when top-level".
    pub add_to_history: Option<bool>,
    /// `None` means "refresh the prompt when top-level".
    pub add_new_inp_line: Option<bool>,
    /// Carry environment/alias/cwd changes back to the parent frame.
    pub persistent: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            final_ins: None,
            final_outs: None,
            final_errs: None,
            add_to_history: None,
            add_new_inp_line: None,
            persistent: true,
        }
    }
}

impl RunOptions {
    /// Options for startup scripts: no history, no prompt refresh.
    pub fn silent() -> Self {
        Self { add_to_history: Some(false), add_new_inp_line: Some(false), ..Self::default() }
    }
}

/// Handle on a spawned worker.
pub struct Worker {
    id: u64,
    handle: Mutex<Option<std::thread::JoinHandle<()>>>,
    done: Arc<AtomicBool>,
}

impl Worker {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Wait for the worker to finish.
    pub fn join(&self) {
        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.done.load(Ordering::Acquire)
    }

    /// Poll for completion up to `grace`. Returns true if the worker
    /// finished in time.
    pub fn wait_timeout(&self, grace: Duration) -> bool {
        let deadline = Instant::now() + grace;
        while Instant::now() < deadline {
            if !self.is_alive() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        !self.is_alive()
    }

    /// Give the worker `grace` to acknowledge a cancel; if it does not,
    /// stop tracking it and leave it orphaned. Returns true if orphaned.
    pub fn abandon_after(&self, grace: Duration) -> bool {
        if self.wait_timeout(grace) {
            return false;
        }
        tracing::warn!(worker = self.id, "worker did not acknowledge cancel; orphaning");
        *self.handle.lock() = None;
        true
    }
}

/// A chain of worker frames rooted either at the idle UI or at a detached
/// background worker.
struct Chain {
    frames: Vec<Arc<Mutex<WorkerState>>>,
    ui_rooted: bool,
}

#[derive(Clone)]
struct WorkerCtx {
    chain: Arc<Mutex<Chain>>,
    frame: Arc<Mutex<WorkerState>>,
}

thread_local! {
    static CURRENT: RefCell<Option<WorkerCtx>> = const { RefCell::new(None) };
}

enum Parent {
    /// The idle UI frame: the runtime's base state.
    Base,
    Frame(Arc<Mutex<WorkerState>>),
}

struct Inner {
    base: WorkerState,
    history: History,
}

pub struct Runtime {
    config: Config,
    root: PathBuf,
    terminal: Arc<dyn Terminal>,
    registry: Registry,
    inner: Mutex<Inner>,
    interrupt: AtomicBool,
    worker_seq: AtomicU64,
    ui_runs_active: AtomicUsize,
    sub_completer: Mutex<Option<Arc<dyn SubCompleter>>>,
}

impl Runtime {
    /// Build a runtime rooted at `root` (home of the rcfile, history file,
    /// and the bundled `bin` directory).
    pub fn new(
        config: Config,
        root: PathBuf,
        terminal: Arc<dyn Terminal>,
        registry: Registry,
    ) -> Arc<Runtime> {
        let mut environ: HashMap<String, String> = std::env::vars().collect();
        let home = environ
            .get("HOME")
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("/"));
        environ
            .entry("HOME2".to_string())
            .or_insert_with(|| home.join("Documents").display().to_string());
        environ.insert("STASH_ROOT".to_string(), root.display().to_string());
        environ.insert("BIN_PATH".to_string(), root.join("bin").display().to_string());
        environ.entry("PROMPT".to_string()).or_insert_with(|| "[\\W]$ ".to_string());

        let cwd = std::env::current_dir().unwrap_or_else(|_| root.clone());
        let base = WorkerState::new(
            environ,
            cwd,
            Stream::Terminal(terminal.clone()),
            Stream::Terminal(terminal.clone()),
            Stream::Terminal(terminal.clone()),
        );

        let history = History::new(
            config.display.history_max,
            config.system.ipython_style_history_search,
        );

        Arc::new(Runtime {
            config,
            root,
            terminal,
            registry,
            inner: Mutex::new(Inner { base, history }),
            interrupt: AtomicBool::new(false),
            worker_seq: AtomicU64::new(0),
            ui_runs_active: AtomicUsize::new(0),
            sub_completer: Mutex::new(None),
        })
    }

    // ------------------------------------------------------------------
    // Entry points
    // ------------------------------------------------------------------

    /// Run shell lines on a fresh worker.
    pub fn run(self: &Arc<Self>, lines: Vec<String>, opts: RunOptions) -> Worker {
        let id = self.worker_seq.fetch_add(1, Ordering::Relaxed) + 1;
        let caller = CURRENT.with(|c| c.borrow().clone());

        // run may only be called from the idle UI or from the worker on
        // top of its chain; anything else earns the diagnostic.
        let linear = match &caller {
            Some(ctx) => {
                let chain = ctx.chain.lock();
                chain.frames.last().map(|top| Arc::ptr_eq(top, &ctx.frame)).unwrap_or(false)
            }
            None => self.ui_runs_active.load(Ordering::Acquire) == 0,
        };
        if !linear {
            self.terminal.write_with_prefix("worker threads must be linear\n");
        }

        let (chain, parent) = match caller {
            Some(ctx) => (ctx.chain, Parent::Frame(ctx.frame)),
            None => {
                self.ui_runs_active.fetch_add(1, Ordering::AcqRel);
                (
                    Arc::new(Mutex::new(Chain { frames: Vec::new(), ui_rooted: true })),
                    Parent::Base,
                )
            }
        };

        let parent_is_base = matches!(parent, Parent::Base);
        let done = Arc::new(AtomicBool::new(false));
        let rt = self.clone();
        let thread_done = done.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("stash-worker-{id}"))
            .spawn(move || {
                rt.worker_main(id, chain, parent, lines, opts);
                thread_done.store(true, Ordering::Release);
            });

        let handle = match spawned {
            Ok(handle) => Some(handle),
            Err(e) => {
                done.store(true, Ordering::Release);
                if parent_is_base {
                    self.ui_runs_active.fetch_sub(1, Ordering::AcqRel);
                }
                self.terminal.write_with_prefix(&format!("failed to start worker: {e}\n"));
                None
            }
        };

        Worker { id, handle: Mutex::new(handle), done }
    }

    /// Run a single line.
    pub fn run_line(self: &Arc<Self>, line: &str) -> Worker {
        self.run(vec![line.to_string()], RunOptions::default())
    }

    /// Run a multi-line source text.
    pub fn run_source(self: &Arc<Self>, text: &str, opts: RunOptions) -> Worker {
        self.run(text.lines().map(String::from).collect(), opts)
    }

    /// Execute the built-in rc and then the user's rcfile, if present.
    pub fn load_rcfile(self: &Arc<Self>) {
        self.run_source(DEFAULT_RC, RunOptions::silent()).join();

        let path = self.root.join(&self.config.system.rcfile);
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                self.run_source(&text, RunOptions::silent()).join();
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read rcfile");
                self.terminal
                    .write_with_prefix(&format!("{}: error reading rcfile\n", path.display()));
            }
        }
    }

    // ------------------------------------------------------------------
    // Worker body
    // ------------------------------------------------------------------

    fn worker_main(
        self: &Arc<Self>,
        id: u64,
        chain: Arc<Mutex<Chain>>,
        parent: Parent,
        lines: Vec<String>,
        opts: RunOptions,
    ) {
        let seed = match &parent {
            Parent::Base => {
                let mut inner = self.inner.lock();
                WorkerState::child_of(&mut inner.base, id)
            }
            Parent::Frame(frame) => WorkerState::child_of(&mut frame.lock(), id),
        };
        let frame = Arc::new(Mutex::new(seed));

        let (is_top, ui_rooted, depth) = {
            let mut chain_guard = chain.lock();
            let was_empty = chain_guard.frames.is_empty();
            chain_guard.frames.push(frame.clone());
            (was_empty && chain_guard.ui_rooted, chain_guard.ui_rooted, chain_guard.frames.len())
        };
        // The first nested worker swaps the history behind itself, so
        // scripts and substitutions see an empty recent-history view.
        if ui_rooted && depth == 2 {
            self.inner.lock().history.swap();
        }
        CURRENT.with(|c| {
            *c.borrow_mut() = Some(WorkerCtx { chain: chain.clone(), frame: frame.clone() });
        });

        let target_cwd = frame.lock().cwd.clone();
        if let Err(e) = state::enter_cwd(&target_cwd) {
            tracing::warn!(cwd = %target_cwd.display(), error = %e, "cannot enter worker cwd");
        }

        tracing::debug!(worker = id, top = is_top, lines = lines.len(), "worker start");
        self.run_lines(is_top, &frame, &lines, &opts);

        // Prompt refresh: explicit, or implicit for the top-level worker.
        if opts.add_new_inp_line == Some(true)
            || (is_top && opts.add_new_inp_line != Some(false))
        {
            self.script_will_end();
        }
        self.terminal.flush();

        let depth_after = {
            let mut chain_guard = chain.lock();
            chain_guard.frames.pop();
            chain_guard.frames.len()
        };
        if ui_rooted && depth_after == 1 {
            self.inner.lock().history.swap();
        }
        CURRENT.with(|c| c.borrow_mut().take());
        let final_state = frame.lock().clone();

        match parent {
            Parent::Base => {
                {
                    let mut inner = self.inner.lock();
                    if is_top || opts.persistent {
                        inner.base.absorb(&final_state);
                    }
                    inner.base.return_value = final_state.return_value;
                }
                if !(is_top || opts.persistent) {
                    let _ = state::enter_cwd(&final_state.enclosed_cwd);
                }
                self.ui_runs_active.fetch_sub(1, Ordering::AcqRel);
            }
            Parent::Frame(parent_frame) => {
                {
                    let mut parent_state = parent_frame.lock();
                    if opts.persistent {
                        parent_state.absorb(&final_state);
                    }
                    parent_state.return_value = final_state.return_value;
                }
                if !opts.persistent {
                    let _ = state::enter_cwd(&final_state.enclosed_cwd);
                }
            }
        }

        if is_top {
            self.interrupt.store(false, Ordering::Release);
        }
        tracing::debug!(worker = id, rv = final_state.return_value, "worker end");
    }

    fn run_lines(
        self: &Arc<Self>,
        is_top: bool,
        frame: &Arc<Mutex<WorkerState>>,
        lines: &[String],
        opts: &RunOptions,
    ) {
        let finals = Finals {
            ins: opts.final_ins.clone(),
            outs: opts.final_outs.clone(),
            errs: opts.final_errs.clone(),
        };

        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            if self.interrupt_requested() {
                self.report_error(&RuntimeError::Interrupted);
                break;
            }

            let mut expansion = match Expansion::new(self, frame, line) {
                Ok(expansion) => expansion,
                Err(e) => {
                    self.report_error(&e);
                    break;
                }
            };

            // Record the history-substituted form before anything runs.
            if opts.add_to_history == Some(true) || (opts.add_to_history.is_none() && is_top) {
                self.inner.lock().history.add(expansion.line());
            }

            let result = (|| -> Result<(), RuntimeError> {
                while let Some(next) = expansion.next_pipe_sequence() {
                    if self.interrupt_requested() {
                        return Err(RuntimeError::Interrupted);
                    }
                    let seq = next?;
                    if seq.in_background {
                        let snapshot = frame.lock().clone();
                        self.spawn_background(seq, snapshot);
                    } else {
                        pipeline::run_pipe_sequence(self, frame, &seq, &finals, true)?;
                    }
                }
                Ok(())
            })();

            if let Err(e) = result {
                self.report_error(&e);
                break;
            }
        }
    }

    /// Run a backgrounded pipe sequence on a detached worker.
    ///
    /// The detached frame is a snapshot of the caller's; nothing flows
    /// back, and output goes to the process-level streams instead of the
    /// terminal.
    fn spawn_background(self: &Arc<Self>, seq: crate::ast::PipeSequence, mut snapshot: WorkerState) {
        snapshot.sys_stdout = Stream::Stdout;
        snapshot.sys_stderr = Stream::Stderr;
        snapshot.enclosed_cwd = snapshot.cwd.clone();

        let rt = self.clone();
        let spawned = std::thread::Builder::new()
            .name("stash-background".to_string())
            .spawn(move || {
                let frame = Arc::new(Mutex::new(snapshot));
                let chain = Arc::new(Mutex::new(Chain {
                    frames: vec![frame.clone()],
                    ui_rooted: false,
                }));
                CURRENT.with(|c| {
                    *c.borrow_mut() = Some(WorkerCtx { chain, frame: frame.clone() });
                });
                if let Err(e) =
                    pipeline::run_pipe_sequence(&rt, &frame, &seq, &Finals::default(), false)
                {
                    rt.report_error(&e);
                }
                let enclosed = frame.lock().enclosed_cwd.clone();
                let _ = state::enter_cwd(&enclosed);
            });
        if let Err(e) = spawned {
            self.terminal.write_with_prefix(&format!("failed to start background worker: {e}\n"));
        }
    }

    // ------------------------------------------------------------------
    // Terminal-facing helpers
    // ------------------------------------------------------------------

    /// Surface an error as a single-line message.
    pub(crate) fn report_error(&self, e: &RuntimeError) {
        match e {
            RuntimeError::Interrupted => {
                self.terminal.write("^C\n");
                self.terminal.write_with_prefix("interrupted\n");
            }
            _ => {
                self.terminal.write_with_prefix(&format!("{e}\n"));
                if self.config.system.traceback {
                    self.terminal.write_with_prefix(&format!("{e:?}\n"));
                }
            }
        }
    }

    pub fn write_message(&self, s: &str) {
        self.terminal.write_with_prefix(s);
    }

    fn script_will_end(&self) {
        let prompt = self.prompt();
        self.terminal.write(&prompt);
        self.terminal.new_inp_line("");
        // Any external tab handler was for the script that just ended.
        *self.sub_completer.lock() = None;
    }

    /// The prompt string, with `\w` as the cwd (HOME abbreviated to `~`)
    /// and `\W` as its basename.
    pub fn prompt(&self) -> String {
        let (prompt, cwd, home) = self.with_current_state(|st| {
            (
                st.env_get("PROMPT").unwrap_or("[\\W]$ ").to_string(),
                st.cwd.clone(),
                st.home(),
            )
        });

        if !prompt.contains("\\w") && !prompt.contains("\\W") {
            return prompt;
        }

        let home = home.display().to_string();
        let mut cur = cwd.display().to_string();
        if !home.is_empty() && cur.starts_with(&home) {
            cur = format!("~{}", &cur[home.len()..]);
        }
        let dirname = cur.rfind('/').map(|i| &cur[..i]).unwrap_or("");
        let basename = cur.rsplit('/').next().unwrap_or(&cur).to_string();
        let short = if dirname == "~" { cur.clone() } else { basename };

        prompt.replace("\\w", &cur).replace("\\W", &short)
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    pub(crate) fn search_history(&self, tok: &str) -> Result<String, RuntimeError> {
        self.inner.lock().history.search(tok)
    }

    /// Append a line to the history, subject to the usual dedup rules.
    pub fn add_history(&self, line: &str) {
        self.inner.lock().history.add(line);
    }

    /// The history view of the calling context, newest first. Nested
    /// workers see the swapped-in (empty) slot.
    pub fn history_entries(&self) -> Vec<String> {
        self.inner.lock().history.entries().to_vec()
    }

    /// Up-arrow: show the previous entry on the input line.
    pub fn history_up(&self) {
        let live = self.terminal.read_inp_line();
        let entry = self.inner.lock().history.up(&live);
        if let Some(entry) = entry {
            self.terminal.set_inp_line(&entry, None);
        }
    }

    /// Down-arrow: walk back toward the live input line.
    pub fn history_down(&self) {
        let entry = self.inner.lock().history.down();
        if let Some(entry) = entry {
            self.terminal.set_inp_line(&entry, None);
        }
    }

    pub fn load_history(&self) {
        let path = self.root.join(&self.config.system.historyfile);
        self.inner.lock().history.load(&path);
    }

    pub fn save_history(&self) {
        let path = self.root.join(&self.config.system.historyfile);
        if let Err(e) = self.inner.lock().history.save(&path) {
            tracing::warn!(path = %path.display(), error = %e, "cannot save history");
        }
    }

    // ------------------------------------------------------------------
    // Completion
    // ------------------------------------------------------------------

    /// Tab completion for `line` with the cursor at `cursor_at` (end of
    /// line when `None`). Applies the outcome to the terminal and returns
    /// it for callers that render themselves.
    pub fn complete(&self, line: &str, cursor_at: Option<usize>) -> Completion {
        complete::complete(self, line, cursor_at)
    }

    /// Install an external subcommand completer; cleared at each prompt.
    pub fn set_sub_completer(&self, completer: Arc<dyn SubCompleter>) {
        *self.sub_completer.lock() = Some(completer);
    }

    pub(crate) fn sub_completer(&self) -> Option<Arc<dyn SubCompleter>> {
        self.sub_completer.lock().clone()
    }

    pub(crate) fn auto_completion_max(&self) -> usize {
        self.config.display.auto_completion_max
    }

    // ------------------------------------------------------------------
    // Cancellation
    // ------------------------------------------------------------------

    /// Cancel signal from the terminal: abort the current line.
    pub fn cancel(&self) {
        self.interrupt.store(true, Ordering::Release);
    }

    pub(crate) fn interrupt_requested(&self) -> bool {
        self.interrupt.load(Ordering::Acquire)
    }

    // ------------------------------------------------------------------
    // State access
    // ------------------------------------------------------------------

    fn with_current_state<R>(&self, f: impl FnOnce(&WorkerState) -> R) -> R {
        let frame = CURRENT.with(|c| c.borrow().as_ref().map(|ctx| ctx.frame.clone()));
        match frame {
            Some(frame) => {
                let state = frame.lock();
                f(&state)
            }
            None => {
                let inner = self.inner.lock();
                f(&inner.base)
            }
        }
    }

    /// Clone of the state the caller sees: the current worker frame, or
    /// the base frame when idle.
    pub(crate) fn state_snapshot(&self) -> WorkerState {
        self.with_current_state(|st| st.clone())
    }

    pub fn env_get(&self, name: &str) -> Option<String> {
        self.with_current_state(|st| st.env_get(name).map(String::from))
    }

    pub fn cwd(&self) -> PathBuf {
        self.with_current_state(|st| st.cwd.clone())
    }

    pub fn aliases(&self) -> IndexMap<String, String> {
        self.with_current_state(|st| st.aliases.clone())
    }

    /// `$?` of the most recently finished command.
    pub fn last_return_value(&self) -> i32 {
        self.with_current_state(|st| st.return_value)
    }

    /// Snapshot of the current environment.
    pub fn environ(&self) -> HashMap<String, String> {
        self.with_current_state(|st| st.environ.clone())
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn terminal(&self) -> Arc<dyn Terminal> {
        self.terminal.clone()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runnable script names under `["."] + BIN_PATH`, for the completer.
    pub fn all_script_names(&self) -> Vec<String> {
        self.with_current_state(script::all_script_names)
    }
}

#[cfg(test)]
#[path = "../exec_tests/mod.rs"]
mod tests;
