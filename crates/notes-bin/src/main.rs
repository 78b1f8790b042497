//! `notes` entrypoint: load a text file, replay a script of formatting actions
//! and print the resulting paragraph formatting.
use anyhow::{Context, Result};
use clap::Parser;
use core_actions::{Action, ActionObserver, ToolbarState, dispatch, toolbar_state};
use core_config::{Config, load_from};
use core_state::EditorState;
use core_text::{Attributes, ParagraphStyle, TextRange};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;

mod script;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "notes", version, about = "Replay rich-text formatting actions over a text file")]
struct Args {
    /// UTF-8 text file to format.
    pub path: PathBuf,
    /// Actions to apply in order (e.g. `caret:3 ordered indent-right`).
    pub actions: Vec<String>,
    /// Optional configuration file path (overrides discovery of `notes.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Log file (default `notes.log` in the working directory). Filter with `RUST_LOG`.
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

/// Logs each action and the toolbar state that follows it.
struct TraceObserver;

impl ActionObserver for TraceObserver {
    fn on_action(&self, action: &Action) {
        debug!(target: "runtime.action", ?action, "action");
    }

    fn on_refresh(&self, toolbar: &ToolbarState) {
        debug!(target: "runtime.action", list = ?toolbar.list, indent = toolbar.indent, bold = toolbar.bold, "toolbar_refresh");
    }
}

fn configure_logging(log_file: Option<&Path>) -> Option<WorkerGuard> {
    let log_path = log_file.unwrap_or(Path::new("notes.log"));
    let log_dir = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = log_path.file_name()?;
    if log_path.exists() {
        let _ = std::fs::remove_file(log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Some(guard),
        // Global tracing subscriber already installed; drop guard so writer shuts down.
        Err(_err) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn load_state(path: &Path, config: &Config) -> Result<EditorState> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    debug!(target: "io", file = %path.display(), size_bytes = content.len(), "file_read_ok");
    let attrs = Attributes::default().with_font(config.font().body_font());
    Ok(EditorState::from_text(&content, attrs))
}

fn describe_style(style: Option<&ParagraphStyle>) -> String {
    let Some(style) = style else {
        return "head=0 first=0 lists=[]".to_string();
    };
    let lists: Vec<String> = style
        .lists
        .iter()
        .map(|l| match l.kind() {
            Some(kind) => format!("{kind:?}#{}", l.id()).to_lowercase(),
            None => format!("{}#{}", l.format(), l.id()),
        })
        .collect();
    format!(
        "head={} first={} lists=[{}]",
        style.head_indent,
        style.first_line_head_indent,
        lists.join(",")
    )
}

/// One line per stored paragraph, plus a `typing` line when the text ends with
/// a line break (the still-empty paragraph lives only in typing attributes).
fn report(state: &EditorState, config: &Config) -> String {
    let mut out = String::new();
    let len = state.buffer.len();
    let mut at = 0;
    let mut index = 0;
    while at < len {
        let para = state.buffer.paragraph_range(TextRange::caret(at));
        let text = state.buffer.slice(para);
        let style = state.buffer.paragraph_style_at(para.location).map(|s| &**s);
        let _ = writeln!(
            out,
            "{index}\t{}\t{:?}",
            describe_style(style),
            text.trim_end_matches(core_text::is_line_break)
        );
        at = para.end();
        index += 1;
    }
    if len == 0 || state.buffer.ends_with_line_break() {
        let _ = writeln!(out, "typing\t{}", describe_style(state.typing.paragraph_style()));
    }
    let tb = toolbar_state(state, config);
    let _ = writeln!(
        out,
        "toolbar\tlist={:?} indent={} bold={} italic={} underline={} strike={} font={} {}",
        tb.list, tb.indent, tb.bold, tb.italic, tb.underline, tb.strikethrough, tb.font_family, tb.font_size
    );
    out
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging(args.log_file.as_deref());
    install_panic_hook();
    info!(target: "runtime", "startup");

    let config = load_from(args.config.clone())?;
    let actions = args
        .actions
        .iter()
        .map(|t| script::parse_action(t))
        .collect::<Result<Vec<_>>>()?;
    let mut state = load_state(&args.path, &config)?;

    let observers: Vec<Box<dyn ActionObserver>> = vec![Box::new(TraceObserver)];
    for action in actions {
        dispatch(action, &mut state, &config, &observers);
    }
    info!(target: "runtime", undo_depth = state.undo_depth(), dirty = state.dirty, "script_complete");
    print!("{}", report(&state, &config));
    Ok(())
}
