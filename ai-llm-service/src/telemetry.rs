use std::io::{self, IsTerminal};
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Target prefixes of the workspace crates; events from other crates
/// (hyper, reqwest, ...) are not rendered by [`layer`].
pub const WORKSPACE_TARGETS: &[&str] = &[
    "arxiv_qa",
    "api",
    "ai_llm_service",
    "chat_session",
    "cloud_index",
    "contextor",
    "secret_store",
    "tower_http",
];

/// RFC3339 UTC timer implemented via `chrono` (no extra features).
/// Example output: `2025-09-12T10:20:30Z`
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        // Keep timestamps compact: no fractional seconds, Z-suffix
        let s = now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&s)
    }
}

/// Returns `true` if `target` belongs to one of the workspace crates.
pub fn is_workspace_target(target: &str) -> bool {
    WORKSPACE_TARGETS.iter().any(|p| {
        target
            .strip_prefix(p)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
    })
}

/// Build a formatting layer that renders ONLY events emitted by the workspace.
///
/// - RFC3339 UTC timestamps
/// - Compact single-line format
/// - `file:line` and target (module path)
/// - Span close events (duration at the end of spans)
/// - ANSI colors only when stdout is a terminal
///
/// Compose it in the binary together with an [`EnvFilter`].
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let use_ansi = io::stdout().is_terminal();

    let only_workspace = filter::filter_fn(|meta| is_workspace_target(meta.target()));

    fmt::layer()
        .with_timer(ChronoRfc3339Utc)
        .with_level(true)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(use_ansi)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .event_format(fmt::format().compact().with_source_location(true))
        .with_filter(only_workspace)
}

/// Level directive for a single crate, e.g. `contextor=debug`.
pub fn level_directive(target: &str, level: Level) -> Option<Directive> {
    let s = format!("{target}={}", level.as_str().to_lowercase());
    Directive::from_str(&s).ok()
}

/// EnvFilter from `RUST_LOG`, or `default` when unset/invalid.
///
/// `verbose` crates get `level` on top of the base filter.
pub fn env_filter_with_level(default: &str, verbose: &[&str], level: Level) -> EnvFilter {
    let mut base = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    for target in verbose {
        if let Some(d) = level_directive(target, level) {
            base = base.add_directive(d);
        }
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_targets_match_module_paths() {
        assert!(is_workspace_target("contextor"));
        assert!(is_workspace_target("contextor::engine"));
        assert!(is_workspace_target("api::routes::ask"));
        assert!(!is_workspace_target("apiary"));
        assert!(!is_workspace_target("hyper::proto"));
    }

    #[test]
    fn directive_is_well_formed() {
        let d = level_directive("cloud_index", Level::DEBUG).unwrap();
        assert_eq!(d.to_string(), "cloud_index=debug");
    }
}
