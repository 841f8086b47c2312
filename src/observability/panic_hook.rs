//! Custom panic hook for structured crash reports.
//!
//! Prints the clustering phase, input file and merge progress alongside the
//! panic message so a report says where in the pipeline the crash happened.

use super::context::{get_current_context, get_merge_progress, ClusteringContext};
use std::panic::PanicHookInfo;
use tracing::Span;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const RULE: &str = "════════════════════════════════════════════════════════════════════════════════";

/// Install the crash-report hook. Call once, early in `main`.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        print_crash_report(info);
    }));
}

fn print_crash_report(info: &PanicHookInfo<'_>) {
    let context = get_current_context();
    let (passes, active) = get_merge_progress();

    eprintln!();
    eprintln!("{RULE}");
    eprintln!("RICHCLUSTER CRASH REPORT (version {VERSION}, {})", std::env::consts::OS);
    eprintln!("{RULE}");
    print_panic_details(info);
    print_context_section(&context, passes, active);
    print_backtrace_section();
}

fn print_panic_details(info: &PanicHookInfo<'_>) {
    eprintln!("  PANIC: {}", truncate(&extract_panic_message(info), 200));
    if let Some(location) = info.location() {
        eprintln!(
            "  Location: {}:{}:{}",
            location.file(),
            location.line(),
            location.column()
        );
    }
}

fn print_context_section(context: &ClusteringContext, passes: usize, active: usize) {
    eprintln!("  OPERATION CONTEXT:");
    match &context.phase {
        Some(phase) => eprintln!("    Phase: {phase}"),
        None => eprintln!("    Phase: (not set - crash occurred before clustering started)"),
    }

    let current_span = Span::current();
    if let Some(metadata) = current_span.metadata() {
        eprintln!("    Span: {}", metadata.name());
    }

    if let Some(input) = &context.input {
        eprintln!("    Input: {}", input.display());
    }

    if passes > 0 {
        eprintln!("    Merge passes: {passes} ({active} active clusters)");
    }
}

fn print_backtrace_section() {
    eprintln!("{RULE}");
    if std::env::var("RUST_BACKTRACE").is_ok() {
        eprintln!("{}", std::backtrace::Backtrace::capture());
    } else {
        eprintln!("Run with RUST_BACKTRACE=1 for stack trace");
    }
}

fn extract_panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn test_truncate_long_string() {
        let result = truncate("this is a long string that needs truncation", 20);
        assert_eq!(result.chars().count(), 20);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("κκκκκκ", 5), "κκ...");
    }
}
