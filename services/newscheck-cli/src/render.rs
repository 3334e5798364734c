use std::fmt::Write;

use newscheck::{ErrorBody, Presentation, RequestState, Tone};

/// Plain-text rendering of a settled `Presentation`.
pub fn render(view: &Presentation) -> String {
    let mut out = String::new();

    if let Some(banner) = &view.banner {
        let _ = writeln!(out, "error: {banner}");
    }

    if let Some(block) = &view.result {
        let mark = match block.badge.tone {
            Tone::Positive => "+",
            Tone::Negative => "x",
            Tone::Caution => "!",
        };
        let _ = writeln!(out, "[{mark} {}] {}", block.badge.label, block.confidence_label);
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", block.explanation);

        if !block.sources.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Sources Used:");
            for (i, source) in block.sources.iter().enumerate() {
                let _ = writeln!(out, "  {}. {}", i + 1, source.title);
                let _ = writeln!(out, "     {}", source.url);
            }
        }
    }

    out
}

/// JSON rendering for `--json`: the result on success, `{"detail": ...}`
/// on failure.
pub fn render_json(state: &RequestState, view: &Presentation) -> serde_json::Result<String> {
    match (state.result(), &view.banner) {
        (Some(result), _) => serde_json::to_string_pretty(result),
        (None, Some(banner)) => serde_json::to_string_pretty(&ErrorBody {
            detail: banner.clone(),
        }),
        (None, None) => Ok("null".to_string()),
    }
}
