//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Success:   green   (init summary)
//!   - Error:     red     (failed queries)
//!   - Warning:   yellow  (load warnings)
//!   - Binding:   cyan    (node names in results)
//!   - Muted:     dimmed  (path arrows, field labels, empty results)
//!   - Emphasis:  bold    (section headers, graph names)

use colored::Colorize;
use tangle_engine::PATH_SEPARATOR;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Colorize a binding name (cyan).
pub(crate) fn binding(name: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return name.to_string();
    }
    name.cyan().to_string()
}

/// Apply dimmed style to text.
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Apply bold style to text (for section headers).
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

/// Colorize a rendered path: bindings cyan, arrows dimmed.
///
/// Single binding names pass through as a binding.
pub(crate) fn path(line: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return line.to_string();
    }
    let arrow = dimmed(PATH_SEPARATOR, config);
    line.split(PATH_SEPARATOR)
        .map(|node| binding(node, config))
        .collect::<Vec<_>>()
        .join(&arrow)
}
