use crate::project::Project;
use jsinfer_binder::SourceFile;
use jsinfer_parser::NodeIndex;
use std::sync::Once;

/// Install a test writer for `tracing` output when `RUST_LOG` is set.
pub(crate) fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        if std::env::var_os("RUST_LOG").is_some() {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .with_test_writer()
                .try_init();
        }
    });
}

pub(crate) fn project_with(files: &[(&str, &str)]) -> Project {
    init_tracing();
    let mut project = Project::new();
    for (name, text) in files {
        project
            .set_file((*name).to_string(), (*text).to_string())
            .expect("adding a file");
    }
    project
}

/// Byte offset of the `occurrence`-th (0-based) whole-word match of `needle`.
pub(crate) fn offset_of(text: &str, needle: &str, occurrence: usize) -> u32 {
    let is_word = |c: char| c.is_alphanumeric() || c == '_' || c == '$';
    let starts_word = needle.chars().next().is_some_and(is_word);
    let ends_word = needle.chars().next_back().is_some_and(is_word);
    text.match_indices(needle)
        .filter(|&(start, _)| {
            let before = text[..start].chars().next_back();
            let after = text[start + needle.len()..].chars().next();
            !(starts_word && before.is_some_and(is_word))
                && !(ends_word && after.is_some_and(is_word))
        })
        .nth(occurrence)
        .map(|(offset, _)| offset as u32)
        .unwrap_or_else(|| panic!("{needle:?} #{occurrence} not found in {text:?}"))
}

/// Rendered type at the start of the `occurrence`-th match of `needle`.
pub(crate) fn type_text(
    project: &mut Project,
    file_name: &str,
    needle: &str,
    occurrence: usize,
) -> String {
    let text = project.file(file_name).expect("file").text().to_string();
    let offset = offset_of(&text, needle, occurrence);
    project
        .type_text_at(file_name, offset)
        .unwrap_or_else(|| "undefined".to_string())
}

/// The innermost node of `kind` containing the `occurrence`-th match of
/// `needle`.
pub(crate) fn node_at(
    file: &SourceFile,
    needle: &str,
    occurrence: usize,
    kind: jsinfer_scanner::SyntaxKind,
) -> NodeIndex {
    let offset = offset_of(file.text(), needle, occurrence);
    let node = file.tree().node_at_offset(offset);
    file.arena().find_ancestor(node, kind)
}
