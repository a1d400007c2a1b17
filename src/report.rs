use std::fmt::Write;

use crate::reeval::Comparison;

const RULE_WIDTH: usize = 30;

/// Human readable rendering of a comparison.
pub fn render_comparison(comparison: &Comparison) -> String {
    let mut out = String::new();
    let diff = &comparison.diff;
    let rule = "-".repeat(RULE_WIDTH);

    let old_folder = comparison.old.folder_digest();
    let new_folder = comparison.new.folder_digest();
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "OLD FOLDER DIGEST {old_folder}");
    let _ = writeln!(out, "NEW FOLDER DIGEST {new_folder}");
    if old_folder == new_folder {
        let _ = writeln!(out, "== FOLDER DIGESTS MATCH");
    }
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out);

    for (path, (old, new)) in &diff.changed {
        let _ = writeln!(out, "!= CHANGED FILE | {path}");
        let _ = writeln!(out, "    OLD -> {old}");
        let _ = writeln!(out, "    NEW -> {new}");
        let _ = writeln!(out);
    }
    if diff.changed.is_empty() {
        let _ = writeln!(out, "== NO CHANGED FILES");
    }
    let _ = writeln!(out);

    for path in &diff.added {
        let _ = writeln!(out, "+ NEW FILE      | {path}");
    }
    if diff.added.is_empty() {
        let _ = writeln!(out, "== NO NEW FILES");
    }
    let _ = writeln!(out);

    for path in &diff.removed {
        let _ = writeln!(out, "- DELETED FILE  | {path}");
    }
    if diff.removed.is_empty() {
        let _ = writeln!(out, "== NO DELETED FILES");
    }
    let _ = writeln!(out);

    let summary = diff.summary();
    let _ = writeln!(out, "Equal (omitted):  {}", summary.same);
    let _ = writeln!(out, "Changed:          {}", summary.changed);
    let _ = writeln!(out, "New:              {}", summary.added);
    let _ = writeln!(out, "Deleted:          {}", summary.removed);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::Digest;
    use crate::index::FolderIndex;
    use std::collections::BTreeMap;

    fn index(entries: &[(&str, Digest)]) -> FolderIndex {
        let map: BTreeMap<String, Digest> =
            entries.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        FolderIndex::new("root", map)
    }

    #[test]
    fn test_renders_all_sections() {
        let old = index(&[
            ("root/a", Digest::of_bytes(b"1")),
            ("root/gone", Digest::of_bytes(b"g")),
        ]);
        let new = index(&[
            ("root/a", Digest::Unreadable),
            ("root/new", Digest::of_bytes(b"n")),
        ]);

        let text = render_comparison(&Comparison::new(old, new));

        assert!(text.contains("!= CHANGED FILE | root/a"));
        assert!(text.contains("    NEW -> BAD_STREAM_SKIPPED"));
        assert!(text.contains("+ NEW FILE      | root/new"));
        assert!(text.contains("- DELETED FILE  | root/gone"));
        assert!(!text.contains("FOLDER DIGESTS MATCH"));
    }

    #[test]
    fn test_renders_empty_sections() {
        let same = index(&[("root/a", Digest::of_bytes(b"1"))]);
        let text = render_comparison(&Comparison::new(same.clone(), same));

        assert!(text.contains("== FOLDER DIGESTS MATCH"));
        assert!(text.contains("== NO CHANGED FILES"));
        assert!(text.contains("== NO NEW FILES"));
        assert!(text.contains("== NO DELETED FILES"));
        assert!(text.contains("Equal (omitted):  1"));
    }
}
