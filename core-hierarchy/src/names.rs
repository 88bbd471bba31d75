//! Remote name cleanup applied before a name takes part in a path.

use std::borrow::Cow;

/// Escape some backends emit in place of `/`
const ESCAPED_SLASH: &str = "002f";

/// Suffix that accompanies escaped names
const MODIFY_SUFFIX: &str = " - Modify";

pub const DOCUMENT_MIME_TYPE: &str = "application/vnd.google-apps.document";
pub const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";
pub const PRESENTATION_MIME_TYPE: &str = "application/vnd.google-apps.presentation";

/// Undo the `002f` escaping of `/` and drop the trailing `" - Modify"`.
///
/// Names without the escape are returned untouched, so applying this to an
/// already-normalized name is a no-op.
pub fn normalize_name(raw: &str) -> Cow<'_, str> {
    if !raw.contains(ESCAPED_SLASH) {
        return Cow::Borrowed(raw);
    }

    let replaced = raw.replace(ESCAPED_SLASH, "/");
    match replaced.strip_suffix(MODIFY_SUFFIX) {
        Some(stripped) => Cow::Owned(stripped.to_string()),
        None => Cow::Owned(replaced),
    }
}

/// Extension a rich document receives once exported, with the extensions
/// that already count as present
fn export_extension(mime_type: &str) -> Option<(&'static str, &'static [&'static str])> {
    match mime_type {
        DOCUMENT_MIME_TYPE => Some((".docx", &[".docx", ".doc", ".txt"])),
        SPREADSHEET_MIME_TYPE => Some((".xlsx", &[".xlsx", ".xls"])),
        PRESENTATION_MIME_TYPE => Some((".pptx", &[".pptx", ".ppt"])),
        _ => None,
    }
}

/// Append the export extension to rich documents that lack one.
pub fn repair_extension<'a>(name: &'a str, mime_type: Option<&str>) -> Cow<'a, str> {
    let Some((extension, accepted)) = mime_type.and_then(export_extension) else {
        return Cow::Borrowed(name);
    };

    let lower = name.to_lowercase();
    if accepted.iter().any(|accepted| lower.ends_with(accepted)) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("{}{}", name, extension))
    }
}

/// Name a node is materialized with
pub fn node_name(raw: &str, mime_type: Option<&str>) -> String {
    let normalized = normalize_name(raw);
    repair_extension(&normalized, mime_type).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_escaped_name() {
        assert_eq!(normalize_name("a002fb - Modify"), "a/b");
        assert_eq!(normalize_name("2023002fQ1"), "2023/Q1");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_name("a002fb - Modify").into_owned();
        let twice = normalize_name(&once).into_owned();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_modify_suffix_kept_without_escape() {
        assert_eq!(normalize_name("Plan - Modify"), "Plan - Modify");
        assert!(matches!(normalize_name("plain.txt"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_repair_document_extension() {
        assert_eq!(repair_extension("Report", Some(DOCUMENT_MIME_TYPE)), "Report.docx");
        assert_eq!(repair_extension("Report.doc", Some(DOCUMENT_MIME_TYPE)), "Report.doc");
        assert_eq!(repair_extension("notes.TXT", Some(DOCUMENT_MIME_TYPE)), "notes.TXT");
    }

    #[test]
    fn test_repaired_name_outlives_mime_type() {
        let name = String::from("Report.docx");
        let repaired = {
            let mime_type = DOCUMENT_MIME_TYPE.to_string();
            repair_extension(&name, Some(&mime_type))
        };
        assert!(matches!(repaired, Cow::Borrowed("Report.docx")));
    }

    #[test]
    fn test_repair_sheet_and_slides() {
        assert_eq!(repair_extension("Budget", Some(SPREADSHEET_MIME_TYPE)), "Budget.xlsx");
        assert_eq!(repair_extension("Budget.xls", Some(SPREADSHEET_MIME_TYPE)), "Budget.xls");
        assert_eq!(repair_extension("Deck", Some(PRESENTATION_MIME_TYPE)), "Deck.pptx");
        assert_eq!(repair_extension("Deck.PPTX", Some(PRESENTATION_MIME_TYPE)), "Deck.PPTX");
    }

    #[test]
    fn test_repair_ignores_other_types() {
        assert_eq!(repair_extension("Report", Some("application/pdf")), "Report");
        assert_eq!(repair_extension("Report", None), "Report");
    }

    #[test]
    fn test_node_name_normalizes_before_repair() {
        assert_eq!(
            node_name("Q1002fQ2 - Modify", Some(SPREADSHEET_MIME_TYPE)),
            "Q1/Q2.xlsx"
        );
    }
}
