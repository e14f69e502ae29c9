//! Plan-update classification.
//!
//! Reasoning summaries that describe a checklist or plan mutation are routed
//! to `assistant_plan_updates` instead of `assistant_reasoning`. The
//! predicate is fuzzy string matching over a handful of markers; false
//! classifications are tolerated downstream, so it stays deliberately
//! simple.

/// Checkbox glyph the runtime renders in plan checklists.
const CHECKBOX_GLYPH: char = '□';

/// Returns `true` if a reasoning summary reads like a plan/checklist update.
///
/// Markers, checked against the lowercased text:
/// - contains `"updated plan"` or `"plan updated"`
/// - starts with `"plan:"` or `"updated checklist"`
/// - contains `"checklist"` or `"todo"`
/// - contains a checkbox marker: `"- ["` or the `□` glyph
#[must_use]
pub fn is_plan_update(text: &str) -> bool {
    let lowered = text.to_lowercase();
    if lowered.contains("updated plan") || lowered.contains("plan updated") {
        return true;
    }
    if lowered.starts_with("plan:") || lowered.starts_with("updated checklist") {
        return true;
    }
    if lowered.contains("checklist") || lowered.contains("todo") {
        return true;
    }
    text.contains(CHECKBOX_GLYPH) || text.contains("- [")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn updated_plan_phrase_matches() {
        assert!(is_plan_update("Updated plan: add tests"));
        assert!(is_plan_update("The plan updated after review"));
    }

    #[test]
    fn plan_prefix_matches() {
        assert!(is_plan_update("Plan: investigate the flaky read"));
        assert!(is_plan_update("Updated checklist for the release"));
    }

    #[test]
    fn prefix_markers_only_match_at_start() {
        assert!(!is_plan_update("the original plan: unchanged"));
    }

    #[test]
    fn checklist_and_todo_match_anywhere() {
        assert!(is_plan_update("keeping the checklist in sync"));
        assert!(is_plan_update("one TODO left in the parser"));
    }

    #[test]
    fn checkbox_markers_match() {
        assert!(is_plan_update("- [x] write the reader\n- [ ] wire the sink"));
        assert!(is_plan_update("□ migrate the store"));
    }

    #[test]
    fn free_form_reasoning_does_not_match() {
        assert!(!is_plan_update("The offset must come from the state file."));
        assert!(!is_plan_update(""));
    }

    #[test]
    fn case_insensitive_markers() {
        assert!(is_plan_update("PLAN: ship it"));
        assert!(is_plan_update("ToDo cleanup"));
    }
}
