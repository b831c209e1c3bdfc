use crate::contract::{ClassificationError, Label, Verdict, TARGET_LABEL_NAMES};

/// Exact match after lowercasing. No fuzzy matching and no confidence threshold.
pub fn is_target_label(name: &str) -> bool {
    let lowered = name.to_lowercase();
    TARGET_LABEL_NAMES.contains(&lowered.as_str())
}

pub fn verdict_from_labels(labels: &[Label]) -> Verdict {
    labels
        .iter()
        .any(|label| is_target_label(&label.name))
        .into()
}

/// Collapses a classification outcome at the response boundary. Any failure
/// is reported as a negative verdict.
pub fn resolve_verdict(outcome: Result<Verdict, ClassificationError>) -> Verdict {
    outcome.unwrap_or(Verdict::NotSheltie)
}
