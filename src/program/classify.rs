//! Change classification: what a new request does to a stored program

use super::{ProgramConfig, normalize_day_name};

/// Update path for a request, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramChange {
    /// Day count or equipment changed: new program, progress discarded
    Rebuild,
    /// Only labels changed; progress kept
    Relabel { repersonalize: bool },
    /// Goal or session length changed; progress kept
    Repersonalize,
    NoOp,
}

impl ProgramChange {
    pub fn label(&self) -> &'static str {
        match self {
            ProgramChange::Rebuild => "rebuild",
            ProgramChange::Relabel { repersonalize: false } => "relabel",
            ProgramChange::Relabel { repersonalize: true } => "relabel + re-personalize",
            ProgramChange::Repersonalize => "re-personalize",
            ProgramChange::NoOp => "no change",
        }
    }

    /// Everything short of a rebuild keeps logged reps and weights
    pub fn preserves_progress(&self) -> bool {
        !matches!(self, ProgramChange::Rebuild)
    }
}

/// Classify a requested configuration against the recorded one.
///
/// No recorded configuration means there is nothing to preserve: rebuild.
/// Requested preferences of `None` never trigger re-personalization.
pub fn classify(previous: Option<&ProgramConfig>, requested: &ProgramConfig) -> ProgramChange {
    let Some(previous) = previous else {
        return ProgramChange::Rebuild;
    };

    if previous.day_names.len() != requested.day_names.len()
        || previous.program_type != requested.program_type
    {
        return ProgramChange::Rebuild;
    }

    let preferences_changed = match (&previous.preferences, &requested.preferences) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some(old), Some(new)) => !old.same_as(new),
    };

    if labels_differ(&previous.day_names, &requested.day_names) {
        return ProgramChange::Relabel {
            repersonalize: preferences_changed,
        };
    }

    if preferences_changed {
        ProgramChange::Repersonalize
    } else {
        ProgramChange::NoOp
    }
}

/// Case-insensitive comparison of normalized labels; counts assumed equal
fn labels_differ(old: &[String], new: &[String]) -> bool {
    old.iter()
        .zip(new)
        .any(|(a, b)| normalize_day_name(a).to_lowercase() != normalize_day_name(b).to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::{ProgramPreferences, ProgramType};

    fn config(days: &[&str], program_type: ProgramType, prefs: Option<(&str, i32)>) -> ProgramConfig {
        ProgramConfig::new(
            days.iter().map(|s| s.to_string()).collect(),
            program_type,
            prefs.map(|(goal, minutes)| ProgramPreferences::new(goal, minutes)),
        )
    }

    #[test]
    fn test_no_previous_is_rebuild() {
        let requested = config(&["Mon", "Wed", "Fri"], ProgramType::Gym, None);
        assert_eq!(classify(None, &requested), ProgramChange::Rebuild);
    }

    #[test]
    fn test_day_count_change_is_rebuild() {
        let old = config(&["Mon", "Wed", "Fri"], ProgramType::Gym, None);
        let new = config(&["Mon", "Tue", "Thu", "Fri"], ProgramType::Gym, None);
        assert_eq!(classify(Some(&old), &new), ProgramChange::Rebuild);
    }

    #[test]
    fn test_type_change_is_rebuild_even_with_new_labels() {
        let old = config(&["Mon", "Wed", "Fri"], ProgramType::Gym, None);
        let new = config(&["Tue", "Thu", "Sat"], ProgramType::Bodyweight, Some(("gain", 60)));
        assert_eq!(classify(Some(&old), &new), ProgramChange::Rebuild);
    }

    #[test]
    fn test_label_change_is_relabel() {
        let old = config(&["Mon", "Wed", "Fri"], ProgramType::Gym, None);
        let new = config(&["Tue", "Thu", "Sat"], ProgramType::Gym, None);
        assert_eq!(
            classify(Some(&old), &new),
            ProgramChange::Relabel { repersonalize: false }
        );
    }

    #[test]
    fn test_label_compare_ignores_case_and_space() {
        let old = config(&["Mon", "Wed", "Fri"], ProgramType::Gym, None);
        let new = config(&[" mon", "WED", "fri "], ProgramType::Gym, None);
        assert_eq!(classify(Some(&old), &new), ProgramChange::NoOp);
    }

    #[test]
    fn test_relabel_with_new_goal_repersonalizes() {
        let old = config(&["Mon", "Wed", "Fri"], ProgramType::Gym, Some(("maintain", 60)));
        let new = config(&["Tue", "Thu", "Sat"], ProgramType::Gym, Some(("gain", 60)));
        assert_eq!(
            classify(Some(&old), &new),
            ProgramChange::Relabel { repersonalize: true }
        );
    }

    #[test]
    fn test_length_change_is_repersonalize() {
        let old = config(&["Mon", "Wed", "Fri"], ProgramType::Gym, Some(("gain", 60)));
        let new = config(&["Mon", "Wed", "Fri"], ProgramType::Gym, Some(("gain", 45)));
        assert_eq!(classify(Some(&old), &new), ProgramChange::Repersonalize);
    }

    #[test]
    fn test_first_preferences_is_repersonalize() {
        let old = config(&["Mon", "Wed", "Fri"], ProgramType::Gym, None);
        let new = config(&["Mon", "Wed", "Fri"], ProgramType::Gym, Some(("gain", 45)));
        assert_eq!(classify(Some(&old), &new), ProgramChange::Repersonalize);
    }

    #[test]
    fn test_same_everything_is_noop() {
        let old = config(&["Mon", "Wed", "Fri"], ProgramType::Gym, Some(("Gain", 45)));
        let new = config(&["Mon", "Wed", "Fri"], ProgramType::Gym, Some(("gain", 45)));
        assert_eq!(classify(Some(&old), &new), ProgramChange::NoOp);
    }

    #[test]
    fn test_omitted_preferences_keep_recorded_ones() {
        let old = config(&["Mon", "Wed", "Fri"], ProgramType::Gym, Some(("gain", 45)));
        let new = config(&["Mon", "Wed", "Fri"], ProgramType::Gym, None);
        assert_eq!(classify(Some(&old), &new), ProgramChange::NoOp);
    }

    #[test]
    fn test_only_rebuild_discards_progress() {
        assert!(!ProgramChange::Rebuild.preserves_progress());
        assert!(ProgramChange::Relabel { repersonalize: true }.preserves_progress());
        assert!(ProgramChange::Repersonalize.preserves_progress());
        assert!(ProgramChange::NoOp.preserves_progress());
    }
}
