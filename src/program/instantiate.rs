//! Fresh user programs from templates

use chrono::Utc;

use super::{
    DEFAULT_WEIGHT_UNIT, ProgramTemplate, UserExerciseEntry, UserProgram, UserProgramDay, Weight,
};

const UNSPECIFIED_DAY: &str = "Unspecified";

/// Trim and capitalize a day label ("  wEDnesday " -> "Wednesday")
pub fn normalize_day_name(name: &str) -> String {
    let trimmed = name.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        None => UNSPECIFIED_DAY.to_string(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

/// Build a zero-progress program from a template.
///
/// Labels are assigned positionally and cycle when fewer labels than
/// schedule days are given.
pub fn instantiate(template: &ProgramTemplate, day_names: &[String]) -> UserProgram {
    let now = Utc::now();

    let schedule = template
        .schedule
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let day_name = if day_names.is_empty() {
                UNSPECIFIED_DAY.to_string()
            } else {
                normalize_day_name(&day_names[i % day_names.len()])
            };

            let exercises = day
                .exercises
                .iter()
                .map(|ex| UserExerciseEntry {
                    name: ex.name.clone(),
                    sets: ex.sets,
                    target_reps: ex.target_rep_spec.clone(),
                    reps_completed: 0,
                    weight: Weight {
                        value: 0.0,
                        unit: if ex.unit.trim().is_empty() {
                            DEFAULT_WEIGHT_UNIT.to_string()
                        } else {
                            ex.unit.clone()
                        },
                    },
                    baseline_sets: Some(ex.sets),
                })
                .collect();

            UserProgramDay {
                day_index: day.day_index,
                day_name,
                focus: day.focus.clone(),
                exercises,
            }
        })
        .collect();

    UserProgram {
        template_name: template.name.clone(),
        days: template.days,
        program_type: template.program_type,
        schedule,
        preferences: None,
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::{ProgramType, StaticCatalog, TemplateDay, TemplateExercise};
    use rstest::rstest;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn create_template(days: usize) -> ProgramTemplate {
        ProgramTemplate {
            name: "Test".to_string(),
            days,
            program_type: ProgramType::Gym,
            schedule: (0..days)
                .map(|i| TemplateDay {
                    day_index: i,
                    focus: format!("Focus {}", i),
                    exercises: vec![
                        TemplateExercise {
                            name: "Squat".to_string(),
                            sets: 4,
                            target_rep_spec: "6-8".to_string(),
                            unit: "kg".to_string(),
                        },
                        TemplateExercise {
                            name: "Plank".to_string(),
                            sets: 3,
                            target_rep_spec: "30-45 sec".to_string(),
                            unit: String::new(),
                        },
                    ],
                })
                .collect(),
        }
    }

    #[rstest]
    #[case("mon", "Mon")]
    #[case("  wEDnesday ", "Wednesday")]
    #[case("FRI", "Fri")]
    #[case("", "Unspecified")]
    #[case("   ", "Unspecified")]
    #[case("ñandú", "Ñandú")]
    fn test_normalize_day_name(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_day_name(raw), expected);
    }

    #[test]
    fn test_copies_template_and_zeroes_progress() {
        let template = create_template(3);
        let program = instantiate(&template, &names(&["mon", "wed", "fri"]));

        assert_eq!(program.template_name, "Test");
        assert_eq!(program.days, 3);
        assert_eq!(program.program_type, ProgramType::Gym);
        assert!(program.preferences.is_none());

        let day = &program.schedule[0];
        assert_eq!(day.day_name, "Mon");
        assert_eq!(day.focus, "Focus 0");
        assert_eq!(day.exercises[0].sets, 4);
        assert_eq!(day.exercises[0].target_reps, "6-8");
        assert_eq!(day.exercises[0].weight.unit, "kg");
        assert_eq!(day.exercises[1].weight.unit, "lbs");
        assert_eq!(day.exercises[0].baseline_sets, Some(4));
        assert_eq!(day.exercises[1].baseline_sets, Some(3));
    }

    #[test]
    fn test_builtin_templates_start_at_zero_progress() {
        for template in StaticCatalog::builtin().all() {
            let program = instantiate(template, &names(&["a", "b", "c"]));
            for entry in program.schedule.iter().flat_map(|d| &d.exercises) {
                assert_eq!(entry.reps_completed, 0);
                assert_eq!(entry.weight.value, 0.0);
            }
        }
    }

    #[test]
    fn test_labels_cycle_when_short() {
        let template = create_template(5);
        let program = instantiate(&template, &names(&["mon", "tue"]));
        let labels: Vec<_> = program.schedule.iter().map(|d| d.day_name.as_str()).collect();
        assert_eq!(labels, vec!["Mon", "Tue", "Mon", "Tue", "Mon"]);
    }

    #[test]
    fn test_no_labels_marks_unspecified() {
        let program = instantiate(&create_template(3), &[]);
        assert!(program.schedule.iter().all(|d| d.day_name == "Unspecified"));
    }
}
