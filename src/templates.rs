//! Built-in program templates
//!
//! Every day count from 3 to 6 has at least one template. Not every
//! equipment type is covered for every day count, so selection falls
//! back to another type where needed.

use crate::program::{ProgramTemplate, ProgramType, TemplateDay, TemplateExercise};

#[derive(Debug, Clone, Copy)]
pub struct ExerciseDef {
    pub name: &'static str,
    pub sets: i32,
    pub target: &'static str,
    pub unit: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct DayDef {
    pub focus: &'static str,
    pub exercises: &'static [ExerciseDef],
}

#[derive(Debug, Clone, Copy)]
pub struct TemplateDef {
    pub name: &'static str,
    pub program_type: ProgramType,
    pub schedule: &'static [DayDef],
}

impl TemplateDef {
    /// Owned template; day count is the schedule length
    pub fn to_template(&self) -> ProgramTemplate {
        ProgramTemplate {
            name: self.name.to_string(),
            days: self.schedule.len(),
            program_type: self.program_type,
            schedule: self
                .schedule
                .iter()
                .enumerate()
                .map(|(i, day)| TemplateDay {
                    day_index: i,
                    focus: day.focus.to_string(),
                    exercises: day
                        .exercises
                        .iter()
                        .map(|ex| TemplateExercise {
                            name: ex.name.to_string(),
                            sets: ex.sets,
                            target_rep_spec: ex.target.to_string(),
                            unit: ex.unit.to_string(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

const fn ex(name: &'static str, sets: i32, target: &'static str) -> ExerciseDef {
    ExerciseDef { name, sets, target, unit: "lbs" }
}

const fn bw(name: &'static str, sets: i32, target: &'static str) -> ExerciseDef {
    ExerciseDef { name, sets, target, unit: "" }
}

// Day blocks shared between templates

const BW_FULL_A: DayDef = DayDef {
    focus: "Full body",
    exercises: &[
        bw("Push-up", 3, "8-12"),
        bw("Bodyweight squat", 3, "15-20"),
        bw("Inverted row", 3, "8-10"),
        bw("Plank", 3, "30-45 sec"),
    ],
};

const BW_FULL_B: DayDef = DayDef {
    focus: "Full body",
    exercises: &[
        bw("Pike push-up", 3, "6-10"),
        bw("Reverse lunge", 3, "10-12/leg"),
        bw("Glute bridge", 3, "12-15"),
        bw("Burpee", 2, "AMRAP"),
    ],
};

const BW_UPPER: DayDef = DayDef {
    focus: "Upper body",
    exercises: &[
        bw("Push-up", 4, "8-12"),
        bw("Inverted row", 4, "8-10"),
        bw("Bench dip", 3, "10-15"),
        bw("Side plank", 2, "20-30 sec"),
    ],
};

const BW_LOWER: DayDef = DayDef {
    focus: "Lower body",
    exercises: &[
        bw("Split squat", 4, "8-10/leg"),
        bw("Single-leg glute bridge", 3, "10-12/leg"),
        bw("Calf raise", 3, "15-20"),
        bw("Hollow hold", 3, "20-30 sec"),
    ],
};

const DB_FULL_A: DayDef = DayDef {
    focus: "Full body",
    exercises: &[
        ex("Goblet squat", 3, "8-12"),
        ex("Dumbbell floor press", 3, "8-10"),
        ex("One-arm dumbbell row", 3, "8-10/arm"),
        ex("Farmer carry", 2, "30-40 sec"),
    ],
};

const DB_FULL_B: DayDef = DayDef {
    focus: "Full body",
    exercises: &[
        ex("Dumbbell Romanian deadlift", 3, "8-10"),
        ex("Dumbbell shoulder press", 3, "8-12"),
        ex("Dumbbell reverse lunge", 3, "8-10/leg"),
        bw("Push-up", 2, "AMRAP"),
    ],
};

const DB_FULL_C: DayDef = DayDef {
    focus: "Full body",
    exercises: &[
        ex("Dumbbell thruster", 3, "10-12"),
        ex("Renegade row", 3, "6-8/arm"),
        ex("Dumbbell hip thrust", 3, "10-12"),
        bw("Dead bug", 2, "10-12/side"),
    ],
};

const GYM_FULL_A: DayDef = DayDef {
    focus: "Full body",
    exercises: &[
        ex("Back squat", 4, "6-8"),
        ex("Bench press", 4, "6-8"),
        ex("Barbell row", 3, "8-10"),
        ex("Plank", 3, "30-45 sec"),
    ],
};

const GYM_FULL_B: DayDef = DayDef {
    focus: "Full body",
    exercises: &[
        ex("Deadlift", 3, "4-6"),
        ex("Overhead press", 3, "6-8"),
        ex("Lat pulldown", 3, "8-12"),
        ex("Walking lunge", 2, "10-12/leg"),
    ],
};

const GYM_FULL_C: DayDef = DayDef {
    focus: "Full body",
    exercises: &[
        ex("Front squat", 3, "6-8"),
        ex("Incline dumbbell press", 3, "8-10"),
        ex("Seated cable row", 3, "10-12"),
        bw("Chin-up", 2, "AMRAP"),
    ],
};

const GYM_UPPER_A: DayDef = DayDef {
    focus: "Upper body",
    exercises: &[
        ex("Bench press", 4, "6-8"),
        ex("Barbell row", 4, "6-8"),
        ex("Overhead press", 3, "8-10"),
        ex("Cable curl", 3, "10-12"),
        ex("Triceps pushdown", 3, "10-12"),
    ],
};

const GYM_LOWER_A: DayDef = DayDef {
    focus: "Lower body",
    exercises: &[
        ex("Back squat", 4, "6-8"),
        ex("Romanian deadlift", 3, "8-10"),
        ex("Leg press", 3, "10-12"),
        ex("Standing calf raise", 3, "12-15"),
    ],
};

const GYM_UPPER_B: DayDef = DayDef {
    focus: "Upper body",
    exercises: &[
        ex("Incline bench press", 4, "8-10"),
        ex("Lat pulldown", 4, "8-10"),
        ex("Dumbbell lateral raise", 3, "12-15"),
        ex("Face pull", 3, "12-15"),
    ],
};

const GYM_LOWER_B: DayDef = DayDef {
    focus: "Lower body",
    exercises: &[
        ex("Deadlift", 3, "4-6"),
        ex("Bulgarian split squat", 3, "8-10/leg"),
        ex("Leg curl", 3, "10-12"),
        ex("Hanging knee raise", 3, "10-15"),
    ],
};

const GYM_PUSH: DayDef = DayDef {
    focus: "Push",
    exercises: &[
        ex("Bench press", 4, "6-8"),
        ex("Overhead press", 3, "8-10"),
        ex("Incline dumbbell press", 3, "8-12"),
        ex("Triceps pushdown", 3, "10-12"),
    ],
};

const GYM_PULL: DayDef = DayDef {
    focus: "Pull",
    exercises: &[
        ex("Deadlift", 3, "4-6"),
        ex("Pull-up", 3, "6-10"),
        ex("Seated cable row", 3, "8-12"),
        ex("Hammer curl", 3, "10-12"),
    ],
};

const GYM_LEGS: DayDef = DayDef {
    focus: "Legs",
    exercises: &[
        ex("Back squat", 4, "6-8"),
        ex("Leg press", 3, "10-12"),
        ex("Leg curl", 3, "10-12"),
        ex("Standing calf raise", 3, "12-15"),
    ],
};

const GYM_CONDITIONING: DayDef = DayDef {
    focus: "Conditioning",
    exercises: &[
        ex("Kettlebell swing", 4, "15-20"),
        ex("Sled push", 4, "20-30 sec"),
        ex("Rowing machine", 3, "45-60 sec"),
        bw("Burpee", 2, "AMRAP"),
    ],
};

/// Built-in templates (immutable)
pub const BUILTIN_TEMPLATES: &[TemplateDef] = &[
    TemplateDef {
        name: "Bodyweight Foundations",
        program_type: ProgramType::Bodyweight,
        schedule: &[BW_FULL_A, BW_FULL_B, BW_FULL_A],
    },
    TemplateDef {
        name: "Dumbbell Full Body",
        program_type: ProgramType::HomeDumbbell,
        schedule: &[DB_FULL_A, DB_FULL_B, DB_FULL_C],
    },
    TemplateDef {
        name: "Full Body Strength",
        program_type: ProgramType::Gym,
        schedule: &[GYM_FULL_A, GYM_FULL_B, GYM_FULL_C],
    },
    TemplateDef {
        name: "Bodyweight Upper/Lower",
        program_type: ProgramType::Bodyweight,
        schedule: &[BW_UPPER, BW_LOWER, BW_UPPER, BW_LOWER],
    },
    TemplateDef {
        name: "Upper/Lower Split",
        program_type: ProgramType::Gym,
        schedule: &[GYM_UPPER_A, GYM_LOWER_A, GYM_UPPER_B, GYM_LOWER_B],
    },
    TemplateDef {
        name: "Dumbbell Five Day",
        program_type: ProgramType::HomeDumbbell,
        schedule: &[DB_FULL_A, DB_FULL_B, DB_FULL_C, DB_FULL_A, DB_FULL_B],
    },
    TemplateDef {
        name: "Push/Pull/Legs + Upper/Lower",
        program_type: ProgramType::Gym,
        schedule: &[GYM_PUSH, GYM_PULL, GYM_LEGS, GYM_UPPER_B, GYM_LOWER_B],
    },
    TemplateDef {
        name: "Push/Pull/Legs x2",
        program_type: ProgramType::Gym,
        schedule: &[GYM_PUSH, GYM_PULL, GYM_LEGS, GYM_PUSH, GYM_PULL, GYM_CONDITIONING],
    },
];

pub fn get_builtin_templates() -> Vec<ProgramTemplate> {
    BUILTIN_TEMPLATES.iter().map(TemplateDef::to_template).collect()
}

/// Find built-in template by name
pub fn find_template(name: &str) -> Option<&'static TemplateDef> {
    BUILTIN_TEMPLATES.iter().find(|t| t.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::{MAX_DAYS, MIN_DAYS};

    #[test]
    fn test_every_day_count_is_covered() {
        for days in MIN_DAYS..=MAX_DAYS {
            assert!(
                BUILTIN_TEMPLATES.iter().any(|t| t.schedule.len() == days),
                "no template for {} days",
                days
            );
        }
    }

    #[test]
    fn test_template_names_unique() {
        let mut names: Vec<_> = BUILTIN_TEMPLATES.iter().map(|t| t.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), BUILTIN_TEMPLATES.len());
    }

    #[test]
    fn test_to_template_indexes_days() {
        let template = find_template("Upper/Lower Split").unwrap().to_template();
        assert_eq!(template.days, 4);
        let indexes: Vec<_> = template.schedule.iter().map(|d| d.day_index).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3]);
    }
}
