//! Template catalog and template selection

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::{ProgramTemplate, ProgramType};
use crate::error::{ProgramError, ProgramResult};
use crate::templates::get_builtin_templates;

/// Read-only source of program templates
pub trait TemplateCatalog {
    /// All templates with the given day count, any type
    fn templates_for_days(&self, days: usize) -> Result<Vec<ProgramTemplate>>;

    /// Templates with the given day count and type
    fn lookup(&self, days: usize, program_type: ProgramType) -> Result<Vec<ProgramTemplate>> {
        Ok(self
            .templates_for_days(days)?
            .into_iter()
            .filter(|t| t.program_type == program_type)
            .collect())
    }
}

impl<T: TemplateCatalog + ?Sized> TemplateCatalog for Box<T> {
    fn templates_for_days(&self, days: usize) -> Result<Vec<ProgramTemplate>> {
        (**self).templates_for_days(days)
    }
}

/// In-memory catalog, by default the built-in templates
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    templates: Vec<ProgramTemplate>,
}

impl StaticCatalog {
    pub fn new(templates: Vec<ProgramTemplate>) -> Self {
        Self { templates }
    }

    pub fn builtin() -> Self {
        Self::new(get_builtin_templates())
    }

    pub fn all(&self) -> &[ProgramTemplate] {
        &self.templates
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateCatalog for StaticCatalog {
    fn templates_for_days(&self, days: usize) -> Result<Vec<ProgramTemplate>> {
        Ok(self
            .templates
            .iter()
            .filter(|t| t.days == days)
            .cloned()
            .collect())
    }
}

/// Catalog loaded from a JSON array of templates
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    inner: StaticCatalog,
}

impl JsonCatalog {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        let catalog = Self::from_json(&text)
            .with_context(|| format!("parsing catalog {}", path.display()))?;
        info!("Loaded {} templates from {}", catalog.inner.all().len(), path.display());
        Ok(catalog)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let templates: Vec<ProgramTemplate> = serde_json::from_str(text)?;
        Ok(Self {
            inner: StaticCatalog::new(templates),
        })
    }

    pub fn all(&self) -> &[ProgramTemplate] {
        self.inner.all()
    }
}

impl TemplateCatalog for JsonCatalog {
    fn templates_for_days(&self, days: usize) -> Result<Vec<ProgramTemplate>> {
        self.inner.templates_for_days(days)
    }
}

/// Pick the template for a day count and type.
///
/// Exact type match wins (first by name). Otherwise falls back to the
/// first template ordered by (type, name) with the same day count.
pub fn select_template(
    catalog: &dyn TemplateCatalog,
    days: usize,
    program_type: ProgramType,
) -> ProgramResult<ProgramTemplate> {
    let mut candidates = catalog.templates_for_days(days)?;
    if candidates.is_empty() {
        return Err(ProgramError::NotFound(format!("no template with {} days", days)));
    }

    let exact = candidates
        .iter()
        .filter(|t| t.program_type == program_type)
        .min_by(|a, b| a.name.cmp(&b.name));
    if let Some(template) = exact {
        debug!("Selected template '{}' for {} days / {}", template.name, days, program_type);
        return Ok(template.clone());
    }

    candidates.sort_by(|a, b| {
        a.program_type
            .cmp(&b.program_type)
            .then_with(|| a.name.cmp(&b.name))
    });
    let template = candidates.swap_remove(0);
    info!(
        "No {} template for {} days, falling back to '{}' ({})",
        program_type, days, template.name, template.program_type
    );
    Ok(template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::{MAX_DAYS, MIN_DAYS, TemplateDay, TemplateExercise};

    fn create_template(name: &str, days: usize, program_type: ProgramType) -> ProgramTemplate {
        ProgramTemplate {
            name: name.to_string(),
            days,
            program_type,
            schedule: (0..days)
                .map(|i| TemplateDay {
                    day_index: i,
                    focus: "Full body".to_string(),
                    exercises: vec![TemplateExercise {
                        name: "Squat".to_string(),
                        sets: 3,
                        target_rep_spec: "8-10".to_string(),
                        unit: "kg".to_string(),
                    }],
                })
                .collect(),
        }
    }

    #[test]
    fn test_builtin_selects_matching_days_for_every_type() {
        let catalog = StaticCatalog::builtin();
        for days in MIN_DAYS..=MAX_DAYS {
            for program_type in ProgramType::all() {
                let template = select_template(&catalog, days, *program_type).unwrap();
                assert_eq!(template.days, days);
            }
        }
    }

    #[test]
    fn test_exact_type_prefers_lexically_first_name() {
        let catalog = StaticCatalog::new(vec![
            create_template("Zeta", 3, ProgramType::Gym),
            create_template("Alpha", 3, ProgramType::Gym),
            create_template("Aardvark", 3, ProgramType::Bodyweight),
        ]);
        let template = select_template(&catalog, 3, ProgramType::Gym).unwrap();
        assert_eq!(template.name, "Alpha");
    }

    #[test]
    fn test_type_fallback_orders_by_type_then_name() {
        let catalog = StaticCatalog::new(vec![
            create_template("Alpha", 4, ProgramType::Gym),
            create_template("Zulu", 4, ProgramType::HomeDumbbell),
            create_template("Mike", 4, ProgramType::HomeDumbbell),
            create_template("Bravo", 3, ProgramType::Bodyweight),
        ]);
        let template = select_template(&catalog, 4, ProgramType::Bodyweight).unwrap();
        assert_eq!(template.name, "Mike");
        assert_eq!(template.days, 4);
    }

    #[test]
    fn test_missing_day_count_is_not_found() {
        let catalog = StaticCatalog::new(vec![create_template("Alpha", 3, ProgramType::Gym)]);
        let result = select_template(&catalog, 5, ProgramType::Gym);
        assert!(matches!(result, Err(ProgramError::NotFound(_))));
    }

    #[test]
    fn test_lookup_filters_type() {
        let catalog = StaticCatalog::builtin();
        let found = catalog.lookup(3, ProgramType::HomeDumbbell).unwrap();
        assert!(!found.is_empty());
        assert!(found.iter().all(|t| t.program_type == ProgramType::HomeDumbbell && t.days == 3));
    }

    #[test]
    fn test_json_catalog_parses_templates() {
        let json = serde_json::to_string(&vec![create_template("Json Gym", 3, ProgramType::Gym)]).unwrap();
        let catalog = JsonCatalog::from_json(&json).unwrap();
        let template = select_template(&catalog, 3, ProgramType::Bodyweight).unwrap();
        assert_eq!(template.name, "Json Gym");
    }

    #[test]
    fn test_json_catalog_unit_defaults_to_empty() {
        let json = r#"[{"name": "T", "days": 3, "program_type": "Gym", "schedule": [
            {"day_index": 0, "focus": "A", "exercises": [{"name": "Row", "sets": 3, "target_rep_spec": "8-10"}]}
        ]}]"#;
        let catalog = JsonCatalog::from_json(json).unwrap();
        assert_eq!(catalog.all()[0].schedule[0].exercises[0].unit, "");
    }
}
