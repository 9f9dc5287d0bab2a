use serde::{Deserialize, Serialize};

/// One generated micro-utopia.
///
/// Built fresh by the generator, never mutated afterwards, and dropped once
/// it has been rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MicroUtopia {
    pub theme: String,
    pub premise: String,
    pub institution: String,
    pub incentive: String,
    pub constraint: String,
    pub daily_scene: String,
    pub failure_mode: String,
    pub test: String,
    /// Always three entries, each from a different template.
    pub questions: Vec<String>,
    pub slogan: String,
    pub name: String,
}

impl MicroUtopia {
    /// The fields eligible to become the subject of the questions.
    pub fn core_candidates(&self) -> [&str; 4] {
        [
            self.premise.as_str(),
            self.institution.as_str(),
            self.incentive.as_str(),
            self.constraint.as_str(),
        ]
    }
}
