/// Candidate pools, their RON overrides and validation.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::template::{QuestionTemplate, TemplateError};

/// Number of questions asked per record.
pub const QUESTION_COUNT: usize = 3;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("pool '{0}' is empty")]
    EmptyPool(&'static str),
    #[error("pool '{0}' contains an empty entry")]
    EmptyEntry(&'static str),
    #[error("need at least 3 question templates, found {0}")]
    NotEnoughTemplates(usize),
    #[error("duplicate question template: {0}")]
    DuplicateTemplate(String),
    #[error("invalid question template '{template}': {source}")]
    Template {
        template: String,
        #[source]
        source: TemplateError,
    },
}

const THEMES: &[&str] = &[
    "travail", "école", "démocratie", "IA", "ville", "énergie", "santé",
    "temps libre", "culture", "justice", "logement", "écologie", "innovation",
];

const PREMISES: &[&str] = &[
    "Toute décision publique doit être réversible et explicitement datée",
    "Le prestige social est attribué à l’utilité démontrée, pas au statut",
    "On ne rémunère plus l’effort mais l’impact vérifiable",
    "On limite volontairement l’optimisation pour préserver le vivant et le lien",
    "La vérité opérationnelle prime sur la vérité déclarative, preuves à l’appui",
    "La souveraineté appartient aux gens qui subissent les conséquences",
];

const INSTITUTIONS: &[&str] = &[
    "un Sénat des Conséquences composé d’habitants tirés au sort parmi les plus exposés",
    "une Banque du Temps qui prête des heures et facture des intérêts en attention",
    "un Tribunal des Promesses qui juge les organisations sur leurs engagements publics",
    "un Ministère des Bugs qui publie chaque semaine la liste des échecs et correctifs",
    "une Bourse des Externalités où l’on échange des droits d’impacter",
    "un Cadastre des Données où chaque donnée a un propriétaire, un prix et une durée",
];

const INCENTIVES: &[&str] = &[
    "un score public de fiabilité basé sur les prédictions tenues",
    "un dividende collectif versé quand un indicateur social progresse",
    "un système de crédits d’apprentissage échangeables contre des services",
    "des licences temporaires renouvelées seulement si l’impact est positif",
    "une réputation transférable, que tu peux perdre en cas de triche",
    "un bonus indexé sur la réduction de complexité, pas sur la croissance brute",
];

const CONSTRAINTS: &[&str] = &[
    "aucun algorithme ne peut être utilisé s’il n’explique pas son raisonnement en langage clair",
    "toute réforme doit inclure une clause de retour arrière avec conditions",
    "la publicité est interdite, seule l’information comparative est autorisée",
    "aucune organisation ne peut dépasser un seuil d’opacité comptable",
    "le droit à l’inaction est protégé par défaut, sauf rôle critique",
    "toute innovation doit déclarer ses perdants potentiels avant son lancement",
];

const DAILY_SCENES: &[&str] = &[
    "Au café, quelqu’un te propose d’échanger deux heures de ton temps contre une semaine de repas",
    "À l’école, les élèves notent la clarté des profs et la note a un effet sur le programme",
    "Dans un bus, un écran affiche les promesses tenues par la mairie ce trimestre",
    "Sur ton téléphone, tu vois le prix exact de l’impact carbone de ton achat, en euros",
    "À l’hôpital, l’IA doit justifier chaque recommandation en trois phrases compréhensibles",
    "Dans ton immeuble, un vote éclair décide d’un budget commun, traçable dépense par dépense",
];

const FAILURE_MODES: &[&str] = &[
    "les gens apprennent à jouer le système et à maximiser les métriques au détriment du sens",
    "une élite de spécialistes capture les règles et transforme la transparence en théâtre",
    "la société devient obsédée par la preuve, au point d’écraser l’intuition et l’art",
    "les effets secondaires se déplacent ailleurs et deviennent invisibles",
    "la vitesse de décision chute, et l’immobilisme se déguise en prudence",
    "la norme écrase les minorités d’usage et le système devient injuste par design",
];

const TESTS: &[&str] = &[
    "un pilote de 6 mois dans un quartier avec audit public hebdomadaire",
    "une expérimentation en entreprise sur 100 personnes avec mesure avant après",
    "un prototype numérique open source avec comité citoyen de contrôle",
    "un essai en université avec publication des données et droit de contestation",
    "une simulation multi agents où l’on cherche les stratégies de triche",
    "un A B test politique local où le groupe témoin garde les règles actuelles",
];

const NAME_PARTS_A: &[&str] = &[
    "Clair", "Nœud", "Tempo", "Agora", "Indice", "Boussole", "Sillage", "Contrat", "Essai", "Signal",
];

const NAME_PARTS_B: &[&str] = &[
    "Civique", "Commun", "Réel", "Vivant", "Juste", "Prouvé", "Sobre", "Ouvert", "Responsable",
    "Apprenant",
];

const SLOGANS: &[&str] = &[
    "Moins de promesses, plus de preuves",
    "La transparence qui fait mal, donc qui sert",
    "La confiance n’est pas un sentiment, c’est un protocole",
    "On ne réforme pas, on expérimente",
    "Le pouvoir suit les conséquences",
    "Rendre visible ce qui était gratuit, donc impuni",
];

const QUESTION_TEMPLATES: &[&str] = &[
    "Qui perd vraiment quand {x} devient la règle",
    "Quel est le moyen le plus simple de tricher avec {x}",
    "Quelle douleur quotidienne {x} rend-elle insupportable",
    "Quel acteur aura intérêt à saboter {x} en silence",
    "Quelle valeur humaine {x} risque-t-elle d’écraser",
    "Qu’est-ce que {x} rend impossible, et est-ce acceptable",
];

/// The full set of candidate pools a generator draws from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolSet {
    pub themes: Vec<String>,
    pub premises: Vec<String>,
    pub institutions: Vec<String>,
    pub incentives: Vec<String>,
    pub constraints: Vec<String>,
    pub daily_scenes: Vec<String>,
    pub failure_modes: Vec<String>,
    pub tests: Vec<String>,
    pub slogans: Vec<String>,
    pub name_parts_a: Vec<String>,
    pub name_parts_b: Vec<String>,
    pub question_templates: Vec<String>,
}

/// A partial pool file. Any pool left out keeps its current contents on merge.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename = "Pools")]
pub struct PoolOverrides {
    #[serde(default)]
    pub themes: Option<Vec<String>>,
    #[serde(default)]
    pub premises: Option<Vec<String>>,
    #[serde(default)]
    pub institutions: Option<Vec<String>>,
    #[serde(default)]
    pub incentives: Option<Vec<String>>,
    #[serde(default)]
    pub constraints: Option<Vec<String>>,
    #[serde(default)]
    pub daily_scenes: Option<Vec<String>>,
    #[serde(default)]
    pub failure_modes: Option<Vec<String>>,
    #[serde(default)]
    pub tests: Option<Vec<String>>,
    #[serde(default)]
    pub slogans: Option<Vec<String>>,
    #[serde(default)]
    pub name_parts_a: Option<Vec<String>>,
    #[serde(default)]
    pub name_parts_b: Option<Vec<String>>,
    #[serde(default)]
    pub question_templates: Option<Vec<String>>,
}

fn owned(pool: &[&str]) -> Vec<String> {
    pool.iter().map(|s| s.to_string()).collect()
}

fn replace(target: &mut Vec<String>, source: Option<Vec<String>>) {
    if let Some(pool) = source {
        *target = pool;
    }
}

impl Default for PoolSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PoolSet {
    /// The built-in French pools.
    pub fn builtin() -> PoolSet {
        PoolSet {
            themes: owned(THEMES),
            premises: owned(PREMISES),
            institutions: owned(INSTITUTIONS),
            incentives: owned(INCENTIVES),
            constraints: owned(CONSTRAINTS),
            daily_scenes: owned(DAILY_SCENES),
            failure_modes: owned(FAILURE_MODES),
            tests: owned(TESTS),
            slogans: owned(SLOGANS),
            name_parts_a: owned(NAME_PARTS_A),
            name_parts_b: owned(NAME_PARTS_B),
            question_templates: owned(QUESTION_TEMPLATES),
        }
    }

    /// Load pool overrides from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<PoolOverrides, PoolError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse pool overrides from a RON string.
    pub fn parse_ron(input: &str) -> Result<PoolOverrides, PoolError> {
        Ok(ron::from_str(input)?)
    }

    /// Merge overrides into this set. Pools present in `other` replace
    /// the pools of the same name; the rest are kept.
    pub fn merge(&mut self, other: PoolOverrides) {
        replace(&mut self.themes, other.themes);
        replace(&mut self.premises, other.premises);
        replace(&mut self.institutions, other.institutions);
        replace(&mut self.incentives, other.incentives);
        replace(&mut self.constraints, other.constraints);
        replace(&mut self.daily_scenes, other.daily_scenes);
        replace(&mut self.failure_modes, other.failure_modes);
        replace(&mut self.tests, other.tests);
        replace(&mut self.slogans, other.slogans);
        replace(&mut self.name_parts_a, other.name_parts_a);
        replace(&mut self.name_parts_b, other.name_parts_b);
        replace(&mut self.question_templates, other.question_templates);
    }

    /// Every pool paired with its name.
    pub fn named_pools(&self) -> [(&'static str, &[String]); 12] {
        [
            ("themes", self.themes.as_slice()),
            ("premises", self.premises.as_slice()),
            ("institutions", self.institutions.as_slice()),
            ("incentives", self.incentives.as_slice()),
            ("constraints", self.constraints.as_slice()),
            ("daily_scenes", self.daily_scenes.as_slice()),
            ("failure_modes", self.failure_modes.as_slice()),
            ("tests", self.tests.as_slice()),
            ("slogans", self.slogans.as_slice()),
            ("name_parts_a", self.name_parts_a.as_slice()),
            ("name_parts_b", self.name_parts_b.as_slice()),
            ("question_templates", self.question_templates.as_slice()),
        ]
    }

    /// Check every pool can be drawn from and parse the question templates.
    pub fn validate(&self) -> Result<Vec<QuestionTemplate>, PoolError> {
        for (name, pool) in self.named_pools() {
            if pool.is_empty() {
                return Err(PoolError::EmptyPool(name));
            }
            if pool.iter().any(|entry| entry.trim().is_empty()) {
                return Err(PoolError::EmptyEntry(name));
            }
        }

        if self.question_templates.len() < QUESTION_COUNT {
            return Err(PoolError::NotEnoughTemplates(self.question_templates.len()));
        }

        let mut seen = FxHashSet::default();
        let mut templates = Vec::with_capacity(self.question_templates.len());
        for source in &self.question_templates {
            if !seen.insert(source.as_str()) {
                return Err(PoolError::DuplicateTemplate(source.clone()));
            }
            let template = QuestionTemplate::parse(source).map_err(|e| PoolError::Template {
                template: source.clone(),
                source: e,
            })?;
            templates.push(template);
        }

        Ok(templates)
    }
}
