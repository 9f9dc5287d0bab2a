/// Micro-utopia generator: independent uniform draws from each pool.

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::core::pools::{PoolError, PoolSet, QUESTION_COUNT};
use crate::core::template::QuestionTemplate;
use crate::schema::utopia::MicroUtopia;

/// The generator. Built via `Generator::builder()`.
pub struct Generator {
    pools: PoolSet,
    templates: Vec<QuestionTemplate>,
    rng: StdRng,
}

/// Builder for constructing a `Generator`.
pub struct GeneratorBuilder {
    seed: Option<u64>,
    pools: Option<PoolSet>,
}

impl Generator {
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder {
            seed: None,
            pools: None,
        }
    }

    pub fn pools(&self) -> &PoolSet {
        &self.pools
    }

    /// Generate one record.
    ///
    /// A theme that is non-empty after trimming is lower-cased and used as is;
    /// otherwise one is drawn from the theme pool.
    pub fn generate(&mut self, theme: Option<&str>) -> MicroUtopia {
        let rng = &mut self.rng;
        let pools = &self.pools;

        let theme = match theme.map(str::trim).filter(|t| !t.is_empty()) {
            Some(t) => t.to_lowercase(),
            None => pick(&pools.themes, rng).to_string(),
        };

        let premise = pick(&pools.premises, rng).to_string();
        let institution = pick(&pools.institutions, rng).to_string();
        let incentive = pick(&pools.incentives, rng).to_string();
        let constraint = pick(&pools.constraints, rng).to_string();
        let daily_scene = pick(&pools.daily_scenes, rng).to_string();
        let failure_mode = pick(&pools.failure_modes, rng).to_string();
        let test = pick(&pools.tests, rng).to_string();

        let core = {
            let candidates = [&premise, &institution, &incentive, &constraint];
            candidates[rng.gen_range(0..candidates.len())].to_lowercase()
        };
        let questions = index::sample(rng, self.templates.len(), QUESTION_COUNT)
            .into_iter()
            .map(|i| self.templates[i].render(&core))
            .collect();

        let slogan = pick(&pools.slogans, rng).to_string();
        let name = format!(
            "{} {}",
            pick(&pools.name_parts_a, rng),
            pick(&pools.name_parts_b, rng)
        );

        debug!(theme = %theme, name = %name, core = %core, "generated micro-utopia");

        MicroUtopia {
            theme,
            premise,
            institution,
            incentive,
            constraint,
            daily_scene,
            failure_mode,
            test,
            questions,
            slogan,
            name,
        }
    }
}

/// Uniform draw from a pool. Pools are checked non-empty at build time.
fn pick<'a>(pool: &'a [String], rng: &mut StdRng) -> &'a str {
    &pool[rng.gen_range(0..pool.len())]
}

impl GeneratorBuilder {
    /// Use a fixed seed. Without one the generator seeds from OS entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Provide pools directly instead of the built-in set.
    pub fn with_pools(mut self, pools: PoolSet) -> Self {
        self.pools = Some(pools);
        self
    }

    pub fn build(self) -> Result<Generator, PoolError> {
        let pools = self.pools.unwrap_or_else(PoolSet::builtin);
        let templates = pools.validate()?;
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Generator {
            pools,
            templates,
            rng,
        })
    }
}
