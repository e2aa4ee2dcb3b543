// Genetic algorithm: evolutionary search over attribute-weight vectors

use std::fmt;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::algorithms::StationSelector;
use crate::config::GeneticConfig;
use crate::models::{Algorithm, AlgorithmResult, FeatureSet, FeatureVector, Score, StationId};
use crate::utils::seed::request_seed;

const SIMPLEX_TOLERANCE: f64 = 1e-9;

/// Non-negative weights summing to one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightVector([f64; 3]);

impl WeightVector {
    pub const UNIFORM: WeightVector = WeightVector([1.0 / 3.0; 3]);

    /// Projects raw weights onto the simplex.
    ///
    /// Negative or non-finite entries become zero; an all-zero vector becomes
    /// uniform.
    pub fn normalized(raw: [f64; 3]) -> Self {
        let clamped = raw.map(|w| if w.is_finite() && w > 0.0 { w } else { 0.0 });
        let sum: f64 = clamped.iter().sum();
        if sum > 0.0 && sum.is_finite() {
            WeightVector(clamped.map(|w| w / sum))
        } else {
            Self::UNIFORM
        }
    }

    pub fn cost(&self) -> f64 {
        self.0[0]
    }

    pub fn heuristic(&self) -> f64 {
        self.0[1]
    }

    pub fn quality(&self) -> f64 {
        self.0[2]
    }

    pub fn as_array(&self) -> [f64; 3] {
        self.0
    }

    pub fn is_on_simplex(&self) -> bool {
        self.0.iter().all(|w| *w >= 0.0)
            && (self.0.iter().sum::<f64>() - 1.0).abs() <= SIMPLEX_TOLERANCE
    }

    pub fn utility(&self, features: &FeatureVector) -> Score {
        self.cost() * (1.0 - features.cost)
            + self.heuristic() * (1.0 - features.heuristic)
            + self.quality() * features.quality
    }
}

impl fmt::Display for WeightVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cost {:.3}, straight-line {:.3}, quality {:.3}",
            self.cost(),
            self.heuristic(),
            self.quality()
        )
    }
}

/// Why the generation loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    GenerationLimit,
    Plateau,
    /// The time budget ran out; the best individual so far was kept
    TimeBudget,
}

/// Result of one evolutionary search
#[derive(Debug, Clone, PartialEq)]
pub struct Evolution {
    pub weights: WeightVector,
    pub fitness: f64,
    /// Station ranked first under `weights`
    pub station_id: StationId,
    /// Its utility under `weights`
    pub utility: Score,
    pub generations: usize,
    pub stop: StopReason,
}

#[derive(Debug, Clone)]
struct Individual {
    weights: WeightVector,
    fitness: f64,
    pick: StationId,
    utility: Score,
}

/// Best and runner-up station under a weight vector.
///
/// Ties keep the smaller id because the feature set iterates in id order and
/// only a strictly larger utility replaces the leader.
fn rank<'a>(
    features: &'a FeatureSet,
    weights: &WeightVector,
) -> Option<(&'a str, Score, Option<Score>)> {
    let mut best: Option<(&str, Score)> = None;
    let mut second: Option<Score> = None;

    for (id, vector) in features.iter() {
        let utility = weights.utility(vector);
        match best {
            None => best = Some((id.as_str(), utility)),
            Some((_, leader)) if utility > leader => {
                second = Some(leader);
                best = Some((id.as_str(), utility));
            }
            Some(_) => {
                if second.map_or(true, |runner_up| utility > runner_up) {
                    second = Some(utility);
                }
            }
        }
    }

    best.map(|(id, utility)| (id, utility, second))
}

fn evaluate(features: &FeatureSet, weights: WeightVector) -> Option<Individual> {
    let (pick, utility, second) = rank(features, &weights)?;
    let fitness = match second {
        Some(runner_up) => utility - runner_up,
        None => utility,
    };
    Some(Individual {
        weights,
        fitness,
        pick: pick.to_string(),
        utility,
    })
}

/// Uniform sample from the simplex via normalized exponentials
fn sample_simplex(rng: &mut StdRng) -> WeightVector {
    let raw = [(); 3].map(|_| -(1.0 - rng.gen::<f64>()).ln());
    WeightVector::normalized(raw)
}

fn crossover(a: &WeightVector, b: &WeightVector, rng: &mut StdRng) -> WeightVector {
    let t: f64 = rng.gen();
    let (a, b) = (a.as_array(), b.as_array());
    WeightVector::normalized([0_usize, 1, 2].map(|i| t * a[i] + (1.0 - t) * b[i]))
}

fn mutate(weights: &WeightVector, step: f64, rng: &mut StdRng) -> WeightVector {
    let mut raw = weights.as_array();
    let index = rng.gen_range(0..raw.len());
    raw[index] += rng.gen_range(-step..=step);
    WeightVector::normalized(raw)
}

fn tournament<'a>(population: &'a [Individual], size: usize, rng: &mut StdRng) -> &'a Individual {
    let mut winner = &population[rng.gen_range(0..population.len())];
    for _ in 1..size {
        let challenger = &population[rng.gen_range(0..population.len())];
        if challenger.fitness > winner.fitness {
            winner = challenger;
        }
    }
    winner
}

fn fittest(population: &[Individual]) -> Option<&Individual> {
    population.iter().fold(None, |best: Option<&Individual>, candidate| match best {
        Some(current) if current.fitness >= candidate.fitness => Some(current),
        _ => Some(candidate),
    })
}

/// Genetic-algorithm selector.
///
/// Each individual is a weight vector `w = (w_cost, w_heuristic, w_quality)`
/// on the unit simplex. A station's utility under `w` is
/// `w_cost·(1 − cost) + w_heuristic·(1 − heuristic) + w_quality·quality`.
/// Fitness is the margin between the top-ranked and the runner-up station
/// under `w` (the top utility alone when there is a single station).
#[derive(Debug, Clone, Default)]
pub struct GeneticSelector {
    config: GeneticConfig,
}

impl GeneticSelector {
    pub fn new(config: GeneticConfig) -> Self {
        Self { config }
    }

    /// Runs the search seeded from the request itself
    pub fn evolve(&self, features: &FeatureSet) -> Option<Evolution> {
        self.evolve_observed(features, |_, _| {})
    }

    fn evolve_observed<F>(&self, features: &FeatureSet, mut observe: F) -> Option<Evolution>
    where
        F: FnMut(usize, &[Individual]),
    {
        let population_size = self.config.population_size.max(2);
        let tournament_size = self.config.tournament_size.clamp(1, population_size);
        let budget = self.config.time_budget();
        let started = Instant::now();

        let mut rng = StdRng::seed_from_u64(request_seed(features, self.config.seed_salt));

        let mut population = (0..population_size)
            .map(|_| evaluate(features, sample_simplex(&mut rng)))
            .collect::<Option<Vec<_>>>()?;
        observe(0, &population);
        let mut best = fittest(&population)?.clone();

        let mut generations = 0;
        let mut stale = 0;
        let mut stop = StopReason::GenerationLimit;

        while generations < self.config.generations {
            if budget.map_or(false, |limit| started.elapsed() >= limit) {
                log::warn!(
                    "genetic search hit its time budget after {} generations",
                    generations
                );
                stop = StopReason::TimeBudget;
                break;
            }

            let mut next = Vec::with_capacity(population_size);
            next.push(best.clone());
            while next.len() < population_size {
                let mother = tournament(&population, tournament_size, &mut rng);
                let father = tournament(&population, tournament_size, &mut rng);
                let mut child = crossover(&mother.weights, &father.weights, &mut rng);
                if rng.gen::<f64>() < self.config.mutation_rate {
                    child = mutate(&child, self.config.mutation_step, &mut rng);
                }
                next.push(evaluate(features, child)?);
            }
            population = next;
            generations += 1;
            observe(generations, &population);

            let champion = fittest(&population)?;
            let improved = champion.fitness > best.fitness + self.config.plateau_epsilon;
            if champion.fitness > best.fitness {
                best = champion.clone();
            }
            if improved {
                stale = 0;
            } else {
                stale += 1;
            }
            log::trace!(
                "generation {}: best fitness {:.6} ({})",
                generations,
                best.fitness,
                best.weights
            );

            if self.config.plateau_generations > 0 && stale >= self.config.plateau_generations {
                stop = StopReason::Plateau;
                break;
            }
        }

        Some(Evolution {
            weights: best.weights,
            fitness: best.fitness,
            station_id: best.pick,
            utility: best.utility,
            generations,
            stop,
        })
    }
}

impl StationSelector for GeneticSelector {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Genetic
    }

    fn select(&self, features: &FeatureSet) -> Option<AlgorithmResult> {
        let evolution = self.evolve(features)?;

        let mut reasoning = format!(
            "Evolved weights ({}) over {} generations favour {} with a margin of {:.4}",
            evolution.weights, evolution.generations, evolution.station_id, evolution.fitness
        );
        match evolution.stop {
            StopReason::Plateau => reasoning.push_str("; stopped early on a fitness plateau"),
            StopReason::TimeBudget => {
                reasoning.push_str("; time budget reached, best individual so far kept")
            }
            StopReason::GenerationLimit => {}
        }

        Some(AlgorithmResult::new(
            Algorithm::Genetic,
            evolution.station_id,
            evolution.utility.clamp(0.0, 1.0),
            reasoning,
        ))
    }
}
