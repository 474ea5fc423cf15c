//! SOM construction followed by optional 2-opt refinement.

use std::time::Instant;

use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::types::{Instance, InstanceLoader, Reporter, RunReport, StageReport};
use crate::error::{Result, TspError};
use crate::metrics::TourMetrics;
use crate::som::{SomConfig, SomTrainer};
use crate::two_opt::{TwoOptConfig, TwoOptRunner};

/// Runs the tour construction pipeline on instances.
///
/// # Examples
///
/// ```
/// use som_tsp::pipeline::{Instance, Pipeline};
/// use som_tsp::som::SomConfig;
/// use som_tsp::two_opt::TwoOptConfig;
/// use som_tsp::City;
///
/// let square = vec![
///     City::new(0.0, 0.0),
///     City::new(1.0, 0.0),
///     City::new(1.0, 1.0),
///     City::new(0.0, 1.0),
/// ];
/// let instance = Instance::new("square", square.clone()).with_reference(square);
/// let pipeline = Pipeline::new(
///     SomConfig::default().with_epochs(1000),
///     Some(TwoOptConfig::default()),
/// );
/// let report = pipeline.run(&instance).unwrap();
/// assert!((report.best_length() - 4.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    som: SomConfig,
    refine: Option<TwoOptConfig>,
}

impl Pipeline {
    /// Creates a pipeline. `refine = None` skips the 2-opt stage.
    pub fn new(som: SomConfig, refine: Option<TwoOptConfig>) -> Self {
        Self { som, refine }
    }

    pub fn som_config(&self) -> &SomConfig {
        &self.som
    }

    pub fn refine_config(&self) -> Option<&TwoOptConfig> {
        self.refine.as_ref()
    }

    /// Runs both stages on `instance` with the configured seed.
    ///
    /// # Errors
    ///
    /// - [`TspError::InvalidConfig`] for a bad SOM or 2-opt configuration
    /// - [`TspError::MismatchedReference`] when the reference tour's size
    ///   differs from the instance's
    /// - [`TspError::DegenerateReference`] when the reference tour has
    ///   zero length
    pub fn run(&self, instance: &Instance) -> Result<RunReport> {
        self.run_with_seed(instance, self.som.seed)
    }

    /// Runs both stages with `seed` in place of the configured seed.
    pub fn run_with_seed(&self, instance: &Instance, seed: u64) -> Result<RunReport> {
        self.som.validate()?;
        if let Some(refine) = &self.refine {
            refine.validate()?;
        }
        let reference_length = checked_reference_length(instance)?;

        let som_config = self.som.clone().with_seed(seed);
        let start = Instant::now();
        let trained = SomTrainer::train(&instance.cities, &som_config)?;
        let som = StageReport {
            metrics: TourMetrics::evaluate(&trained.tour, reference_length)?,
            tour: trained.tour,
            elapsed: start.elapsed(),
        };

        let (refined, refine_moves) = match &self.refine {
            Some(config) => {
                let start = Instant::now();
                let result = TwoOptRunner::run(&som.tour, config)?;
                let stage = StageReport {
                    metrics: TourMetrics::evaluate(&result.best, reference_length)?,
                    tour: result.best,
                    elapsed: start.elapsed(),
                };
                (Some(stage), result.improving_moves)
            }
            None => (None, 0),
        };

        debug!(
            "pipeline: {} seed {} finished in {:?}",
            instance.name,
            seed,
            som.elapsed + refined.as_ref().map(|s| s.elapsed).unwrap_or_default()
        );

        Ok(RunReport {
            instance: instance.name.clone(),
            n_cities: instance.cities.len(),
            seed,
            n_nodes: trained.n_nodes,
            epochs: trained.epochs,
            reference_length,
            som,
            refined,
            refine_moves,
        })
    }

    /// Loads an instance, runs it, and hands the report to `reporter`.
    pub fn run_and_report<L, R>(&self, loader: &L, reporter: &mut R) -> Result<RunReport>
    where
        L: InstanceLoader + ?Sized,
        R: Reporter + ?Sized,
    {
        let instance = loader.load()?;
        let report = self.run(&instance)?;
        reporter.report(&report);
        Ok(report)
    }

    /// Runs the pipeline once per seed. Runs share nothing, so with the
    /// `parallel` feature they execute on the rayon pool.
    ///
    /// Reports come back in `seeds` order.
    pub fn run_seeds(&self, instance: &Instance, seeds: &[u64]) -> Result<Vec<RunReport>> {
        #[cfg(feature = "parallel")]
        {
            seeds
                .par_iter()
                .map(|&seed| self.run_with_seed(instance, seed))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            seeds
                .iter()
                .map(|&seed| self.run_with_seed(instance, seed))
                .collect()
        }
    }
}

fn checked_reference_length(instance: &Instance) -> Result<Option<f64>> {
    let Some(reference) = &instance.reference else {
        return Ok(None);
    };
    if reference.len() != instance.cities.len() {
        return Err(TspError::MismatchedReference {
            cities: instance.cities.len(),
            reference: reference.len(),
        });
    }
    Ok(instance.reference_length())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::City;

    fn square() -> Vec<City> {
        vec![
            City::new(0.0, 0.0),
            City::new(1.0, 0.0),
            City::new(1.0, 1.0),
            City::new(0.0, 1.0),
        ]
    }

    fn quick() -> Pipeline {
        Pipeline::new(
            SomConfig::default().with_epochs(1000),
            Some(TwoOptConfig::default()),
        )
    }

    #[test]
    fn test_pipeline_square_with_reference() {
        let instance = Instance::new("square", square()).with_reference(square());
        let report = quick().run(&instance).unwrap();

        assert_eq!(report.n_cities, 4);
        assert_eq!(report.n_nodes, 16);
        assert_eq!(report.reference_length, Some(4.0));
        let refined = report.refined.as_ref().unwrap();
        assert!(refined.metrics.gap.unwrap().abs() < 1e-9);
        assert!(refined.metrics.length <= report.som.metrics.length);
    }

    #[test]
    fn test_pipeline_without_refinement() {
        let pipeline = Pipeline::new(SomConfig::default().with_epochs(500), None);
        let report = pipeline.run(&Instance::new("square", square())).unwrap();
        assert!(report.refined.is_none());
        assert_eq!(report.refine_moves, 0);
        assert_eq!(report.som.metrics.gap, None);
        assert_eq!(report.best_length(), report.som.metrics.length);
    }

    #[test]
    fn test_pipeline_empty_instance() {
        let report = quick().run(&Instance::new("empty", vec![])).unwrap();
        assert!(report.som.tour.is_empty());
        assert_eq!(report.best_length(), 0.0);
    }

    #[test]
    fn test_pipeline_mismatched_reference() {
        let instance = Instance::new("square", square()).with_reference(square()[..3].to_vec());
        assert_eq!(
            quick().run(&instance).unwrap_err(),
            TspError::MismatchedReference {
                cities: 4,
                reference: 3
            }
        );
    }

    #[test]
    fn test_pipeline_degenerate_reference() {
        let same = vec![City::new(2.0, 2.0); 4];
        let instance = Instance::new("point", same.clone()).with_reference(same);
        assert!(matches!(
            quick().run(&instance),
            Err(TspError::DegenerateReference { .. })
        ));
    }

    #[test]
    fn test_pipeline_rejects_bad_config_before_work() {
        let pipeline = Pipeline::new(
            SomConfig::default(),
            Some(TwoOptConfig::default().with_max_no_improve(0)),
        );
        assert!(matches!(
            pipeline.run(&Instance::new("square", square())),
            Err(TspError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_run_and_report() {
        let instance = Instance::new("square", square());
        let mut sink: Vec<RunReport> = Vec::new();
        let report = quick().run_and_report(&instance, &mut sink).unwrap();
        assert_eq!(sink, vec![report]);
    }

    #[test]
    fn test_run_seeds_in_order() {
        let instance = Instance::new("square", square());
        let reports = quick().run_seeds(&instance, &[3, 1, 2]).unwrap();
        let seeds: Vec<u64> = reports.iter().map(|r| r.seed).collect();
        assert_eq!(seeds, vec![3, 1, 2]);

        let again = quick().run_with_seed(&instance, 1).unwrap();
        assert_eq!(again.som.tour, reports[1].som.tour);
    }
}
