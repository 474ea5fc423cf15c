//! Instances, reports, and the collaborator traits around the pipeline.

use std::time::Duration;

use log::info;

use crate::error::Result;
use crate::geometry::City;
use crate::metrics::{tour_length, TourMetrics};
use crate::tour::Tour;

/// A problem instance: the cities to visit and, optionally, a reference
/// tour used only to report the gap.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    /// Display name, e.g. `"berlin52"`.
    pub name: String,
    /// Cities in input order.
    pub cities: Vec<City>,
    /// Known optimal (or best-known) visiting order of the same cities.
    pub reference: Option<Vec<City>>,
}

impl Instance {
    /// Creates an instance without a reference tour.
    pub fn new(name: impl Into<String>, cities: Vec<City>) -> Self {
        Self {
            name: name.into(),
            cities,
            reference: None,
        }
    }

    /// Attaches a reference tour.
    pub fn with_reference(mut self, reference: Vec<City>) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Closed length of the reference tour, if any.
    pub fn reference_length(&self) -> Option<f64> {
        self.reference.as_deref().map(tour_length)
    }
}

/// Supplies an [`Instance`]. File formats live behind this trait.
pub trait InstanceLoader {
    fn load(&self) -> Result<Instance>;
}

impl InstanceLoader for Instance {
    fn load(&self) -> Result<Instance> {
        Ok(self.clone())
    }
}

impl<F> InstanceLoader for F
where
    F: Fn() -> Result<Instance>,
{
    fn load(&self) -> Result<Instance> {
        self()
    }
}

/// Receives finished runs for presentation.
pub trait Reporter {
    fn report(&mut self, report: &RunReport);
}

impl Reporter for Vec<RunReport> {
    fn report(&mut self, report: &RunReport) {
        self.push(report.clone());
    }
}

/// Writes one summary line per stage through the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&mut self, report: &RunReport) {
        match report.reference_length {
            Some(opt) => info!(
                "{}: n={} seed={} reference length {:.2}",
                report.instance, report.n_cities, report.seed, opt
            ),
            None => info!(
                "{}: n={} seed={}",
                report.instance, report.n_cities, report.seed
            ),
        }
        info!(
            "SOM: n_nodes={}, epochs={}, length={:.2}{}, time={:.3}s",
            report.n_nodes,
            report.epochs,
            report.som.metrics.length,
            format_gap(report.som.metrics.gap),
            report.som.elapsed.as_secs_f64()
        );
        if let Some(refined) = &report.refined {
            info!(
                "after 2-opt: length={:.2}{}, moves={}, time={:.3}s",
                refined.metrics.length,
                format_gap(refined.metrics.gap),
                report.refine_moves,
                refined.elapsed.as_secs_f64()
            );
        }
    }
}

fn format_gap(gap: Option<f64>) -> String {
    gap.map(|g| format!(", gap={g:.2}%")).unwrap_or_default()
}

/// Outcome of one pipeline stage.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageReport {
    /// Tour produced by the stage.
    pub tour: Tour,
    /// Length and gap of `tour`.
    pub metrics: TourMetrics,
    /// Wall-clock time spent in the stage.
    pub elapsed: Duration,
}

/// Outcome of a full pipeline run on one instance with one seed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunReport {
    pub instance: String,
    pub n_cities: usize,
    pub seed: u64,
    pub n_nodes: usize,
    pub epochs: usize,
    /// Closed length of the instance's reference tour.
    pub reference_length: Option<f64>,
    /// SOM construction.
    pub som: StageReport,
    /// 2-opt refinement of the SOM tour, when enabled.
    pub refined: Option<StageReport>,
    /// Moves accepted by the refiner (0 when refinement is disabled).
    pub refine_moves: usize,
}

impl RunReport {
    /// The final stage: refined if refinement ran, SOM otherwise.
    pub fn final_stage(&self) -> &StageReport {
        self.refined.as_ref().unwrap_or(&self.som)
    }

    /// Length of the final tour.
    pub fn best_length(&self) -> f64 {
        self.final_stage().metrics.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(length: f64) -> StageReport {
        StageReport {
            tour: Tour::empty(),
            metrics: TourMetrics { length, gap: None },
            elapsed: Duration::ZERO,
        }
    }

    #[test]
    fn test_reference_length() {
        let square = vec![
            City::new(0.0, 0.0),
            City::new(1.0, 0.0),
            City::new(1.0, 1.0),
            City::new(0.0, 1.0),
        ];
        let inst = Instance::new("square", square.clone());
        assert_eq!(inst.reference_length(), None);
        let inst = inst.with_reference(square);
        assert!((inst.reference_length().unwrap() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_loaders() {
        let inst = Instance::new("one", vec![City::new(1.0, 1.0)]);
        assert_eq!(inst.load().unwrap(), inst);

        let from_fn = || -> Result<Instance> { Ok(Instance::new("fn", vec![])) };
        assert_eq!(from_fn.load().unwrap().name, "fn");
    }

    #[test]
    fn test_final_stage() {
        let mut report = RunReport {
            instance: "x".into(),
            n_cities: 0,
            seed: 0,
            n_nodes: 0,
            epochs: 0,
            reference_length: None,
            som: stage(10.0),
            refined: None,
            refine_moves: 0,
        };
        assert_eq!(report.best_length(), 10.0);
        report.refined = Some(stage(8.0));
        assert_eq!(report.best_length(), 8.0);

        let mut sink: Vec<RunReport> = Vec::new();
        sink.report(&report);
        LogReporter.report(&report);
        assert_eq!(sink.len(), 1);
    }
}
