//! End-to-end scenarios on instances with known optimal tours.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use som_tsp::pipeline::{Instance, Pipeline, RunReport};
use som_tsp::som::{DecaySchedule, SomConfig, SomTrainer};
use som_tsp::two_opt::{TwoOptConfig, TwoOptRunner};
use som_tsp::{gap, tour_length, City, Tour, TspError};

fn unit_square() -> Vec<City> {
    vec![
        City::new(0.0, 0.0),
        City::new(1.0, 0.0),
        City::new(1.0, 1.0),
        City::new(0.0, 1.0),
    ]
}

/// Cities in convex position on an ellipse, so the optimal tour is the
/// angular order. Returns `(shuffled input, optimal tour)`.
fn ellipse_instance(n: usize, seed: u64) -> (Vec<City>, Vec<City>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut angles: Vec<f64> = (0..n)
        .map(|_| rng.random_range(0.0..std::f64::consts::TAU))
        .collect();
    angles.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let optimal: Vec<City> = angles
        .iter()
        .map(|a| City::new(500.0 + 400.0 * a.cos(), 300.0 + 150.0 * a.sin()))
        .collect();
    let mut input = optimal.clone();
    input.shuffle(&mut rng);
    (input, optimal)
}

#[test]
fn test_unit_square_som_finds_perimeter() {
    let cities = unit_square();
    for seed in [0, 1, 2] {
        let config = SomConfig::default()
            .with_nodes(8)
            .with_epochs(1000)
            .with_seed(seed);
        let som = SomTrainer::train(&cities, &config).unwrap();
        assert!(
            (som.tour.length() - 4.0).abs() < 1e-9,
            "seed {seed}: got {}",
            som.tour.length()
        );

        let refined = TwoOptRunner::run(&som.tour, &TwoOptConfig::default()).unwrap();
        assert_eq!(refined.improving_moves, 0);
        assert!((refined.best_length - 4.0).abs() < 1e-9);
    }
}

#[test]
fn test_ellipse_refinement_never_widens_gap() {
    let (cities, optimal) = ellipse_instance(48, 2024);
    let instance = Instance::new("ellipse48", cities).with_reference(optimal);
    let pipeline = Pipeline::new(
        SomConfig::default().with_epochs(8000),
        Some(TwoOptConfig::default()),
    );

    let report = pipeline.run(&instance).unwrap();
    let som_gap = report.som.metrics.gap.unwrap();
    let refined_gap = report.refined.as_ref().unwrap().metrics.gap.unwrap();

    assert!(som_gap < 30.0, "SOM gap too large: {som_gap:.2}%");
    assert!(refined_gap <= som_gap);
    assert!(refined_gap > -1e-6, "cannot beat the optimum: {refined_gap}");
}

#[test]
fn test_exponential_decay_alternative() {
    let (cities, optimal) = ellipse_instance(30, 9);
    let config = SomConfig::default()
        .with_epochs(6000)
        .with_decay(DecaySchedule::Exponential);
    let som = SomTrainer::train(&cities, &config).unwrap();
    assert!(som.tour.is_permutation_of(&cities));

    let g = gap(tour_length(&optimal), som.tour.length()).unwrap();
    assert!(g < 30.0, "exponential decay gap {g:.2}%");
}

#[test]
fn test_degenerate_inputs() {
    let som = SomTrainer::train(&[], &SomConfig::default()).unwrap();
    assert!(som.tour.is_empty());
    let refined = TwoOptRunner::run(&Tour::empty(), &TwoOptConfig::default()).unwrap();
    assert_eq!(refined.best_length, 0.0);

    assert_eq!(
        gap(0.0, 12.0),
        Err(TspError::DegenerateReference { length: 0.0 })
    );
}

#[test]
fn test_seed_sweep_reports() {
    let (cities, optimal) = ellipse_instance(20, 5);
    let instance = Instance::new("ellipse20", cities).with_reference(optimal);
    let pipeline = Pipeline::new(
        SomConfig::default().with_epochs(3000),
        Some(TwoOptConfig::default()),
    );

    let reports: Vec<RunReport> = pipeline.run_seeds(&instance, &[0, 1, 2, 3]).unwrap();
    assert_eq!(reports.len(), 4);
    for report in &reports {
        assert!(report.best_length() <= report.som.metrics.length);
        assert!(report.final_stage().tour.is_permutation_of(&instance.cities));
    }
}
