use nalgebra::{DMatrix, DVector};
use scorereg_core::{run, train_test_split, Dataset, RSquared, Sample, SplitConfig};

/// Least squares via SVD, independent of the closed form used by the crate.
fn svd_fit(samples: &[Sample]) -> (f64, f64) {
    let a = DMatrix::from_fn(samples.len(), 2, |r, c| if c == 0 { samples[r].predictor } else { 1.0 });
    let b = DVector::from_iterator(samples.len(), samples.iter().map(|s| s.target));
    let coef = a.svd(true, true).solve(&b, 1e-12).expect("svd solve");
    (coef[0], coef[1])
}

fn r2(samples: &[Sample], slope: f64, intercept: f64) -> f64 {
    let mean = samples.iter().map(|s| s.target).sum::<f64>() / samples.len() as f64;
    let ss_res: f64 =
        samples.iter().map(|s| (s.target - (slope * s.predictor + intercept)).powi(2)).sum();
    let ss_tot: f64 = samples.iter().map(|s| (s.target - mean).powi(2)).sum();
    1.0 - ss_res / ss_tot
}

#[test]
fn train_r2_matches_independent_solver() {
    let data = Dataset::embedded().unwrap();
    let config = SplitConfig::default();
    let report = run(&data, &config).unwrap();
    let split = train_test_split(&data, &config).unwrap();

    let (slope, intercept) = svd_fit(&split.train);
    assert!((report.fit.slope() - slope).abs() < 1e-9);
    assert!((report.fit.intercept() - intercept).abs() < 1e-9);

    let expected = r2(&split.train, slope, intercept);
    assert!((report.fit.r2.unwrap() - expected).abs() < 1e-6);
}

#[test]
fn full_dataset_fit_matches_reference() {
    // closed form values for all 43 rows
    let data = Dataset::embedded().unwrap();
    let fit = scorereg_core::LinearFit::from_samples(data.samples()).unwrap();
    assert!((fit.slope() - 0.5599524134288484).abs() < 1e-9);
    assert!((fit.intercept() - 17.120740668570818).abs() < 1e-9);
    assert!((fit.r2.unwrap() - 0.32078106991371813).abs() < 1e-9);
}

#[test]
fn forty_one_rows_split_eight_to_thirty_three() {
    let data = Dataset::embedded().unwrap();
    let subset = Dataset::new("midterm", "final", data.samples()[..41].to_vec()).unwrap();

    let first = run(&subset, &SplitConfig::default()).unwrap();
    let second = run(&subset, &SplitConfig::default()).unwrap();
    assert_eq!(first.split.train_rows, 33);
    assert_eq!(first.split.test_rows, 8);
    assert_eq!(first.evaluation, second.evaluation);
}

#[test]
fn predictions_follow_the_fitted_line() {
    let data = Dataset::embedded().unwrap();
    let report = run(&data, &SplitConfig::default()).unwrap();
    let (slope, intercept) = (report.fit.slope(), report.fit.intercept());

    for p in &report.evaluation.predictions {
        assert_eq!(p.predicted, slope * p.predictor + intercept);
    }

    let m = report.evaluation.metrics;
    assert!(m.mse >= 0.0 && m.mae >= 0.0);
    assert_eq!(m.rmse, m.mse.sqrt());
    match m.r2 {
        RSquared::Value(v) => assert!(v <= 1.0),
        RSquared::Undefined => panic!("test targets of the embedded data are not constant"),
    }
}

#[test]
fn csv_file_input() {
    let path = std::env::temp_dir().join(format!("scorereg-{}.csv", std::process::id()));
    std::fs::write(&path, "midterm,final\n10,20\n20,40\n30,60\n40,80\n50,100\n").unwrap();
    let data = Dataset::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let report = run(&data, &SplitConfig::default()).unwrap();
    assert!((report.fit.slope() - 2.0).abs() < 1e-12);
    assert!(report.fit.intercept().abs() < 1e-9);
}
