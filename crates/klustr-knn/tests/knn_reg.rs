//! KNN classifier regression test
//!
//! Covers the circle/square scenario, the distance gate, the tie-break,
//! category interning and insensitivity to training order.

use klustr_knn::{Classification, KnnClassifier, KnnError, KnnOptions, NO_ADMISSIBLE_NEIGHBOR};
use klustr_test::{RegParams, feature_cloud, shuffled};

fn classifier(k: usize, dist_max: f64) -> KnnClassifier {
    KnnClassifier::new(&KnnOptions::new().with_k(k).with_dist_max(dist_max)).unwrap()
}

#[test]
fn knn_scenario_reg() {
    let mut rp = RegParams::new("knn_scenario");

    let mut knn = classifier(2, 1.0);
    knn.add_point("circle", &[0.95, 0.90, 0.80]).unwrap();
    knn.add_point("circle", &[0.93, 0.88, 0.78]).unwrap();
    knn.add_point("square", &[0.78, 0.70, 0.90]).unwrap();

    let query = [0.94, 0.89, 0.79];

    // --- Test 1: both nearest neighbors are circles ---
    let result = knn.classify(&query).unwrap();
    rp.compare_labels(Some("circle"), result.label());
    if let Classification::Classified {
        votes,
        mean_distance,
        ..
    } = result
    {
        rp.compare_values(2.0, votes as f64, 0.0);
        rp.compare_values((3.0f64 * 1e-4).sqrt(), mean_distance, 1e-9);
    }

    // --- Test 2: same data, tiny control distance ---
    knn.set_dist_max(0.001).unwrap();
    let result = knn.classify(&query).unwrap();
    rp.compare_labels(None, result.label());
    rp.check(
        "unclassifiable carries a reason",
        result
            == Classification::Unclassifiable {
                reason: NO_ADMISSIBLE_NEIGHBOR.to_string(),
            },
    );

    // --- Test 3: classification never writes the store ---
    let before: Vec<Vec<f64>> = knn.store().rows().map(|r| r.features.to_vec()).collect();
    knn.set_dist_max(1.0).unwrap();
    for _ in 0..3 {
        knn.classify(&query).unwrap();
    }
    let after: Vec<Vec<f64>> = knn.store().rows().map(|r| r.features.to_vec()).collect();
    rp.check("store untouched by classify", before == after);

    // --- Test 4: wrong-length points are rejected without a trace ---
    let err = knn.add_point("triangle", &[0.1, 0.2]).unwrap_err();
    rp.check(
        "short point rejected",
        err == KnnError::DimensionMismatch {
            expected: 3,
            actual: 2,
        },
    );
    rp.compare_values(3.0, knn.store().len() as f64, 0.0);
    rp.check(
        "rejected label not interned",
        knn.store().categories().index_of("triangle").is_none(),
    );
    rp.check(
        "short query rejected",
        knn.classify(&[0.5; 4]).is_err(),
    );

    assert!(rp.cleanup(), "knn scenario regression test failed");
}

#[test]
fn knn_gate_reg() {
    let mut rp = RegParams::new("knn_gate");

    // Rows at distance 0.1, 0.2, 0.5 and 0.5 from the origin
    let mut knn = classifier(4, 0.3);
    knn.add_point("near", &[0.1, 0.0, 0.0]).unwrap();
    knn.add_point("mid", &[0.0, 0.2, 0.0]).unwrap();
    knn.add_point("far", &[0.0, 0.0, 0.5]).unwrap();
    knn.add_point("far", &[0.5, 0.0, 0.0]).unwrap();

    let origin = [0.0, 0.0, 0.0];

    // --- Test 1: only the two rows within 0.3 vote ---
    let neighbors = knn.neighbors(&origin).unwrap();
    rp.compare_values(2.0, neighbors.len() as f64, 0.0);
    rp.check(
        "admitted rows in distance order",
        neighbors.iter().map(|n| n.row).collect::<Vec<_>>() == [0, 1],
    );

    // "far" has the most raw votes but lies outside the gate; near and mid
    // tie on one vote and near has the smaller mean distance.
    let result = knn.classify(&origin).unwrap();
    rp.compare_labels(Some("near"), result.label());

    // --- Test 2: k caps the candidates even when more would be admissible ---
    knn.set_k(1);
    knn.set_dist_max(1.0).unwrap();
    rp.compare_labels(Some("near"), knn.classify(&origin).unwrap().label());

    // --- Test 3: k larger than the store uses every row ---
    knn.set_k(7);
    rp.compare_values(4.0, knn.neighbors(&origin).unwrap().len() as f64, 0.0);
    rp.compare_labels(Some("far"), knn.classify(&origin).unwrap().label());

    // --- Test 4: k = 0 is never an error ---
    knn.set_k(0);
    rp.compare_labels(None, knn.classify(&origin).unwrap().label());

    // --- Test 5: invalid control distances keep the old one ---
    rp.check("negative dist_max rejected", knn.set_dist_max(-0.5).is_err());
    rp.check("NaN dist_max rejected", knn.set_dist_max(f64::NAN).is_err());
    rp.compare_values(1.0, knn.dist_max(), 0.0);

    assert!(rp.cleanup(), "knn gate regression test failed");
}

#[test]
fn knn_tie_reg() {
    let mut rp = RegParams::new("knn_tie");

    // --- Test 1: equal votes, smaller mean distance wins ---
    // A: 0.1 and 0.2 (mean 0.15), B: 0.05 and 0.3 (mean 0.175)
    let mut knn = classifier(4, 1.0);
    knn.add_point("B", &[0.05, 0.0, 0.0]).unwrap();
    knn.add_point("A", &[0.1, 0.0, 0.0]).unwrap();
    knn.add_point("A", &[0.0, 0.2, 0.0]).unwrap();
    knn.add_point("B", &[0.0, 0.0, 0.3]).unwrap();
    let result = knn.classify(&[0.0, 0.0, 0.0]).unwrap();
    rp.compare_labels(Some("A"), result.label());

    // --- Test 2: equal votes and equal means, first category wins ---
    let mut knn = classifier(2, 1.0);
    knn.add_point("first", &[1.0, 0.0, 0.0]).unwrap();
    knn.add_point("second", &[-1.0, 0.0, 0.0]).unwrap();
    let result = knn.classify(&[0.0, 0.0, 0.0]).unwrap();
    rp.compare_labels(Some("first"), result.label());

    assert!(rp.cleanup(), "knn tie regression test failed");
}

#[test]
fn knn_interning_reg() {
    let mut rp = RegParams::new("knn_interning");

    let mut knn = classifier(3, 1.0);
    for (label, features) in [
        ("circle", [0.9, 0.9, 0.9]),
        ("square", [0.8, 0.5, 0.7]),
        ("circle", [0.9, 0.8, 0.9]),
        ("triangle", [0.6, 0.2, 0.4]),
        ("square", [0.8, 0.5, 0.6]),
    ] {
        knn.add_point(label, &features).unwrap();
    }

    // --- Test 1: indices follow first appearance ---
    let categories = knn.store().categories();
    rp.compare_values(3.0, categories.len() as f64, 0.0);
    rp.check(
        "first-appearance order",
        categories.labels() == ["circle", "square", "triangle"],
    );
    rp.check(
        "rows share category indices",
        knn.store().rows().map(|r| r.category).collect::<Vec<_>>() == [0, 1, 0, 2, 1],
    );

    // --- Test 2: per-category counts and series agree ---
    rp.check(
        "category counts",
        knn.store().category_counts() == [2, 2, 1],
    );
    let series = knn.store().series();
    rp.check(
        "series sizes",
        series.iter().map(|s| s.points.len()).collect::<Vec<_>>() == [2, 2, 1],
    );

    // --- Test 3: empty labels are refused ---
    rp.check(
        "empty label rejected",
        knn.add_point("", &[0.1, 0.1, 0.1]) == Err(KnnError::EmptyLabel),
    );
    rp.compare_values(5.0, knn.store().len() as f64, 0.0);

    assert!(rp.cleanup(), "knn interning regression test failed");
}

#[test]
fn knn_order_reg() {
    let mut rp = RegParams::new("knn_order");

    let circles = feature_cloud(&[0.60, 0.85, 1.00], 0.03, 20, 11);
    let squares = feature_cloud(&[0.78, 0.50, 0.64], 0.03, 20, 12);
    let training: Vec<(&str, Vec<f64>)> = circles
        .into_iter()
        .map(|f| ("circle", f))
        .chain(squares.into_iter().map(|f| ("square", f)))
        .collect();

    let queries = [
        [0.61, 0.84, 0.99],
        [0.77, 0.51, 0.65],
        [0.69, 0.68, 0.82],
        [0.10, 0.10, 0.10],
    ];

    let run = |seed: Option<u64>| -> Vec<Option<String>> {
        let rows = match seed {
            Some(seed) => shuffled(training.clone(), seed),
            None => training.clone(),
        };
        let mut knn = classifier(5, 0.2);
        for (label, features) in &rows {
            knn.add_point(label, features).unwrap();
        }
        queries
            .iter()
            .map(|q| knn.classify(q).unwrap().label().map(str::to_string))
            .collect()
    };

    let reference = run(None);
    eprintln!("  reference: {reference:?}");

    // --- Test 1: clear-cut queries ---
    rp.compare_labels(Some("circle"), reference[0].as_deref());
    rp.compare_labels(Some("square"), reference[1].as_deref());
    rp.compare_labels(None, reference[3].as_deref());

    // --- Test 2: the same set in any order gives the same answers ---
    for seed in [1, 2, 3] {
        rp.check(
            &format!("shuffle seed {seed} matches"),
            run(Some(seed)) == reference,
        );
    }

    assert!(rp.cleanup(), "knn order regression test failed");
}
