//! Fuzz target for the metric engine.
//!
//! Arbitrary rows are rendered as a dataset and evaluated. The engine must
//! either reject the table or return a bias score within [0, 1].

#![no_main]

use arbitrary::Arbitrary;
use biaslens::input::Parser;
use biaslens::metrics::MetricEngine;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Row {
    target: String,
    predicted: String,
    group: String,
}

#[derive(Debug, Arbitrary)]
struct Input {
    feature: String,
    rows: Vec<Row>,
}

fuzz_target!(|input: Input| {
    if input.rows.len() > 1_000 {
        return;
    }

    let mut csv = String::from("target,predicted,gender\n");
    for row in &input.rows {
        csv.push_str(&format!("{},{},{}\n", row.target, row.predicted, row.group));
    }

    let Ok((table, _)) = Parser::new().parse_bytes(csv.as_bytes()) else {
        return;
    };

    if let Ok(report) = MetricEngine::new().evaluate(&table, &input.feature) {
        assert!((0.0..=1.0).contains(&report.bias_score));
        assert!((0.0..=100.0).contains(&report.accuracy));
    }
});
