use kneedle::{Concavity, Direction, InterpolationMethod, Kneedle, KneedleConfig};
use std::time::Instant;

fn main() {
    println!("=== Kneedle Benchmarks ===\n");

    let sizes = vec![100, 1_000, 10_000, 100_000];

    for size in sizes {
        println!("Benchmarking with {} data points:", size);

        // Saturating curve with a little ripple
        let x: Vec<f64> = (0..size).map(|i| i as f64 * 0.01).collect();
        let y: Vec<f64> = x
            .iter()
            .map(|&v| (1.0 - (-v / 5.0).exp()) + 0.001 * (3.0 * v).sin())
            .collect();

        let methods = vec![
            (InterpolationMethod::Linear, "linear"),
            (InterpolationMethod::Akima, "akima"),
        ];

        for (method, description) in methods {
            let config = KneedleConfig::new(Direction::Increasing, Concavity::Clockwise)
                .with_interpolation(method);
            let kneedle = Kneedle::new(config).expect("Valid configuration");

            // Warm up
            let warm = std::cmp::min(100, size);
            let _ = kneedle.knee(&x[..warm], &y[..warm]);

            let start = Instant::now();
            let found = kneedle.knee(&x, &y).expect("Valid samples");
            let duration = start.elapsed();

            println!(
                "  {}: {:?} (knee at {:?})",
                description,
                duration,
                found.map(|k| k.x)
            );
        }

        println!();
    }

    // The natural spline solves a dense system, so keep it small
    println!("Natural cubic spline:");
    let x: Vec<f64> = (0..1_000).map(|i| i as f64).collect();
    let y: Vec<f64> = x.iter().map(|&v| (v + 1.0).ln()).collect();
    let config = KneedleConfig::new(Direction::Increasing, Concavity::Clockwise)
        .with_interpolation(InterpolationMethod::CubicSpline);
    let kneedle = Kneedle::new(config).unwrap();

    let start = Instant::now();
    let found = kneedle.knee(&x, &y).unwrap();
    println!("  1000 points: {:?} (knee at {:?})", start.elapsed(), found.map(|k| k.x));
}
