//! Example usage of the kneedle crate

use kneedle::{
    calculate_knee_point, knee, Concavity, Direction, InterpolationMethod, Kneedle, KneedleConfig,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Kneedle Examples ===\n");

    // Example 1: Exponential growth
    let x: Vec<f64> = (0..100).map(|i| i as f64).collect();
    let y: Vec<f64> = (0..100).map(|i| 1.05_f64.powi(i)).collect();
    println!("1. y = 1.05^x (increasing, counterclockwise):");
    let found = knee(&x, &y, Direction::Increasing, Concavity::Counterclockwise);
    println!("   knee at x = {:?}", found);

    // Example 2: The same curve reversed
    let mut y_rev = y.clone();
    y_rev.reverse();
    println!("\n2. Reversed (decreasing, counterclockwise):");
    let found = knee(&x, &y_rev, Direction::Decreasing, Concavity::Counterclockwise);
    println!("   knee at x = {:?}", found);

    // Example 3: Clustering inertia for k = 1..=10
    let k: Vec<f64> = (1..=10).map(|i| i as f64).collect();
    let inertia = vec![1000.0, 520.0, 280.0, 170.0, 140.0, 120.0, 108.0, 99.0, 92.0, 87.0];
    println!("\n3. Elbow of a clustering inertia curve:");
    for sensitivity in [0.5, 1.0, 3.0] {
        let found = calculate_knee_point(
            &k,
            &inertia,
            Direction::Decreasing,
            Concavity::Counterclockwise,
            sensitivity,
            false,
        );
        println!("   sensitivity {:.1}: k = {:?}", sensitivity, found);
    }

    // Example 4: Saturating curve with a full analysis
    let x: Vec<f64> = (1..=10).map(|i| i as f64).collect();
    let y = vec![1.0, 5.0, 7.0, 8.0, 8.5, 8.8, 9.0, 9.1, 9.15, 9.2];
    let config = KneedleConfig::new(Direction::Increasing, Concavity::Clockwise)
        .with_interpolation(InterpolationMethod::Linear);
    let analysis = Kneedle::new(config)?.analyze(&x, &y)?;
    println!("\n4. Saturating curve (increasing, clockwise, linear resampling):");
    println!("   difference curve:");
    print_series(analysis.y_diff());
    println!("   maxima: {:?}, thresholds: {:?}", analysis.maxima(), analysis.thresholds());
    println!("   knee: {:?}", analysis.knee());

    Ok(())
}

fn print_series(series: &[f64]) {
    print!("  ");
    for (i, &value) in series.iter().enumerate() {
        print!("{:7.3}", value);
        if i > 0 && (i + 1) % 8 == 0 {
            println!();
            print!("  ");
        }
    }
    println!();
}
