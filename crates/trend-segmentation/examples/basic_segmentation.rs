//! Basic trend segmentation example

use trend_core::{from_triples, CumulativeProcessedDataType, SegmentThresholds, Trend};
use trend_segmentation::{
    RecordingVisualizer, SegmentationVisualizer, TrendParameters, TrendSegmenter,
    TrendSegmenterBuilder,
};
use trend_smoothing::WindowType;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Trend Segmentation Examples ===\n");

    // Example 1: a short zig-zag with derived thresholds
    println!("1. Zig-zag with derived thresholds");
    let zigzag = from_triples(&[
        (0, 0.0, 1.0),
        (1000, 10.0, 1.0),
        (2000, 5.0, 1.0),
        (3000, 15.0, 1.0),
    ]);
    let result = TrendSegmenter::default().segment(&zigzag)?;
    println!("  {result}");
    for segment in &result.segments {
        println!("    {segment}");
    }

    // Example 2: an altitude profile with a bad fix in the middle
    println!("\n2. Altitude profile with one unusable fix");
    let altitude: Vec<(i64, f64, f32)> = (0..240)
        .map(|i| {
            let t = i as f64;
            let value = 420.0 + 35.0 * (t / 40.0).sin() + 8.0 * (t / 7.0).cos();
            let accuracy = if i == 120 { 0.0 } else { 4.0 };
            (i as i64 * 5000, value, accuracy)
        })
        .collect();
    let samples = from_triples(&altitude);

    let mut segmenter = TrendSegmenterBuilder::new(RecordingVisualizer::default())
        .window_type(WindowType::Hanning)
        .thresholds(SegmentThresholds::symmetric(10.0)?)
        .unit("m")
        .build()?;
    let result = segmenter.segment_recorded(&samples)?;

    println!(
        "  Kept {} of {} samples, window {}",
        result.filtered.len(),
        samples.len(),
        result.window_size.unwrap_or(0)
    );
    for trend in Trend::ALL {
        println!(
            "  {trend}: {} segments, {:.1} m total",
            result.count(trend),
            result.total_abs_delta(trend)
        );
    }
    if let Some(last) = result.smoothed.last() {
        if let Some(stat) = result
            .cumulative
            .get(last.index(), CumulativeProcessedDataType::All)
        {
            println!("  Net change at the last sample: {:.1} {}", stat.value, stat.unit);
        }
    }
    println!(
        "  Visualizer recorded {} extrema and {} segments",
        segmenter.visualizer().extrema.len(),
        segmenter.visualizer().segments.len()
    );
    let written = segmenter.visualizer().save_visualizations("basic_segmentation")?;
    println!("  Wrote {:?}", written);

    // Example 3: parameters from JSON
    println!("\n3. Parameters from JSON");
    let params = TrendParameters::from_json_str(
        r#"{"max_accuracy": 5.0, "window_size": 9, "std_dev_factor": 0.5}"#,
    )?;
    let result = TrendSegmenter::new(params)?.segment(&samples)?;
    println!("  {result}");

    Ok(())
}
