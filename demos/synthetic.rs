use std::sync::mpsc;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing_subscriber::EnvFilter;

use mapscore::{
    AveragePrecisions, ClassAp, DirectorySink, EpochLogs, EpochRunner, EvalParams, Evaluation,
    EvaluateCallback, EvaluateConfig, HookList, RunConfig,
};

/// Pretend detector whose quality climbs towards 1.0 as it "trains".
struct ToyDetector {
    quality: f64,
}

fn toy_evaluate(names: &Vec<String>, model: &mut ToyDetector, params: &EvalParams) -> mapscore::Result<Evaluation> {
    let start = Instant::now();
    let mut rng = rand::thread_rng();

    let mut aps = AveragePrecisions::new();
    for label in 0..names.len() {
        let noise: f64 = rng.gen_range(-0.05..0.05);
        let ap = (model.quality + noise).clamp(0.0, 1.0);
        aps.insert(label, ClassAp::new(ap, rng.gen_range(5..50)));
    }

    // Precision falls off as recall rises; the slope shrinks as quality improves.
    let n = params.max_detections.min(50);
    let recall: Vec<f64> = (1..=n).map(|i| i as f64 / n as f64 * model.quality).collect();
    let precision: Vec<f64> = recall.iter()
        .map(|r| (1.0 - r * (1.0 - model.quality) + rng.gen_range(-0.05..0.05)).clamp(0.0, 1.0))
        .collect();

    Ok(Evaluation {
        average_precisions: aps,
        elapsed: start.elapsed(),
        recall,
        precision,
    })
}

fn main() -> mapscore::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let log_dir = std::env::temp_dir().join("mapscore-synthetic");
    let names = vec!["car".to_string(), "person".to_string(), "bicycle".to_string()];

    let callback = EvaluateCallback::new(names, toy_evaluate, EvaluateConfig::default())?
        .with_sink(DirectorySink::create(&log_dir)?);

    let mut hooks: HookList<ToyDetector> = HookList::new();
    hooks.push(callback);

    let (tx, rx) = mpsc::channel();
    let runner = EpochRunner::new(RunConfig::new(5).with_progress(tx));

    let mut model = ToyDetector { quality: 0.2 };
    runner.run(
        &mut model,
        |model, epoch| {
            std::thread::sleep(Duration::from_millis(10));
            model.quality = (model.quality + 0.15).min(0.95);
            let mut logs = EpochLogs::new();
            logs.insert("loss".to_string(), 1.0 / (epoch + 1) as f64);
            Ok(logs)
        },
        &mut hooks,
    )?;

    for summary in rx.try_iter() {
        println!(
            "Epoch {}/{}: loss = {:.4}, mAP = {:.4} ({} ms)",
            summary.epoch + 1,
            summary.total_epochs,
            summary.logs["loss"],
            summary.logs["mAP"],
            summary.elapsed_ms,
        );
    }
    println!("Summaries written to {}", log_dir.display());
    Ok(())
}
