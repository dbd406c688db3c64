use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Duration;

use pretty_assertions::assert_eq;

use mapscore::sink::{ImageRecord, ScalarRecord};
use mapscore::{
    AveragePrecisions, ClassAp, DirectorySink, EpochLogs, EpochRunner, EvalParams, Evaluation,
    EvaluateCallback, EvaluateConfig, HookList, MetricsSink, RunConfig,
};

fn read_jsonl<T: serde::de::DeserializeOwned>(path: &Path) -> Vec<T> {
    let file = fs::File::open(path).unwrap();
    BufReader::new(file)
        .lines()
        .map(|line| serde_json::from_str(&line.unwrap()).unwrap())
        .collect()
}

#[test]
fn scalars_and_images_land_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::create(dir.path()).unwrap();

    sink.scalar("mAP", 0.42, 0).unwrap();
    sink.scalar("mAP", 0.57, 1).unwrap();
    let img = image::RgbaImage::from_pixel(8, 6, image::Rgba([0, 0, 0, 255]));
    sink.image("Precision Recall Curve Epoch 1", &img, 1).unwrap();
    sink.flush().unwrap();

    let scalars: Vec<ScalarRecord> = read_jsonl(&sink.scalars_path());
    let steps: Vec<(String, usize, f64)> = scalars.into_iter().map(|r| (r.tag, r.step, r.value)).collect();
    assert_eq!(steps, vec![("mAP".to_string(), 0, 0.42), ("mAP".to_string(), 1, 0.57)]);

    let images: Vec<ImageRecord> = read_jsonl(&sink.image_dir().join("images.jsonl"));
    assert_eq!(images.len(), 1);
    assert!(images[0].file.starts_with("Precision_Recall_Curve_Epoch_1-"));
    assert!(images[0].file.ends_with("_1.png"));
    assert_eq!((images[0].width, images[0].height), (8, 6));

    let png = image::open(sink.image_dir().join(&images[0].file)).unwrap().to_rgba8();
    assert_eq!(png, img);
}

#[test]
fn reopening_appends_to_history() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut sink = DirectorySink::create(dir.path()).unwrap();
        sink.scalar("mAP", 0.1, 0).unwrap();
        sink.flush().unwrap();
    }
    let mut sink = DirectorySink::create(dir.path()).unwrap();
    sink.scalar("mAP", 0.2, 1).unwrap();
    sink.flush().unwrap();

    let scalars: Vec<ScalarRecord> = read_jsonl(&sink.scalars_path());
    assert_eq!(scalars.len(), 2);
}

#[test]
fn runner_with_callback_writes_one_curve_per_epoch() {
    let dir = tempfile::tempdir().unwrap();
    let sink = DirectorySink::create(dir.path()).unwrap();

    // AP improves by a tenth every time the model is evaluated.
    let improving = |_: &Vec<String>, quality: &mut f64, _: &EvalParams| -> mapscore::Result<Evaluation> {
        *quality += 0.1;
        let mut aps = AveragePrecisions::new();
        aps.insert(0, ClassAp::new(*quality, 4));
        aps.insert(1, ClassAp::new(*quality / 2.0, 4));
        Ok(Evaluation {
            average_precisions: aps,
            elapsed: Duration::from_millis(1),
            recall: vec![0.25, 0.5, 0.75],
            precision: vec![1.0, 0.8, 0.6],
        })
    };
    let names = vec!["cat".to_string(), "dog".to_string()];
    let callback = EvaluateCallback::new(names, improving, EvaluateConfig::new(1))
        .unwrap()
        .with_sink(sink);

    let mut hooks: HookList<f64> = HookList::new();
    hooks.push(callback);

    let runner = EpochRunner::new(RunConfig::new(3));
    let mut quality = 0.0f64;
    let summaries = runner
        .run(&mut quality, |_, _| Ok(EpochLogs::new()), &mut hooks)
        .unwrap();

    assert_eq!(summaries.len(), 3);
    let maps: Vec<f64> = summaries.iter().map(|s| s.logs["mAP"]).collect();
    assert!(maps.windows(2).all(|w| w[1] > w[0]));
    // unweighted over two classes: (q + q/2) / 2 with q = 0.3 on the last epoch
    assert!((maps[2] - 0.225).abs() < 1e-9);

    let images: Vec<ImageRecord> = read_jsonl(&dir.path().join("pr_curve").join("images.jsonl"));
    let steps: Vec<usize> = images.iter().map(|r| r.step).collect();
    assert_eq!(steps, vec![0, 1, 2]);

    let scalars: Vec<ScalarRecord> = read_jsonl(&dir.path().join("scalars.jsonl"));
    let tags: Vec<&str> = scalars.iter().take(3).map(|r| r.tag.as_str()).collect();
    assert_eq!(tags, vec!["mAP", "AP_cat", "AP_dog"]);
}
