use std::path::Path;

use anyhow::{bail, Result};
use tracing::info;

use pose_average::fusion::{FusionConfig, PoseFuser};
use pose_average::io::load_detections;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pose_average=info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        let prog = args.first().map(String::as_str).unwrap_or("pose-average");
        bail!("usage: {} <detections.csv> [fusion.yaml]", prog);
    }

    let config = match args.get(2) {
        Some(path) => {
            info!("Loading configuration from {}", path);
            FusionConfig::load(Path::new(path))?
        }
        None => FusionConfig::default(),
    };

    let detections = load_detections(&args[1])?;
    let fuser = PoseFuser::new(config);
    info!("Fusion config: {:?}", fuser.config());
    let fused = fuser.fuse_by_marker(&detections);

    for f in &fused {
        let t = f.pose.translation;
        let q = f.pose.rotation;
        let id = f.marker_id.map(|id| id.0.to_string()).unwrap_or_default();
        println!(
            "marker {}: n={} t=[{:.6}, {:.6}, {:.6}] q=[{:.6}, {:.6}, {:.6}, {:.6}]",
            id, f.num_samples, t.x, t.y, t.z, q.w, q.i, q.j, q.k
        );
    }

    info!("Fused {} detections into {} poses", detections.len(), fused.len());
    Ok(())
}
