//! Loader for marker detection logs.
//!
//! CSV format (no header, `#` starts a comment line):
//!
//! ```text
//! marker_id, p_x, p_y, p_z, q_w, q_x, q_y, q_z
//! ```
//!
//! Quaternions are w-first. Rows with fewer than 8 fields are skipped.

use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use nalgebra::{Quaternion, Vector3};
use tracing::{info, warn};

use crate::fusion::{MarkerDetection, MarkerId};

const NUM_FIELDS: usize = 8;

pub fn load_detections<P: AsRef<Path>>(csv_path: P) -> Result<Vec<MarkerDetection>> {
    let csv_path = csv_path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open {}", csv_path.display()))?;

    let mut entries = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec.with_context(|| format!("Bad record in {}", csv_path.display()))?;
        if rec.len() < NUM_FIELDS {
            warn!(
                "Skipping row {} of {}: expected {} fields, got {}",
                line + 1,
                csv_path.display(),
                NUM_FIELDS,
                rec.len()
            );
            continue;
        }

        let parse = |idx: usize| -> Result<f64> {
            rec[idx].parse().with_context(|| {
                format!(
                    "Invalid number {:?} in row {} of {}",
                    &rec[idx],
                    line + 1,
                    csv_path.display()
                )
            })
        };

        let marker_id: u32 = rec[0].parse().with_context(|| {
            format!(
                "Invalid marker id {:?} in row {} of {}",
                &rec[0],
                line + 1,
                csv_path.display()
            )
        })?;

        let translation = Vector3::new(parse(1)?, parse(2)?, parse(3)?);

        // Kept as written so the fuser can report non-unit inputs.
        let rotation = Quaternion::new(parse(4)?, parse(5)?, parse(6)?, parse(7)?);

        entries.push(MarkerDetection {
            marker_id: MarkerId::new(marker_id),
            rotation,
            translation,
        });
    }

    info!(
        "Loaded {} detections from {}",
        entries.len(),
        csv_path.display()
    );
    Ok(entries)
}
