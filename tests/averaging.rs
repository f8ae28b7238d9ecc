//! End-to-end checks of the public averaging API.

use std::io::Write;
use std::thread;

use approx::assert_relative_eq;
use nalgebra::{Quaternion, UnitQuaternion, Vector3};

use pose_average::fusion::{MarkerId, PoseFuser};
use pose_average::geometry::{canonicalize_sign, same_rotation};
use pose_average::io::load_detections;
use pose_average::{average_position, average_rotation, EmptyInputError, Samples};

fn about_z_deg(angle: f64) -> Quaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle.to_radians()).into_inner()
}

#[test]
fn test_empty_inputs_fail() {
    assert_eq!(
        average_rotation(&[]),
        Err(EmptyInputError::new(Samples::Rotations))
    );
    assert_eq!(
        average_position(&[]),
        Err(EmptyInputError::new(Samples::Positions))
    );
}

#[test]
fn test_identity_with_symmetric_z_rotations() {
    let identity = Quaternion::new(1.0, 0.0, 0.0, 0.0);
    let mean = average_rotation(&[identity, about_z_deg(10.0), about_z_deg(-10.0)]).unwrap();

    let canonical = canonicalize_sign(&mean);
    assert_relative_eq!(canonical.coords, identity.coords, epsilon = 1e-3);
}

#[test]
fn test_position_scenarios() {
    let mean = average_position(&[Vector3::zeros(), Vector3::new(2.0, 0.0, 0.0)]).unwrap();
    assert_relative_eq!(mean, Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-6);

    let mean = average_position(&[
        Vector3::new(1.0, 2.0, 3.0),
        Vector3::new(3.0, 2.0, 1.0),
        Vector3::new(2.0, 2.0, 2.0),
    ])
    .unwrap();
    assert_relative_eq!(mean, Vector3::new(2.0, 2.0, 2.0), epsilon = 1e-12);
}

#[test]
fn test_sign_flips_do_not_change_result() {
    let q = UnitQuaternion::from_euler_angles(-0.4, 0.9, 2.2).into_inner();

    let a = average_rotation(&[q]).unwrap();
    let b = average_rotation(&[-q]).unwrap();
    assert!(same_rotation(&a, &b, 1e-9));

    let mixed = average_rotation(&[q, -q, q]).unwrap();
    let plain = average_rotation(&[q, q, q]).unwrap();
    assert!(same_rotation(&mixed, &plain, 1e-9));
}

#[test]
fn test_concurrent_calls_agree() {
    let inputs: Vec<Quaternion<f64>> = (0..16).map(|i| about_z_deg(i as f64 - 7.5)).collect();
    let reference = average_rotation(&inputs).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let inputs = inputs.clone();
            thread::spawn(move || average_rotation(&inputs).unwrap())
        })
        .collect();

    for handle in handles {
        let mean = handle.join().unwrap();
        assert!(same_rotation(&mean, &reference, 1e-12));
    }
}

#[test]
fn test_fuse_detection_log() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "# id, px, py, pz, qw, qx, qy, qz\n\
         4, 1.0, 2.0, 3.0, 0.9961947, 0.0, 0.0, 0.0871557\n\
         4, 3.0, 2.0, 1.0, -0.9961947, 0.0, 0.0, 0.0871557\n\
         4, 2.0, 2.0, 2.0, 1.0, 0.0, 0.0, 0.0\n\
         9, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0\n"
    )
    .unwrap();

    let detections = load_detections(file.path()).unwrap();
    let fused = PoseFuser::default().fuse_by_marker(&detections);
    assert_eq!(fused.len(), 2);

    // ±10° about z (second row is the antipodal form of -10°) around identity
    let marker4 = &fused[0];
    assert_eq!(marker4.marker_id, Some(MarkerId::new(4)));
    assert_eq!(marker4.num_samples, 3);
    assert_relative_eq!(marker4.pose.translation, Vector3::new(2.0, 2.0, 2.0), epsilon = 1e-12);
    assert!(marker4.pose.rotation.angle() < 1e-3);
    assert!(marker4.pose.rotation.w > 0.0);

    let marker9 = &fused[1];
    assert_eq!(marker9.num_samples, 1);
    assert!(same_rotation(
        marker9.pose.rotation.quaternion(),
        &Quaternion::new(0.0, 1.0, 0.0, 0.0),
        1e-9
    ));
}
