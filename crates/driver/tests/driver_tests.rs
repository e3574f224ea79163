use std::collections::BTreeSet;

use triangles_driver::{render, solve, IndexBase, InputError, Method, OutputFormat};
use triangles_geometry::OctreeConfig;

const PIERCING: &str = "3
0.1 0.2 0.3  2.1 0.2 0.3  0.1 2.2 0.3
1.1 1.2 -1.3  1.1 1.2 1.3  2.2 2.2 0.3
10 10 10  11 10 10  10 11 10
";

const DEGENERATE: &str = "2
0.1 0.2 0.3 0.1 0.2 0.3 0.1 0.2 0.3
-0.9 0.2 0.3 1.1 0.2 0.3 0.1 1.2 0.3
";

fn methods() -> Vec<Method> {
    vec![
        Method::default(),
        Method::BruteForce,
        Method::Octree(OctreeConfig::fine()),
        Method::Octree(OctreeConfig::sequential()),
    ]
}

#[test]
fn test_piercing_scene() {
    for method in methods() {
        assert_eq!(solve::<f64>(PIERCING, &method).unwrap(), BTreeSet::from([0, 1]));
        assert_eq!(solve::<f32>(PIERCING, &method).unwrap(), BTreeSet::from([0, 1]));
    }
}

#[test]
fn test_degenerate_scene() {
    for method in methods() {
        assert_eq!(solve::<f64>(DEGENERATE, &method).unwrap(), BTreeSet::from([0, 1]));
    }
}

#[test]
fn test_no_triangles() {
    assert!(solve::<f64>("0\n", &Method::default()).unwrap().is_empty());
}

#[test]
fn test_end_to_end_output() {
    let found = solve::<f64>(PIERCING, &Method::default()).unwrap();
    assert_eq!(render(&found, IndexBase::Zero, OutputFormat::Lines).unwrap(), "0\n1\n");
    assert_eq!(render(&found, IndexBase::One, OutputFormat::Lines).unwrap(), "1\n2\n");
    assert_eq!(render(&found, IndexBase::One, OutputFormat::Json).unwrap(), "[1,2]\n");
}

#[test]
fn test_input_errors_surface() {
    let err = solve::<f64>("2\n0 0 0 1 0 0 0 1 0\n", &Method::default()).unwrap_err();
    assert_eq!(err, InputError::Truncated { expected: 2, found: 1 });

    let err = solve::<f32>("1\n0 0 0 1 zero 0 0 1 0\n", &Method::BruteForce).unwrap_err();
    assert_eq!(
        err,
        InputError::InvalidNumber {
            token: "zero".into(),
            position: 6
        }
    );
}
