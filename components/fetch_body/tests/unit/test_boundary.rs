use fetch_body::generate_boundary;
use std::collections::HashSet;

#[test]
fn boundary_has_expected_shape() {
    let boundary = generate_boundary();
    assert!(boundary.starts_with("formdata-"));
    assert_eq!(boundary.len(), "formdata-".len() + 16);
}

#[test]
fn many_boundaries_are_unique() {
    let boundaries: HashSet<String> = (0..100).map(|_| generate_boundary()).collect();
    assert_eq!(boundaries.len(), 100);
}
