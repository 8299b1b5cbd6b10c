use super::vec2d::Vec2D;

#[test]
fn vector_components_round_trip() {
    let v = Vec2D::new(3.5, -1.25);
    assert_eq!(v.x(), 3.5);
    assert_eq!(v.y(), -1.25);
}

#[test]
fn vector_addition_is_componentwise() {
    let v = Vec2D::new(1.0, 2.0) + Vec2D::new(0.5, -2.0);
    assert_eq!(v, Vec2D::new(1.5, 0.0));
}

#[test]
fn zero_vector_is_the_additive_identity() {
    let v = Vec2D::new(4.0, 7.0);
    assert_eq!(v + Vec2D::zero(), v);
}

#[test]
fn vector_display_matches_tuple_form() {
    assert_eq!(Vec2D::new(1.5, 2.0).to_string(), "(1.5, 2)");
}
