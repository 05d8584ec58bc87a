use super::*;

#[test]
fn new_rejects_zero_scale() {
    assert!(RasterConfig::new(0).is_err());
    let cfg = RasterConfig::new(3).unwrap();
    assert_eq!(cfg.scale(), 3);
    assert_eq!(cfg.border(), QUIET_ZONE_MODULES);
}

#[test]
fn requested_scale_falls_back_when_not_positive() {
    assert_eq!(RasterConfig::from_requested_scale(0), RasterConfig::default());
    assert_eq!(RasterConfig::from_requested_scale(-7), RasterConfig::default());
    assert_eq!(
        RasterConfig::from_requested_scale(i64::from(u32::MAX) + 1),
        RasterConfig::default()
    );
    assert_eq!(RasterConfig::from_requested_scale(2).scale(), 2);
}

#[test]
fn scale_arg_reads_leading_digits() {
    assert_eq!(RasterConfig::from_scale_arg("5abc").scale(), 5);
    assert_eq!(RasterConfig::from_scale_arg("  12").scale(), 12);
    assert_eq!(RasterConfig::from_scale_arg("+3").scale(), 3);
    assert_eq!(RasterConfig::from_scale_arg("7.9").scale(), 7);
}

#[test]
fn scale_arg_falls_back_without_a_positive_prefix() {
    for raw in ["abc", "", "0", "-4", "-", "99999999999", "99999999999999999999999"] {
        assert_eq!(
            RasterConfig::from_scale_arg(raw),
            RasterConfig::default(),
            "{raw:?}"
        );
    }
}

#[test]
fn leading_integer_saturates() {
    assert_eq!(leading_integer("-12x"), -12);
    assert_eq!(leading_integer("x12"), 0);
    assert_eq!(leading_integer("99999999999999999999999"), i64::MAX);
    assert_eq!(leading_integer("-99999999999999999999999"), -i64::MAX);
}

#[test]
fn default_matches_policy_constants() {
    let cfg = RasterConfig::default();
    assert_eq!(cfg.scale(), DEFAULT_SCALE);
    assert_eq!(cfg.border(), 4);
}

#[test]
fn geometry_adds_border_on_both_sides() {
    let g = OutputGeometry::new(21, &RasterConfig::new(10).unwrap()).unwrap();
    assert_eq!(g.pixels, (21 + 8) * 10);
    assert_eq!(g.width(), g.height());
    assert_eq!(g.row_bytes(), 290 * 3);

    let g = OutputGeometry::new(1, &RasterConfig::new(1).unwrap()).unwrap();
    assert_eq!(g.pixels, 9);
}

#[test]
fn geometry_without_border() {
    let cfg = RasterConfig::with_border(2, 0).unwrap();
    let g = OutputGeometry::new(5, &cfg).unwrap();
    assert_eq!(g.pixels, 10);
}

#[test]
fn geometry_rejects_empty_grid_and_overflow() {
    let cfg = RasterConfig::default();
    assert!(OutputGeometry::new(0, &cfg).is_err());

    let huge = RasterConfig::new(u32::MAX).unwrap();
    let err = OutputGeometry::new(21, &huge).unwrap_err();
    assert!(err.to_string().contains("overflows"));
}
