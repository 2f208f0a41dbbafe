use super::*;

#[test]
fn lerp_moves_a_fraction_of_the_gap() {
    let a = Vec3::ZERO;
    let t = Vec3::new(100.0, -50.0, 0.0);
    let b = a.lerp(t, 0.1);
    assert_eq!(b, Vec3::new(10.0, -5.0, 0.0));
    let c = b.lerp(t, 0.1);
    assert!((c.x - 19.0).abs() < 1e-9);
    assert!((c.y + 9.5).abs() < 1e-9);
}

#[test]
fn lerp_with_full_weight_arrives() {
    let t = Vec3::new(3.0, 4.0, 5.0);
    assert_eq!(Vec3::ONE.lerp(t, 1.0), t);
}

#[test]
fn smoothing_rejects_out_of_range() {
    assert!(Smoothing::new(0.0).is_err());
    assert!(Smoothing::new(-0.5).is_err());
    assert!(Smoothing::new(1.5).is_err());
    assert!(Smoothing::new(f64::NAN).is_err());
    assert_eq!(Smoothing::new(1.0).unwrap().get(), 1.0);
    assert_eq!(Smoothing::default().get(), 0.1);
}

#[test]
fn smoothing_deserialize_validates() {
    let ok: Smoothing = serde_json::from_str("0.25").unwrap();
    assert_eq!(ok.get(), 0.25);
    assert!(serde_json::from_str::<Smoothing>("2.0").is_err());
}

#[test]
fn client_rect_converts_to_kurbo_rect() {
    let r = ClientRect {
        left: 100.0,
        top: 200.0,
        width: 80.0,
        height: 40.0,
    };
    let k = r.to_rect();
    assert_eq!(k, Rect::new(100.0, 200.0, 180.0, 240.0));
    assert_eq!(ClientRect::from(k), r);
}

#[test]
fn viewport_def_requires_positive_size() {
    assert!(
        ViewportDef {
            width: 0.0,
            height: 10.0
        }
        .validate()
        .is_err()
    );
    let v = ViewportDef {
        width: 1000.0,
        height: 800.0,
    }
    .validate()
    .unwrap();
    assert_eq!(v.size(), Size::new(1000.0, 800.0));
}
