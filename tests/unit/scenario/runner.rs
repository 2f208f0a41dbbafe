use super::*;
use crate::foundation::core::{ClientRect, Smoothing, ViewportDef};
use crate::scenario::model::PageDef;
use crate::visibility::tracker::VisibilityOpts;

fn page(name: &str, left: f64, top: f64, frames: u32) -> PageDef {
    PageDef {
        name: name.to_owned(),
        rect: ClientRect {
            left,
            top,
            width: 80.0,
            height: 80.0,
        },
        frames,
        attach_after: 0,
        mount: MountOrder::UnmountFirst,
        id: None,
    }
}

fn scenario(pages: Vec<PageDef>) -> Scenario {
    Scenario {
        viewport: ViewportDef {
            width: 1000.0,
            height: 800.0,
        },
        id: "hero".to_owned(),
        smoothing: Smoothing::DEFAULT,
        visibility: VisibilityOpts::default(),
        pages,
    }
}

#[test]
fn proxy_object_survives_navigation() {
    let s = scenario(vec![page("a", 100.0, 200.0, 30), page("b", 700.0, 500.0, 30)]);
    let records = run_scenario(&s).unwrap();
    assert_eq!(records.len(), 60);
    assert!(records.iter().all(|r| r.object == records[0].object));
    assert!(records.iter().all(|r| r.key == "hero"));
}

#[test]
fn position_is_continuous_across_navigation() {
    let s = scenario(vec![page("a", 100.0, 200.0, 20), page("b", 700.0, 500.0, 20)]);
    let records = run_scenario(&s).unwrap();
    let last_a = &records[19];
    let first_b = &records[20];
    let target_b = Vec3::new(240.0, -140.0, 0.0);
    assert_eq!(first_b.position, last_a.position.lerp(target_b, 0.1));
}

#[test]
fn first_frame_matches_documented_sample() {
    let mut s = scenario(vec![page("a", 100.0, 200.0, 1)]);
    s.smoothing = Smoothing::new(1.0).unwrap();
    let records = run_scenario(&s).unwrap();
    assert_eq!(records[0].position, Vec3::new(-360.0, 160.0, 0.0));
    assert_eq!(records[0].scale, Vec3::new(80.0, 80.0, 1.0));
    assert!(records[0].visible);
    assert_eq!(records[0].redraws, 1);
}

#[test]
fn late_attach_holds_position() {
    let mut a = page("a", 100.0, 200.0, 6);
    a.attach_after = 3;
    let records = run_scenario(&scenario(vec![a])).unwrap();
    for r in &records[..3] {
        assert_eq!(r.position, Vec3::ZERO);
        assert!(!r.visible);
        assert!(!r.anchored);
        assert_eq!(r.redraws, 0);
    }
    assert!(records[3].anchored);
    assert_ne!(records[3].position, Vec3::ZERO);
}

#[test]
fn late_attach_after_navigation_holds_position_and_visibility() {
    let mut b = page("b", 700.0, 500.0, 5);
    b.attach_after = 2;
    let records = run_scenario(&scenario(vec![page("a", 100.0, 200.0, 4), b])).unwrap();
    let last_a = &records[3];
    assert!(last_a.visible);
    for r in &records[4..6] {
        assert!(!r.anchored);
        assert_eq!(r.position, last_a.position);
        assert_eq!(r.scale, last_a.scale);
        assert!(r.visible);
    }
    assert!(records[6].anchored);
    assert!(records[6].visible);
}

#[test]
fn mount_first_navigation_keeps_animating() {
    let mut b = page("b", 700.0, 500.0, 10);
    b.mount = MountOrder::MountFirst;
    let records = run_scenario(&scenario(vec![page("a", 100.0, 200.0, 5), b])).unwrap();
    assert!(records[5..].iter().all(|r| r.redraws == 1));
    assert_ne!(records[14].position, records[4].position);
}

#[test]
fn distinct_ids_get_distinct_objects() {
    let mut b = page("b", 700.0, 500.0, 2);
    b.id = Some("other".to_owned());
    let records = run_scenario(&scenario(vec![page("a", 100.0, 200.0, 2), b])).unwrap();
    assert_ne!(records[0].object, records[3].object);
    assert_eq!(records[3].key, "other");
}
