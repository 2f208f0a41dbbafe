use super::*;

fn props(x: f64, visible: bool) -> ProxyProps {
    ProxyProps {
        position: Vec3::new(x, 0.0, 0.0),
        scale: Vec3::ONE,
        visible,
    }
}

#[test]
fn same_key_reuses_object_across_registrations() {
    let reg = ProxyRegistry::new();
    let first = reg.register("box", props(0.0, true), RegisterOpts::persistent("box"));
    let object = first.object();
    drop(first);

    assert_eq!(reg.len(), 1);
    let second = reg.register("box", props(5.0, false), RegisterOpts::persistent("box"));
    assert_eq!(second.object(), object);
    assert_eq!(reg.objects_created(), 1);
    assert_eq!(reg.get("box").unwrap().props, props(5.0, false));
}

#[test]
fn identity_is_independent_of_id_and_props() {
    let reg = ProxyRegistry::new();
    let a = reg.register("page-a", props(1.0, true), RegisterOpts::persistent("hero"));
    let b = reg.register("page-b", props(2.0, false), RegisterOpts::persistent("hero"));
    assert_eq!(a.object(), b.object());
    assert_eq!(reg.get("hero").unwrap().id, "page-b");
}

#[test]
fn key_defaults_to_id() {
    let reg = ProxyRegistry::new();
    let h = reg.register("card", ProxyProps::default(), RegisterOpts::default());
    assert_eq!(h.key(), "card");
    assert!(reg.get("card").is_some());
}

#[test]
fn update_writes_props_in_place() {
    let reg = ProxyRegistry::new();
    let h = reg.register("box", props(0.0, false), RegisterOpts::persistent("box"));
    h.update(props(3.0, true));
    h.update(props(4.0, true));
    let s = reg.get("box").unwrap();
    assert_eq!(s.props, props(4.0, true));
    assert_eq!(s.updates, 2);
    assert_eq!(reg.visible().len(), 1);
}

#[test]
fn persistent_registration_survives_handle_drop() {
    let reg = ProxyRegistry::new();
    drop(reg.register("box", props(0.0, true), RegisterOpts::persistent("box")));
    assert!(reg.get("box").is_some());
}

#[test]
fn non_persistent_registration_is_disposed_with_last_handle() {
    let reg = ProxyRegistry::new();
    let a = reg.register("tmp", props(0.0, true), RegisterOpts::default());
    let b = reg.register("tmp", props(1.0, true), RegisterOpts::default());
    drop(a);
    assert!(reg.get("tmp").is_some());
    drop(b);
    assert!(reg.get("tmp").is_none());
    assert!(reg.is_empty());
}

#[test]
fn stale_handle_cannot_touch_a_newer_object() {
    let reg = ProxyRegistry::new();
    let old = reg.register("tmp", props(0.0, true), RegisterOpts::default());
    let old_object = old.object();
    // Simulate disposal and re-creation under the same key.
    let stale = ProxyHandle {
        registry: reg.clone(),
        key: "tmp".to_owned(),
        object: old_object,
    };
    drop(old);
    let fresh = reg.register("tmp", props(9.0, false), RegisterOpts::default());
    assert_ne!(fresh.object(), old_object);

    stale.update(props(1.0, true));
    assert_eq!(reg.get("tmp").unwrap().props, props(9.0, false));
    drop(stale);
    assert!(reg.get("tmp").is_some());
}
