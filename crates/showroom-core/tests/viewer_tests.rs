// Host-side tests for the viewer lifecycle, scene mounting and resolution tickets.

mod common;

use common::{triangle_glb, RecordingSurface};
use showroom_core::constants::hex_to_linear;
use showroom_core::model::brand_accent;
use showroom_core::scene::MountedKind;
use showroom_core::{
    AssetError, Brand, BrandFilter, CatalogError, CatalogStore, InputEvent, InteractionMode,
    Orbit, ResolveTicket, Showroom, ShowroomParams,
};
use std::f32::consts::PI;

fn showroom() -> Showroom<RecordingSurface> {
    Showroom::new(
        CatalogStore::builtin().unwrap(),
        RecordingSurface::default(),
        ShowroomParams::default(),
    )
}

fn mounted_color(s: &Showroom<RecordingSurface>) -> [f32; 3] {
    let handle = s.scene().mounted().expect("mounted model").handle;
    let mesh = s.scene().surface().mesh(handle).expect("live mesh");
    let c = mesh.vertices[0].color;
    [c[0], c[1], c[2]]
}

#[test]
fn nothing_focused_renders_ground_only() {
    let mut s = showroom();
    s.set_query("no such bike");
    s.tick(0.016, 1.5).unwrap();
    let frame = s.scene().surface().last_frame().unwrap();
    assert!(frame.model.is_none());
    assert!(frame.particles.is_none());
    assert!(s.scene().surface().lines.contains_key(&frame.ground.0));
    assert_eq!(frame.lights.lights.len(), 4);
}

#[test]
fn open_unknown_slug_is_record_not_found() {
    let mut s = showroom();
    assert!(matches!(
        s.open("does-not-exist"),
        Err(CatalogError::RecordNotFound(_))
    ));
    assert!(!s.session().is_open());
    assert_eq!(s.mode(), InteractionMode::Ambient);
}

#[test]
fn open_close_open_swaps_placeholders_and_resets_orientation() {
    let mut s = showroom();
    s.open("yamaha-mt-09").unwrap();
    assert_eq!(s.mode(), InteractionMode::Detail);
    let first = s.scene().mounted().unwrap().handle;
    assert_eq!(s.scene().mounted().unwrap().kind, MountedKind::Placeholder);
    assert_eq!(mounted_color(&s), hex_to_linear(brand_accent("Yamaha")));
    assert!(s.take_requests().is_empty());

    s.push_input(InputEvent::Drag { dx: 0.3, dy: 0.1 });
    s.push_input(InputEvent::Wheel(400.0));
    s.tick(0.016, 1.0).unwrap();
    assert_ne!(s.controller().state().orbit, Orbit::canonical());

    s.close();
    assert!(s.scene().surface().released.contains(&first));
    assert!(s.scene().surface().mesh(first).is_none());
    assert_eq!(s.mode(), InteractionMode::Ambient);

    s.open("kawasaki-ninja-zx-10r").unwrap();
    let second = s.scene().mounted().unwrap().handle;
    assert_ne!(first, second);
    assert_eq!(mounted_color(&s), hex_to_linear(brand_accent("Kawasaki")));
    assert_eq!(s.controller().state().orbit, Orbit::canonical());
    assert_eq!(s.mode(), InteractionMode::Detail);
}

#[test]
fn input_queued_before_reopening_is_discarded() {
    let mut s = showroom();
    s.open("yamaha-mt-09").unwrap();
    s.push_input(InputEvent::Drag { dx: 0.3, dy: -0.1 });
    s.push_input(InputEvent::Wheel(400.0));
    s.close();
    s.open("kawasaki-ninja-zx-10r").unwrap();
    s.tick(0.016, 1.0).unwrap();
    assert_eq!(s.controller().state().orbit, Orbit::canonical());
}

#[test]
fn ambient_drag_does_not_leak_into_detail() {
    let mut s = showroom();
    s.push_input(InputEvent::Drag { dx: 0.5, dy: 0.0 });
    s.push_input(InputEvent::Scroll(1.0));
    s.open("ducati-panigale-v4-s").unwrap();
    s.tick(0.016, 1.0).unwrap();
    assert_eq!(s.controller().state().orbit, Orbit::canonical());
    // scroll still lands, it only matters again once the viewer closes
    assert_eq!(s.controller().state().scroll_fraction, 1.0);
}

#[test]
fn detail_input_does_not_survive_close() {
    let mut s = showroom();
    s.open("yamaha-mt-09").unwrap();
    s.push_input(InputEvent::Drag { dx: 0.2, dy: 0.2 });
    s.close();
    s.tick(0.016, 1.0).unwrap();
    assert_eq!(s.controller().state().orbit, Orbit::canonical());
    assert_eq!(s.mode(), InteractionMode::Ambient);
}

#[test]
fn close_is_idempotent() {
    let mut s = showroom();
    s.close();
    s.open("bmw-s-1000-rr").unwrap();
    s.close();
    let released = s.scene().surface().released.len();
    s.close();
    assert_eq!(s.scene().surface().released.len(), released);
    assert!(s.scene().mounted().is_none());
    assert_eq!(s.session().record_id, None);
}

#[test]
fn resolution_after_close_never_mounts() {
    let mut s = showroom();
    s.open("yamaha-yzf-r1").unwrap();
    let requests = s.take_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/models/yamaha-r1.glb");
    assert!(s.is_resolving());

    s.close();
    assert!(!s.is_resolving());
    assert!(!s.complete_resolution(requests[0].ticket, Ok(triangle_glb())));
    assert!(s.scene().mounted().is_none());
    assert_eq!(s.scene().surface().live.len(), 1, "only the particle field stays");
}

#[test]
fn resolution_after_refocus_never_mounts() {
    let mut s = showroom();
    s.open("yamaha-yzf-r1").unwrap();
    let stale = s.take_requests().remove(0);
    s.close();
    s.open("honda-cbr1000rr-r").unwrap();
    let fresh = s.take_requests().remove(0);
    assert!(fresh.ticket > stale.ticket);

    assert!(!s.complete_resolution(stale.ticket, Ok(triangle_glb())));
    assert_eq!(s.scene().mounted().unwrap().kind, MountedKind::Placeholder);
    assert!(s.is_resolving());

    assert!(s.complete_resolution(fresh.ticket, Ok(triangle_glb())));
    assert_eq!(s.scene().mounted().unwrap().kind, MountedKind::Asset);
    assert!(!s.is_resolving());
    assert!(!s.complete_resolution(fresh.ticket, Ok(triangle_glb())));
}

#[test]
fn resolution_after_switching_records_never_mounts() {
    let mut s = showroom();
    s.open("yamaha-yzf-r1").unwrap();
    let stale = s.take_requests().remove(0);
    s.open("kawasaki-ninja-zx-10r").unwrap();
    assert!(s.take_requests().is_empty());
    assert!(!s.is_resolving());

    assert!(!s.complete_resolution(stale.ticket, Ok(triangle_glb())));
    let mounted = s.scene().mounted().unwrap();
    assert_eq!(mounted.kind, MountedKind::Placeholder);
    assert_eq!(mounted_color(&s), hex_to_linear(brand_accent("Kawasaki")));
    assert_eq!(
        s.scene().mounted().unwrap().record_id,
        s.focused_record().unwrap().id
    );
}

#[test]
fn resolution_after_scroll_refocus_never_mounts() {
    let mut s = showroom();
    s.push_input(InputEvent::Scroll(0.0));
    s.tick(0.016, 1.0).unwrap();
    assert_eq!(s.focused_record().unwrap().slug, "yamaha-yzf-r1");
    let stale = s.take_requests().remove(0);

    s.push_input(InputEvent::Scroll(0.5));
    s.tick(0.016, 1.0).unwrap();
    assert_eq!(s.focused_record().unwrap().slug, "kawasaki-ninja-zx-10r");
    assert!(s.take_requests().is_empty());

    assert!(!s.complete_resolution(stale.ticket, Ok(triangle_glb())));
    assert_eq!(s.scene().mounted().unwrap().kind, MountedKind::Placeholder);
    assert!(!s.is_resolving());
    assert!(!s.scene().resolver().has_failed("/models/yamaha-r1.glb"));
}

#[test]
fn resolved_asset_replaces_placeholder() {
    let mut s = showroom();
    s.open("yamaha-yzf-r1").unwrap();
    let placeholder = s.scene().mounted().unwrap().handle;
    let request = s.take_requests().remove(0);
    assert!(s.complete_resolution(request.ticket, Ok(triangle_glb())));
    let mounted = s.scene().mounted().unwrap();
    assert_ne!(mounted.handle, placeholder);
    assert!(s.scene().surface().released.contains(&placeholder));
    assert_eq!(s.scene().surface().mesh(mounted.handle).unwrap().vertices.len(), 3);
}

#[test]
fn failed_asset_keeps_placeholder_and_is_not_retried() {
    let mut s = showroom();
    s.open("yamaha-yzf-r1").unwrap();
    let request = s.take_requests().remove(0);
    let err = AssetError::unavailable(request.path.clone(), "HTTP 404");
    assert!(!s.complete_resolution(request.ticket, Err(err)));
    assert_eq!(s.scene().mounted().unwrap().kind, MountedKind::Placeholder);
    assert!(!s.is_resolving());

    s.close();
    s.open("yamaha-yzf-r1").unwrap();
    assert!(s.take_requests().is_empty());
    assert_eq!(s.scene().mounted().unwrap().kind, MountedKind::Placeholder);
}

#[test]
fn ambient_focus_follows_scroll_and_filter() {
    let mut s = showroom();
    s.push_input(InputEvent::Scroll(0.0));
    s.tick(0.016, 1.0).unwrap();
    assert_eq!(s.focused_record().unwrap().slug, "yamaha-yzf-r1");

    s.push_input(InputEvent::Scroll(1.0));
    s.tick(0.016, 1.0).unwrap();
    assert_eq!(s.focused_record().unwrap().slug, "bmw-s-1000-rr");
    let frame = s.scene().surface().last_frame().unwrap();
    assert!(frame.model.is_some());
    assert!(frame.particles.is_some());

    s.set_brand(BrandFilter::Only(Brand::Honda));
    s.tick(0.016, 1.0).unwrap();
    assert_eq!(s.focused_record().unwrap().slug, "honda-cbr1000rr-r");
    assert_eq!(mounted_color(&s), hex_to_linear(0xcc0000));
}

#[test]
fn ambient_scroll_spins_the_model() {
    let mut s = showroom();
    for (fraction, yaw) in [(0.0f32, 0.0f32), (0.5, PI), (1.0, 2.0 * PI)] {
        s.push_input(InputEvent::Scroll(fraction));
        s.tick(0.0, 1.0).unwrap();
        assert!((s.controller().yaw() - yaw).abs() < 1e-5);
        let frame = s.scene().surface().last_frame().unwrap();
        let transform = frame.model.unwrap().transform;
        let x_axis = transform.transform_vector3(glam::Vec3::X);
        assert!(x_axis.is_finite());
    }
}

#[test]
fn detail_camera_tracks_the_orbit() {
    let mut s = showroom();
    s.open("ducati-panigale-v4-s").unwrap();
    s.tick(0.016, 1.0).unwrap();
    let camera = &s.scene().surface().last_frame().unwrap().camera;
    assert!((camera.eye - glam::Vec3::new(4.0, 2.0, 4.0)).length() < 1e-3);
    assert!((camera.fovy_radians - 50f32.to_radians()).abs() < 1e-6);

    s.push_input(InputEvent::Wheel(1e6));
    s.tick(0.016, 1.0).unwrap();
    let eye = s.scene().surface().last_frame().unwrap().camera.eye;
    assert!((eye.length() - 10.0).abs() < 1e-3);

    s.reset_view();
    s.tick(0.016, 1.0).unwrap();
    assert_eq!(s.controller().state().orbit, Orbit::canonical());
}

#[test]
fn detail_focus_ignores_scroll() {
    let mut s = showroom();
    s.open("honda-cbr1000rr-r").unwrap();
    s.push_input(InputEvent::Scroll(1.0));
    s.tick(0.016, 1.0).unwrap();
    assert_eq!(s.focused_record().unwrap().slug, "honda-cbr1000rr-r");
}

#[test]
fn stale_ticket_numbers_are_ignored() {
    let mut s = showroom();
    s.open("honda-cbr1000rr-r").unwrap();
    assert!(!s.complete_resolution(ResolveTicket(999), Ok(triangle_glb())));
    assert!(s.is_resolving());
}
