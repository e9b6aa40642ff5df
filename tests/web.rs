//! Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use particle_field::ParticleField;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlCanvasElement, MouseEvent, MouseEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn set_size(container: &Element, width: u32, height: u32) {
    container
        .set_attribute(
            "style",
            &format!("position: relative; width: {}px; height: {}px;", width, height),
        )
        .unwrap();
}

fn make_container(id: &str, width: u32, height: u32) -> Element {
    let container = document().create_element("div").unwrap();
    container.set_id(id);
    set_size(&container, width, height);
    document().body().unwrap().append_child(&container).unwrap();
    container
}

fn canvas_in(container: &Element) -> HtmlCanvasElement {
    container
        .first_element_child()
        .expect("no canvas attached")
        .dyn_into::<HtmlCanvasElement>()
        .expect("child is not a canvas")
}

#[wasm_bindgen_test]
fn missing_container_is_inert() {
    let body = document().body().unwrap();
    let children = body.child_element_count();

    let mut field = ParticleField::initialize("no-such-container", None).unwrap();
    assert_eq!(field.particle_count(), 0);
    assert_eq!(field.surface_width(), 0);
    assert!(!field.is_running());
    assert_eq!(body.child_element_count(), children);

    field.tick();
    field.on_resize();
    field.on_pointer_move(10.0, 10.0);
    field.destroy();
    assert_eq!(body.child_element_count(), children);
}

#[wasm_bindgen_test]
fn attaches_canvas_with_configured_count() {
    let container = make_container("field-attach", 300, 200);
    let mut field =
        ParticleField::initialize("field-attach", Some(r#"{ "particleCount": 10 }"#.to_owned())).unwrap();

    assert_eq!(field.particle_count(), 10);
    assert!(field.is_running());
    let canvas = canvas_in(&container);
    assert_eq!(canvas.width(), 300);
    assert_eq!(canvas.height(), 200);
    assert_eq!(field.surface_width(), 300);
    assert_eq!(field.surface_height(), 200);

    field.destroy();
    assert_eq!(container.child_element_count(), 0);
    container.remove();
}

#[wasm_bindgen_test]
fn resize_follows_container() {
    let container = make_container("field-resize", 400, 300);
    let mut field =
        ParticleField::initialize("field-resize", Some(r#"{ "particleCount": 25 }"#.to_owned())).unwrap();

    set_size(&container, 150, 100);
    field.on_resize();
    assert_eq!(field.surface_width(), 150);
    assert_eq!(field.surface_height(), 100);
    assert_eq!(canvas_in(&container).width(), 150);
    assert_eq!(field.particle_count(), 25);

    for _ in 0..10 {
        field.tick();
    }
    assert_eq!(field.particle_count(), 25);

    field.destroy();
    container.remove();
}

fn make_offset_container(id: &str) -> Element {
    let container = make_container(id, 200, 100);
    container
        .set_attribute(
            "style",
            "position: absolute; left: 40px; top: 30px; width: 200px; height: 100px;",
        )
        .unwrap();
    container
}

#[wasm_bindgen_test]
fn pointer_is_relative_to_container() {
    let container = make_offset_container("field-pointer");
    let mut field = ParticleField::initialize("field-pointer", None).unwrap();
    assert_eq!(field.pointer(), vec![0.0, 0.0]);

    field.on_pointer_move(50.0, 40.0);
    assert_eq!(field.pointer(), vec![10.0, 10.0]);

    field.on_pointer_move(20.0, 10.0);
    assert_eq!(field.pointer(), vec![-20.0, -20.0]);

    field.destroy();
    container.remove();
}

#[wasm_bindgen_test]
#[allow(deprecated)]
fn mousemove_on_document_updates_pointer() {
    let container = make_offset_container("field-mousemove");
    let mut field = ParticleField::initialize("field-mousemove", None).unwrap();

    let mut init = MouseEventInit::new();
    init.client_x(140).client_y(80);
    let event = MouseEvent::new_with_mouse_event_init_dict("mousemove", &init).unwrap();
    document().dispatch_event(&event).unwrap();
    assert_eq!(field.pointer(), vec![100.0, 50.0]);

    // the detached listener must not fire into a dropped closure
    field.destroy();
    document().dispatch_event(&event).unwrap();
    assert_eq!(field.pointer(), vec![0.0, 0.0]);

    container.remove();
}

#[wasm_bindgen_test]
fn destroy_stops_everything() {
    let container = make_container("field-destroy", 200, 200);
    let mut field = ParticleField::initialize("field-destroy", None).unwrap();
    field.on_pointer_move(50.0, 50.0);
    field.tick();

    field.destroy();
    assert!(!field.is_running());
    assert_eq!(field.particle_count(), 0);

    field.tick();
    field.tick();
    field.on_resize();
    assert!(!field.is_running());

    field.destroy();
    container.remove();
}

#[wasm_bindgen_test]
fn invalid_config_is_rejected_before_touching_the_dom() {
    let container = make_container("field-invalid", 200, 200);

    assert!(ParticleField::initialize("field-invalid", Some(r#"{ "colors": [] }"#.to_owned())).is_err());
    assert!(ParticleField::initialize("field-invalid", Some("not json".to_owned())).is_err());
    assert!(ParticleField::initialize(
        "field-invalid",
        Some(r#"{ "opacity": { "min": 0.9, "max": 0.1 } }"#.to_owned())
    )
    .is_err());
    assert_eq!(container.child_element_count(), 0);

    container.remove();
}

#[wasm_bindgen_test]
fn narrow_containers_get_fewer_particles() {
    let container = make_container("field-density", 300, 100);
    let mut field = ParticleField::initialize(
        "field-density",
        Some(r#"{ "particleCount": 50, "widthPerParticle": 30 }"#.to_owned()),
    )
    .unwrap();
    assert_eq!(field.particle_count(), 10);

    field.destroy();
    container.remove();
}
