#![cfg(target_arch = "wasm32")]

use js_sys::{Function, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use thingworld_engine::ThingWorld;

const CONFIG: &str = r#"{"width":100,"height":100,"gravity":1,"frameRate":16}"#;

#[wasm_bindgen_test]
fn rejects_config_without_frame_rate() {
    let result = ThingWorld::new(r#"{"width":10,"height":10}"#.to_string(), JsValue::UNDEFINED);
    assert!(result.is_err());
}

#[wasm_bindgen_test]
fn add_tick_and_snapshot() {
    let world = ThingWorld::new(CONFIG.to_string(), JsValue::UNDEFINED).unwrap();
    world
        .add_body(r#"{"name":"floor","type":"non-animate","left":0,"top":95,"width":100,"height":5}"#.to_string())
        .unwrap();
    let player = world
        .add_body(r#"{"name":"player","left":10,"top":0,"width":10,"height":10}"#.to_string())
        .unwrap();
    assert_eq!(world.find_by_name("player".to_string()), Some(player));

    world.tick();
    assert_eq!(world.frame(), 1);

    let snapshot: serde_json::Value = serde_json::from_str(&world.snapshot_json()).unwrap();
    assert_eq!(snapshot[1]["name"], "player");
    assert_eq!(snapshot[1]["rect"]["top"], 1);
}

#[wasm_bindgen_test]
fn duplicate_name_is_an_error() {
    let world = ThingWorld::new(CONFIG.to_string(), JsValue::UNDEFINED).unwrap();
    let spec = r#"{"name":"a","left":0,"top":0,"width":1,"height":1}"#;
    assert!(world.add_body(spec.to_string()).is_ok());
    assert!(world.add_body(spec.to_string()).is_err());
    assert_eq!(world.body_count(), 1);
}

#[wasm_bindgen_test]
fn js_handler_runs_after_tick() {
    let world = ThingWorld::new(CONFIG.to_string(), JsValue::UNDEFINED).unwrap();
    world
        .add_body(r#"{"name":"rock","type":"non-animate","left":0,"top":0,"width":20,"height":20}"#.to_string())
        .unwrap();
    let handler = Function::new_with_args("id, name", "globalThis.__lastHit = name;");
    world
        .add_body_with_handler(r#"{"name":"a","left":5,"top":5,"width":5,"height":5}"#.to_string(), handler)
        .unwrap();

    world.tick();
    let last = Reflect::get(&js_sys::global(), &JsValue::from_str("__lastHit")).unwrap();
    assert_eq!(last.as_string().as_deref(), Some("rock"));
}

#[wasm_bindgen_test]
fn surface_receives_attach() {
    let host = js_sys::Object::new();
    let attach = Function::new_with_args("id, name, rect", "globalThis.__attached = name + ':' + rect.width;");
    Reflect::set(&host, &JsValue::from_str("attach"), &attach).unwrap();

    let world = ThingWorld::new(CONFIG.to_string(), host.into()).unwrap();
    world
        .add_body(r#"{"name":"box","left":0,"top":0,"width":7,"height":7}"#.to_string())
        .unwrap();
    let attached = Reflect::get(&js_sys::global(), &JsValue::from_str("__attached")).unwrap();
    assert_eq!(attached.as_string().as_deref(), Some("box:7"));
}

#[wasm_bindgen_test]
fn per_axis_velocity() {
    let world = ThingWorld::new(CONFIG.to_string(), JsValue::UNDEFINED).unwrap();
    let id = world
        .add_body(
            r#"{"name":"walker","left":0,"top":0,"width":5,"height":5,
                "velocity":{"left":2,"top":0,"maxLeft":0,"maxTop":0}}"#
                .to_string(),
        )
        .unwrap();
    assert_eq!(world.velocity_left(id), Some(2));

    assert!(world.set_velocity_left(id, -3));
    assert_eq!(world.velocity_left(id), Some(-3));
    assert_eq!(world.velocity_top(id), Some(0));

    assert!(world.set_velocity_top(id, 4));
    assert_eq!(world.velocity_top(id), Some(4));
    assert_eq!(world.velocity_left(id), Some(-3));
}
