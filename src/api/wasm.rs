//! JS facade over `World`.
//!
//! Body ids cross the boundary as numbers (slotmap FFI encoding). The host
//! surface is a plain JS object with optional `attach(id, name, rect)`,
//! `detach(id)` and `updateRect(id, rect)` functions; they run mid-tick and
//! must not call back into the world. JS collision handlers are queued
//! during a tick and delivered right after it, when they are free to use
//! the whole API.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use js_sys::{Function, Object, Reflect};
use serde::Serialize;
use slotmap::{Key, KeyData};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::core::diagnostics::ConsoleDiagnostics;
use crate::core::rect::Rect;
use crate::domain::{BodyId, BodyKind, BodySpec, Collision, CollisionHandler, Velocity};
use crate::simulation::{NullSurface, RenderSurface, TickStats, World, WorldConfig};

type CollisionQueue = Rc<RefCell<Vec<(BodyId, BodyId)>>>;

fn js_id(id: BodyId) -> f64 {
    id.data().as_ffi() as f64
}

fn body_id(id: f64) -> BodyId {
    KeyData::from_ffi(id as u64).into()
}

fn to_js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn rect_to_js(rect: &Rect) -> JsValue {
    let obj = Object::new();
    let fields = [
        ("left", rect.left),
        ("top", rect.top),
        ("width", rect.width),
        ("height", rect.height),
    ];
    for (key, value) in fields {
        let _ = Reflect::set(&obj, &JsValue::from_str(key), &JsValue::from_f64(value as f64));
    }
    obj.into()
}

struct JsSurface {
    attach: Option<Function>,
    detach: Option<Function>,
    update_rect: Option<Function>,
}

impl JsSurface {
    fn from_host(host: &JsValue) -> Self {
        let method = |name: &str| {
            Reflect::get(host, &JsValue::from_str(name))
                .ok()
                .and_then(|f| f.dyn_into::<Function>().ok())
        };
        Self {
            attach: method("attach"),
            detach: method("detach"),
            update_rect: method("updateRect"),
        }
    }
}

impl RenderSurface for JsSurface {
    fn attach(&mut self, id: BodyId, name: &str, rect: &Rect) {
        if let Some(f) = &self.attach {
            let _ = f.call3(
                &JsValue::NULL,
                &JsValue::from_f64(js_id(id)),
                &JsValue::from_str(name),
                &rect_to_js(rect),
            );
        }
    }

    fn detach(&mut self, id: BodyId) {
        if let Some(f) = &self.detach {
            let _ = f.call1(&JsValue::NULL, &JsValue::from_f64(js_id(id)));
        }
    }

    fn update_rect(&mut self, id: BodyId, rect: &Rect) {
        if let Some(f) = &self.update_rect {
            let _ = f.call2(&JsValue::NULL, &JsValue::from_f64(js_id(id)), &rect_to_js(rect));
        }
    }
}

/// Records hits for delivery after the tick.
struct JsCollisionHandler {
    queue: CollisionQueue,
}

impl CollisionHandler for JsCollisionHandler {
    fn on_collide(&mut self, _world: &mut World, hit: &Collision) {
        self.queue.borrow_mut().push((hit.this, hit.other));
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BodySnapshot<'a> {
    id: f64,
    name: &'a str,
    kind: BodyKind,
    rect: Rect,
    velocity: Velocity,
    active: bool,
    grounded: bool,
}

#[derive(Clone)]
struct Shared {
    world: Rc<RefCell<World>>,
    pending: CollisionQueue,
    handlers: Rc<RefCell<HashMap<BodyId, Function>>>,
}

impl Shared {
    fn flush_collisions(&self) {
        let drained: Vec<(BodyId, BodyId)> = self.pending.borrow_mut().drain(..).collect();
        for (this, other) in drained {
            let callback = self.handlers.borrow().get(&this).cloned();
            let Some(callback) = callback else {
                continue;
            };
            let other_name = match self.world.borrow().body(other) {
                Some(body) => body.name().to_string(),
                None => continue,
            };
            let _ = callback.call2(
                &JsValue::NULL,
                &JsValue::from_f64(js_id(other)),
                &JsValue::from_str(&other_name),
            );
        }
    }
}

fn schedule_tick(shared: Shared) {
    let period = shared.world.borrow().frame_rate().min(i32::MAX as u32) as i32;
    let Some(window) = web_sys::window() else {
        let mut world = shared.world.borrow_mut();
        world.diagnostics().error("Error: no window to schedule ticks on");
        world.abandon_schedule();
        return;
    };

    let next = shared.clone();
    let callback = Closure::once_into_js(move || {
        let again = next.world.borrow_mut().run_scheduled_tick();
        next.flush_collisions();
        if again {
            schedule_tick(next);
        }
    });

    if window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref::<Function>(), period)
        .is_err()
    {
        shared.world.borrow_mut().abandon_schedule();
    }
}

#[wasm_bindgen]
pub struct ThingWorld {
    shared: Shared,
}

#[wasm_bindgen]
impl ThingWorld {
    /// Create a world from a JSON config (`{width, height, gravity, frameRate}`)
    /// and an optional host surface object.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: String, host: JsValue) -> Result<ThingWorld, JsValue> {
        let config = WorldConfig::from_json(&config_json).map_err(to_js_err)?;
        let surface: Box<dyn RenderSurface> = if host.is_undefined() || host.is_null() {
            Box::new(NullSurface)
        } else {
            Box::new(JsSurface::from_host(&host))
        };
        let world = World::with_host(config, surface, Box::new(ConsoleDiagnostics)).map_err(to_js_err)?;
        Ok(Self {
            shared: Shared {
                world: Rc::new(RefCell::new(world)),
                pending: Rc::new(RefCell::new(Vec::new())),
                handlers: Rc::new(RefCell::new(HashMap::new())),
            },
        })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.shared.world.borrow().width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.shared.world.borrow().height() }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.shared.world.borrow().frame() }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool { self.shared.world.borrow().is_running() }

    pub fn set_gravity(&self, gravity: i32) {
        self.shared.world.borrow_mut().set_gravity(gravity);
    }

    // === BODIES ===

    /// Register a body from its JSON spec. Returns the body id.
    pub fn add_body(&self, spec_json: String) -> Result<f64, JsValue> {
        let spec = BodySpec::from_json(&spec_json).map_err(to_js_err)?;
        let id = self.shared.world.borrow_mut().add_body(spec).map_err(to_js_err)?;
        Ok(js_id(id))
    }

    /// Register a body whose `onCollide(otherId, otherName)` is called after
    /// each tick it collided in.
    pub fn add_body_with_handler(&self, spec_json: String, on_collide: Function) -> Result<f64, JsValue> {
        let spec = BodySpec::from_json(&spec_json).map_err(to_js_err)?;
        let handler = JsCollisionHandler { queue: self.shared.pending.clone() };
        let id = self
            .shared
            .world
            .borrow_mut()
            .add_body_with_handler(spec, handler)
            .map_err(to_js_err)?;
        self.shared.handlers.borrow_mut().insert(id, on_collide);
        Ok(js_id(id))
    }

    pub fn remove_body(&self, id: f64) -> bool {
        let id = body_id(id);
        self.shared.handlers.borrow_mut().remove(&id);
        self.shared.world.borrow_mut().remove_body(id).is_some()
    }

    pub fn find_by_name(&self, name: String) -> Option<f64> {
        self.shared.world.borrow().find_by_name(&name).map(|b| js_id(b.id()))
    }

    pub fn body_count(&self) -> usize {
        self.shared.world.borrow().body_count()
    }

    pub fn jump_start(&self, id: f64, velocity: Option<i32>) {
        if let Some(body) = self.shared.world.borrow_mut().body_mut(body_id(id)) {
            body.jump_start(velocity);
        }
    }

    pub fn jump_end(&self, id: f64) {
        if let Some(body) = self.shared.world.borrow_mut().body_mut(body_id(id)) {
            body.jump_end();
        }
    }

    pub fn velocity_left(&self, id: f64) -> Option<i32> {
        self.shared.world.borrow().body(body_id(id)).map(|b| b.velocity().left)
    }

    pub fn velocity_top(&self, id: f64) -> Option<i32> {
        self.shared.world.borrow().body(body_id(id)).map(|b| b.velocity().top)
    }

    pub fn set_velocity_left(&self, id: f64, left: i32) -> bool {
        match self.shared.world.borrow_mut().body_mut(body_id(id)) {
            Some(body) => {
                body.velocity_mut().left = left;
                true
            }
            None => false,
        }
    }

    pub fn set_velocity_top(&self, id: f64, top: i32) -> bool {
        match self.shared.world.borrow_mut().body_mut(body_id(id)) {
            Some(body) => {
                body.velocity_mut().top = top;
                true
            }
            None => false,
        }
    }

    pub fn set_velocity(&self, id: f64, left: i32, top: i32) -> bool {
        match self.shared.world.borrow_mut().body_mut(body_id(id)) {
            Some(body) => {
                let v = body.velocity_mut();
                v.left = left;
                v.top = top;
                true
            }
            None => false,
        }
    }

    pub fn die(&self, id: f64) {
        if let Some(body) = self.shared.world.borrow_mut().body_mut(body_id(id)) {
            body.die();
        }
    }

    pub fn live(&self, id: f64) {
        if let Some(body) = self.shared.world.borrow_mut().body_mut(body_id(id)) {
            body.live();
        }
    }

    // === FRAME LOOP ===

    /// Run one frame now, outside the timer loop.
    pub fn tick(&self) {
        self.shared.world.borrow_mut().tick();
        self.shared.flush_collisions();
    }

    pub fn start(&self) {
        let schedule = self.shared.world.borrow_mut().start();
        if schedule {
            schedule_tick(self.shared.clone());
        }
    }

    pub fn stop(&self) {
        self.shared.world.borrow_mut().stop();
    }

    pub fn stats(&self) -> TickStats {
        self.shared.world.borrow().stats()
    }

    // === DEBUG ===

    pub fn trace_map(&self) -> String {
        self.shared.world.borrow().trace_map()
    }

    /// Every body in registry order as a JSON array.
    pub fn snapshot_json(&self) -> String {
        let world = self.shared.world.borrow();
        let bodies: Vec<BodySnapshot<'_>> = world
            .bodies()
            .map(|b| BodySnapshot {
                id: js_id(b.id()),
                name: b.name(),
                kind: b.kind(),
                rect: b.rect(),
                velocity: b.velocity(),
                active: b.is_active(),
                grounded: b.is_grounded(),
            })
            .collect();
        serde_json::to_string(&bodies).unwrap_or_else(|_| "[]".to_string())
    }
}
