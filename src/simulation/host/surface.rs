//! Render surface - the host's view of the bodies.
//!
//! The core never draws. It tells the host when a body appears, disappears
//! or changes rectangle, and the host mirrors that in whatever UI it owns.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::rect::Rect;
use crate::domain::BodyId;

pub trait RenderSurface {
    fn attach(&mut self, id: BodyId, name: &str, rect: &Rect);
    fn detach(&mut self, id: BodyId);
    fn update_rect(&mut self, id: BodyId, rect: &Rect);
}

/// Headless host.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn attach(&mut self, _id: BodyId, _name: &str, _rect: &Rect) {}
    fn detach(&mut self, _id: BodyId) {}
    fn update_rect(&mut self, _id: BodyId, _rect: &Rect) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Attach(BodyId, String, Rect),
    Detach(BodyId),
    Update(BodyId, Rect),
}

/// Keeps every notification. Clones share the same event log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    events: Rc<RefCell<Vec<SurfaceEvent>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.borrow().clone()
    }

    /// Last rectangle the host was told about for `id`.
    pub fn last_rect(&self, id: BodyId) -> Option<Rect> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            SurfaceEvent::Attach(i, _, r) | SurfaceEvent::Update(i, r) if *i == id => Some(*r),
            _ => None,
        })
    }

    pub fn is_attached(&self, id: BodyId) -> bool {
        self.events.borrow().iter().rev().find_map(|e| match e {
            SurfaceEvent::Attach(i, _, _) if *i == id => Some(true),
            SurfaceEvent::Detach(i) if *i == id => Some(false),
            _ => None,
        }) == Some(true)
    }
}

impl RenderSurface for RecordingSurface {
    fn attach(&mut self, id: BodyId, name: &str, rect: &Rect) {
        self.events.borrow_mut().push(SurfaceEvent::Attach(id, name.to_string(), *rect));
    }

    fn detach(&mut self, id: BodyId) {
        self.events.borrow_mut().push(SurfaceEvent::Detach(id));
    }

    fn update_rect(&mut self, id: BodyId, rect: &Rect) {
        self.events.borrow_mut().push(SurfaceEvent::Update(id, *rect));
    }
}
