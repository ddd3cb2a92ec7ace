#![forbid(unsafe_code)]

//! Host-side rectangles the solver writes geometry into.
//!
//! A [`LayoutEntity`] is owned by the host through an [`EntityHandle`]
//! (`Rc<RefCell<_>>`). Layouts only keep a [`Weak`] reference, so dropping the
//! last handle removes the entity from every layout on the next pass.
//!
//! Geometry writes fire the optional update callback. [`EntityHandle`]
//! releases its borrow before invoking it, so callbacks may read the entity
//! through a cloned handle.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use flexgrid_core::{Bounds, LayoutConstraints, LayoutSize};

/// Callback invoked with `(x, y, width, height)` after every geometry write.
pub type UpdateCallback = Rc<dyn Fn(f32, f32, f32, f32)>;

/// Preferred size of a freshly created entity.
pub const DEFAULT_PREFERRED_SIZE: LayoutSize = LayoutSize::new(10.0, 10.0);

/// An abstract rectangle with a preferred size.
#[derive(Clone)]
pub struct LayoutEntity {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    preferred_size: LayoutSize,
    visible: bool,
    name: Option<String>,
    callback: Option<UpdateCallback>,
}

impl fmt::Debug for LayoutEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutEntity")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("preferred_size", &self.preferred_size)
            .field("visible", &self.visible)
            .field("name", &self.name)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

impl Default for LayoutEntity {
    fn default() -> Self {
        Self::new(DEFAULT_PREFERRED_SIZE.width, DEFAULT_PREFERRED_SIZE.height)
    }
}

impl LayoutEntity {
    /// New visible entity at the origin with zero size.
    pub fn new(preferred_width: f32, preferred_height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            preferred_size: LayoutSize::new(preferred_width, preferred_height),
            visible: true,
            name: None,
            callback: None,
        }
    }

    /// Set a debug name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Current geometry.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    pub fn preferred_size(&self) -> LayoutSize {
        self.preferred_size
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_preferred_size(&mut self, width: f32, height: f32) {
        self.preferred_size = LayoutSize::new(width, height);
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn set_update_callback(&mut self, callback: Option<UpdateCallback>) {
        self.callback = callback;
    }

    /// Move, then fire the callback.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.notify();
    }

    /// Resize, then fire the callback.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.notify();
    }

    /// Move and resize with a single callback.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.apply_bounds(bounds);
        self.notify();
    }

    /// Preferred size clamped into `constraints` (max first, then min).
    pub fn calculate_size(&self, constraints: &LayoutConstraints) -> LayoutSize {
        constraints.constrain(self.preferred_size)
    }

    fn apply_bounds(&mut self, bounds: Bounds) {
        self.x = bounds.x;
        self.y = bounds.y;
        self.width = bounds.width;
        self.height = bounds.height;
    }

    fn notify(&self) {
        if let Some(cb) = &self.callback {
            cb(self.x, self.y, self.width, self.height);
        }
    }
}

/// Shared, host-owned handle to a [`LayoutEntity`].
#[derive(Clone, Default)]
pub struct EntityHandle(Rc<RefCell<LayoutEntity>>);

impl fmt::Debug for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(entity) => f.debug_tuple("EntityHandle").field(&*entity).finish(),
            Err(_) => f.write_str("EntityHandle(<borrowed>)"),
        }
    }
}

impl From<LayoutEntity> for EntityHandle {
    fn from(entity: LayoutEntity) -> Self {
        Self(Rc::new(RefCell::new(entity)))
    }
}

impl EntityHandle {
    /// New entity with the given preferred size.
    pub fn new(preferred_width: f32, preferred_height: f32) -> Self {
        LayoutEntity::new(preferred_width, preferred_height).into()
    }

    /// New entity with a preferred size and a debug name.
    pub fn named(name: impl Into<String>, preferred_width: f32, preferred_height: f32) -> Self {
        LayoutEntity::new(preferred_width, preferred_height)
            .with_name(name)
            .into()
    }

    /// Borrow the entity for reading.
    ///
    /// # Panics
    ///
    /// Panics if the entity is currently mutably borrowed, which only happens
    /// inside the handle's own setters.
    pub fn borrow(&self) -> Ref<'_, LayoutEntity> {
        self.0.borrow()
    }

    /// Both handles point at the same entity.
    pub fn ptr_eq(&self, other: &EntityHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn downgrade(&self) -> WeakEntity {
        WeakEntity(Rc::downgrade(&self.0))
    }

    pub fn x(&self) -> f32 {
        self.0.borrow().x
    }

    pub fn y(&self) -> f32 {
        self.0.borrow().y
    }

    pub fn width(&self) -> f32 {
        self.0.borrow().width
    }

    pub fn height(&self) -> f32 {
        self.0.borrow().height
    }

    pub fn bounds(&self) -> Bounds {
        self.0.borrow().bounds()
    }

    pub fn preferred_size(&self) -> LayoutSize {
        self.0.borrow().preferred_size
    }

    pub fn is_visible(&self) -> bool {
        self.0.borrow().visible
    }

    pub fn name(&self) -> Option<String> {
        self.0.borrow().name.clone()
    }

    pub fn set_preferred_size(&self, width: f32, height: f32) {
        self.0.borrow_mut().set_preferred_size(width, height);
    }

    pub fn set_visible(&self, visible: bool) {
        self.0.borrow_mut().set_visible(visible);
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.0.borrow_mut().set_name(name);
    }

    /// Install the geometry callback.
    pub fn set_update_callback(&self, callback: impl Fn(f32, f32, f32, f32) + 'static) {
        self.0
            .borrow_mut()
            .set_update_callback(Some(Rc::new(callback)));
    }

    pub fn clear_update_callback(&self) {
        self.0.borrow_mut().set_update_callback(None);
    }

    pub fn calculate_size(&self, constraints: &LayoutConstraints) -> LayoutSize {
        self.0.borrow().calculate_size(constraints)
    }

    pub fn set_position(&self, x: f32, y: f32) {
        let bounds = {
            let entity = self.0.borrow();
            Bounds::new(x, y, entity.width, entity.height)
        };
        self.write(bounds);
    }

    pub fn set_size(&self, width: f32, height: f32) {
        let bounds = {
            let entity = self.0.borrow();
            Bounds::new(entity.x, entity.y, width, height)
        };
        self.write(bounds);
    }

    pub fn set_bounds(&self, bounds: Bounds) {
        self.write(bounds);
    }

    fn write(&self, bounds: Bounds) {
        let callback = {
            let mut entity = self.0.borrow_mut();
            entity.apply_bounds(bounds);
            entity.callback.clone()
        };
        if let Some(cb) = callback {
            cb(bounds.x, bounds.y, bounds.width, bounds.height);
        }
    }
}

/// Non-owning reference kept by layouts.
#[derive(Clone)]
pub(crate) struct WeakEntity(Weak<RefCell<LayoutEntity>>);

impl WeakEntity {
    pub(crate) fn upgrade(&self) -> Option<EntityHandle> {
        self.0.upgrade().map(EntityHandle)
    }

    pub(crate) fn points_to(&self, handle: &EntityHandle) -> bool {
        Weak::ptr_eq(&self.0, &Rc::downgrade(&handle.0))
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn defaults() {
        let e = LayoutEntity::default();
        assert_eq!(e.preferred_size(), LayoutSize::new(10.0, 10.0));
        assert!(e.is_visible());
        assert_eq!(e.bounds(), Bounds::default());
        assert_eq!(e.name(), None);
    }

    #[test]
    fn calculate_size_clamps_max_then_min() {
        let e = LayoutEntity::new(100.0, 30.0);
        let c = LayoutConstraints::new(0.0, 40.0, 60.0, 80.0);
        assert_eq!(e.calculate_size(&c), LayoutSize::new(60.0, 40.0));
    }

    #[test]
    fn setters_fire_callback() {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::new(Cell::new(Bounds::default()));
        let handle = EntityHandle::new(10.0, 10.0);
        {
            let calls = Rc::clone(&calls);
            let seen = Rc::clone(&seen);
            handle.set_update_callback(move |x, y, w, h| {
                calls.set(calls.get() + 1);
                seen.set(Bounds::new(x, y, w, h));
            });
        }
        handle.set_position(3.0, 4.0);
        handle.set_size(20.0, 30.0);
        assert_eq!(calls.get(), 2);
        assert_eq!(seen.get(), Bounds::new(3.0, 4.0, 20.0, 30.0));

        handle.set_bounds(Bounds::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(calls.get(), 3);
        assert_eq!(handle.bounds(), Bounds::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn callback_can_read_entity() {
        let handle = EntityHandle::named("reader", 10.0, 10.0);
        let observed = Rc::new(Cell::new(0.0));
        {
            let reader = handle.clone();
            let observed = Rc::clone(&observed);
            handle.set_update_callback(move |_, _, _, _| observed.set(reader.x()));
        }
        handle.set_position(42.0, 0.0);
        assert_eq!(observed.get(), 42.0);
    }

    #[test]
    fn owned_entity_setters_fire_callback() {
        let calls = Rc::new(Cell::new(0));
        let mut e = LayoutEntity::new(5.0, 5.0);
        let counter = Rc::clone(&calls);
        e.set_update_callback(Some(Rc::new(move |_, _, _, _| {
            counter.set(counter.get() + 1)
        })));
        e.set_position(1.0, 1.0);
        e.set_bounds(Bounds::new(0.0, 0.0, 2.0, 2.0));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn weak_reference_tracks_lifetime() {
        let handle = EntityHandle::new(1.0, 1.0);
        let weak = handle.downgrade();
        assert!(weak.is_alive());
        assert!(weak.points_to(&handle));
        assert!(!weak.points_to(&EntityHandle::new(1.0, 1.0)));
        drop(handle);
        assert!(!weak.is_alive());
        assert!(weak.upgrade().is_none());
    }
}
