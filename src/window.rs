//! Per-window components
//!
//! The host may have several windows open; each gets its own component
//! instance, created the first time the window is seen and unloaded when the
//! window closes.

use std::collections::HashMap;

use crate::host::Host;
use crate::log_debug;

pub type WindowId = u64;

/// Something that lives once per window
pub trait PerWindowComponent {
    /// Tear down everything the component put on screen
    fn unload(&mut self, host: &mut dyn Host);
}

pub struct WindowManager<C> {
    components: HashMap<WindowId, C>,
    factory: Box<dyn Fn(WindowId) -> C>,
}

impl<C: PerWindowComponent> WindowManager<C> {
    pub fn new(factory: impl Fn(WindowId) -> C + 'static) -> Self {
        Self {
            components: HashMap::new(),
            factory: Box::new(factory),
        }
    }

    /// The window's component, created on first use
    ///
    /// # Returns
    /// `(component, created)`
    pub fn for_window(&mut self, window: WindowId) -> (&mut C, bool) {
        let created = !self.components.contains_key(&window);
        let factory = &self.factory;
        let component = self.components.entry(window).or_insert_with(|| {
            log_debug(&format!("Creating component for window {}", window));
            factory(window)
        });
        (component, created)
    }

    pub fn get(&self, window: WindowId) -> Option<&C> {
        self.components.get(&window)
    }

    pub fn get_mut(&mut self, window: WindowId) -> Option<&mut C> {
        self.components.get_mut(&window)
    }

    pub fn window_closed(&mut self, window: WindowId, host: &mut dyn Host) {
        if let Some(mut component) = self.components.remove(&window) {
            log_debug(&format!("Unloading component for window {}", window));
            component.unload(host);
        }
    }

    pub fn unload_all(&mut self, host: &mut dyn Host) {
        for (_, mut component) in self.components.drain() {
            component.unload(host);
        }
    }

    pub fn for_each(&mut self, mut f: impl FnMut(WindowId, &mut C)) {
        for (&window, component) in self.components.iter_mut() {
            f(window, component);
        }
    }

    /// Open windows in ascending id order
    pub fn windows(&self) -> Vec<WindowId> {
        let mut ids: Vec<WindowId> = self.components.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
