//! The stage: owner of every game object in one visualization session.
//!
//! Game objects live in an arena and are addressed by generational
//! [`GameObjectId`] handles, with a name index on top. The stage also holds
//! the state the host mirrors into the scene (canvas size, pointer position,
//! held keys) and the render-on-demand flag.
//!
//! Callbacks are dispatched with the running component detached from its
//! owner, so it can borrow the stage mutably through its [`SceneContext`].

use std::collections::HashMap;
use std::ops::ControlFlow;

use super::component::{Component, EventProcessCode};
use super::context::SceneContext;
use super::game_object::GameObject;
use crate::error::SceneError;
use crate::input::{Key, KeyboardState, Viewport};

/// Handle to a game object on a [`Stage`].
///
/// Handles to removed objects never resolve, even after their slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameObjectId {
    index: u32,
    generation: u32,
}

#[derive(Default)]
struct Slot {
    generation: u32,
    object: Option<GameObject>,
}

/// Registry of the game objects that make up a scene.
#[derive(Default)]
pub struct Stage {
    slots: Vec<Slot>,
    names: HashMap<String, GameObjectId>,
    viewport: Viewport,
    keyboard: KeyboardState,
    render_requested: bool,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Object registry ─────────────────────────────────────────────────────

    /// Register a game object under its (unique) name.
    ///
    /// The object takes the lowest free slot, which also fixes its place in
    /// dispatch order.
    pub fn add_game_object(&mut self, object: GameObject) -> Result<GameObjectId, SceneError> {
        if self.names.contains_key(object.name()) {
            return Err(SceneError::DuplicateGameObject(object.name().to_string()));
        }

        let name = object.name().to_string();
        let id = match self.slots.iter().position(|slot| slot.object.is_none()) {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.object = Some(object);
                GameObjectId {
                    index: index as u32,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    object: Some(object),
                });
                GameObjectId {
                    index: (self.slots.len() - 1) as u32,
                    generation: 0,
                }
            }
        };

        tracing::info!("game object added: {name}");
        self.names.insert(name, id);
        Ok(id)
    }

    /// Register `object`, dropping any existing object with the same name.
    ///
    /// Used when a new buffer is loaded: the buffer object is rebuilt rather
    /// than mutated, and old handles to it stop resolving.
    pub fn replace_game_object(&mut self, object: GameObject) -> Result<GameObjectId, SceneError> {
        if self.remove_game_object(object.name()).is_some() {
            tracing::info!("replacing game object: {}", object.name());
        }
        self.add_game_object(object)
    }

    pub fn remove_game_object(&mut self, name: &str) -> Option<GameObject> {
        let id = self.names.remove(name)?;
        let slot = self.slots.get_mut(id.index as usize)?;
        let object = slot.object.take();
        slot.generation = slot.generation.wrapping_add(1);
        tracing::info!("game object removed: {name}");
        object
    }

    pub fn id_of(&self, name: &str) -> Option<GameObjectId> {
        self.names.get(name).copied()
    }

    pub fn game_object(&self, id: GameObjectId) -> Option<&GameObject> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.object.as_ref()
    }

    pub fn game_object_mut(&mut self, id: GameObjectId) -> Option<&mut GameObject> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.object.as_mut()
    }

    pub fn get_game_object(&self, name: &str) -> Option<&GameObject> {
        self.game_object(self.id_of(name)?)
    }

    pub fn get_game_object_mut(&mut self, name: &str) -> Option<&mut GameObject> {
        let id = self.id_of(name)?;
        self.game_object_mut(id)
    }

    /// Like [`get_game_object`](Self::get_game_object), but absence is an error.
    pub fn require_game_object(&self, name: &str) -> Result<&GameObject, SceneError> {
        self.get_game_object(name)
            .ok_or_else(|| SceneError::GameObjectNotFound(name.to_string()))
    }

    /// Look up a game object and one of its components by name and type.
    pub fn require_component<T: Component + 'static>(
        &self,
        object: &str,
        component: &str,
    ) -> Result<(&GameObject, &T), SceneError> {
        let owner = self.require_game_object(object)?;
        let typed = owner
            .get_component::<T>(component)
            .ok_or_else(|| SceneError::ComponentNotFound {
                object: object.to_string(),
                component: component.to_string(),
            })?;
        Ok((owner, typed))
    }

    /// Names of every live game object, in slot (dispatch) order.
    pub fn game_object_names(&self) -> impl Iterator<Item = &str> {
        self.slots
            .iter()
            .filter_map(|slot| slot.object.as_ref().map(GameObject::name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    // ── Host-mirrored state ─────────────────────────────────────────────────

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_mouse_position(&mut self, x: i32, y: i32) {
        self.viewport.mouse_x = x;
        self.viewport.mouse_y = y;
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    pub fn keyboard_mut(&mut self) -> &mut KeyboardState {
        &mut self.keyboard
    }

    pub fn request_render_update(&mut self) {
        self.render_requested = true;
    }

    pub fn render_requested(&self) -> bool {
        self.render_requested
    }

    /// Return and clear the pending render request.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }

    // ── Lifecycle dispatch ──────────────────────────────────────────────────

    /// Run `post_initialize` on every component.
    ///
    /// Stops at the first component that reports failure.
    pub fn post_initialize(&mut self) -> Result<(), SceneError> {
        let rejected = self.visit_components(|component, ctx| {
            if component.post_initialize(ctx) {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            }
        });

        match rejected {
            Some((object, component)) => {
                tracing::warn!("{object}/{component} rejected scene initialization");
                Err(SceneError::InitializationFailed { object, component })
            }
            None => Ok(()),
        }
    }

    /// Run `update` on every component.
    pub fn update(&mut self) {
        self.visit_components(|component, ctx| {
            component.update(ctx);
            ControlFlow::Continue(())
        });
    }

    /// Notify every component that the displayed buffer changed.
    pub fn post_buffer_update(&mut self) -> Result<(), SceneError> {
        let rejected = self.visit_components(|component, ctx| {
            if component.post_buffer_update(ctx) {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            }
        });

        match rejected {
            Some((object, component)) => {
                Err(SceneError::BufferUpdateRejected { object, component })
            }
            None => Ok(()),
        }
    }

    // ── Input dispatch ──────────────────────────────────────────────────────

    /// Record the new canvas size and broadcast it to every component.
    pub fn window_resized(&mut self, width: i32, height: i32) {
        self.viewport.width = width;
        self.viewport.height = height;
        self.visit_components(|component, ctx| {
            component.window_resized(ctx, width, height);
            ControlFlow::Continue(())
        });
    }

    /// Mark `key` as held and offer the press to components until one
    /// intercepts it.
    pub fn key_press_event(&mut self, key: Key) -> EventProcessCode {
        self.keyboard.press(key);
        self.dispatch_until_intercepted(|component, ctx| component.key_press_event(ctx, key))
    }

    pub fn key_release_event(&mut self, key: Key) {
        self.keyboard.release(key);
    }

    pub fn mouse_drag_event(&mut self, dx: i32, dy: i32) -> EventProcessCode {
        self.dispatch_until_intercepted(|component, ctx| component.mouse_drag_event(ctx, dx, dy))
    }

    pub fn scroll_callback(&mut self, delta: f32) -> EventProcessCode {
        self.dispatch_until_intercepted(|component, ctx| component.scroll_callback(ctx, delta))
    }

    // ── Direct component access ─────────────────────────────────────────────

    /// Run `f` against a typed component with a context for its owner.
    ///
    /// This is how the host calls component operations that are not part
    /// of the callback surface (e.g. camera navigation requests).
    pub fn with_component_mut<T, R>(
        &mut self,
        object: &str,
        component: &str,
        f: impl FnOnce(&mut T, &mut SceneContext<'_>) -> R,
    ) -> Result<R, SceneError>
    where
        T: Component + 'static,
    {
        let not_found = || SceneError::ComponentNotFound {
            object: object.to_string(),
            component: component.to_string(),
        };

        let id = self
            .id_of(object)
            .ok_or_else(|| SceneError::GameObjectNotFound(object.to_string()))?;
        let mut detached = self
            .game_object_mut(id)
            .ok_or(SceneError::StaleHandle)?
            .detach_component(component)
            .ok_or_else(not_found)?;

        let result = match detached.as_any_mut().downcast_mut::<T>() {
            Some(typed) => {
                let mut ctx = SceneContext::new(self, id);
                Ok(f(typed, &mut ctx))
            }
            None => Err(not_found()),
        };

        if let Some(owner) = self.game_object_mut(id) {
            owner.attach_component(component.to_string(), detached);
        }
        result
    }

    // ── Internals ───────────────────────────────────────────────────────────

    fn dispatch_until_intercepted<F>(&mut self, mut handler: F) -> EventProcessCode
    where
        F: FnMut(&mut dyn Component, &mut SceneContext<'_>) -> EventProcessCode,
    {
        let interceptor = self.visit_components(|component, ctx| {
            if handler(component, ctx).is_intercepted() {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        match interceptor {
            Some((object, component)) => {
                tracing::debug!("event intercepted by {object}/{component}");
                EventProcessCode::Intercepted
            }
            None => EventProcessCode::Ignored,
        }
    }

    /// Visit every component, owners in slot order and each owner's
    /// components by name, detaching it for the duration of the call.
    /// Returns the object and component names where the visitor broke out,
    /// if it did.
    fn visit_components<F>(&mut self, mut visit: F) -> Option<(String, String)>
    where
        F: FnMut(&mut dyn Component, &mut SceneContext<'_>) -> ControlFlow<()>,
    {
        let ids: Vec<GameObjectId> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.object.is_some())
            .map(|(index, slot)| GameObjectId {
                index: index as u32,
                generation: slot.generation,
            })
            .collect();

        for id in ids {
            let names: Vec<String> = match self.game_object(id) {
                Some(object) => object.component_names().map(str::to_owned).collect(),
                None => continue,
            };

            for name in names {
                let Some(mut component) = self
                    .game_object_mut(id)
                    .and_then(|object| object.detach_component(&name))
                else {
                    continue;
                };

                let flow = {
                    let mut ctx = SceneContext::new(self, id);
                    visit(&mut *component, &mut ctx)
                };

                let owner_name = match self.game_object_mut(id) {
                    Some(owner) => {
                        owner.attach_component(name.clone(), component);
                        owner.name().to_string()
                    }
                    None => String::new(),
                };

                if flow.is_break() {
                    return Some((owner_name, name));
                }
            }
        }
        None
    }
}
