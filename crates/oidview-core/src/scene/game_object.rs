//! Named scene nodes carrying a pose and a set of components.

use std::collections::BTreeMap;
use std::fmt;

use super::component::Component;
use crate::math::Mat4;

/// A node in the stage: a model transform plus named components.
///
/// Components are owned exclusively by their game object and looked up by
/// name. Typed access fails (returns `None`) both when the name is unknown
/// and when the stored component is of a different type.
pub struct GameObject {
    name: String,
    pose: Mat4,
    components: BTreeMap<String, Box<dyn Component>>,
}

impl GameObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pose: Mat4::IDENTITY,
            components: BTreeMap::new(),
        }
    }

    /// Builder-style [`add_component`](Self::add_component).
    pub fn with_component(
        mut self,
        name: impl Into<String>,
        component: impl Component + 'static,
    ) -> Self {
        self.add_component(name, component);
        self
    }

    /// Attach a component, returning whatever was registered under the same name.
    pub fn add_component(
        &mut self,
        name: impl Into<String>,
        component: impl Component + 'static,
    ) -> Option<Box<dyn Component>> {
        self.components.insert(name.into(), Box::new(component))
    }

    pub fn remove_component(&mut self, name: &str) -> Option<Box<dyn Component>> {
        self.components.remove(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pose(&self) -> Mat4 {
        self.pose
    }

    pub fn set_pose(&mut self, pose: Mat4) {
        self.pose = pose;
    }

    pub fn has_component(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Component names in dispatch order.
    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    pub fn get_component<T: Component + 'static>(&self, name: &str) -> Option<&T> {
        self.components.get(name)?.as_any().downcast_ref::<T>()
    }

    pub fn get_component_mut<T: Component + 'static>(&mut self, name: &str) -> Option<&mut T> {
        self.components.get_mut(name)?.as_any_mut().downcast_mut::<T>()
    }

    pub(crate) fn detach_component(&mut self, name: &str) -> Option<Box<dyn Component>> {
        self.components.remove(name)
    }

    pub(crate) fn attach_component(&mut self, name: String, component: Box<dyn Component>) {
        self.components.insert(name, component);
    }
}

impl fmt::Debug for GameObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameObject")
            .field("name", &self.name)
            .field("pose", &self.pose)
            .field("components", &self.components.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;

    use super::*;
    use crate::math::{Vec4, translation};

    struct Marker(u32);

    impl Component for Marker {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    struct Other;

    impl Component for Other {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn new_object_has_identity_pose() {
        let obj = GameObject::new("camera");
        assert_eq!(obj.name(), "camera");
        assert_eq!(obj.pose(), Mat4::IDENTITY);
        assert_eq!(obj.component_names().count(), 0);
    }

    #[test]
    fn typed_lookup_by_name() {
        let obj = GameObject::new("thing").with_component("marker", Marker(7));
        assert!(obj.has_component("marker"));
        assert_eq!(obj.get_component::<Marker>("marker").map(|m| m.0), Some(7));
    }

    #[test]
    fn lookup_fails_on_missing_name_or_wrong_type() {
        let obj = GameObject::new("thing").with_component("marker", Marker(7));
        assert!(obj.get_component::<Marker>("absent").is_none());
        assert!(obj.get_component::<Other>("marker").is_none());
    }

    #[test]
    fn mutable_lookup_edits_in_place() {
        let mut obj = GameObject::new("thing").with_component("marker", Marker(1));
        if let Some(m) = obj.get_component_mut::<Marker>("marker") {
            m.0 = 42;
        }
        assert_eq!(obj.get_component::<Marker>("marker").map(|m| m.0), Some(42));
    }

    #[test]
    fn add_component_returns_replaced() {
        let mut obj = GameObject::new("thing");
        assert!(obj.add_component("slot", Marker(1)).is_none());
        let previous = obj.add_component("slot", Other);
        assert!(previous.is_some_and(|c| c.as_any().is::<Marker>()));
        assert!(obj.get_component::<Other>("slot").is_some());
    }

    #[test]
    fn remove_component_drops_it() {
        let mut obj = GameObject::new("thing").with_component("marker", Marker(3));
        assert!(obj.remove_component("marker").is_some());
        assert!(!obj.has_component("marker"));
    }

    #[test]
    fn pose_is_settable() {
        let mut obj = GameObject::new("thing");
        let pose = translation(Vec4::new(1.0, 2.0, 0.0, 1.0));
        obj.set_pose(pose);
        assert_eq!(obj.pose(), pose);
    }

    #[test]
    fn debug_lists_component_names() {
        let obj = GameObject::new("thing").with_component("marker", Marker(0));
        let text = format!("{obj:?}");
        assert!(text.contains("thing"));
        assert!(text.contains("marker"));
    }
}
