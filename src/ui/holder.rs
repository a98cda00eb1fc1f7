//! Ordered component storage and the operations shared by every holder.

use delegate::delegate;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize};

use super::component::Component;

/// An ordered, mutable list of child components.
///
/// Slots may be empty placeholders: [`set`](Slots::set) pads the list so
/// callers can assign sparse indices before serialization, and
/// placeholders are dropped from the wire form. Order is render order
/// and survives a serialize/deserialize round-trip.
#[derive(Debug, Clone, Default)]
pub struct Slots {
    inner: Vec<Option<Component>>,
}

impl Slots {
    pub fn new(components: Vec<Component>) -> Self {
        Self {
            inner: components.into_iter().map(Some).collect(),
        }
    }

    delegate! {
        to self.inner {
            /// Drops every slot, placeholders included.
            pub fn clear(&mut self);
            /// Number of slots, placeholders included.
            pub fn len(&self) -> usize;
            pub fn is_empty(&self) -> bool;
        }
    }

    /// Appends a component.
    pub fn add(&mut self, component: Component) {
        self.inner.push(Some(component));
    }

    /// Assigns a component at `index`, padding with placeholders first if
    /// the list is too short.
    pub fn set(&mut self, index: usize, component: Component) {
        if index >= self.inner.len() {
            self.inner.resize_with(index + 1, || None);
        }
        self.inner[index] = Some(component);
    }

    /// Removes the first slot holding a structurally-equal component.
    pub fn remove(&mut self, component: &Component) -> Option<Component> {
        let index = self
            .inner
            .iter()
            .position(|slot| slot.as_ref() == Some(component))?;
        self.inner.remove(index)
    }

    /// Removes and returns the last slot's component, if any.
    pub fn pop(&mut self) -> Option<Component> {
        self.inner.pop().flatten()
    }

    /// Iterates over filled slots in order.
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.inner.iter().flatten()
    }

    /// Iterates mutably over filled slots in order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Component> {
        self.inner.iter_mut().flatten()
    }

    /// Sets or clears the disabled flag on every disableable component,
    /// recursing into nested holders.
    pub fn set_disabled(&mut self, disabled: bool) {
        for component in self.iter_mut() {
            component.set_disabled(disabled);
        }
    }

    /// Depth-first search for the first component with the given custom
    /// ID.
    pub fn get_component(&self, custom_id: &str) -> Option<&Component> {
        self.iter()
            .find_map(|component| component.get_component(custom_id))
    }

    /// Collects the custom IDs of every interactable leaf, depth-first.
    pub fn collect_custom_ids(&self, out: &mut Vec<String>) {
        for component in self.iter() {
            match component {
                Component::ActionRow(row) => row.components.collect_custom_ids(out),
                other => {
                    if let Some(id) = other.custom_id() {
                        out.push(id.to_string());
                    }
                }
            }
        }
    }
}

/// Two slot lists are equal when their filled slots are, placeholder
/// layout aside: equality follows the canonical serialized form.
impl PartialEq for Slots {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Serialize for Slots {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let filled = self.iter().count();
        let mut seq = serializer.serialize_seq(Some(filled))?;
        for component in self.iter() {
            seq.serialize_element(component)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Slots {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::new(Vec::<Component>::deserialize(deserializer)?))
    }
}

impl FromIterator<Component> for Slots {
    fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Operations shared by every component that owns children.
pub trait ComponentHolder {
    fn slots(&self) -> &Slots;
    fn slots_mut(&mut self) -> &mut Slots;

    /// Appends a component.
    fn add_component(&mut self, component: impl Into<Component>) {
        self.slots_mut().add(component.into());
    }

    /// Assigns a component at `index`, padding with placeholders.
    fn set_component(&mut self, index: usize, component: impl Into<Component>) {
        self.slots_mut().set(index, component.into());
    }

    /// Removes the first structurally-equal component.
    fn remove_component(&mut self, component: &Component) -> Option<Component> {
        self.slots_mut().remove(component)
    }

    /// Removes and returns the last component.
    fn pop_component(&mut self) -> Option<Component> {
        self.slots_mut().pop()
    }

    /// Drops every component.
    fn clear_components(&mut self) {
        self.slots_mut().clear();
    }

    /// Sets the disabled flag on every disableable descendant.
    fn disable_components(&mut self) {
        self.slots_mut().set_disabled(true);
    }

    /// Clears the disabled flag on every disableable descendant.
    fn enable_components(&mut self) {
        self.slots_mut().set_disabled(false);
    }

    /// Finds the first descendant with the given custom ID, searching
    /// depth-first.
    fn get_component(&self, custom_id: &str) -> Option<&Component> {
        self.slots().get_component(custom_id)
    }
}
