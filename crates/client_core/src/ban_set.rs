use std::collections::HashSet;

use shared::domain::Dog;

/// Banned attribute values. Membership is a set, listing follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct BanSet {
    ordered: Vec<String>,
    members: HashSet<String>,
}

impl BanSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the value was already banned.
    pub fn insert(&mut self, value: &str) -> bool {
        if !self.members.insert(value.to_string()) {
            return false;
        }
        self.ordered.push(value.to_string());
        true
    }

    /// Returns `false` when the value was not banned.
    pub fn remove(&mut self, value: &str) -> bool {
        if !self.members.remove(value) {
            return false;
        }
        self.ordered.retain(|banned| banned != value);
        true
    }

    pub fn contains(&self, value: &str) -> bool {
        self.members.contains(value)
    }

    /// First of the dog's attribute values that is banned, in display order.
    pub fn first_banned<'a>(&self, dog: &'a Dog) -> Option<&'a str> {
        dog.attribute_values()
            .into_iter()
            .find(|value| self.contains(value))
    }

    pub fn allows(&self, dog: &Dog) -> bool {
        self.first_banned(dog).is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.ordered.clone()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
