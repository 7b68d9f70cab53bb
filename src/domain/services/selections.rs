#[cfg(test)]
#[path = "selections_test.rs"]
mod tests;

use std::collections::HashMap;

/// Values picked from multi-select chip groups that haven't been submitted
/// yet. Values keep the order they were picked in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingSelections {
    groups: HashMap<String, Vec<String>>,
}

impl PendingSelections {
    /// Flips membership of `value` in `group`. Returns whether the value is
    /// now selected.
    pub fn toggle(&mut self, group: &str, value: &str) -> bool {
        let values = self.groups.entry(group.to_string()).or_default();
        if let Some(idx) = values.iter().position(|e| return e == value) {
            values.remove(idx);
            if values.is_empty() {
                self.groups.remove(group);
            }
            return false;
        }

        values.push(value.to_string());
        return true;
    }

    pub fn get(&self, group: &str) -> Vec<String> {
        return self.groups.get(group).cloned().unwrap_or_default();
    }

    pub fn contains(&self, group: &str, value: &str) -> bool {
        if let Some(values) = self.groups.get(group) {
            return values.iter().any(|e| return e == value);
        }

        return false;
    }

    pub fn clear(&mut self, group: &str) {
        self.groups.remove(group);
    }

    pub fn clear_all(&mut self) {
        self.groups.clear();
    }
}
