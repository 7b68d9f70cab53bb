#[cfg(test)]
#[path = "suggestion_action_test.rs"]
mod tests;

use serde_json::json;
use serde_json::Value;

/// Multi-select chip groups that are collected locally and submitted in one go.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RefineGroup {
    Cuisines,
    Areas,
}

impl RefineGroup {
    /// Name of the group as used by toggle chips.
    pub fn group_name(&self) -> &'static str {
        match self {
            RefineGroup::Cuisines => return "cuisine",
            RefineGroup::Areas => return "area",
        }
    }

    /// Echoed into the transcript when the selection is submitted.
    pub fn summary(&self, selected: &[String]) -> String {
        match (self, selected.is_empty()) {
            (RefineGroup::Cuisines, true) => return "No cuisine preference".to_string(),
            (RefineGroup::Cuisines, false) => return format!("Cuisines: {}", selected.join(", ")),
            (RefineGroup::Areas, true) => return "No area preference".to_string(),
            (RefineGroup::Areas, false) => return format!("Areas: {}", selected.join(", ")),
        }
    }

    /// Structured action sent to the backend carrying the selection.
    pub fn action(&self, selected: &[String]) -> Value {
        let action_type = match self {
            RefineGroup::Cuisines => "refine_set_cuisines",
            RefineGroup::Areas => "refine_set_areas",
        };

        return json!({ "type": action_type, "data": selected });
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SuggestionAction {
    ToggleLocal { group: String, value: String },
    SubmitCuisines,
    SubmitAreas,
    Generic(Value),
}

impl SuggestionAction {
    pub fn parse(action: &Value) -> SuggestionAction {
        let client_only = action
            .get("clientOnly")
            .and_then(|e| return e.as_bool())
            .unwrap_or(false);
        let action_type = action
            .get("type")
            .and_then(|e| return e.as_str())
            .unwrap_or_default();

        if client_only && action_type == "toggle" {
            let group = action.get("group").and_then(|e| return e.as_str());
            let value = action.get("value").and_then(|e| return e.as_str());
            if let (Some(group), Some(value)) = (group, value) {
                return SuggestionAction::ToggleLocal {
                    group: group.to_string(),
                    value: value.to_string(),
                };
            }
        }

        match action_type {
            "submit_cuisines" => return SuggestionAction::SubmitCuisines,
            "submit_areas" => return SuggestionAction::SubmitAreas,
            _ => return SuggestionAction::Generic(action.clone()),
        }
    }

    pub fn refine_group(&self) -> Option<RefineGroup> {
        match self {
            SuggestionAction::SubmitCuisines => return Some(RefineGroup::Cuisines),
            SuggestionAction::SubmitAreas => return Some(RefineGroup::Areas),
            _ => return None,
        }
    }
}
