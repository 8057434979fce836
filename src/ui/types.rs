//! Value types exchanged with the console session.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Origin of a message or question, shown as `[name]` to humans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiSource {
    display_name: String,
}

impl UiSource {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl fmt::Display for UiSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}

/// Ordered button id -> label mapping.
///
/// Insertion order is the display order and the order of the keys in the
/// serialized `input_request` object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buttons {
    entries: Vec<(String, String)>,
}

impl Buttons {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a button. Re-adding an existing id replaces its label in place.
    pub fn insert(&mut self, id: impl Into<String>, label: impl Into<String>) {
        let id = id.into();
        let label = label.into();
        match self.entries.iter_mut().find(|(k, _)| *k == id) {
            Some(entry) => entry.1 = label,
            None => self.entries.push((id, label)),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Buttons {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut buttons = Buttons::new();
        for (id, label) in iter {
            buttons.insert(id, label);
        }
        buttons
    }
}

impl Serialize for Buttons {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (id, label) in &self.entries {
            map.serialize_entry(id, label)?;
        }
        map.end()
    }
}

/// A request for a button choice or free text.
#[derive(Debug, Clone, Default)]
pub struct Question {
    pub text: String,
    pub buttons: Option<Buttons>,
    /// Button id or default text used when the human enters an empty line.
    pub default: Option<String>,
    /// Reject free text; only listed buttons are accepted.
    pub buttons_only: bool,
    /// Accept an empty line as valid free text.
    pub allow_empty: bool,
    pub hint: Option<String>,
    pub placeholder: Option<String>,
    pub extra_info: Option<String>,
    /// Editable pre-fill for the input line.
    pub initial_text: Option<String>,
    pub source: Option<UiSource>,
}

impl Question {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_buttons<I, K, V>(mut self, buttons: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.buttons = Some(buttons.into_iter().collect());
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn buttons_only(mut self) -> Self {
        self.buttons_only = true;
        self
    }

    #[allow(dead_code)]
    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[allow(dead_code)]
    pub fn with_extra_info(mut self, extra_info: impl Into<String>) -> Self {
        self.extra_info = Some(extra_info.into());
        self
    }

    pub fn with_initial_text(mut self, initial_text: impl Into<String>) -> Self {
        self.initial_text = Some(initial_text.into());
        self
    }

    pub fn with_source(mut self, source: UiSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Whether `choice` is one of this question's button ids.
    pub fn is_button(&self, choice: &str) -> bool {
        self.buttons.as_ref().is_some_and(|b| b.contains(choice))
    }

    /// The default value, treating an empty default as absent.
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref().filter(|d| !d.is_empty())
    }
}

/// Answer to a [`Question`]: either a button id or free text, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInput {
    button: Option<String>,
    text: Option<String>,
}

impl UserInput {
    pub fn button(id: impl Into<String>) -> Self {
        Self {
            button: Some(id.into()),
            text: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            button: None,
            text: Some(text.into()),
        }
    }

    pub fn selected_button(&self) -> Option<&str> {
        self.button.as_deref()
    }

    pub fn entered_text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_keep_insertion_order() {
        let buttons: Buttons = [("z", "Last"), ("a", "First"), ("m", "Middle")]
            .into_iter()
            .collect();
        let ids: Vec<&str> = buttons.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);

        let json = serde_json::to_string(&buttons).unwrap();
        assert_eq!(json, r#"{"z":"Last","a":"First","m":"Middle"}"#);
    }

    #[test]
    fn test_buttons_insert_replaces_label() {
        let mut buttons = Buttons::new();
        buttons.insert("y", "Yes");
        buttons.insert("n", "No");
        buttons.insert("y", "Yes please");
        assert_eq!(buttons.len(), 2);
        assert_eq!(buttons.iter().next(), Some(("y", "Yes please")));
    }

    #[test]
    fn test_user_input_is_exclusive() {
        let input = UserInput::button("y");
        assert_eq!(input.selected_button(), Some("y"));
        assert!(input.entered_text().is_none());

        let input = UserInput::text("");
        assert!(input.selected_button().is_none());
        assert_eq!(input.entered_text(), Some(""));
    }

    #[test]
    fn test_question_default_value_ignores_empty() {
        let q = Question::new("Name?").with_default("");
        assert!(q.default_value().is_none());

        let q = Question::new("Name?").with_default("Ada");
        assert_eq!(q.default_value(), Some("Ada"));
    }

    #[test]
    fn test_question_is_button() {
        let q = Question::new("Continue?").with_buttons([("y", "Yes")]);
        assert!(q.is_button("y"));
        assert!(!q.is_button("Y"));
        assert!(!Question::new("Name?").is_button("y"));
    }
}
