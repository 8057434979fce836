//! Structured-mode wire envelopes.
//!
//! Every envelope serializes to exactly one JSON object on one stdout line.

use serde::Serialize;

use crate::ui::{Buttons, Question};

/// Process lifecycle status.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StatusEvent {
    Starting { message: String },
    Done { exit_code: i32 },
}

#[derive(Debug, Serialize)]
pub struct MessageEvent<'a> {
    pub message: &'a str,
    pub source: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct StreamEvent<'a> {
    pub stream: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct ErrorEvent<'a> {
    pub error: &'a str,
}

/// Body of an `input_request` envelope.
#[derive(Debug, Serialize)]
pub struct InputRequest<'a> {
    pub question: &'a str,
    pub buttons: Option<&'a Buttons>,
    pub default: Option<&'a str>,
    pub buttons_only: bool,
    pub hint: Option<&'a str>,
    pub placeholder: Option<&'a str>,
    pub extra_info: Option<&'a str>,
}

impl<'a> From<&'a Question> for InputRequest<'a> {
    fn from(q: &'a Question) -> Self {
        Self {
            question: &q.text,
            buttons: q.buttons.as_ref().filter(|b| !b.is_empty()),
            default: q.default.as_deref(),
            buttons_only: q.buttons_only,
            hint: q.hint.as_deref(),
            placeholder: q.placeholder.as_deref(),
            extra_info: q.extra_info.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InputRequestEvent<'a> {
    pub input_request: InputRequest<'a>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_status_events() {
        let starting = StatusEvent::Starting {
            message: "Launching".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&starting).unwrap(),
            json!({"status": "starting", "message": "Launching"})
        );

        let done = StatusEvent::Done { exit_code: 3 };
        assert_eq!(
            serde_json::to_value(&done).unwrap(),
            json!({"status": "done", "exit_code": 3})
        );
    }

    #[test]
    fn test_input_request_fields_survive_independent_parse() {
        let q = Question::new("Deploy now?")
            .with_buttons([("y", "Yes"), ("n", "No")])
            .with_default("n")
            .buttons_only()
            .with_hint("production")
            .with_placeholder("y/n")
            .with_extra_info("restart_app");
        let line = serde_json::to_string(&InputRequestEvent {
            input_request: InputRequest::from(&q),
        })
        .unwrap();

        let parsed: Value = serde_json::from_str(&line).unwrap();
        let req = &parsed["input_request"];
        assert_eq!(req["question"], "Deploy now?");
        assert_eq!(req["buttons"], json!({"y": "Yes", "n": "No"}));
        assert_eq!(req["default"], "n");
        assert_eq!(req["buttons_only"], true);
        assert_eq!(req["hint"], "production");
        assert_eq!(req["placeholder"], "y/n");
        assert_eq!(req["extra_info"], "restart_app");
    }

    #[test]
    fn test_empty_buttons_serialize_as_null() {
        let q = Question::new("Pick").with_buttons(Vec::<(String, String)>::new());
        let value = serde_json::to_value(InputRequest::from(&q)).unwrap();
        assert!(value["buttons"].is_null());
    }

    #[test]
    fn test_input_request_absent_fields_are_null() {
        let q = Question::new("Name?");
        let value = serde_json::to_value(InputRequestEvent {
            input_request: InputRequest::from(&q),
        })
        .unwrap();
        assert_eq!(
            value,
            json!({"input_request": {
                "question": "Name?",
                "buttons": null,
                "default": null,
                "buttons_only": false,
                "hint": null,
                "placeholder": null,
                "extra_info": null
            }})
        );
    }
}
