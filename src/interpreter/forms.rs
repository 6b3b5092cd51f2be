//! Insertion matchers: single inputs, whole forms, and buttons.
//!
//! Each emits one `addBlock` appending a generated fragment to `body`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write as _;
use std::path::Path;

use super::{capture, escape_attr, escape_text, unquoted_lower, Command};
use crate::actions::Action;

/// Keyword → input type. Order matters: `datetime` before `date`/`time`.
const INPUT_KINDS: &[(&str, &str)] = &[
    ("datetime", "datetime-local"),
    ("password", "password"),
    ("email", "email"),
    ("number", "number"),
    ("textarea", "textarea"),
    ("text area", "textarea"),
    ("date", "date"),
    ("time", "time"),
    ("url", "url"),
    ("tel", "tel"),
    ("phone", "tel"),
    ("file", "file"),
    ("checkbox", "checkbox"),
    ("radio", "radio"),
    ("range", "range"),
    ("slider", "range"),
    ("color", "color"),
    ("search", "search"),
];

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\bplaceholder\s+(?:of\s+|as\s+|=\s*)?(?:"([^"]*)"|'([^']*)'|(\S+))"#)
        .expect("placeholder regex must compile")
});

static NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\bnamed?\s+(?:=\s*)?(?:"([^"]*)"|'([^']*)'|([\w-]+))"#).expect("name regex must compile")
});

static MIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bmin(?:imum)?\s+(?:of\s+)?(-?\d+(?:\.\d+)?)").expect("min regex must compile")
});

static MAX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bmax(?:imum)?\s+(?:of\s+)?(-?\d+(?:\.\d+)?)").expect("max regex must compile")
});

static STEP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bstep\s+(?:of\s+)?(-?\d+(?:\.\d+)?)").expect("step regex must compile")
});

static DEFAULT_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(?:default(?:\s+value)?|value)\s+(?:of\s+|=\s*)?(?:"([^"]*)"|'([^']*)'|(\S+))"#)
        .expect("default value regex must compile")
});

static ACTION_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(?:action|submits?\s+to|posts?\s+to)\s+(?:url\s+)?(?:"([^"]*)"|'([^']*)'|(/\S*|https?://\S+))"#)
        .expect("action url regex must compile")
});

static GET_METHOD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bmethod\s*(?:=\s*|to\s+|of\s+)?get\b|\b(?:using|via)\s+get\b|\bget\s+method\b")
        .expect("get method regex must compile")
});

static BUTTON_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:labeled|labelled|saying|called|text)\s+(.+?)\s*$").expect("button label regex must compile")
});

static BUTTON_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\btype\s+(button|submit|reset)\b").expect("button type regex must compile")
});

static QUOTED_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""([^"]+)"|'([^']+)'"#).expect("quoted label regex must compile")
});

const INSERT_VERBS: &[&str] = &["add", "create", "insert"];

pub(crate) fn wants_input(cmd: &Command) -> bool {
    cmd.has_any(&["add input", "add textbox", "add text field", "add a text field", "add an input"])
        || (cmd.has_word("add") && cmd.has_word("input"))
}

pub(crate) fn wants_form(cmd: &Command) -> bool {
    cmd.has_any_word(INSERT_VERBS) && cmd.has_word("form") && !wants_input(cmd)
}

fn add_block(file: &Path, html_block: String) -> Action {
    Action::AddBlock {
        file: file.to_path_buf(),
        parent_selector: "body".to_string(),
        html_block,
    }
}

fn input_kind(cmd: &Command) -> &'static str {
    let lower = unquoted_lower(cmd);
    let words: Vec<&str> = lower.split(|c: char| !c.is_alphanumeric()).collect();
    INPUT_KINDS
        .iter()
        .find(|(keyword, _)| {
            if keyword.contains(' ') {
                lower.contains(keyword)
            } else {
                words.contains(keyword)
            }
        })
        .map_or("text", |(_, kind)| kind)
}

/// `add email input with placeholder "you@example.com" required`.
pub fn input(cmd: &Command, file: &Path) -> Vec<Action> {
    if !wants_input(cmd) {
        return Vec::new();
    }

    let kind = input_kind(cmd);
    let mut attrs = String::new();
    if let Some(name) = capture(&NAME, &cmd.raw) {
        let _ = write!(attrs, " name=\"{}\"", escape_attr(&name));
    }
    if let Some(placeholder) = capture(&PLACEHOLDER, &cmd.raw) {
        let _ = write!(attrs, " placeholder=\"{}\"", escape_attr(&placeholder));
    }
    for (attr, re) in [("min", &MIN), ("max", &MAX), ("step", &STEP)] {
        if let Some(n) = capture(re, &cmd.raw) {
            let _ = write!(attrs, " {}=\"{}\"", attr, n);
        }
    }
    let required = if cmd.has_word("required") { " required" } else { "" };
    let value = capture(&DEFAULT_VALUE, &cmd.raw);

    let html = if kind == "textarea" {
        format!(
            "<textarea{}{}>{}</textarea>",
            attrs,
            required,
            escape_text(value.as_deref().unwrap_or(""))
        )
    } else {
        let value_attr = value
            .map(|v| format!(" value=\"{}\"", escape_attr(&v)))
            .unwrap_or_default();
        format!("<input type=\"{}\"{}{}{}>", kind, attrs, value_attr, required)
    };

    vec![add_block(file, html)]
}

fn field(label: &str, input: &str) -> String {
    format!("  <label>{}\n    {}\n  </label>\n", label, input)
}

fn form_template(name: &str) -> String {
    let fields: Vec<String> = match name {
        "login" => vec![
            field("Email", r#"<input type="email" name="email" required>"#),
            field("Password", r#"<input type="password" name="password" required>"#),
            field("Remember me", r#"<input type="checkbox" name="remember">"#),
        ],
        "registration" => vec![
            field("Full name", r#"<input type="text" name="name" required>"#),
            field("Email", r#"<input type="email" name="email" required>"#),
            field("Password", r#"<input type="password" name="password" required>"#),
            field(
                "Confirm password",
                r#"<input type="password" name="confirm_password" required>"#,
            ),
        ],
        "search" => vec![field(
            "Search",
            r#"<input type="search" name="q" placeholder="Search...">"#,
        )],
        "feedback" => vec![
            field("Name", r#"<input type="text" name="name">"#),
            field("Email", r#"<input type="email" name="email">"#),
            field(
                "Rating",
                r#"<select name="rating"><option>5</option><option>4</option><option>3</option><option>2</option><option>1</option></select>"#,
            ),
            field("Comments", r#"<textarea name="comments" rows="4"></textarea>"#),
        ],
        "order" => vec![
            field("Name", r#"<input type="text" name="name" required>"#),
            field("Email", r#"<input type="email" name="email" required>"#),
            field("Product", r#"<input type="text" name="product" required>"#),
            field(
                "Quantity",
                r#"<input type="number" name="quantity" min="1" value="1">"#,
            ),
            field("Address", r#"<textarea name="address" rows="3" required></textarea>"#),
        ],
        _ => vec![
            field("Name", r#"<input type="text" name="name" required>"#),
            field("Email", r#"<input type="email" name="email" required>"#),
            field("Subject", r#"<input type="text" name="subject">"#),
            field("Message", r#"<textarea name="message" rows="5" required></textarea>"#),
        ],
    };
    fields.concat()
}

fn submit_label(name: &str) -> &'static str {
    match name {
        "login" => "Log in",
        "registration" => "Sign up",
        "search" => "Search",
        "order" => "Place order",
        _ => "Send",
    }
}

fn form_kind(cmd: &Command) -> &'static str {
    if cmd.has_any(&["login", "log in", "sign in", "signin"]) {
        "login"
    } else if cmd.has_any(&["registration", "register", "signup", "sign up"]) {
        "registration"
    } else if cmd.has("search") {
        "search"
    } else if cmd.has("feedback") {
        "feedback"
    } else if cmd.has("order") {
        "order"
    } else {
        "contact"
    }
}

/// `add contact form`, `create login form posting to /session`.
pub fn form(cmd: &Command, file: &Path) -> Vec<Action> {
    if !wants_form(cmd) {
        return Vec::new();
    }

    let kind = form_kind(cmd);
    let method = if GET_METHOD.is_match(&cmd.raw) { "get" } else { "post" };
    let action = capture(&ACTION_URL, &cmd.raw)
        .map(|url| format!(" action=\"{}\"", escape_attr(&url)))
        .unwrap_or_default();

    let html = format!(
        "<form class=\"{}-form\"{} method=\"{}\">\n{}  <button type=\"submit\">{}</button>\n</form>",
        kind,
        action,
        method,
        form_template(kind),
        submit_label(kind)
    );
    vec![add_block(file, html)]
}

/// `add submit button labeled "Send"`.
pub fn button(cmd: &Command, file: &Path) -> Vec<Action> {
    if !cmd.has_any_word(INSERT_VERBS) || !cmd.has_word("button") || wants_form(cmd) {
        return Vec::new();
    }

    let kind = match capture(&BUTTON_TYPE, &cmd.raw) {
        Some(t) => t.to_lowercase(),
        None if cmd.has_word("reset") => "reset".to_string(),
        None if cmd.has_word("submit") => "submit".to_string(),
        None => "button".to_string(),
    };

    let label = capture(&QUOTED_LABEL, &cmd.raw)
        .or_else(|| capture(&BUTTON_LABEL, &cmd.raw))
        .unwrap_or_else(|| {
            match kind.as_str() {
                "submit" => "Submit",
                "reset" => "Reset",
                _ => "Click me",
            }
            .to_string()
        });

    let html = format!("<button type=\"{}\">{}</button>", kind, escape_text(&label));
    vec![add_block(file, html)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(actions: &[Action]) -> &str {
        match actions {
            [Action::AddBlock {
                parent_selector,
                html_block,
                ..
            }] => {
                assert_eq!(parent_selector, "body");
                html_block
            }
            other => panic!("expected one addBlock, got {:?}", other),
        }
    }

    fn run(f: fn(&Command, &Path) -> Vec<Action>, text: &str) -> Vec<Action> {
        f(&Command::new(text), Path::new("index.html"))
    }

    #[test]
    fn contact_form_has_expected_fields() {
        let actions = run(form, "add contact form");
        let html = block(&actions);
        for name in ["name", "email", "subject", "message"] {
            assert!(html.contains(&format!("name=\"{}\"", name)), "{}", name);
        }
        assert!(html.contains("method=\"post\""));
        assert!(!html.contains("action="));
    }

    #[test]
    fn form_template_action_and_method() {
        let actions = run(form, "create a signup form that submits to /join using GET");
        let html = block(&actions);
        assert!(html.contains("class=\"registration-form\""));
        assert!(html.contains("action=\"/join\""));
        assert!(html.contains("method=\"get\""));
        assert!(html.contains("name=\"confirm_password\""));
    }

    #[test]
    fn input_kind_and_attributes() {
        let actions = run(
            input,
            "add email input named contact_email with placeholder \"you@example.com\" required",
        );
        assert_eq!(
            block(&actions),
            "<input type=\"email\" name=\"contact_email\" placeholder=\"you@example.com\" required>"
        );
    }

    #[test]
    fn datetime_wins_over_date_and_time() {
        let actions = run(input, "add datetime input");
        assert_eq!(block(&actions), "<input type=\"datetime-local\">");
    }

    #[test]
    fn numeric_input_bounds() {
        let actions = run(input, "add number input min 1 max 10 step 0.5 default 3");
        assert_eq!(
            block(&actions),
            "<input type=\"number\" min=\"1\" max=\"10\" step=\"0.5\" value=\"3\">"
        );
    }

    #[test]
    fn textarea_input() {
        let actions = run(input, "add textarea input placeholder 'Your message'");
        assert_eq!(
            block(&actions),
            "<textarea placeholder=\"Your message\"></textarea>"
        );
    }

    #[test]
    fn quoted_text_does_not_pick_the_kind() {
        let actions = run(input, "add input with placeholder \"Search here\"");
        assert!(block(&actions).starts_with("<input type=\"text\""));
    }

    #[test]
    fn input_request_is_not_a_form() {
        assert!(run(form, "add input to the form").is_empty());
        assert_eq!(run(input, "add input to the form").len(), 1);
    }

    #[test]
    fn button_label_and_type() {
        let actions = run(button, "add submit button labeled \"Send now\"");
        assert_eq!(block(&actions), "<button type=\"submit\">Send now</button>");

        let actions = run(button, "add button saying Click <here>");
        assert_eq!(block(&actions), "<button type=\"button\">Click &lt;here&gt;</button>");

        let actions = run(button, "add reset button");
        assert_eq!(block(&actions), "<button type=\"reset\">Reset</button>");
    }

    #[test]
    fn form_with_button_is_one_block() {
        assert!(run(button, "add contact form with a submit button").is_empty());
        assert_eq!(run(form, "add contact form with a submit button").len(), 1);
    }
}
