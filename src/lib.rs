//! Deterministic in-memory page harness for server-rendered form behaviors.
//!
//! `form_glue` hosts the small client-side behaviors of an account/review web
//! app — password confirmation, a password strength hint panel, a delete
//! confirmation guard, and a star-rating gauge reflector — on a simulated
//! page instead of a browser. Each behavior is an explicit `install`
//! function that binds event listeners to a [`Page`] built from HTML; the
//! page dispatches events synchronously and records the side effects a real
//! browser would perform (form transmissions, confirm dialogs) so tests can
//! observe them.
//!
//! ```
//! use form_glue::{behaviors, Page};
//!
//! # fn main() -> form_glue::Result<()> {
//! let mut page = Page::from_html(
//!     r#"
//!     <form id="register_form" action="/register" method="post">
//!       <input id="id_password1" type="password">
//!       <input id="id_password2" type="password">
//!     </form>
//!     "#,
//! )?;
//! behaviors::password_check::install(&mut page)?;
//!
//! page.type_text("#id_password1", "Secret1!")?;
//! page.type_text("#id_password2", "Secret1!")?;
//! assert!(page.has_class("#id_password1", "is-valid")?);
//!
//! page.submit("#register_form")?;
//! assert_eq!(page.take_form_submissions().len(), 1);
//! # Ok(())
//! # }
//! ```

use std::collections::{HashMap, VecDeque};
use std::error::Error as StdError;
use std::fmt;
use std::rc::Rc;

pub mod behaviors;
mod dom;
mod events;
mod html;
mod selector;

pub(crate) use dom::*;
pub(crate) use events::*;
pub(crate) use selector::*;

pub use events::FormSubmission;

#[cfg(test)]
mod tests;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    SelectorNotFound(String),
    UnsupportedSelector(String),
    BindingMissing {
        behavior: String,
        selector: String,
    },
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    Behavior(String),
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::SelectorNotFound(selector) => write!(f, "selector not found: {selector}"),
            Self::UnsupportedSelector(selector) => write!(f, "unsupported selector: {selector}"),
            Self::BindingMissing { behavior, selector } => {
                write!(f, "missing required binding for {behavior}: {selector}")
            }
            Self::TypeMismatch {
                selector,
                expected,
                actual,
            } => write!(
                f,
                "type mismatch for {selector}: expected {expected}, actual {actual}"
            ),
            Self::Behavior(msg) => write!(f, "behavior error: {msg}"),
            Self::AssertionFailed {
                selector,
                expected,
                actual,
                dom_snippet,
            } => write!(
                f,
                "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
            ),
        }
    }
}

impl StdError for Error {}

/// A loaded page: the DOM, the registered listeners, and the platform
/// services (confirm dialog, submission log, trace) behaviors reach through.
pub struct Page {
    dom: Dom,
    listeners: ListenerMap,
    platform: PlatformState,
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        Ok(Self {
            dom: html::parse_html(html)?,
            listeners: ListenerMap::default(),
            platform: PlatformState::default(),
        })
    }

    /// Types into an input or textarea: sets the value, then fires `input`
    /// and `keyup`, the pair a keyboard edit produces.
    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one_node(selector)?;
        if self.dom.disabled(target) || self.dom.readonly(target) {
            return Ok(());
        }

        let tag = self
            .dom
            .tag_name(target)
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if tag != "input" && tag != "textarea" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: if tag.is_empty() { "non-element".into() } else { tag },
            });
        }

        self.dom.set_value(target, text)?;
        self.dispatch_event(target, EventKind::Input)?;
        self.dispatch_event(target, EventKind::Keyup)?;
        Ok(())
    }

    /// Commits a new value on a form control: sets it, then fires `input`
    /// and `change` like a completed select/slider interaction.
    pub fn change_value(&mut self, selector: &str, value: &str) -> Result<()> {
        let target = self.select_one_node(selector)?;
        if self.dom.disabled(target) {
            return Ok(());
        }
        if self.dom.element(target).is_none() {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "form control".into(),
                actual: "non-element".into(),
            });
        }

        self.dom.set_value(target, value)?;
        self.dispatch_event(target, EventKind::Input)?;
        self.dispatch_event(target, EventKind::Change)?;
        Ok(())
    }

    pub fn focus(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one_node(selector)?;
        self.focus_node(target)
    }

    pub fn blur(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one_node(selector)?;
        self.blur_node(target)
    }

    fn focus_node(&mut self, node: NodeId) -> Result<()> {
        let is_hidden_input = self
            .dom
            .tag_name(node)
            .is_some_and(|tag| tag.eq_ignore_ascii_case("input"))
            && self
                .dom
                .attr(node, "type")
                .unwrap_or_else(|| "text".to_string())
                .eq_ignore_ascii_case("hidden");
        if is_hidden_input || self.dom.disabled(node) {
            return Ok(());
        }

        if self.dom.active_element == Some(node) {
            return Ok(());
        }

        if let Some(current) = self.dom.active_element {
            self.blur_node(current)?;
        }

        self.dom.active_element = Some(node);
        self.dispatch_event(node, EventKind::Focus)?;
        Ok(())
    }

    fn blur_node(&mut self, node: NodeId) -> Result<()> {
        if self.dom.active_element != Some(node) {
            return Ok(());
        }

        self.dispatch_event(node, EventKind::Blur)?;
        self.dom.active_element = None;
        Ok(())
    }

    /// Submits a form the way a user would: the `submit` event runs first,
    /// and the transmission is recorded only when no listener prevented it.
    pub fn submit(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one_node(selector)?;
        let tag = self
            .dom
            .tag_name(target)
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if tag != "form" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "form".into(),
                actual: if tag.is_empty() { "non-element".into() } else { tag },
            });
        }

        let outcome = self.dispatch_event(target, EventKind::Submit)?;
        if !outcome.default_prevented {
            self.platform.record_submission(&self.dom, target);
        }
        Ok(())
    }

    pub fn dispatch(&mut self, selector: &str, event: &str) -> Result<()> {
        let target = self.select_one_node(selector)?;
        let kind = EventKind::parse(event)?;
        self.dispatch_event(target, kind)?;
        Ok(())
    }

    pub(crate) fn dispatch_event(&mut self, target: NodeId, kind: EventKind) -> Result<EventOutcome> {
        let description = self.describe_node(target);
        self.platform
            .trace(format!("dispatch: {} on {description}", kind.as_str()));

        let handlers = self.listeners.for_target(target, kind);
        let mut scope = EventScope {
            target,
            kind,
            default_prevented: false,
            platform: &mut self.platform,
        };
        for handler in &handlers {
            handler(&mut self.dom, &mut scope)?;
        }

        let outcome = EventOutcome {
            default_prevented: scope.default_prevented,
        };
        let done = format!(
            "dispatch done: {} on {description} listeners={} prevented={}",
            scope.kind.as_str(),
            handlers.len(),
            outcome.default_prevented
        );
        self.platform.trace(done);
        Ok(outcome)
    }

    pub(crate) fn add_listener(&mut self, node: NodeId, kind: EventKind, listener: Rc<ListenerFn>) {
        self.listeners.add(node, kind, listener);
    }

    pub(crate) fn select_one_node(&self, selector: &str) -> Result<NodeId> {
        select_one(&self.dom, selector)
    }

    pub(crate) fn select_all_nodes(&self, selector: &str) -> Result<Vec<NodeId>> {
        select_all(&self.dom, selector)
    }

    /// Required binding lookup for a behavior installer. Missing elements
    /// fail fast here instead of deep inside an event listener.
    pub(crate) fn bind(&self, behavior: &str, selector: &str) -> Result<NodeId> {
        self.select_all_nodes(selector)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::BindingMissing {
                behavior: behavior.to_string(),
                selector: selector.to_string(),
            })
    }

    /// Optional binding lookup: absent elements simply yield `None`.
    pub(crate) fn try_bind(&self, selector: &str) -> Result<Option<NodeId>> {
        Ok(self.select_all_nodes(selector)?.into_iter().next())
    }

    pub(crate) fn trace_note(&mut self, line: String) {
        self.platform.trace(line);
    }

    pub fn value(&self, selector: &str) -> Result<String> {
        let target = self.select_one_node(selector)?;
        self.dom.value(target).ok_or_else(|| Error::TypeMismatch {
            selector: selector.to_string(),
            expected: "form control".into(),
            actual: "non-element".into(),
        })
    }

    pub fn text(&self, selector: &str) -> Result<String> {
        let target = self.select_one_node(selector)?;
        Ok(self.dom.text_content(target))
    }

    pub fn classes(&self, selector: &str) -> Result<Vec<String>> {
        let target = self.select_one_node(selector)?;
        Ok(self.dom.class_list(target).tokens().to_vec())
    }

    pub fn has_class(&self, selector: &str, class_name: &str) -> Result<bool> {
        let target = self.select_one_node(selector)?;
        Ok(self.dom.has_class(target, class_name))
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        self.select_one_node(selector)?;
        Ok(())
    }

    pub fn assert_value(&self, selector: &str, expected: &str) -> Result<()> {
        let actual = self.value(selector)?;
        if actual == expected {
            return Ok(());
        }
        Err(self.assertion_failed(selector, expected, &actual))
    }

    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let actual = self.text(selector)?;
        if actual.trim() == expected {
            return Ok(());
        }
        Err(self.assertion_failed(selector, expected, actual.trim()))
    }

    /// Compares the full class attribute, whitespace-normalized, token order
    /// preserved.
    pub fn assert_classes(&self, selector: &str, expected: &str) -> Result<()> {
        let actual = self.classes(selector)?.join(" ");
        let expected_normalized = ClassList::parse(Some(expected))
            .as_attr()
            .unwrap_or_default();
        if actual == expected_normalized {
            return Ok(());
        }
        Err(self.assertion_failed(selector, &expected_normalized, &actual))
    }

    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        let target = self.select_one_node(selector)?;
        Ok(self.dom.dump_node(target))
    }

    fn assertion_failed(&self, selector: &str, expected: &str, actual: &str) -> Error {
        let snippet = self
            .select_one_node(selector)
            .map(|node| truncate_chars(&self.dom.dump_node(node), 160))
            .unwrap_or_default();
        Error::AssertionFailed {
            selector: selector.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
            dom_snippet: snippet,
        }
    }

    fn describe_node(&self, node: NodeId) -> String {
        let tag = self.dom.tag_name(node).unwrap_or("?");
        match self.dom.attr(node, "id") {
            Some(id) => format!("{tag}#{id}"),
            None => tag.to_string(),
        }
    }

    pub fn enqueue_confirm_response(&mut self, accepted: bool) {
        self.platform.confirm_responses.push_back(accepted);
    }

    pub fn set_default_confirm_response(&mut self, accepted: bool) {
        self.platform.default_confirm_response = accepted;
    }

    pub fn take_confirm_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.platform.confirm_messages)
    }

    pub fn take_form_submissions(&mut self) -> Vec<FormSubmission> {
        std::mem::take(&mut self.platform.submissions)
    }

    pub fn enable_trace(&mut self, enabled: bool) {
        self.platform.trace.enabled = enabled;
    }

    pub fn set_trace_stderr(&mut self, enabled: bool) {
        self.platform.trace.to_stderr = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::Behavior(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.platform.trace.log_limit = max_entries;
        while self.platform.trace.logs.len() > self.platform.trace.log_limit {
            self.platform.trace.logs.pop_front();
        }
        Ok(())
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.platform.trace.logs.drain(..).collect()
    }
}

pub(crate) fn truncate_chars(value: &str, max_chars: usize) -> String {
    let mut it = value.chars();
    let mut out = String::new();
    for _ in 0..max_chars {
        let Some(ch) = it.next() else {
            return out;
        };
        out.push(ch);
    }
    if it.next().is_some() {
        out.push_str("...");
    }
    out
}
