use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum EventKind {
    Input,
    Keyup,
    Change,
    Focus,
    Blur,
    Submit,
}

impl EventKind {
    pub(crate) fn parse(name: &str) -> Result<Self> {
        match name {
            "input" => Ok(Self::Input),
            "keyup" => Ok(Self::Keyup),
            "change" => Ok(Self::Change),
            "focus" => Ok(Self::Focus),
            "blur" => Ok(Self::Blur),
            "submit" => Ok(Self::Submit),
            _ => Err(Error::Behavior(format!("unsupported event type: {name}"))),
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Keyup => "keyup",
            Self::Change => "change",
            Self::Focus => "focus",
            Self::Blur => "blur",
            Self::Submit => "submit",
        }
    }
}

pub(crate) type ListenerFn = dyn Fn(&mut Dom, &mut EventScope<'_>) -> Result<()>;

#[derive(Default)]
pub(crate) struct ListenerMap {
    entries: HashMap<(NodeId, EventKind), Vec<Rc<ListenerFn>>>,
}

impl ListenerMap {
    pub(crate) fn add(&mut self, node: NodeId, kind: EventKind, listener: Rc<ListenerFn>) {
        self.entries.entry((node, kind)).or_default().push(listener);
    }

    /// Snapshot of the listeners for one target, invocation order.
    pub(crate) fn for_target(&self, node: NodeId, kind: EventKind) -> Vec<Rc<ListenerFn>> {
        self.entries
            .get(&(node, kind))
            .cloned()
            .unwrap_or_default()
    }
}

/// Per-event view handed to listeners: the target, a cancel flag for the
/// default action, and the platform services a real page would reach
/// through `window`.
pub(crate) struct EventScope<'a> {
    pub(crate) target: NodeId,
    pub(crate) kind: EventKind,
    pub(crate) default_prevented: bool,
    pub(crate) platform: &'a mut PlatformState,
}

impl EventScope<'_> {
    pub(crate) fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct EventOutcome {
    pub(crate) default_prevented: bool,
}

/// One form submission the host would have transmitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub form_id: Option<String>,
    pub action: String,
    pub method: String,
}

#[derive(Debug)]
pub(crate) struct TraceState {
    pub(crate) enabled: bool,
    pub(crate) to_stderr: bool,
    pub(crate) logs: VecDeque<String>,
    pub(crate) log_limit: usize,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            enabled: false,
            to_stderr: false,
            logs: VecDeque::new(),
            log_limit: 256,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct PlatformState {
    pub(crate) confirm_responses: VecDeque<bool>,
    pub(crate) default_confirm_response: bool,
    pub(crate) confirm_messages: Vec<String>,
    pub(crate) submissions: Vec<FormSubmission>,
    pub(crate) trace: TraceState,
}

impl PlatformState {
    /// Resolves a blocking confirm dialog from the scripted responses,
    /// falling back to the default response when the queue is empty.
    pub(crate) fn confirm(&mut self, message: &str) -> bool {
        self.confirm_messages.push(message.to_string());
        let accepted = self
            .confirm_responses
            .pop_front()
            .unwrap_or(self.default_confirm_response);
        self.trace(format!("confirm: \"{message}\" -> {accepted}"));
        accepted
    }

    /// Records the native transmission of a form. This is the `form.submit()`
    /// path: no submit listeners run, the request just goes out.
    pub(crate) fn record_submission(&mut self, dom: &Dom, form: NodeId) {
        let submission = FormSubmission {
            form_id: dom.attr(form, "id"),
            action: dom.attr(form, "action").unwrap_or_default(),
            method: dom.attr(form, "method").unwrap_or_else(|| "get".to_string()),
        };
        self.trace(format!(
            "submission: id={} action={} method={}",
            submission.form_id.as_deref().unwrap_or("-"),
            submission.action,
            submission.method
        ));
        self.submissions.push(submission);
    }

    pub(crate) fn trace(&mut self, line: String) {
        if !self.trace.enabled {
            return;
        }
        if self.trace.to_stderr {
            eprintln!("[form_glue] {line}");
        }
        self.trace.logs.push_back(line);
        while self.trace.logs.len() > self.trace.log_limit {
            self.trace.logs.pop_front();
        }
    }
}
