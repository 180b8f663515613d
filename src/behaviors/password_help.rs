//! Password strength hints: the panel shows while the field has focus, and
//! two independent indicators track length and character variety on every
//! keystroke.

use crate::*;

pub fn install(page: &mut Page) -> Result<()> {
    let bindings = (
        page.try_bind("#new_password")?,
        page.try_bind("#password_help")?,
        page.try_bind("#password_length_check")?,
        page.try_bind("#password_variety_check")?,
    );
    let (Some(field), Some(panel), Some(length_check), Some(variety_check)) = bindings else {
        // Pages without the hint markup simply do not get hints.
        page.trace_note("password_help: bindings absent, disabled".to_string());
        return Ok(());
    };

    page.add_listener(
        field,
        EventKind::Focus,
        Rc::new(move |dom, _scope| {
            let mut classes = dom.class_list(panel);
            classes.remove("d-none");
            dom.set_class_list(panel, &classes)
        }),
    );

    page.add_listener(
        field,
        EventKind::Blur,
        Rc::new(move |dom, _scope| {
            let mut classes = dom.class_list(panel);
            classes.add("d-none");
            dom.set_class_list(panel, &classes)
        }),
    );

    let variety = fancy_regex::Regex::new("[^A-Za-z]")
        .map_err(|err| Error::Behavior(format!("variety pattern: {err}")))?;

    page.add_listener(
        field,
        EventKind::Keyup,
        Rc::new(move |dom, _scope| {
            let value = dom.value(field).unwrap_or_default();
            let value = value.trim();

            let long_enough = value.chars().count() >= 8;
            let varied = variety
                .is_match(value)
                .map_err(|err| Error::Behavior(format!("variety pattern: {err}")))?;

            set_indicator(dom, length_check, long_enough)?;
            set_indicator(dom, variety_check, varied)
        }),
    );

    page.trace_note("password_help: installed".to_string());
    Ok(())
}

// The indicator owns its entire class attribute; the stylesheet keys off the
// single checked/unchecked token.
fn set_indicator(dom: &mut Dom, indicator: NodeId, satisfied: bool) -> Result<()> {
    let mut classes = ClassList::default();
    classes.add(if satisfied { "checked" } else { "unchecked" });
    dom.set_class_list(indicator, &classes)
}
