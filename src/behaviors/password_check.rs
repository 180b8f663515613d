//! Registration-form password confirmation: a submit guard plus live
//! validity classes on both password fields.

use crate::*;

const BEHAVIOR: &str = "password_check";

pub fn install(page: &mut Page) -> Result<()> {
    let first = page.bind(BEHAVIOR, "#id_password1")?;
    let second = page.bind(BEHAVIOR, "#id_password2")?;
    let form = page.bind(BEHAVIOR, "#register_form")?;

    page.add_listener(
        form,
        EventKind::Submit,
        Rc::new(move |dom, scope| {
            let a = dom.value(first).unwrap_or_default();
            let b = dom.value(second).unwrap_or_default();
            if a != b {
                scope.prevent_default();
                scope
                    .platform
                    .trace("password_check: mismatch, submission cancelled".to_string());
            }
            Ok(())
        }),
    );

    for field in [first, second] {
        page.add_listener(
            field,
            EventKind::Input,
            Rc::new(move |dom, _scope| check_equality(dom, first, second)),
        );
    }

    page.trace_note("password_check: installed".to_string());
    Ok(())
}

/// Reflects the match state of the pair onto both fields. Incomplete input
/// is neutral; only a complete pair gets a validity class.
fn check_equality(dom: &mut Dom, first: NodeId, second: NodeId) -> Result<()> {
    let a = dom.value(first).unwrap_or_default();
    let b = dom.value(second).unwrap_or_default();

    for field in [first, second] {
        let mut classes = dom.class_list(field);
        if a.is_empty() || b.is_empty() {
            classes.remove("is-invalid");
            classes.remove("is-valid");
        } else if a == b {
            classes.remove("is-invalid");
            classes.add("is-valid");
        } else {
            classes.remove("is-valid");
            classes.add("is-invalid");
        }
        dom.set_class_list(field, &classes)?;
    }
    Ok(())
}
