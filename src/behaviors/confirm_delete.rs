//! Delete-review guard: every marked form is intercepted and only goes out
//! after the user confirms the dialog.

use crate::*;

pub const CONFIRM_MESSAGE: &str = "Voulez-vous vraiment supprimer votre avis ?";

pub fn install(page: &mut Page) -> Result<()> {
    let forms = page.select_all_nodes(".delete-review-form")?;
    let count = forms.len();

    for form in forms {
        page.add_listener(
            form,
            EventKind::Submit,
            Rc::new(|dom, scope| {
                // Always intercept first; on confirm the form is transmitted
                // natively, without running submit listeners again.
                scope.prevent_default();
                let form = scope.target;
                if scope.platform.confirm(CONFIRM_MESSAGE) {
                    scope.platform.record_submission(dom, form);
                }
                Ok(())
            }),
        );
    }

    page.trace_note(format!("confirm_delete: guarding {count} form(s)"));
    Ok(())
}
