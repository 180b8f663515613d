use super::*;
use crate::behaviors::confirm_delete::CONFIRM_MESSAGE;

const REVIEW_LIST_HTML: &str = r#"
    <form id="delete-review-4" class="delete-review-form" action="/reviews/4/delete" method="post">
      <input type="hidden" name="csrfmiddlewaretoken" value="tok">
      <button type="submit">Delete</button>
    </form>
    <form id="delete-review-9" class="delete-review-form" action="/reviews/9/delete" method="post">
      <input type="hidden" name="csrfmiddlewaretoken" value="tok">
      <button type="submit">Delete</button>
    </form>
    <form id="search" action="/search" method="get"></form>
"#;

fn review_page() -> Result<Page> {
    let mut page = Page::from_html(REVIEW_LIST_HTML)?;
    behaviors::confirm_delete::install(&mut page)?;
    Ok(page)
}

#[test]
fn guard_always_intercepts_and_asks_first() -> Result<()> {
    let mut page = review_page()?;

    // Default response is decline: the prompt happens, nothing goes out.
    page.submit("#delete-review-4")?;
    assert!(page.take_form_submissions().is_empty());
    assert_eq!(page.take_confirm_messages(), vec![CONFIRM_MESSAGE.to_string()]);
    Ok(())
}

#[test]
fn confirming_transmits_the_form_exactly_once() -> Result<()> {
    let mut page = review_page()?;

    page.enqueue_confirm_response(true);
    page.submit("#delete-review-4")?;

    let sent = page.take_form_submissions();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].form_id.as_deref(), Some("delete-review-4"));
    assert_eq!(sent[0].action, "/reviews/4/delete");
    assert_eq!(sent[0].method, "post");
    Ok(())
}

#[test]
fn declining_cancels_the_submission() -> Result<()> {
    let mut page = review_page()?;

    page.enqueue_confirm_response(false);
    page.submit("#delete-review-9")?;
    assert!(page.take_form_submissions().is_empty());
    assert_eq!(page.take_confirm_messages().len(), 1);
    Ok(())
}

#[test]
fn each_form_is_guarded_independently() -> Result<()> {
    let mut page = review_page()?;

    page.enqueue_confirm_response(false);
    page.enqueue_confirm_response(true);
    page.submit("#delete-review-4")?;
    page.submit("#delete-review-9")?;

    let sent = page.take_form_submissions();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].form_id.as_deref(), Some("delete-review-9"));
    assert_eq!(page.take_confirm_messages().len(), 2);
    Ok(())
}

#[test]
fn unmarked_forms_are_not_guarded() -> Result<()> {
    let mut page = review_page()?;

    page.submit("#search")?;
    assert_eq!(page.take_form_submissions().len(), 1);
    assert!(page.take_confirm_messages().is_empty());
    Ok(())
}

#[test]
fn resubmission_does_not_retrigger_the_guard() -> Result<()> {
    let mut page = review_page()?;

    page.set_default_confirm_response(true);
    page.submit("#delete-review-4")?;

    // One prompt, one transmission: the native resubmit bypasses listeners.
    assert_eq!(page.take_confirm_messages().len(), 1);
    assert_eq!(page.take_form_submissions().len(), 1);
    Ok(())
}

#[test]
fn page_without_marked_forms_installs_cleanly() -> Result<()> {
    let mut page = Page::from_html("<form id='search' action='/search'></form>")?;
    behaviors::confirm_delete::install(&mut page)?;
    page.submit("#search")?;
    assert_eq!(page.take_form_submissions().len(), 1);
    Ok(())
}
