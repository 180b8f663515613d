use super::*;

const REVIEW_FORM_HTML: &str = r#"
    <div id="rating_input_gauge" class="gauge rating-3 active"></div>
    <select id="review_rating" name="rating">
      <option value="1">1</option>
      <option value="2">2</option>
      <option value="3" selected>3</option>
      <option value="4">4</option>
      <option value="5">5</option>
    </select>
"#;

fn rating_page() -> Result<Page> {
    let mut page = Page::from_html(REVIEW_FORM_HTML)?;
    behaviors::rating_input::install(&mut page)?;
    Ok(page)
}

#[test]
fn initial_value_comes_from_the_selected_option() -> Result<()> {
    let page = rating_page()?;
    page.assert_value("#review_rating", "3")?;
    page.assert_classes("#rating_input_gauge", "gauge rating-3 active")?;
    Ok(())
}

#[test]
fn change_swaps_the_rating_token_in_place() -> Result<()> {
    let mut page = rating_page()?;

    page.change_value("#review_rating", "5")?;
    page.assert_classes("#rating_input_gauge", "gauge rating-5 active")?;

    page.change_value("#review_rating", "1")?;
    page.assert_classes("#rating_input_gauge", "gauge rating-1 active")?;
    Ok(())
}

#[test]
fn gauge_without_a_rating_token_is_left_untouched() -> Result<()> {
    let mut page = Page::from_html(
        r#"
        <div id="rating_input_gauge" class="gauge active"></div>
        <select id="review_rating"><option value="1" selected>1</option></select>
        "#,
    )?;
    behaviors::rating_input::install(&mut page)?;

    page.change_value("#review_rating", "2")?;
    page.assert_classes("#rating_input_gauge", "gauge active")?;
    Ok(())
}

#[test]
fn token_match_is_case_insensitive() -> Result<()> {
    let mut page = Page::from_html(
        r#"
        <div id="rating_input_gauge" class="gauge Rating-4"></div>
        <select id="review_rating"><option value="2" selected>2</option></select>
        "#,
    )?;
    behaviors::rating_input::install(&mut page)?;

    page.change_value("#review_rating", "2")?;
    page.assert_classes("#rating_input_gauge", "gauge rating-2")?;
    Ok(())
}

#[test]
fn only_the_first_matching_token_is_replaced() -> Result<()> {
    let mut page = Page::from_html(
        r#"
        <div id="rating_input_gauge" class="rating-1 rating-2"></div>
        <select id="review_rating"><option value="5" selected>5</option></select>
        "#,
    )?;
    behaviors::rating_input::install(&mut page)?;

    page.change_value("#review_rating", "5")?;
    page.assert_classes("#rating_input_gauge", "rating-5 rating-2")?;
    Ok(())
}

#[test]
fn lookalike_tokens_do_not_match() -> Result<()> {
    let mut page = Page::from_html(
        r#"
        <div id="rating_input_gauge" class="rating-6 ratings-2 rating-11"></div>
        <select id="review_rating"><option value="3" selected>3</option></select>
        "#,
    )?;
    behaviors::rating_input::install(&mut page)?;

    page.change_value("#review_rating", "3")?;
    page.assert_classes("#rating_input_gauge", "rating-6 ratings-2 rating-11")?;
    Ok(())
}

#[test]
fn missing_gauge_fails_at_install() -> Result<()> {
    let mut page = Page::from_html(
        "<select id='review_rating'><option value='1' selected>1</option></select>",
    )?;

    match behaviors::rating_input::install(&mut page) {
        Err(Error::BindingMissing { behavior, selector }) => {
            assert_eq!(behavior, "rating_input");
            assert_eq!(selector, "#rating_input_gauge");
        }
        other => panic!("expected BindingMissing, got {other:?}"),
    }
    Ok(())
}
