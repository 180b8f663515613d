//! Star-rating reflector: mirrors the rating control's value into the
//! gauge's `rating-N` class token.

use crate::*;

const BEHAVIOR: &str = "rating_input";

pub fn install(page: &mut Page) -> Result<()> {
    let rating = page.bind(BEHAVIOR, "#review_rating")?;
    let gauge = page.bind(BEHAVIOR, "#rating_input_gauge")?;

    let rating_token = fancy_regex::Regex::new("(?i)^rating-[1-5]$")
        .map_err(|err| Error::Behavior(format!("rating token pattern: {err}")))?;

    page.add_listener(
        rating,
        EventKind::Change,
        Rc::new(move |dom, _scope| {
            let value = dom.value(rating).unwrap_or_default();
            let replacement = format!("rating-{value}");

            // Token-level swap, position preserved. A gauge without a rating
            // token is left untouched.
            let mut classes = dom.class_list(gauge);
            let replaced = classes.replace_matching(
                |token| rating_token.is_match(token).unwrap_or(false),
                &replacement,
            );
            if replaced {
                dom.set_class_list(gauge, &classes)?;
            }
            Ok(())
        }),
    );

    Ok(())
}
