use super::*;

/// Simple compound selector: optional tag, optional `#id`, zero or more
/// `.class` parts. Combinators, attributes, and pseudo-classes are not
/// needed by any page behavior and are rejected as unsupported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Selector {
    pub(crate) tag: Option<String>,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
}

impl Selector {
    pub(crate) fn id_only(&self) -> Option<&str> {
        if self.tag.is_none() && self.classes.is_empty() {
            self.id.as_deref()
        } else {
            None
        }
    }

    pub(crate) fn matches(&self, dom: &Dom, node: NodeId) -> bool {
        let Some(element) = dom.element(node) else {
            return false;
        };
        if let Some(tag) = &self.tag {
            if !element.tag_name.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.attrs.get("id") != Some(id) {
                return false;
            }
        }
        if self.classes.is_empty() {
            return true;
        }
        let classes = dom.class_list(node);
        self.classes.iter().all(|class| classes.contains(class))
    }
}

pub(crate) fn parse_selector(selector: &str) -> Result<Selector> {
    let trimmed = selector.trim();
    if trimmed.is_empty() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }

    let mut parsed = Selector::default();
    let mut chars = trimmed.chars().peekable();

    if matches!(chars.peek(), Some(ch) if is_name_char(*ch)) {
        let mut tag = String::new();
        while let Some(ch) = chars.peek().copied() {
            if !is_name_char(ch) {
                break;
            }
            tag.push(ch);
            chars.next();
        }
        parsed.tag = Some(tag.to_ascii_lowercase());
    }

    while let Some(marker) = chars.next() {
        let mut name = String::new();
        while let Some(ch) = chars.peek().copied() {
            if !is_name_char(ch) {
                break;
            }
            name.push(ch);
            chars.next();
        }
        if name.is_empty() {
            return Err(Error::UnsupportedSelector(selector.into()));
        }
        match marker {
            '#' => {
                if parsed.id.is_some() {
                    return Err(Error::UnsupportedSelector(selector.into()));
                }
                parsed.id = Some(name);
            }
            '.' => parsed.classes.push(name),
            _ => return Err(Error::UnsupportedSelector(selector.into())),
        }
    }

    Ok(parsed)
}

pub(crate) fn select_all(dom: &Dom, selector: &str) -> Result<Vec<NodeId>> {
    let parsed = parse_selector(selector)?;

    if let Some(id) = parsed.id_only() {
        return Ok(dom.by_id(id).into_iter().collect());
    }

    Ok(dom
        .elements_in_order()
        .into_iter()
        .filter(|node| parsed.matches(dom, *node))
        .collect())
}

pub(crate) fn select_one(dom: &Dom, selector: &str) -> Result<NodeId> {
    select_all(dom, selector)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::SelectorNotFound(selector.into()))
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}
