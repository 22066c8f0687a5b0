use super::Element;
use crate::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Deepest element nesting accepted. The tree is recursive, so unbounded
/// depth would overflow the stack when it is dropped.
pub(super) const MAX_DEPTH: usize = 1024;

/// Build an element tree from MPD text. Text nodes, comments and processing
/// instructions are dropped.
pub(super) fn parse_tree(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                check_depth(&open)?;
                open.push(element_from(e)?);
            }
            Event::Empty(ref e) => {
                check_depth(&open)?;
                let element = element_from(e)?;
                attach(&mut open, &mut root, element)?;
            }
            Event::End(_) => {
                let element = open
                    .pop()
                    .ok_or_else(|| Error::ManifestParse("unexpected closing tag".to_string()))?;
                attach(&mut open, &mut root, element)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(Error::ManifestParse(format!(
            "unexpected end of document inside <{}>",
            unclosed.name()
        )));
    }

    root.ok_or_else(|| Error::ManifestParse("document has no root element".to_string()))
}

fn check_depth(open: &[Element]) -> Result<()> {
    if open.len() >= MAX_DEPTH {
        return Err(Error::ManifestParse("nesting too deep".to_string()));
    }
    Ok(())
}

fn attach(open: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    if let Some(parent) = open.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(Error::ManifestParse("multiple root elements".to_string()));
    }
    *root = Some(element);
    Ok(())
}

fn element_from(start: &BytesStart<'_>) -> Result<Element> {
    let name = utf8(start.local_name().as_ref())?;
    let mut element = Element::new(name);

    for attr in start.attributes() {
        let attr = attr?;
        let key = utf8(attr.key.local_name().as_ref())?;
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }

    Ok(element)
}

fn utf8(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| Error::ManifestParse(e.to_string()))
}
