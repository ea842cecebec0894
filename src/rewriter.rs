use anyhow::{Context, Result};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::{parse_document, serialize, Attribute, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

use crate::html_parser::AssetCategory;
use crate::resolver::resolve;
use crate::sanitize::local_path_for;
use crate::site::SiteTarget;

/// Points every stylesheet, script and image reference in `original_html`
/// at its mirrored copy and returns the serialized page.
///
/// Works on a fresh parse and never looks at download results, so an asset
/// that failed to download still gets a local (dangling) reference.
pub fn rewrite(original_html: &str, site: &SiteTarget) -> Result<String> {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(original_html);

    rewrite_node(&dom.document, site);

    let mut out = Vec::new();
    let document: SerializableHandle = dom.document.clone().into();
    serialize(&mut out, &document, Default::default())
        .context("Failed to serialize rewritten page")?;

    String::from_utf8(out).context("Rewritten page is not valid UTF-8")
}

fn rewrite_node(handle: &Handle, site: &SiteTarget) {
    if let NodeData::Element { name, attrs, .. } = &handle.data {
        let mut attrs = attrs.borrow_mut();
        if let Some((category, index)) = match_asset(&name.local, &attrs) {
            let reference = attrs[index].value.to_string();
            let local = local_path_for(category, &resolve(&reference, site));
            attrs[index].value = StrTendril::from(local);
        }
    }

    for child in handle.children.borrow().iter() {
        rewrite_node(child, site);
    }
}

/// Category and index of the reference attribute when the element is a
/// mirrored asset with a non-empty reference.
fn match_asset(tag: &str, attrs: &[Attribute]) -> Option<(AssetCategory, usize)> {
    let lookup = |wanted: &str| {
        attrs
            .iter()
            .find(|attr| &*attr.name.local == wanted)
            .map(|attr| &*attr.value)
    };

    AssetCategory::MIRRORED.into_iter().find_map(|category| {
        let selector = category.selector()?;
        if !selector.matches_element(tag, lookup) {
            return None;
        }
        attrs
            .iter()
            .position(|attr| &*attr.name.local == selector.attr && !attr.value.is_empty())
            .map(|index| (category, index))
    })
}
