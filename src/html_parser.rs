use std::collections::BTreeSet;
use std::fmt;

use select::document::Document;
use select::node::Node;
use select::predicate::Predicate;

use crate::resolver::resolve;
use crate::site::SiteTarget;

/// Deduplicated absolute URLs for one category.
pub type AssetSet = BTreeSet<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssetCategory {
    Stylesheet,
    Script,
    Image,
    /// Reserved for further asset kinds. Has no selector and never collects anything.
    Other,
}

impl AssetCategory {
    /// Categories that are discovered, downloaded and rewritten.
    pub const MIRRORED: [AssetCategory; 3] =
        [AssetCategory::Stylesheet, AssetCategory::Script, AssetCategory::Image];

    /// Subdirectory of the mirror root holding this category's files.
    pub fn directory(self) -> &'static str {
        match self {
            AssetCategory::Stylesheet => "css",
            AssetCategory::Script => "js",
            AssetCategory::Image => "images",
            AssetCategory::Other => "other",
        }
    }

    pub fn selector(self) -> Option<AssetSelector> {
        match self {
            AssetCategory::Stylesheet => Some(AssetSelector {
                tag: "link",
                attr: "href",
                required: Some(("rel", "stylesheet")),
            }),
            AssetCategory::Script => Some(AssetSelector {
                tag: "script",
                attr: "src",
                required: None,
            }),
            AssetCategory::Image => Some(AssetSelector {
                tag: "img",
                attr: "src",
                required: None,
            }),
            AssetCategory::Other => None,
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetCategory::Stylesheet => "stylesheet",
            AssetCategory::Script => "script",
            AssetCategory::Image => "image",
            AssetCategory::Other => "other",
        };
        f.write_str(name)
    }
}

/// `tag[attr]`, optionally narrowed by a `[name="value"]` match. Values are
/// compared ASCII case-insensitively, as HTML does for `rel`.
///
/// Shared by discovery (as a `select` predicate) and by the rewriter (over
/// raw element names and attributes) so both see the same elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetSelector {
    pub tag: &'static str,
    /// Attribute holding the asset reference.
    pub attr: &'static str,
    pub required: Option<(&'static str, &'static str)>,
}

impl AssetSelector {
    /// Matches an element given its local name and an attribute lookup.
    pub fn matches_element<'a, F>(&self, name: &str, lookup: F) -> bool
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        if !name.eq_ignore_ascii_case(self.tag) || lookup(self.attr).is_none() {
            return false;
        }
        match self.required {
            Some((attr, value)) => lookup(attr).is_some_and(|v| v.eq_ignore_ascii_case(value)),
            None => true,
        }
    }
}

impl Predicate for AssetSelector {
    fn matches(&self, node: &Node) -> bool {
        match node.name() {
            Some(name) => self.matches_element(name, |attr| node.attr(attr)),
            None => false,
        }
    }
}

/// Resolved asset URLs found on one page, per mirrored category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetInventory {
    pub stylesheets: AssetSet,
    pub scripts: AssetSet,
    pub images: AssetSet,
}

impl AssetInventory {
    pub fn get(&self, category: AssetCategory) -> Option<&AssetSet> {
        match category {
            AssetCategory::Stylesheet => Some(&self.stylesheets),
            AssetCategory::Script => Some(&self.scripts),
            AssetCategory::Image => Some(&self.images),
            AssetCategory::Other => None,
        }
    }

    /// Every `(category, url)` pair, one per download to issue.
    pub fn iter(&self) -> impl Iterator<Item = (AssetCategory, &str)> + '_ {
        AssetCategory::MIRRORED.into_iter().flat_map(move |category| {
            self.get(category)
                .into_iter()
                .flatten()
                .map(move |url| (category, url.as_str()))
        })
    }

    pub fn len(&self) -> usize {
        self.stylesheets.len() + self.scripts.len() + self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Discovers asset references on a page.
#[derive(Clone)]
pub struct HtmlParser {
    site: SiteTarget,
}

impl HtmlParser {
    pub fn new(site: SiteTarget) -> Self {
        Self { site }
    }

    /// Raw, non-empty reference strings for `category`, in document order.
    pub fn references<'a>(&self, document: &'a Document, category: AssetCategory) -> Vec<&'a str> {
        let Some(selector) = category.selector() else {
            return Vec::new();
        };
        document
            .find(selector)
            .filter_map(|node| node.attr(selector.attr))
            .filter(|value| !value.is_empty())
            .collect()
    }

    /// Resolved, deduplicated URLs for `category`. Does not touch the document.
    pub fn collect(&self, document: &Document, category: AssetCategory) -> AssetSet {
        self.references(document, category)
            .into_iter()
            .map(|reference| resolve(reference, &self.site))
            .collect()
    }

    /// Parses `html` once and collects every mirrored category.
    pub fn collect_all(&self, html: &str) -> AssetInventory {
        let document = Document::from(html);
        AssetInventory {
            stylesheets: self.collect(&document, AssetCategory::Stylesheet),
            scripts: self.collect(&document, AssetCategory::Script),
            images: self.collect(&document, AssetCategory::Image),
        }
    }
}
