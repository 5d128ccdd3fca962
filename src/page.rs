// Page document model
//
// An in-memory stand-in for the document surface the interaction controller
// manipulates. The real markup lives outside this crate (see demo.rs for the
// bundled preview page); the controller only ever talks to this model:
// elements carry ids, classes, attributes, inline styles, text content and
// vertical geometry, and the page tracks viewport scroll state.
//
// Elements are arena-allocated and addressed by `ElementId`, so behavior
// state can hold handles without borrowing the page.

use std::collections::BTreeMap;

/// Handle to an element inside a [`Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// A single element: identity, presentation state and vertical geometry.
#[derive(Debug, Clone, Default)]
pub struct Element {
    /// Document-unique identifier, if the element has one
    pub id: Option<String>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    /// Text content (the typewriter writes here)
    pub text: String,
    parent: Option<ElementId>,
    /// Distance from the top of the document, in px
    pub top: f64,
    /// Rendered height, in px
    pub height: f64,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set vertical geometry: document offset and height
    pub fn at(mut self, top: f64, height: f64) -> Self {
        self.top = top;
        self.height = height;
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Force the presence of a class on or off
    pub fn set_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    /// Flip a class and report whether it is now present
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        self.attrs.insert(name.to_string(), value.into());
    }

    pub fn style(&self, name: &str) -> Option<&str> {
        self.styles.get(name).map(String::as_str)
    }

    pub fn set_style(&mut self, name: &str, value: impl Into<String>) {
        self.styles.insert(name.to_string(), value.into());
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }
}

/// The page: an element arena plus viewport scroll state.
#[derive(Debug, Clone)]
pub struct Page {
    elements: Vec<Element>,
    scroll_y: f64,
    viewport_height: f64,
    document_height: f64,
    meta_theme_color: Option<String>,
}

impl Page {
    /// Create a page with the given viewport and document heights.
    ///
    /// Every page starts with a body element; top-level inserts become its
    /// children, so `is_within(x, body)` holds for everything.
    pub fn new(viewport_height: f64, document_height: f64) -> Self {
        let mut page = Self {
            elements: Vec::new(),
            scroll_y: 0.0,
            viewport_height,
            document_height,
            meta_theme_color: None,
        };
        page.elements
            .push(Element::new().with_id("body").at(0.0, document_height));
        page
    }

    /// The body element, present on every page
    pub fn body(&self) -> ElementId {
        ElementId(0)
    }

    /// Declare a theme-color meta value; pages without one skip meta updates
    pub fn with_meta_theme_color(mut self, color: impl Into<String>) -> Self {
        self.meta_theme_color = Some(color.into());
        self
    }

    /// Insert a top-level element (parented to the body)
    pub fn insert(&mut self, element: Element) -> ElementId {
        self.insert_child(self.body(), element)
    }

    /// Insert an element as a child of an existing one
    pub fn insert_child(&mut self, parent: ElementId, mut element: Element) -> ElementId {
        element.parent = Some(parent);
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    pub fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.0]
    }

    /// Look up an element by its document id
    pub fn find_id(&self, id: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|e| e.id.as_deref() == Some(id))
            .map(ElementId)
    }

    /// First element carrying the given class
    pub fn find_class(&self, class: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|e| e.has_class(class))
            .map(ElementId)
    }

    /// All elements carrying the given class, in document order
    pub fn all_with_class(&self, class: &str) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.has_class(class))
            .map(|(i, _)| ElementId(i))
            .collect()
    }

    /// First descendant of `ancestor` carrying the given class
    pub fn descendant_with_class(&self, ancestor: ElementId, class: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.has_class(class))
            .map(|(i, _)| ElementId(i))
            .find(|&id| id != ancestor && self.is_within(id, ancestor))
    }

    /// Whether `target` is `ancestor` or sits anywhere below it
    pub fn is_within(&self, target: ElementId, ancestor: ElementId) -> bool {
        let mut cursor = Some(target);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.element(id).parent;
        }
        false
    }

    /// All in-page anchor links: elements whose `href` starts with `#`
    pub fn anchors(&self) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.attr("href").is_some_and(|h| h.starts_with('#')))
            .map(|(i, _)| ElementId(i))
            .collect()
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn document_height(&self) -> f64 {
        self.document_height
    }

    /// Largest reachable scroll offset (0 when content fits the viewport)
    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.viewport_height).max(0.0)
    }

    /// Scroll to an absolute offset, clamped to the valid range
    pub fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y.clamp(0.0, self.max_scroll());
    }

    pub fn meta_theme_color(&self) -> Option<&str> {
        self.meta_theme_color.as_deref()
    }

    /// Update the theme-color meta value; a no-op when the page has none
    pub fn set_meta_theme_color(&mut self, color: &str) {
        if let Some(meta) = self.meta_theme_color.as_mut() {
            *meta = color.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with(elements: Vec<Element>) -> Page {
        let mut page = Page::new(600.0, 2000.0);
        for e in elements {
            page.insert(e);
        }
        page
    }

    #[test]
    fn test_find_by_id_and_class() {
        let page = page_with(vec![
            Element::new().with_id("hero").with_class("section"),
            Element::new().with_class("section"),
        ]);

        assert_eq!(page.find_id("hero"), Some(ElementId(1)));
        assert_eq!(page.find_id("missing"), None);
        assert_eq!(page.find_class("section"), Some(ElementId(1)));
        assert_eq!(page.all_with_class("section").len(), 2);
    }

    #[test]
    fn test_descendant_lookup_walks_parents() {
        let mut page = Page::new(600.0, 2000.0);
        let nav = page.insert(Element::new().with_class("nav"));
        let item = page.insert_child(nav, Element::new().with_class("item"));
        let leaf = page.insert_child(item, Element::new().with_class("link"));
        let outside = page.insert(Element::new().with_class("link"));

        assert!(page.is_within(leaf, nav));
        assert!(page.is_within(nav, nav));
        assert!(!page.is_within(outside, nav));
        assert_eq!(page.descendant_with_class(nav, "link"), Some(leaf));
    }

    #[test]
    fn test_scroll_clamps_to_valid_range() {
        let mut page = Page::new(600.0, 2000.0);
        page.scroll_to(-50.0);
        assert_eq!(page.scroll_y(), 0.0);
        page.scroll_to(99_999.0);
        assert_eq!(page.scroll_y(), 1400.0);
    }

    #[test]
    fn test_short_document_never_scrolls() {
        let mut page = Page::new(600.0, 400.0);
        assert_eq!(page.max_scroll(), 0.0);
        page.scroll_to(10.0);
        assert_eq!(page.scroll_y(), 0.0);
    }

    #[test]
    fn test_anchor_collection() {
        let page = page_with(vec![
            Element::new().with_attr("href", "#contact"),
            Element::new().with_attr("href", "https://example.com"),
            Element::new(),
        ]);
        assert_eq!(page.anchors(), vec![ElementId(1)]);
    }

    #[test]
    fn test_class_toggling() {
        let mut el = Element::new();
        assert!(el.toggle_class("active"));
        assert!(el.has_class("active"));
        assert!(!el.toggle_class("active"));
        el.set_class("scrolled", true);
        el.set_class("scrolled", true);
        el.set_class("scrolled", false);
        assert!(!el.has_class("scrolled"));
    }

    #[test]
    fn test_meta_update_skipped_without_meta() {
        let mut page = Page::new(600.0, 2000.0);
        page.set_meta_theme_color("#000000");
        assert_eq!(page.meta_theme_color(), None);

        let mut page = Page::new(600.0, 2000.0).with_meta_theme_color("#f8fafc");
        page.set_meta_theme_color("#0c151d");
        assert_eq!(page.meta_theme_color(), Some("#0c151d"));
    }
}
