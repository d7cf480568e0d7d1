//! In-memory render tree for the portfolio page.
//!
//! The [`Document`] owns every [`Element`] in an arena indexed by
//! [`ElementId`]. Elements carry the state the page behaviors read and write:
//! the class list, inline style, attributes, text content, form control
//! values and a document-absolute layout box. The [`Viewport`] tracks the
//! window size and scroll offset so client rectangles can be derived the way
//! a browser's `getBoundingClientRect` does.
//!
//! # Core Types
//!
//! * [`Document`] - Arena of elements plus viewport, `head` and `body`
//! * [`Element`] - A single node of the render tree
//! * [`Rect`] - Axis-aligned box used for layout and client geometry
//! * [`selector::Selector`] - Compound selector lists used to query the tree
//! * [`SharedDocument`] - Single-threaded shared handle used by page components

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::{
    cell::{Ref, RefCell, RefMut},
    collections::BTreeMap,
    rc::Rc,
};

use serde::{Deserialize, Serialize};

pub mod page;
pub mod selector;

pub use page::{ElementDescription, PageDescription, PageError};
pub use selector::{Selector, SelectorError};

/// Index of an element in its [`Document`] arena.
pub type ElementId = usize;

/// Axis-aligned rectangle in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn top(&self) -> f32 {
        self.y
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[must_use]
    pub const fn left(&self) -> f32 {
        self.x
    }

    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[must_use]
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Returns the overlapping region of two rectangles.
    ///
    /// Rectangles that only touch along an edge produce a zero-area
    /// intersection rather than `None`, matching how browsers report
    /// edge-adjacent intersections.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right < left || bottom < top {
            return None;
        }

        Some(Self::new(left, top, right - left, bottom - top))
    }

    #[must_use]
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// Window size and scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub scroll_x: f32,
    #[serde(default)]
    pub scroll_y: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }
}

/// How a programmatic scroll should be animated by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScrollBehavior {
    #[default]
    Auto,
    Smooth,
}

/// A node of the render tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub str_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
    pub rect: Rect,
    #[serde(skip)]
    pub parent: Option<ElementId>,
    #[serde(skip)]
    pub children: Vec<ElementId>,
}

impl Element {
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|x| x == class)
    }

    /// Returns the attribute value. `id` and `class` are answered from the
    /// element's id and class list so selectors can treat them uniformly.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            "id" => self.str_id.as_deref(),
            _ => self.attributes.get(name).map(String::as_str),
        }
    }

    /// Returns the `data-<name>` attribute.
    #[must_use]
    pub fn data_attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(&format!("data-{name}")).map(String::as_str)
    }

    #[must_use]
    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    #[must_use]
    pub fn is_form_control(&self) -> bool {
        matches!(
            self.tag.to_ascii_lowercase().as_str(),
            "input" | "textarea" | "select"
        )
    }
}

/// The page's render tree.
#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Option<Element>>,
    root: ElementId,
    head: ElementId,
    body: ElementId,
    viewport: Viewport,
    last_scroll_behavior: ScrollBehavior,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl Document {
    /// Creates an empty `html > (head, body)` document.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        let mut document = Self {
            elements: vec![],
            root: 0,
            head: 0,
            body: 0,
            viewport,
            last_scroll_behavior: ScrollBehavior::Auto,
        };

        document.root = document.create_element("html");
        document.head = document.create_element("head");
        document.body = document.create_element("body");
        document.append_child(document.root, document.head);
        document.append_child(document.root, document.body);

        document
    }

    #[must_use]
    pub const fn root(&self) -> ElementId {
        self.root
    }

    #[must_use]
    pub const fn head(&self) -> ElementId {
        self.head
    }

    #[must_use]
    pub const fn body(&self) -> ElementId {
        self.body
    }

    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub const fn last_scroll_behavior(&self) -> ScrollBehavior {
        self.last_scroll_behavior
    }

    pub const fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.viewport.width = width;
        self.viewport.height = height;
    }

    /// Creates a detached element and returns its id.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        let id = self.elements.len();
        self.elements.push(Some(Element {
            id,
            tag: tag.to_ascii_lowercase(),
            ..Element::default()
        }));
        id
    }

    /// Appends `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if parent == child || self.get(parent).is_none() || self.get(child).is_none() {
            return;
        }
        self.detach(child);
        if let Some(element) = self.get_mut(child) {
            element.parent = Some(parent);
        }
        if let Some(element) = self.get_mut(parent) {
            element.children.push(child);
        }
    }

    fn detach(&mut self, id: ElementId) {
        let Some(parent) = self.get(id).and_then(|x| x.parent) else {
            return;
        };
        if let Some(element) = self.get_mut(parent) {
            element.children.retain(|x| *x != id);
        }
        if let Some(element) = self.get_mut(id) {
            element.parent = None;
        }
    }

    /// Detaches every child of `id` and returns them in order. The detached
    /// subtrees stay alive and can be re-attached with
    /// [`Self::append_child`].
    pub fn take_children(&mut self, id: ElementId) -> Vec<ElementId> {
        let Some(element) = self.get_mut(id) else {
            return vec![];
        };
        let children = std::mem::take(&mut element.children);
        for child in &children {
            if let Some(x) = self.get_mut(*child) {
                x.parent = None;
            }
        }
        children
    }

    /// Removes an element and its whole subtree from the document.
    ///
    /// Slots of removed elements are never reused, so a stale [`ElementId`]
    /// can only ever resolve to nothing. The arena therefore grows with every
    /// element created over the document's lifetime.
    pub fn remove(&mut self, id: ElementId) {
        if id == self.root || id == self.head || id == self.body {
            return;
        }
        self.detach(id);

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(element) = self.elements.get_mut(current).and_then(Option::take) {
                stack.extend(element.children);
            }
        }
    }

    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)?.as_ref()
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id)?.as_mut()
    }

    /// Returns every element reachable from `root` in document (pre-)order,
    /// including `root` itself.
    #[must_use]
    pub fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut result = vec![];
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            let Some(element) = self.get(id) else {
                continue;
            };
            result.push(id);
            stack.extend(element.children.iter().rev());
        }

        result
    }

    /// All attached elements matching `selector`, in document order.
    #[must_use]
    pub fn query_selector_all(&self, selector: &Selector) -> Vec<ElementId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|id| self.get(*id).is_some_and(|x| selector.matches(x)))
            .collect()
    }

    #[must_use]
    pub fn query_selector(&self, selector: &Selector) -> Option<ElementId> {
        self.descendants(self.root)
            .into_iter()
            .find(|id| self.get(*id).is_some_and(|x| selector.matches(x)))
    }

    /// Convenience wrapper that parses `selector` first. An invalid selector
    /// matches nothing.
    #[must_use]
    pub fn select_all(&self, selector: &str) -> Vec<ElementId> {
        match Selector::parse(selector) {
            Ok(selector) => self.query_selector_all(&selector),
            Err(e) => {
                log::debug!("select_all: invalid selector {selector:?}: {e}");
                vec![]
            }
        }
    }

    #[must_use]
    pub fn select(&self, selector: &str) -> Option<ElementId> {
        match Selector::parse(selector) {
            Ok(selector) => self.query_selector(&selector),
            Err(e) => {
                log::debug!("select: invalid selector {selector:?}: {e}");
                None
            }
        }
    }

    #[must_use]
    pub fn find_by_str_id(&self, str_id: &str) -> Option<ElementId> {
        self.descendants(self.root)
            .into_iter()
            .find(|id| self.get(*id).and_then(|x| x.str_id.as_deref()) == Some(str_id))
    }

    /// Walks from `id` up through its ancestors and returns the first element
    /// matching `selector`.
    #[must_use]
    pub fn closest(&self, id: ElementId, selector: &Selector) -> Option<ElementId> {
        let mut current = Some(id);
        while let Some(candidate) = current {
            let element = self.get(candidate)?;
            if selector.matches(element) {
                return Some(candidate);
            }
            current = element.parent;
        }
        None
    }

    #[must_use]
    pub fn is_descendant_of(&self, id: ElementId, ancestor: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(candidate) = current {
            if candidate == ancestor {
                return true;
            }
            current = self.get(candidate).and_then(|x| x.parent);
        }
        false
    }

    #[must_use]
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.get(id).is_some_and(|x| x.has_class(class))
    }

    /// Adds `class` unless already present. Returns whether it was added.
    pub fn add_class(&mut self, id: ElementId, class: &str) -> bool {
        let Some(element) = self.get_mut(id) else {
            return false;
        };
        if element.has_class(class) {
            return false;
        }
        element.classes.push(class.to_string());
        true
    }

    /// Removes `class` if present. Returns whether it was removed.
    pub fn remove_class(&mut self, id: ElementId, class: &str) -> bool {
        let Some(element) = self.get_mut(id) else {
            return false;
        };
        let before = element.classes.len();
        element.classes.retain(|x| x != class);
        element.classes.len() != before
    }

    /// Toggles `class` and returns whether it is present afterwards.
    pub fn toggle_class(&mut self, id: ElementId, class: &str) -> bool {
        if self.remove_class(id, class) {
            false
        } else {
            self.add_class(id, class)
        }
    }

    #[must_use]
    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.get(id)?.attribute(name)
    }

    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        let value = value.into();
        let Some(element) = self.get_mut(id) else {
            return;
        };
        match name {
            "id" => element.str_id = Some(value),
            "class" => {
                element.classes = value.split_whitespace().map(ToString::to_string).collect();
            }
            _ => {
                element.attributes.insert(name.to_string(), value);
            }
        }
    }

    #[must_use]
    pub fn data_attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.get(id)?.data_attr(name)
    }

    #[must_use]
    pub fn style(&self, id: ElementId, property: &str) -> Option<&str> {
        self.get(id)?.style(property)
    }

    pub fn set_style(&mut self, id: ElementId, property: &str, value: impl Into<String>) {
        if let Some(element) = self.get_mut(id) {
            element.style.insert(property.to_string(), value.into());
        }
    }

    #[must_use]
    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.get(id).map(|x| x.text.as_str())
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        if let Some(element) = self.get_mut(id) {
            element.text = text.into();
        }
    }

    #[must_use]
    pub fn value(&self, id: ElementId) -> Option<&str> {
        self.get(id)?.value.as_deref()
    }

    pub fn set_value(&mut self, id: ElementId, value: impl Into<String>) {
        if let Some(element) = self.get_mut(id) {
            element.value = Some(value.into());
        }
    }

    #[must_use]
    pub fn is_disabled(&self, id: ElementId) -> bool {
        self.get(id).is_some_and(|x| x.disabled)
    }

    pub fn set_disabled(&mut self, id: ElementId, disabled: bool) {
        if let Some(element) = self.get_mut(id) {
            element.disabled = disabled;
        }
    }

    /// Finds the form control under `form` whose `name` attribute matches.
    #[must_use]
    pub fn form_field(&self, form: ElementId, name: &str) -> Option<ElementId> {
        self.descendants(form).into_iter().find(|id| {
            self.get(*id)
                .is_some_and(|x| x.is_form_control() && x.attribute("name") == Some(name))
        })
    }

    /// Clears the value of every form control under `form`, like
    /// `HTMLFormElement.reset()` on a form without default values.
    pub fn reset_form(&mut self, form: ElementId) {
        for id in self.descendants(form) {
            if let Some(element) = self.get_mut(id)
                && element.is_form_control()
            {
                element.value = element.attributes.get("value").cloned();
            }
        }
    }

    /// Document-relative top of the element's layout box (`offsetTop`).
    #[must_use]
    pub fn offset_top(&self, id: ElementId) -> Option<f32> {
        self.get(id).map(|x| x.rect.top())
    }

    /// Height of the element's layout box (`offsetHeight`).
    #[must_use]
    pub fn offset_height(&self, id: ElementId) -> Option<f32> {
        self.get(id).map(|x| x.rect.height)
    }

    /// The element's box relative to the viewport (`getBoundingClientRect`).
    #[must_use]
    pub fn bounding_client_rect(&self, id: ElementId) -> Option<Rect> {
        self.get(id)
            .map(|x| x.rect.translated(-self.viewport.scroll_x, -self.viewport.scroll_y))
    }

    pub fn set_rect(&mut self, id: ElementId, rect: Rect) {
        if let Some(element) = self.get_mut(id) {
            element.rect = rect;
        }
    }

    /// Height of the whole scrollable page: the lowest layout box bottom, or
    /// the viewport height when the content is shorter.
    #[must_use]
    pub fn scroll_height(&self) -> f32 {
        self.elements
            .iter()
            .flatten()
            .map(|x| x.rect.bottom())
            .fold(self.viewport.height, f32::max)
    }

    #[must_use]
    pub fn max_scroll_y(&self) -> f32 {
        (self.scroll_height() - self.viewport.height).max(0.0)
    }

    /// Sets the vertical scroll offset as reported by a scroll event.
    pub const fn set_scroll_y(&mut self, scroll_y: f32) {
        self.viewport.scroll_y = scroll_y;
        self.last_scroll_behavior = ScrollBehavior::Auto;
    }

    /// Programmatic scroll (`window.scrollTo`). The target is clamped to the
    /// scrollable range and the applied offset is returned.
    pub fn scroll_to(&mut self, top: f32, behavior: ScrollBehavior) -> f32 {
        let top = top.clamp(0.0, self.max_scroll_y());
        log::trace!("scroll_to: top={top} behavior={behavior:?}");
        self.viewport.scroll_y = top;
        self.last_scroll_behavior = behavior;
        top
    }

    /// Attached elements in document order, for snapshots.
    #[must_use]
    pub fn elements(&self) -> Vec<&Element> {
        self.descendants(self.root)
            .into_iter()
            .filter_map(|id| self.get(id))
            .collect()
    }
}

/// Shared handle to a [`Document`] for single-threaded page components.
///
/// Borrows are short-lived: callers must never hold a [`Ref`] or [`RefMut`]
/// across an `.await`.
#[derive(Debug, Clone, Default)]
pub struct SharedDocument(Rc<RefCell<Document>>);

impl SharedDocument {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self(Rc::new(RefCell::new(document)))
    }

    #[must_use]
    pub fn borrow(&self) -> Ref<'_, Document> {
        self.0.borrow()
    }

    #[must_use]
    pub fn borrow_mut(&self) -> RefMut<'_, Document> {
        self.0.borrow_mut()
    }

    pub fn with<T>(&self, f: impl FnOnce(&Document) -> T) -> T {
        f(&self.0.borrow())
    }

    pub fn with_mut<T>(&self, f: impl FnOnce(&mut Document) -> T) -> T {
        f(&mut self.0.borrow_mut())
    }
}
