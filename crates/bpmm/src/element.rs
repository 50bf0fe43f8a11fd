//! The diagram element shared by every BPMM category.

use log::debug;

use bpmm_core::{
    category::Category,
    geometry::{Bounds, Point, Size},
    identifier::ElementId,
};

use crate::{
    config::ElementConfig,
    content::{Content, ElementContent},
    interaction::InteractionState,
    layout::FrameLayout,
    notification::{Listeners, Notification, Subscription},
    resize::Geometry,
};

/// A draggable, resizable box on a BPMM diagram.
///
/// An element owns its identity, category, geometry, content payload and
/// the transient state of an in-progress gesture. It never destroys itself;
/// the host drops it after receiving [`Notification::DeleteRequested`].
///
/// # Examples
///
/// ```
/// use bpmm::Element;
/// use bpmm::{category::Category, geometry::Point};
///
/// let mut goal = Element::new(Category::Goal);
/// goal.set_position(Point::new(40.0, 80.0));
///
/// assert_eq!(goal.category(), Category::Goal);
/// assert!(!goal.is_dragging());
/// ```
#[derive(Debug)]
pub struct Element {
    id: ElementId,
    category: Category,
    geometry: Geometry,
    content: Content,
    pub(crate) interaction: InteractionState,
    listeners: Listeners,
}

impl Element {
    /// Creates an element of `category` with the default configuration.
    pub fn new(category: Category) -> Self {
        Self::with_config(category, &ElementConfig::default())
    }

    /// Creates an element of `category` sized and styled by `config`.
    pub fn with_config(category: Category, config: &ElementConfig) -> Self {
        let content = Content::for_category(category, config.base_font_size());
        Self::from_parts(category, content, config)
    }

    /// Creates a Note element.
    pub fn note() -> Self {
        Self::new(Category::Note)
    }

    /// Creates a Business Rule element.
    pub fn business_rule() -> Self {
        Self::new(Category::BusinessRule)
    }

    /// Creates an Influencer element.
    pub fn influencer() -> Self {
        Self::new(Category::Influencer)
    }

    /// Creates an Assessment element.
    pub fn assessment() -> Self {
        Self::new(Category::Assessment)
    }

    pub(crate) fn from_parts(category: Category, content: Content, config: &ElementConfig) -> Self {
        let id = ElementId::next();
        debug!(id:% = id, category:% = category; "Created element");
        Self {
            id,
            category,
            geometry: Geometry::new(Point::default(), config.default_size()),
            content,
            interaction: InteractionState::default(),
            listeners: Listeners::default(),
        }
    }

    /// Unique id assigned at construction.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Modeling concept this element represents.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Top-left corner in host coordinates.
    pub fn position(&self) -> Point {
        self.geometry.position()
    }

    /// Places the element at a host position.
    pub fn set_position(&mut self, position: Point) {
        self.geometry.set_position(position);
    }

    /// Frame size, excluding the anchor strip.
    pub fn size(&self) -> Size {
        self.geometry.size()
    }

    /// Replaces the frame size; each axis is raised to the minimum size if needed.
    pub fn set_size(&mut self, size: Size) {
        self.geometry.set_size(size);
    }

    /// Full rendered size, frame plus anchor strip.
    pub fn rendered_size(&self) -> Size {
        self.layout().control_size()
    }

    /// Host-space bounds of the whole control.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.position(), self.rendered_size())
    }

    /// Layout of frame, handles and anchor strip.
    pub fn layout(&self) -> FrameLayout {
        self.geometry.layout()
    }

    pub(crate) fn geometry_mut(&mut self) -> &mut Geometry {
        &mut self.geometry
    }

    /// Category-specific content.
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Mutable access to the category-specific content.
    pub fn content_mut(&mut self) -> &mut Content {
        &mut self.content
    }

    /// Rescales content text; payloads without text ignore the call.
    pub fn update_font_size(&mut self, scale: f64) {
        self.content.update_font_size(scale);
    }

    /// Registers a listener for every notification this element emits.
    pub fn subscribe<F>(&mut self, listener: F) -> Subscription
    where
        F: FnMut(ElementId, &Notification) + 'static,
    {
        self.listeners.add(Box::new(listener))
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.listeners.remove(subscription)
    }

    pub(crate) fn emit(&mut self, notification: Notification) {
        self.listeners.emit(self.id, &notification);
    }
}
