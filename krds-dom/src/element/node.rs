use super::Tag;

/// Declarative description of an element subtree.
///
/// Elements are plain values built with chained setters and mounted into a
/// [`Document`](crate::Document) with `append`. Once mounted, the document
/// owns the node and hands out [`NodeId`](crate::NodeId)s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    // Identity
    pub tag: Tag,
    pub id: Option<String>,

    // Attributes that drive focusability
    pub href: Option<String>,
    pub disabled: bool,
    /// Explicit focus order. `Some(n)` with `n < 0` removes the element
    /// from sequential navigation while keeping it programmatically focusable.
    pub tab_index: Option<i32>,

    // Content
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<Tag>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn div() -> Self {
        Self::new(Tag::Div)
    }

    pub fn span() -> Self {
        Self::new(Tag::Span)
    }

    pub fn button() -> Self {
        Self::new(Tag::Button)
    }

    /// An anchor with an `href`, which makes it focusable.
    pub fn link(href: impl Into<String>) -> Self {
        Self {
            tag: Tag::A,
            href: Some(href.into()),
            ..Default::default()
        }
    }

    /// An anchor without an `href`. Not focusable unless given a tab index.
    pub fn anchor() -> Self {
        Self::new(Tag::A)
    }

    pub fn input() -> Self {
        Self::new(Tag::Input)
    }

    pub fn select() -> Self {
        Self::new(Tag::Select)
    }

    pub fn textarea() -> Self {
        Self::new(Tag::Textarea)
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn tab_index(mut self, tab_index: i32) -> Self {
        self.tab_index = Some(tab_index);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(new_children);
        self
    }
}
