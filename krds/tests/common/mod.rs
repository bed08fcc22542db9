#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use krds::dom::{Document, Element, Key, KeyboardEvent, Modifiers, NodeId};
use simplelog::{Config, LevelFilter, TestLogger};

/// Route `log` output through the test harness so it shows up on failure.
pub fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

pub fn tab(doc: &Document) -> KeyboardEvent {
    doc.key_down(KeyboardEvent::press(Key::Tab))
}

pub fn shift_tab(doc: &Document) -> KeyboardEvent {
    doc.key_down(KeyboardEvent::new(Key::Tab, Modifiers::shift()))
}

pub fn escape(doc: &Document) -> KeyboardEvent {
    doc.key_down(KeyboardEvent::press(Key::Escape))
}

/// Shared call counter for callbacks.
#[derive(Clone, Default)]
pub struct Counter(Rc<Cell<usize>>);

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bump(&self) {
        self.0.set(self.0.get() + 1);
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

/// Shared list of recorded values.
#[derive(Clone)]
pub struct Recorder<T>(Rc<RefCell<Vec<T>>>);

impl<T: Clone> Recorder<T> {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(Vec::new())))
    }

    pub fn push(&self, value: T) {
        self.0.borrow_mut().push(value);
    }

    pub fn values(&self) -> Vec<T> {
        self.0.borrow().clone()
    }
}

/// A page with an opener button, a dialog holding three buttons and a
/// trailing link outside the dialog.
pub struct Page {
    pub doc: Document,
    pub opener: NodeId,
    pub dialog: NodeId,
    pub a: NodeId,
    pub b: NodeId,
    pub c: NodeId,
    pub after: NodeId,
}

pub fn page() -> Page {
    let doc = Document::new();
    let opener = doc
        .append(doc.body(), Element::button().id("opener").text("Open"))
        .unwrap();
    let dialog = doc
        .append(
            doc.body(),
            Element::div()
                .id("dialog")
                .child(Element::button().id("a"))
                .child(Element::div().child(Element::input().id("b")))
                .child(Element::link("/help").id("c")),
        )
        .unwrap();
    let after = doc
        .append(doc.body(), Element::link("/next").id("after"))
        .unwrap();
    Page {
        a: doc.get_by_id("a").unwrap(),
        b: doc.get_by_id("b").unwrap(),
        c: doc.get_by_id("c").unwrap(),
        doc,
        opener,
        dialog,
        after,
    }
}
