use std::fs::File;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton as CtButton};
use simplelog::{Config, LevelFilter, WriteLogger};

use krds::prelude::*;

fn main() -> std::io::Result<()> {
    // Set up file logging
    let log_file = File::create("modal.log")?;
    WriteLogger::init(LevelFilter::Trace, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let doc = Document::new();
    let opener = doc
        .append(doc.body(), Element::button().id("open").text("Open settings"))
        .expect("body exists");
    let panel = doc
        .append(
            doc.body(),
            Element::div()
                .id("settings")
                .child(Element::input().id("name"))
                .child(Element::input().id("email"))
                .child(Element::button().id("save").text("Save"))
                .child(Element::button().id("cancel").text("Cancel")),
        )
        .expect("body exists");
    let footer = doc
        .append(doc.body(), Element::link("/help").id("help"))
        .expect("body exists");

    let names = [
        (opener, "open"),
        (panel, "settings"),
        (footer, "help"),
        (doc.get_by_id("name").expect("mounted"), "name"),
        (doc.get_by_id("email").expect("mounted"), "email"),
        (doc.get_by_id("save").expect("mounted"), "save"),
        (doc.get_by_id("cancel").expect("mounted"), "cancel"),
    ];
    let describe = |node: Option<NodeId>| {
        node.and_then(|node| names.iter().find(|(id, _)| *id == node))
            .map_or("<body>", |(_, name)| *name)
    };

    let scope = Scope::new();
    let panel_ref = ElementRef::new();
    panel_ref.track(&scope, panel);
    let modal = Modal::new(&doc, panel_ref, |reason| {
        println!("  modal closed: {:?}", reason);
    });
    modal.ignore_clicks_on(ElementRef::bound(opener));
    modal.bind(&scope);
    scope.mount().expect("fresh scope");

    // Keys arrive the way a terminal delivers them.
    let press = |code: KeyCode, modifiers: KeyModifiers| {
        let Some(event) = KeyboardEvent::from_crossterm(KeyEvent::new(code, modifiers)) else {
            return;
        };
        let event = doc.key_down(event);
        println!(
            "{:?}{} -> focus on {}",
            event.key,
            if event.modifiers.shift { " (shift)" } else { "" },
            describe(doc.active_element())
        );
    };
    let click = |node: NodeId| {
        doc.click(node, CtButton::Left.into()).expect("node exists");
        println!("click {} -> focus on {}", describe(Some(node)), describe(doc.active_element()));
    };

    println!("== open with the keyboard, tab around, close with Escape");
    doc.focus(opener);
    modal.open();
    println!("opened -> focus on {}", describe(doc.active_element()));
    for _ in 0..5 {
        press(KeyCode::Tab, KeyModifiers::NONE);
    }
    press(KeyCode::BackTab, KeyModifiers::SHIFT);
    press(KeyCode::Esc, KeyModifiers::NONE);

    println!("== reopen, click inside, then click outside");
    modal.open();
    click(panel);
    click(opener);
    println!("still open: {}", modal.is_open());
    click(footer);

    println!("== unmount");
    modal.open();
    scope.unmount().expect("mounted scope");
    println!(
        "open: {}, listeners left: {}, focus on {}",
        modal.is_open(),
        doc.listener_count(),
        describe(doc.active_element())
    );

    Ok(())
}
