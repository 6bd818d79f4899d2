//! Mobile navigation menu.

use sitekit_core::{MenuEvent, MobileMenu};
use wasm_bindgen::JsCast;
use web_sys::{Element, KeyboardEvent, Node};

use crate::dom;

pub const MENU_BUTTON_ID: &str = "mobile-menu-btn";
pub const MENU_ID: &str = "mobile-menu";

fn apply(menu: &Element, event: MenuEvent) {
    let mut state = MobileMenu::new(!dom::is_hidden(menu));
    if state.handle(event) {
        dom::set_hidden(menu, !state.is_open());
    }
}

pub fn init_mobile_menu() {
    let (Some(button), Some(menu), Some(doc)) =
        (dom::by_id(MENU_BUTTON_ID), dom::by_id(MENU_ID), dom::document())
    else {
        return;
    };

    {
        let menu = menu.clone();
        dom::listen(&button, "click", move |_| apply(&menu, MenuEvent::Toggle));
    }

    {
        let menu = menu.clone();
        dom::listen(&doc, "click", move |event| {
            let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
            let inside = menu.contains(target.as_ref()) || button.contains(target.as_ref());
            let event = if inside {
                MenuEvent::ClickInside
            } else {
                MenuEvent::ClickOutside
            };
            apply(&menu, event);
        });
    }

    dom::listen(&doc, "keydown", move |event| {
        if event
            .dyn_ref::<KeyboardEvent>()
            .is_some_and(|key| key.key() == "Escape")
        {
            apply(&menu, MenuEvent::Escape);
        }
    });
}
