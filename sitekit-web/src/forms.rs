//! Contact and newsletter forms. Submissions are simulated; nothing is sent.

use sitekit_core::{FormKind, SubmissionPlan};
use wasm_bindgen::JsCast;
use web_sys::{HtmlButtonElement, HtmlFormElement};

use crate::dom;

pub const SUCCESS_MESSAGE_ID: &str = "success-message";

pub fn init_forms() {
    for kind in [FormKind::Contact, FormKind::Newsletter] {
        let Some(form) = dom::by_id(kind.form_id())
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
        else {
            continue;
        };
        let target = form.clone();
        dom::listen(&form, "submit", move |event| {
            event.prevent_default();
            simulate_submission(&target, kind.plan());
        });
    }
}

fn simulate_submission(form: &HtmlFormElement, plan: SubmissionPlan) {
    let Some(button) = form
        .query_selector(r#"button[type="submit"]"#)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
    else {
        log::warn!("Form #{} has no submit button", form.id());
        return;
    };

    let original_label = button.text_content().unwrap_or_default();
    button.set_disabled(true);
    button.set_text_content(Some(plan.pending_label));

    let form = form.clone();
    dom::set_timeout(plan.settle_after, move || {
        form.reset();
        button.set_disabled(false);
        button.set_text_content(Some(plan.settled_label));

        if let Some(visible_for) = plan.success_notice_for
            && let Some(notice) = dom::by_id(SUCCESS_MESSAGE_ID)
        {
            dom::set_hidden(&notice, false);
            dom::set_timeout(visible_for, move || dom::set_hidden(&notice, true));
        }

        if let Some(delay) = plan.restore_label_after {
            dom::set_timeout(delay, move || {
                button.set_text_content(Some(&original_label));
            });
        }
    });
}
