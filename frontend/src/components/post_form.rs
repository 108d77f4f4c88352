use overseas_board_shared::{labels, Dimension, PostDraft};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::i18n::current::{common, post_form as t};

#[derive(Properties, PartialEq)]
pub struct PostFormProps {
    /// Knowledge type preselected from the posting defaults.
    #[prop_or_default]
    pub default_type: String,
    pub on_submit: Callback<PostDraft>,
    pub on_close: Callback<()>,
    #[prop_or(false)]
    pub busy: bool,
}

/// New-post modal. Validation happens in the submit handler, which keeps the
/// form open on failure.
#[function_component(PostForm)]
pub fn post_form(props: &PostFormProps) -> Html {
    let title = use_state(String::new);
    let content = use_state(String::new);
    let type_code = {
        let default_type = props.default_type.clone();
        use_state(move || default_type)
    };

    let on_title = {
        let title = title.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(target) = event.target_dyn_into::<HtmlInputElement>() {
                title.set(target.value());
            }
        })
    };
    let on_content = {
        let content = content.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(target) = event.target_dyn_into::<HtmlTextAreaElement>() {
                content.set(target.value());
            }
        })
    };
    let on_type = {
        let type_code = type_code.clone();
        Callback::from(move |event: Event| {
            if let Some(target) = event.target_dyn_into::<HtmlSelectElement>() {
                type_code.set(target.value());
            }
        })
    };

    let onsubmit = {
        let title = title.clone();
        let content = content.clone();
        let type_code = type_code.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            on_submit.emit(PostDraft {
                title: (*title).clone(),
                type_code: (*type_code).clone(),
                content: (*content).clone(),
            });
        })
    };

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let options = labels::codes(Dimension::Type).map(|code| {
        html! {
            <option value={code} selected={*type_code == code}>
                { labels::chip_label(Dimension::Type, code) }
            </option>
        }
    });

    html! {
        <div class="modal" role="dialog" aria-modal="true">
            <form class="modal-content" {onsubmit}>
                <h2>{ t::TITLE }</h2>
                <label>
                    { t::FIELD_TITLE }
                    <input type="text" value={(*title).clone()} oninput={on_title} />
                </label>
                <label>
                    { t::FIELD_TYPE }
                    <select onchange={on_type}>
                        <option value="" selected={type_code.is_empty()}>{ t::TYPE_PLACEHOLDER }</option>
                        { for options }
                    </select>
                </label>
                <label>
                    { t::FIELD_CONTENT }
                    <textarea rows="6" value={(*content).clone()} oninput={on_content} />
                </label>
                <div class="modal-actions">
                    <button type="button" class="btn btn-reset" onclick={on_cancel}>{ common::CANCEL }</button>
                    <button type="submit" class="btn btn-primary" disabled={props.busy}>{ t::SUBMIT }</button>
                </div>
            </form>
        </div>
    }
}
