use overseas_board_shared::{labels, Dimension};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ChipGroupProps {
    pub dimension: Dimension,
    /// Currently selected codes.
    pub selected: Vec<String>,
    pub on_toggle: Callback<(Dimension, String)>,
}

/// One clickable chip per known code of a dimension.
#[function_component(ChipGroup)]
pub fn chip_group(props: &ChipGroupProps) -> Html {
    let dimension = props.dimension;

    let chips = labels::codes(dimension).map(|code| {
        let selected = props.selected.iter().any(|value| value == code);
        let onclick = {
            let on_toggle = props.on_toggle.clone();
            Callback::from(move |_: MouseEvent| on_toggle.emit((dimension, code.to_string())))
        };
        html! {
            <button
                type="button"
                class={classes!("tag", selected.then_some("selected"))}
                data-filter={dimension.as_str()}
                data-value={code}
                aria-pressed={selected.to_string()}
                {onclick}
            >
                { labels::chip_label(dimension, code) }
            </button>
        }
    });

    html! {
        <section class="filter-section">
            <h3 class="filter-title">{ dimension.title() }</h3>
            <div class="tag-list">
                { for chips }
            </div>
        </section>
    }
}
