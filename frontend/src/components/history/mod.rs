use common::model::card::CardRecord;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::helpers::format_date;
use crate::raster::download_card;

#[derive(Properties, PartialEq, Clone)]
pub struct HistoryProps {
    pub cards: Vec<CardRecord>,
    /// Id of the card currently in the preview, highlighted in the list.
    #[prop_or_default]
    pub selected: Option<String>,
    pub on_select: Callback<String>,
    pub on_delete: Callback<String>,
    pub on_clear: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(HistoryPanel)]
pub fn history_panel(props: &HistoryProps) -> Html {
    let on_close = props.on_close.reform(|_: MouseEvent| ());
    let on_clear = {
        let on_clear = props.on_clear.clone();
        Callback::from(move |_: MouseEvent| {
            if confirm("Delete all saved ID cards?") {
                on_clear.emit(());
            }
        })
    };

    html! {
        <div class="history-panel">
            <div class="history-header">
                <h2 class="panel-title">{ format!("History ({})", props.cards.len()) }</h2>
                <div class="history-actions">
                    if !props.cards.is_empty() {
                        <button type="button" class="btn btn-danger" onclick={on_clear}>
                            {"Clear all"}
                        </button>
                    }
                    <button type="button" class="icon-btn" title="Close" onclick={on_close}>
                        <i class="material-icons">{"close"}</i>
                    </button>
                </div>
            </div>
            if props.cards.is_empty() {
                <p class="history-empty">{"No ID cards generated yet."}</p>
            } else {
                <ul class="history-list">
                    { for props.cards.iter().rev().map(|card| history_item(props, card)) }
                </ul>
            }
        </div>
    }
}

fn history_item(props: &HistoryProps, card: &CardRecord) -> Html {
    let selected = props.selected.as_deref() == Some(card.id.as_str());
    let on_select = {
        let id = card.id.clone();
        props.on_select.reform(move |_: MouseEvent| id.clone())
    };
    let on_delete = {
        let id = card.id.clone();
        props.on_delete.reform(move |e: MouseEvent| {
            e.stop_propagation();
            id.clone()
        })
    };
    let on_download = {
        let card = card.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            spawn_local(download_card(card.clone(), card.template));
        })
    };

    html! {
        <li class={classes!("history-item", selected.then_some("selected"))} onclick={on_select}>
            <div class="history-info">
                <span class="history-name">{ &card.student.name }</span>
                <span class="history-meta">
                    { format!(
                        "Class {} \u{2022} Roll No: {}",
                        card.student.class_label(),
                        card.student.roll_number
                    ) }
                </span>
                <span class="history-meta">
                    { format!("{} \u{2022} {}", format_date(&card.created_at), card.template.label()) }
                </span>
            </div>
            <div class="history-item-actions">
                <button type="button" class="icon-btn" title="Download" onclick={on_download}>
                    <i class="material-icons">{"download"}</i>
                </button>
                <button type="button" class="icon-btn" title="Delete" onclick={on_delete}>
                    <i class="material-icons">{"delete"}</i>
                </button>
            </div>
        </li>
    }
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
