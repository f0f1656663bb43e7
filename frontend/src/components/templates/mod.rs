use common::model::card::{CardRecord, TemplateId};
use yew::prelude::*;

use crate::qr::QrMatrix;

mod classic;
mod modern;

pub const SCHOOL_NAME: &str = "Unity School";

pub fn render_card(card: &CardRecord, template: TemplateId) -> Html {
    match template {
        TemplateId::Classic => classic::render(card),
        TemplateId::Modern => modern::render(card),
    }
}

/// The student photo, or a neutral box when none was uploaded.
fn photo(card: &CardRecord, class: &'static str) -> Html {
    match &card.student.photo {
        Some(src) => html! {
            <img class={class} src={src.clone()} alt={card.student.name.clone()} />
        },
        None => html! {
            <div class={classes!(class, "photo-placeholder")}>
                <span class="material-icons">{"person"}</span>
            </div>
        },
    }
}

/// QR code of the student's details as inline SVG, with a one-module margin.
fn qr_code(card: &CardRecord, class: &'static str) -> Html {
    let Some(matrix) = QrMatrix::for_student(&card.student) else {
        return html! {};
    };
    let view_box = format!("-1 -1 {0} {0}", matrix.width() + 2);
    html! {
        <svg class={class} viewBox={view_box} xmlns="http://www.w3.org/2000/svg" shape-rendering="crispEdges">
            <rect x="-1" y="-1" width="100%" height="100%" fill="#ffffff" />
            <path d={matrix.svg_path()} fill="#111827" />
        </svg>
    }
}

fn allergy_list(allergies: &[String]) -> Html {
    if allergies.is_empty() {
        return html! {};
    }
    html! {
        <div class="card-allergies">
            <span class="card-allergies-label">{"Allergies:"}</span>
            <div class="card-allergy-tags">
                { for allergies.iter().map(|tag| html! {
                    <span class="card-allergy-tag">{ tag }</span>
                }) }
            </div>
        </div>
    }
}
