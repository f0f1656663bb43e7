use common::model::card::CardRecord;
use yew::prelude::*;

use super::{allergy_list, photo, qr_code, SCHOOL_NAME};

pub fn render(card: &CardRecord) -> Html {
    let student = &card.student;

    html! {
        <div class="id-card id-card-modern">
            <div class="modern-header">
                <span class="modern-school">{ SCHOOL_NAME }</span>
                <span class="modern-badge">{"ID CARD"}</span>
            </div>
            { photo(card, "modern-photo") }
            <div class="card-name">{ &student.name }</div>
            <div class="modern-subtitle">
                { format!("{} \u{2022} Roll No: {}", student.class_label(), student.roll_number) }
            </div>
            <div class="modern-info">
                <div class="card-row">
                    <span class="card-label">{"Rack No:"}</span>
                    <span class="card-value">{ &student.rack_number }</span>
                </div>
                <div class="card-row">
                    <span class="card-label">{"Bus Route:"}</span>
                    <span class="card-value">{ &student.bus_route }</span>
                </div>
                <div class="card-row">
                    <span class="card-label">{"Issued:"}</span>
                    <span class="card-value">{ card.created_date() }</span>
                </div>
            </div>
            { allergy_list(&student.allergies) }
            { qr_code(card, "modern-qr") }
            <div class="modern-footer">{ format!("ID: {}", card.id) }</div>
        </div>
    }
}
