use common::model::card::CardRecord;
use yew::prelude::*;

use super::{allergy_list, photo, qr_code, SCHOOL_NAME};

pub fn render(card: &CardRecord) -> Html {
    let student = &card.student;
    let rows = [
        ("Roll No:", student.roll_number.clone()),
        ("Class:", student.class_label()),
        ("Rack No:", student.rack_number.clone()),
        ("Bus Route:", student.bus_route.clone()),
    ];

    html! {
        <div class="id-card id-card-classic">
            <div class="classic-header">
                <div class="classic-title">{"STUDENT ID"}</div>
                <div class="classic-school">{ SCHOOL_NAME }</div>
            </div>
            <div class="classic-body">
                { photo(card, "classic-photo") }
                <div class="classic-details">
                    <div class="card-name">{ &student.name }</div>
                    { for rows.iter().map(|(label, value)| html! {
                        <div class="card-row">
                            <span class="card-label">{ *label }</span>
                            <span class="card-value">{ value }</span>
                        </div>
                    }) }
                </div>
            </div>
            { allergy_list(&student.allergies) }
            { qr_code(card, "classic-qr") }
            <div class="classic-footer">
                <div>{ format!("ID: {}", card.id) }</div>
                <div>{ format!("Issue Date: {}", card.created_date()) }</div>
            </div>
        </div>
    }
}
