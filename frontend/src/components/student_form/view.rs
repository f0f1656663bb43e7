use common::model::options::{ALLERGIES, BUS_ROUTES, CLASSES, DIVISIONS};
use common::validation::errors::format_size;
use common::validation::Field;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::StudentFormComponent;

pub fn view(component: &StudentFormComponent, ctx: &Context<StudentFormComponent>) -> Html {
    let link = ctx.link();
    let onsubmit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Submit
    });

    html! {
        <form class="student-form" novalidate=true {onsubmit}>
            <h2 class="panel-title">{"Student Details"}</h2>

            { text_input(component, link, Field::Name, "Full name") }
            { text_input(component, link, Field::RollNumber, "e.g. 12") }

            <div class="form-row">
                { select_input(component, link, Field::Class, CLASSES, "Select class") }
                { select_input(component, link, Field::Division, DIVISIONS, "Select division") }
            </div>

            { allergy_section(component, link) }
            { photo_section(component, ctx) }

            { text_input(component, link, Field::RackNumber, "e.g. R1") }
            { select_input(component, link, Field::BusRoute, BUS_ROUTES, "Select route") }

            <div class="form-actions">
                <button type="button" class="btn btn-secondary" onclick={link.callback(|_| Msg::Reset)}>
                    {"Reset"}
                </button>
                <button type="submit" class="btn btn-primary">{"Generate ID Card"}</button>
            </div>
        </form>
    }
}

fn field_error(component: &StudentFormComponent, field: Field) -> Html {
    match component.error_for(field) {
        Some(message) => html! { <p class="field-error">{ message }</p> },
        None => html! {},
    }
}

fn text_input(
    component: &StudentFormComponent,
    link: &Scope<StudentFormComponent>,
    field: Field,
    placeholder: &'static str,
) -> Html {
    let value = match field {
        Field::Name => &component.input.name,
        Field::RollNumber => &component.input.roll_number,
        Field::RackNumber => &component.input.rack_number,
        _ => return html! {},
    };
    let oninput = link.callback(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::SetText(field, input.value())
    });

    html! {
        <div class={classes!("form-field", component.errors.contains(field).then_some("has-error"))}>
            <label for={field.key()}>{ field.label() }</label>
            <input
                id={field.key()}
                type="text"
                value={value.clone()}
                {placeholder}
                {oninput}
            />
            { field_error(component, field) }
        </div>
    }
}

fn select_input(
    component: &StudentFormComponent,
    link: &Scope<StudentFormComponent>,
    field: Field,
    options: &'static [&'static str],
    prompt: &'static str,
) -> Html {
    let current = match field {
        Field::Class => component.input.class.as_str(),
        Field::Division => component.input.division.as_str(),
        Field::BusRoute => component.input.bus_route.as_str(),
        _ => return html! {},
    };
    let onchange = link.callback(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::SetText(field, select.value())
    });

    html! {
        <div class={classes!("form-field", component.errors.contains(field).then_some("has-error"))}>
            <label for={field.key()}>{ field.label() }</label>
            <select id={field.key()} {onchange}>
                <option value="" selected={current.is_empty()}>{ prompt }</option>
                { for options.iter().map(|option| html! {
                    <option value={*option} selected={current == *option}>{ *option }</option>
                }) }
            </select>
            { field_error(component, field) }
        </div>
    }
}

fn allergy_section(component: &StudentFormComponent, link: &Scope<StudentFormComponent>) -> Html {
    let custom: Vec<&String> = component
        .input
        .allergies
        .iter()
        .filter(|tag| !ALLERGIES.contains(&tag.as_str()))
        .collect();

    let oninput = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::SetCustomAllergy(input.value())
    });
    let onkeydown = link.batch_callback(|e: KeyboardEvent| {
        if e.key() == "Enter" {
            e.prevent_default();
            Some(Msg::AddCustomAllergy)
        } else {
            None
        }
    });

    html! {
        <div class="form-field">
            <label>{ Field::Allergies.label() }</label>
            <div class="allergy-options">
                { for ALLERGIES.iter().map(|tag| {
                    let tag_name = tag.to_string();
                    let onchange = link.callback(move |e: Event| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::ToggleAllergy(tag_name.clone(), input.checked())
                    });
                    html! {
                        <label class="checkbox">
                            <input
                                type="checkbox"
                                checked={component.input.has_allergy(tag)}
                                {onchange}
                            />
                            { *tag }
                        </label>
                    }
                }) }
            </div>
            <div class="custom-allergy">
                <input
                    type="text"
                    placeholder="Other allergy"
                    value={component.custom_allergy.clone()}
                    {oninput}
                    {onkeydown}
                />
                <button type="button" class="btn btn-small" onclick={link.callback(|_| Msg::AddCustomAllergy)}>
                    {"Add"}
                </button>
            </div>
            if !custom.is_empty() {
                <div class="allergy-chips">
                    { for custom.into_iter().map(|tag| {
                        let removed = tag.clone();
                        html! {
                            <span class="chip">
                                { tag }
                                <button
                                    type="button"
                                    class="chip-remove"
                                    title="Remove"
                                    onclick={link.callback(move |_| Msg::RemoveAllergy(removed.clone()))}
                                >
                                    {"\u{00d7}"}
                                </button>
                            </span>
                        }
                    }) }
                </div>
            }
        </div>
    }
}

fn photo_section(component: &StudentFormComponent, ctx: &Context<StudentFormComponent>) -> Html {
    let link = ctx.link();
    let limit = format_size(ctx.props().rules.max_photo_bytes);
    let onchange = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        input.files().and_then(|files| files.get(0)).map(Msg::FileSelected)
    });

    html! {
        <div class={classes!("form-field", component.error_for(Field::Photo).is_some().then_some("has-error"))}>
            <label>{ Field::Photo.label() }</label>
            <input
                type="file"
                accept="image/*"
                style="display: none;"
                ref={component.file_input_ref.clone()}
                {onchange}
            />
            <div class="photo-upload">
                {
                    match &component.input.photo {
                        Some(src) => html! {
                            <div class="photo-preview">
                                <img src={src.clone()} alt="Student photo" />
                                <button type="button" class="btn btn-small" onclick={link.callback(|_| Msg::ClearPhoto)}>
                                    {"Remove"}
                                </button>
                            </div>
                        },
                        None => html! {
                            <button
                                type="button"
                                class="btn btn-secondary"
                                disabled={component.photo_loading}
                                onclick={link.callback(|_| Msg::OpenFileDialog)}
                            >
                                <i class="material-icons">{"photo_camera"}</i>
                                { if component.photo_loading { "Reading..." } else { "Upload photo" } }
                            </button>
                        },
                    }
                }
                <span class="hint">{ format!("Max {}", limit) }</span>
            </div>
            { field_error(component, Field::Photo) }
        </div>
    }
}
