use gloo_file::futures::read_as_bytes;
use gloo_file::File;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::validation::{Field, RawStudentInput};

use super::messages::Msg;
use super::state::StudentFormComponent;

pub fn update(
    component: &mut StudentFormComponent,
    ctx: &Context<StudentFormComponent>,
    msg: Msg,
) -> bool {
    let rules = ctx.props().rules;

    match msg {
        Msg::SetText(field, value) => {
            component.input.set_text(field, value);
            component.errors.clear(field);
            true
        }
        Msg::ToggleAllergy(tag, checked) => {
            component.input.toggle_allergy(&tag, checked);
            true
        }
        Msg::SetCustomAllergy(value) => {
            component.custom_allergy = value;
            true
        }
        Msg::AddCustomAllergy => {
            if component.input.add_custom_allergy(&component.custom_allergy) {
                component.custom_allergy.clear();
                true
            } else {
                false
            }
        }
        Msg::RemoveAllergy(tag) => component.input.remove_allergy(&tag),
        Msg::OpenFileDialog => {
            if let Some(input) = component.file_input_ref.cast::<web_sys::HtmlInputElement>() {
                input.click();
            }
            false
        }
        Msg::FileSelected(file) => {
            let file = File::from(file);
            if let Err(e) = rules.check_photo_size(file.size()) {
                log::info!("rejected photo {}: {}", file.name(), e);
                component.photo_error = Some(e.to_string());
                component.reset_file_input();
                return true;
            }

            component.photo_loading = true;
            let link = ctx.link().clone();
            spawn_local(async move {
                let mime = file.raw_mime_type();
                match read_as_bytes(&file).await {
                    Ok(bytes) => link.send_message(Msg::PhotoRead { bytes, mime }),
                    Err(e) => link.send_message(Msg::PhotoReadFailed(e.to_string())),
                }
            });
            true
        }
        Msg::PhotoRead { bytes, mime } => {
            component.photo_loading = false;
            match component.input.attach_photo(&bytes, &mime, &rules) {
                Ok(()) => {
                    component.photo_error = None;
                    component.errors.clear(Field::Photo);
                }
                Err(e) => component.photo_error = Some(e.to_string()),
            }
            component.reset_file_input();
            true
        }
        Msg::PhotoReadFailed(reason) => {
            log::warn!("could not read photo: {}", reason);
            component.photo_loading = false;
            component.photo_error = Some("Could not read the selected file".to_string());
            component.reset_file_input();
            true
        }
        Msg::ClearPhoto => {
            component.input.clear_photo();
            component.photo_error = None;
            component.reset_file_input();
            true
        }
        Msg::Submit => {
            match component.input.validate_and_normalize(&rules) {
                Ok(record) => {
                    component.errors.clear_all();
                    ctx.props().on_submit.emit(record);
                }
                Err(errors) => component.errors = errors,
            }
            true
        }
        Msg::Reset => {
            component.input = RawStudentInput::default();
            component.custom_allergy.clear();
            component.errors.clear_all();
            component.photo_error = None;
            component.reset_file_input();
            true
        }
    }
}
