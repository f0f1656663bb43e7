use common::validation::Field;

pub enum Msg {
    SetText(Field, String),
    ToggleAllergy(String, bool),
    SetCustomAllergy(String),
    AddCustomAllergy,
    RemoveAllergy(String),
    OpenFileDialog,
    FileSelected(web_sys::File),
    PhotoRead { bytes: Vec<u8>, mime: String },
    PhotoReadFailed(String),
    ClearPhoto,
    Submit,
    Reset,
}
