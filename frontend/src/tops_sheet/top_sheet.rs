use uuid::Uuid;
use yew::{html, Component, Context, Html, NodeRef, Properties};

/// Panel that slides down from the top of the page while it carries the
/// `show` class.
pub struct TopSheet {
    pub id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    pub node_ref: NodeRef,
}

impl Component for TopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("id-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="top-sheet" id={self.id.clone()} ref={ctx.props().node_ref.clone()}>
                { ctx.props().children.clone() }
            </div>
        }
    }
}

pub fn open_top_sheet(top_sheet_ref: &NodeRef) {
    set_shown(top_sheet_ref, true);
}

pub fn close_top_sheet(top_sheet_ref: &NodeRef) {
    set_shown(top_sheet_ref, false);
}

fn set_shown(top_sheet_ref: &NodeRef, shown: bool) {
    let Some(top_sheet) = top_sheet_ref.cast::<web_sys::HtmlElement>() else {
        return;
    };
    let classes = top_sheet.class_list();
    let result = if shown {
        classes.add_1("show")
    } else {
        classes.remove_1("show")
    };
    if result.is_err() {
        log::warn!("could not toggle top sheet {}", top_sheet.id());
    }
}
