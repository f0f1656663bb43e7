use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::{Prefill, StudentFormProps};
pub use state::StudentFormComponent;

impl Component for StudentFormComponent {
    type Message = Msg;
    type Properties = StudentFormProps;

    fn create(ctx: &Context<Self>) -> Self {
        StudentFormComponent::new(ctx.props())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let props = ctx.props();
        if props.prefill != old_props.prefill {
            if let Some(prefill) = &props.prefill {
                self.load(&prefill.record);
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
