use common::model::card::{CardRecord, TemplateId};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::templates::render_card;
use crate::raster::download_card;

pub enum Msg {
    SelectTemplate(TemplateId),
    Download,
    DownloadFinished,
}

#[derive(Properties, PartialEq, Clone)]
pub struct CardPreviewProps {
    /// Card to show; `None` until the first card is generated or selected.
    #[prop_or_default]
    pub card: Option<CardRecord>,
    pub template: TemplateId,
    pub on_template_change: Callback<TemplateId>,
}

pub struct CardPreview {
    downloading: bool,
}

impl Component for CardPreview {
    type Message = Msg;
    type Properties = CardPreviewProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self { downloading: false }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let props = ctx.props();
        match msg {
            Msg::SelectTemplate(template) => {
                if template != props.template {
                    props.on_template_change.emit(template);
                }
                false
            }
            Msg::Download => {
                let Some(card) = props.card.clone() else {
                    return false;
                };
                self.downloading = true;
                let template = props.template;
                let link = ctx.link().clone();
                spawn_local(async move {
                    download_card(card, template).await;
                    link.send_message(Msg::DownloadFinished);
                });
                true
            }
            Msg::DownloadFinished => {
                self.downloading = false;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let link = ctx.link();

        let Some(card) = &props.card else {
            return html! {
                <section class="card-preview">
                    <h2 class="panel-title">{"Preview"}</h2>
                    <div class="preview-empty">
                        <i class="material-icons">{"badge"}</i>
                        <p>{"Fill in the form and generate an ID card to see it here."}</p>
                    </div>
                </section>
            };
        };

        html! {
            <section class="card-preview">
                <div class="preview-toolbar">
                    <h2 class="panel-title">{"Preview"}</h2>
                    <div class="template-switch">
                        { for TemplateId::ALL.into_iter().map(|template| {
                            let active = template == props.template;
                            html! {
                                <button
                                    type="button"
                                    class={classes!("tab-btn", active.then_some("active"))}
                                    disabled={active}
                                    onclick={link.callback(move |_| Msg::SelectTemplate(template))}
                                >
                                    { template.label() }
                                </button>
                            }
                        }) }
                    </div>
                </div>
                <div class="preview-stage">
                    { render_card(card, props.template) }
                </div>
                <button
                    type="button"
                    class="btn btn-primary"
                    disabled={self.downloading}
                    onclick={link.callback(|_| Msg::Download)}
                >
                    <i class="material-icons">{"download"}</i>
                    { if self.downloading { "Generating..." } else { "Download PNG" } }
                </button>
            </section>
        }
    }
}
