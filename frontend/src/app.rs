use common::model::card::{CardRecord, TemplateId};
use common::model::student::StudentRecord;
use common::store::{CardStore, Subscription};
use yew::{html, Component, Context, Html, NodeRef};

use crate::components::card_preview::CardPreview;
use crate::components::history::HistoryPanel;
use crate::components::student_form::{Prefill, StudentFormComponent};
use crate::config::{form_rules, STORAGE_SLOT};
use crate::helpers::{now_iso, show_toast, ToastKind};
use crate::storage::BrowserSlot;
use crate::tops_sheet::{close_top_sheet, open_top_sheet, TopSheet};

pub enum Msg {
    Generate(StudentRecord),
    SetTemplate(TemplateId),
    CardsChanged(Vec<CardRecord>),
    SelectCard(String),
    DeleteCard(String),
    ClearAll,
    OpenHistory,
    CloseHistory,
}

pub struct App {
    store: CardStore<BrowserSlot>,
    cards: Vec<CardRecord>,
    /// Card shown in the preview.
    current: Option<CardRecord>,
    template: TemplateId,
    /// Record pushed into the form when a history entry is selected.
    prefill: Option<Prefill>,
    history_ref: NodeRef,
    _external: Subscription,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let store = CardStore::open(BrowserSlot::new(STORAGE_SLOT));
        let link = ctx.link().clone();
        let external = store.subscribe_to_external_changes(move |cards| {
            link.send_message(Msg::CardsChanged(cards.to_vec()));
        });
        log::info!("loaded {} saved cards", store.len());

        Self {
            cards: store.list_all(),
            store,
            current: None,
            template: TemplateId::default(),
            prefill: None,
            history_ref: NodeRef::default(),
            _external: external,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Generate(student) => {
                let card = CardRecord::new(student, self.template, now_iso());
                self.store.insert(card.clone());
                if self.store.get(&card.id).is_none() {
                    show_toast("Could not save the card to history", ToastKind::Error);
                }
                self.cards = self.store.list_all();
                self.current = Some(card);
                true
            }
            Msg::SetTemplate(template) => {
                self.template = template;
                true
            }
            Msg::CardsChanged(cards) => {
                self.cards = cards;
                true
            }
            Msg::SelectCard(id) => {
                let Some(card) = self.store.get(&id) else {
                    return false;
                };
                self.template = card.template;
                self.prefill = Some(Prefill::after(self.prefill.as_ref(), card.student.clone()));
                self.current = Some(card);
                close_top_sheet(&self.history_ref);
                true
            }
            Msg::DeleteCard(id) => {
                self.store.delete_by_id(&id);
                self.cards = self.store.list_all();
                true
            }
            Msg::ClearAll => {
                self.store.clear_all();
                self.cards = self.store.list_all();
                true
            }
            Msg::OpenHistory => {
                open_top_sheet(&self.history_ref);
                false
            }
            Msg::CloseHistory => {
                close_top_sheet(&self.history_ref);
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        html! {
            <div class="app">
                <header class="app-header">
                    <h1>{"Student ID Card Generator"}</h1>
                    <button type="button" class="btn btn-secondary" onclick={link.callback(|_| Msg::OpenHistory)}>
                        <i class="material-icons">{"history"}</i>
                        { format!("History ({})", self.cards.len()) }
                    </button>
                </header>

                <main class="app-main">
                    <StudentFormComponent
                        on_submit={link.callback(Msg::Generate)}
                        prefill={self.prefill.clone()}
                        rules={form_rules()}
                    />
                    <CardPreview
                        card={self.current.clone()}
                        template={self.template}
                        on_template_change={link.callback(Msg::SetTemplate)}
                    />
                </main>

                <TopSheet node_ref={self.history_ref.clone()}>
                    <HistoryPanel
                        cards={self.cards.clone()}
                        selected={self.current.as_ref().map(|c| c.id.clone())}
                        on_select={link.callback(Msg::SelectCard)}
                        on_delete={link.callback(Msg::DeleteCard)}
                        on_clear={link.callback(|_| Msg::ClearAll)}
                        on_close={link.callback(|_| Msg::CloseHistory)}
                    />
                </TopSheet>
            </div>
        }
    }
}
