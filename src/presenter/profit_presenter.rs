use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;
use teloxide::types::{MessageId, UserId};

use crate::entity::{
    BotError, CallbackAction, Category, Currency, PendingTransaction, ProfitReport, State,
};
use crate::interactor::{profit_engine, ConversationState, RateRepository, ToggleKey, ToggleStates};
use crate::utils::{parse_action_price, parse_price};
use crate::view::profit_view::ProfitView;

#[async_trait]
pub trait ProfitPresenter: Send + Sync {
    async fn show_category_menu(&self, user_id: UserId, edit: Option<MessageId>) -> Result<()>;
    async fn select_category(
        &self,
        user_id: UserId,
        category: Category,
        edit: Option<MessageId>,
    ) -> Result<()>;
    async fn receive_lot_price(&self, user_id: UserId, category: Category, text: &str)
        -> Result<()>;
    async fn select_currency(
        &self,
        user_id: UserId,
        pending: PendingTransaction,
        edit: Option<MessageId>,
    ) -> Result<()>;
    async fn receive_action_price(
        &self,
        user_id: UserId,
        pending: PendingTransaction,
        text: &str,
    ) -> Result<()>;
    async fn toggle_commission(
        &self,
        key: ToggleKey,
        pending: PendingTransaction,
        action_price: f64,
    ) -> Result<()>;
    async fn start_recalculation(
        &self,
        user_id: UserId,
        key: ToggleKey,
        pending: PendingTransaction,
        action_price: f64,
    ) -> Result<()>;
    async fn receive_new_lot_price(
        &self,
        user_id: UserId,
        pending: PendingTransaction,
        action_price: f64,
        text: &str,
    ) -> Result<()>;
}

pub struct ProfitPresenterImpl<I, V> {
    interactor: Arc<I>,
    conversations: Arc<ConversationState>,
    toggles: Arc<ToggleStates>,
    view: Arc<V>,
}

impl<I, V> ProfitPresenterImpl<I, V>
where
    I: RateRepository,
    V: ProfitView,
{
    pub fn new(
        interactor: Arc<I>,
        conversations: Arc<ConversationState>,
        toggles: Arc<ToggleStates>,
        view: Arc<V>,
    ) -> Self {
        Self {
            interactor,
            conversations,
            toggles,
            view,
        }
    }

    /// Calculates with the standard commission and shows a fresh result.
    async fn show_result(
        &self,
        user_id: UserId,
        pending: PendingTransaction,
        action_price: f64,
    ) -> Result<()> {
        let rates = self.interactor.snapshot().await;

        match profit_engine::calculate(&rates, &pending, action_price, false) {
            Ok(breakdown) => {
                info!(
                    "User {} calculated {} profit: {:.2} RUB",
                    user_id,
                    pending.category.slug(),
                    breakdown.net_profit_settle
                );
                let report = ProfitReport {
                    pending,
                    action_price,
                    breakdown,
                    alternate_active: false,
                    delta: None,
                };
                self.view.display_result(&report, None).await?;
                self.conversations.clear(user_id).await;
                Ok(())
            }
            Err(e @ BotError::Domain(_)) => self.view.display_error(e.to_string()).await,
            Err(e) => Err(e.into()),
        }
    }
}

/// Values typed by the operator end up in button payloads, so input that
/// would overflow one is rejected like any other bad number.
fn fits_on_buttons(actions: impl IntoIterator<Item = CallbackAction>) -> Result<(), BotError> {
    actions
        .into_iter()
        .try_for_each(|action| action.ensure_fits())
}

#[async_trait]
impl<I, V> ProfitPresenter for ProfitPresenterImpl<I, V>
where
    I: RateRepository + Send + Sync,
    V: ProfitView + Send + Sync,
{
    async fn show_category_menu(&self, user_id: UserId, edit: Option<MessageId>) -> Result<()> {
        self.conversations.clear(user_id).await;
        self.view.display_category_menu(edit).await
    }

    async fn select_category(
        &self,
        user_id: UserId,
        category: Category,
        edit: Option<MessageId>,
    ) -> Result<()> {
        self.conversations
            .begin(user_id, State::AwaitingLotPrice { category })
            .await;
        self.view.display_lot_price_prompt(category, None, edit).await
    }

    async fn receive_lot_price(
        &self,
        user_id: UserId,
        category: Category,
        text: &str,
    ) -> Result<()> {
        if !self
            .conversations
            .accept(user_id, &State::AwaitingLotPrice { category })
            .await
        {
            debug!("Ignoring stale lot price from user {}", user_id);
            return Ok(());
        }

        // The currency menu carries the lot price in its payloads.
        let parsed = parse_price(text).and_then(|lot_price_buyer| {
            fits_on_buttons(Currency::ACTION.into_iter().map(|currency| {
                CallbackAction::SelectCurrency(PendingTransaction::new(
                    category,
                    currency,
                    lot_price_buyer,
                ))
            }))?;
            Ok(lot_price_buyer)
        });

        match parsed {
            Ok(lot_price_buyer) => {
                self.view
                    .display_currency_menu(category, lot_price_buyer, None)
                    .await?;
                self.conversations.clear(user_id).await;
                Ok(())
            }
            Err(e) => {
                self.view
                    .display_lot_price_prompt(category, Some(e.to_string()), None)
                    .await
            }
        }
    }

    async fn select_currency(
        &self,
        user_id: UserId,
        pending: PendingTransaction,
        edit: Option<MessageId>,
    ) -> Result<()> {
        self.conversations
            .begin(user_id, State::AwaitingActionPrice { pending })
            .await;
        self.view
            .display_action_price_prompt(pending, None, edit)
            .await
    }

    async fn receive_action_price(
        &self,
        user_id: UserId,
        pending: PendingTransaction,
        text: &str,
    ) -> Result<()> {
        if !self
            .conversations
            .accept(user_id, &State::AwaitingActionPrice { pending })
            .await
        {
            debug!("Ignoring stale action price from user {}", user_id);
            return Ok(());
        }

        let parsed = parse_action_price(text, pending.category).and_then(|action_price| {
            fits_on_buttons(CallbackAction::result_actions(pending, action_price))?;
            Ok(action_price)
        });

        match parsed {
            Ok(action_price) => self.show_result(user_id, pending, action_price).await,
            Err(e) => {
                self.view
                    .display_action_price_prompt(pending, Some(e.to_string()), None)
                    .await
            }
        }
    }

    async fn toggle_commission(
        &self,
        key: ToggleKey,
        pending: PendingTransaction,
        action_price: f64,
    ) -> Result<()> {
        let rates = self.interactor.snapshot().await;

        match self.toggles.toggle(key, &rates, &pending, action_price).await {
            Ok(report) => {
                debug!(
                    "Message {} toggled alternate commission to {}",
                    key.1 .0, report.alternate_active
                );
                self.view.display_result(&report, Some(key.1)).await
            }
            Err(e @ BotError::Domain(_)) => self.view.display_error(e.to_string()).await,
            Err(e) => Err(e.into()),
        }
    }

    async fn start_recalculation(
        &self,
        user_id: UserId,
        key: ToggleKey,
        pending: PendingTransaction,
        action_price: f64,
    ) -> Result<()> {
        // The result is replaced by the prompt, so its toggle no longer applies.
        self.toggles.forget(key).await;
        self.conversations
            .begin(
                user_id,
                State::AwaitingNewLotPrice {
                    pending,
                    action_price,
                },
            )
            .await;
        self.view
            .display_new_lot_price_prompt(pending, action_price, None, Some(key.1))
            .await
    }

    async fn receive_new_lot_price(
        &self,
        user_id: UserId,
        pending: PendingTransaction,
        action_price: f64,
        text: &str,
    ) -> Result<()> {
        if !self
            .conversations
            .accept(
                user_id,
                &State::AwaitingNewLotPrice {
                    pending,
                    action_price,
                },
            )
            .await
        {
            debug!("Ignoring stale lot price from user {}", user_id);
            return Ok(());
        }

        let parsed = parse_price(text).and_then(|lot_price_buyer| {
            let pending = PendingTransaction {
                lot_price_buyer,
                ..pending
            };
            fits_on_buttons(CallbackAction::result_actions(pending, action_price))?;
            Ok(pending)
        });

        match parsed {
            Ok(pending) => self.show_result(user_id, pending, action_price).await,
            Err(e) => {
                self.view
                    .display_new_lot_price_prompt(pending, action_price, Some(e.to_string()), None)
                    .await
            }
        }
    }
}
