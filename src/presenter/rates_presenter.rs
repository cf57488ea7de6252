use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;
use teloxide::types::{MessageId, UserId};

use crate::entity::{BotError, Currency, RateInputKind, State};
use crate::interactor::{ConversationState, RateRepository};
use crate::utils::parse_rate_value;
use crate::view::rates_view::RatesView;

#[async_trait]
pub trait RatesPresenter: Send + Sync {
    async fn show_main_menu(&self, user_id: UserId, edit: Option<MessageId>) -> Result<()>;
    async fn show_rate_selection(&self, user_id: UserId, edit: Option<MessageId>) -> Result<()>;
    async fn start_rate_update(
        &self,
        user_id: UserId,
        currency: Currency,
        edit: Option<MessageId>,
    ) -> Result<()>;
    async fn receive_rate_input(&self, user_id: UserId, currency: Currency, text: &str)
        -> Result<()>;
    async fn receive_second_rate_input(
        &self,
        user_id: UserId,
        currency: Currency,
        first: f64,
        text: &str,
    ) -> Result<()>;
}

pub struct RatesPresenterImpl<I, V> {
    interactor: Arc<I>,
    conversations: Arc<ConversationState>,
    view: Arc<V>,
}

impl<I, V> RatesPresenterImpl<I, V>
where
    I: RateRepository,
    V: RatesView,
{
    pub fn new(interactor: Arc<I>, conversations: Arc<ConversationState>, view: Arc<V>) -> Self {
        Self {
            interactor,
            conversations,
            view,
        }
    }

    async fn finish_update(
        &self,
        user_id: UserId,
        currency: Currency,
        update: Result<f64, BotError>,
        retry_prompt: String,
    ) -> Result<()> {
        match update {
            Ok(rate) => {
                info!(
                    "User {} set {} to {}",
                    user_id,
                    currency.pair_label(),
                    rate
                );
                self.conversations.clear(user_id).await;
                let rates = self.interactor.snapshot().await;
                self.view.display_rate_updated(currency, &rates).await?;
            }
            Err(e) if e.is_validation() || matches!(e, BotError::Domain(_)) => {
                self.view
                    .display_rate_prompt(retry_prompt, Some(e.to_string()), None)
                    .await?;
            }
            Err(e) => return Err(e.into()),
        }

        Ok(())
    }
}

#[async_trait]
impl<I, V> RatesPresenter for RatesPresenterImpl<I, V>
where
    I: RateRepository + Send + Sync,
    V: RatesView + Send + Sync,
{
    async fn show_main_menu(&self, user_id: UserId, edit: Option<MessageId>) -> Result<()> {
        self.conversations.clear(user_id).await;
        let rates = self.interactor.snapshot().await;
        self.view.display_main_menu(&rates, edit).await
    }

    async fn show_rate_selection(&self, user_id: UserId, edit: Option<MessageId>) -> Result<()> {
        self.conversations.clear(user_id).await;
        self.view.display_rate_selection(edit).await
    }

    async fn start_rate_update(
        &self,
        user_id: UserId,
        currency: Currency,
        edit: Option<MessageId>,
    ) -> Result<()> {
        self.conversations
            .begin(user_id, State::AwaitingRateInput { currency })
            .await;
        self.view
            .display_rate_prompt(currency.first_rate_prompt(), None, edit)
            .await
    }

    async fn receive_rate_input(
        &self,
        user_id: UserId,
        currency: Currency,
        text: &str,
    ) -> Result<()> {
        if !self
            .conversations
            .accept(user_id, &State::AwaitingRateInput { currency })
            .await
        {
            debug!("Ignoring stale rate input from user {}", user_id);
            return Ok(());
        }

        let value = match parse_rate_value(text) {
            Ok(value) => value,
            Err(e) => {
                return self
                    .view
                    .display_rate_prompt(currency.first_rate_prompt(), Some(e.to_string()), None)
                    .await;
            }
        };

        match currency.rate_input_kind() {
            RateInputKind::Direct => {
                let update = self.interactor.update(currency, value).await;
                self.finish_update(user_id, currency, update, currency.first_rate_prompt())
                    .await
            }
            RateInputKind::Ratio => {
                self.conversations
                    .begin(
                        user_id,
                        State::AwaitingSecondRateInput {
                            currency,
                            first: value,
                        },
                    )
                    .await;
                self.view
                    .display_rate_prompt(currency.second_rate_prompt(), None, None)
                    .await
            }
        }
    }

    async fn receive_second_rate_input(
        &self,
        user_id: UserId,
        currency: Currency,
        first: f64,
        text: &str,
    ) -> Result<()> {
        if !self
            .conversations
            .accept(user_id, &State::AwaitingSecondRateInput { currency, first })
            .await
        {
            debug!("Ignoring stale rate input from user {}", user_id);
            return Ok(());
        }

        let second = match parse_rate_value(text) {
            Ok(value) => value,
            Err(e) => {
                return self
                    .view
                    .display_rate_prompt(currency.second_rate_prompt(), Some(e.to_string()), None)
                    .await;
            }
        };

        // RUB is buy rate / sell rate, the others MDL amount / foreign amount.
        let update = self
            .interactor
            .update_derived(currency, first, second)
            .await;
        self.finish_update(user_id, currency, update, currency.second_rate_prompt())
            .await
    }
}
