use crate::entity::{
    BotError, Category, Currency, ExchangeRates, PendingTransaction, ProfitBreakdown,
    FEE_MULTIPLIER,
};

/// Computes cost basis and net profit of one resale.
///
/// `alternate_active` selects the category's reduced commission; it is
/// ignored for categories without a commission schedule.
pub fn calculate(
    rates: &ExchangeRates,
    pending: &PendingTransaction,
    action_price: f64,
    alternate_active: bool,
) -> Result<ProfitBreakdown, BotError> {
    let commission_rate = pending
        .category
        .commission()
        .map(|schedule| schedule.rate(alternate_active));

    calculate_with_rate(
        rates,
        pending.currency,
        pending.lot_price_buyer,
        action_price,
        commission_rate,
    )
}

/// Same as [`calculate`] with an explicit commission rate; `None` means
/// simple resale without commission or fees.
pub fn calculate_with_rate(
    rates: &ExchangeRates,
    currency: Currency,
    lot_price_buyer: f64,
    action_price: f64,
    commission_rate: Option<f64>,
) -> Result<ProfitBreakdown, BotError> {
    let settlement_rate = rates.get(Currency::Rub);
    if settlement_rate == 0.0 || !settlement_rate.is_finite() {
        return Err(BotError::Domain(format!(
            "settlement rate {} is {}",
            Currency::Rub.pair_label(),
            settlement_rate
        )));
    }

    let cost_basis_foreign = action_price;
    let cost_basis_major = cost_basis_foreign * rates.get(currency);
    let cost_basis_settle = cost_basis_major * settlement_rate;

    let (lot_after_commission, net_profit_settle) = match commission_rate {
        Some(rate) => {
            let lot_after_commission = lot_price_buyer * (1.0 - rate);
            (
                lot_after_commission,
                lot_after_commission * FEE_MULTIPLIER - cost_basis_settle,
            )
        }
        None => (lot_price_buyer, lot_price_buyer - cost_basis_settle),
    };

    Ok(ProfitBreakdown {
        cost_basis_foreign,
        cost_basis_major,
        cost_basis_settle,
        lot_after_commission,
        commission_rate,
        net_profit_settle,
        net_profit_major: net_profit_settle / settlement_rate,
    })
}

/// Profit with the standard commission, used as the toggle baseline.
pub fn baseline(
    rates: &ExchangeRates,
    pending: &PendingTransaction,
    action_price: f64,
) -> Result<ProfitBreakdown, BotError> {
    calculate(rates, pending, action_price, false)
}

pub fn requires_commission(category: Category) -> Result<(), BotError> {
    if category.has_commission() {
        Ok(())
    } else {
        Err(BotError::Domain(format!(
            "{} has no alternate commission",
            category.slug()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brawl_uah(lot_price_buyer: f64) -> PendingTransaction {
        PendingTransaction::new(Category::BrawlStars, Currency::Uah, lot_price_buyer)
    }

    #[test]
    fn reproduces_reference_calculation() {
        let rates = ExchangeRates::default();
        let result = calculate(&rates, &brawl_uah(1000.0), 50.0, false).unwrap();

        assert!((result.cost_basis_major - 21.9).abs() < 1e-9);
        assert!((result.cost_basis_settle - 121.08291).abs() < 1e-9);
        assert!((result.lot_after_commission - 839.31625940244036).abs() < 1e-9);
        assert_eq!(format!("{:.2}", result.net_profit_settle), "693.05");
        assert!((result.net_profit_settle - (839.31625940244036 * 0.97 - 121.08291)).abs() < 1e-9);
    }

    #[test]
    fn major_profit_is_settle_profit_over_settlement_rate() {
        let rates = ExchangeRates::with_rates(&[(Currency::Rub, 4.75), (Currency::Brl, 3.1)]);
        let pending = PendingTransaction::new(Category::ClashRoyale, Currency::Brl, 777.0);
        let result = calculate(&rates, &pending, 13.5, true).unwrap();

        assert_eq!(result.net_profit_major, result.net_profit_settle / 4.75);
    }

    #[test]
    fn simple_resale_ignores_commission() {
        let rates = ExchangeRates::default();
        let pending = PendingTransaction::new(Category::Telegram, Currency::Usd, 500.0);

        let off = calculate(&rates, &pending, 2.0, false).unwrap();
        let on = calculate(&rates, &pending, 2.0, true).unwrap();

        assert_eq!(off.net_profit_settle, 500.0 - 2.0 * 18.65 * 5.5289);
        assert_eq!(off, on);
        assert_eq!(off.commission_rate, None);
    }

    #[test]
    fn alternate_commission_increases_profit() {
        let rates = ExchangeRates::default();
        let off = calculate(&rates, &brawl_uah(1000.0), 50.0, false).unwrap();
        let on = calculate(&rates, &brawl_uah(1000.0), 50.0, true).unwrap();

        assert!(on.net_profit_settle > off.net_profit_settle);
        assert_eq!(on.commission_rate, Some(0.08224296149183244));
    }

    #[test]
    fn loss_is_reported_with_negative_profit() {
        let rates = ExchangeRates::default();
        let result = calculate(&rates, &brawl_uah(100.0), 500.0, false).unwrap();
        assert!(result.is_loss());
    }

    #[test]
    fn zero_settlement_rate_is_a_domain_error() {
        let rates = ExchangeRates::with_rates(&[(Currency::Rub, 0.0)]);
        let result = calculate(&rates, &brawl_uah(1000.0), 50.0, false);
        assert!(matches!(result, Err(BotError::Domain(_))));
    }

    #[test]
    fn only_commission_categories_can_toggle() {
        assert!(requires_commission(Category::BrawlStars).is_ok());
        assert!(requires_commission(Category::Telegram).is_err());
    }
}
