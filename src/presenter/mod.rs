pub mod profit_presenter;
pub mod rates_presenter;

pub use profit_presenter::{ProfitPresenter, ProfitPresenterImpl};
pub use rates_presenter::{RatesPresenter, RatesPresenterImpl};
