use std::str::FromStr;

use super::BotError;

/// Platform and payment fees applied after the commission.
pub const FEE_MULTIPLIER: f64 = 0.97;

/// Commission schedule of a category with a standard and a reduced rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommissionSchedule {
    pub standard: f64,
    pub alternate: f64,
    /// Name of the toggle button that switches to the alternate rate.
    pub toggle_label: &'static str,
}

impl CommissionSchedule {
    pub fn rate(&self, alternate_active: bool) -> f64 {
        if alternate_active {
            self.alternate
        } else {
            self.standard
        }
    }
}

/// Product categories offered in the profit calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    BrawlStars,
    ClashRoyale,
    Telegram,
}

/// Static description of how a category is calculated and labelled.
#[derive(Debug, Clone, Copy)]
pub struct CategoryDescriptor {
    pub slug: &'static str,
    pub title: &'static str,
    /// Noun used for the thing sold to the buyer ("lot" or "item").
    pub lot_noun: &'static str,
    pub commission: Option<CommissionSchedule>,
    /// Whether `,` in an action price expression separates summands
    /// instead of marking the decimal point.
    pub comma_is_plus: bool,
}

const BRAWL_STARS: CategoryDescriptor = CategoryDescriptor {
    slug: "brawl",
    title: "🟡 Brawl Stars",
    lot_noun: "lot",
    commission: Some(CommissionSchedule {
        standard: 0.16068374059755964,
        alternate: 0.08224296149183244,
        toggle_label: "Quests",
    }),
    comma_is_plus: false,
};

const CLASH_ROYALE: CategoryDescriptor = CategoryDescriptor {
    slug: "clash",
    title: "🔴 Clash Royale",
    lot_noun: "lot",
    commission: Some(CommissionSchedule {
        standard: 0.123214261446109,
        alternate: 0.05576919826590123,
        toggle_label: "Items",
    }),
    comma_is_plus: false,
};

const TELEGRAM: CategoryDescriptor = CategoryDescriptor {
    slug: "telegram",
    title: "🔵 Telegram",
    lot_noun: "item",
    commission: None,
    comma_is_plus: true,
};

impl Category {
    pub const ALL: [Category; 3] = [Category::BrawlStars, Category::ClashRoyale, Category::Telegram];

    pub fn descriptor(&self) -> &'static CategoryDescriptor {
        match self {
            Category::BrawlStars => &BRAWL_STARS,
            Category::ClashRoyale => &CLASH_ROYALE,
            Category::Telegram => &TELEGRAM,
        }
    }

    pub fn slug(&self) -> &'static str {
        self.descriptor().slug
    }

    pub fn title(&self) -> &'static str {
        self.descriptor().title
    }

    pub fn commission(&self) -> Option<CommissionSchedule> {
        self.descriptor().commission
    }

    pub fn has_commission(&self) -> bool {
        self.descriptor().commission.is_some()
    }
}

impl FromStr for Category {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.slug() == s)
            .ok_or_else(|| BotError::UnknownCallback(format!("unknown category: {}", s)))
    }
}
