//! Keyword classification of assistant input.
//!
//! Classification is substring containment over the lower-cased input,
//! checked against static ordered tables. The first rule that matches wins;
//! there is no scoring and no fuzzy matching.

use serde::{Deserialize, Serialize};

use crate::types::MenuItemId;

/// What the user asked the assistant to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    /// Put `quantity` units of an item in the cart.
    AddItem { item_id: MenuItemId, quantity: u32 },
    /// Suggest a few dishes.
    Recommend { theme: Theme },
    /// Describe what is in the cart.
    ShowCart,
    /// Place the order.
    Checkout,
    /// Nothing recognized.
    Unknown,
}

/// Flavor of a recommendation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Spicy,
    Vegetarian,
    Breakfast,
    Dessert,
    Popular,
}

impl Theme {
    /// Items suggested for this theme, in presentation order.
    #[must_use]
    pub const fn picks(self) -> [MenuItemId; 3] {
        let ids = match self {
            Self::Spicy => [2, 26, 31],
            Self::Vegetarian => [18, 19, 21],
            Self::Breakfast => [27, 12, 30],
            Self::Dessert => [43, 44, 46],
            Self::Popular => [14, 22, 12],
        };
        [
            MenuItemId::new(ids[0]),
            MenuItemId::new(ids[1]),
            MenuItemId::new(ids[2]),
        ]
    }

    /// Adjective used in the reply ("Here are some spicy picks").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Spicy => "spicy",
            Self::Vegetarian => "vegetarian",
            Self::Breakfast => "breakfast",
            Self::Dessert => "sweet",
            Self::Popular => "popular",
        }
    }
}

/// Dishes and the phrases that order them.
///
/// Entries whose keywords contain another entry's keyword come first
/// ("mysore masala dosa" before "masala dosa", "vada pav" before "vada").
static ITEM_KEYWORDS: &[(i32, &[&str])] = &[
    (31, &["mysore masala dosa", "mysore dosa"]),
    (47, &["mysore pak"]),
    (32, &["rava dosa"]),
    (12, &["masala dosa", "dosa"]),
    (13, &["vegetable biryani", "veg biryani"]),
    (15, &["egg biryani"]),
    (14, &["chicken biryani", "biryani"]),
    (18, &["paneer butter masala", "paneer makhani"]),
    (1, &["paneer tikka", "paneer"]),
    (22, &["butter chicken", "murgh makhani"]),
    (26, &["chettinad"]),
    (2, &["chicken 65"]),
    (36, &["vada pav", "vada pao"]),
    (28, &["medu vada", "vada"]),
    (35, &["pav bhaji"]),
    (4, &["onion bhaji", "bhaji", "pakora"]),
    (3, &["samosa"]),
    (5, &["fish amritsari", "fried fish"]),
    (25, &["fish curry"]),
    (24, &["prawn", "shrimp"]),
    (23, &["rogan josh", "mutton", "lamb"]),
    (6, &["mulligatawny", "soup"]),
    (7, &["kachumber", "salad"]),
    (8, &["rasam"]),
    (9, &["naan"]),
    (10, &["roti", "chapati"]),
    (11, &["parotta", "paratha"]),
    (16, &["lemon rice"]),
    (17, &["tomato rice"]),
    (39, &["curd rice"]),
    (40, &["coconut rice"]),
    (41, &["tamarind rice"]),
    (42, &["bisi bele"]),
    (19, &["chana masala", "chana", "chole"]),
    (20, &["aloo gobi"]),
    (21, &["dal tadka", "dal"]),
    (27, &["idli"]),
    (29, &["uttapam"]),
    (30, &["pongal"]),
    (33, &["appam"]),
    (34, &["upma"]),
    (37, &["pani puri", "golgappa"]),
    (38, &["bhel"]),
    (43, &["gulab jamun"]),
    (44, &["rasmalai", "ras malai"]),
    (45, &["payasam", "kheer"]),
    (46, &["kulfi"]),
    (48, &["kesari"]),
    (49, &["filter coffee", "coffee"]),
    (50, &["masala chai", "chai"]),
    (51, &["lassi"]),
    (52, &["badam milk", "badam"]),
];

static RECOMMEND_TRIGGERS: &[&str] = &[
    "menu",
    "show",
    "what",
    "recommend",
    "suggest",
    "something",
    "hungry",
    "craving",
    "dinner",
    "tonight",
];

static THEME_KEYWORDS: &[(Theme, &[&str])] = &[
    (Theme::Spicy, &["spicy"]),
    (Theme::Vegetarian, &["vegetarian", "veggie", "veg"]),
    (Theme::Breakfast, &["breakfast", "morning"]),
    (Theme::Dessert, &["dessert", "sweet"]),
];

static CART_TRIGGERS: &[&str] = &["cart", "my order"];

static CHECKOUT_TRIGGERS: &[&str] = &[
    "checkout",
    "check out",
    "place order",
    "place the order",
    "confirm",
];

const QUANTITY_WORDS: [(&str, u32); 5] = [
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
];

/// Classify free-text input.
///
/// ```
/// use echoeats_core::assistant::{Intent, Theme, classify};
/// use echoeats_core::MenuItemId;
///
/// assert_eq!(
///     classify("I want 2 chicken biryani"),
///     Intent::AddItem { item_id: MenuItemId::new(14), quantity: 2 },
/// );
/// assert_eq!(classify("something spicy?"), Intent::Recommend { theme: Theme::Spicy });
/// assert_eq!(classify("checkout"), Intent::Checkout);
/// ```
#[must_use]
pub fn classify(text: &str) -> Intent {
    let input = text.to_lowercase();

    if let Some((item_id, keyword)) = match_item(&input) {
        // Digits inside the dish name ("chicken 65") are not quantities.
        let rest = input.replacen(keyword, " ", 1);
        return Intent::AddItem {
            item_id,
            quantity: extract_quantity(&rest),
        };
    }

    let theme = THEME_KEYWORDS
        .iter()
        .find(|(_, words)| contains_any(&input, words))
        .map(|(theme, _)| *theme);
    if theme.is_some() || contains_any(&input, RECOMMEND_TRIGGERS) {
        return Intent::Recommend {
            theme: theme.unwrap_or(Theme::Popular),
        };
    }

    if contains_any(&input, CART_TRIGGERS) {
        return Intent::ShowCart;
    }
    if contains_any(&input, CHECKOUT_TRIGGERS) {
        return Intent::Checkout;
    }
    Intent::Unknown
}

/// First quantity word or positive number in the input, defaulting to one.
#[must_use]
pub fn extract_quantity(input: &str) -> u32 {
    input
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .find_map(|word| {
            QUANTITY_WORDS
                .iter()
                .find(|(name, _)| word.eq_ignore_ascii_case(name))
                .map(|(_, n)| *n)
                .or_else(|| word.parse::<u32>().ok().filter(|n| *n > 0))
        })
        .unwrap_or(1)
}

fn match_item(input: &str) -> Option<(MenuItemId, &'static str)> {
    ITEM_KEYWORDS.iter().find_map(|(id, keywords)| {
        keywords
            .iter()
            .find(|keyword| input.contains(*keyword))
            .map(|keyword| (MenuItemId::new(*id), *keyword))
    })
}

fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| input.contains(needle))
}
