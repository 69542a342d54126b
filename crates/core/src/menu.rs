//! Static menu catalog.
//!
//! The catalog is defined once at startup and never mutated. Items keep the
//! order in which the menu lists them, and lookups are linear scans: the menu
//! is small enough that an index would only add bookkeeping.

use core::fmt;
use core::str::FromStr;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{MenuItemId, Price};

/// Menu section an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuCategory {
    Appetizers,
    Soups,
    Breads,
    Biryani,
    VegCurries,
    NonVeg,
    SouthIndian,
    StreetFood,
    Rice,
    Desserts,
    Beverages,
}

impl MenuCategory {
    /// All categories in menu order.
    pub const ALL: [Self; 11] = [
        Self::Appetizers,
        Self::Soups,
        Self::Breads,
        Self::Biryani,
        Self::VegCurries,
        Self::NonVeg,
        Self::SouthIndian,
        Self::StreetFood,
        Self::Rice,
        Self::Desserts,
        Self::Beverages,
    ];

    /// Stable identifier used in URLs and filters.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Appetizers => "appetizers",
            Self::Soups => "soups",
            Self::Breads => "breads",
            Self::Biryani => "biryani",
            Self::VegCurries => "veg-curries",
            Self::NonVeg => "non-veg",
            Self::SouthIndian => "south-indian",
            Self::StreetFood => "street-food",
            Self::Rice => "rice",
            Self::Desserts => "desserts",
            Self::Beverages => "beverages",
        }
    }

    /// Human-readable section title.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Appetizers => "Appetizers",
            Self::Soups => "Soups & Salads",
            Self::Breads => "Breads",
            Self::Biryani => "Biryanis",
            Self::VegCurries => "Veg Curries",
            Self::NonVeg => "Non-Veg",
            Self::SouthIndian => "South Indian",
            Self::StreetFood => "Street Food",
            Self::Rice => "Rice Varieties",
            Self::Desserts => "Desserts",
            Self::Beverages => "Beverages",
        }
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error returned when a category id is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown menu category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for MenuCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.id() == s)
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

/// Category filter: either the whole menu or a single section.
///
/// Parses `"all"` (or an empty string) as [`CategoryFilter::All`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(MenuCategory),
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(Self::All),
            other => other.parse().map(Self::Only),
        }
    }
}

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Average rating out of 5.
    pub rating: Decimal,
    /// Preparation and delivery estimate, e.g. "15-20 min".
    pub prep_time: String,
    pub image: String,
    pub category: MenuCategory,
    /// Optional highlight such as "Popular" or "Bestseller".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

/// Returns the full menu in display order.
#[must_use]
pub fn catalog() -> &'static [MenuItem] {
    &CATALOG
}

/// Look up a menu item by id.
#[must_use]
pub fn find(id: MenuItemId) -> Option<&'static MenuItem> {
    CATALOG.iter().find(|item| item.id == id)
}

/// Items matching a category filter, in menu order.
pub fn filter(filter: CategoryFilter) -> impl Iterator<Item = &'static MenuItem> {
    CATALOG.iter().filter(move |item| match filter {
        CategoryFilter::All => true,
        CategoryFilter::Only(category) => item.category == category,
    })
}

const IMAGE_BASE: &str = "https://images.unsplash.com/photo-";

#[allow(clippy::too_many_arguments)]
fn seed(
    id: i32,
    name: &str,
    description: &str,
    cents: i64,
    rating_tenths: i64,
    prep_time: &str,
    photo: &str,
    category: MenuCategory,
    badge: Option<&str>,
) -> MenuItem {
    MenuItem {
        id: MenuItemId::new(id),
        name: name.to_owned(),
        description: description.to_owned(),
        price: Price::from_cents(cents),
        rating: Decimal::new(rating_tenths, 1),
        prep_time: prep_time.to_owned(),
        image: format!("{IMAGE_BASE}{photo}?auto=format&fit=max&w=1080"),
        category,
        badge: badge.map(str::to_owned),
    }
}

static CATALOG: LazyLock<Vec<MenuItem>> = LazyLock::new(|| {
    vec![
        seed(1, "Paneer Tikka", "Grilled spiced cottage cheese marinated in yogurt and aromatic spices", 899, 47, "15-20 min", "1567188040759-fb8a883dc6d8", MenuCategory::Appetizers, Some("Popular")),
        seed(2, "Chicken 65", "Deep-fried spicy chicken bites with curry leaves and green chilies", 999, 48, "15-20 min", "1690519315565-c31ce99f8d58", MenuCategory::Appetizers, Some("Bestseller")),
        seed(3, "Samosa", "Crispy potato and peas stuffed pastry triangles with tamarind chutney", 499, 46, "10-15 min", "1697155836252-d7f969108b5a", MenuCategory::Appetizers, None),
        seed(4, "Onion Bhaji", "Crispy onion fritters with chickpea flour and Indian spices", 599, 45, "10-15 min", "1666190091191-0cd0c5c8c5b5", MenuCategory::Appetizers, None),
        seed(5, "Fish Amritsari", "Battered and fried fish starter with carom seeds and spices", 1199, 47, "15-20 min", "1620894580123-466ad3a0ca06", MenuCategory::Appetizers, None),
        seed(6, "Mulligatawny Soup", "Spiced lentil soup with vegetables and aromatic Indian spices", 599, 45, "10-15 min", "1730312382513-62e9454f4797", MenuCategory::Soups, None),
        seed(7, "Kachumber Salad", "Fresh cucumber, tomato, and onion salad with lemon dressing", 499, 44, "5-10 min", "1677653805080-59c57727c84e", MenuCategory::Soups, Some("Healthy")),
        seed(8, "Rasam", "Tangy South-Indian tomato and tamarind soup with spices", 499, 46, "10-15 min", "1730312382513-62e9454f4797", MenuCategory::Soups, None),
        seed(9, "Plain Naan", "Tandoori leavened bread, soft and fluffy", 299, 47, "10-15 min", "1763951718950-c536b1295213", MenuCategory::Breads, None),
        seed(10, "Roti / Chapati", "Whole-wheat flatbread, freshly made", 199, 46, "10-15 min", "1763951719324-d1ff7eff0f7b", MenuCategory::Breads, None),
        seed(11, "Malabar Parotta", "Flaky layered Kerala-style bread", 399, 48, "15-20 min", "1634976997107-8cfa3b4ec10f", MenuCategory::Breads, Some("Popular")),
        seed(12, "Masala Dosa", "Thin fermented rice-lentil crepe with spiced potato filling", 799, 49, "15-20 min", "1708146464361-5c5ce4f9abb6", MenuCategory::SouthIndian, Some("Bestseller")),
        seed(13, "Vegetable Biryani", "Fragrant basmati rice with mixed vegetables and aromatic spices", 1199, 46, "25-30 min", "1666190092689-e3968aa0c32c", MenuCategory::Biryani, None),
        seed(14, "Chicken Biryani", "Hyderabadi-style aromatic rice with tender chicken and whole spices", 1399, 49, "30-35 min", "1589302168068-964664d93dc0", MenuCategory::Biryani, Some("Bestseller")),
        seed(15, "Egg Biryani", "Flavorful rice layered with boiled eggs and spices", 1099, 45, "20-25 min", "1666190092689-e3968aa0c32c", MenuCategory::Biryani, None),
        seed(16, "Lemon Rice", "South-Indian style tangy rice with lemon, peanuts and curry leaves", 699, 45, "15-20 min", "1552033809-48a1213d359d", MenuCategory::Rice, None),
        seed(17, "Tomato Rice", "Flavorful rice cooked with tomatoes and South-Indian spices", 699, 44, "15-20 min", "1552033809-48a1213d359d", MenuCategory::Rice, None),
        seed(18, "Paneer Butter Masala", "Cottage cheese in rich creamy tomato gravy", 1099, 48, "20-25 min", "1701579231378-3726490a407b", MenuCategory::VegCurries, Some("Popular")),
        seed(19, "Chana Masala", "Chickpea curry with onion-tomato gravy and aromatic spices", 899, 46, "20-25 min", "1587033649773-5c231faa21e3", MenuCategory::VegCurries, None),
        seed(20, "Aloo Gobi", "Potato and cauliflower dry curry with Indian spices", 899, 45, "20-25 min", "1640542509430-f529fdfce835", MenuCategory::VegCurries, None),
        seed(21, "Dal Tadka", "Yellow lentils tempered with ghee, cumin, and garlic", 799, 47, "15-20 min", "1587033649773-5c231faa21e3", MenuCategory::VegCurries, None),
        seed(22, "Butter Chicken", "Tender chicken in rich tomato-butter gravy with cream", 1399, 49, "25-30 min", "1603894584373-5ac82b2ae398", MenuCategory::NonVeg, Some("Bestseller")),
        seed(23, "Mutton Rogan Josh", "Kashmiri mutton curry with aromatic spices and yogurt", 1599, 47, "30-35 min", "1603894584373-5ac82b2ae398", MenuCategory::NonVeg, None),
        seed(24, "Prawn Curry", "Coastal style shrimp curry with coconut and spices", 1499, 46, "25-30 min", "1603894584373-5ac82b2ae398", MenuCategory::NonVeg, None),
        seed(25, "Kerala Fish Curry", "Coconut-tamarind based fish curry with curry leaves", 1399, 47, "25-30 min", "1620894580123-466ad3a0ca06", MenuCategory::NonVeg, None),
        seed(26, "Chettinad Chicken", "Spicy aromatic Tamil Nadu curry with freshly ground spices", 1399, 48, "25-30 min", "1603894584373-5ac82b2ae398", MenuCategory::NonVeg, None),
        seed(27, "Idli with Sambar", "Steamed rice-lentil cakes served with sambar and chutney", 599, 47, "15-20 min", "1644289450169-bc58aa16bacb", MenuCategory::SouthIndian, Some("Healthy")),
        seed(28, "Medu Vada", "Crispy lentil doughnut served with sambar and chutney", 599, 46, "15-20 min", "1666190091191-0cd0c5c8c5b5", MenuCategory::SouthIndian, None),
        seed(29, "Uttapam", "Thick pancake topped with onions, tomatoes and green chilies", 699, 45, "15-20 min", "1630441508966-431c08536d1b", MenuCategory::SouthIndian, None),
        seed(30, "Ven Pongal", "Comforting rice and moong dal dish with ghee and pepper", 699, 46, "15-20 min", "1707270686195-7415251cc9c0", MenuCategory::SouthIndian, None),
        seed(31, "Mysore Masala Dosa", "Crispy dosa with spicy red chutney and potato filling", 899, 48, "20-25 min", "1708146464361-5c5ce4f9abb6", MenuCategory::SouthIndian, Some("Popular")),
        seed(32, "Rava Dosa", "Crispy semolina crepe with onions and cumin", 799, 46, "15-20 min", "1695666403934-5929e4690900", MenuCategory::SouthIndian, None),
        seed(33, "Appam with Stew", "Soft lacy rice pancakes served with vegetable stew", 899, 47, "20-25 min", "1644289450169-bc58aa16bacb", MenuCategory::SouthIndian, None),
        seed(34, "Upma", "Savory semolina porridge with vegetables and spices", 599, 44, "10-15 min", "1644289450169-bc58aa16bacb", MenuCategory::SouthIndian, None),
        seed(35, "Pav Bhaji", "Mumbai-style mashed vegetables served with buttered buns", 799, 48, "15-20 min", "1591200571589-195fc9ce8742", MenuCategory::StreetFood, Some("Popular")),
        seed(36, "Vada Pav", "Potato fritter sandwich in soft bun with chutneys", 499, 47, "10-15 min", "1554978991-33ef7f31d658", MenuCategory::StreetFood, None),
        seed(37, "Pani Puri", "Crispy hollow puris filled with spiced water and potato", 599, 49, "10-15 min", "1649140041688-0f75446e707e", MenuCategory::StreetFood, Some("Bestseller")),
        seed(38, "Bhel Puri", "Chaat with puffed rice, vegetables, tamarind and mint chutney", 599, 46, "10-15 min", "1649140041688-0f75446e707e", MenuCategory::StreetFood, None),
        seed(39, "Curd Rice", "Comforting South-Indian rice mixed with yogurt and tempering", 599, 45, "10-15 min", "1633383718081-22ac93e3db65", MenuCategory::Rice, Some("Healthy")),
        seed(40, "Coconut Rice", "Fragrant rice with grated coconut and South-Indian spices", 699, 46, "15-20 min", "1715941873444-e8ec67753c98", MenuCategory::Rice, None),
        seed(41, "Tamarind Rice", "Tangy rice with tamarind, peanuts and curry leaves (Puliyodarai)", 699, 47, "15-20 min", "1552033809-48a1213d359d", MenuCategory::Rice, None),
        seed(42, "Bisi Bele Bath", "Karnataka-style rice, lentils and vegetables with special spice mix", 799, 47, "20-25 min", "1715941873444-e8ec67753c98", MenuCategory::Rice, None),
        seed(43, "Gulab Jamun", "Milk-based syrupy dumplings, soft and sweet", 499, 48, "10-15 min", "1666190092159-3171cf0fbb12", MenuCategory::Desserts, Some("Popular")),
        seed(44, "Rasmalai", "Cheese balls soaked in sweetened, flavored milk", 599, 47, "10-15 min", "1516709315038-c53bf87e8f48", MenuCategory::Desserts, None),
        seed(45, "Payasam / Kheer", "Sweet rice or vermicelli pudding with milk and nuts", 499, 46, "10-15 min", "1708782340357-b7b38d653979", MenuCategory::Desserts, None),
        seed(46, "Kulfi", "Traditional Indian frozen dessert with cardamom and pistachios", 499, 47, "5-10 min", "1762999001316-27e31c06d3cf", MenuCategory::Desserts, None),
        seed(47, "Mysore Pak", "Traditional South-Indian sweet made with ghee, sugar and gram flour", 599, 46, "5-10 min", "1751292271911-232b8ef4219e", MenuCategory::Desserts, None),
        seed(48, "Kesari Bath", "Sweet semolina pudding with saffron and nuts", 499, 45, "10-15 min", "1708782340357-b7b38d653979", MenuCategory::Desserts, None),
        seed(49, "South Indian Filter Coffee", "Strong coffee decoction with frothed milk, traditional style", 299, 49, "5-10 min", "1668236482744-b48b28650f12", MenuCategory::Beverages, Some("Bestseller")),
        seed(50, "Masala Chai", "Spiced Indian tea with ginger, cardamom and milk", 249, 48, "5-10 min", "1698619952010-3bc850cbcb3b", MenuCategory::Beverages, Some("Popular")),
        seed(51, "Sweet Lassi", "Chilled sweet yogurt drink, refreshing and creamy", 399, 47, "5-10 min", "1709620061649-b352f63ea4cc", MenuCategory::Beverages, None),
        seed(52, "Badam Milk", "Almond-flavored sweetened milk drink", 399, 46, "5-10 min", "1760812990908-70aff19fc16e", MenuCategory::Beverages, None),
    ]
});
