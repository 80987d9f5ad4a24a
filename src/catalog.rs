//! Fixed vocabularies offered by the recipe form.

/// Sentinel dish entry meaning "no named dish, build the recipe from ingredients"
pub const CUSTOM_RECIPE: &str = "None - Custom Recipe";

/// Popular Pakistani, Indian and Desi dishes that can be requested by name.
pub const POPULAR_DISHES: &[&str] = &[
    "Biryani",
    "Chicken Karahi",
    "Mutton Karahi",
    "Nihari",
    "Haleem",
    "Paya",
    "Qorma",
    "Qeema",
    "Handi",
    "Butter Chicken",
    "Tandoori Chicken",
    "Chicken Tikka",
    "Bihari Kabab",
    "Seekh Kabab",
    "Chapli Kabab",
    "Malai Boti",
    "Aloo Gosht",
    "Daal Chawal",
    "Aloo Keema",
    "Palak Paneer",
    "Paneer Tikka",
    "Shahi Paneer",
    "Matar Paneer",
    "Rajma Chawal",
    "Chole Bhature",
    "Pulao",
    "Kabuli Pulao",
    "Sindhi Biryani",
    "Bombay Biryani",
    "Hyderabadi Biryani",
    "Tawa Chicken",
    "Katakat",
    "White Karahi",
    "Chicken Jalfrezi",
    "Chicken Shashlik",
    "Mughlai Chicken",
    "Chicken Masala",
    "Fish Fry",
    "Fish Curry",
    "Daal Makhni",
    "Daal Tarka",
    "Mix Sabzi",
    "Bhindi Masala",
    "Baingan Bharta",
    "Aloo Baingan",
    "Aloo Gobi",
    "Gobi Manchurian",
    "Chicken Manchurian",
    "Fried Rice",
    "Chowmein",
    "Chicken 65",
    "Chicken Malai Handi",
    "Reshmi Kabab",
    "Afghani Boti",
    "Shinwari Karahi",
    "Chicken Ginger",
    "Tawa Keema",
    "Rogan Josh",
    "Kashmiri Yakhni",
    "Masala Dosa",
    "Idli Sambhar",
    "Vada",
    "Uttapam",
    "Pani Puri",
    "Dahi Puri",
    "Bhel Puri",
    "Sev Puri",
    "Papdi Chaat",
    "Gol Gappay",
    "Samosa Chaat",
    "Chicken Roll",
    "Paratha Roll",
    "Lachha Paratha",
    "Amritsari Kulcha",
    "Naan",
    "Garlic Naan",
    "Rumali Roti",
    "Tandoori Roti",
    "Chapati",
    "Halwa Puri",
    "Chana Puri",
    "Aloo Paratha",
    "Keema Paratha",
    "Methi Aloo",
    "Kadhi Pakora",
    "Bagara Baingan",
    "Korma Biryani",
    "Chicken White Qorma",
    "Chicken Handi Masala",
    "Dhaba Style Karahi",
    "Lahori Chargha",
    "Steam Roast",
    "Tikka Boti",
    "Mutton Handi",
    "Chicken Sindhi Karahi",
    "Chicken Madras",
    "Chicken Kadhai Masala",
    "Vegetable Biryani",
    "Achari Chicken",
    "Chicken Kolhapuri",
];

/// Look up a dish by name, ignoring case and surrounding whitespace.
///
/// Returns the catalog spelling so prompts always carry the canonical name.
pub fn find_dish(name: &str) -> Option<&'static str> {
    let needle = name.trim();
    POPULAR_DISHES
        .iter()
        .copied()
        .find(|dish| dish.eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_no_duplicates() {
        let unique: HashSet<_> = POPULAR_DISHES.iter().collect();
        assert_eq!(unique.len(), POPULAR_DISHES.len());
        assert!(POPULAR_DISHES.len() >= 99);
    }

    #[test]
    fn test_sentinel_not_in_catalog() {
        assert!(find_dish(CUSTOM_RECIPE).is_none());
    }

    #[test]
    fn test_find_dish_is_case_insensitive() {
        assert_eq!(find_dish("  butter chicken "), Some("Butter Chicken"));
        assert_eq!(find_dish("CHICKEN 65"), Some("Chicken 65"));
        assert_eq!(find_dish("Pizza"), None);
    }
}
