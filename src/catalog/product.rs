use serde::Deserialize;

/// One drink on the promo carousel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Product {
    pub id: u32,
    /// Key of a bundled image (see [`crate::assets::product_art`]).
    pub image: String,
    pub name: String,
    pub price: f64,
    /// Display string including its unit, e.g. `420ml`.
    pub size: String,
    pub description: String,
}

impl Product {
    /// Price without the currency glyph, printed as the shortest decimal
    /// that reads back to the same value (`28`, `5.5`).
    pub fn price_label(&self) -> String {
        self.price.to_string()
    }
}

/// The three drinks shipped with the screen.
pub(crate) fn builtin_products() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            image: "coffee1".to_string(),
            name: "Strawberry Cheesecake Frappuccino".to_string(),
            price: 28.0,
            size: "420ml".to_string(),
            description: "A dreamy combination of rich strawberry puree and crushed graham \
                          crackers, topped with whipped cream and a drizzle of strawberry sauce."
                .to_string(),
        },
        Product {
            id: 2,
            image: "coffee2".to_string(),
            name: "Matcha Green Tea Frappuccino".to_string(),
            price: 22.0,
            size: "276ml".to_string(),
            description: "A refreshing and smooth blend of premium matcha green tea, creamy \
                          milk, and ice, finished with a swirl of whipped cream and a sprinkle \
                          of matcha powder."
                .to_string(),
        },
        Product {
            id: 3,
            image: "coffee3".to_string(),
            name: "Mocha Chocolate Chip Frappuccino".to_string(),
            price: 18.0,
            size: "391ml".to_string(),
            description: "A delightful blend of rich mocha, chocolate chips, and creamy milk, \
                          topped with whipped cream and drizzled with luscious chocolate syrup."
                .to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: f64) -> Product {
        Product {
            id: 9,
            image: "coffee1".to_string(),
            name: "Test".to_string(),
            price,
            size: "100ml".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_price_label_whole_and_fractional() {
        assert_eq!(product(28.0).price_label(), "28");
        assert_eq!(product(4.5).price_label(), "4.5");
        assert_eq!(product(4.25).price_label(), "4.25");
        assert_eq!(product(0.0).price_label(), "0");
    }

    #[test]
    fn test_builtin_descriptions_are_single_spaced() {
        for p in builtin_products() {
            assert!(!p.description.contains("  "), "{}", p.description);
        }
    }
}
