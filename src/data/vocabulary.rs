use crate::shared::*;

/// Populate the four bottles on the top shelf and the four garnishes below.
pub fn populate_vocabulary(vocab: &mut Vocabulary) {
    vocab.ingredients = vec![
        Ingredient::new("Firewater", FlavorType::Strong),
        Ingredient::new("Berry", FlavorType::Sour),
        Ingredient::new("Herbal", FlavorType::Bitter),
        Ingredient::new("Honey", FlavorType::Sweet),
    ];

    vocab.garnishes = vec![
        Garnish::new("Mint Leaf", FlavorType::Bitter),
        Garnish::new("Lemon Twist", FlavorType::Sour),
        Garnish::new("Chili Flake", FlavorType::Strong),
        Garnish::new("Sugar Rim", FlavorType::Sweet),
    ];
}
