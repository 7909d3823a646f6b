//! Shared components, resources, events, and states for Tavernkeep.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE: top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
    GameOver,
}

// ═══════════════════════════════════════════════════════════════════════
// VOCABULARY: flavors, preparation, ingredients, garnishes
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlavorType {
    Sweet,
    Sour,
    Strong,
    Bitter,
}

impl FlavorType {
    pub const ALL: [FlavorType; 4] = [
        FlavorType::Sweet,
        FlavorType::Sour,
        FlavorType::Strong,
        FlavorType::Bitter,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FlavorType::Sweet => "Sweet",
            FlavorType::Sour => "Sour",
            FlavorType::Strong => "Strong",
            FlavorType::Bitter => "Bitter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrepMethod {
    Shaken,
    Stirred,
    Poured,
}

impl PrepMethod {
    pub const ALL: [PrepMethod; 3] = [PrepMethod::Shaken, PrepMethod::Stirred, PrepMethod::Poured];

    pub fn name(self) -> &'static str {
        match self {
            PrepMethod::Shaken => "Shaken",
            PrepMethod::Stirred => "Stirred",
            PrepMethod::Poured => "Poured",
        }
    }
}

/// A bottle on the shelf. Identity is by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub flavor: FlavorType,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, flavor: FlavorType) -> Self {
        Self {
            name: name.into(),
            flavor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Garnish {
    pub name: String,
    pub flavor: FlavorType,
}

impl Garnish {
    pub fn new(name: impl Into<String>, flavor: FlavorType) -> Self {
        Self {
            name: name.into(),
            flavor,
        }
    }
}

/// The fixed ingredient and garnish shelves.
#[derive(Resource, Debug, Clone, Default)]
pub struct Vocabulary {
    pub ingredients: Vec<Ingredient>,
    pub garnishes: Vec<Garnish>,
}

impl Vocabulary {
    pub fn ingredient(&self, name: &str) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.name == name)
    }

    pub fn garnish(&self, name: &str) -> Option<&Garnish> {
        self.garnishes.iter().find(|g| g.name == name)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// RECIPE BOOK
// ═══════════════════════════════════════════════════════════════════════

/// Tag that hides a recipe from the book and from mission targets.
pub const SECRET_TAG: &str = "Secret";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    /// Ingredient names; repeated names count separately.
    pub ingredients: Vec<String>,
    /// Accepted garnishes. `None` = any garnish (or none).
    pub garnishes: Option<Vec<String>>,
    pub serving: Option<PrepMethod>,
    pub tags: Vec<String>,
    pub description: String,
}

impl Recipe {
    pub fn is_secret(&self) -> bool {
        self.tags.iter().any(|t| t == SECRET_TAG)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct RecipeBook {
    pub recipes: Vec<Recipe>,
}

impl RecipeBook {
    pub fn get(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.name == name)
    }

    /// Recipes that may be advertised as mission targets (never secrets).
    pub fn mission_pool(&self) -> Vec<&Recipe> {
        self.recipes.iter().filter(|r| !r.is_secret()).collect()
    }

    /// Player-visible listing, sorted by name. Secrets only appear once discovered.
    pub fn visible<'a>(&'a self, discovered: &DiscoveredSecrets) -> Vec<&'a Recipe> {
        let mut listing: Vec<&Recipe> = self
            .recipes
            .iter()
            .filter(|r| !r.is_secret() || discovered.contains(&r.name))
            .collect();
        listing.sort_by(|a, b| a.name.cmp(&b.name));
        listing
    }

    /// Keeps recipes carrying any of the selected tags. No tags = everything.
    pub fn filter_by_tags<'a>(&'a self, recipes: Vec<&'a Recipe>, tags: &[&str]) -> Vec<&'a Recipe> {
        if tags.is_empty() {
            return recipes;
        }
        recipes
            .into_iter()
            .filter(|r| tags.iter().any(|t| r.has_tag(t)))
            .collect()
    }
}

/// Names of secret recipes the player has stumbled upon this session.
#[derive(Resource, Debug, Clone, Default)]
pub struct DiscoveredSecrets {
    pub names: Vec<String>,
}

impl DiscoveredSecrets {
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Records a discovery. Returns true the first time a name is seen.
    pub fn record(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }
}

// ═══════════════════════════════════════════════════════════════════════
// DRINK: the mixing glass
// ═══════════════════════════════════════════════════════════════════════

pub const MAX_DRINK_INGREDIENTS: usize = 4;

/// A drink as assembled in the mixing glass. Never holds more than
/// `MAX_DRINK_INGREDIENTS` ingredients, including when deserialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DrinkParts")]
pub struct Drink {
    ingredients: Vec<Ingredient>,
    pub garnish: Option<Garnish>,
    pub prep: Option<PrepMethod>,
}

/// Wire shape of a `Drink`, checked on the way in.
#[derive(Debug, Clone, Deserialize)]
pub struct DrinkParts {
    ingredients: Vec<Ingredient>,
    #[serde(default)]
    garnish: Option<Garnish>,
    #[serde(default)]
    prep: Option<PrepMethod>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("a drink holds at most {max} ingredients, got {got}", max = MAX_DRINK_INGREDIENTS)]
pub struct OverfullGlass {
    pub got: usize,
}

impl TryFrom<DrinkParts> for Drink {
    type Error = OverfullGlass;

    fn try_from(parts: DrinkParts) -> Result<Self, Self::Error> {
        let got = parts.ingredients.len();
        Drink::from_parts(parts.ingredients, parts.garnish, parts.prep)
            .ok_or(OverfullGlass { got })
    }
}

impl Drink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a drink in one go. Returns `None` if the glass would overflow.
    pub fn from_parts(
        ingredients: Vec<Ingredient>,
        garnish: Option<Garnish>,
        prep: Option<PrepMethod>,
    ) -> Option<Self> {
        if ingredients.len() > MAX_DRINK_INGREDIENTS {
            return None;
        }
        Some(Self {
            ingredients,
            garnish,
            prep,
        })
    }

    /// Adds a pour. Returns false (and leaves the glass alone) when full.
    pub fn add_ingredient(&mut self, ingredient: Ingredient) -> bool {
        if self.ingredients.len() >= MAX_DRINK_INGREDIENTS {
            return false;
        }
        self.ingredients.push(ingredient);
        true
    }

    pub fn remove_ingredient(&mut self, index: usize) -> Option<Ingredient> {
        (index < self.ingredients.len()).then(|| self.ingredients.remove(index))
    }

    pub fn with_garnish(mut self, garnish: Garnish) -> Self {
        self.garnish = Some(garnish);
        self
    }

    pub fn with_prep(mut self, prep: PrepMethod) -> Self {
        self.prep = Some(prep);
        self
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// Ingredient count plus one for a garnish.
    pub fn component_count(&self) -> usize {
        self.ingredients.len() + usize::from(self.garnish.is_some())
    }

    /// Ingredients of `flavor`, plus the garnish if it shares the flavor.
    pub fn flavor_count(&self, flavor: FlavorType) -> usize {
        let pours = self.ingredients.iter().filter(|i| i.flavor == flavor).count();
        let garnish = self.garnish.as_ref().filter(|g| g.flavor == flavor).is_some();
        pours + usize::from(garnish)
    }

    pub fn clear(&mut self) {
        self.ingredients.clear();
        self.garnish = None;
        self.prep = None;
    }
}

// ═══════════════════════════════════════════════════════════════════════
// MISSIONS
// ═══════════════════════════════════════════════════════════════════════

/// Discriminant of a mission, used for weighting and tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionType {
    Cocktail,
    SimilarCocktail,
    CocktailVariation,
    Flavor,
    Ingredient,
    Preparation,
    GarnishOnly,
    NoType,
    ExactCount,
    MixedTypes,
}

impl MissionType {
    pub const ALL: [MissionType; 10] = [
        MissionType::Cocktail,
        MissionType::SimilarCocktail,
        MissionType::CocktailVariation,
        MissionType::Flavor,
        MissionType::Ingredient,
        MissionType::Preparation,
        MissionType::GarnishOnly,
        MissionType::NoType,
        MissionType::ExactCount,
        MissionType::MixedTypes,
    ];

    /// Mission types that need a recipe from the book.
    pub fn targets_recipe(self) -> bool {
        matches!(
            self,
            MissionType::Cocktail | MissionType::SimilarCocktail | MissionType::CocktailVariation
        )
    }
}

/// Type-specific requirement of a mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MissionKind {
    Cocktail { target: Recipe },
    SimilarCocktail { target: Recipe, similar: Recipe },
    CocktailVariation { target: Recipe, original: String, substitution: String },
    Flavor { flavor: FlavorType, required: u8 },
    Ingredient { ingredient: Ingredient },
    Preparation { method: PrepMethod },
    GarnishOnly { garnish: String },
    NoType { forbidden: Vec<FlavorType> },
    ExactCount { count: u8 },
    MixedTypes { flavors: Vec<FlavorType> },
}

impl MissionKind {
    pub fn mission_type(&self) -> MissionType {
        match self {
            MissionKind::Cocktail { .. } => MissionType::Cocktail,
            MissionKind::SimilarCocktail { .. } => MissionType::SimilarCocktail,
            MissionKind::CocktailVariation { .. } => MissionType::CocktailVariation,
            MissionKind::Flavor { .. } => MissionType::Flavor,
            MissionKind::Ingredient { .. } => MissionType::Ingredient,
            MissionKind::Preparation { .. } => MissionType::Preparation,
            MissionKind::GarnishOnly { .. } => MissionType::GarnishOnly,
            MissionKind::NoType { .. } => MissionType::NoType,
            MissionKind::ExactCount { .. } => MissionType::ExactCount,
            MissionKind::MixedTypes { .. } => MissionType::MixedTypes,
        }
    }
}

/// A customer's order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub kind: MissionKind,
    pub text: String,
    pub tags: Vec<String>,
}

impl Mission {
    pub fn mission_type(&self) -> MissionType {
        self.kind.mission_type()
    }
}

/// The single order currently on the bar. Replaced after every serve or skip.
#[derive(Resource, Debug, Clone, Default)]
pub struct ActiveMission {
    pub mission: Option<Mission>,
}

/// Relative draw weights per mission type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionWeights {
    pub cocktail: u32,
    pub similar_cocktail: u32,
    pub cocktail_variation: u32,
    pub flavor: u32,
    pub ingredient: u32,
    pub preparation: u32,
    pub garnish_only: u32,
    pub no_type: u32,
    pub exact_count: u32,
    pub mixed_types: u32,
}

impl Default for MissionWeights {
    fn default() -> Self {
        Self {
            cocktail: 4,
            similar_cocktail: 2,
            cocktail_variation: 2,
            flavor: 1,
            ingredient: 1,
            preparation: 1,
            garnish_only: 1,
            no_type: 1,
            exact_count: 1,
            mixed_types: 1,
        }
    }
}

impl MissionWeights {
    pub fn weight(&self, mission_type: MissionType) -> u32 {
        match mission_type {
            MissionType::Cocktail => self.cocktail,
            MissionType::SimilarCocktail => self.similar_cocktail,
            MissionType::CocktailVariation => self.cocktail_variation,
            MissionType::Flavor => self.flavor,
            MissionType::Ingredient => self.ingredient,
            MissionType::Preparation => self.preparation,
            MissionType::GarnishOnly => self.garnish_only,
            MissionType::NoType => self.no_type,
            MissionType::ExactCount => self.exact_count,
            MissionType::MixedTypes => self.mixed_types,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVALUATION
// ═══════════════════════════════════════════════════════════════════════

/// Result of judging a served drink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub points: u32,
    pub drink_name: String,
    pub is_known_recipe: bool,
    pub is_secret: bool,
}

/// When the secret-discovery popup is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SecretPopupPolicy {
    /// Only the first time a given secret is served this session.
    #[default]
    FirstDiscovery,
    /// Every time a secret recipe is served.
    Always,
}

// ═══════════════════════════════════════════════════════════════════════
// ECONOMY
// ═══════════════════════════════════════════════════════════════════════

/// Spendable gold earned from tips.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wallet {
    pub gold: u32,
}

/// The tavern's books. Negative = debt.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub balance: i64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            balance: STARTING_BALANCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    ExtraTime,
    DebtReduction,
    CostReduction,
    MeadFridge,
    DrinkIncome,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 5] = [
        UpgradeKind::ExtraTime,
        UpgradeKind::DebtReduction,
        UpgradeKind::CostReduction,
        UpgradeKind::MeadFridge,
        UpgradeKind::DrinkIncome,
    ];

    pub fn cost(self) -> u32 {
        match self {
            UpgradeKind::ExtraTime => 100,
            UpgradeKind::DebtReduction => 150,
            UpgradeKind::CostReduction => 200,
            UpgradeKind::MeadFridge => 300,
            UpgradeKind::DrinkIncome => 250,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UpgradeKind::ExtraTime => "Extra Time",
            UpgradeKind::DebtReduction => "Debt Reduction",
            UpgradeKind::CostReduction => "Cost Reduction",
            UpgradeKind::MeadFridge => "Mead Fridge",
            UpgradeKind::DrinkIncome => "Better Tips",
        }
    }
}

/// One-time purchases. All false at game start and after a restart.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upgrades {
    pub extra_time: bool,
    pub debt_reduction: bool,
    pub cost_reduction: bool,
    pub mead_fridge: bool,
    pub drink_income: bool,
}

impl Upgrades {
    pub fn has(&self, kind: UpgradeKind) -> bool {
        match kind {
            UpgradeKind::ExtraTime => self.extra_time,
            UpgradeKind::DebtReduction => self.debt_reduction,
            UpgradeKind::CostReduction => self.cost_reduction,
            UpgradeKind::MeadFridge => self.mead_fridge,
            UpgradeKind::DrinkIncome => self.drink_income,
        }
    }

    pub fn grant(&mut self, kind: UpgradeKind) {
        match kind {
            UpgradeKind::ExtraTime => self.extra_time = true,
            UpgradeKind::DebtReduction => self.debt_reduction = true,
            UpgradeKind::CostReduction => self.cost_reduction = true,
            UpgradeKind::MeadFridge => self.mead_fridge = true,
            UpgradeKind::DrinkIncome => self.drink_income = true,
        }
    }
}

/// Drink counters for the current day and the whole session.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShiftStats {
    pub drinks_served_today: u32,
    pub total_drinks_served: u32,
}

/// Wallet totals for the whole session, reported at game over.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomyStats {
    pub total_gold_earned: u64,
    pub total_gold_spent: u64,
    pub total_debt_paid: u64,
}

/// End-of-day books.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayReport {
    pub earned: i64,
    pub rent: i64,
    pub booze: i64,
    pub food: i64,
    pub total_cost: i64,
    pub net: i64,
    pub new_balance: i64,
}

// ═══════════════════════════════════════════════════════════════════════
// CALENDAR
// ═══════════════════════════════════════════════════════════════════════

/// Countdown for the current day of service.
#[derive(Resource, Debug, Clone)]
pub struct DayClock {
    pub day: u32,
    pub seconds_left: f32,
    /// False between the bar closing and the next day opening.
    pub running: bool,
}

impl Default for DayClock {
    fn default() -> Self {
        Self {
            day: 1,
            seconds_left: DAY_LENGTH_SECS,
            running: true,
        }
    }
}

impl DayClock {
    /// Counts down by `delta` seconds. Returns true on the tick the clock runs out.
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.running {
            return false;
        }
        self.seconds_left = (self.seconds_left - delta).max(0.0);
        if self.seconds_left <= 0.0 {
            self.running = false;
            return true;
        }
        false
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS: cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

/// Front-end hands a finished drink over the counter.
#[derive(Event, Debug, Clone)]
pub struct ServeDrinkEvent {
    pub drink: Drink,
}

/// A drink was judged and the tip decided.
#[derive(Event, Debug, Clone)]
pub struct DrinkServedEvent {
    pub evaluation: Evaluation,
    pub tip: u32,
}

/// A secret recipe was served.
#[derive(Event, Debug, Clone)]
pub struct SecretDiscoveredEvent {
    pub recipe_name: String,
    pub first_time: bool,
    /// Whether the front-end should show the discovery popup.
    pub show_popup: bool,
}

#[derive(Event, Debug, Clone)]
pub struct MissionPostedEvent {
    pub mission: Mission,
}

/// Player asks to skip the current order (needs the Mead Fridge).
#[derive(Event, Debug, Clone)]
pub struct SkipMissionEvent;

/// Skip was paid for; the board should post a new order.
#[derive(Event, Debug, Clone)]
pub struct MissionSkippedEvent;

#[derive(Event, Debug, Clone)]
pub struct GoldChangeEvent {
    pub amount: i32, // positive = gain, negative = spend
    pub reason: String,
}

#[derive(Event, Debug, Clone)]
pub struct PurchaseUpgradeEvent {
    pub upgrade: UpgradeKind,
}

#[derive(Event, Debug, Clone)]
pub struct UpgradePurchasedEvent {
    pub upgrade: UpgradeKind,
}

/// Move wallet gold into the ledger. Capped at the wallet and the debt.
#[derive(Event, Debug, Clone)]
pub struct PayDebtEvent {
    pub amount: u32,
}

/// Front-end closes the bar before the clock runs out.
#[derive(Event, Debug, Clone)]
pub struct CloseBarEvent;

#[derive(Event, Debug, Clone)]
pub struct DayEndEvent {
    pub day: u32,
}

#[derive(Event, Debug, Clone)]
pub struct DayReportEvent {
    pub day: u32,
    pub drinks_served: u32,
    pub report: DayReport,
}

#[derive(Event, Debug, Clone)]
pub struct DayStartedEvent {
    pub day: u32,
}

#[derive(Event, Debug, Clone)]
pub struct GameOverEvent {
    pub victory: bool,
    pub final_balance: i64,
    pub days_played: u32,
    pub total_drinks: u32,
    pub totals: EconomyStats,
}

#[derive(Event, Debug, Clone)]
pub struct RestartGameEvent;

/// Toast notification for player feedback.
#[derive(Event, Debug, Clone)]
pub struct ToastEvent {
    pub message: String,
    pub duration_secs: f32,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const STARTING_BALANCE: i64 = -20_000;
pub const MAX_DAYS: u32 = 30;
pub const DAY_LENGTH_SECS: f32 = 120.0;
pub const EXTRA_TIME_SECS: f32 = 30.0;
pub const SKIP_COST: u32 = 50;
pub const MISSION_RETRY_BUDGET: u32 = 10;
pub const CONSOLATION_REWARD: u32 = 15;
pub const SECRET_BONUS: u32 = 50;
pub const MEDIUM_MULTIPLIER_PCT: u32 = 125;
pub const HARD_MULTIPLIER_PCT: u32 = 150;
