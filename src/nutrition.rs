use crate::stage::Staged;
use std::fmt;

/// Nutrition facts for a packaged product.
///
/// Instances are immutable and can only be obtained from a
/// [`NutritionFactsBuilder`].
///
/// # Examples
///
/// ```
/// use typed_registry::NutritionFacts;
///
/// let facts = NutritionFacts::builder(250, 1)
///     .calories(140)
///     .sodium(35)
///     .carbohydrate(27)
///     .build();
///
/// assert_eq!(facts.serving_size(), 250);
/// assert_eq!(facts.fat(), 0);
/// assert_eq!(facts.sodium(), 35);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawNutritionFacts"))]
pub struct NutritionFacts {
    serving_size: u32,
    servings: u32,
    calories: u32,
    fat: u32,
    sodium: u32,
    carbohydrate: u32,
}

impl NutritionFacts {
    /// Starts a builder with the required fields
    pub fn builder(serving_size: u32, servings: u32) -> NutritionFactsBuilder {
        NutritionFactsBuilder::new(serving_size, servings)
    }

    /// Serving size in millilitres
    pub fn serving_size(&self) -> u32 {
        self.serving_size
    }

    /// Servings per pack
    pub fn servings(&self) -> u32 {
        self.servings
    }

    /// Energy per serving in kilocalories
    pub fn calories(&self) -> u32 {
        self.calories
    }

    /// Fat per serving in grams
    pub fn fat(&self) -> u32 {
        self.fat
    }

    /// Sodium per serving in milligrams
    pub fn sodium(&self) -> u32 {
        self.sodium
    }

    /// Carbohydrate per serving in grams
    pub fn carbohydrate(&self) -> u32 {
        self.carbohydrate
    }
}

impl fmt::Display for NutritionFacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ServingSize: {}, Servings: {}, Calories: {}, Fat: {}, Sodium: {}, Carbohydrate: {}",
            self.serving_size, self.servings, self.calories, self.fat, self.sodium, self.carbohydrate
        )
    }
}

/// Stage for [`NutritionFacts`]: required fields at creation, optional
/// fields defaulting to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NutritionFactsBuilder {
    serving_size: u32,
    servings: u32,
    calories: u32,
    fat: u32,
    sodium: u32,
    carbohydrate: u32,
}

impl NutritionFactsBuilder {
    /// Creates a stage from the required fields.
    ///
    /// Quantities are unsigned, so every value, zero included, is accepted.
    pub fn new(serving_size: u32, servings: u32) -> Self {
        Self {
            serving_size,
            servings,
            calories: 0,
            fat: 0,
            sodium: 0,
            carbohydrate: 0,
        }
    }

    /// Sets the calories per serving
    pub fn calories(&mut self, val: u32) -> &mut Self {
        self.calories = val;
        self
    }

    /// Sets the fat per serving
    pub fn fat(&mut self, val: u32) -> &mut Self {
        self.fat = val;
        self
    }

    /// Sets the sodium per serving
    pub fn sodium(&mut self, val: u32) -> &mut Self {
        self.sodium = val;
        self
    }

    /// Sets the carbohydrate per serving
    pub fn carbohydrate(&mut self, val: u32) -> &mut Self {
        self.carbohydrate = val;
        self
    }

    /// Copies the current field values into a new [`NutritionFacts`]
    pub fn build(&self) -> NutritionFacts {
        let facts = NutritionFacts {
            serving_size: self.serving_size,
            servings: self.servings,
            calories: self.calories,
            fat: self.fat,
            sodium: self.sodium,
            carbohydrate: self.carbohydrate,
        };
        tracing::debug!(%facts, "built nutrition facts");
        facts
    }
}

impl Staged for NutritionFactsBuilder {
    type Product = NutritionFacts;

    fn build(&self) -> NutritionFacts {
        NutritionFactsBuilder::build(self)
    }
}

// Deserialized values go through the builder so they pick up its defaults.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawNutritionFacts {
    serving_size: u32,
    servings: u32,
    #[serde(default)]
    calories: u32,
    #[serde(default)]
    fat: u32,
    #[serde(default)]
    sodium: u32,
    #[serde(default)]
    carbohydrate: u32,
}

#[cfg(feature = "serde")]
impl From<RawNutritionFacts> for NutritionFacts {
    fn from(raw: RawNutritionFacts) -> Self {
        NutritionFactsBuilder::new(raw.serving_size, raw.servings)
            .calories(raw.calories)
            .fat(raw.fat)
            .sodium(raw.sodium)
            .carbohydrate(raw.carbohydrate)
            .build()
    }
}
