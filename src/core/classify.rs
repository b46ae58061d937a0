use crate::domain::model::Category;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brand {
    NewFlyer,
    Gillig,
}

#[derive(Debug, Clone)]
pub enum Predicate {
    /// Every listed brand has at least one indicator in the text.
    BrandsPresent(Vec<Brand>),
    /// The uppercased text contains a universal hardware keyword.
    AnyKeyword,
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub predicate: Predicate,
    pub category: Category,
    pub brand: String,
}

impl Rule {
    pub fn new(predicate: Predicate, category: Category, brand: &str) -> Self {
        Self {
            predicate,
            category,
            brand: brand.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub brand: String,
}

/// Brand pulled out of the text following the OEM marker phrase.
#[derive(Debug, Clone)]
pub struct FallbackBrand {
    pub pattern: Regex,
    pub default_brand: String,
    pub strip_tokens: Vec<String>,
    pub empty_uses_default: bool,
}

impl FallbackBrand {
    pub fn extract(&self, upper: &str) -> String {
        let Some(raw) = self.pattern.captures(upper).and_then(|caps| caps.get(1)) else {
            return self.default_brand.clone();
        };

        let mut brand = raw.as_str().trim().to_string();
        for token in &self.strip_tokens {
            brand = brand.replace(token.as_str(), "");
        }

        // A marker followed only by strip tokens (`OEM ONLY, INC.`) leaves an
        // empty brand. It takes the default unless `empty_uses_default` is off,
        // in which case the empty string is emitted as-is.
        let brand = title_case(brand.trim());
        if brand.is_empty() && self.empty_uses_default {
            self.default_brand.clone()
        } else {
            brand
        }
    }
}

/// Ordered rule table; the first rule whose predicate holds decides the outcome.
#[derive(Debug, Clone)]
pub struct Classifier {
    new_flyer: Vec<Regex>,
    gillig: Vec<Regex>,
    keywords: Vec<String>,
    rules: Vec<Rule>,
    fallback: FallbackBrand,
}

struct Signals<'t> {
    new_flyer: bool,
    gillig: bool,
    upper: &'t str,
}

impl Classifier {
    pub fn new(
        new_flyer: Vec<Regex>,
        gillig: Vec<Regex>,
        keywords: Vec<String>,
        fallback: FallbackBrand,
    ) -> Self {
        Self {
            new_flyer,
            gillig,
            keywords: keywords.into_iter().map(|k| k.to_uppercase()).collect(),
            rules: Self::default_rules(),
            fallback,
        }
    }

    pub fn default_rules() -> Vec<Rule> {
        vec![
            Rule::new(
                Predicate::BrandsPresent(vec![Brand::NewFlyer, Brand::Gillig]),
                Category::Universal,
                "Multi-Brand",
            ),
            Rule::new(
                Predicate::BrandsPresent(vec![Brand::NewFlyer]),
                Category::NewFlyer,
                "New Flyer",
            ),
            Rule::new(
                Predicate::BrandsPresent(vec![Brand::Gillig]),
                Category::Gillig,
                "Gillig",
            ),
            Rule::new(Predicate::AnyKeyword, Category::Universal, "Generic"),
        ]
    }

    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn classify(&self, text: &str) -> Classification {
        let upper = text.to_uppercase();
        let signals = Signals {
            new_flyer: self.new_flyer.iter().any(|re| re.is_match(text)),
            gillig: self.gillig.iter().any(|re| re.is_match(text)),
            upper: &upper,
        };

        for rule in &self.rules {
            if self.holds(&rule.predicate, &signals) {
                return Classification {
                    category: rule.category,
                    brand: rule.brand.clone(),
                };
            }
        }

        Classification {
            category: Category::Misc,
            brand: self.fallback.extract(&upper),
        }
    }

    fn holds(&self, predicate: &Predicate, signals: &Signals<'_>) -> bool {
        match predicate {
            Predicate::BrandsPresent(brands) => brands.iter().all(|brand| match brand {
                Brand::NewFlyer => signals.new_flyer,
                Brand::Gillig => signals.gillig,
            }),
            Predicate::AnyKeyword => self
                .keywords
                .iter()
                .any(|keyword| signals.upper.contains(keyword.as_str())),
        }
    }
}

/// Uppercases a letter that follows a non-letter and lowercases the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }

    out
}
