/// Promotion entity shapes and discount rules
///
/// A promotion runs within an explicit date window and applies either to one
/// clinic or, when clinic_id is absent, to all clinics. Discount bounds
/// depend on the discount type.

use crate::domain::{default_true, rules, rules::FieldErrors};
use crate::error::FieldError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the promotion discounts the price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    #[default]
    Percentage,
    Fixed,
    Gift,
    Special,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "percentage",
            DiscountType::Fixed => "fixed",
            DiscountType::Gift => "gift",
            DiscountType::Special => "special",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "fixed" => DiscountType::Fixed,
            "gift" => DiscountType::Gift,
            "special" => DiscountType::Special,
            _ => DiscountType::Percentage,
        }
    }
}

/// Promotion fields shared by the create and response shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionFields {
    /// Headline (max 200 chars)
    pub title: String,
    /// Short description for cards (max 300 chars)
    pub short_description: Option<String>,
    /// Full description, may carry HTML
    pub description: Option<String>,
    #[serde(default)]
    pub discount_type: DiscountType,
    /// Percent or fixed amount depending on discount_type
    pub discount_value: Option<f64>,
    /// Price before the promotion, shown struck through
    pub original_price: Option<f64>,
    /// Price after the promotion
    pub final_price: Option<f64>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub image_url: Option<String>,
    pub gallery: Option<Vec<String>>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Highlighted on the landing page
    #[serde(default)]
    pub is_featured: bool,
    pub conditions: Option<String>,
    pub promo_code: Option<String>,
    /// None applies the promotion to all clinics
    pub clinic_id: Option<i64>,
    /// Services the promotion applies to
    pub service_ids: Option<Vec<i64>>,
}

/// Payload for creating a promotion
pub type PromotionCreate = PromotionFields;

impl PromotionFields {
    /// Validate the whole candidate record
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = FieldErrors::new();

        if self.end_date <= self.start_date {
            errors.add("end_date", "end date must be after the start date");
        }

        if let Some(value) = self.discount_value {
            match self.discount_type {
                DiscountType::Percentage => {
                    if value <= 0.0 {
                        errors.add("discount_value", "percentage discount must be positive");
                    } else if value > 100.0 {
                        errors.add("discount_value", "percentage discount cannot exceed 100");
                    }
                }
                DiscountType::Fixed => {
                    if value <= 0.0 {
                        errors.add("discount_value", "fixed discount must be positive");
                    }
                }
                // Gift and special promotions carry no numeric constraint
                DiscountType::Gift | DiscountType::Special => {}
            }
        }

        if let Some(price) = self.original_price {
            if price < 0.0 {
                errors.add("original_price", "price must not be negative");
            }
        }
        if let Some(price) = self.final_price {
            if price < 0.0 {
                errors.add("final_price", "price must not be negative");
            }
        }

        if let Some(url) = &self.image_url {
            if !rules::is_valid_image_url(url) {
                errors.add(
                    "image_url",
                    "image URL must start with http://, https:// or /media/",
                );
            }
        }
        if let Some(gallery) = &self.gallery {
            for url in gallery {
                if !rules::is_valid_image_url(url) {
                    errors.add(
                        "gallery",
                        "image URL must start with http://, https:// or /media/",
                    );
                    break;
                }
            }
        }

        errors.into_result()
    }
}

/// Partial update payload; only provided fields are applied
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromotionUpdate {
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<f64>,
    pub original_price: Option<f64>,
    pub final_price: Option<f64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub gallery: Option<Vec<String>>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub conditions: Option<String>,
    pub promo_code: Option<String>,
    pub clinic_id: Option<i64>,
    pub service_ids: Option<Vec<i64>>,
}

/// Promotion as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Promotion {
    pub id: i64,
    #[serde(flatten)]
    pub promotion: PromotionFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn valid_promotion() -> PromotionFields {
        PromotionFields {
            title: "Spring checkup".to_string(),
            short_description: None,
            description: None,
            discount_type: DiscountType::Percentage,
            discount_value: Some(20.0),
            original_price: None,
            final_price: None,
            start_date: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap(),
            image_url: None,
            gallery: None,
            is_active: true,
            is_featured: false,
            conditions: None,
            promo_code: None,
            clinic_id: None,
            service_ids: None,
        }
    }

    #[test]
    fn window_with_end_after_start_passes() {
        assert!(valid_promotion().validate().is_ok());
    }

    #[test]
    fn end_date_not_after_start_is_rejected() {
        let promo = PromotionFields {
            end_date: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
            ..valid_promotion()
        };
        assert_eq!(promo.validate().unwrap_err()[0].field, "end_date");

        let promo = PromotionFields {
            end_date: Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap(),
            ..valid_promotion()
        };
        assert!(promo.validate().is_err());
    }

    #[test]
    fn percentage_discount_must_stay_within_bounds() {
        let promo = PromotionFields {
            discount_value: Some(100.0),
            ..valid_promotion()
        };
        assert!(promo.validate().is_ok());

        let promo = PromotionFields {
            discount_value: Some(150.0),
            ..valid_promotion()
        };
        assert_eq!(promo.validate().unwrap_err()[0].field, "discount_value");

        let promo = PromotionFields {
            discount_value: Some(0.0),
            ..valid_promotion()
        };
        assert!(promo.validate().is_err());
    }

    #[test]
    fn fixed_discount_must_be_positive() {
        let promo = PromotionFields {
            discount_type: DiscountType::Fixed,
            discount_value: Some(0.0),
            ..valid_promotion()
        };
        assert_eq!(promo.validate().unwrap_err()[0].field, "discount_value");

        let promo = PromotionFields {
            discount_type: DiscountType::Fixed,
            discount_value: Some(500.0),
            ..valid_promotion()
        };
        assert!(promo.validate().is_ok());
    }

    #[test]
    fn gift_promotions_skip_the_numeric_bounds() {
        let promo = PromotionFields {
            discount_type: DiscountType::Gift,
            discount_value: Some(0.0),
            ..valid_promotion()
        };
        assert!(promo.validate().is_ok());
    }

    #[test]
    fn image_urls_are_prefix_checked() {
        let promo = PromotionFields {
            image_url: Some("cdn.example.com/promo.jpg".to_string()),
            ..valid_promotion()
        };
        assert_eq!(promo.validate().unwrap_err()[0].field, "image_url");
    }
}
