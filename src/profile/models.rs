//! Signed-in member profile

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::null_as_default;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessDetails {
    #[serde(rename = "_id", deserialize_with = "null_as_default")]
    pub id: String,
    pub logo: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub banner_image: String,
    #[serde(deserialize_with = "null_as_default")]
    pub business_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub business_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub primary_business: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sub_category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub product: String,
    #[serde(deserialize_with = "null_as_default")]
    pub service: String,
    #[serde(deserialize_with = "null_as_default")]
    pub formation: String,
    pub establishment: Option<String>,
    pub team_size: Option<u32>,
    #[serde(deserialize_with = "null_as_default")]
    pub mobile_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub website: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub about_business_details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BioDetails {
    #[serde(deserialize_with = "null_as_default")]
    pub years_in_business: String,
    #[serde(deserialize_with = "null_as_default")]
    pub previous_types_of_business: String,
    #[serde(deserialize_with = "null_as_default")]
    pub spouse: String,
    #[serde(deserialize_with = "null_as_default")]
    pub children: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pets: String,
    #[serde(deserialize_with = "null_as_default")]
    pub hobbies: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city_of_residence: String,
    #[serde(deserialize_with = "null_as_default")]
    pub year_in_that_city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub my_burning_desire: String,
    #[serde(deserialize_with = "null_as_default")]
    pub something_no_one: String,
    #[serde(deserialize_with = "null_as_default")]
    pub my_key_to_success: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthSheet {
    #[serde(deserialize_with = "null_as_default")]
    pub goals: String,
    #[serde(deserialize_with = "null_as_default")]
    pub accomplishment: String,
    #[serde(deserialize_with = "null_as_default")]
    pub interests: String,
    #[serde(deserialize_with = "null_as_default")]
    pub networks: String,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TopProfile {
    #[serde(deserialize_with = "null_as_default")]
    pub ideal_referral: String,
    #[serde(deserialize_with = "null_as_default")]
    pub top_product: String,
    #[serde(deserialize_with = "null_as_default")]
    pub top_problem_solved: String,
    #[serde(deserialize_with = "null_as_default")]
    pub favourite_lgn_story: String,
    // Backend spelling
    #[serde(deserialize_with = "null_as_default")]
    pub ideal_referral_parter: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklyPresentation {
    #[serde(deserialize_with = "null_as_default")]
    pub presentation1: String,
    #[serde(deserialize_with = "null_as_default")]
    pub presentation2: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fees {
    #[serde(deserialize_with = "null_as_default")]
    pub total_fee: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub paid_fee: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub pending_fee: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub renewal_fee: f64,
    pub end_date: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_renewed: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub induction_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fee_history: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SocialMedia {
    #[serde(deserialize_with = "null_as_default")]
    pub facebook: String,
    #[serde(deserialize_with = "null_as_default")]
    pub instagram: String,
    #[serde(rename = "LinkedIn", deserialize_with = "null_as_default")]
    pub linked_in: String,
    #[serde(deserialize_with = "null_as_default")]
    pub twitter: String,
    #[serde(rename = "YouTube", deserialize_with = "null_as_default")]
    pub you_tube: String,
    #[serde(rename = "WhatsApp", deserialize_with = "null_as_default")]
    pub whats_app: String,
}

/// Profile as returned by `get-users`; every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    #[serde(rename = "_id", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "digitalCardLink", deserialize_with = "null_as_default")]
    pub digital_card_link: String,
    #[serde(deserialize_with = "null_as_default")]
    pub chapter_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mobile_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    pub date_of_birth: Option<String>,
    pub marriage_anniversary: Option<String>,
    #[serde(rename = "profilePic", deserialize_with = "null_as_default")]
    pub profile_pic: String,
    #[serde(deserialize_with = "null_as_default")]
    pub emergency_contact: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub introduction_details: String,
    #[serde(deserialize_with = "null_as_default")]
    pub meeting_role: String,
    #[serde(deserialize_with = "null_as_default")]
    pub keywords: String,
    #[serde(deserialize_with = "null_as_default")]
    pub acc_active: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub paid_fees: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub pending_fees: f64,
    pub due_date_fees: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub points: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub verified: bool,
    #[serde(rename = "isActive", deserialize_with = "null_as_default")]
    pub is_active: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub business: Vec<BusinessDetails>,
    #[serde(deserialize_with = "null_as_default")]
    pub badges: Vec<Value>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
    #[serde(rename = "bioDetails", deserialize_with = "null_as_default")]
    pub bio_details: BioDetails,
    #[serde(rename = "growthSheet", deserialize_with = "null_as_default")]
    pub growth_sheet: GrowthSheet,
    #[serde(rename = "topProfile", deserialize_with = "null_as_default")]
    pub top_profile: TopProfile,
    #[serde(rename = "weeklyPresentation", deserialize_with = "null_as_default")]
    pub weekly_presentation: WeeklyPresentation,
    #[serde(deserialize_with = "null_as_default")]
    pub fees: Fees,
    #[serde(rename = "SocialMedia", deserialize_with = "null_as_default")]
    pub social_media: SocialMedia,
}

impl UserProfile {
    /// Business flagged as primary, else the first one listed
    pub fn primary_business(&self) -> Option<&BusinessDetails> {
        self.business.iter().find(|b| b.primary_business).or_else(|| self.business.first())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> UserProfile {
        serde_json::from_value(json!({
            "_id": "u-1",
            "name": "Asha Patel",
            "address": "12 Ring Road",
            "city": "Surat",
            "state": " ",
            "country": "India",
            "profilePic": "",
            "business": [
                {"_id": "b1", "business_name": "Patel Textiles", "primary_business": false},
                {"_id": "b2", "business_name": "Asha Exports", "primary_business": true}
            ],
            "SocialMedia": {"Facebook": "https://fb.example/asha", "LinkedIn": "  ", "WhatsApp": "+919876543210"},
            "bioDetails": {"yearsInBusiness": "12"},
            "fees": {"total_fee": 12000, "is_renewed": true},
            "unknownField": 42
        }))
        .unwrap()
    }

    #[test]
    fn test_partial_profile_deserializes() {
        let profile = sample();

        assert_eq!(profile.id, "u-1");
        assert_eq!(profile.bio_details.years_in_business, "12");
        assert_eq!(profile.fees.total_fee, 12000.0);
        assert!(profile.fees.is_renewed);
        assert_eq!(profile.growth_sheet, GrowthSheet::default());
        assert_eq!(profile.social_media.whats_app, "+919876543210");
        assert_eq!(profile.social_media.linked_in, "  ");
    }

    #[test]
    fn test_primary_business() {
        let mut profile = sample();
        assert_eq!(profile.primary_business().map(|b| b.id.as_str()), Some("b2"));

        profile.business[1].primary_business = false;
        assert_eq!(profile.primary_business().map(|b| b.id.as_str()), Some("b1"));

        profile.business.clear();
        assert!(profile.primary_business().is_none());
    }

    #[test]
    fn test_null_fields_read_as_defaults() {
        let profile: UserProfile = serde_json::from_value(json!({
            "_id": "u-2",
            "name": "Ravi Shah",
            "profilePic": null,
            "verified": null,
            "points": null,
            "business": [{"_id": "b1", "logo": null, "business_name": null, "primary_business": null}],
            "bioDetails": null,
            "fees": {"total_fee": null, "fee_history": null},
            "SocialMedia": {"Facebook": null}
        }))
        .unwrap();

        assert_eq!(profile.name, "Ravi Shah");
        assert_eq!(profile.profile_pic, "");
        assert!(!profile.verified);
        assert_eq!(profile.points, 0.0);
        assert_eq!(profile.business[0].business_name, "");
        assert!(profile.business[0].logo.is_none());
        assert_eq!(profile.bio_details, BioDetails::default());
        assert_eq!(profile.fees, Fees::default());
        assert_eq!(profile.social_media, SocialMedia::default());
    }
}
