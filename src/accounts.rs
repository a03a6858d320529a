//! Account record model and alignment derivation.
//!
//! Each account tracks one customer: the business outcome they bought for,
//! who sponsors it, how often progress is reviewed, and one embedded
//! expansion opportunity (always present, default = all fields unset).
//!
//! Alignment status is derived from current field values on every read —
//! never stored, never cached. Both derivation functions are pure and total.

use serde::{Deserialize, Serialize};

// =============================================================================
// Record model
// =============================================================================

/// How often outcome progress is reviewed with the account's stakeholders.
///
/// `Unset` serializes as the empty string; unrecognized stored values
/// deserialize to `Unset` rather than failing the load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReviewCadence {
    Monthly,
    Quarterly,
    None,
    #[default]
    #[serde(rename = "", other)]
    Unset,
}

/// Kind of expansion opportunity tracked on an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExpansionType {
    Upsell,
    #[serde(rename = "Cross-sell")]
    CrossSell,
    Upgrade,
    #[serde(rename = "Add-on")]
    AddOn,
    #[default]
    #[serde(rename = "", other)]
    Unset,
}

/// Pipeline stage of an expansion opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExpansionStage {
    Identified,
    Qualified,
    Proposed,
    Committed,
    #[default]
    #[serde(rename = "", other)]
    Unset,
}

/// Expansion opportunity embedded in an account, exactly one per account.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpansionOpportunity {
    #[serde(rename = "type")]
    pub kind: ExpansionType,
    pub stage: ExpansionStage,
    pub estimated_value: String,
    pub trigger: String,
    pub notes: String,
}

/// One customer account in the portfolio.
///
/// `id` is stable and unique within the working set; accounts are only ever
/// updated in place, never created or deleted on this surface.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Account {
    pub id: String,
    pub company_name: String,
    pub industry: String,
    pub renewal_date: String,
    pub desired_outcome: String,
    pub primary_metric: String,
    pub executive_sponsor: String,
    pub review_cadence: ReviewCadence,
    /// Owner's confidence in alignment, intended range 1–5. Not enforced:
    /// out-of-range values still derive a status instead of erroring.
    pub confidence_level: i32,
    pub expansion: ExpansionOpportunity,
}

// =============================================================================
// Status derivation
// =============================================================================

/// Traffic-light classification of how well an account's success criteria
/// and stakeholders are documented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentStatus {
    Green,
    Yellow,
    Red,
}

impl AlignmentStatus {
    /// Display label as rendered on the status badge.
    pub fn label(self) -> &'static str {
        match self {
            AlignmentStatus::Green => "Aligned",
            AlignmentStatus::Yellow => "At Risk",
            AlignmentStatus::Red => "Needs Attention",
        }
    }
}

/// Derive the alignment status of an account from its current field values.
///
/// Red until the outcome, metric, sponsor, and a real review cadence are all
/// documented (whitespace-only strings count as blank; confidence is ignored
/// at this step). Once filled, confidence below 3 is yellow, otherwise green.
pub fn alignment_status(account: &Account) -> AlignmentStatus {
    let filled = !account.desired_outcome.trim().is_empty()
        && !account.primary_metric.trim().is_empty()
        && !account.executive_sponsor.trim().is_empty()
        && account.review_cadence != ReviewCadence::Unset
        && account.review_cadence != ReviewCadence::None;

    if !filled {
        AlignmentStatus::Red
    } else if account.confidence_level < 3 {
        AlignmentStatus::Yellow
    } else {
        AlignmentStatus::Green
    }
}

/// True iff the account is green and an expansion type has been picked.
///
/// Stage and the other expansion fields are not consulted; readiness gates on
/// alignment plus a named opportunity, nothing more.
pub fn is_expansion_ready(account: &Account) -> bool {
    alignment_status(account) == AlignmentStatus::Green
        && account.expansion.kind != ExpansionType::Unset
}

// =============================================================================
// Seed data
// =============================================================================

/// Fixed seed portfolio used when no valid stored data exists.
///
/// Two accounts carry a populated expansion opportunity, two a blank one.
pub fn seed_accounts() -> Vec<Account> {
    vec![
        Account {
            id: "1".to_string(),
            company_name: "Acme Corp".to_string(),
            industry: "Technology".to_string(),
            renewal_date: "2026-06-15".to_string(),
            desired_outcome: "Reduce churn by 20%".to_string(),
            primary_metric: "Net Revenue Retention".to_string(),
            executive_sponsor: "Jane Smith, VP CS".to_string(),
            review_cadence: ReviewCadence::Monthly,
            confidence_level: 4,
            expansion: ExpansionOpportunity {
                kind: ExpansionType::Upsell,
                stage: ExpansionStage::Qualified,
                estimated_value: "$45,000".to_string(),
                trigger: "Approaching seat limit on current plan".to_string(),
                notes: "Champion wants pricing before Q3 budget lock".to_string(),
            },
        },
        Account {
            id: "2".to_string(),
            company_name: "GlobalTech Inc".to_string(),
            industry: "Finance".to_string(),
            renewal_date: "2026-04-01".to_string(),
            desired_outcome: "Improve onboarding speed".to_string(),
            primary_metric: "Time to first value".to_string(),
            executive_sponsor: String::new(),
            review_cadence: ReviewCadence::Quarterly,
            confidence_level: 2,
            expansion: ExpansionOpportunity::default(),
        },
        Account {
            id: "3".to_string(),
            company_name: "HealthFirst".to_string(),
            industry: "Healthcare".to_string(),
            renewal_date: "2026-09-30".to_string(),
            desired_outcome: String::new(),
            primary_metric: String::new(),
            executive_sponsor: String::new(),
            review_cadence: ReviewCadence::Unset,
            confidence_level: 1,
            expansion: ExpansionOpportunity::default(),
        },
        Account {
            id: "4".to_string(),
            company_name: "EduLearn Platform".to_string(),
            industry: "Education".to_string(),
            renewal_date: "2026-07-20".to_string(),
            desired_outcome: "Increase user engagement by 30%".to_string(),
            primary_metric: "Daily Active Users".to_string(),
            executive_sponsor: "Tom Lee, CTO".to_string(),
            review_cadence: ReviewCadence::Monthly,
            confidence_level: 5,
            expansion: ExpansionOpportunity {
                kind: ExpansionType::CrossSell,
                stage: ExpansionStage::Identified,
                estimated_value: "$20,000".to_string(),
                trigger: "Asked about the analytics module during QBR".to_string(),
                notes: String::new(),
            },
        },
    ]
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_account() -> Account {
        Account {
            id: "a1".to_string(),
            company_name: "Test Co".to_string(),
            industry: "Tech".to_string(),
            renewal_date: "2026-01-01".to_string(),
            desired_outcome: "x".to_string(),
            primary_metric: "y".to_string(),
            executive_sponsor: "z".to_string(),
            review_cadence: ReviewCadence::Monthly,
            confidence_level: 4,
            expansion: ExpansionOpportunity {
                kind: ExpansionType::Upsell,
                stage: ExpansionStage::Identified,
                estimated_value: "$10k".to_string(),
                trigger: "seat growth".to_string(),
                notes: String::new(),
            },
        }
    }

    #[test]
    fn test_filled_confident_account_is_green_and_ready() {
        let account = filled_account();
        assert_eq!(alignment_status(&account), AlignmentStatus::Green);
        assert!(is_expansion_ready(&account));
    }

    #[test]
    fn test_blank_sponsor_is_red() {
        let mut account = filled_account();
        account.executive_sponsor = String::new();
        assert_eq!(alignment_status(&account), AlignmentStatus::Red);
        assert!(!is_expansion_ready(&account));
    }

    #[test]
    fn test_whitespace_only_fields_count_as_blank() {
        let mut account = filled_account();
        account.desired_outcome = "   ".to_string();
        assert_eq!(alignment_status(&account), AlignmentStatus::Red);

        let mut account = filled_account();
        account.primary_metric = "\t\n".to_string();
        assert_eq!(alignment_status(&account), AlignmentStatus::Red);
    }

    #[test]
    fn test_red_ignores_confidence() {
        let mut account = filled_account();
        account.desired_outcome = String::new();
        account.confidence_level = 5;
        assert_eq!(alignment_status(&account), AlignmentStatus::Red);
    }

    #[test]
    fn test_cadence_none_or_unset_is_red() {
        let mut account = filled_account();
        account.review_cadence = ReviewCadence::None;
        assert_eq!(alignment_status(&account), AlignmentStatus::Red);

        account.review_cadence = ReviewCadence::Unset;
        assert_eq!(alignment_status(&account), AlignmentStatus::Red);
    }

    #[test]
    fn test_low_confidence_is_yellow() {
        for confidence in [1, 2] {
            let mut account = filled_account();
            account.confidence_level = confidence;
            assert_eq!(alignment_status(&account), AlignmentStatus::Yellow);
            assert!(!is_expansion_ready(&account));
        }
    }

    #[test]
    fn test_high_confidence_is_green() {
        for confidence in [3, 4, 5] {
            let mut account = filled_account();
            account.confidence_level = confidence;
            assert_eq!(alignment_status(&account), AlignmentStatus::Green);
        }
    }

    #[test]
    fn test_out_of_range_confidence_still_derives_yellow() {
        for confidence in [0, -1, -100] {
            let mut account = filled_account();
            account.confidence_level = confidence;
            assert_eq!(alignment_status(&account), AlignmentStatus::Yellow);
        }
    }

    #[test]
    fn test_green_without_expansion_type_is_not_ready() {
        let mut account = filled_account();
        account.expansion.kind = ExpansionType::Unset;
        assert_eq!(alignment_status(&account), AlignmentStatus::Green);
        assert!(!is_expansion_ready(&account));
    }

    #[test]
    fn test_readiness_ignores_stage() {
        let mut account = filled_account();
        account.expansion.stage = ExpansionStage::Unset;
        assert!(is_expansion_ready(&account));
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let account = filled_account();
        assert_eq!(alignment_status(&account), alignment_status(&account));
        assert_eq!(is_expansion_ready(&account), is_expansion_ready(&account));
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(AlignmentStatus::Green.label(), "Aligned");
        assert_eq!(AlignmentStatus::Yellow.label(), "At Risk");
        assert_eq!(AlignmentStatus::Red.label(), "Needs Attention");
    }

    #[test]
    fn test_seed_accounts_shape() {
        let seed = seed_accounts();
        assert_eq!(seed.len(), 4);

        let mut ids: Vec<&str> = seed.iter().map(|a| a.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 4, "seed ids must be unique");

        let populated = seed
            .iter()
            .filter(|a| a.expansion.kind != ExpansionType::Unset)
            .count();
        assert_eq!(populated, 2);
    }

    #[test]
    fn test_serializes_with_camel_case_field_names() {
        let json = serde_json::to_value(filled_account()).unwrap();
        assert!(json.get("companyName").is_some());
        assert!(json.get("reviewCadence").is_some());
        assert!(json.get("confidenceLevel").is_some());
        assert_eq!(json["expansion"]["type"], "Upsell");
        assert_eq!(json["expansion"]["estimatedValue"], "$10k");
    }

    #[test]
    fn test_unset_enums_serialize_as_empty_string() {
        let json = serde_json::to_value(Account::default()).unwrap();
        assert_eq!(json["reviewCadence"], "");
        assert_eq!(json["expansion"]["type"], "");
        assert_eq!(json["expansion"]["stage"], "");
    }

    #[test]
    fn test_unknown_enum_values_deserialize_to_unset() {
        let account: Account = serde_json::from_value(serde_json::json!({
            "id": "9",
            "companyName": "Odd Co",
            "reviewCadence": "Weekly",
            "expansion": { "type": "Renewal", "stage": "Won" }
        }))
        .unwrap();
        assert_eq!(account.review_cadence, ReviewCadence::Unset);
        assert_eq!(account.expansion.kind, ExpansionType::Unset);
        assert_eq!(account.expansion.stage, ExpansionStage::Unset);
    }
}
